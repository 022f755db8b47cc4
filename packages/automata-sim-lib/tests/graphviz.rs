use automata_sim_lib::automaton::{
    cfg::Cfg,
    definition::{DfaDefinition, PdaDefinition, TransitionDef},
};

fn two_state_dfa() -> DfaDefinition {
    DfaDefinition {
        states: vec!["q0".to_string(), "q1".to_string()],
        alphabet: vec!['a'],
        start_state: "q0".to_string(),
        end_states: vec!["q1".to_string()],
        transitions: vec![TransitionDef::new("q0", "a", "q1")],
    }
}

#[test]
fn test_dfa_graphviz_golden() {
    let dfa = two_state_dfa().compile().unwrap();

    let expected = "digraph G {\n\
                    \x20 rankdir=LR;\n\
                    \x20 node [shape=circle];\n\
                    \x20 \"q0\";\n\
                    \x20 \"q1\" [shape=doublecircle];\n\
                    \x20 \"q0\" -> \"q1\" [label=\"a\"];\n\
                    }\n";
    assert_eq!(dfa.to_graphviz(None, "yellow"), expected);
}

#[test]
fn test_dfa_graphviz_highlight_touches_one_node() {
    let dfa = two_state_dfa().compile().unwrap();

    let plain = dfa.to_graphviz(None, "yellow");
    let highlighted = dfa.to_graphviz(Some("q0"), "yellow");

    assert!(highlighted.contains("  \"q0\" [style=filled, fillcolor=\"yellow\"];\n"));
    assert!(!plain.contains("fillcolor"));

    // Every other line is unchanged.
    let changed: Vec<_> = plain
        .lines()
        .zip(highlighted.lines())
        .filter(|(a, b)| a != b)
        .collect();
    assert_eq!(changed.len(), 1);
}

#[test]
fn test_dfa_graphviz_unknown_highlight_is_ignored() {
    let dfa = two_state_dfa().compile().unwrap();

    assert_eq!(
        dfa.to_graphviz(Some("q9"), "yellow"),
        dfa.to_graphviz(None, "yellow")
    );
}

#[test]
fn test_pda_graphviz_shapes() {
    let pda = PdaDefinition {
        states: vec![
            "Start".to_string(),
            "Push".to_string(),
            "Plain".to_string(),
            "Accept".to_string(),
        ],
        alphabet: vec!['a', 'b'],
        start_state: "Start".to_string(),
        push_states: vec!["Push".to_string()],
        pop_states: vec![],
        accept_states: vec!["Accept".to_string()],
        transitions: vec![
            TransitionDef::new("Start", "a", "Push"),
            TransitionDef::new("Push", "b", "Plain"),
            TransitionDef::new("Plain", "", "Accept"),
        ],
    }
    .compile()
    .unwrap();

    let dot = pda.to_graphviz(None, "yellow");

    assert!(dot.contains("rankdir=TB;"));
    assert!(dot.contains("node [shape=diamond];"));
    assert!(dot.contains("  start [shape=none, label=\"\"];\n"));
    assert!(dot.contains("  start -> \"Start\" [label=\"start\"];\n"));

    assert!(dot.contains("  \"Start\" [shape=ellipse];\n"));
    assert!(dot.contains("  \"Push\" [shape=rectangle];\n"));
    assert!(dot.contains("  \"Plain\" [shape=diamond];\n"));
    assert!(dot.contains("  \"Accept\" [peripheries=2, shape=ellipse];\n"));

    // The epsilon edge is labeled with the epsilon glyph.
    assert!(dot.contains("  \"Plain\" -> \"Accept\" [label=\"ε\"];\n"));
}

#[test]
fn test_pda_graphviz_highlight() {
    let pda = PdaDefinition {
        states: vec!["Start".to_string(), "Accept".to_string()],
        alphabet: vec!['a'],
        start_state: "Start".to_string(),
        push_states: vec![],
        pop_states: vec![],
        accept_states: vec!["Accept".to_string()],
        transitions: vec![TransitionDef::new("Start", "a", "Accept")],
    }
    .compile()
    .unwrap();

    let dot = pda.to_graphviz(Some("Accept"), "lightblue");
    assert!(dot.contains(
        "  \"Accept\" [style=filled, fillcolor=\"lightblue\", peripheries=2, shape=ellipse];\n"
    ));
}

#[test]
fn test_cfg_graphviz_chains_productions_invisibly() {
    let cfg = Cfg::parse('S', &["S → a A", "A → b | λ"]).unwrap();

    let dot = cfg.to_graphviz();
    assert!(dot.contains("node [shape=rectangle];"));
    assert!(dot.contains("  \"S → a A\" [label=\"S → a A\"];\n"));
    assert!(dot.contains("  \"A → b | λ\" [label=\"A → b | λ\"];\n"));
    assert!(dot.contains("  \"S → a A\" -> \"A → b | λ\" [style=invis];\n"));
}

#[test]
fn test_graphviz_escapes_quotes_in_state_names() {
    let dfa = DfaDefinition {
        states: vec!["q\"0".to_string()],
        alphabet: vec!['a'],
        start_state: "q\"0".to_string(),
        end_states: vec![],
        transitions: vec![TransitionDef::new("q\"0", "a", "q\"0")],
    }
    .compile()
    .unwrap();

    let dot = dfa.to_graphviz(None, "yellow");
    assert!(dot.contains("\"q\\\"0\""));
}
