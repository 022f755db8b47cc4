use automata_sim_lib::{
    automaton::{
        Machine,
        cfg::{Cfg, Membership},
        definition::{DfaDefinition, TransitionDef},
    },
    config::{GrammarConfig, ValidatorConfig},
    validation::{LineOutcome, ValidationSession},
};

fn ab_machine() -> Machine {
    Machine::Dfa(
        DfaDefinition {
            states: vec!["q0".to_string(), "q1".to_string()],
            alphabet: vec!['a', 'b'],
            start_state: "q0".to_string(),
            end_states: vec!["q1".to_string()],
            transitions: vec![
                TransitionDef::new("q0", "a", "q1"),
                TransitionDef::new("q1", "b", "q0"),
            ],
        }
        .compile()
        .unwrap(),
    )
}

#[test]
fn test_batch_results_keep_input_order() {
    let machine = ab_machine();
    let session = ValidationSession::new(&machine, ValidatorConfig::default());

    let results = session.validate_batch("a\nab\naba").unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].input, "a");
    assert!(results[0].outcome.accepted());
    assert_eq!(results[1].input, "ab");
    assert!(!results[1].outcome.accepted());
    assert_eq!(results[2].input, "aba");
    assert!(results[2].outcome.accepted());
}

#[test]
fn test_blank_lines_and_padding_are_skipped() {
    let machine = ab_machine();
    let session = ValidationSession::new(&machine, ValidatorConfig::default());

    let results = session.validate_batch("  a  \n\n   \nab\n").unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].input, "a");
    assert_eq!(results[1].input, "ab");
}

#[test]
fn test_alphabet_violation_aborts_the_whole_batch() {
    let machine = ab_machine();
    let session = ValidationSession::new(&machine, ValidatorConfig::default());

    // "a" alone would be fine, but the bad line poisons the batch.
    let err = session.validate_batch("a\nabc\nb").unwrap_err();

    assert_eq!(err.input, "abc");
    assert_eq!(err.offending, vec!['c']);
    assert_eq!(err.alphabet, vec!['a', 'b']);
    // The message names the expected alphabet, not the bad characters.
    assert_eq!(
        err.to_string(),
        "String \"abc\" contains characters not in the automaton's alphabet: [a, b]"
    );
}

#[test]
fn test_alphabet_violation_lists_each_bad_character_once() {
    let machine = ab_machine();
    let session = ValidationSession::new(&machine, ValidatorConfig::default());

    let err = session.validate_batch("axyax").unwrap_err();
    assert_eq!(err.offending, vec!['x', 'y']);
}

#[test]
fn test_violation_in_the_last_line_still_aborts() {
    let machine = ab_machine();
    let session = ValidationSession::new(&machine, ValidatorConfig::default());

    let err = session.validate_batch("a\nab\naZ").unwrap_err();
    assert_eq!(err.input, "aZ");
}

#[test]
fn test_runs_carry_traces() {
    let machine = ab_machine();
    let session = ValidationSession::new(&machine, ValidatorConfig::default());

    let results = session.validate_batch("ab").unwrap();
    let trace = results[0].outcome.trace().unwrap();
    assert_eq!(trace.states().collect::<Vec<_>>(), vec!["q0", "q1", "q0"]);
}

#[test]
fn test_grammar_batches_skip_the_alphabet_check() {
    let machine = Machine::Cfg(Cfg::parse('S', &["S → a S b | λ"]).unwrap());
    let session = ValidationSession::new(&machine, ValidatorConfig::default());

    // "xyz" is not in any declared alphabet; grammars have none.
    let results = session.validate_batch("aabb\nxyz").unwrap();

    assert_eq!(
        results[0].outcome,
        LineOutcome::Membership(Membership::Member)
    );
    assert_eq!(
        results[1].outcome,
        LineOutcome::Membership(Membership::NotMember)
    );
    assert!(results[0].outcome.trace().is_none());
}

#[test]
fn test_grammar_budget_comes_from_config() {
    let machine = Machine::Cfg(Cfg::parse('S', &["S → S S | λ"]).unwrap());
    let config =
        ValidatorConfig::default().with_grammar(GrammarConfig::default().with_derivation_budget(50));
    let session = ValidationSession::new(&machine, config);

    let results = session.validate_batch("a").unwrap();
    assert_eq!(
        results[0].outcome,
        LineOutcome::Membership(Membership::Unknown)
    );
}
