use automata_sim_lib::{
    automaton::{MachineKind, cfg::Membership},
    catalog::Catalog,
};

#[test]
fn test_builtin_catalog_compiles() {
    let catalog = Catalog::builtin().unwrap();
    assert_eq!(catalog.len(), 2);

    for sample in catalog.iter() {
        assert_eq!(sample.dfa.kind(), MachineKind::Dfa);
        assert_eq!(sample.pda.kind(), MachineKind::Pda);
        assert_eq!(sample.cfg.kind(), MachineKind::Cfg);
        assert_eq!(sample.machine(MachineKind::Dfa).kind(), MachineKind::Dfa);
    }

    assert!(catalog.sample(1).is_some());
    assert!(catalog.sample(2).is_some());
    assert!(catalog.sample(3).is_none());
}

#[test]
fn test_binary_dfa_accepts_a_known_member() {
    let catalog = Catalog::builtin().unwrap();
    let dfa = catalog.sample(1).unwrap().dfa.as_dfa().unwrap();

    let run = dfa.run("111111011");
    assert!(run.accepted);
    assert_eq!(
        run.trace.states().collect::<Vec<_>>(),
        vec!["q1", "q2", "q3", "q5", "q6", "q7", "q11", "q12", "q31", "q33"]
    );

    assert!(!dfa.accepts("10101"));
    assert!(!dfa.accepts(""));
}

#[test]
fn test_binary_pda_run_with_epsilon_moves() {
    let catalog = Catalog::builtin().unwrap();
    let pda = catalog.sample(1).unwrap().pda.as_pda().unwrap();

    // The initial epsilon is taken as a fallback for the first symbol and
    // the trailing epsilon lands in Accept.
    let run = pda.run("0000");
    assert!(run.accepted);
    assert_eq!(
        run.trace.states().collect::<Vec<_>>(),
        vec!["Start", "Read1", "Read2", "Read3", "Read5", "Read8", "Accept"]
    );
}

#[test]
fn test_ab_dfa_traps_bad_prefixes() {
    let catalog = Catalog::builtin().unwrap();
    let dfa = catalog.sample(2).unwrap().dfa.as_dfa().unwrap();

    // "aa" falls into the trap state and can never recover.
    let run = dfa.run("aaababab");
    assert!(!run.accepted);
    assert_eq!(run.trace.states().nth(2), Some("T"));

    assert!(!dfa.accepts("ab"));
}

#[test]
fn test_ab_pda_accepts_via_joint_transition() {
    let catalog = Catalog::builtin().unwrap();
    let pda = catalog.sample(2).unwrap().pda.as_pda().unwrap();

    // abab abb aa b ab a -> reaches Read12/13 territory via Read6/7 loops.
    let run = pda.run("ababa");
    assert_eq!(
        run.trace.states().take(4).collect::<Vec<_>>(),
        vec!["Start", "Read1", "Read2", "Read4"]
    );
}

#[test]
fn test_ab_cfg_membership() {
    let catalog = Catalog::builtin().unwrap();
    let cfg = catalog.sample(2).unwrap().cfg.as_cfg().unwrap();

    // A C E F G H J with everything nullable skipped:
    // ab aaa b a a aa aa
    assert_eq!(
        cfg.membership("abaaabaaaaaa", 100_000),
        Membership::Member
    );
    assert_eq!(cfg.membership("ab", 100_000), Membership::NotMember);
}

#[test]
fn test_binary_cfg_is_nonproductive() {
    let catalog = Catalog::builtin().unwrap();
    let cfg = catalog.sample(1).unwrap().cfg.as_cfg().unwrap();

    // S requires I, and I can only grow, so no finite string is a member.
    // The terminal-count pruning still lets the search decide.
    assert_eq!(cfg.membership("111101", 100_000), Membership::NotMember);
}

#[test]
fn test_regex_texts_are_present() {
    let catalog = Catalog::builtin().unwrap();

    assert!(catalog.sample(1).unwrap().regex.starts_with("(111+000+101+001)"));
    assert!(catalog.sample(2).unwrap().regex.starts_with("(ab+ba)"));
}
