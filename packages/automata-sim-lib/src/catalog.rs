//! The built-in sample catalog.
//!
//! Each sample is a regular expression together with three equivalent
//! machines for the same language. The definitions are compiled once when
//! the catalog is built, so a malformed sample is caught at startup.

use crate::automaton::{
    Machine, MachineKind,
    cfg::Cfg,
    definition::{DfaDefinition, PdaDefinition, TransitionDef},
};

/// A sample language: the regex and the three machines recognizing it.
#[derive(Debug, Clone)]
pub struct RegexSample {
    pub id: u32,
    pub regex: String,
    pub dfa: Machine,
    pub cfg: Machine,
    pub pda: Machine,
}

impl RegexSample {
    pub fn machine(&self, kind: MachineKind) -> &Machine {
        match kind {
            MachineKind::Dfa => &self.dfa,
            MachineKind::Pda => &self.pda,
            MachineKind::Cfg => &self.cfg,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    samples: Vec<RegexSample>,
}

impl Catalog {
    /// Compiles the two built-in samples.
    pub fn builtin() -> anyhow::Result<Catalog> {
        Ok(Catalog {
            samples: vec![binary_sample()?, ab_sample()?],
        })
    }

    pub fn sample(&self, id: u32) -> Option<&RegexSample> {
        self.samples.iter().find(|sample| sample.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegexSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn t(from: &str, symbols: &str, to: &str) -> TransitionDef {
    TransitionDef::new(from, symbols, to)
}

/// Sample 1, over the alphabet `{1, 0}`.
fn binary_sample() -> anyhow::Result<RegexSample> {
    let dfa = DfaDefinition {
        states: names(&[
            "q1", "q2", "q3", "q4", "q5", "q6", "q7", "q8", "q9", "q10", "q11", "q12", "q13",
            "q14", "q15", "q16", "q17", "q18", "q19", "q20", "q21", "q22", "q23", "q24", "q25",
            "q26", "q27", "q28", "q29", "q30", "q31", "q32", "q33",
        ]),
        alphabet: vec!['1', '0'],
        start_state: "q1".to_string(),
        end_states: names(&["q33"]),
        transitions: vec![
            t("q1", "10", "q2"),
            t("q2", "1", "q3"),
            t("q2", "0", "q4"),
            t("q3", "1", "q5"),
            t("q3", "0", "q4"),
            t("q4", "0", "q25"),
            t("q4", "1", "q3"),
            t("q5", "0", "q28"),
            t("q5", "1", "q6"),
            t("q6", "1", "q7"),
            t("q6", "0", "q8"),
            t("q7", "1", "q11"),
            t("q7", "0", "q8"),
            t("q8", "0", "q9"),
            t("q8", "1", "q10"),
            t("q9", "0", "q13"),
            t("q9", "1", "q15"),
            t("q10", "1", "q16"),
            t("q10", "0", "q21"),
            t("q11", "1", "q11"),
            t("q11", "0", "q12"),
            t("q12", "0", "q18"),
            t("q12", "1", "q31"),
            t("q13", "1", "q30"),
            t("q13", "0", "q14"),
            t("q14", "0", "q14"),
            t("q14", "1", "q15"),
            t("q15", "1", "q16"),
            t("q15", "0", "q32"),
            t("q16", "1", "q11"),
            t("q16", "0", "q17"),
            t("q17", "1", "q20"),
            t("q17", "0", "q18"),
            t("q18", "1", "q19"),
            t("q18", "0", "q33"),
            t("q19", "1", "q33"),
            t("q19", "0", "q32"),
            t("q20", "1", "q33"),
            t("q20", "0", "q4"),
            t("q21", "1", "q20"),
            t("q21", "0", "q22"),
            t("q22", "0", "q33"),
            t("q22", "1", "q23"),
            t("q23", "0", "q24"),
            t("q23", "1", "q33"),
            t("q24", "1", "q10"),
            t("q24", "0", "q25"),
            t("q25", "1", "q26"),
            t("q25", "0", "q13"),
            t("q26", "0", "q24"),
            t("q26", "1", "q27"),
            t("q27", "0", "q28"),
            t("q27", "1", "q11"),
            t("q28", "1", "q29"),
            t("q28", "0", "q9"),
            t("q29", "0", "q4"),
            t("q29", "1", "q16"),
            t("q30", "1", "q16"),
            t("q30", "0", "q24"),
            t("q31", "1", "q33"),
            t("q31", "0", "q21"),
            t("q32", "1", "q31"),
            t("q32", "0", "q22"),
            t("q33", "10", "q33"),
        ],
    }
    .compile()?;

    let cfg = Cfg::parse(
        'S',
        &[
            "S → A B C D E F A I J K L",
            "A → 111 | 000 | 101 | 001 | 00G",
            "B → 7B | 0B | λ",
            "C → 1 | 00",
            "D → 1100 | 100D | λ",
            "E → 101F | 111 | 000F | λ",
            "F → G",
            "G → C",
            "H → 11011",
            "I → 111I",
            "J → 0 | 10J",
            "K → K | 0K | 01 | 1",
            "L → B",
        ],
    )?;

    let pda = PdaDefinition {
        states: names(&[
            "Start", "Read1", "Read2", "Read3", "Read4", "Read5", "Read6", "Read7", "Read8",
            "Accept",
        ]),
        alphabet: vec!['1', '0'],
        start_state: "Start".to_string(),
        push_states: vec![],
        pop_states: vec![],
        accept_states: names(&["Accept"]),
        transitions: vec![
            t("Start", "", "Read1"),
            t("Read1", "01", "Read2"),
            t("Read2", "0", "Read3"),
            t("Read2", "1", "Read4"),
            t("Read3", "0", "Read5"),
            t("Read3", "1", "Read4"),
            t("Read4", "0", "Read7"),
            t("Read4", "1", "Read6"),
            t("Read6", "0", "Read7"),
            t("Read5", "0", "Read8"),
            t("Read5", "1", "Read4"),
            t("Read6", "1", "Read8"),
            t("Read7", "1", "Read8"),
            t("Read7", "0", "Read3"),
            t("Read8", "01", "Read8"),
            t("Read8", "", "Accept"),
        ],
    }
    .compile()?;

    Ok(RegexSample {
        id: 1,
        regex: "(111+000+101+001)(1+0)*(11+00)(11+00)*(101+111+000)(101+111+000)*(11+00)(1+0+11)(11*)(00*)(1*+0*+1+0)(1+0)*".to_string(),
        dfa: Machine::Dfa(dfa),
        cfg: Machine::Cfg(cfg),
        pda: Machine::Pda(pda),
    })
}

/// Sample 2, over the alphabet `{a, b}`.
fn ab_sample() -> anyhow::Result<RegexSample> {
    let dfa = DfaDefinition {
        states: names(&[
            "q0", "q1", "q2", "q3", "q4", "q5", "q6", "q7", "q8", "q10", "q11", "q12", "q13",
            "q14", "q15", "q16", "q17", "q18", "q19", "q20", "q21", "q22", "q23", "q24", "q25",
            "q26", "q27", "T",
        ]),
        alphabet: vec!['a', 'b'],
        start_state: "q0".to_string(),
        end_states: names(&["q23", "q24", "q25", "q26"]),
        transitions: vec![
            t("q0", "a", "q2"),
            t("q0", "b", "q1"),
            t("q1", "a", "q3"),
            t("q1", "b", "T"),
            t("q2", "a", "T"),
            t("q2", "b", "q3"),
            t("q3", "a", "q4"),
            t("q3", "b", "q6"),
            t("q4", "a", "q8"),
            t("q4", "b", "q5"),
            t("q5", "a", "q10"),
            t("q5", "b", "q6"),
            t("q6", "a", "q3"),
            t("q6", "b", "q7"),
            t("q7", "a", "T"),
            t("q7", "b", "q10"),
            t("q8", "a", "q10"),
            t("q8", "b", "T"),
            t("q10", "a", "q10"),
            t("q10", "b", "q14"),
            t("q11", "a", "q8"),
            t("q11", "b", "q12"),
            t("q12", "a", "q11"),
            t("q12", "b", "q13"),
            t("q13", "a", "q15"),
            t("q13", "b", "q19"),
            t("q14", "a", "q15"),
            t("q14", "b", "q14"),
            t("q15", "a", "q16"),
            t("q15", "b", "q12"),
            t("q16", "a", "q17"),
            t("q16", "b", "q18"),
            t("q17", "a", "q19"),
            t("q17", "b", "q18"),
            t("q18", "a", "q11"),
            t("q18", "b", "q19"),
            t("q19", "a", "q22"),
            t("q19", "b", "q20"),
            t("q20", "a", "q21"),
            t("q20", "b", "q24"),
            t("q21", "a", "q23"),
            t("q21", "b", "q25"),
            t("q22", "a", "q23"),
            t("q22", "b", "q27"),
            t("q23", "a", "q23"),
            t("q23", "b", "q27"),
            t("q24", "a", "q21"),
            t("q24", "b", "q24"),
            t("q25", "a", "q26"),
            t("q25", "b", "q24"),
            t("q26", "a", "q23"),
            t("q26", "b", "q25"),
            t("q27", "a", "q26"),
            t("q27", "b", "q22"),
            t("T", "ab", "T"),
        ],
    }
    .compile()?;

    let cfg = Cfg::parse(
        'S',
        &[
            "S → A B C D E F G H I J K",
            "A → a b | b a",
            "B → a b B | b a B | λ",
            "C → a a a | b b b | a b a",
            "D → a D | b D | λ",
            "E → b | b E",
            "F → a | a F",
            "G → a | b",
            "H → a a | b b",
            "I → D",
            "J → H | a b a | b a b",
            "K → J K | λ",
        ],
    )?;

    let pda = PdaDefinition {
        states: names(&[
            "Start", "Read1", "Read2", "Read3", "Read4", "Read5", "Read6", "Read7", "Read8",
            "Read9", "Read10", "Read11", "Read12", "Read13", "Accept1", "Accept2",
        ]),
        alphabet: vec!['a', 'b'],
        start_state: "Start".to_string(),
        push_states: vec![],
        pop_states: vec![],
        accept_states: names(&["Accept1", "Accept2"]),
        transitions: vec![
            t("Start", "", "Read1"),
            t("Read1", "a", "Read2"),
            t("Read1", "b", "Read3"),
            t("Read2", "b", "Read4"),
            t("Read3", "a", "Read5"),
            t("Read4", "a", "Read6"),
            t("Read5", "b", "Read6"),
            t("Read6", "b", "Read7"),
            t("Read7", "a", "Read8"),
            t("Read8", "b", "Read9"),
            t("Read9", "a", "Read10"),
            t("Read9", "b", "Read11"),
            t("Read10", "b", "Read12"),
            t("Read11", "a", "Read13"),
            t("Read10", "", "Accept1"),
            t("Read11", "", "Accept1"),
            t("Read12", "ab", "Accept2"),
            t("Read12", "", "Accept2"),
            t("Read13", "ab", "Accept2"),
            t("Read13", "", "Accept2"),
            t("Read6", "a", "Read6"),
            t("Read7", "b", "Read7"),
            t("Read8", "a", "Read6"),
            t("Read10", "a", "Read10"),
            t("Read11", "b", "Read11"),
        ],
    }
    .compile()?;

    Ok(RegexSample {
        id: 2,
        regex: "(ab+ba)(ab+ba)*(aaa+bbb+aba)(a+b)*(bb*)(aa*)(a+b)(aa+bb)(a+b)*(bb+aa+aba+bab)(bb+aa+aba+bab)*"
            .to_string(),
        dfa: Machine::Dfa(dfa),
        cfg: Machine::Cfg(cfg),
        pda: Machine::Pda(pda),
    })
}
