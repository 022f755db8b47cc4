use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::automaton::{cfg::Cfg, dfa::Dfa, pda::Pda};

pub mod cfg;
pub mod definition;
pub mod dfa;
pub mod graphviz;
pub mod pda;
pub mod trace;

/// Discriminant for the three machine flavors the library models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineKind {
    Dfa,
    Pda,
    Cfg,
}

impl Display for MachineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MachineKind::Dfa => write!(f, "DFA"),
            MachineKind::Pda => write!(f, "PDA"),
            MachineKind::Cfg => write!(f, "CFG"),
        }
    }
}

/// A compiled machine, tagged with its kind.
///
/// The transition engine and the graph generator dispatch on this tag
/// instead of probing the payload for shape.
#[derive(Debug, Clone)]
pub enum Machine {
    Dfa(Dfa),
    Pda(Pda),
    Cfg(Cfg),
}

impl Machine {
    pub fn kind(&self) -> MachineKind {
        match self {
            Machine::Dfa(_) => MachineKind::Dfa,
            Machine::Pda(_) => MachineKind::Pda,
            Machine::Cfg(_) => MachineKind::Cfg,
        }
    }

    pub fn as_dfa(&self) -> Option<&Dfa> {
        match self {
            Machine::Dfa(dfa) => Some(dfa),
            _ => None,
        }
    }

    pub fn as_pda(&self) -> Option<&Pda> {
        match self {
            Machine::Pda(pda) => Some(pda),
            _ => None,
        }
    }

    pub fn as_cfg(&self) -> Option<&Cfg> {
        match self {
            Machine::Cfg(cfg) => Some(cfg),
            _ => None,
        }
    }

    /// The declared input alphabet, if the machine has one.
    /// Grammars are not alphabet-checked, so they return [None].
    pub fn alphabet(&self) -> Option<&[char]> {
        match self {
            Machine::Dfa(dfa) => Some(dfa.alphabet()),
            Machine::Pda(pda) => Some(pda.alphabet()),
            Machine::Cfg(_) => None,
        }
    }
}

/// A structural invariant violated by an automaton definition.
///
/// These are caught once when a definition is compiled. A definition that
/// fails the check must not be used for stepping or rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MalformedAutomaton {
    DuplicateState {
        state: String,
    },
    UnknownStartState {
        state: String,
    },
    UnknownAcceptingState {
        state: String,
    },
    UnknownPushState {
        state: String,
    },
    UnknownPopState {
        state: String,
    },
    UnknownTransitionSource {
        state: String,
    },
    UnknownTransitionTarget {
        state: String,
        target: String,
    },
    SymbolNotInAlphabet {
        state: String,
        symbol: char,
    },
    /// A DFA transition with no symbol. Only PDAs may take epsilon moves.
    EpsilonNotAllowed {
        state: String,
    },
    /// Two transitions from the same state on the same symbol (or both on
    /// epsilon) with different targets.
    ConflictingTransition {
        state: String,
        symbol: Option<char>,
        existing: String,
        conflicting: String,
    },
}

impl Display for MalformedAutomaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedAutomaton::DuplicateState { state } => {
                write!(f, "state {state:?} is declared more than once")
            }
            MalformedAutomaton::UnknownStartState { state } => {
                write!(f, "start state {state:?} is not in the state set")
            }
            MalformedAutomaton::UnknownAcceptingState { state } => {
                write!(f, "accepting state {state:?} is not in the state set")
            }
            MalformedAutomaton::UnknownPushState { state } => {
                write!(f, "push state {state:?} is not in the state set")
            }
            MalformedAutomaton::UnknownPopState { state } => {
                write!(f, "pop state {state:?} is not in the state set")
            }
            MalformedAutomaton::UnknownTransitionSource { state } => {
                write!(f, "transition source {state:?} is not in the state set")
            }
            MalformedAutomaton::UnknownTransitionTarget { state, target } => {
                write!(
                    f,
                    "transition from {state:?} points at {target:?}, which is not in the state set"
                )
            }
            MalformedAutomaton::SymbolNotInAlphabet { state, symbol } => {
                write!(
                    f,
                    "transition from {state:?} uses symbol {symbol:?}, which is not in the alphabet"
                )
            }
            MalformedAutomaton::EpsilonNotAllowed { state } => {
                write!(
                    f,
                    "transition from {state:?} has no symbol, but DFAs cannot take epsilon moves"
                )
            }
            MalformedAutomaton::ConflictingTransition {
                state,
                symbol,
                existing,
                conflicting,
            } => {
                let symbol = match symbol {
                    Some(s) => format!("{s:?}"),
                    None => "ε".to_string(),
                };
                write!(
                    f,
                    "state {state:?} has two transitions on {symbol} with different targets ({existing:?} and {conflicting:?})"
                )
            }
        }
    }
}

impl std::error::Error for MalformedAutomaton {}
