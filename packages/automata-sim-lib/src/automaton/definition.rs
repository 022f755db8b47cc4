//! Pure-data automaton definitions.
//!
//! Definitions are what the surrounding application supplies (the built-in
//! catalog is written in this form). `compile` runs the well-formedness
//! check and builds the executable, graph-backed machine; a definition that
//! fails to compile must be rejected before any simulation.

use hashbrown::HashMap;
use petgraph::{Direction, graph::DiGraph, visit::EdgeRef};
use serde::{Deserialize, Serialize};

use crate::automaton::{
    MalformedAutomaton,
    dfa::{Dfa, node::StateNode},
    pda::{Pda, PdaEdge, PdaNode},
};

/// One transition entry of a definition.
///
/// `symbols` lists every symbol that jointly triggers this move; an empty
/// list means an epsilon move (PDA only). Joint symbols are expanded into
/// per-symbol edges at compile time, so lookups during stepping are always
/// by exact (state, single symbol) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDef {
    pub from: String,
    pub symbols: Vec<char>,
    pub to: String,
}

impl TransitionDef {
    /// `symbols` holds one character per triggering symbol; pass `""` for
    /// an epsilon move.
    pub fn new(from: impl Into<String>, symbols: &str, to: impl Into<String>) -> Self {
        TransitionDef {
            from: from.into(),
            symbols: symbols.chars().collect(),
            to: to.into(),
        }
    }

    pub fn is_epsilon(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// A DFA as pure data, prior to compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaDefinition {
    pub states: Vec<String>,
    pub alphabet: Vec<char>,
    pub start_state: String,
    pub end_states: Vec<String>,
    pub transitions: Vec<TransitionDef>,
}

impl DfaDefinition {
    /// Checks every structural invariant without building the machine.
    pub fn check(&self) -> Result<(), MalformedAutomaton> {
        self.compile().map(|_| ())
    }

    pub fn compile(&self) -> Result<Dfa, MalformedAutomaton> {
        let mut graph = DiGraph::new();
        let mut states = HashMap::new();

        for name in &self.states {
            if states.contains_key(name) {
                return Err(MalformedAutomaton::DuplicateState {
                    state: name.clone(),
                });
            }
            let accepting = self.end_states.contains(name);
            let index = graph.add_node(StateNode::new(name.clone(), accepting));
            states.insert(name.clone(), index);
        }

        for name in &self.end_states {
            if !states.contains_key(name) {
                return Err(MalformedAutomaton::UnknownAcceptingState {
                    state: name.clone(),
                });
            }
        }

        let start =
            *states
                .get(&self.start_state)
                .ok_or_else(|| MalformedAutomaton::UnknownStartState {
                    state: self.start_state.clone(),
                })?;

        for transition in &self.transitions {
            let from = *states.get(&transition.from).ok_or_else(|| {
                MalformedAutomaton::UnknownTransitionSource {
                    state: transition.from.clone(),
                }
            })?;
            let to = *states.get(&transition.to).ok_or_else(|| {
                MalformedAutomaton::UnknownTransitionTarget {
                    state: transition.from.clone(),
                    target: transition.to.clone(),
                }
            })?;

            if transition.is_epsilon() {
                return Err(MalformedAutomaton::EpsilonNotAllowed {
                    state: transition.from.clone(),
                });
            }

            for &symbol in &transition.symbols {
                if !self.alphabet.contains(&symbol) {
                    return Err(MalformedAutomaton::SymbolNotInAlphabet {
                        state: transition.from.clone(),
                        symbol,
                    });
                }

                let existing = graph
                    .edges_directed(from, Direction::Outgoing)
                    .find(|edge| *edge.weight() == symbol)
                    .map(|edge| edge.target());
                match existing {
                    Some(target) if target != to => {
                        return Err(MalformedAutomaton::ConflictingTransition {
                            state: transition.from.clone(),
                            symbol: Some(symbol),
                            existing: graph[target].name.clone(),
                            conflicting: transition.to.clone(),
                        });
                    }
                    // An exact duplicate entry is harmless, skip it.
                    Some(_) => {}
                    None => {
                        graph.add_edge(from, to, symbol);
                    }
                }
            }
        }

        Ok(Dfa::from_parts(graph, start, self.alphabet.clone(), states))
    }
}

/// A PDA as pure data, prior to compilation.
///
/// `push_states` and `pop_states` are carried through to rendering but do
/// not influence stepping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdaDefinition {
    pub states: Vec<String>,
    pub alphabet: Vec<char>,
    pub start_state: String,
    pub push_states: Vec<String>,
    pub pop_states: Vec<String>,
    pub accept_states: Vec<String>,
    pub transitions: Vec<TransitionDef>,
}

impl PdaDefinition {
    /// Checks every structural invariant without building the machine.
    pub fn check(&self) -> Result<(), MalformedAutomaton> {
        self.compile().map(|_| ())
    }

    pub fn compile(&self) -> Result<Pda, MalformedAutomaton> {
        let mut graph = DiGraph::new();
        let mut states = HashMap::new();

        for name in &self.states {
            if states.contains_key(name) {
                return Err(MalformedAutomaton::DuplicateState {
                    state: name.clone(),
                });
            }
            let mut node = PdaNode::new(name.clone(), self.accept_states.contains(name));
            node.push = self.push_states.contains(name);
            node.pop = self.pop_states.contains(name);
            let index = graph.add_node(node);
            states.insert(name.clone(), index);
        }

        for name in &self.accept_states {
            if !states.contains_key(name) {
                return Err(MalformedAutomaton::UnknownAcceptingState {
                    state: name.clone(),
                });
            }
        }
        for name in &self.push_states {
            if !states.contains_key(name) {
                return Err(MalformedAutomaton::UnknownPushState {
                    state: name.clone(),
                });
            }
        }
        for name in &self.pop_states {
            if !states.contains_key(name) {
                return Err(MalformedAutomaton::UnknownPopState {
                    state: name.clone(),
                });
            }
        }

        let start =
            *states
                .get(&self.start_state)
                .ok_or_else(|| MalformedAutomaton::UnknownStartState {
                    state: self.start_state.clone(),
                })?;

        for transition in &self.transitions {
            let from = *states.get(&transition.from).ok_or_else(|| {
                MalformedAutomaton::UnknownTransitionSource {
                    state: transition.from.clone(),
                }
            })?;
            let to = *states.get(&transition.to).ok_or_else(|| {
                MalformedAutomaton::UnknownTransitionTarget {
                    state: transition.from.clone(),
                    target: transition.to.clone(),
                }
            })?;

            let labels = if transition.is_epsilon() {
                vec![PdaEdge::Epsilon]
            } else {
                transition
                    .symbols
                    .iter()
                    .map(|&symbol| PdaEdge::Symbol(symbol))
                    .collect()
            };

            for label in labels {
                if let PdaEdge::Symbol(symbol) = label
                    && !self.alphabet.contains(&symbol)
                {
                    return Err(MalformedAutomaton::SymbolNotInAlphabet {
                        state: transition.from.clone(),
                        symbol,
                    });
                }

                let existing = graph
                    .edges_directed(from, Direction::Outgoing)
                    .find(|edge| *edge.weight() == label)
                    .map(|edge| edge.target());
                match existing {
                    Some(target) if target != to => {
                        return Err(MalformedAutomaton::ConflictingTransition {
                            state: transition.from.clone(),
                            symbol: label.symbol(),
                            existing: graph[target].name.clone(),
                            conflicting: transition.to.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        graph.add_edge(from, to, label);
                    }
                }
            }
        }

        Ok(Pda::from_parts(graph, start, self.alphabet.clone(), states))
    }
}
