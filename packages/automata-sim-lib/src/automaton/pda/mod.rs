use std::fmt::Debug;

use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::automaton::trace::{Run, Trace};

/// An edge label in a PDA: either a plain input symbol or an epsilon move
/// that consumes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PdaEdge {
    Symbol(char),
    Epsilon,
}

impl PdaEdge {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, PdaEdge::Epsilon)
    }

    pub fn symbol(&self) -> Option<char> {
        match self {
            PdaEdge::Symbol(s) => Some(*s),
            PdaEdge::Epsilon => None,
        }
    }
}

/// A named state in a PDA.
///
/// The push/pop flags are informational only: the stepping algorithm does
/// not model a stack, it just renders push states differently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PdaNode {
    pub name: String,
    pub accepting: bool,
    pub push: bool,
    pub pop: bool,
}

impl PdaNode {
    pub fn new(name: impl Into<String>, accepting: bool) -> Self {
        PdaNode {
            name: name.into(),
            accepting,
            push: false,
            pop: false,
        }
    }
}

/// A compiled pushdown automaton (without stack discipline, see [`PdaNode`]).
///
/// Joint-symbol transition shorthands are expanded at compile time, so the
/// graph always carries one edge per (state, symbol) pair plus at most one
/// epsilon edge per state.
#[derive(Clone)]
pub struct Pda {
    pub graph: DiGraph<PdaNode, PdaEdge>,
    start: NodeIndex,
    alphabet: Vec<char>,
    states: HashMap<String, NodeIndex>,
}

impl Pda {
    pub(crate) fn from_parts(
        graph: DiGraph<PdaNode, PdaEdge>,
        start: NodeIndex,
        alphabet: Vec<char>,
        states: HashMap<String, NodeIndex>,
    ) -> Self {
        Pda {
            graph,
            start,
            alphabet,
            states,
        }
    }

    pub fn start(&self) -> NodeIndex {
        self.start
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn name(&self, state: NodeIndex) -> &str {
        &self.graph[state].name
    }

    pub fn state_index(&self, name: &str) -> Option<NodeIndex> {
        self.states.get(name).copied()
    }

    pub fn is_accepting(&self, state: NodeIndex) -> bool {
        self.graph[state].accepting
    }

    pub fn successor(&self, state: NodeIndex, symbol: char) -> Option<NodeIndex> {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .find(|edge| *edge.weight() == PdaEdge::Symbol(symbol))
            .map(|edge| edge.target())
    }

    pub fn epsilon_successor(&self, state: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .find(|edge| edge.weight().is_epsilon())
            .map(|edge| edge.target())
    }

    /// Runs the PDA over `input`.
    ///
    /// Symbol lookups work like the DFA loop, with one twist: when a
    /// (state, symbol) entry is missing, a single epsilon move is taken
    /// (if the state has one) and the symbol lookup is retried once from
    /// the epsilon target. Epsilon moves are never chained. After the
    /// input is exhausted, one trailing epsilon move is followed before
    /// the acceptance check. No epsilon is auto-followed before the first
    /// symbol.
    pub fn run(&self, input: &str) -> Run {
        let mut current = self.start;
        let mut trace = Trace::starting_at(self.name(current));

        for symbol in input.chars() {
            if let Some(next) = self.successor(current, symbol) {
                current = next;
                trace.push_valid(self.name(next));
                continue;
            }

            // Single-hop epsilon fallback, then retry the symbol once.
            let Some(eps) = self.epsilon_successor(current) else {
                tracing::debug!(
                    "PDA stuck in state {:?} on symbol {:?}",
                    self.name(current),
                    symbol
                );
                trace.push_invalid(self.name(current));
                return Run {
                    accepted: false,
                    trace,
                };
            };

            trace.push_valid(self.name(eps));
            match self.successor(eps, symbol) {
                Some(next) => {
                    current = next;
                    trace.push_valid(self.name(next));
                }
                None => {
                    tracing::debug!(
                        "PDA stuck in state {:?} on symbol {:?} after epsilon move",
                        self.name(eps),
                        symbol
                    );
                    trace.push_invalid(self.name(eps));
                    return Run {
                        accepted: false,
                        trace,
                    };
                }
            }
        }

        // One trailing epsilon move before the acceptance check.
        if let Some(eps) = self.epsilon_successor(current) {
            current = eps;
            trace.push_valid(self.name(eps));
        }

        let accepted = self.is_accepting(current);
        trace.seal(accepted);
        Run { accepted, trace }
    }

    pub fn accepts(&self, input: &str) -> bool {
        self.run(input).accepted
    }
}

impl Debug for Pda {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pda")
            .field("alphabet", &self.alphabet)
            .field("state_count", &self.graph.node_count())
            .field("start", &self.name(self.start))
            .field(
                "accepting",
                &self
                    .graph
                    .node_indices()
                    .filter(|&node| self.graph[node].accepting)
                    .map(|node| self.name(node))
                    .collect_vec(),
            )
            .field("edge_count", &self.graph.edge_count())
            .finish()
    }
}
