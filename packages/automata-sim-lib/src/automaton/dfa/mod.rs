use std::fmt::Debug;

use hashbrown::HashMap;
use itertools::Itertools;
use node::StateNode;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::automaton::trace::{Run, Trace};

pub mod node;

/// A compiled deterministic finite automaton.
///
/// States live in a directed graph with one edge per (state, symbol) pair.
/// Construction goes through [`DfaDefinition`](crate::automaton::definition::DfaDefinition),
/// which guarantees the structural invariants, so stepping never has to
/// re-validate them.
#[derive(Clone)]
pub struct Dfa {
    pub graph: DiGraph<StateNode, char>,
    start: NodeIndex,
    alphabet: Vec<char>,
    states: HashMap<String, NodeIndex>,
}

impl Dfa {
    pub(crate) fn from_parts(
        graph: DiGraph<StateNode, char>,
        start: NodeIndex,
        alphabet: Vec<char>,
        states: HashMap<String, NodeIndex>,
    ) -> Self {
        Dfa {
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

    /// The unique successor of `state` under `symbol`, if the transition
    /// table defines one.
    pub fn successor(&self, state: NodeIndex, symbol: char) -> Option<NodeIndex> {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .find(|edge| *edge.weight() == symbol)
            .map(|edge| edge.target())
    }

    /// Runs the DFA over `input` and records every visited state.
    ///
    /// A missing transition truncates the trace at the stuck state and
    /// rejects. Otherwise the final entry's validity is the acceptance
    /// verdict. The empty input accepts iff the start state is accepting.
    pub fn run(&self, input: &str) -> Run {
        let mut current = self.start;
        let mut trace = Trace::starting_at(self.name(current));

        for symbol in input.chars() {
            match self.successor(current, symbol) {
                Some(next) => {
                    current = next;
                    trace.push_valid(self.name(next));
                }
                None => {
                    tracing::debug!(
                        "DFA stuck in state {:?} on symbol {:?}",
                        self.name(current),
                        symbol
                    );
                    trace.push_invalid(self.name(current));
                    return Run {
                        accepted: false,
                        trace,
                    };
                }
            }
        }

        let accepted = self.is_accepting(current);
        trace.seal(accepted);
        Run { accepted, trace }
    }

    pub fn accepts(&self, input: &str) -> bool {
        self.run(input).accepted
    }
}

impl Debug for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dfa")
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
