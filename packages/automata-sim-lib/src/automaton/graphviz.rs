//! Graph description generation.
//!
//! Machines render to a DOT digraph that any graphviz-compatible layout
//! engine can draw; the library itself has no rendering dependency. The
//! output is a pure function of the machine, the highlighted state, and
//! the highlight color, which makes it snapshot-testable.

use itertools::Itertools;
use petgraph::visit::EdgeRef;

use crate::automaton::{Machine, cfg::Cfg, dfa::Dfa, pda::Pda};

/// Quotes an identifier for DOT, escaping backslashes and double quotes.
fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}

fn node_line(name: &str, attrs: &[String]) -> String {
    if attrs.is_empty() {
        format!("  {};\n", quote(name))
    } else {
        format!("  {} [{}];\n", quote(name), attrs.iter().join(", "))
    }
}

impl Dfa {
    /// Renders the DFA left-to-right: plain states as circles, accepting
    /// states as double circles, the highlighted state filled with
    /// `color`.
    pub fn to_graphviz(&self, highlight: Option<&str>, color: &str) -> String {
        let mut dot = String::new();
        dot.push_str("digraph G {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=circle];\n");

        for node in self.graph.node_indices() {
            let state = &self.graph[node];
            let mut attrs = vec![];
            if state.accepting {
                attrs.push("shape=doublecircle".to_string());
            }
            if highlight == Some(state.name.as_str()) {
                attrs.push("style=filled".to_string());
                attrs.push(format!("fillcolor={}", quote(color)));
            }
            dot.push_str(&node_line(&state.name, &attrs));
        }

        for edge in self.graph.edge_references() {
            dot.push_str(&format!(
                "  {} -> {} [label={}];\n",
                quote(self.name(edge.source())),
                quote(self.name(edge.target())),
                quote(&edge.weight().to_string()),
            ));
        }

        dot.push_str("}\n");
        dot
    }
}

impl Pda {
    /// Renders the PDA top-to-bottom: diamonds by default, start and
    /// accept states as ellipses, push states as rectangles, accepting
    /// states double-bordered. Epsilon edges are labeled `ε`.
    pub fn to_graphviz(&self, highlight: Option<&str>, color: &str) -> String {
        let mut dot = String::new();
        dot.push_str("digraph G {\n");
        dot.push_str("  rankdir=TB;\n");
        dot.push_str("  node [shape=diamond];\n");
        dot.push_str("  start [shape=none, label=\"\"];\n");
        dot.push_str(&format!(
            "  start -> {} [label=\"start\"];\n",
            quote(self.name(self.start())),
        ));

        for node in self.graph.node_indices() {
            let state = &self.graph[node];

            let shape = if node == self.start() || state.accepting {
                "ellipse"
            } else if state.push {
                "rectangle"
            } else {
                "diamond"
            };

            let mut attrs = vec![];
            if highlight == Some(state.name.as_str()) {
                attrs.push("style=filled".to_string());
                attrs.push(format!("fillcolor={}", quote(color)));
            }
            if state.accepting {
                attrs.push("peripheries=2".to_string());
            }
            attrs.push(format!("shape={shape}"));

            dot.push_str(&node_line(&state.name, &attrs));
        }

        for edge in self.graph.edge_references() {
            let label = match edge.weight().symbol() {
                Some(symbol) => symbol.to_string(),
                None => "ε".to_string(),
            };
            dot.push_str(&format!(
                "  {} -> {} [label={}];\n",
                quote(self.name(edge.source())),
                quote(self.name(edge.target())),
                quote(&label),
            ));
        }

        dot.push_str("}\n");
        dot
    }
}

impl Cfg {
    /// Renders the production list as rectangle nodes chained with
    /// invisible edges, so a layout engine stacks them in order.
    pub fn to_graphviz(&self) -> String {
        let mut dot = String::new();
        dot.push_str("digraph G {\n");
        dot.push_str("  node [shape=rectangle];\n");

        for production in self.productions() {
            dot.push_str(&format!(
                "  {} [label={}];\n",
                quote(&production.text),
                quote(&production.text),
            ));
        }

        for (previous, current) in self.productions().iter().tuple_windows() {
            dot.push_str(&format!(
                "  {} -> {} [style=invis];\n",
                quote(&previous.text),
                quote(&current.text),
            ));
        }

        dot.push_str("}\n");
        dot
    }
}

impl Machine {
    /// Renders any machine; grammars ignore the highlight arguments.
    pub fn to_graphviz(&self, highlight: Option<&str>, color: &str) -> String {
        match self {
            Machine::Dfa(dfa) => dfa.to_graphviz(highlight, color),
            Machine::Pda(pda) => pda.to_graphviz(highlight, color),
            Machine::Cfg(cfg) => cfg.to_graphviz(),
        }
    }
}
