use serde::{Deserialize, Serialize};

/// One step of a simulation: the state reached and whether the run was
/// still alive when it got there.
///
/// Every entry except the last is valid by construction. The last entry
/// carries the overall verdict: the acceptance check for a completed run,
/// or `false` when the run got stuck mid-string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub state: String,
    pub valid: bool,
}

/// The ordered sequence of states visited while consuming one input.
///
/// A trace always contains at least the start state. It is produced once
/// per run and never mutated afterwards; playback only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn starting_at(state: &str) -> Self {
        Trace {
            entries: vec![TraceEntry {
                state: state.to_string(),
                valid: true,
            }],
        }
    }

    pub(crate) fn push_valid(&mut self, state: &str) {
        self.entries.push(TraceEntry {
            state: state.to_string(),
            valid: true,
        });
    }

    pub(crate) fn push_invalid(&mut self, state: &str) {
        self.entries.push(TraceEntry {
            state: state.to_string(),
            valid: false,
        });
    }

    /// Overwrites the validity flag of the final entry with the acceptance
    /// verdict of the whole run.
    pub(crate) fn seal(&mut self, accepted: bool) {
        if let Some(last) = self.entries.last_mut() {
            last.valid = accepted;
        }
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TraceEntry> {
        self.entries.get(index)
    }

    pub fn last(&self) -> &TraceEntry {
        self.entries.last().expect("a trace is never empty")
    }

    /// The visited state names in order, ignoring validity flags.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.state.as_str())
    }
}

/// The outcome of running a machine against one input string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub accepted: bool,
    pub trace: Trace,
}
