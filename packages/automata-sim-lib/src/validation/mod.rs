//! Batch validation of input strings against a machine.

use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    automaton::{
        Machine,
        cfg::Membership,
        trace::{Run, Trace},
    },
    config::ValidatorConfig,
    logger::Logger,
};

/// A batch was rejected because some line uses characters the machine's
/// alphabet does not contain. No line of the batch was simulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphabetViolation {
    pub input: String,
    pub offending: Vec<char>,
    pub alphabet: Vec<char>,
}

impl Display for AlphabetViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "String \"{}\" contains characters not in the automaton's alphabet: [{}]",
            self.input,
            self.alphabet.iter().join(", ")
        )
    }
}

impl std::error::Error for AlphabetViolation {}

/// The per-line verdict: a stepwise run for automata, a membership
/// verdict for grammars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LineOutcome {
    Run(Run),
    Membership(Membership),
}

impl LineOutcome {
    pub fn accepted(&self) -> bool {
        match self {
            LineOutcome::Run(run) => run.accepted,
            LineOutcome::Membership(membership) => membership.is_member(),
        }
    }

    /// The state trace of the run, if this outcome has one.
    pub fn trace(&self) -> Option<&Trace> {
        match self {
            LineOutcome::Run(run) => Some(&run.trace),
            LineOutcome::Membership(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineResult {
    pub input: String,
    pub outcome: LineOutcome,
}

/// Validates multi-line input text against one machine.
///
/// Lines are trimmed and blank lines are skipped. For automata, the whole
/// batch is checked against the alphabet up front; a single bad line
/// aborts the batch before anything is simulated.
pub struct ValidationSession<'a> {
    machine: &'a Machine,
    config: ValidatorConfig,
    logger: Option<Logger>,
}

impl<'a> ValidationSession<'a> {
    pub fn new(machine: &'a Machine, config: ValidatorConfig) -> Self {
        let logger = Logger::from_config(&config.logger, format!("validate {}", machine.kind()));

        ValidationSession {
            machine,
            config,
            logger,
        }
    }

    pub fn machine(&self) -> &Machine {
        self.machine
    }

    fn check_alphabet(&self, lines: &[&str]) -> Result<(), AlphabetViolation> {
        let Some(alphabet) = self.machine.alphabet() else {
            return Ok(());
        };

        for line in lines {
            let offending: Vec<char> = line
                .chars()
                .filter(|c| !alphabet.contains(c))
                .unique()
                .collect();

            if !offending.is_empty() {
                if let Some(logger) = &self.logger {
                    logger.warn(&format!(
                        "rejecting batch, line {:?} is outside the alphabet",
                        line
                    ));
                }
                return Err(AlphabetViolation {
                    input: line.to_string(),
                    offending,
                    alphabet: alphabet.to_vec(),
                });
            }
        }

        Ok(())
    }

    /// Runs every non-blank line of `text` through the machine, in input
    /// order.
    pub fn validate_batch(&self, text: &str) -> Result<Vec<LineResult>, AlphabetViolation> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        self.check_alphabet(&lines)?;

        let results = lines
            .into_iter()
            .map(|line| {
                let outcome = match self.machine {
                    Machine::Dfa(dfa) => LineOutcome::Run(dfa.run(line)),
                    Machine::Pda(pda) => LineOutcome::Run(pda.run(line)),
                    Machine::Cfg(cfg) => LineOutcome::Membership(
                        cfg.membership(line, self.config.grammar.derivation_budget),
                    ),
                };

                if let Some(logger) = &self.logger {
                    logger.info(&format!(
                        "{:?} -> {}",
                        line,
                        if outcome.accepted() {
                            "accepted"
                        } else {
                            "rejected"
                        }
                    ));
                }

                LineResult {
                    input: line.to_string(),
                    outcome,
                }
            })
            .collect();

        Ok(results)
    }
}
