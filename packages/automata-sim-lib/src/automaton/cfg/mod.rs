use std::collections::VecDeque;

use hashbrown::HashSet;
use nom::Parser;
use serde::{Deserialize, Serialize};

pub mod parser;

/// A symbol of a sentential form: a terminal character or a single
/// uppercase nonterminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Terminal(char),
    Nonterminal(char),
}

/// One production rule, keeping the source text for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    pub text: String,
    pub lhs: char,
    pub alternatives: Vec<Vec<Symbol>>,
}

/// Three-valued verdict of the bounded membership test.
///
/// `Unknown` means the derivation budget ran out before the search could
/// decide either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Membership {
    Member,
    NotMember,
    Unknown,
}

impl Membership {
    pub fn is_member(&self) -> bool {
        matches!(self, Membership::Member)
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, Membership::Unknown)
    }
}

impl From<bool> for Membership {
    fn from(member: bool) -> Self {
        if member {
            Membership::Member
        } else {
            Membership::NotMember
        }
    }
}

/// A normalized sentential form during the derivation search: the number
/// of input characters already matched, plus the remaining symbols. An
/// open form always starts with a nonterminal.
enum Form {
    Complete,
    Dead,
    Open(usize, Vec<Symbol>),
}

/// A context-free grammar with a real (bounded) membership test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cfg {
    start_symbol: char,
    productions: Vec<Production>,
}

impl Cfg {
    /// Parses production lines into a grammar.
    ///
    /// Fails if a line does not parse or if the start symbol has no
    /// production.
    pub fn parse(start_symbol: char, lines: &[&str]) -> anyhow::Result<Cfg> {
        let mut productions = Vec::with_capacity(lines.len());

        for line in lines {
            let (lhs, alternatives) =
                match nom::combinator::all_consuming(parser::production::<nom::error::Error<&str>>)
                    .parse(line)
                {
                    Ok((_, parsed)) => parsed,
                    Err(e) => anyhow::bail!("failed to parse production {line:?}: {e}"),
                };

            productions.push(Production {
                text: line.to_string(),
                lhs,
                alternatives,
            });
        }

        if !productions.iter().any(|p| p.lhs == start_symbol) {
            anyhow::bail!("start symbol {start_symbol:?} has no production");
        }

        Ok(Cfg {
            start_symbol,
            productions,
        })
    }

    pub fn start_symbol(&self) -> char {
        self.start_symbol
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, lhs: char) -> Option<&Production> {
        self.productions.iter().find(|p| p.lhs == lhs)
    }

    /// Consumes leading terminals of `form` against `input` starting at
    /// `pos`. A terminal mismatch (or leftover input with nothing to
    /// derive it from) kills the form.
    fn normalize(&self, input: &[char], mut pos: usize, form: Vec<Symbol>) -> Form {
        let mut symbols = form.into_iter();

        while let Some(symbol) = symbols.next() {
            match symbol {
                Symbol::Terminal(c) => {
                    if input.get(pos) == Some(&c) {
                        pos += 1;
                    } else {
                        return Form::Dead;
                    }
                }
                Symbol::Nonterminal(n) => {
                    let mut rest = vec![Symbol::Nonterminal(n)];
                    rest.extend(symbols);
                    return Form::Open(pos, rest);
                }
            }
        }

        if pos == input.len() {
            Form::Complete
        } else {
            Form::Dead
        }
    }

    /// Bounded leftmost-derivation membership test.
    ///
    /// Explores sentential forms breadth-first, expanding the leftmost
    /// nonterminal. Forms are pruned when their terminal prefix stops
    /// matching the input, when their terminal count already exceeds the
    /// input length, or when they were seen before. `budget` caps the
    /// number of expansions; grammars that can grow forms without
    /// producing terminals (e.g. `S → S S`) exhaust it and come back
    /// [`Membership::Unknown`].
    pub fn membership(&self, input: &str, budget: u64) -> Membership {
        let input: Vec<char> = input.chars().collect();

        let mut queue: VecDeque<(usize, Vec<Symbol>)> = VecDeque::new();
        let mut seen: HashSet<(usize, Vec<Symbol>)> = HashSet::new();

        match self.normalize(&input, 0, vec![Symbol::Nonterminal(self.start_symbol)]) {
            Form::Complete => return Membership::Member,
            Form::Dead => return Membership::NotMember,
            Form::Open(pos, rest) => {
                queue.push_back((pos, rest));
            }
        }

        let mut steps: u64 = 0;

        while let Some((pos, form)) = queue.pop_front() {
            if steps >= budget {
                tracing::debug!(
                    "derivation budget of {} exhausted with {} forms left",
                    budget,
                    queue.len() + 1
                );
                return Membership::Unknown;
            }
            steps += 1;

            let head = match form.first() {
                Some(Symbol::Nonterminal(n)) => *n,
                // Open forms always start with a nonterminal.
                _ => continue,
            };

            // A nonterminal without a production cannot derive anything.
            let Some(production) = self.production(head) else {
                continue;
            };

            for alternative in &production.alternatives {
                let terminal_count = alternative
                    .iter()
                    .chain(form[1..].iter())
                    .filter(|s| matches!(s, Symbol::Terminal(_)))
                    .count();
                if pos + terminal_count > input.len() {
                    continue;
                }

                let mut candidate = alternative.clone();
                candidate.extend_from_slice(&form[1..]);

                match self.normalize(&input, pos, candidate) {
                    Form::Complete => return Membership::Member,
                    Form::Dead => {}
                    Form::Open(npos, nrest) => {
                        let key = (npos, nrest);
                        if seen.insert(key.clone()) {
                            queue.push_back(key);
                        }
                    }
                }
            }
        }

        Membership::NotMember
    }
}
