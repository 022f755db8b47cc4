//! Parser for production rule lines of the form `S → a S b | λ`.
//!
//! The right-hand side is a `|`-separated list of alternatives; each
//! alternative is a whitespace-separated list of tokens. Inside a token,
//! uppercase ASCII letters are nonterminals and every other character is a
//! terminal, so `00G` reads as two terminal zeros followed by the
//! nonterminal `G`. The lone token `λ` denotes the empty alternative.

use nom::{
    Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{satisfy, space0, space1},
    error::ParseError,
};

use crate::automaton::cfg::Symbol;

fn arrow<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, &'a str, E> {
    alt((tag("→"), tag("->"))).parse(input)
}

fn token<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, &'a str, E> {
    take_while1(|c: char| !c.is_whitespace() && c != '|').parse(input)
}

fn classify(token: &str) -> Vec<Symbol> {
    token
        .chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                Symbol::Nonterminal(c)
            } else {
                Symbol::Terminal(c)
            }
        })
        .collect()
}

fn alternative<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> nom::IResult<&'a str, Vec<Symbol>, E> {
    let (input, tokens) = nom::multi::separated_list1(space1, token).parse(input)?;

    if tokens.len() == 1 && tokens[0] == "λ" {
        return Ok((input, vec![]));
    }

    let symbols = tokens.into_iter().flat_map(classify).collect();
    Ok((input, symbols))
}

fn pipe<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, (), E> {
    let (input, _) = space0(input)?;
    let (input, _) = tag("|")(input)?;
    let (input, _) = space0(input)?;
    Ok((input, ()))
}

/// Parses one production line into its left-hand nonterminal and the list
/// of alternatives.
pub fn production<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> nom::IResult<&'a str, (char, Vec<Vec<Symbol>>), E> {
    let (input, _) = space0(input)?;
    let (input, lhs) = satisfy(|c| c.is_ascii_uppercase()).parse(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = arrow(input)?;
    let (input, _) = space0(input)?;
    let (input, alternatives) = nom::multi::separated_list1(pipe, alternative).parse(input)?;
    let (input, _) = space0(input)?;

    Ok((input, (lhs, alternatives)))
}

#[test]
fn test_production_1() {
    let input = "S → a S b | λ";
    let (rest, (lhs, alternatives)) = production::<nom::error::Error<&str>>(input).unwrap();
    assert!(rest.is_empty());
    assert_eq!(lhs, 'S');
    assert_eq!(alternatives.len(), 2);
    assert_eq!(
        alternatives[0],
        vec![
            Symbol::Terminal('a'),
            Symbol::Nonterminal('S'),
            Symbol::Terminal('b'),
        ]
    );
    assert_eq!(alternatives[1], vec![]);
}

#[test]
fn test_production_2() {
    let input = "A → 111 | 000 | 00G";
    let (_, (lhs, alternatives)) = production::<nom::error::Error<&str>>(input).unwrap();
    assert_eq!(lhs, 'A');
    assert_eq!(alternatives.len(), 3);
    assert_eq!(
        alternatives[2],
        vec![
            Symbol::Terminal('0'),
            Symbol::Terminal('0'),
            Symbol::Nonterminal('G'),
        ]
    );
}

#[test]
fn test_production_ascii_arrow() {
    let input = "B -> a B | λ";
    let (_, (lhs, alternatives)) = production::<nom::error::Error<&str>>(input).unwrap();
    assert_eq!(lhs, 'B');
    assert_eq!(alternatives.len(), 2);
}

#[test]
fn test_production_rejects_missing_arrow() {
    let input = "S a b";
    assert!(production::<nom::error::Error<&str>>(input).is_err());
}
