use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1, take_until},
    character::complete::multispace0,
    combinator::{map, rest},
    multi::{many0, separated_list1},
    sequence::{preceded, separated_pair},
    IResult,
};

/// Separates a rule's symbol from its body.
pub const ARROW: &str = " => ";

/// Separates alternatives within a body.
pub const BAR: &str = " | ";

/// Splits a rule line at the first arrow, returning `(symbol, body)`.
///
/// Neither side is trimmed.
pub fn rule_line(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(take_until(ARROW), tag(ARROW), rest)(input)
}

/// Splits a rule body into trimmed alternatives.
///
/// Alternatives may come back empty (`a |  | b`); callers decide what that
/// means.
pub fn alternatives(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(tag(BAR), map(alt((take_until(BAR), rest)), str::trim))(input)
}

/// Splits an alternative into whitespace separated atoms.
pub fn atoms(input: &str) -> IResult<&str, Vec<&str>> {
    many0(preceded(
        multispace0,
        take_till1(|c: char| c.is_whitespace()),
    ))(input)
}
