// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Template expression parser
//!
//! Parses `${ call }` expressions where a call is `[Structr.]name(args)` and
//! arguments are quoted strings, numbers, `true`, `false`, `null` or nested
//! calls.

use crate::storage::Value;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace0},
    combinator::{all_consuming, map, map_res, opt, recognize},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

const JAVASCRIPT_PREFIX: &str = "Structr.";

/// Parsed expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Call(Call),
}

/// Function call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    /// Called as `Structr.name(...)`
    pub javascript: bool,
    pub arguments: Vec<Expr>,
}

/// Parse a complete `${ ... }` template into its top-level call
pub fn parse_template(input: &str) -> Result<Call, String> {
    let parser = delimited(
        pair(multispace0, tag("${")),
        ws(call),
        pair(char('}'), multispace0),
    );

    all_consuming(parser)(input)
        .map(|(_, call)| call)
        .map_err(|e| format!("Invalid expression '{}': {}", input.trim(), e))
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn call(input: &str) -> IResult<&str, Call> {
    map(
        tuple((
            opt(tag(JAVASCRIPT_PREFIX)),
            identifier,
            preceded(multispace0, char('(')),
            separated_list0(char(','), ws(argument)),
            char(')'),
        )),
        |(prefix, name, _, arguments, _)| Call {
            name: name.to_string(),
            javascript: prefix.is_some(),
            arguments,
        },
    )(input)
}

fn argument(input: &str) -> IResult<&str, Expr> {
    alt((
        map(string_literal, |s| Expr::Literal(Value::String(s))),
        map(number_literal, |n| Expr::Literal(Value::Number(n))),
        map(call, Expr::Call),
        map(keyword_literal, Expr::Literal),
    ))(input)
}

fn keyword_literal(input: &str) -> IResult<&str, Value> {
    map_res(identifier, |word| match word {
        "true" => Ok(Value::Boolean(true)),
        "false" => Ok(Value::Boolean(false)),
        "null" => Ok(Value::Null),
        _ => Err(()),
    })(input)
}

fn number_literal(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(char('-')),
            digit1,
            opt(pair(char('.'), digit1)),
        ))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

fn string_literal(input: &str) -> IResult<&str, String> {
    alt((
        delimited(char('"'), map(escaped_string_content('"'), unescape), char('"')),
        delimited(
            char('\''),
            map(escaped_string_content('\''), unescape),
            char('\''),
        ),
    ))(input)
}

/// Content up to the next unescaped `quote_char`
fn escaped_string_content(quote_char: char) -> impl Fn(&str) -> IResult<&str, &str> {
    move |input: &str| {
        let bytes = input.as_bytes();
        let mut pos = 0;

        while pos < bytes.len() {
            if bytes[pos] == b'\\' && pos + 1 < bytes.len() {
                pos += 2;
            } else if bytes[pos] == quote_char as u8 {
                break;
            } else {
                pos += 1;
            }
        }

        Ok((&input[pos..], &input[..pos]))
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
