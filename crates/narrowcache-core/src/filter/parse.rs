//! Parsing of narrow strings such as `channel:design -topic:"lunch plans"`.

use std::str::FromStr;

use super::{Filter, NarrowTerm, Operator};
use crate::error::{Error, Result};

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "channel" | "stream" => Ok(Self::Channel),
            "topic" | "subject" => Ok(Self::Topic),
            "sender" | "from" => Ok(Self::Sender),
            "dm" | "pm-with" => Ok(Self::Dm),
            "is" => Ok(Self::Is),
            "search" => Ok(Self::Search),
            "id" => Ok(Self::Id),
            other => Err(Error::InvalidFilter(format!("unknown operator '{other}'"))),
        }
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Filter {
    /// Parses a space-separated narrow string.
    ///
    /// - `operator:operand` pairs become terms; a leading `-` negates.
    /// - Operands may be double-quoted to contain spaces.
    /// - Anything else (bare words, unknown operators) is search text.
    ///   Search text and `search:` operands form one trailing `search` term.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFilter`] on an unterminated quote or an empty
    /// operand.
    pub fn parse(input: &str) -> Result<Self> {
        let mut terms = Vec::new();
        let mut search_words: Vec<String> = Vec::new();

        for token in tokenize(input)? {
            match split_term(&token)? {
                Some(term) if term.operator == Operator::Search && !term.negated => {
                    search_words.push(term.operand);
                }
                Some(term) => terms.push(term),
                None => search_words.push(token),
            }
        }

        if !search_words.is_empty() {
            terms.push(NarrowTerm::search(search_words.join(" ")));
        }

        Ok(Self { terms })
    }
}

/// Turns `-operator:operand` into a term, or `None` for search text.
fn split_term(token: &str) -> Result<Option<NarrowTerm>> {
    let (negated, body) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let Some((operator, operand)) = body.split_once(':') else {
        return Ok(None);
    };
    let Ok(operator) = operator.parse::<Operator>() else {
        return Ok(None);
    };
    if operand.trim().is_empty() {
        return Err(Error::InvalidFilter(format!(
            "operator '{operator}' requires an operand"
        )));
    }

    let term = NarrowTerm::new(operator, operand);
    Ok(Some(if negated { term.negated() } else { term }))
}

/// Splits on whitespace outside double quotes and strips the quotes.
fn tokenize(input: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in input.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err(Error::InvalidFilter(format!(
            "unterminated quote in '{input}'"
        )));
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}
