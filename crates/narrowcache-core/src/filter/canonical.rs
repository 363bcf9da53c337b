//! Canonical form of a filter, used for semantic equality.

use std::collections::BTreeSet;

use super::{Filter, NarrowTerm, Operator};

/// A normalized term. Two filters are semantically equal when their sets of
/// canonical terms are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct CanonicalTerm {
    operator: Operator,
    negated: bool,
    operand: String,
}

impl Filter {
    /// Returns the canonical term set: order and duplicates are irrelevant.
    ///
    /// Every positive `search` term requires all of its words, so their words
    /// are merged into a single term.
    pub(crate) fn canonical_terms(&self) -> BTreeSet<CanonicalTerm> {
        let (search, rest): (Vec<&NarrowTerm>, Vec<&NarrowTerm>) = self
            .terms
            .iter()
            .partition(|term| term.operator == Operator::Search && !term.negated);

        let mut canonical: BTreeSet<CanonicalTerm> =
            rest.into_iter().map(NarrowTerm::canonical).collect();

        let words: BTreeSet<String> = search
            .iter()
            .flat_map(|term| search_words(&term.operand))
            .collect();
        if !words.is_empty() {
            canonical.insert(CanonicalTerm {
                operator: Operator::Search,
                negated: false,
                operand: words.into_iter().collect::<Vec<_>>().join(" "),
            });
        }
        canonical
    }
}

impl NarrowTerm {
    pub(crate) fn canonical(&self) -> CanonicalTerm {
        CanonicalTerm {
            operator: self.operator,
            negated: self.negated,
            operand: canonical_operand(self.operator, &self.operand),
        }
    }
}

/// Normalizes an operand for its operator.
pub(crate) fn canonical_operand(operator: Operator, operand: &str) -> String {
    let trimmed = operand.trim();
    match operator {
        Operator::Channel | Operator::Topic | Operator::Sender => trimmed.to_lowercase(),
        Operator::Dm => canonical_participants(trimmed).into_iter().collect::<Vec<_>>().join(","),
        Operator::Is => match trimmed.to_lowercase().as_str() {
            "private" => "dm".to_string(),
            other => other.to_string(),
        },
        Operator::Search => search_words(trimmed)
            .into_iter()
            .collect::<Vec<_>>()
            .join(" "),
        Operator::Id => trimmed
            .parse::<u64>()
            .map_or_else(|_| trimmed.to_string(), |id| id.to_string()),
    }
}

/// Splits a comma-separated participant list into a sorted, de-duplicated set.
pub(crate) fn canonical_participants(operand: &str) -> BTreeSet<String> {
    operand
        .split(',')
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Lowercased search words as a set: word order and repeats do not change
/// what a search selects.
pub(crate) fn search_words(operand: &str) -> BTreeSet<String> {
    operand.split_whitespace().map(str::to_lowercase).collect()
}
