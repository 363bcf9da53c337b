//! Term matching against messages.

use std::collections::BTreeSet;

use super::canonical::{canonical_operand, canonical_participants};
use super::{Filter, NarrowTerm, Operator};
use crate::message::Message;

impl Filter {
    /// Evaluates the filter against a message.
    ///
    /// Returns `true` if every term holds. The empty filter matches all
    /// messages.
    #[must_use]
    pub fn matches(&self, message: &Message) -> bool {
        self.terms.iter().all(|term| term.matches(message))
    }
}

impl NarrowTerm {
    /// Evaluates this term, negation included, against a message.
    #[must_use]
    pub fn matches(&self, message: &Message) -> bool {
        self.matches_positive(message) != self.negated
    }

    fn matches_positive(&self, message: &Message) -> bool {
        let operand = canonical_operand(self.operator, &self.operand);
        match self.operator {
            Operator::Channel => folded_eq(message.channel.as_deref(), &operand),
            Operator::Topic => folded_eq(message.topic.as_deref(), &operand),
            Operator::Sender => folded_eq(Some(&message.sender), &operand),
            Operator::Dm => {
                message.is_direct() && participants(message) == canonical_participants(&operand)
            }
            Operator::Is => match operand.as_str() {
                "dm" => message.is_direct(),
                flag => message.has_flag(flag),
            },
            Operator::Search => {
                let content = message.content.to_lowercase();
                let topic = message.topic.as_deref().unwrap_or_default().to_lowercase();
                operand
                    .split_whitespace()
                    .all(|word| content.contains(word) || topic.contains(word))
            }
            Operator::Id => operand.parse::<u64>().is_ok_and(|id| id == message.id),
        }
    }
}

/// Compares a message field with an already-lowercased operand.
fn folded_eq(field: Option<&str>, operand: &str) -> bool {
    field.is_some_and(|value| value.trim().to_lowercase() == operand)
}

/// Sender plus recipients, lowercased.
fn participants(message: &Message) -> BTreeSet<String> {
    std::iter::once(&message.sender)
        .chain(&message.recipients)
        .map(|p| p.trim().to_lowercase())
        .collect()
}
