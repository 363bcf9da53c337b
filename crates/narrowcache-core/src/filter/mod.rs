//! Narrow filters for message lists.
//!
//! A [`Filter`] is a conjunction of [`NarrowTerm`]s such as
//! `channel:design topic:ui -sender:bot@example.com`. The recency cache only
//! relies on [`SemanticEq`]: two filters that select the same messages by
//! construction (different operator aliases, term order, operand case) are
//! the same cache key.
//!
//! ## Usage
//!
//! ```rust
//! use narrowcache_core::filter::{Filter, NarrowTerm, SemanticEq};
//!
//! let parsed = Filter::parse("stream:Design -topic:lunch").unwrap();
//! let built = Filter::new(vec![
//!     NarrowTerm::topic("lunch").negated(),
//!     NarrowTerm::channel("design"),
//! ]);
//! assert!(parsed.semantic_eq(&built));
//! ```

mod builders;
mod canonical;
mod matching;
mod parse;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic equality between selection criteria.
///
/// Implementations must be reflexive, symmetric and transitive. A relation
/// that is not degrades cache hit rates and may leave duplicate entries, but
/// never causes a panic.
pub trait SemanticEq {
    /// Returns true if `self` and `other` select the same data.
    fn semantic_eq(&self, other: &Self) -> bool;
}

/// Narrow operators.
///
/// Declaration order is the canonical sort order of terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operator {
    /// Messages in a channel (alias: `stream`).
    #[serde(alias = "stream")]
    Channel,
    /// Messages in a topic (alias: `subject`).
    #[serde(alias = "subject")]
    Topic,
    /// Messages from a sender (alias: `from`).
    #[serde(alias = "from")]
    Sender,
    /// Direct messages with an exact set of participants (alias: `pm-with`).
    #[serde(alias = "pm-with")]
    Dm,
    /// Messages with a property: `dm`, or a user flag such as `starred`.
    Is,
    /// Full-text search over content and topic.
    Search,
    /// A single message by id.
    Id,
}

impl Operator {
    /// Returns the canonical operator name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Topic => "topic",
            Self::Sender => "sender",
            Self::Dm => "dm",
            Self::Is => "is",
            Self::Search => "search",
            Self::Id => "id",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `operator:operand` pair, optionally negated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrowTerm {
    /// The operator.
    pub operator: Operator,
    /// Raw operand as written by the user.
    pub operand: String,
    /// Whether the term excludes matching messages.
    #[serde(default)]
    pub negated: bool,
}

impl fmt::Display for NarrowTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("-")?;
        }
        if self.operand.chars().any(char::is_whitespace) {
            write!(f, "{}:\"{}\"", self.operator, self.operand)
        } else {
            write!(f, "{}:{}", self.operator, self.operand)
        }
    }
}

/// A conjunction of narrow terms. The empty filter selects all messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Terms that must all hold.
    pub terms: Vec<NarrowTerm>,
}

impl Filter {
    /// Creates a filter from terms.
    #[must_use]
    pub fn new(terms: Vec<NarrowTerm>) -> Self {
        Self { terms }
    }

    /// The unfiltered view.
    #[must_use]
    pub fn all_messages() -> Self {
        Self::default()
    }

    /// Returns true if this filter has no terms.
    #[must_use]
    pub fn is_all_messages(&self) -> bool {
        self.terms.is_empty()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all_messages() {
            return f.write_str("(all messages)");
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

impl SemanticEq for Filter {
    fn semantic_eq(&self, other: &Self) -> bool {
        self.canonical_terms() == other.canonical_terms()
    }
}
