//! Builder methods for creating NarrowTerm and Filter instances.

use super::{Filter, NarrowTerm, Operator};

impl NarrowTerm {
    /// Creates a non-negated term.
    #[must_use]
    pub fn new(operator: Operator, operand: impl Into<String>) -> Self {
        Self {
            operator,
            operand: operand.into(),
            negated: false,
        }
    }

    /// Creates a channel term.
    #[must_use]
    pub fn channel(name: impl Into<String>) -> Self {
        Self::new(Operator::Channel, name)
    }

    /// Creates a topic term.
    #[must_use]
    pub fn topic(name: impl Into<String>) -> Self {
        Self::new(Operator::Topic, name)
    }

    /// Creates a sender term.
    #[must_use]
    pub fn sender(address: impl Into<String>) -> Self {
        Self::new(Operator::Sender, address)
    }

    /// Creates a direct-message term from participant addresses.
    #[must_use]
    pub fn dm<S: AsRef<str>>(participants: &[S]) -> Self {
        let joined = participants
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");
        Self::new(Operator::Dm, joined)
    }

    /// Creates an `is:` term.
    #[must_use]
    pub fn is(property: impl Into<String>) -> Self {
        Self::new(Operator::Is, property)
    }

    /// Creates a search term.
    #[must_use]
    pub fn search(text: impl Into<String>) -> Self {
        Self::new(Operator::Search, text)
    }

    /// Creates an id term.
    #[must_use]
    pub fn id(id: u64) -> Self {
        Self::new(Operator::Id, id.to_string())
    }

    /// Returns the negated form of this term.
    #[must_use]
    pub fn negated(mut self) -> Self {
        self.negated = !self.negated;
        self
    }
}

impl Filter {
    /// Appends a term.
    #[must_use]
    pub fn with_term(mut self, term: NarrowTerm) -> Self {
        self.terms.push(term);
        self
    }
}
