//! Message list data: the datasets the recency cache stores.
//!
//! The cache only needs [`Dataset::filter`]. [`MessageListData`] is the
//! concrete dataset: the messages selected by a filter, ordered by id. Its
//! message set sits behind a lock so that a list shared through an `Arc`
//! (cached, and possibly rendered) can still receive new messages.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::filter::{Filter, SemanticEq};
use crate::message::Message;

/// A cached value keyed by its filter.
pub trait Dataset {
    /// The selection criterion type.
    type Criterion: SemanticEq;

    /// The criterion this dataset was materialized for.
    fn filter(&self) -> &Self::Criterion;
}

/// Messages selected by a filter, ordered by message id.
#[derive(Debug)]
pub struct MessageListData {
    filter: Filter,
    messages: RwLock<BTreeMap<u64, Message>>,
}

impl MessageListData {
    /// Creates an empty list for `filter`.
    #[must_use]
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            messages: RwLock::new(BTreeMap::new()),
        }
    }

    /// Creates the empty unfiltered list, the superset of every other list.
    #[must_use]
    pub fn all_messages() -> Self {
        Self::new(Filter::all_messages())
    }

    /// Materializes the list for `filter` from the messages of `superset`.
    #[must_use]
    pub fn populate_from(filter: Filter, superset: &MessageListData) -> Self {
        let data = Self::new(filter);
        {
            let source = superset.messages.read();
            let mut target = data.messages.write();
            for (id, message) in source.iter() {
                if data.filter.matches(message) {
                    target.insert(*id, message.clone());
                }
            }
        }
        data
    }

    /// Adds the messages that match this list's filter.
    ///
    /// Returns how many were added; messages already present are replaced
    /// and not counted.
    pub fn add_messages(&self, messages: &[Message]) -> usize {
        let mut guard = self.messages.write();
        let mut added = 0;
        for message in messages.iter().filter(|m| self.filter.matches(m)) {
            if guard.insert(message.id, message.clone()).is_none() {
                added += 1;
            }
        }
        added
    }

    /// Removes messages by id. Returns how many were present.
    pub fn remove_messages(&self, ids: &[u64]) -> usize {
        let mut guard = self.messages.write();
        ids.iter().filter(|id| guard.remove(*id).is_some()).count()
    }

    /// Message ids in ascending order.
    #[must_use]
    pub fn message_ids(&self) -> Vec<u64> {
        self.messages.read().keys().copied().collect()
    }

    /// Returns the message with `id`, if present.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<Message> {
        self.messages.read().get(&id).cloned()
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    /// Returns true if the list holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }

    /// Oldest message id.
    #[must_use]
    pub fn first_id(&self) -> Option<u64> {
        self.messages.read().keys().next().copied()
    }

    /// Newest message id.
    #[must_use]
    pub fn last_id(&self) -> Option<u64> {
        self.messages.read().keys().next_back().copied()
    }
}

impl Dataset for MessageListData {
    type Criterion = Filter;

    fn filter(&self) -> &Filter {
        &self.filter
    }
}
