//! # `narrowcache` Core
//!
//! Recency cache mapping narrow filters to materialized message list data.
//!
//! Narrowing a message view to a channel, a topic, or a search is expensive
//! to recompute from scratch. [`RecencyCache`] keeps the most recently used
//! message lists keyed by the filter that produced them, so revisiting a
//! narrow is a linear scan instead of a rebuild. One permanent dataset (the
//! unfiltered "all messages" view) is seeded at construction and is never
//! evicted.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use narrowcache_core::{Filter, MessageListData, RecencyCache};
//!
//! let all_messages = Arc::new(MessageListData::all_messages());
//! let mut cache = RecencyCache::new(Arc::clone(&all_messages));
//!
//! let design = Filter::parse("channel:design").unwrap();
//! assert!(cache.get(&design).is_none());
//!
//! let narrowed = Arc::new(MessageListData::populate_from(design.clone(), &all_messages));
//! cache.add(Arc::clone(&narrowed));
//!
//! let hit = cache.get(&Filter::parse("stream:Design").unwrap()).unwrap();
//! assert!(Arc::ptr_eq(&hit, &narrowed));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]

pub mod cache;
pub mod config;
pub mod dataset;
#[cfg(test)]
mod dataset_tests;
pub mod error;
#[cfg(test)]
mod error_tests;
pub mod filter;
pub mod message;

pub use cache::{
    CacheStats, RecencyCache, SharedRecencyCache, CACHE_STORAGE_LIMIT, KEY_RESET_THRESHOLD,
};
pub use config::{CacheConfig, ConfigError, LoggingConfig, NarrowCacheConfig};
pub use dataset::{Dataset, MessageListData};
pub use error::{Error, Result};
pub use filter::{Filter, NarrowTerm, Operator, SemanticEq};
pub use message::Message;
