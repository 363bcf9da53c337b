//! Trace replay for the narrowcache CLI
//!
//! A trace is a JSON Lines file, one operation per line:
//!
//! ```text
//! {"op":"message","message":{"id":1,"sender":"alice@example.com","channel":"design","topic":"ui"}}
//! {"op":"narrow","filter":"channel:design topic:ui"}
//! {"op":"show"}
//! {"op":"clear"}
//! ```
//!
//! `narrow` behaves like a client switching views: look the filter up and,
//! on a miss, materialize the list from the all-messages superset and cache
//! it. `message` delivers a new message to every cached list.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Arc;

use narrowcache_core::{
    CacheConfig, CacheStats, Dataset, Error, Filter, Message, MessageListData, RecencyCache,
    Result,
};
use serde::Deserialize;

/// One trace line.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TraceOp {
    /// A new message arrives.
    Message {
        /// The message.
        message: Message,
    },
    /// The user narrows to a filter.
    Narrow {
        /// Narrow string, e.g. `channel:design -topic:lunch`.
        filter: String,
    },
    /// Drop every cached list except the superset.
    Clear,
    /// Print the cached lists in recency order.
    Show,
}

/// Summary of a replay.
#[derive(Debug, Clone, Default)]
pub struct ReplayReport {
    /// Operations applied.
    pub ops: usize,
    /// `message` operations.
    pub messages: usize,
    /// `narrow` operations.
    pub narrows: usize,
    /// Narrows answered from the cache.
    pub hits: usize,
    /// Narrows that had to be materialized.
    pub misses: usize,
    /// Cached lists at the end, superset included.
    pub final_len: usize,
    /// Cache counters at the end.
    pub stats: CacheStats,
}

/// A cache plus the superset it is seeded with.
pub struct ReplaySession {
    cache: RecencyCache<MessageListData>,
    report: ReplayReport,
}

impl ReplaySession {
    /// Creates a session with an empty all-messages superset.
    pub fn new(config: &CacheConfig) -> Self {
        let all = Arc::new(MessageListData::all_messages());
        Self {
            cache: RecencyCache::with_config(all, config),
            report: ReplayReport::default(),
        }
    }

    /// Applies one operation, writing a line of output for narrows and shows.
    pub fn apply<W: Write>(&mut self, op: TraceOp, out: &mut W) -> Result<()> {
        self.report.ops += 1;
        match op {
            TraceOp::Message { message } => {
                self.report.messages += 1;
                let batch = [message];
                let reached: usize = self
                    .cache
                    .all()
                    .iter()
                    .map(|data| data.add_messages(&batch))
                    .sum();
                tracing::trace!(id = batch[0].id, reached, "message delivered");
            }
            TraceOp::Narrow { filter } => {
                self.report.narrows += 1;
                let filter = Filter::parse(&filter)?;
                let (data, outcome) = match self.cache.get(&filter) {
                    Some(hit) => {
                        self.report.hits += 1;
                        (hit, "hit")
                    }
                    None => {
                        self.report.misses += 1;
                        let data = Arc::new(MessageListData::populate_from(
                            filter,
                            self.cache.permanent(),
                        ));
                        self.cache.add(Arc::clone(&data));
                        (data, "miss")
                    }
                };
                writeln!(
                    out,
                    "narrow {}: {} ({} messages)",
                    data.filter(),
                    outcome,
                    data.len()
                )?;
            }
            TraceOp::Clear => {
                self.cache.clear();
                writeln!(out, "cleared")?;
            }
            TraceOp::Show => {
                for (i, data) in self.cache.all().iter().enumerate() {
                    writeln!(out, "  [{i}] {} ({} messages)", data.filter(), data.len())?;
                }
            }
        }
        Ok(())
    }

    /// Finishes the session.
    pub fn finish(mut self) -> ReplayReport {
        self.report.final_len = self.cache.len();
        self.report.stats = self.cache.stats();
        self.report
    }
}

/// Parses one trace line. Returns `None` for blank lines.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<TraceOp>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| Error::InvalidTrace {
            line: line_no,
            message: e.to_string(),
        })
}

/// Replays a trace read from `reader`.
pub fn replay_reader<R: BufRead, W: Write>(
    reader: R,
    config: &CacheConfig,
    out: &mut W,
) -> Result<ReplayReport> {
    let mut session = ReplaySession::new(config);
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let Some(op) = parse_line(&line?, line_no)? else {
            continue;
        };
        session.apply(op, out).map_err(|e| match e {
            Error::InvalidFilter(message) => Error::InvalidTrace {
                line: line_no,
                message,
            },
            other => other,
        })?;
    }
    Ok(session.finish())
}

/// Replays the trace file at `path`.
pub fn replay_file<W: Write>(path: &Path, config: &CacheConfig, out: &mut W) -> Result<ReplayReport> {
    let file = File::open(path)?;
    replay_reader(BufReader::new(file), config, out)
}
