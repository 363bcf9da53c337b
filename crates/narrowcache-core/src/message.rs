//! Message records that message lists are built from.

use serde::{Deserialize, Serialize};

/// A single message as seen by narrow filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique, monotonically increasing message id.
    pub id: u64,
    /// Sender address.
    pub sender: String,
    /// Channel name; `None` for direct messages.
    #[serde(default)]
    pub channel: Option<String>,
    /// Topic within the channel.
    #[serde(default)]
    pub topic: Option<String>,
    /// Direct message recipients, sender excluded.
    #[serde(default)]
    pub recipients: Vec<String>,
    /// Rendered message body.
    #[serde(default)]
    pub content: String,
    /// User flags such as `starred`, `mentioned`, `unread`.
    #[serde(default)]
    pub flags: Vec<String>,
}

impl Message {
    /// Creates a channel message.
    #[must_use]
    pub fn channel(
        id: u64,
        sender: impl Into<String>,
        channel: impl Into<String>,
        topic: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            sender: sender.into(),
            channel: Some(channel.into()),
            topic: Some(topic.into()),
            recipients: Vec::new(),
            content: content.into(),
            flags: Vec::new(),
        }
    }

    /// Creates a direct message.
    #[must_use]
    pub fn direct(
        id: u64,
        sender: impl Into<String>,
        recipients: Vec<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            sender: sender.into(),
            channel: None,
            topic: None,
            recipients,
            content: content.into(),
            flags: Vec::new(),
        }
    }

    /// Adds a user flag.
    #[must_use]
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// Returns true for direct messages.
    #[must_use]
    pub fn is_direct(&self) -> bool {
        self.channel.is_none()
    }

    /// Returns true if the message carries `flag` (case-insensitive).
    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f.eq_ignore_ascii_case(flag))
    }
}
