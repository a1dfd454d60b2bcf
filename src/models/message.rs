use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One message in a guest-host conversation about a property.
///
/// Conversations are an ordered append-only log of these records, keyed by
/// (property, host, sender).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub message_id: i64,
    pub property_id: i64,
    pub host_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A conversation as listed in a user's inbox: the latest message plus
/// enough context to open the thread
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ConversationSummary {
    pub property_id: i64,
    pub property_title: String,
    pub host_id: i64,
    pub sender_id: i64,
    pub last_message: String,
    pub last_sent_at: DateTime<Utc>,
    pub message_count: i64,
}
