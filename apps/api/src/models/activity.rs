#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::engine::profile::PreferredChannel;

/// Append-only log row tagged with the funnel phase that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InteractionRow {
    pub id: i64,
    pub lead_id: i64,
    pub phase: String,
    pub channel: String,
    pub summary: String,
    pub payload: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// An action item opened for a lead. The demo opens tasks but never
/// transitions them out of `pending`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TaskRow {
    pub id: i64,
    pub lead_id: i64,
    pub phase: String,
    pub action_type: String,
    pub due_at: Option<DateTime<Utc>>,
    pub status: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// Append-only record of a detected life event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RetentionEventRow {
    pub id: i64,
    pub lead_id: i64,
    pub event_type: String,
    pub detected_at: DateTime<Utc>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Marketing-funnel stage used as a labeling tag on log rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Acquisition,
    FollowUp,
    Retention,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Acquisition => "PHASE1",
            Phase::FollowUp => "PHASE2",
            Phase::Retention => "PHASE3",
        }
    }
}

/// Communication channel recorded on interactions and engine actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "SMS")]
    Sms,
    Email,
    Call,
    Task,
    System,
}

impl From<PreferredChannel> for Channel {
    fn from(channel: PreferredChannel) -> Self {
        match channel {
            PreferredChannel::Sms => Channel::Sms,
            PreferredChannel::Email => Channel::Email,
        }
    }
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "SMS",
            Channel::Email => "Email",
            Channel::Call => "Call",
            Channel::Task => "Task",
            Channel::System => "System",
        }
    }
}

/// Task action vocabulary. Stored as TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Call,
    Sms,
    Email,
    Task,
    Wait,
}

impl TaskAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskAction::Call => "call",
            TaskAction::Sms => "sms",
            TaskAction::Email => "email",
            TaskAction::Task => "task",
            TaskAction::Wait => "wait",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_tags_are_uppercase() {
        assert_eq!(Phase::Acquisition.as_str(), "PHASE1");
        assert_eq!(Phase::FollowUp.as_str(), "PHASE2");
        assert_eq!(Phase::Retention.as_str(), "PHASE3");
    }

    #[test]
    fn test_channel_serializes_like_the_wire_format() {
        assert_eq!(serde_json::to_string(&Channel::Sms).unwrap(), "\"SMS\"");
        assert_eq!(serde_json::to_string(&Channel::Email).unwrap(), "\"Email\"");
        assert_eq!(serde_json::to_string(&Channel::Call).unwrap(), "\"Call\"");
    }

    #[test]
    fn test_task_actions_are_lowercase() {
        assert_eq!(TaskAction::Sms.as_str(), "sms");
        assert_eq!(TaskAction::Wait.as_str(), "wait");
    }
}
