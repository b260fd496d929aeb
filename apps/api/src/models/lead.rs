#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::engine::profile::{LeadProfile, PreferredChannel};

/// A captured lead as stored in the `leads` table.
/// Status starts at `new`; the confirm endpoint is the only mutator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeadRow {
    pub id: i64,
    pub name: String,
    pub company: String,
    pub source: String,
    pub persona_tone: String,
    pub life_event: String,
    pub insurer: String,
    pub renewal_month: String,
    pub pain_point: String,
    pub preferred_channel: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeadRow {
    /// Rebuilds the engine profile from a stored row. A channel value
    /// outside the catalog falls back to SMS rather than failing the read.
    pub fn to_profile(&self) -> LeadProfile {
        LeadProfile {
            name: self.name.clone(),
            company: self.company.clone(),
            source: self.source.clone(),
            preferred_channel: PreferredChannel::parse(&self.preferred_channel)
                .unwrap_or(PreferredChannel::Sms),
            persona_tone: self.persona_tone.clone(),
            life_event: self.life_event.clone(),
            insurer: self.insurer.clone(),
            renewal_month: self.renewal_month.clone(),
            pain_point: self.pain_point.clone(),
        }
    }
}

/// Lead lifecycle states. Stored as TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadStatus {
    New,
    Qualified,
    Nurture,
    Customer,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Nurture => "nurture",
            LeadStatus::Customer => "customer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_matches_schema_default() {
        assert_eq!(LeadStatus::New.as_str(), "new");
        assert_eq!(LeadStatus::Qualified.as_str(), "qualified");
        assert_eq!(LeadStatus::Nurture.as_str(), "nurture");
        assert_eq!(LeadStatus::Customer.as_str(), "customer");
    }

    fn sample_row(preferred_channel: &str) -> LeadRow {
        LeadRow {
            id: 1,
            name: "Alex Johnson".to_string(),
            company: "Solisa Prospects".to_string(),
            source: "Website form".to_string(),
            persona_tone: "Warm & concise".to_string(),
            life_event: "New baby".to_string(),
            insurer: "State Farm".to_string(),
            renewal_month: "2025-02".to_string(),
            pain_point: "Premiums spiked 18% at renewal".to_string(),
            preferred_channel: preferred_channel.to_string(),
            status: "new".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_to_profile_round_trips_fields() {
        let profile = sample_row("Email").to_profile();
        assert_eq!(profile.name, "Alex Johnson");
        assert_eq!(profile.preferred_channel, PreferredChannel::Email);
        assert_eq!(profile.renewal_month, "2025-02");
    }

    #[test]
    fn test_to_profile_defaults_unknown_channel_to_sms() {
        let profile = sample_row("Pigeon").to_profile();
        assert_eq!(profile.preferred_channel, PreferredChannel::Sms);
    }
}
