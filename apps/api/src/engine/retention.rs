//! Phase 3 retention — the canned plays fired when a life event is detected
//! on an existing customer.

use serde::{Deserialize, Serialize};

use crate::engine::profile::LeadProfile;
use crate::models::activity::Channel;

/// A canned retention action tied to a trigger. `score_delta` is the
/// simulated churn-risk movement (negative is good).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionPlay {
    pub trigger: String,
    pub action: String,
    pub score_delta: i32,
    pub channel: Channel,
}

/// The three retention plays. The first is keyed to the detected life
/// event; the monitor and upsell plays always fire alongside it.
pub fn build_retention_plays(lead: &LeadProfile, life_event: &str) -> Vec<RetentionPlay> {
    vec![
        RetentionPlay {
            trigger: life_event.to_string(),
            action: format!(
                "Send congrats SMS with bundled umbrella quote tailored to {}.",
                lead.life_event.to_lowercase()
            ),
            score_delta: -12,
            channel: Channel::Sms,
        },
        RetentionPlay {
            trigger: "Policy health monitor".to_string(),
            action: "Auto-open task for advisor to audit coverage limits and dependent protections."
                .to_string(),
            score_delta: -5,
            channel: Channel::Call,
        },
        RetentionPlay {
            trigger: "Upsell opportunity".to_string(),
            action: "Email pay-per-mile or umbrella upsell path with projected annual savings."
                .to_string(),
            score_delta: -8,
            channel: Channel::Email,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::profile::default_lead;

    #[test]
    fn test_three_plays_with_expected_deltas() {
        let plays = build_retention_plays(&default_lead(), "New home purchase");
        assert_eq!(plays.len(), 3);
        assert_eq!(plays[0].score_delta, -12);
        assert_eq!(plays[1].score_delta, -5);
        assert_eq!(plays[2].score_delta, -8);
    }

    #[test]
    fn test_first_play_is_triggered_by_the_detected_event() {
        let plays = build_retention_plays(&default_lead(), "Teen driver added");
        assert_eq!(plays[0].trigger, "Teen driver added");
        assert_eq!(plays[0].channel, Channel::Sms);
    }

    #[test]
    fn test_congrats_action_references_the_profile_event() {
        let plays = build_retention_plays(&default_lead(), "Job change");
        assert!(plays[0].action.contains("new baby"));
    }

    #[test]
    fn test_monitor_and_upsell_triggers_are_fixed() {
        let plays = build_retention_plays(&default_lead(), "Job change");
        assert_eq!(plays[1].trigger, "Policy health monitor");
        assert_eq!(plays[1].channel, Channel::Call);
        assert_eq!(plays[2].trigger, "Upsell opportunity");
        assert_eq!(plays[2].channel, Channel::Email);
    }

    #[test]
    fn test_score_delta_serializes_camel_case() {
        let plays = build_retention_plays(&default_lead(), "New baby");
        let json = serde_json::to_value(&plays[0]).unwrap();
        assert_eq!(json["scoreDelta"], -12);
        assert_eq!(json["channel"], "SMS");
    }
}
