//! Phase 2 objection handling — the three-step follow-up plan and the
//! follow-up email, generated through the chat upstream with a scripted
//! fallback.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::engine::outreach::DEFAULT_SLOT_LABEL;
use crate::engine::profile::LeadProfile;
use crate::llm_client::prompts::{build_follow_up_prompt, FOLLOW_UP_SYSTEM};
use crate::llm_client::ChatClient;
use crate::models::activity::Channel;

/// What a follow-up action is trying to accomplish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Nurture,
    Objection,
    Close,
}

/// One step of the follow-up plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUpAction {
    pub channel: Channel,
    pub title: String,
    pub body: String,
    pub intent: Intent,
}

/// The canned three-step objection play: defuse over SMS, nurture with an
/// ROI email, close via a licensed-agent callback task.
pub fn build_follow_up_plan(lead: &LeadProfile, objection: &str) -> Vec<FollowUpAction> {
    let sms = format!(
        "Alex here — appreciate the candor on \"{objection}\". Sending the ROI recap + life-event safety net we launched for families hitting {}. Want me to hold the {DEFAULT_SLOT_LABEL} slot?",
        lead.life_event.to_lowercase()
    );

    vec![
        FollowUpAction {
            channel: Channel::Sms,
            title: "Immediate objection defuse".to_string(),
            body: sms,
            intent: Intent::Objection,
        },
        FollowUpAction {
            channel: Channel::Email,
            title: "ROI proof pack".to_string(),
            body: "Summarise savings, attach renewal comparison, re-share Calendly link."
                .to_string(),
            intent: Intent::Nurture,
        },
        FollowUpAction {
            channel: Channel::Task,
            title: "Licensed agent callback".to_string(),
            body: "Schedule licensed agent to call with case study referencing objection."
                .to_string(),
            intent: Intent::Close,
        },
    ]
}

/// A generated (or scripted) follow-up email.
#[derive(Debug, Clone, Serialize)]
pub struct FollowUpEmail {
    pub subject: String,
    pub body: String,
    pub reasoning: String,
}

fn follow_up_subject(lead: &LeadProfile) -> String {
    format!("{}, here’s the ROI proof you asked for", lead.first_name())
}

/// Scripted body used whenever the chat upstream is absent or fails.
pub fn build_fallback_follow_up(lead: &LeadProfile, objection: &str) -> String {
    format!(
        "Hi {},\n\nYou mentioned \"{objection}\". Here’s the 2-minute breakdown on how Solisa addresses it for families navigating {}.\n\n• Renewal math: we’ve projected a {} reversal\n• Life-event coverage: proactive guardrails as your {} unfolds\n• Next step: the Calendly slot we held ({DEFAULT_SLOT_LABEL})\n\nTalk soon,\nSolisa AI SDR",
        lead.first_name(),
        lead.life_event.to_lowercase(),
        lead.pain_point.to_lowercase(),
        lead.life_event.to_lowercase()
    )
}

/// Generates the follow-up email through the chat upstream. Missing key or
/// any call failure degrades to the scripted body; Phase 2 never errors.
pub async fn generate_follow_up_email(
    chat: &ChatClient,
    lead: &LeadProfile,
    objection: &str,
) -> FollowUpEmail {
    let subject = follow_up_subject(lead);
    let fallback = build_fallback_follow_up(lead, objection);

    if !chat.is_configured() {
        return FollowUpEmail {
            subject,
            body: fallback,
            reasoning: "ChatGPT API key missing. Using scripted follow-up.".to_string(),
        };
    }

    let prompt = build_follow_up_prompt(lead, objection);

    match chat.complete(FOLLOW_UP_SYSTEM, &prompt).await {
        Ok(completion) => {
            info!("Follow-up email generated upstream for {}", lead.name);
            let body = completion
                .content
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .unwrap_or(fallback);
            let reasoning = match completion.total_tokens {
                Some(tokens) => format!("Generated via ChatGPT ({tokens} tokens)."),
                None => "Generated via ChatGPT.".to_string(),
            };
            FollowUpEmail {
                subject,
                body,
                reasoning,
            }
        }
        Err(e) => {
            error!("Failed to reach OpenAI: {e}");
            FollowUpEmail {
                subject,
                body: fallback,
                reasoning: "ChatGPT call failed. Using scripted follow-up.".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::profile::default_lead;

    #[test]
    fn test_plan_is_three_steps_with_expected_intents() {
        let plan = build_follow_up_plan(&default_lead(), "Too expensive");
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].intent, Intent::Objection);
        assert_eq!(plan[1].intent, Intent::Nurture);
        assert_eq!(plan[2].intent, Intent::Close);
    }

    #[test]
    fn test_plan_channels_are_sms_email_task() {
        let plan = build_follow_up_plan(&default_lead(), "Too expensive");
        assert_eq!(plan[0].channel, Channel::Sms);
        assert_eq!(plan[1].channel, Channel::Email);
        assert_eq!(plan[2].channel, Channel::Task);
    }

    #[test]
    fn test_defuse_sms_quotes_the_objection() {
        let plan = build_follow_up_plan(&default_lead(), "Already bundled elsewhere");
        assert!(plan[0].body.contains("\"Already bundled elsewhere\""));
        assert!(plan[0].body.contains("new baby"));
        assert!(plan[0].body.contains(DEFAULT_SLOT_LABEL));
    }

    #[test]
    fn test_intent_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Intent::Objection).unwrap(),
            "\"objection\""
        );
        assert_eq!(serde_json::to_string(&Intent::Close).unwrap(), "\"close\"");
    }

    #[test]
    fn test_subject_uses_first_name() {
        assert_eq!(
            follow_up_subject(&default_lead()),
            "Alex, here’s the ROI proof you asked for"
        );
    }

    #[test]
    fn test_fallback_body_quotes_objection_and_holds_slot() {
        let body = build_fallback_follow_up(&default_lead(), "Agent never follows up");
        assert!(body.starts_with("Hi Alex,"));
        assert!(body.contains("\"Agent never follows up\""));
        assert!(body.contains("premiums spiked 18% at renewal"));
        assert!(body.contains(DEFAULT_SLOT_LABEL));
        assert!(body.ends_with("Solisa AI SDR"));
    }
}
