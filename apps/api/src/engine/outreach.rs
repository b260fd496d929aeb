//! Phase 1 outreach composition — ROI copy keyed by pain point, the
//! acquisition timeline, and the SMS/email preview. The SMS can be composed
//! upstream (FastMCP); everything here falls back to deterministic copy.

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use url::Url;

use crate::compose_client::{ComposeClient, ComposeContext, ComposeRequest};
use crate::engine::profile::{format_renewal, LeadProfile, PreferredChannel};

const CALENDAR_LINK_BASE: &str = "https://calendly.com/solisa/intro";
pub const DEFAULT_SLOT_LABEL: &str = "Tuesday · 10:30 AM ET · 15 min strategy session";

/// Savings copy for one pain point: a subject hook, an SMS line, and an
/// email paragraph.
#[derive(Debug, Clone, Copy)]
pub struct RoiCopy {
    pub hook: &'static str,
    pub sms: &'static str,
    pub email: &'static str,
}

const FALLBACK_ROI_COPY: RoiCopy = RoiCopy {
    hook: "let’s build the better policy",
    sms: "Let’s unpack the renewal math together and make sure coverage matches your next chapter.",
    email: "We’ll review the renewal math, coverage gaps, and put proactive automations around every life event that hits.",
};

/// Looks up the ROI copy for a pain point. Unknown pain points get the
/// generic fallback entry.
pub fn roi_copy(pain_point: &str) -> RoiCopy {
    match pain_point {
        "Premiums spiked 18% at renewal" => RoiCopy {
            hook: "we can reverse the 18% hike",
            sms: "Families in your stage are averaging a $412/yr reduction when they switch to Solisa.",
            email: "We see households in the same stage land $412 in annual savings by letting us re-rate the policy before renewal hits.",
        },
        "Agent never follows up" => RoiCopy {
            hook: "here’s how responsive coverage feels",
            sms: "You’ll have an always-on agentic pod + a named advisor — no more waiting 5 days for a reply.",
            email: "Our clients move to a blended AI + licensed advisor model — every request gets an answer in <15 minutes, not days.",
        },
        "Coverage gaps for new assets" => RoiCopy {
            hook: "we close the gaps on day one",
            sms: "We automatically surface add-ons the moment new assets appear so nothing slips through.",
            email: "The engine inspects new dependents, renovations, and vehicles, so your coverage always matches real life.",
        },
        "Claims experience was slow" => RoiCopy {
            hook: "let’s rebuild the claims experience",
            sms: "Our concierge team handles adjusters while the AI preps documentation before the first call.",
            email: "When issues pop up, we pre-fill claims packets and escalate directly to senior adjusters to cut the cycle time.",
        },
        "Bundle discounts not applied" => RoiCopy {
            hook: "unlock the bundle discounts you were promised",
            sms: "We rebalance the portfolio across home + auto to surface the missing discounts automatically.",
            email: "Expect a full repricing that blends home, auto, and umbrella so every eligible discount hits your renewal.",
        },
        _ => FALLBACK_ROI_COPY,
    }
}

/// A held meeting slot surfaced in outreach copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarSlot {
    pub label: String,
    pub link: String,
}

/// Personalized Calendly link carrying the prospect's name and the renewal
/// topic as query parameters.
pub fn build_calendar_link(lead: &LeadProfile) -> String {
    let topic = format!("{} · {} renewal", lead.life_event, lead.insurer);
    Url::parse_with_params(
        CALENDAR_LINK_BASE,
        &[("name", lead.name.as_str()), ("topic", topic.as_str())],
    )
    .expect("calendar base URL is valid")
    .to_string()
}

fn default_calendar_slot(lead: &LeadProfile) -> CalendarSlot {
    CalendarSlot {
        label: DEFAULT_SLOT_LABEL.to_string(),
        link: build_calendar_link(lead),
    }
}

/// One step of the simulated acquisition timeline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepBlueprint {
    pub id: &'static str,
    pub title: String,
    pub description: String,
    pub log_message: String,
}

/// The six-step acquisition timeline rendered by the demo.
pub fn create_lead_blueprints(lead: &LeadProfile) -> Vec<StepBlueprint> {
    let renewal = format_renewal(&lead.renewal_month);
    let channel = lead.preferred_channel.as_str();

    vec![
        StepBlueprint {
            id: "capture",
            title: "Lead captured in <2 seconds".to_string(),
            description: format!(
                "Form submission from {} ({}) syncs to the Agentic Engine instantly.",
                lead.name, lead.source
            ),
            log_message: format!(
                "Lead intake completed for {}. Profile seeded with website, referral, and UTM context.",
                lead.name
            ),
        },
        StepBlueprint {
            id: "enrich",
            title: "Clay + Apollo enrichment".to_string(),
            description: format!(
                "Clay flags {} and Apollo confirms {} policy renewing in {}. Pain point: {}.",
                lead.life_event.to_lowercase(),
                lead.insurer,
                renewal,
                lead.pain_point
            ),
            log_message: format!(
                "Clay appended life-stage signal \"{}\". Apollo matched {} policy with renewal {}.",
                lead.life_event, lead.insurer, renewal
            ),
        },
        StepBlueprint {
            id: "profile",
            title: "Contextual dossier assembled".to_string(),
            description: format!(
                "Reviews, LinkedIn, and CRM history build a living brief and preferred tone: {}.",
                lead.persona_tone
            ),
            log_message: format!(
                "Prospect tone calibrated to \"{}\". CRM notes and public reviews summarized for objections.",
                lead.persona_tone
            ),
        },
        StepBlueprint {
            id: "outreach",
            title: format!("{channel} outreach dispatched"),
            description: format!(
                "{} message references {} and quantifies savings vs. {}.",
                channel,
                lead.life_event.to_lowercase(),
                lead.insurer
            ),
            log_message: format!(
                "{} message sent with ROI proof tailored to {}.",
                channel, lead.insurer
            ),
        },
        StepBlueprint {
            id: "response",
            title: "Prospect signals intent".to_string(),
            description: "AI parses reply \"Yes, this week works\" and scores readiness to switch."
                .to_string(),
            log_message: "Reply intent scored as \"Hot\". Objection tracking updated (cost sensitivity)."
                .to_string(),
        },
        StepBlueprint {
            id: "booked",
            title: "Calendly slot secured".to_string(),
            description: "Meeting confirmed for Tuesday 10:30 AM; CRM + Slack updated automatically."
                .to_string(),
            log_message: "Calendly confirmation posted to Slack #pipeline and CRM task opened for licensed agent."
                .to_string(),
        },
    ]
}

pub fn create_initial_log(lead: &LeadProfile) -> String {
    format!(
        "New {} lead captured for {}.",
        lead.source.to_lowercase(),
        lead.name
    )
}

/// The three enrichment insight lines shown next to the timeline.
pub fn create_lead_insights(lead: &LeadProfile) -> Vec<String> {
    let renewal = format_renewal(&lead.renewal_month);
    let renewal_line = if renewal == "their next renewal window" {
        "window approaching".to_string()
    } else {
        format!("set for {renewal}")
    };

    vec![
        format!("Life event detected: {}.", lead.life_event),
        format!("Current carrier: {}; renewal {}.", lead.insurer, renewal_line),
        format!("Primary pain point: {}.", lead.pain_point),
    ]
}

fn renewal_text(lead: &LeadProfile) -> String {
    let label = format_renewal(&lead.renewal_month);
    if label == "their next renewal window" {
        "coming up soon".to_string()
    } else {
        format!("in {label}")
    }
}

/// Deterministic SMS used whenever the composition upstream is absent or
/// fails. References the life event, carrier, renewal window, and the ROI
/// line for the prospect's pain point.
pub fn build_fallback_sms(lead: &LeadProfile) -> String {
    let roi = roi_copy(&lead.pain_point);
    let cta = match lead.preferred_channel {
        PreferredChannel::Sms => "quick text thread",
        PreferredChannel::Email => "15-min consult",
    };

    format!(
        "Hey {} — saw the {} update and your {} renewal {}. {} Free for a {} this week? Reply YES and I’ll lock a slot.",
        lead.first_name(),
        lead.life_event.to_lowercase(),
        lead.insurer,
        renewal_text(lead),
        roi.sms,
        cta
    )
}

/// An SMS draft: the composed (or fallback) message plus the engine's note
/// on how it was produced.
#[derive(Debug, Clone)]
pub struct SmsDraft {
    pub sms: String,
    pub reasoning: Option<String>,
}

/// The full Phase 1 outreach package.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachPreview {
    pub sms: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    pub email_subject: String,
    pub email_body: String,
    pub calendar: CalendarSlot,
}

/// Assembles the outreach preview. `draft` carries the upstream-composed
/// SMS when available; without it the heuristic fallback is used.
pub fn create_outreach_preview(lead: &LeadProfile, draft: Option<SmsDraft>) -> OutreachPreview {
    let first_name = lead.first_name().to_string();
    let roi = roi_copy(&lead.pain_point);
    let calendar = default_calendar_slot(lead);

    let (sms, reasoning) = match draft {
        Some(draft) => (draft.sms, draft.reasoning),
        None => (build_fallback_sms(lead), None),
    };

    let recap = match lead.preferred_channel {
        PreferredChannel::Sms => "text-first recap",
        PreferredChannel::Email => "15-min Zoom",
    };

    let email_body = format!(
        "Hi {first_name},\n\nAppreciate you flagging that {}. {}\n\nClay already highlighted the {} and Apollo confirms your {} policy is {}. I held a {recap} for you ({}). Feel free to reschedule here: {}\n\nTalk soon,\nSolisa AI SDR",
        lead.pain_point.to_lowercase(),
        roi.email,
        lead.life_event.to_lowercase(),
        lead.insurer,
        renewal_text(lead),
        calendar.label,
        calendar.link
    );

    OutreachPreview {
        sms,
        reasoning,
        email_subject: format!("{first_name}, {}", roi.hook),
        email_body,
        calendar,
    }
}

/// Composes the outreach SMS through the upstream API, degrading to the
/// heuristic fallback when the key is missing or the call fails. Never
/// errors — Phase 1 must complete regardless of upstream health.
pub async fn compose_outreach_sms(composer: &ComposeClient, lead: &LeadProfile) -> SmsDraft {
    if !composer.is_configured() {
        return SmsDraft {
            sms: build_fallback_sms(lead),
            reasoning: Some("FastMCP API key missing. Using heuristic fallback copy.".to_string()),
        };
    }

    let request = ComposeRequest {
        persona: lead.persona_tone.clone(),
        goal: "Craft an insurance SDR SMS with a YES/NO CTA for Calendly booking.".to_string(),
        context: ComposeContext {
            name: lead.name.clone(),
            life_event: lead.life_event.clone(),
            insurer: lead.insurer.clone(),
            renewal_month: lead.renewal_month.clone(),
            pain_point: lead.pain_point.clone(),
        },
    };

    match composer.compose(&request).await {
        Ok(composed) => {
            info!("Outreach SMS composed upstream for {}", lead.name);
            SmsDraft {
                sms: composed.message.unwrap_or_else(|| build_fallback_sms(lead)),
                reasoning: Some(
                    composed
                        .reasoning
                        .unwrap_or_else(|| "FastMCP composed this outreach message.".to_string()),
                ),
            }
        }
        Err(e) => {
            error!("Failed to reach FastMCP: {e}");
            SmsDraft {
                sms: build_fallback_sms(lead),
                reasoning: Some(
                    "FastMCP call failed. Falling back to static template.".to_string(),
                ),
            }
        }
    }
}
