//! Axum route handlers for the funnel API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::engine::followup::{
    build_follow_up_plan, generate_follow_up_email, FollowUpAction, FollowUpEmail,
};
use crate::engine::outreach::{
    build_calendar_link, compose_outreach_sms, create_initial_log, create_lead_blueprints,
    create_lead_insights, create_outreach_preview, OutreachPreview, StepBlueprint,
};
use crate::engine::profile::{
    default_lead, sanitize_renewal_month, LeadProfile, PreferredChannel, COMMUNICATION_CHANNELS,
    INSURERS, LIFE_EVENTS, PAIN_POINTS, PERSONA_TONES,
};
use crate::engine::retention::{build_retention_plays, RetentionPlay};
use crate::errors::AppError;
use crate::funnel::store::{
    fetch_lead, fetch_lead_detail, fetch_recent_leads, insert_interaction, insert_lead,
    insert_retention_event, insert_task, update_lead_status, LeadDetail,
};
use crate::models::activity::{Channel, Phase, TaskAction};
use crate::models::lead::LeadStatus;
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: i64 = 10;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Raw form submission. Every field is optional at the wire level; the
/// validation pass decides what is actually missing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub name: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub preferred_channel: Option<String>,
    pub persona_tone: Option<String>,
    pub life_event: Option<String>,
    pub insurer: Option<String>,
    pub renewal_month: Option<String>,
    pub pain_point: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadResponse {
    pub lead_id: i64,
    pub timeline: Vec<StepBlueprint>,
    pub outreach: OutreachPreview,
    pub initial_log: String,
    pub insights: Vec<String>,
    pub persona_tone: String,
    pub lead: LeadProfile,
    pub follow_up_email: FollowUpEmail,
    pub follow_up_plan: Vec<FollowUpAction>,
    pub retention: Vec<RetentionPlay>,
}

#[derive(Debug, Deserialize)]
pub struct LeadsQuery {
    pub details: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResponse {
    pub calendar_link: String,
    pub meeting_title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionRequest {
    pub life_event: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RetentionResponse {
    pub plays: Vec<RetentionPlay>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub life_events: Vec<&'static str>,
    pub insurers: Vec<&'static str>,
    pub pain_points: Vec<&'static str>,
    pub persona_tones: Vec<&'static str>,
    pub communication_channels: Vec<&'static str>,
    pub default_lead: LeadProfile,
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

fn sanitize_string(value: Option<&String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

/// Builds a profile from the raw submission and collects every validation
/// failure. The caller rejects the submission when any error is present.
fn build_lead_from_submission(payload: &LeadSubmission) -> (LeadProfile, Vec<String>) {
    let defaults = default_lead();

    let channel_raw = sanitize_string(payload.preferred_channel.as_ref(), "");
    let channel = PreferredChannel::parse(&channel_raw);

    let has_renewal_input = payload
        .renewal_month
        .as_ref()
        .is_some_and(|v| !v.trim().is_empty());

    let lead = LeadProfile {
        name: sanitize_string(payload.name.as_ref(), ""),
        company: sanitize_string(payload.company.as_ref(), &defaults.company),
        source: sanitize_string(payload.source.as_ref(), ""),
        preferred_channel: channel.unwrap_or(defaults.preferred_channel),
        persona_tone: sanitize_string(payload.persona_tone.as_ref(), ""),
        life_event: sanitize_string(payload.life_event.as_ref(), ""),
        insurer: sanitize_string(payload.insurer.as_ref(), ""),
        renewal_month: if has_renewal_input {
            sanitize_renewal_month(payload.renewal_month.as_deref().unwrap_or(""))
        } else {
            defaults.renewal_month.clone()
        },
        pain_point: sanitize_string(payload.pain_point.as_ref(), ""),
    };

    let mut errors = Vec::new();

    if lead.name.is_empty() {
        errors.push("Please provide a name.".to_string());
    }
    if lead.source.is_empty() {
        errors.push("Please provide a source.".to_string());
    }
    if channel.is_none() {
        errors.push("Preferred channel must be either SMS or Email.".to_string());
    }
    if lead.persona_tone.is_empty() {
        errors.push("Please provide a persona tone.".to_string());
    }
    if lead.life_event.is_empty() {
        errors.push("Please provide a life event.".to_string());
    }
    // The generic messages mirror the form's field-label templating, so
    // this one really is "a insurer".
    if lead.insurer.is_empty() {
        errors.push("Please provide a insurer.".to_string());
    }
    if !has_renewal_input {
        errors.push("Renewal month is required.".to_string());
    }
    if lead.pain_point.is_empty() {
        errors.push("Please provide a pain point.".to_string());
    }

    (lead, errors)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/leads
///
/// Lead capture plus the full funnel simulation: compose outreach, draft the
/// follow-up, stage retention plays, and persist the Phase 1 trail.
pub async fn handle_create_lead(
    State(state): State<AppState>,
    Json(payload): Json<LeadSubmission>,
) -> Result<Json<CreateLeadResponse>, AppError> {
    let (lead, errors) = build_lead_from_submission(&payload);
    if !errors.is_empty() {
        return Err(AppError::ValidationErrors(errors));
    }

    let timeline = create_lead_blueprints(&lead);
    let sms_draft = compose_outreach_sms(&state.composer, &lead).await;
    let outreach = create_outreach_preview(&lead, Some(sms_draft));
    let initial_log = create_initial_log(&lead);
    let insights = create_lead_insights(&lead);

    let follow_up_email = generate_follow_up_email(&state.chat, &lead, &lead.pain_point).await;
    let follow_up_plan = build_follow_up_plan(&lead, &lead.pain_point);
    let retention = build_retention_plays(&lead, &lead.life_event);

    let lead_id = insert_lead(&state.db, &lead).await?;

    insert_interaction(
        &state.db,
        lead_id,
        Phase::Acquisition,
        Channel::System,
        "Lead captured and enriched via Clay + Apollo.",
        Some(json!({ "timeline": &timeline })),
    )
    .await?;

    insert_interaction(
        &state.db,
        lead_id,
        Phase::Acquisition,
        lead.preferred_channel.into(),
        "Personalized SMS dispatched via FastMCP.",
        Some(json!({ "sms": &outreach.sms, "reasoning": &outreach.reasoning })),
    )
    .await?;

    insert_task(
        &state.db,
        lead_id,
        Phase::Acquisition,
        TaskAction::Sms,
        "Monitor SMS thread for YES confirmation and auto-book Calendly.",
        None,
    )
    .await?;

    insert_retention_event(
        &state.db,
        lead_id,
        &lead.life_event,
        Utc::now(),
        &format!(
            "Life event engine detected {}. Ready for Phase 3 plays.",
            lead.life_event
        ),
    )
    .await?;

    info!("Funnel simulation completed for lead {lead_id}");

    Ok(Json(CreateLeadResponse {
        lead_id,
        timeline,
        outreach,
        initial_log,
        insights,
        persona_tone: lead.persona_tone.clone(),
        lead,
        follow_up_email,
        follow_up_plan,
        retention,
    }))
}

/// GET /api/v1/leads?limit=N&details=true
///
/// Most recent leads, optionally expanded with their recorded trail.
/// A missing or unparsable limit falls back to 10.
pub async fn handle_list_leads(
    State(state): State<AppState>,
    Query(params): Query<LeadsQuery>,
) -> Result<Json<Value>, AppError> {
    let limit = params
        .limit
        .as_deref()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(DEFAULT_LIST_LIMIT);
    let include_details = params.details.as_deref() == Some("true");

    let leads = fetch_recent_leads(&state.db, limit).await?;

    if !include_details {
        return Ok(Json(json!({ "leads": leads })));
    }

    let mut details = Vec::with_capacity(leads.len());
    for lead in leads {
        let lead_id = lead.id;
        let detail = match fetch_lead_detail(&state.db, lead_id).await? {
            Some(detail) => detail,
            // The lead vanished between the two queries; keep the row with
            // an empty trail, like the original listing did.
            None => LeadDetail {
                lead,
                interactions: vec![],
                tasks: vec![],
                retention_events: vec![],
            },
        };
        details.push(detail);
    }

    Ok(Json(json!({ "leads": details })))
}

/// GET /api/v1/leads/:id
pub async fn handle_get_lead(
    State(state): State<AppState>,
    Path(lead_id): Path<i64>,
) -> Result<Json<LeadDetail>, AppError> {
    let detail = fetch_lead_detail(&state.db, lead_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Lead not found.".to_string()))?;
    Ok(Json(detail))
}

/// POST /api/v1/leads/:id/confirm
///
/// Simulates the prospect's YES reply: qualifies the lead, books the
/// Calendly slot, and opens the meeting-prep task.
pub async fn handle_confirm(
    State(state): State<AppState>,
    Path(lead_id): Path<i64>,
) -> Result<Json<ConfirmResponse>, AppError> {
    let row = fetch_lead(&state.db, lead_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Lead not found.".to_string()))?;

    let profile = row.to_profile();
    let calendar_link = build_calendar_link(&profile);
    let meeting_title = format!("{} · Insurance review", profile.first_name());

    update_lead_status(&state.db, lead_id, LeadStatus::Qualified).await?;

    insert_interaction(
        &state.db,
        lead_id,
        Phase::Acquisition,
        Channel::Sms,
        "Prospect replied YES. Calendly invite generated automatically.",
        Some(json!({ "calendarLink": &calendar_link, "meetingTitle": &meeting_title })),
    )
    .await?;

    insert_task(
        &state.db,
        lead_id,
        Phase::Acquisition,
        TaskAction::Email,
        "Send meeting prep email with agenda + ROI recap.",
        None,
    )
    .await?;

    info!("Lead {lead_id} qualified via reply confirmation");

    Ok(Json(ConfirmResponse {
        calendar_link,
        meeting_title,
    }))
}

/// POST /api/v1/leads/:id/retention
///
/// Registers a detected life event and fires the retention plays.
pub async fn handle_retention(
    State(state): State<AppState>,
    Path(lead_id): Path<i64>,
    Json(request): Json<RetentionRequest>,
) -> Result<Json<RetentionResponse>, AppError> {
    let life_event = request
        .life_event
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation("lifeEvent is required.".to_string()))?
        .to_string();

    let row = fetch_lead(&state.db, lead_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Lead not found.".to_string()))?;

    let profile = row.to_profile();
    let plays = build_retention_plays(&profile, &life_event);

    let message = plays
        .first()
        .map(|p| p.action.clone())
        .unwrap_or_else(|| "Life event detected.".to_string());
    let channel = plays.first().map(|p| p.channel).unwrap_or(Channel::Sms);

    insert_retention_event(&state.db, lead_id, &life_event, Utc::now(), &message).await?;

    insert_interaction(
        &state.db,
        lead_id,
        Phase::Retention,
        channel,
        &format!("Life event detected: {life_event}. Triggering retention plays."),
        Some(json!({ "plays": &plays })),
    )
    .await?;

    info!("Retention plays fired for lead {lead_id} ({life_event})");

    Ok(Json(RetentionResponse { plays }))
}

/// GET /api/v1/funnel/catalog
///
/// The option lists behind the demo form, plus the seeded default prospect.
pub async fn handle_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        life_events: LIFE_EVENTS.to_vec(),
        insurers: INSURERS.to_vec(),
        pain_points: PAIN_POINTS.to_vec(),
        persona_tones: PERSONA_TONES.to_vec(),
        communication_channels: COMMUNICATION_CHANNELS.to_vec(),
        default_lead: default_lead(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn full_submission() -> LeadSubmission {
        serde_json::from_value(json!({
            "name": "Jordan Lee",
            "company": "Acme Corp",
            "source": "Referral",
            "preferredChannel": "Email",
            "personaTone": "Executive brief",
            "lifeEvent": "Job change",
            "insurer": "Geico",
            "renewalMonth": "2026-03",
            "painPoint": "Claims experience was slow"
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_submission_has_no_errors() {
        let (lead, errors) = build_lead_from_submission(&full_submission());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert_eq!(lead.name, "Jordan Lee");
        assert_eq!(lead.preferred_channel, PreferredChannel::Email);
        assert_eq!(lead.renewal_month, "2026-03");
    }

    #[test]
    fn test_empty_submission_collects_every_required_error() {
        let (_, errors) = build_lead_from_submission(&LeadSubmission::default());
        assert_eq!(
            errors,
            vec![
                "Please provide a name.",
                "Please provide a source.",
                "Preferred channel must be either SMS or Email.",
                "Please provide a persona tone.",
                "Please provide a life event.",
                "Please provide a insurer.",
                "Renewal month is required.",
                "Please provide a pain point.",
            ]
        );
    }

    #[test]
    fn test_company_is_optional_and_defaulted() {
        let mut submission = full_submission();
        submission.company = None;
        let (lead, errors) = build_lead_from_submission(&submission);
        assert!(errors.is_empty());
        assert_eq!(lead.company, "Solisa Prospects");
    }

    #[test]
    fn test_bad_channel_is_rejected_with_the_exact_message() {
        let mut submission = full_submission();
        submission.preferred_channel = Some("Carrier pigeon".to_string());
        let (lead, errors) = build_lead_from_submission(&submission);
        assert_eq!(errors, vec!["Preferred channel must be either SMS or Email."]);
        // The profile still carries a usable channel for error rendering.
        assert_eq!(lead.preferred_channel, PreferredChannel::Sms);
    }

    #[test]
    fn test_whitespace_only_fields_count_as_missing() {
        let mut submission = full_submission();
        submission.name = Some("   ".to_string());
        submission.renewal_month = Some(" ".to_string());
        let (_, errors) = build_lead_from_submission(&submission);
        assert!(errors.contains(&"Please provide a name.".to_string()));
        assert!(errors.contains(&"Renewal month is required.".to_string()));
    }

    #[test]
    fn test_renewal_month_is_sanitized_when_present() {
        let mut submission = full_submission();
        submission.renewal_month = Some("2026-4".to_string());
        let (lead, errors) = build_lead_from_submission(&submission);
        assert!(errors.is_empty());
        assert_eq!(lead.renewal_month, "2026-04");

        submission.renewal_month = Some("2026-19".to_string());
        let (lead, _) = build_lead_from_submission(&submission);
        assert_eq!(lead.renewal_month, "2025-02");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut submission = full_submission();
        submission.name = Some("  Jordan Lee  ".to_string());
        submission.insurer = Some(" Geico ".to_string());
        let (lead, errors) = build_lead_from_submission(&submission);
        assert!(errors.is_empty());
        assert_eq!(lead.name, "Jordan Lee");
        assert_eq!(lead.insurer, "Geico");
    }
}
