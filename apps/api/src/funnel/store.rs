//! Row-level operations on the four funnel tables. Interactions and
//! retention events are append-only; leads are mutated only by the status
//! update; tasks are opened and never completed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;

use crate::engine::profile::LeadProfile;
use crate::models::activity::{Channel, InteractionRow, Phase, RetentionEventRow, TaskAction, TaskRow};
use crate::models::lead::{LeadRow, LeadStatus};

/// A lead with its full recorded trail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDetail {
    pub lead: LeadRow,
    pub interactions: Vec<InteractionRow>,
    pub tasks: Vec<TaskRow>,
    pub retention_events: Vec<RetentionEventRow>,
}

/// Inserts a captured lead and returns its id. Ids are BIGSERIAL, so later
/// submissions always receive larger ids.
pub async fn insert_lead(pool: &PgPool, lead: &LeadProfile) -> sqlx::Result<i64> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO leads
            (name, company, source, persona_tone, life_event, insurer,
             renewal_month, pain_point, preferred_channel)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(&lead.name)
    .bind(&lead.company)
    .bind(&lead.source)
    .bind(&lead.persona_tone)
    .bind(&lead.life_event)
    .bind(&lead.insurer)
    .bind(&lead.renewal_month)
    .bind(&lead.pain_point)
    .bind(lead.preferred_channel.as_str())
    .fetch_one(pool)
    .await?;

    info!("Recorded lead {id} ({})", lead.name);
    Ok(id)
}

pub async fn update_lead_status(
    pool: &PgPool,
    lead_id: i64,
    status: LeadStatus,
) -> sqlx::Result<()> {
    sqlx::query("UPDATE leads SET status = $1, updated_at = NOW() WHERE id = $2")
        .bind(status.as_str())
        .bind(lead_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn insert_interaction(
    pool: &PgPool,
    lead_id: i64,
    phase: Phase,
    channel: Channel,
    summary: &str,
    payload: Option<Value>,
) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO interactions (lead_id, phase, channel, summary, payload)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(lead_id)
    .bind(phase.as_str())
    .bind(channel.as_str())
    .bind(summary)
    .bind(payload)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn insert_task(
    pool: &PgPool,
    lead_id: i64,
    phase: Phase,
    action: TaskAction,
    summary: &str,
    due_at: Option<DateTime<Utc>>,
) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO tasks (lead_id, phase, action_type, summary, due_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(lead_id)
    .bind(phase.as_str())
    .bind(action.as_str())
    .bind(summary)
    .bind(due_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn insert_retention_event(
    pool: &PgPool,
    lead_id: i64,
    event_type: &str,
    detected_at: DateTime<Utc>,
    message: &str,
) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO retention_events (lead_id, event_type, detected_at, message)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(lead_id)
    .bind(event_type)
    .bind(detected_at)
    .bind(message)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn fetch_lead(pool: &PgPool, lead_id: i64) -> sqlx::Result<Option<LeadRow>> {
    sqlx::query_as::<_, LeadRow>("SELECT * FROM leads WHERE id = $1")
        .bind(lead_id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_recent_leads(pool: &PgPool, limit: i64) -> sqlx::Result<Vec<LeadRow>> {
    sqlx::query_as::<_, LeadRow>("SELECT * FROM leads ORDER BY created_at DESC LIMIT $1")
        .bind(limit)
        .fetch_all(pool)
        .await
}

/// Loads a lead with its interaction/task/retention trail. The three child
/// queries fan out concurrently once the lead row is confirmed.
pub async fn fetch_lead_detail(pool: &PgPool, lead_id: i64) -> sqlx::Result<Option<LeadDetail>> {
    let Some(lead) = fetch_lead(pool, lead_id).await? else {
        return Ok(None);
    };

    let interactions = sqlx::query_as::<_, InteractionRow>(
        "SELECT * FROM interactions WHERE lead_id = $1 ORDER BY created_at ASC",
    )
    .bind(lead_id)
    .fetch_all(pool);

    let tasks = sqlx::query_as::<_, TaskRow>(
        "SELECT * FROM tasks WHERE lead_id = $1 ORDER BY created_at ASC",
    )
    .bind(lead_id)
    .fetch_all(pool);

    let retention_events = sqlx::query_as::<_, RetentionEventRow>(
        "SELECT * FROM retention_events WHERE lead_id = $1 ORDER BY detected_at DESC",
    )
    .bind(lead_id)
    .fetch_all(pool);

    let (interactions, tasks, retention_events) =
        tokio::try_join!(interactions, tasks, retention_events)?;

    Ok(Some(LeadDetail {
        lead,
        interactions,
        tasks,
        retention_events,
    }))
}
