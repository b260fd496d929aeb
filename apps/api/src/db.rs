use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Idempotent schema bootstrap. The demo carries no migration tooling; the
/// four funnel tables are created on startup if they do not already exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS leads (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            company TEXT NOT NULL,
            source TEXT NOT NULL,
            persona_tone TEXT NOT NULL,
            life_event TEXT NOT NULL,
            insurer TEXT NOT NULL,
            renewal_month TEXT NOT NULL,
            pain_point TEXT NOT NULL,
            preferred_channel TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'new',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS interactions (
            id BIGSERIAL PRIMARY KEY,
            lead_id BIGINT REFERENCES leads(id) ON DELETE CASCADE,
            phase TEXT NOT NULL,
            channel TEXT NOT NULL,
            summary TEXT NOT NULL,
            payload JSONB,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id BIGSERIAL PRIMARY KEY,
            lead_id BIGINT REFERENCES leads(id) ON DELETE CASCADE,
            phase TEXT NOT NULL,
            action_type TEXT NOT NULL,
            due_at TIMESTAMPTZ,
            status TEXT NOT NULL DEFAULT 'pending',
            summary TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS retention_events (
            id BIGSERIAL PRIMARY KEY,
            lead_id BIGINT REFERENCES leads(id) ON DELETE CASCADE,
            event_type TEXT NOT NULL,
            detected_at TIMESTAMPTZ NOT NULL,
            message TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Funnel schema ensured (leads, interactions, tasks, retention_events)");
    Ok(())
}
