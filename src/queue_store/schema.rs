//! PostgreSQL schema for the persistent queue

use sqlx::PgPool;

/// Queued players. `name` is the identity key while queued.
pub const CREATE_PLAYERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS players (
    name        TEXT PRIMARY KEY,
    skill       DOUBLE PRECISION NOT NULL,
    latency     DOUBLE PRECISION NOT NULL,
    queue_time  TIMESTAMPTZ NOT NULL
)
"#;

/// Formation reads the whole table ordered by arrival
pub const CREATE_QUEUE_TIME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS players_queue_time_idx ON players (queue_time)";

/// Create the queue table if it does not exist yet
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Initializing matchmaker schema...");

    sqlx::query(CREATE_PLAYERS_TABLE).execute(pool).await?;
    sqlx::query(CREATE_QUEUE_TIME_INDEX).execute(pool).await?;

    tracing::info!("Matchmaker schema ready");
    Ok(())
}
