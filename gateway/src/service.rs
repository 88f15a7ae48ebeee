//! Database access for the gateway.
//!
//! Each operation opens its own short-lived connection with the credential
//! tier the request was classified for, and closes it on every exit path.
//! No pool is kept: a request owns at most one connection for its lifetime.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgRow, PgSslMode};
use sqlx::{
    Column, ConnectOptions, Connection, PgConnection, Postgres, QueryBuilder, Row, TypeInfo,
};
use tokio::time::timeout;

use common::config::{Credentials, OperationKind};
use common::errors::{AppError, AppResult};
use common::models::{QueryOutcome, RowObject, SeedOutcome, SEED_ROWS};

/// Bound on each database round-trip (connect or statement).
const DB_TIMEOUT: Duration = Duration::from_secs(10);

const CREATE_PATIENT_TABLE: &str = "CREATE TABLE IF NOT EXISTS patient (
    id            BIGSERIAL    PRIMARY KEY,
    name          VARCHAR(120) NOT NULL,
    date_of_birth TIMESTAMP    NOT NULL
)";

/// Database operations exposed to the handlers.
#[async_trait]
pub trait DataAccess: Send + Sync {
    /// Ensures the patient table exists, then bulk-inserts the fixed seed
    /// rows in one statement. Returns the engine-reported row count.
    async fn seed_fixed_rows(&self) -> AppResult<SeedOutcome>;

    /// Executes an already-guarded statement verbatim.
    ///
    /// Precondition: the caller has confirmed the statement passed
    /// [`common::utils::SqlGuard::is_read_only`].
    async fn run_query(&self, sql: &str) -> AppResult<QueryOutcome>;
}

/// PostgreSQL-backed [`DataAccess`].
pub struct PgDataAccess {
    credentials: Credentials,
}

impl PgDataAccess {
    /// Creates a new data access layer over the given credential pair.
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    async fn connect(&self, kind: OperationKind) -> AppResult<PgConnection> {
        let profile = self.credentials.profile_for(kind);
        let options = PgConnectOptions::new()
            .host(&profile.host)
            .port(profile.port)
            .database(&profile.database)
            .username(&profile.username)
            .password(&profile.password)
            .ssl_mode(if profile.tls {
                PgSslMode::Require
            } else {
                PgSslMode::Disable
            });

        match timeout(DB_TIMEOUT, options.connect()).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => Err(AppError::DatabaseConnection(e.to_string())),
            Err(_) => Err(AppError::DatabaseConnection(
                "database connect timed out".into(),
            )),
        }
    }
}

#[async_trait]
impl DataAccess for PgDataAccess {
    async fn seed_fixed_rows(&self) -> AppResult<SeedOutcome> {
        let mut conn = self.connect(OperationKind::Seed).await?;
        let result = match timeout(DB_TIMEOUT, run_seed(&mut conn)).await {
            Ok(result) => result,
            Err(_) => Err(AppError::DatabaseQuery("seed operation timed out".into())),
        };
        close_quietly(conn).await;

        if let Ok(outcome) = &result {
            tracing::info!(affected = outcome.affected_count, "seed rows inserted");
        }
        result
    }

    async fn run_query(&self, sql: &str) -> AppResult<QueryOutcome> {
        let mut conn = self.connect(OperationKind::Query).await?;
        let result = match timeout(DB_TIMEOUT, run_select(&mut conn, sql)).await {
            Ok(result) => result,
            Err(_) => Err(AppError::DatabaseQuery("query timed out".into())),
        };
        close_quietly(conn).await;

        if let Ok(outcome) = &result {
            tracing::debug!(rows = outcome.rows.len(), "query executed");
        }
        result
    }
}

async fn run_seed(conn: &mut PgConnection) -> AppResult<SeedOutcome> {
    sqlx::query(CREATE_PATIENT_TABLE)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::DatabaseQuery(format!("failed to ensure patient table: {}", e)))?;

    let mut insert = QueryBuilder::<Postgres>::new("INSERT INTO patient (name, date_of_birth) ");
    insert.push_values(SEED_ROWS, |mut row, seed| {
        row.push_bind(seed.name).push_bind(seed.date_of_birth);
    });
    let result = insert
        .build()
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::DatabaseQuery(format!("failed to insert seed rows: {}", e)))?;

    Ok(SeedOutcome {
        affected_count: result.rows_affected(),
    })
}

async fn run_select(conn: &mut PgConnection, sql: &str) -> AppResult<QueryOutcome> {
    let rows = sqlx::query(sql)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::DatabaseQuery(e.to_string()))?;

    let rows = rows
        .iter()
        .map(row_to_object)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::DatabaseQuery(e.to_string()))?;

    Ok(QueryOutcome { rows })
}

/// Closes the connection, logging instead of surfacing a close failure so
/// the operation's own result wins.
async fn close_quietly(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "database connection did not close cleanly");
    }
}

fn row_to_object(row: &PgRow) -> Result<RowObject, sqlx::Error> {
    let mut object = RowObject::new();
    for column in row.columns() {
        let value = decode_column(row, column.ordinal(), column.type_info().name())?;
        object.insert(column.name().to_string(), value);
    }
    Ok(object)
}

/// Decodes one column into JSON, keeping native types where representable.
/// Types outside the mapped set are rendered as text when possible and null
/// otherwise.
fn decode_column(row: &PgRow, idx: usize, type_name: &str) -> Result<Value, sqlx::Error> {
    let value = match type_name {
        "BOOL" => row.try_get::<Option<bool>, _>(idx)?.map(Value::from),
        "INT2" => row.try_get::<Option<i16>, _>(idx)?.map(Value::from),
        "INT4" => row.try_get::<Option<i32>, _>(idx)?.map(Value::from),
        "INT8" => row.try_get::<Option<i64>, _>(idx)?.map(Value::from),
        "FLOAT4" => row.try_get::<Option<f32>, _>(idx)?.map(Value::from),
        "FLOAT8" => row.try_get::<Option<f64>, _>(idx)?.map(Value::from),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
            row.try_get::<Option<String>, _>(idx)?.map(Value::from)
        }
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(idx)?
            .map(|v| Value::from(v.to_string())),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(idx)?
            .map(|v| Value::from(v.to_rfc3339())),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(idx)?
            .map(|v| Value::from(v.to_string())),
        "UUID" => row
            .try_get::<Option<uuid::Uuid>, _>(idx)?
            .map(|v| Value::from(v.to_string())),
        "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(idx)?,
        _ => row
            .try_get::<Option<String>, _>(idx)
            .ok()
            .flatten()
            .map(Value::from),
    };
    Ok(value.unwrap_or(Value::Null))
}
