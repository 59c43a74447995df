//! Complaint data access.
//!
//! The complaints table carries a PostGIS geography column, so reads and the
//! insert go through raw parameterized statements instead of entity queries;
//! rows map back via `FromQueryResult`.

use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement, Value};
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::repos::complaint_filter::ComplaintFilter;

/// Status assigned to every newly filed complaint.
pub const STATUS_PENDING: &str = "pending";
/// Status a complaint moves to once an official records progress.
pub const STATUS_IN_PROGRESS: &str = "In_Progress";

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct ComplaintRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub category_id: i32,
    pub status: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub evidence: String,
    /// WKT rendering of the geography column
    pub location: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    pub is_public: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct ComplaintUpdateRow {
    pub id: i64,
    pub complaint_id: i64,
    pub user_id: i64,
    pub comment: String,
    pub created_at: OffsetDateTime,
}

/// A complaint as accepted from the intake form.
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub category_id: i32,
    pub evidence: String,
    pub longitude: f64,
    pub latitude: f64,
    pub is_public: bool,
}

const INSERT_RETURNING: &str = "INSERT INTO complaints (\
    user_id, title, description, category_id, evidence, location, is_public, status\
    ) VALUES (\
    $1, $2, $3, $4, $5, ST_MakePoint($6, $7)::geography, $8, $9\
    ) RETURNING \
    id, user_id, title, description, \
    COALESCE(category_id, 0) AS category_id, status, \
    created_at, updated_at, evidence, \
    ST_AsText(location) AS location, \
    COALESCE(ST_X(location::geometry), 0) AS longitude, \
    COALESCE(ST_Y(location::geometry), 0) AS latitude, \
    is_public";

pub async fn insert(
    conn: &impl ConnectionTrait,
    user_id: i64,
    complaint: &NewComplaint,
    status: &str,
) -> Result<ComplaintRow, AppError> {
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        INSERT_RETURNING,
        [
            Value::from(user_id),
            Value::from(complaint.title.clone()),
            Value::from(complaint.description.clone()),
            Value::from(complaint.category_id),
            Value::from(complaint.evidence.clone()),
            Value::from(complaint.longitude),
            Value::from(complaint.latitude),
            Value::from(complaint.is_public),
            Value::from(status.to_string()),
        ],
    );

    ComplaintRow::find_by_statement(stmt)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::db("Error creating complaint"))
}

/// Listing under the supplied filters, newest first.
pub async fn list_filtered(
    conn: &impl ConnectionTrait,
    filter: &ComplaintFilter,
) -> Result<Vec<ComplaintRow>, AppError> {
    let (sql, values) = filter.build_query();
    let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, values);
    Ok(ComplaintRow::find_by_statement(stmt).all(conn).await?)
}

/// Full listing, newest first.
pub async fn list_all(conn: &impl ConnectionTrait) -> Result<Vec<ComplaintRow>, AppError> {
    list_filtered(conn, &ComplaintFilter::default()).await
}

/// One user's complaints, newest first.
pub async fn list_for_user(
    conn: &impl ConnectionTrait,
    user_id: i64,
) -> Result<Vec<ComplaintRow>, AppError> {
    let filter = ComplaintFilter {
        user_id: Some(user_id),
        ..Default::default()
    };
    list_filtered(conn, &filter).await
}

pub async fn exists(conn: &impl ConnectionTrait, id: i64) -> Result<bool, AppError> {
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        "SELECT EXISTS(SELECT 1 FROM complaints WHERE id = $1) AS present",
        [Value::from(id)],
    );

    let row = conn.query_one(stmt).await?;
    match row {
        Some(row) => Ok(row.try_get::<bool>("", "present")?),
        None => Ok(false),
    }
}

pub async fn insert_update(
    conn: &impl ConnectionTrait,
    complaint_id: i64,
    user_id: i64,
    comment: &str,
) -> Result<ComplaintUpdateRow, AppError> {
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        "INSERT INTO complaint_updates (complaint_id, user_id, comment) \
         VALUES ($1, $2, $3) \
         RETURNING id, complaint_id, user_id, comment, created_at",
        [
            Value::from(complaint_id),
            Value::from(user_id),
            Value::from(comment.to_string()),
        ],
    );

    ComplaintUpdateRow::find_by_statement(stmt)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::db("Error recording complaint update"))
}

pub async fn set_status(
    conn: &impl ConnectionTrait,
    id: i64,
    status: &str,
) -> Result<(), AppError> {
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        "UPDATE complaints SET status = $1 WHERE id = $2",
        [Value::from(status.to_string()), Value::from(id)],
    );

    conn.execute(stmt).await?;
    Ok(())
}
