use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};

use crate::entities::categories;
use crate::error::AppError;

/// `SELECT id, name FROM categories ORDER BY name` — the one read the
/// category cache sits in front of.
pub async fn list_ordered(
    conn: &impl ConnectionTrait,
) -> Result<Vec<categories::Model>, AppError> {
    Ok(categories::Entity::find()
        .order_by_asc(categories::Column::Name)
        .all(conn)
        .await?)
}
