// Course catalog: administration routes, snapshot reads and the default seed.

pub mod handlers;
pub mod seed;

use sqlx::{Executor, Sqlite};

use crate::models::course::CourseRow;

/// Catalog snapshot ordered by id. Area mapping positions index into this order.
///
/// Takes any executor so submissions can read the catalog inside their own transaction.
pub async fn fetch_catalog<'e, E>(executor: E) -> Result<Vec<CourseRow>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, CourseRow>("SELECT * FROM courses ORDER BY id ASC")
        .fetch_all(executor)
        .await
}
