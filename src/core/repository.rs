use sqlx::{postgres::PgRow, FromRow, PgPool};

/// Generic list / get-by-id / delete-by-id statements for a registered table.
///
/// Each resource registers its table name and select column list instead of
/// re-implementing the read and delete pattern. Insert and update bind a
/// different parameter list per schema and stay in the resource services.
pub struct CrudRepository<T> {
    pool: PgPool,
    table: &'static str,
    columns: &'static str,
    _marker: std::marker::PhantomData<T>,
}

impl<T> CrudRepository<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(pool: PgPool, table: &'static str, columns: &'static str) -> Self {
        Self {
            pool,
            table,
            columns,
            _marker: std::marker::PhantomData,
        }
    }

    fn select_statement(&self) -> String {
        format!("SELECT {} FROM {}", self.columns, self.table)
    }

    pub async fn list(&self) -> Result<Vec<T>, sqlx::Error> {
        let statement = format!("{} ORDER BY id", self.select_statement());
        sqlx::query_as::<_, T>(&statement)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<T>, sqlx::Error> {
        let statement = format!("{} WHERE id = $1", self.select_statement());
        sqlx::query_as::<_, T>(&statement)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Deleting an id that matches no row is not an error; the affected row
    /// count is returned for callers that care.
    pub async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
        let statement = format!("DELETE FROM {} WHERE id = $1", self.table);
        let result = sqlx::query(&statement).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    #[derive(Debug, FromRow)]
    struct Row {
        #[allow(dead_code)]
        id: i32,
    }

    fn lazy_pool() -> PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost/storefront")
            .unwrap()
    }

    #[tokio::test]
    async fn select_statement_projects_registered_columns() {
        let repo: CrudRepository<Row> =
            CrudRepository::new(lazy_pool(), "categories", "id, category_name, description");
        assert_eq!(
            repo.select_statement(),
            "SELECT id, category_name, description FROM categories"
        );
    }
}
