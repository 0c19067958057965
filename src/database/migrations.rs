use super::Database;
use sqlx::Error as SqlxError;

impl Database {
    /// Run database migrations to create tables
    pub(super) async fn run_migrations(&self) -> Result<(), SqlxError> {
        self.create_birthday_tables().await?;
        Ok(())
    }

    async fn create_birthday_tables(&self) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_birthdays (
                user_id BIGINT PRIMARY KEY,
                birth_day INTEGER NOT NULL CHECK (birth_day BETWEEN 1 AND 31),
                birth_month INTEGER NOT NULL CHECK (birth_month BETWEEN 1 AND 12),
                created_at TIMESTAMP NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMP NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }
}
