use crate::{models::SqlSessionUser, Db};
use anyhow::Context;
use chrono::Utc;
use domain::CurrentUser;
use tracing::warn;

impl Db {
    // 读取缓存的登录用户；缓存损坏时视为未登录
    pub async fn current_user(&self) -> anyhow::Result<Option<CurrentUser>> {
        let row = sqlx::query_as::<_, SqlSessionUser>(
            "SELECT user_id, payload FROM session_user WHERE slot = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let user_id = row.user_id.clone();
        match CurrentUser::try_from(row) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("Cached user {} is unreadable, ignoring: {}", user_id, e);
                Ok(None)
            }
        }
    }

    pub async fn save_user(&self, user: &CurrentUser) -> anyhow::Result<()> {
        let payload = serde_json::to_string(user).context("Failed to serialize user")?;
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO session_user (slot, user_id, payload, saved_at)
            VALUES (1, ?, ?, ?)
            ON CONFLICT(slot) DO UPDATE SET
                user_id = excluded.user_id,
                payload = excluded.payload,
                saved_at = excluded.saved_at
            "#,
        )
        .bind(user.id.as_str())
        .bind(payload)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn clear_user(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM session_user")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Db;
    use domain::{CurrentUser, UserId};

    async fn db() -> Db {
        Db::new("sqlite::memory:").await.unwrap()
    }

    fn alice() -> CurrentUser {
        let mut user = CurrentUser::new(UserId::new("5"));
        user.name = Some("alice".into());
        user.token = Some("t0k".into());
        user.birthday = Some("1990-02-03".into());
        user.extra
            .insert("role".into(), serde_json::Value::String("writer".into()));
        user
    }

    #[tokio::test]
    async fn test_empty_session() {
        let db = db().await;
        assert_eq!(db.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let db = db().await;
        db.save_user(&alice()).await.unwrap();
        assert_eq!(db.current_user().await.unwrap(), Some(alice()));
    }

    #[tokio::test]
    async fn test_save_replaces_previous_user() {
        let db = db().await;
        db.save_user(&alice()).await.unwrap();
        let bob = CurrentUser::new(UserId::new("6"));
        db.save_user(&bob).await.unwrap();
        assert_eq!(db.current_user().await.unwrap(), Some(bob));
    }

    #[tokio::test]
    async fn test_clear() {
        let db = db().await;
        db.save_user(&alice()).await.unwrap();
        db.clear_user().await.unwrap();
        assert_eq!(db.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_logged_out() {
        let db = db().await;
        sqlx::query(
            "INSERT INTO session_user (slot, user_id, payload, saved_at) VALUES (1, 'x', 'not json', '2024-01-01 00:00:00')",
        )
        .execute(&db.pool)
        .await
        .unwrap();
        assert_eq!(db.current_user().await.unwrap(), None);
    }
}
