use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Sqlite, SqlitePool, migrate::MigrateDatabase};
use tracing::{info, warn};

use crate::models::{ProfileRecord, SubmitOutcome};
use crate::traits::ContactSink;

/// SQLite-backed contact store standing in for the CRM
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(db_url: &str) -> Result<Self> {
        // Create database file if it doesn't exist
        if !db_url.contains(":memory:") && !Sqlite::database_exists(db_url).await.unwrap_or(false) {
            info!("Creating database file");
            Sqlite::create_database(db_url).await?;
        }

        // In-memory databases are per connection
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(db_url)
            .await?;

        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;

        info!("Database initialized successfully");
        Ok(Self { pool })
    }

    /// Whether a contact with the same id, profile URL, e-mail or name already exists
    pub async fn is_duplicate(&self, profile: &ProfileRecord) -> Result<bool> {
        let row = sqlx::query(
            r"
            SELECT 1 FROM contacts
            WHERE id = ?
               OR (profile_url IS NOT NULL AND profile_url = ?)
               OR (email IS NOT NULL AND lower(email) = lower(?))
               OR (lower(first_name) = lower(?) AND lower(last_name) = lower(?))
            LIMIT 1
            ",
        )
        .bind(contact_id(profile))
        .bind(&profile.contact.profile_url)
        .bind(&profile.contact.email)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    pub async fn save_contact(&self, search_name: &str, profile: &ProfileRecord) -> Result<()> {
        let id = contact_id(profile);
        let profile_json = serde_json::to_string(profile)?;

        sqlx::query(
            r"
            INSERT INTO contacts (id, search_name, first_name, last_name, email, profile_url,
                                  city, state, country, profile_json, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&id)
        .bind(search_name)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.contact.email)
        .bind(&profile.contact.profile_url)
        .bind(&profile.location.city)
        .bind(&profile.location.state)
        .bind(&profile.location.country)
        .bind(&profile_json)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[cfg(test)]
    async fn count_contacts(&self) -> Result<i64> {
        use sqlx::Row;
        let row = sqlx::query("SELECT COUNT(*) AS n FROM contacts")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<i64, _>("n"))
    }
}

/// Stable id from the profile URL, falling back to the name
fn contact_id(profile: &ProfileRecord) -> String {
    let key = profile
        .contact
        .profile_url
        .clone()
        .unwrap_or_else(|| profile.full_name());
    format!("{:x}", md5::compute(key))
}

#[async_trait]
impl ContactSink for Database {
    async fn submit(&self, search_name: &str, profile: &ProfileRecord) -> Result<SubmitOutcome> {
        if self.is_duplicate(profile).await? {
            warn!("Potential duplicate, not added: {}", profile.full_name());
            return Ok(SubmitOutcome::Duplicate);
        }

        self.save_contact(search_name, profile).await?;
        info!("Added {} to {}", profile.full_name(), search_name);
        Ok(SubmitOutcome::Accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Contact, Location};

    fn profile(first: &str, last: &str, email: Option<&str>, url: Option<&str>) -> ProfileRecord {
        ProfileRecord {
            first_name: first.into(),
            last_name: last.into(),
            location: Location::default(),
            contact: Contact {
                email: email.map(String::from),
                profile_url: url.map(String::from),
            },
            experience: Vec::new(),
            education: Vec::new(),
        }
    }

    #[tokio::test]
    async fn new_contact_is_accepted() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let outcome = db
            .submit("Q3 CFO search", &profile("Jane", "Smith", Some("jane@x.com"), None))
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert_eq!(db.count_contacts().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn same_name_is_flagged() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.submit("s", &profile("Jane", "Smith", None, Some("https://linkedin.com/in/a")))
            .await
            .unwrap();

        let outcome = db
            .submit("s", &profile("jane", "SMITH", None, Some("https://linkedin.com/in/b")))
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Duplicate);
        assert_eq!(db.count_contacts().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn same_email_is_flagged() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.submit("s", &profile("Jane", "Smith", Some("js@x.com"), None))
            .await
            .unwrap();

        let outcome = db
            .submit("s", &profile("Janet", "Smithers", Some("js@x.com"), None))
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Duplicate);
    }

    #[tokio::test]
    async fn same_profile_url_is_flagged() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let url = Some("https://www.linkedin.com/in/js");
        db.submit("s", &profile("Jane", "Smith", None, url)).await.unwrap();

        let outcome = db
            .submit("s", &profile("Jane", "Smith-Jones", None, url))
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Duplicate);
        assert_eq!(db.count_contacts().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn email_match_ignores_case() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.submit("s", &profile("Jane", "Smith", Some("Jane.Smith@X.com"), None))
            .await
            .unwrap();

        let outcome = db
            .submit("s", &profile("J.", "Smith", Some("jane.smith@x.com"), None))
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Duplicate);
    }

    #[tokio::test]
    async fn missing_emails_do_not_collide() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.submit("s", &profile("Jane", "Smith", None, None)).await.unwrap();
        let outcome = db.submit("s", &profile("Bob", "Jones", None, None)).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert_eq!(db.count_contacts().await.unwrap(), 2);
    }
}
