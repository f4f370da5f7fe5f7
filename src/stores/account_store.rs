use crate::core::error::AccountError;
use crate::models::account::{AccountRecord, NewAccount};
use crate::utils::digest::digest_pin;
use crate::validation::pin::Pin;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::{debug, info};

// No UNIQUE constraint on username: uniqueness is a pre-check in `create`,
// which is only sound while a single user drives the store.
const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS accounts (
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        address_line1 TEXT NOT NULL,
        address_line2 TEXT,
        account_type TEXT NOT NULL,
        username TEXT NOT NULL,
        pin_digest TEXT NOT NULL,
        security_question TEXT NOT NULL,
        security_answer TEXT NOT NULL
    )
"#;

/// Account table in a local SQLite file
#[derive(Clone)]
pub struct AccountStore {
    pool: SqlitePool,
}

impl AccountStore {
    /// Open (or create) the database file and make sure the table exists
    pub async fn open(path: &Path) -> Result<Self, AccountError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(CREATE_TABLE).execute(&pool).await?;

        debug!(path = %path.display(), "Account table ready");

        Ok(Self { pool })
    }

    /// Insert a new account, rejecting a username that is already taken
    pub async fn create(&self, account: NewAccount) -> Result<(), AccountError> {
        if self.find_by_username(&account.username).await?.is_some() {
            debug!(username = %account.username, "Rejected duplicate username");
            return Err(AccountError::DuplicateUsername);
        }

        sqlx::query(
            r#"
            INSERT INTO accounts (first_name, last_name, address_line1, address_line2,
                                  account_type, username, pin_digest,
                                  security_question, security_answer)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.address_line1)
        .bind(&account.address_line2)
        .bind(account.account_type.as_str())
        .bind(&account.username)
        .bind(account.pin.digest())
        .bind(account.security_question.as_str())
        .bind(&account.security_answer)
        .execute(&self.pool)
        .await?;

        info!(
            username = %account.username,
            account_type = %account.account_type,
            "Account created"
        );

        Ok(())
    }

    /// Exact-match lookup; no case folding or trimming
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AccountRecord>, AccountError> {
        let record = sqlx::query_as::<_, AccountRecord>(
            r#"
            SELECT first_name, last_name, address_line1, address_line2, account_type,
                   username, pin_digest, security_question, security_answer
            FROM accounts
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Whether a record with this username and the digest of `pin` exists
    pub async fn verify_credentials(
        &self,
        username: &str,
        pin: &str,
    ) -> Result<bool, AccountError> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM accounts WHERE username = ? AND pin_digest = ?",
        )
        .bind(username)
        .bind(digest_pin(pin))
        .fetch_one(&self.pool)
        .await?;

        Ok(found > 0)
    }

    /// Overwrite the stored digest; an unknown username is `UsernameNotFound`
    pub async fn update_pin(&self, username: &str, new_pin: &Pin) -> Result<(), AccountError> {
        let result = sqlx::query("UPDATE accounts SET pin_digest = ? WHERE username = ?")
            .bind(new_pin.digest())
            .bind(username)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AccountError::UsernameNotFound);
        }

        info!(username = %username, "PIN updated");

        Ok(())
    }

    pub async fn get_security_question(
        &self,
        username: &str,
    ) -> Result<Option<String>, AccountError> {
        let question = sqlx::query_scalar::<_, String>(
            "SELECT security_question FROM accounts WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    pub async fn get_security_answer(
        &self,
        username: &str,
    ) -> Result<Option<String>, AccountError> {
        let answer = sqlx::query_scalar::<_, String>(
            "SELECT security_answer FROM accounts WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(answer)
    }

    pub async fn count(&self) -> Result<i64, AccountError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
