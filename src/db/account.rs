use sqlx::sqlite::SqlitePool;

#[derive(Clone)]
pub struct AccountStore {
    pool: SqlitePool,
}

/// Account role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Account record as seen by the authentication flow.
/// The password hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: String,
    username: String,
    email: String,
    role: String,
    active: i32,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            role: Role::from_str(&row.role),
            active: row.active != 0,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LoginRow {
    id: String,
    username: String,
    email: String,
    role: String,
    active: i32,
    password_hash: String,
}

/// Account summary for the admin API.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AccountSummary {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
    pub created_at: String,
}

#[derive(sqlx::FromRow)]
struct AccountSummaryRow {
    id: String,
    username: String,
    email: String,
    role: String,
    active: i32,
    created_at: String,
}

impl From<AccountSummaryRow> for AccountSummary {
    fn from(row: AccountSummaryRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            role: Role::from_str(&row.role),
            active: row.active != 0,
            created_at: row.created_at,
        }
    }
}

impl AccountStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new active account. Returns the generated account id.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<String, sqlx::Error> {
        let id = uuid::Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO accounts (id, username, email, password_hash, role, active) VALUES (?, ?, ?, ?, ?, 1)",
        )
        .bind(&id)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role.as_str())
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    /// Get an account by id.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Account>, sqlx::Error> {
        let row: Option<AccountRow> = sqlx::query_as(
            "SELECT id, username, email, role, active FROM accounts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Account::from))
    }

    /// Get an account by username (case-insensitive).
    pub async fn get_by_username(&self, username: &str) -> Result<Option<Account>, sqlx::Error> {
        let row: Option<AccountRow> = sqlx::query_as(
            "SELECT id, username, email, role, active FROM accounts WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Account::from))
    }

    /// Get an account together with its password hash, for checking a login.
    pub async fn get_login(&self, username: &str) -> Result<Option<(Account, String)>, sqlx::Error> {
        let row: Option<LoginRow> = sqlx::query_as(
            "SELECT id, username, email, role, active, password_hash FROM accounts WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|row| {
            let account = Account {
                id: row.id,
                username: row.username,
                email: row.email,
                role: Role::from_str(&row.role),
                active: row.active != 0,
            };
            (account, row.password_hash)
        }))
    }

    /// Replace an account's password hash. Returns false if the id is unknown.
    pub async fn set_password_hash(&self, id: &str, password_hash: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE accounts SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Activate or deactivate an account. Returns false if the id is unknown.
    pub async fn set_active(&self, id: &str, active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE accounts SET active = ? WHERE id = ?")
            .bind(active as i32)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List all accounts, oldest first.
    pub async fn list(&self) -> Result<Vec<AccountSummary>, sqlx::Error> {
        let rows: Vec<AccountSummaryRow> = sqlx::query_as(
            "SELECT id, username, email, role, active, created_at FROM accounts ORDER BY created_at, username",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(AccountSummary::from).collect())
    }
}
