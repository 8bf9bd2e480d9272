//! CLI argument parsing, validation, and startup helpers.

use crate::ServerConfig;
use crate::auth::hash_password;
use crate::db::{Database, Role};
use crate::jwt::{DEFAULT_TOKEN_DURATION_SECS, JwtConfig};
use clap::Parser;
use tracing::{error, info};

const MIN_JWT_SECRET_LENGTH: usize = 32;
const MIN_ADMIN_PASSWORD_LENGTH: usize = 8;

/// Longest accepted session lifetime: one year.
const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Password hash stored for admins created without a password. Matches no password.
const LOCKED_PASSWORD_HASH: &str = "!";

#[derive(clap::ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "contentgate", about = "Admin authentication gate for the content site")]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "8000")]
    pub port: u16,

    /// Path to SQLite database file
    #[arg(short, long, default_value = "contentgate.db")]
    pub database: String,

    /// Path to file containing JWT secret. Prefer using JWT_SECRET env var instead
    #[arg(long)]
    pub jwt_secret_file: Option<String>,

    /// Name of the cookie carrying the session token
    #[arg(long, default_value = crate::auth::DEFAULT_COOKIE_NAME)]
    pub cookie_name: String,

    /// Where unauthenticated page requests are redirected
    #[arg(long, default_value = crate::DEFAULT_LOGIN_PATH, value_parser = validate_login_path)]
    pub login_path: String,

    /// Set the Secure flag on cookies (use behind HTTPS)
    #[arg(long)]
    pub secure_cookies: bool,

    /// Lifetime in seconds of issued session tokens
    #[arg(
        long,
        default_value_t = DEFAULT_TOKEN_DURATION_SECS,
        value_parser = clap::value_parser!(u64).range(1..=MAX_TOKEN_TTL_SECS)
    )]
    pub token_ttl: u64,

    /// Create an active admin account with this username and print a session token
    #[arg(long)]
    pub create_admin: Option<String>,

    /// Email for the account created by --create-admin
    #[arg(long, requires = "create_admin")]
    pub admin_email: Option<String>,

    /// Password for the account created by --create-admin. Without it the account
    /// can only use the printed token
    #[arg(
        long,
        env = "ADMIN_PASSWORD",
        hide_env_values = true,
        requires = "create_admin",
        value_parser = validate_admin_password
    )]
    pub admin_password: Option<String>,

    /// Log output format
    #[arg(short, long, default_value = "pretty")]
    pub log_format: LogFormat,
}

fn validate_login_path(s: &str) -> Result<String, String> {
    if !s.starts_with('/') {
        return Err(format!("Login path must start with '/': {}", s));
    }

    if s.starts_with("/api/") || s == "/api" {
        return Err(format!("Login path must not be an API path: {}", s));
    }

    if s.chars().any(|c| !c.is_ascii() || c.is_whitespace()) {
        return Err(format!("Login path contains invalid characters: {}", s));
    }

    Ok(s.to_string())
}

fn validate_admin_password(s: &str) -> Result<String, String> {
    if s.chars().count() < MIN_ADMIN_PASSWORD_LENGTH {
        return Err(format!(
            "Admin password must be at least {} characters",
            MIN_ADMIN_PASSWORD_LENGTH
        ));
    }
    Ok(s.to_string())
}

/// Initialize logging based on the specified format.
pub fn init_logging(format: &LogFormat) {
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt::init(),
        LogFormat::Json => tracing_subscriber::fmt().json().init(),
        LogFormat::Compact => tracing_subscriber::fmt().compact().init(),
    }
}

/// Load JWT secret from environment variable or file.
/// Returns None and logs an error if the secret cannot be loaded.
pub fn load_jwt_secret(jwt_secret_file: Option<&str>) -> Option<String> {
    let secret = if let Ok(secret) = std::env::var("JWT_SECRET") {
        // Clear the environment variable to prevent leaking
        // SAFETY: We're single-threaded at this point during startup,
        // and no other code is reading this environment variable.
        unsafe { std::env::remove_var("JWT_SECRET") };
        secret
    } else if let Some(path) = jwt_secret_file {
        match std::fs::read_to_string(path) {
            Ok(content) => content.trim().to_string(),
            Err(e) => {
                error!(path = %path, error = %e, "Failed to read JWT secret file");
                return None;
            }
        }
    } else {
        error!(
            "JWT secret is required. Set JWT_SECRET environment variable (recommended) or use --jwt-secret-file"
        );
        return None;
    };

    if secret.len() < MIN_JWT_SECRET_LENGTH {
        error!(
            "JWT secret is shorter than {} characters. Use a longer secret",
            MIN_JWT_SECRET_LENGTH
        );
        return None;
    }

    Some(secret)
}

/// Handle the --create-admin flag: create the admin (or reuse an existing one),
/// set its password if one was given, and print a session token for it.
/// Returns false and logs an error if no token could be issued.
pub async fn handle_create_admin(
    db: &Database,
    jwt: &JwtConfig,
    username: &str,
    email: Option<&str>,
    password: Option<&str>,
    ttl: u64,
    cookie_name: &str,
) -> bool {
    let password_hash = match password {
        Some(password) => match hash_password(password).await {
            Ok(hash) => Some(hash),
            Err(e) => {
                error!(error = %e, "Failed to hash admin password");
                return false;
            }
        },
        None => None,
    };

    let account_id = match db.accounts().get_by_username(username).await {
        Ok(Some(existing)) if existing.role.is_admin() => {
            info!(username = %existing.username, "Admin account already exists");
            if let Some(hash) = &password_hash {
                if let Err(e) = db.accounts().set_password_hash(&existing.id, hash).await {
                    error!(error = %e, "Failed to update admin password");
                    return false;
                }
                info!(username = %existing.username, "Admin password updated");
            }
            existing.id
        }
        Ok(Some(_)) => {
            error!(username = %username, "Account exists but is not an admin");
            return false;
        }
        Ok(None) => {
            let email = email
                .map(str::to_string)
                .unwrap_or_else(|| format!("{}@localhost", username));
            let hash = password_hash.as_deref().unwrap_or(LOCKED_PASSWORD_HASH);
            match db.accounts().create(username, &email, hash, Role::Admin).await {
                Ok(id) => {
                    info!(username = %username, account_id = %id, "Admin account created");
                    id
                }
                Err(e) => {
                    error!(error = %e, "Failed to create admin account");
                    return false;
                }
            }
        }
        Err(e) => {
            error!(error = %e, "Failed to check for existing admin");
            return false;
        }
    };

    match jwt.generate_token(&account_id, ttl) {
        Ok(result) => {
            println!();
            println!("Admin: {}", username);
            println!("Bearer token: {}", result.token);
            println!("Cookie: {}={}", cookie_name, result.token);
            println!();
            true
        }
        Err(e) => {
            error!(error = %e, "Failed to issue admin token");
            false
        }
    }
}

/// Build ServerConfig from validated arguments.
pub fn build_config(args: &Args, db: Database, jwt_secret: String) -> ServerConfig {
    ServerConfig {
        db,
        jwt_secret: jwt_secret.into_bytes(),
        cookie_name: args.cookie_name.clone(),
        login_path: args.login_path.clone(),
        secure_cookies: args.secure_cookies,
        token_ttl: args.token_ttl,
    }
}

/// Open the database, logging errors if it fails.
pub async fn open_database(path: &str) -> Option<Database> {
    match Database::open(path).await {
        Ok(db) => {
            info!(path = %path, "Database opened");
            Some(db)
        }
        Err(e) => {
            error!(path = %path, error = %e, "Failed to open database");
            None
        }
    }
}
