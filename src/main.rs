use clap::Parser;
use contentgate::cli::{
    Args, build_config, handle_create_admin, init_logging, load_jwt_secret, open_database,
};
use contentgate::jwt::JwtConfig;
use contentgate::run_server;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging(&args.log_format);

    let Some(jwt_secret) = load_jwt_secret(args.jwt_secret_file.as_deref()) else {
        std::process::exit(1);
    };

    let Some(db) = open_database(&args.database).await else {
        std::process::exit(1);
    };

    if let Some(username) = args.create_admin.as_deref() {
        let jwt = JwtConfig::new(jwt_secret.as_bytes());
        let created = handle_create_admin(
            &db,
            &jwt,
            username,
            args.admin_email.as_deref(),
            args.admin_password.as_deref(),
            args.token_ttl,
            &args.cookie_name,
        )
        .await;
        if !created {
            std::process::exit(1);
        }
    }

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            error!(address = %addr, error = %e, "Failed to bind");
            std::process::exit(1);
        });

    match listener.local_addr() {
        Ok(local_addr) => info!(address = %local_addr, login_path = %args.login_path, "Listening"),
        Err(e) => error!(error = %e, "Failed to read local address"),
    }

    let config = build_config(&args, db, jwt_secret);

    if let Err(e) = run_server(config, listener).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
