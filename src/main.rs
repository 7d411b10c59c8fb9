/// Task Service - Main entry point
use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use task_service::{
    config::Config,
    db::{AccountStore, PgAccountStore, PgTaskStore, TaskStore},
    models::Account,
    routes,
    security::{password, Scope, TokenCodec},
    services::AuthService,
    AppState,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        "Starting task service on {}:{}",
        config.server_host,
        config.server_port
    );

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database connection pool initialized");

    let accounts: Arc<dyn AccountStore> = Arc::new(PgAccountStore::new(pool.clone()));
    let tasks: Arc<dyn TaskStore> = Arc::new(PgTaskStore::new(pool));

    let codec = TokenCodec::new(&config.jwt_secret, Some(config.token_ttl_secs))?;
    let auth = Arc::new(AuthService::new(accounts.clone(), codec));

    seed_admin(&config, accounts.as_ref()).await?;

    let state = AppState::new(accounts, tasks, auth);
    let origins = config.allowed_origins();
    let bind_addr = (config.server_host.clone(), config.server_port);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "PUT", "POST", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(3600);
        for origin in &origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}

/// Create the bootstrap admin account when ADMIN_USERNAME/ADMIN_PASSWORD
/// are configured and the account does not exist yet.
async fn seed_admin(config: &Config, accounts: &dyn AccountStore) -> anyhow::Result<()> {
    let (Some(username), Some(admin_password)) = (&config.admin_username, &config.admin_password)
    else {
        return Ok(());
    };

    if accounts.get_by_username(username).await?.is_some() {
        return Ok(());
    }

    let account = Account {
        id: Uuid::new_v4(),
        username: username.clone(),
        email: config
            .admin_email
            .clone()
            .unwrap_or_else(|| format!("{}@localhost", username)),
        active: true,
        scopes: Scope::ALL.to_vec(),
        created_by: "bootstrap".to_string(),
        password_hash: password::hash_password(admin_password)?,
        created_at: Utc::now(),
    };
    accounts.create(&account).await?;

    tracing::info!(%username, "bootstrap admin account created");
    Ok(())
}
