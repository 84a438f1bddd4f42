use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use jobboard_api::app::build_app;
use jobboard_api::app::services::AppServices;
use jobboard_auth::StaticTokenValidator;
use jobboard_comments::Profile;
use jobboard_core::UserId;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    jobboard_observability::init();

    let services = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = PgPoolOptions::new().max_connections(10).connect(&url).await?;
            tracing::info!("using postgres stores");
            Arc::new(AppServices::postgres(pool))
        }
        Err(_) => {
            // Dev mode: everything in memory, one seeded profile.
            let (services, profiles) = AppServices::in_memory();
            profiles.upsert(Profile {
                user_id: UserId::new(1),
                display_name: "dev".into(),
                avatar_url: None,
            });
            tracing::warn!("DATABASE_URL not set, using in-memory stores");
            Arc::new(services)
        }
    };

    let dev_token = std::env::var("DEV_TOKEN").unwrap_or_else(|_| "dev-token".into());
    let validator = Arc::new(StaticTokenValidator::new().with_token(dev_token, UserId::new(1)));

    let app = build_app(services, validator);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
