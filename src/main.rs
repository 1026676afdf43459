use anyhow::Result;
use clap::Parser;
use freshbay::{
    auth::supabase::SupabaseAuth,
    config::Config,
    db,
    geo::GeolocationOptions,
    handlers::{self, AppState},
    signup::FormRegistry,
};
use std::sync::Arc;
use time::Duration;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::{Expiry, SessionManagerLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "freshbay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Parse configuration from CLI args and environment variables
    let config = Config::parse();

    tokio::fs::create_dir_all(&config.data_dir).await?;
    tracing::info!("📁 Data directory: {}", config.data_dir.display());

    // Session database (accounts themselves live with the auth provider)
    let database_url = config.get_session_database_url();
    let db = db::Database::new(&database_url).await?;
    let session_store = db.session_store().await?;
    tracing::info!("💾 Session store initialized: {}", database_url);

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.secure_cookies)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    let auth = SupabaseAuth::new(&config.supabase_url, config.supabase_anon_key.clone())?;
    tracing::info!("🔐 Auth provider: {}", config.supabase_url);

    let app_state = Arc::new(AppState {
        auth: Arc::new(auth),
        forms: FormRegistry::new(config.form_ttl()).with_max_forms(config.max_forms),
        geolocation: GeolocationOptions {
            high_accuracy: true,
            decision_timeout: config.geo_timeout(),
        },
    });

    // Build router
    let app = handlers::router(app_state)
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 FreshBay server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
