use std::sync::Arc;

use european_living::config::{AppConfig, DayTripBackend};
use european_living::daytrips::{
    postgrest::PostgrestSource,
    seed::{load_seed_file, seed_catalog},
    sqlite::SqliteSource,
    DayTripSource,
};
use european_living::db::{init_pool, migrate};
use european_living::error::AppError;
use european_living::routes::create_router;
use european_living::services::{cms::SanityClient, content::ContentLoader};
use european_living::state::AppState;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;
    let source = init_source(&config).await?;

    if config.sanity.write_token.is_none() {
        warn!("SANITY_WRITE_TOKEN not set, document creation will be rejected by the CMS");
    }
    let cms = SanityClient::new(&config.sanity)?;

    let state = AppState::new(
        config.clone(),
        source,
        Arc::new(cms),
        ContentLoader::embedded(),
    );

    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

async fn init_source(config: &AppConfig) -> Result<Arc<dyn DayTripSource>, AppError> {
    match &config.backend {
        DayTripBackend::Supabase { url, anon_key } => {
            if config.seed_file.is_some() {
                warn!("SEED_FILE is ignored when reading from the hosted store");
            }
            info!("reading day trips from {url}");
            Ok(Arc::new(PostgrestSource::new(url, anon_key)?))
        }
        DayTripBackend::Sqlite { database_url } => {
            let db = init_pool(database_url).await?;
            migrate(&db).await?;

            if let Some(path) = &config.seed_file {
                let trips = load_seed_file(path).await?;
                seed_catalog(&db, &trips).await?;
            }

            info!("reading day trips from {database_url}");
            Ok(Arc::new(SqliteSource::new(db)))
        }
    }
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,european_living=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
