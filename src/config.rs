use std::{env, net::SocketAddr, path::PathBuf};

use url::Url;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub backend: DayTripBackend,
    pub seed_file: Option<PathBuf>,
    pub sanity: SanityConfig,
    pub static_dir: PathBuf,
}

/// Where day trips are read from.
#[derive(Debug, Clone)]
pub enum DayTripBackend {
    /// Hosted store reached over its REST surface.
    Supabase { url: Url, anon_key: String },
    /// Local SQLite mirror of the same relations.
    Sqlite { database_url: String },
}

#[derive(Debug, Clone)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub api_host: Url,
    pub write_token: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let listen_addr: SocketAddr = env::var("APP_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3001".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let backend = match non_empty("SUPABASE_URL") {
            Some(raw) => {
                let url = Url::parse(&raw)
                    .map_err(|err| AppError::Config(format!("invalid SUPABASE_URL: {err}")))?;
                let anon_key = non_empty("SUPABASE_ANON_KEY").ok_or_else(|| {
                    AppError::Config("SUPABASE_ANON_KEY is required with SUPABASE_URL".into())
                })?;
                DayTripBackend::Supabase { url, anon_key }
            }
            None => DayTripBackend::Sqlite {
                database_url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://day_trips.db".to_string()),
            },
        };

        let seed_file = non_empty("SEED_FILE").map(PathBuf::from);

        let project_id =
            env::var("SANITY_PROJECT_ID").unwrap_or_else(|_| "n0sgaoxc".to_string());
        let api_host = match non_empty("SANITY_API_HOST") {
            Some(raw) => raw,
            None => format!("https://{project_id}.api.sanity.io"),
        };
        let api_host = Url::parse(&api_host)
            .map_err(|err| AppError::Config(format!("invalid SANITY_API_HOST: {err}")))?;

        let sanity = SanityConfig {
            project_id,
            dataset: env::var("SANITY_DATASET").unwrap_or_else(|_| "production".to_string()),
            api_version: env::var("SANITY_API_VERSION")
                .unwrap_or_else(|_| "2025-01-01".to_string()),
            api_host,
            write_token: non_empty("SANITY_WRITE_TOKEN"),
        };

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("dist"));

        Ok(Self {
            listen_addr,
            backend,
            seed_file,
            sanity,
            static_dir,
        })
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
