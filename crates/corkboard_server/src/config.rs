//! Server configuration loaded from environment variables.
//!
//! All fields have defaults suitable for local development; override
//! via the environment in production.

/// | Env Var             | Default         |
/// |---------------------|-----------------|
/// | `HOST`              | `127.0.0.1`     |
/// | `PORT`              | `3000`          |
/// | `CORKBOARD_DB`      | `corkboard.db`  |
/// | `CORKBOARD_LOG_DIR` | (file logs off) |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");
        let db_path = std::env::var("CORKBOARD_DB").unwrap_or_else(|_| "corkboard.db".into());
        let log_dir = std::env::var("CORKBOARD_LOG_DIR").ok();

        Self {
            host,
            port,
            db_path,
            log_dir,
        }
    }
}
