use corkboard_core::db::open_db;
use corkboard_core::{default_log_level, init_logging};
use corkboard_server::config::ServerConfig;
use corkboard_server::{app, AppState};
use log::info;

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env();

    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let conn = open_db(&config.db_path).expect("failed to open database");
    let state = AppState::new(conn);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listen address");
    info!("event=server_start module=server status=ok addr={addr}");

    axum::serve(listener, app(state))
        .await
        .expect("server error");
}
