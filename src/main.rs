use std::{fs::create_dir, sync::Arc, time::Duration};

use ciseaux_admin::{
    backend::HttpBackend, session::SessionStore, token::TokenSigner, AppState, Config,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    _create_dir("config")?;
    let setting = Config::read()?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(setting.log_filter()));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let backend = HttpBackend::new(setting.backend_url(), setting.request_timeout())?;
    let signer = TokenSigner::new(setting.token_secret(), setting.session_ttl_secs())?;
    let sessions = SessionStore::new(signer);
    spawn_session_pruner(sessions.clone());

    let router = ciseaux_admin::app(AppState::new(Arc::new(backend), sessions));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", setting.port())).await?;
    tracing::info!(port = setting.port(), backend = setting.backend_url(), "admin dashboard listening");
    axum::serve(listener, router).await?;
    Ok(())
}

fn spawn_session_pruner(sessions: SessionStore) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(10 * 60));
        loop {
            ticker.tick().await;
            let dropped = sessions.prune(chrono::Utc::now().timestamp());
            if dropped > 0 {
                tracing::debug!(dropped, "expired sessions pruned");
            }
        }
    });
}

fn _create_dir(path: &str) -> std::io::Result<()> {
    match create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) => match e.kind() {
            std::io::ErrorKind::AlreadyExists => Ok(()),
            _ => Err(e),
        },
    }
}
