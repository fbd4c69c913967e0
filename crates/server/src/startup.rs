use std::{future::Future, net::SocketAddr, sync::Arc};

use migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::{info, warn};

use configs::AppConfig;
use service::ledger::SeaOrmLedger;

use crate::routes;
use crate::state::AppState;

/// Serve the ledger API on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = routes::build_router(state);
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Public entry: connect the store, build the app and run the HTTP server.
///
/// Failing to reach the store is fatal; the pool is closed once the
/// listener has drained.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.bootstrap_schema {
        migration::Migrator::up(&db, None).await?;
        info!("file_ledger schema ensured");
    }

    let state = AppState::new(Arc::new(SeaOrmLedger::new(db.clone())));

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "ledger listening");

    let served = serve(listener, state, shutdown_signal()).await;

    if let Err(e) = db.close().await {
        warn!(err = %e, "failed to close ledger store");
    } else {
        info!("ledger store closed");
    }
    served
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(err = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(err = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(event = "shutdown_signal", "shutting down");
}
