use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Cancel `shutdown` on Ctrl-C, or return as soon as something else cancels it.
pub async fn detect_shutdown(shutdown: CancellationToken) {
    select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupt received, stopping services");
            shutdown.cancel();
        },
        _ = shutdown.cancelled() => {}
    };
}
