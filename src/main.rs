#![allow(clippy::module_name_repetitions)]
mod feed;
mod http_handler;
mod mission;
mod scheduling;
mod topology;
mod util;

use crate::http_handler::http_client::HTTPClient;
use crate::scheduling::MissionEngine;
use crate::topology::TopologyMap;
use crate::util::{DispatchConfig, FaultLog};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let cfg = DispatchConfig::from_env().unwrap_or_else(|e| fatal!("Invalid configuration: {e}"));
    if let Err(e) = FaultLog::init(&cfg.fault_log_path) {
        warn!("Cannot open fault log {}: {e}, reporting to console only", cfg.fault_log_path.display());
    }
    let client = HTTPClient::new(&cfg.fleet_base_url, cfg.http_timeout).unwrap_or_else(|e| fatal!("{e}"));
    let engine = MissionEngine::new(client, TopologyMap::site_default(), &cfg)
        .unwrap_or_else(|e| fatal!("Refusing to start without mission history: {e}"));
    let engine = Arc::new(engine);

    info!(
        "Dispatching from {} to {}, status log {}",
        cfg.feed_path.display(),
        cfg.fleet_base_url,
        cfg.status_path.display()
    );
    let token = CancellationToken::new();
    let handles = vec![
        tokio::spawn(Arc::clone(&engine).run_dispatch_loop(cfg.dispatch_interval, token.clone())),
        tokio::spawn(Arc::clone(&engine).run_tracking_loop(cfg.track_interval, token.clone())),
    ];

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested, finishing running ticks"),
        Err(e) => {
            error!("Cannot listen for shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
    }
    token.cancel();
    for res in futures::future::join_all(handles).await {
        if let Err(e) = res {
            error!("Loop terminated abnormally: {e}");
        }
    }
}
