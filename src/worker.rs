// Background sampling worker.
// Each tick runs the collector, keeps the latest snapshot and broadcasts it to /ws/network.

use crate::collector::{Collector, CommandRunner};
use crate::models::NetworkSnapshot;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{RwLock, broadcast};
use tokio::time::{Duration, Instant, interval};

/// Rate limit for "no receivers" message (avoid logging every tick when no one is on /ws/network)
const NO_RECEIVERS_WARN_INTERVAL: Duration = Duration::from_secs(60);

/// Most recent snapshot, shared with the HTTP handlers.
pub type LatestSnapshot = Arc<RwLock<Option<NetworkSnapshot>>>;

/// Collector, channels, and shutdown for the worker.
pub struct WorkerDeps<R> {
    pub collector: Arc<Collector<R>>,
    pub tx: broadcast::Sender<NetworkSnapshot>,
    pub latest: LatestSnapshot,
    pub ws_network_connections: Arc<AtomicUsize>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

/// Worker timing and logging config.
pub struct WorkerConfig {
    pub sample_interval_ms: u64,
    /// How often to log app stats (real seconds).
    pub stats_log_interval_secs: u64,
}

/// Milliseconds since the Unix epoch, 0 if the clock is before it.
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, operation = "get_timestamp", "system time error");
            0
        })
}

pub fn spawn<R>(deps: WorkerDeps<R>, config: WorkerConfig) -> tokio::task::JoinHandle<()>
where
    R: CommandRunner + 'static,
{
    let WorkerDeps {
        collector,
        tx,
        latest,
        ws_network_connections,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        sample_interval_ms,
        stats_log_interval_secs,
    } = config;

    tokio::spawn(async move {
        let mut tick = interval(Duration::from_millis(sample_interval_ms));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut samples_taken: u64 = 0;
        let mut samples_failed: u64 = 0;
        let mut last_no_receivers_warn: Option<Instant> = None;

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let interfaces = match collector.io_counters().await {
                        Ok(records) => records,
                        Err(e) => {
                            samples_failed += 1;
                            tracing::warn!(
                                error = %e,
                                operation = "io_counters",
                                "interface counters failed"
                            );
                            continue;
                        }
                    };
                    samples_taken += 1;

                    let snapshot = NetworkSnapshot {
                        timestamp: now_millis(),
                        interfaces,
                    };
                    *latest.write().await = Some(snapshot.clone());

                    if tx.send(snapshot).is_err() {
                        let should_warn = last_no_receivers_warn
                            .is_none_or(|t| t.elapsed() >= NO_RECEIVERS_WARN_INTERVAL);
                        if should_warn {
                            tracing::debug!(
                                operation = "broadcast_snapshot",
                                "No active WebSocket clients; broadcast channel has no receivers"
                            );
                            last_no_receivers_warn = Some(Instant::now());
                        }
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Worker shutting down");
                    break;
                }
                _ = stats_log_tick.tick() => {
                    tracing::info!(
                        ws_network_clients = ws_network_connections.load(Ordering::Relaxed),
                        samples_taken,
                        samples_failed,
                        "app stats"
                    );
                }
            }
        }
    })
}
