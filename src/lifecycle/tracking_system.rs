use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::clients::PurchaseOrderClient;
use crate::model::PurchaseOrder;
use crate::sweep::Sweeper;
use crate::tracking::TrackingFetcher;

/// Owns the running actor and the clients wired to it.
///
/// ```ignore
/// let mut system = TrackingSystem::new(Arc::new(fetcher));
/// system.seed(orders).await?;
/// system.spawn_schedule(Duration::from_secs(3600));
/// let summary = system.sweeper.run().await?;
/// system.shutdown().await?;
/// ```
pub struct TrackingSystem {
    pub order_client: PurchaseOrderClient,
    pub sweeper: Sweeper,
    actor_handle: JoinHandle<()>,
    schedule_handle: Option<JoinHandle<()>>,
}

impl TrackingSystem {
    /// Spawns the purchase-order actor and wires the sweeper to `fetcher`.
    pub fn new(fetcher: Arc<dyn TrackingFetcher>) -> Self {
        let (order_actor, order_client) = crate::purchase_order_actor::new();
        let actor_handle = tokio::spawn(order_actor.run(()));
        let sweeper = Sweeper::new(order_client.clone(), fetcher);

        Self {
            order_client,
            sweeper,
            actor_handle,
            schedule_handle: None,
        }
    }

    /// Inserts pre-built documents. Returns how many were stored.
    pub async fn seed(&self, orders: Vec<PurchaseOrder>) -> Result<usize, String> {
        let mut stored = 0;
        for order in orders {
            self.order_client
                .insert(order)
                .await
                .map_err(|e| format!("Failed to seed purchase order: {e}"))?;
            stored += 1;
        }
        info!(stored, "Seeded purchase orders");
        Ok(stored)
    }

    /// Runs a sweep every `every`, starting one period from now. Replaces any earlier schedule.
    pub fn spawn_schedule(&mut self, every: Duration) {
        if let Some(previous) = self.schedule_handle.take() {
            previous.abort();
        }

        let sweeper = self.sweeper.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                match sweeper.run().await {
                    Ok(summary) => info!(
                        total = summary.total,
                        success = summary.success,
                        failed = summary.failed,
                        "Scheduled sweep done"
                    ),
                    Err(e) => error!(error = %e, "Scheduled sweep failed"),
                }
            }
        });

        info!(interval_secs = every.as_secs(), "Sweep schedule started");
        self.schedule_handle = Some(handle);
    }

    /// Stops the schedule, drops the clients and waits for the actor to exit.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down tracking system...");

        if let Some(schedule) = self.schedule_handle {
            schedule.abort();
            if let Err(e) = schedule.await {
                if !e.is_cancelled() {
                    warn!("Schedule task failed: {:?}", e);
                }
            }
        }

        drop(self.sweeper);
        drop(self.order_client);

        if let Err(e) = self.actor_handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("Tracking system shutdown complete.");
        Ok(())
    }
}

/// Reads a JSON array of purchase orders.
pub fn read_seed_file(path: &Path) -> Result<Vec<PurchaseOrder>, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read seed file {}: {e}", path.display()))?;
    serde_json::from_str(&raw)
        .map_err(|e| format!("Invalid seed file {}: {e}", path.display()))
}
