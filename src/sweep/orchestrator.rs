use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::error::{RefreshError, SweepError};
use super::summary::{ContainerRefresh, SweepSummary};
use crate::clients::PurchaseOrderClient;
use crate::model::PurchaseOrderId;
use crate::tracking::TrackingFetcher;

/// Refreshes tracking data for every active container, one at a time.
///
/// A failing container is recorded and skipped. Only a failure to enumerate aborts a sweep.
/// Two sweeps running at once are not coordinated; each individual apply is still atomic per
/// document, so the later write wins.
#[derive(Clone)]
pub struct Sweeper {
    orders: PurchaseOrderClient,
    fetcher: Arc<dyn TrackingFetcher>,
}

impl Sweeper {
    pub fn new(orders: PurchaseOrderClient, fetcher: Arc<dyn TrackingFetcher>) -> Self {
        Self { orders, fetcher }
    }

    pub fn fetcher(&self) -> &dyn TrackingFetcher {
        self.fetcher.as_ref()
    }

    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<SweepSummary, SweepError> {
        let owners = self
            .orders
            .active_containers()
            .await
            .map_err(SweepError::Enumeration)?;
        info!(containers = owners.len(), "Sweep started");

        let mut summary = SweepSummary::default();
        for (container, po_ids) in &owners {
            match self.refresh_owned(container, po_ids).await {
                Ok(refresh) => {
                    summary.record_success();
                    info!(
                        container = %refresh.container,
                        status = ?refresh.status,
                        eta = ?refresh.eta,
                        entries_updated = refresh.outcome.entries_updated,
                        "Container refreshed"
                    );
                }
                Err(e) => {
                    warn!(container = %container, error = %e, "Container refresh failed");
                    summary.record_failure(container, e);
                }
            }
        }

        info!(
            total = summary.total,
            success = summary.success,
            failed = summary.failed,
            "Sweep finished"
        );
        Ok(summary)
    }

    /// One fetch followed by one apply to whichever in-progress orders track `container`.
    #[instrument(skip(self))]
    pub async fn refresh_container(&self, container: &str) -> Result<ContainerRefresh, RefreshError> {
        let snapshot = self.fetcher.fetch(container).await?;
        let outcome = self.orders.apply_snapshot(snapshot.clone()).await?;
        Ok(ContainerRefresh::stored(container, &snapshot, outcome))
    }

    /// Sweep step: the owning orders are already known from enumeration.
    async fn refresh_owned(
        &self,
        container: &str,
        owners: &BTreeSet<PurchaseOrderId>,
    ) -> Result<ContainerRefresh, RefreshError> {
        let snapshot = self.fetcher.fetch(container).await?;
        let outcome = self.orders.apply_snapshot_to(owners, snapshot.clone()).await?;
        Ok(ContainerRefresh::stored(container, &snapshot, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerPo, PurchaseOrder, ShipmentEntry, ShipmentStatus, TrackingSnapshot};
    use crate::purchase_order_actor::{ApplyOutcome, PurchaseOrderActionResult};
    use crate::tracking::ScriptedFetcher;
    use document_actor::mock::MockClient;
    use document_actor::StoreError;

    fn order(id: &str, containers: &[&str]) -> PurchaseOrder {
        let shipments = containers
            .iter()
            .map(|c| ShipmentEntry::new(*c, ShipmentStatus::InTransit))
            .collect();
        PurchaseOrder::new(id, id, vec![CustomerPo::new("C-1", shipments)])
    }

    fn snapshot(container: &str) -> TrackingSnapshot {
        TrackingSnapshot {
            container_number: container.to_string(),
            status: ShipmentStatus::OnWater,
            eta: None,
            events: vec![],
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_is_recorded_and_sweep_continues() {
        let orders = vec![order("po_1", &["ABCU1", "XYZW2"])];
        let mut mock = MockClient::<PurchaseOrder>::new();
        // one scan to enumerate, then the action for XYZW2 only
        mock.expect_scan().return_ok(orders);
        mock.expect_action("po_1".into())
            .return_ok(PurchaseOrderActionResult::ApplySnapshot(ApplyOutcome {
                entries_updated: 1,
                events_added: 0,
            }));

        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.fail("ABCU1", "connection reset");
        fetcher.respond(snapshot("XYZW2"));

        let sweeper = Sweeper::new(PurchaseOrderClient::new(mock.client()), fetcher.clone());
        let summary = sweeper.run().await.unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.success, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(
            summary.errors,
            vec!["ABCU1: tracking request failed: connection reset".to_string()]
        );
        assert_eq!(fetcher.calls(), vec!["ABCU1".to_string(), "XYZW2".to_string()]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_persistence_failure_counts_like_fetch_failure() {
        let orders = vec![order("po_1", &["ABCU1"])];
        let mut mock = MockClient::<PurchaseOrder>::new();
        mock.expect_scan().return_ok(orders);
        mock.expect_action("po_1".into())
            .return_err(StoreError::ActorDropped);

        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.respond(snapshot("ABCU1"));

        let sweeper = Sweeper::new(PurchaseOrderClient::new(mock.client()), fetcher);
        let summary = sweeper.run().await.unwrap();

        assert_eq!(summary.failed, 1);
        assert!(summary.errors[0].starts_with("ABCU1: document store error"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_sweep_scans_once_and_sends_actions_to_owners() {
        let orders = vec![
            order("po_1", &["ABCU1", "XYZW2"]),
            order("po_2", &["ABCU1"]),
            order("po_3", &["MSCU3"]),
        ];
        let mut mock = MockClient::<PurchaseOrder>::new();
        mock.expect_scan().return_ok(orders);
        for po_id in ["po_1", "po_2", "po_3", "po_1"] {
            mock.expect_action(po_id.into())
                .return_ok(PurchaseOrderActionResult::ApplySnapshot(ApplyOutcome {
                    entries_updated: 1,
                    events_added: 0,
                }));
        }

        let fetcher = Arc::new(ScriptedFetcher::new());
        for container in ["ABCU1", "MSCU3", "XYZW2"] {
            fetcher.respond(snapshot(container));
        }

        let sweeper = Sweeper::new(PurchaseOrderClient::new(mock.client()), fetcher);
        let summary = sweeper.run().await.unwrap();

        assert_eq!((summary.total, summary.success), (3, 3));
        mock.verify();
    }

    #[tokio::test]
    async fn test_refresh_reports_stored_values_only() {
        let mut mock = MockClient::<PurchaseOrder>::new();
        mock.expect_scan().return_ok(vec![order("po_1", &["ABCU1"])]);
        mock.expect_action("po_1".into())
            .return_ok(PurchaseOrderActionResult::ApplySnapshot(ApplyOutcome {
                entries_updated: 1,
                events_added: 0,
            }));

        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.respond(TrackingSnapshot {
            container_number: "ABCU1".to_string(),
            status: ShipmentStatus::Unknown,
            eta: None,
            events: vec![],
        });

        let sweeper = Sweeper::new(PurchaseOrderClient::new(mock.client()), fetcher);
        let refresh = sweeper.refresh_container("ABCU1").await.unwrap();

        assert_eq!(refresh.status, None);
        assert_eq!(refresh.eta, None);
        let body = serde_json::to_value(&refresh).unwrap();
        assert!(body.get("status").is_none());
        assert!(body.get("eta").is_none());
        mock.verify();
    }

    #[tokio::test]
    async fn test_enumeration_failure_aborts() {
        let mut mock = MockClient::<PurchaseOrder>::new();
        mock.expect_scan().return_err(StoreError::ActorClosed);

        let fetcher = Arc::new(ScriptedFetcher::new());
        let sweeper = Sweeper::new(PurchaseOrderClient::new(mock.client()), fetcher.clone());

        assert!(matches!(sweeper.run().await, Err(SweepError::Enumeration(_))));
        assert!(fetcher.calls().is_empty());
        mock.verify();
    }
}
