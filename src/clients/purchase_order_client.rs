use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use document_actor::{DocumentClient, StoreClient, StoreError};
use tracing::{debug, info, instrument, warn};

use crate::model::{PurchaseOrder, PurchaseOrderId, TrackingSnapshot};
use crate::purchase_order_actor::{
    ApplyOutcome, PurchaseOrderAction, PurchaseOrderActionResult, PurchaseOrderError,
};
use crate::sweep::enumerator::{self, ContainerOwners};

/// Client for the purchase-order document actor.
///
/// Cross-document work (finding every order that tracks a container) happens here; the
/// per-document merge runs inside the actor.
#[derive(Clone)]
pub struct PurchaseOrderClient {
    inner: DocumentClient<PurchaseOrder>,
}

impl PurchaseOrderClient {
    pub fn new(inner: DocumentClient<PurchaseOrder>) -> Self {
        Self { inner }
    }

    /// Stores a pre-built document under its own id.
    #[instrument(skip(self, order), fields(po_id = %order.id))]
    pub async fn insert(&self, mut order: PurchaseOrder) -> Result<PurchaseOrderId, PurchaseOrderError> {
        order.refresh_derived();
        self.inner.insert(order).await.map_err(Self::map_error)
    }

    /// Active containers mapped to the orders that track them, from a single scan.
    #[instrument(skip(self))]
    pub async fn active_containers(&self) -> Result<ContainerOwners, PurchaseOrderError> {
        let orders = self.scan().await?;
        let owners = enumerator::active_containers(&orders);
        debug!(orders = orders.len(), containers = owners.len(), "Enumerated containers");
        Ok(owners)
    }

    /// Merges `snapshot` into every in-progress order tracking its container.
    ///
    /// Finds the owning orders with one scan. A sweep already knows them and calls
    /// [`apply_snapshot_to`](Self::apply_snapshot_to) instead.
    #[instrument(skip(self, snapshot), fields(container = %snapshot.container_number))]
    pub async fn apply_snapshot(
        &self,
        snapshot: TrackingSnapshot,
    ) -> Result<ApplyOutcome, PurchaseOrderError> {
        let container = snapshot.container_number.trim().to_string();
        let owners: BTreeSet<PurchaseOrderId> = self
            .scan()
            .await?
            .into_iter()
            .filter(|order| order.is_in_progress() && order.tracks(&container))
            .map(|order| order.id)
            .collect();

        self.apply_snapshot_to(&owners, snapshot).await
    }

    /// Sends the merge straight to `owners`.
    ///
    /// An owner that was deleted, closed or stopped tracking the container since it was
    /// enumerated is skipped. Fails with `ContainerNotFound` when no owner took the snapshot.
    #[instrument(
        skip(self, owners, snapshot),
        fields(container = %snapshot.container_number, owners = owners.len())
    )]
    pub async fn apply_snapshot_to(
        &self,
        owners: &BTreeSet<PurchaseOrderId>,
        snapshot: TrackingSnapshot,
    ) -> Result<ApplyOutcome, PurchaseOrderError> {
        let container = snapshot.container_number.trim().to_string();
        let tracked_at = Utc::now();
        let mut total = ApplyOutcome::default();
        let mut applied = 0;

        for po_id in owners {
            let action = PurchaseOrderAction::ApplySnapshot {
                snapshot: snapshot.clone(),
                tracked_at,
            };
            match self
                .inner
                .perform_action(po_id.clone(), action)
                .await
                .map_err(Self::map_error)
            {
                Ok(PurchaseOrderActionResult::ApplySnapshot(outcome)) => {
                    debug!(%po_id, ?outcome, "Snapshot applied");
                    total += outcome;
                    applied += 1;
                }
                Err(
                    e @ (PurchaseOrderError::NotFound(_) | PurchaseOrderError::ContainerNotFound(_)),
                ) => {
                    debug!(%po_id, error = %e, "Order no longer tracks this container, skipped");
                }
                Err(e) => return Err(e),
            }
        }

        if applied == 0 {
            warn!("No in-progress order tracks this container");
            return Err(PurchaseOrderError::ContainerNotFound(container));
        }

        info!(
            orders = applied,
            entries_updated = total.entries_updated,
            events_added = total.events_added,
            "Snapshot merged"
        );
        Ok(total)
    }
}

#[async_trait]
impl StoreClient<PurchaseOrder> for PurchaseOrderClient {
    type Error = PurchaseOrderError;

    fn inner(&self) -> &DocumentClient<PurchaseOrder> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        PurchaseOrderError::from(e)
    }
}
