//! [`DocumentEntity`] implementation for [`PurchaseOrder`].
//!
//! Lets the generic [`document_actor::DocumentActor`] own purchase-order documents and run
//! [`PurchaseOrderAction`]s against them.

use async_trait::async_trait;
use document_actor::DocumentEntity;

use super::actions::{PurchaseOrderAction, PurchaseOrderActionResult};
use super::error::PurchaseOrderError;
use crate::model::{PurchaseOrder, PurchaseOrderCreate, PurchaseOrderId, PurchaseOrderUpdate};

#[async_trait]
impl DocumentEntity for PurchaseOrder {
    type Id = PurchaseOrderId;
    type Create = PurchaseOrderCreate;
    type Update = PurchaseOrderUpdate;
    type Action = PurchaseOrderAction;
    type ActionResult = PurchaseOrderActionResult;
    type Context = ();
    type Error = PurchaseOrderError;

    fn from_create_params(
        id: PurchaseOrderId,
        params: PurchaseOrderCreate,
    ) -> Result<Self, PurchaseOrderError> {
        if params.po_number.trim().is_empty() {
            return Err(PurchaseOrderError::Validation(
                "po_number must not be empty".to_string(),
            ));
        }
        Ok(Self::new(id, params.po_number, params.customer_pos))
    }

    fn document_id(&self) -> PurchaseOrderId {
        self.id.clone()
    }

    /// Fills in the derived aggregates so freshly stored documents are consistent.
    async fn on_create(&mut self, _ctx: &()) -> Result<(), PurchaseOrderError> {
        self.refresh_derived();
        Ok(())
    }

    /// # Fields Updated
    /// - `status`: order lifecycle status
    /// - `customer_pos`: replaced wholesale; derived aggregates are recomputed
    async fn on_update(
        &mut self,
        update: PurchaseOrderUpdate,
        _ctx: &(),
    ) -> Result<(), PurchaseOrderError> {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(customer_pos) = update.customer_pos {
            self.customer_pos = customer_pos;
            self.refresh_derived();
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: PurchaseOrderAction,
        _ctx: &(),
    ) -> Result<PurchaseOrderActionResult, PurchaseOrderError> {
        match action {
            PurchaseOrderAction::ApplySnapshot {
                snapshot,
                tracked_at,
            } => self
                .apply_snapshot(&snapshot, tracked_at)
                .map(PurchaseOrderActionResult::ApplySnapshot),
        }
    }
}
