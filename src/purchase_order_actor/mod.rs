//! Purchase-order document logic, including the snapshot merge action.

mod actions;
pub mod entity;
pub mod error;
mod merge;

pub use actions::*;
pub use error::*;

use crate::clients::PurchaseOrderClient;
use crate::model::PurchaseOrder;
use document_actor::DocumentActor;

/// Creates a new purchase-order actor and its client.
pub fn new() -> (DocumentActor<PurchaseOrder>, PurchaseOrderClient) {
    let (actor, generic_client) = DocumentActor::new(64);
    let client = PurchaseOrderClient::new(generic_client);

    (actor, client)
}
