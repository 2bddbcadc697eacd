use thiserror::Error;

use crate::purchase_order_actor::PurchaseOrderError;
use crate::tracking::FetchError;

/// A sweep that could not start. Per-container failures never end up here.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("failed to enumerate containers: {0}")]
    Enumeration(#[source] PurchaseOrderError),
}

/// Why a single container refresh failed.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Apply(#[from] PurchaseOrderError),
}
