//! Pure data structures: the purchase-order document and the tracking snapshot applied to it.

pub mod purchase_order;
pub mod snapshot;

pub use purchase_order::*;
pub use snapshot::*;
