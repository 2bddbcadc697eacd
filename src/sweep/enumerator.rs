//! Picks the containers a sweep refreshes.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{PurchaseOrder, PurchaseOrderId};

/// Trimmed container numbers with an active status inside in-progress orders, each mapped to
/// the orders that track it.
pub type ContainerOwners = BTreeMap<String, BTreeSet<PurchaseOrderId>>;

pub fn active_containers(orders: &[PurchaseOrder]) -> ContainerOwners {
    let mut owners = ContainerOwners::new();
    for order in orders.iter().filter(|order| order.is_in_progress()) {
        for container in order.shipments().filter_map(|entry| entry.active_container()) {
            owners
                .entry(container.to_string())
                .or_default()
                .insert(order.id.clone());
        }
    }
    owners
}
