//! Domain wrappers around [`DocumentClient`](document_actor::DocumentClient).

pub mod purchase_order_client;

pub use purchase_order_client::*;
