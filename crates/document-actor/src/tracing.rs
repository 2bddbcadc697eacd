//! # Observability
//!
//! Document actors log through `tracing` with an `entity_type` field on every event, so the
//! subscriber hides module targets and uses the compact format.
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle and per-document outcomes
//! RUST_LOG=debug cargo run    # request payloads as well
//! ```

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG`.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
