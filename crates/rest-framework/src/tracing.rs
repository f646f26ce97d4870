//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//!
//! The subscriber uses a compact format that hides the crate/module prefix
//! (`with_target(false)`) and reads its filter from `RUST_LOG`:
//!
//! ```bash
//! # Request/response flow and store lifecycle
//! RUST_LOG=info cargo run
//!
//! # Full request payloads (tokens are never logged)
//! RUST_LOG=debug cargo run
//!
//! # Only the framework
//! RUST_LOG=rest_framework=debug cargo run
//! ```
//!
//! Failed calls are logged at `error` by the shared error handler in
//! [`ApiClient`](crate::ApiClient), with the status and body that callers never see
//! through [`ApiError::user_message`](crate::ApiError::user_message).

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
