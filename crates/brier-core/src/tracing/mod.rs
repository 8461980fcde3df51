//! Observability for Brier.
//! `tracing` with an `EnvFilter` read from `BRIER_LOG`.

pub mod setup;

pub use setup::{init_tracing, init_tracing_with_filter};
