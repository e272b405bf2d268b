//! Observability subsystem.
//!
//! Every registry mutation emits a `tracing` event: `debug` for accepted
//! updates, `warn` for rejected ones, `info` for bulk loads and reloads.

pub mod logging;
