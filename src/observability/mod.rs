//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers, rosbridge client
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every request span
//! - Metrics are cheap (no-op without an installed recorder)

pub mod logging;
pub mod metrics;
