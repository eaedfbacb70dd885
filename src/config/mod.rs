//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults, optionally overridden by a TOML file
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → handed to the HTTP server and rosbridge client at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, RelayConfig, RobotConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
