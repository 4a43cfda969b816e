//! Logging aliases for latent-contracts
//!
//! Re-exports the `tracing` macros under `log_*` names. The library never
//! installs a subscriber; that is left to the embedding service.

pub use tracing::{debug as log_debug, error as log_error, warn as log_warn};
