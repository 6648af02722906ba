//! Vault module — encrypted secret storage.
//!
//! This module provides:
//! - The `Secret` record and its byte encoding (`secret`)
//! - The persisted name -> file mapping and storage-root layout (`state`)
//! - The `Vault` engine for listing, reading, updating and deleting secrets (`engine`)

pub mod engine;
pub mod secret;
pub mod state;

// Re-export the most commonly used items.
pub use engine::Vault;
pub use secret::Secret;
pub use state::{VaultState, STATE_FILE};
