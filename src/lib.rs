//! # recfile
//!
//! A minimal embedded record store with:
//! - One JSON Lines backing file per record type
//! - Integer identity keys resolved at compile time
//! - Atomic temp-file replacement for every mutation
//! - Add / GetById / GetAll / Update / Remove
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Caller                                │
//! │            (one Store<T> per record type)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Record Store                             │
//! │        add / get_by_id / get_all / update / remove           │
//! └──────────┬──────────────────────────────┬───────────────────┘
//!            │                              │
//!            ▼                              ▼
//!     ┌─────────────┐               ┌──────────────┐
//!     │  Identity   │               │ Backing File │
//!     │  Resolver   │               │ (JSON Lines) │
//!     └─────────────┘               └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod identity;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::{Config, SyncPolicy};
pub use identity::{Identity, IdentityResolver};
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of recfile
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
