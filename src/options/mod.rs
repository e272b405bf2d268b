//! Options registry.
//!
//! # Data Flow
//! ```text
//! raw key → text map
//!     → loader.rs (fixed order, fail fast)
//!     → facade.rs (per-key setters, validation)
//!         → value.rs (coercion)
//!         → csv.rs (token sets)
//!         → resolver.rs (type name → cached instance)
//!     → store.rs (atomic swap of one immutable state)
//!     → typed getters, snapshot.rs, management.rs
//! ```
//!
//! # Design Decisions
//! - Closed key set; defaults applied at construction
//! - Every setter replaces the whole value, no incremental edits
//! - Failed setters leave the published state untouched
//! - Readers never block; writers are serialized

pub mod active;
pub mod csv;
pub mod error;
pub mod facade;
pub mod keys;
pub mod loader;
pub mod management;
pub mod resolver;
pub mod snapshot;
pub mod store;
pub mod value;

pub use active::{active, install};
pub use error::{OptionsError, OptionsResult};
pub use facade::{ModuleState, SpyOptions};
pub use keys::defaults;
pub use management::OptionsManagement;
pub use resolver::{TypeRegistries, TypeRegistry};
pub use snapshot::OptionsSnapshot;
pub use value::{OptionType, OptionValue};
