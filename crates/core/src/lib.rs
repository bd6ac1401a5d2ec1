//! Core types for semset
//!
//! This crate defines the vocabulary shared by the store seam and the
//! collection encodings:
//! - `Handle` / `ElementType`: element identity and kind
//! - `Template` / `Binding`: pattern search requests and results
//! - `Construction`: batched element creation
//! - `Config`: keynode identifiers and store behaviour
//! - `SemError`: the workspace error type

#![warn(clippy::all)]

pub mod config;
pub mod construction;
pub mod error;
pub mod identifiers;
pub mod template;
pub mod types;

pub use config::{Config, KeynodeConfig, StoreConfig};
pub use construction::{Construction, ConstructionItem, Endpoint};
pub use error::{SemError, SemResult};
pub use template::{Binding, Pattern, Slot, SlotValue, Template};
pub use types::{ElementType, Handle};
