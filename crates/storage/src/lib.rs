//! Storage layer for semset
//!
//! This crate provides:
//! - `Store`: the async seam to a pattern-addressable semantic memory
//! - `MemoryStore`: an in-process implementation used as reference and test double
//! - `KeynodeRegistry`: cached resolution of well-known identifiers

#![warn(clippy::all)]

pub mod keynodes;
pub mod memory;
pub mod store;

pub use keynodes::KeynodeRegistry;
pub use memory::MemoryStore;
pub use store::{ResolveParams, SharedStore, Store};
