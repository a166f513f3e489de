//! depmap-lib: package mapping resolution
//!
//! This crate turns abstract build dependencies into concrete package names
//! for a given host:
//! - `Inventory`: per-host facts (OS, packaging format, architecture)
//! - `MappingStore`: logical package -> context-keyed concrete names
//! - `ProjectIndex`: project -> required logical packages
//! - `resolve`: computes a `VarMap` from the above
//! - `Context`: the loaded data directory tying everything together

pub mod consts;
pub mod context;
pub mod inventory;
pub mod mappings;
pub mod pattern;
pub mod platform;
pub mod projects;
pub mod resolve;
pub mod util;

pub use context::{Context, ContextError, Problem};
pub use resolve::{ResolveError, VarMap};
