//! Garnet Core
//!
//! Shared leaf types used across the IR builder and its tooling.

pub mod strings;

pub use strings::{FileId, StringTable};
