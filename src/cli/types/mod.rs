//! Type-safe wrappers and configuration types for ESPN basketball data.

pub mod ids;
pub mod team;
