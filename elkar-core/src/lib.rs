//! Elkar Core
//!
//! Core types and abstractions shared by the Elkarbackup reconciler crates.
//!
//! This crate contains:
//! - Domain types: the typed resource schemas (Client, Job) and their field tables
//! - DTOs: wire-level carriers (remote resources, API error payloads, desired specs)
//! - Diff: the generic field-level comparison driven by `FieldSpec` tables

pub mod diff;
pub mod domain;
pub mod dto;
pub mod field;
mod lenient;

pub use diff::{ChangeSet, diff, merge};
pub use field::{FieldKind, FieldSpec, Resource, ResourceKind};

/// Identifier assigned by the Elkarbackup server to a stored resource
pub type ResourceId = i64;
