//! Core domain types
//!
//! The typed schemas of the resources managed on the Elkarbackup server. Each
//! type implements [`Resource`](crate::Resource) and carries the field table the
//! diff engine works from.

pub mod client;
pub mod job;
