//! Data Transfer Objects
//!
//! Carriers exchanged with the Elkarbackup API and with callers of the
//! reconciler: the remote envelope around a stored resource, the API error
//! payload, and the desired-state specifications.

pub mod error;
pub mod remote;
pub mod spec;
