//! Field comparison tables
//!
//! Every resource kind declares one `FieldSpec` per wire field. The diff engine
//! reads these tables instead of carrying per-field comparison code.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// How the diff engine compares one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain value equality
    Scalar,
    /// Collections compared as sets: ordering and duplicates are ignored
    ScalarSet,
    /// Value equality where missing, `null` and `""` all mean "unset"
    NullableScalar,
}

/// Comparison rule for a single wire field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire (JSON) name of the field
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn scalar(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Scalar,
        }
    }

    pub const fn set(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::ScalarSet,
        }
    }

    pub const fn nullable(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::NullableScalar,
        }
    }
}

/// The resource kinds managed on the Elkarbackup server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Client,
    Job,
}

impl ResourceKind {
    /// Collection segment used in REST paths (`/api/<collection>.json`)
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Client => "clients",
            ResourceKind::Job => "jobs",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Client => write!(f, "Client"),
            ResourceKind::Job => write!(f, "Job"),
        }
    }
}

/// A typed resource schema that can be reconciled
///
/// Implementors serialize to exactly the fields listed in `FIELDS`, using the
/// same wire names, so the diff engine can project both sides through serde.
pub trait Resource:
    Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static
{
    const KIND: ResourceKind;

    /// One entry per serialized field
    const FIELDS: &'static [FieldSpec];

    /// Human-assigned name used to locate the resource remotely
    fn name(&self) -> &str;
}
