//! Remote resource envelope

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ResourceId;
use crate::field::Resource;
use crate::lenient;

/// A resource as currently stored on the server
///
/// `extra` keeps every field the typed schema does not model, so a
/// full-object update sends them back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "R: Resource")]
pub struct Remote<R> {
    #[serde(deserialize_with = "lenient::int")]
    pub id: ResourceId,
    #[serde(flatten)]
    pub resource: R,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<R: Resource> Remote<R> {
    pub fn new(id: ResourceId, resource: R) -> Self {
        Self {
            id,
            resource,
            extra: Map::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.resource.name()
    }
}
