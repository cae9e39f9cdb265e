use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RelstoreError, Result};
use crate::model::mapping::{Attributes, EdgeEntity};
use crate::model::NodeRecord;

/// A route between two stations: the crate's standard relationship record.
///
/// A relationship record is an edge, not a node. It carries its own
/// identifier (assigned once by the store), origin and destination endpoint
/// references, and a scalar `name` attribute (e.g. `"Bakerloo"`). The record
/// performs no validation and no I/O; the store owns both.
///
/// Two construction paths exist: [`RelationshipRecord::new`] for fully
/// populated records, and [`Default`] for an empty record the mapping layer
/// fills in field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    id: Option<i64>,
    origin: Option<NodeRecord>,
    destination: Option<NodeRecord>,
    name: Option<String>,
}

impl RelationshipRecord {
    /// Create a fully populated, unpersisted record. No null-checking or
    /// other validation happens here; the store rejects records whose
    /// endpoints are missing or unpersisted at insert time.
    pub fn new(origin: NodeRecord, destination: NodeRecord, name: impl Into<String>) -> Self {
        Self {
            id: None,
            origin: Some(origin),
            destination: Some(destination),
            name: Some(name.into()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl EdgeEntity for RelationshipRecord {
    const EDGE_TYPE: &'static str = "route";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn bind_id(&mut self, id: i64) -> Result<()> {
        match self.id {
            Some(existing) => Err(RelstoreError::AlreadyPersisted(existing)),
            None => {
                self.id = Some(id);
                Ok(())
            }
        }
    }

    fn origin(&self) -> Option<&NodeRecord> {
        self.origin.as_ref()
    }

    fn destination(&self) -> Option<&NodeRecord> {
        self.destination.as_ref()
    }

    fn set_endpoints(&mut self, origin: NodeRecord, destination: NodeRecord) {
        self.origin = Some(origin);
        self.destination = Some(destination);
    }

    fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        if let Some(name) = &self.name {
            attrs.insert("name".to_string(), Value::String(name.clone()));
        }
        attrs
    }

    fn set_attributes(&mut self, attrs: Attributes) {
        if let Some(Value::String(name)) = attrs.get("name") {
            self.name = Some(name.clone());
        }
    }
}
