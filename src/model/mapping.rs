//! Field-role contract for directed-edge records.
//!
//! The store never reflects over record fields. A record type declares its
//! schema-level edge type and exposes the role-tagged fields (identifier,
//! origin, destination, scalar attributes) through this trait, and the store
//! persists and rehydrates any implementor generically.

use serde_json::{Map, Value};

use crate::error::Result;
use crate::model::NodeRecord;

/// Per-instance scalar attributes, keyed by attribute name.
/// Stored as a JSON object in the `attributes_json` column.
pub type Attributes = Map<String, Value>;

/// A typed, directed edge between two [`NodeRecord`] endpoints.
///
/// `Default` gives the store an empty instance to populate when mapping a
/// row back into a record, so rehydration follows the same
/// construct-then-populate lifecycle as application code that builds a
/// record field by field.
pub trait EdgeEntity: Default {
    /// Schema-level edge-type discriminator. One per record type; this is
    /// not an instance attribute and never appears in [`attributes`].
    ///
    /// [`attributes`]: EdgeEntity::attributes
    const EDGE_TYPE: &'static str;

    /// Identifier assigned by the store on first insert, `None` before.
    fn id(&self) -> Option<i64>;

    /// Assign the persistence identifier. Implementations must reject a
    /// second assignment with [`RelstoreError::AlreadyPersisted`].
    ///
    /// [`RelstoreError::AlreadyPersisted`]: crate::RelstoreError::AlreadyPersisted
    fn bind_id(&mut self, id: i64) -> Result<()>;

    /// The edge's start node, if set.
    fn origin(&self) -> Option<&NodeRecord>;

    /// The edge's end node, if set. Edges are directed; origin and
    /// destination are distinct roles.
    fn destination(&self) -> Option<&NodeRecord>;

    /// Populate both endpoint references (rehydration path).
    fn set_endpoints(&mut self, origin: NodeRecord, destination: NodeRecord);

    /// Snapshot of the record's scalar attributes.
    fn attributes(&self) -> Attributes;

    /// Populate scalar attributes from a stored map (rehydration path).
    /// Unknown keys are ignored, as is a known key whose value has an
    /// unexpected JSON type; the corresponding field stays unset.
    fn set_attributes(&mut self, attrs: Attributes);
}
