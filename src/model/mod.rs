//! Graph record types: endpoint nodes, directed relationship records, and
//! the field-role contract the store uses to persist and rehydrate them.

mod mapping;
mod node;
mod relationship;

pub use mapping::{Attributes, EdgeEntity};
pub use node::NodeRecord;
pub use relationship::RelationshipRecord;
