pub mod config;
pub mod error;
pub mod db;
pub mod model;
pub mod store;

pub use config::Config;
pub use error::{RelstoreError, Result};
pub use model::{Attributes, EdgeEntity, NodeRecord, RelationshipRecord};
pub use store::{traverse, GraphStore};
