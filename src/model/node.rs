use serde::{Deserialize, Serialize};

use crate::error::{RelstoreError, Result};

/// An endpoint entity: a node that can serve as the origin or destination
/// of a directed relationship record (e.g. a station on a transit map).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Identifier assigned by the persistence layer on first insert.
    id: Option<i64>,
    /// Display name, e.g. `Baker Street`.
    name: String,
}

impl NodeRecord {
    /// Create an unpersisted node. The identifier stays unset until the
    /// store inserts the row.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Assign the persistence identifier. Permitted exactly once; the store
    /// calls this with the rowid after a successful insert.
    pub fn bind_id(&mut self, id: i64) -> Result<()> {
        match self.id {
            Some(existing) => Err(RelstoreError::AlreadyPersisted(existing)),
            None => {
                self.id = Some(id);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_has_no_id() {
        let node = NodeRecord::new("Baker Street");
        assert_eq!(node.id(), None);
        assert_eq!(node.name(), "Baker Street");
    }

    #[test]
    fn test_bind_id_once() {
        let mut node = NodeRecord::new("Oxford Circus");
        node.bind_id(7).unwrap();
        assert_eq!(node.id(), Some(7));

        let err = node.bind_id(8).unwrap_err();
        assert!(matches!(err, RelstoreError::AlreadyPersisted(7)));
        assert_eq!(node.id(), Some(7));
    }
}
