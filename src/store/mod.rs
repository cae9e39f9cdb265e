//! SQLite-backed persistence for nodes and directed relationship records.
//!
//! The store is the only component that assigns identifiers: inserting a
//! record binds the rowid exactly once, and rehydration rebuilds records
//! through the same default-then-populate path a mapping layer would use.

mod traversal;

pub use traversal::traverse;

use rusqlite::{params, OptionalExtension};

use crate::db::Db;
use crate::error::{RelstoreError, Result};
use crate::model::{Attributes, EdgeEntity, NodeRecord};

/// Graph store over a [`Db`] connection manager.
pub struct GraphStore {
    db: Db,
}

/// Rebuild an edge record from its row: empty instance first, then
/// endpoints, attributes, and finally the identifier.
fn hydrate_edge<E: EdgeEntity>(
    rel_id: i64,
    origin_id: i64,
    origin_name: String,
    destination_id: i64,
    destination_name: String,
    attributes_json: Option<String>,
) -> Result<E> {
    let mut origin = NodeRecord::new(origin_name);
    origin.bind_id(origin_id)?;
    let mut destination = NodeRecord::new(destination_name);
    destination.bind_id(destination_id)?;

    let mut record = E::default();
    record.set_endpoints(origin, destination);
    if let Some(json) = attributes_json {
        let attrs: Attributes = serde_json::from_str(&json)?;
        record.set_attributes(attrs);
    }
    record.bind_id(rel_id)?;
    Ok(record)
}

impl GraphStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Insert an unpersisted node and bind its rowid as the identifier.
    pub async fn insert_node(&self, node: &mut NodeRecord) -> Result<i64> {
        if let Some(existing) = node.id() {
            return Err(RelstoreError::AlreadyPersisted(existing));
        }

        let name = node.name().to_string();
        let id = self
            .db
            .with_connection(move |conn| {
                conn.execute("INSERT INTO nodes (name) VALUES (?1)", params![name])?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        node.bind_id(id)?;
        log::debug!("Inserted node {} ({})", id, node.name());
        Ok(id)
    }

    /// Fetch a node by identifier.
    pub async fn get_node(&self, id: i64) -> Result<NodeRecord> {
        let row = self
            .db
            .with_connection(move |conn| {
                let row = conn
                    .query_row(
                        "SELECT node_id, name FROM nodes WHERE node_id = ?1",
                        params![id],
                        |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
                    )
                    .optional()?;
                Ok(row)
            })
            .await?;

        let (node_id, name) = row.ok_or(RelstoreError::NodeNotFound(id))?;
        let mut node = NodeRecord::new(name);
        node.bind_id(node_id)?;
        Ok(node)
    }

    /// Look up a node by its name. Returns the first match by insertion
    /// order when names collide.
    pub async fn find_node_by_name(&self, name: &str) -> Result<Option<NodeRecord>> {
        let name = name.to_string();
        let row = self
            .db
            .with_connection(move |conn| {
                let row = conn
                    .query_row(
                        "SELECT node_id, name FROM nodes WHERE name = ?1 ORDER BY node_id LIMIT 1",
                        params![name],
                        |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
                    )
                    .optional()?;
                Ok(row)
            })
            .await?;

        match row {
            Some((node_id, name)) => {
                let mut node = NodeRecord::new(name);
                node.bind_id(node_id)?;
                Ok(Some(node))
            }
            None => Ok(None),
        }
    }

    /// Insert an unpersisted relationship record and bind its rowid.
    ///
    /// Both endpoints must be set and already persisted; the record type's
    /// `EDGE_TYPE` goes into the discriminator column, never the attribute
    /// map.
    pub async fn insert_relationship<E>(&self, record: &mut E) -> Result<i64>
    where
        E: EdgeEntity + Send + 'static,
    {
        if let Some(existing) = record.id() {
            return Err(RelstoreError::AlreadyPersisted(existing));
        }

        let origin_id = record
            .origin()
            .ok_or_else(|| RelstoreError::InvalidInput("origin endpoint not set".to_string()))?
            .id()
            .ok_or_else(|| {
                RelstoreError::InvalidInput("origin endpoint not persisted".to_string())
            })?;
        let destination_id = record
            .destination()
            .ok_or_else(|| {
                RelstoreError::InvalidInput("destination endpoint not set".to_string())
            })?
            .id()
            .ok_or_else(|| {
                RelstoreError::InvalidInput("destination endpoint not persisted".to_string())
            })?;

        let attrs = record.attributes();
        let attributes_json = if attrs.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&attrs)?)
        };

        let id = self
            .db
            .with_connection(move |conn| {
                conn.execute(
                    "INSERT INTO relationships (rel_type, origin_id, destination_id, attributes_json) \
                     VALUES (?1, ?2, ?3, ?4)",
                    params![E::EDGE_TYPE, origin_id, destination_id, attributes_json],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        record.bind_id(id)?;
        log::debug!(
            "Inserted {} relationship {} ({} -> {})",
            E::EDGE_TYPE,
            id,
            origin_id,
            destination_id
        );
        Ok(id)
    }

    /// Fetch a relationship record by identifier. A row stored under a
    /// different edge type is reported as not found.
    pub async fn get_relationship<E>(&self, id: i64) -> Result<E>
    where
        E: EdgeEntity + Send + 'static,
    {
        let record = self
            .db
            .with_connection(move |conn| {
                let row = conn
                    .query_row(
                        "SELECT r.rel_id, r.origin_id, o.name, r.destination_id, d.name, r.attributes_json \
                         FROM relationships r \
                         JOIN nodes o ON o.node_id = r.origin_id \
                         JOIN nodes d ON d.node_id = r.destination_id \
                         WHERE r.rel_id = ?1 AND r.rel_type = ?2",
                        params![id, E::EDGE_TYPE],
                        |row| {
                            Ok((
                                row.get::<_, i64>(0)?,
                                row.get::<_, i64>(1)?,
                                row.get::<_, String>(2)?,
                                row.get::<_, i64>(3)?,
                                row.get::<_, String>(4)?,
                                row.get::<_, Option<String>>(5)?,
                            ))
                        },
                    )
                    .optional()?;

                match row {
                    Some((rel_id, origin_id, origin_name, dest_id, dest_name, attrs)) => {
                        Ok(Some(hydrate_edge::<E>(
                            rel_id,
                            origin_id,
                            origin_name,
                            dest_id,
                            dest_name,
                            attrs,
                        )?))
                    }
                    None => Ok(None),
                }
            })
            .await?;

        record.ok_or(RelstoreError::RelationshipNotFound(id))
    }

    /// All outgoing relationships of one edge type from a node, ordered by
    /// identifier.
    pub async fn relationships_from<E>(&self, origin_id: i64) -> Result<Vec<E>>
    where
        E: EdgeEntity + Send + 'static,
    {
        self.db
            .with_connection(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT r.rel_id, r.origin_id, o.name, r.destination_id, d.name, r.attributes_json \
                     FROM relationships r \
                     JOIN nodes o ON o.node_id = r.origin_id \
                     JOIN nodes d ON d.node_id = r.destination_id \
                     WHERE r.origin_id = ?1 AND r.rel_type = ?2 \
                     ORDER BY r.rel_id",
                )?;
                let rows = stmt
                    .query_map(params![origin_id, E::EDGE_TYPE], |row| {
                        Ok((
                            row.get::<_, i64>(0)?,
                            row.get::<_, i64>(1)?,
                            row.get::<_, String>(2)?,
                            row.get::<_, i64>(3)?,
                            row.get::<_, String>(4)?,
                            row.get::<_, Option<String>>(5)?,
                        ))
                    })
                    .map_err(RelstoreError::Database)?;

                let mut out = Vec::new();
                for row in rows {
                    let (rel_id, origin_id, origin_name, dest_id, dest_name, attrs) =
                        row.map_err(RelstoreError::Database)?;
                    out.push(hydrate_edge::<E>(
                        rel_id,
                        origin_id,
                        origin_name,
                        dest_id,
                        dest_name,
                        attrs,
                    )?);
                }
                Ok(out)
            })
            .await
    }

    /// Delete a stored relationship record.
    pub async fn delete_relationship<E>(&self, id: i64) -> Result<()>
    where
        E: EdgeEntity + Send + 'static,
    {
        let deleted = self
            .db
            .with_connection(move |conn| {
                let n = conn.execute(
                    "DELETE FROM relationships WHERE rel_id = ?1 AND rel_type = ?2",
                    params![id, E::EDGE_TYPE],
                )?;
                Ok(n)
            })
            .await?;

        if deleted == 0 {
            return Err(RelstoreError::RelationshipNotFound(id));
        }
        Ok(())
    }
}
