//! BFS traversal over stored relationship records.

use std::collections::{HashSet, VecDeque};

use crate::error::Result;
use crate::model::EdgeEntity;
use crate::store::GraphStore;

/// Traverse outgoing relationships of one edge type using BFS.
/// Returns all records discovered within max_depth hops of the start node,
/// visiting at most max_visited distinct nodes (start node included).
pub async fn traverse<E>(
    store: &GraphStore,
    start_node_id: i64,
    max_depth: usize,
    max_visited: usize,
) -> Result<Vec<E>>
where
    E: EdgeEntity + Send + 'static,
{
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    let mut result = Vec::new();

    queue.push_back((start_node_id, 0));
    visited.insert(start_node_id);

    while let Some((node_id, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }

        let records: Vec<E> = store.relationships_from(node_id).await?;

        for record in records {
            // Hydrated records always carry persisted endpoints
            let destination_id = match record.destination().and_then(|n| n.id()) {
                Some(id) => id,
                None => continue,
            };
            if visited.contains(&destination_id) {
                continue;
            }
            if visited.len() >= max_visited {
                log::warn!(
                    "Traversal from node {} reached the visited-node cap ({}), stopping",
                    start_node_id,
                    max_visited
                );
                return Ok(result);
            }
            visited.insert(destination_id);
            queue.push_back((destination_id, depth + 1));
            result.push(record);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{migrate, Db};
    use crate::model::{NodeRecord, RelationshipRecord};
    use std::path::Path;
    use tempfile::TempDir;

    /// Build a small route map: a -> b -> c, a -> d.
    async fn setup_store_with_routes() -> (GraphStore, Vec<NodeRecord>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = Db::new(&db_path);
        let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
        db.with_connection(move |conn| migrate::run_migrations(conn, &migrations_dir))
            .await
            .unwrap();
        let store = GraphStore::new(db);

        let mut stations = Vec::new();
        for name in ["Aldgate", "Barbican", "Croxley", "Debden"] {
            let mut node = NodeRecord::new(name);
            store.insert_node(&mut node).await.unwrap();
            stations.push(node);
        }

        for (from, to, name) in [(0, 1, "Metropolitan"), (1, 2, "Metropolitan"), (0, 3, "Central")] {
            let mut record = RelationshipRecord::new(
                stations[from].clone(),
                stations[to].clone(),
                name,
            );
            store.insert_relationship(&mut record).await.unwrap();
        }

        (store, stations, temp_dir)
    }

    fn destination_names(records: &[RelationshipRecord]) -> Vec<&str> {
        records
            .iter()
            .filter_map(|r| r.destination().map(|n| n.name()))
            .collect()
    }

    #[tokio::test]
    async fn test_traverse_single_hop() {
        let (store, stations, _temp) = setup_store_with_routes().await;
        let records: Vec<RelationshipRecord> =
            traverse(&store, stations[0].id().unwrap(), 1, 100).await.unwrap();

        assert_eq!(records.len(), 2); // a->b, a->d (depth 1 only)
        let targets = destination_names(&records);
        assert!(targets.contains(&"Barbican"));
        assert!(targets.contains(&"Debden"));
    }

    #[tokio::test]
    async fn test_traverse_multi_hop() {
        let (store, stations, _temp) = setup_store_with_routes().await;
        let records: Vec<RelationshipRecord> =
            traverse(&store, stations[0].id().unwrap(), 3, 100).await.unwrap();

        assert_eq!(records.len(), 3); // a->b, a->d, b->c
        let targets = destination_names(&records);
        assert!(targets.contains(&"Barbican"));
        assert!(targets.contains(&"Croxley"));
        assert!(targets.contains(&"Debden"));
    }

    #[tokio::test]
    async fn test_traverse_depth_zero() {
        let (store, stations, _temp) = setup_store_with_routes().await;
        let records: Vec<RelationshipRecord> =
            traverse(&store, stations[0].id().unwrap(), 0, 100).await.unwrap();
        assert!(records.is_empty()); // depth 0: no expansion
    }

    #[tokio::test]
    async fn test_traverse_unknown_start() {
        let (store, _stations, _temp) = setup_store_with_routes().await;
        let records: Vec<RelationshipRecord> = traverse(&store, 999, 2, 100).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_traverse_cycle_terminates() {
        let (store, stations, _temp) = setup_store_with_routes().await;

        // Add cycle: c -> a
        let mut back = RelationshipRecord::new(
            stations[2].clone(),
            stations[0].clone(),
            "Metropolitan",
        );
        store.insert_relationship(&mut back).await.unwrap();

        let records: Vec<RelationshipRecord> =
            traverse(&store, stations[0].id().unwrap(), 5, 100).await.unwrap();
        // Finite: a->b, a->d, b->c; c->a revisits a and is skipped
        assert_eq!(records.len(), 3);
    }

    #[tokio::test]
    async fn test_traverse_visited_cap() {
        let (store, stations, _temp) = setup_store_with_routes().await;

        // Cap of 2 covers the start node plus one destination: only the
        // first outgoing route (a->b) is returned, a->d and b->c are cut off
        let records: Vec<RelationshipRecord> =
            traverse(&store, stations[0].id().unwrap(), 5, 2).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(destination_names(&records), vec!["Barbican"]);

        // A cap that already holds the whole graph changes nothing
        let records: Vec<RelationshipRecord> =
            traverse(&store, stations[0].id().unwrap(), 5, 4).await.unwrap();
        assert_eq!(records.len(), 3);
    }
}
