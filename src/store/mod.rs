//! # Local Store
//!
//! Durable key-value persistence for the order collection and the in-flight
//! shipment record. Each key is one JSON file inside a directory chosen by
//! the embedder; a write serializes the full value and atomically replaces
//! the file, so there are no partial writes to recover from.
//!
//! Load failures (missing file, unreadable file, corrupt JSON) are logged
//! and reported as "nothing stored" — callers always get a usable value.
//! Save failures are logged and surfaced as [`SaveOutcome::Failed`] so the
//! caller can record them, but they never interrupt the interactive flow.

use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, warn};

use crate::model::{Order, ShipmentRecord};

/// Store key holding the serialized order collection.
const ORDERS_KEY: &str = "orders";

/// Store key holding the in-flight shipment record, when one exists.
const SHIPMENT_KEY: &str = "shipment";

/// Result of a store write, surfaced for logging rather than control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Persisted,
    Failed,
}

impl SaveOutcome {
    pub fn is_persisted(self) -> bool {
        self == SaveOutcome::Persisted
    }
}

/// Directory-backed key-value store, one JSON file per key.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Opens (and creates if needed) the storage directory.
    pub async fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    /// Loads the order collection, falling back to an empty one on any
    /// read or deserialization failure.
    pub async fn load_orders(&self) -> Vec<Order> {
        self.read_key(ORDERS_KEY).await.unwrap_or_default()
    }

    /// Serializes and writes the full collection under the fixed key.
    pub async fn save_orders(&self, orders: &[Order]) -> SaveOutcome {
        self.write_key(ORDERS_KEY, &orders).await
    }

    /// Loads the in-flight shipment record, if any.
    pub async fn load_shipment(&self) -> Option<ShipmentRecord> {
        self.read_key(SHIPMENT_KEY).await
    }

    /// Persists the shipment record; `None` clears the key.
    pub async fn save_shipment(&self, record: Option<&ShipmentRecord>) -> SaveOutcome {
        match record {
            Some(record) => self.write_key(SHIPMENT_KEY, record).await,
            None => self.remove_key(SHIPMENT_KEY).await,
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    async fn read_key<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.key_path(key);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(key, error = %e, "Store read failed");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Store entry corrupt, treating as empty");
                None
            }
        }
    }

    async fn write_key<T: Serialize>(&self, key: &str, value: &T) -> SaveOutcome {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(key, error = %e, "Store serialization failed");
                return SaveOutcome::Failed;
            }
        };
        // Write to a sibling temp file and rename over the old content, so a
        // crash mid-write leaves the previous snapshot intact.
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        if let Err(e) = fs::write(&tmp, &bytes).await {
            warn!(key, error = %e, "Store write failed");
            return SaveOutcome::Failed;
        }
        if let Err(e) = fs::rename(&tmp, self.key_path(key)).await {
            warn!(key, error = %e, "Store rename failed");
            return SaveOutcome::Failed;
        }
        debug!(key, bytes = bytes.len(), "Store entry written");
        SaveOutcome::Persisted
    }

    async fn remove_key(&self, key: &str) -> SaveOutcome {
        match fs::remove_file(self.key_path(key)).await {
            Ok(()) => SaveOutcome::Persisted,
            Err(e) if e.kind() == io::ErrorKind::NotFound => SaveOutcome::Persisted,
            Err(e) => {
                warn!(key, error = %e, "Store remove failed");
                SaveOutcome::Failed
            }
        }
    }

    /// Filesystem path of a key, for tests and diagnostics.
    pub fn path_of(&self, key: &str) -> PathBuf {
        self.key_path(key)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderStatus, ShipmentPhase};

    fn order(name: &str) -> Order {
        Order {
            name: name.into(),
            sender: "Alice".into(),
            time: "05/08/2026 10:00:00".into(),
            zone: "A".into(),
            shelf: "3".into(),
            position: "2".into(),
            status: OrderStatus::Received,
        }
    }

    #[tokio::test]
    async fn orders_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).await.unwrap();

        let orders = vec![order("Widget"), order("Gadget")];
        assert!(store.save_orders(&orders).await.is_persisted());
        assert_eq!(store.load_orders().await, orders);
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).await.unwrap();
        assert!(store.load_orders().await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).await.unwrap();
        fs::write(store.path_of("orders"), b"{not json")
            .await
            .unwrap();
        assert!(store.load_orders().await.is_empty());
    }

    #[tokio::test]
    async fn save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).await.unwrap();

        store.save_orders(&[order("Widget")]).await;
        store.save_orders(&[]).await;
        assert!(store.load_orders().await.is_empty());
    }

    #[tokio::test]
    async fn shipment_record_is_cleared_by_saving_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).await.unwrap();

        let mut record = ShipmentRecord::new(0, order("Widget"));
        record.phase = ShipmentPhase::ServerAcked;
        store.save_shipment(Some(&record)).await;
        assert_eq!(store.load_shipment().await, Some(record));

        assert!(store.save_shipment(None).await.is_persisted());
        assert_eq!(store.load_shipment().await, None);

        // Clearing an already-clear key is not a failure.
        assert!(store.save_shipment(None).await.is_persisted());
    }
}
