//! In-process object store used for local development and tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::store::{ObjectInfo, ObjectMetadata, ObjectStore, StoredObject};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    objects: RwLock<BTreeMap<String, StoredObject>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.objects.read().await.contains_key(key)
    }
}

fn etag_for(body: &[u8]) -> String {
    let digest = Sha256::digest(body);
    // R2 etags are quoted; keep the first 32 hex chars like an MD5-length tag.
    let hex = format!("{:x}", digest);
    format!("\"{}\"", &hex[..32])
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        metadata: &ObjectMetadata,
    ) -> StorageResult<()> {
        let object = StoredObject {
            key: key.to_string(),
            etag: Some(etag_for(&body)),
            last_modified: Some(chrono::Utc::now().timestamp_millis().max(0) as u64),
            metadata: metadata.clone(),
            body,
        };
        self.objects.write().await.insert(key.to_string(), object);
        Ok(())
    }

    async fn get_object(&self, key: &str) -> StorageResult<StoredObject> {
        self.objects
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(key))
    }

    async fn delete_object(&self, key: &str) -> StorageResult<()> {
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn list_objects(&self, prefix: &str, limit: Option<usize>) -> StorageResult<Vec<ObjectInfo>> {
        let objects = self.objects.read().await;
        let iter = objects
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, obj)| ObjectInfo {
                key: key.clone(),
                size: obj.body.len() as u64,
                last_modified: obj.last_modified,
            });

        Ok(match limit {
            Some(limit) => iter.take(limit).collect(),
            None => iter.collect(),
        })
    }

    async fn check_connectivity(&self) -> StorageResult<()> {
        Ok(())
    }
}
