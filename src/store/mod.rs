//! Vector store boundary.
//!
//! Consumed as a black box by the fallback path: the engine only ever
//! inserts id+vector records and asks for nearest neighbors by distance.

pub mod memory;

use std::sync::Arc;

pub use memory::MemoryStore;

use crate::Result;

#[derive(Debug, Clone)]
pub struct VectorRecord {
   pub id:     String,
   pub vector: Vec<f32>,
}

/// Nearest neighbor returned by a store query. Distance is in `[0, 2]` for
/// cosine space; smaller is closer.
#[derive(Debug, Clone)]
pub struct Neighbor {
   pub id:       String,
   pub distance: f32,
}

#[async_trait::async_trait]
pub trait VectorStore: Send + Sync {
   async fn insert_batch(&self, records: Vec<VectorRecord>) -> Result<()>;

   async fn query(&self, vector: &[f32], limit: usize) -> Result<Vec<Neighbor>>;

   async fn is_empty(&self) -> Result<bool>;
}

#[async_trait::async_trait]
impl<T: VectorStore + ?Sized> VectorStore for Arc<T> {
   async fn insert_batch(&self, records: Vec<VectorRecord>) -> Result<()> {
      (**self).insert_batch(records).await
   }

   async fn query(&self, vector: &[f32], limit: usize) -> Result<Vec<Neighbor>> {
      (**self).query(vector, limit).await
   }

   async fn is_empty(&self) -> Result<bool> {
      (**self).is_empty().await
   }
}
