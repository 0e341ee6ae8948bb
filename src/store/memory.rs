//! Brute-force in-memory vector store over cosine distance.
//!
//! Catalogs are small enough (thousands of courses) that a linear scan
//! beats maintaining an ANN structure for one search session.

use parking_lot::RwLock;

use crate::{
   Result,
   store::{Neighbor, VectorRecord, VectorStore},
};

#[derive(Default)]
pub struct MemoryStore {
   records: RwLock<Vec<VectorRecord>>,
}

impl MemoryStore {
   pub fn new() -> Self {
      Self::default()
   }
}

#[async_trait::async_trait]
impl VectorStore for MemoryStore {
   async fn insert_batch(&self, records: Vec<VectorRecord>) -> Result<()> {
      let mut guard = self.records.write();
      for record in records {
         if let Some(existing) = guard.iter_mut().find(|r| r.id == record.id) {
            *existing = record;
         } else {
            guard.push(record);
         }
      }
      Ok(())
   }

   async fn query(&self, vector: &[f32], limit: usize) -> Result<Vec<Neighbor>> {
      let guard = self.records.read();

      let mut neighbors: Vec<Neighbor> = guard
         .iter()
         .filter_map(|record| {
            cosine_distance(vector, &record.vector)
               .map(|distance| Neighbor { id: record.id.clone(), distance })
         })
         .collect();

      neighbors.sort_by(|a, b| {
         a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal)
      });
      neighbors.truncate(limit);

      Ok(neighbors)
   }

   async fn is_empty(&self) -> Result<bool> {
      Ok(self.records.read().is_empty())
   }
}

/// Cosine distance `1 - cos(a, b)`. `None` for dimension mismatches and
/// zero-norm vectors (placeholder embeddings never match anything).
fn cosine_distance(a: &[f32], b: &[f32]) -> Option<f32> {
   if a.len() != b.len() || a.is_empty() {
      return None;
   }

   let mut dot = 0.0_f32;
   let mut norm_a = 0.0_f32;
   let mut norm_b = 0.0_f32;

   for (x, y) in a.iter().zip(b.iter()) {
      dot += x * y;
      norm_a += x * x;
      norm_b += y * y;
   }

   if norm_a == 0.0 || norm_b == 0.0 {
      return None;
   }

   Some(1.0 - dot / (norm_a.sqrt() * norm_b.sqrt()))
}
