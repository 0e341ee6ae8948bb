//! Text embedding boundary for the vector fallback path.
//!
//! Queries and documents embed with different task hints; retrieval quality
//! depends on using the right one on each side.

pub mod gemini;

use std::sync::Arc;

pub use gemini::GeminiEmbedder;

use crate::Result;

#[async_trait::async_trait]
pub trait Embedder: Send + Sync {
   /// Embeds a search query.
   async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;
   /// Embeds document texts for indexing.
   async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

#[async_trait::async_trait]
impl<T: Embedder + ?Sized> Embedder for Arc<T> {
   async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
      (**self).embed_query(text).await
   }

   async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
      (**self).embed_documents(texts).await
   }
}
