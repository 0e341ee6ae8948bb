//! Batch-embeds catalog documents into a vector store.
//!
//! Run once per session before the vector fallback can contribute; lexical
//! search works without it.

use crate::{
   Result,
   catalog::Catalog,
   config,
   embed::Embedder,
   store::{VectorRecord, VectorStore},
};

pub async fn index_catalog<E, S>(catalog: &Catalog, embedder: &E, store: &S) -> Result<usize>
where
   E: Embedder + Send + Sync,
   S: VectorStore + Send + Sync,
{
   let batch_size = config::embed_batch();
   let courses: Vec<_> = catalog.iter().collect();
   let mut indexed = 0;

   for batch in courses.chunks(batch_size) {
      let texts: Vec<String> = batch.iter().map(|c| c.document.clone()).collect();
      let embeddings = embedder.embed_documents(&texts).await?;

      let records: Vec<VectorRecord> = batch
         .iter()
         .zip(embeddings)
         .map(|(course, vector)| VectorRecord { id: course.number.clone(), vector })
         .collect();

      store.insert_batch(records).await?;
      indexed += batch.len();
      tracing::info!("indexed {indexed}/{} courses", catalog.len());
   }

   Ok(indexed)
}
