//! LLM collaborator boundaries: query-intent extraction and course-name
//! suggestion.
//!
//! Both services are best-effort. The engine substitutes the local
//! heuristic when extraction fails and degrades to the primary path alone
//! when suggestion fails; neither failure is ever fatal to a search.

pub mod gemini;

use std::sync::Arc;

pub use gemini::GeminiClient;

use crate::{Result, types::QueryIntent};

/// Extracts a structured [`QueryIntent`] from a raw query.
#[async_trait::async_trait]
pub trait IntentExtractor: Send + Sync {
   async fn extract(&self, query: &str) -> Result<QueryIntent>;
}

/// Suggests course names likely to answer the query, given a sample of
/// catalog names. Ordered, at most ten.
#[async_trait::async_trait]
pub trait Suggester: Send + Sync {
   async fn suggest(&self, query: &str, sample_names: &[&str]) -> Result<Vec<String>>;
}

#[async_trait::async_trait]
impl<T: IntentExtractor + ?Sized> IntentExtractor for Arc<T> {
   async fn extract(&self, query: &str) -> Result<QueryIntent> {
      (**self).extract(query).await
   }
}

#[async_trait::async_trait]
impl<T: Suggester + ?Sized> Suggester for Arc<T> {
   async fn suggest(&self, query: &str, sample_names: &[&str]) -> Result<Vec<String>> {
      (**self).suggest(query, sample_names).await
   }
}
