pub mod filter;
pub mod merge;
pub mod scoring;

use std::{cmp::Ordering, collections::HashSet, sync::Arc};

use rayon::prelude::*;

use crate::{
   Result,
   catalog::Catalog,
   config,
   embed::Embedder,
   intent,
   llm::{IntentExtractor, Suggester},
   store::VectorStore,
   types::{QueryIntent, ScoredCandidate, SearchRequest},
};
use filter::CallerFilters;

pub const VECTOR_MATCH_REASON: &str = "ベクトル類似度";

/// Hybrid search engine. Holds the external collaborators; the course
/// catalog is handed into every call by reference, never owned or mutated.
#[derive(Default)]
pub struct SearchEngine {
   intent_extractor: Option<Arc<dyn IntentExtractor>>,
   suggester:        Option<Arc<dyn Suggester>>,
   embedder:         Option<Arc<dyn Embedder>>,
   store:            Option<Arc<dyn VectorStore>>,
}

impl SearchEngine {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn with_intent_extractor(mut self, extractor: Arc<dyn IntentExtractor>) -> Self {
      self.intent_extractor = Some(extractor);
      self
   }

   pub fn with_suggester(mut self, suggester: Arc<dyn Suggester>) -> Self {
      self.suggester = Some(suggester);
      self
   }

   pub fn with_vector_fallback(
      mut self,
      embedder: Arc<dyn Embedder>,
      store: Arc<dyn VectorStore>,
   ) -> Self {
      self.embedder = Some(embedder);
      self.store = Some(store);
      self
   }

   /// Standalone search: one lexical pass, topped up from the vector store
   /// when it comes up short.
   pub async fn search(
      &self,
      catalog: &Catalog,
      request: &SearchRequest,
   ) -> Result<Vec<ScoredCandidate>> {
      let intent = self.resolve_intent(&request.query, request.expand).await;
      let original_keywords = intent::extract_keywords(&request.query);
      let caller = caller_filters(request);

      let mut results = rank(catalog, &original_keywords, &intent, caller, request.limit);
      tracing::debug!("lexical pass: {} results for {:?}", results.len(), request.query);

      if results.len() < request.limit {
         match self.vector_fallback(catalog, request, &intent, &results).await {
            Ok(extra) if !extra.is_empty() => {
               results.extend(extra);
               sort_by_score(&mut results);
               results.truncate(request.limit);
            },
            Ok(_) => {},
            Err(e) => {
               tracing::warn!("vector fallback failed, returning lexical results: {e}");
            },
         }
      }

      Ok(results)
   }

   /// Two-path search: the primary full-query pass merged with per-name
   /// passes over externally suggested course names. Caps are fixed by
   /// [`config`]; the suggested path runs only with expansion enabled.
   pub async fn search_two_path(
      &self,
      catalog: &Catalog,
      request: &SearchRequest,
   ) -> Result<Vec<ScoredCandidate>> {
      let original_keywords = intent::extract_keywords(&request.query);
      let caller = caller_filters(request);
      let sample_names = catalog.course_names();

      // Independent round-trips with no ordering dependency.
      let (intent, suggested_names) = tokio::join!(
         self.resolve_intent(&request.query, request.expand),
         async {
            if request.expand {
               self.suggest_names(&request.query, &sample_names).await
            } else {
               Vec::new()
            }
         },
      );

      let primary_limit = if request.expand {
         config::PRIMARY_RESULTS
      } else {
         config::PRIMARY_RESULTS_PLAIN
      };
      let primary = rank(catalog, &original_keywords, &intent, caller, primary_limit);
      tracing::debug!("primary path: {} results", primary.len());

      // Per-name passes are CPU-bound and independent; the order-preserving
      // collect keeps merge order deterministic regardless of scheduling.
      // Expansion stays off here, so caller filters apply but advanced
      // filters are empty.
      let suggested: Vec<ScoredCandidate> = suggested_names
         .par_iter()
         .map(|name| {
            let name_keywords = intent::extract_keywords(name);
            let name_intent =
               QueryIntent { search_intent: name.clone(), ..Default::default() };
            rank(catalog, &name_keywords, &name_intent, caller, config::PER_NAME_RESULTS)
         })
         .collect::<Vec<_>>()
         .into_iter()
         .flatten()
         .collect();
      tracing::debug!("suggested path: {} results", suggested.len());

      Ok(merge::merge_two_path(primary, suggested))
   }

   /// External extractor when expansion is on, local heuristic when it is
   /// missing or fails. Expansion off means an empty intent: raw-query
   /// keywords only, no advanced filters.
   async fn resolve_intent(&self, query: &str, expand: bool) -> QueryIntent {
      if !expand {
         return QueryIntent { search_intent: query.to_string(), ..Default::default() };
      }

      if let Some(extractor) = &self.intent_extractor {
         match extractor.extract(query).await {
            Ok(intent) => return intent,
            Err(e) => tracing::warn!("intent extraction failed, using heuristic: {e}"),
         }
      }

      intent::heuristic_intent(query)
   }

   async fn suggest_names(&self, query: &str, sample_names: &[&str]) -> Vec<String> {
      let Some(suggester) = &self.suggester else {
         return Vec::new();
      };

      match suggester.suggest(query, sample_names).await {
         Ok(names) => names.into_iter().take(config::SUGGESTION_LIMIT).collect(),
         Err(e) => {
            tracing::warn!("name suggestion failed, continuing without: {e}");
            Vec::new()
         },
      }
   }

   async fn vector_fallback(
      &self,
      catalog: &Catalog,
      request: &SearchRequest,
      intent: &QueryIntent,
      existing: &[ScoredCandidate],
   ) -> Result<Vec<ScoredCandidate>> {
      let (Some(embedder), Some(store)) = (&self.embedder, &self.store) else {
         return Ok(Vec::new());
      };

      let supplement = supplementary_query(&request.query, intent);
      let vector = embedder.embed_query(&supplement).await?;
      let neighbors = store.query(&vector, request.limit * 2).await?;

      let caller = caller_filters(request);
      let seen: HashSet<&str> = existing.iter().map(|c| c.course_id.as_str()).collect();

      let mut extra = Vec::new();
      for neighbor in neighbors {
         // Lexical results are never overwritten by similarity scores.
         if seen.contains(neighbor.id.as_str()) {
            continue;
         }
         let Some(course) = catalog.get(&neighbor.id) else {
            continue;
         };
         // The filter contract holds on this path too: a constraint the
         // lexical pass enforced must not resurface via similarity.
         if !filter::passes(course, caller, &intent.filters) {
            continue;
         }

         extra.push(ScoredCandidate {
            course_id: neighbor.id,
            course:    course.clone(),
            distance:  neighbor.distance,
            score:     1.0 - neighbor.distance,
            reasons:   vec![VECTOR_MATCH_REASON.to_string()],
         });
      }

      Ok(extra)
   }
}

/// One lexical ranking pass: filter first (fast reject), score survivors,
/// stable-sort descending so ties keep catalog order, truncate.
pub fn rank(
   catalog: &Catalog,
   original_keywords: &[String],
   intent: &QueryIntent,
   caller: CallerFilters<'_>,
   limit: usize,
) -> Vec<ScoredCandidate> {
   let expanded_keywords = intent.expanded_keywords();

   let mut scored: Vec<(f32, Vec<String>, &crate::types::Course)> = Vec::new();
   for course in catalog.iter() {
      if !filter::passes(course, caller, &intent.filters) {
         continue;
      }

      if let Some((score, reasons)) = scoring::score(
         course,
         original_keywords,
         &expanded_keywords,
         &intent.category_hint,
         &intent.filters,
      ) {
         scored.push((score, reasons, course));
      }
   }

   scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
   scored.truncate(limit);

   scored
      .into_iter()
      .map(|(score, reasons, course)| ScoredCandidate {
         course_id: course.number.clone(),
         course: course.clone(),
         distance: 0.0,
         score,
         reasons,
      })
      .collect()
}

fn caller_filters(request: &SearchRequest) -> CallerFilters<'_> {
   CallerFilters {
      category:    request.category.as_deref(),
      year:        request.year.as_deref(),
      course_type: request.course_type,
   }
}

fn sort_by_score(candidates: &mut [ScoredCandidate]) {
   candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

/// Free-text query for the vector store: raw query, restated intent and
/// extracted keywords concatenated.
fn supplementary_query(query: &str, intent: &QueryIntent) -> String {
   let mut parts = vec![query.to_string()];
   if !intent.search_intent.is_empty() && intent.search_intent != query {
      parts.push(intent.search_intent.clone());
   }
   parts.extend(intent.keywords.iter().cloned());
   parts.join(" ")
}
