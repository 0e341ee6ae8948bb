//! Two-path result merging.

use std::collections::HashSet;

use crate::{config, types::ScoredCandidate};

/// Merges the primary (full-query) list with the suggested-name list,
/// deduplicating by course identifier. Primary candidates win collisions
/// and keep their sorted order, capped at [`config::PRIMARY_RESULTS`];
/// suggested candidates follow in arrival order until
/// [`config::SUGGESTED_RESULTS`] of them have been added. The output is not
/// re-sorted by score: source priority is the contract.
pub fn merge_two_path(
   primary: Vec<ScoredCandidate>,
   suggested: Vec<ScoredCandidate>,
) -> Vec<ScoredCandidate> {
   let mut seen: HashSet<String> = HashSet::new();
   let mut merged = Vec::with_capacity(primary.len().min(config::PRIMARY_RESULTS));

   for candidate in primary {
      if merged.len() >= config::PRIMARY_RESULTS {
         break;
      }
      if seen.insert(candidate.course_id.clone()) {
         merged.push(candidate);
      }
   }

   let mut added = 0;
   for candidate in suggested {
      if added >= config::SUGGESTED_RESULTS {
         break;
      }
      if seen.insert(candidate.course_id.clone()) {
         merged.push(candidate);
         added += 1;
      }
   }

   merged
}
