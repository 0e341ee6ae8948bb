//! Weighted additive scoring with human-readable match reasons.
//!
//! All contributions are summed; there is no early exit. Matching is plain
//! case-folded substring containment throughout - no tokenization, no
//! fuzziness. The weights below are part of the scoring contract.

use crate::types::{Course, FilterSet};

pub const EXPANDED_NAME_WEIGHT: f32 = 5.0;
pub const EXPANDED_BODY_WEIGHT: f32 = 2.0;
pub const ORIGINAL_NAME_WEIGHT: f32 = 5.0;
/// Kept low to suppress incidental body matches from raw query fragments.
pub const ORIGINAL_BODY_WEIGHT: f32 = 0.3;
/// Flat bonus per schedule-filter kind present, independent of narrowing.
pub const FILTER_BONUS: f32 = 1.0;
pub const CATEGORY_HINT_WEIGHT: f32 = 1.5;
/// Floor for keyword-less filter-only queries, so they still rank.
pub const FILTER_FLOOR: f32 = 1.0;

/// Scores one course. Returns `None` when the cumulative score is zero -
/// zero-score courses are never emitted as candidates.
pub fn score(
   course: &Course,
   original_keywords: &[String],
   expanded_keywords: &[String],
   category_hint: &str,
   filters: &FilterSet,
) -> Option<(f32, Vec<String>)> {
   let mut total = 0.0_f32;
   let mut reasons = Vec::new();

   for keyword in expanded_keywords {
      if course.name_folded.contains(keyword.as_str()) {
         total += EXPANDED_NAME_WEIGHT;
         reasons.push(format!("科目名に'{keyword}'"));
      } else if course.document_folded.contains(keyword.as_str()) {
         total += EXPANDED_BODY_WEIGHT;
         reasons.push(format!("内容に'{keyword}'"));
      }
   }

   for keyword in original_keywords {
      if course.name_folded.contains(keyword.as_str()) {
         total += ORIGINAL_NAME_WEIGHT;
         reasons.push(format!("科目名に'{keyword}'"));
      } else if course.document_folded.contains(keyword.as_str()) {
         total += ORIGINAL_BODY_WEIGHT;
         reasons.push(format!("内容に'{keyword}'"));
      }
   }

   if let Some(delivery) = filters.delivery {
      total += FILTER_BONUS;
      reasons.push(format!("授業形態:{}", delivery.label()));
   }
   if !filters.weekdays.is_empty() {
      total += FILTER_BONUS;
      reasons.push(format!("曜日:{}", filters.weekdays.join(",")));
   }
   if !filters.include_periods.is_empty() {
      total += FILTER_BONUS;
      reasons.push(format!("時限:{}", filters.include_periods.join(",")));
   }

   if !category_hint.is_empty() {
      let hint = category_hint.to_lowercase();
      if course.category_folded.contains(&hint) || course.document_folded.contains(&hint) {
         total += CATEGORY_HINT_WEIGHT;
         reasons.push(format!("カテゴリ:{hint}"));
      }
   }

   if total == 0.0
      && !filters.is_empty()
      && original_keywords.is_empty()
      && expanded_keywords.is_empty()
   {
      total = FILTER_FLOOR;
   }

   (total > 0.0).then_some((total, reasons))
}

#[cfg(test)]
mod tests {
   use super::*;
   use crate::types::{CourseRecord, DeliveryMethod};

   fn course(name: &str, overview: &str) -> Course {
      Course::from_record(CourseRecord {
         course_number: "G101".to_string(),
         course_name: name.to_string(),
         overview: overview.to_string(),
         ..Default::default()
      })
   }

   fn kw(words: &[&str]) -> Vec<String> {
      words.iter().map(|w| (*w).to_string()).collect()
   }

   #[test]
   fn name_match_outscores_body_match() {
      let in_name = course("プログラミング入門", "");
      let in_body = course("計算機科学", "プログラミングを学ぶ");
      let keywords = kw(&["プログラミング"]);

      let (name_score, _) =
         score(&in_name, &[], &keywords, "", &FilterSet::default()).unwrap();
      let (body_score, _) =
         score(&in_body, &[], &keywords, "", &FilterSet::default()).unwrap();

      assert_eq!(name_score, EXPANDED_NAME_WEIGHT);
      assert_eq!(body_score, EXPANDED_BODY_WEIGHT);
      assert!(name_score >= body_score);
   }

   #[test]
   fn original_body_match_is_weak() {
      let in_body = course("計算機科学", "情報理論を扱う");

      let (total, reasons) =
         score(&in_body, &kw(&["情報理論"]), &[], "", &FilterSet::default()).unwrap();
      assert_eq!(total, ORIGINAL_BODY_WEIGHT);
      assert_eq!(reasons, vec!["内容に'情報理論'"]);
   }

   #[test]
   fn matching_is_case_folded() {
      let c = course("Python Programming", "");
      let (total, _) = score(&c, &kw(&["python"]), &[], "", &FilterSet::default()).unwrap();
      assert_eq!(total, ORIGINAL_NAME_WEIGHT);
   }

   #[test]
   fn filter_bonus_per_kind() {
      let c = course("体育実技", "");
      let filters = FilterSet {
         delivery: Some(DeliveryMethod::InPerson),
         weekdays: vec!["月".to_string()],
         include_periods: vec!["1".to_string(), "2".to_string()],
         ..Default::default()
      };

      let (total, reasons) = score(&c, &[], &[], "", &filters).unwrap();
      assert_eq!(total, 3.0 * FILTER_BONUS);
      assert_eq!(reasons, vec!["授業形態:対面", "曜日:月", "時限:1,2"]);
   }

   #[test]
   fn category_hint_matches_category_or_body() {
      let c = course("機械学習", "");
      let (total, reasons) = score(&c, &[], &[], "情報", &FilterSet::default()).unwrap();
      assert_eq!(total, CATEGORY_HINT_WEIGHT);
      assert_eq!(reasons, vec!["カテゴリ:情報"]);
   }

   #[test]
   fn filter_only_query_gets_floor_score() {
      let c = course("体育実技", "");
      let filters = FilterSet { terms: vec!["春AB".to_string()], ..Default::default() };

      let (total, reasons) = score(&c, &[], &[], "", &filters).unwrap();
      assert_eq!(total, FILTER_FLOOR);
      assert!(reasons.is_empty());
   }

   #[test]
   fn zero_score_is_excluded() {
      let c = course("体育実技", "");
      assert!(score(&c, &kw(&["量子力学"]), &[], "", &FilterSet::default()).is_none());
      assert!(score(&c, &[], &[], "", &FilterSet::default()).is_none());
   }

   #[test]
   fn reasons_follow_evaluation_order() {
      let c = course("情報社会論", "データとプログラミングの概説");
      let filters = FilterSet { weekdays: vec!["金".to_string()], ..Default::default() };

      let (_, reasons) =
         score(&c, &kw(&["情報社会"]), &kw(&["プログラミング"]), "情報", &filters).unwrap();
      assert_eq!(
         reasons,
         vec!["内容に'プログラミング'", "科目名に'情報社会'", "曜日:金", "カテゴリ:情報"]
      );
   }
}
