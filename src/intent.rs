//! Query intent: keyword extraction, the local fallback heuristic, and
//! lenient normalization of extractor output.
//!
//! The extractor's JSON is normalized exactly once here; downstream code
//! only ever sees the typed [`QueryIntent`]/[`FilterSet`] shapes. Malformed
//! or missing fields degrade to "unset", never to an error.

use serde_json::Value;

use crate::types::{DeliveryMethod, FilterSet, QueryIntent};

/// Grammatical particle characters acting as token boundaries.
const PARTICLES: &[char] =
   &['は', 'が', 'を', 'に', 'で', 'と', 'の', 'も', 'へ', 'や', 'か', 'ら', '？', '?'];

const WEEKDAYS: &[&str] = &["月", "火", "水", "木", "金"];
const PERIODS: &[&str] = &["1", "2", "3", "4", "5", "6"];

pub const ONLINE_MARKER: &str = "オンライン";
pub const IN_PERSON_MARKER: &str = "対面";

/// Splits a raw query into lexical tokens on particle boundaries. Fragments
/// shorter than two characters are dropped; the rest are case-folded and
/// deduplicated (first occurrence wins, so output order is deterministic).
pub fn extract_keywords(query: &str) -> Vec<String> {
   let mut keywords: Vec<String> = Vec::new();

   for part in query.split(PARTICLES) {
      let part = part.trim();
      if part.chars().count() < 2 {
         continue;
      }

      let folded = part.to_lowercase();
      if !keywords.contains(&folded) {
         keywords.push(folded);
      }
   }

   keywords
}

/// Best-effort local intent when the external extractor is unavailable:
/// fixed substring checks for delivery, weekdays and periods, plus two
/// canned keyword expansions.
pub fn heuristic_intent(query: &str) -> QueryIntent {
   let mut filters = FilterSet::default();

   if query.contains(ONLINE_MARKER) {
      filters.delivery = Some(DeliveryMethod::Online);
   } else if query.contains(IN_PERSON_MARKER) {
      filters.delivery = Some(DeliveryMethod::InPerson);
   }

   for day in WEEKDAYS {
      if query.contains(day) {
         filters.weekdays.push((*day).to_string());
      }
   }

   let exclude = query.contains("以外");
   for period in PERIODS {
      if query.contains(&format!("{period}限")) {
         if exclude {
            filters.exclude_periods.push((*period).to_string());
         } else {
            filters.include_periods.push((*period).to_string());
         }
      }
   }

   let keywords: Vec<String> = if query.contains("外国語") && query.contains("英語以外") {
      ["ドイツ語", "フランス語", "中国語", "韓国語", "スペイン語"]
         .iter()
         .map(|s| (*s).to_string())
         .collect()
   } else if query.contains("プログラミング") {
      ["プログラミング", "情報", "コンピュータ"]
         .iter()
         .map(|s| (*s).to_string())
         .collect()
   } else {
      Vec::new()
   };

   QueryIntent { keywords, search_intent: query.to_string(), filters, ..Default::default() }
}

/// Normalizes raw extractor JSON into a [`QueryIntent`]. Every field is
/// optional; junk values are dropped per field.
pub fn intent_from_json(value: &Value, query: &str) -> QueryIntent {
   let filters = value.get("filters").map(filters_from_json).unwrap_or_default();

   QueryIntent {
      keywords: string_list(value.get("keywords")),
      related_terms: string_list(value.get("related_terms")),
      category_hint: token(value.get("category")).unwrap_or_default(),
      search_intent: query.to_string(),
      filters,
   }
}

fn filters_from_json(value: &Value) -> FilterSet {
   FilterSet {
      delivery:        token(value.get("delivery_method"))
         .and_then(|raw| DeliveryMethod::parse(&raw)),
      weekdays:        string_list(value.get("weekdays")),
      include_periods: string_list(value.get("include_periods")),
      exclude_periods: string_list(value.get("exclude_periods")),
      terms:           string_list(value.get("terms")),
      department:      token(value.get("department")),
      year_includes:   token(value.get("year_includes")),
   }
}

/// A scalar field as a non-empty trimmed token. Numbers are accepted since
/// extractors routinely emit `1` where `"1"` was asked for.
fn token(value: Option<&Value>) -> Option<String> {
   match value? {
      Value::String(s) => {
         let s = s.trim();
         (!s.is_empty()).then(|| s.to_string())
      },
      Value::Number(n) => Some(n.to_string()),
      _ => None,
   }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
   value
      .and_then(Value::as_array)
      .map(|items| items.iter().filter_map(|v| token(Some(v))).collect())
      .unwrap_or_default()
}
