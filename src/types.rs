use serde::{Deserialize, Serialize};

use crate::{classify, config};

/// Classification of a course derived from its identifier prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryKind {
   GeneralEducation,
   Specialized,
   Graduate,
   Unclassified,
}

impl CategoryKind {
   /// Catalog-facing label, as printed in the search document.
   pub fn label(self) -> &'static str {
      match self {
         Self::GeneralEducation => "共通科目",
         Self::Specialized => "専門科目",
         Self::Graduate => "大学院科目",
         Self::Unclassified => "その他",
      }
   }
}

/// Caller-level restriction to one side of the common/specialized split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseTypeFilter {
   Specialized,
   Common,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryMethod {
   InPerson,
   Online,
}

impl DeliveryMethod {
   /// Parses the extractor's wire value. Unknown strings mean "unset", never
   /// an error.
   pub fn parse(raw: &str) -> Option<Self> {
      match raw.trim() {
         "対面" | "in-person" | "in_person" => Some(Self::InPerson),
         "オンライン" | "online" => Some(Self::Online),
         _ => None,
      }
   }

   pub fn label(self) -> &'static str {
      match self {
         Self::InPerson => "対面",
         Self::Online => "オンライン",
      }
   }
}

/// One catalog row as ingested - the column set of a syllabus export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseRecord {
   pub course_number:   String,
   pub course_name:     String,
   pub credits:         String,
   pub year_level:      String,
   pub term:            String,
   pub day_period:      String,
   pub classroom:       String,
   pub instructor:      String,
   pub overview:        String,
   pub delivery_method: String,
}

/// A course held read-only for the lifetime of a search session. Built once
/// from a [`CourseRecord`] at catalog load, never mutated by search.
#[derive(Debug, Clone, Serialize)]
pub struct Course {
   pub number:     String,
   pub name:       String,
   pub category:   String,
   pub kind:       CategoryKind,
   pub credits:    String,
   pub year_level: String,
   pub term:       String,
   pub day_period: String,
   pub classroom:  String,
   pub instructor: String,
   pub delivery:   String,
   /// Free-text search document (labelled fields + overview).
   #[serde(skip)]
   pub document:   String,
   #[serde(skip)]
   pub(crate) name_folded:     String,
   #[serde(skip)]
   pub(crate) document_folded: String,
   #[serde(skip)]
   pub(crate) category_folded: String,
}

impl Course {
   /// Builds a session course from an ingested record, deriving the
   /// classification and rendering the search document.
   pub fn from_record(record: CourseRecord) -> Self {
      let (category, kind) = classify::classify(&record.course_number);
      let document = document_text(&record, category, kind.label());

      Self {
         name_folded: record.course_name.to_lowercase(),
         document_folded: document.to_lowercase(),
         category_folded: category.to_lowercase(),
         number: record.course_number,
         name: record.course_name,
         category: category.to_string(),
         kind,
         credits: record.credits,
         year_level: record.year_level,
         term: record.term,
         day_period: record.day_period,
         classroom: record.classroom,
         instructor: record.instructor,
         delivery: record.delivery_method,
         document,
      }
   }

   pub fn is_common_by_category(&self) -> bool {
      classify::is_common_category(&self.category)
   }

   pub fn is_common_by_identifier(&self) -> bool {
      classify::is_common_identifier(&self.number)
   }

   pub fn is_common(&self) -> bool {
      self.is_common_by_category() || self.is_common_by_identifier()
   }

   pub fn is_graduate(&self) -> bool {
      classify::is_graduate_identifier(&self.number)
   }
}

/// Renders the free-text search document: labelled field lines plus the
/// overview when present.
fn document_text(record: &CourseRecord, category: &str, kind_label: &str) -> String {
   let mut parts = vec![
      format!("科目名: {}", record.course_name),
      format!("科目番号: {}", record.course_number),
      format!("分類: {category} ({kind_label})"),
      format!("単位: {}単位", record.credits),
      format!("対象年次: {}年次", record.year_level),
      format!("開講時期: {}", record.term),
      format!("曜時限: {}", record.day_period),
      format!("教室: {}", record.classroom),
      format!("担当教員: {}", record.instructor),
      format!("授業形態: {}", record.delivery_method),
   ];

   if !record.overview.is_empty() {
      parts.push(format!("授業概要: {}", record.overview));
   }

   parts.join("\n")
}

/// Structured filter predicate. Every field defaults to "unset"; an unset
/// field never eliminates a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
   pub delivery:        Option<DeliveryMethod>,
   pub weekdays:        Vec<String>,
   pub include_periods: Vec<String>,
   pub exclude_periods: Vec<String>,
   pub terms:           Vec<String>,
   pub department:      Option<String>,
   pub year_includes:   Option<String>,
}

impl FilterSet {
   pub fn is_empty(&self) -> bool {
      self.delivery.is_none()
         && self.weekdays.is_empty()
         && self.include_periods.is_empty()
         && self.exclude_periods.is_empty()
         && self.terms.is_empty()
         && self.department.is_none()
         && self.year_includes.is_none()
   }
}

/// Per-query intent: keywords plus filters, produced by the external
/// extractor or by the local heuristic fallback.
#[derive(Debug, Clone, Default)]
pub struct QueryIntent {
   pub keywords:      Vec<String>,
   pub related_terms: Vec<String>,
   pub category_hint: String,
   /// Restated search text, fed into the vector fallback query.
   pub search_intent: String,
   pub filters:       FilterSet,
}

impl QueryIntent {
   /// Case-folded expansion keywords (keywords + related terms).
   pub fn expanded_keywords(&self) -> Vec<String> {
      self
         .keywords
         .iter()
         .chain(self.related_terms.iter())
         .map(|k| k.to_lowercase())
         .collect()
   }
}

/// One ranked search output record.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
   pub course_id: String,
   pub course:    Course,
   /// 0.0 for lexical matches, similarity distance for vector matches.
   pub distance:  f32,
   pub score:     f32,
   pub reasons:   Vec<String>,
}

/// Parameters of one search call.
#[derive(Debug, Clone)]
pub struct SearchRequest {
   pub query:       String,
   pub category:    Option<String>,
   pub year:        Option<String>,
   pub course_type: Option<CourseTypeFilter>,
   pub limit:       usize,
   /// Whether to consult the intent extractor (query expansion).
   pub expand:      bool,
}

impl SearchRequest {
   pub fn new(query: impl Into<String>) -> Self {
      Self {
         query:       query.into(),
         category:    None,
         year:        None,
         course_type: None,
         limit:       config::PRIMARY_RESULTS,
         expand:      true,
      }
   }
}
