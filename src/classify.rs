//! Course classification from identifier prefixes.
//!
//! Course identifiers encode their faculty in the first character: digits
//! mark common (general-education) courses, letters mark the specialized
//! faculties, and the two-character prefix `0A` marks graduate courses.

use crate::types::CategoryKind;

pub const UNCLASSIFIED_CATEGORY: &str = "その他";

/// Graduate courses carry this identifier prefix.
pub const GRADUATE_PREFIX: &str = "0A";

/// Categories exempt from caller category/year filtering.
const COMMON_CATEGORIES: &[&str] = &[
   "体育",
   "英語",
   "総合科目・学士基盤科目",
   "情報",
   "芸術",
   "自由科目",
   "教職・博物館",
   "初修外国語（独・中）",
   "初修外国語（仏・露・西）",
   "外国語",
];

/// Digit prefixes that mark common courses, required foreign languages and
/// teaching-credential courses.
const COMMON_IDENTIFIER_PREFIXES: &str = "1345689";

/// Identifier prefix table: first character (case-insensitive) to category
/// name.
const CATEGORY_TABLE: &[(char, &str)] = &[
   ('1', "総合科目・学士基盤科目"),
   ('2', "体育"),
   ('3', "英語"),
   ('A', "人文・文化学群"),
   ('B', "社会・国際学群"),
   ('C', "人間学群"),
   ('E', "生命環境学群"),
   ('F', "理工学群"),
   ('G', "情報学群"),
   ('H', "医学群"),
   ('W', "体育専門学群"),
   ('Y', "芸術専門学群"),
   ('V', "グローバル教育院"),
];

/// Maps a course identifier to its category name and kind. Total: unmapped
/// prefixes and empty identifiers classify as unclassified.
pub fn classify(identifier: &str) -> (&'static str, CategoryKind) {
   (category_of(identifier), kind_of(identifier))
}

pub fn category_of(identifier: &str) -> &'static str {
   let Some(first) = identifier.chars().next() else {
      return UNCLASSIFIED_CATEGORY;
   };
   let first = first.to_ascii_uppercase();

   CATEGORY_TABLE
      .iter()
      .find(|&&(prefix, _)| prefix == first)
      .map_or(UNCLASSIFIED_CATEGORY, |&(_, name)| name)
}

pub fn kind_of(identifier: &str) -> CategoryKind {
   if is_graduate_identifier(identifier) {
      return CategoryKind::Graduate;
   }

   match identifier.chars().next() {
      Some(c) if c.is_ascii_digit() => CategoryKind::GeneralEducation,
      Some(c) if c.is_ascii_alphabetic() => CategoryKind::Specialized,
      _ => CategoryKind::Unclassified,
   }
}

pub fn is_graduate_identifier(identifier: &str) -> bool {
   identifier.starts_with(GRADUATE_PREFIX)
}

pub fn is_common_category(category: &str) -> bool {
   COMMON_CATEGORIES.contains(&category)
}

pub fn is_common_identifier(identifier: &str) -> bool {
   identifier
      .chars()
      .next()
      .is_some_and(|c| COMMON_IDENTIFIER_PREFIXES.contains(c))
}

/// One row of the fixed category table, as shown by `coursegrep categories`.
#[derive(Debug, Clone, Copy)]
pub struct CategoryEntry {
   pub id:   &'static str,
   pub name: &'static str,
   pub kind: &'static str,
}

pub const CATEGORY_ENTRIES: &[CategoryEntry] = &[
   CategoryEntry { id: "1", name: "総合科目・学士基盤科目", kind: "共通科目" },
   CategoryEntry { id: "2", name: "体育", kind: "共通科目" },
   CategoryEntry { id: "3", name: "英語", kind: "共通科目" },
   CategoryEntry { id: "4", name: "初修外国語（独・中）", kind: "共通科目" },
   CategoryEntry { id: "5", name: "初修外国語（仏・露・西）", kind: "共通科目" },
   CategoryEntry { id: "6", name: "情報", kind: "共通科目" },
   CategoryEntry { id: "7", name: "芸術", kind: "共通科目" },
   CategoryEntry { id: "8", name: "自由科目", kind: "共通科目" },
   CategoryEntry { id: "9", name: "教職・博物館", kind: "共通科目" },
   CategoryEntry { id: "A", name: "人文・文化学群", kind: "専門科目" },
   CategoryEntry { id: "B", name: "社会・国際学群", kind: "専門科目" },
   CategoryEntry { id: "C", name: "人間学群", kind: "専門科目" },
   CategoryEntry { id: "E", name: "生命環境学群", kind: "専門科目" },
   CategoryEntry { id: "F", name: "理工学群", kind: "専門科目" },
   CategoryEntry { id: "G", name: "情報学群", kind: "専門科目" },
   CategoryEntry { id: "H", name: "医学群", kind: "専門科目" },
   CategoryEntry { id: "WT", name: "体育専門学群", kind: "専門科目" },
   CategoryEntry { id: "Y", name: "芸術専門学群", kind: "専門科目" },
   CategoryEntry { id: "V", name: "グローバル教育院", kind: "専門科目" },
];

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn classify_is_total() {
      for id in ["G123", "3001", "0A1234", "", "z999", "漢字", "?"] {
         let (category, _kind) = classify(id);
         assert!(!category.is_empty());
      }
   }

   #[test]
   fn graduate_prefix_wins_over_digit_rule() {
      assert_eq!(kind_of("0A1234"), CategoryKind::Graduate);
      assert!(is_graduate_identifier("0A1234"));
      assert!(!is_graduate_identifier("0B1234"));
      assert!(!is_graduate_identifier("A01234"));
   }

   #[test]
   fn digit_prefix_is_general_education() {
      assert_eq!(kind_of("3001"), CategoryKind::GeneralEducation);
      assert_eq!(kind_of("9123"), CategoryKind::GeneralEducation);
   }

   #[test]
   fn alpha_prefix_is_specialized() {
      assert_eq!(kind_of("G123"), CategoryKind::Specialized);
      assert_eq!(kind_of("g123"), CategoryKind::Specialized);
   }

   #[test]
   fn empty_identifier_is_unclassified() {
      assert_eq!(kind_of(""), CategoryKind::Unclassified);
      assert_eq!(category_of(""), UNCLASSIFIED_CATEGORY);
   }

   #[test]
   fn category_lookup_is_case_insensitive() {
      assert_eq!(category_of("G101"), "情報学群");
      assert_eq!(category_of("g101"), "情報学群");
      assert_eq!(category_of("3001"), "英語");
      assert_eq!(category_of("Z001"), UNCLASSIFIED_CATEGORY);
   }

   #[test]
   fn common_detection() {
      assert!(is_common_category("英語"));
      assert!(is_common_category("外国語"));
      assert!(!is_common_category("情報学群"));

      assert!(is_common_identifier("3001"));
      assert!(is_common_identifier("9001"));
      assert!(!is_common_identifier("2001"));
      assert!(!is_common_identifier("G101"));
      assert!(!is_common_identifier(""));
   }
}
