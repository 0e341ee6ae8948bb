//! Filter predicate evaluation.
//!
//! Five stages, in order; a course passes iff it survives all of them.
//! Common courses (by category or digit identifier) are exempt from the
//! caller's category and year stages but never from the advanced filters.

use crate::{
   classify,
   intent::{IN_PERSON_MARKER, ONLINE_MARKER},
   types::{Course, CourseTypeFilter, DeliveryMethod, FilterSet},
};

/// Caller-level filters accompanying a search request.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallerFilters<'a> {
   pub category:    Option<&'a str>,
   pub year:        Option<&'a str>,
   pub course_type: Option<CourseTypeFilter>,
}

pub fn passes(course: &Course, caller: CallerFilters<'_>, advanced: &FilterSet) -> bool {
   // Graduate courses are hidden unless the caller asks for the graduate
   // category outright, regardless of any other filter.
   if course.is_graduate() && caller.category != Some(classify::GRADUATE_PREFIX) {
      return false;
   }

   let common = course.is_common();

   match caller.course_type {
      Some(CourseTypeFilter::Specialized) if common => return false,
      Some(CourseTypeFilter::Common) if !common => return false,
      _ => {},
   }

   if let Some(category) = caller.category
      && !common
      && !matches_category(course, category)
   {
      return false;
   }

   if let Some(year) = caller.year
      && !common
      && !course.year_level.contains(year)
   {
      return false;
   }

   passes_advanced(course, advanced)
}

/// Category filter matches on the category name or, failing that, on a
/// case-insensitive identifier prefix.
fn matches_category(course: &Course, filter: &str) -> bool {
   course.category.contains(filter)
      || course.number.to_uppercase().starts_with(&filter.to_uppercase())
}

fn passes_advanced(course: &Course, filters: &FilterSet) -> bool {
   match filters.delivery {
      Some(DeliveryMethod::Online) => {
         if !course.delivery.contains(ONLINE_MARKER) {
            return false;
         }
      },
      // A course whose delivery text carries neither marker passes the
      // in-person filter; only explicit online-without-in-person text is
      // rejected.
      Some(DeliveryMethod::InPerson) => {
         if !course.delivery.contains(IN_PERSON_MARKER) && course.delivery.contains(ONLINE_MARKER)
         {
            return false;
         }
      },
      None => {},
   }

   if !filters.weekdays.is_empty()
      && !filters.weekdays.iter().any(|day| course.day_period.contains(day.as_str()))
   {
      return false;
   }

   if !filters.include_periods.is_empty()
      && !filters
         .include_periods
         .iter()
         .any(|period| course.day_period.contains(period.as_str()))
   {
      return false;
   }

   if filters
      .exclude_periods
      .iter()
      .any(|period| course.day_period.contains(period.as_str()))
   {
      return false;
   }

   // Bidirectional containment handles abbreviated vs. expanded term
   // notations ("春AB" vs "春ABC").
   if !filters.terms.is_empty()
      && !filters
         .terms
         .iter()
         .any(|term| course.term.contains(term.as_str()) || term.contains(course.term.as_str()))
   {
      return false;
   }

   if let Some(department) = &filters.department
      && !course.document.contains(department.as_str())
      && !course.category.contains(department.as_str())
   {
      return false;
   }

   if let Some(year) = &filters.year_includes
      && !course.year_level.contains(year.as_str())
   {
      return false;
   }

   true
}

#[cfg(test)]
mod tests {
   use super::*;
   use crate::types::CourseRecord;

   fn course(number: &str) -> Course {
      Course::from_record(CourseRecord {
         course_number: number.to_string(),
         course_name: "テスト科目".to_string(),
         year_level: "1・2".to_string(),
         term: "春AB".to_string(),
         day_period: "月1,2".to_string(),
         delivery_method: "対面".to_string(),
         ..Default::default()
      })
   }

   fn caller(category: Option<&'static str>) -> CallerFilters<'static> {
      CallerFilters { category, ..Default::default() }
   }

   #[test]
   fn graduate_hidden_unless_requested() {
      let grad = course("0A1234");
      assert!(!passes(&grad, CallerFilters::default(), &FilterSet::default()));
      assert!(!passes(&grad, caller(Some("G")), &FilterSet::default()));
      assert!(passes(&grad, caller(Some("0A")), &FilterSet::default()));
   }

   #[test]
   fn course_type_filter_splits_common_and_specialized() {
      let common = course("3001");
      let specialized = course("G101");

      let want_specialized =
         CallerFilters { course_type: Some(CourseTypeFilter::Specialized), ..Default::default() };
      assert!(!passes(&common, want_specialized, &FilterSet::default()));
      assert!(passes(&specialized, want_specialized, &FilterSet::default()));

      let want_common =
         CallerFilters { course_type: Some(CourseTypeFilter::Common), ..Default::default() };
      assert!(passes(&common, want_common, &FilterSet::default()));
      assert!(!passes(&specialized, want_common, &FilterSet::default()));
   }

   #[test]
   fn category_filter_matches_name_or_identifier_prefix() {
      let specialized = course("G101");
      assert!(passes(&specialized, caller(Some("情報")), &FilterSet::default()));
      assert!(passes(&specialized, caller(Some("g")), &FilterSet::default()));
      assert!(!passes(&specialized, caller(Some("医学")), &FilterSet::default()));
   }

   #[test]
   fn common_courses_exempt_from_category_and_year() {
      let common = course("3001");
      assert!(passes(&common, caller(Some("医学")), &FilterSet::default()));

      let wrong_year = CallerFilters { year: Some("4"), ..Default::default() };
      assert!(passes(&common, wrong_year, &FilterSet::default()));

      let specialized = course("G101");
      assert!(!passes(&specialized, wrong_year, &FilterSet::default()));
      let right_year = CallerFilters { year: Some("1"), ..Default::default() };
      assert!(passes(&specialized, right_year, &FilterSet::default()));
   }

   #[test]
   fn online_filter_requires_marker() {
      let in_person = course("G101");
      let filters = FilterSet { delivery: Some(DeliveryMethod::Online), ..Default::default() };
      assert!(!passes(&in_person, CallerFilters::default(), &filters));

      let mut online = course("G102");
      online.delivery = "オンデマンド(オンライン)".to_string();
      assert!(passes(&online, CallerFilters::default(), &filters));
   }

   #[test]
   fn in_person_filter_accepts_ambiguous_delivery() {
      let filters = FilterSet { delivery: Some(DeliveryMethod::InPerson), ..Default::default() };

      let mut unmarked = course("G101");
      unmarked.delivery = String::new();
      assert!(passes(&unmarked, CallerFilters::default(), &filters));

      let mut online_only = course("G102");
      online_only.delivery = "オンライン".to_string();
      assert!(!passes(&online_only, CallerFilters::default(), &filters));

      let mut hybrid = course("G103");
      hybrid.delivery = "対面・オンライン併用".to_string();
      assert!(passes(&hybrid, CallerFilters::default(), &filters));
   }

   #[test]
   fn weekday_and_period_filters() {
      let monday = course("G101"); // 月1,2

      let filters = FilterSet { weekdays: vec!["月".to_string()], ..Default::default() };
      assert!(passes(&monday, CallerFilters::default(), &filters));

      let filters = FilterSet { weekdays: vec!["火".to_string()], ..Default::default() };
      assert!(!passes(&monday, CallerFilters::default(), &filters));

      let filters = FilterSet { include_periods: vec!["2".to_string()], ..Default::default() };
      assert!(passes(&monday, CallerFilters::default(), &filters));

      let filters = FilterSet { exclude_periods: vec!["1".to_string()], ..Default::default() };
      assert!(!passes(&monday, CallerFilters::default(), &filters));
   }

   #[test]
   fn term_filter_is_bidirectional() {
      let spring = course("G101"); // 春AB

      let filters = FilterSet { terms: vec!["春A".to_string()], ..Default::default() };
      assert!(passes(&spring, CallerFilters::default(), &filters));

      let filters = FilterSet { terms: vec!["春ABC".to_string()], ..Default::default() };
      assert!(passes(&spring, CallerFilters::default(), &filters));

      let filters = FilterSet { terms: vec!["秋AB".to_string()], ..Default::default() };
      assert!(!passes(&spring, CallerFilters::default(), &filters));
   }

   #[test]
   fn department_filter_checks_body_and_category() {
      let specialized = course("G101");

      let filters =
         FilterSet { department: Some("情報学群".to_string()), ..Default::default() };
      assert!(passes(&specialized, CallerFilters::default(), &filters));

      let filters =
         FilterSet { department: Some("生物資源".to_string()), ..Default::default() };
      assert!(!passes(&specialized, CallerFilters::default(), &filters));
   }

   #[test]
   fn year_includes_filter() {
      let first_year = course("G101"); // 1・2

      let filters = FilterSet { year_includes: Some("2".to_string()), ..Default::default() };
      assert!(passes(&first_year, CallerFilters::default(), &filters));

      let filters = FilterSet { year_includes: Some("4".to_string()), ..Default::default() };
      assert!(!passes(&first_year, CallerFilters::default(), &filters));
   }

   #[test]
   fn adding_constraints_never_grows_the_pass_set() {
      let courses = [course("G101"), course("3001"), course("F201"), course("0A100")];

      let loose = FilterSet { weekdays: vec!["月".to_string()], ..Default::default() };
      let tight = FilterSet {
         weekdays: vec!["月".to_string()],
         include_periods: vec!["1".to_string()],
         terms: vec!["春AB".to_string()],
         ..Default::default()
      };

      let pass_loose: Vec<_> = courses
         .iter()
         .filter(|c| passes(c, CallerFilters::default(), &loose))
         .collect();
      let pass_tight: Vec<_> = courses
         .iter()
         .filter(|c| passes(c, CallerFilters::default(), &tight))
         .collect();

      assert!(pass_tight.len() <= pass_loose.len());
      for c in &pass_tight {
         assert!(pass_loose.iter().any(|l| l.number == c.number));
      }
   }
}
