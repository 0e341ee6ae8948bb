//! Read-only course catalog snapshot.
//!
//! A [`Catalog`] is built once from ingested records and handed by reference
//! into every ranking call. Search never mutates it, so one snapshot can
//! serve any number of concurrent queries.

use std::{
   collections::{BTreeMap, HashMap},
   path::Path,
};

use crate::{
   Result,
   error::Error,
   types::{Course, CourseRecord},
};

pub struct Catalog {
   courses: Vec<Course>,
   by_id:   HashMap<String, usize>,
}

impl Catalog {
   /// Builds the snapshot. Records with an empty identifier are skipped and
   /// duplicate identifiers keep the first occurrence.
   pub fn from_records(records: Vec<CourseRecord>) -> Self {
      let mut courses = Vec::with_capacity(records.len());
      let mut by_id = HashMap::with_capacity(records.len());

      for record in records {
         if record.course_number.is_empty() {
            continue;
         }
         if by_id.contains_key(&record.course_number) {
            continue;
         }

         let course = Course::from_record(record);
         by_id.insert(course.number.clone(), courses.len());
         courses.push(course);
      }

      Self { courses, by_id }
   }

   /// Loads a catalog from a JSON array of course records.
   pub fn load_json(path: &Path) -> Result<Self> {
      let content = std::fs::read_to_string(path)?;
      let records: Vec<CourseRecord> = serde_json::from_str(&content)?;

      let catalog = Self::from_records(records);
      if catalog.is_empty() {
         return Err(Error::Catalog(format!("no usable course records in {}", path.display())));
      }

      Ok(catalog)
   }

   pub fn get(&self, id: &str) -> Option<&Course> {
      self.by_id.get(id).map(|&idx| &self.courses[idx])
   }

   pub fn iter(&self) -> impl Iterator<Item = &Course> {
      self.courses.iter()
   }

   pub fn len(&self) -> usize {
      self.courses.len()
   }

   pub fn is_empty(&self) -> bool {
      self.courses.is_empty()
   }

   /// Course names in catalog order, used as the suggester's sample list.
   pub fn course_names(&self) -> Vec<&str> {
      self
         .courses
         .iter()
         .map(|c| c.name.as_str())
         .filter(|n| !n.is_empty())
         .collect()
   }

   pub fn category_counts(&self) -> BTreeMap<&str, usize> {
      let mut counts = BTreeMap::new();
      for course in &self.courses {
         *counts.entry(course.category.as_str()).or_insert(0) += 1;
      }
      counts
   }
}
