use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use crate::catalog::Catalog;

pub fn execute(catalog_path: &Path, json: bool) -> Result<()> {
   let catalog = Catalog::load_json(catalog_path)
      .with_context(|| format!("failed to load catalog from {}", catalog_path.display()))?;

   let counts = catalog.category_counts();

   if json {
      let payload = serde_json::json!({
         "total_courses": catalog.len(),
         "categories": counts,
      });
      println!("{}", serde_json::to_string(&payload)?);
      return Ok(());
   }

   println!("{}", style(format!("{} courses", catalog.len())).bold());
   println!();

   let mut sorted: Vec<_> = counts.into_iter().collect();
   sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

   for (category, count) in sorted {
      println!("  {:>5}  {category}", style(count).cyan());
   }

   Ok(())
}
