use anyhow::Result;
use console::style;

use crate::classify;

pub fn execute() -> Result<()> {
   println!("{}", style("Category table:").bold());
   println!();

   for entry in classify::CATEGORY_ENTRIES {
      println!("  {:<3} {} {}", style(entry.id).cyan(), entry.name, style(entry.kind).dim());
   }

   Ok(())
}
