use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use coursegrep::commands;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "coursegrep", version, about = "Hybrid search over university course catalogs")]
struct Cli {
   #[command(subcommand)]
   command: Command,
}

#[derive(Subcommand)]
enum Command {
   /// Search a course catalog
   Search {
      /// Natural-language query
      query: String,

      /// Path to the catalog JSON (array of course records)
      #[arg(short, long, env = "COURSEGREP_CATALOG")]
      catalog: PathBuf,

      /// Category filter (faculty name fragment or identifier prefix)
      #[arg(long)]
      category: Option<String>,

      /// Year filter (e.g. "1")
      #[arg(long)]
      year: Option<String>,

      /// Course type filter: "specialized" or "common"
      #[arg(long = "type")]
      course_type: Option<String>,

      /// Maximum number of results
      #[arg(short, long, default_value_t = 15)]
      max: usize,

      /// Merge in a second pass over LLM-suggested course names
      #[arg(long)]
      two_path: bool,

      /// Skip LLM query expansion (local heuristics only)
      #[arg(long)]
      no_expand: bool,

      /// Embed the catalog and enable the vector fallback
      #[arg(long)]
      vector: bool,

      /// Emit JSON
      #[arg(long)]
      json: bool,

      /// Show match scores
      #[arg(long)]
      scores: bool,

      /// Show match reasons
      #[arg(long)]
      reasons: bool,

      /// Identifiers only, one per line
      #[arg(long)]
      compact: bool,

      /// Disable styled output
      #[arg(long)]
      plain: bool,
   },

   /// Per-category course counts of a catalog
   Stats {
      #[arg(short, long, env = "COURSEGREP_CATALOG")]
      catalog: PathBuf,

      #[arg(long)]
      json: bool,
   },

   /// Print the fixed category table
   Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
   tracing_subscriber::fmt()
      .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
      .with_writer(std::io::stderr)
      .init();

   let cli = Cli::parse();

   match cli.command {
      Command::Search {
         query,
         catalog,
         category,
         year,
         course_type,
         max,
         two_path,
         no_expand,
         vector,
         json,
         scores,
         reasons,
         compact,
         plain,
      } => {
         let options = commands::search::SearchOptions {
            two_path,
            no_expand,
            vector,
            json,
            scores,
            reasons,
            compact,
            plain,
         };
         commands::search::execute(query, &catalog, category, year, course_type, max, options)
            .await
      },
      Command::Stats { catalog, json } => commands::stats::execute(&catalog, json),
      Command::Categories => commands::categories::execute(),
   }
}
