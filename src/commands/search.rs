use std::{path::Path, sync::Arc, time::Duration};

use anyhow::{Context, Result, bail};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::{
   catalog::Catalog,
   config::Settings,
   embed::GeminiEmbedder,
   indexer,
   llm::GeminiClient,
   search::SearchEngine,
   store::MemoryStore,
   types::{CourseTypeFilter, ScoredCandidate, SearchRequest},
};

#[derive(Default, Debug, Clone, Copy)]
pub struct SearchOptions {
   pub two_path:  bool,
   pub no_expand: bool,
   pub vector:    bool,
   pub json:      bool,
   pub scores:    bool,
   pub reasons:   bool,
   pub compact:   bool,
   pub plain:     bool,
}

#[derive(Serialize)]
struct JsonOutput {
   results: Vec<ScoredCandidate>,
}

#[allow(clippy::too_many_arguments, reason = "CLI surface mirrors the flag set")]
pub async fn execute(
   query: String,
   catalog_path: &Path,
   category: Option<String>,
   year: Option<String>,
   course_type: Option<String>,
   max: usize,
   options: SearchOptions,
) -> Result<()> {
   let catalog = Catalog::load_json(catalog_path)
      .with_context(|| format!("failed to load catalog from {}", catalog_path.display()))?;

   let mut request = SearchRequest::new(query.clone());
   request.category = category;
   request.year = year;
   request.course_type = parse_course_type(course_type.as_deref())?;
   request.limit = max;
   request.expand = !options.no_expand;

   let engine = build_engine(&catalog, &options).await?;

   let spinner = (!options.json && !options.compact).then(|| {
      let spinner = ProgressBar::new_spinner();
      spinner.set_style(
         ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
      );
      spinner.enable_steady_tick(Duration::from_millis(100));
      spinner.set_message(format!("Searching {} courses...", catalog.len()));
      spinner
   });

   let results = if options.two_path {
      engine.search_two_path(&catalog, &request).await?
   } else {
      engine.search(&catalog, &request).await?
   };

   if let Some(spinner) = spinner {
      spinner.finish_and_clear();
   }

   if options.json {
      println!("{}", serde_json::to_string(&JsonOutput { results })?);
      return Ok(());
   }

   if results.is_empty() {
      println!("No courses found for '{query}'");
      println!("\nTip: loosen the filters or rephrase the query");
      return Ok(());
   }

   format_results(&results, &query, options);
   Ok(())
}

fn parse_course_type(raw: Option<&str>) -> Result<Option<CourseTypeFilter>> {
   match raw {
      None => Ok(None),
      Some("specialized") => Ok(Some(CourseTypeFilter::Specialized)),
      Some("common") => Ok(Some(CourseTypeFilter::Common)),
      Some(other) => bail!("unknown course type '{other}' (expected 'specialized' or 'common')"),
   }
}

/// Wires the engine from runtime settings. Without an API key the engine
/// still works: heuristic intent, no suggestions, no vector fallback.
async fn build_engine(catalog: &Catalog, options: &SearchOptions) -> Result<SearchEngine> {
   let settings = Settings::load()?;
   let mut engine = SearchEngine::new();

   if settings.resolved_api_key().is_none() {
      if options.vector {
         bail!("--vector needs an API key for the embedding service");
      }
      tracing::info!("no API key configured, running with local heuristics only");
      return Ok(engine);
   }

   let client = Arc::new(GeminiClient::new(&settings)?);
   engine = engine
      .with_intent_extractor(client.clone())
      .with_suggester(client);

   if options.vector {
      let embedder = Arc::new(GeminiEmbedder::new(&settings)?);
      let store = Arc::new(MemoryStore::new());
      let indexed = indexer::index_catalog(catalog, &*embedder, &*store).await?;
      tracing::info!("embedded {indexed} courses for vector fallback");
      engine = engine.with_vector_fallback(embedder, store);
   }

   Ok(engine)
}

fn format_results(results: &[ScoredCandidate], query: &str, options: SearchOptions) {
   if options.compact {
      for candidate in results {
         println!("{}", candidate.course_id);
      }
      return;
   }

   if options.plain {
      println!("\nSearch results for: {query}\n");
   } else {
      println!("\n{}\n", style(format!("Search results for: {query}")).bold());
   }

   for (i, candidate) in results.iter().enumerate() {
      let course = &candidate.course;

      if options.plain {
         print!("{}) {} ({})", i + 1, course.name, candidate.course_id);
         if options.scores {
            print!(" (score: {:.1})", candidate.score);
         }
         println!();
      } else {
         print!("{} ", style(format!("{})", i + 1)).bold().cyan());
         print!("{} ({})", style(&course.name).green(), candidate.course_id);
         if options.scores {
            print!(" {}", style(format!("(score: {:.1})", candidate.score)).dim());
         }
         println!();
      }

      let mut details = Vec::new();
      if !course.credits.is_empty() {
         details.push(format!("単位: {}", course.credits));
      }
      if !course.year_level.is_empty() {
         details.push(format!("年次: {}", course.year_level));
      }
      if !course.term.is_empty() || !course.day_period.is_empty() {
         details.push(format!("開講: {} {}", course.term, course.day_period));
      }
      if !course.delivery.is_empty() {
         details.push(format!("形態: {}", course.delivery));
      }
      if !course.instructor.is_empty() {
         details.push(format!("教員: {}", course.instructor));
      }

      if !details.is_empty() {
         let line = details.join("  ");
         if options.plain {
            println!("   {line}");
         } else {
            println!("   {}", style(line).dim());
         }
      }

      if options.reasons && !candidate.reasons.is_empty() {
         let line = candidate.reasons.join(", ");
         if options.plain {
            println!("   {line}");
         } else {
            println!("   {}", style(line).yellow());
         }
      }

      println!();
   }
}
