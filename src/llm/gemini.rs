//! Gemini-backed intent extraction and course-name suggestion.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
   Result,
   config::{self, Settings},
   error::Error,
   intent,
   llm::{IntentExtractor, Suggester},
   types::QueryIntent,
};

pub struct GeminiClient {
   http:     reqwest::Client,
   endpoint: String,
   model:    String,
   api_key:  String,
}

#[derive(Serialize)]
struct GenerateRequest {
   contents:          Vec<Content>,
   #[serde(rename = "generationConfig")]
   generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
   parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
   text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
   temperature:       f32,
   #[serde(rename = "maxOutputTokens")]
   max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
   #[serde(default)]
   candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
   content: Option<Content>,
}

impl GenerateResponse {
   fn into_text(self) -> Option<String> {
      let content = self.candidates.into_iter().next()?.content?;
      let text: String = content.parts.into_iter().map(|p| p.text).collect();
      (!text.is_empty()).then_some(text)
   }
}

impl GeminiClient {
   pub fn new(settings: &Settings) -> Result<Self> {
      let api_key = settings
         .resolved_api_key()
         .ok_or_else(|| Error::Config("no API key configured".to_string()))?;

      let http = reqwest::Client::builder()
         .timeout(Duration::from_millis(settings.timeout_ms))
         .build()?;

      Ok(Self {
         http,
         endpoint: settings.endpoint.clone(),
         model: settings.chat_model.clone(),
         api_key,
      })
   }

   async fn generate(&self, prompt: String, temperature: f32, max_tokens: u32) -> Result<String> {
      let url = format!(
         "{}/models/{}:generateContent?key={}",
         self.endpoint, self.model, self.api_key
      );

      let request = GenerateRequest {
         contents:          vec![Content { parts: vec![Part { text: prompt }] }],
         generation_config: GenerationConfig { temperature, max_output_tokens: max_tokens },
      };

      let response = self.http.post(&url).json(&request).send().await?;
      if !response.status().is_success() {
         return Err(Error::Service {
            op:     "generate",
            reason: format!("status {}", response.status()),
         });
      }

      let payload: GenerateResponse = response.json().await?;
      payload.into_text().ok_or(Error::UnexpectedResponse("generate"))
   }
}

#[async_trait::async_trait]
impl IntentExtractor for GeminiClient {
   async fn extract(&self, query: &str) -> Result<QueryIntent> {
      let text = self.generate(intent_prompt(query), 0.0, 500).await?;
      let cleaned = strip_line_comments(strip_json_fences(&text));

      let value: serde_json::Value = serde_json::from_str(&cleaned).map_err(|e| Error::Service {
         op:     "intent extraction",
         reason: format!("unparseable intent JSON: {e}"),
      })?;

      let parsed = intent::intent_from_json(&value, query);
      tracing::debug!("intent extracted: {} keywords, filters set: {}", parsed.keywords.len(), !parsed.filters.is_empty());
      Ok(parsed)
   }
}

#[async_trait::async_trait]
impl Suggester for GeminiClient {
   async fn suggest(&self, query: &str, sample_names: &[&str]) -> Result<Vec<String>> {
      let text = self.generate(suggest_prompt(query, sample_names), 0.7, 500).await?;
      let suggested = parse_suggestions(&text);
      tracing::debug!("suggested {} course names for {query:?}", suggested.len());
      Ok(suggested)
   }
}

fn intent_prompt(query: &str) -> String {
   format!(
      r#"授業検索クエリからキーワードとフィルター条件を抽出してください。

クエリ: {query}

JSON形式で出力:
{{
  "keywords": ["キーワード1", "キーワード2"],
  "related_terms": [],
  "category": "カテゴリ名",
  "filters": {{
    "delivery_method": null,
    "weekdays": [],
    "include_periods": [],
    "exclude_periods": [],
    "terms": [],
    "department": null,
    "year_includes": null
  }}
}}

## フィルターの説明
- delivery_method: "対面", "オンライン", またはnull
- weekdays: 曜日リスト ["月", "火", "水", "木", "金"]
- include_periods: 含める時限 ["1"〜"6"]、exclude_periods: 除外する時限
- terms: 開講時期 ["春A", "春AB", "秋ABC"]など
- department: 開講学類名、year_includes: 対象年次 ("1"〜"4")

JSONのみ出力:"#
   )
}

fn suggest_prompt(query: &str, sample_names: &[&str]) -> String {
   let sample = &sample_names[..sample_names.len().min(config::SAMPLE_NAME_LIMIT)];

   format!(
      "以下の質問に合いそうな大学の授業科目名を{}個提案してください。\n\n\
       ## 質問\n{query}\n\n\
       ## 利用可能な科目の例\n{}\n\n\
       上記の例にない科目も含めて提案してください。\
       科目名のみを1行ずつ出力してください（番号や説明は不要）。\n",
      config::SUGGESTION_LIMIT,
      sample.join("\n"),
   )
}

/// Strips a ```json ... ``` fence if the model wrapped its output in one.
fn strip_json_fences(text: &str) -> &str {
   let text = text.trim();
   let Some(rest) = text.strip_prefix("```") else {
      return text;
   };

   let rest = rest.strip_prefix("json").unwrap_or(rest);
   rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Drops `// ...` trailers the model sometimes leaves inside the JSON.
fn strip_line_comments(text: &str) -> String {
   text
      .lines()
      .map(|line| line.find("//").map_or(line, |idx| &line[..idx]))
      .collect::<Vec<_>>()
      .join("\n")
}

/// One suggestion per line; leading list markers are trimmed and one-char
/// leftovers dropped.
fn parse_suggestions(text: &str) -> Vec<String> {
   text
      .lines()
      .map(|line| {
         line
            .trim()
            .trim_start_matches(['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '.', '-', '*'])
            .trim_start()
      })
      .filter(|line| line.chars().count() > 1)
      .map(|line| line.to_string())
      .take(config::SUGGESTION_LIMIT)
      .collect()
}
