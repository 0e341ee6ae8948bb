//! Gemini embedContent client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Result, config::Settings, embed::Embedder, error::Error};

const QUERY_TASK: &str = "retrieval_query";
const DOCUMENT_TASK: &str = "retrieval_document";

pub struct GeminiEmbedder {
   http:     reqwest::Client,
   endpoint: String,
   model:    String,
   api_key:  String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
   content:   EmbedContent<'a>,
   #[serde(rename = "taskType")]
   task_type: &'static str,
}

#[derive(Serialize)]
struct EmbedContent<'a> {
   parts: Vec<EmbedPart<'a>>,
}

#[derive(Serialize)]
struct EmbedPart<'a> {
   text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
   embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
   values: Vec<f32>,
}

impl GeminiEmbedder {
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
         model: settings.embed_model.clone(),
         api_key,
      })
   }

   async fn embed(&self, text: &str, task_type: &'static str) -> Result<Vec<f32>> {
      let url =
         format!("{}/models/{}:embedContent?key={}", self.endpoint, self.model, self.api_key);

      let request =
         EmbedRequest { content: EmbedContent { parts: vec![EmbedPart { text }] }, task_type };

      let response = self.http.post(&url).json(&request).send().await?;
      if !response.status().is_success() {
         return Err(Error::Service {
            op:     "embedding",
            reason: format!("status {}", response.status()),
         });
      }

      let payload: EmbedResponse = response.json().await?;
      if payload.embedding.values.is_empty() {
         return Err(Error::UnexpectedResponse("embedding"));
      }

      Ok(payload.embedding.values)
   }
}

#[async_trait::async_trait]
impl Embedder for GeminiEmbedder {
   async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
      self.embed(text, QUERY_TASK).await
   }

   async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
      let mut vectors = Vec::with_capacity(texts.len());
      for text in texts {
         vectors.push(self.embed(text, DOCUMENT_TASK).await?);
      }
      Ok(vectors)
   }
}
