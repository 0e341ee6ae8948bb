use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
   #[error("io error: {0}")]
   Io(#[from] io::Error),

   #[error("http error: {0}")]
   Http(#[from] reqwest::Error),

   #[error("json error: {0}")]
   Json(#[from] serde_json::Error),

   #[error("config error: {0}")]
   Config(String),

   #[error("catalog error: {0}")]
   Catalog(String),

   #[error("{op} failed: {reason}")]
   Service { op: &'static str, reason: String },

   #[error("unexpected response from {0}")]
   UnexpectedResponse(&'static str),
}
