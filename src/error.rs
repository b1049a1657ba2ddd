//! Conditions that stop the whole load. Per-item insert failures are not here,
//! they're logged and counted by `ingest`.

use std::path::PathBuf;

#[derive(Debug,thiserror::Error)]
pub enum Error {
  #[error("can't open database {path:?}: {source}")]
  Open {
    path : PathBuf,
    #[source]
    source : rusqlite::Error,
  },

  #[error("can't read schema version: {0}")]
  Version(#[source] rusqlite::Error),

  #[error("can't init database: schema version {found} is not {expected}")]
  SchemaMismatch { found : i32, expected : i32 },

  #[error("can't create schema: {0}")]
  Schema(#[source] rusqlite::Error),

  #[error("transaction failed: {0}")]
  Transaction(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("json parse error, {bytes_read} bytes read: {source}")]
  Parse {
    // bytes pulled into the parser's buffer, which may be past the bad token
    bytes_read : usize,
    #[source]
    source : crate::parser::JsonParseError,
  },

  #[error("can't open input {path:?}: {source}")]
  Input {
    path : PathBuf,
    #[source]
    source : std::io::Error,
  },
}

pub type Result<T> = std::result::Result<T, Error>;
