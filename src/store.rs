/*!
SQLite implementation of Sink.

The schema is stamped into `PRAGMA user_version`. A fresh database has 0 there,
so it gets the tables and the stamp. A database carrying our stamp is used as is.
Anything else is somebody else's schema, and is left alone.
*/
use std::path::Path;

use rusqlite::{params, Connection};

use crate::error::{Error, Result};
use crate::item::{Comment, Story};
use crate::sink::Sink;

pub const SCHEMA_VERSION : i32 = 1;
const _ : () = assert!(SCHEMA_VERSION != 0, "schema version can't be 0");

const SCHEMA : &str = r#"
CREATE TABLE IF NOT EXISTS stories (
    objectID       INTEGER PRIMARY KEY,
    title          TEXT,
    url            TEXT,
    author         TEXT,
    points         INTEGER,
    story_text     TEXT,
    num_comments   INTEGER,
    created_at_i   INTEGER);

CREATE TABLE IF NOT EXISTS comments (
    objectID       INTEGER PRIMARY KEY,
    author         TEXT,
    points         INTEGER,
    comment_text   TEXT,
    story_id       INTEGER,
    parent_id      INTEGER,
    created_at_i   INTEGER);
"#;

const INSERT_STORY : &str = "
insert into stories (objectID, title, url, author, points, story_text, num_comments, created_at_i)
  values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const INSERT_COMMENT : &str = "
insert into comments (objectID, author, points, comment_text, story_id, parent_id, created_at_i)
  values (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

/// The two relations.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Relation {
  Stories,
  Comments,
}

impl Relation {
  pub fn table(self) -> &'static str {
    match self {
      Relation::Stories => "stories",
      Relation::Comments => "comments",
    }
  }
}

pub struct Store {
  conn : Connection,
}

impl Store {
  /// Open (or create) the database file. Does not touch the schema, see `setup`.
  pub fn open<P : AsRef<Path>>(path : P) -> Result<Self> {
    let path = path.as_ref();
    let conn = Connection::open(path)
      .map_err(|source| Error::Open{path: path.to_path_buf(), source})?;
    Ok(Self::from_connection(conn))
  }

  pub fn from_connection(conn : Connection) -> Self {
    Self{conn}
  }

  pub fn connection(&self) -> &Connection {
    &self.conn
  }

  pub fn into_connection(self) -> Connection {
    self.conn
  }

  pub fn version(&self) -> Result<i32> {
    self.conn
      .pragma_query_value(None, "user_version", |row| row.get(0))
      .map_err(Error::Version)
  }

  /// Create the tables and stamp the version, unless that's already been done.
  pub fn setup(&mut self) -> Result<()> {
    let found = self.version()?;
    log::info!("DB user_version={found}");

    match found {
      SCHEMA_VERSION => return Ok(()),
      0 => (),
      found => return Err(Error::SchemaMismatch{found, expected: SCHEMA_VERSION}),
    }

    // tables and stamp go in together, or not at all
    let tx = self.conn.transaction().map_err(Error::Schema)?;
    tx.execute_batch(SCHEMA).map_err(Error::Schema)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION).map_err(Error::Schema)?;
    tx.commit().map_err(Error::Schema)?;
    log::info!("created schema version {SCHEMA_VERSION}");
    Ok(())
  }

  pub fn count(&self, relation : Relation) -> rusqlite::Result<u64> {
    let sql = format!("select count(*) from {}", relation.table());
    self.conn.query_row(&sql, [], |row| row.get(0))
  }
}

impl Sink for Store {
  type Error = rusqlite::Error;

  fn begin(&mut self) -> rusqlite::Result<()> {
    self.conn.execute_batch("BEGIN TRANSACTION")
  }

  fn insert_story(&mut self, story : &Story) -> rusqlite::Result<()> {
    let mut stmt = self.conn.prepare_cached(INSERT_STORY)?;
    stmt.execute(params![
      story.id,
      story.title,
      story.url,
      story.author,
      story.points,
      story.text,
      story.comment_count,
      story.created_at_i,
    ])?;
    Ok(())
  }

  fn insert_comment(&mut self, comment : &Comment) -> rusqlite::Result<()> {
    let mut stmt = self.conn.prepare_cached(INSERT_COMMENT)?;
    stmt.execute(params![
      comment.id,
      comment.author,
      comment.points,
      comment.text,
      comment.story_id,
      comment.parent_id,
      comment.created_at_i,
    ])?;
    Ok(())
  }

  fn commit(&mut self) -> rusqlite::Result<()> {
    self.conn.execute_batch("COMMIT TRANSACTION")
  }
}
