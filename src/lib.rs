/*!
Load Hacker News stories and comments, as json from the search api, into sqlite.

The json is read in a single streaming pass, so memory use is the same
for ten items or ten million:

  bytes -> [`parser`] events -> [`assembler`] items -> [`sink::route`] -> [`store`] rows
*/

// parser and event handling
pub mod parser;
pub mod field;
pub mod item;
pub mod assembler;

// where items end up
pub mod sink;
pub mod store;

pub mod error;
pub mod ingest;

pub use error::{Error, Result};
pub use ingest::{ingest, Stats};
pub use item::{Comment, Item, Story};
pub use sink::Sink;
pub use store::Store;

use std::io::Read;
use std::path::Path;

/// Same as the buffer the input was always read with.
pub const READ_BUFFER_SIZE : usize = 64 * 1024;

/// Either stdin or the named file, buffered.
pub fn make_readable(input : Option<&Path>) -> Result<Box<dyn Read>> {
  match input {
    None => Ok(Box::new(std::io::BufReader::with_capacity(READ_BUFFER_SIZE, std::io::stdin().lock()))),
    Some(path) => {
      let file = std::fs::File::open(path)
        .map_err(|source| Error::Input{path: path.to_path_buf(), source})?;
      Ok(Box::new(std::io::BufReader::with_capacity(READ_BUFFER_SIZE, file)))
    }
  }
}

/// Open and set up the database at `db_path`, then load all of `input` into it.
pub fn run<P, R>(db_path : P, input : R) -> Result<Stats>
where
  P : AsRef<Path>,
  R : Read,
{
  let mut store = Store::open(db_path)?;
  store.setup()?;
  ingest(input, &mut store)
}
