/*!
The Sink trait.

Completed items are routed to an implementation of Sink, which owns the
two relations and the transaction around the whole load.
*/
use crate::item::{Comment, Item, Story};

/// This can be implemented by anything from a database to a Vec.
pub trait Sink {
  type Error : std::error::Error + Send + Sync + 'static;

  /// Open the envelope around all inserts.
  fn begin(&mut self) -> Result<(), Self::Error>;
  fn insert_story(&mut self, story : &Story) -> Result<(), Self::Error>;
  fn insert_comment(&mut self, comment : &Comment) -> Result<(), Self::Error>;
  /// Close the envelope. Called exactly once, after the last insert.
  fn commit(&mut self) -> Result<(), Self::Error>;
}

/// Send the item to the relation its `parent_id` selects.
pub fn route<K : Sink + ?Sized>(item : &Item, sink : &mut K) -> Result<(), K::Error> {
  match item {
    Item::Story(story) => sink.insert_story(story),
    Item::Comment(comment) => sink.insert_comment(comment),
  }
}

/// Keep everything in memory.
impl Sink for Vec<Item> {
  type Error = std::convert::Infallible;

  fn begin(&mut self) -> Result<(), Self::Error> { Ok(()) }

  fn insert_story(&mut self, story : &Story) -> Result<(), Self::Error> {
    self.push(Item::Story(story.clone()));
    Ok(())
  }

  fn insert_comment(&mut self, comment : &Comment) -> Result<(), Self::Error> {
    self.push(Item::Comment(comment.clone()));
    Ok(())
  }

  fn commit(&mut self) -> Result<(), Self::Error> { Ok(()) }
}
