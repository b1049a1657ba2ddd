/*!
The in-progress record, and what it becomes once it's complete.

A record doesn't say whether it's a story or a comment. That's decided by
`parent_id`: zero means story, anything else means comment.
*/
use crate::field::{Field, Kind};

/// Accumulates one item, slot by slot, as values arrive.
///
/// Text slots default to empty, integer slots to 0.
#[derive(Debug,Clone,Default,PartialEq,Eq)]
pub struct Record {
  pub created_at : String,
  pub title : String,
  pub url : String,
  pub author : String,
  pub points : i64,
  pub story_text : String,
  pub comment_text : String,
  pub num_comments : i64,
  pub story_id : u64,
  pub story_title : String,
  pub story_url : String,
  pub parent_id : u64,
  pub created_at_i : i64,
  pub object_id : u64,
}

/// Remove carriage returns and flatten newlines to a space,
/// so persisted text is always a single line.
pub fn normalize(text : &str) -> String {
  text
    .chars()
    .filter(|&c| c != '\r')
    .map(|c| if c == '\n' { ' ' } else { c })
    .collect()
}

/// Unsigned id from its textual form. Anything that doesn't parse is 0.
pub fn parse_id(text : &str) -> u64 {
  text.trim().parse::<u64>().unwrap_or(0)
}

impl Record {
  /// Apply a string value to the slot. Returns false if the slot doesn't take text.
  pub fn set_text(&mut self, field : Field, value : &str) -> bool {
    let slot = match field {
      Field::ObjectId => {
        self.object_id = parse_id(value);
        return true
      }
      Field::CreatedAt => &mut self.created_at,
      Field::Title => &mut self.title,
      Field::Url => &mut self.url,
      Field::Author => &mut self.author,
      Field::StoryText => &mut self.story_text,
      Field::CommentText => &mut self.comment_text,
      Field::StoryTitle => &mut self.story_title,
      Field::StoryUrl => &mut self.story_url,
      Field::Points | Field::NumComments | Field::StoryId | Field::ParentId | Field::CreatedAtI => return false,
    };
    *slot = normalize(value);
    true
  }

  /// Apply an integer to the slot. Returns false if the slot doesn't take it,
  /// which includes a negative value for an unsigned slot.
  pub fn set_integer(&mut self, field : Field, value : i64) -> bool {
    match field {
      Field::Points => self.points = value,
      Field::NumComments => self.num_comments = value,
      Field::CreatedAtI => self.created_at_i = value,
      Field::StoryId | Field::ParentId | Field::ObjectId => {
        let Ok(value) = u64::try_from(value) else { return false };
        match field {
          Field::StoryId => self.story_id = value,
          Field::ParentId => self.parent_id = value,
          _ => self.object_id = value,
        }
      }
      _ => {
        debug_assert_eq!(field.kind(), Kind::Text);
        return false
      }
    }
    true
  }

  /// Hand over the completed record as a story or a comment,
  /// leaving an empty record in its place for the next item.
  pub fn finish(&mut self) -> Item {
    let record = std::mem::take(self);
    if record.parent_id == 0 {
      Item::Story(Story {
        id: record.object_id,
        title: record.title,
        url: record.url,
        author: record.author,
        points: record.points,
        text: record.story_text,
        comment_count: record.num_comments,
        created_at_i: record.created_at_i,
      })
    } else {
      Item::Comment(Comment {
        id: record.object_id,
        author: record.author,
        points: record.points,
        text: record.comment_text,
        story_id: record.story_id,
        parent_id: record.parent_id,
        created_at_i: record.created_at_i,
      })
    }
  }
}

/// Row of the `stories` relation.
#[derive(Debug,Clone,Default,PartialEq,Eq)]
pub struct Story {
  pub id : u64,
  pub title : String,
  pub url : String,
  pub author : String,
  pub points : i64,
  pub text : String,
  pub comment_count : i64,
  pub created_at_i : i64,
}

/// Row of the `comments` relation.
#[derive(Debug,Clone,Default,PartialEq,Eq)]
pub struct Comment {
  pub id : u64,
  pub author : String,
  pub points : i64,
  pub text : String,
  pub story_id : u64,
  // never 0
  pub parent_id : u64,
  pub created_at_i : i64,
}

#[derive(Debug,Clone,PartialEq,Eq)]
pub enum Item {
  Story(Story),
  Comment(Comment),
}

impl Item {
  pub fn id(&self) -> u64 {
    match self {
      Item::Story(story) => story.id,
      Item::Comment(comment) => comment.id,
    }
  }
}

#[cfg(test)]
mod test_normalize {
  use super::normalize;

  #[test]
  fn crlf() {
    assert_eq!(normalize("a\r\nb"), "a b");
  }

  #[test]
  fn lone_cr_and_lf() {
    assert_eq!(normalize("a\rb\nc"), "ab c");
    assert_eq!(normalize("\n\n"), "  ");
  }

  #[test]
  fn idempotent() {
    for text in ["a\r\nb", "plain", "", "x\n\ry\r", "ünïcödé\n"] {
      let once = normalize(text);
      assert_eq!(normalize(&once), once);
    }
  }
}
