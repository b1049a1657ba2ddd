/*!
Maps a json object key to the slot of the item it fills.

Keys are matched exactly, and the names are disjoint, so this is a plain
lookup with no ordering concerns. Anything not in the table is ignored,
so new keys in the input don't break anything.
*/

/// The slots of an in-progress item.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum Field {
  CreatedAt,
  Title,
  Url,
  Author,
  Points,
  StoryText,
  CommentText,
  NumComments,
  StoryId,
  StoryTitle,
  StoryUrl,
  ParentId,
  CreatedAtI,
  ObjectId,
}

/// What kind of scalar a slot holds.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Kind {
  Text,
  Integer,
}

impl Field {
  pub const ALL : [Field; 14] = [
    Field::CreatedAt,
    Field::Title,
    Field::Url,
    Field::Author,
    Field::Points,
    Field::StoryText,
    Field::CommentText,
    Field::NumComments,
    Field::StoryId,
    Field::StoryTitle,
    Field::StoryUrl,
    Field::ParentId,
    Field::CreatedAtI,
    Field::ObjectId,
  ];

  /// The key this slot is read from.
  pub fn name(self) -> &'static str {
    match self {
      Field::CreatedAt => "created_at",
      Field::Title => "title",
      Field::Url => "url",
      Field::Author => "author",
      Field::Points => "points",
      Field::StoryText => "story_text",
      Field::CommentText => "comment_text",
      Field::NumComments => "num_comments",
      Field::StoryId => "story_id",
      Field::StoryTitle => "story_title",
      Field::StoryUrl => "story_url",
      Field::ParentId => "parent_id",
      Field::CreatedAtI => "created_at_i",
      Field::ObjectId => "objectID",
    }
  }

  /// objectID is text on the wire, even though it ends up as an integer.
  pub fn kind(self) -> Kind {
    use Field::*;
    match self {
      Points | NumComments | StoryId | ParentId | CreatedAtI => Kind::Integer,
      CreatedAt | Title | Url | Author | StoryText | CommentText | StoryTitle | StoryUrl | ObjectId => Kind::Text,
    }
  }
}

impl std::fmt::Display for Field {
  fn fmt(&self, f : &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name())
  }
}

/// Result of looking up a key.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Classified {
  Slot(Field),
  /// the array of items
  Items,
  /// sibling object inside an item which reuses item key names, and must be skipped
  IgnoredMeta,
  Unknown,
}

pub const ITEMS_KEY : &str = "hits";
pub const IGNORED_META_KEY : &str = "_highlightResult";

pub fn classify(key : &str) -> Classified {
  let field = match key {
    ITEMS_KEY => return Classified::Items,
    IGNORED_META_KEY => return Classified::IgnoredMeta,
    "created_at" => Field::CreatedAt,
    "title" => Field::Title,
    "url" => Field::Url,
    "author" => Field::Author,
    "points" => Field::Points,
    "story_text" => Field::StoryText,
    "comment_text" => Field::CommentText,
    "num_comments" => Field::NumComments,
    "story_id" => Field::StoryId,
    "story_title" => Field::StoryTitle,
    "story_url" => Field::StoryUrl,
    "parent_id" => Field::ParentId,
    "created_at_i" => Field::CreatedAtI,
    "objectID" => Field::ObjectId,
    _ => return Classified::Unknown,
  };
  Classified::Slot(field)
}
