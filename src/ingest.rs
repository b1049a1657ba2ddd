/*!
Drives the whole load: pull events, assemble items, route them to the sink.

The sink's transaction is opened before the first event and closed exactly
once after the last one, even when the input turns out to be broken. A broken
input is still an error, it's just reported after the commit.
*/
use std::io::Read;

use crate::assembler::Assembler;
use crate::error::{Error, Result};
use crate::item::Item;
use crate::parser::{JsonEvents, JsonParseError};
use crate::sink::{self, Sink};

/// What happened during one load.
#[derive(Debug,Clone,Copy,Default,PartialEq,Eq)]
pub struct Stats {
  pub items : u64,
  pub stories : u64,
  pub comments : u64,
  // inserts refused by the sink
  pub rejected : u64,
  // bytes read from the input
  pub bytes : usize,
}

impl std::fmt::Display for Stats {
  fn fmt(&self, f : &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let Stats{items, stories, comments, rejected, bytes} = self;
    write!(f, "{items} items ({stories} stories, {comments} comments, {rejected} rejected) from {bytes} bytes")
  }
}

/// Load everything from `input` into `sink`.
pub fn ingest<R, K>(input : R, sink : &mut K) -> Result<Stats>
where
  R : Read,
  K : Sink + ?Sized,
{
  let mut counter = countio::Counter::new(input);
  let mut stats = Stats::default();

  sink.begin().map_err(|err| Error::Transaction(Box::new(err)))?;

  let parsed = {
    let mut jevs = JsonEvents::new(&mut counter);
    pump(&mut jevs, sink, &mut stats)
  };
  stats.bytes = counter.reader_bytes();

  // commit failure trumps a parse failure
  sink.commit().map_err(|err| Error::Transaction(Box::new(err)))?;

  match parsed {
    Ok(()) => {
      log::info!("loaded {stats}");
      Ok(stats)
    }
    Err(source) => {
      log::info!("loaded {stats} before parse error");
      Err(Error::Parse{bytes_read: stats.bytes, source})
    }
  }
}

fn pump<R, K>(jevs : &mut JsonEvents<R>, sink : &mut K, stats : &mut Stats) -> std::result::Result<(), JsonParseError>
where
  R : Read,
  K : Sink + ?Sized,
{
  let mut assembler = Assembler::new();
  while let Some(ev) = jevs.next_event()? {
    let Some(item) = assembler.feed(&ev) else { continue };

    stats.items += 1;
    match sink::route(&item, sink) {
      Ok(()) => match item {
        Item::Story(_) => stats.stories += 1,
        Item::Comment(_) => stats.comments += 1,
      }
      Err(err) => {
        // one bad item doesn't stop the load
        log::error!("Can't insert objectID={}: {err}", item.id());
        stats.rejected += 1;
      }
    }
  }
  Ok(())
}

#[cfg(test)]
mod test_ingest {
  use super::*;
  use crate::item::{Comment, Story};
  use crate::store::{Relation, Store};

  fn store() -> Store {
    let mut store = Store::from_connection(rusqlite::Connection::open_in_memory().unwrap());
    store.setup().unwrap();
    store
  }

  #[test]
  fn story_scenario() {
    let input = r#"{"hits":[{"objectID":"1","title":"T","url":"http://x","author":"a","points":5,"story_text":"s\r\nbody","num_comments":2,"created_at_i":100,"parent_id":0}]}"#;
    let mut store = store();
    let stats = ingest(input.as_bytes(), &mut store).unwrap();
    assert_eq!(stats.stories, 1);
    assert_eq!(stats.comments, 0);
    assert_eq!(stats.bytes, input.len());

    let row : (u64, String, String, String, i64, String, i64, i64) = store.connection()
      .query_row("select * from stories", [], |row| {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?, row.get(6)?, row.get(7)?))
      })
      .unwrap();
    assert_eq!(row, (1, "T".into(), "http://x".into(), "a".into(), 5, "s body".into(), 2, 100));
    assert_eq!(store.count(Relation::Comments).unwrap(), 0);
  }

  #[test]
  fn comment_scenario() {
    let input = r#"{"hits":[{"parent_id":7,"story_id":1,"objectID":"42","author":"b","points":1,"comment_text":"hi","created_at_i":200}]}"#;
    let mut store = store();
    ingest(input.as_bytes(), &mut store).unwrap();

    let row : (u64, String, i64, String, u64, u64, i64) = store.connection()
      .query_row("select * from comments", [], |row| {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?, row.get(6)?))
      })
      .unwrap();
    assert_eq!(row, (42, "b".into(), 1, "hi".into(), 1, 7, 200));
    assert_eq!(store.count(Relation::Stories).unwrap(), 0);
  }

  #[test]
  fn realistic_page() {
    let input = r#"{
      "hits": [
        {
          "created_at": "2014-01-01T00:00:00.000Z",
          "title": "Show HN: thing",
          "url": "http://example.com",
          "author": "alice",
          "points": 12,
          "story_text": null,
          "comment_text": null,
          "num_comments": 3,
          "story_id": null,
          "story_title": null,
          "story_url": null,
          "parent_id": null,
          "created_at_i": 1388534400,
          "_tags": ["story", "author_alice", "story_100"],
          "objectID": "100",
          "_highlightResult": {
            "title": {"value": "Show HN: <em>thing</em>", "matchLevel": "full", "matchedWords": ["thing"]},
            "author": {"value": "alice", "matchLevel": "none", "matchedWords": []},
            "points": 9999
          }
        },
        {
          "created_at": "2014-01-01T00:05:00.000Z",
          "title": null,
          "url": null,
          "author": "bob",
          "points": 2,
          "story_text": null,
          "comment_text": "line one\nline two",
          "num_comments": null,
          "story_id": 100,
          "story_title": "Show HN: thing",
          "story_url": "http://example.com",
          "parent_id": 100,
          "created_at_i": 1388534700,
          "_tags": ["comment", "author_bob", "story_100"],
          "objectID": "101",
          "_highlightResult": {"comment_text": {"value": "x", "matchLevel": "none", "matchedWords": []}}
        }
      ],
      "nbHits": 2,
      "page": 0,
      "query": "title",
      "params": "advancedSyntax=true"
    }"#;
    let mut items : Vec<Item> = vec![];
    let stats = ingest(input.as_bytes(), &mut items).unwrap();
    assert_eq!(stats.items, 2);
    assert_eq!(items, vec![
      Item::Story(Story {
        id: 100,
        title: "Show HN: thing".into(),
        url: "http://example.com".into(),
        author: "alice".into(),
        points: 12,
        text: "".into(),
        comment_count: 3,
        created_at_i: 1388534400,
      }),
      Item::Comment(Comment {
        id: 101,
        author: "bob".into(),
        points: 2,
        text: "line one line two".into(),
        story_id: 100,
        parent_id: 100,
        created_at_i: 1388534700,
      }),
    ]);
  }

  #[test]
  fn rejected_insert_is_not_fatal() {
    let input = r#"{"hits":[{"objectID":"1","title":"a"},{"objectID":"1","title":"b"},{"objectID":"2","title":"c"}]}"#;
    let mut store = store();
    let stats = ingest(input.as_bytes(), &mut store).unwrap();
    assert_eq!(stats.items, 3);
    assert_eq!(stats.stories, 2);
    assert_eq!(stats.rejected, 1);
    assert_eq!(store.count(Relation::Stories).unwrap(), 2);
  }

  #[test]
  fn parse_error_still_commits() {
    let input = r#"{"hits":[{"objectID":"1","title":"a"},{"objectID":"2","#;
    let mut store = store();
    match ingest(input.as_bytes(), &mut store) {
      Err(Error::Parse{..}) => (),
      other => panic!("expected parse error, got {other:?}"),
    }
    assert_eq!(store.count(Relation::Stories).unwrap(), 1);
    // the envelope is closed
    assert!(store.connection().is_autocommit());
  }

  #[test]
  fn invalid_json_is_fatal() {
    let mut items : Vec<Item> = vec![];
    assert!(matches!(ingest("{\"hits\": [nope]}".as_bytes(), &mut items), Err(Error::Parse{..})));
    assert!(items.is_empty());
  }

  #[test]
  fn begin_failure_is_fatal() {
    let mut store = store();
    // a transaction is already open, so begin fails
    store.connection().execute_batch("BEGIN").unwrap();
    assert!(matches!(ingest("{}".as_bytes(), &mut store), Err(Error::Transaction(_))));
  }

  #[test]
  fn top_level_objects_around_hits() {
    let input = r#"{"facets":{"title":"no","objectID":"9"},"hits":[{"objectID":"1","title":"T"}],"exhaustive":{"nbHits":false,"typo":false},"processingTimingsMS":{"total":3}}"#;
    let mut items : Vec<Item> = vec![];
    let stats = ingest(input.as_bytes(), &mut items).unwrap();
    assert_eq!(stats.items, 1);
    assert_eq!(items, vec![Item::Story(Story { id: 1, title: "T".into(), ..Story::default() })]);
  }

  #[test]
  fn parse_error_reports_bytes_read() {
    let input = "{\"hits\": [nope]}";
    let mut items : Vec<Item> = vec![];
    match ingest(input.as_bytes(), &mut items) {
      Err(err @ Error::Parse{bytes_read, ..}) => {
        assert_eq!(bytes_read, input.len());
        assert!(err.to_string().starts_with(&format!("json parse error, {} bytes read: ", input.len())));
      }
      other => panic!("expected parse error, got {other:?}"),
    }
  }

  #[test]
  fn empty_hits() {
    let mut items : Vec<Item> = vec![];
    let stats = ingest(r#"{"hits": []}"#.as_bytes(), &mut items).unwrap();
    assert_eq!(stats, Stats{bytes: 12, ..Stats::default()});
  }
}
