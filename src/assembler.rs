/*!
Turns the flat stream of json events into items, one at a time.

The input looks like

```json
{ "hits": [ {item}, {item}, ... ] }
```

so an item is an element of the array under the top-level `hits` key. Other
top-level values, objects included, are never items. Keys select a slot, and
the next scalar fills it. An item's
`_highlightResult` reuses the item key names, so its whole value is skipped.

Only one item is ever held, so memory doesn't depend on the size of the input.
*/
use crate::field::{self, Classified, Field};
use crate::item::{Item, Record};
use crate::parser::JsonEvent;

/// Object depth while inside an item.
pub const ITEM_DEPTH : u32 = 2;

/// Which special container the events are currently in.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Container {
  None,
  Items,
  IgnoredMeta,
}

#[derive(Debug)]
pub struct Assembler {
  // count of currently open objects
  depth : u32,
  container : Container,
  // container to go back to once the ignored value has been skipped
  resume : Container,
  // objects and arrays opened since the ignored key
  skip_open : u32,
  // inside the top-level items array
  in_items : bool,
  active : Option<Field>,
  record : Record,
}

impl Default for Assembler {
  fn default() -> Self { Self::new() }
}

impl Assembler {
  pub fn new() -> Self {
    Self {
      depth: 0,
      container: Container::None,
      resume: Container::None,
      skip_open: 0,
      in_items: false,
      active: None,
      record: Record::default(),
    }
  }

  pub fn depth(&self) -> u32 { self.depth }
  pub fn container(&self) -> Container { self.container }
  pub fn active(&self) -> Option<Field> { self.active }
  pub fn in_items(&self) -> bool { self.in_items }

  /// Apply one event. Returns the item when the event closes one.
  pub fn feed<S : AsRef<str> + std::fmt::Debug>(&mut self, ev : &JsonEvent<S>) -> Option<Item> {
    use JsonEvent::*;

    // depth is kept up to date in every mode
    match ev {
      StartObject => {
        self.depth += 1;
        if self.depth == ITEM_DEPTH && self.in_items && self.container != Container::IgnoredMeta {
          // a fresh item, so nothing from outside it may leak in
          self.active = None;
          self.record = Record::default();
        }
      }
      EndObject => self.depth = self.depth.saturating_sub(1),
      _ => (),
    }

    if self.container == Container::IgnoredMeta {
      self.skip(ev);
      return None
    }

    match ev {
      ObjectKey(key) => self.key(key.as_ref()),
      String(_) | Number(_) | Boolean(_) | Null => self.scalar(ev),
      EndObject if self.in_items && self.depth == ITEM_DEPTH - 1 => return Some(self.finish()),
      StartArray if self.depth == 1 && self.container == Container::Items => self.in_items = true,
      EndArray if self.in_items && self.depth == 1 => {
        self.in_items = false;
        self.container = Container::None;
      }
      StartObject | EndObject | StartArray | EndArray => (),
    }
    None
  }

  fn key(&mut self, key : &str) {
    // top-level keys are never item fields, and each one starts a new top-level value
    if self.depth == 1 {
      self.active = None;
      self.container = Container::None;
    }
    // nested in some other top-level value
    if self.depth > 1 && !self.in_items { return }

    // a key while a slot is active means the slot's value wasn't a scalar,
    // and the slot is still waiting for one.
    if self.active.is_some() { return }

    match field::classify(key) {
      Classified::Slot(field) => self.active = Some(field),
      Classified::Items => self.container = Container::Items,
      Classified::IgnoredMeta => {
        self.resume = self.container;
        self.container = Container::IgnoredMeta;
        self.skip_open = 0;
      }
      Classified::Unknown => log::trace!("ignoring key {key:?}"),
    }
  }

  fn scalar<S : AsRef<str> + std::fmt::Debug>(&mut self, ev : &JsonEvent<S>) {
    // stray value, eg an element of an array of strings
    let Some(field) = self.active.take() else { return };

    let accepted = match ev {
      JsonEvent::String(v) => self.record.set_text(field, v.as_ref()),
      JsonEvent::Number(v) => match integer(v.as_ref()) {
        Some(i) => self.record.set_integer(field, i),
        None => false,
      }
      // slot keeps its default
      JsonEvent::Boolean(_) | JsonEvent::Null => true,
      _ => unreachable!("not a scalar {ev:?}"),
    };
    if !accepted {
      log::debug!("{field} ignoring value {ev:?}");
    }
  }

  /// Consume events until the value following the ignored key is complete.
  fn skip<S>(&mut self, ev : &JsonEvent<S>) {
    use JsonEvent::*;
    let complete = match ev {
      StartObject | StartArray => { self.skip_open += 1; false }
      EndObject | EndArray => {
        self.skip_open = self.skip_open.saturating_sub(1);
        self.skip_open == 0
      }
      // a scalar is only the whole value when nothing is open
      _ => ev.is_scalar() && self.skip_open == 0,
    };
    if complete {
      self.container = self.resume;
    }
  }

  fn finish(&mut self) -> Item {
    self.active = None;
    self.skip_open = 0;
    self.container = Container::Items;
    self.record.finish()
  }
}

/// Integer value of a json number's text. None for fractions, exponents
/// and anything outside i64.
fn integer(text : &str) -> Option<i64> {
  let number : serde_json::Number = serde_json::from_str(text).ok()?;
  number.as_i64()
}
