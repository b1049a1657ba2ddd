/*!
Source of json parse events, ie the streaming tokenizer.

Wraps `json_event_parser` so the rest of the crate pulls one event at a
time and never holds more than one item's worth of input.
*/
use std::borrow::Cow;
use std::io::Read;

pub use json_event_parser::JsonParseError;

/// Mirrors `json_event_parser::JsonEvent`, but parameterised on the string
/// type so scripted sequences (`&str`) and parser output (`Cow<str>`) look the same.
#[derive(Debug,Clone,PartialEq,Eq)]
pub enum JsonEvent<S> {
  String(S),
  // textual representation, as it appeared in the input
  Number(S),
  Boolean(bool),
  Null,
  StartArray,
  EndArray,
  StartObject,
  EndObject,
  ObjectKey(S),
}

impl<S> JsonEvent<S> {
  /// true for the leaf values, ie anything that is neither structure nor a key
  pub fn is_scalar(&self) -> bool {
    use JsonEvent::*;
    matches!(self, String(_) | Number(_) | Boolean(_) | Null)
  }
}

/// Pull events from a byte stream. Encoding is validated as it goes.
pub struct JsonEvents<R : Read> {
  reader : json_event_parser::FromReadJsonReader<R>,
  finished : bool,
}

impl<R : Read> JsonEvents<R> {
  pub fn new(istream : R) -> Self {
    let reader = json_event_parser::FromReadJsonReader::new(istream);
    Self{reader, finished: false}
  }

  /// `Ok(None)` once the end of the document has been reached, and forever after.
  /// After an error the stream is also finished.
  pub fn next_event(&mut self) -> Result<Option<JsonEvent<Cow<'_, str>>>, JsonParseError> {
    if self.finished { return Ok(None) }

    use json_event_parser::JsonEvent as Jev;
    let event = match self.reader.read_next_event() {
      Ok(event) => event,
      Err(err) => {
        self.finished = true;
        return Err(err)
      }
    };

    let event = match event {
      Jev::String(v) => JsonEvent::String(v),
      Jev::Number(v) => JsonEvent::Number(v),
      Jev::Boolean(v) => JsonEvent::Boolean(v),
      Jev::Null => JsonEvent::Null,
      Jev::StartArray => JsonEvent::StartArray,
      Jev::EndArray => JsonEvent::EndArray,
      Jev::StartObject => JsonEvent::StartObject,
      Jev::EndObject => JsonEvent::EndObject,
      Jev::ObjectKey(key) => JsonEvent::ObjectKey(key),
      Jev::Eof => {
        self.finished = true;
        return Ok(None)
      }
    };
    Ok(Some(event))
  }
}
