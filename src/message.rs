//! # Message envelope and payload types.
//!
//! A [`Message`] is an immutable envelope around a [`Payload`]. Once a message
//! has been sent to a channel, no stage mutates it: a transform builds a
//! *new* message and leaves the original untouched. Cloning is cheap, text
//! payloads are stored as `Arc<str>`.
//!
//! ## Example
//! ```rust
//! use flowline::{Message, Payload};
//!
//! let m = Message::int(42);
//! assert_eq!(m.as_int(), Some(42));
//!
//! let t = Message::text("Number 42");
//! assert_eq!(t.as_text(), Some("Number 42"));
//! assert_eq!(t.payload().kind(), "text");
//! ```

use std::fmt;
use std::sync::Arc;

/// Value carried by a [`Message`].
///
/// The flow produces integers at the source and text after the transform
/// stage. A closed enum keeps routing decisions typed: a stage that needs an
/// integer can report a mismatch instead of downcasting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// Integer payload, produced by sources and consumed by routers.
    Int(i64),
    /// Text payload, produced by transform stages.
    Text(Arc<str>),
}

impl Payload {
    /// Returns a short stable label for the payload shape ("int" or "text").
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Int(_) => "int",
            Payload::Text(_) => "text",
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Int(v) => write!(f, "{v}"),
            Payload::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Immutable message envelope.
///
/// Carries a [`Payload`] and nothing else. Construction goes through
/// [`Message::int`] / [`Message::text`]; there are no mutators.
#[derive(Clone, Debug)]
pub struct Message {
    payload: Payload,
}

impl Message {
    /// Creates a message with an integer payload.
    pub fn int(value: i64) -> Self {
        Self {
            payload: Payload::Int(value),
        }
    }

    /// Creates a message with a text payload.
    pub fn text(value: impl Into<Arc<str>>) -> Self {
        Self {
            payload: Payload::Text(value.into()),
        }
    }

    /// Returns the payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the integer payload, if this message carries one.
    pub fn as_int(&self) -> Option<i64> {
        match &self.payload {
            Payload::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the text payload, if this message carries one.
    pub fn as_text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(s) => Some(s),
            _ => None,
        }
    }
}
