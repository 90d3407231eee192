//! Event sinks for the marker stream a run produces.
//!
//! Every consumed symbol is reported as a shift, every variable entered while
//! deriving it as an open, and every end marker popped as a close. Closes only
//! appear for grammars built with [`crate::Grammar::with_end_markers`].

use std::fmt;

use serde::Serialize;

use crate::token::Symbol;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum Event {
    Open(String),
    Shift(Symbol),
    Close(String),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Open(name) => write!(f, "open  {}", name),
            Event::Shift(symbol) => write!(f, "shift {:?}", symbol),
            Event::Close(name) => write!(f, "close {}", name),
        }
    }
}

/// Receives run events as they happen.
pub trait EventSink {
    fn emit(&mut self, event: Event);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: Event) {
        (**self).emit(event);
    }
}

/// Forwards every event to both sinks, first to the left one.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: Event) {
        self.0.emit(event.clone());
        self.1.emit(event);
    }
}

/// Discards everything.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: Event) {}
}

/// Collects events in memory for tests or later rendering.
#[derive(Debug, Default)]
pub struct EventBuffer {
    pub events: Vec<Event>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the events as nested tags, e.g. `<A>0<A>2</A>1</A>`.
    pub fn markup(&self) -> String {
        let mut out = String::new();
        for event in &self.events {
            match event {
                Event::Open(name) => out.push_str(&format!("<{}>", name)),
                Event::Shift(symbol) => out.push_str(symbol),
                Event::Close(name) => out.push_str(&format!("</{}>", name)),
            }
        }
        out
    }
}

impl EventSink for EventBuffer {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}

/// Writes each event on its own line to stdout.
pub struct StdoutSink;

impl EventSink for StdoutSink {
    fn emit(&mut self, event: Event) {
        println!("{}", event);
    }
}
