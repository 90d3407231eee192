//! Runtime for recognition runs.
//!
//! Control flow for each input symbol: the driver hands the symbol to the
//! stack machine, which pops the top obligation and asks the evaluator what
//! to push back. A run accepts when the stack is empty exactly as the input
//! runs out.
//!
//! Each run owns its stack and only reads the grammar, so a single
//! [`Grammar`](crate::Grammar) can serve runs on many threads at once.

pub mod driver;
pub mod eval;
pub mod machine;
pub mod sink;
pub mod stack;

pub use driver::{run, Input, Recognizer, RunResult, TraceStep};
pub use eval::{evaluate, Evaluator, Expansion};
pub use machine::{MachineOptions, StackMachine};
pub use sink::{Event, EventBuffer, EventSink, NullSink, StdoutSink};
pub use stack::Stack;
