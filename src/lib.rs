//! cfgpda: context-free recognition by a pushdown automaton that runs
//! directly over the grammar tree.
//!
//! A [`Grammar`] maps variable names to [`Token`] expressions. A run keeps a
//! stack of pending tokens; for every input symbol it pops the top, lets the
//! evaluator derive the symbol from it, and pushes back what remains. The
//! input is accepted when the stack empties exactly as the input runs out.
//!
//! ```
//! use cfgpda::{run, Grammar, Input, Token};
//!
//! let a = Token::variable("A");
//! let grammar = Grammar::builder()
//!     .rule("$", vec![Token::concat(vec![Token::terminal("0"), a.clone()]).unwrap()])
//!     .unwrap()
//!     .rule("A", vec![Token::terminal("1")])
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! assert!(run(&grammar, "$", &Input::chars("01")).accepted);
//! assert!(!run(&grammar, "$", &Input::chars("011")).accepted);
//! ```
//!
//! Unions commit to the first alternative that derives the current symbol
//! and never revisit that choice, so some ambiguous grammars reject strings
//! they generate.
//!
//! When the popped token is a variable none of whose alternatives derives the
//! symbol, the rejection is [`MatchError::NoAlternativeMatched`] naming that
//! variable rather than [`MatchError::SymbolMismatch`]; both count as
//! [`MatchError::is_mismatch`].

pub mod cli;
pub mod errors;
pub mod grammar;
pub mod runtime;
pub mod syntax;
pub mod token;

pub use errors::{GrammarError, MatchError};
pub use grammar::{Grammar, GrammarBuilder, DEFAULT_START};
pub use runtime::{run, Input, Recognizer, RunResult, TraceStep};
pub use syntax::load_grammar;
pub use token::{Symbol, Token, TokenKind};
