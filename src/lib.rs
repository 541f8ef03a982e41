//! Front end for a small Pascal-like language.
//!
//! The analysis runs in three stages over one pass of the source:
//!
//! ## Scanning
//!
//! The [`Scanner`] reads the source line by line, splits each line at
//! whitespace and separator symbols, strips `{ ... }` and `//` comments and
//! classifies every remaining lexeme into a [`TokenKind`]. A `.` between two
//! digit runs on the same line is merged back into one real literal.
//!
//! ## Parsing
//!
//! The [`Parser`] recognizes the program grammar by recursive descent over
//! the token sequence. The cursor is a plain integer index. Where the grammar
//! is ambiguous at the current token, alternatives are tried in order and a
//! failed one is abandoned by re-attempting from the saved index. No tree is
//! built, the output is acceptance plus the event stream below.
//!
//! ## Semantic analysis
//!
//! The parser drives a [`ParseListener`] with one callback per grammar event,
//! each tagged with the cursor index it fired at. The [`SemanticAnalyser`]
//! listener maintains scope and block nesting, the symbol table, procedure
//! signatures and an expression-type stack, and rejects the program on the
//! first static-semantics violation. When the parser abandons an alternative
//! it calls `match_index` so the listener discards everything the dead branch
//! recorded.
//!
//! A program is either accepted, yielding its token sequence, or rejected
//! with a single descriptive [`PascalError`].

pub mod cli;

mod analyser;
mod error;
mod parser;
mod scanner;
mod semantic;

pub use analyser::Analyser;
pub use error::{LexicalError, ParserError, PascalError, SemanticError, SyntaxError};
pub use parser::{NullListener, ParseListener, Parser};
pub use scanner::{Rules, Scanner, Token, TokenKind};
pub use semantic::SemanticAnalyser;
