pub mod lexical;
pub mod semantic;
pub mod syntactic;

pub use lexical::LexicalError;
pub use semantic::SemanticError;
pub use syntactic::{ParserError, SyntaxError};

/// PascalError is the top-level error type for the front end. Every pipeline
/// stage error converts into it, and a rejected source yields exactly one.
#[derive(thiserror::Error, Debug)]
pub enum PascalError {
	/// Internal front end error, should never happen
	#[error("PascalInternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// Scanner rejected the source text
	#[error(transparent)]
	Lexical(#[from] LexicalError),
	/// Parser rejected the token sequence
	#[error(transparent)]
	Syntax(#[from] SyntaxError),
	/// Semantic analyser rejected the program
	#[error(transparent)]
	Semantic(#[from] SemanticError),
}

impl From<ParserError> for PascalError {
	fn from(e: ParserError) -> Self {
		match e {
			ParserError::Syntax(e) => Self::Syntax(e),
			ParserError::Semantic(SemanticError::InternalError(e)) => Self::InternalError(e),
			ParserError::Semantic(e) => Self::Semantic(e),
		}
	}
}
