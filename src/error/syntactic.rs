use super::SemanticError;
use crate::scanner::Token;

/// Errors raised while matching grammar rules. Syntax errors are catchable,
/// the parser rolls back and tries the next alternative. Semantic errors are
/// final and abort the whole parse.
#[derive(thiserror::Error, Debug)]
pub enum ParserError {
	#[error(transparent)]
	Syntax(#[from] SyntaxError),
	#[error(transparent)]
	Semantic(#[from] SemanticError),
}

/// A syntax error with optional offending-token context, rendered as
/// `<description>, token '<text>', at line <n>`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
	description: String,
	token:       Option<String>,
	line:        Option<usize>,
}

impl SyntaxError {
	pub fn new(description: impl Into<String>) -> Self {
		Self { description: description.into(), token: None, line: None }
	}

	pub fn at_token(description: impl Into<String>, token: &Token) -> Self {
		Self { description: description.into(), token: Some(token.lexeme.clone()), line: Some(token.line) }
	}
}

impl std::fmt::Display for SyntaxError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.description)?;
		if let Some(token) = &self.token {
			write!(f, ", token '{token}'")?;
		}
		if let Some(line) = self.line {
			write!(f, ", at line {line}")?;
		}
		Ok(())
	}
}
