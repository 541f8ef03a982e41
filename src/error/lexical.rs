/// Scanner related errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
	/// The lexeme matches no category of the language.
	#[error("The symbol '{symbol}' does not belong to this language, at line {line}")]
	UnknownSymbol { symbol: String, line: usize },
	/// A `}` appeared with no `{` before it.
	#[error("Closing comment without opening, at line {line}")]
	UnopenedComment { line: usize },
	/// A `{` was never closed before the source ended.
	#[error("Comment not closed, at end of file")]
	UnterminatedComment,
}
