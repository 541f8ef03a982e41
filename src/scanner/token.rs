/// A token produced by the scanner. Lexemes are stored lower-cased, the
/// language is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
	pub lexeme: String,
	pub kind:   TokenKind,
	pub line:   usize,
}

impl Token {
	pub fn new(lexeme: impl Into<String>, kind: TokenKind, line: usize) -> Self {
		Self { lexeme: lexeme.into(), kind, line }
	}
}

impl std::fmt::Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:<6} {:<20} {}", self.line, self.lexeme, self.kind)
	}
}

/// The lexical categories of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
	/// Reserved word: `program`, `var`, `begin`, `if`, ...
	Keyword,
	/// Letter followed by letters, digits or underscores.
	Identifier,
	/// Integer literal, e.g. `42`.
	Integer,
	/// Real literal, e.g. `3.14`.
	Real,
	/// Boolean literal `true` or `false`.
	Boolean,
	/// Punctuation: `;` `.` `:` `,` `(` `)`.
	Delimiter,
	/// Assignment operator `:=`.
	Assignment,
	/// Relational operator: `<=` `>=` `<>` `=` `<` `>`.
	RelationalOperator,
	/// Additive operator `+` or `-`.
	AdditiveOperator,
	/// Multiplicative operator `*` or `/`.
	MultiplicativeOperator,
	/// Logical operator `and` or `or`, Boolean operands only.
	LogicalOperator,
}

impl std::fmt::Display for TokenKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use TokenKind::*;
		let name = match self {
			Keyword => "Key-word",
			Identifier => "Identifier",
			Integer => "Integer",
			Real => "Real",
			Boolean => "Boolean",
			Delimiter => "Delimiter",
			Assignment => "Assignment",
			RelationalOperator => "Relational-operator",
			AdditiveOperator => "Additive-operator",
			MultiplicativeOperator => "Multiplicative-operator",
			LogicalOperator => "Logical-operator",
		};
		write!(f, "{name}")
	}
}
