pub mod rules;
pub mod token;

pub use rules::Rules;
pub use token::{Token, TokenKind};

use crate::error::LexicalError;

/// Scanner turns source text into a token sequence, line by line. Words are
/// split on whitespace, then sub-split at separator symbols, then classified
/// against the lexical rules. Comment text never reaches classification.
pub struct Scanner<'r> {
	rules:      &'r Rules,
	tokens:     Vec<Token>,
	commenting: bool,
	line:       usize,
}

impl<'r> Scanner<'r> {
	pub fn new(rules: &'r Rules) -> Self {
		Self { rules, tokens: Vec::new(), commenting: false, line: 0 }
	}

	/// Scan the whole source. Stops at the first lexical error.
	pub fn scan(mut self, source: &str) -> Result<Vec<Token>, LexicalError> {
		for line in source.lines() {
			self.scan_line(line)?;
		}
		if self.commenting {
			return Err(LexicalError::UnterminatedComment);
		}
		Ok(self.tokens)
	}

	fn scan_line(&mut self, text: &str) -> Result<(), LexicalError> {
		self.line += 1;
		for word in text.split_whitespace() {
			let symbols = self.rules.split_symbols(word);
			let mut i = 0;
			while i < symbols.len() {
				let symbol = symbols[i];
				if self.commenting {
					if symbol == rules::COMMENT_CLOSE {
						self.commenting = false;
					}
					i += 1;
					continue;
				}
				if symbol == rules::COMMENT_OPEN {
					self.commenting = true;
					i += 1;
				} else if symbol == rules::COMMENT_CLOSE {
					return Err(LexicalError::UnopenedComment { line: self.line });
				} else if symbol == rules::COMMENT_INLINE {
					// Rest of the line is a comment.
					return Ok(());
				} else if symbol == "." && matches!(symbols.get(i + 1), Some(next) if self.merge_real(next)) {
					// `3.4` splits into `3` `.` `4`, reassembled here.
					i += 2;
				} else {
					self.push_symbol(symbol)?;
					i += 1;
				}
			}
		}
		Ok(())
	}

	/// Merge a trailing integer token, a dot and a digit run into one real
	/// literal. Only applies when the integer sits on the current line.
	fn merge_real(&mut self, fraction: &str) -> bool {
		if !self.rules.is_integer(fraction) {
			return false;
		}
		match self.tokens.last() {
			Some(t) if t.kind == TokenKind::Integer && t.line == self.line => {
				let lexeme = format!("{}.{fraction}", t.lexeme);
				self.tokens.pop();
				self.tokens.push(Token::new(lexeme, TokenKind::Real, self.line));
				true
			}
			_ => false,
		}
	}

	fn push_symbol(&mut self, symbol: &str) -> Result<(), LexicalError> {
		let lexeme = symbol.to_lowercase();
		match self.rules.classify(&lexeme) {
			Some(kind) => {
				self.tokens.push(Token::new(lexeme, kind, self.line));
				Ok(())
			}
			None => Err(LexicalError::UnknownSymbol { symbol: lexeme, line: self.line }),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{TokenKind::*, *};

	fn scan(input: &str) -> Result<Vec<Token>, LexicalError> {
		let rules = Rules::default();
		Scanner::new(&rules).scan(input)
	}

	fn kinds(input: &str) -> Vec<TokenKind> {
		scan(input).unwrap().iter().map(|t| t.kind).collect()
	}

	#[test]
	fn scan_keywords() {
		for word in
			["program", "var", "integer", "real", "boolean", "procedure", "begin", "end", "if", "then", "else", "while", "do", "not"]
		{
			assert_eq!(kinds(word), vec![Keyword], "{word}");
		}
	}

	#[test]
	fn scan_literals() {
		assert_eq!(kinds("42"), vec![Integer]);
		assert_eq!(kinds("true false"), vec![Boolean, Boolean]);
		let tokens = scan("3.4").unwrap();
		assert_eq!(tokens, vec![Token::new("3.4", Real, 1)]);
	}

	#[test]
	fn scan_operators() {
		assert_eq!(kinds(":="), vec![Assignment]);
		assert_eq!(kinds("<= >= <> = < >"), vec![RelationalOperator; 6]);
		assert_eq!(kinds("+ -"), vec![AdditiveOperator; 2]);
		assert_eq!(kinds("* /"), vec![MultiplicativeOperator; 2]);
		assert_eq!(kinds("and or"), vec![LogicalOperator, LogicalOperator]);
		assert_eq!(kinds("; . : , ( )"), vec![Delimiter; 6]);
	}

	#[test]
	fn scan_identifiers() {
		assert_eq!(kinds("x abc1 snake_case android orbit"), vec![Identifier; 5]);
		assert!(matches!(scan("_leading"), Err(LexicalError::UnknownSymbol { .. })));
		assert!(matches!(scan("1abc"), Err(LexicalError::UnknownSymbol { .. })));
	}

	#[test]
	fn scan_lowercases_lexemes() {
		let tokens = scan("PROGRAM Foo").unwrap();
		assert_eq!(tokens[0], Token::new("program", Keyword, 1));
		assert_eq!(tokens[1], Token::new("foo", Identifier, 1));
	}

	#[test]
	fn scan_splits_glued_symbols() {
		let tokens = scan("a:=1;").unwrap();
		let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
		assert_eq!(lexemes, vec!["a", ":=", "1", ";"]);
		assert_eq!(kinds("(x<=y)"), vec![Delimiter, Identifier, RelationalOperator, Identifier, Delimiter]);
	}

	#[test]
	fn scan_real_merge_is_same_line_only() {
		let tokens = scan("1\n.\n2").unwrap();
		assert_eq!(tokens.len(), 3);
		assert_eq!(tokens[0], Token::new("1", Integer, 1));
		assert_eq!(tokens[1], Token::new(".", Delimiter, 2));
		assert_eq!(tokens[2], Token::new("2", Integer, 3));
	}

	#[test]
	fn scan_block_comments() {
		assert_eq!(kinds("a { anything $ % here } b"), vec![Identifier, Identifier]);
		assert_eq!(kinds("a { line\nstill comment\n} b"), vec![Identifier, Identifier]);
		assert!(matches!(scan("}"), Err(LexicalError::UnopenedComment { line: 1 })));
		assert!(matches!(scan("a { not closed"), Err(LexicalError::UnterminatedComment)));
	}

	#[test]
	fn scan_inline_comments() {
		assert_eq!(kinds("a // b c d"), vec![Identifier]);
		assert_eq!(kinds("a // b\nc"), vec![Identifier, Identifier]);
	}

	#[test]
	fn scan_tracks_lines() {
		let tokens = scan("program p;\n\nbegin\nend.").unwrap();
		let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
		assert_eq!(lines, vec![1, 1, 1, 3, 4, 4]);
	}
}
