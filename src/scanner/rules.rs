use std::collections::HashSet;

use regex::Regex;

use super::token::TokenKind;

pub const COMMENT_OPEN: &str = "{";
pub const COMMENT_CLOSE: &str = "}";
pub const COMMENT_INLINE: &str = "//";
pub const ASSIGNMENT: &str = ":=";

/// Type denotation keywords, in the order they map to symbol types.
pub const TYPE_NAMES: [&str; 3] = ["integer", "real", "boolean"];

/// The lexical rules of the language: compiled patterns plus the word and
/// symbol sets each category matches. Built once and passed by reference.
pub struct Rules {
	identifier:     Regex,
	integer:        Regex,
	real:           Regex,
	splitter:       Regex,
	keywords:       HashSet<&'static str>,
	booleans:       HashSet<&'static str>,
	delimiters:     HashSet<&'static str>,
	relational:     HashSet<&'static str>,
	additive:       HashSet<&'static str>,
	multiplicative: HashSet<&'static str>,
	logical:        HashSet<&'static str>,
}

impl Default for Rules {
	fn default() -> Self {
		Self {
			identifier:     compile(r"^[a-zA-Z]\w*$"),
			integer:        compile(r"^\d+$"),
			real:           compile(r"^\d+\.\d+$"),
			// Separators only. Multi-char symbols listed first so `:=`
			// wins over `:` and `<=` over `<`.
			splitter:       compile(r"\{|\}|//|:=|<=|>=|<>|[=<>+\-*/;.:,()]"),
			keywords:       HashSet::from([
				"program",
				"var",
				"integer",
				"real",
				"boolean",
				"procedure",
				"begin",
				"end",
				"if",
				"then",
				"else",
				"while",
				"do",
				"not",
			]),
			booleans:       HashSet::from(["true", "false"]),
			delimiters:     HashSet::from([";", ".", ":", ",", "(", ")"]),
			relational:     HashSet::from(["<=", ">=", "<>", "=", "<", ">"]),
			additive:       HashSet::from(["+", "-"]),
			multiplicative: HashSet::from(["*", "/"]),
			logical:        HashSet::from(["and", "or"]),
		}
	}
}

impl Rules {
	/// Split a whitespace-free word at every separator symbol, keeping the
	/// separators and the spans between them.
	pub fn split_symbols<'w>(&self, word: &'w str) -> Vec<&'w str> {
		let mut parts = Vec::new();
		let mut last = 0;
		for m in self.splitter.find_iter(word) {
			if m.start() > last {
				parts.push(&word[last..m.start()]);
			}
			parts.push(m.as_str());
			last = m.end();
		}
		if last < word.len() {
			parts.push(&word[last..]);
		}
		parts
	}

	/// Classify a lower-cased lexeme, literals before words, symbols by set
	/// membership, identifiers last. `None` means the lexeme is not part of
	/// the language.
	pub fn classify(&self, lexeme: &str) -> Option<TokenKind> {
		use TokenKind::*;
		if lexeme == ASSIGNMENT {
			Some(Assignment)
		} else if self.integer.is_match(lexeme) {
			Some(Integer)
		} else if self.real.is_match(lexeme) {
			Some(Real)
		} else if self.booleans.contains(lexeme) {
			Some(Boolean)
		} else if self.delimiters.contains(lexeme) {
			Some(Delimiter)
		} else if self.relational.contains(lexeme) {
			Some(RelationalOperator)
		} else if self.additive.contains(lexeme) {
			Some(AdditiveOperator)
		} else if self.multiplicative.contains(lexeme) {
			Some(MultiplicativeOperator)
		} else if self.logical.contains(lexeme) {
			Some(LogicalOperator)
		} else if self.keywords.contains(lexeme) {
			Some(Keyword)
		} else if self.identifier.is_match(lexeme) {
			Some(Identifier)
		} else {
			None
		}
	}

	pub fn is_integer(&self, lexeme: &str) -> bool { self.integer.is_match(lexeme) }
}

fn compile(pattern: &str) -> Regex {
	// Patterns are string literals, compilation cannot fail.
	Regex::new(pattern).expect("invalid lexical rule pattern")
}
