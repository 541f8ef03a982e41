use std::{fs::read_to_string, io::Read, path::Path};

use anyhow::Context;

use crate::{
	error::PascalError,
	parser::Parser,
	scanner::{Rules, Scanner, Token},
	semantic::SemanticAnalyser,
};

/// Analyser is the front end driver: scanner, parser and semantic analyser
/// wired together over one shared set of lexical rules.
pub struct Analyser {
	rules: Rules,
}

impl Default for Analyser {
	fn default() -> Self { Self::new() }
}

impl Analyser {
	pub fn new() -> Self { Self { rules: Rules::default() } }

	/// Run the analysis on a source file.
	pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Token>, PascalError> {
		let source = read_to_string(path).context("Failed open source file")?;
		self.run(&source)
	}

	/// Run the analysis on standard input, read to end of stream.
	pub fn run_stdin(&self) -> Result<Vec<Token>, PascalError> {
		let mut source = String::new();
		std::io::stdin().read_to_string(&mut source).context("Failed read standard input")?;
		self.run(&source)
	}

	/// Run the full pipeline on the given source code. Returns the token
	/// sequence of an accepted program, or the first error found.
	pub fn run(&self, source: &str) -> Result<Vec<Token>, PascalError> {
		let tokens = Scanner::new(&self.rules).scan(source)?;

		let mut parser = Parser::new(tokens.clone(), SemanticAnalyser::new());
		parser.analyse()?;

		Ok(tokens)
	}
}
