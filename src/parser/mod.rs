pub mod listener;

pub use listener::{NullListener, ParseListener};

use log::debug;

use crate::{
	error::{ParserError, SyntaxError},
	scanner::{rules, Token, TokenKind},
};

/// Parser recognizes the program grammar by recursive descent over the token
/// sequence. The cursor is a plain index, each rule takes the index it starts
/// at and returns the index after what it consumed. Ambiguous spots are
/// resolved by trying alternatives in order, rolling the listener back with
/// `match_index` before each retry. Syntax errors are catchable at those
/// spots, semantic errors from the listener always abort.
pub struct Parser<L: ParseListener> {
	tokens:   Vec<Token>,
	listener: L,
}

impl<L: ParseListener> Parser<L> {
	pub fn new(tokens: Vec<Token>, listener: L) -> Self { Self { tokens, listener } }

	pub fn into_listener(self) -> L { self.listener }

	/// Match the whole program: header, declarations, compound command and
	/// the closing full stop. Nothing may follow the full stop.
	pub fn analyse(&mut self) -> Result<(), ParserError> {
		let mut i = 0;

		if !self.is_token(i, "program") {
			return Err(self.err_at("Missing key word 'program'", i).into());
		}
		i += 1;

		if !self.is_kind(i, TokenKind::Identifier) {
			return Err(self.err_at("Missing program identifier", i).into());
		}
		i += 1;

		let name = self.get(i - 1)?;
		self.listener.on_scope_begin(i - 1, name.line)?;

		if !self.is_token(i, ";") {
			return Err(self.err_at("Missing ';'", i).into());
		}
		i += 1;

		let i = self.match_variable_declarations(i)?;
		let i = self.match_procedure_declarations(i)?;
		let i = self.match_compound_command(i)?;

		let end = self.get(i - 1)?;
		self.listener.on_scope_end(i - 1, end.line)?;

		if !self.is_token(i, ".") {
			return Err(self.err_at("Missing '.' at end of file", i).into());
		}
		if self.has(i + 1) {
			return Err(SyntaxError::new("Remaining code after program end").into());
		}

		Ok(())
	}
}

impl<L: ParseListener> Parser<L> {
	fn has(&self, i: usize) -> bool { self.tokens.len() > i }

	fn get(&self, i: usize) -> Result<Token, SyntaxError> {
		self.tokens.get(i).cloned().ok_or_else(|| self.eof_error())
	}

	fn eof_error(&self) -> SyntaxError {
		match self.tokens.last() {
			Some(t) => SyntaxError::at_token("Unexpected end of file", t),
			None => SyntaxError::new("Unexpected end of file"),
		}
	}

	fn is_token(&self, i: usize, token: &str) -> bool {
		matches!(self.tokens.get(i), Some(t) if t.lexeme == token)
	}

	fn is_kind(&self, i: usize, kind: TokenKind) -> bool {
		matches!(self.tokens.get(i), Some(t) if t.kind == kind)
	}

	fn is_type_name(&self, i: usize) -> bool {
		matches!(self.tokens.get(i), Some(t) if rules::TYPE_NAMES.contains(&t.lexeme.as_str()))
	}

	/// Error naming the token at `i`, or the end of file when `i` is past it.
	fn err_at(&self, description: &str, i: usize) -> SyntaxError {
		match self.tokens.get(i) {
			Some(t) => SyntaxError::at_token(description, t),
			None => self.eof_error(),
		}
	}

	/// Error naming the token at `i`, falling back to the last token.
	fn err_near(&self, description: &str, i: usize) -> SyntaxError {
		match self.tokens.get(i).or_else(|| self.tokens.last()) {
			Some(t) => SyntaxError::at_token(description, t),
			None => SyntaxError::new(description),
		}
	}
}

impl<L: ParseListener> Parser<L> {
	fn match_variable_declarations(&mut self, i: usize) -> Result<usize, ParserError> {
		if self.is_token(i, "var") {
			self.match_variable_declaration_list(i + 1, true)
		} else {
			Ok(i)
		}
	}

	fn match_variable_declaration_list(&mut self, i: usize, primary: bool) -> Result<usize, ParserError> {
		let state = i;
		let i = self.match_identifiers_list(i)?;

		if i > state {
			if !self.is_token(i, ":") {
				return Err(self.err_at("Missing ':'", i).into());
			}
			let i = i + 1;
			if !self.is_type_name(i) {
				return Err(self.err_at("Invalid or missing type", i).into());
			}
			let kind = self.get(i)?;
			self.listener.on_type_definition(i, &kind)?;
			let i = i + 1;
			if !self.is_token(i, ";") {
				return Err(self.err_at("Missing ';'", i).into());
			}
			self.match_variable_declaration_list(i + 1, false)
		} else if primary {
			Err(self.err_at("Missing identifier", i).into())
		} else {
			Ok(i)
		}
	}

	fn match_identifiers_list(&mut self, i: usize) -> Result<usize, ParserError> {
		if !self.is_kind(i, TokenKind::Identifier) {
			return Ok(i);
		}

		let name = self.get(i)?;
		self.listener.on_variable_declaration(i, &name)?;

		let i = i + 1;
		if self.is_token(i, ",") {
			let state = i + 1;
			let i = self.match_identifiers_list(state)?;
			if i == state {
				return Err(self.err_at("Missing identifier", i).into());
			}
			return Ok(i);
		}

		Ok(i)
	}

	fn match_procedure_declarations(&mut self, i: usize) -> Result<usize, ParserError> {
		let state = i;
		let i = self.match_procedure_declaration(i)?;

		if i > state {
			if !self.is_token(i, ";") {
				return Err(self.err_at("Missing ';'", i).into());
			}
			return self.match_procedure_declarations(i + 1);
		}

		Ok(i)
	}

	fn match_procedure_declaration(&mut self, i: usize) -> Result<usize, ParserError> {
		if !self.is_token(i, "procedure") {
			return Ok(i);
		}

		let i = i + 1;
		if !self.is_kind(i, TokenKind::Identifier) {
			return Err(self.err_at("Missing procedure identifier", i).into());
		}

		let name = self.get(i)?;
		self.listener.on_procedure_declaration(i, &name)?;
		self.listener.on_scope_begin(i, name.line)?;
		let next = self.get(i + 1)?;
		self.listener.on_procedure_parameters_begin(i + 1, &next)?;

		let i = self.match_parameters(i + 1)?;

		let after = self.get(i)?;
		self.listener.on_procedure_parameters_end(i, &after)?;

		if !self.is_token(i, ";") {
			return Err(self.err_at("Missing ';'", i).into());
		}

		let i = self.match_variable_declarations(i + 1)?;
		let i = self.match_procedure_declarations(i)?;
		let i = self.match_compound_command(i)?;

		let end = self.get(i - 1)?;
		self.listener.on_scope_end(i - 1, end.line)?;

		Ok(i)
	}

	fn match_parameters(&mut self, i: usize) -> Result<usize, ParserError> {
		if !self.is_token(i, "(") {
			return Ok(i);
		}

		let i = self.match_parameters_list(i + 1)?;
		if !self.is_token(i, ")") {
			return Err(self.err_at("Missing ')'", i).into());
		}

		Ok(i + 1)
	}

	fn match_parameters_list(&mut self, i: usize) -> Result<usize, ParserError> {
		let state = i;
		let i = self.match_identifiers_list(i)?;
		if i == state {
			return Ok(i);
		}

		if !self.is_token(i, ":") {
			return Err(self.err_at("Missing ':'", i).into());
		}
		let i = i + 1;
		if !self.is_type_name(i) {
			return Err(self.err_at("Invalid or missing type", i).into());
		}
		let kind = self.get(i)?;
		self.listener.on_type_definition(i, &kind)?;

		let i = i + 1;
		if self.is_token(i, ";") {
			self.match_parameters_list(i + 1)
		} else {
			Ok(i)
		}
	}

	fn match_compound_command(&mut self, i: usize) -> Result<usize, ParserError> {
		if !self.is_token(i, "begin") {
			return Err(self.err_at("Missing 'begin' command", i).into());
		}

		let open = self.get(i)?;
		self.listener.on_block_begin(i, &open)?;

		let i = self.match_command_list(i + 1)?;

		if !self.is_token(i, "end") {
			return Err(self.err_at("Missing 'end' command", i).into());
		}

		let close = self.get(i)?;
		self.listener.on_block_end(i, &close)?;

		Ok(i + 1)
	}

	/// Zero or more commands separated by `;`. The empty list is the final
	/// alternative, so a malformed command rolls back to an empty match and
	/// leaves its tokens for the enclosing rule to complain about.
	fn match_command_list(&mut self, i: usize) -> Result<usize, ParserError> {
		let next = match self.match_command(i) {
			Ok(next) => next,
			Err(ParserError::Syntax(_)) => {
				self.listener.match_index(i);
				return Ok(i);
			}
			Err(e) => return Err(e),
		};

		if self.is_token(next, ";") {
			return self.match_command_list(next + 1);
		}

		Ok(next)
	}

	/// A command is an assignment, a procedure call, a nested compound
	/// command, `if`/`then`/`else`, `while`/`do` or `do`/`while`, tried in
	/// that order. Every abandoned alternative rolls the listener back to the
	/// command start. When none matches, the last alternative's error wins.
	fn match_command(&mut self, i: usize) -> Result<usize, ParserError> {
		if self.is_kind(i, TokenKind::Identifier) {
			debug!("command expression begin ({})", i - 1);
			let prev = self.get(i - 1)?;
			self.listener.on_expression_begin(i - 1, &prev)?;

			let next = self.match_identifier(i)?;

			if !self.is_kind(next, TokenKind::Assignment) {
				return self.match_procedure_call(next - 1);
			}

			let name = self.get(next - 1)?;
			self.listener.on_variable(next - 1, &name)?;
			let op = self.get(next)?;
			self.listener.on_operator(next, &op)?;

			let end = self.match_expression(next + 1)?;

			debug!("command expression end ({end})");
			let close = self.get(end)?;
			self.listener.on_expression_end(end, &close)?;

			return Ok(end);
		}

		match self.match_compound_command(i) {
			Ok(n) => return Ok(n),
			Err(ParserError::Syntax(_)) => self.listener.match_index(i),
			Err(e) => return Err(e),
		}

		match self.match_if_command(i) {
			Ok(n) => return Ok(n),
			Err(ParserError::Syntax(_)) => self.listener.match_index(i),
			Err(e) => return Err(e),
		}

		match self.match_while_command(i) {
			Ok(n) => return Ok(n),
			Err(ParserError::Syntax(_)) => self.listener.match_index(i),
			Err(e) => return Err(e),
		}

		match self.match_do_while_command(i) {
			Ok(n) => Ok(n),
			Err(e) => {
				if matches!(e, ParserError::Syntax(_)) {
					self.listener.match_index(i);
				}
				Err(e)
			}
		}
	}

	fn match_if_command(&mut self, i: usize) -> Result<usize, ParserError> {
		if !self.is_token(i, "if") {
			return Err(self.err_at("Missing 'if' statement", i).into());
		}

		let keyword = self.get(i)?;
		self.listener.on_expression_begin(i, &keyword)?;

		let inner = self.match_expression(i + 1)?;

		if !self.is_token(inner, "then") {
			return Err(self.err_at("Missing 'then' statement", inner).into());
		}

		let then = self.get(inner)?;
		self.listener.on_expression_end(inner, &then)?;
		self.listener.on_control_condition(inner, &then)?;

		let inner = self.match_command(inner + 1)?;
		self.match_else(inner)
	}

	fn match_else(&mut self, i: usize) -> Result<usize, ParserError> {
		if self.is_token(i, "else") {
			self.match_command(i + 1)
		} else {
			Ok(i)
		}
	}

	fn match_while_command(&mut self, i: usize) -> Result<usize, ParserError> {
		if !self.is_token(i, "while") {
			return Err(self.err_at("Missing 'while' statement", i).into());
		}

		let keyword = self.get(i)?;
		self.listener.on_expression_begin(i, &keyword)?;

		let inner = self.match_expression(i + 1)?;

		if !self.is_token(inner, "do") {
			return Err(self.err_at("Missing 'do' statement", inner).into());
		}

		let next = self.get(inner)?;
		self.listener.on_expression_end(inner, &next)?;
		self.listener.on_control_condition(inner, &next)?;

		self.match_command(inner + 1)
	}

	fn match_do_while_command(&mut self, i: usize) -> Result<usize, ParserError> {
		if !self.is_token(i, "do") {
			return Err(self.err_at("Missing 'do' statement", i).into());
		}

		let inner = self.match_command(i + 1)?;

		if !self.is_token(inner, "while") {
			return Err(self.err_at("Missing 'while' statement", inner).into());
		}

		let keyword = self.get(inner)?;
		self.listener.on_expression_begin(inner, &keyword)?;

		let end = self.match_expression(inner + 1)?;

		let close = self.get(end)?;
		self.listener.on_expression_end(end, &close)?;
		self.listener.on_control_condition(end, &close)?;

		Ok(end)
	}

	fn match_identifier(&mut self, i: usize) -> Result<usize, ParserError> {
		if !self.is_kind(i, TokenKind::Identifier) {
			return Err(self.err_near("Missing identifier", i).into());
		}

		Ok(i + 1)
	}

	fn match_procedure_call(&mut self, i: usize) -> Result<usize, ParserError> {
		if !self.is_kind(i, TokenKind::Identifier) {
			return Err(self.err_at("Missing procedure call identifier", i).into());
		}

		let name = self.get(i)?;
		self.listener.on_procedure(i, &name)?;

		let i = i + 1;
		debug!("procedure arguments begin ({i})");
		let open = self.get(i)?;
		self.listener.on_procedure_arguments_begin(i, &open)?;

		let mut i = i;
		if self.is_token(i, "(") {
			if self.is_token(i + 1, ")") {
				i += 2;
			} else {
				i = self.match_expression_list(i + 1)?;
				if !self.is_token(i, ")") {
					return Err(self.err_at("Missing delimiter ')' from procedure call", i).into());
				}
				i += 1;
			}
		}

		debug!("procedure arguments end ({i})");
		let close = self.get(i)?;
		self.listener.on_procedure_arguments_end(i, &close)?;

		Ok(i)
	}

	fn match_expression_list(&mut self, i: usize) -> Result<usize, ParserError> {
		debug!("argument expression begin ({})", i - 1);
		let prev = self.get(i - 1)?;
		self.listener.on_expression_begin(i - 1, &prev)?;

		let i = self.match_expression(i)?;

		debug!("argument expression end ({i})");
		let close = self.get(i)?;
		self.listener.on_expression_end(i, &close)?;
		self.listener.on_procedure_argument(i, &close)?;

		if self.is_token(i, ",") {
			self.match_expression_list(i + 1)
		} else {
			Ok(i)
		}
	}

	fn match_expression(&mut self, i: usize) -> Result<usize, ParserError> {
		let i = self.match_simple_expression(i)?;

		match self.match_expression_tail(i) {
			Ok(n) => Ok(n),
			Err(ParserError::Syntax(_)) => {
				self.listener.match_index(i);
				Ok(i)
			}
			Err(e) => Err(e),
		}
	}

	fn match_expression_tail(&mut self, i: usize) -> Result<usize, ParserError> {
		let op = match self.tokens.get(i) {
			Some(t) if matches!(t.kind, TokenKind::RelationalOperator | TokenKind::LogicalOperator) => t.clone(),
			_ => return Err(self.err_near("Missing relational operator", i).into()),
		};

		self.listener.on_operator(i, &op)?;
		self.match_simple_expression(i + 1)
	}

	fn match_simple_expression(&mut self, i: usize) -> Result<usize, ParserError> {
		if !self.has(i) {
			return Err(self.err_near("Missing expression", i).into());
		}

		debug!("simple expression begin ({})", i - 1);
		let prev = self.get(i - 1)?;
		self.listener.on_expression_begin(i - 1, &prev)?;

		let mut i = i;
		if self.is_token(i, "+") || self.is_token(i, "-") {
			i += 1;
		}

		let i = self.match_term(i)?;
		let i = self.match_simple_expression_complement(i)?;

		debug!("simple expression end ({i})");
		let close = self.get(i)?;
		self.listener.on_expression_end(i, &close)?;

		Ok(i)
	}

	fn match_simple_expression_complement(&mut self, i: usize) -> Result<usize, ParserError> {
		if !self.is_kind(i, TokenKind::AdditiveOperator) {
			return Ok(i);
		}

		let op = self.get(i)?;
		self.listener.on_operator(i, &op)?;

		debug!("simple expression complement begin ({i})");
		self.listener.on_expression_begin(i, &op)?;

		let i = self.match_term(i + 1)?;
		let i = self.match_simple_expression_complement(i)?;

		debug!("simple expression complement end ({i})");
		let close = self.get(i)?;
		self.listener.on_expression_end(i, &close)?;

		Ok(i)
	}

	fn match_term(&mut self, i: usize) -> Result<usize, ParserError> {
		let i = self.match_factor(i)?;

		if self.is_kind(i, TokenKind::MultiplicativeOperator) {
			let op = self.get(i)?;
			self.listener.on_operator(i, &op)?;
			return self.match_term(i + 1);
		}

		Ok(i)
	}

	fn match_factor(&mut self, i: usize) -> Result<usize, ParserError> {
		let t = match self.tokens.get(i) {
			Some(t) => t.clone(),
			None => return Err(self.err_near("Missing factor", i).into()),
		};

		match t.kind {
			TokenKind::Identifier => {
				let next = self.match_identifier(i)?;
				self.listener.on_variable(i, &t)?;
				Ok(next)
			}
			_ if t.lexeme == "(" => {
				self.listener.on_expression_begin(i, &t)?;

				let i = self.match_expression(i + 1)?;

				if !self.is_token(i, ")") {
					return Err(self.err_at("Missing ')'", i).into());
				}

				let close = self.get(i)?;
				self.listener.on_expression_end(i, &close)?;

				Ok(i + 1)
			}
			_ if t.lexeme == "not" => self.match_factor(i + 1),
			TokenKind::Integer | TokenKind::Real | TokenKind::Boolean => {
				self.listener.on_value(i, &t)?;
				Ok(i + 1)
			}
			_ => Err(self.err_at("Didn't match any factor possibility", i).into()),
		}
	}
}
