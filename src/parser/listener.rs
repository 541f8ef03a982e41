use crate::{error::SemanticError, scanner::Token};

/// Events the parser reports while matching grammar rules, in source order.
/// Every event carries the token cursor index it was fired at, so a listener
/// can discard state recorded by an abandoned grammar alternative when the
/// parser rolls back.
///
/// All methods default to doing nothing, a listener overrides the ones it
/// cares about.
pub trait ParseListener {
	/// The parser moved its cursor back to `index`. State recorded at or
	/// after `index` belongs to a failed alternative and must be dropped.
	fn match_index(&mut self, index: usize) { let _ = index; }

	fn on_scope_begin(&mut self, index: usize, line: usize) -> Result<(), SemanticError> {
		let _ = (index, line);
		Ok(())
	}
	fn on_scope_end(&mut self, index: usize, line: usize) -> Result<(), SemanticError> {
		let _ = (index, line);
		Ok(())
	}
	fn on_block_begin(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		let _ = (index, token);
		Ok(())
	}
	fn on_block_end(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		let _ = (index, token);
		Ok(())
	}
	/// A variable name was declared, its type arrives in a later
	/// `on_type_definition`.
	fn on_variable_declaration(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		let _ = (index, token);
		Ok(())
	}
	/// A type name closing one or more pending variable declarations.
	fn on_type_definition(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		let _ = (index, token);
		Ok(())
	}
	/// A variable was used in a command or expression.
	fn on_variable(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		let _ = (index, token);
		Ok(())
	}
	/// A literal operand inside an expression.
	fn on_value(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		let _ = (index, token);
		Ok(())
	}
	fn on_operator(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		let _ = (index, token);
		Ok(())
	}
	fn on_expression_begin(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		let _ = (index, token);
		Ok(())
	}
	fn on_expression_end(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		let _ = (index, token);
		Ok(())
	}
	fn on_procedure_declaration(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		let _ = (index, token);
		Ok(())
	}
	fn on_procedure_parameters_begin(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		let _ = (index, token);
		Ok(())
	}
	fn on_procedure_parameters_end(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		let _ = (index, token);
		Ok(())
	}
	/// A procedure name was called.
	fn on_procedure(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		let _ = (index, token);
		Ok(())
	}
	fn on_procedure_arguments_begin(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		let _ = (index, token);
		Ok(())
	}
	fn on_procedure_argument(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		let _ = (index, token);
		Ok(())
	}
	fn on_procedure_arguments_end(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		let _ = (index, token);
		Ok(())
	}
	/// The expression just closed is the condition of `if`, `while` or
	/// `do`-`while` and must be boolean.
	fn on_control_condition(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		let _ = (index, token);
		Ok(())
	}
}

/// Listener that ignores every event, for syntax-only runs.
pub struct NullListener;

impl ParseListener for NullListener {}
