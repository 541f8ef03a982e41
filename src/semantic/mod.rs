use std::collections::HashMap;

use log::{debug, trace};

use crate::{
	error::SemanticError,
	parser::ParseListener,
	scanner::{Token, TokenKind},
};

/// A stack value tagged with the parser cursor index it was recorded at.
/// Rollback removes values by comparing this index.
#[derive(Debug)]
struct Indexed<T> {
	index: usize,
	value: T,
}

/// Entries of the declaration stack. Scope and block markers nest like
/// parentheses, identifiers live between them at the depth they were
/// declared.
#[derive(Debug, PartialEq, Eq)]
enum StackEntry {
	Scope,
	Block,
	Identifier(String),
}

/// The type a declared identifier resolves to, or an expression folds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolType {
	Integer,
	Real,
	Boolean,
	Procedure,
}

/// Binary operator categories carried through the expression stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
	Assignment,
	Relational,
	Additive,
	Multiplicative,
	Logical,
}

/// Entries of the expression stack. A `Marker` is left by expression-begin
/// and bounds the fold performed by the matching expression-end.
#[derive(Debug, PartialEq, Eq)]
enum ExprEntry {
	Marker,
	Operand(SymbolType),
	Operator(Operator),
}

/// SemanticAnalyser enforces the static semantics while the parser walks the
/// grammar. It keeps a declaration stack of scope/block markers and
/// identifier names, a symbol table keyed by `depth+name`, procedure
/// signatures, and an expression stack folded into a type at every
/// expression-end. All state is index-tagged so `match_index` can discard
/// whatever an abandoned grammar alternative recorded.
#[derive(Default)]
pub struct SemanticAnalyser {
	tokens:      Vec<Indexed<StackEntry>>,
	expressions: Vec<Indexed<ExprEntry>>,

	identifiers_types:     HashMap<String, SymbolType>,
	procedures_parameters: HashMap<String, Vec<SymbolType>>,

	scope_depth: usize,
	block_depth: usize,

	untyped_variables:          usize,
	procedure_parameters_count: usize,
	procedure_arguments_count:  usize,

	last_procedure_key:   Option<String>,
	last_expression_type: Option<SymbolType>,
}

impl SemanticAnalyser {
	pub fn new() -> Self { Self::default() }

	/// Key of an identifier declared at `scope`. The depth prefix is what
	/// lets equal names coexist at different nesting depths.
	fn identifier_key(&self, name: &str, scope: usize) -> String { format!("{scope}+{name}") }

	fn push_entry(&mut self, i: usize, value: StackEntry) {
		trace!("push {value:?} ({i})");
		self.tokens.push(Indexed { index: i, value });
	}

	/// Pop one declaration-stack entry, keeping the depth counters and the
	/// symbol tables in step with it.
	fn pop_entry(&mut self) {
		let Some(entry) = self.tokens.pop() else { return };
		trace!("pop {:?} ({})", entry.value, entry.index);
		match entry.value {
			StackEntry::Scope => self.scope_depth -= 1,
			StackEntry::Block => self.block_depth -= 1,
			StackEntry::Identifier(name) => {
				let key = self.identifier_key(&name, self.scope_depth);
				if let Some(SymbolType::Procedure) = self.identifiers_types.remove(&key) {
					self.procedures_parameters.remove(&key);
				}
			}
		}
	}

	fn push_expression(&mut self, i: usize, value: ExprEntry) {
		trace!("expression push {value:?} ({i})");
		self.expressions.push(Indexed { index: i, value });
	}

	/// Discard every entry recorded at an index greater than `i`.
	fn discard_after(&mut self, i: usize) {
		while matches!(self.tokens.last(), Some(e) if e.index > i) {
			self.pop_entry();
		}
		while matches!(self.expressions.last(), Some(e) if e.index > i) {
			if let Some(e) = self.expressions.pop() {
				trace!("expression pop {:?}, its index {} > {i}", e.value, e.index);
			}
		}
	}

	/// Discard every entry recorded at or after index `i`.
	fn discard_from(&mut self, i: usize) {
		while matches!(self.tokens.last(), Some(e) if e.index >= i) {
			self.pop_entry();
		}
		while matches!(self.expressions.last(), Some(e) if e.index >= i) {
			if let Some(e) = self.expressions.pop() {
				trace!("expression pop {:?}, its index {} >= {i}", e.value, e.index);
			}
		}
	}

	/// Search the declaration stack for `name`, outermost use first, and
	/// return the depth it was declared at.
	fn resolve(&self, name: &str) -> Option<usize> {
		let mut scope = self.scope_depth;
		for entry in self.tokens.iter().rev() {
			match &entry.value {
				StackEntry::Scope => scope -= 1,
				StackEntry::Identifier(declared) if declared == name => return Some(scope),
				_ => {}
			}
		}
		None
	}

	/// True when `name` was already declared since the nearest scope marker.
	fn declared_in_scope(&self, name: &str) -> bool {
		for entry in self.tokens.iter().rev() {
			match &entry.value {
				StackEntry::Scope => return false,
				StackEntry::Identifier(declared) if declared == name => return true,
				_ => {}
			}
		}
		false
	}

	fn literal_type(kind: TokenKind) -> Result<SymbolType, SemanticError> {
		match kind {
			TokenKind::Integer => Ok(SymbolType::Integer),
			TokenKind::Real => Ok(SymbolType::Real),
			TokenKind::Boolean => Ok(SymbolType::Boolean),
			_ => Err(anyhow::anyhow!("value event for non-literal token kind {kind:?}").into()),
		}
	}

	fn operator_kind(kind: TokenKind) -> Result<Operator, SemanticError> {
		match kind {
			TokenKind::Assignment => Ok(Operator::Assignment),
			TokenKind::RelationalOperator => Ok(Operator::Relational),
			TokenKind::AdditiveOperator => Ok(Operator::Additive),
			TokenKind::MultiplicativeOperator => Ok(Operator::Multiplicative),
			TokenKind::LogicalOperator => Ok(Operator::Logical),
			_ => Err(anyhow::anyhow!("operator event for non-operator token kind {kind:?}").into()),
		}
	}

	fn declared_type(&self, token: &Token) -> Result<SymbolType, SemanticError> {
		match token.lexeme.as_str() {
			"integer" => Ok(SymbolType::Integer),
			"real" => Ok(SymbolType::Real),
			"boolean" => Ok(SymbolType::Boolean),
			_ => Err(anyhow::anyhow!("type definition with unknown type '{}'", token.lexeme).into()),
		}
	}

	/// Combine one `base <operator> current` step of an expression fold.
	/// `base` sits deeper in the stack, so it is the left-hand side.
	fn combine(
		op: Operator,
		base: SymbolType,
		current: SymbolType,
		token: &Token,
	) -> Result<SymbolType, SemanticError> {
		use SymbolType::*;
		match op {
			Operator::Assignment => {
				if base == current {
					Ok(current)
				} else if base == Boolean || current == Boolean || base == Integer {
					// A Real value never fits an Integer target, and
					// booleans only ever mix with booleans.
					Err(SemanticError::IncompatibleAssignment { token: token.lexeme.clone(), line: token.line })
				} else {
					Ok(Real)
				}
			}
			Operator::Logical => {
				if base == Boolean && current == Boolean {
					Ok(Boolean)
				} else {
					Err(SemanticError::IncompatibleLogicalOperation {
						token: token.lexeme.clone(),
						line:  token.line,
					})
				}
			}
			_ if base == Boolean || current == Boolean => {
				Err(SemanticError::IncompatibleOperation { token: token.lexeme.clone(), line: token.line })
			}
			Operator::Relational => Ok(Boolean),
			// Additive or multiplicative: any Real operand makes the
			// result Real, Integer with Integer stays Integer.
			_ => {
				if base == Real {
					Ok(Real)
				} else {
					Ok(current)
				}
			}
		}
	}
}

impl ParseListener for SemanticAnalyser {
	fn match_index(&mut self, index: usize) { self.discard_from(index); }

	fn on_scope_begin(&mut self, index: usize, _line: usize) -> Result<(), SemanticError> {
		self.push_entry(index, StackEntry::Scope);
		self.scope_depth += 1;
		debug!("scope begin, depth {}", self.scope_depth);
		Ok(())
	}

	fn on_scope_end(&mut self, _index: usize, line: usize) -> Result<(), SemanticError> {
		while let Some(entry) = self.tokens.last() {
			match entry.value {
				StackEntry::Scope => {
					self.pop_entry();
					debug!("scope end, depth {}", self.scope_depth);
					return Ok(());
				}
				StackEntry::Block => return Err(SemanticError::ScopeClosedOverBlock { line }),
				StackEntry::Identifier(_) => self.pop_entry(),
			}
		}
		Err(SemanticError::UnopenedScope { line })
	}

	fn on_block_begin(&mut self, index: usize, _token: &Token) -> Result<(), SemanticError> {
		self.push_entry(index, StackEntry::Block);
		self.block_depth += 1;
		Ok(())
	}

	fn on_block_end(&mut self, _index: usize, token: &Token) -> Result<(), SemanticError> {
		match self.tokens.last() {
			Some(entry) if entry.value == StackEntry::Block => {
				self.pop_entry();
				Ok(())
			}
			_ => Err(SemanticError::UnopenedBlock { line: token.line }),
		}
	}

	fn on_variable_declaration(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		if self.block_depth > 0 {
			return Err(SemanticError::DeclarationInsideBlock {
				token: token.lexeme.clone(),
				line:  token.line,
			});
		}
		if self.declared_in_scope(&token.lexeme) {
			return Err(SemanticError::DuplicateVariable { token: token.lexeme.clone(), line: token.line });
		}

		self.push_entry(index, StackEntry::Identifier(token.lexeme.clone()));
		self.untyped_variables += 1;
		self.procedure_parameters_count += 1;
		Ok(())
	}

	fn on_type_definition(&mut self, _index: usize, token: &Token) -> Result<(), SemanticError> {
		let declared = self.declared_type(token)?;
		let scope = self.scope_depth;

		let names: Vec<String> = self
			.tokens
			.iter()
			.rev()
			.take(self.untyped_variables)
			.filter_map(|e| match &e.value {
				StackEntry::Identifier(name) => Some(name.clone()),
				_ => None,
			})
			.collect();

		if names.len() != self.untyped_variables {
			return Err(anyhow::anyhow!("type definition without matching declarations").into());
		}

		for name in names {
			let key = self.identifier_key(&name, scope);
			debug!("variable {key} type {declared:?}");
			self.identifiers_types.insert(key, declared);
		}

		self.untyped_variables = 0;
		Ok(())
	}

	fn on_variable(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		self.discard_from(index);

		if self.block_depth == 0 {
			return Err(SemanticError::UseOutsideBlock { token: token.lexeme.clone(), line: token.line });
		}

		let Some(scope) = self.resolve(&token.lexeme) else {
			return Err(SemanticError::UndeclaredVariable { token: token.lexeme.clone(), line: token.line });
		};

		let key = self.identifier_key(&token.lexeme, scope);
		match self.identifiers_types.get(&key) {
			Some(SymbolType::Procedure) => {
				Err(SemanticError::ProcedureAsVariable { token: token.lexeme.clone(), line: token.line })
			}
			Some(kind) => {
				debug!("include {kind:?}");
				let kind = *kind;
				self.push_expression(index, ExprEntry::Operand(kind));
				Ok(())
			}
			None => Err(SemanticError::UntypedVariable { token: token.lexeme.clone(), line: token.line }),
		}
	}

	fn on_value(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		self.discard_from(index);
		let kind = Self::literal_type(token.kind)?;
		debug!("include {}", token.lexeme);
		self.push_expression(index, ExprEntry::Operand(kind));
		Ok(())
	}

	fn on_operator(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		self.discard_from(index);
		let op = Self::operator_kind(token.kind)?;
		self.push_expression(index, ExprEntry::Operator(op));
		Ok(())
	}

	fn on_expression_begin(&mut self, index: usize, _token: &Token) -> Result<(), SemanticError> {
		self.discard_after(index);
		self.push_expression(index, ExprEntry::Marker);
		Ok(())
	}

	fn on_expression_end(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		self.discard_after(index);

		if self.expressions.is_empty() {
			return Err(SemanticError::UnopenedExpression { line: token.line });
		}

		let mut current: Option<SymbolType> = None;
		let mut operator: Option<Operator> = None;

		while let Some(entry) = self.expressions.pop() {
			match entry.value {
				ExprEntry::Marker => break,
				ExprEntry::Operand(kind) => match (current, operator.take()) {
					(None, _) => current = Some(kind),
					(Some(right), Some(op)) => {
						trace!("formed expression: {kind:?} {op:?} {right:?}");
						current = Some(Self::combine(op, kind, right, token)?);
					}
					(Some(_), None) => {
						return Err(anyhow::anyhow!("adjacent operands with no operator").into());
					}
				},
				ExprEntry::Operator(op) => {
					if operator.replace(op).is_some() {
						return Err(anyhow::anyhow!("adjacent operators with no operand").into());
					}
				}
			}
		}

		trace!("expression result: {current:?}");

		if let (Some(kind), Some(outer)) = (current, self.expressions.last()) {
			let outer = outer.index;
			self.push_expression(outer, ExprEntry::Operand(kind));
		}

		self.last_expression_type = current;
		Ok(())
	}

	fn on_procedure_declaration(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		if self.block_depth > 0 {
			return Err(SemanticError::DeclarationInsideBlock {
				token: token.lexeme.clone(),
				line:  token.line,
			});
		}
		if self.declared_in_scope(&token.lexeme) {
			return Err(SemanticError::DuplicateProcedure { token: token.lexeme.clone(), line: token.line });
		}

		debug!("procedure {}", token.lexeme);
		self.push_entry(index, StackEntry::Identifier(token.lexeme.clone()));

		let key = self.identifier_key(&token.lexeme, self.scope_depth);
		self.identifiers_types.insert(key.clone(), SymbolType::Procedure);
		self.last_procedure_key = Some(key);
		Ok(())
	}

	fn on_procedure_parameters_begin(&mut self, index: usize, _token: &Token) -> Result<(), SemanticError> {
		self.discard_from(index);
		self.procedure_parameters_count = 0;
		Ok(())
	}

	fn on_procedure_parameters_end(&mut self, index: usize, _token: &Token) -> Result<(), SemanticError> {
		self.discard_from(index);

		let scope = self.scope_depth;
		let mut parameters = Vec::with_capacity(self.procedure_parameters_count);

		for entry in self.tokens.iter().rev().take(self.procedure_parameters_count) {
			let StackEntry::Identifier(name) = &entry.value else {
				return Err(anyhow::anyhow!("parameter declaration lost from the stack").into());
			};
			let key = self.identifier_key(name, scope);
			let Some(kind) = self.identifiers_types.get(&key) else {
				return Err(anyhow::anyhow!("parameter {key} has no recorded type").into());
			};
			parameters.push(*kind);
		}
		// The stack is walked top down, declaration order is the reverse.
		parameters.reverse();

		let Some(key) = self.last_procedure_key.clone() else {
			return Err(anyhow::anyhow!("parameter declarations outside a procedure").into());
		};
		debug!("procedure {key} parameters: {parameters:?}");
		self.procedures_parameters.insert(key, parameters);
		self.procedure_parameters_count = 0;
		Ok(())
	}

	fn on_procedure(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		self.discard_from(index);

		if self.block_depth == 0 {
			return Err(SemanticError::UseOutsideBlock { token: token.lexeme.clone(), line: token.line });
		}

		let Some(scope) = self.resolve(&token.lexeme) else {
			return Err(SemanticError::UndeclaredProcedure { token: token.lexeme.clone(), line: token.line });
		};

		let key = self.identifier_key(&token.lexeme, scope);
		debug!("for procedure {} found identifier key {key}", token.lexeme);

		if self.identifiers_types.get(&key) != Some(&SymbolType::Procedure) {
			return Err(SemanticError::VariableAsProcedure { token: token.lexeme.clone(), line: token.line });
		}

		self.last_procedure_key = Some(key);
		Ok(())
	}

	fn on_procedure_arguments_begin(&mut self, index: usize, _token: &Token) -> Result<(), SemanticError> {
		self.discard_from(index);
		self.procedure_arguments_count = 0;
		Ok(())
	}

	fn on_procedure_argument(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		self.discard_from(index);

		let Some(key) = self.last_procedure_key.as_ref() else {
			return Err(anyhow::anyhow!("argument outside a procedure call").into());
		};
		let Some(parameters) = self.procedures_parameters.get(key) else {
			return Err(anyhow::anyhow!("procedure {key} has no recorded signature").into());
		};

		let Some(expected) = parameters.get(self.procedure_arguments_count).copied() else {
			return Err(SemanticError::InvalidArgumentCount { token: token.lexeme.clone(), line: token.line });
		};
		self.procedure_arguments_count += 1;

		let found = self.last_expression_type;
		debug!("comparing types: expected {expected:?}, found {found:?}");

		let compatible =
			found == Some(expected) || (expected == SymbolType::Real && found == Some(SymbolType::Integer));
		if !compatible {
			return Err(SemanticError::InvalidArgumentType { token: token.lexeme.clone(), line: token.line });
		}

		Ok(())
	}

	fn on_procedure_arguments_end(&mut self, index: usize, token: &Token) -> Result<(), SemanticError> {
		self.discard_from(index);

		let Some(key) = self.last_procedure_key.as_ref() else {
			return Err(anyhow::anyhow!("argument list outside a procedure call").into());
		};
		let Some(parameters) = self.procedures_parameters.get(key) else {
			return Err(anyhow::anyhow!("procedure {key} has no recorded signature").into());
		};

		if parameters.len() != self.procedure_arguments_count {
			return Err(SemanticError::InvalidArgumentCount { token: token.lexeme.clone(), line: token.line });
		}

		Ok(())
	}

	fn on_control_condition(&mut self, _index: usize, token: &Token) -> Result<(), SemanticError> {
		if self.last_expression_type != Some(SymbolType::Boolean) {
			return Err(SemanticError::NonBooleanCondition { token: token.lexeme.clone(), line: token.line });
		}
		Ok(())
	}
}
