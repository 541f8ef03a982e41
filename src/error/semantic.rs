/// Declaration and type errors raised by the semantic analyser.
#[derive(thiserror::Error, Debug)]
pub enum SemanticError {
	/// Listener protocol violation, should never happen
	#[error("SemanticInternalError: {0}")]
	InternalError(#[from] anyhow::Error),

	#[error("Closing a scope that was never opened, at line {line}")]
	UnopenedScope { line: usize },
	#[error("Closing a scope over a block still open, at line {line}")]
	ScopeClosedOverBlock { line: usize },
	#[error("Closing a block that was never opened, at line {line}")]
	UnopenedBlock { line: usize },
	#[error("Declarations are not allowed inside a command block, token '{token}', at line {line}")]
	DeclarationInsideBlock { token: String, line: usize },
	#[error("Identifier used outside a command block, token '{token}', at line {line}")]
	UseOutsideBlock { token: String, line: usize },
	#[error("Variable already declared in this scope, token '{token}', at line {line}")]
	DuplicateVariable { token: String, line: usize },
	#[error("Procedure already declared in this scope, token '{token}', at line {line}")]
	DuplicateProcedure { token: String, line: usize },
	#[error("Variable wasn't declared, token '{token}', at line {line}")]
	UndeclaredVariable { token: String, line: usize },
	#[error("Procedure wasn't declared, token '{token}', at line {line}")]
	UndeclaredProcedure { token: String, line: usize },
	#[error("A procedure can't be used as a variable, token '{token}', at line {line}")]
	ProcedureAsVariable { token: String, line: usize },
	#[error("A variable can't be called as a procedure, token '{token}', at line {line}")]
	VariableAsProcedure { token: String, line: usize },
	#[error("Variable has no type, token '{token}', at line {line}")]
	UntypedVariable { token: String, line: usize },
	#[error("Closing an expression that was never opened, at line {line}")]
	UnopenedExpression { line: usize },
	#[error("Incompatible types are being assigned, token '{token}', at line {line}")]
	IncompatibleAssignment { token: String, line: usize },
	#[error("Logical operators take boolean operands only, token '{token}', at line {line}")]
	IncompatibleLogicalOperation { token: String, line: usize },
	#[error("Incompatible types in operation, token '{token}', at line {line}")]
	IncompatibleOperation { token: String, line: usize },
	#[error("Wrong number of arguments for procedure, token '{token}', at line {line}")]
	InvalidArgumentCount { token: String, line: usize },
	#[error("Argument type doesn't match the procedure parameter, token '{token}', at line {line}")]
	InvalidArgumentType { token: String, line: usize },
	#[error("Expression result for control statement isn't boolean, token '{token}', at line {line}")]
	NonBooleanCondition { token: String, line: usize },
}
