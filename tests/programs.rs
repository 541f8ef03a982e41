use minipascal::{Analyser, PascalError};

fn accepts(source: &str) {
	if let Err(e) = Analyser::new().run(source) {
		panic!("rejected {source:?}: {e}");
	}
}

fn rejects(source: &str) {
	assert!(Analyser::new().run(source).is_err(), "accepted {source:?}");
}

#[test]
fn program_declaration() {
	accepts("program prog; begin end.");

	rejects("program prog; begin end;.");
	rejects("progra id; begin end.");
	rejects("program begin end.");
	rejects("program id begin end.");
	rejects("program ; begin end.");
	rejects("program prog; begin end. extra");
}

#[test]
fn variable_declarations() {
	accepts("program prog; var id: integer; begin end.");
	accepts("program prog; var id: integer; id2: real; id3: boolean; begin end.");
	accepts("program prog; var id, id2: integer; id3, id4: real; id5: boolean; begin end.");

	rejects("program prog; var begin end.");
	rejects("program prog; var id begin end.");
	rejects("program prog; var id: ; begin end.");
	rejects("program prog; var id: anything begin end.");
	rejects("program prog; var id: integer; id2: begin end.");
}

#[test]
fn procedure_declarations() {
	accepts("program prog; procedure proc; begin end; begin end.");
	accepts("program prog; procedure proc (id: integer); begin end; begin end.");
	accepts("program prog; procedure proc (id: integer; id2: real); var id3: integer; begin end; begin end.");
	accepts(
		"program prog; procedure proc (id: integer; id2: real); var id3: integer; \
		 procedure inner (id4: integer); var id: integer; begin end; begin end; begin end.",
	);

	rejects("program prog; procedure proc; begin end.");
	rejects("program prog; procedure proc; begin begin end.");
	rejects("program prog; procedure proc (id, id2: integer, real); begin end; begin end.");
}

#[test]
fn assignment_type_promotion() {
	accepts("program prog; var id: integer; begin id := 1 end.");
	accepts("program prog; var id: real; begin id := 1 end.");
	accepts("program prog; var id: real; begin id := 1.5 end.");
	accepts("program prog; var id: real; begin id := 1 + 2.5 end.");
	accepts("program prog; var id: integer; begin id := 1 + 2 * 3 end.");
	accepts("program prog; var id: boolean; begin id := true end.");

	rejects("program prog; var id: integer; begin id := 1.5 end.");
	rejects("program prog; var id: integer; begin id := 1 + 2.5 end.");
	rejects("program prog; var id: integer; begin id := true end.");
	rejects("program prog; var id: boolean; begin id := 1 end.");
}

#[test]
fn boolean_exclusivity() {
	accepts("program prog; var id: boolean; begin id := 1 < 2 end.");
	accepts("program prog; var id: boolean; begin id := true and false end.");
	accepts("program prog; var a, b: boolean; begin a := a or b end.");

	rejects("program prog; var id: boolean; begin id := true and 1 end.");
	rejects("program prog; var id: boolean; begin id := true + false end.");
	rejects("program prog; var id: boolean; begin id := true < false end.");
	rejects("program prog; var id: integer; begin id := 1 < 2 end.");
}

#[test]
fn unary_signs_and_parentheses() {
	accepts("program prog; var id: integer; begin id := -10 end.");
	accepts("program prog; var id: integer; begin id := -10 / (-3) end.");
	accepts("program prog; var id: integer; begin id := id + ((id + 1) + 1) end.");
	accepts("program prog; var id: boolean; begin id := not true end.");

	rejects("program prog; var id: integer; begin id := (1 + 2 end.");
	rejects("program prog; var id: integer; begin id := 1 + end.");
}

#[test]
fn control_conditions_must_be_boolean() {
	accepts("program prog; var id: integer; begin if id > 1 then id := 1 end.");
	accepts("program prog; var id: integer; begin if id > 1 then id := 1 else id := 2 end.");
	accepts("program prog; var id: integer; begin while id > 1 do id := id - 1 end.");
	accepts("program prog; var id: integer; begin do id := id - 1 while id > 0 end.");
	accepts("program prog; var id: boolean; begin if id then id := false end.");
	accepts("program prog; var a, b: boolean; begin if a and b then a := false end.");

	rejects("program prog; var id: integer; begin if id then id := 1 end.");
	rejects("program prog; var id: integer; begin if id + 1 then id := 1 end.");
	rejects("program prog; var id: integer; begin while id do id := 1 end.");
	rejects("program prog; var id: integer; begin do id := 1 while id + 1 end.");
}

#[test]
fn scope_discipline() {
	// Inner declarations may shadow outer ones with another type.
	accepts(
		"program prog; var id: integer; procedure proc; var id: real; \
		 begin id := 1.5 end; begin id := 1 end.",
	);
	// Globals stay visible inside procedure bodies.
	accepts("program prog; var id: integer; procedure proc; begin id := 2 end; begin end.");

	rejects("program prog; var id, id: integer; begin end.");
	rejects("program prog; var id: integer; id: real; begin end.");
	rejects("program prog; procedure proc; begin end; procedure proc; begin end; begin end.");
	rejects("program prog; begin id := 1 end.");
	// A procedure's locals do not leak into the main block.
	rejects("program prog; procedure proc; var x: integer; begin x := 1 end; begin x := 1 end.");
	rejects("program prog; var id: integer; begin id(1) end.");
	rejects("program prog; var id: integer; procedure proc; begin end; begin id := proc end.");
}

#[test]
fn procedure_calls_and_arity() {
	accepts("program prog; procedure proc; begin end; begin proc end.");
	accepts("program prog; procedure proc; begin end; begin proc() end.");
	accepts("program prog; procedure proc (a: integer); begin end; begin proc(1) end.");
	accepts("program prog; procedure proc (a: integer; b: real); begin end; begin proc(1 + 2, 3.5) end.");
	// Integer arguments promote to real parameters.
	accepts("program prog; procedure proc (a: real); begin end; begin proc(1) end.");
	// Recursion and sibling calls resolve through the scope chain.
	accepts("program prog; procedure proc (a: integer); begin proc(a - 1) end; begin proc(3) end.");
	accepts(
		"program prog; procedure first; begin end; procedure second; begin first end; \
		 begin second end.",
	);

	rejects("program prog; procedure proc (a: integer); begin end; begin proc end.");
	rejects("program prog; procedure proc (a: integer); begin end; begin proc() end.");
	rejects("program prog; procedure proc (a: integer); begin end; begin proc(1, 2) end.");
	rejects("program prog; procedure proc; begin end; begin proc(1) end.");
	rejects("program prog; procedure proc (a: integer); begin end; begin proc(1.5) end.");
	rejects("program prog; procedure proc (a: integer); begin end; begin proc(true) end.");
	// Forward calls are not resolvable.
	rejects(
		"program prog; procedure second; begin first end; procedure first; begin end; \
		 begin second end.",
	);
	rejects("program prog; var id: integer; begin unknown(id) end.");
}

#[test]
fn backtracking_leaves_no_state_behind() {
	// A bare call first looks like an assignment, the abandoned attempt must
	// not corrupt later type checking.
	accepts(
		"program prog; var id: integer; procedure proc; begin end; \
		 begin proc; id := 1 end.",
	);
	rejects(
		"program prog; var id: integer; procedure proc; begin end; \
		 begin proc; id := 1.5 end.",
	);
	// Commands after rolled-back control alternatives still type-check.
	accepts(
		"program prog; var id: integer; begin while id > 0 do begin id := id - 1 end; id := 0 end.",
	);
}

#[test]
fn comments_and_lexical_errors() {
	accepts("program prog; { a comment } begin end.");
	accepts("program prog; begin end. { trailing comment }");
	accepts("program prog;\n{ multi\nline\ncomment }\nbegin end.");
	accepts("program prog; // inline comment\nbegin end.");

	rejects("program prog; { not closed begin end.");
	rejects("program prog; } begin end.");
	rejects("program prog; var id_: inte@ger; begin end.");
	rejects("program prog; begin id := 1_000 end.");
}

#[test]
fn error_message_format() {
	let err = Analyser::new().run("program prog; var x: integer; begin x := 1.5 end.").unwrap_err();
	assert_eq!(err.to_string(), "Incompatible types are being assigned, token 'end', at line 1");

	let err = Analyser::new().run("program prog; begin end").unwrap_err();
	assert!(matches!(err, PascalError::Syntax(_)), "{err}");

	// Errors without an offending token render the bare description.
	let err = Analyser::new().run("program prog; begin end. extra").unwrap_err();
	assert_eq!(err.to_string(), "Remaining code after program end");

	let err = Analyser::new().run("program prog; begin @ end.").unwrap_err();
	assert_eq!(err.to_string(), "The symbol '@' does not belong to this language, at line 1");
}

#[test]
fn rescanning_token_lines_is_stable() {
	let source = "program prog; { skip }\nvar id: real;\nbegin\n\tid := 3.4 * (-2) // tail\nend.";
	let analyser = Analyser::new();
	let tokens = analyser.run(source).unwrap();

	// Reprinting each line's lexemes and scanning again must reproduce the
	// same classification, comments excluded.
	let mut lines: Vec<Vec<String>> = Vec::new();
	let mut current = 0;
	for token in &tokens {
		if token.line != current {
			lines.push(Vec::new());
			current = token.line;
		}
		if let Some(line) = lines.last_mut() {
			line.push(token.lexeme.clone());
		}
	}
	let rejoined: Vec<String> = lines.iter().map(|l| l.join(" ")).collect();
	let rescanned = analyser.run(&rejoined.join("\n")).unwrap();

	assert_eq!(tokens.len(), rescanned.len());
	for (a, b) in tokens.iter().zip(rescanned.iter()) {
		assert_eq!(a.lexeme, b.lexeme);
		assert_eq!(a.kind, b.kind);
	}
}

#[test]
fn example_file() {
	let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("example.pas");
	let tokens = Analyser::new().run_file(&path).unwrap();
	assert!(!tokens.is_empty());
}
