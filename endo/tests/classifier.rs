use endo::instruction::{ArrayIndex, Instruction};
use endo::parser::{Parser, classify};
use endo::statement::{Statement, split_statements};

fn stmt(text: &str) -> Statement {
    Statement {
        text: text.to_string(),
        span: 0..text.len(),
    }
}

fn classify_ok(text: &str) -> Instruction {
    classify(&stmt(text), 0).unwrap_or_else(|e| panic!("'{}' failed to classify: {}", text, e))
}

fn assert_rejected(text: &str) {
    if let Ok(instr) = classify(&stmt(text), 0) {
        panic!("'{}' should not classify, got {:?}", text, instr);
    }
}

#[test]
fn splits_on_semicolons_and_drops_empty_segments() {
    let statements = split_statements("  a = \"x\";; print(a) ;\n");
    let texts: Vec<&str> = statements.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["a = \"x\"", "print(a)"]);
}

#[test]
fn statement_spans_point_into_source() {
    let source = "a = \"x\";\n  print(a)  ;";
    for statement in split_statements(source) {
        assert_eq!(&source[statement.span.clone()], statement.text);
    }
}

#[test]
fn semicolons_inside_quotes_still_split() {
    let statements = split_statements("print(\"a;b\")");
    assert_eq!(statements.len(), 2);
    assert_rejected(&statements[0].text);
}

#[test]
fn parser_keeps_file_id() {
    let program = Parser::new("print(\"x\")".to_string(), 7).parse();
    assert_eq!(program.source_id, 7);
    assert_eq!(program.statements.len(), 1);
    assert!(Parser::new("  ;  ".to_string(), 0).parse().is_empty());
}

#[test]
fn assignment() {
    assert_eq!(
        classify_ok("greeting = \"hello world\""),
        Instruction::Assign {
            name: "greeting".into(),
            value: "hello world".into(),
            span: 0..24,
        }
    );
    assert!(matches!(classify_ok("x=\"\""), Instruction::Assign { ref value, .. } if value.is_empty()));
    assert!(matches!(classify_ok("x \t=  \"v\""), Instruction::Assign { .. }));
}

#[test]
fn assignment_has_no_escaped_quotes() {
    assert_rejected(r#"x = "say \"hi\"""#);
    assert_rejected("x = \"unterminated");
}

#[test]
fn print_literal_and_variable() {
    assert!(matches!(
        classify_ok("print(\"hi there\")"),
        Instruction::PrintLiteral { ref text, .. } if text == "hi there"
    ));
    assert!(matches!(
        classify_ok("print(\"a)b\")"),
        Instruction::PrintLiteral { ref text, .. } if text == "a)b"
    ));
    assert!(matches!(
        classify_ok("print(name_1)"),
        Instruction::PrintVariable { ref name, .. } if name == "name_1"
    ));
}

#[test]
fn print_of_indexed_element() {
    match classify_ok("print(b[5])") {
        Instruction::StandaloneArrayAccess { array, index, .. } => {
            assert_eq!(array, "b");
            assert_eq!(index, ArrayIndex::new("5"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn print_rejects_inner_whitespace_and_trailing_text() {
    assert_rejected("print( x )");
    assert_rejected("print(x) extra");
    assert_rejected("print x");
    assert_rejected("print()");
}

#[test]
fn array_declaration_strips_quotes() {
    match classify_ok("items = [ \"a b\", 'c', d ,42 ]") {
        Instruction::DeclareArray { name, elements, .. } => {
            assert_eq!(name, "items");
            assert_eq!(elements, vec!["a b", "c", "d", "42"]);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn array_declaration_splits_quoted_elements_on_commas() {
    match classify_ok("xs = [\"x,y\", z]") {
        Instruction::DeclareArray { elements, .. } => {
            assert_eq!(elements, vec!["\"x", "y\"", "z"]);
        }
        other => panic!("unexpected {:?}", other),
    }
    match classify_ok("xs = ['a, b', \"c\"]") {
        Instruction::DeclareArray { elements, .. } => assert_eq!(elements, vec!["'a", "b'", "c"]),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn array_declaration_keeps_lone_quote_pieces() {
    match classify_ok("xs = [\",\", a]") {
        Instruction::DeclareArray { elements, .. } => assert_eq!(elements, vec!["\"", "\"", "a"]),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn array_declaration_rejects_malformed_lists() {
    assert_rejected("xs = []");
    assert_rejected("xs = [a,]");
    assert_rejected("xs = [a b]");
    assert_rejected("xs = [[a]]");
    assert_rejected("xs = [a");
}

#[test]
fn quoted_right_hand_side_is_always_assignment() {
    assert!(matches!(classify_ok("x = \"[1, 2]\""), Instruction::Assign { .. }));
}

#[test]
fn indexed_assignment() {
    match classify_ok("c = b[1]") {
        Instruction::AccessArray {
            target,
            array,
            index,
            ..
        } => {
            assert_eq!(target, "c");
            assert_eq!(array, "b");
            assert_eq!(index.as_str(), "1");
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_rejected("c = b[ 1 ]");
    assert_rejected("c = b[-1]");
    assert_rejected("c = b[i]");
}

#[test]
fn standalone_access() {
    assert!(matches!(
        classify_ok("b[10]"),
        Instruction::StandaloneArrayAccess { ref array, .. } if array == "b"
    ));
    assert_rejected("b [0]");
    assert_rejected("b[0][1]");
}

#[test]
fn syntax_error_names_the_statement() {
    let statement = Statement {
        text: "foo bar".into(),
        span: 4..11,
    };
    let err = classify(&statement, 3).unwrap_err();
    assert_eq!(err.message, "Syntax error: Could not parse the line 'foo bar'");
    assert_eq!(err.statement, "foo bar");
    assert_eq!(err.span, 4..11);
    assert_eq!(err.file_id, 3);
    assert!(err.notes[0].starts_with("expected one of:"));
}

#[test]
fn index_resolution() {
    let index = ArrayIndex::new("2");
    assert_eq!(index.position(3), Some(2));
    assert_eq!(index.position(2), None);
    assert_eq!(ArrayIndex::new("-1").position(3), None);
    assert_eq!(ArrayIndex::new("99999999999999999999999").position(3), None);
    assert_eq!(ArrayIndex::new("007").position(8), Some(7));
}
