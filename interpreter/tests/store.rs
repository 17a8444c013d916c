use endo::instruction::{ArrayIndex, Instruction};
use interpreter::evaluator::evaluate;
use interpreter::{RuntimeError, Value, VariableStore};

fn declare(store: &mut VariableStore, name: &str, elements: &[&str]) {
    let instruction = Instruction::DeclareArray {
        name: name.into(),
        elements: elements.iter().map(|e| e.to_string()).collect(),
        span: 0..0,
    };
    assert_eq!(evaluate(&instruction, store).unwrap(), None);
}

#[test]
fn store_starts_empty_and_replaces_values() {
    let mut store = VariableStore::new();
    assert!(store.is_empty());
    store.set("v", Value::Text("a".into()));
    store.set("v", Value::List(vec!["x".into()]));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("v"), Some(&Value::List(vec!["x".into()])));
    assert_eq!(store.get("w"), None);
}

#[test]
fn store_names_are_sorted() {
    let mut store = VariableStore::new();
    for name in ["zeta", "alpha", "mid"] {
        store.set(name, Value::Text(String::new()));
    }
    assert_eq!(store.names(), vec!["alpha", "mid", "zeta"]);
}

#[test]
fn value_display() {
    assert_eq!(Value::Text("hi".into()).to_string(), "hi");
    let list = Value::List(vec!["1".into(), "2".into(), "3".into()]);
    assert_eq!(list.to_string(), "1, 2, 3");
    assert_eq!(list.type_name(), "List");
    assert_eq!(Value::Text("x".into()).type_name(), "Text");
}

#[test]
fn assign_is_silent() {
    let mut store = VariableStore::new();
    let instruction = Instruction::Assign {
        name: "a".into(),
        value: "hi".into(),
        span: 0..0,
    };
    assert_eq!(evaluate(&instruction, &mut store).unwrap(), None);
    assert_eq!(store.get("a"), Some(&Value::Text("hi".into())));
}

#[test]
fn declare_trims_elements() {
    let mut store = VariableStore::new();
    declare(&mut store, "xs", &["  a ", "b\t"]);
    assert_eq!(
        store.get("xs"),
        Some(&Value::List(vec!["a".into(), "b".into()]))
    );
}

#[test]
fn print_variable_outcomes() {
    let mut store = VariableStore::new();
    let print_xs = Instruction::PrintVariable {
        name: "xs".into(),
        span: 0..0,
    };
    let err = evaluate(&print_xs, &mut store).unwrap_err();
    assert_eq!(err.to_string(), "Error: Variable 'xs' is not defined.");
    assert!(err.is_recoverable());

    declare(&mut store, "xs", &["a", "b"]);
    assert_eq!(
        evaluate(&print_xs, &mut store).unwrap(),
        Some("a, b".to_string())
    );
}

#[test]
fn access_array_outcomes() {
    let mut store = VariableStore::new();
    declare(&mut store, "xs", &["a", "b"]);
    store.set("s", Value::Text("text".into()));

    let access = |array: &str, index: &str| Instruction::AccessArray {
        target: "t".into(),
        array: array.into(),
        index: ArrayIndex::new(index),
        span: 0..0,
    };

    assert_eq!(evaluate(&access("xs", "1"), &mut store).unwrap(), None);
    assert_eq!(store.get("t"), Some(&Value::Text("b".into())));

    let err = evaluate(&access("xs", "2"), &mut store).unwrap_err();
    assert!(matches!(err, RuntimeError::IndexOutOfBounds(ref i) if i == "2"));

    let err = evaluate(&access("s", "0"), &mut store).unwrap_err();
    assert_eq!(err.to_string(), "Variable 's' is not an array");
}

#[test]
fn standalone_access_prints_without_binding() {
    let mut store = VariableStore::new();
    declare(&mut store, "xs", &["only"]);
    let instruction = Instruction::StandaloneArrayAccess {
        array: "xs".into(),
        index: ArrayIndex::new("0"),
        span: 0..0,
    };
    assert_eq!(
        evaluate(&instruction, &mut store).unwrap(),
        Some("only".to_string())
    );
    assert_eq!(store.len(), 1);
}
