//! スコープのテスト

use super::*;
use amime::error::DiagnosticKind::*;
use pretty_assertions::assert_eq;

#[test]
fn test_implicit_declaration_by_assignment() {
    assert_analysis_success("x = 1\ny = x + 1\nprint(y)");
}

#[test]
fn test_block_variables_do_not_escape() {
    assert_diagnostic_kinds(
        "if true { inner = 1 }\nprint(inner)",
        &[UndeclaredVariable],
    );
}

#[test]
fn test_shadowing_in_inner_scope() {
    assert_analysis_success("let x = 1\n{ let x = \"text\"\nprint(x) }\nx = 2");
}

#[test]
fn test_duplicate_let_in_same_scope() {
    assert_diagnostic_kinds("let x = 1\nlet x = 2", &[DuplicateSymbol]);
}

#[test]
fn test_let_initializer_sees_outer_binding() {
    assert_analysis_success("let x = 1\n{ let x = x + 1\nprint(x) }");
}

#[test]
fn test_for_variable_is_scoped_to_loop() {
    assert_diagnostic_kinds(
        "for i in 0..3 { print(i) }\nprint(i)",
        &[UndeclaredVariable],
    );
}

#[test]
fn test_parameters_and_duplicates() {
    assert_analysis_success("fn add(a: int, b: int) -> int { return a + b }");
    assert_diagnostic_kinds("fn f(a: int, a: int) { }", &[DuplicateSymbol]);
    assert_diagnostic_kinds("fn f(a: void) { }", &[TypeMismatch]);
}

#[test]
fn test_functions_see_earlier_globals() {
    let program = parse("counter = 0\nfn bump() { counter = counter + 1 }\nbump()");
    let outcome = SemanticAnalyzer::new()
        .analyze(&program)
        .expect("Analysis should not abort");
    let checked = outcome.into_checked().expect("Analysis should succeed");

    let captured: Vec<String> = checked
        .captured_globals()
        .map(|id| checked.symbol(id).name.clone())
        .collect();
    assert_eq!(captured, vec!["counter".to_string()]);
}

#[test]
fn test_top_level_use_is_not_a_capture() {
    let program = parse("x = 1\ny = x + 1");
    let outcome = SemanticAnalyzer::new()
        .analyze(&program)
        .expect("Analysis should not abort");
    let checked = outcome.into_checked().expect("Analysis should succeed");
    assert_eq!(checked.captured_globals().count(), 0);
}

#[test]
fn test_function_locals_are_private() {
    assert_diagnostic_kinds(
        "fn f() { local = 1 }\nprint(local)",
        &[UndeclaredVariable],
    );
}

#[test]
fn test_function_name_is_not_a_value() {
    assert_diagnostic_kinds("fn f() { }\nx = f", &[TypeMismatch]);
    assert_diagnostic_kinds("fn f() { }\nf = 1", &[TypeMismatch]);
}

#[test]
fn test_forward_calls_and_recursion() {
    assert_analysis_success(
        r#"
        print(is_even(10))
        fn is_even(n: int) -> bool {
            if n == 0 { return true }
            return is_odd(n - 1)
        }
        fn is_odd(n: int) -> bool {
            if n == 0 { return false }
            return is_even(n - 1)
        }
        "#,
    );
}
