//! 変数・関数の名前解決エラーのテスト

use super::*;
use amime::ast::*;
use amime::compiler::{compile_source, CompileOptions};
use amime::error::{AmimeError, DiagnosticKind::*};
use pretty_assertions::assert_eq;

#[test]
fn test_undeclared_variable() {
    let diagnostics = diagnostics_for("x = 1\nprint(y)");
    assert_eq!(diagnostics.kinds(), vec![UndeclaredVariable]);
    let ordered = diagnostics.in_source_order();
    let diagnostic = ordered[0];
    assert_eq!((diagnostic.line(), diagnostic.column()), (2, 7));
    assert_eq!(diagnostic.message, "undeclared variable 'y'");
}

#[test]
fn test_undeclared_function() {
    assert_diagnostic_kinds("v = missing(1)", &[UndeclaredFunction]);
}

#[test]
fn test_diagnostics_follow_source_order() {
    // 引数が呼び出しより先に解析されても、出力は位置順
    assert_diagnostic_kinds("x = g(y)", &[UndeclaredFunction, UndeclaredVariable]);
}

#[test]
fn test_arity_mismatch() {
    let diagnostics = diagnostics_for("fn add(a: int, b: int) -> int { return a + b }\nv = add(1)");
    assert_eq!(diagnostics.kinds(), vec![ArityMismatch]);
    assert_eq!(
        diagnostics.iter().next().map(|d| d.message.clone()),
        Some("wrong number of arguments to 'add': expected 2, got 1".to_string())
    );
}

#[test]
fn test_call_with_missing_argument_emits_nothing() {
    let source = "fn f(a: int) -> int { return a }\nv = f()";
    let diagnostics = diagnostics_for(source);
    assert_eq!(diagnostics.kinds(), vec![ArityMismatch]);
    assert_eq!(
        diagnostics.iter().next().map(|d| d.message.clone()),
        Some("wrong number of arguments to 'f': expected 1, got 0".to_string())
    );

    let outcome = compile_source(source, &CompileOptions::default()).expect("Compilation should not fail");
    assert!(outcome.output().is_none());
}

#[test]
fn test_arity_mismatch_keeps_return_type() {
    // 戻り値の型は使えるので、後続の演算では診断が増えない
    assert_diagnostic_kinds(
        "fn add(a: int, b: int) -> int { return a + b }\nv = add(1) + 1",
        &[ArityMismatch],
    );
}

#[test]
fn test_builtin_arity() {
    assert_diagnostic_kinds("n = node()", &[ArityMismatch]);
    assert_diagnostic_kinds("g = graph(1)", &[ArityMismatch]);
}

#[test]
fn test_duplicate_function() {
    assert_diagnostic_kinds(
        "fn f() -> int { return 1 }\nfn f() -> int { return 2 }",
        &[DuplicateFunction],
    );
}

#[test]
fn test_user_function_cannot_shadow_builtin() {
    assert_diagnostic_kinds("fn size(s: set) -> int { return 0 }", &[DuplicateFunction]);
}

#[test]
fn test_diagnostic_display() {
    let diagnostics = diagnostics_for("break");
    let rendered = diagnostics.iter().next().map(|d| d.to_string());
    assert_eq!(
        rendered,
        Some("1:1: 'break' outside of a loop or switch [BreakOutsideLoop]".to_string())
    );
}

fn int_lit(id: u32, value: i32) -> Expression {
    Expression::Integer(IntegerLit {
        id: NodeId(id),
        value,
        span: Span::dummy(),
    })
}

#[test]
fn test_duplicate_node_id_is_fatal() {
    let program = Program {
        items: vec![
            Item::Statement(Statement::Print(PrintStatement {
                args: vec![int_lit(0, 1)],
                span: Span::dummy(),
            })),
            Item::Statement(Statement::Print(PrintStatement {
                args: vec![int_lit(0, 2)],
                span: Span::dummy(),
            })),
        ],
        span: Span::dummy(),
    };

    let result = SemanticAnalyzer::new().analyze(&program);
    assert!(matches!(result, Err(AmimeError::MalformedTree { .. })));
}

#[test]
fn test_reused_declaration_id_is_fatal() {
    let mut program = parse("let a = 1\nlet b = 2.5\nprint(a)");
    let first_id = match &program.items[0] {
        Item::Statement(Statement::Let(first)) => first.id,
        other => panic!("Expected let statement, got {:?}", other),
    };
    match &mut program.items[1] {
        Item::Statement(Statement::Let(second)) => second.id = first_id,
        other => panic!("Expected let statement, got {:?}", other),
    }

    let result = SemanticAnalyzer::new().analyze(&program);
    match result {
        Err(AmimeError::MalformedTree { message, .. }) => {
            assert!(message.contains("appears more than once"), "{}", message);
        }
        Err(other) => panic!("Expected MalformedTree, got {:?}", other),
        Ok(_) => panic!("Analysis should abort"),
    }
}

#[test]
fn test_reused_parameter_id_is_fatal() {
    let mut program = parse("fn f(a: int, b: int) -> int { return a + b }");
    match &mut program.items[0] {
        Item::Function(func) => func.params[1].id = func.params[0].id,
        other => panic!("Expected function, got {:?}", other),
    }

    let result = SemanticAnalyzer::new().analyze(&program);
    assert!(matches!(result, Err(AmimeError::MalformedTree { .. })));
}

#[test]
fn test_let_without_type_or_initializer_is_fatal() {
    let program = Program {
        items: vec![Item::Statement(Statement::Let(LetStatement {
            id: NodeId(0),
            name: "x".to_string(),
            ty: None,
            init: None,
            span: Span::dummy(),
        }))],
        span: Span::dummy(),
    };

    let result = SemanticAnalyzer::new().analyze(&program);
    assert!(matches!(result, Err(AmimeError::MalformedTree { .. })));
}
