//! 文と宣言のパーサーテスト

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_mixed_top_level_items() {
    let program = assert_parse_success(
        r#"
        x = 1
        fn double(n: int) -> int { return n * 2 }
        print(double(x))
        "#,
    );

    assert_eq!(program.items.len(), 3);
    let func = program.functions().next().expect("function");
    assert_eq!(func.name, "double");
    assert_eq!(func.params.len(), 1);
    assert_eq!(func.params[0].ty, Type::Int);
    assert_eq!(func.return_type(), Type::Int);
    assert_eq!(statements(&program).len(), 2);
}

#[test]
fn test_function_without_return_type_is_void() {
    let program = assert_parse_success("fn hello() { print(\"hi\") }");
    let func = program.functions().next().expect("function");
    assert_eq!(func.return_type, None);
    assert_eq!(func.return_type(), Type::Void);
}

#[test]
fn test_let_and_assignment() {
    let program = assert_parse_success("let a: float = 1; let b = 2\nb = 3;;");
    let stmts = statements(&program);
    assert_eq!(stmts.len(), 3);

    match stmts[0] {
        Statement::Let(let_stmt) => {
            assert_eq!(let_stmt.name, "a");
            assert_eq!(let_stmt.ty, Some(Type::Float));
            assert!(let_stmt.init.is_some());
        }
        other => panic!("Expected let, got {:?}", other),
    }
    assert!(matches!(stmts[2], Statement::Assignment(a) if a.name == "b"));
}

#[test]
fn test_let_with_type_only() {
    let program = assert_parse_success("let s: set");
    match statements(&program)[0] {
        Statement::Let(let_stmt) => {
            assert_eq!(let_stmt.ty, Some(Type::Set));
            assert!(let_stmt.init.is_none());
        }
        other => panic!("Expected let, got {:?}", other),
    }
}

#[test]
fn test_else_if_chain() {
    let program = assert_parse_success(
        "if x > 0 { print(1) } else if x < 0 { print(2) } else { print(0) }",
    );
    match statements(&program)[0] {
        Statement::If(if_stmt) => match &if_stmt.else_branch {
            Some(ElseBranch::If(nested)) => {
                assert!(matches!(nested.else_branch, Some(ElseBranch::Block(_))));
            }
            other => panic!("Expected else-if, got {:?}", other),
        },
        other => panic!("Expected if, got {:?}", other),
    }
}

#[test]
fn test_while_and_until() {
    let program = assert_parse_success("while i < 3 { i = i + 1 }\nuntil done { break }");
    let stmts = statements(&program);
    assert!(matches!(stmts[0], Statement::While(w) if w.kind == LoopKind::While));
    assert!(matches!(stmts[1], Statement::While(w) if w.kind == LoopKind::Until));
}

#[test]
fn test_for_with_step() {
    let program = assert_parse_success("for i in 0..10 step 2 { print(i) }");
    match statements(&program)[0] {
        Statement::For(for_stmt) => {
            assert_eq!(for_stmt.variable, "i");
            assert!(matches!(for_stmt.start, Expression::Integer(IntegerLit { value: 0, .. })));
            assert!(matches!(for_stmt.end, Expression::Integer(IntegerLit { value: 10, .. })));
            assert!(for_stmt.step.is_some());
        }
        other => panic!("Expected for, got {:?}", other),
    }
}

#[test]
fn test_switch_cases_and_default() {
    let program = assert_parse_success(
        r#"
        switch x {
            case 1 { print("one") }
            case 2 { print("two") }
            default { print("many") }
        }
        "#,
    );
    match statements(&program)[0] {
        Statement::Switch(switch) => {
            assert_eq!(switch.cases.len(), 2);
            assert!(switch.default.is_some());
        }
        other => panic!("Expected switch, got {:?}", other),
    }
}

#[test]
fn test_return_without_value() {
    let program = assert_parse_success("fn f() { return }");
    let func = program.functions().next().expect("function");
    assert!(matches!(
        &func.body.statements[0],
        Statement::Return(ReturnStatement { value: None, .. })
    ));
}

#[test]
fn test_node_ids_are_unique() {
    let program = assert_parse_success("x = 1 + 2\ny = f(x, 3)");
    let mut ids = Vec::new();
    for stmt in statements(&program) {
        if let Statement::Assignment(assign) = stmt {
            ids.push(assign.id);
            ids.push(assign.value.id());
            match &assign.value {
                Expression::Binary(b) => {
                    ids.push(b.left.id());
                    ids.push(b.right.id());
                }
                Expression::Call(c) => ids.extend(c.args.iter().map(|a| a.id())),
                _ => {}
            }
        }
    }
    let count = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), count);
}
