//! 変数の格納場所のテスト

use super::*;
use amime::codegen::MAIN_FUNCTION;
use pretty_assertions::assert_eq;

#[test]
fn test_let_without_initializer_stores_zero() {
    let wat = compile_to_wat("let i: int\nlet f: float");
    assert_eq!(
        instructions(&wat, MAIN_FUNCTION),
        vec!["i32.const 0", "local.set 0", "f64.const 0", "local.set 1", "return"]
    );
    assert!(wat.contains("(local i32 f64)"));
}

#[test]
fn test_let_with_float_annotation_promotes_int() {
    let wat = compile_to_wat("let f: float = 1");
    assert_eq!(
        instructions(&wat, MAIN_FUNCTION),
        vec!["i32.const 1", "f64.convert_i32_s", "local.set 0", "return"]
    );
}

#[test]
fn test_reassignment_reuses_slot() {
    let wat = compile_to_wat("x = 1\nx = x + 1");
    assert!(wat.contains("    (local i32)\n"));
    assert_eq!(
        instructions(&wat, MAIN_FUNCTION),
        vec![
            "i32.const 1",
            "local.set 0",
            "local.get 0",
            "i32.const 1",
            "i32.add",
            "local.set 0",
            "return",
        ]
    );
}

#[test]
fn test_shadowed_variables_get_distinct_slots() {
    let wat = compile_to_wat("let x = 1\n{ let x = 2.5\nprint(x) }\nprint(x)");
    assert!(wat.contains("(local i32 f64)"));
    let body = instructions(&wat, MAIN_FUNCTION);
    assert_eq!(count_lines(&body, "local.get 1"), 1);
    assert_eq!(count_lines(&body, "local.get 0"), 1);
}

#[test]
fn test_captured_global() {
    let wat = compile_to_wat("counter = 0\nfn bump() { counter = counter + 1 }\nbump()\nprint(counter)");
    assert!(wat.contains("  (global $g_counter (mut i32) (i32.const 0))\n"));
    assert_eq!(
        instructions(&wat, "$bump"),
        vec![
            "global.get $g_counter",
            "i32.const 1",
            "i32.add",
            "global.set $g_counter",
            "return",
        ]
    );
    let main = function_body(&wat, MAIN_FUNCTION);
    assert!(!main.iter().any(|line| line.starts_with("(local")));
    assert_eq!(main[..2].to_vec(), vec!["i32.const 0", "global.set $g_counter"]);
    assert!(main.contains(&"global.get $g_counter".to_string()));
}

#[test]
fn test_globals_declared_before_functions() {
    let wat = compile_to_wat("total = 0.0\nfn add(x: float) { total = total + x }\nadd(1)");
    let global = wat.find("(global $g_total (mut f64) (f64.const 0))").expect("global");
    let func = wat.find("(func $add").expect("function");
    assert!(global < func);
}

#[test]
fn test_function_locals_follow_parameters() {
    let wat = compile_to_wat(
        "fn f(n: int) -> int { total = 0\nfor i in 0..n { total = total + i }\nreturn total }",
    );
    // total=1, i=2, 終端=3, 増分=4
    assert!(wat.contains("    (local i32 i32 i32 i32)\n"));
    let body = instructions(&wat, "$f");
    assert_eq!(
        body[..6].to_vec(),
        vec!["i32.const 0", "local.set 1", "i32.const 0", "local.set 2", "local.get 0", "local.set 3"]
    );
}
