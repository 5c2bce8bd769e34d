//! 文字列・集合・タプル・グラフのコード生成テスト

use super::*;
use amime::codegen::MAIN_FUNCTION;
use pretty_assertions::assert_eq;

#[test]
fn test_string_constants_share_one_segment() {
    let wat = compile_to_wat("s = \"hi\" + \"there\"");
    assert!(wat.contains("  (data (i32.const 0) \"hithere\")\n"));
    assert_eq!(
        instructions(&wat, MAIN_FUNCTION),
        vec![
            "i32.const 0",
            "i32.const 2",
            "call $rt.str_new",
            "i32.const 2",
            "i32.const 5",
            "call $rt.str_new",
            "call $rt.str_concat",
            "local.set 0",
            "return",
        ]
    );
}

#[test]
fn test_repeated_string_literal_is_interned_once() {
    let wat = compile_to_wat("print(\"ab\")\nprint(\"ab\")");
    assert!(wat.contains("(data (i32.const 0) \"ab\")"));
    let body = instructions(&wat, MAIN_FUNCTION);
    assert_eq!(count_lines(&body, "i32.const 0"), 2);
}

#[test]
fn test_string_escapes_in_data_segment() {
    let wat = compile_to_wat("print(\"a\\\"b\\n\")");
    assert!(wat.contains(r#"(data (i32.const 0) "a\22b\0a")"#), "{}", wat);
}

#[test]
fn test_string_equality_uses_runtime() {
    let wat = compile_to_wat("b = \"a\" != \"b\"");
    let body = instructions(&wat, MAIN_FUNCTION);
    let call = body.iter().position(|l| l == "call $rt.str_eq").expect("str_eq");
    assert_eq!(body[call + 1], "i32.eqz");
}

#[test]
fn test_set_literal_and_operations() {
    let wat = compile_to_wat("s = {1, 2} union {3}\nb = 2 in s");
    assert_eq!(
        instructions(&wat, MAIN_FUNCTION),
        vec![
            "call $rt.set_new",
            "i32.const 1",
            "call $rt.set_add",
            "i32.const 2",
            "call $rt.set_add",
            "call $rt.set_new",
            "i32.const 3",
            "call $rt.set_add",
            "call $rt.set_union",
            "local.set 0",
            "i32.const 2",
            "local.get 0",
            "call $rt.set_contains",
            "local.set 1",
            "return",
        ]
    );
}

#[test]
fn test_tuple_elements_pushed_by_value_type() {
    let wat = compile_to_wat("t = (1, 2.5)");
    assert_eq!(
        instructions(&wat, MAIN_FUNCTION),
        vec![
            "call $rt.tuple_new",
            "i32.const 1",
            "call $rt.tuple_push_i32",
            "f64.const 2.5",
            "call $rt.tuple_push_f64",
            "local.set 0",
            "return",
        ]
    );
    assert!(wat.contains(
        "(import \"env\" \"tuple_push_f64\" (func $rt.tuple_push_f64 (param i32 f64) (result i32)))"
    ));
}

#[test]
fn test_graph_operations() {
    let wat = compile_to_wat(
        "a = node(\"a\")\nb = node(\"b\")\ng = graph() + arc(a, b)\ng = g / b\nx = a in g",
    );
    let body = instructions(&wat, MAIN_FUNCTION);
    for call in [
        "call $rt.node_new",
        "call $rt.graph_new",
        "call $rt.arc_new",
        "call $rt.graph_add_arc",
        "call $rt.graph_remove_node",
        "call $rt.graph_contains",
    ] {
        assert!(body.contains(&call.to_string()), "missing {}", call);
    }
}

#[test]
fn test_builtin_size_and_len() {
    let wat = compile_to_wat("n = size({1})\nm = len(\"abc\")");
    let body = instructions(&wat, MAIN_FUNCTION);
    assert!(body.contains(&"call $rt.set_size".to_string()));
    assert!(body.contains(&"call $rt.str_len".to_string()));
}

#[test]
fn test_imports_follow_declaration_order() {
    let wat = compile_to_wat("print(\"x\")\ns = {1}");
    let imports: Vec<&str> = wat
        .lines()
        .filter(|l| l.contains("(import"))
        .map(|l| l.trim())
        .collect();
    assert_eq!(
        imports,
        vec![
            "(import \"env\" \"str_new\" (func $rt.str_new (param i32 i32) (result i32)))",
            "(import \"env\" \"set_new\" (func $rt.set_new (result i32)))",
            "(import \"env\" \"set_add\" (func $rt.set_add (param i32 i32) (result i32)))",
            "(import \"env\" \"print_str\" (func $rt.print_str (param i32)))",
            "(import \"env\" \"print_newline\" (func $rt.print_newline))",
        ]
    );
}
