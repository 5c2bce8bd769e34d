//! 基本的なコード生成のテスト

use super::*;
use amime::codegen::MAIN_FUNCTION;
use pretty_assertions::assert_eq;

#[test]
fn test_complete_module_for_top_level_statements() {
    let wat = compile_to_wat("x = 1\ny = 2\nz = x + y");
    let expected = "\
(module
  (memory (export \"memory\") 1)
  (func $amime.main (export \"main\")
    (local i32 i32 i32)
    i32.const 1
    local.set 0
    i32.const 2
    local.set 1
    local.get 0
    local.get 1
    i32.add
    local.set 2
    return
  )
)
";
    assert_eq!(wat, expected);
}

#[test]
fn test_empty_program() {
    let wat = compile_to_wat("");
    assert_eq!(instructions(&wat, MAIN_FUNCTION), vec!["return"]);
    assert!(!wat.contains("(import"));
    assert!(!wat.contains("(data"));
}

#[test]
fn test_function_with_parameters() {
    let wat = compile_to_wat(
        "fn f(a: int, b: float) -> float { let c = a\n let d = b\n return d }",
    );
    assert_eq!(function_header(&wat, "$f"), "(func $f (param i32 f64) (result f64)");
    assert_eq!(
        function_body(&wat, "$f"),
        vec![
            "(local i32 f64)",
            "local.get 0",
            "local.set 2",
            "local.get 1",
            "local.set 3",
            "local.get 3",
            "return",
        ]
    );
}

#[test]
fn test_functions_precede_main() {
    let wat = compile_to_wat("print(one())\nfn one() -> int { return 1 }");
    let one = wat.find("(func $one").expect("function");
    let main = wat.find("(func $amime.main").expect("main");
    assert!(one < main);
    assert_eq!(
        instructions(&wat, MAIN_FUNCTION),
        vec![
            "call $one",
            "call $rt.print_int",
            "call $rt.print_newline",
            "return",
        ]
    );
}

#[test]
fn test_void_function_gets_trailing_return() {
    let wat = compile_to_wat("fn hello() { print(\"hi\") }");
    let body = instructions(&wat, "$hello");
    assert_eq!(body.last().map(String::as_str), Some("return"));
    assert_eq!(function_header(&wat, "$hello"), "(func $hello");
}

#[test]
fn test_literals() {
    let wat = compile_to_wat("a = 42\nb = 2.5\nc = true\nd = 1.0");
    let body = instructions(&wat, MAIN_FUNCTION);
    assert!(body.contains(&"i32.const 42".to_string()));
    assert!(body.contains(&"f64.const 2.5".to_string()));
    assert!(body.contains(&"i32.const 1".to_string()));
    assert!(body.contains(&"f64.const 1.0".to_string()));
}

#[test]
fn test_most_negative_int_literal() {
    let wat = compile_to_wat("x = -2147483648");
    assert_eq!(
        instructions(&wat, MAIN_FUNCTION),
        vec!["i32.const -2147483648", "local.set 0", "return"]
    );
}

#[test]
fn test_mixed_arithmetic_promotes_int() {
    let wat = compile_to_wat("x = 1 + 2.5");
    assert_eq!(
        instructions(&wat, MAIN_FUNCTION),
        vec![
            "i32.const 1",
            "f64.convert_i32_s",
            "f64.const 2.5",
            "f64.add",
            "local.set 0",
            "return",
        ]
    );
    assert!(wat.contains("(local f64)"));
}

#[test]
fn test_int_argument_promoted_to_float_parameter() {
    let wat = compile_to_wat("fn half(x: float) -> float { return x / 2 }\nv = half(3)");
    assert_eq!(
        instructions(&wat, MAIN_FUNCTION),
        vec!["i32.const 3", "f64.convert_i32_s", "call $half", "local.set 0", "return"]
    );
}

#[test]
fn test_integer_operators() {
    let wat = compile_to_wat("a = 7 / 2\nb = 7 % 2\nc = 1 < 2\nd = 1 != 2\ne = -a");
    let body = instructions(&wat, MAIN_FUNCTION);
    for expected in ["i32.div_s", "i32.rem_s", "i32.lt_s", "i32.ne", "i32.mul"] {
        assert!(body.contains(&expected.to_string()), "missing {}", expected);
    }
}

#[test]
fn test_logical_and_short_circuits() {
    let wat = compile_to_wat("b = true and false");
    assert_eq!(
        instructions(&wat, MAIN_FUNCTION),
        vec![
            "i32.const 1",
            "if (result i32)",
            "i32.const 0",
            "else",
            "i32.const 0",
            "end",
            "local.set 0",
            "return",
        ]
    );
}

#[test]
fn test_logical_or_short_circuits() {
    let wat = compile_to_wat("b = false or true");
    assert_eq!(
        instructions(&wat, MAIN_FUNCTION),
        vec![
            "i32.const 0",
            "if (result i32)",
            "i32.const 1",
            "else",
            "i32.const 1",
            "end",
            "local.set 0",
            "return",
        ]
    );
}

#[test]
fn test_casts() {
    let wat = compile_to_wat("a = 2.7 as int\nb = 3 as float\nc = 5 as bool\nd = 4 as string");
    let body = instructions(&wat, MAIN_FUNCTION);
    assert!(body.contains(&"i32.trunc_f64_s".to_string()));
    assert!(body.contains(&"f64.convert_i32_s".to_string()));
    assert!(body.contains(&"call $rt.str_from_int".to_string()));
    assert!(wat.contains(
        "(import \"env\" \"str_from_int\" (func $rt.str_from_int (param i32) (result i32)))"
    ));
}

#[test]
fn test_print_separates_arguments() {
    let wat = compile_to_wat("print(1, 2.5, true)");
    assert_eq!(
        instructions(&wat, MAIN_FUNCTION),
        vec![
            "i32.const 1",
            "call $rt.print_int",
            "call $rt.print_space",
            "f64.const 2.5",
            "call $rt.print_float",
            "call $rt.print_space",
            "i32.const 1",
            "call $rt.print_bool",
            "call $rt.print_newline",
            "return",
        ]
    );
}

#[test]
fn test_only_used_runtime_functions_are_imported() {
    let wat = compile_to_wat("print(1)");
    let imports: Vec<&str> = wat.lines().filter(|l| l.contains("(import")).collect();
    assert_eq!(
        imports,
        vec![
            "  (import \"env\" \"print_int\" (func $rt.print_int (param i32)))",
            "  (import \"env\" \"print_newline\" (func $rt.print_newline))",
        ]
    );
}

#[test]
fn test_discarded_expression_value_is_dropped() {
    let wat = compile_to_wat("fn one() -> int { return 1 }\nfn nothing() { }\none()\nnothing()");
    assert_eq!(
        instructions(&wat, MAIN_FUNCTION),
        vec!["call $one", "drop", "call $nothing", "return"]
    );
}

#[test]
fn test_output_is_deterministic() {
    let source = "s = {3, 1} union {2}\nt = (1, \"a\")\nfn f(x: int) -> int { return x }\nprint(f(2), s, t)";
    assert_eq!(compile_to_wat(source), compile_to_wat(source));
}
