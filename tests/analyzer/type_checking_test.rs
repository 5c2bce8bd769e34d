//! 型規則のテスト

use super::*;
use amime::error::DiagnosticKind::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case("v = 1 + 2", TypeTag::Int ; "int addition")]
#[test_case("v = 1 + 2.0", TypeTag::Float ; "mixed addition widens")]
#[test_case("v = 7 / 2", TypeTag::Int ; "int division")]
#[test_case("v = 7 % 2", TypeTag::Int ; "modulo")]
#[test_case("v = 1 < 2.5", TypeTag::Bool ; "mixed comparison")]
#[test_case("v = 1 == 1.0", TypeTag::Bool ; "mixed equality")]
#[test_case("v = \"a\" + \"b\"", TypeTag::String ; "string concatenation")]
#[test_case("v = {1, 2} union {3}", TypeTag::Set ; "set union")]
#[test_case("v = {1, 2} symdiff {2}", TypeTag::Set ; "set symmetric difference")]
#[test_case("v = 2 in {1, 2}", TypeTag::Bool ; "set membership")]
#[test_case("v = (1, \"a\") ++ (2.5,)", TypeTag::Tuple ; "tuple concatenation")]
#[test_case("v = graph() + arc(node(\"a\"), node(\"b\"))", TypeTag::GRAPH ; "graph plus arc")]
#[test_case("v = graph() / node(\"a\")", TypeTag::GRAPH ; "graph remove node")]
#[test_case("v = node(\"a\") in graph()", TypeTag::Bool ; "graph membership")]
#[test_case("v = -2.5", TypeTag::Float ; "float negation")]
#[test_case("v = not true", TypeTag::Bool ; "logical not")]
#[test_case("v = 3.9 as int", TypeTag::Int ; "float to int cast")]
#[test_case("v = 3 as string", TypeTag::String ; "int to string cast")]
#[test_case("v = \"42\" as int", TypeTag::Int ; "string to int cast")]
#[test_case("v = size({1, 2})", TypeTag::Int ; "set size builtin")]
#[test_case("v = len(\"abc\")", TypeTag::Int ; "string length builtin")]
fn test_expression_types(source: &str, expected: TypeTag) {
    assert_eq!(top_level_value_type(source, "v"), expected);
}

#[test_case("v = 1 + true" ; "int plus bool")]
#[test_case("v = \"a\" - \"b\"" ; "string subtraction")]
#[test_case("v = 1.5 % 2" ; "float modulo")]
#[test_case("v = {1} + {2}" ; "set addition")]
#[test_case("v = (1,) union (2,)" ; "tuple union")]
#[test_case("v = 1 and true" ; "int in logical and")]
#[test_case("v = \"a\" < \"b\"" ; "string ordering")]
#[test_case("v = \"a\" == 1" ; "string equals int")]
#[test_case("v = 1.5 in {1}" ; "float membership")]
#[test_case("v = arc(node(\"a\"), node(\"b\")) + graph()" ; "arc plus graph")]
#[test_case("v = -true" ; "negated bool")]
#[test_case("v = not 1" ; "not int")]
#[test_case("v = {1, 2.5}" ; "float set element")]
fn test_type_mismatch(source: &str) {
    assert_diagnostic_kinds(source, &[TypeMismatch]);
}

#[test_case("v = \"x\" as float" ; "string to float")]
#[test_case("v = {1} as tuple" ; "set to tuple")]
#[test_case("v = 1.5 as bool" ; "float to bool")]
fn test_invalid_cast(source: &str) {
    assert_diagnostic_kinds(source, &[InvalidCast]);
}

#[test]
fn test_errors_do_not_cascade() {
    // 未宣言の変数から生じたUnknownは二次的な診断を出さない
    assert_diagnostic_kinds(
        "v = (missing + 1) * 2 as float\nw = -missing",
        &[UndeclaredVariable, UndeclaredVariable],
    );
}

#[test]
fn test_int_widens_to_float_on_assignment() {
    assert_analysis_success("let f: float = 1\nf = 2\nf = 2.5");
    assert_diagnostic_kinds("let i: int = 1.5", &[TypeMismatch]);
    assert_diagnostic_kinds("i = 1\ni = 2.5", &[TypeMismatch]);
}

#[test]
fn test_argument_types() {
    assert_analysis_success("fn half(x: float) -> float { return x / 2 }\nv = half(3)");
    let diagnostics = diagnostics_for("fn twice(x: int) -> int { return x * 2 }\nv = twice(\"a\")");
    assert_eq!(diagnostics.kinds(), vec![TypeMismatch]);
    assert!(diagnostics.iter().any(|d| d.message.contains("argument 1 of 'twice'")));
}

#[test]
fn test_return_requires_exact_type() {
    assert_diagnostic_kinds("fn f() -> float { return 1 }", &[ReturnTypeMismatch]);
    assert_analysis_success("fn f() -> float { return 1 as float }");
}

#[test]
fn test_conditions_must_be_bool() {
    assert_diagnostic_kinds(
        "if 1 { print(1) }\nwhile \"s\" { break }\nuntil 2.5 { break }",
        &[InvalidConditionType, InvalidConditionType, InvalidConditionType],
    );
}

#[test]
fn test_for_bounds_must_be_int() {
    let diagnostics = diagnostics_for("for i in 0..2.5 step 1 { print(i) }");
    assert_eq!(diagnostics.kinds(), vec![TypeMismatch]);
    assert!(diagnostics.iter().any(|d| d.message.contains("range end of 'for'")));
}

#[test]
fn test_switch_case_types() {
    assert_analysis_success("switch 1 { case 1.0 { print(1) } case 2 { print(2) } }");
    assert_diagnostic_kinds("switch 1 { case \"one\" { print(1) } }", &[TypeMismatch]);
}

#[test]
fn test_void_values() {
    let void_fn = "fn nothing() { }\n";
    assert_diagnostic_kinds(&format!("{}x = nothing()", void_fn), &[TypeMismatch]);
    assert_diagnostic_kinds(&format!("{}print(nothing())", void_fn), &[TypeMismatch]);
    assert_diagnostic_kinds(&format!("{}t = (1, nothing())", void_fn), &[TypeMismatch]);
    assert_analysis_success(&format!("{}nothing()", void_fn));
}
