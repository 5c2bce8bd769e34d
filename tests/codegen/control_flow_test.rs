//! 制御フローのコード生成テスト

use super::*;
use amime::codegen::MAIN_FUNCTION;
use pretty_assertions::assert_eq;

#[test]
fn test_if_without_else() {
    let wat = compile_to_wat("x = 1\nif x > 0 { print(x) }");
    assert_eq!(
        instructions(&wat, MAIN_FUNCTION),
        vec![
            "i32.const 1",
            "local.set 0",
            "block $end_0",
            "block $else_0",
            "local.get 0",
            "i32.const 0",
            "i32.gt_s",
            "i32.eqz",
            "br_if $else_0",
            "local.get 0",
            "call $rt.print_int",
            "call $rt.print_newline",
            "br $end_0",
            "end",
            "end",
            "return",
        ]
    );
}

#[test]
fn test_nested_blocks_are_indented() {
    let wat = compile_to_wat("if true { print(1) }");
    assert!(wat.contains("\n    block $end_0\n      block $else_0\n        i32.const 1\n"));
    assert!(wat.contains("\n        br $end_0\n      end\n    end\n    return\n"));
}

#[test]
fn test_if_else_in_always_returning_function() {
    let wat = compile_to_wat(
        "fn sign(x: int) -> int { if x > 0 { return 1 } else { return -1 } }",
    );
    let body = instructions(&wat, "$sign");
    assert_eq!(count_lines(&body, "block $else_0"), 1);
    assert_eq!(count_lines(&body, "block $end_0"), 1);
    assert_eq!(count_lines(&body, "return"), 2);
    assert_eq!(body.last().map(String::as_str), Some("unreachable"));
}

#[test]
fn test_else_if_chain_uses_fresh_labels() {
    let wat = compile_to_wat(
        "x = 0\nif x > 0 { print(1) } else if x < 0 { print(2) } else { print(3) }",
    );
    let body = instructions(&wat, MAIN_FUNCTION);
    for label in ["block $end_0", "block $else_0", "block $end_1", "block $else_1"] {
        assert_eq!(count_lines(&body, label), 1, "{}", label);
    }
}

#[test]
fn test_function_ending_in_return_has_no_unreachable() {
    let wat = compile_to_wat("fn f() -> int { return 1 }");
    assert_eq!(instructions(&wat, "$f"), vec!["i32.const 1", "return"]);
}

#[test]
fn test_while_with_break() {
    let wat = compile_to_wat("while (true) { break }");
    assert_eq!(
        instructions(&wat, MAIN_FUNCTION),
        vec![
            "block $end_0",
            "loop $start_0",
            "i32.const 1",
            "i32.eqz",
            "br_if $end_0",
            "br $end_0",
            "br $start_0",
            "end",
            "end",
            "return",
        ]
    );
}

#[test]
fn test_until_exits_when_condition_holds() {
    let wat = compile_to_wat("until false { break }");
    let body = instructions(&wat, MAIN_FUNCTION);
    assert_eq!(
        body[..4].to_vec(),
        vec!["block $end_0", "loop $start_0", "i32.const 0", "br_if $end_0"]
    );
    assert_eq!(count_lines(&body, "i32.eqz"), 0);
}

#[test]
fn test_for_with_step() {
    let wat = compile_to_wat("for i in 0..10 step 2 { print(i) }");
    assert!(wat.contains("    (local i32 i32 i32)\n"));
    assert_eq!(
        instructions(&wat, MAIN_FUNCTION),
        vec![
            "i32.const 0",
            "local.set 0",
            "i32.const 10",
            "local.set 1",
            "i32.const 2",
            "local.set 2",
            "block $end_0",
            "loop $start_0",
            "local.get 0",
            "local.get 1",
            "i32.lt_s",
            "i32.eqz",
            "br_if $end_0",
            "local.get 0",
            "call $rt.print_int",
            "call $rt.print_newline",
            "local.get 0",
            "local.get 2",
            "i32.add",
            "local.set 0",
            "br $start_0",
            "end",
            "end",
            "return",
        ]
    );
}

#[test]
fn test_for_without_step_uses_one() {
    let wat = compile_to_wat("for i in 0..3 { }");
    let body = instructions(&wat, MAIN_FUNCTION);
    assert_eq!(
        body[..6].to_vec(),
        vec!["i32.const 0", "local.set 0", "i32.const 3", "local.set 1", "i32.const 1", "local.set 2"]
    );
}

#[test]
fn test_break_targets_innermost_loop() {
    let wat = compile_to_wat("while true { for i in 0..3 { break } break }");
    let body = instructions(&wat, MAIN_FUNCTION);
    let inner_break = body
        .iter()
        .position(|line| line == "br $end_1")
        .expect("inner break");
    let outer_break = body
        .iter()
        .rposition(|line| line == "br $end_0")
        .expect("outer break");
    assert!(inner_break < outer_break);
}

#[test]
fn test_switch_dispatch() {
    let wat = compile_to_wat(
        r#"
        x = 2
        switch x {
            case 1 { print("one") }
            case 2 { print("two") }
            default { print("many") }
        }
        "#,
    );
    let body = instructions(&wat, MAIN_FUNCTION);

    let outer_case = body.iter().position(|l| l == "block $case_0_1").expect("case 1 block");
    let inner_case = body.iter().position(|l| l == "block $case_0_0").expect("case 0 block");
    let end_block = body.iter().position(|l| l == "block $end_0").expect("end block");
    assert!(end_block < outer_case && outer_case < inner_case);

    assert_eq!(count_lines(&body, "br_if $case_0_0"), 1);
    assert_eq!(count_lines(&body, "br_if $case_0_1"), 1);
    assert_eq!(count_lines(&body, "br $end_0"), 3);
    assert_eq!(count_lines(&body, "i32.eq"), 2);
    // 主題は作業用ローカルに一度だけ評価される
    assert!(wat.contains("(local i32 i32)"));
}

#[test]
fn test_switch_on_float_promotes_int_cases() {
    let wat = compile_to_wat("switch 1.5 { case 1 { print(1) } }");
    let body = instructions(&wat, MAIN_FUNCTION);
    assert_eq!(
        body[..7].to_vec(),
        vec![
            "f64.const 1.5",
            "local.set 0",
            "block $end_0",
            "block $case_0_0",
            "local.get 0",
            "i32.const 1",
            "f64.convert_i32_s",
        ]
    );
    assert_eq!(count_lines(&body, "f64.eq"), 1);
}

#[test]
fn test_break_in_switch_leaves_switch() {
    let wat = compile_to_wat("switch 1 { case 1 { break } }");
    let body = instructions(&wat, MAIN_FUNCTION);
    // case本体のbreakと本体後の分岐、defaultなしの分岐
    assert_eq!(count_lines(&body, "br $end_0"), 3);
}

#[test]
fn test_top_level_return_ends_main() {
    let wat = compile_to_wat("print(1)\nreturn");
    let body = instructions(&wat, MAIN_FUNCTION);
    assert_eq!(body.last().map(String::as_str), Some("return"));
    assert_eq!(count_lines(&body, "return"), 1);
    assert_eq!(count_lines(&body, "unreachable"), 0);
}
