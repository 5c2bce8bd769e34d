//! コード生成テストの共通モジュール

use amime::compiler::{compile_source, CompileOptions, CompileOutcome};

/// ソースコードをWATにコンパイルするヘルパー関数
pub fn compile_to_wat(source: &str) -> String {
    match compile_source(source, &CompileOptions::default()).expect("Compilation should not fail") {
        CompileOutcome::Emitted(wat) => wat,
        CompileOutcome::Rejected(diagnostics) => panic!(
            "Unexpected diagnostics: {:?}",
            diagnostics.iter().map(|d| d.to_string()).collect::<Vec<_>>()
        ),
    }
}

/// 関数定義の行（ヘッダと閉じ括弧を除き、インデントを除去）
pub fn function_body(wat: &str, name: &str) -> Vec<String> {
    let header = format!("  (func {}", name);
    let mut lines = wat.lines().skip_while(|line| {
        !(line.starts_with(&header)
            && line[header.len()..].chars().next().map_or(true, |c| c == ' '))
    });
    assert!(lines.next().is_some(), "function {} not found in:\n{}", name, wat);
    lines
        .take_while(|line| *line != "  )")
        .map(|line| line.trim().to_string())
        .collect()
}

/// 関数の命令列（`(local ...)`宣言を除く）
pub fn instructions(wat: &str, name: &str) -> Vec<String> {
    function_body(wat, name)
        .into_iter()
        .filter(|line| !line.starts_with("(local"))
        .collect()
}

/// 関数のヘッダ行
pub fn function_header(wat: &str, name: &str) -> String {
    let header = format!("  (func {}", name);
    wat.lines()
        .find(|line| line.starts_with(&header))
        .map(|line| line.trim().to_string())
        .unwrap_or_else(|| panic!("function {} not found in:\n{}", name, wat))
}

/// 行単位の出現回数
pub fn count_lines(lines: &[String], text: &str) -> usize {
    lines.iter().filter(|line| line.as_str() == text).count()
}

// サブモジュールの宣言
#[cfg(test)]
mod basic_test;
#[cfg(test)]
mod control_flow_test;
#[cfg(test)]
mod data_structures_test;
#[cfg(test)]
mod variable_test;
