//! 解析器テストの共通モジュール

use amime::analyzer::{SemanticAnalyzer, TypeTag};
use amime::ast::{Program, Statement};
use amime::error::{DiagnosticKind, Diagnostics};
use amime::parser::parse_source;

/// ソースを解析する（構文エラーはテストの失敗）
pub fn parse(source: &str) -> Program {
    parse_source(source).expect("Parsing should succeed")
}

/// ソースを検査して診断を取得するヘルパー関数
pub fn diagnostics_for(source: &str) -> Diagnostics {
    let program = parse(source);
    let outcome = SemanticAnalyzer::new()
        .analyze(&program)
        .expect("Analysis should not abort");
    outcome.diagnostics().clone()
}

/// 解析が成功することを確認するヘルパー関数
pub fn assert_analysis_success(source: &str) {
    let diagnostics = diagnostics_for(source);
    assert!(
        diagnostics.is_empty(),
        "Expected no diagnostics, got: {:?}",
        diagnostics.iter().map(|d| d.to_string()).collect::<Vec<_>>()
    );
}

/// 診断の種類をソース順で比較するヘルパー関数
pub fn assert_diagnostic_kinds(source: &str, expected: &[DiagnosticKind]) {
    let diagnostics = diagnostics_for(source);
    let kinds: Vec<DiagnosticKind> = diagnostics
        .in_source_order()
        .into_iter()
        .map(|d| d.kind)
        .collect();
    assert_eq!(
        kinds,
        expected,
        "Diagnostics: {:?}",
        diagnostics.iter().map(|d| d.to_string()).collect::<Vec<_>>()
    );
}

/// トップレベルの代入`name = expr`の右辺に記録された型を取得
pub fn top_level_value_type(source: &str, name: &str) -> TypeTag {
    let program = parse(source);
    let outcome = SemanticAnalyzer::new()
        .analyze(&program)
        .expect("Analysis should not abort");
    let checked = outcome.into_checked().expect("Analysis should succeed");

    let value = program
        .top_level_statements()
        .find_map(|stmt| match stmt {
            Statement::Assignment(assign) if assign.name == name => Some(&assign.value),
            _ => None,
        })
        .expect("assignment not found");
    checked.type_of(value.id()).expect("type not recorded")
}

#[cfg(test)]
mod error_variable_function_test;
#[cfg(test)]
mod scope_test;
#[cfg(test)]
mod type_checking_test;
