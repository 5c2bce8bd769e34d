//! セマンティック解析モジュール
//!
//! このモジュールは名前解決、式の型付け、到達可能性の検査を行い、
//! 結果を`CheckedProgram`として後段のコード生成に渡します。
//!
//! 1. 関数シグネチャを全体から収集する（前方参照・再帰呼び出しのため）
//! 2. ソース順に関数本体とトップレベル文を検査する
//! 3. 診断が空の場合のみ`CheckedProgram`を取り出せる

mod annotations;
mod checked;
mod function_table;
mod scope;
mod semantic_analyzer;
mod symbol;
mod type_checker;
mod types;

// 公開API
pub use annotations::TypeAnnotations;
pub use checked::{AnalysisOutcome, CheckedProgram};
pub use function_table::FunctionTable;
pub use scope::{ScopeId, ScopeKind, ScopeManager};
pub use semantic_analyzer::SemanticAnalyzer;
pub use symbol::{FunctionSignature, Symbol, SymbolId, SymbolKind, Termination};
pub use type_checker::TypeChecker;
pub use types::{AggregateKind, TypeTag};
