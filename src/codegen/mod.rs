//! コード生成モジュール
//!
//! 検査済みのASTからWebAssemblyテキスト形式（WAT）のモジュールを生成します。
//!
//! モジュールの構成:
//! 1. 使用したランタイム関数のインポート（`env`モジュール）
//! 2. 線形メモリ（`memory`としてエクスポート）と文字列定数のデータセグメント
//! 3. 関数から参照されるトップレベル変数のグローバル
//! 4. ユーザー関数（宣言順）
//! 5. トップレベル文をまとめたエントリ関数（`main`としてエクスポート）

mod code_generator;
mod constant_pool;
mod expr;
mod labels;
mod runtime;
mod stmt_codegen;
mod symbol_table;
mod types;

// 公開API
pub use code_generator::{CodeGenerator, FunctionContext, MAIN_FUNCTION};
pub use constant_pool::ConstantPool;
pub use labels::{LabelAllocator, LabelGroup, LabelKind};
pub use runtime::{RuntimeFn, RuntimeManager};
pub use symbol_table::{SlotTable, StorageSlot};
pub use types::ValType;

use crate::analyzer::CheckedProgram;
use crate::error::AmimeResult;

/// 検査済みプログラムからWATを生成する
pub fn generate_wat(checked: &CheckedProgram<'_>) -> AmimeResult<String> {
    CodeGenerator::new(checked).generate()
}
