//! 式の解析モジュール
//!
//! 式の解析を複数のサブモジュールに分割して管理する。
//! 各モジュールは特定の種類の式の解析を担当する。

mod binary_expr;
mod literal_expr;
mod unary_expr;
