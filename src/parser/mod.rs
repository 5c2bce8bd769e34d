//! パーサーモジュール
//!
//! このモジュールはトークンを抽象構文木（AST）に解析する責任を持ちます。
//! 再帰下降構文解析を使用し、適切な優先順位処理を行います。
//!
//! ## 構文の概要
//!
//! トップレベルには関数宣言と文を自由に並べられる。文の区切りの`;`は省略可能。
//!
//! ```text
//! fn gcd(a: int, b: int) -> int {
//!     while b != 0 {
//!         t = b
//!         b = a % b
//!         a = t
//!     }
//!     return a
//! }
//!
//! s = {1, 2, 3} union {3, 4}
//! for i in 0..10 step 2 { print(i) }
//! switch gcd(12, 18) {
//!     case 6 { print("six") }
//!     default { print("other") }
//! }
//! ```
//!
//! 演算子の優先順位（低い順）:
//! `or` < `and` < `== !=` < `< <= > >= in` < `union intersect diff symdiff`
//! < `+ - ++` < `* / %` < `as` < 単項`- not` < 一次式

mod decl_parser;
mod expr;
mod expr_parser;
mod parser_impl;
mod stmt_parser;
mod type_parser;

// 公開API
pub use parser_impl::Parser;

use crate::ast::Program;
use crate::error::{AmimeResult, ParserError};
use crate::lexer::tokenize;

pub type ParseError = ParserError;
pub type ParseResult<T> = Result<T, ParseError>;

/// ソースコードを字句解析・構文解析してASTを得る
pub fn parse_source(source: &str) -> AmimeResult<Program> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens);
    Ok(parser.parse()?)
}
