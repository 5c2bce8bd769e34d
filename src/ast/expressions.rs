//! 式の定義

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{NodeId, Span, Type};

/// 式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Integer(IntegerLit),
    Float(FloatLit),
    String(StringLit),
    Boolean(BooleanLit),
    Identifier(Identifier),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Call(CallExpr),
    Set(SetExpr),
    Tuple(TupleExpr),
    Cast(CastExpr),
}

impl Expression {
    pub fn id(&self) -> NodeId {
        match self {
            Expression::Integer(e) => e.id,
            Expression::Float(e) => e.id,
            Expression::String(e) => e.id,
            Expression::Boolean(e) => e.id,
            Expression::Identifier(e) => e.id,
            Expression::Binary(e) => e.id,
            Expression::Unary(e) => e.id,
            Expression::Call(e) => e.id,
            Expression::Set(e) => e.id,
            Expression::Tuple(e) => e.id,
            Expression::Cast(e) => e.id,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Expression::Integer(e) => e.span,
            Expression::Float(e) => e.span,
            Expression::String(e) => e.span,
            Expression::Boolean(e) => e.span,
            Expression::Identifier(e) => e.span,
            Expression::Binary(e) => e.span,
            Expression::Unary(e) => e.span,
            Expression::Call(e) => e.span,
            Expression::Set(e) => e.span,
            Expression::Tuple(e) => e.span,
            Expression::Cast(e) => e.span,
        }
    }
}

/// 整数リテラル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegerLit {
    pub id: NodeId,
    pub value: i32,
    pub span: Span,
}

/// 浮動小数点リテラル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatLit {
    pub id: NodeId,
    pub value: f64,
    pub span: Span,
}

/// 文字列リテラル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringLit {
    pub id: NodeId,
    pub value: String,
    pub span: Span,
}

/// 真偽値リテラル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanLit {
    pub id: NodeId,
    pub value: bool,
    pub span: Span,
}

/// 識別子
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub id: NodeId,
    pub name: String,
    pub span: Span,
}

/// 二項演算式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub id: NodeId,
    pub left: Box<Expression>,
    pub op: BinaryOp,
    pub right: Box<Expression>,
    pub span: Span,
}

/// 二項演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    And,
    Or,
    /// 集合の和
    Union,
    /// 集合の積
    Intersect,
    /// 集合の差
    Diff,
    /// 集合の対称差
    SymDiff,
    /// タプルの連結 `++`
    Concat,
    /// 所属判定 `in`
    In,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Union => "union",
            BinaryOp::Intersect => "intersect",
            BinaryOp::Diff => "diff",
            BinaryOp::SymDiff => "symdiff",
            BinaryOp::Concat => "++",
            BinaryOp::In => "in",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// 単項演算式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub id: NodeId,
    pub op: UnaryOp,
    pub expr: Box<Expression>,
    pub span: Span,
}

/// 単項演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Negate,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Not => f.write_str("not"),
            UnaryOp::Negate => f.write_str("-"),
        }
    }
}

/// 関数呼び出し式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub id: NodeId,
    pub callee: String,
    pub args: Vec<Expression>,
    pub span: Span,
}

/// 集合リテラル `{1, 2, 3}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetExpr {
    pub id: NodeId,
    pub elements: Vec<Expression>,
    pub span: Span,
}

/// タプル式 `(a, b)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TupleExpr {
    pub id: NodeId,
    pub elements: Vec<Expression>,
    pub span: Span,
}

/// 型変換式 `expr as type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastExpr {
    pub id: NodeId,
    pub expr: Box<Expression>,
    pub target: Type,
    pub span: Span,
}
