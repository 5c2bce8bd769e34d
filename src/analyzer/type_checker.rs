//! 演算子・型変換・代入の互換性表

use crate::ast::{BinaryOp, UnaryOp};

use super::types::{AggregateKind, TypeTag};

/// 型チェッカー
///
/// 状態を持たない互換性表。いずれの入力にも`Unknown`を含まない前提で、
/// `Unknown`の抑制は呼び出し側で行う。
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeChecker;

impl TypeChecker {
    pub fn new() -> Self {
        Self
    }

    /// 二項演算の結果型（不正な組み合わせは`None`）
    pub fn binary_result(&self, op: BinaryOp, left: TypeTag, right: TypeTag) -> Option<TypeTag> {
        use AggregateKind::{Arc, Graph, Node};
        use TypeTag::*;

        match op {
            BinaryOp::Add | BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide => {
                match (op, left, right) {
                    (_, Int, Int) => Some(Int),
                    (_, l, r) if l.is_numeric() && r.is_numeric() => Some(Float),
                    (BinaryOp::Add, String, String) => Some(String),
                    (BinaryOp::Add | BinaryOp::Subtract, Aggregate(Graph), Aggregate(Arc)) => {
                        Some(Aggregate(Graph))
                    }
                    (BinaryOp::Multiply | BinaryOp::Divide, Aggregate(Graph), Aggregate(Node)) => {
                        Some(Aggregate(Graph))
                    }
                    _ => None,
                }
            }
            BinaryOp::Modulo => (left == Int && right == Int).then_some(Int),
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => {
                (left.is_numeric() && right.is_numeric()).then_some(Bool)
            }
            BinaryOp::Eq | BinaryOp::Ne => self.equality_compatible(left, right).then_some(Bool),
            BinaryOp::And | BinaryOp::Or => (left == Bool && right == Bool).then_some(Bool),
            BinaryOp::Union | BinaryOp::Intersect | BinaryOp::Diff | BinaryOp::SymDiff => {
                (left == Set && right == Set).then_some(Set)
            }
            BinaryOp::Concat => (left == Tuple && right == Tuple).then_some(Tuple),
            BinaryOp::In => match (left, right) {
                (Int, Set) | (Aggregate(Node), Aggregate(Graph)) => Some(Bool),
                _ => None,
            },
        }
    }

    /// 単項演算の結果型
    pub fn unary_result(&self, op: UnaryOp, operand: TypeTag) -> Option<TypeTag> {
        match (op, operand) {
            (UnaryOp::Negate, TypeTag::Int) => Some(TypeTag::Int),
            (UnaryOp::Negate, TypeTag::Float) => Some(TypeTag::Float),
            (UnaryOp::Not, TypeTag::Bool) => Some(TypeTag::Bool),
            _ => None,
        }
    }

    /// `==`/`!=`で比較できるか（数値同士は型が違ってもよい）
    pub fn equality_compatible(&self, left: TypeTag, right: TypeTag) -> bool {
        (left == right && left != TypeTag::Void) || (left.is_numeric() && right.is_numeric())
    }

    /// `target`型の場所に`value`型の値を入れられるか
    pub fn is_assignable(&self, target: TypeTag, value: TypeTag) -> bool {
        target == value || (target == TypeTag::Float && value == TypeTag::Int)
    }

    /// `as`による型変換が許されるか
    pub fn cast_allowed(&self, from: TypeTag, to: TypeTag) -> bool {
        use TypeTag::*;

        if from == Void || to == Void {
            return false;
        }
        from == to
            || matches!(
                (from, to),
                (Int, Float)
                    | (Float, Int)
                    | (Int, String)
                    | (Float, String)
                    | (Bool, String)
                    | (String, Int)
                    | (Bool, Int)
                    | (Int, Bool)
            )
    }
}
