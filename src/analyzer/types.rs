//! 検査器が扱う型タグ

use crate::ast::Type;
use std::fmt;

/// グラフ系の集約型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    Node,
    Arc,
    Graph,
}

/// 式の値の型
///
/// `Unknown`はエラーから回復した式に付く番兵で、これを含む演算は
/// 二次的な診断を出さない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Int,
    Float,
    Bool,
    String,
    Set,
    Tuple,
    Aggregate(AggregateKind),
    Void,
    Unknown,
}

impl TypeTag {
    pub const NODE: TypeTag = TypeTag::Aggregate(AggregateKind::Node);
    pub const ARC: TypeTag = TypeTag::Aggregate(AggregateKind::Arc);
    pub const GRAPH: TypeTag = TypeTag::Aggregate(AggregateKind::Graph);

    pub fn is_numeric(self) -> bool {
        matches!(self, TypeTag::Int | TypeTag::Float)
    }

    pub fn is_unknown(self) -> bool {
        self == TypeTag::Unknown
    }
}

impl From<Type> for TypeTag {
    fn from(ty: Type) -> Self {
        match ty {
            Type::Int => TypeTag::Int,
            Type::Float => TypeTag::Float,
            Type::Bool => TypeTag::Bool,
            Type::String => TypeTag::String,
            Type::Set => TypeTag::Set,
            Type::Tuple => TypeTag::Tuple,
            Type::Node => TypeTag::NODE,
            Type::Arc => TypeTag::ARC,
            Type::Graph => TypeTag::GRAPH,
            Type::Void => TypeTag::Void,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Bool => "bool",
            TypeTag::String => "string",
            TypeTag::Set => "set",
            TypeTag::Tuple => "tuple",
            TypeTag::Aggregate(AggregateKind::Node) => "node",
            TypeTag::Aggregate(AggregateKind::Arc) => "arc",
            TypeTag::Aggregate(AggregateKind::Graph) => "graph",
            TypeTag::Void => "void",
            TypeTag::Unknown => "{unknown}",
        };
        f.write_str(name)
    }
}
