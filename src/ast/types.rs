//! 型注釈

use serde::{Deserialize, Serialize};
use std::fmt;

/// ソース上に書かれる型名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Int,
    Float,
    Bool,
    String,
    Set,
    Tuple,
    Node,
    Arc,
    Graph,
    Void,
}

impl Type {
    /// 型名から型を取得
    pub fn from_name(name: &str) -> Option<Type> {
        let ty = match name {
            "int" => Type::Int,
            "float" => Type::Float,
            "bool" => Type::Bool,
            "string" => Type::String,
            "set" => Type::Set,
            "tuple" => Type::Tuple,
            "node" => Type::Node,
            "arc" => Type::Arc,
            "graph" => Type::Graph,
            "void" => Type::Void,
            _ => return None,
        };
        Some(ty)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::Bool => "bool",
            Type::String => "string",
            Type::Set => "set",
            Type::Tuple => "tuple",
            Type::Node => "node",
            Type::Arc => "arc",
            Type::Graph => "graph",
            Type::Void => "void",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
