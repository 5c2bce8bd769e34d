//! WebAssemblyの値型と型タグの対応

use std::fmt;

use crate::analyzer::TypeTag;
use crate::error::{AmimeResult, CodegenError};

/// WebAssemblyの値型
///
/// 文字列・集合・タプル・グラフ系の値はランタイムが管理するハンドル（i32）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValType {
    I32,
    F64,
}

impl ValType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValType::I32 => "i32",
            ValType::F64 => "f64",
        }
    }

    /// ゼロ値を積む命令
    pub fn zero(self) -> &'static str {
        match self {
            ValType::I32 => "i32.const 0",
            ValType::F64 => "f64.const 0",
        }
    }
}

impl fmt::Display for ValType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 値を持つ型タグの値型
pub fn value_type(tag: TypeTag) -> AmimeResult<ValType> {
    match tag {
        TypeTag::Float => Ok(ValType::F64),
        TypeTag::Int
        | TypeTag::Bool
        | TypeTag::String
        | TypeTag::Set
        | TypeTag::Tuple
        | TypeTag::Aggregate(_) => Ok(ValType::I32),
        TypeTag::Void | TypeTag::Unknown => Err(CodegenError::Internal {
            message: format!("type {} has no runtime representation", tag),
        }
        .into()),
    }
}

/// 関数の戻り値型（voidは`None`）
pub fn result_type(tag: TypeTag) -> AmimeResult<Option<ValType>> {
    match tag {
        TypeTag::Void => Ok(None),
        other => value_type(other).map(Some),
    }
}
