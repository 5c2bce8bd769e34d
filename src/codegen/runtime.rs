//! ランタイム関数の宣言と管理
//!
//! ホスト側のランタイムは`env`モジュールから関数を提供する。
//! 実際に呼び出した関数だけをインポートとして出力する。

use std::collections::BTreeSet;

use super::types::ValType;

/// ランタイムが提供する関数
///
/// 宣言順がインポートの出力順になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuntimeFn {
    // 文字列
    StrNew,
    StrConcat,
    StrEq,
    StrLen,
    StrFromInt,
    StrFromFloat,
    StrFromBool,
    StrToInt,
    // 集合
    SetNew,
    SetAdd,
    SetUnion,
    SetIntersect,
    SetDiff,
    SetSymDiff,
    SetContains,
    SetSize,
    SetEq,
    // タプル
    TupleNew,
    TuplePushI32,
    TuplePushF64,
    TupleConcat,
    TupleEq,
    // グラフ
    NodeNew,
    ArcNew,
    GraphNew,
    GraphAddArc,
    GraphRemoveArc,
    GraphAddNode,
    GraphRemoveNode,
    GraphContains,
    AggregateEq,
    // 出力
    PrintInt,
    PrintFloat,
    PrintBool,
    PrintStr,
    PrintSet,
    PrintTuple,
    PrintAggregate,
    PrintSpace,
    PrintNewline,
}

impl RuntimeFn {
    /// インポート名
    pub fn name(self) -> &'static str {
        match self {
            RuntimeFn::StrNew => "str_new",
            RuntimeFn::StrConcat => "str_concat",
            RuntimeFn::StrEq => "str_eq",
            RuntimeFn::StrLen => "str_len",
            RuntimeFn::StrFromInt => "str_from_int",
            RuntimeFn::StrFromFloat => "str_from_float",
            RuntimeFn::StrFromBool => "str_from_bool",
            RuntimeFn::StrToInt => "str_to_int",
            RuntimeFn::SetNew => "set_new",
            RuntimeFn::SetAdd => "set_add",
            RuntimeFn::SetUnion => "set_union",
            RuntimeFn::SetIntersect => "set_intersect",
            RuntimeFn::SetDiff => "set_diff",
            RuntimeFn::SetSymDiff => "set_symdiff",
            RuntimeFn::SetContains => "set_contains",
            RuntimeFn::SetSize => "set_size",
            RuntimeFn::SetEq => "set_eq",
            RuntimeFn::TupleNew => "tuple_new",
            RuntimeFn::TuplePushI32 => "tuple_push_i32",
            RuntimeFn::TuplePushF64 => "tuple_push_f64",
            RuntimeFn::TupleConcat => "tuple_concat",
            RuntimeFn::TupleEq => "tuple_eq",
            RuntimeFn::NodeNew => "node_new",
            RuntimeFn::ArcNew => "arc_new",
            RuntimeFn::GraphNew => "graph_new",
            RuntimeFn::GraphAddArc => "graph_add_arc",
            RuntimeFn::GraphRemoveArc => "graph_remove_arc",
            RuntimeFn::GraphAddNode => "graph_add_node",
            RuntimeFn::GraphRemoveNode => "graph_remove_node",
            RuntimeFn::GraphContains => "graph_contains",
            RuntimeFn::AggregateEq => "agg_eq",
            RuntimeFn::PrintInt => "print_int",
            RuntimeFn::PrintFloat => "print_float",
            RuntimeFn::PrintBool => "print_bool",
            RuntimeFn::PrintStr => "print_str",
            RuntimeFn::PrintSet => "print_set",
            RuntimeFn::PrintTuple => "print_tuple",
            RuntimeFn::PrintAggregate => "print_aggregate",
            RuntimeFn::PrintSpace => "print_space",
            RuntimeFn::PrintNewline => "print_newline",
        }
    }

    /// (パラメータ型, 戻り値型)
    pub fn signature(self) -> (&'static [ValType], Option<ValType>) {
        use ValType::{F64, I32};

        match self {
            RuntimeFn::StrNew
            | RuntimeFn::StrConcat
            | RuntimeFn::StrEq
            | RuntimeFn::SetAdd
            | RuntimeFn::SetUnion
            | RuntimeFn::SetIntersect
            | RuntimeFn::SetDiff
            | RuntimeFn::SetSymDiff
            | RuntimeFn::SetContains
            | RuntimeFn::SetEq
            | RuntimeFn::TuplePushI32
            | RuntimeFn::TupleConcat
            | RuntimeFn::TupleEq
            | RuntimeFn::ArcNew
            | RuntimeFn::GraphAddArc
            | RuntimeFn::GraphRemoveArc
            | RuntimeFn::GraphAddNode
            | RuntimeFn::GraphRemoveNode
            | RuntimeFn::GraphContains
            | RuntimeFn::AggregateEq => (&[I32, I32], Some(I32)),
            RuntimeFn::StrLen
            | RuntimeFn::StrFromInt
            | RuntimeFn::StrFromBool
            | RuntimeFn::StrToInt
            | RuntimeFn::SetSize
            | RuntimeFn::NodeNew => (&[I32], Some(I32)),
            RuntimeFn::StrFromFloat => (&[F64], Some(I32)),
            RuntimeFn::TuplePushF64 => (&[I32, F64], Some(I32)),
            RuntimeFn::SetNew | RuntimeFn::TupleNew | RuntimeFn::GraphNew => (&[], Some(I32)),
            RuntimeFn::PrintInt
            | RuntimeFn::PrintBool
            | RuntimeFn::PrintStr
            | RuntimeFn::PrintSet
            | RuntimeFn::PrintTuple
            | RuntimeFn::PrintAggregate => (&[I32], None),
            RuntimeFn::PrintFloat => (&[F64], None),
            RuntimeFn::PrintSpace | RuntimeFn::PrintNewline => (&[], None),
        }
    }

    /// インポート宣言
    pub fn import_decl(self) -> String {
        let (params, result) = self.signature();
        let mut decl = format!("(import \"env\" \"{0}\" (func $rt.{0}", self.name());
        if !params.is_empty() {
            let params: Vec<&str> = params.iter().map(|p| p.as_str()).collect();
            decl.push_str(&format!(" (param {})", params.join(" ")));
        }
        if let Some(result) = result {
            decl.push_str(&format!(" (result {})", result));
        }
        decl.push_str("))");
        decl
    }
}

/// ランタイム関数マネージャー
#[derive(Debug, Default)]
pub struct RuntimeManager {
    /// 呼び出されたランタイム関数
    used: BTreeSet<RuntimeFn>,
}

impl RuntimeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 呼び出し命令を作り、インポート対象として記録する
    pub fn call(&mut self, function: RuntimeFn) -> String {
        self.used.insert(function);
        format!("call $rt.{}", function.name())
    }

    pub fn is_used(&self, function: RuntimeFn) -> bool {
        self.used.contains(&function)
    }

    /// 使用された関数のインポート宣言（宣言順）
    pub fn imports(&self) -> impl Iterator<Item = String> + '_ {
        self.used.iter().map(|f| f.import_decl())
    }
}
