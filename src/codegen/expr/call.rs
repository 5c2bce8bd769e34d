//! 関数呼び出しのコード生成

use crate::ast::*;
use crate::error::{AmimeResult, CodegenError};

use crate::codegen::code_generator::{CodeGenerator, FunctionContext};
use crate::codegen::runtime::RuntimeFn;

impl<'a, 'p> CodeGenerator<'a, 'p> {
    /// 関数呼び出しをコンパイル
    ///
    /// 引数はシグネチャのパラメータ型に合わせて昇格する。組み込み関数は
    /// ランタイム呼び出しになる。
    pub(super) fn compile_call_expr(&mut self, ctx: &mut FunctionContext, call: &CallExpr) -> AmimeResult<()> {
        let checked = self.checked;
        let signature = checked
            .functions()
            .get(&call.callee)
            .ok_or_else(|| CodegenError::Internal {
                message: format!("call to unknown function '{}'", call.callee),
            })?;

        for (arg, param) in call.args.iter().zip(signature.param_types()) {
            self.compile_expression_as(ctx, arg, param)?;
        }

        let instruction = if signature.builtin {
            let runtime = builtin_runtime(&call.callee).ok_or_else(|| CodegenError::Internal {
                message: format!("builtin '{}' has no runtime function", call.callee),
            })?;
            self.runtime.call(runtime)
        } else {
            format!("call ${}", call.callee)
        };
        ctx.emit(instruction);
        Ok(())
    }
}

/// 組み込み関数に対応するランタイム関数
fn builtin_runtime(name: &str) -> Option<RuntimeFn> {
    match name {
        "node" => Some(RuntimeFn::NodeNew),
        "arc" => Some(RuntimeFn::ArcNew),
        "graph" => Some(RuntimeFn::GraphNew),
        "size" => Some(RuntimeFn::SetSize),
        "len" => Some(RuntimeFn::StrLen),
        _ => None,
    }
}
