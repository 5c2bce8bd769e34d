//! 式のコード生成モジュール
//!
//! 式は後順に出力する（オペランドを積んでから演算命令）。命令の選択は
//! 検査時に記録された型だけで決める。

mod aggregate;
mod binary;
mod call;
mod cast;
mod literal;
mod unary;

use crate::analyzer::TypeTag;
use crate::ast::*;
use crate::error::{AmimeResult, CodegenError};

use super::code_generator::{CodeGenerator, FunctionContext};
use super::runtime::RuntimeFn;

impl<'a, 'p> CodeGenerator<'a, 'p> {
    /// 式をコンパイル
    pub(super) fn compile_expression(&mut self, ctx: &mut FunctionContext, expr: &Expression) -> AmimeResult<()> {
        match expr {
            Expression::Integer(lit) => {
                ctx.emit(format!("i32.const {}", lit.value));
                Ok(())
            }
            Expression::Float(lit) => {
                ctx.emit(format!("f64.const {:?}", lit.value));
                Ok(())
            }
            Expression::Boolean(lit) => {
                ctx.emit(format!("i32.const {}", i32::from(lit.value)));
                Ok(())
            }
            Expression::String(lit) => self.compile_string_literal(ctx, lit),
            Expression::Identifier(ident) => self.compile_identifier(ctx, ident),
            Expression::Binary(binary) => self.compile_binary_expr(ctx, binary),
            Expression::Unary(unary) => self.compile_unary_expr(ctx, unary),
            Expression::Call(call) => self.compile_call_expr(ctx, call),
            Expression::Set(set) => self.compile_set_literal(ctx, set),
            Expression::Tuple(tuple) => self.compile_tuple_literal(ctx, tuple),
            Expression::Cast(cast) => self.compile_cast_expr(ctx, cast),
        }
    }

    /// 期待される型の値として式をコンパイル（intはfloatに昇格）
    pub(super) fn compile_expression_as(
        &mut self,
        ctx: &mut FunctionContext,
        expr: &Expression,
        target: TypeTag,
    ) -> AmimeResult<()> {
        self.compile_expression(ctx, expr)?;
        let ty = self.type_of(expr)?;
        self.promote(ctx, ty, target);
        Ok(())
    }

    /// スタック上のintをfloatに変換
    pub(super) fn promote(&self, ctx: &mut FunctionContext, from: TypeTag, to: TypeTag) {
        if from == TypeTag::Int && to == TypeTag::Float {
            ctx.emit("f64.convert_i32_s");
        }
    }

    /// スタック上の2値の等値比較（`!=`なら否定）
    pub(super) fn emit_equality(&mut self, ctx: &mut FunctionContext, operand: TypeTag, op: BinaryOp) -> AmimeResult<()> {
        let negate = op == BinaryOp::Ne;
        let runtime = match operand {
            TypeTag::Int | TypeTag::Bool => {
                ctx.emit(if negate { "i32.ne" } else { "i32.eq" });
                return Ok(());
            }
            TypeTag::Float => {
                ctx.emit(if negate { "f64.ne" } else { "f64.eq" });
                return Ok(());
            }
            TypeTag::String => RuntimeFn::StrEq,
            TypeTag::Set => RuntimeFn::SetEq,
            TypeTag::Tuple => RuntimeFn::TupleEq,
            TypeTag::Aggregate(_) => RuntimeFn::AggregateEq,
            TypeTag::Void | TypeTag::Unknown => {
                return Err(CodegenError::Internal {
                    message: format!("cannot compare values of type {}", operand),
                }
                .into())
            }
        };
        let call = self.runtime.call(runtime);
        ctx.emit(call);
        if negate {
            ctx.emit("i32.eqz");
        }
        Ok(())
    }
}
