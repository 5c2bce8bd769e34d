//! 単項演算のコード生成

use crate::analyzer::TypeTag;
use crate::ast::*;
use crate::error::AmimeResult;

use crate::codegen::code_generator::{CodeGenerator, FunctionContext};

impl<'a, 'p> CodeGenerator<'a, 'p> {
    pub(super) fn compile_unary_expr(&mut self, ctx: &mut FunctionContext, unary: &UnaryExpr) -> AmimeResult<()> {
        self.compile_expression(ctx, &unary.expr)?;
        match (unary.op, self.type_of(&unary.expr)?) {
            (UnaryOp::Negate, TypeTag::Float) => ctx.emit("f64.neg"),
            (UnaryOp::Negate, _) => {
                ctx.emit("i32.const -1");
                ctx.emit("i32.mul");
            }
            (UnaryOp::Not, _) => ctx.emit("i32.eqz"),
        }
        Ok(())
    }
}
