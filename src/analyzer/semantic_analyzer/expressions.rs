//! 式の解析

use crate::ast::*;
use crate::analyzer::symbol::SymbolKind;
use crate::analyzer::types::TypeTag;
use crate::error::{AmimeResult, AnalyzerError};

use super::SemanticAnalyzer;

impl SemanticAnalyzer {
    /// 式を解析して型を記録する
    ///
    /// すべての式ノードにちょうど一つの型が記録される。
    pub(super) fn analyze_expression(&mut self, expr: &Expression) -> AmimeResult<TypeTag> {
        let ty = match expr {
            Expression::Integer(_) => TypeTag::Int,
            Expression::Float(_) => TypeTag::Float,
            Expression::String(_) => TypeTag::String,
            Expression::Boolean(_) => TypeTag::Bool,
            Expression::Identifier(ident) => self.analyze_identifier(ident)?,
            Expression::Binary(binary) => self.analyze_binary_expression(binary)?,
            Expression::Unary(unary) => self.analyze_unary_expression(unary)?,
            Expression::Call(call) => self.analyze_call_expression(call)?,
            Expression::Set(set) => {
                for element in &set.elements {
                    let ty = self.analyze_expression(element)?;
                    if !ty.is_unknown() && ty != TypeTag::Int {
                        self.report(AnalyzerError::TypeMismatch {
                            message: format!("set elements must be int, found {}", ty),
                            span: element.span(),
                        });
                    }
                }
                TypeTag::Set
            }
            Expression::Tuple(tuple) => {
                for element in &tuple.elements {
                    if self.analyze_expression(element)? == TypeTag::Void {
                        self.report(AnalyzerError::TypeMismatch {
                            message: "a tuple element cannot be void".to_string(),
                            span: element.span(),
                        });
                    }
                }
                TypeTag::Tuple
            }
            Expression::Cast(cast) => self.analyze_cast_expression(cast)?,
        };

        self.annotations.record(expr.id(), ty, expr.span())?;
        Ok(ty)
    }

    /// 識別子の解析
    fn analyze_identifier(&mut self, ident: &Identifier) -> AmimeResult<TypeTag> {
        let Some(id) = self.scopes.lookup(&ident.name) else {
            self.report(AnalyzerError::UndeclaredVariable {
                name: ident.name.clone(),
                span: ident.span,
            });
            return Ok(TypeTag::Unknown);
        };

        let symbol = self.scopes.symbol(id);
        if symbol.kind == SymbolKind::Function {
            self.report(AnalyzerError::TypeMismatch {
                message: format!("function '{}' cannot be used as a value", ident.name),
                span: ident.span,
            });
            return Ok(TypeTag::Unknown);
        }

        let ty = symbol.ty;
        self.record_reference(ident.id, id, ident.span)?;
        self.note_variable_use(id);
        Ok(ty)
    }

    /// 二項演算の解析
    fn analyze_binary_expression(&mut self, binary: &BinaryExpr) -> AmimeResult<TypeTag> {
        let left = self.analyze_expression(&binary.left)?;
        let right = self.analyze_expression(&binary.right)?;

        if left.is_unknown() || right.is_unknown() {
            return Ok(TypeTag::Unknown);
        }

        Ok(match self.type_checker.binary_result(binary.op, left, right) {
            Some(ty) => ty,
            None => {
                self.report(AnalyzerError::TypeMismatch {
                    message: format!(
                        "operator '{}' cannot be applied to {} and {}",
                        binary.op, left, right
                    ),
                    span: binary.span,
                });
                TypeTag::Unknown
            }
        })
    }

    /// 単項演算の解析
    fn analyze_unary_expression(&mut self, unary: &UnaryExpr) -> AmimeResult<TypeTag> {
        let operand = self.analyze_expression(&unary.expr)?;
        if operand.is_unknown() {
            return Ok(TypeTag::Unknown);
        }

        Ok(match self.type_checker.unary_result(unary.op, operand) {
            Some(ty) => ty,
            None => {
                self.report(AnalyzerError::TypeMismatch {
                    message: format!("operator '{}' cannot be applied to {}", unary.op, operand),
                    span: unary.span,
                });
                TypeTag::Unknown
            }
        })
    }

    /// 関数呼び出しの解析
    fn analyze_call_expression(&mut self, call: &CallExpr) -> AmimeResult<TypeTag> {
        // 呼び出し先が不明でも引数は解析する
        let mut arg_types = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            arg_types.push(self.analyze_expression(arg)?);
        }

        let Some(signature) = self.functions.get(&call.callee).cloned() else {
            self.report(AnalyzerError::UndeclaredFunction {
                name: call.callee.clone(),
                span: call.span,
            });
            return Ok(TypeTag::Unknown);
        };

        if signature.arity() != arg_types.len() {
            self.report(AnalyzerError::ArityMismatch {
                name: call.callee.clone(),
                expected: signature.arity(),
                found: arg_types.len(),
                span: call.span,
            });
            return Ok(signature.return_type);
        }

        for (index, (param, found)) in signature.param_types().zip(arg_types).enumerate() {
            if !found.is_unknown() && !self.type_checker.is_assignable(param, found) {
                self.report(AnalyzerError::TypeMismatch {
                    message: format!(
                        "argument {} of '{}' expects {}, found {}",
                        index + 1,
                        call.callee,
                        param,
                        found
                    ),
                    span: call.args[index].span(),
                });
            }
        }

        Ok(signature.return_type)
    }

    /// 型変換の解析
    fn analyze_cast_expression(&mut self, cast: &CastExpr) -> AmimeResult<TypeTag> {
        let from = self.analyze_expression(&cast.expr)?;
        let to = TypeTag::from(cast.target);

        if from.is_unknown() {
            return Ok(to);
        }
        if !self.type_checker.cast_allowed(from, to) {
            self.report(AnalyzerError::InvalidCast {
                from: from.to_string(),
                to: to.to_string(),
                span: cast.span,
            });
            return Ok(TypeTag::Unknown);
        }
        Ok(to)
    }
}
