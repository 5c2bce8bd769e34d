//! 宣言（関数シグネチャ、関数本体）の解析

use crate::ast::*;
use crate::analyzer::scope::ScopeKind;
use crate::analyzer::symbol::{FunctionSignature, Symbol, SymbolKind, Termination};
use crate::analyzer::types::TypeTag;
use crate::error::{AmimeResult, AnalyzerError};

use super::{BlockFlow, FunctionContext, SemanticAnalyzer};

impl SemanticAnalyzer {
    /// 関数シグネチャを収集
    pub(super) fn collect_function_signature(&mut self, func: &FunctionDecl) -> AmimeResult<()> {
        let signature = FunctionSignature {
            name: func.name.clone(),
            params: func
                .params
                .iter()
                .map(|param| (param.name.clone(), TypeTag::from(param.ty)))
                .collect(),
            return_type: TypeTag::from(func.return_type()),
            span: func.span,
            builtin: false,
        };

        if let Err(e) = self.functions.register(signature) {
            self.report(e);
            return Ok(());
        }

        let symbol = Symbol::new(
            func.name.clone(),
            SymbolKind::Function,
            TypeTag::from(func.return_type()),
            func.span,
        );
        match self.scopes.define(symbol) {
            Ok(id) => self.record_declaration(func.id, id, func.span)?,
            Err(e) => self.report(e),
        }
        Ok(())
    }

    /// 関数本体を解析
    pub(super) fn analyze_function(&mut self, func: &FunctionDecl) -> AmimeResult<()> {
        log::trace!("analyzing function '{}'", func.name);
        let return_type = TypeTag::from(func.return_type());
        self.current_function = FunctionContext {
            name: func.name.clone(),
            return_type,
            is_main: false,
        };

        self.scopes.enter_scope(ScopeKind::Function);

        for param in &func.params {
            if param.ty == Type::Void {
                self.report(AnalyzerError::TypeMismatch {
                    message: format!("parameter '{}' cannot have type void", param.name),
                    span: param.span,
                });
            }
            let symbol = Symbol::new(
                param.name.clone(),
                SymbolKind::Parameter,
                TypeTag::from(param.ty),
                param.span,
            );
            match self.scopes.define(symbol) {
                Ok(id) => self.record_declaration(param.id, id, param.span)?,
                Err(e) => self.report(e),
            }
        }

        let mut flow = BlockFlow::default();
        for stmt in &func.body.statements {
            self.analyze_statement_in_flow(&mut flow, stmt)?;
        }

        self.scopes.exit_scope();

        let returns = flow.termination == Termination::Return;
        if return_type != TypeTag::Void && !returns {
            self.report(AnalyzerError::ReturnTypeMismatch {
                message: format!(
                    "function '{}' must return a value of type {} on every path",
                    func.name, return_type
                ),
                span: func.span,
            });
        }
        self.always_returns.insert(func.id, returns);

        Ok(())
    }
}
