//! 文の解析

use crate::ast::*;
use crate::analyzer::scope::ScopeKind;
use crate::analyzer::symbol::{Symbol, SymbolKind, Termination};
use crate::analyzer::types::TypeTag;
use crate::error::{AmimeError, AmimeResult, AnalyzerError};

use super::{BlockFlow, SemanticAnalyzer};

impl SemanticAnalyzer {
    /// 新しいスコープでブロックを解析
    pub(super) fn analyze_block(&mut self, block: &Block, kind: ScopeKind) -> AmimeResult<Termination> {
        self.scopes.enter_scope(kind);
        let mut flow = BlockFlow::default();
        for stmt in &block.statements {
            self.analyze_statement_in_flow(&mut flow, stmt)?;
        }
        self.scopes.exit_scope();
        Ok(flow.termination)
    }

    /// 文を解析
    pub(super) fn analyze_statement(&mut self, stmt: &Statement) -> AmimeResult<Termination> {
        match stmt {
            Statement::Let(let_stmt) => self.analyze_let_statement(let_stmt),
            Statement::Assignment(assign) => self.analyze_assignment(assign),
            Statement::Return(ret) => self.analyze_return_statement(ret),
            Statement::If(if_stmt) => self.analyze_if_statement(if_stmt),
            Statement::While(while_stmt) => self.analyze_while_statement(while_stmt),
            Statement::For(for_stmt) => self.analyze_for_statement(for_stmt),
            Statement::Switch(switch) => self.analyze_switch_statement(switch),
            Statement::Break(brk) => {
                if !self.scopes.in_breakable() {
                    self.report(AnalyzerError::BreakOutsideLoop { span: brk.span });
                }
                Ok(Termination::Break)
            }
            Statement::Print(print) => {
                for arg in &print.args {
                    let ty = self.analyze_expression(arg)?;
                    if ty == TypeTag::Void {
                        self.report(AnalyzerError::TypeMismatch {
                            message: "cannot print a void value".to_string(),
                            span: arg.span(),
                        });
                    }
                }
                Ok(Termination::None)
            }
            Statement::Expression(expr) => {
                self.analyze_expression(expr)?;
                Ok(Termination::None)
            }
            Statement::Block(block) => self.analyze_block(block, ScopeKind::Block),
        }
    }

    /// let文の解析
    fn analyze_let_statement(&mut self, let_stmt: &LetStatement) -> AmimeResult<Termination> {
        // 初期化式は宣言より前に解析する（`let x = x + 1`は外側のxを参照）
        let init_type = match &let_stmt.init {
            Some(init) => Some(self.analyze_expression(init)?),
            None => None,
        };

        let ty = match (let_stmt.ty, init_type) {
            (Some(annotated), init_type) => {
                let declared = TypeTag::from(annotated);
                if declared == TypeTag::Void {
                    self.report(AnalyzerError::TypeMismatch {
                        message: format!("variable '{}' cannot have type void", let_stmt.name),
                        span: let_stmt.span,
                    });
                } else if let Some(init_type) = init_type {
                    if !init_type.is_unknown() && !self.type_checker.is_assignable(declared, init_type) {
                        self.report(AnalyzerError::TypeMismatch {
                            message: format!(
                                "cannot initialize '{}' of type {} with a value of type {}",
                                let_stmt.name, declared, init_type
                            ),
                            span: let_stmt.span,
                        });
                    }
                }
                declared
            }
            (None, Some(init_type)) => self.value_type_for(&let_stmt.name, init_type, let_stmt.span),
            (None, None) => {
                return Err(AmimeError::malformed(
                    format!("'let {}' has neither a type nor an initializer", let_stmt.name),
                    let_stmt.span,
                ))
            }
        };

        let symbol = Symbol::new(let_stmt.name.clone(), SymbolKind::Variable, ty, let_stmt.span);
        match self.scopes.define(symbol) {
            Ok(id) => self.record_declaration(let_stmt.id, id, let_stmt.span)?,
            Err(e) => self.report(e),
        }

        Ok(Termination::None)
    }

    /// 代入文の解析
    ///
    /// 見えない名前への代入は現在のスコープでの暗黙の宣言になる。
    fn analyze_assignment(&mut self, assign: &AssignStatement) -> AmimeResult<Termination> {
        let value_type = self.analyze_expression(&assign.value)?;

        match self.scopes.lookup(&assign.name) {
            Some(id) => {
                let symbol = self.scopes.symbol(id);
                if symbol.kind == SymbolKind::Function {
                    self.report(AnalyzerError::TypeMismatch {
                        message: format!("cannot assign to function '{}'", assign.name),
                        span: assign.span,
                    });
                    return Ok(Termination::None);
                }

                let target_type = symbol.ty;
                if !value_type.is_unknown()
                    && !target_type.is_unknown()
                    && !self.type_checker.is_assignable(target_type, value_type)
                {
                    self.report(AnalyzerError::TypeMismatch {
                        message: format!(
                            "cannot assign a value of type {} to '{}' of type {}",
                            value_type, assign.name, target_type
                        ),
                        span: assign.span,
                    });
                }
                self.record_reference(assign.id, id, assign.span)?;
                self.note_variable_use(id);
            }
            None => {
                let ty = self.value_type_for(&assign.name, value_type, assign.span);
                let symbol = Symbol::new(assign.name.clone(), SymbolKind::Variable, ty, assign.span);
                match self.scopes.define(symbol) {
                    Ok(id) => self.record_declaration(assign.id, id, assign.span)?,
                    Err(e) => self.report(e),
                }
            }
        }

        Ok(Termination::None)
    }

    /// 初期化式から推論した変数の型（voidは不可）
    fn value_type_for(&mut self, name: &str, value_type: TypeTag, span: Span) -> TypeTag {
        if value_type == TypeTag::Void {
            self.report(AnalyzerError::TypeMismatch {
                message: format!("cannot bind '{}' to a void value", name),
                span,
            });
            return TypeTag::Unknown;
        }
        value_type
    }

    /// return文の解析
    fn analyze_return_statement(&mut self, ret: &ReturnStatement) -> AmimeResult<Termination> {
        let expected = self.current_function.return_type;
        let name = self.current_function.name.clone();

        match &ret.value {
            Some(expr) => {
                let found = self.analyze_expression(expr)?;
                if expected == TypeTag::Void {
                    self.report(AnalyzerError::ReturnTypeMismatch {
                        message: format!("void function '{}' cannot return a value", name),
                        span: ret.span,
                    });
                } else if !found.is_unknown() && found != expected {
                    self.report(AnalyzerError::ReturnTypeMismatch {
                        message: format!(
                            "function '{}' returns {}, found {}",
                            name, expected, found
                        ),
                        span: ret.span,
                    });
                }
            }
            None => {
                if expected != TypeTag::Void {
                    self.report(AnalyzerError::ReturnTypeMismatch {
                        message: format!("function '{}' must return a value of type {}", name, expected),
                        span: ret.span,
                    });
                }
            }
        }

        Ok(Termination::Return)
    }

    /// 条件式の解析（boolでなければ診断を出し、boolとみなして続行）
    fn analyze_condition(&mut self, condition: &Expression, construct: &str) -> AmimeResult<()> {
        let ty = self.analyze_expression(condition)?;
        if !ty.is_unknown() && ty != TypeTag::Bool {
            self.report(AnalyzerError::InvalidConditionType {
                construct: construct.to_string(),
                found: ty.to_string(),
                span: condition.span(),
            });
        }
        Ok(())
    }

    /// if文の解析
    ///
    /// 両方の分岐が終了する場合のみ、if文全体が終了する。
    fn analyze_if_statement(&mut self, if_stmt: &IfStatement) -> AmimeResult<Termination> {
        self.analyze_condition(&if_stmt.condition, "if")?;

        let then_flow = self.analyze_block(&if_stmt.then_branch, ScopeKind::Block)?;
        let else_flow = match &if_stmt.else_branch {
            Some(ElseBranch::Block(block)) => self.analyze_block(block, ScopeKind::Block)?,
            Some(ElseBranch::If(nested)) => self.analyze_if_statement(nested)?,
            None => Termination::None,
        };

        Ok(then_flow.join(else_flow))
    }

    /// while/until文の解析
    fn analyze_while_statement(&mut self, while_stmt: &WhileStatement) -> AmimeResult<Termination> {
        let construct = match while_stmt.kind {
            LoopKind::While => "while",
            LoopKind::Until => "until",
        };
        self.analyze_condition(&while_stmt.condition, construct)?;
        self.analyze_block(&while_stmt.body, ScopeKind::Loop)?;

        // 本体が一度も実行されない可能性がある
        Ok(Termination::None)
    }

    /// for文の解析
    fn analyze_for_statement(&mut self, for_stmt: &ForStatement) -> AmimeResult<Termination> {
        let mut bounds = vec![("start", &for_stmt.start), ("end", &for_stmt.end)];
        if let Some(step) = &for_stmt.step {
            bounds.push(("step", step));
        }
        for (what, expr) in bounds {
            let ty = self.analyze_expression(expr)?;
            if !ty.is_unknown() && ty != TypeTag::Int {
                self.report(AnalyzerError::TypeMismatch {
                    message: format!("range {} of 'for' must be int, found {}", what, ty),
                    span: expr.span(),
                });
            }
        }

        self.scopes.enter_scope(ScopeKind::Loop);
        let symbol = Symbol::new(
            for_stmt.variable.clone(),
            SymbolKind::Variable,
            TypeTag::Int,
            for_stmt.span,
        );
        match self.scopes.define(symbol) {
            Ok(id) => self.record_declaration(for_stmt.id, id, for_stmt.span)?,
            Err(e) => self.report(e),
        }

        let mut flow = BlockFlow::default();
        for stmt in &for_stmt.body.statements {
            self.analyze_statement_in_flow(&mut flow, stmt)?;
        }
        self.scopes.exit_scope();

        Ok(Termination::None)
    }

    /// switch文の解析
    ///
    /// defaultがあり、すべての本体がreturnする場合のみreturn扱い。
    fn analyze_switch_statement(&mut self, switch: &SwitchStatement) -> AmimeResult<Termination> {
        let subject = self.analyze_expression(&switch.subject)?;

        let mut all_return = true;
        for case in &switch.cases {
            let value = self.analyze_expression(&case.value)?;
            if !subject.is_unknown()
                && !value.is_unknown()
                && !self.type_checker.equality_compatible(subject, value)
            {
                self.report(AnalyzerError::TypeMismatch {
                    message: format!(
                        "case value of type {} cannot match a switch on {}",
                        value, subject
                    ),
                    span: case.value.span(),
                });
            }
            let termination = self.analyze_block(&case.body, ScopeKind::Switch)?;
            all_return &= termination == Termination::Return;
        }

        match &switch.default {
            Some(default) => {
                let termination = self.analyze_block(default, ScopeKind::Switch)?;
                all_return &= termination == Termination::Return;
            }
            None => all_return = false,
        }

        Ok(if all_return {
            Termination::Return
        } else {
            Termination::None
        })
    }
}
