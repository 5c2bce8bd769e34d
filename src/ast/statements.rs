//! 文の定義

use serde::{Deserialize, Serialize};

use super::{Expression, NodeId, Span, Type};

/// 文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Let(LetStatement),
    Assignment(AssignStatement),
    Return(ReturnStatement),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    Switch(SwitchStatement),
    Break(BreakStatement),
    Print(PrintStatement),
    Expression(Expression),
    Block(Block),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Let(s) => s.span,
            Statement::Assignment(s) => s.span,
            Statement::Return(s) => s.span,
            Statement::If(s) => s.span,
            Statement::While(s) => s.span,
            Statement::For(s) => s.span,
            Statement::Switch(s) => s.span,
            Statement::Break(s) => s.span,
            Statement::Print(s) => s.span,
            Statement::Expression(e) => e.span(),
            Statement::Block(b) => b.span,
        }
    }
}

/// let文
///
/// 型注釈と初期化式の少なくとも一方が必要。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetStatement {
    pub id: NodeId,
    pub name: String,
    pub ty: Option<Type>,
    pub init: Option<Expression>,
    pub span: Span,
}

/// 代入文
///
/// 左辺の名前が見えない場合は暗黙の宣言になる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignStatement {
    pub id: NodeId,
    pub name: String,
    pub value: Expression,
    pub span: Span,
}

/// return文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub span: Span,
}

/// if文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Block,
    pub else_branch: Option<ElseBranch>,
    pub span: Span,
}

/// elseブランチ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElseBranch {
    Block(Block),
    If(Box<IfStatement>),
}

/// 条件ループの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopKind {
    /// 条件が真の間繰り返す
    While,
    /// 条件が真になるまで繰り返す
    Until,
}

/// while/until文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStatement {
    pub kind: LoopKind,
    pub condition: Expression,
    pub body: Block,
    pub span: Span,
}

/// 範囲for文 `for i in start..end step s { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStatement {
    /// ループ変数の宣言ID
    pub id: NodeId,
    pub variable: String,
    pub start: Expression,
    pub end: Expression,
    pub step: Option<Expression>,
    pub body: Block,
    pub span: Span,
}

/// switch文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchStatement {
    pub subject: Expression,
    pub cases: Vec<SwitchCase>,
    pub default: Option<Block>,
    pub span: Span,
}

/// switchのcase節
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    pub value: Expression,
    pub body: Block,
    pub span: Span,
}

/// break文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakStatement {
    pub span: Span,
}

/// print文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintStatement {
    pub args: Vec<Expression>,
    pub span: Span,
}

/// ブロック
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}
