//! トークン定義

use logos::Logos;
use std::fmt;

use crate::ast::Type;

/// Token types for the Amime language
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    // Keywords
    #[token("fn")]
    Fn,
    #[token("let")]
    Let,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("until")]
    Until,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("step")]
    Step,
    #[token("switch")]
    Switch,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("break")]
    Break,
    #[token("print")]
    Print,
    #[token("as")]
    As,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // 単語演算子
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,
    #[token("union")]
    Union,
    #[token("intersect")]
    Intersect,
    #[token("diff")]
    Diff,
    #[token("symdiff")]
    SymDiff,

    // 型名
    #[token("int", |_| Type::Int)]
    #[token("float", |_| Type::Float)]
    #[token("bool", |_| Type::Bool)]
    #[token("string", |_| Type::String)]
    #[token("set", |_| Type::Set)]
    #[token("tuple", |_| Type::Tuple)]
    #[token("node", |_| Type::Node)]
    #[token("arc", |_| Type::Arc)]
    #[token("graph", |_| Type::Graph)]
    #[token("void", |_| Type::Void)]
    TypeName(Type),

    // Identifiers (must come after keywords to avoid conflicts)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_owned(), priority = 1)]
    Identifier(String),

    // Literals
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Integer(i64),

    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    /// エスケープ未処理の文字列本体（引用符は除く）
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_owned()
    })]
    String(String),

    /// 閉じ引用符のない文字列
    #[regex(r#""([^"\\\n]|\\.)*"#)]
    UnterminatedString,

    // Operators
    #[token("+")]
    Plus,
    #[token("++")]
    PlusPlus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("=")]
    Assign,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,
    #[token("->")]
    Arrow,
    #[token("..")]
    DotDot,

    // Delimiters
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Fn => write!(f, "fn"),
            Token::Let => write!(f, "let"),
            Token::Return => write!(f, "return"),
            Token::If => write!(f, "if"),
            Token::Else => write!(f, "else"),
            Token::While => write!(f, "while"),
            Token::Until => write!(f, "until"),
            Token::For => write!(f, "for"),
            Token::In => write!(f, "in"),
            Token::Step => write!(f, "step"),
            Token::Switch => write!(f, "switch"),
            Token::Case => write!(f, "case"),
            Token::Default => write!(f, "default"),
            Token::Break => write!(f, "break"),
            Token::Print => write!(f, "print"),
            Token::As => write!(f, "as"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::Not => write!(f, "not"),
            Token::Union => write!(f, "union"),
            Token::Intersect => write!(f, "intersect"),
            Token::Diff => write!(f, "diff"),
            Token::SymDiff => write!(f, "symdiff"),
            Token::TypeName(ty) => write!(f, "{}", ty),
            Token::Identifier(s) => write!(f, "identifier '{}'", s),
            Token::Integer(value) => write!(f, "integer {}", value),
            Token::Float(value) => write!(f, "float {}", value),
            Token::String(s) => write!(f, "string \"{}\"", s),
            Token::UnterminatedString => write!(f, "unterminated string"),
            Token::Plus => write!(f, "'+'"),
            Token::PlusPlus => write!(f, "'++'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::Percent => write!(f, "'%'"),
            Token::EqEq => write!(f, "'=='"),
            Token::NotEq => write!(f, "'!='"),
            Token::Lt => write!(f, "'<'"),
            Token::LtEq => write!(f, "'<='"),
            Token::Gt => write!(f, "'>'"),
            Token::GtEq => write!(f, "'>='"),
            Token::Assign => write!(f, "'='"),
            Token::AndAnd => write!(f, "'&&'"),
            Token::OrOr => write!(f, "'||'"),
            Token::Bang => write!(f, "'!'"),
            Token::Arrow => write!(f, "'->'"),
            Token::DotDot => write!(f, "'..'"),
            Token::Comma => write!(f, "','"),
            Token::Colon => write!(f, "':'"),
            Token::Semicolon => write!(f, "';'"),
            Token::LeftParen => write!(f, "'('"),
            Token::RightParen => write!(f, "')'"),
            Token::LeftBrace => write!(f, "'{{'"),
            Token::RightBrace => write!(f, "'}}'"),
        }
    }
}
