//! Lexer for the textual constraint DSL
//!
//! Tokenizes expressions like `"batch: ..., a: 3, -1"` or `"f32"` using
//! logos. Keywords cover the element-kind spellings (including the `int`,
//! `float` and `bool` class sentinels) and the layout tags.

use logos::Logos;
use shapeward_ast::kind::{Kind, Layout};

/// Token type
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    // ============ Punctuation ============
    #[token("...")]
    Ellipsis,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,

    // ============ Kind keywords ============
    #[token("int")]
    KwInt,
    #[token("float")]
    KwFloat,
    #[token("bool")]
    KwBool,
    #[token("f64")]
    KwF64,
    #[token("f32")]
    KwF32,
    #[token("i64")]
    KwI64,
    #[token("i32")]
    KwI32,
    #[token("i16")]
    KwI16,
    #[token("i8")]
    KwI8,
    #[token("u8")]
    KwU8,

    // ============ Layout keywords ============
    #[token("strided")]
    KwStrided,
    #[token("sparse")]
    KwSparse,

    // ============ Literals ============
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_owned())]
    Ident(String),
}

impl Token {
    /// Element kind this keyword denotes, if any
    pub fn as_kind(&self) -> Option<Kind> {
        match self {
            Token::KwInt => Some(Kind::DEFAULT_INT),
            Token::KwFloat => Some(Kind::DEFAULT_FLOAT),
            Token::KwBool => Some(Kind::Bool),
            Token::KwF64 => Some(Kind::F64),
            Token::KwF32 => Some(Kind::F32),
            Token::KwI64 => Some(Kind::I64),
            Token::KwI32 => Some(Kind::I32),
            Token::KwI16 => Some(Kind::I16),
            Token::KwI8 => Some(Kind::I8),
            Token::KwU8 => Some(Kind::U8),
            _ => None,
        }
    }

    /// Storage layout this keyword denotes, if any
    pub fn as_layout(&self) -> Option<Layout> {
        match self {
            Token::KwStrided => Some(Layout::Strided),
            Token::KwSparse => Some(Layout::Sparse),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<Token> {
        Token::lexer(src).collect::<Result<Vec<_>, _>>().unwrap()
    }

    #[test]
    fn test_dim_list() {
        let tokens = lex("batch: ..., a: 3, -1");
        assert_eq!(
            tokens,
            vec![
                Token::Ident("batch".into()),
                Token::Colon,
                Token::Ellipsis,
                Token::Comma,
                Token::Ident("a".into()),
                Token::Colon,
                Token::Int(3),
                Token::Comma,
                Token::Int(-1),
            ]
        );
    }

    #[test]
    fn test_kind_keywords() {
        assert_eq!(lex("f32"), vec![Token::KwF32]);
        assert_eq!(lex("int"), vec![Token::KwInt]);
        assert_eq!(Token::KwFloat.as_kind(), Some(Kind::F32));
        assert_eq!(Token::KwStrided.as_layout(), Some(Layout::Strided));
    }

    #[test]
    fn test_keyword_prefix_is_ident() {
        // `f32s` must lex as an identifier, not keyword + ident
        assert_eq!(lex("f32s"), vec![Token::Ident("f32s".into())]);
    }

    #[test]
    fn test_unrecognized_input() {
        let result: Result<Vec<_>, _> = Token::lexer("a @ b").collect();
        assert!(result.is_err());
    }
}
