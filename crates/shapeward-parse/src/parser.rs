//! Parser for constraint expressions
//!
//! Converts a sequence of [`SpecItem`]s (or the textual DSL) into a
//! [`PartialSpec`], enforcing per-element legality and the group-placement
//! restrictions: at most one unnamed group and it must be leftmost, at most
//! one named group, and never a named group to the left of an unnamed one.

use thiserror::Error;

use shapeward_ast::dim::Dim;
use shapeward_ast::kind::{Kind, Layout};

use crate::item::SpecItem;
use crate::lexer::Token;

/// Parse error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Invalid dimension size {0}: only -1 may be negative")]
    NegativeSize(i64),

    #[error("`{0}` is not valid inside a dimension list")]
    NonShapeToken(String),

    #[error("Unexpected token: {found:?}, expected {expected}")]
    Unexpected { found: Option<Token>, expected: String },

    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Unrecognized input: {0}")]
    Lex(String),

    #[error("Dimensions to the left of a `...` group are not supported")]
    GroupNotLeading,

    #[error("More than one unnamed `...` group is not supported")]
    DuplicateUnnamedGroup,

    #[error("More than one named `...` group is not supported")]
    DuplicateNamedGroup,

    #[error("A named `...` group to the left of an unnamed one is not supported")]
    NamedGroupBeforeUnnamed,
}

impl ParseError {
    /// Well-formed grammar the matching engine cannot express, as opposed
    /// to malformed input
    pub fn is_not_supported(&self) -> bool {
        matches!(
            self,
            ParseError::GroupNotLeading
                | ParseError::DuplicateUnnamedGroup
                | ParseError::DuplicateNamedGroup
                | ParseError::NamedGroupBeforeUnnamed
        )
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// One parsed constraint fragment, before merging into a full spec
///
/// Exactly one field is set per parse: a dimension sequence sets `dims`, a
/// lone kind or layout token sets the corresponding field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartialSpec {
    pub dims: Option<Vec<Dim>>,
    pub kind: Option<Kind>,
    pub layout: Option<Layout>,
}

/// Parse a sequence of constraint items
pub fn parse_items(items: &[SpecItem]) -> ParseResult<PartialSpec> {
    if let [item] = items {
        match item {
            SpecItem::Kind(kind) => {
                return Ok(PartialSpec { kind: Some(*kind), ..Default::default() })
            }
            SpecItem::Layout(layout) => {
                return Ok(PartialSpec { layout: Some(*layout), ..Default::default() })
            }
            _ => {}
        }
    }

    let mut dims = Vec::with_capacity(items.len());
    for item in items {
        dims.push(convert_item(item)?);
    }
    validate_groups(&dims)?;
    Ok(PartialSpec { dims: Some(dims), ..Default::default() })
}

/// Parse the textual DSL form, e.g. `"batch: ..., a: 3, -1"` or `"f32"`
pub fn parse_dsl(src: &str) -> ParseResult<PartialSpec> {
    let tokens = lex(src)?;
    let mut parser = DslParser { tokens: tokens.into_iter().peekable() };

    let mut items = Vec::new();
    if parser.peek().is_some() {
        items.push(parser.parse_item()?);
        while let Some(tok) = parser.next() {
            match tok {
                Token::Comma => items.push(parser.parse_item()?),
                other => {
                    return Err(ParseError::Unexpected {
                        found: Some(other),
                        expected: "`,` or end of input".into(),
                    })
                }
            }
        }
    }
    parse_items(&items)
}

// ============ Item conversion ============

fn convert_item(item: &SpecItem) -> ParseResult<Dim> {
    match item {
        SpecItem::Size(n) => sized_dim(None, *n),
        SpecItem::Name(name) => Ok(Dim::any().with_name(name.as_str())),
        SpecItem::NamedSize(name, n) => sized_dim(Some(name.as_str()), *n),
        SpecItem::Ellipsis => Ok(Dim::group()),
        SpecItem::NamedEllipsis(name) => Ok(Dim::group().with_name(name.as_str())),
        SpecItem::Kind(kind) => Err(ParseError::NonShapeToken(kind.to_string())),
        SpecItem::Layout(layout) => Err(ParseError::NonShapeToken(layout.to_string())),
    }
}

fn sized_dim(name: Option<&str>, n: i64) -> ParseResult<Dim> {
    let dim = match n {
        -1 => Dim::any(),
        n if n >= 0 => Dim::exact(n as u64),
        n => return Err(ParseError::NegativeSize(n)),
    };
    Ok(match name {
        Some(name) => dim.with_name(name),
        None => dim,
    })
}

/// Group placement rules, validated left-to-right
fn validate_groups(dims: &[Dim]) -> ParseResult<()> {
    let mut seen_unnamed_group = false;
    let mut seen_named_group = false;
    let mut seen_fixed = false;

    for dim in dims {
        if dim.is_group() {
            if seen_fixed {
                return Err(ParseError::GroupNotLeading);
            }
            if dim.is_named() {
                if seen_named_group {
                    return Err(ParseError::DuplicateNamedGroup);
                }
                seen_named_group = true;
            } else {
                if seen_unnamed_group {
                    return Err(ParseError::DuplicateUnnamedGroup);
                }
                if seen_named_group {
                    return Err(ParseError::NamedGroupBeforeUnnamed);
                }
                seen_unnamed_group = true;
            }
        } else {
            seen_fixed = true;
        }
    }
    Ok(())
}

// ============ DSL parsing ============

fn lex(src: &str) -> ParseResult<Vec<Token>> {
    use logos::Logos;

    let mut lexer = Token::lexer(src);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(tok) => tokens.push(tok),
            Err(_) => return Err(ParseError::Lex(lexer.slice().to_owned())),
        }
    }
    Ok(tokens)
}

struct DslParser {
    tokens: std::iter::Peekable<std::vec::IntoIter<Token>>,
}

impl DslParser {
    fn peek(&mut self) -> Option<&Token> {
        self.tokens.peek()
    }

    fn next(&mut self) -> Option<Token> {
        self.tokens.next()
    }

    fn parse_item(&mut self) -> ParseResult<SpecItem> {
        match self.next() {
            Some(Token::Ellipsis) => Ok(SpecItem::Ellipsis),
            Some(Token::Int(n)) => Ok(SpecItem::Size(n)),
            Some(Token::Ident(name)) => {
                if matches!(self.peek(), Some(Token::Colon)) {
                    self.next();
                    match self.next() {
                        Some(Token::Int(n)) => Ok(SpecItem::NamedSize(name, n)),
                        Some(Token::Ellipsis) => Ok(SpecItem::NamedEllipsis(name)),
                        Some(other) => Err(ParseError::Unexpected {
                            found: Some(other),
                            expected: "a size or `...` after `:`".into(),
                        }),
                        None => Err(ParseError::UnexpectedEof),
                    }
                } else {
                    Ok(SpecItem::Name(name))
                }
            }
            Some(tok) => {
                if let Some(kind) = tok.as_kind() {
                    return Ok(SpecItem::Kind(kind));
                }
                if let Some(layout) = tok.as_layout() {
                    return Ok(SpecItem::Layout(layout));
                }
                Err(ParseError::Unexpected {
                    found: Some(tok),
                    expected: "a dimension, kind, or layout".into(),
                })
            }
            None => Err(ParseError::UnexpectedEof),
        }
    }
}
