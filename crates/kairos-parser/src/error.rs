//! Parser error types

use nom::error::{VerboseError, VerboseErrorKind};
use thiserror::Error;

/// Parser error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Source text does not match the grammar. Line and column are 1-based.
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

impl ParseError {
    /// Build a syntax error for a byte offset into `source`
    pub fn syntax(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let (line, column) = line_column(source, offset);
        ParseError::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ParseError::Syntax { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            ParseError::Syntax { column, .. } => *column,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ParseError::Syntax { message, .. } => message,
        }
    }

    /// Convert a nom failure into a positioned syntax error.
    ///
    /// The innermost entry of a `VerboseError` marks where parsing stopped;
    /// the nearest context label describes what was expected there.
    pub(crate) fn from_nom(source: &str, err: nom::Err<VerboseError<&str>>) -> Self {
        let err = match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => e,
            nom::Err::Incomplete(_) => {
                return Self::syntax(source, source.len(), "unexpected end of input");
            }
        };

        let Some((rest, kind)) = err.errors.first() else {
            return Self::syntax(source, 0, "invalid input");
        };

        let offset = source.len().saturating_sub(rest.len());
        let expected = err.errors.iter().find_map(|(_, kind)| match kind {
            VerboseErrorKind::Context(ctx) => Some(ctx.to_string()),
            _ => None,
        });
        let expected = expected.unwrap_or_else(|| match kind {
            VerboseErrorKind::Char(c) => format!("expected '{}'", c),
            VerboseErrorKind::Context(ctx) => ctx.to_string(),
            VerboseErrorKind::Nom(kind) => format!("unexpected input ({:?})", kind),
        });

        Self::syntax(source, offset, format!("{} {}", expected, found(rest)))
    }
}

/// Short description of the text at the failure point
fn found(rest: &str) -> String {
    let token: String = rest
        .trim_start()
        .chars()
        .take_while(|c| !c.is_whitespace())
        .take(24)
        .collect();
    if token.is_empty() {
        "at end of input".to_string()
    } else {
        format!("near '{}'", token)
    }
}

/// 1-based line and column (in characters) of a byte offset
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
