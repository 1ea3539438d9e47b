//! Category Tree Error Handling
//!
//! One error type for the whole crate. Every variant carries a stable
//! diagnostic code and, where it helps, a hint; decode failures also carry
//! the offending payload so `miette` can point at the exact line.

use std::path::PathBuf;
use std::sync::Arc;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("I/O error on '{}'", path.display())]
    #[diagnostic(code(category_tree::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed category payload: {message}")]
    #[diagnostic(
        code(category_tree::json),
        help("expected a JSON array of categories or a response object with `success` and `categories` fields")
    )]
    Json {
        message: String,
        #[source_code]
        src: Arc<NamedSource<String>>,
        #[label("{message}")]
        span: SourceSpan,
    },

    #[error("category service reported a failure: {message}")]
    #[diagnostic(code(category_tree::api_failure))]
    ApiFailure { message: String },

    #[error("response reported success but carried no category")]
    #[diagnostic(code(category_tree::missing_category))]
    MissingCategory,

    #[error("unknown category '{id}'")]
    #[diagnostic(
        code(category_tree::unknown_category),
        help("run `category-tree tree <FILE>` to list the available ids")
    )]
    UnknownCategory { id: String },

    #[error("invalid category input: {message}")]
    #[diagnostic(code(category_tree::invalid_input))]
    InvalidInput { message: String },

    #[error("invalid configuration in '{}': {message}", path.display())]
    #[diagnostic(code(category_tree::config))]
    Config { path: PathBuf, message: String },
}

impl Error {
    /// Wraps an I/O failure with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Builds a decode error pointing at the line/column `serde_json` reported.
    pub fn json(name: &str, text: &str, err: &serde_json::Error) -> Self {
        let offset = line_col_to_offset(text, err.line(), err.column());
        let span_len = if offset < text.len() { 1 } else { 0 };
        Self::Json {
            message: err.to_string(),
            src: Arc::new(NamedSource::new(name, text.to_string())),
            span: (offset, span_len).into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Converts the 1-based line/column `serde_json` reports into a byte offset.
///
/// Line 0 means the error was not tied to a position (e.g. EOF on empty
/// input); such errors point at the end of the text.
fn line_col_to_offset(text: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return text.len();
    }
    let mut offset = 0;
    for (index, raw_line) in text.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let col = column.saturating_sub(1).min(raw_line.len());
            let mut target = offset + col;
            while target > 0 && !text.is_char_boundary(target) {
                target -= 1;
            }
            return target;
        }
        offset += raw_line.len();
    }
    text.len()
}
