//! upconst
//!
//! Entry point for generating ERC725Y constants from a schema.
//!
//! - Re-exports the declaration model and the compiler pipeline
//! - `generate_all` renders every built-in target from one validated tree
//! - `tree_to_json` dumps the validated tree for inspection

pub use upconst_compiler::error::ConstGenError;
pub use upconst_compiler::{compile_document, compile_schema, compile_schema_to, generate, Dialect, Target};
pub use upconst_schema::{ContentNode, Declaration, DeclarationKind, Document, TypeNode};

use serde::Serialize;
use tracing::warn;

/// One rendered file, or the error that stopped its dialect.
#[derive(Debug)]
pub struct Generated {
    pub target: Target,
    pub output: Result<String, ConstGenError>,
}

impl Generated {
    pub fn file_name(&self) -> &'static str {
        self.target.file_name()
    }
}

/// Validate `text` once and render it for every target.
///
/// A failing dialect does not stop the others; only schema errors are
/// returned directly.
pub fn generate_all(text: &str) -> Result<Vec<Generated>, ConstGenError> {
    let document = compile_schema(text)?;
    Ok(Target::ALL
        .iter()
        .map(|&target| {
            let output = compile_document(&document, target);
            if let Err(err) = &output {
                warn!(%target, error = %err, "generation failed");
            }
            Generated { target, output }
        })
        .collect())
}

/// Validate `text` and pretty-print the resulting declaration tree as JSON.
pub fn tree_to_json(text: &str) -> Result<String, ConstGenError> {
    let document = compile_schema(text)?;
    to_pretty_json(&document)
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, ConstGenError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub mod error {
    pub use upconst_compiler::error::ConstGenError;
}

pub mod schema {
    pub use upconst_schema::*;
}

pub mod descriptor {
    pub use upconst_compiler::descriptor::{parse_content, parse_type};
}
