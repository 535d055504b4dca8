//! upconst-compiler
//!
//! This crate implements:
//!  1) An identifier sanitizer and documentation formatter,
//!  2) A parser for ERC725Y `valueType` / `valueContent` descriptors,
//!  3) A validating builder for the declaration tree (`build_document`),
//!  4) A generic emitter driven by the `Dialect` trait, with Swift, Kotlin
//!     and TypeScript dialects,
//!  5) Error types (`ConstGenError`).

pub mod error;
pub mod utils;
pub mod docs;
pub mod descriptor;
pub mod tree;
pub mod traits;
pub mod emitter;
pub mod gen_swift;
pub mod gen_kotlin;
pub mod gen_typescript;
pub mod compiler;

pub use compiler::{compile_document, compile_schema, compile_schema_to, generate, Target};
pub use descriptor::{parse_content, parse_type};
pub use emitter::Emitter;
pub use error::ConstGenError;
pub use gen_kotlin::Kotlin;
pub use gen_swift::Swift;
pub use gen_typescript::TypeScript;
pub use traits::Dialect;
