use crate::{
    emitter::Emitter,
    error::ConstGenError,
    gen_kotlin::Kotlin,
    gen_swift::Swift,
    gen_typescript::TypeScript,
    traits::Dialect,
    tree::build_document,
};
use serde_json::Value;
use std::fmt;
use upconst_schema::Document;

/// The output languages the compiler knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Swift,
    Kotlin,
    TypeScript,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::Swift, Target::Kotlin, Target::TypeScript];

    pub fn file_name(self) -> &'static str {
        match self {
            Target::Swift      => Swift.file_name(),
            Target::Kotlin     => Kotlin.file_name(),
            Target::TypeScript => TypeScript.file_name(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Target::Swift      => Swift.name(),
            Target::Kotlin     => Kotlin.name(),
            Target::TypeScript => TypeScript.name(),
        };
        f.write_str(name)
    }
}

/// Parse and validate a JSON constants schema.
/// Returns `Err(ConstGenError)` if the JSON is malformed or any node is invalid.
pub fn compile_schema(text: &str) -> Result<Document, ConstGenError> {
    let value: Value = serde_json::from_str(text)?;
    build_document(&value)
}

/// Render `document` with any dialect.
pub fn generate<D: Dialect>(dialect: &D, document: &Document) -> Result<String, ConstGenError> {
    Emitter::new(dialect).emit_document(document)
}

/// Render `document` for one of the built-in targets.
pub fn compile_document(document: &Document, target: Target) -> Result<String, ConstGenError> {
    match target {
        Target::Swift      => generate(&Swift, document),
        Target::Kotlin     => generate(&Kotlin, document),
        Target::TypeScript => generate(&TypeScript, document),
    }
}

/// `compile_schema` followed by `compile_document`.
pub fn compile_schema_to(text: &str, target: Target) -> Result<String, ConstGenError> {
    let document = compile_schema(text)?;
    compile_document(&document, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_json_is_reported() {
        let err = compile_schema("{ \"content\": [").unwrap_err();
        assert!(matches!(err, ConstGenError::Json(_)), "expected Json error but got {:?}", err);
    }

    #[test]
    fn test_targets() {
        assert_eq!(Target::Kotlin.file_name(), "UpConstants.kt");
        assert_eq!(Target::TypeScript.to_string(), "TypeScript");
        assert_eq!(compile_schema_to(r#"{ "content": [] }"#, Target::Swift).unwrap(), "\n");
    }
}
