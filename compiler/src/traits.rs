use crate::{docs::CommentStyle, error::ConstGenError};
use upconst_schema::{ContentNode, Declaration, EnumCase, EnumDecl, Literal, RawValueType, SchemaRecord, TypeNode};

/// Where a declaration sits while it is being emitted.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub parent: Option<&'a Declaration>,
    pub depth:  usize,
}

impl<'a> Scope<'a> {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn in_container(&self) -> bool {
        self.parent.map_or(false, Declaration::is_container)
    }
}

/// The opening line(s) of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Head {
    /// Complete declaration; no block follows.
    Terminal(String),
    /// Opens a block whose body the engine renders from members or cases.
    Open(String),
    /// Opens a block whose body lines the dialect has already rendered.
    OpenWith(String, Vec<String>),
}

/// `valueType`/`valueContent` (and element variants) in dialect literal syntax.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDescriptors {
    pub value_type:            String,
    pub value_content:         String,
    pub element_value_type:    Option<String>,
    pub element_value_content: Option<String>,
}

/// Everything that differs between output languages.
///
/// [`crate::emitter::Emitter`] owns the tree walk, indentation and
/// documentation; a dialect only renders heads, cases and descriptor literals.
pub trait Dialect {
    fn name(&self) -> &'static str;

    /// Conventional output file name, e.g. `UpConstants.swift`.
    fn file_name(&self) -> &'static str;

    fn comment_style(&self) -> CommentStyle {
        CommentStyle::DOC_BLOCK
    }

    fn header_style(&self) -> CommentStyle {
        CommentStyle::TRIPLE_SLASH
    }

    fn indent_unit(&self) -> &'static str {
        "\t"
    }

    /// Name of the synthetic node flat root containers are promoted into, if
    /// the language has such a construct.
    fn grouping(&self) -> Option<&'static str> {
        None
    }

    fn identifier(&self, declaration: &Declaration, scope: &Scope) -> Result<String, ConstGenError>;

    fn const_decl(&self, ident: &str, value: &Literal, scope: &Scope) -> String;

    fn enum_head(&self, ident: &str, declaration: &EnumDecl) -> String;

    fn enum_case(&self, case: &EnumCase, raw_value_type: RawValueType) -> String;

    fn case_separator(&self) -> &'static str;

    fn container_head(&self, ident: &str, scope: &Scope) -> String;

    fn grouping_head(&self, name: &str) -> String {
        name.to_string()
    }

    fn schema_record(
        &self,
        declaration: &Declaration,
        ident: &str,
        record: &SchemaRecord,
        rendered: &RenderedDescriptors,
        scope: &Scope,
    ) -> Result<Head, ConstGenError>;

    fn close(&self, _scope: &Scope) -> &'static str {
        "}"
    }

    fn value_type(&self, node: &TypeNode) -> Result<String, ConstGenError>;

    fn value_content(&self, node: &ContentNode) -> Result<String, ConstGenError>;

    fn unsupported(&self, construct: impl std::fmt::Display) -> ConstGenError
    where
        Self: Sized,
    {
        ConstGenError::UnsupportedTypeConstruct {
            construct: construct.to_string(),
            dialect:   self.name(),
        }
    }
}
