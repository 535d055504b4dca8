use serde::Serialize;

/// A whole constants schema: optional header documentation plus root declarations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub documentation: Option<Documentation>,
    pub content:       Vec<Declaration>,
}

/// Free-form documentation attached to a document, declaration or enum case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Documentation {
    /// A single string, split on `\n` when rendered.
    Text(String),
    /// Pre-split lines.
    Lines(Vec<String>),
}

impl Documentation {
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Documentation::Text(text)   => text.split('\n').collect(),
            Documentation::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}

/// One node of the declaration tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    /// Name as written in the schema. Dialects derive their identifiers from it.
    pub name:          String,
    pub documentation: Option<Documentation>,
    pub kind:          DeclarationKind,
}

impl Declaration {
    pub fn members(&self) -> Option<&[Declaration]> {
        match &self.kind {
            DeclarationKind::Container(container) => Some(&container.members),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, DeclarationKind::Container(_))
    }

    /// True for the synthetic node inserted by root promotion.
    pub fn is_grouping(&self) -> bool {
        matches!(&self.kind, DeclarationKind::Container(c) if c.grouping)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DeclarationKind {
    Const(Literal),
    Enum(EnumDecl),
    Container(Container),
    SchemaRecord(SchemaRecord),
}

impl DeclarationKind {
    pub fn label(&self) -> &'static str {
        match self {
            DeclarationKind::Const(_)        => "const",
            DeclarationKind::Enum(_)         => "enum",
            DeclarationKind::Container(_)    => "json",
            DeclarationKind::SchemaRecord(_) => "erc725y_jsonschema",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    pub members:  Vec<Declaration>,
    /// Set only on nodes created by root promotion, never by the schema itself.
    pub grouping: bool,
}

/// A constant or enum case value. Rendered verbatim apart from dialect quoting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Literal {
    Text(String),
    Number(String),
}

impl Literal {
    pub fn as_str(&self) -> &str {
        match self {
            Literal::Text(text)     => text,
            Literal::Number(number) => number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDecl {
    pub raw_value_type: RawValueType,
    pub case_iterable:  bool,
    pub cases:          Vec<EnumCase>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumCase {
    pub key:           String,
    pub value:         Literal,
    pub documentation: Option<Documentation>,
}

/// Backing type of an enumeration. Integer kinds may carry a bit width (`uint8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RawValueType {
    String,
    Int(Option<u16>),
    UInt(Option<u16>),
    Double,
    Float,
}

/// An LSP2 ERC725Y JSON schema entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaRecord {
    pub key:           String,
    pub key_type:      String,
    pub value_type:    String,
    pub value_content: String,
    pub element:       Option<ElementDescriptors>,
}

/// `elementValueType` and `elementValueContent`, which only ever appear together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementDescriptors {
    pub value_type:    String,
    pub value_content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels_match_schema_tags() {
        let container = DeclarationKind::Container(Container { members: vec![], grouping: false });
        assert_eq!(container.label(), "json");
        assert_eq!(DeclarationKind::Const(Literal::Number("1".into())).label(), "const");

        let record = DeclarationKind::SchemaRecord(SchemaRecord {
            key:           "0x01".into(),
            key_type:      "Singleton".into(),
            value_type:    "bytes".into(),
            value_content: "JSONURL".into(),
            element:       None,
        });
        assert_eq!(record.label(), "erc725y_jsonschema");
    }
}
