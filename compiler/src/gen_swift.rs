use crate::{
    error::ConstGenError,
    traits::{Dialect, Head, RenderedDescriptors, Scope},
    utils::{is_identifier, quote, sanitize},
};
use upconst_schema::{ContentNode, Declaration, EnumCase, EnumDecl, Literal, RawValueType, SchemaRecord, TypeNode};

/// Renders `UpConstants.swift` against the `JSONSchema` support type.
#[derive(Debug, Default, Clone, Copy)]
pub struct Swift;

/// Swift type an enum is backed by.
fn raw_type(raw_value_type: RawValueType) -> &'static str {
    match raw_value_type {
        RawValueType::String  => "String",
        RawValueType::Int(_)  => "Int",
        RawValueType::UInt(_) => "UInt",
        RawValueType::Double  => "Double",
        RawValueType::Float   => "Float",
    }
}

/// Top-level declarations are plain `let`s; inside a class they must be `static`.
fn modifier(scope: &Scope) -> &'static str {
    if scope.is_root() {
        " "
    } else {
        " static "
    }
}

impl Dialect for Swift {
    fn name(&self) -> &'static str {
        "Swift"
    }

    fn file_name(&self) -> &'static str {
        "UpConstants.swift"
    }

    fn identifier(&self, declaration: &Declaration, _scope: &Scope) -> Result<String, ConstGenError> {
        let mut name = declaration.name.replace(':', "_");
        if let Some(stripped) = name.strip_suffix("[]") {
            name = format!("{}Array", stripped);
        }
        sanitize(&name)
    }

    fn const_decl(&self, ident: &str, value: &Literal, scope: &Scope) -> String {
        format!("public{}let {} = {}", modifier(scope), ident, value.as_str())
    }

    fn enum_head(&self, ident: &str, declaration: &EnumDecl) -> String {
        let conformance = if declaration.case_iterable { ", CaseIterable" } else { "" };
        format!("public enum {}: {}{}", ident, raw_type(declaration.raw_value_type), conformance)
    }

    fn enum_case(&self, case: &EnumCase, raw_value_type: RawValueType) -> String {
        match raw_value_type {
            RawValueType::String => format!("case {} = {}", case.key, quote(case.value.as_str())),
            _ => format!("case {} = {}", case.key, case.value.as_str()),
        }
    }

    fn case_separator(&self) -> &'static str {
        "\n"
    }

    fn container_head(&self, ident: &str, _scope: &Scope) -> String {
        format!("public class {}", ident)
    }

    fn schema_record(
        &self,
        declaration: &Declaration,
        ident: &str,
        record: &SchemaRecord,
        rendered: &RenderedDescriptors,
        scope: &Scope,
    ) -> Result<Head, ConstGenError> {
        if !is_identifier(&record.key_type) {
            return Err(self.unsupported(format!("keyType {}", quote(&record.key_type))));
        }

        let opening = format!("public{}let {} = JSONSchema(", modifier(scope), ident);
        let mut args = vec![
            ("name", quote(&declaration.name)),
            ("key", quote(&record.key)),
            ("keyType", format!(".{}", record.key_type)),
            ("valueType", rendered.value_type.clone()),
            ("valueContent", rendered.value_content.clone()),
        ];
        if let (Some(value_type), Some(value_content)) =
            (&rendered.element_value_type, &rendered.element_value_content)
        {
            args.push(("elementValueType", value_type.clone()));
            args.push(("elementValueContent", value_content.clone()));
        }

        // continuation lines line up under the first argument
        let separator = format!(",\n{}", " ".repeat(opening.chars().count()));
        let args = args
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join(&separator);

        Ok(Head::Terminal(format!("{}{})", opening, args)))
    }

    fn value_type(&self, node: &TypeNode) -> Result<String, ConstGenError> {
        Ok(match node {
            TypeNode::Primitive(name) => format!(".{}", name),
            TypeNode::Bytes => ".bytes()".to_string(),
            TypeNode::Sized { name, size } => {
                let name = name.to_lowercase();
                match name.as_str() {
                    "uint" | "int" | "bytes" => format!(".{}({})", name, size),
                    _ => return Err(self.unsupported(format!("{} `{}`", node.variant_name(), node))),
                }
            }
            TypeNode::Array(element) => format!(".array({})", self.value_type(element)?),
            TypeNode::FixedArray(element, size) => format!(".array({}, {})", self.value_type(element)?, size),
            TypeNode::CompactBytesArray(element) => format!(".compactBytesArray({})", self.value_type(element)?),
            TypeNode::Tuple(elements) => {
                let elements = elements
                    .iter()
                    .map(|element| self.value_type(element))
                    .collect::<Result<Vec<_>, _>>()?;
                format!(".tuple([{}])", elements.join(", "))
            }
        })
    }

    fn value_content(&self, node: &ContentNode) -> Result<String, ConstGenError> {
        Ok(match node {
            ContentNode::SpecificBytes(hex) => format!(".SpecificBytes({})", quote(hex)),
            ContentNode::BytesN(size) => format!(".BytesN({})", size),
            ContentNode::Tuple(elements) => {
                let elements = elements
                    .iter()
                    .map(|element| self.value_content(element))
                    .collect::<Result<Vec<_>, _>>()?;
                format!(".tuple([{}])", elements.join(", "))
            }
            ContentNode::Named(name) if is_identifier(name) => format!(".{}", name),
            ContentNode::Named(_) => {
                return Err(self.unsupported(format!("{} `{}`", node.variant_name(), node)))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{parse_content, parse_type};

    #[test]
    fn test_value_type_literals() {
        let cases = [
            ("bytes32", ".bytes(32)"),
            ("bytes", ".bytes()"),
            ("address", ".address"),
            ("uint256[]", ".array(.uint(256))"),
            ("(address,uint256)[3]", ".array(.tuple([.address, .uint(256)]), 3)"),
            ("bytes4[CompactBytesArray]", ".compactBytesArray(.bytes(4))"),
            ("(bytes4,(uint8,bool))", ".tuple([.bytes(4), .tuple([.uint(8), .bool])])"),
        ];
        for (descriptor, expected) in cases {
            let node = parse_type(descriptor).unwrap();
            assert_eq!(Swift.value_type(&node).unwrap(), expected, "{}", descriptor);
        }
    }

    #[test]
    fn test_value_content_literals() {
        let cases = [
            ("0x5ef83ad9", ".SpecificBytes(\"0x5ef83ad9\")"),
            ("Bytes4", ".BytesN(4)"),
            ("JSONURL", ".JSONURL"),
            ("(Bytes4,Address)", ".tuple([.BytesN(4), .Address])"),
        ];
        for (descriptor, expected) in cases {
            let node = parse_content(descriptor).unwrap();
            assert_eq!(Swift.value_content(&node).unwrap(), expected, "{}", descriptor);
        }
    }

    #[test]
    fn test_unknown_sized_leaf_is_unsupported() {
        let node = parse_type("address20").unwrap();
        let err = Swift.value_type(&node).unwrap_err();
        assert!(
            matches!(err, ConstGenError::UnsupportedTypeConstruct { ref construct, dialect: "Swift" } if construct.contains("Sized")),
            "expected UnsupportedTypeConstruct but got {:?}",
            err
        );
    }

    #[test]
    fn test_identifier_rewrites() {
        let declaration = Declaration {
            name:          "LSP5ReceivedAssets[]".into(),
            documentation: None,
            kind:          upconst_schema::DeclarationKind::Const(Literal::Number("1".into())),
        };
        let scope = Scope { parent: None, depth: 0 };
        assert_eq!(Swift.identifier(&declaration, &scope).unwrap(), "LSP5ReceivedAssetsArray");

        let declaration = Declaration { name: "SupportedStandards:LSP3Profile".into(), ..declaration };
        assert_eq!(Swift.identifier(&declaration, &scope).unwrap(), "SupportedStandards_LSP3Profile");
    }
}
