use crate::{
    error::ConstGenError,
    traits::{Dialect, Head, RenderedDescriptors, Scope},
    utils::{quote, sanitize},
};
use upconst_schema::{ContentNode, Declaration, EnumCase, EnumDecl, Literal, RawValueType, SchemaRecord, TypeNode};

/// Renders `UpConstants.kt`.
///
/// Flat root containers are promoted into a `companion object` so their
/// constants are reachable as `Container.NAME`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Kotlin;

fn raw_type(raw_value_type: RawValueType) -> &'static str {
    match raw_value_type {
        RawValueType::String  => "String",
        RawValueType::Int(_)  => "Int",
        RawValueType::UInt(_) => "UInt",
        RawValueType::Double  => "Double",
        RawValueType::Float   => "Float",
    }
}

impl Kotlin {
    fn list_of(&self, elements: Vec<String>) -> String {
        format!("listOf({})", elements.join(", "))
    }
}

impl Dialect for Kotlin {
    fn name(&self) -> &'static str {
        "Kotlin"
    }

    fn file_name(&self) -> &'static str {
        "UpConstants.kt"
    }

    fn grouping(&self) -> Option<&'static str> {
        Some("companion object")
    }

    fn identifier(&self, declaration: &Declaration, _scope: &Scope) -> Result<String, ConstGenError> {
        sanitize(&declaration.name.replace(':', "_"))
    }

    fn const_decl(&self, ident: &str, value: &Literal, _scope: &Scope) -> String {
        format!("public val {} = {}", ident, value.as_str())
    }

    fn enum_head(&self, ident: &str, declaration: &EnumDecl) -> String {
        format!("public enum class {}(val value: {})", ident, raw_type(declaration.raw_value_type))
    }

    fn enum_case(&self, case: &EnumCase, raw_value_type: RawValueType) -> String {
        let value = case.value.as_str();
        match raw_value_type {
            RawValueType::String  => format!("{}({})", case.key, quote(value)),
            RawValueType::Int(_)  => format!("{}({})", case.key, value),
            RawValueType::UInt(_) => format!("{}({}u)", case.key, value),
            RawValueType::Float   => format!("{}({}.toFloat())", case.key, value),
            RawValueType::Double  => format!("{}({}.toDouble())", case.key, value),
        }
    }

    fn case_separator(&self) -> &'static str {
        ",\n"
    }

    fn container_head(&self, ident: &str, scope: &Scope) -> String {
        if scope.depth >= 1 {
            format!("public object {}", ident)
        } else {
            format!("public class {}", ident)
        }
    }

    fn grouping_head(&self, name: &str) -> String {
        format!("public {}", name)
    }

    fn schema_record(
        &self,
        declaration: &Declaration,
        ident: &str,
        record: &SchemaRecord,
        rendered: &RenderedDescriptors,
        _scope: &Scope,
    ) -> Result<Head, ConstGenError> {
        let mut args = vec![
            format!("key = {}", quote(&record.key)),
            format!("keyType = KeyType({})", quote(&record.key_type)),
            format!("valueType = {}", rendered.value_type),
            format!("valueContent = {}", rendered.value_content),
        ];
        if let (Some(value_type), Some(value_content)) =
            (&rendered.element_value_type, &rendered.element_value_content)
        {
            args.push(format!("elementValueType = {}", value_type));
            args.push(format!("elementValueContent = {}", value_content));
        }

        let unit = self.indent_unit();
        let args: String = args.iter().map(|arg| format!(",\n{}{}", unit, arg)).collect();
        Ok(Head::Terminal(format!(
            "public val {} = JSONSchema(name = {}{})",
            ident,
            quote(&declaration.name),
            args
        )))
    }

    fn value_type(&self, node: &TypeNode) -> Result<String, ConstGenError> {
        Ok(match node {
            TypeNode::Primitive(name) => format!("ValueType.Primitive({})", quote(name)),
            TypeNode::Bytes => "ValueType.Bytes".to_string(),
            TypeNode::Sized { name, size } => match name.to_lowercase().as_str() {
                "bytes" => format!("ValueType.BytesN({})", size),
                lowered @ ("uint" | "int") => format!("ValueType.Sized({}, {})", quote(lowered), size),
                _ => return Err(self.unsupported(format!("{} `{}`", node.variant_name(), node))),
            },
            TypeNode::Array(element) => format!("ValueType.Array({})", self.value_type(element)?),
            TypeNode::FixedArray(element, size) => {
                format!("ValueType.FixedArray({}, {})", self.value_type(element)?, size)
            }
            TypeNode::CompactBytesArray(element) => {
                format!("ValueType.CompactBytesArray({})", self.value_type(element)?)
            }
            TypeNode::Tuple(elements) => {
                let elements = elements
                    .iter()
                    .map(|element| self.value_type(element))
                    .collect::<Result<Vec<_>, _>>()?;
                format!("ValueType.Tuple({})", self.list_of(elements))
            }
        })
    }

    fn value_content(&self, node: &ContentNode) -> Result<String, ConstGenError> {
        Ok(match node {
            ContentNode::SpecificBytes(hex) => format!("ValueContent.SpecificBytes({})", quote(hex)),
            ContentNode::BytesN(size) => format!("ValueContent.BytesN({})", size),
            ContentNode::Tuple(elements) => {
                let elements = elements
                    .iter()
                    .map(|element| self.value_content(element))
                    .collect::<Result<Vec<_>, _>>()?;
                format!("ValueContent.Tuple({})", self.list_of(elements))
            }
            ContentNode::Named(name) => format!("ValueContent.Named({})", quote(name)),
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
            ("bytes32", "ValueType.BytesN(32)"),
            ("bytes", "ValueType.Bytes"),
            ("uint256[]", "ValueType.Array(ValueType.Sized(\"uint\", 256))"),
            (
                "(address,bytes4)[2]",
                "ValueType.FixedArray(ValueType.Tuple(listOf(ValueType.Primitive(\"address\"), ValueType.BytesN(4))), 2)",
            ),
            ("bytes[CompactBytesArray]", "ValueType.CompactBytesArray(ValueType.Bytes)"),
        ];
        for (descriptor, expected) in cases {
            let node = parse_type(descriptor).unwrap();
            assert_eq!(Kotlin.value_type(&node).unwrap(), expected, "{}", descriptor);
        }
    }

    #[test]
    fn test_value_content_literals() {
        let node = parse_content("(Bytes4,0xcafe,Keccak256)").unwrap();
        assert_eq!(
            Kotlin.value_content(&node).unwrap(),
            "ValueContent.Tuple(listOf(ValueContent.BytesN(4), ValueContent.SpecificBytes(\"0xcafe\"), ValueContent.Named(\"Keccak256\")))"
        );
    }

    #[test]
    fn test_enum_case_literals() {
        let case = |value: &str| EnumCase {
            key:           "ONE".into(),
            value:         Literal::Number(value.into()),
            documentation: None,
        };
        assert_eq!(Kotlin.enum_case(&case("1"), RawValueType::UInt(Some(8))), "ONE(1u)");
        assert_eq!(Kotlin.enum_case(&case("1.5"), RawValueType::Float), "ONE(1.5.toFloat())");
        assert_eq!(Kotlin.enum_case(&case("1"), RawValueType::String), "ONE(\"1\")");
    }

    #[test]
    fn test_unknown_sized_leaf_is_unsupported() {
        let node = parse_type("fixed128").unwrap();
        assert!(matches!(
            Kotlin.value_type(&node).unwrap_err(),
            ConstGenError::UnsupportedTypeConstruct { dialect: "Kotlin", .. }
        ));
    }
}
