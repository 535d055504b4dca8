use crate::{
    error::ConstGenError,
    traits::{Dialect, Head, RenderedDescriptors, Scope},
    utils::{contains_prohibited_characters, quote, sanitize},
};
use upconst_schema::{ContentNode, Declaration, EnumCase, EnumDecl, Literal, RawValueType, SchemaRecord, TypeNode};

/// Renders `UpConstants.ts`. Containers and schema records become object
/// literals, so members inside them are properties rather than declarations.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScript;

impl Dialect for TypeScript {
    fn name(&self) -> &'static str {
        "TypeScript"
    }

    fn file_name(&self) -> &'static str {
        "UpConstants.ts"
    }

    /// Property keys may be quoted, so only top-level names need sanitizing.
    fn identifier(&self, declaration: &Declaration, scope: &Scope) -> Result<String, ConstGenError> {
        if !scope.in_container() {
            return sanitize(&declaration.name);
        }

        let mut name = declaration.name.clone();
        if let Some(stripped) = name.strip_suffix("[]") {
            name = format!("{}Array", stripped);
        }
        if contains_prohibited_characters(&name) {
            name = quote(&name);
        }
        Ok(name)
    }

    fn const_decl(&self, ident: &str, value: &Literal, scope: &Scope) -> String {
        if scope.in_container() {
            format!("{}: {},", ident, value.as_str())
        } else {
            format!("export const {} = {}", ident, value.as_str())
        }
    }

    fn enum_head(&self, ident: &str, _declaration: &EnumDecl) -> String {
        format!("export const enum {}", ident)
    }

    fn enum_case(&self, case: &EnumCase, raw_value_type: RawValueType) -> String {
        match raw_value_type {
            RawValueType::String => format!("{} = {}", case.key, quote(case.value.as_str())),
            _ => format!("{} = {}", case.key, case.value.as_str()),
        }
    }

    fn case_separator(&self) -> &'static str {
        ",\n"
    }

    fn container_head(&self, ident: &str, scope: &Scope) -> String {
        if scope.in_container() {
            format!("{}:", ident)
        } else {
            format!("export const {} =", ident)
        }
    }

    fn schema_record(
        &self,
        declaration: &Declaration,
        ident: &str,
        record: &SchemaRecord,
        rendered: &RenderedDescriptors,
        scope: &Scope,
    ) -> Result<Head, ConstGenError> {
        let mut lines = vec![
            format!("name: {},", quote(&declaration.name)),
            format!("key: {},", quote(&record.key)),
            format!("keyType: {},", quote(&record.key_type)),
            format!("valueType: {},", rendered.value_type),
            format!("valueContent: {},", rendered.value_content),
        ];
        if let (Some(value_type), Some(value_content)) =
            (&rendered.element_value_type, &rendered.element_value_content)
        {
            lines.push(format!("elementValueType: {},", value_type));
            lines.push(format!("elementValueContent: {},", value_content));
        }
        Ok(Head::OpenWith(self.container_head(ident, scope), lines))
    }

    fn close(&self, scope: &Scope) -> &'static str {
        if scope.in_container() {
            "},"
        } else {
            "}"
        }
    }

    /// Descriptors stay strings, normalized through their canonical form.
    fn value_type(&self, node: &TypeNode) -> Result<String, ConstGenError> {
        Ok(quote(&node.to_string()))
    }

    fn value_content(&self, node: &ContentNode) -> Result<String, ConstGenError> {
        Ok(quote(&node.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::parse_type;
    use upconst_schema::{Container, DeclarationKind};

    fn named(name: &str) -> Declaration {
        Declaration {
            name:          name.into(),
            documentation: None,
            kind:          DeclarationKind::Const(Literal::Number("0".into())),
        }
    }

    #[test]
    fn test_identifier_inside_object_literal() {
        let parent = Declaration {
            name:          "LSP5".into(),
            documentation: None,
            kind:          DeclarationKind::Container(Container { members: vec![], grouping: false }),
        };
        let nested = Scope { parent: Some(&parent), depth: 1 };
        assert_eq!(TypeScript.identifier(&named("LSP5ReceivedAssets[]"), &nested).unwrap(), "LSP5ReceivedAssetsArray");
        assert_eq!(
            TypeScript.identifier(&named("SupportedStandards:LSP3Profile"), &nested).unwrap(),
            "\"SupportedStandards:LSP3Profile\""
        );

        let root = Scope { parent: None, depth: 0 };
        assert_eq!(TypeScript.identifier(&named("SupportedStandards:LSP3Profile"), &root).unwrap(), "SupportedStandards");
    }

    #[test]
    fn test_descriptors_are_normalized() {
        let node = parse_type("( bytes4 , address )[compactbytesarray]").unwrap();
        assert_eq!(TypeScript.value_type(&node).unwrap(), "\"(bytes4,address)[CompactBytesArray]\"");
    }
}
