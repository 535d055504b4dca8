use crate::{
    docs::{documentation_from_json, json_type_name},
    error::ConstGenError,
    utils::{is_identifier, quote},
};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use std::str::FromStr;
use upconst_schema::{
    Container, Declaration, DeclarationKind, Document, ElementDescriptors, EnumCase, EnumDecl,
    Literal, RawValueType, SchemaRecord,
};

lazy_static! {
    static ref HEX_KEY:        Regex = Regex::new(r"^(0x)?[0-9a-fA-F]+$").unwrap();
    static ref RAW_VALUE_TYPE: Regex = Regex::new(r"^(string|int|uint|double|float)(\d*)$").unwrap();
}

/// The `"type"` tag of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationTag {
    Const,
    Enum,
    Json,
    JsonSchema,
}

impl FromStr for DeclarationTag {
    type Err = ConstGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "const"                            => Ok(DeclarationTag::Const),
            "enum"                             => Ok(DeclarationTag::Enum),
            "json"                             => Ok(DeclarationTag::Json),
            "erc725y_jsonschema" | "jsonschema" => Ok(DeclarationTag::JsonSchema),
            _ => Err(ConstGenError::UnknownDeclarationKind(s.to_string())),
        }
    }
}

/// Parses an enum `rawValueType`: `string`, `int`, `uint`, `double` or
/// `float`, case-insensitive, with an optional bit width on `int`/`uint`.
pub fn parse_raw_value_type(raw: &str) -> Option<RawValueType> {
    let lowered = raw.to_lowercase();
    let caps = RAW_VALUE_TYPE.captures(&lowered)?;
    let bits = match &caps[2] {
        ""     => None,
        digits => Some(digits.parse::<u16>().ok()?),
    };
    match (&caps[1], bits) {
        ("string", None) => Some(RawValueType::String),
        ("double", None) => Some(RawValueType::Double),
        ("float", None)  => Some(RawValueType::Float),
        ("int", bits)    => Some(RawValueType::Int(bits)),
        ("uint", bits)   => Some(RawValueType::UInt(bits)),
        _ => None,
    }
}

/// Builds a validated [`Document`] from a parsed constants schema.
pub fn build_document(value: &Value) -> Result<Document, ConstGenError> {
    let object = value
        .as_object()
        .ok_or_else(|| ConstGenError::validation("<document>", "content", "the schema must be a JSON object"))?;

    let documentation = documentation_from_json(object.get("documentation"))?;
    let content = match object.get("content") {
        Some(Value::Array(nodes)) => build_tree(nodes)?,
        Some(other) => {
            return Err(ConstGenError::validation(
                "<document>",
                "content",
                format!("expected an array but found {}", json_type_name(other)),
            ))
        }
        None => return Err(ConstGenError::validation("<document>", "content", "missing required field")),
    };

    Ok(Document { documentation, content })
}

/// Builds the root declarations. Nodes are validated, never coerced or dropped.
pub fn build_tree(nodes: &[Value]) -> Result<Vec<Declaration>, ConstGenError> {
    nodes
        .iter()
        .enumerate()
        .map(|(index, node)| build_node(node, None, index))
        .collect()
}

fn build_node(value: &Value, parent_path: Option<&str>, index: usize) -> Result<Declaration, ConstGenError> {
    let fallback_path = match parent_path {
        Some(parent) => format!("{}[{}]", parent, index),
        None         => format!("content[{}]", index),
    };
    let object = value.as_object().ok_or_else(|| {
        ConstGenError::validation(
            &fallback_path,
            "<node>",
            format!("expected an object but found {}", json_type_name(value)),
        )
    })?;

    let name = required_str(object, &fallback_path, "name")?.to_string();
    let path = match parent_path {
        Some(parent) => format!("{}.{}", parent, name),
        None         => name.clone(),
    };

    let tag = DeclarationTag::from_str(required_str(object, &path, "type")?)?;
    let documentation = documentation_from_json(object.get("documentation"))?;

    let kind = match tag {
        DeclarationTag::Const => DeclarationKind::Const(required_literal(object, &path, "value")?),
        DeclarationTag::Enum => {
            if parent_path.is_some() {
                return Err(ConstGenError::validation(
                    &path,
                    "type",
                    "enum declarations are only supported at the top level",
                ));
            }
            DeclarationKind::Enum(build_enum(object, &path)?)
        }
        DeclarationTag::Json => {
            let members = match object.get("members") {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(members)) => members
                    .iter()
                    .enumerate()
                    .map(|(i, member)| build_node(member, Some(&path), i))
                    .collect::<Result<Vec<_>, _>>()?,
                Some(other) => {
                    return Err(ConstGenError::validation(
                        &path,
                        "members",
                        format!("expected an array but found {}", json_type_name(other)),
                    ))
                }
            };
            DeclarationKind::Container(Container { members, grouping: false })
        }
        DeclarationTag::JsonSchema => DeclarationKind::SchemaRecord(build_schema_record(object, &path)?),
    };

    Ok(Declaration { name, documentation, kind })
}

fn build_enum(object: &Map<String, Value>, path: &str) -> Result<EnumDecl, ConstGenError> {
    let raw = required_str(object, path, "rawValueType")?;
    let raw_value_type = parse_raw_value_type(raw).ok_or_else(|| {
        ConstGenError::validation(path, "rawValueType", format!("{} is not valid", quote(raw)))
    })?;

    let case_iterable = match object.get("caseIterable") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(other) => {
            return Err(ConstGenError::validation(
                path,
                "caseIterable",
                format!("expected a bool but found {}", json_type_name(other)),
            ))
        }
    };

    let entries = match object.get("cases") {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(ConstGenError::validation(
                path,
                "cases",
                format!("expected an array but found {}", json_type_name(other)),
            ))
        }
        None => return Err(ConstGenError::validation(path, "cases", "missing required field")),
    };

    let mut cases = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let case_path = format!("{}.cases[{}]", path, i);
        let entry = entry.as_object().ok_or_else(|| {
            ConstGenError::validation(&case_path, "<case>", "expected an object with \"key\" and \"value\"")
        })?;
        let key = required_str(entry, &case_path, "key")?;
        if !is_identifier(key) {
            return Err(ConstGenError::validation(
                &case_path,
                "key",
                format!("{} is not a valid identifier", quote(key)),
            ));
        }
        cases.push(EnumCase {
            key:           key.to_string(),
            value:         required_literal(entry, &case_path, "value")?,
            documentation: documentation_from_json(entry.get("documentation"))?,
        });
    }

    Ok(EnumDecl { raw_value_type, case_iterable, cases })
}

fn build_schema_record(object: &Map<String, Value>, path: &str) -> Result<SchemaRecord, ConstGenError> {
    let key = required_str(object, path, "key")?;
    if !HEX_KEY.is_match(key) {
        return Err(ConstGenError::validation(
            path,
            "key",
            format!("{} must be a hex string without white space characters", quote(key)),
        ));
    }

    let element = match (
        optional_str(object, path, "elementValueType")?,
        optional_str(object, path, "elementValueContent")?,
    ) {
        (Some(value_type), Some(value_content)) => Some(ElementDescriptors {
            value_type:    value_type.to_string(),
            value_content: value_content.to_string(),
        }),
        (None, None) => None,
        (Some(_), None) => {
            return Err(ConstGenError::validation(
                path,
                "elementValueContent",
                "must be present when \"elementValueType\" is given",
            ))
        }
        (None, Some(_)) => {
            return Err(ConstGenError::validation(
                path,
                "elementValueType",
                "must be present when \"elementValueContent\" is given",
            ))
        }
    };

    Ok(SchemaRecord {
        key:           key.to_string(),
        key_type:      required_str(object, path, "keyType")?.to_string(),
        value_type:    required_str(object, path, "valueType")?.to_string(),
        value_content: required_str(object, path, "valueContent")?.to_string(),
        element,
    })
}

fn required_str<'a>(object: &'a Map<String, Value>, path: &str, field: &str) -> Result<&'a str, ConstGenError> {
    optional_str(object, path, field)?
        .ok_or_else(|| ConstGenError::validation(path, field, "missing required field"))
}

fn optional_str<'a>(object: &'a Map<String, Value>, path: &str, field: &str) -> Result<Option<&'a str>, ConstGenError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(other) => Err(ConstGenError::validation(
            path,
            field,
            format!("expected a string but found {}", json_type_name(other)),
        )),
    }
}

fn required_literal(object: &Map<String, Value>, path: &str, field: &str) -> Result<Literal, ConstGenError> {
    match object.get(field) {
        Some(Value::String(text))   => Ok(Literal::Text(text.clone())),
        Some(Value::Number(number)) => Ok(Literal::Number(number.to_string())),
        Some(other) => Err(ConstGenError::validation(
            path,
            field,
            format!("expected a string or a number but found {}", json_type_name(other)),
        )),
        None => Err(ConstGenError::validation(path, field, "missing required field")),
    }
}

/// True when none of `nodes` is a container with members.
pub fn is_last_layer(nodes: &[Declaration]) -> bool {
    !nodes
        .iter()
        .any(|node| node.members().map_or(false, |members| !members.is_empty()))
}

/// Wraps the members of every flat root container in a single synthetic
/// grouping container named `grouping_name`.
///
/// Returns new roots and leaves `roots` untouched. Nested containers are never
/// rewritten, and roots that already hold a grouping node are kept as they are.
pub fn promote_flat_containers(roots: &[Declaration], grouping_name: &str) -> Vec<Declaration> {
    roots
        .iter()
        .map(|root| match &root.kind {
            DeclarationKind::Container(container)
                if !container.grouping
                    && !container.members.iter().any(Declaration::is_grouping)
                    && is_last_layer(&container.members) =>
            {
                let grouping = Declaration {
                    name:          grouping_name.to_string(),
                    documentation: None,
                    kind:          DeclarationKind::Container(Container {
                        members:  container.members.clone(),
                        grouping: true,
                    }),
                };
                Declaration {
                    name:          root.name.clone(),
                    documentation: root.documentation.clone(),
                    kind:          DeclarationKind::Container(Container {
                        members:  vec![grouping],
                        grouping: false,
                    }),
                }
            }
            _ => root.clone(),
        })
        .collect()
}
