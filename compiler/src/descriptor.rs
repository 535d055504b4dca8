//! Recursive-descent parsing of ERC725Y `valueType` / `valueContent` descriptors.
//!
//! Both grammars share the tuple syntax: the interior of `( ... )` is split on
//! commas at nesting depth zero only, and each element is parsed recursively.

use crate::{error::ConstGenError, utils::is_identifier};
use lazy_static::lazy_static;
use regex::Regex;
use upconst_schema::{ContentNode, TypeNode};

lazy_static! {
    static ref FIXED_ARRAY_SUFFIX:         Regex = Regex::new(r"\[\s*(-?\d+)\s*\]$").unwrap();
    static ref COMPACT_BYTES_ARRAY_SUFFIX: Regex = Regex::new(r"(?i)\[compactbytesarray\]$").unwrap();
    static ref SIZE_SUFFIX:                Regex = Regex::new(r"^(.*?)(\d+)$").unwrap();
    static ref HEX_LITERAL:                Regex = Regex::new(r"^0x[0-9a-fA-F]+$").unwrap();
}

/// Deepest nesting of array suffixes and tuples a descriptor may use.
pub const MAX_NESTING: usize = 64;

/// Parses a `valueType` descriptor such as `(address,uint256)[3]`.
pub fn parse_type(descriptor: &str) -> Result<TypeNode, ConstGenError> {
    check_balanced(descriptor)?;
    parse_type_node(descriptor.trim(), 0)
}

/// Parses a `valueContent` descriptor such as `(Bytes4,Address)`.
pub fn parse_content(descriptor: &str) -> Result<ContentNode, ConstGenError> {
    check_balanced(descriptor)?;
    parse_content_node(descriptor.trim(), 0)
}

fn check_balanced(descriptor: &str) -> Result<(), ConstGenError> {
    if descriptor.matches('(').count() != descriptor.matches(')').count() {
        return Err(ConstGenError::UnbalancedParentheses(descriptor.to_string()));
    }
    Ok(())
}

fn check_depth(descriptor: &str, depth: usize) -> Result<(), ConstGenError> {
    if depth > MAX_NESTING {
        return Err(ConstGenError::malformed(
            descriptor,
            format!("nested deeper than {} levels", MAX_NESTING),
        ));
    }
    Ok(())
}

fn parse_type_node(descriptor: &str, depth: usize) -> Result<TypeNode, ConstGenError> {
    if descriptor.is_empty() {
        return Err(ConstGenError::malformed(descriptor, "empty type"));
    }
    check_depth(descriptor, depth)?;

    if let Some(element) = descriptor.strip_suffix("[]") {
        return Ok(TypeNode::Array(Box::new(parse_type_node(element.trim_end(), depth + 1)?)));
    }

    if let Some(caps) = FIXED_ARRAY_SUFFIX.captures(descriptor) {
        if let (Some(suffix), Some(raw_size)) = (caps.get(0), caps.get(1)) {
            let size = array_size(descriptor, raw_size.as_str())?;
            let element = parse_type_node(descriptor[..suffix.start()].trim_end(), depth + 1)?;
            return Ok(TypeNode::FixedArray(Box::new(element), size));
        }
    }

    if let Some(suffix) = COMPACT_BYTES_ARRAY_SUFFIX.find(descriptor) {
        let element = parse_type_node(descriptor[..suffix.start()].trim_end(), depth + 1)?;
        return Ok(TypeNode::CompactBytesArray(Box::new(element)));
    }

    if descriptor.starts_with('(') {
        let elements = split_tuple(descriptor)?
            .into_iter()
            .map(|element| parse_type_node(element, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(TypeNode::Tuple(elements));
    }

    if let Some(caps) = SIZE_SUFFIX.captures(descriptor) {
        let name = &caps[1];
        if !is_identifier(name) {
            return Err(ConstGenError::malformed(descriptor, "expected a type name before the size"));
        }
        let size = caps[2]
            .parse::<u32>()
            .map_err(|_| ConstGenError::malformed(descriptor, "size suffix is out of range"))?;
        return Ok(TypeNode::Sized { name: name.to_string(), size });
    }

    if descriptor.eq_ignore_ascii_case("bytes") {
        return Ok(TypeNode::Bytes);
    }
    if !is_identifier(descriptor) {
        return Err(ConstGenError::malformed(descriptor, "not a valid type name"));
    }
    Ok(TypeNode::Primitive(descriptor.to_string()))
}

fn array_size(descriptor: &str, raw: &str) -> Result<u32, ConstGenError> {
    let invalid = || ConstGenError::InvalidArraySize {
        descriptor: descriptor.to_string(),
        size:       raw.to_string(),
    };
    let size = raw.parse::<i64>().map_err(|_| invalid())?;
    if size <= 0 {
        return Err(invalid());
    }
    u32::try_from(size).map_err(|_| invalid())
}

fn parse_content_node(descriptor: &str, depth: usize) -> Result<ContentNode, ConstGenError> {
    if descriptor.is_empty() {
        return Err(ConstGenError::malformed(descriptor, "empty content"));
    }
    check_depth(descriptor, depth)?;

    if descriptor.starts_with("0x") {
        if !HEX_LITERAL.is_match(descriptor) {
            return Err(ConstGenError::malformed(descriptor, "expected hex digits after 0x"));
        }
        return Ok(ContentNode::SpecificBytes(descriptor.to_string()));
    }

    let bytes_prefixed = descriptor.get(..5).map_or(false, |p| p.eq_ignore_ascii_case("bytes"));
    if bytes_prefixed && descriptor.len() > 5 {
        let size = descriptor[5..]
            .parse::<u32>()
            .map_err(|_| ConstGenError::malformed(descriptor, "expected a byte count after Bytes"))?;
        return Ok(ContentNode::BytesN(size));
    }

    if descriptor.starts_with('(') {
        let elements = split_tuple(descriptor)?
            .into_iter()
            .map(|element| parse_content_node(element, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(ContentNode::Tuple(elements));
    }

    Ok(ContentNode::Named(descriptor.to_string()))
}

/// Splits `(a,(b,c),d)` into `["a", "(b,c)", "d"]`.
///
/// The opening parenthesis must be matched by the final character.
fn split_tuple(descriptor: &str) -> Result<Vec<&str>, ConstGenError> {
    let mut depth = 0usize;
    let mut close = None;
    for (i, c) in descriptor.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }

    let close = close.ok_or_else(|| ConstGenError::malformed_tuple(descriptor, "tuple is never closed"))?;
    if close != descriptor.len() - 1 {
        return Err(ConstGenError::malformed_tuple(
            descriptor,
            format!("unexpected {:?} after the closing parenthesis", &descriptor[close + 1..]),
        ));
    }

    let interior = &descriptor[1..close];
    if interior.trim().is_empty() {
        return Err(ConstGenError::malformed_tuple(descriptor, "tuple has no elements"));
    }

    let mut elements = Vec::new();
    let mut start = 0;
    depth = 0;
    for (i, c) in interior.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                elements.push(interior[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    elements.push(interior[start..].trim());

    if let Some(position) = elements.iter().position(|e| e.is_empty()) {
        return Err(ConstGenError::malformed_tuple(
            descriptor,
            format!("element {} is empty", position + 1),
        ));
    }
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prim(name: &str) -> TypeNode {
        TypeNode::Primitive(name.into())
    }

    fn sized(name: &str, size: u32) -> TypeNode {
        TypeNode::Sized { name: name.into(), size }
    }

    #[test]
    fn test_sized_primitives() {
        assert_eq!(parse_type("bytes32").unwrap(), sized("bytes", 32));
        assert_eq!(parse_type("uint8").unwrap(), sized("uint", 8));
        assert_eq!(parse_type(" int128 ").unwrap(), sized("int", 128));
    }

    #[test]
    fn test_unsized_bytes_is_its_own_leaf() {
        assert_eq!(parse_type("bytes").unwrap(), TypeNode::Bytes);
        assert_eq!(parse_type("BYTES").unwrap(), TypeNode::Bytes);
        assert_eq!(parse_type("address").unwrap(), prim("address"));
    }

    #[test]
    fn test_arrays() {
        assert_eq!(
            parse_type("uint256[]").unwrap(),
            TypeNode::Array(Box::new(sized("uint", 256)))
        );
        assert_eq!(
            parse_type("bytes32[]").unwrap(),
            TypeNode::Array(Box::new(sized("bytes", 32)))
        );
        assert_eq!(
            parse_type("address[2][]").unwrap(),
            TypeNode::Array(Box::new(TypeNode::FixedArray(Box::new(prim("address")), 2)))
        );
    }

    #[test]
    fn test_fixed_array_of_tuple() {
        assert_eq!(
            parse_type("(address,uint256)[3]").unwrap(),
            TypeNode::FixedArray(
                Box::new(TypeNode::Tuple(vec![prim("address"), sized("uint", 256)])),
                3
            )
        );
    }

    #[test]
    fn test_compact_bytes_array() {
        assert_eq!(
            parse_type("bytes32[CompactBytesArray]").unwrap(),
            TypeNode::CompactBytesArray(Box::new(sized("bytes", 32)))
        );
        assert_eq!(
            parse_type("bytes[compactbytesarray]").unwrap(),
            TypeNode::CompactBytesArray(Box::new(TypeNode::Bytes))
        );
    }

    #[test]
    fn test_nested_tuples_are_preserved() {
        assert_eq!(
            parse_type("(uint256,(bool,address))").unwrap(),
            TypeNode::Tuple(vec![
                sized("uint", 256),
                TypeNode::Tuple(vec![prim("bool"), prim("address")]),
            ])
        );
        assert_eq!(
            parse_type("(bytes4,(uint8,bool))").unwrap(),
            TypeNode::Tuple(vec![
                sized("bytes", 4),
                TypeNode::Tuple(vec![sized("uint", 8), prim("bool")]),
            ])
        );
    }

    #[test]
    fn test_single_element_tuple_is_not_unwrapped() {
        assert_eq!(
            parse_type("((address))").unwrap(),
            TypeNode::Tuple(vec![TypeNode::Tuple(vec![prim("address")])])
        );
    }

    #[test]
    fn test_tuple_elements_are_trimmed() {
        assert_eq!(
            parse_type("( bytes4 , address[] )").unwrap(),
            TypeNode::Tuple(vec![sized("bytes", 4), TypeNode::Array(Box::new(prim("address")))])
        );
    }

    #[test]
    fn test_unbalanced_parentheses() {
        let err = parse_type("foo(bar").unwrap_err();
        assert!(
            matches!(err, ConstGenError::UnbalancedParentheses(ref d) if d == "foo(bar"),
            "expected UnbalancedParentheses but got {:?}",
            err
        );
        assert!(matches!(
            parse_content("(Bytes4,Address").unwrap_err(),
            ConstGenError::UnbalancedParentheses(_)
        ));
    }

    #[test]
    fn test_invalid_array_size() {
        for descriptor in ["uint256[0]", "uint256[-1]", "address[99999999999999999999]"] {
            let err = parse_type(descriptor).unwrap_err();
            assert!(
                matches!(err, ConstGenError::InvalidArraySize { ref descriptor, .. } if descriptor.starts_with("uint") || descriptor.starts_with("address")),
                "expected InvalidArraySize but got {:?}",
                err
            );
        }
    }

    #[test]
    fn test_malformed_tuples() {
        for descriptor in ["(a)(b)", "(a,b)x", "()", "(a,,b)", "(uint8,)"] {
            let err = parse_type(descriptor).unwrap_err();
            assert!(
                matches!(err, ConstGenError::MalformedTuple { .. }),
                "expected MalformedTuple for {} but got {:?}",
                descriptor,
                err
            );
        }
    }

    #[test]
    fn test_malformed_leaves() {
        for descriptor in ["", "42", "uint256[2", "foo(bar)", "address bool"] {
            let err = parse_type(descriptor).unwrap_err();
            assert!(
                matches!(err, ConstGenError::MalformedDescriptor { .. }),
                "expected MalformedDescriptor for {:?} but got {:?}",
                descriptor,
                err
            );
        }
    }

    #[test]
    fn test_content_leaves() {
        assert_eq!(
            parse_content("0x5ef83ad9").unwrap(),
            ContentNode::SpecificBytes("0x5ef83ad9".into())
        );
        assert_eq!(parse_content("Bytes4").unwrap(), ContentNode::BytesN(4));
        assert_eq!(parse_content("bytes32").unwrap(), ContentNode::BytesN(32));
        assert_eq!(parse_content("Bytes").unwrap(), ContentNode::Named("Bytes".into()));
        assert_eq!(parse_content("JSONURL").unwrap(), ContentNode::Named("JSONURL".into()));
    }

    #[test]
    fn test_content_tuple() {
        assert_eq!(
            parse_content("(Bytes4,(Address,0xcafe),Number)").unwrap(),
            ContentNode::Tuple(vec![
                ContentNode::BytesN(4),
                ContentNode::Tuple(vec![
                    ContentNode::Named("Address".into()),
                    ContentNode::SpecificBytes("0xcafe".into()),
                ]),
                ContentNode::Named("Number".into()),
            ])
        );
    }

    #[test]
    fn test_malformed_content() {
        assert!(matches!(
            parse_content("0xzz").unwrap_err(),
            ConstGenError::MalformedDescriptor { .. }
        ));
        assert!(matches!(
            parse_content("BytesN").unwrap_err(),
            ConstGenError::MalformedDescriptor { .. }
        ));
        assert!(matches!(
            parse_content("(Address,)").unwrap_err(),
            ConstGenError::MalformedTuple { .. }
        ));
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let deep_arrays = format!("uint256{}", "[]".repeat(1000));
        let err = parse_type(&deep_arrays).unwrap_err();
        assert!(
            matches!(err, ConstGenError::MalformedDescriptor { ref reason, .. } if reason.contains("nested deeper")),
            "expected MalformedDescriptor but got {:?}",
            err
        );

        let deep_tuples = format!("{}address{}", "(".repeat(500), ")".repeat(500));
        assert!(matches!(parse_type(&deep_tuples).unwrap_err(), ConstGenError::MalformedDescriptor { .. }));
        let deep_content = format!("{}Address{}", "(".repeat(500), ")".repeat(500));
        assert!(matches!(parse_content(&deep_content).unwrap_err(), ConstGenError::MalformedDescriptor { .. }));
    }

    #[test]
    fn test_nesting_up_to_the_limit_parses() {
        let descriptor = format!("address{}", "[]".repeat(MAX_NESTING));
        let mut node = parse_type(&descriptor).unwrap();
        let mut arrays = 0;
        while let TypeNode::Array(element) = node {
            arrays += 1;
            node = *element;
        }
        assert_eq!(arrays, MAX_NESTING);
        assert_eq!(node, prim("address"));
    }

    #[test]
    fn test_canonical_render_reparses_to_same_tree() {
        let descriptors = [
            "bytes32",
            "bytes",
            "address",
            "uint256[]",
            "(address,uint256)[3]",
            "bytes32[CompactBytesArray]",
            "( bytes4 , (uint8,bool) )",
            "((address))[][2]",
            "bytes[compactbytesarray]",
            "(bytes4,bytes8)[CompactBytesArray]",
        ];
        for descriptor in descriptors {
            let parsed = parse_type(descriptor).unwrap();
            let reparsed = parse_type(&parsed.to_string()).unwrap();
            assert_eq!(parsed, reparsed, "round trip of {}", descriptor);
        }

        for descriptor in ["0xabcd", "Bytes20", "(Address,(bytes4,Keccak256))", "Markdown"] {
            let parsed = parse_content(descriptor).unwrap();
            assert_eq!(parse_content(&parsed.to_string()).unwrap(), parsed, "round trip of {}", descriptor);
        }
    }
}
