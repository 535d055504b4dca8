use serde::Serialize;
use std::fmt;

/// Shape of an ERC725Y value, as written in a `valueType` descriptor.
///
/// The `Display` impl writes the canonical descriptor text for a node, so
/// `bytes32[CompactBytesArray]`, `(address,uint256)[3]` and friends can be
/// regenerated from a parsed tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeNode {
    /// A bare leaf such as `address`, `bool` or `string`.
    Primitive(String),
    /// The unsized `bytes` leaf.
    Bytes,
    /// A leaf with a numeric suffix, e.g. `uint256` or `bytes4`.
    ///
    /// For `bytesN` the size counts bytes, for `uintN`/`intN` it counts bits.
    Sized { name: String, size: u32 },
    /// `T[]`
    Array(Box<TypeNode>),
    /// `T[k]`, with `k > 0`.
    FixedArray(Box<TypeNode>, u32),
    /// `T[CompactBytesArray]`
    CompactBytesArray(Box<TypeNode>),
    /// `(T1,T2,...)`. A one-element tuple stays a tuple.
    Tuple(Vec<TypeNode>),
}

impl TypeNode {
    /// Short variant name, used when reporting constructs a dialect cannot render.
    pub fn variant_name(&self) -> &'static str {
        match self {
            TypeNode::Primitive(_)         => "Primitive",
            TypeNode::Bytes                => "Bytes",
            TypeNode::Sized { .. }         => "Sized",
            TypeNode::Array(_)             => "Array",
            TypeNode::FixedArray(..)       => "FixedArray",
            TypeNode::CompactBytesArray(_) => "CompactBytesArray",
            TypeNode::Tuple(_)             => "Tuple",
        }
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Primitive(name)          => f.write_str(name),
            TypeNode::Bytes                    => f.write_str("bytes"),
            TypeNode::Sized { name, size }     => write!(f, "{}{}", name, size),
            TypeNode::Array(element)           => write!(f, "{}[]", element),
            TypeNode::FixedArray(element, len) => write!(f, "{}[{}]", element, len),
            TypeNode::CompactBytesArray(inner) => write!(f, "{}[CompactBytesArray]", inner),
            TypeNode::Tuple(elements)          => write_tuple(f, elements),
        }
    }
}

/// Meaning of an ERC725Y value, as written in a `valueContent` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ContentNode {
    /// `0x...`: the stored value must equal these bytes.
    SpecificBytes(String),
    /// `BytesN`
    BytesN(u32),
    /// `(C1,C2,...)`
    Tuple(Vec<ContentNode>),
    /// Anything else, passed through as-is (`Address`, `JSONURL`, `Keccak256`, ...).
    Named(String),
}

impl ContentNode {
    pub fn variant_name(&self) -> &'static str {
        match self {
            ContentNode::SpecificBytes(_) => "SpecificBytes",
            ContentNode::BytesN(_)        => "BytesN",
            ContentNode::Tuple(_)         => "Tuple",
            ContentNode::Named(_)         => "Named",
        }
    }
}

impl fmt::Display for ContentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentNode::SpecificBytes(hex) => f.write_str(hex),
            ContentNode::BytesN(size)       => write!(f, "Bytes{}", size),
            ContentNode::Tuple(elements)    => write_tuple(f, elements),
            ContentNode::Named(name)        => f.write_str(name),
        }
    }
}

fn write_tuple<T: fmt::Display>(f: &mut fmt::Formatter<'_>, elements: &[T]) -> fmt::Result {
    f.write_str("(")?;
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", element)?;
    }
    f.write_str(")")
}
