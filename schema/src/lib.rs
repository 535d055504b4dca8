//! Data model for the upconst generator.
//!
//! A constants schema is a forest of [`Declaration`]s: constants, enums,
//! containers and LSP2 schema records. Schema records carry `valueType` and
//! `valueContent` descriptors which parse into [`TypeNode`] and
//! [`ContentNode`] trees.
//!
//! ```
//! use upconst_schema::*;
//!
//! let node = TypeNode::Array(Box::new(TypeNode::Sized { name: "bytes".to_owned(), size: 32 }));
//! assert_eq!(node.to_string(), "bytes32[]");
//! ```

pub mod declaration;
pub mod descriptor;

pub use declaration::*;
pub use descriptor::*;
