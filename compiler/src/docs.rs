use crate::error::ConstGenError;
use serde_json::Value;
use upconst_schema::Documentation;

/// Comment markers a dialect wraps documentation in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
    pub single_line: &'static str,
    pub open:        &'static str,
    pub middle:      &'static str,
    pub close:       &'static str,
}

impl CommentStyle {
    /// `/// ` for one line, a `/** ... */` block for more.
    pub const DOC_BLOCK: CommentStyle = CommentStyle {
        single_line: "/// ",
        open:        "/**",
        middle:      " * ",
        close:       " */",
    };

    /// Every line prefixed with `/// `, used for document headers.
    pub const TRIPLE_SLASH: CommentStyle = CommentStyle {
        single_line: "/// ",
        open:        "/// ",
        middle:      "/// ",
        close:       "/// ",
    };
}

/// Reads a `documentation` attribute. `null` counts as absent; array entries
/// may be strings or numbers.
pub fn documentation_from_json(value: Option<&Value>) -> Result<Option<Documentation>, ConstGenError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(Documentation::Text(text.clone()))),
        Some(Value::Array(items)) => {
            let mut lines = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(line) => lines.push(line.clone()),
                    Value::Number(number) => lines.push(number.to_string()),
                    other => {
                        return Err(ConstGenError::InvalidDocumentationType {
                            found: format!("array of {}", json_type_name(other)),
                        })
                    }
                }
            }
            Ok(Some(Documentation::Lines(lines)))
        }
        Some(other) => Err(ConstGenError::InvalidDocumentationType {
            found: json_type_name(other).to_string(),
        }),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null      => "null",
        Value::Bool(_)   => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_)  => "array",
        Value::Object(_) => "object",
    }
}

/// Formats documentation as a comment block ending in a newline, or `""`.
pub fn format_documentation(documentation: Option<&Documentation>, style: &CommentStyle) -> String {
    let lines = match documentation {
        Some(doc) => doc.lines(),
        None      => return String::new(),
    };

    match lines.as_slice() {
        []     => String::new(),
        [line] => format!("{}{}\n", style.single_line, line),
        _ => {
            let body: String = lines
                .iter()
                .map(|line| format!("{}{}\n", style.middle, line))
                .collect();
            format!("{}\n{}{}\n", style.open, body, style.close)
        }
    }
}

pub fn prepend_documentation(documentation: Option<&Documentation>, style: &CommentStyle, text: &str) -> String {
    format!("{}{}", format_documentation(documentation, style), text)
}
