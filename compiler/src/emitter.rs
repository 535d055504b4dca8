use crate::{
    descriptor::{parse_content, parse_type},
    docs::{format_documentation, prepend_documentation},
    error::ConstGenError,
    traits::{Dialect, Head, RenderedDescriptors, Scope},
    tree::promote_flat_containers,
    utils::indent,
};
use std::borrow::Cow;
use tracing::{debug, info};
use upconst_schema::{Declaration, DeclarationKind, Document, SchemaRecord};

/// Walks a declaration tree and renders it through a [`Dialect`].
pub struct Emitter<'d, D: Dialect> {
    dialect: &'d D,
}

impl<'d, D: Dialect> Emitter<'d, D> {
    pub fn new(dialect: &'d D) -> Self {
        Emitter { dialect }
    }

    /// Renders the whole document: header documentation, then every root
    /// declaration, separated by blank lines.
    pub fn emit_document(&self, document: &Document) -> Result<String, ConstGenError> {
        let roots: Cow<[Declaration]> = match self.dialect.grouping() {
            Some(name) => Cow::Owned(promote_flat_containers(&document.content, name)),
            None       => Cow::Borrowed(document.content.as_slice()),
        };

        let mut sections = Vec::with_capacity(roots.len() + 1);
        let header = format_documentation(document.documentation.as_ref(), &self.dialect.header_style());
        if !header.is_empty() {
            sections.push(header.trim_end_matches('\n').to_string());
        }
        for root in roots.iter() {
            sections.push(self.emit(root, None, 0)?);
        }

        info!(
            dialect = self.dialect.name(),
            declarations = roots.len(),
            "emitted document"
        );

        let mut output = sections.join("\n\n");
        output.push('\n');
        Ok(output)
    }

    /// Renders one declaration (and its subtree) without a trailing newline.
    /// Indentation relative to `parent` is applied by the caller.
    pub fn emit(&self, declaration: &Declaration, parent: Option<&Declaration>, depth: usize) -> Result<String, ConstGenError> {
        let kind = declaration.kind.label();
        match parent {
            None         => debug!(kind, "Processing ({}): {}", depth, declaration.name),
            Some(parent) => debug!(kind, "Processing ({}): {}->{}", depth, parent.name, declaration.name),
        }

        let scope = Scope { parent, depth };
        let ident = if declaration.is_grouping() {
            declaration.name.clone()
        } else {
            self.dialect.identifier(declaration, &scope)?
        };

        let head = match &declaration.kind {
            DeclarationKind::Const(value) => Head::Terminal(self.dialect.const_decl(&ident, value, &scope)),
            DeclarationKind::Enum(decl) => Head::Open(self.dialect.enum_head(&ident, decl)),
            DeclarationKind::Container(container) if container.grouping => {
                Head::Open(self.dialect.grouping_head(&declaration.name))
            }
            DeclarationKind::Container(_) => Head::Open(self.dialect.container_head(&ident, &scope)),
            DeclarationKind::SchemaRecord(record) => {
                let rendered = self.render_descriptors(record)?;
                self.dialect.schema_record(declaration, &ident, record, &rendered, &scope)?
            }
        };

        let text = match head {
            Head::Terminal(text) => text,
            Head::Open(open) => {
                let body = self.body(declaration, depth)?;
                self.block(&open, &body, &scope)
            }
            Head::OpenWith(open, lines) => self.block(&open, &lines.join("\n"), &scope),
        };

        Ok(prepend_documentation(
            declaration.documentation.as_ref(),
            &self.dialect.comment_style(),
            &text,
        ))
    }

    fn body(&self, declaration: &Declaration, depth: usize) -> Result<String, ConstGenError> {
        match &declaration.kind {
            DeclarationKind::Enum(decl) => {
                let style = self.dialect.comment_style();
                let cases: Vec<String> = decl
                    .cases
                    .iter()
                    .map(|case| {
                        prepend_documentation(
                            case.documentation.as_ref(),
                            &style,
                            &self.dialect.enum_case(case, decl.raw_value_type),
                        )
                    })
                    .collect();
                Ok(cases.join(self.dialect.case_separator()))
            }
            DeclarationKind::Container(container) => {
                let members = container
                    .members
                    .iter()
                    .map(|member| self.emit(member, Some(declaration), depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(members.join("\n"))
            }
            DeclarationKind::Const(_) | DeclarationKind::SchemaRecord(_) => Ok(String::new()),
        }
    }

    fn block(&self, open: &str, body: &str, scope: &Scope) -> String {
        let close = self.dialect.close(scope);
        if body.is_empty() {
            format!("{} {{\n{}", open, close)
        } else {
            format!("{} {{\n{}\n{}", open, indent(body, self.dialect.indent_unit()), close)
        }
    }

    fn render_descriptors(&self, record: &SchemaRecord) -> Result<RenderedDescriptors, ConstGenError> {
        let (element_value_type, element_value_content) = match &record.element {
            Some(element) => (
                Some(self.dialect.value_type(&parse_type(&element.value_type)?)?),
                Some(self.dialect.value_content(&parse_content(&element.value_content)?)?),
            ),
            None => (None, None),
        };

        Ok(RenderedDescriptors {
            value_type: self.dialect.value_type(&parse_type(&record.value_type)?)?,
            value_content: self.dialect.value_content(&parse_content(&record.value_content)?)?,
            element_value_type,
            element_value_content,
        })
    }
}
