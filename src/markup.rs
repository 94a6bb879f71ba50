//! Markup tree capability: the read-only input IR handed to the binding
//! pass by the external markup parser.
//!
//! The pass never builds these trees itself. A `ComponentDocument` arrives
//! fully parsed, with each node carrying the literal text of its opening tag
//! so that binding diagnostics and generated statements can be mapped back
//! to exact line/column positions.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// SOURCE POSITIONS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        SourceLocation { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRange {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceRange {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        SourceRange { start, end }
    }

    /// Range covering `len` columns starting at the given position.
    pub fn span(line: u32, column: u32, len: u32) -> Self {
        SourceRange {
            start: SourceLocation::new(line, column),
            end: SourceLocation::new(line, column + len),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MARKUP IR
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkupAttribute {
    pub name: String,
    pub value: String,
}

impl MarkupAttribute {
    pub fn new(name: &str, value: &str) -> Self {
        MarkupAttribute {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// One markup element. `text` is the literal serialized form of the opening
/// tag (possibly multi-line); `line` is the 0-based line of its first line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkupNode {
    pub tag: String,
    pub attributes: Vec<MarkupAttribute>,
    pub children: Vec<MarkupNode>,
    pub text: String,
    pub line: u32,
}

impl MarkupNode {
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute_value("id")
    }
}

/// The kind of file a document was classified as by the external pipeline.
/// The binding pass only accepts `Markup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Markup,
    Script,
    Other,
}

/// A parsed component file: the element tree under the component root plus
/// the component's declared interface fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDocument {
    pub src_path: String,
    pub kind: DocumentKind,
    pub component_name: String,
    /// Name of the component this one extends, if any.
    pub extends_component: Option<String>,
    /// Fully-qualified view-model class name declared on the component.
    pub vm_class_name: Option<String>,
    pub children: Vec<MarkupNode>,
    pub interface_fields: Vec<MarkupNode>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// TRAVERSAL
// ═══════════════════════════════════════════════════════════════════════════════

/// Depth-first collection of a node tree: each node before its children.
/// Generated code iterates bindings in this order, so it must be stable.
pub fn collect_nodes<'a>(nodes: &'a [MarkupNode], results: &mut Vec<&'a MarkupNode>) {
    for node in nodes {
        results.push(node);
        collect_nodes(&node.children, results);
    }
}

pub fn all_nodes(document: &ComponentDocument) -> Vec<&MarkupNode> {
    let mut results = Vec::new();
    collect_nodes(&document.children, &mut results);
    results
}
