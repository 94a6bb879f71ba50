//! Tag scanner.
//!
//! Walks one component document, drives the binding expression parser over
//! every attribute of every element (and every declared interface field),
//! and assembles the file-level binding set: element ids, field ids, and the
//! flattened, ordered binding list. Binding-bearing tags also get their
//! literal text redacted for re-serialization.

use serde::{Deserialize, Serialize};

use crate::binding::Binding;
use crate::diagnostics::{self, Diagnostic};
use crate::markup::{all_nodes, ComponentDocument, DocumentKind, MarkupNode};
use crate::parse::{parse_attribute, AttributeContext};
use crate::redact::redact;

// ═══════════════════════════════════════════════════════════════════════════════
// SCAN ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

/// Fatal precondition failures. Unlike diagnostics, these abort the call:
/// the scanner was handed something it must never be handed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    NotAMarkupDocument { src_path: String, kind: DocumentKind },
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAMarkupDocument { src_path, kind } => {
                write!(
                    f,
                    "was given a non-markup document: {} (kind {:?})",
                    src_path, kind
                )
            }
        }
    }
}

impl std::error::Error for ScanError {}

// ═══════════════════════════════════════════════════════════════════════════════
// SCAN RESULT
// ═══════════════════════════════════════════════════════════════════════════════

/// One scanned tag that produced at least one binding. `text` is the
/// redacted literal text, same length as the original.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedTag {
    pub id: Option<String>,
    pub is_top_tag: bool,
    pub text: String,
    pub line: u32,
    pub bindings: Vec<Binding>,
}

/// Per-file scan output: the union of declared ids plus the flattened
/// binding list in traversal order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub tags: Vec<ScannedTag>,
    pub tag_ids: Vec<String>,
    pub field_ids: Vec<String>,
    pub bindings: Vec<Binding>,
    pub diagnostics: Vec<Diagnostic>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCANNING
// ═══════════════════════════════════════════════════════════════════════════════

/// Scan a component document for bindings. Elements are visited depth-first
/// (node before children), then interface fields as top tags; the binding
/// list preserves that order, which downstream code generation relies on.
pub fn scan_component(document: &ComponentDocument) -> Result<ScanResult, ScanError> {
    require_markup(document)?;

    let mut result = ScanResult::default();
    for node in all_nodes(document) {
        scan_tag(document, node, false, &mut result);
    }
    for field in &document.interface_fields {
        scan_tag(document, field, true, &mut result);
    }
    Ok(result)
}

/// Ids-only scan for plain markup files that want node-variable capture
/// without any binding extraction.
pub fn scan_tag_ids(document: &ComponentDocument) -> Result<Vec<String>, ScanError> {
    require_markup(document)?;

    let mut ids = Vec::new();
    for node in all_nodes(document) {
        if let Some(id) = node.id() {
            push_unique(&mut ids, id);
        }
    }
    Ok(ids)
}

fn require_markup(document: &ComponentDocument) -> Result<(), ScanError> {
    if document.kind != DocumentKind::Markup {
        return Err(ScanError::NotAMarkupDocument {
            src_path: document.src_path.clone(),
            kind: document.kind,
        });
    }
    Ok(())
}

fn scan_tag(
    document: &ComponentDocument,
    node: &MarkupNode,
    is_top_tag: bool,
    result: &mut ScanResult,
) {
    if node.text.is_empty() {
        result
            .diagnostics
            .push(diagnostics::corrupt_element(&document.src_path));
        return;
    }

    let id = node.id().map(|s| s.to_string());
    if let Some(ref id) = id {
        let ids = if is_top_tag {
            &mut result.field_ids
        } else {
            &mut result.tag_ids
        };
        push_unique(ids, id);
    }

    let mut bindings = Vec::new();
    for attr in &node.attributes {
        if attr.name.eq_ignore_ascii_case("id") {
            continue;
        }
        let ctx = AttributeContext {
            attr_name: &attr.name,
            attr_value: &attr.value,
            tag_text: &node.text,
            tag_line: node.line,
            tag_id: id.as_deref(),
            is_top_tag,
            src_path: &document.src_path,
        };
        if let Some(binding) = parse_attribute(&ctx, &mut result.diagnostics) {
            bindings.push(binding);
        }
    }

    if !bindings.is_empty() {
        let text = redact(&node.text, &bindings);
        result.bindings.extend(bindings.iter().cloned());
        result.tags.push(ScannedTag {
            id,
            is_top_tag,
            text,
            line: node.line,
            bindings,
        });
    }
}

fn push_unique(ids: &mut Vec<String>, id: &str) {
    if !ids.iter().any(|existing| existing == id) {
        ids.push(id.to_string());
    }
}
