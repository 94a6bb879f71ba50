//! Semantic binding validation.
//!
//! Runs once per file, after every file in the build has finished
//! structural parsing, so that view-model classes and ancestor components
//! are resolvable. All lookups go through the read-only [`SymbolResolver`]
//! capability supplied by the external pipeline; this pass never mutates
//! another file's state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::binding::{Binding, BindingMode};
use crate::diagnostics::{self, Diagnostic};
use crate::markup::ComponentDocument;
use crate::scan::ScanResult;

// ═══════════════════════════════════════════════════════════════════════════════
// SYMBOL RESOLVER CAPABILITY
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    pub writable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodInfo {
    pub params: u32,
}

/// Resolved public surface of one view-model class, including inherited
/// members. Member names are case-insensitive; keys are stored lowercased.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMemberTable {
    pub name: String,
    /// Path of the file that defines the class, when known. Used for the
    /// dependency-graph back-reference.
    pub src_path: Option<String>,
    fields: HashMap<String, FieldInfo>,
    methods: HashMap<String, MethodInfo>,
}

impl ClassMemberTable {
    pub fn new(name: &str) -> Self {
        ClassMemberTable {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_src_path(mut self, src_path: &str) -> Self {
        self.src_path = Some(src_path.to_string());
        self
    }

    pub fn add_field(&mut self, name: &str, writable: bool) {
        self.fields.insert(name.to_lowercase(), FieldInfo { writable });
    }

    pub fn add_method(&mut self, name: &str, params: u32) {
        self.methods.insert(name.to_lowercase(), MethodInfo { params });
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.get(&name.to_lowercase())
    }

    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.get(&name.to_lowercase())
    }
}

/// One ancestor component's contribution to duplicate-id detection and
/// inherited code generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    pub name: String,
    pub tag_ids: Vec<String>,
    pub field_ids: Vec<String>,
    pub bindings: Vec<Binding>,
}

/// Read-only lookup surface populated by the external file map before
/// semantic validation begins.
pub trait SymbolResolver {
    fn resolve_class(&self, name: &str) -> Option<&ClassMemberTable>;
    /// Ancestors of a component, nearest first, following the
    /// component-extends-component chain.
    fn resolve_ancestors(&self, component_name: &str) -> Vec<&ComponentDescriptor>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// VALIDATION OUTCOME
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub error_count: u32,
    pub diagnostics: Vec<Diagnostic>,
    /// Back-reference (class source path, component source path) handed to
    /// the external dependency graph when the file validated cleanly.
    pub class_dependency: Option<(String, String)>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// SEMANTIC PASS
// ═══════════════════════════════════════════════════════════════════════════════

/// Validate one scanned file against its ancestors and its view-model
/// class. Errors accumulate; nothing short-circuits after the first failure
/// except the no-VM-class check, which stays quiet when a duplicate-id
/// error already fired for the file.
pub fn validate_component(
    document: &ComponentDocument,
    scan: &mut ScanResult,
    resolver: &dyn SymbolResolver,
) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();
    let src_path = &document.src_path;

    // An id may not collide with any ancestor-declared id. Collisions are
    // reported with the code of the ancestor category that owns the id.
    let ancestors = resolver.resolve_ancestors(&document.component_name);
    let in_ancestor_tags = |id: &String| ancestors.iter().any(|a| a.tag_ids.contains(id));
    let in_ancestor_fields = |id: &String| ancestors.iter().any(|a| a.field_ids.contains(id));

    for id in scan.field_ids.iter().chain(scan.tag_ids.iter()) {
        if in_ancestor_fields(id) {
            outcome
                .diagnostics
                .push(diagnostics::duplicate_field_id(src_path, id));
            outcome.error_count += 1;
        } else if in_ancestor_tags(id) {
            outcome
                .diagnostics
                .push(diagnostics::duplicate_tag_id(src_path, id));
            outcome.error_count += 1;
        }
    }

    if !scan.bindings.is_empty() {
        match document.vm_class_name.as_deref() {
            None => {
                if outcome.error_count == 0 {
                    outcome
                        .diagnostics
                        .push(diagnostics::no_vm_class_defined(src_path));
                    outcome.error_count += 1;
                }
            }
            Some(class_name) => match resolver.resolve_class(class_name) {
                None => {
                    outcome
                        .diagnostics
                        .push(diagnostics::vm_class_not_found(src_path, class_name));
                    outcome.error_count += 1;
                }
                Some(class) => {
                    for binding in scan.bindings.iter_mut().filter(|b| b.is_valid) {
                        if let Some(diagnostic) = check_binding(binding, class, src_path) {
                            binding.is_valid = false;
                            binding.error_message = Some(diagnostic.message.clone());
                            outcome.diagnostics.push(diagnostic);
                            outcome.error_count += 1;
                        }
                    }
                    if outcome.error_count == 0 {
                        outcome.class_dependency = class
                            .src_path
                            .as_ref()
                            .map(|path| (path.clone(), src_path.clone()));
                    }
                }
            },
        }
    }

    outcome.is_valid = outcome.error_count == 0;
    outcome
}

// ═══════════════════════════════════════════════════════════════════════════════
// PER-BINDING MEMBER CHECKS
// ═══════════════════════════════════════════════════════════════════════════════

/// Check one binding's observer field against the resolved class.
/// Function bindings must target a method taking 0, 1, or 2 parameters; the
/// 2-parameter `(value, node)` form is only valid for node-initiated modes.
/// Field bindings must target a field, writable for modes that push into it.
fn check_binding(
    binding: &Binding,
    class: &ClassMemberTable,
    src_path: &str,
) -> Option<Diagnostic> {
    let field = &binding.observer_field;
    let mode = binding.mode();

    if binding.is_function_binding {
        let method = match class.method(field) {
            Some(method) => method,
            None => {
                return Some(diagnostics::vm_function_not_found(
                    src_path,
                    field,
                    &class.name,
                    binding.range,
                ));
            }
        };
        return match method.params {
            0 | 1 => None,
            2 if matches!(mode, BindingMode::OneWayTarget | BindingMode::TwoWay) => None,
            2 => Some(diagnostics::vm_function_unknown_signature(
                src_path,
                field,
                binding.range,
            )),
            params => Some(diagnostics::vm_function_wrong_arg_count(
                src_path,
                field,
                2,
                params,
                binding.range,
            )),
        };
    }

    match class.field(field) {
        None => {
            if class.method(field).is_some() {
                Some(diagnostics::vm_field_required(
                    src_path,
                    field,
                    &class.name,
                    binding.range,
                ))
            } else {
                Some(diagnostics::vm_field_not_found(
                    src_path,
                    field,
                    &class.name,
                    binding.range,
                ))
            }
        }
        Some(info) => {
            let needs_writable =
                matches!(mode, BindingMode::OneWayTarget | BindingMode::TwoWay);
            if needs_writable && !info.writable {
                Some(diagnostics::vm_field_not_writable(
                    src_path,
                    field,
                    &class.name,
                    binding.range,
                ))
            } else {
                None
            }
        }
    }
}
