//! # Binder Native — declarative data-binding compiler pass
//!
//! Scans component markup for the embedded binding micro-syntax, validates
//! each binding against the component's view-model class, and generates the
//! wiring functions for the component's code unit.
//!
//! ## Binding Invariants
//!
//! 1. **Mode Resolution**: a binding's mode is always resolved before it is
//!    considered for validation; the `Invalid` sentinel never survives the
//!    structural pass.
//!
//! 2. **Delimiter Table**: the delimiter → mode mapping is authoritative:
//!    `{…}` OneWaySource, `(…)` OneWayTarget, `[…]` TwoWay, `{:…}` Static,
//!    `{=…}` Code.
//!
//! 3. **Attachment**: `node_id`/`node_field` uniquely identify where a
//!    binding attaches; two bindings may share a `node_id` but each is tied
//!    to exactly one `node_field`.
//!
//! 4. **Id Uniqueness**: an id declared on a file must not collide with an
//!    id declared by any ancestor component in the same category (element
//!    ids and interface-field ids are checked separately).
//!
//! 5. **Stable Redaction**: redacted tag text is always the same length as
//!    the original, so column offsets computed after redaction stay valid.
//!
//! 6. **Deterministic Emission**: generated statements appear in binding
//!    traversal order (own bindings, then inherited), making output
//!    reproducible and last-write-wins behavior deterministic.
//!
//! ## Pipeline
//!
//! Per file: [`scan::scan_component`] drives [`parse`] over every attribute
//! and redacts matched tags via [`redact`]; once all files are scanned,
//! [`validate::validate_component`] runs the semantic checks against the
//! external [`validate::SymbolResolver`]; [`codegen`] then turns the
//! validated binding set into generated function bodies. Problems surface
//! exclusively as [`diagnostics::Diagnostic`] values, except the fatal
//! wrong-file-kind precondition.

pub mod binding;
pub mod codegen;
pub mod diagnostics;
pub mod markup;
pub mod parse;
pub mod redact;
pub mod scan;
pub mod validate;

#[cfg(test)]
mod parse_tests;

pub use binding::{Binding, BindingMode, BindingProperties};
pub use codegen::{
    generate_component_wiring, ComponentWiring, GeneratedFunction, GeneratedStatement,
    StatementSink, WiringInput,
};
pub use diagnostics::{Diagnostic, Severity};
pub use markup::{
    ComponentDocument, DocumentKind, MarkupAttribute, MarkupNode, SourceLocation, SourceRange,
};
pub use scan::{scan_component, scan_tag_ids, ScanError, ScanResult};
pub use validate::{
    validate_component, ClassMemberTable, ComponentDescriptor, SymbolResolver, ValidationOutcome,
};
