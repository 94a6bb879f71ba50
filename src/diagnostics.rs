//! Diagnostic codes and construction helpers for the binding pass.
//!
//! Diagnostics are the sole channel for surfacing problems: parse and
//! validation failures never abort a file, they accumulate here and the
//! caller decides whether to proceed with code generation.

use serde::{Deserialize, Serialize};

use crate::markup::SourceRange;

// ═══════════════════════════════════════════════════════════════════════════════
// DIAGNOSTIC CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ERR_CORRUPT_ELEMENT: u32 = 6909;
pub const ERR_COULD_NOT_PARSE_BINDING: u32 = 6910;
pub const ERR_COULD_NOT_PARSE_DETAILS: u32 = 6911;
pub const ERR_COULD_NOT_PARSE_MODE: u32 = 6912;
pub const ERR_MISSING_END_BRACKETS: u32 = 6913;
pub const ERR_COULD_NOT_PARSE_TRANSFORM: u32 = 6913;
pub const ERR_COULD_NOT_PARSE_SETTING_INITIAL_VALUE: u32 = 6914;
pub const ERR_COULD_NOT_PARSE_FIRING_ONCE: u32 = 6915;
pub const ERR_DUPLICATE_TAG_ID: u32 = 6918;
pub const ERR_DUPLICATE_FIELD_ID: u32 = 6919;
pub const ERR_NO_VM_CLASS_DEFINED: u32 = 6921;
pub const ERR_VM_CLASS_NOT_FOUND: u32 = 6922;
pub const ERR_VM_FIELD_NOT_FOUND: u32 = 6923;
pub const ERR_VM_FUNCTION_NOT_FOUND: u32 = 6924;
pub const ERR_VM_FUNCTION_WRONG_ARG_COUNT: u32 = 6925;
pub const ERR_VM_FUNCTION_UNKNOWN_SIGNATURE: u32 = 6926;
pub const ERR_VM_FIELD_REQUIRED: u32 = 6934;

// ═══════════════════════════════════════════════════════════════════════════════
// DIAGNOSTIC TYPE
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: u32,
    pub severity: Severity,
    pub message: String,
    pub range: SourceRange,
    pub src_path: String,
}

impl Diagnostic {
    pub fn error(code: u32, message: impl Into<String>, range: SourceRange, src_path: &str) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            message: message.into(),
            range,
            src_path: src_path.to_string(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONSTRUCTION HELPERS
// ═══════════════════════════════════════════════════════════════════════════════

pub fn corrupt_element(src_path: &str) -> Diagnostic {
    Diagnostic::error(
        ERR_CORRUPT_ELEMENT,
        "Received corrupt markup element",
        SourceRange::default(),
        src_path,
    )
}

pub fn missing_end_brackets(src_path: &str, range: SourceRange) -> Diagnostic {
    Diagnostic::error(
        ERR_MISSING_END_BRACKETS,
        "Binding could not be parsed: Missing matching end brackets.",
        range,
        src_path,
    )
}

pub fn could_not_parse_binding(src_path: &str, message: &str, range: SourceRange) -> Diagnostic {
    Diagnostic::error(
        ERR_COULD_NOT_PARSE_BINDING,
        format!("Could not parse binding: {}", message),
        range,
        src_path,
    )
}

pub fn could_not_parse_details(src_path: &str, part_text: &str, range: SourceRange) -> Diagnostic {
    Diagnostic::error(
        ERR_COULD_NOT_PARSE_DETAILS,
        format!(
            "Could not parse binding details \"{}\" - expected \"observerId.fieldName\"",
            part_text
        ),
        range,
        src_path,
    )
}

pub fn could_not_parse_mode(src_path: &str, part_text: &str, range: SourceRange) -> Diagnostic {
    Diagnostic::error(
        ERR_COULD_NOT_PARSE_MODE,
        format!(
            "Could not parse binding mode \"{}\" - valid modes are 'oneWaySource', 'oneWayTarget' and 'twoWay'",
            part_text
        ),
        range,
        src_path,
    )
}

pub fn could_not_parse_transform(src_path: &str, part_text: &str, range: SourceRange) -> Diagnostic {
    Diagnostic::error(
        ERR_COULD_NOT_PARSE_TRANSFORM,
        format!("Could not parse transform function \"{}\"", part_text),
        range,
        src_path,
    )
}

pub fn could_not_parse_setting_initial_value(
    src_path: &str,
    part_text: &str,
    range: SourceRange,
) -> Diagnostic {
    Diagnostic::error(
        ERR_COULD_NOT_PARSE_SETTING_INITIAL_VALUE,
        format!("Could not parse isSettingInitialValue \"{}\"", part_text),
        range,
        src_path,
    )
}

pub fn could_not_parse_firing_once(src_path: &str, part_text: &str, range: SourceRange) -> Diagnostic {
    Diagnostic::error(
        ERR_COULD_NOT_PARSE_FIRING_ONCE,
        format!("Could not parse isFiringOnce \"{}\"", part_text),
        range,
        src_path,
    )
}

pub fn duplicate_tag_id(src_path: &str, id: &str) -> Diagnostic {
    Diagnostic::error(
        ERR_DUPLICATE_TAG_ID,
        format!(
            "An ancestor of this component already declares an element with id: {}",
            id
        ),
        SourceRange::default(),
        src_path,
    )
}

pub fn duplicate_field_id(src_path: &str, id: &str) -> Diagnostic {
    Diagnostic::error(
        ERR_DUPLICATE_FIELD_ID,
        format!(
            "An ancestor of this component already declares an interface field with id: {}",
            id
        ),
        SourceRange::default(),
        src_path,
    )
}

pub fn no_vm_class_defined(src_path: &str) -> Diagnostic {
    Diagnostic::error(
        ERR_NO_VM_CLASS_DEFINED,
        "This component has bindings but does not declare a view-model class. Add the 'vm' attribute, e.g. vm=\"fully.namespaced.ClassName\"",
        SourceRange::default(),
        src_path,
    )
}

pub fn vm_class_not_found(src_path: &str, class_name: &str) -> Diagnostic {
    Diagnostic::error(
        ERR_VM_CLASS_NOT_FOUND,
        format!("The view-model class \"{}\" was not found.", class_name),
        SourceRange::default(),
        src_path,
    )
}

pub fn vm_field_not_found(
    src_path: &str,
    field: &str,
    class_name: &str,
    range: SourceRange,
) -> Diagnostic {
    Diagnostic::error(
        ERR_VM_FIELD_NOT_FOUND,
        format!(
            "The bound field \"{}\" was not found in class \"{}\".",
            field, class_name
        ),
        range,
        src_path,
    )
}

pub fn vm_function_not_found(
    src_path: &str,
    field: &str,
    class_name: &str,
    range: SourceRange,
) -> Diagnostic {
    Diagnostic::error(
        ERR_VM_FUNCTION_NOT_FOUND,
        format!(
            "The event handling function \"{}\" was not found in class \"{}\".",
            field, class_name
        ),
        range,
        src_path,
    )
}

pub fn vm_function_wrong_arg_count(
    src_path: &str,
    field: &str,
    expected: u32,
    actual: u32,
    range: SourceRange,
) -> Diagnostic {
    Diagnostic::error(
        ERR_VM_FUNCTION_WRONG_ARG_COUNT,
        format!(
            "The event handling function \"{}\" is configured with the wrong number of params. Expected {} parameters; function declaration has {}",
            field, expected, actual
        ),
        range,
        src_path,
    )
}

pub fn vm_function_unknown_signature(src_path: &str, field: &str, range: SourceRange) -> Diagnostic {
    Diagnostic::error(
        ERR_VM_FUNCTION_UNKNOWN_SIGNATURE,
        format!(
            "The event handling function \"{}\" has an incorrect signature. Bindings can call functions as (), (value), (node), or (value, node)",
            field
        ),
        range,
        src_path,
    )
}

pub fn vm_field_not_writable(
    src_path: &str,
    field: &str,
    class_name: &str,
    range: SourceRange,
) -> Diagnostic {
    Diagnostic::error(
        ERR_VM_FIELD_REQUIRED,
        format!(
            "TwoWay and OneWayTarget bindings require a writable field; \"{}\" in class \"{}\" is read-only.",
            field, class_name
        ),
        range,
        src_path,
    )
}

pub fn vm_field_required(src_path: &str, field: &str, class_name: &str, range: SourceRange) -> Diagnostic {
    Diagnostic::error(
        ERR_VM_FIELD_REQUIRED,
        format!(
            "Field bindings are only available for view-model fields. Cannot bind to function \"{}\" in class \"{}\" without call syntax.",
            field, class_name
        ),
        range,
        src_path,
    )
}
