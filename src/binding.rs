//! Binding data model and structural validation.

use serde::{Deserialize, Serialize};

use crate::markup::SourceRange;

// ═══════════════════════════════════════════════════════════════════════════════
// BINDING MODE
// ═══════════════════════════════════════════════════════════════════════════════

/// Data-flow direction of a binding. The delimiter pair in the attribute
/// value picks the mode; a `mode=` option can override it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BindingMode {
    /// class → node
    OneWaySource,
    /// node → class (includes function bindings)
    OneWayTarget,
    /// both directions
    TwoWay,
    /// one-time resolved value assignment
    Static,
    /// one-time inline code assignment
    Code,
    /// unresolved sentinel; never survives structural validation
    Invalid,
}

impl BindingMode {
    pub fn is_dynamic(self) -> bool {
        matches!(
            self,
            BindingMode::OneWaySource | BindingMode::OneWayTarget | BindingMode::TwoWay
        )
    }

    pub fn is_static(self) -> bool {
        matches!(self, BindingMode::Static | BindingMode::Code)
    }

    /// The `mode=` option name table. Case is folded by the caller.
    pub fn from_option_name(name: &str) -> Option<BindingMode> {
        match name {
            "onewaytarget" => Some(BindingMode::OneWayTarget),
            "twoway" => Some(BindingMode::TwoWay),
            "onewaysource" => Some(BindingMode::OneWaySource),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// BINDING
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingProperties {
    #[serde(rename = "type")]
    pub mode: Option<BindingMode>,
    pub transform_function: Option<String>,
    pub is_setting_initial_value: Option<bool>,
    pub is_firing_once: Option<bool>,
}

/// One parsed binding directive linking a markup element or interface field
/// to a member of the bound view-model class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    /// Element id the binding attaches to, or "top" for interface fields.
    pub node_id: String,
    /// Attribute carrying the binding, or the field id for top bindings.
    pub node_field: String,
    pub is_top_binding: bool,
    /// First segment of the dotted observer path. By convention only; the
    /// real target is resolved via `observer_field` against the class.
    pub observer_id: String,
    /// Dot-joined remainder of the observer path.
    pub observer_field: String,
    pub is_function_binding: bool,
    pub properties: BindingProperties,
    /// Original attribute value text. For Code mode, the literal payload.
    pub raw_value_text: String,
    pub line: u32,
    pub char: u32,
    pub range: SourceRange,
    pub is_valid: bool,
    pub error_message: Option<String>,
}

impl Binding {
    pub fn mode(&self) -> BindingMode {
        self.properties.mode.unwrap_or(BindingMode::Invalid)
    }

    /// Structural validation. Runs immediately after parsing, before any
    /// class information is available. A binding that fails here is dropped
    /// from the tag's binding list entirely.
    pub fn validate(&mut self) {
        if let Some(message) = self.error_message.clone() {
            self.is_valid = false;
            self.error_message = Some(message);
            return;
        }
        let mode = self.mode();
        if mode == BindingMode::Invalid {
            self.is_valid = false;
            self.error_message = Some("binding mode could not be resolved".to_string());
            return;
        }
        if mode.is_dynamic() && self.observer_field.is_empty() {
            self.is_valid = false;
            self.error_message = Some("binding does not declare an observer field".to_string());
            return;
        }
        self.is_valid = true;
    }

    /// Record a parse failure. The first recorded message wins; structural
    /// validation will reject the binding.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.error_message.is_none() {
            self.error_message = Some(message.into());
        }
    }
}
