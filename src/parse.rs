//! Binding expression micro-parser.
//!
//! Turns one attribute name/value pair into a structured [`Binding`] or a
//! parse diagnostic. The grammar is a small delimiter language embedded in
//! attribute values:
//!
//! ```text
//! {{observerId.field}}            one-way-source   (class → node)
//! {(observerId.field())}          one-way-target   (node → class)
//! {[observerId.field]}            two-way
//! {{:observerId.field}}           static one-time assignment
//! {{=any.inline.code}}            verbatim code assignment
//! ```
//!
//! Non-code bodies are comma-separated: the first segment is the mandatory
//! dotted observer path, later segments are `key=value` options.

use crate::binding::{Binding, BindingMode, BindingProperties};
use crate::diagnostics::{self, Diagnostic};
use crate::markup::SourceRange;

// ═══════════════════════════════════════════════════════════════════════════════
// DELIMITER LEXER
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of matching an attribute value against the binding delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingMatch<'a> {
    /// Not binding syntax at all; the attribute is left alone.
    None,
    /// Opens like a binding but the matching end brackets never appear.
    Unterminated,
    /// A recognized binding body with its delimiter-inferred mode.
    Body { mode: BindingMode, body: &'a str },
}

/// Explicit delimiter matcher. The delimiter → mode table is authoritative:
/// `{…}` OneWaySource, `(…)` OneWayTarget, `[…]` TwoWay, `{:…}` Static,
/// `{=…}` Code; a recognized opener with a mismatched closer is reported as
/// unterminated.
pub fn match_binding(value: &str) -> BindingMatch<'_> {
    let bytes = value.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'{' {
        return BindingMatch::None;
    }
    let inner_open = bytes[1];

    // Static / code family: `{{:` or `{{=` closed by `}}`.
    if inner_open == b'{' && bytes.len() >= 3 && (bytes[2] == b':' || bytes[2] == b'=') {
        if bytes.len() >= 5 && value.ends_with("}}") {
            let mode = if bytes[2] == b':' {
                BindingMode::Static
            } else {
                BindingMode::Code
            };
            return BindingMatch::Body {
                mode,
                body: &value[3..value.len() - 2],
            };
        }
        return BindingMatch::Unterminated;
    }

    let (mode, expected_close) = match inner_open {
        b'{' => (BindingMode::OneWaySource, b'}'),
        b'(' => (BindingMode::OneWayTarget, b')'),
        b'[' => (BindingMode::TwoWay, b']'),
        _ => return BindingMatch::None,
    };
    if bytes.len() >= 4 && bytes[bytes.len() - 1] == b'}' && bytes[bytes.len() - 2] == expected_close
    {
        return BindingMatch::Body {
            mode,
            body: &value[2..value.len() - 2],
        };
    }
    BindingMatch::Unterminated
}

// ═══════════════════════════════════════════════════════════════════════════════
// ATTRIBUTE POSITION
// ═══════════════════════════════════════════════════════════════════════════════

/// Locate the attribute inside the tag's (possibly multi-line) literal text.
/// Returns the 0-based line and the column of the attribute name token.
pub fn attribute_position(tag_text: &str, tag_line: u32, attr_name: &str) -> (u32, u32) {
    for (index, line) in tag_text.split('\n').enumerate() {
        if let Some(column) = attribute_column(line, attr_name) {
            return (tag_line + index as u32, column);
        }
    }
    (tag_line, 0)
}

fn attribute_column(line: &str, attr_name: &str) -> Option<u32> {
    let trimmed = line.trim_start_matches([' ', '\t']);
    let indent = (line.len() - trimmed.len()) as u32;
    let rest = trimmed.strip_prefix(attr_name)?;
    let rest = rest.trim_start_matches([' ', '\t']);
    rest.starts_with('=').then_some(indent)
}

// ═══════════════════════════════════════════════════════════════════════════════
// ATTRIBUTE PARSER
// ═══════════════════════════════════════════════════════════════════════════════

/// Context for parsing one attribute of one tag.
#[derive(Debug, Clone, Copy)]
pub struct AttributeContext<'a> {
    pub attr_name: &'a str,
    pub attr_value: &'a str,
    pub tag_text: &'a str,
    pub tag_line: u32,
    pub tag_id: Option<&'a str>,
    pub is_top_tag: bool,
    pub src_path: &'a str,
}

/// Parse one attribute. Produces a structurally valid [`Binding`], or emits
/// diagnostics and returns `None`. Attributes that are not binding syntax
/// return `None` silently.
pub fn parse_attribute(
    ctx: &AttributeContext<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Binding> {
    let (mode, body) = match match_binding(ctx.attr_value) {
        BindingMatch::None => return None,
        BindingMatch::Unterminated => {
            let (line, column) = attribute_position(ctx.tag_text, ctx.tag_line, ctx.attr_name);
            diagnostics.push(diagnostics::missing_end_brackets(
                ctx.src_path,
                SourceRange::span(line, column, ctx.attr_name.len() as u32),
            ));
            return None;
        }
        BindingMatch::Body { mode, body } => (mode, body),
    };

    let (line, column) = attribute_position(ctx.tag_text, ctx.tag_line, ctx.attr_name);
    let range = SourceRange::span(line, column, ctx.attr_name.len() as u32);
    let tag_id = ctx.tag_id.unwrap_or("").to_string();

    let mut binding = Binding {
        node_id: if ctx.is_top_tag {
            "top".to_string()
        } else {
            tag_id.clone()
        },
        node_field: if ctx.is_top_tag {
            tag_id
        } else {
            ctx.attr_name.to_string()
        },
        is_top_binding: ctx.is_top_tag,
        properties: BindingProperties {
            mode: Some(mode),
            ..Default::default()
        },
        line,
        char: column,
        range,
        ..Default::default()
    };

    if mode == BindingMode::Code {
        // The payload is the literal text between `{{=` and `}}`: the raw
        // attribute value minus exactly 3 leading and 2 trailing characters.
        binding.raw_value_text = body.to_string();
    } else {
        for (index, part) in body.split(',').enumerate() {
            let part: String = part.chars().filter(|c| !c.is_whitespace()).collect();
            parse_binding_part(index, &part, &mut binding, ctx, range, diagnostics);
        }
        binding.raw_value_text = ctx.attr_value.to_string();
    }

    binding.validate();
    if binding.is_valid {
        Some(binding)
    } else {
        let message = binding
            .error_message
            .as_deref()
            .unwrap_or("unknown binding parse failure");
        diagnostics.push(diagnostics::could_not_parse_binding(
            ctx.src_path,
            message,
            range,
        ));
        None
    }
}

/// Parse one comma segment of a binding body. Segment 0 is the mandatory
/// dotted observer path; later segments are case-insensitive options.
fn parse_binding_part(
    index: usize,
    part_text: &str,
    binding: &mut Binding,
    ctx: &AttributeContext<'_>,
    range: SourceRange,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if index == 0 {
        let mut parts = part_text.split('.');
        let observer_id = parts.next().unwrap_or("");
        let observer_field = parts.collect::<Vec<_>>().join(".");
        if observer_field.is_empty() {
            diagnostics.push(diagnostics::could_not_parse_details(
                ctx.src_path,
                part_text,
                range,
            ));
            binding.fail(format!("could not parse binding details \"{}\"", part_text));
            return;
        }
        binding.observer_id = observer_id.to_string();
        binding.is_function_binding = observer_field.ends_with("()");
        binding.observer_field = observer_field
            .strip_suffix("()")
            .unwrap_or(&observer_field)
            .to_string();
        return;
    }

    let lower = part_text.to_lowercase();
    if let Some(value) = lower.strip_prefix("mode=") {
        match BindingMode::from_option_name(value) {
            Some(mode) => binding.properties.mode = Some(mode),
            None => {
                diagnostics.push(diagnostics::could_not_parse_mode(
                    ctx.src_path,
                    part_text,
                    range,
                ));
                binding.fail(format!("could not parse binding mode \"{}\"", part_text));
            }
        }
    } else if lower.starts_with("transform=") {
        let value = &part_text["transform=".len()..];
        if value.is_empty() {
            diagnostics.push(diagnostics::could_not_parse_transform(
                ctx.src_path,
                part_text,
                range,
            ));
            binding.fail(format!(
                "could not parse transform function \"{}\"",
                part_text
            ));
        } else {
            binding.properties.transform_function = Some(value.to_string());
        }
    } else if let Some(value) = lower.strip_prefix("issettinginitialvalue=") {
        if value.is_empty() {
            diagnostics.push(diagnostics::could_not_parse_setting_initial_value(
                ctx.src_path,
                part_text,
                range,
            ));
            binding.fail(format!(
                "could not parse isSettingInitialValue \"{}\"",
                part_text
            ));
        } else {
            binding.properties.is_setting_initial_value = Some(value == "true");
        }
    } else if let Some(value) = lower.strip_prefix("isfiringonce=") {
        if value.is_empty() {
            diagnostics.push(diagnostics::could_not_parse_firing_once(
                ctx.src_path,
                part_text,
                range,
            ));
            binding.fail(format!("could not parse isFiringOnce \"{}\"", part_text));
        } else {
            binding.properties.is_firing_once = Some(value == "true");
        }
    }
    // Unrecognized option keys are ignored for forward compatibility.
}
