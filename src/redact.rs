//! Source text redactor.
//!
//! After bindings are extracted, the binding syntax is blanked out of the
//! tag's literal text so the re-serialized markup is syntactically clean.
//! Every replacement preserves length, so column offsets of surrounding
//! attributes stay stable.

use regex::{Captures, Regex};

use crate::binding::{Binding, BindingMode};

const QUOTE: &str = r#"(?:"|')"#;

/// Pure redaction: returns a new string of the same length as `original`,
/// with every binding's `name = "value"` occurrence blanked to whitespace.
/// Whitespace runs between the tokens are kept verbatim so embedded
/// newlines survive.
pub fn redact(original: &str, bindings: &[Binding]) -> String {
    let mut text = original.to_string();
    for binding in bindings {
        let name = if binding.is_top_binding {
            "value"
        } else {
            binding.node_field.as_str()
        };
        let value_pattern = if binding.mode() == BindingMode::Code {
            // Code bindings stored only the payload; rebuild the literal
            // `{{=payload}}` wrapper for matching.
            format!(
                "{q}\\{{\\{{={}\\}}\\}}{q}",
                regex::escape(&binding.raw_value_text),
                q = QUOTE
            )
        } else {
            format!(
                "{q}{}{q}",
                regex::escape(&binding.raw_value_text),
                q = QUOTE
            )
        };
        let pattern = format!(
            r"({})(\s*)=(\s*)({})",
            regex::escape(name),
            value_pattern
        );
        let re = match Regex::new(&format!("(?i){}", pattern)) {
            Ok(re) => re,
            Err(_) => continue,
        };
        text = re
            .replace_all(&text, |caps: &Captures<'_>| {
                // The `=` is folded into the value blank, keeping length.
                format!(
                    "{}{}{}{}",
                    " ".repeat(caps[1].len()),
                    &caps[2],
                    &caps[3],
                    " ".repeat(caps[4].len() + 1)
                )
            })
            .into_owned();
    }
    if text.len() < original.len() {
        let missing = original.len() - text.len();
        text.push_str(&" ".repeat(missing));
    }
    text
}
