#[cfg(test)]
mod tests {
    use crate::binding::BindingMode;
    use crate::diagnostics::{
        ERR_COULD_NOT_PARSE_BINDING, ERR_COULD_NOT_PARSE_DETAILS, ERR_COULD_NOT_PARSE_MODE,
        ERR_MISSING_END_BRACKETS,
    };
    use crate::parse::{attribute_position, match_binding, parse_attribute, AttributeContext, BindingMatch};

    fn ctx<'a>(attr_name: &'a str, attr_value: &'a str, tag_text: &'a str) -> AttributeContext<'a> {
        AttributeContext {
            attr_name,
            attr_value,
            tag_text,
            tag_line: 0,
            tag_id: Some("btn"),
            is_top_tag: false,
            src_path: "components/Screen.xml",
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // DELIMITER → MODE TABLE
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_delimiter_mode_table() {
        assert_eq!(
            match_binding("{{vm.title}}"),
            BindingMatch::Body {
                mode: BindingMode::OneWaySource,
                body: "vm.title"
            }
        );
        assert_eq!(
            match_binding("{(vm.onClick())}"),
            BindingMatch::Body {
                mode: BindingMode::OneWayTarget,
                body: "vm.onClick()"
            }
        );
        assert_eq!(
            match_binding("{[vm.query]}"),
            BindingMatch::Body {
                mode: BindingMode::TwoWay,
                body: "vm.query"
            }
        );
        assert_eq!(
            match_binding("{{:vm.title}}"),
            BindingMatch::Body {
                mode: BindingMode::Static,
                body: "vm.title"
            }
        );
        assert_eq!(
            match_binding("{{=m.top.someVal}}"),
            BindingMatch::Body {
                mode: BindingMode::Code,
                body: "m.top.someVal"
            }
        );
    }

    #[test]
    fn test_plain_values_are_not_bindings() {
        assert_eq!(match_binding("hello"), BindingMatch::None);
        assert_eq!(match_binding("{hello}"), BindingMatch::None);
        assert_eq!(match_binding(""), BindingMatch::None);
        assert_eq!(match_binding("{"), BindingMatch::None);
    }

    #[test]
    fn test_unterminated_brackets() {
        assert_eq!(match_binding("{{vm.title"), BindingMatch::Unterminated);
        assert_eq!(match_binding("{(vm.onClick()"), BindingMatch::Unterminated);
        assert_eq!(match_binding("{[vm.query}"), BindingMatch::Unterminated);
        assert_eq!(match_binding("{{=code"), BindingMatch::Unterminated);
        // Mismatched inner/outer closers are unterminated, not reinterpreted.
        assert_eq!(match_binding("{(vm.x]}"), BindingMatch::Unterminated);
    }

    #[test]
    fn test_unterminated_emits_exactly_one_diagnostic() {
        let tag = "<Button\n  clicked=\"{(vm.onClick()\" />";
        let mut diagnostics = Vec::new();
        let binding = parse_attribute(&ctx("clicked", "{(vm.onClick()", tag), &mut diagnostics);
        assert!(binding.is_none());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, ERR_MISSING_END_BRACKETS);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // OBSERVER PATH
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_observer_path_split() {
        let tag = "<Label\n  text=\"{{vm.user.name}}\" />";
        let mut diagnostics = Vec::new();
        let binding = parse_attribute(&ctx("text", "{{vm.user.name}}", tag), &mut diagnostics)
            .expect("binding should parse");
        assert_eq!(binding.observer_id, "vm");
        assert_eq!(binding.observer_field, "user.name");
        assert!(!binding.is_function_binding);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_function_binding_suffix_is_stripped() {
        let tag = "<Button\n  clicked=\"{(vm.onClick())}\" />";
        let mut diagnostics = Vec::new();
        let binding = parse_attribute(&ctx("clicked", "{(vm.onClick())}", tag), &mut diagnostics)
            .expect("binding should parse");
        assert!(binding.is_function_binding);
        assert_eq!(binding.observer_field, "onClick");
        assert_eq!(binding.mode(), BindingMode::OneWayTarget);
    }

    #[test]
    fn test_missing_dot_is_a_hard_parse_error() {
        let tag = "<Label\n  text=\"{{title}}\" />";
        let mut diagnostics = Vec::new();
        let binding = parse_attribute(&ctx("text", "{{title}}", tag), &mut diagnostics);
        assert!(binding.is_none());
        let codes: Vec<u32> = diagnostics.iter().map(|d| d.code).collect();
        assert!(codes.contains(&ERR_COULD_NOT_PARSE_DETAILS));
        assert!(codes.contains(&ERR_COULD_NOT_PARSE_BINDING));
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // OPTIONS
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_mode_option_overrides_delimiters() {
        let tag = "<Label\n  text=\"{{vm.title, mode=twoWay}}\" />";
        let mut diagnostics = Vec::new();
        let binding = parse_attribute(
            &ctx("text", "{{vm.title, mode=twoWay}}", tag),
            &mut diagnostics,
        )
        .expect("binding should parse");
        assert_eq!(binding.mode(), BindingMode::TwoWay);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_mode_option_invalidates_binding() {
        let tag = "<Label\n  text=\"{{vm.title, mode=sideways}}\" />";
        let mut diagnostics = Vec::new();
        let binding = parse_attribute(
            &ctx("text", "{{vm.title, mode=sideways}}", tag),
            &mut diagnostics,
        );
        assert!(binding.is_none());
        let codes: Vec<u32> = diagnostics.iter().map(|d| d.code).collect();
        assert!(codes.contains(&ERR_COULD_NOT_PARSE_MODE));
    }

    #[test]
    fn test_transform_and_flag_options() {
        let value = "{{vm.title, transform=mc_toUpper, isSettingInitialValue=true, isFiringOnce=false}}";
        let tag = format!("<Label\n  text=\"{}\" />", value);
        let mut diagnostics = Vec::new();
        let binding =
            parse_attribute(&ctx("text", value, &tag), &mut diagnostics).expect("should parse");
        assert_eq!(
            binding.properties.transform_function.as_deref(),
            Some("mc_toUpper")
        );
        assert_eq!(binding.properties.is_setting_initial_value, Some(true));
        assert_eq!(binding.properties.is_firing_once, Some(false));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_option_keys_are_case_insensitive() {
        let value = "{{vm.title, MODE=ONEWAYTARGET, ISFIRINGONCE=TRUE}}";
        let tag = format!("<Label\n  text=\"{}\" />", value);
        let mut diagnostics = Vec::new();
        let binding =
            parse_attribute(&ctx("text", value, &tag), &mut diagnostics).expect("should parse");
        assert_eq!(binding.mode(), BindingMode::OneWayTarget);
        assert_eq!(binding.properties.is_firing_once, Some(true));
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CODE MODE
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_code_payload_is_verbatim() {
        let tag = "<Label\n  text=\"{{=m.top.someVal}}\" />";
        let mut diagnostics = Vec::new();
        let binding = parse_attribute(&ctx("text", "{{=m.top.someVal}}", tag), &mut diagnostics)
            .expect("binding should parse");
        assert_eq!(binding.mode(), BindingMode::Code);
        assert_eq!(binding.raw_value_text, "m.top.someVal");
        // Code payloads are never comma-split.
        assert_eq!(binding.observer_field, "");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_code_payload_keeps_commas() {
        let value = "{{=mc_getValue(1, 2)}}";
        let tag = format!("<Label\n  text=\"{}\" />", value);
        let mut diagnostics = Vec::new();
        let binding =
            parse_attribute(&ctx("text", value, &tag), &mut diagnostics).expect("should parse");
        assert_eq!(binding.raw_value_text, "mc_getValue(1, 2)");
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // POSITION
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_attribute_position_in_multiline_tag() {
        let tag = "<Label\n  id=\"title\"\n    text=\"{{vm.title}}\" />";
        assert_eq!(attribute_position(tag, 10, "text"), (12, 4));
        assert_eq!(attribute_position(tag, 10, "id"), (11, 2));
    }

    #[test]
    fn test_binding_records_position_and_range() {
        let tag = "<Label\n  text=\"{{vm.title}}\" />";
        let mut diagnostics = Vec::new();
        let binding = parse_attribute(&ctx("text", "{{vm.title}}", tag), &mut diagnostics)
            .expect("binding should parse");
        assert_eq!(binding.line, 1);
        assert_eq!(binding.char, 2);
        assert_eq!(binding.range.start.line, 1);
        assert_eq!(binding.range.start.column, 2);
        assert_eq!(binding.range.end.column, 2 + "text".len() as u32);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // TOP BINDINGS
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_top_binding_attaches_to_top() {
        let tag = "<field\n  id=\"title\"\n  value=\"{{vm.title}}\" />";
        let mut diagnostics = Vec::new();
        let binding = parse_attribute(
            &AttributeContext {
                attr_name: "value",
                attr_value: "{{vm.title}}",
                tag_text: tag,
                tag_line: 3,
                tag_id: Some("title"),
                is_top_tag: true,
                src_path: "components/Screen.xml",
            },
            &mut diagnostics,
        )
        .expect("binding should parse");
        assert!(binding.is_top_binding);
        assert_eq!(binding.node_id, "top");
        assert_eq!(binding.node_field, "title");
    }
}
