//! Wiring code generator.
//!
//! Consumes a file's validated bindings (plus bindings inherited from every
//! ancestor component) and synthesizes the textual bodies of the generated
//! lifecycle functions: dynamic binding initialization, static binding
//! initialization, node-variable capture, and view-model construction.
//!
//! Every emitted statement carries the originating binding's source range,
//! so a downstream type error in generated code is attributed to the markup
//! attribute it came from, not to the generated text.

use serde::{Deserialize, Serialize};

use crate::binding::{Binding, BindingMode};
use crate::markup::SourceRange;
use crate::validate::SymbolResolver;

// ═══════════════════════════════════════════════════════════════════════════════
// GENERATED STATEMENT SINK
// ═══════════════════════════════════════════════════════════════════════════════

/// One generated statement plus the source position it maps back to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedStatement {
    pub text: String,
    pub range: SourceRange,
    pub src_path: String,
}

/// Narrow sink capability: anything that accepts positioned statements.
pub trait StatementSink {
    fn push_statement(&mut self, statement: GeneratedStatement);
}

/// A generated function body, ready for insertion into the component's
/// associated code unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFunction {
    pub name: String,
    pub statements: Vec<GeneratedStatement>,
    header: Vec<String>,
    footer: Vec<String>,
}

impl StatementSink for GeneratedFunction {
    fn push_statement(&mut self, statement: GeneratedStatement) {
        self.statements.push(statement);
    }
}

impl GeneratedFunction {
    fn new(name: &str) -> Self {
        GeneratedFunction {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Render the function as plain text. Statement order is exactly the
    /// order they were pushed; output is fully deterministic.
    pub fn render(&self) -> String {
        let mut out = format!("function {}()\n", self.name);
        for line in &self.header {
            out.push_str(line);
            out.push('\n');
        }
        for statement in &self.statements {
            out.push_str(&statement.text);
            out.push('\n');
        }
        for line in &self.footer {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("end function\n");
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// GENERATOR INPUT
// ═══════════════════════════════════════════════════════════════════════════════

/// Everything the generator needs for one component file. Ancestor bindings
/// and tag ids arrive pre-flattened in ancestor-chain order.
#[derive(Debug, Clone, Copy)]
pub struct WiringInput<'a> {
    pub src_path: &'a str,
    pub vm_class_name: Option<&'a str>,
    pub bindings: &'a [Binding],
    pub ancestor_bindings: &'a [Binding],
    pub tag_ids: &'a [String],
    pub ancestor_tag_ids: &'a [String],
}

impl<'a> WiringInput<'a> {
    /// Own bindings first, then inherited ones, each list keeping its own
    /// internal order.
    fn all_bindings(&self) -> impl Iterator<Item = &'a Binding> {
        self.bindings.iter().chain(self.ancestor_bindings.iter())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PER-BINDING STATEMENTS
// ═══════════════════════════════════════════════════════════════════════════════

fn node_ref(binding: &Binding) -> String {
    if binding.is_top_binding {
        "m.top".to_string()
    } else {
        format!("m.{}", binding.node_id)
    }
}

/// Render the options literal threaded into the runtime bind call. Fixed
/// key order keeps output reproducible; absent options collapse to
/// `invalid`.
fn options_literal(binding: &Binding) -> String {
    let mut parts = Vec::new();
    if let Some(ref transform) = binding.properties.transform_function {
        parts.push(format!("transform: {}", transform));
    }
    if let Some(value) = binding.properties.is_setting_initial_value {
        parts.push(format!("isSettingInitialValue: {}", value));
    }
    if let Some(value) = binding.properties.is_firing_once {
        parts.push(format!("isFiringOnce: {}", value));
    }
    if binding.is_function_binding {
        parts.push("isFunction: true".to_string());
    }
    if parts.is_empty() {
        "invalid".to_string()
    } else {
        format!("{{ {} }}", parts.join(", "))
    }
}

/// Statement establishing the live connection for one dynamic binding.
pub fn binding_init_statement(binding: &Binding) -> String {
    let node = node_ref(binding);
    let options = options_literal(binding);
    match binding.mode() {
        BindingMode::OneWaySource => format!(
            "mx_bindVMField(vm, \"{}\", {}, \"{}\", {})",
            binding.observer_field, node, binding.node_field, options
        ),
        BindingMode::OneWayTarget => format!(
            "mx_bindNodeField({}, \"{}\", vm, \"{}\", {})",
            node, binding.node_field, binding.observer_field, options
        ),
        BindingMode::TwoWay => format!(
            "mx_bindTwoWay(vm, \"{}\", {}, \"{}\", {})",
            binding.observer_field, node, binding.node_field, options
        ),
        _ => String::new(),
    }
}

/// One-time assignment for a static or code binding.
pub fn binding_static_statement(binding: &Binding) -> String {
    let node = node_ref(binding);
    match binding.mode() {
        BindingMode::Static => {
            let value = format!("vm.{}", binding.observer_field);
            let value = match binding.properties.transform_function {
                Some(ref transform) => format!("{}({})", transform, value),
                None => value,
            };
            format!("{}.{} = {}", node, binding.node_field, value)
        }
        BindingMode::Code => format!(
            "{}.{} = {}",
            node, binding.node_field, binding.raw_value_text
        ),
        _ => String::new(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// GENERATED FUNCTIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// `m_initBindings`: establishes every dynamic binding, then invokes the
/// view model's optional `onBindingsConfigured` hook. Everything is guarded
/// on a view-model instance being present.
pub fn binding_init_function(input: &WiringInput<'_>) -> GeneratedFunction {
    let mut func = GeneratedFunction::new("m_initBindings");
    func.header.push("  if m.vm <> invalid".to_string());
    func.header.push("    vm = m.vm".to_string());
    for binding in input.all_bindings().filter(|b| b.mode().is_dynamic()) {
        func.push_statement(GeneratedStatement {
            text: format!("    {}", binding_init_statement(binding)),
            range: binding.range,
            src_path: input.src_path.to_string(),
        });
    }
    func.footer
        .push("    if vm.onBindingsConfigured <> invalid".to_string());
    func.footer.push("      vm.onBindingsConfigured()".to_string());
    func.footer.push("    end if".to_string());
    func.footer.push("  end if".to_string());
    func
}

/// `m_initStaticBindings`: one-time assignments for static and code
/// bindings, under the same view-model-present guard.
pub fn static_binding_init_function(input: &WiringInput<'_>) -> GeneratedFunction {
    let mut func = GeneratedFunction::new("m_initStaticBindings");
    func.header.push("  if m.vm <> invalid".to_string());
    func.header.push("    vm = m.vm".to_string());
    for binding in input.all_bindings().filter(|b| b.mode().is_static()) {
        func.push_statement(GeneratedStatement {
            text: format!("    {}", binding_static_statement(binding)),
            range: binding.range,
            src_path: input.src_path.to_string(),
        });
    }
    func.footer.push("  end if".to_string());
    func
}

/// `m_createNodeVars`: caches a local reference for every element id this
/// file or any ancestor declares, so generated binding code can refer to
/// nodes without repeated lookups. Ancestor ids come first.
pub fn node_vars_function(input: &WiringInput<'_>) -> GeneratedFunction {
    let mut func = GeneratedFunction::new("m_createNodeVars");
    let mut ids: Vec<&str> = Vec::new();
    for id in input.ancestor_tag_ids.iter().chain(input.tag_ids.iter()) {
        if !ids.contains(&id.as_str()) {
            ids.push(id);
        }
    }
    if !ids.is_empty() {
        let quoted: Vec<String> = ids.iter().map(|id| format!("\"{}\"", id)).collect();
        func.header
            .push(format!("  for each id in [{}]", quoted.join(",")));
        func.header.push("    m[id] = m.top.findNode(id)".to_string());
        func.header.push("  end for".to_string());
    }
    func
}

/// `m_createVM`: synthesized view-model constructor for components without
/// a user-authored one. Returns `None` (and logs) when the class cannot be
/// resolved; sibling generation steps proceed regardless.
pub fn vm_constructor_function(
    input: &WiringInput<'_>,
    resolver: &dyn SymbolResolver,
) -> Option<GeneratedFunction> {
    let class_name = match input.vm_class_name {
        Some(name) => name,
        None => return None,
    };
    if resolver.resolve_class(class_name).is_none() {
        tracing::error!(
            class = class_name,
            src_path = input.src_path,
            "view-model class not found; skipping constructor generation"
        );
        return None;
    }
    let mut func = GeneratedFunction::new("m_createVM");
    func.header
        .push(format!("  m.vm = {}()", class_name.replace('.', "_")));
    func.header.push("  m.vm.initialize()".to_string());
    func.header.push("  m_initBindings()".to_string());
    Some(func)
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPONENT WIRING
// ═══════════════════════════════════════════════════════════════════════════════

/// Full set of generated fragments for one component file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentWiring {
    pub binding_init: Option<GeneratedFunction>,
    pub static_binding_init: Option<GeneratedFunction>,
    pub node_vars: GeneratedFunction,
    pub vm_constructor: Option<GeneratedFunction>,
}

/// Generate everything for one component. The two binding initializers are
/// only produced when the file (or its ancestors) actually has bindings.
pub fn generate_component_wiring(
    input: &WiringInput<'_>,
    resolver: &dyn SymbolResolver,
) -> ComponentWiring {
    let has_bindings = input.all_bindings().next().is_some();
    ComponentWiring {
        binding_init: has_bindings.then(|| binding_init_function(input)),
        static_binding_init: has_bindings.then(|| static_binding_init_function(input)),
        node_vars: node_vars_function(input),
        vm_constructor: vm_constructor_function(input, resolver),
    }
}
