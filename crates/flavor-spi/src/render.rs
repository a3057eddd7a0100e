//! Template rendering boundary for provisioning-script generation.
//!
//! Flavor and instance plugins that generate shell scripts or machine files
//! go through the [`Renderer`] trait; the composition core never renders
//! anything itself.

use crate::{Error, Result};
use regex::Regex;
use serde_json::Value;

/// Variable-scoped string interpolation over a set of bindings
pub trait Renderer: Send + Sync {
    /// Render `template` with the given bindings
    fn render(&self, template: &str, bindings: &Value) -> Result<String>;
}

/// Renderer substituting `{{ name }}` placeholders from a JSON bindings
/// object, with `{{ q /json/pointer }}` performing a structured lookup into
/// nested bindings.
pub struct BindingRenderer {
    placeholder: Regex,
}

impl BindingRenderer {
    /// Create a new renderer
    pub fn new() -> Self {
        Self {
            // Anything between double braces; the expression grammar is
            // resolved in `lookup`.
            placeholder: Regex::new(r"\{\{\s*([^{}]+?)\s*\}\}").unwrap(),
        }
    }

    fn lookup<'a>(&self, expression: &str, bindings: &'a Value) -> Result<&'a Value> {
        if let Some(pointer) = expression.strip_prefix("q ") {
            return bindings.pointer(pointer.trim()).ok_or_else(|| {
                Error::render(format!("query {:?} matched nothing", pointer.trim()))
            });
        }

        bindings
            .get(expression)
            .ok_or_else(|| Error::render(format!("no binding for variable {:?}", expression)))
    }
}

impl Default for BindingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for BindingRenderer {
    fn render(&self, template: &str, bindings: &Value) -> Result<String> {
        let mut output = String::with_capacity(template.len());
        let mut cursor = 0;

        for captures in self.placeholder.captures_iter(template) {
            let matched = captures.get(0).expect("capture 0 always present");
            let expression = captures.get(1).expect("capture 1 always present").as_str();

            output.push_str(&template[cursor..matched.start()]);
            match self.lookup(expression, bindings)? {
                Value::String(s) => output.push_str(s),
                other => output.push_str(&other.to_string()),
            }
            cursor = matched.end();
        }

        output.push_str(&template[cursor..]);
        Ok(output)
    }
}
