//! Emitter - Rendering Terraform text from mapped resource data
//!
//! The public contract of each emitter is a single text blob, but blocks
//! are assembled through a small structured builder so ordering and
//! alignment live in one place and tests can assert on structure rather
//! than hand-counted whitespace.

mod import;
mod module;
mod raw;

pub use import::{import_block, module_import_block};
pub use module::render_module_config;
pub use raw::render_resource_config;

use serde_json::Value;

const INDENT: &str = "  ";

/// One line inside a block body
enum Line {
    /// `key = value`; keys in a contiguous run are padded to one width
    Attr(String, String),
    /// Verbatim text (comments); empty means a blank separator line
    Raw(String),
    /// Nested block with its own body
    Block(String, Vec<Line>),
}

/// Ordered builder for one HCL-shaped block
pub(crate) struct BlockBuilder {
    header: String,
    lines: Vec<Line>,
}

impl BlockBuilder {
    pub(crate) fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            lines: Vec::new(),
        }
    }

    pub(crate) fn attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.lines.push(Line::Attr(key.into(), value.into()));
    }

    pub(crate) fn raw(&mut self, line: impl Into<String>) {
        self.lines.push(Line::Raw(line.into()));
    }

    pub(crate) fn blank(&mut self) {
        self.lines.push(Line::Raw(String::new()));
    }

    pub(crate) fn nested(&mut self, header: impl Into<String>, build: impl FnOnce(&mut BlockBuilder)) {
        let mut child = BlockBuilder::new(header);
        build(&mut child);
        self.lines.push(Line::Block(child.header, child.lines));
    }

    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.header);
        out.push_str(" {\n");
        render_lines(&self.lines, 1, &mut out);
        out.push_str("}\n");
        out
    }
}

fn render_lines(lines: &[Line], depth: usize, out: &mut String) {
    let indent = INDENT.repeat(depth);
    let mut i = 0;

    while i < lines.len() {
        match &lines[i] {
            Line::Attr(..) => {
                // Pad keys across the contiguous attribute run
                let run_end = i + lines[i..]
                    .iter()
                    .take_while(|line| matches!(line, Line::Attr(..)))
                    .count();
                let width = lines[i..run_end]
                    .iter()
                    .map(|line| match line {
                        Line::Attr(key, _) => key.len(),
                        _ => 0,
                    })
                    .max()
                    .unwrap_or(0);
                for line in &lines[i..run_end] {
                    if let Line::Attr(key, value) = line {
                        out.push_str(&format!("{indent}{key:<width$} = {value}\n"));
                    }
                }
                i = run_end;
            }
            Line::Raw(text) => {
                if text.is_empty() {
                    out.push('\n');
                } else {
                    out.push_str(&format!("{indent}{text}\n"));
                }
                i += 1;
            }
            Line::Block(header, inner) => {
                out.push_str(&format!("{indent}{header} {{\n"));
                render_lines(inner, depth + 1, out);
                out.push_str(&format!("{indent}}}\n"));
                i += 1;
            }
        }
    }
}

pub(crate) fn quote(text: &str) -> String {
    format!("\"{text}\"")
}

/// Render a mapped variable value as an HCL expression. Strings that
/// look like booleans render bare, matching how operators write flag
/// variables; numbers and booleans render bare; everything else is
/// quoted.
pub(crate) fn hcl_value(value: &Value) -> String {
    match value {
        Value::String(s) if s == "true" || s == "false" => s.clone(),
        Value::String(s) => quote(s),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
