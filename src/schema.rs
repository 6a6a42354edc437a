//! Schema - Variable declarations recovered from blueprint templates
//!
//! Blueprints are authored externally and carry no machine-readable
//! manifest, so the declared parameters are recovered from the template
//! text itself. The grammar is deliberately narrow: a
//! `variable "name" { ... }` block whose body contains no nested braces,
//! with `type = <expr>` and optionally `default = <expr>` anywhere in the
//! body, each read to end of line. Anything else inside the block is
//! tolerated and ignored.
//!
//! Duplicate declarations are kept in appearance order; consumers that
//! look a name up get the first occurrence.

use std::sync::LazyLock;

use regex::Regex;

static VARIABLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"variable\s+"([^"]+)"\s*\{([^}]*)\}"#).expect("variable block pattern")
});

static TYPE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*type\s*=\s*(.+)$").expect("type attribute pattern"));

static DEFAULT_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*default\s*=\s*(.+)$").expect("default attribute pattern")
});

/// One declared blueprint parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclaration {
    pub name: String,
    /// Declared type expression, kept as raw text (e.g., "string",
    /// "list(string)"); the engine never interprets it
    pub type_expr: String,
    /// Default expression as raw text, `None` when the variable is required
    pub default: Option<String>,
}

/// Ordered set of parameters a blueprint declares
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableSchema {
    declarations: Vec<VariableDeclaration>,
}

impl VariableSchema {
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether any declaration carries this name
    pub fn declares(&self, name: &str) -> bool {
        self.declarations.iter().any(|decl| decl.name == name)
    }

    /// First declaration with this name
    pub fn get(&self, name: &str) -> Option<&VariableDeclaration> {
        self.declarations.iter().find(|decl| decl.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableDeclaration> {
        self.declarations.iter()
    }
}

/// Recover the variable declarations from template text.
///
/// Blocks without a `type` attribute do not match the grammar and are
/// skipped. Zero matches is a valid result: the blueprint simply takes
/// no parameters.
pub fn extract_variables(template: &str) -> VariableSchema {
    let mut declarations = Vec::new();

    for captures in VARIABLE_BLOCK.captures_iter(template) {
        let name = captures[1].trim().to_string();
        let body = &captures[2];

        let Some(type_expr) = TYPE_ATTR
            .captures(body)
            .map(|attr| attr[1].trim().to_string())
        else {
            continue;
        };

        let default = DEFAULT_ATTR
            .captures(body)
            .map(|attr| attr[1].trim().to_string());

        declarations.push(VariableDeclaration {
            name,
            type_expr,
            default,
        });
    }

    VariableSchema { declarations }
}
