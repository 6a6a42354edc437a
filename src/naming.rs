//! Naming - Sanitizing Azure display names into Terraform identifiers

/// Maximum length of a generated identifier
pub const MAX_NAME_LEN: usize = 64;

/// Sanitize an Azure display name into a valid Terraform identifier.
///
/// Lowercases the name, replaces every character outside `[a-z0-9_]` with
/// `_`, prefixes `r_` when the result would start with a digit, and
/// truncates to [`MAX_NAME_LEN`]. Idempotent: sanitizing an already
/// sanitized name is a no-op.
///
/// An empty input yields an empty output; Resource Graph never reports a
/// resource without a name, so the engine does not special-case it.
pub fn sanitize_name(name: &str) -> String {
    let mut sanitized: String = name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        sanitized.insert_str(0, "r_");
    }
    sanitized.truncate(MAX_NAME_LEN);
    sanitized
}
