//! Redact - Replacing secret-shaped values before they reach generated text
//!
//! Every property value that ends up in emitted Terraform passes through
//! [`redact_properties`] first; the emitters have no other path to the
//! live properties tree. The walk is copy-on-write and never mutates its
//! input.

use serde_json::Value;

/// Substrings (lowercase) marking a property key as sensitive
const SENSITIVE_KEY_MARKERS: &[&str] = &[
    "password",
    "passwords",
    "secret",
    "secrets",
    "key",
    "keys",
    "connectionstring",
    "connectionstrings",
    "accesskey",
    "accesskeys",
    "token",
    "tokens",
    "credential",
    "credentials",
    "privatekey",
    "certificatepassword",
    "adminpassword",
    "administratorloginpassword",
];

/// True when the key, case-insensitively, contains any sensitive marker
pub fn is_sensitive_key(key: &str) -> bool {
    let key = key.to_lowercase();
    SENSITIVE_KEY_MARKERS.iter().any(|marker| key.contains(marker))
}

/// Placeholder token for a sensitive key, picked by the first marker
/// that matches in priority order
pub fn placeholder_for(key: &str) -> &'static str {
    let key = key.to_lowercase();

    if key.contains("password") {
        "****_UPDATE_PASSWORD_****"
    } else if key.contains("secret") {
        "****_UPDATE_SECRET_****"
    } else if key.contains("key") || key.contains("accesskey") {
        "****_UPDATE_KEY_****"
    } else if key.contains("connectionstring") {
        "****_UPDATE_CONNECTION_STRING_****"
    } else if key.contains("token") {
        "****_UPDATE_TOKEN_****"
    } else if key.contains("credential") {
        "****_UPDATE_CREDENTIAL_****"
    } else if key.contains("certificate") {
        "****_UPDATE_CERTIFICATE_****"
    } else {
        "****_UPDATE_SENSITIVE_VALUE_****"
    }
}

/// Return a copy of the properties tree with every sensitive-keyed value
/// replaced by its placeholder.
///
/// Recurses into objects and arrays under non-sensitive keys, so secrets
/// nested below innocuous parents are still caught. A sensitive key
/// masks its whole subtree. Scalars and `null` pass through unchanged.
pub fn redact_properties(properties: &Value) -> Value {
    match properties {
        Value::Object(map) => {
            let mut redacted = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                if is_sensitive_key(key) {
                    redacted.insert(key.clone(), Value::String(placeholder_for(key).to_string()));
                } else if value.is_object() || value.is_array() {
                    redacted.insert(key.clone(), redact_properties(value));
                } else {
                    redacted.insert(key.clone(), value.clone());
                }
            }
            Value::Object(redacted)
        }
        Value::Array(items) => Value::Array(items.iter().map(redact_properties).collect()),
        other => other.clone(),
    }
}
