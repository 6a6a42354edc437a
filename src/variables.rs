//! Variables - Mapping live resource data onto a blueprint's schema
//!
//! Conservative by design: a mapping only fires when the schema declares
//! the target variable AND the source value exists on the resource.
//! Anything else is skipped silently, because schemas vary per blueprint
//! and resources vary per type. The mapper never invents a variable the
//! template did not declare.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::resource::ResourceDescriptor;
use crate::schema::VariableSchema;

/// Tag carrying the environment classification
pub const ENVIRONMENT_TAG: &str = "armportal-environment";

/// Environment used when the tag is absent
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Map a resource's name, tags, and properties onto the variables the
/// schema declares. Values keep their JSON types so the emitter can
/// render numbers and booleans unquoted.
pub fn map_resource_variables(
    resource: &ResourceDescriptor,
    schema: &VariableSchema,
) -> BTreeMap<String, Value> {
    let mut values = BTreeMap::new();

    // Common variables shared by most blueprints
    if schema.declares("project_name") {
        values.insert(
            "project_name".to_string(),
            Value::String(resource.name.clone()),
        );
    }
    if schema.declares("environment") {
        let environment = resource.tag(ENVIRONMENT_TAG).unwrap_or(DEFAULT_ENVIRONMENT);
        values.insert(
            "environment".to_string(),
            Value::String(environment.to_string()),
        );
    }
    if schema.declares("resource_group_name") {
        values.insert(
            "resource_group_name".to_string(),
            Value::String(resource.resource_group.clone()),
        );
    }
    if schema.declares("location") {
        values.insert(
            "location".to_string(),
            Value::String(resource.location.clone()),
        );
    }

    let properties = &resource.properties;

    // Storage accounts expose a combined "<tier>_<replication>" SKU name
    if properties.get("sku").is_some() || properties.get("accountType").is_some() {
        if schema.declares("account_tier") {
            let tier = properties
                .pointer("/sku/tier")
                .and_then(Value::as_str)
                .unwrap_or("Standard");
            values.insert("account_tier".to_string(), Value::String(tier.to_string()));
        }
        if schema.declares("replication_type") {
            let replication = properties
                .pointer("/sku/name")
                .and_then(Value::as_str)
                .map(strip_tier_prefix)
                .unwrap_or("LRS");
            values.insert(
                "replication_type".to_string(),
                Value::String(replication.to_string()),
            );
        }
    }

    // Key vault shape
    if let Some(sku_name) = properties.pointer("/sku/name").and_then(Value::as_str)
        && schema.declares("sku_name")
    {
        values.insert("sku_name".to_string(), Value::String(sku_name.to_string()));
    }
    if let Some(days) = properties.get("softDeleteRetentionInDays")
        && days.is_number()
        && schema.declares("soft_delete_retention_days")
    {
        values.insert("soft_delete_retention_days".to_string(), days.clone());
    }
    if let Some(purge) = properties.get("enablePurgeProtection")
        && !purge.is_null()
        && schema.declares("purge_protection_enabled")
    {
        values.insert("purge_protection_enabled".to_string(), purge.clone());
    }

    values
}

/// "Standard_GRS" -> "GRS"; names without a tier prefix pass through
fn strip_tier_prefix(sku_name: &str) -> &str {
    sku_name
        .strip_prefix("Standard_")
        .or_else(|| sku_name.strip_prefix("Premium_"))
        .unwrap_or(sku_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::extract_variables;
    use serde_json::json;

    fn storage_schema() -> VariableSchema {
        extract_variables(
            r#"
variable "project_name" { type = string }
variable "environment" { type = string }
variable "location" { type = string }
variable "account_tier" { type = string }
variable "replication_type" { type = string }
"#,
        )
    }

    #[test]
    fn test_common_variables() {
        let resource = ResourceDescriptor::new("Microsoft.Storage/storageAccounts", "mystor")
            .with_location("westeurope")
            .with_properties(json!({ "sku": { "name": "Standard_GRS", "tier": "Standard" } }));

        let values = map_resource_variables(&resource, &storage_schema());
        assert_eq!(values["project_name"], json!("mystor"));
        assert_eq!(values["environment"], json!("dev"));
        assert_eq!(values["location"], json!("westeurope"));
    }

    #[test]
    fn test_environment_from_tag() {
        let resource = ResourceDescriptor::new("Microsoft.Storage/storageAccounts", "mystor")
            .with_properties(json!({ "sku": { "name": "Standard_LRS" } }))
            .with_tag(ENVIRONMENT_TAG, "prod");

        let values = map_resource_variables(&resource, &storage_schema());
        assert_eq!(values["environment"], json!("prod"));
    }

    #[test]
    fn test_replication_derived_from_sku_name() {
        let resource = ResourceDescriptor::new("Microsoft.Storage/storageAccounts", "mystor")
            .with_properties(json!({ "sku": { "name": "Premium_ZRS" } }));

        let values = map_resource_variables(&resource, &storage_schema());
        assert_eq!(values["replication_type"], json!("ZRS"));
        // tier missing from the SKU object falls back to Standard
        assert_eq!(values["account_tier"], json!("Standard"));
    }

    #[test]
    fn test_only_declared_variables_emitted() {
        let schema = extract_variables(r#"variable "project_name" { type = string }"#);
        let resource = ResourceDescriptor::new("Microsoft.KeyVault/vaults", "kv")
            .with_location("northeurope")
            .with_properties(json!({ "sku": { "name": "standard" } }));

        let values = map_resource_variables(&resource, &schema);
        assert_eq!(values.len(), 1);
        assert!(values.contains_key("project_name"));
    }

    #[test]
    fn test_key_vault_shape() {
        let schema = extract_variables(
            r#"
variable "sku_name" { type = string }
variable "soft_delete_retention_days" { type = number }
variable "purge_protection_enabled" { type = bool }
"#,
        );
        let resource = ResourceDescriptor::new("Microsoft.KeyVault/vaults", "kv").with_properties(
            json!({
                "sku": { "name": "standard" },
                "softDeleteRetentionInDays": 90,
                "enablePurgeProtection": true
            }),
        );

        let values = map_resource_variables(&resource, &schema);
        assert_eq!(values["sku_name"], json!("standard"));
        assert_eq!(values["soft_delete_retention_days"], json!(90));
        assert_eq!(values["purge_protection_enabled"], json!(true));
    }

    #[test]
    fn test_missing_properties_skipped() {
        let schema = extract_variables(
            r#"
variable "soft_delete_retention_days" { type = number }
"#,
        );
        let resource = ResourceDescriptor::new("Microsoft.KeyVault/vaults", "kv");
        assert!(map_resource_variables(&resource, &schema).is_empty());
    }

    #[test]
    fn test_empty_schema_maps_nothing() {
        let resource = ResourceDescriptor::new("Microsoft.Storage/storageAccounts", "mystor")
            .with_properties(json!({ "sku": { "name": "Standard_LRS" } }));
        let values = map_resource_variables(&resource, &VariableSchema::default());
        assert!(values.is_empty());
    }
}
