//! Raw resource rendering - best-effort generic blocks
//!
//! Used when no blueprint exists for a type or its template cannot be
//! found. The contract is "a safe, reviewable starting point", not a
//! working configuration: common fields, a small per-type translator
//! table, the resource's tags, and the redacted properties tree as a
//! trailing comment for the reviewer.

use serde_json::Value;

use super::{BlockBuilder, quote};
use crate::naming::sanitize_name;
use crate::redact::redact_properties;
use crate::resource::ResourceDescriptor;

/// Resource groups do not reference their own group
const RESOURCE_GROUP_TYPE: &str = "azurerm_resource_group";

/// Render a generic resource block for the mapped type.
///
/// All property values are redacted before any of them reach the output,
/// including the ones the translator table copies into attributes.
pub fn render_resource_config(target_type: &str, resource: &ResourceDescriptor) -> String {
    let resource_name = sanitize_name(&resource.name);
    let properties = redact_properties(&resource.properties);

    let mut block = BlockBuilder::new(format!(
        "resource \"{target_type}\" \"{resource_name}\""
    ));

    block.attr("name", quote(&resource.name));
    // Every supported type carries a location
    block.attr("location", quote(&resource.location));
    if target_type != RESOURCE_GROUP_TYPE {
        block.attr("resource_group_name", quote(&resource.resource_group));
    }

    let extra = type_specific_attrs(target_type, &properties);
    if !extra.is_empty() {
        block.blank();
        for (key, value) in extra {
            block.attr(key, value);
        }
    }

    if !resource.tags.is_empty() {
        block.blank();
        block.nested("tags =", |tags| {
            for (key, value) in &resource.tags {
                tags.attr(quote(key), quote(value));
            }
        });
    }

    block.blank();
    block.raw("# Additional properties may be required. Review Azure resource configuration:");
    block.raw("# Properties found:");
    let pretty = serde_json::to_string_pretty(&properties).unwrap_or_else(|_| "{}".to_string());
    for line in pretty.lines() {
        block.raw(format!("#   {line}"));
    }

    block.render()
}

/// Per-type attribute translators. Each entry only fires when its source
/// property exists; the table stays deliberately small because raw
/// output is a starting point for review.
fn type_specific_attrs(target_type: &str, properties: &Value) -> Vec<(String, String)> {
    let mut attrs = Vec::new();

    match target_type {
        "azurerm_key_vault" => {
            if let Some(tenant_id) = properties.get("tenantId").and_then(Value::as_str) {
                attrs.push(("tenant_id".to_string(), quote(tenant_id)));
            }
            if let Some(sku_name) = properties.pointer("/sku/name").and_then(Value::as_str) {
                attrs.push(("sku_name".to_string(), quote(&sku_name.to_lowercase())));
            }
            if let Some(days) = properties
                .get("softDeleteRetentionInDays")
                .and_then(Value::as_i64)
            {
                attrs.push(("soft_delete_retention_days".to_string(), days.to_string()));
            }
            if let Some(rbac) = properties
                .get("enableRbacAuthorization")
                .and_then(Value::as_bool)
            {
                attrs.push(("enable_rbac_authorization".to_string(), rbac.to_string()));
            }
            if let Some(access) = properties.get("publicNetworkAccess").and_then(Value::as_str) {
                attrs.push((
                    "public_network_access_enabled".to_string(),
                    (access == "Enabled").to_string(),
                ));
            }
        }
        "azurerm_storage_account" => {
            if let Some(sku_name) = properties.pointer("/sku/name").and_then(Value::as_str) {
                let (tier, replication) = sku_name.split_once('_').unwrap_or((sku_name, ""));
                attrs.push(("account_tier".to_string(), quote(tier)));
                attrs.push(("account_replication_type".to_string(), quote(replication)));
            }
            if let Some(kind) = properties.get("accountKind").and_then(Value::as_str) {
                attrs.push(("account_kind".to_string(), quote(kind)));
            }
        }
        _ => {}
    }

    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_common_fields_and_tags() {
        let resource = ResourceDescriptor::new("Microsoft.Network/virtualNetworks", "My-VNet")
            .with_location("westeurope")
            .with_resource_group("rg-net")
            .with_tag("team", "platform");

        let config = render_resource_config("azurerm_virtual_network", &resource);
        assert!(config.starts_with("resource \"azurerm_virtual_network\" \"my_vnet\" {"));
        assert!(config.contains("name                = \"My-VNet\""));
        assert!(config.contains("location            = \"westeurope\""));
        assert!(config.contains("resource_group_name = \"rg-net\""));
        assert!(config.contains("\"team\" = \"platform\""));
    }

    #[test]
    fn test_resource_group_omits_group_reference() {
        let resource = ResourceDescriptor::new("Microsoft.Resources/resourceGroups", "rg-prod")
            .with_location("westeurope");

        let config = render_resource_config("azurerm_resource_group", &resource);
        assert!(config.contains("location = \"westeurope\""));
        assert!(!config.contains("resource_group_name"));
    }

    #[test]
    fn test_storage_account_sku_split() {
        let resource = ResourceDescriptor::new("Microsoft.Storage/storageAccounts", "stor")
            .with_properties(json!({
                "sku": { "name": "Standard_GRS" },
                "accountKind": "StorageV2"
            }));

        let config = render_resource_config("azurerm_storage_account", &resource);
        assert!(config.contains("account_tier             = \"Standard\""));
        assert!(config.contains("account_replication_type = \"GRS\""));
        assert!(config.contains("account_kind             = \"StorageV2\""));
    }

    #[test]
    fn test_key_vault_attrs() {
        let resource = ResourceDescriptor::new("Microsoft.KeyVault/vaults", "kv")
            .with_properties(json!({
                "tenantId": "tenant-1",
                "sku": { "name": "Standard" },
                "softDeleteRetentionInDays": 90,
                "enableRbacAuthorization": true,
                "publicNetworkAccess": "Disabled"
            }));

        let config = render_resource_config("azurerm_key_vault", &resource);
        assert!(config.contains("tenant_id"));
        assert!(config.contains("= \"tenant-1\""));
        // SKU names are lowercased on the raw path
        assert!(config.contains("= \"standard\""));
        assert!(config.contains("soft_delete_retention_days"));
        assert!(config.contains("= 90"));
        // Widest key in the run, so it carries no padding
        assert!(config.contains("public_network_access_enabled = false"));
    }

    #[test]
    fn test_properties_comment_is_redacted() {
        let resource = ResourceDescriptor::new("Microsoft.KeyVault/vaults", "kv")
            .with_properties(json!({ "administratorLoginPassword": "p@ss" }));

        let config = render_resource_config("azurerm_key_vault", &resource);
        assert!(config.contains("# Properties found:"));
        assert!(config.contains("****_UPDATE_PASSWORD_****"));
        assert!(!config.contains("p@ss"));
    }
}
