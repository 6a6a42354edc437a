//! Mapping - Static lookup tables for Azure resource types
//!
//! Two independent tables: Azure type -> azurerm resource type, and Azure
//! type -> blueprint module ID. A type can be generatable in raw form
//! without having a curated blueprint, so the blueprint table is a strict
//! subset by design.
//!
//! Lookups are exact after lowercase normalization. Unmapped types fail
//! closed; there is no prefix or fuzzy matching.

use std::collections::BTreeMap;

/// Production Azure -> azurerm resource type table
fn default_type_table() -> BTreeMap<String, String> {
    [
        // Storage
        ("microsoft.storage/storageaccounts", "azurerm_storage_account"),
        (
            "microsoft.storage/storageaccounts/blobservices",
            "azurerm_storage_blob",
        ),
        (
            "microsoft.storage/storageaccounts/fileservices",
            "azurerm_storage_share",
        ),
        (
            "microsoft.storage/storageaccounts/queueservices",
            "azurerm_storage_queue",
        ),
        (
            "microsoft.storage/storageaccounts/tableservices",
            "azurerm_storage_table",
        ),
        // Compute
        ("microsoft.compute/virtualmachines", "azurerm_virtual_machine"),
        ("microsoft.compute/disks", "azurerm_managed_disk"),
        ("microsoft.compute/snapshots", "azurerm_snapshot"),
        (
            "microsoft.compute/virtualmachinescalesets",
            "azurerm_virtual_machine_scale_set",
        ),
        // Container
        (
            "microsoft.containerinstance/containergroups",
            "azurerm_container_group",
        ),
        (
            "microsoft.containerregistry/registries",
            "azurerm_container_registry",
        ),
        ("microsoft.app/containerapps", "azurerm_container_app"),
        (
            "microsoft.app/managedenvironments",
            "azurerm_container_app_environment",
        ),
        // Networking
        ("microsoft.network/virtualnetworks", "azurerm_virtual_network"),
        (
            "microsoft.network/networkinterfaces",
            "azurerm_network_interface",
        ),
        ("microsoft.network/publicipaddresses", "azurerm_public_ip"),
        ("microsoft.network/loadbalancers", "azurerm_lb"),
        (
            "microsoft.network/networksecuritygroups",
            "azurerm_network_security_group",
        ),
        (
            "microsoft.network/applicationgateways",
            "azurerm_application_gateway",
        ),
        ("microsoft.network/frontdoors", "azurerm_frontdoor"),
        ("microsoft.cdn/profiles", "azurerm_cdn_profile"),
        ("microsoft.cdn/profiles/endpoints", "azurerm_cdn_endpoint"),
        // Database
        ("microsoft.sql/servers", "azurerm_mssql_server"),
        ("microsoft.sql/servers/databases", "azurerm_mssql_database"),
        (
            "microsoft.dbforpostgresql/flexibleservers",
            "azurerm_postgresql_flexible_server",
        ),
        (
            "microsoft.dbforpostgresql/flexibleservers/databases",
            "azurerm_postgresql_flexible_server_database",
        ),
        (
            "microsoft.dbformysql/flexibleservers",
            "azurerm_mysql_flexible_server",
        ),
        (
            "microsoft.documentdb/databaseaccounts",
            "azurerm_cosmosdb_account",
        ),
        // Key Vault
        ("microsoft.keyvault/vaults", "azurerm_key_vault"),
        ("microsoft.keyvault/vaults/secrets", "azurerm_key_vault_secret"),
        ("microsoft.keyvault/vaults/keys", "azurerm_key_vault_key"),
        (
            "microsoft.keyvault/vaults/certificates",
            "azurerm_key_vault_certificate",
        ),
        // Web
        ("microsoft.web/serverfarms", "azurerm_app_service_plan"),
        ("microsoft.web/sites", "azurerm_app_service"),
        ("microsoft.web/staticsites", "azurerm_static_site"),
        // Resource groups (both shapes Resource Graph reports)
        ("microsoft.resources/resourcegroups", "azurerm_resource_group"),
        (
            "microsoft.resources/subscriptions/resourcegroups",
            "azurerm_resource_group",
        ),
        // Monitoring
        ("microsoft.insights/components", "azurerm_application_insights"),
        (
            "microsoft.operationalinsights/workspaces",
            "azurerm_log_analytics_workspace",
        ),
        // Identity
        (
            "microsoft.managedidentity/userassignedidentities",
            "azurerm_user_assigned_identity",
        ),
    ]
    .into_iter()
    .map(|(azure, terraform)| (azure.to_string(), terraform.to_string()))
    .collect()
}

/// Production Azure -> blueprint module ID table
fn default_blueprint_table() -> BTreeMap<String, String> {
    [
        ("microsoft.storage/storageaccounts", "azure-storage-basic"),
        ("microsoft.keyvault/vaults", "azure-key-vault-basic"),
        ("microsoft.resources/resourcegroups", "azure-rg-basic"),
        (
            "microsoft.resources/subscriptions/resourcegroups",
            "azure-rg-basic",
        ),
        (
            "microsoft.dbforpostgresql/flexibleservers",
            "azure-postgres-flexible",
        ),
        ("microsoft.web/staticsites", "azure-static-site"),
        ("microsoft.containerinstance/containergroups", "azure-aci"),
        ("microsoft.cdn/profiles", "azure-frontdoor"),
    ]
    .into_iter()
    .map(|(azure, blueprint)| (azure.to_string(), blueprint.to_string()))
    .collect()
}

/// Maps Azure resource types to azurerm resource types.
///
/// The table is immutable after construction; tests can inject an
/// alternate table through [`TypeMapper::with_table`].
#[derive(Debug, Clone)]
pub struct TypeMapper {
    table: BTreeMap<String, String>,
}

impl TypeMapper {
    /// Mapper backed by the production table
    pub fn new() -> Self {
        Self::with_table(default_type_table())
    }

    /// Mapper backed by a caller-supplied table; keys must be lowercase
    pub fn with_table(table: BTreeMap<String, String>) -> Self {
        Self { table }
    }

    /// Resolve an Azure type (case-insensitive) to its azurerm type
    pub fn resolve(&self, azure_type: &str) -> Option<&str> {
        self.table
            .get(&azure_type.to_lowercase())
            .map(String::as_str)
    }

    pub fn is_supported(&self, azure_type: &str) -> bool {
        self.resolve(azure_type).is_some()
    }

    /// Sorted list of every supported Azure type, for error reporting
    pub fn supported_types(&self) -> Vec<String> {
        self.table.keys().cloned().collect()
    }
}

impl Default for TypeMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps Azure resource types to blueprint module IDs.
///
/// Resolving to `None` is the common case and means the type only
/// supports raw generation.
#[derive(Debug, Clone)]
pub struct BlueprintResolver {
    table: BTreeMap<String, String>,
}

impl BlueprintResolver {
    /// Resolver backed by the production table
    pub fn new() -> Self {
        Self::with_table(default_blueprint_table())
    }

    /// Resolver backed by a caller-supplied table; keys must be lowercase
    pub fn with_table(table: BTreeMap<String, String>) -> Self {
        Self { table }
    }

    /// Resolve an Azure type (case-insensitive) to a blueprint ID
    pub fn resolve(&self, azure_type: &str) -> Option<&str> {
        self.table
            .get(&azure_type.to_lowercase())
            .map(String::as_str)
    }
}

impl Default for BlueprintResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_case_insensitive() {
        let mapper = TypeMapper::new();
        assert_eq!(
            mapper.resolve("Microsoft.Storage/storageAccounts"),
            Some("azurerm_storage_account")
        );
        assert_eq!(
            mapper.resolve("MICROSOFT.STORAGE/STORAGEACCOUNTS"),
            Some("azurerm_storage_account")
        );
    }

    #[test]
    fn test_unmapped_type_fails_closed() {
        let mapper = TypeMapper::new();
        assert_eq!(mapper.resolve("Microsoft.Storage/storage"), None);
        assert_eq!(mapper.resolve(""), None);
        assert!(!mapper.is_supported("Microsoft.Unknown/things"));
    }

    #[test]
    fn test_supported_types_sorted_and_complete() {
        let mapper = TypeMapper::new();
        let types = mapper.supported_types();
        let mut sorted = types.clone();
        sorted.sort();
        assert_eq!(types, sorted);
        assert!(types.contains(&"microsoft.keyvault/vaults".to_string()));
        assert!(types.iter().all(|t| mapper.is_supported(t)));
    }

    #[test]
    fn test_blueprint_table_is_subset_of_type_table() {
        let mapper = TypeMapper::new();
        let resolver = BlueprintResolver::new();
        for azure_type in default_blueprint_table().keys() {
            assert!(mapper.is_supported(azure_type), "{azure_type} not mapped");
            assert!(resolver.resolve(azure_type).is_some());
        }
    }

    #[test]
    fn test_blueprint_resolution() {
        let resolver = BlueprintResolver::new();
        assert_eq!(
            resolver.resolve("Microsoft.KeyVault/vaults"),
            Some("azure-key-vault-basic")
        );
        // Supported for raw generation but intentionally blueprint-less
        assert_eq!(resolver.resolve("microsoft.network/virtualnetworks"), None);
    }

    #[test]
    fn test_injected_table() {
        let table = [("custom.vendor/widgets".to_string(), "custom_widget".to_string())]
            .into_iter()
            .collect();
        let mapper = TypeMapper::with_table(table);
        assert_eq!(mapper.resolve("Custom.Vendor/Widgets"), Some("custom_widget"));
        assert_eq!(mapper.resolve("microsoft.keyvault/vaults"), None);
    }
}
