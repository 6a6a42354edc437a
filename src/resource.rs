//! Resource - Descriptor for a resource discovered in Azure

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A live resource as returned by Azure Resource Graph.
///
/// The field names follow the Resource Graph JSON shape, so a descriptor
/// can be deserialized straight from a discovery response. The struct is
/// read-only input for one generation call; the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    /// Azure resource type in dotted namespace form
    /// (e.g., "Microsoft.Storage/storageAccounts"). Case-insensitive.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Display name of the resource
    pub name: String,
    /// Azure region (e.g., "westeurope")
    #[serde(default)]
    pub location: String,
    /// Resource group containing the resource
    #[serde(default)]
    pub resource_group: String,
    /// Free-form properties tree from Resource Graph
    #[serde(default)]
    pub properties: Value,
    /// Resource tags
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    /// Fully qualified Azure resource ID
    #[serde(default)]
    pub id: String,
    /// Subscription the resource lives in
    #[serde(default)]
    pub subscription_id: String,
}

impl ResourceDescriptor {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            location: String::new(),
            resource_group: String::new(),
            properties: Value::Null,
            tags: BTreeMap::new(),
            id: String::new(),
            subscription_id: String::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_resource_group(mut self, resource_group: impl Into<String>) -> Self {
        self.resource_group = resource_group.into();
        self
    }

    pub fn with_properties(mut self, properties: Value) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Look up a tag value by key
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}
