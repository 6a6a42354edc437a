//! Module call rendering from blueprint templates
//!
//! Loads the blueprint's template text, recovers its variable schema,
//! maps the live resource onto it, and renders a `module` call plus the
//! governance tags the portal uses to track imported resources. Returns
//! `None` when no template text can be located, which the orchestrator
//! treats as the trigger for raw-resource fallback.

use tracing::debug;

use super::{BlockBuilder, hcl_value, quote};
use crate::naming::sanitize_name;
use crate::resource::ResourceDescriptor;
use crate::template::TemplateLoader;
use crate::variables::{DEFAULT_ENVIRONMENT, ENVIRONMENT_TAG, map_resource_variables};

/// Governance tag naming the blueprint a module call came from
pub const BLUEPRINT_TAG: &str = "armportal-blueprint";

/// Governance tag carrying the provisioning request that created the
/// resource; only emitted when already present on the resource
pub const REQUEST_ID_TAG: &str = "armportal-request-id";

/// Governance tag naming the owner
pub const OWNER_TAG: &str = "armportal-owner";

/// Owner recorded for resources brought in through import
pub const DEFAULT_OWNER: &str = "imported";

/// Prefix shared by all governance tags
const GOVERNANCE_TAG_PREFIX: &str = "armportal-";

/// Render a module call for the blueprint, or `None` when no template
/// text could be located.
pub fn render_module_config(
    loader: &TemplateLoader,
    blueprint_id: &str,
    resource: &ResourceDescriptor,
) -> Option<String> {
    let template = loader.load(blueprint_id)?;
    let schema = template.variables();
    if schema.is_empty() {
        debug!(blueprint_id, "template declares no variables");
    }
    let values = map_resource_variables(resource, &schema);
    let resource_name = sanitize_name(&resource.name);

    let mut block = BlockBuilder::new(format!("module \"{blueprint_id}_{resource_name}\""));
    block.attr("source", quote(&format!("../../modules/{blueprint_id}")));

    if !values.is_empty() {
        block.blank();
        for (name, value) in &values {
            block.attr(name, hcl_value(value));
        }
    }

    block.blank();
    block.raw("# ARM Portal tracking tags");
    block.nested("tags =", |tags| {
        let environment = resource.tag(ENVIRONMENT_TAG).unwrap_or(DEFAULT_ENVIRONMENT);
        tags.attr(ENVIRONMENT_TAG, quote(environment));
        tags.attr(BLUEPRINT_TAG, quote(blueprint_id));
        if let Some(request_id) = resource.tag(REQUEST_ID_TAG) {
            tags.attr(REQUEST_ID_TAG, quote(request_id));
        }
        let owner = resource.tag(OWNER_TAG).unwrap_or(DEFAULT_OWNER);
        tags.attr(OWNER_TAG, quote(owner));

        // Carry the resource's own tags, skipping governance keys
        // already written above
        for (key, value) in &resource.tags {
            if !key.starts_with(GOVERNANCE_TAG_PREFIX) {
                tags.attr(key, quote(value));
            }
        }
    });

    let mut out = String::new();
    out.push_str("# Import existing resource into Terraform management\n");
    out.push_str(&format!("# Generated using blueprint: {blueprint_id}\n\n"));
    out.push_str(&block.render());
    Some(out)
}
