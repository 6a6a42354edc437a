//! Generator - Orchestrating the generation pipeline
//!
//! Sequencing: resolve the target type (the only hard failure), sanitize
//! the name, attempt blueprint module generation when requested and a
//! blueprint is mapped, and fall back to a raw resource block otherwise.
//! Every recoverable condition degrades to the next-best strategy; a
//! call either fully succeeds or fully fails.

use serde::Serialize;
use tracing::debug;

use crate::emitter::{import_block, module_import_block, render_module_config, render_resource_config};
use crate::mapping::{BlueprintResolver, TypeMapper};
use crate::naming::sanitize_name;
use crate::resource::ResourceDescriptor;
use crate::template::TemplateLoader;

/// Label of the single resource inside every blueprint module
pub const MODULE_RESOURCE_LABEL: &str = "this";

/// Hard failures of a generation call
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The Azure type has no azurerm mapping. Carries the full supported
    /// catalog so the caller can present alternatives. An empty type
    /// string takes this path too; there is no panic path for bad input.
    #[error("Unsupported Azure resource type: {requested}")]
    UnsupportedType {
        requested: String,
        supported: Vec<String>,
    },
}

/// Output of a successful generation call. All text fields are
/// populated; there are no partial results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCode {
    /// Resolved azurerm resource type
    pub target_type: String,
    /// Sanitized Terraform identifier
    pub resource_name: String,
    /// Import block and configuration joined with a newline
    pub code: String,
    pub import_block: String,
    pub resource_config: String,
    /// Blueprint mapped for the type, when one exists (set even when the
    /// raw path was taken, so callers can surface the missing template)
    pub blueprint_id: Option<String>,
    /// Human-readable review guidance for the chosen path
    pub notes: Vec<String>,
}

/// Generation entry point. Stateless and immutable after construction;
/// one instance can serve any number of concurrent calls.
pub struct Generator {
    type_mapper: TypeMapper,
    blueprint_resolver: BlueprintResolver,
    template_loader: TemplateLoader,
}

impl Generator {
    /// Generator with production tables and template roots
    pub fn new() -> Self {
        Self {
            type_mapper: TypeMapper::new(),
            blueprint_resolver: BlueprintResolver::new(),
            template_loader: TemplateLoader::new(),
        }
    }

    pub fn with_type_mapper(mut self, type_mapper: TypeMapper) -> Self {
        self.type_mapper = type_mapper;
        self
    }

    pub fn with_blueprint_resolver(mut self, blueprint_resolver: BlueprintResolver) -> Self {
        self.blueprint_resolver = blueprint_resolver;
        self
    }

    pub fn with_template_loader(mut self, template_loader: TemplateLoader) -> Self {
        self.template_loader = template_loader;
        self
    }

    /// Generate an import block plus configuration for a discovered
    /// resource.
    ///
    /// With `use_modules` set, a type that maps to a blueprint gets a
    /// module call when its template can be loaded; otherwise the call
    /// degrades to a raw resource block. Only an unmapped type is an
    /// error.
    pub fn generate(
        &self,
        resource: &ResourceDescriptor,
        use_modules: bool,
    ) -> Result<GeneratedCode, GenerateError> {
        let Some(target_type) = self.type_mapper.resolve(&resource.resource_type) else {
            return Err(GenerateError::UnsupportedType {
                requested: resource.resource_type.clone(),
                supported: self.type_mapper.supported_types(),
            });
        };
        let target_type = target_type.to_string();
        let resource_name = sanitize_name(&resource.name);
        let blueprint_id = self
            .blueprint_resolver
            .resolve(&resource.resource_type)
            .map(str::to_string);

        debug!(
            resource_type = %resource.resource_type,
            %target_type,
            use_modules,
            blueprint = blueprint_id.as_deref(),
            "generating import code"
        );

        if use_modules && let Some(blueprint) = &blueprint_id {
            if let Some(resource_config) =
                render_module_config(&self.template_loader, blueprint, resource)
            {
                let module_name = format!("{blueprint}_{resource_name}");
                let import_block = module_import_block(
                    &module_name,
                    &target_type,
                    MODULE_RESOURCE_LABEL,
                    &resource.id,
                );
                return Ok(GeneratedCode {
                    code: format!("{import_block}\n{resource_config}"),
                    notes: module_notes(blueprint, &module_name, &target_type, &resource.id),
                    target_type,
                    resource_name,
                    import_block,
                    resource_config,
                    blueprint_id: blueprint_id.clone(),
                });
            }
            debug!(%blueprint, "blueprint template not found, falling back to raw resource");
        }

        let import_block = import_block(&target_type, &resource_name, &resource.id);
        let resource_config = render_resource_config(&target_type, resource);
        Ok(GeneratedCode {
            code: format!("{import_block}\n{resource_config}"),
            notes: raw_notes(),
            target_type,
            resource_name,
            import_block,
            resource_config,
            blueprint_id,
        })
    }

    /// Whether the type can be generated at all
    pub fn is_type_supported(&self, azure_type: &str) -> bool {
        self.type_mapper.is_supported(azure_type)
    }

    /// Sorted list of every supported Azure type
    pub fn supported_types(&self) -> Vec<String> {
        self.type_mapper.supported_types()
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

fn raw_notes() -> Vec<String> {
    [
        "Review the generated configuration carefully before applying",
        "Search for ****_UPDATE_**** placeholders and replace with actual values (passwords, keys, secrets, etc.)",
        "Additional properties may be required based on your resource configuration",
        "Run 'terraform import' first, then 'terraform plan' to validate the configuration",
    ]
    .map(String::from)
    .to_vec()
}

fn module_notes(
    blueprint_id: &str,
    module_name: &str,
    target_type: &str,
    resource_id: &str,
) -> Vec<String> {
    vec![
        format!("This resource uses the \"{blueprint_id}\" blueprint module"),
        format!("The import block targets the resource within the module (labeled '{MODULE_RESOURCE_LABEL}')"),
        "After placing this code in infra/environments/<env>/, run:".to_string(),
        String::new(),
        format!("1. terraform import 'module.{module_name}.{target_type}.{MODULE_RESOURCE_LABEL}' '{resource_id}'"),
        String::new(),
        "2. terraform plan - to verify the import matches the module configuration".to_string(),
        String::new(),
        "Review and adjust module variables to match your existing resource configuration".to_string(),
        "The module may create additional resources (diagnostic settings, role assignments, etc.)".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn generator_without_templates() -> Generator {
        Generator::new()
            .with_template_loader(TemplateLoader::with_roots([PathBuf::from(
                "/nonexistent/terragen-test",
            )]))
    }

    #[test]
    fn test_unsupported_type_carries_full_catalog() {
        let generator = generator_without_templates();
        let resource = ResourceDescriptor::new("Microsoft.Unknown/widgets", "w");

        let err = generator.generate(&resource, true).unwrap_err();
        let GenerateError::UnsupportedType { requested, supported } = err;
        assert_eq!(requested, "Microsoft.Unknown/widgets");
        assert_eq!(supported, generator.supported_types());
        assert!(!supported.is_empty());
    }

    #[test]
    fn test_empty_type_is_unsupported_not_a_panic() {
        let generator = generator_without_templates();
        let resource = ResourceDescriptor::new("", "nameless");
        assert!(matches!(
            generator.generate(&resource, true),
            Err(GenerateError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_code_is_import_plus_config() {
        let generator = generator_without_templates();
        let resource = ResourceDescriptor::new("Microsoft.Web/sites", "app")
            .with_location("westeurope")
            .with_resource_group("rg")
            .with_id("/subscriptions/s/sites/app");

        let generated = generator.generate(&resource, true).unwrap();
        assert_eq!(
            generated.code,
            format!("{}\n{}", generated.import_block, generated.resource_config)
        );
        assert_eq!(generated.target_type, "azurerm_app_service");
        // No blueprint exists for app services
        assert_eq!(generated.blueprint_id, None);
    }

    #[test]
    fn test_missing_template_falls_back_to_raw_shape() {
        let generator = generator_without_templates();
        let resource = ResourceDescriptor::new("Microsoft.Storage/storageAccounts", "stor")
            .with_location("westeurope")
            .with_resource_group("rg")
            .with_id("/subscriptions/s/storageAccounts/stor");

        let with_modules = generator.generate(&resource, true).unwrap();
        let without_modules = generator.generate(&resource, false).unwrap();

        assert_eq!(with_modules.import_block, without_modules.import_block);
        assert_eq!(with_modules.resource_config, without_modules.resource_config);
        assert_eq!(with_modules.notes, without_modules.notes);
        // The mapped blueprint is still reported on the fallback path
        assert_eq!(with_modules.blueprint_id.as_deref(), Some("azure-storage-basic"));
    }

    #[test]
    fn test_generator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Generator>();
    }
}
