//! Import block rendering
//!
//! A two-line `import` block binding a live Azure resource ID to a
//! Terraform address. Which address form to use is the orchestrator's
//! decision; both entry points are purely textual.

use super::{BlockBuilder, quote};

/// Import block for a bare resource address (`<type>.<name>`)
pub fn import_block(target_type: &str, resource_name: &str, resource_id: &str) -> String {
    render(format!("{target_type}.{resource_name}"), resource_id)
}

/// Import block for a resource inside a module
/// (`module.<module>.<type>.<label>`)
pub fn module_import_block(
    module_name: &str,
    target_type: &str,
    resource_label: &str,
    resource_id: &str,
) -> String {
    render(
        format!("module.{module_name}.{target_type}.{resource_label}"),
        resource_id,
    )
}

fn render(address: String, resource_id: &str) -> String {
    let mut block = BlockBuilder::new("import");
    block.attr("to", address);
    block.attr("id", quote(resource_id));
    block.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_block() {
        let block = import_block(
            "azurerm_storage_account",
            "my_storage",
            "/subscriptions/sub-1/.../my-storage",
        );
        assert_eq!(
            block,
            "import {\n  to = azurerm_storage_account.my_storage\n  id = \"/subscriptions/sub-1/.../my-storage\"\n}\n"
        );
    }

    #[test]
    fn test_module_import_block() {
        let block = module_import_block(
            "azure-storage-basic_my_storage",
            "azurerm_storage_account",
            "this",
            "/subscriptions/sub-1/.../my-storage",
        );
        assert!(block.contains(
            "to = module.azure-storage-basic_my_storage.azurerm_storage_account.this"
        ));
    }
}
