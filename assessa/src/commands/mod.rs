// assessa/src/commands/mod.rs

pub mod configure;
pub mod delete;
pub mod domains;
pub mod render;
pub mod show;

use std::path::Path;
use std::sync::Arc;

use assessa_core::CriteriaGateway;
use assessa_core::domain::criteria::{ErrorField, Language, ValidationErrors};
use assessa_core::infrastructure::adapters::JsonFileStore;
use assessa_core::infrastructure::config::{Settings, load_settings};
use tracing::debug;

/// Settings plus a gateway wired to the on-disk document store.
pub struct AppContext {
    pub settings: Settings,
    pub gateway: CriteriaGateway,
}

impl AppContext {
    pub fn load(project_dir: &Path) -> anyhow::Result<Self> {
        // '?' converts InfrastructureError -> anyhow::Error
        let settings = load_settings(project_dir)?;
        let root = settings.store_root(project_dir);
        debug!(root = %root.display(), "Opening document store");

        let store = Arc::new(JsonFileStore::new(root));
        let gateway = CriteriaGateway::from_store(store).with_timeout(settings.gateway.timeout());
        Ok(Self { settings, gateway })
    }

    pub fn locale(&self) -> Language {
        self.settings.locale
    }
}

/// Prints validation errors to stderr, one line per key, with their stable codes.
pub fn report_errors(errors: &ValidationErrors) {
    for (field, key) in errors.iter() {
        let scope = match field {
            ErrorField::General => String::new(),
            other => format!("{}: ", other.as_str()),
        };
        eprintln!("   ❌ {}{} [{}]", scope, key, key.code());
    }
}
