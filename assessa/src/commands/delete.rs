// assessa/src/commands/delete.rs
//
// USE CASE: Remove a framework's assessment criteria.

use std::path::Path;

use assessa_core::CriteriaController;
use assessa_core::application::DeleteOutcome;

use super::{AppContext, report_errors};

pub async fn execute(project_dir: &Path, framework: &str, yes: bool) -> anyhow::Result<()> {
    let ctx = AppContext::load(project_dir)?;
    let controller = CriteriaController::new(ctx.gateway, framework);

    if !controller.refresh().await? {
        println!("ℹ️  Nothing to delete: framework '{}' has no assessment criteria.", framework);
        return Ok(());
    }

    controller.request_delete();
    if !yes {
        println!("⚠️  Deleting the assessment criteria of framework '{}'.", framework);
    }

    match controller.delete_criteria().await {
        DeleteOutcome::Deleted => {
            println!("🗑️  Assessment criteria deleted for framework '{}'", framework);
            Ok(())
        }
        DeleteOutcome::Failed | DeleteOutcome::Skipped => {
            eprintln!("💥 Delete failed:");
            report_errors(&controller.snapshot().errors);
            std::process::exit(1);
        }
    }
}
