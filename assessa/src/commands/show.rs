// assessa/src/commands/show.rs
//
// USE CASE: Display the saved assessment criteria of a framework.

use std::path::Path;

use super::AppContext;
use super::render::print_summary;

pub async fn execute(project_dir: &Path, framework: &str, json: bool) -> anyhow::Result<()> {
    let ctx = AppContext::load(project_dir)?;
    let criteria = ctx.gateway.load(framework).await?;

    if json {
        // 'null' when nothing is configured, so scripts can branch on it.
        println!("{}", serde_json::to_string_pretty(&criteria)?);
        return Ok(());
    }

    let Some(criteria) = criteria else {
        println!("ℹ️  No assessment criteria configured for framework '{}'.", framework);
        println!("👉 Run 'assessa configure --framework {}' to create one.", framework);
        return Ok(());
    };

    let domains = ctx.gateway.load_domains(framework).await?;
    println!("📋 Assessment criteria for framework '{}'", framework);
    println!("   Saved: {}", criteria.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    print_summary(
        criteria.criteria_type,
        criteria.levels.as_deref().unwrap_or_default(),
        &criteria.domain_weights,
        &domains,
        ctx.locale(),
    );
    Ok(())
}
