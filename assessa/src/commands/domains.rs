// assessa/src/commands/domains.rs
//
// USE CASE: List the domains a configuration must weight.

use std::path::Path;

use super::AppContext;
use super::render::domains_table;

pub async fn execute(project_dir: &Path, framework: &str) -> anyhow::Result<()> {
    let ctx = AppContext::load(project_dir)?;
    let domains = ctx.gateway.load_domains(framework).await?;

    if domains.is_empty() {
        println!("⚠️  Framework '{}' has no domains.", framework);
        return Ok(());
    }

    println!("🗂️  {} domain(s) in framework '{}'", domains.len(), framework);
    println!("{}", domains_table(&domains, ctx.locale()));
    Ok(())
}
