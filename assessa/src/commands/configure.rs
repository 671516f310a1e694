// assessa/src/commands/configure.rs
//
// USE CASE: Drive the criteria wizard from command-line arguments.
// Every step is validated exactly as in an interactive session.

use std::path::Path;

use anyhow::{Context, bail};
use tracing::debug;

use assessa_core::application::{NextOutcome, OpenOutcome, SaveOutcome};
use assessa_core::domain::criteria::{CriteriaLevel, CriteriaType, LocalizedText};
use assessa_core::domain::wizard::{DraftUpdate, WizardStep};
use assessa_core::CriteriaController;

use super::render::print_summary;
use super::{AppContext, report_errors};

pub struct ConfigureArgs {
    pub framework: String,
    pub criteria_type: CriteriaType,
    pub levels: Vec<String>,
    pub weights: Vec<String>,
    pub even: bool,
}

pub async fn execute(project_dir: &Path, args: ConfigureArgs) -> anyhow::Result<()> {
    let ctx = AppContext::load(project_dir)?;
    let locale = ctx.locale();
    let controller = CriteriaController::new(ctx.gateway, args.framework.as_str());

    // Parse before opening: bad input should not cost a round trip.
    let levels = args
        .levels
        .iter()
        .enumerate()
        .map(|(i, raw)| parse_level(raw, i))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let weights = args
        .weights
        .iter()
        .map(|raw| parse_weight(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;

    if controller.open_wizard().await != OpenOutcome::Opened {
        eprintln!("💥 Could not open the wizard for framework '{}':", args.framework);
        report_errors(&controller.snapshot().errors);
        std::process::exit(1);
    }

    if controller.has_criteria() {
        println!("✏️  Updating assessment criteria of framework '{}'", args.framework);
    } else {
        println!("🧭 Configuring assessment criteria of framework '{}'", args.framework);
    }

    controller.update_draft(DraftUpdate::SetType(args.criteria_type))?;
    if !levels.is_empty() {
        controller.update_draft(DraftUpdate::SetLevels(levels))?;
    }
    if args.even {
        controller.update_draft(DraftUpdate::DistributeEvenly)?;
    }
    for (domain_id, weight) in weights {
        controller.update_draft(DraftUpdate::SetDomainWeight(domain_id, weight))?;
    }

    loop {
        let snapshot = controller.snapshot();
        let step = snapshot.step.context("Wizard closed unexpectedly")?;
        let criteria_type = snapshot
            .draft
            .as_ref()
            .map_or(args.criteria_type, |draft| draft.criteria_type);
        if let Some(position) = step.position(criteria_type) {
            let total = WizardStep::path(criteria_type).len();
            println!("   Step {}/{}: {}", position, total, step);
        }
        if step == WizardStep::Preview {
            if let Some(draft) = &snapshot.draft {
                print_summary(
                    draft.criteria_type,
                    &draft.levels,
                    &draft.domain_weights,
                    &snapshot.domains,
                    locale,
                );
            }
        }

        match controller.go_to_next_step().await? {
            NextOutcome::Moved(next) => debug!(from = %step, to = %next, "Step validated"),
            NextOutcome::Blocked => {
                eprintln!("\n❌ Invalid configuration at step '{}':", step);
                report_errors(&controller.snapshot().errors);
                std::process::exit(1);
            }
            NextOutcome::Committed(SaveOutcome::Saved) => {
                println!("\n✨ Assessment criteria saved for framework '{}'", args.framework);
                return Ok(());
            }
            NextOutcome::Committed(outcome) => {
                eprintln!("\n💥 Criteria were not saved ({:?}):", outcome);
                report_errors(&controller.snapshot().errors);
                std::process::exit(1);
            }
        }
    }
}

/// Parses `VALUE[:LABEL]`. Unlabelled levels are named after their position.
fn parse_level(raw: &str, index: usize) -> anyhow::Result<CriteriaLevel> {
    let (value, label) = match raw.split_once(':') {
        Some((value, label)) if !label.trim().is_empty() => (value, label.trim().to_string()),
        Some((value, _)) => (value, format!("Level {}", index + 1)),
        None => (raw, format!("Level {}", index + 1)),
    };
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid level '{}': expected VALUE[:LABEL]", raw))?;
    Ok(CriteriaLevel::new(LocalizedText::english(label), value))
}

/// Parses `ID=WEIGHT`.
fn parse_weight(raw: &str) -> anyhow::Result<(String, f64)> {
    let Some((domain_id, weight)) = raw.split_once('=') else {
        bail!("Invalid weight '{}': expected ID=WEIGHT", raw);
    };
    let domain_id = domain_id.trim();
    if domain_id.is_empty() {
        bail!("Invalid weight '{}': missing domain id", raw);
    }
    let weight: f64 = weight
        .trim()
        .parse()
        .with_context(|| format!("Invalid weight '{}': '{}' is not a number", raw, weight))?;
    Ok((domain_id.to_string(), weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_parse_level_with_and_without_label() -> Result<()> {
        let labelled = parse_level("30:Partially compliant", 0)?;
        assert_eq!(labelled.value, 30.0);
        assert_eq!(labelled.label.en, "Partially compliant");

        let bare = parse_level(" 100 ", 2)?;
        assert_eq!(bare.value, 100.0);
        assert_eq!(bare.label.en, "Level 3");
        Ok(())
    }

    #[test]
    fn test_parse_level_rejects_garbage() {
        assert!(parse_level("high:High", 0).is_err());
        assert!(parse_level("", 0).is_err());
    }

    #[test]
    fn test_parse_weight() -> Result<()> {
        assert_eq!(parse_weight("D1=50")?, ("D1".to_string(), 50.0));
        assert_eq!(parse_weight(" D2 = 12.5 ")?, ("D2".to_string(), 12.5));
        assert!(parse_weight("D1").is_err());
        assert!(parse_weight("=50").is_err());
        assert!(parse_weight("D1=lots").is_err());
        Ok(())
    }
}
