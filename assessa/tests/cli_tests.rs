use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Throwaway project directory with a seeded document store.
struct AssessaTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl AssessaTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let root = tmp.path().to_path_buf();
        Ok(Self { _tmp: tmp, root })
    }

    /// Env with framework `F1` holding the given domains in the default store.
    fn with_domains(ids: &[(&str, &str)]) -> Result<Self> {
        let env = Self::new()?;
        for (id, name) in ids {
            env.seed_domain(".assessa", "F1", id, name)?;
        }
        Ok(env)
    }

    fn seed_domain(&self, store: &str, framework: &str, id: &str, name: &str) -> Result<()> {
        let dir = self
            .root
            .join(store)
            .join("frameworks")
            .join(framework)
            .join("domains");
        std::fs::create_dir_all(&dir)?;
        let doc = serde_json::json!({ "id": id, "name": { "en": name } });
        std::fs::write(dir.join(format!("{id}.json")), serde_json::to_string(&doc)?)?;
        Ok(())
    }

    fn criteria_path(&self) -> PathBuf {
        self.root.join(".assessa/assessmentCriteria/F1.json")
    }

    fn read_json(path: &Path) -> Result<Value> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Missing document {}", path.display()))?;
        Ok(serde_json::from_str(&content)?)
    }

    fn assessa(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("assessa"));
        cmd.current_dir(&self.root)
            .env_remove("ASSESSA_STORE_ROOT")
            .env_remove("ASSESSA_GATEWAY_TIMEOUT_MS")
            .env_remove("ASSESSA_LOCALE");
        cmd
    }
}

#[test]
fn test_domains_lists_seeded_domains() -> Result<()> {
    let env = AssessaTestEnv::with_domains(&[("D1", "Governance"), ("D2", "Defense")])?;

    env.assessa()
        .args(["domains", "--framework", "F1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 domain(s)"))
        .stdout(predicate::str::contains("Governance"))
        .stdout(predicate::str::contains("Defense"));
    Ok(())
}

#[test]
fn test_show_without_criteria() -> Result<()> {
    let env = AssessaTestEnv::with_domains(&[("D1", "Governance")])?;

    env.assessa()
        .args(["show", "-f", "F1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No assessment criteria configured"));

    env.assessa()
        .args(["show", "-f", "F1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("null"));
    Ok(())
}

#[test]
fn test_configure_defaults_to_equal_percentage_weights() -> Result<()> {
    let env = AssessaTestEnv::with_domains(&[("D1", "A"), ("D2", "B"), ("D3", "C")])?;

    env.assessa()
        .args(["configure", "--framework", "F1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 1/3: type"))
        .stdout(predicate::str::contains("Step 3/3: preview"))
        .stdout(predicate::str::contains("Type: percentage"))
        .stdout(predicate::str::contains("saved"));

    let doc = AssessaTestEnv::read_json(&env.criteria_path())?;
    assert_eq!(doc["type"], "percentage");
    assert!(doc.get("levels").is_none());
    let weights: Vec<f64> = doc["domainWeights"]
        .as_array()
        .context("domainWeights should be an array")?
        .iter()
        .filter_map(|w| w["weight"].as_f64())
        .collect();
    assert_eq!(weights, vec![34.0, 33.0, 33.0]);
    Ok(())
}

#[test]
fn test_configure_compliance_then_show() -> Result<()> {
    let env = AssessaTestEnv::with_domains(&[("D1", "Governance"), ("D2", "Defense"), ("D3", "Resilience")])?;

    env.assessa()
        .args([
            "configure", "-f", "F1", "--type", "compliance",
            "--level", "30:Partial", "--level", "70:Largely", "--level", "100:Full",
            "--weight", "D1=50", "--weight", "D2=25", "--weight", "D3=25",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 2/4: levels"))
        .stdout(predicate::str::contains("Partial"))
        .stdout(predicate::str::contains("Total"));

    let doc = AssessaTestEnv::read_json(&env.criteria_path())?;
    assert_eq!(doc["frameworkId"], "F1");
    assert_eq!(doc["type"], "compliance");
    assert_eq!(doc["levels"][1]["label"]["en"], "Largely");
    assert_eq!(doc["domainWeights"][0]["domainId"], "D1");
    assert_eq!(doc["domainWeights"][0]["weight"], 50.0);

    env.assessa()
        .args(["show", "-f", "F1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Type: compliance"))
        .stdout(predicate::str::contains("Resilience"));

    env.assessa()
        .args(["show", "-f", "F1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"compliance\""));
    Ok(())
}

#[test]
fn test_configure_rejects_bad_weight_sum() -> Result<()> {
    let env = AssessaTestEnv::with_domains(&[("D1", "A"), ("D2", "B")])?;

    env.assessa()
        .args(["configure", "-f", "F1", "-w", "D1=70", "-w", "D2=20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[weightSum]"));

    assert!(!env.criteria_path().exists());
    Ok(())
}

#[test]
fn test_configure_maturity_requires_levels() -> Result<()> {
    let env = AssessaTestEnv::with_domains(&[("D1", "A")])?;

    env.assessa()
        .args(["configure", "-f", "F1", "--type", "maturity"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[noLevels]"));

    env.assessa()
        .args(["configure", "-f", "F1", "--type", "maturity", "-l", "50", "-l", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[levelOrder]"));
    Ok(())
}

#[test]
fn test_configure_without_domains_is_blocked() -> Result<()> {
    let env = AssessaTestEnv::new()?;

    env.assessa()
        .args(["configure", "-f", "F1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[noDomains]"));
    Ok(())
}

#[test]
fn test_configure_unknown_domain_fails() -> Result<()> {
    let env = AssessaTestEnv::with_domains(&[("D1", "A")])?;

    env.assessa()
        .args(["configure", "-f", "F1", "-w", "D9=100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("D9"));
    Ok(())
}

#[test]
fn test_delete_removes_criteria() -> Result<()> {
    let env = AssessaTestEnv::with_domains(&[("D1", "A")])?;

    env.assessa()
        .args(["delete", "-f", "F1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to delete"));

    env.assessa().args(["configure", "-f", "F1"]).assert().success();
    assert!(env.criteria_path().exists());

    env.assessa()
        .args(["delete", "-f", "F1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"));
    assert!(!env.criteria_path().exists());

    env.assessa()
        .args(["show", "-f", "F1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No assessment criteria configured"));
    Ok(())
}

#[test]
fn test_reconfigure_keeps_saved_weights_for_new_domains() -> Result<()> {
    let env = AssessaTestEnv::with_domains(&[("D1", "A"), ("D2", "B")])?;
    env.assessa()
        .args(["configure", "-f", "F1", "-w", "D1=80", "-w", "D2=20"])
        .assert()
        .success();

    // A new domain joins with weight 0; the saved split still sums to 100.
    env.seed_domain(".assessa", "F1", "D3", "C")?;
    env.assessa()
        .args(["configure", "-f", "F1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updating"));

    let doc = AssessaTestEnv::read_json(&env.criteria_path())?;
    assert_eq!(doc["domainWeights"][0]["weight"], 80.0);
    assert_eq!(doc["domainWeights"][2]["domainId"], "D3");
    assert_eq!(doc["domainWeights"][2]["weight"], 0.0);
    Ok(())
}

#[test]
fn test_settings_file_moves_the_store() -> Result<()> {
    let env = AssessaTestEnv::new()?;
    std::fs::write(env.root.join("assessa.yaml"), "store:\n  root: data/store\n")?;
    env.seed_domain("data/store", "F1", "D1", "A")?;

    env.assessa().args(["configure", "-f", "F1"]).assert().success();
    assert!(env.root.join("data/store/assessmentCriteria/F1.json").is_file());
    assert!(!env.criteria_path().exists());
    Ok(())
}

#[test]
fn test_env_override_wins_over_settings_file() -> Result<()> {
    let env = AssessaTestEnv::new()?;
    std::fs::write(env.root.join("assessa.yaml"), "store:\n  root: data/store\n")?;
    env.seed_domain("elsewhere", "F1", "D1", "A")?;

    env.assessa()
        .env("ASSESSA_STORE_ROOT", "elsewhere")
        .args(["configure", "-f", "F1"])
        .assert()
        .success();
    assert!(env.root.join("elsewhere/assessmentCriteria/F1.json").is_file());
    Ok(())
}

#[test]
fn test_invalid_settings_fail_fast() -> Result<()> {
    let env = AssessaTestEnv::with_domains(&[("D1", "A")])?;
    std::fs::write(env.root.join("assessa.yaml"), "gateway:\n  timeout_ms: 0\n")?;

    env.assessa().args(["show", "-f", "F1"]).assert().failure();
    Ok(())
}

#[test]
fn test_project_dir_flag() -> Result<()> {
    let env = AssessaTestEnv::with_domains(&[("D1", "A")])?;
    let elsewhere = tempfile::tempdir()?;

    Command::new(assert_cmd::cargo::cargo_bin!("assessa"))
        .current_dir(elsewhere.path())
        .env_remove("ASSESSA_STORE_ROOT")
        .args(["domains", "-f", "F1", "--project-dir"])
        .arg(&env.root)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 domain(s)"));
    Ok(())
}
