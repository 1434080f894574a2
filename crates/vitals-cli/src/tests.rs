//! CLI command tests

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;
use vitals_core::{FinancialSnapshot, MemoryStore, NewBudget};

use crate::cli::{Cli, Commands};
use crate::commands;

const DEFAULT_WEIGHTS: &str = r#"
[weights]
emergency_fund = 0.25
savings_rate = 0.20
debt_to_income = 0.25
spending_ratio = 0.20
goal_progress = 0.10
"#;

/// Write a config file so tests never depend on the user's data dir
fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("scoring.toml");
    fs::write(&path, content).unwrap();
    path
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_score_flags() {
    let cli = Cli::try_parse_from([
        "vitals",
        "score",
        "--income",
        "5000",
        "--expenses",
        "4000",
        "--balance",
        "-250",
        "--goal",
        "2500:10000",
        "--goal",
        "100:200",
        "--json",
    ])
    .unwrap();

    match cli.command {
        Commands::Score {
            income,
            balance,
            goals,
            json,
            input,
            ..
        } => {
            assert_eq!(income, 5000.0);
            assert_eq!(balance, -250.0);
            assert_eq!(goals, vec!["2500:10000", "100:200"]);
            assert!(json);
            assert!(input.is_none());
        }
        _ => panic!("expected score command"),
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["vitals", "config", "--config", "custom.toml", "-v"]).unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
}

#[test]
fn test_parse_serve_defaults() {
    let cli = Cli::try_parse_from(["vitals", "serve", "--allow-origin", "http://localhost:5173"])
        .unwrap();
    match cli.command {
        Commands::Serve {
            port,
            host,
            data,
            allow_origins,
        } => {
            assert_eq!(port, 3000);
            assert_eq!(host, "127.0.0.1");
            assert!(data.is_none());
            assert_eq!(allow_origins, vec!["http://localhost:5173"]);
        }
        _ => panic!("expected serve command"),
    }
}

// ========== Score Command Tests ==========

#[test]
fn test_parse_goal() {
    let goal = commands::parse_goal("2500:10000").unwrap();
    assert_eq!(goal.current_amount, 2500.0);
    assert_eq!(goal.target_amount, 10000.0);

    let goal = commands::parse_goal(" 1.5 : 3 ").unwrap();
    assert_eq!(goal.current_amount, 1.5);

    assert!(commands::parse_goal("2500").is_err());
    assert!(commands::parse_goal("abc:100").is_err());
    assert!(commands::parse_goal("100:").is_err());
}

#[test]
fn test_read_input_defaults_missing_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("input.json");
    fs::write(
        &path,
        r#"{"snapshot": {"income": 5000, "expenses": 4000}, "goals": [{"currentAmount": 1, "targetAmount": 4}]}"#,
    )
    .unwrap();

    let input = commands::read_input(&path).unwrap();
    assert_eq!(input.snapshot.income, 5000.0);
    assert_eq!(input.snapshot.savings, 0.0);
    assert_eq!(input.goals.len(), 1);
    assert_eq!(input.goals[0].progress(), 0.25);
}

#[test]
fn test_read_input_errors() {
    let dir = TempDir::new().unwrap();
    assert!(commands::read_input(&dir.path().join("missing.json")).is_err());

    let path = dir.path().join("bad.json");
    fs::write(&path, "not json").unwrap();
    assert!(commands::read_input(&path).is_err());
}

#[test]
fn test_cmd_score_from_flags() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, DEFAULT_WEIGHTS);

    let snapshot = FinancialSnapshot::new(5000.0, 4000.0, 1000.0, 2000.0);
    let goals = vec!["2500:10000".to_string()];
    assert!(commands::cmd_score(Some(config.as_path()), snapshot, &goals, None, false).is_ok());
    assert!(commands::cmd_score(Some(config.as_path()), snapshot, &goals, None, true).is_ok());
}

#[test]
fn test_cmd_score_from_input_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, DEFAULT_WEIGHTS);
    let input = dir.path().join("input.json");
    fs::write(&input, r#"{"snapshot": {"income": 100}}"#).unwrap();

    let result = commands::cmd_score(
        Some(config.as_path()),
        FinancialSnapshot::default(),
        &[],
        Some(input.as_path()),
        true,
    );
    assert!(result.is_ok());
}

#[test]
fn test_cmd_score_rejects_bad_goal() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, DEFAULT_WEIGHTS);
    let goals = vec!["lots".to_string()];

    let result = commands::cmd_score(
        Some(config.as_path()),
        FinancialSnapshot::default(),
        &goals,
        None,
        false,
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_score_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "[weights]\nemergency_fund = 0.9\n");

    let result = commands::cmd_score(Some(config.as_path()), FinancialSnapshot::default(), &[], None, false);
    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("sum to 1.0"));
}

// ========== Config Command Tests ==========

#[test]
fn test_cmd_config() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, DEFAULT_WEIGHTS);

    assert!(commands::cmd_config(Some(config.as_path()), false).is_ok());
    assert!(commands::cmd_config(None, true).is_ok());
    assert!(commands::cmd_config(Some(dir.path().join("missing.toml").as_path()), false).is_err());
}

#[test]
fn test_config_source_prefers_explicit_path() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, DEFAULT_WEIGHTS);
    assert_eq!(
        commands::config_source(Some(config.as_path())),
        config.display().to_string()
    );
}

// ========== Serve Command Tests ==========

#[test]
fn test_save_store_writes_back_seed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, r#"{"profiles": []}"#).unwrap();

    let store = MemoryStore::load_json(&path).unwrap();
    store.initialize_profile("ada", "Ada", "").unwrap();
    store
        .add_budget(
            "ada",
            NewBudget {
                category: "Food".to_string(),
                amount: 250.0,
                ..Default::default()
            },
        )
        .unwrap();
    commands::save_store(&store, &path).unwrap();

    let reloaded = MemoryStore::load_json(&path).unwrap();
    assert!(reloaded.get_profile("ada").unwrap().is_some());
    assert_eq!(reloaded.budget_overview("ada").unwrap().total_budgeted, 250.0);
}

#[test]
fn test_save_store_reports_unwritable_path() {
    let dir = TempDir::new().unwrap();
    let err = commands::save_store(&MemoryStore::new(), dir.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to save data"));
}
