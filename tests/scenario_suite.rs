//! Runs every scenario under tests/scenarios against a headless match

use std::path::Path;

use courtside::testing::{SCENARIOS_DIR, TestResult, discover_scenarios, parse_test_file, run_test, scenario_name};

fn run_category(category: &str) {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join(SCENARIOS_DIR);
    let scenarios = discover_scenarios(&root, Some(category));
    assert!(!scenarios.is_empty(), "no scenarios found for {}", category);

    let mut failures = Vec::new();
    for path in &scenarios {
        let name = scenario_name(&root, path);
        let def = match parse_test_file(path) {
            Ok(def) => def,
            Err(e) => {
                failures.push(format!("{}: {}", name, e));
                continue;
            }
        };
        match run_test(&def) {
            TestResult::Pass { .. } => {}
            TestResult::Fail { error } => failures.push(format!("{}: {}", name, error)),
            TestResult::Error { message } => failures.push(format!("{}: {}", name, message)),
        }
    }

    assert!(failures.is_empty(), "scenario failures:\n{}", failures.join("\n"));
}

#[test]
fn shooting_scenarios() {
    run_category("shooting/");
}

#[test]
fn movement_scenarios() {
    run_category("movement/");
}

#[test]
fn scoring_scenarios() {
    run_category("scoring/");
}

#[test]
fn meter_scenarios() {
    run_category("meter/");
}
