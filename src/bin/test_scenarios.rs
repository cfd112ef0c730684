//! Scenario test runner CLI
//!
//! Usage:
//!   cargo run --bin test-scenarios                          # Run all scenarios
//!   cargo run --bin test-scenarios -- shooting/             # Run category
//!   cargo run --bin test-scenarios -- scoring/score_reset   # Run single scenario
//!   cargo run --bin test-scenarios -- --verbose             # Show expected/actual on failure

use std::env;
use std::path::Path;
use std::process::ExitCode;

use courtside::testing::{SCENARIOS_DIR, TestResult, discover_scenarios, parse_test_file, run_test, scenario_name};

#[derive(Default)]
struct Tally {
    passed: usize,
    failed: usize,
    errors: usize,
}

fn main() -> ExitCode {
    let mut verbose = false;
    let mut filter: Option<String> = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--verbose" | "-v" => verbose = true,
            a if !a.starts_with('-') => filter = Some(arg),
            _ => {}
        }
    }

    println!("Courtside Scenarios");
    println!("===================\n");

    let root = Path::new(SCENARIOS_DIR);
    if !root.exists() {
        println!("No scenarios directory found at {}", SCENARIOS_DIR);
        return ExitCode::FAILURE;
    }

    let scenarios = discover_scenarios(root, filter.as_deref());
    if scenarios.is_empty() {
        println!("No scenario files found.");
        if let Some(f) = filter {
            println!("Filter: {}", f);
        }
        return ExitCode::FAILURE;
    }

    let mut tally = Tally::default();
    let mut current_category = String::new();

    for path in &scenarios {
        let name = scenario_name(root, path);
        let (category, short) = name.rsplit_once('/').unwrap_or(("", name.as_str()));
        if category != current_category {
            println!("{}/", category);
            current_category = category.to_string();
        }
        let short = short.trim_end_matches(".toml");

        let result = match parse_test_file(path) {
            Ok(def) => run_test(&def),
            Err(message) => TestResult::Error { message },
        };

        match &result {
            TestResult::Pass { .. } => tally.passed += 1,
            TestResult::Fail { .. } => tally.failed += 1,
            TestResult::Error { .. } => tally.errors += 1,
        }
        print_result(short, &result, verbose);
    }

    println!(
        "\nResults: {} passed, {} failed, {} errors",
        tally.passed, tally.failed, tally.errors
    );

    if tally.failed > 0 || tally.errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_result(name: &str, result: &TestResult, verbose: bool) {
    let dots = ".".repeat(40 - name.len().min(39));

    match result {
        TestResult::Pass { frames } => println!("  {} {} PASS ({} frames)", name, dots, frames),
        TestResult::Fail { error } => {
            println!("  {} {} FAIL", name, dots);
            if verbose {
                println!("    {}", error);
            } else {
                println!("    {}", error.message);
            }
        }
        TestResult::Error { message } => {
            println!("  {} {} ERROR", name, dots);
            println!("    {}", message);
        }
    }
}
