//! Scenario testing system for deterministic game testing
//!
//! Runs scripted input scenarios (TOML files) against a headless match and
//! checks the captured event stream and world state.

pub mod assertions;
pub mod discovery;
pub mod input;
pub mod parser;
pub mod runner;

pub use assertions::{AssertionError, CapturedEvent, check_absent, check_sequence, check_state};
pub use discovery::{discover_scenarios, scenario_name};
pub use input::{ScriptedInputs, TestEntityId};
pub use parser::{
    EntityDef, ExpectedEvent, FrameInput, InputSnapshot, StateAssertion, TestDefinition, TestExpectations, TestSetup,
    parse_test_file,
};
pub use runner::{TestResult, run_test};

/// Default path for test scenarios
pub const SCENARIOS_DIR: &str = "tests/scenarios";
