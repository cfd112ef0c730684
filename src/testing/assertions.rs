//! Assertion checking for test expectations

use std::collections::HashMap;

use super::parser::{ExpectedEvent, StateAssertion};
use crate::events::GameEvent;
use crate::player::PlayerIndex;

/// Error when an assertion fails
#[derive(Debug, Clone)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// Captured event with timing info
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub frame: u64,
    pub event_type: String,
    /// Test id of the actor, or the hoop side for goals
    pub player: Option<String>,
}

impl CapturedEvent {
    pub fn from_game_event(frame: u64, event: &GameEvent, ids: &HashMap<PlayerIndex, String>) -> Self {
        let player = match event {
            GameEvent::Goal { hoop } => Some(format!("{:?}", hoop).to_lowercase()),
            other => other.player().and_then(|index| ids.get(&index).cloned()),
        };

        CapturedEvent {
            frame,
            event_type: event.name().to_string(),
            player,
        }
    }
}

/// Check if captured events match expected sequence
pub fn check_sequence(expected: &[ExpectedEvent], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    let mut captured_idx = 0;

    for (i, exp) in expected.iter().enumerate() {
        // Find matching event starting from current position
        let found = captured[captured_idx..].iter().enumerate().find(|(_, cap)| {
            if cap.event_type != exp.event {
                return false;
            }
            if let Some(ref exp_player) = exp.player
                && cap.player.as_ref() != Some(exp_player)
            {
                return false;
            }
            true
        });

        match found {
            Some((offset, cap)) => {
                if let Some(min) = exp.frame_min
                    && cap.frame < min
                {
                    return Err(AssertionError {
                        message: format!("Event #{} '{}' occurred too early", i + 1, exp.event),
                        expected: format!("frame >= {}", min),
                        actual: format!("frame {}", cap.frame),
                    });
                }
                if let Some(max) = exp.frame_max
                    && cap.frame > max
                {
                    return Err(AssertionError {
                        message: format!("Event #{} '{}' occurred too late", i + 1, exp.event),
                        expected: format!("frame <= {}", max),
                        actual: format!("frame {}", cap.frame),
                    });
                }
                captured_idx += offset + 1;
            }
            None => {
                let player_str = exp.player.as_ref().map(|p| format!(" (player: {})", p)).unwrap_or_default();
                return Err(AssertionError {
                    message: format!("Event #{} '{}'{} not found", i + 1, exp.event, player_str),
                    expected: format!("'{}' event in sequence", exp.event),
                    actual: format!(
                        "events after position {}: {:?}",
                        captured_idx,
                        captured[captured_idx..].iter().map(|e| &e.event_type).collect::<Vec<_>>()
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Fail if any of the named events was captured
pub fn check_absent(absent: &[String], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    for name in absent {
        if let Some(cap) = captured.iter().find(|cap| &cap.event_type == name) {
            return Err(AssertionError {
                message: format!("Event '{}' should not occur", name),
                expected: "no such event".to_string(),
                actual: format!("at frame {}", cap.frame),
            });
        }
    }
    Ok(())
}

/// World state for assertions
pub struct WorldState {
    pub entities: HashMap<String, EntityState>,
    pub ball: Option<BallState>,
    /// "left", "right" or "none"
    pub active_hoop: String,
}

pub struct EntityState {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub holding_ball: bool,
    /// "Idle", "Charging" or "Frozen"
    pub meter: String,
    pub fill: f32,
    pub meter_visible: bool,
}

pub struct BallState {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    /// Test id of the holder, "none" when free
    pub holder: String,
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Try operators in order of specificity (>= before >, etc.)
    for op in &[">=", "<=", "!=", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

/// Check state assertions against world state
pub fn check_state(assertion: &StateAssertion, state: &WorldState) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| AssertionError {
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'entity.property = value' or 'entity.property > value'".to_string(),
            actual: check.clone(),
        })?;

        let path_parts: Vec<&str> = path.split('.').collect();

        if path_parts[0] == "hoop" {
            match path_parts.get(1) {
                Some(&"active") => check_text(check, &state.active_hoop, operator, expected_value)?,
                _ => return Err(unknown_property(path)),
            }
            continue;
        }

        if path_parts[0] == "ball" {
            let ball = state.ball.as_ref().ok_or_else(|| AssertionError {
                message: "Ball state check failed".to_string(),
                expected: "ball exists".to_string(),
                actual: "no ball".to_string(),
            })?;

            match path_parts.get(1) {
                Some(&"x") => check_float_comparison(path, ball.x, operator, expected_value)?,
                Some(&"y") => check_float_comparison(path, ball.y, operator, expected_value)?,
                Some(&"velocity_x") => check_float_comparison(path, ball.velocity_x, operator, expected_value)?,
                Some(&"velocity_y") => check_float_comparison(path, ball.velocity_y, operator, expected_value)?,
                Some(&"holder") => check_text(check, &ball.holder, operator, expected_value)?,
                _ => return Err(unknown_property(path)),
            }
            continue;
        }

        // Entity checks
        let entity_id = path_parts[0];
        let entity = state.entities.get(entity_id).ok_or_else(|| AssertionError {
            message: format!("Entity '{}' not found", entity_id),
            expected: format!("entity '{}'", entity_id),
            actual: format!("available: {:?}", state.entities.keys().collect::<Vec<_>>()),
        })?;

        match path_parts.get(1) {
            Some(&"x") => check_float_comparison(path, entity.x, operator, expected_value)?,
            Some(&"y") => check_float_comparison(path, entity.y, operator, expected_value)?,
            Some(&"velocity_x") => check_float_comparison(path, entity.velocity_x, operator, expected_value)?,
            Some(&"velocity_y") => check_float_comparison(path, entity.velocity_y, operator, expected_value)?,
            Some(&"fill") => check_float_comparison(path, entity.fill, operator, expected_value)?,
            Some(&"meter") => check_text(check, &entity.meter, operator, expected_value)?,
            Some(&"meter_visible") => {
                check_text(check, &entity.meter_visible.to_string(), operator, expected_value)?
            }
            Some(&"holding_ball") => {
                check_text(check, &entity.holding_ball.to_string(), operator, expected_value)?
            }
            _ => return Err(unknown_property(path)),
        }
    }

    Ok(())
}

fn unknown_property(path: &str) -> AssertionError {
    AssertionError {
        message: format!("Unknown property: {}", path),
        expected: "a supported property".to_string(),
        actual: path.to_string(),
    }
}

/// Equality check on a string value; quotes around the expected value are optional
fn check_text(check: &str, actual: &str, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let expected = expected_str.trim_matches('"');
    let pass = match operator {
        "=" => actual == expected,
        "!=" => actual != expected,
        _ => false,
    };

    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {}", check),
            expected: format!("{} {}", operator, expected),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// Check float comparison with operator
fn check_float_comparison(path: &str, actual: f32, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let value: f32 = expected_str.trim().parse().map_err(|_| AssertionError {
        message: format!("Invalid value for {}", path),
        expected: "number".to_string(),
        actual: expected_str.to_string(),
    })?;

    let pass = match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        ">" => actual > value,
        "<" => actual < value,
        "=" => (actual - value).abs() < 0.1,
        "!=" => (actual - value).abs() >= 0.1,
        _ => false,
    };

    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {} {} {} (actual: {:.2})", path, operator, expected_str, actual),
            expected: format!("{} {} {}", path, operator, value),
            actual: format!("{:.2}", actual),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> WorldState {
        let mut entities = HashMap::new();
        entities.insert(
            "p0".to_string(),
            EntityState {
                x: -4.0,
                y: -4.0,
                velocity_x: 0.5,
                velocity_y: 0.0,
                holding_ball: false,
                meter: "Frozen".to_string(),
                fill: 0.5,
                meter_visible: true,
            },
        );
        WorldState {
            entities,
            ball: Some(BallState {
                x: 0.0,
                y: 0.0,
                velocity_x: 7.0,
                velocity_y: 7.0,
                holder: "none".to_string(),
            }),
            active_hoop: "right".to_string(),
        }
    }

    fn assertion(checks: &[&str]) -> StateAssertion {
        StateAssertion {
            after_frame: 0,
            checks: checks.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_state_checks_pass() {
        let checks = assertion(&[
            "p0.meter = \"Frozen\"",
            "p0.velocity_x < 1.0",
            "p0.holding_ball = false",
            "ball.holder = none",
            "ball.velocity_y > 0",
            "hoop.active = right",
        ]);
        assert!(check_state(&checks, &state()).is_ok());
    }

    #[test]
    fn test_state_check_reports_mismatch() {
        let err = check_state(&assertion(&["ball.holder = p0"]), &state()).unwrap_err();
        assert_eq!(err.actual, "none");
        assert!(check_state(&assertion(&["p9.x = 0"]), &state()).is_err());
        assert!(check_state(&assertion(&["p0.bogus = 0"]), &state()).is_err());
    }

    #[test]
    fn test_sequence_order_and_bounds() {
        let captured = vec![
            CapturedEvent {
                frame: 2,
                event_type: "ChargeStarted".to_string(),
                player: Some("p0".to_string()),
            },
            CapturedEvent {
                frame: 30,
                event_type: "ShotReleased".to_string(),
                player: Some("p0".to_string()),
            },
        ];
        let expect = |event: &str, frame_max: Option<u64>| ExpectedEvent {
            event: event.to_string(),
            player: Some("p0".to_string()),
            frame_min: None,
            frame_max,
        };

        assert!(check_sequence(&[expect("ChargeStarted", None), expect("ShotReleased", None)], &captured).is_ok());
        assert!(check_sequence(&[expect("ShotReleased", None), expect("ChargeStarted", None)], &captured).is_err());
        assert!(check_sequence(&[expect("ShotReleased", Some(10))], &captured).is_err());
        assert!(check_absent(&["ShotAborted".to_string()], &captured).is_ok());
        assert!(check_absent(&["ShotReleased".to_string()], &captured).is_err());
    }
}
