//! Scenario validation logic.

use crate::schema::{LATEST_VERSION, Scenario, SetpointDef};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Invalid configuration: {field} = {value} ({reason})")]
    InvalidConfiguration {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidConfiguration {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn check_count(field: &str, value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(invalid(field, value, "must be non-negative"));
    }
    Ok(())
}

fn check_gain(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(invalid(field, value, "must be finite"));
    }
    if value < 0.0 {
        return Err(invalid(field, value, "must be non-negative"));
    }
    Ok(())
}

fn check_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(invalid(field, value, "must be finite"));
    }
    Ok(())
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    if scenario.name.trim().is_empty() {
        return Err(invalid("name", "\"\"", "must not be empty"));
    }

    check_count("total_ticks", scenario.total_ticks)?;
    check_count("plant.max_wip", scenario.plant.max_wip)?;
    check_count("plant.max_flow", scenario.plant.max_flow)?;

    if let Some(controller) = &scenario.controller {
        check_gain("controller.kp", controller.kp)?;
        check_gain("controller.ki", controller.ki)?;
    }

    match &scenario.setpoint {
        SetpointDef::Constant { value } => check_finite("setpoint.value", *value)?,
        SetpointDef::Piecewise { initial, steps } => {
            check_finite("setpoint.initial", *initial)?;
            let mut previous: Option<i64> = None;
            for (i, step) in steps.iter().enumerate() {
                let field = format!("setpoint.steps[{i}].from_tick");
                check_count(&field, step.from_tick)?;
                if previous.is_some_and(|p| step.from_tick <= p) {
                    return Err(invalid(&field, step.from_tick, "must be strictly increasing"));
                }
                previous = Some(step.from_tick);
                check_finite(&format!("setpoint.steps[{i}].value"), step.value)?;
            }
        }
    }

    Ok(())
}
