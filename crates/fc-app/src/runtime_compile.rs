//! Scenario to runtime object compilation.

use fc_controls::PIControl;
use fc_core::{EntropyRandom, RandomSource, SeededRandom, TimeStep};
use fc_plant::{BufferLimits, BufferPlant};
use fc_project::{ControllerDef, PlantDef, Scenario, SetpointDef, validate_scenario};
use fc_sim::{ConstantSetpoint, PiecewiseSetpoint, Setpoint, SetpointStep};

use crate::error::{AppError, AppResult};

/// Plant type built from scenario files.
pub type ScenarioPlant = BufferPlant<Box<dyn RandomSource>>;

/// Seeded source when `seed` is given, OS entropy otherwise.
pub fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(EntropyRandom::new()),
    }
}

pub fn build_plant(def: &PlantDef, seed: Option<u64>) -> AppResult<ScenarioPlant> {
    let limits = BufferLimits::try_from_signed(def.max_wip, def.max_flow)?;
    Ok(BufferPlant::new(limits, random_source(seed)))
}

pub fn build_controller(def: &ControllerDef) -> AppResult<PIControl> {
    Ok(PIControl::with_gains(def.kp, def.ki)?)
}

pub fn build_setpoint(def: &SetpointDef) -> AppResult<Box<dyn Setpoint>> {
    match def {
        SetpointDef::Constant { value } => Ok(Box::new(ConstantSetpoint::new(*value))),
        SetpointDef::Piecewise { initial, steps } => {
            let steps = steps
                .iter()
                .map(|s| {
                    let from_tick = TimeStep::try_from(s.from_tick).map_err(|_| {
                        AppError::InvalidConfiguration(format!(
                            "setpoint step tick must be non-negative, got {}",
                            s.from_tick
                        ))
                    })?;
                    Ok(SetpointStep {
                        from_tick,
                        value: s.value,
                    })
                })
                .collect::<AppResult<Vec<_>>>()?;
            Ok(Box::new(PiecewiseSetpoint::new(*initial, steps)?))
        }
    }
}

/// Validated tick count of a scenario.
pub fn total_ticks(scenario: &Scenario) -> AppResult<usize> {
    validate_scenario(scenario)?;
    usize::try_from(scenario.total_ticks).map_err(|_| {
        AppError::InvalidConfiguration(format!(
            "total_ticks must be non-negative, got {}",
            scenario.total_ticks
        ))
    })
}
