//! Built-in demonstration scenarios.

use crate::schema::{
    ControllerDef, LATEST_VERSION, PlantDef, Scenario, SetpointDef, SetpointStepDef,
};

pub const BUILTIN_NAMES: [&str; 2] = ["reference-open-loop", "reference-closed-loop"];

const REFERENCE_TICKS: i64 = 1000;

const REFERENCE_PLANT: PlantDef = PlantDef {
    max_wip: 50,
    max_flow: 10,
};

/// Buffer 50/10 driven by a constant 5.0 for 1000 ticks.
pub fn reference_open_loop() -> Scenario {
    Scenario {
        version: LATEST_VERSION,
        name: BUILTIN_NAMES[0].to_string(),
        seed: None,
        total_ticks: REFERENCE_TICKS,
        plant: REFERENCE_PLANT,
        controller: None,
        setpoint: SetpointDef::Constant { value: 5.0 },
    }
}

/// PI 1.25/0.01 on buffer 50/10 following 0 -> 50 (t=100) -> 10 (t=300).
pub fn reference_closed_loop() -> Scenario {
    Scenario {
        version: LATEST_VERSION,
        name: BUILTIN_NAMES[1].to_string(),
        seed: None,
        total_ticks: REFERENCE_TICKS,
        plant: REFERENCE_PLANT,
        controller: Some(ControllerDef { kp: 1.25, ki: 0.01 }),
        setpoint: SetpointDef::Piecewise {
            initial: 0.0,
            steps: vec![
                SetpointStepDef {
                    from_tick: 100,
                    value: 50.0,
                },
                SetpointStepDef {
                    from_tick: 300,
                    value: 10.0,
                },
            ],
        },
    }
}

/// Look up a built-in scenario by name.
pub fn builtin(name: &str) -> Option<Scenario> {
    match name {
        "reference-open-loop" => Some(reference_open_loop()),
        "reference-closed-loop" => Some(reference_closed_loop()),
        _ => None,
    }
}
