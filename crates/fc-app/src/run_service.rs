//! Scenario execution service.

use fc_controls::{Controller, PIControl};
use fc_plant::{Plant, PlantState};
use fc_project::{Scenario, reference_closed_loop, reference_open_loop};
use fc_results::{RunResult, RunSummary, summarize};
use fc_sim::{LoopMode, SimulationRecord, run_closed_loop, run_open_loop};
use serde::Serialize;
use tracing::info;

use crate::error::AppResult;
use crate::runtime_compile::{
    ScenarioPlant, build_controller, build_plant, build_setpoint, total_ticks,
};

/// Ticks after a setpoint switch counted as the settling window.
pub const SETTLE_WINDOW: usize = 20;

/// Everything a frontend needs about one finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub result: RunResult,
    pub summary: RunSummary,
    /// Seed actually used; `None` for entropy-seeded runs.
    pub seed: Option<u64>,
    pub final_plant_state: PlantState,
    /// Controller integral after the run; `None` in open loop.
    pub final_integral: Option<f64>,
}

/// Run one scenario. `seed_override` replaces the scenario's own seed.
pub fn run_scenario(scenario: &Scenario, seed_override: Option<u64>) -> AppResult<RunOutcome> {
    let ticks = total_ticks(scenario)?;
    let seed = seed_override.or(scenario.seed);
    let mut plant = build_plant(&scenario.plant, seed)?;
    let mut controller = scenario
        .controller
        .as_ref()
        .map(build_controller)
        .transpose()?;
    execute(scenario, seed, ticks, &mut plant, controller.as_mut())
}

fn execute(
    scenario: &Scenario,
    seed: Option<u64>,
    ticks: usize,
    plant: &mut ScenarioPlant,
    controller: Option<&mut PIControl>,
) -> AppResult<RunOutcome> {
    let setpoint = build_setpoint(&scenario.setpoint)?;
    info!(
        scenario = %scenario.name,
        ticks,
        seed = ?seed,
        closed_loop = controller.is_some(),
        "running scenario"
    );

    let (mode, records, final_integral) = match controller {
        Some(pi) => {
            let records = run_closed_loop(&mut *pi, &mut *plant, setpoint.as_ref(), ticks);
            (LoopMode::ClosedLoop, records, Some(pi.state().integral))
        }
        None => {
            let records = run_open_loop(&mut *plant, setpoint.as_ref(), ticks);
            (LoopMode::OpenLoop, records, None)
        }
    };

    package(scenario, seed, mode, &records, plant.state(), final_integral)
}

fn package(
    scenario: &Scenario,
    seed: Option<u64>,
    mode: LoopMode,
    records: &[SimulationRecord],
    final_plant_state: PlantState,
    final_integral: Option<f64>,
) -> AppResult<RunOutcome> {
    let result = RunResult::new(scenario.name.clone(), mode, records);
    let summary = summarize(&result.series, SETTLE_WINDOW)?;
    info!(
        scenario = %scenario.name,
        final_output = ?summary.final_output,
        mean_abs_residue = ?summary.mean_abs_residue,
        "scenario finished"
    );
    Ok(RunOutcome {
        result,
        summary,
        seed,
        final_plant_state,
        final_integral,
    })
}

/// Open-loop then closed-loop demonstration on one shared plant.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceOutcome {
    pub open: RunOutcome,
    pub closed: RunOutcome,
}

/// Reproduce the two-phase demonstration: the reference open-loop scenario
/// runs first, then the reference closed-loop scenario continues on the same
/// plant, starting from whatever the first phase left in its pools.
///
/// `ticks` overrides both phases' tick counts when given.
pub fn run_reference(seed: Option<u64>, ticks: Option<usize>) -> AppResult<ReferenceOutcome> {
    let open_scenario = reference_open_loop();
    let closed_scenario = reference_closed_loop();
    let open_ticks = ticks.map_or_else(|| total_ticks(&open_scenario), Ok)?;
    let closed_ticks = ticks.map_or_else(|| total_ticks(&closed_scenario), Ok)?;

    let mut plant = build_plant(&open_scenario.plant, seed)?;
    let open = execute(&open_scenario, seed, open_ticks, &mut plant, None)?;

    let mut controller = closed_scenario
        .controller
        .as_ref()
        .map(build_controller)
        .transpose()?;
    let closed = execute(
        &closed_scenario,
        seed,
        closed_ticks,
        &mut plant,
        controller.as_mut(),
    )?;

    Ok(ReferenceOutcome { open, closed })
}

/// Drive any plant/controller pair with a scenario's setpoint and tick count.
pub fn run_with<P, C>(
    scenario: &Scenario,
    plant: &mut P,
    controller: Option<&mut C>,
) -> AppResult<Vec<SimulationRecord>>
where
    P: Plant + ?Sized,
    C: Controller + ?Sized,
{
    let ticks = total_ticks(scenario)?;
    let setpoint = build_setpoint(&scenario.setpoint)?;
    Ok(match controller {
        Some(c) => run_closed_loop(c, plant, setpoint.as_ref(), ticks),
        None => run_open_loop(plant, setpoint.as_ref(), ticks),
    })
}
