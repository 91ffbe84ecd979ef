//! Open-loop and closed-loop simulation drivers.
//!
//! Both loops share one skeleton: ticks `0..total_ticks` run in order, each
//! tick fully resolves the plant before the next begins, and exactly one
//! [`SimulationRecord`] is appended per tick. Zero ticks yield an empty run.

use fc_controls::Controller;
use fc_core::{Real, TimeStep};
use fc_plant::Plant;
use tracing::{debug, trace};

use crate::record::{LoopMode, SimulationRecord};
use crate::setpoint::Setpoint;

/// Output assumed before the first closed-loop tick has run.
pub const INITIAL_OUTPUT: u64 = 0;

/// Drive the plant directly with the target value.
pub fn run_open_loop<P, S>(plant: &mut P, target: &S, total_ticks: usize) -> Vec<SimulationRecord>
where
    P: Plant + ?Sized,
    S: Setpoint + ?Sized,
{
    run_ticks(LoopMode::OpenLoop, total_ticks, |t| {
        let u = target.at(t);
        let y = plant.advance(u);
        SimulationRecord {
            time_step: t,
            set_point: u,
            residue: 0.0,
            control_signal: u,
            output: y,
        }
    })
}

/// Feed `setpoint - previous output` through the controller into the plant.
pub fn run_closed_loop<C, P, S>(
    controller: &mut C,
    plant: &mut P,
    setpoint: &S,
    total_ticks: usize,
) -> Vec<SimulationRecord>
where
    C: Controller + ?Sized,
    P: Plant + ?Sized,
    S: Setpoint + ?Sized,
{
    let mut y = INITIAL_OUTPUT;
    run_ticks(LoopMode::ClosedLoop, total_ticks, |t| {
        let r = setpoint.at(t);
        let e = r - y as Real;
        let u = controller.advance(e);
        y = plant.advance(u);
        SimulationRecord {
            time_step: t,
            set_point: r,
            residue: e,
            control_signal: u,
            output: y,
        }
    })
}

/// Closed loop when a controller is given, open loop otherwise.
pub fn run<P, S>(
    controller: Option<&mut dyn Controller>,
    plant: &mut P,
    setpoint: &S,
    total_ticks: usize,
) -> Vec<SimulationRecord>
where
    P: Plant + ?Sized,
    S: Setpoint + ?Sized,
{
    match controller {
        Some(c) => run_closed_loop(c, plant, setpoint, total_ticks),
        None => run_open_loop(plant, setpoint, total_ticks),
    }
}

fn run_ticks<F>(mode: LoopMode, total_ticks: usize, mut tick: F) -> Vec<SimulationRecord>
where
    F: FnMut(TimeStep) -> SimulationRecord,
{
    debug!(?mode, total_ticks, "simulation started");
    let mut records = Vec::with_capacity(total_ticks);
    for t in 0..total_ticks as TimeStep {
        let record = tick(t);
        trace!(
            t,
            r = record.set_point,
            e = record.residue,
            u = record.control_signal,
            y = record.output
        );
        records.push(record);
    }
    debug!(
        ?mode,
        ticks = records.len(),
        final_output = records.last().map(|r| r.output),
        "simulation finished"
    );
    records
}
