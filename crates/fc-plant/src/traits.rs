//! The plant interface driven by the simulation loop.

use fc_core::Real;

/// A controlled system advanced one discrete tick at a time.
pub trait Plant {
    /// Apply `control_input` for one tick and return the measured output.
    ///
    /// Out-of-range inputs are saturated, never rejected.
    fn advance(&mut self, control_input: Real) -> u64;
}

impl<P: Plant + ?Sized> Plant for &mut P {
    fn advance(&mut self, control_input: Real) -> u64 {
        (**self).advance(control_input)
    }
}

impl<P: Plant + ?Sized> Plant for Box<P> {
    fn advance(&mut self, control_input: Real) -> u64 {
        (**self).advance(control_input)
    }
}
