//! Synchronous progress reporting at stage boundaries.

/// Fixed progress milestones, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    Validating,
    VerticalStress,
    PorePressure,
    HorizontalStress,
    FractureGradient,
    Quality,
    Complete,
}

impl Milestone {
    pub fn percent(self) -> u8 {
        match self {
            Milestone::Validating => 0,
            Milestone::VerticalStress => 10,
            Milestone::PorePressure => 30,
            Milestone::HorizontalStress => 50,
            Milestone::FractureGradient => 70,
            Milestone::Quality => 90,
            Milestone::Complete => 100,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Milestone::Validating => "Validating inputs",
            Milestone::VerticalStress => "Computing vertical stress",
            Milestone::PorePressure => "Computing pore pressure",
            Milestone::HorizontalStress => "Computing horizontal stresses",
            Milestone::FractureGradient => "Computing fracture gradient",
            Milestone::Quality => "Assessing data quality",
            Milestone::Complete => "Calculation complete",
        }
    }
}

/// Receives `(percentage, message)` at each milestone.
///
/// Implemented for any `FnMut(u8, &str)` closure.
pub trait ProgressReporter {
    fn report(&mut self, percent: u8, message: &str);
}

impl<F> ProgressReporter for F
where
    F: FnMut(u8, &str),
{
    fn report(&mut self, percent: u8, message: &str) {
        self(percent, message);
    }
}

/// A reporter that discards every update.
pub fn silent() -> impl ProgressReporter {
    |_: u8, _: &str| {}
}
