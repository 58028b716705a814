//! The makespan targeted at each solve round.

use super::ConfigOption;
use crate::types::err::ConfigError;

/// A non-decreasing map from rounds to makespans.
///
/// For round `n` the makespan is `l * n`, or `l * n + ⌊e^(n + o)⌋` when the exponential basis `e` is not zero.
#[derive(Clone, Debug, serde::Serialize)]
pub struct MakespanSchedule {
    /// The linear step `l`.
    pub linear_step: ConfigOption<u32>,

    /// The exponential basis `e`, where 0 disables the exponential term.
    pub exponential_basis: ConfigOption<f64>,

    /// The exponential offset `o`.
    pub exponential_offset: ConfigOption<f64>,
}

impl Default for MakespanSchedule {
    fn default() -> Self {
        MakespanSchedule {
            linear_step: ConfigOption {
                name: "linear_step",
                min: 0,
                max: u32::MAX,
                value: 1,
            },

            exponential_basis: ConfigOption {
                name: "exponential_basis",
                min: 0.0,
                max: f64::MAX,
                value: 0.0,
            },

            exponential_offset: ConfigOption {
                name: "exponential_offset",
                min: f64::MIN,
                max: f64::MAX,
                value: 0.0,
            },
        }
    }
}

impl MakespanSchedule {
    /// The makespan targeted in `round`, saturating at [u32::MAX].
    pub fn makespan(&self, round: u32) -> u32 {
        let linear = (self.linear_step.value as u64).saturating_mul(round as u64);

        let exponential = match self.exponential_basis.value {
            basis if basis == 0.0 => 0,
            basis => {
                let term = basis.powf(round as f64 + self.exponential_offset.value).floor();
                match term.is_finite() {
                    true if term <= u32::MAX as f64 => term as u64,
                    _ => u32::MAX as u64,
                }
            }
        };

        linear.saturating_add(exponential).min(u32::MAX as u64) as u32
    }

    /// Checks the schedule is non-decreasing and grows without bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for option in [&self.exponential_basis, &self.exponential_offset] {
            if !option.in_bounds() || !option.value.is_finite() {
                return Err(ConfigError::OutOfRange(option.name));
            }
        }

        let basis = self.exponential_basis.value;
        if basis != 0.0 && basis < 1.0 {
            return Err(ConfigError::OutOfRange(self.exponential_basis.name));
        }

        match self.linear_step.value > 0 || basis > 1.0 {
            true => Ok(()),
            false => Err(ConfigError::StagnantSchedule),
        }
    }
}

#[cfg(test)]
mod schedule_tests {
    use super::*;

    #[test]
    fn linear() {
        let mut schedule = MakespanSchedule::default();
        assert_eq!(
            (0..5).map(|n| schedule.makespan(n)).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4]
        );

        schedule.linear_step.value = 3;
        assert_eq!(schedule.makespan(4), 12);
    }

    #[test]
    fn exponential() {
        let mut schedule = MakespanSchedule::default();
        schedule.linear_step.value = 0;
        schedule.exponential_basis.value = 2.0;

        assert_eq!(
            (0..6).map(|n| schedule.makespan(n)).collect::<Vec<_>>(),
            vec![1, 2, 4, 8, 16, 32]
        );
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn non_decreasing() {
        let mut schedule = MakespanSchedule::default();
        schedule.exponential_basis.value = 1.5;
        schedule.exponential_offset.value = -2.0;

        let mut previous = 0;
        for n in 0..60 {
            let makespan = schedule.makespan(n);
            assert!(previous <= makespan);
            previous = makespan;
        }
    }

    #[test]
    fn saturation() {
        let mut schedule = MakespanSchedule::default();
        schedule.exponential_basis.value = 10.0;
        assert_eq!(schedule.makespan(100), u32::MAX);
    }

    #[test]
    fn stagnant() {
        let mut schedule = MakespanSchedule::default();
        schedule.linear_step.value = 0;
        assert_eq!(schedule.validate(), Err(ConfigError::StagnantSchedule));

        schedule.exponential_basis.value = 0.5;
        assert_eq!(
            schedule.validate(),
            Err(ConfigError::OutOfRange("exponential_basis"))
        );
    }
}
