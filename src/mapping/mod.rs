/*!
Translation of template literals to solver variables.

Each [TimePoint] seen by a [VariableAddressMapper] is given a slot, in order of first sight.
A slot holds a block of problem variables and a block of helper variables, and where the blocks lie is fixed by a [HelperPlacement].

For a template literal `l` at a time point with slot `s` the solver literal is `sign(l) * (offset(s) + |l|)`, where the offset depends on the slot, the block and the placement only.
So, the variable of a literal never depends on the order in which clauses reach a solver.

# Example

With two problem variables and one helper variable per slot, placed after the problem block:

```rust
# use incplan::mapping::{Block, HelperPlacement, VariableAddressMapper};
# use incplan::timeline::TimePointManager;
let mut timeline = TimePointManager::single_ended();
let t0 = timeline.acquire_next();
let t1 = timeline.acquire_next();

let mut mapper = VariableAddressMapper::new(2, 1, HelperPlacement::SingleAfter, 0);

assert_eq!(mapper.literal_to_variable(1, t0, Block::Problem), Ok(1));
assert_eq!(mapper.literal_to_variable(-1, t1, Block::Problem), Ok(-4));
assert_eq!(mapper.literal_to_variable(1, t0, Block::Helper), Ok(3));
assert_eq!(mapper.literal_to_variable(0, t1, Block::Helper), Ok(0));
```
*/

use std::collections::HashMap;

use crate::{
    misc::log::targets,
    timeline::TimePoint,
    types::err::{self},
};

/// Where the helper block of a slot is placed, relative to the problem blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HelperPlacement {
    /// All helper blocks are placed before all problem blocks, in a reserved region.
    AllBefore,

    /// Each helper block immediately precedes the problem block of its slot.
    SingleBefore,

    /// Each helper block immediately follows the problem block of its slot.
    #[default]
    SingleAfter,
}

impl std::fmt::Display for HelperPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllBefore => write!(f, "all-before"),
            Self::SingleBefore => write!(f, "single-before"),
            Self::SingleAfter => write!(f, "single-after"),
        }
    }
}

/// The block a template literal belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Block {
    /// A variable of the planning problem.
    Problem,

    /// A variable used by the encoding only, e.g. an activation literal.
    Helper,
}

/// A cache from time points to slots, and the arithmetic from slots to solver variables.
#[derive(Clone, Debug)]
pub struct VariableAddressMapper {
    literals_per_step: u32,
    helpers_per_step: u32,
    placement: HelperPlacement,

    /// A count of slots whose helper blocks fit before the first problem block, used by [HelperPlacement::AllBefore] only.
    reserved_slots: u32,

    slots: HashMap<TimePoint, u32>,
}

impl VariableAddressMapper {
    /// A fresh mapper.
    ///
    /// `reserved_slots` is only used with [HelperPlacement::AllBefore], and bounds the number of slots the mapper may hand out.
    pub fn new(
        literals_per_step: u32,
        helpers_per_step: u32,
        placement: HelperPlacement,
        reserved_slots: u32,
    ) -> Self {
        if placement == HelperPlacement::AllBefore {
            log::debug!(target: targets::MAPPING, "Placing helper variables before encoding, {reserved_slots} slots reserved.");
        }
        VariableAddressMapper {
            literals_per_step,
            helpers_per_step,
            placement,
            reserved_slots,
            slots: HashMap::default(),
        }
    }

    /// The slot of `time_point`, assigning the next free slot if `time_point` has not been seen before.
    pub fn slot(&mut self, time_point: TimePoint) -> u32 {
        let fresh = self.slots.len() as u32;
        *self.slots.entry(time_point).or_insert(fresh)
    }

    /// A count of the slots handed out.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn width_of(&self, block: Block) -> u32 {
        match block {
            Block::Problem => self.literals_per_step,
            Block::Helper => self.helpers_per_step,
        }
    }

    /// The offset of `block` for `slot`.
    fn offset(&self, slot: u32, block: Block) -> Result<i64, err::MappingError> {
        let slot = slot as i64;
        let problem_width = self.literals_per_step as i64;
        let helper_width = self.helpers_per_step as i64;

        let offset = match self.placement {
            HelperPlacement::SingleBefore => {
                let base = slot * (problem_width + helper_width);
                match block {
                    Block::Problem => base + helper_width,
                    Block::Helper => base,
                }
            }

            HelperPlacement::SingleAfter => {
                let base = slot * (problem_width + helper_width);
                match block {
                    Block::Problem => base,
                    Block::Helper => base + problem_width,
                }
            }

            HelperPlacement::AllBefore => {
                if slot >= self.reserved_slots as i64 {
                    return Err(err::MappingError::HelperReservationExhausted);
                }
                match block {
                    Block::Problem => self.reserved_slots as i64 * helper_width + slot * problem_width,
                    Block::Helper => slot * helper_width,
                }
            }
        };
        Ok(offset)
    }

    /// The solver literal of `literal` from `block` at `time_point`.
    ///
    /// The clause terminator 0 is returned as is.
    pub fn literal_to_variable(
        &mut self,
        literal: i32,
        time_point: TimePoint,
        block: Block,
    ) -> Result<i32, err::MappingError> {
        if literal == 0 {
            return Ok(0);
        }

        let variable = literal.unsigned_abs();
        if variable > self.width_of(block) {
            return Err(err::MappingError::LiteralOutOfBlock(literal));
        }

        // A slot is only handed out once the variable is known to exist.
        let slot = match self.slots.get(&time_point) {
            Some(slot) => *slot,
            None => self.slots.len() as u32,
        };
        let absolute = self.offset(slot, block)? + variable as i64;
        let absolute = i32::try_from(absolute).map_err(|_| err::MappingError::VariableOverflow)?;
        self.slot(time_point);

        let mapped = match literal.is_positive() {
            true => absolute,
            false => -absolute,
        };
        log::trace!(target: targets::MAPPING, "{literal}@{time_point} ({block:?}) -> {mapped}");
        Ok(mapped)
    }

    /// The solver literal of problem `literal` at `time_point`.
    pub fn problem_literal(&mut self, literal: i32, time_point: TimePoint) -> Result<i32, err::MappingError> {
        self.literal_to_variable(literal, time_point, Block::Problem)
    }

    /// The solver literal of helper `literal` at `time_point`.
    pub fn helper_literal(&mut self, literal: i32, time_point: TimePoint) -> Result<i32, err::MappingError> {
        self.literal_to_variable(literal, time_point, Block::Helper)
    }
}

#[cfg(test)]
mod mapping_tests {
    use super::*;
    use crate::timeline::TimePointManager;

    fn points(count: usize) -> Vec<TimePoint> {
        let mut timeline = TimePointManager::double_ended(0.5, crate::timeline::TopElementMode::Duplicated);
        (0..count).map(|_| timeline.acquire_next()).collect()
    }

    #[test]
    fn negation_is_preserved() {
        let placements = [
            HelperPlacement::AllBefore,
            HelperPlacement::SingleBefore,
            HelperPlacement::SingleAfter,
        ];
        for placement in placements {
            let mut mapper = VariableAddressMapper::new(5, 2, placement, 16);
            for time_point in points(8) {
                for literal in 1..=5 {
                    let positive = mapper.problem_literal(literal, time_point).unwrap();
                    let negative = mapper.problem_literal(-literal, time_point).unwrap();
                    assert_eq!(positive, -negative);
                }
                for literal in 1..=2 {
                    let positive = mapper.helper_literal(literal, time_point).unwrap();
                    let negative = mapper.helper_literal(-literal, time_point).unwrap();
                    assert_eq!(positive, -negative);
                }
            }
        }
    }

    #[test]
    fn slots_are_first_seen_and_permanent() {
        let mut mapper = VariableAddressMapper::new(3, 1, HelperPlacement::SingleAfter, 0);
        let points = points(6);

        for point in points.iter().rev() {
            mapper.slot(*point);
        }
        for (expected, point) in points.iter().rev().enumerate() {
            assert_eq!(mapper.slot(*point), expected as u32);
        }
        assert_eq!(mapper.slot_count(), 6);
    }

    #[test]
    fn variables_are_disjoint() {
        let placements = [
            HelperPlacement::AllBefore,
            HelperPlacement::SingleBefore,
            HelperPlacement::SingleAfter,
        ];
        for placement in placements {
            let mut mapper = VariableAddressMapper::new(4, 2, placement, 10);
            let mut seen = std::collections::HashSet::new();
            for time_point in points(10) {
                for literal in 1..=4 {
                    assert!(seen.insert(mapper.problem_literal(literal, time_point).unwrap()));
                }
                for literal in 1..=2 {
                    assert!(seen.insert(mapper.helper_literal(literal, time_point).unwrap()));
                }
            }
        }
    }

    #[test]
    fn single_before_offsets() {
        let mut mapper = VariableAddressMapper::new(2, 1, HelperPlacement::SingleBefore, 0);
        let points = points(2);

        assert_eq!(mapper.helper_literal(1, points[0]), Ok(1));
        assert_eq!(mapper.problem_literal(1, points[0]), Ok(2));
        assert_eq!(mapper.problem_literal(-2, points[0]), Ok(-3));
        assert_eq!(mapper.helper_literal(-1, points[1]), Ok(-4));
        assert_eq!(mapper.problem_literal(2, points[1]), Ok(6));
    }

    #[test]
    fn all_before_reservation() {
        let mut mapper = VariableAddressMapper::new(2, 1, HelperPlacement::AllBefore, 2);
        let points = points(3);

        assert_eq!(mapper.helper_literal(1, points[0]), Ok(1));
        assert_eq!(mapper.helper_literal(1, points[1]), Ok(2));
        assert_eq!(mapper.problem_literal(1, points[0]), Ok(3));
        assert_eq!(mapper.problem_literal(2, points[1]), Ok(6));
        assert_eq!(
            mapper.problem_literal(1, points[2]),
            Err(err::MappingError::HelperReservationExhausted)
        );
    }

    #[test]
    fn failed_mappings_keep_slots_free() {
        let mut mapper = VariableAddressMapper::new(2, 1, HelperPlacement::AllBefore, 1);
        let points = points(3);

        assert_eq!(mapper.problem_literal(1, points[0]), Ok(2));
        assert_eq!(
            mapper.problem_literal(1, points[1]),
            Err(err::MappingError::HelperReservationExhausted)
        );
        assert_eq!(
            mapper.helper_literal(1, points[2]),
            Err(err::MappingError::HelperReservationExhausted)
        );
        assert_eq!(mapper.slot_count(), 1);

        assert_eq!(
            mapper.problem_literal(3, points[1]),
            Err(err::MappingError::LiteralOutOfBlock(3))
        );
        assert_eq!(mapper.slot_count(), 1);
    }

    #[test]
    fn interference() {
        let mut mapper = VariableAddressMapper::new(2, 1, HelperPlacement::SingleAfter, 0);
        let mut timeline = TimePointManager::single_ended();
        let t0 = timeline.acquire_next();
        let t1 = timeline.acquire_next();

        let mapped = [
            mapper.problem_literal(1, t0),
            mapper.problem_literal(2, t0),
            mapper.helper_literal(1, t0),
            mapper.problem_literal(1, t1),
            mapper.problem_literal(-2, t1),
            mapper.helper_literal(-1, t1),
            mapper.problem_literal(1, t0),
        ];
        assert_eq!(mapped, [Ok(1), Ok(2), Ok(3), Ok(4), Ok(-5), Ok(-6), Ok(1)]);
    }

    #[test]
    fn literals_outside_their_block() {
        let mut mapper = VariableAddressMapper::new(2, 1, HelperPlacement::SingleAfter, 0);
        let t0 = points(1)[0];

        assert_eq!(
            mapper.problem_literal(3, t0),
            Err(err::MappingError::LiteralOutOfBlock(3))
        );
        assert_eq!(
            mapper.helper_literal(-2, t0),
            Err(err::MappingError::LiteralOutOfBlock(-2))
        );
    }
}
