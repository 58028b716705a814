/*!
Time points and their managers.

A plan is a sequence of states, and each state is given by a block of solver variables.
Blocks are addressed through [TimePoint]s, which are handed out by a [TimePointManager] as the plan grows.

A time point is a pair of a [Branch] and an index.
The index is an allocation sequence number on its branch, and so says nothing about the position of the time point in the plan.
Instead, position is recovered through the [successor](TimePointManager::successor) and [predecessor](TimePointManager::predecessor) of a time point.

There are two managers:
- A [single ended](SingleEnded) manager, which only grows the plan forwards.
  Successors and predecessors are the next and previous index.
- A [double ended](DoubleEnded) manager, which grows the plan from the start and from the end.
  The two branches are stitched at their tops, see [TopElementMode].

A time point should only be given to the manager which produced it.
Managers check this as far as possible, returning [InvalidArgument](err::TimelineError::InvalidArgument) when a time point is unknown.

# Example

```rust
# use incplan::timeline::{TimePointManager, TopElementMode};
let mut timeline = TimePointManager::double_ended(0.5, TopElementMode::Duplicated);

let start = timeline.acquire_next();
let end = timeline.acquire_next();
let middle = timeline.acquire_next();

assert!(timeline.is_on_forward_branch(middle));
assert_eq!(timeline.predecessor(middle), Ok(start));
assert_eq!(timeline.successor(start), Ok(end));
assert_eq!(timeline.timeline(), Ok(vec![start, end]));
```
*/

mod double;
mod single;

pub use double::{DoubleEnded, TopElementMode};
pub use single::SingleEnded;

use crate::{misc::log::targets, types::err};

/// The branch a time point was allocated on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Branch {
    /// Allocated from the start of the plan, growing forwards.
    Begin,

    /// Allocated from the end of the plan, growing backwards.
    End,
}

/// An opaque handle to a point of a plan.
///
/// Two time points are equal exactly when both branch and index match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimePoint {
    branch: Branch,
    index: u32,
}

impl TimePoint {
    pub(crate) fn new(branch: Branch, index: u32) -> Self {
        TimePoint { branch, index }
    }

    /// The branch the time point was allocated on.
    pub fn branch(&self) -> Branch {
        self.branch
    }

    /// The allocation sequence number of the time point on its branch.
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl std::fmt::Display for TimePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.branch {
            Branch::Begin => write!(f, "b{}", self.index),
            Branch::End => write!(f, "e{}", self.index),
        }
    }
}

/// A manager of time points.
#[derive(Clone, Debug)]
pub enum TimePointManager {
    SingleEnded(SingleEnded),
    DoubleEnded(DoubleEnded),
}

impl TimePointManager {
    /// A fresh single ended manager.
    pub fn single_ended() -> Self {
        Self::SingleEnded(SingleEnded::default())
    }

    /// A fresh double ended manager, growing the begin branch to keep the share of begin time points close to `ratio`.
    pub fn double_ended(ratio: f64, top: TopElementMode) -> Self {
        Self::DoubleEnded(DoubleEnded::new(ratio, top))
    }

    /// Allocates a fresh time point, growing the timeline by one.
    pub fn acquire_next(&mut self) -> TimePoint {
        let fresh = match self {
            Self::SingleEnded(manager) => manager.acquire_next(),
            Self::DoubleEnded(manager) => manager.acquire_next(),
        };
        log::debug!(target: targets::TIMELINE, "Acquired {fresh}");
        fresh
    }

    /// The time point immediately after `time_point` in the plan.
    pub fn successor(&self, time_point: TimePoint) -> Result<TimePoint, err::TimelineError> {
        match self {
            Self::SingleEnded(manager) => manager.successor(time_point),
            Self::DoubleEnded(manager) => manager.successor(time_point),
        }
    }

    /// The time point immediately before `time_point` in the plan.
    pub fn predecessor(&self, time_point: TimePoint) -> Result<TimePoint, err::TimelineError> {
        match self {
            Self::SingleEnded(manager) => manager.predecessor(time_point),
            Self::DoubleEnded(manager) => manager.predecessor(time_point),
        }
    }

    /// Whether `time_point` was grown forwards, from the start of the plan.
    pub fn is_on_forward_branch(&self, time_point: TimePoint) -> bool {
        match self {
            Self::SingleEnded(_) => true,
            Self::DoubleEnded(_) => time_point.branch == Branch::Begin,
        }
    }

    /// The first time point of the plan.
    pub fn first(&self) -> TimePoint {
        match self {
            Self::SingleEnded(manager) => manager.first(),
            Self::DoubleEnded(manager) => manager.first(),
        }
    }

    /// The last time point of the plan.
    ///
    /// For a single ended manager this is the most recent allocation, and so is only meaningful once some time point has been allocated.
    pub fn last(&self) -> TimePoint {
        match self {
            Self::SingleEnded(manager) => manager.last(),
            Self::DoubleEnded(manager) => manager.last(),
        }
    }

    /// A count of the distinct points of the plan, where a pair of duplicated top elements counts once.
    pub fn distinct_points(&self) -> usize {
        match self {
            Self::SingleEnded(manager) => manager.distinct_points(),
            Self::DoubleEnded(manager) => manager.distinct_points(),
        }
    }

    /// The distinct time points of the plan, in order, from [first](Self::first) to [last](Self::last).
    ///
    /// Walks by [successor](Self::successor), and so the duplicate of a top element is skipped.
    pub fn timeline(&self) -> Result<Vec<TimePoint>, err::TimelineError> {
        let count = self.distinct_points();
        let mut points = Vec::with_capacity(count);
        if count == 0 {
            return Ok(points);
        }

        let mut current = self.first();
        points.push(current);
        for _ in 1..count {
            current = self.successor(current)?;
            points.push(current);
        }
        Ok(points)
    }
}
