use crate::types::err::TimelineError;

use super::{Branch, TimePoint};

/// How the tops of the two branches of a [DoubleEnded] manager meet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopElementMode {
    /// The two tops are distinct time points, and the successor of the begin top is the end top.
    Unique,

    /// The two tops are the same point of the plan.
    ///
    /// So, the successor of the element below the begin top is the end top, and the successor of the begin top is the element below the end top.
    Duplicated,
}

/// A manager which grows the plan from both ends.
///
/// The first two allocations seed the start and the end of the plan.
/// After, each allocation goes to the begin branch if the share of begin time points does not exceed the ratio, and to the end branch otherwise.
///
/// The first and last time points of the plan are fixed at the two seeds.
#[derive(Clone, Debug)]
pub struct DoubleEnded {
    /// The index of the top of the begin branch, or -1 if the branch is empty.
    begin_top: i64,

    /// The index of the top of the end branch, or -1 if the branch is empty.
    end_top: i64,

    ratio: f64,

    top: TopElementMode,
}

impl DoubleEnded {
    pub fn new(ratio: f64, top: TopElementMode) -> Self {
        DoubleEnded {
            begin_top: -1,
            end_top: -1,
            ratio,
            top,
        }
    }

    pub fn acquire_next(&mut self) -> TimePoint {
        if self.begin_top == -1 {
            return self.grow(Branch::Begin);
        }
        if self.end_top == -1 {
            return self.grow(Branch::End);
        }

        let count_begin = (self.begin_top + 1) as f64;
        let count_all = (self.begin_top + self.end_top + 2) as f64;
        match count_begin / count_all <= self.ratio {
            true => self.grow(Branch::Begin),
            false => self.grow(Branch::End),
        }
    }

    fn grow(&mut self, branch: Branch) -> TimePoint {
        let top = match branch {
            Branch::Begin => &mut self.begin_top,
            Branch::End => &mut self.end_top,
        };
        *top += 1;
        TimePoint::new(branch, *top as u32)
    }

    fn top_of(&self, branch: Branch) -> i64 {
        match branch {
            Branch::Begin => self.begin_top,
            Branch::End => self.end_top,
        }
    }

    fn is_valid(&self, time_point: TimePoint) -> bool {
        (time_point.index as i64) <= self.top_of(time_point.branch)
    }

    /// The time point at `index` of `branch`, if allocated.
    fn resolve(&self, branch: Branch, index: i64) -> Option<TimePoint> {
        match 0 <= index && index <= self.top_of(branch) {
            true => Some(TimePoint::new(branch, index as u32)),
            false => None,
        }
    }

    pub fn successor(&self, time_point: TimePoint) -> Result<TimePoint, TimelineError> {
        if !self.is_valid(time_point) {
            return Err(TimelineError::InvalidArgument(time_point));
        }

        let index = time_point.index as i64;
        let (mut branch, mut index) = match time_point.branch {
            Branch::Begin => (Branch::Begin, index + 1),
            Branch::End => (Branch::End, index - 1),
        };

        if branch == Branch::Begin {
            match self.top {
                TopElementMode::Duplicated => {
                    if index == self.begin_top {
                        (branch, index) = (Branch::End, self.end_top);
                    } else if index == self.begin_top + 1 {
                        (branch, index) = (Branch::End, self.end_top - 1);
                    }
                }

                TopElementMode::Unique => {
                    if index > self.begin_top {
                        (branch, index) = (Branch::End, self.end_top);
                    }
                }
            }
        }

        self.resolve(branch, index)
            .ok_or(TimelineError::OutOfRange(time_point))
    }

    pub fn predecessor(&self, time_point: TimePoint) -> Result<TimePoint, TimelineError> {
        if !self.is_valid(time_point) {
            return Err(TimelineError::InvalidArgument(time_point));
        }

        let index = time_point.index as i64;
        let (mut branch, mut index) = match time_point.branch {
            Branch::Begin => (Branch::Begin, index - 1),
            Branch::End => (Branch::End, index + 1),
        };

        if branch == Branch::End {
            match self.top {
                TopElementMode::Duplicated => {
                    if index == self.end_top {
                        (branch, index) = (Branch::Begin, self.begin_top);
                    } else if index == self.end_top + 1 {
                        (branch, index) = (Branch::Begin, self.begin_top - 1);
                    }
                }

                TopElementMode::Unique => {
                    if index > self.end_top {
                        (branch, index) = (Branch::Begin, self.begin_top);
                    }
                }
            }
        }

        self.resolve(branch, index)
            .ok_or(TimelineError::OutOfRange(time_point))
    }

    pub fn first(&self) -> TimePoint {
        TimePoint::new(Branch::Begin, 0)
    }

    pub fn last(&self) -> TimePoint {
        TimePoint::new(Branch::End, 0)
    }

    /// The top of the begin branch, if the branch is not empty.
    pub fn begin_top(&self) -> Option<TimePoint> {
        self.resolve(Branch::Begin, self.begin_top)
    }

    /// The top of the end branch, if the branch is not empty.
    pub fn end_top(&self) -> Option<TimePoint> {
        self.resolve(Branch::End, self.end_top)
    }

    pub fn distinct_points(&self) -> usize {
        let allocated = (self.begin_top + 1 + self.end_top + 1) as usize;
        match self.top {
            TopElementMode::Duplicated if self.begin_top >= 0 && self.end_top >= 0 => allocated - 1,
            _ => allocated,
        }
    }
}

#[cfg(test)]
mod double_ended_tests {
    use super::*;

    #[test]
    fn all_begin_unique() {
        let mut timeline = DoubleEnded::new(1.0, TopElementMode::Unique);

        let t0 = timeline.acquire_next();
        let tn = timeline.acquire_next();

        assert_eq!(timeline.first(), t0);
        assert_eq!(timeline.last(), tn);

        let mut previous = t0;
        for _ in 0..20 {
            let t = timeline.acquire_next();
            assert_eq!(t.branch(), Branch::Begin);
            assert_eq!(timeline.first(), t0);
            assert_eq!(timeline.last(), tn);
            assert_eq!(timeline.predecessor(t), Ok(previous));
            assert_eq!(timeline.successor(t), Ok(tn));
            previous = t;
        }
    }

    #[test]
    fn all_begin_duplicated() {
        let mut timeline = DoubleEnded::new(1.0, TopElementMode::Duplicated);

        let t0 = timeline.acquire_next();
        let tn = timeline.acquire_next();

        let mut previous = t0;
        for _ in 0..20 {
            let t = timeline.acquire_next();
            assert_eq!(t.branch(), Branch::Begin);
            assert_eq!(timeline.first(), t0);
            assert_eq!(timeline.last(), tn);
            assert_eq!(timeline.predecessor(t), Ok(previous));
            assert_eq!(timeline.successor(previous), Ok(tn));
            assert_eq!(timeline.successor(t), Err(TimelineError::OutOfRange(t)));
            previous = t;
        }
    }

    #[test]
    fn half_duplicated_alternates() {
        let mut timeline = DoubleEnded::new(0.5, TopElementMode::Duplicated);

        let t0 = timeline.acquire_next();
        let tn = timeline.acquire_next();

        let mut forward_expected = true;
        for i in 0..20 {
            let t = timeline.acquire_next();
            assert_eq!(t.branch() == Branch::Begin, forward_expected);
            forward_expected = !forward_expected;

            let mut forward = timeline.first();
            let mut backward = timeline.last();
            for _ in 0..=i {
                forward = timeline.successor(forward).unwrap();
                backward = timeline.predecessor(backward).unwrap();
            }
            assert_eq!(forward, tn);
            assert_eq!(backward, t0);
        }
    }

    #[test]
    fn seeds_only() {
        let mut duplicated = DoubleEnded::new(0.5, TopElementMode::Duplicated);
        duplicated.acquire_next();
        duplicated.acquire_next();
        assert_eq!(duplicated.distinct_points(), 1);

        let mut unique = DoubleEnded::new(0.5, TopElementMode::Unique);
        let t0 = unique.acquire_next();
        let tn = unique.acquire_next();
        assert_eq!(unique.distinct_points(), 2);
        assert_eq!(unique.successor(t0), Ok(tn));
        assert_eq!(unique.predecessor(tn), Ok(t0));
    }

    #[test]
    fn unique_boundaries() {
        let mut timeline = DoubleEnded::new(0.5, TopElementMode::Unique);
        let t0 = timeline.acquire_next();
        let tn = timeline.acquire_next();
        for _ in 0..5 {
            timeline.acquire_next();
        }

        assert_eq!(timeline.successor(tn), Err(TimelineError::OutOfRange(tn)));
        assert_eq!(timeline.predecessor(t0), Err(TimelineError::OutOfRange(t0)));
    }

    #[test]
    fn foreign_time_points() {
        let mut timeline = DoubleEnded::new(0.5, TopElementMode::Duplicated);
        timeline.acquire_next();

        // Only the begin seed exists.
        let end_seed = TimePoint::new(Branch::End, 0);
        assert_eq!(
            timeline.successor(end_seed),
            Err(TimelineError::InvalidArgument(end_seed))
        );

        let far = TimePoint::new(Branch::Begin, 7);
        assert_eq!(
            timeline.predecessor(far),
            Err(TimelineError::InvalidArgument(far))
        );
    }

    #[test]
    fn ratio_zero_grows_the_end() {
        let mut timeline = DoubleEnded::new(0.0, TopElementMode::Duplicated);
        timeline.acquire_next();
        timeline.acquire_next();
        for _ in 0..10 {
            assert_eq!(timeline.acquire_next().branch(), Branch::End);
        }
    }
}
