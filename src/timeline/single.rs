use crate::types::err::TimelineError;

use super::{Branch, TimePoint};

/// A manager which grows the plan forwards only.
///
/// Every time point is on the begin branch and the index of a time point is its position in the plan.
#[derive(Clone, Debug, Default)]
pub struct SingleEnded {
    next: u32,
}

impl SingleEnded {
    pub fn acquire_next(&mut self) -> TimePoint {
        let fresh = TimePoint::new(Branch::Begin, self.next);
        self.next += 1;
        fresh
    }

    fn is_valid(&self, time_point: TimePoint) -> bool {
        time_point.branch == Branch::Begin && time_point.index < self.next
    }

    pub fn successor(&self, time_point: TimePoint) -> Result<TimePoint, TimelineError> {
        if !self.is_valid(time_point) {
            return Err(TimelineError::InvalidArgument(time_point));
        }

        let successor = TimePoint::new(Branch::Begin, time_point.index + 1);
        match self.is_valid(successor) {
            true => Ok(successor),
            false => Err(TimelineError::OutOfRange(time_point)),
        }
    }

    pub fn predecessor(&self, time_point: TimePoint) -> Result<TimePoint, TimelineError> {
        if !self.is_valid(time_point) {
            return Err(TimelineError::InvalidArgument(time_point));
        }

        match time_point.index.checked_sub(1) {
            Some(index) => Ok(TimePoint::new(Branch::Begin, index)),
            None => Err(TimelineError::OutOfRange(time_point)),
        }
    }

    pub fn first(&self) -> TimePoint {
        TimePoint::new(Branch::Begin, 0)
    }

    pub fn last(&self) -> TimePoint {
        TimePoint::new(Branch::Begin, self.next.saturating_sub(1))
    }

    pub fn distinct_points(&self) -> usize {
        self.next as usize
    }
}

#[cfg(test)]
mod single_ended_tests {
    use super::*;

    #[test]
    fn basic() {
        let mut timeline = SingleEnded::default();

        let t0 = timeline.acquire_next();
        assert_eq!(timeline.first(), t0);
        assert_eq!(timeline.last(), t0);

        let t1 = timeline.acquire_next();
        assert_eq!(timeline.first(), t0);
        assert_eq!(timeline.last(), t1);
        assert_eq!(timeline.predecessor(t1), Ok(t0));
        assert_eq!(timeline.successor(t0), Ok(t1));

        let t2 = timeline.acquire_next();
        assert_eq!(timeline.first(), t0);
        assert_eq!(timeline.last(), t2);
        assert_eq!(timeline.predecessor(t1), Ok(t0));
        assert_eq!(timeline.successor(t1), Ok(t2));
    }

    #[test]
    fn successor_of_predecessor() {
        let mut timeline = SingleEnded::default();
        let points = (0..10).map(|_| timeline.acquire_next()).collect::<Vec<_>>();

        for point in &points[1..] {
            let back = timeline.predecessor(*point).unwrap();
            assert_eq!(timeline.successor(back), Ok(*point));
        }
    }

    #[test]
    fn boundaries() {
        let mut timeline = SingleEnded::default();
        let t0 = timeline.acquire_next();
        let t1 = timeline.acquire_next();

        assert_eq!(timeline.predecessor(t0), Err(TimelineError::OutOfRange(t0)));
        assert_eq!(timeline.successor(t1), Err(TimelineError::OutOfRange(t1)));
    }

    #[test]
    fn foreign_time_points() {
        let mut timeline = SingleEnded::default();
        timeline.acquire_next();

        let unallocated = TimePoint::new(Branch::Begin, 4);
        let from_the_end = TimePoint::new(Branch::End, 0);

        assert_eq!(
            timeline.successor(unallocated),
            Err(TimelineError::InvalidArgument(unallocated))
        );
        assert_eq!(
            timeline.predecessor(from_the_end),
            Err(TimelineError::InvalidArgument(from_the_end))
        );
    }
}
