use chrono::NaiveDate;
use std::mem::replace;

/// A half-open date range iterator that yields each date from the start date
/// up to, but not including, the end date.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl DateRange {
    /// Number of days in the range; zero when `end <= start`.
    pub fn num_days(&self) -> usize {
        (self.1 - self.0).num_days().max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 >= self.1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0 <= date && date < self.1
    }

    /// Smallest range covering every `(start, end)` span, or `None` for no spans.
    pub fn covering<I>(spans: I) -> Option<DateRange>
    where
        I: IntoIterator<Item = (NaiveDate, NaiveDate)>,
    {
        spans.into_iter().fold(None, |acc, (start, end)| match acc {
            None => Some(DateRange(start, end)),
            Some(DateRange(lo, hi)) => Some(DateRange(lo.min(start), hi.max(end))),
        })
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 < self.1 {
            let next = self.0.succ_opt().unwrap_or(self.1);
            Some(replace(&mut self.0, next))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.num_days();
        (n, Some(n))
    }
}

impl ExactSizeIterator for DateRange {}
