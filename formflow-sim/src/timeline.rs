//! Day-by-day active panel inventory.
//!
//! An event holds its panels on every day of `[pour_date, release_date)`.
//! The simulation window runs from the earliest pour to the latest release,
//! and every day in it gets a snapshot, including days with nothing active.

use chrono::NaiveDate;
use formflow_core::date_range::DateRange;
use formflow_core::error::{FormflowError, Result};
use formflow_core::pour::PourEvent;
use formflow_utils::dates::{add_days, days_between};
use log::info;
use serde::{Deserialize, Serialize};

/// Anything that occupies a number of panels over a half-open date span.
///
/// Release dates are resolved by the caller; the simulator applies no buffer
/// policy of its own.
pub trait ActiveInterval {
    fn label(&self) -> &str;
    fn main_panels(&self) -> u32;
    fn pour_date(&self) -> NaiveDate;
    /// First day the panels are free again.
    fn release_date(&self) -> NaiveDate;
}

impl ActiveInterval for PourEvent {
    fn label(&self) -> &str {
        self.area_id()
    }

    fn main_panels(&self) -> u32 {
        self.kit().main_panels
    }

    fn pour_date(&self) -> NaiveDate {
        self.record().pour_date
    }

    fn release_date(&self) -> NaiveDate {
        PourEvent::release_date(self)
    }
}

/// Panels in use on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyInventorySnapshot {
    pub date: NaiveDate,
    pub panels_in_use: u64,
}

/// How the daily counts are computed. Both produce identical series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanStrategy {
    /// Check every event on every day.
    DayScan,
    /// Accumulate +panels at each pour and -panels at each release.
    #[default]
    SweepLine,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DemandSimulator {
    strategy: ScanStrategy,
    require_events: bool,
}

impl DemandSimulator {
    pub fn new(strategy: ScanStrategy) -> Self {
        DemandSimulator {
            strategy,
            require_events: false,
        }
    }

    /// Treat an empty project as [`FormflowError::EmptyProject`] instead of
    /// an empty timeline.
    pub fn require_events(mut self, require: bool) -> Self {
        self.require_events = require;
        self
    }

    pub fn strategy(&self) -> ScanStrategy {
        self.strategy
    }

    pub fn simulate<E: ActiveInterval>(&self, events: &[E]) -> Result<InventoryTimeline> {
        check_intervals(events)?;
        let window = match DateRange::covering(
            events.iter().map(|e| (e.pour_date(), e.release_date())),
        ) {
            Some(window) => window,
            None if self.require_events => return Err(FormflowError::EmptyProject),
            None => {
                info!("No pour events, returning an empty timeline");
                return Ok(InventoryTimeline::default());
            }
        };

        let snapshots = match self.strategy {
            ScanStrategy::DayScan => day_scan(events, window),
            ScanStrategy::SweepLine => sweep_line(events, window),
        };
        let timeline = InventoryTimeline { snapshots };
        info!(
            "Simulated {} events over {} days ({} to {}), peak {} panels",
            events.len(),
            window.num_days(),
            window.0,
            window.1,
            timeline.peak_demand()
        );
        Ok(timeline)
    }
}

fn check_intervals<E: ActiveInterval>(events: &[E]) -> Result<()> {
    match events.iter().find(|e| e.release_date() <= e.pour_date()) {
        Some(bad) => Err(FormflowError::InvalidDateRange {
            area_id: bad.label().to_string(),
            pour_date: bad.pour_date(),
            release_date: bad.release_date(),
        }),
        None => Ok(()),
    }
}

/// O(days x events) reference scan.
pub fn day_scan<E: ActiveInterval>(events: &[E], window: DateRange) -> Vec<DailyInventorySnapshot> {
    window
        .map(|date| DailyInventorySnapshot {
            date,
            panels_in_use: events
                .iter()
                .filter(|e| e.pour_date() <= date && date < e.release_date())
                .map(|e| u64::from(e.main_panels()))
                .sum(),
        })
        .collect()
}

/// Difference-array sweep over pour and release boundaries.
///
/// Every event must lie inside `window`.
pub fn sweep_line<E: ActiveInterval>(events: &[E], window: DateRange) -> Vec<DailyInventorySnapshot> {
    let mut deltas = vec![0i64; window.num_days() + 1];
    for event in events {
        let panels = i64::from(event.main_panels());
        let start = days_between(window.0, event.pour_date()) as usize;
        let end = days_between(window.0, event.release_date()) as usize;
        deltas[start] += panels;
        deltas[end] -= panels;
    }

    let mut running = 0i64;
    window
        .zip(deltas)
        .map(|(date, delta)| {
            running += delta;
            DailyInventorySnapshot {
                date,
                panels_in_use: running as u64,
            }
        })
        .collect()
}

/// Snapshot series for one simulation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryTimeline {
    snapshots: Vec<DailyInventorySnapshot>,
}

impl InventoryTimeline {
    pub fn snapshots(&self) -> &[DailyInventorySnapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Simulated window, `None` for an empty project.
    pub fn window(&self) -> Option<DateRange> {
        let first = self.snapshots.first()?;
        let last = self.snapshots.last()?;
        Some(DateRange(first.date, last.date.succ_opt()?))
    }

    /// Largest daily count, 0 for an empty project.
    pub fn peak_demand(&self) -> u64 {
        self.snapshots
            .iter()
            .map(|s| s.panels_in_use)
            .max()
            .unwrap_or(0)
    }

    /// First day on which the peak is reached.
    pub fn peak_date(&self) -> Option<NaiveDate> {
        let peak = self.peak_demand();
        self.snapshots
            .iter()
            .find(|s| s.panels_in_use == peak)
            .map(|s| s.date)
    }

    /// Panels in use on `date`; 0 outside the window.
    pub fn panels_on(&self, date: NaiveDate) -> u64 {
        self.snapshots
            .iter()
            .find(|s| s.date == date)
            .map_or(0, |s| s.panels_in_use)
    }

    /// The series followed by `days` trailing zero days, for charting.
    pub fn with_display_padding(&self, days: u32) -> Vec<DailyInventorySnapshot> {
        let mut padded = self.snapshots.clone();
        if let Some(last) = self.snapshots.last() {
            padded.extend((1..=days).filter_map(|i| {
                add_days(last.date, i).map(|date| DailyInventorySnapshot {
                    date,
                    panels_in_use: 0,
                })
            }));
        }
        padded
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[derive(Debug, Clone)]
    pub(crate) struct Span {
        pub id: String,
        pub panels: u32,
        pub pour: NaiveDate,
        pub release: NaiveDate,
    }

    impl ActiveInterval for Span {
        fn label(&self) -> &str {
            &self.id
        }
        fn main_panels(&self) -> u32 {
            self.panels
        }
        fn pour_date(&self) -> NaiveDate {
            self.pour
        }
        fn release_date(&self) -> NaiveDate {
            self.release
        }
    }

    pub(crate) fn day(offset: u32) -> NaiveDate {
        add_days(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), offset).unwrap()
    }

    pub(crate) fn span(panels: u32, pour: u32, days: u32) -> Span {
        Span {
            id: format!("S{}-{}", pour, panels),
            panels,
            pour: day(pour),
            release: day(pour + days),
        }
    }

    fn both(events: &[Span]) -> (InventoryTimeline, InventoryTimeline) {
        let scan = DemandSimulator::new(ScanStrategy::DayScan)
            .simulate(events)
            .unwrap();
        let sweep = DemandSimulator::new(ScanStrategy::SweepLine)
            .simulate(events)
            .unwrap();
        (scan, sweep)
    }

    #[test]
    fn test_single_event_active_through_day_before_release() {
        let (timeline, _) = both(&[span(2, 0, 3)]);
        let counts: Vec<u64> = timeline.snapshots().iter().map(|s| s.panels_in_use).collect();
        assert_eq!(counts, vec![2, 2, 2]);
        assert_eq!(timeline.window(), Some(DateRange(day(0), day(3))));
        assert_eq!(timeline.panels_on(day(3)), 0);
        assert_eq!(timeline.peak_demand(), 2);
        assert_eq!(timeline.peak_date(), Some(day(0)));
    }

    #[test]
    fn test_identical_spans_are_additive() {
        let events = vec![span(3, 2, 4), span(3, 2, 4), span(5, 2, 4)];
        let (scan, sweep) = both(&events);
        assert_eq!(scan, sweep);
        assert_eq!(scan.peak_demand(), 11);
        assert!(scan.snapshots().iter().all(|s| s.panels_in_use == 11));
    }

    #[test]
    fn test_gap_days_are_reported_as_zero() {
        let events = vec![span(4, 0, 2), span(1, 10, 2)];
        let (scan, sweep) = both(&events);
        assert_eq!(scan, sweep);
        assert_eq!(scan.len(), 12);
        for offset in 2..10 {
            assert_eq!(scan.panels_on(day(offset)), 0);
        }
        assert_eq!(scan.snapshots()[5].date, day(5));
        assert_eq!(scan.snapshots()[5].panels_in_use, 0);
    }

    #[test]
    fn test_non_overlapping_peak_is_largest_event() {
        let events = vec![span(2, 0, 3), span(7, 3, 3), span(4, 6, 1), span(5, 20, 2)];
        let (scan, sweep) = both(&events);
        assert_eq!(scan, sweep);
        assert_eq!(scan.peak_demand(), 7);
        assert_eq!(scan.peak_date(), Some(day(3)));
    }

    #[test]
    fn test_empty_project() {
        let (scan, sweep) = both(&[]);
        assert!(scan.is_empty());
        assert!(sweep.is_empty());
        assert_eq!(scan.peak_demand(), 0);
        assert_eq!(scan.peak_date(), None);
        assert_eq!(scan.window(), None);
        assert!(scan.with_display_padding(10).is_empty());
    }

    #[test]
    fn test_empty_project_can_be_required() {
        let result = DemandSimulator::default()
            .require_events(true)
            .simulate::<Span>(&[]);
        assert!(matches!(result, Err(FormflowError::EmptyProject)));
    }

    #[test]
    fn test_release_not_after_pour_is_fatal() {
        let mut bad = span(2, 5, 1);
        bad.release = bad.pour;
        let events = vec![span(1, 0, 3), bad];
        for strategy in [ScanStrategy::DayScan, ScanStrategy::SweepLine] {
            let result = DemandSimulator::new(strategy).simulate(&events);
            assert!(matches!(
                result,
                Err(FormflowError::InvalidDateRange { ref area_id, .. }) if area_id == "S5-2"
            ));
        }
    }

    #[test]
    fn test_display_padding_does_not_move_peak() {
        let (timeline, _) = both(&[span(2, 0, 3), span(3, 1, 1)]);
        let padded = timeline.with_display_padding(10);
        assert_eq!(padded.len(), timeline.len() + 10);
        assert!(padded[timeline.len()..].iter().all(|s| s.panels_in_use == 0));
        assert_eq!(padded.last().unwrap().date, day(12));
        let padded_peak = padded.iter().map(|s| s.panels_in_use).max().unwrap();
        assert_eq!(padded_peak, timeline.peak_demand());
    }

    #[test]
    fn test_sweep_matches_scan_on_random_projects() {
        let mut rng = StdRng::seed_from_u64(0x5eed_f0a4);
        for _ in 0..250 {
            let count = rng.gen_range(0..40);
            let events: Vec<Span> = (0..count)
                .map(|_| span(rng.gen_range(1..15), rng.gen_range(0..90), rng.gen_range(1..10)))
                .collect();
            let (scan, sweep) = both(&events);
            assert_eq!(scan.snapshots(), sweep.snapshots());

            let total: u64 = events.iter().map(|e| u64::from(e.panels)).sum();
            let peak = sweep.peak_demand();
            assert!(peak <= total);

            if events.is_empty() {
                continue;
            }
            let biggest = events.iter().map(|e| u64::from(e.panels)).max().unwrap();
            assert!(peak >= biggest);

            // every event is on site at once exactly when the latest pour
            // happens before the earliest release
            let latest_pour = events.iter().map(|e| e.pour).max().unwrap();
            let earliest_release = events.iter().map(|e| e.release).min().unwrap();
            assert_eq!(peak == total, latest_pour < earliest_release);
        }
    }
}
