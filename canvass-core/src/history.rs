//! Aggregated visit history for a matched location.

use chrono::NaiveDate;

use crate::LeadEntry;

/// Totals derived from every [`LeadEntry`] belonging to one location.
///
/// All entries are aggregated, including several for the same day; the
/// store permits duplicates and the engine must not collapse them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisitHistory {
    /// Sum of leads over all entries.
    pub total_leads: u32,
    /// Sum of rejections over all entries.
    pub total_rejections: u32,
    /// Most recent entry date, if the location was ever visited.
    pub last_entry: Option<NaiveDate>,
    /// Whether any entry carries the sticky `no_prospects` flag.
    pub no_prospects: bool,
}

impl VisitHistory {
    /// Aggregates the entries whose `location_id` matches `location_id`.
    #[must_use]
    pub fn gather(entries: &[LeadEntry], location_id: u64) -> Self {
        let mut history = Self::default();
        for entry in entries.iter().filter(|e| e.location_id == location_id) {
            history.total_leads = history.total_leads.saturating_add(entry.leads);
            history.total_rejections = history.total_rejections.saturating_add(entry.rejections);
            history.no_prospects |= entry.no_prospects;
            history.last_entry = match history.last_entry {
                Some(latest) if latest >= entry.date => Some(latest),
                _ => Some(entry.date),
            };
        }
        history
    }

    /// `(leads − rejections) / leads`, or `None` when no leads were taken.
    ///
    /// Can be negative when rejections outnumber leads; the score weights
    /// that as actively undesirable, which is intended.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the rate is a float ratio of exact counts"
    )]
    pub fn success_rate(&self) -> Option<f64> {
        if self.total_leads == 0 {
            return None;
        }
        let leads = f64::from(self.total_leads);
        let rejections = f64::from(self.total_rejections);
        Some((leads - rejections) / leads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn entry(location_id: u64, date: &str, leads: u32, rejections: u32) -> LeadEntry {
        LeadEntry::new(location_id, day(date), leads, rejections, false)
    }

    #[rstest]
    fn aggregates_only_the_requested_location() {
        let entries = [
            entry(1, "2024-01-10", 4, 1),
            entry(2, "2024-02-01", 9, 9),
            entry(1, "2023-11-05", 2, 0),
        ];
        let history = VisitHistory::gather(&entries, 1);
        assert_eq!(history.total_leads, 6);
        assert_eq!(history.total_rejections, 1);
        assert_eq!(history.last_entry, Some(day("2024-01-10")));
    }

    #[rstest]
    fn duplicate_day_entries_all_count() {
        let entries = [entry(1, "2024-01-10", 3, 1), entry(1, "2024-01-10", 2, 1)];
        let history = VisitHistory::gather(&entries, 1);
        assert_eq!(history.total_leads, 5);
        assert_eq!(history.total_rejections, 2);
    }

    #[rstest]
    fn no_prospects_is_sticky_across_entries() {
        let entries = [
            entry(1, "2020-01-10", 3, 1),
            LeadEntry::new(1, day("2020-02-01"), 0, 0, true),
            entry(1, "2024-03-01", 5, 0),
        ];
        assert!(VisitHistory::gather(&entries, 1).no_prospects);
    }

    #[rstest]
    fn unmatched_location_yields_empty_history() {
        let history = VisitHistory::gather(&[], 9);
        assert_eq!(history, VisitHistory::default());
        assert_eq!(history.success_rate(), None);
    }

    #[rstest]
    #[case(10, 1, 0.9)]
    #[case(4, 4, 0.0)]
    #[case(2, 6, -2.0)]
    fn success_rate_spans_negative_values(
        #[case] leads: u32,
        #[case] rejections: u32,
        #[case] expected: f64,
    ) {
        let history = VisitHistory {
            total_leads: leads,
            total_rejections: rejections,
            last_entry: None,
            no_prospects: false,
        };
        assert_eq!(history.success_rate(), Some(expected));
    }
}
