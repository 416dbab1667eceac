//! Party labels — which party holds the presidency each month, and whether
//! that month saw a transition.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Governing party for a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    Democrat,
    Republican,
}

impl Party {
    /// Parse a party label string. Only `"republican"` maps to Republican;
    /// every other value is treated as Democrat (source-data convention).
    pub fn from_label(label: &str) -> Party {
        if label.trim() == "republican" {
            Party::Republican
        } else {
            Party::Democrat
        }
    }
}

/// Whether the presidency changed party in a given month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    None,
    DemToRep,
    RepToDem,
}

impl Transition {
    /// Decode the source-data transition code: 0 = none, 1 = dem→rep,
    /// 2 = rep→dem. Any other code is invalid.
    pub fn from_code(code: u8) -> Option<Transition> {
        match code {
            0 => Some(Transition::None),
            1 => Some(Transition::DemToRep),
            2 => Some(Transition::RepToDem),
            _ => None,
        }
    }
}

/// Party and transition state for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyLabel {
    /// First day of the labeled month.
    pub month: NaiveDate,
    pub party: Party,
    pub transition: Transition,
}

/// Ordered, one-entry-per-month label series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyLabelSeries {
    labels: Vec<PartyLabel>,
}

/// Normalize any date to the first day of its month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .unwrap_or(date)
}

impl PartyLabelSeries {
    /// Build a series from labels already sorted by month. Months are
    /// normalized to the first of the month; `None` if any month repeats or
    /// the order is not ascending.
    pub fn new(labels: Vec<PartyLabel>) -> Option<Self> {
        let labels: Vec<PartyLabel> = labels
            .into_iter()
            .map(|l| PartyLabel {
                month: month_start(l.month),
                ..l
            })
            .collect();
        if labels.windows(2).any(|w| w[0].month >= w[1].month) {
            return None;
        }
        Some(Self { labels })
    }

    pub fn labels(&self) -> &[PartyLabel] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The label for the month containing `date`, if present.
    pub fn label_for(&self, date: NaiveDate) -> Option<&PartyLabel> {
        let key = month_start(date);
        self.labels
            .binary_search_by_key(&key, |l| l.month)
            .ok()
            .map(|i| &self.labels[i])
    }

    /// Sub-series restricted to the inclusive date range [start, end].
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> PartyLabelSeries {
        let labels = self
            .labels
            .iter()
            .filter(|l| l.month >= start && l.month <= end)
            .copied()
            .collect();
        Self { labels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn label(month: &str, party: Party, transition: Transition) -> PartyLabel {
        PartyLabel {
            month: date(month),
            party,
            transition,
        }
    }

    #[test]
    fn only_exact_republican_is_republican() {
        assert_eq!(Party::from_label("republican"), Party::Republican);
        assert_eq!(Party::from_label(" republican "), Party::Republican);
        assert_eq!(Party::from_label("democrat"), Party::Democrat);
        // Convention from the source data: anything unrecognized is democrat.
        assert_eq!(Party::from_label("Republican"), Party::Democrat);
        assert_eq!(Party::from_label(""), Party::Democrat);
    }

    #[test]
    fn transition_codes() {
        assert_eq!(Transition::from_code(0), Some(Transition::None));
        assert_eq!(Transition::from_code(1), Some(Transition::DemToRep));
        assert_eq!(Transition::from_code(2), Some(Transition::RepToDem));
        assert_eq!(Transition::from_code(3), None);
    }

    #[test]
    fn series_normalizes_to_month_start() {
        let series = PartyLabelSeries::new(vec![
            label("1980-01-31", Party::Democrat, Transition::None),
            label("1980-02-29", Party::Democrat, Transition::None),
        ])
        .unwrap();
        assert_eq!(series.labels()[0].month, date("1980-01-01"));
        assert_eq!(series.labels()[1].month, date("1980-02-01"));
    }

    #[test]
    fn series_rejects_duplicate_months() {
        assert!(PartyLabelSeries::new(vec![
            label("1980-01-01", Party::Democrat, Transition::None),
            label("1980-01-15", Party::Democrat, Transition::None),
        ])
        .is_none());
    }

    #[test]
    fn label_lookup_by_any_day_in_month() {
        let series = PartyLabelSeries::new(vec![
            label("1980-01-01", Party::Democrat, Transition::None),
            label("1980-02-01", Party::Republican, Transition::DemToRep),
        ])
        .unwrap();

        let hit = series.label_for(date("1980-02-17")).unwrap();
        assert_eq!(hit.party, Party::Republican);
        assert_eq!(hit.transition, Transition::DemToRep);
        assert!(series.label_for(date("1981-02-17")).is_none());
    }

    #[test]
    fn between_is_inclusive_on_month_starts() {
        let series = PartyLabelSeries::new(vec![
            label("1980-01-01", Party::Democrat, Transition::None),
            label("1980-02-01", Party::Democrat, Transition::None),
            label("1980-03-01", Party::Democrat, Transition::None),
        ])
        .unwrap();

        let sub = series.between(date("1980-02-01"), date("1980-03-01"));
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.labels()[0].month, date("1980-02-01"));
    }
}
