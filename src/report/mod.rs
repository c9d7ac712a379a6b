//! Reports sum up what a set of pieces cost, overall and per person.
//!
//! Building a report is a pure read over the pieces given: filter, keep the
//! order, add up. Turning a report into something printable lives in
//! [document].
//!
//! [document]: document/index.html

pub mod document;
pub mod format;

use crate::models::piece::Piece;
use getset::{CopyGetters, Getters};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Which pieces make it into a report. Both conditions must hold; an unset
/// condition lets everything through.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportFilter {
    people: Option<HashSet<String>>,
    date: Option<String>,
}

impl ReportFilter {
    /// A filter that lets every piece through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only keep pieces made by one of `people`. An empty list means no
    /// person filter at all.
    pub fn with_people<I, T>(mut self, people: I) -> Self
        where I: IntoIterator<Item = T>,
              T: Into<String>,
    {
        let people: HashSet<String> = people.into_iter().map(|p| p.into()).collect();
        self.people = if people.is_empty() { None } else { Some(people) };
        self
    }

    /// Only keep pieces produced on exactly `date` (compared as text). An
    /// empty date means no date filter.
    pub fn with_date<T: Into<String>>(mut self, date: T) -> Self {
        let date = date.into();
        self.date = if date.is_empty() { None } else { Some(date) };
        self
    }

    /// Does this piece make the cut?
    pub fn matches(&self, piece: &Piece) -> bool {
        let person_ok = match &self.people {
            Some(people) => people.contains(piece.person_name()),
            None => true,
        };
        let date_ok = match &self.date {
            Some(date) => piece.production_date() == date,
            None => true,
        };
        person_ok && date_ok
    }
}

/// One person's share of a report.
#[derive(Clone, Debug, PartialEq, Getters, CopyGetters, Serialize)]
pub struct PersonTotal {
    #[getset(get = "pub")]
    name: String,
    #[getset(get_copy = "pub")]
    total: f64,
}

/// A filtered, summed-up view over a set of pieces.
#[derive(Clone, Debug, PartialEq, Getters, CopyGetters, Serialize)]
pub struct Report {
    /// The pieces that passed the filter, in their original order
    #[getset(get = "pub")]
    pieces: Vec<Piece>,
    /// Sum of every piece's total
    #[getset(get_copy = "pub")]
    grand_total: f64,
    /// Per-person sums, in order of each person's first appearance
    #[getset(get = "pub")]
    per_person: Vec<PersonTotal>,
}

impl Report {
    /// How many pieces made it in
    pub fn count(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Look up one person's subtotal.
    pub fn person_total(&self, name: &str) -> Option<f64> {
        self.per_person.iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.total)
    }
}

/// Filter `pieces` and total them up.
///
/// Sums run in input order, so the same pieces in the same order always give
/// bit-for-bit the same totals.
pub fn build_report(pieces: &[Piece], filter: &ReportFilter) -> Report {
    let mut filtered = Vec::new();
    let mut grand_total = 0.0;
    let mut per_person: Vec<PersonTotal> = Vec::new();
    // name -> index into per_person
    let mut person_idx: HashMap<String, usize> = HashMap::new();

    for piece in pieces.iter().filter(|p| filter.matches(p)) {
        let total = piece.total_cost();
        grand_total += total;
        match person_idx.get(piece.person_name()) {
            Some(idx) => per_person[*idx].total += total,
            None => {
                person_idx.insert(piece.person_name().clone(), per_person.len());
                per_person.push(PersonTotal {
                    name: piece.person_name().clone(),
                    total,
                });
            }
        }
        filtered.push(piece.clone());
    }

    Report {
        pieces: filtered,
        grand_total,
        per_person,
    }
}

/// Everyone who has made a piece, sorted and without blanks. These are the
/// choices offered for the person filter.
pub fn people(pieces: &[Piece]) -> Vec<String> {
    pieces.iter()
        .map(|p| p.person_name())
        .filter(|name| !name.is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test::*;

    fn sample() -> Vec<Piece> {
        vec![
            make_piece_weighing("Ana", "01/01/2024", 2.0),
            make_piece_weighing("Bea", "01/01/2024", 1.5),
            make_piece_weighing("Ana", "02/01/2024", 0.75),
            make_piece_weighing("Caio", "03/01/2024", 3.1),
            make_piece_weighing("Bea", "02/01/2024", 0.4),
        ]
    }

    #[test]
    fn no_filter_keeps_everything_in_order() {
        let pieces = sample();
        let report = build_report(&pieces, &ReportFilter::new());
        assert_eq!(report.pieces(), &pieces);
        assert_eq!(report.count(), 5);
        let names: Vec<&str> = report.per_person().iter().map(|p| p.name().as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bea", "Caio"]);
    }

    #[test]
    fn filter_conjunction() {
        let pieces = vec![
            make_piece("Ana", "01/01/2024"),
            make_piece("Bea", "01/01/2024"),
            make_piece("Ana", "02/01/2024"),
        ];
        let filter = ReportFilter::new()
            .with_people(vec!["Ana"])
            .with_date("01/01/2024");
        let report = build_report(&pieces, &filter);
        assert_eq!(report.pieces(), &vec![pieces[0].clone()]);
        assert_eq!(report.grand_total(), pieces[0].total_cost());
        assert_eq!(report.per_person().len(), 1);
        assert_eq!(report.person_total("Ana"), Some(pieces[0].total_cost()));
        assert_eq!(report.person_total("Bea"), None);
    }

    #[test]
    fn date_compared_as_text() {
        let pieces = sample();
        let report = build_report(&pieces, &ReportFilter::new().with_date("1/1/2024"));
        assert!(report.is_empty());
        let report = build_report(&pieces, &ReportFilter::new().with_date("02/01/2024"));
        assert_eq!(report.count(), 2);
    }

    #[test]
    fn empty_filters_are_no_filters() {
        let pieces = sample();
        let filter = ReportFilter::new()
            .with_people(Vec::<String>::new())
            .with_date("");
        assert_eq!(filter, ReportFilter::new());
        assert_eq!(build_report(&pieces, &filter).count(), pieces.len());
    }

    #[test]
    fn totals_add_up() {
        let pieces = sample();
        let filters = vec![
            ReportFilter::new(),
            ReportFilter::new().with_people(vec!["Ana", "Bea"]),
            ReportFilter::new().with_date("02/01/2024"),
            ReportFilter::new().with_people(vec!["Caio"]).with_date("03/01/2024"),
        ];
        for filter in filters {
            let report = build_report(&pieces, &filter);
            let mut expected = 0.0;
            for piece in pieces.iter().filter(|p| filter.matches(p)) {
                expected += piece.total_cost();
            }
            assert_eq!(report.grand_total(), expected);
            let person_sum: f64 = report.per_person().iter().map(|p| p.total()).sum();
            assert!((person_sum - report.grand_total()).abs() < 1e-9);
        }
    }

    #[test]
    fn per_person_sums() {
        let pieces = sample();
        let report = build_report(&pieces, &ReportFilter::new());
        assert_eq!(report.person_total("Ana"), Some(pieces[0].total_cost() + pieces[2].total_cost()));
        assert_eq!(report.person_total("Bea"), Some(pieces[1].total_cost() + pieces[4].total_cost()));
        assert_eq!(report.person_total("Caio"), Some(pieces[3].total_cost()));
    }

    #[test]
    fn empty_input() {
        let report = build_report(&[], &ReportFilter::new().with_people(vec!["Ana"]));
        assert!(report.pieces().is_empty());
        assert_eq!(report.grand_total(), 0.0);
        assert!(report.per_person().is_empty());
    }

    #[test]
    fn lists_people() {
        let mut pieces = sample();
        pieces.push(make_piece("", "01/01/2024"));
        assert_eq!(people(&pieces), vec!["Ana", "Bea", "Caio"]);
        assert!(people(&[]).is_empty());
    }
}
