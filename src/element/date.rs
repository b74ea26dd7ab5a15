//! Year extraction from `DATE` records.
//!
//! Date values encompass a number of formats: plain dates, approximations
//! such as `ABT 1924`, and the two range forms `BET <A> AND <B>` and
//! `FROM <A> TO <B>`. Callers here aggregate by year only; no calendar
//! normalization is attempted beyond picking the year token.

use crate::{
    element::ElementKind,
    tree::{ElementId, GedcomTree},
};

/// Which end of a date range to report.
///
/// `Second` is the default, so a range such as `BET 1922 AND 1932` reports
/// its later year unless the caller asks for the first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DatePick {
    /// The first date of a range.
    First,
    /// The second date of a range.
    #[default]
    Second,
}

/// A typed view over a `DATE` element.
#[derive(Clone, Copy, Debug)]
pub struct Date<'a> {
    tree: &'a GedcomTree,
    id: ElementId,
}

impl<'a> Date<'a> {
    /// Wraps an element, or returns `None` when it is not a `DATE` record.
    #[must_use]
    pub fn of(tree: &'a GedcomTree, id: ElementId) -> Option<Date<'a>> {
        (tree.get(id).kind() == ElementKind::Date).then_some(Date { tree, id })
    }

    /// The handle of the wrapped element.
    #[must_use]
    pub fn id(self) -> ElementId {
        self.id
    }

    /// Tries to identify the year associated with this date; -1 when it
    /// cannot.
    #[must_use]
    pub fn get_year(self, pick: DatePick) -> i32 {
        year_of(self.tree.get(self.id).get_value(), pick)
    }

    /// [`Date::get_year`] with the default range pick (the second date).
    #[must_use]
    pub fn get_year_default(self) -> i32 {
        self.get_year(DatePick::default())
    }
}

fn is_between_and_statement(date_value: &str) -> bool {
    date_value.starts_with("BET ") && date_value.contains(" AND ")
}

fn is_from_to_statement(date_value: &str) -> bool {
    date_value.starts_with("FROM ") && date_value.contains(" TO ")
}

/// Picks the year out of a date value: ranges are split first, then the
/// last whitespace-separated token is parsed as a signed integer.
fn year_of(value: &str, pick: DatePick) -> i32 {
    let mut date_value = value.trim();

    let range = if is_between_and_statement(date_value) {
        date_value[4..].split_once(" AND ")
    } else if is_from_to_statement(date_value) {
        date_value[5..].split_once(" TO ")
    } else {
        None
    };

    if let Some((first, second)) = range {
        date_value = match pick {
            DatePick::First => first,
            DatePick::Second => second,
        };
    }

    let token = date_value.split_whitespace().last().unwrap_or("");
    token.parse::<i32>().unwrap_or(-1)
}
