//! Event-detail records: births, deaths, marriages and the rest of the
//! date-bearing tags.

use crate::{
    element::{date::Date, ElementKind, EventKind},
    tree::{ElementId, GedcomTree},
};

/// A typed view over any event-detail element.
#[derive(Clone, Copy, Debug)]
pub struct Event<'a> {
    tree: &'a GedcomTree,
    id: ElementId,
}

impl<'a> Event<'a> {
    /// Wraps an element, or returns `None` when it is not an event detail.
    #[must_use]
    pub fn of(tree: &'a GedcomTree, id: ElementId) -> Option<Event<'a>> {
        tree.get(id).kind().is_event().then_some(Event { tree, id })
    }

    /// The handle of the wrapped element.
    #[must_use]
    pub fn id(self) -> ElementId {
        self.id
    }

    /// Which event this is.
    ///
    /// # Panics
    ///
    /// Cannot panic; the constructor only accepts event elements.
    #[must_use]
    pub fn event_kind(self) -> EventKind {
        match self.tree.get(self.id).kind() {
            ElementKind::Event(kind) => kind,
            _ => unreachable!("Event::of only wraps event elements"),
        }
    }

    /// The year of this event's `DATE` sub-record, or -1 when no date is
    /// present or none of its dates carries a recognizable year. The last
    /// `DATE` child wins.
    #[must_use]
    pub fn get_year_in_date(self) -> i32 {
        let mut year = -1;
        for &child in self.tree.get(self.id).get_child_elements() {
            if let Some(date) = Date::of(self.tree, child) {
                year = date.get_year_default();
            }
        }
        year
    }
}

#[cfg(test)]
mod tests {
    use crate::{element::EventKind, Parser};

    #[test]
    fn test_event_view_reads_the_year_of_its_date() {
        let sample = "\
            0 @I1@ INDI\n\
            1 BIRT\n\
            2 DATE 1 JAN 1900\n";
        let mut parser = Parser::new();
        parser.parse(sample.split_inclusive('\n'), true).unwrap();

        let individual = parser.get_element_by_pointer("@I1@").unwrap();
        let birth = parser.tree().get(individual).get_child_elements()[0];
        let event = super::Event::of(parser.tree(), birth).unwrap();
        assert_eq!(event.event_kind(), EventKind::Birth);
        assert_eq!(event.get_year_in_date(), 1900);
    }

    #[test]
    fn test_event_without_a_date_reports_the_unknown_sentinel() {
        let sample = "\
            0 @I1@ INDI\n\
            1 DEAT\n\
            2 PLAC Somewhere\n";
        let mut parser = Parser::new();
        parser.parse(sample.split_inclusive('\n'), true).unwrap();

        let individual = parser.get_element_by_pointer("@I1@").unwrap();
        let death = parser.tree().get(individual).get_child_elements()[0];
        let event = super::Event::of(parser.tree(), death).unwrap();
        assert_eq!(event.get_year_in_date(), -1);
    }
}
