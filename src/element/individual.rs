//! The `INDI` record view: names, life events and criteria matching.

use crate::{
    element::{event::Event, Element, ElementKind, EventKind},
    error::GedcomError,
    tags,
    tree::{ElementId, GedcomTree},
};
use regex::RegexBuilder;

/// The merged facts of a date-bearing event: its date, place and source
/// citations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventFacts {
    /// The raw `DATE` value, or the empty string.
    pub date: String,
    /// The raw `PLAC` value, or the empty string.
    pub place: String,
    /// The values of every `SOUR` citation, in document order.
    pub sources: Vec<String>,
}

/// A typed view over an `INDI` element.
#[derive(Clone, Copy, Debug)]
pub struct Individual<'a> {
    tree: &'a GedcomTree,
    id: ElementId,
}

impl<'a> Individual<'a> {
    /// Wraps an individual element.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::NotAnIndividual`] when the element is
    /// anything other than an `INDI` record.
    pub fn new(tree: &'a GedcomTree, id: ElementId) -> Result<Individual<'a>, GedcomError> {
        if tree.get(id).kind() == ElementKind::Individual {
            Ok(Individual { tree, id })
        } else {
            Err(GedcomError::NotAnIndividual {
                tag: tree.get(id).get_tag().to_string(),
            })
        }
    }

    /// The handle of the wrapped element.
    #[must_use]
    pub fn id(self) -> ElementId {
        self.id
    }

    fn element(self) -> &'a Element {
        self.tree.get(self.id)
    }

    /// Whether this individual carries a death record.
    #[must_use]
    pub fn is_deceased(self) -> bool {
        self.tree.has_child_tag(self.id, tags::DEATH)
    }

    /// Whether this individual appears as a child of some family.
    #[must_use]
    pub fn is_child(self) -> bool {
        self.tree.has_child_tag(self.id, tags::FAMILY_CHILD)
    }

    /// Whether this individual appears as a spouse in some family.
    #[must_use]
    pub fn is_spouse(self) -> bool {
        self.tree.has_child_tag(self.id, tags::FAMILY_SPOUSE)
    }

    /// Whether this individual is marked private (`PRIV` with value `Y`).
    #[must_use]
    pub fn is_private(self) -> bool {
        self.children().any(|child| {
            child.get_tag() == tags::PRIVATE && child.get_value() == "Y"
        })
    }

    /// Returns this individual's name as a `(given name, surname)` pair.
    ///
    /// The first `NAME` record wins. When its value is non-empty it is
    /// split on the slash-delimited surname, and any suffix after the
    /// closing slash (e.g. `Jr`) is dropped. Otherwise the name is
    /// assembled from `GIVN` and `SURN` sub-records; whatever was found is
    /// returned, possibly empty strings.
    #[must_use]
    pub fn get_name(self) -> (String, String) {
        let mut given_name = String::new();
        let mut surname = String::new();
        let mut found_given_name = false;
        let mut found_surname = false;

        for child in self.children() {
            if child.get_tag() != tags::NAME {
                continue;
            }
            // Some GEDCOM files don't use child tags but instead place the
            // name in the value of the NAME tag.
            if !child.get_value().is_empty() {
                let mut parts = child.get_value().split('/');
                if let Some(before_slash) = parts.next() {
                    given_name = before_slash.trim().to_string();
                }
                if let Some(between_slashes) = parts.next() {
                    surname = between_slashes.trim().to_string();
                }
                return (given_name, surname);
            }

            for grandchild in self.children_of(child) {
                if grandchild.get_tag() == tags::GIVEN_NAME {
                    given_name = grandchild.get_value().to_string();
                    found_given_name = true;
                }
                if grandchild.get_tag() == tags::SURNAME {
                    surname = grandchild.get_value().to_string();
                    found_surname = true;
                }
            }
            if found_given_name && found_surname {
                return (given_name, surname);
            }
        }

        (given_name, surname)
    }

    /// The raw values of every `NAME` record, in document order.
    #[must_use]
    pub fn get_all_names(self) -> Vec<String> {
        self.children()
            .filter(|child| child.get_tag() == tags::NAME)
            .map(|child| child.get_value().to_string())
            .collect()
    }

    /// Case-insensitive regular-expression search against the surname.
    /// A pattern that fails to compile matches nothing.
    #[must_use]
    pub fn surname_match(self, surname_to_match: &str) -> bool {
        let (_, surname) = self.get_name();
        search_ignoring_case(surname_to_match, &surname)
    }

    /// Case-insensitive regular-expression search against the given name.
    /// A pattern that fails to compile matches nothing.
    #[must_use]
    pub fn given_name_match(self, given_name_to_match: &str) -> bool {
        let (given_name, _) = self.get_name();
        search_ignoring_case(given_name_to_match, &given_name)
    }

    /// The value of the last `SEX` record, or the empty string.
    #[must_use]
    pub fn get_gender(self) -> String {
        let mut gender = String::new();
        for child in self.children() {
            if child.get_tag() == tags::SEX {
                gender = child.get_value().to_string();
            }
        }
        gender
    }

    /// The birth facts of this individual, merged over every `BIRT`
    /// record: dates and places overwrite, sources accumulate.
    #[must_use]
    pub fn get_birth_data(self) -> EventFacts {
        self.facts_for_tag(tags::BIRTH)
    }

    /// The death facts of this individual; see [`Individual::get_birth_data`].
    #[must_use]
    pub fn get_death_data(self) -> EventFacts {
        self.facts_for_tag(tags::DEATH)
    }

    /// The burial facts of this individual; see [`Individual::get_birth_data`].
    #[must_use]
    pub fn get_burial_data(self) -> EventFacts {
        self.facts_for_tag(tags::BURIAL)
    }

    /// One set of facts per `CENS` record, in document order and without
    /// merging across censuses.
    #[must_use]
    pub fn get_census_data(self) -> Vec<EventFacts> {
        let mut censuses = Vec::new();
        for (child_id, child) in self.child_ids() {
            if child.get_tag() == tags::CENSUS {
                censuses.push(self.facts_of(child_id));
            }
        }
        censuses
    }

    /// The birth year of this individual, or -1 when unknown.
    #[must_use]
    pub fn get_birth_year(self) -> i32 {
        self.year_for_event(EventKind::Birth)
    }

    /// The death year of this individual, or -1 when unknown.
    #[must_use]
    pub fn get_death_year(self) -> i32 {
        self.year_for_event(EventKind::Death)
    }

    /// The value of the last `OCCU` record, or the empty string.
    #[must_use]
    pub fn get_occupation(self) -> String {
        let mut occupation = String::new();
        for child in self.children() {
            if child.get_tag() == tags::OCCUPATION {
                occupation = child.get_value().to_string();
            }
        }
        occupation
    }

    /// The `DATE` value under the last `CHAN` record, or the empty string.
    #[must_use]
    pub fn get_last_change_date(self) -> String {
        let mut date = String::new();
        for child in self.children() {
            if child.get_tag() != tags::CHANGE {
                continue;
            }
            for grandchild in self.children_of(child) {
                if grandchild.get_tag() == tags::DATE {
                    date = grandchild.get_value().to_string();
                }
            }
        }
        date
    }

    /// Whether the given year matches the birth year of this individual.
    #[must_use]
    pub fn birth_year_match(self, year: i32) -> bool {
        self.get_birth_year() == year
    }

    /// Whether the birth year of this individual lies within the given
    /// inclusive range.
    #[must_use]
    pub fn birth_range_match(self, from_year: i32, to_year: i32) -> bool {
        let birth_year = self.get_birth_year();
        from_year <= birth_year && birth_year <= to_year
    }

    /// Whether the given year matches the death year of this individual.
    #[must_use]
    pub fn death_year_match(self, year: i32) -> bool {
        self.get_death_year() == year
    }

    /// Whether the death year of this individual lies within the given
    /// inclusive range.
    #[must_use]
    pub fn death_range_match(self, from_year: i32, to_year: i32) -> bool {
        let death_year = self.get_death_year();
        from_year <= death_year && death_year <= to_year
    }

    /// Checks this individual against a colon-separated list of
    /// `key=value` criteria.
    ///
    /// Supported keys:
    ///
    /// * `surname=<pattern>` searches the surname
    /// * `name=<pattern>` searches the given name
    /// * `birth=<year>` / `death=<year>` match the exact year
    /// * `birth_range=<from>-<to>` / `death_range=<from>-<to>` match the
    ///   inclusive year range
    ///
    /// A pair without `=` makes the whole match fail, as does any value
    /// that fails to parse or any sub-match that misses. Unknown keys are
    /// ignored.
    #[must_use]
    pub fn criteria_match(self, criteria: &str) -> bool {
        if criteria.split(':').any(|criterion| !criterion.contains('=')) {
            return false;
        }

        let mut matched = true;
        for criterion in criteria.split(':') {
            let Some((key, value)) = criterion.split_once('=') else {
                return false;
            };
            match key {
                "surname" => {
                    if !self.surname_match(value) {
                        matched = false;
                    }
                }
                "name" => {
                    if !self.given_name_match(value) {
                        matched = false;
                    }
                }
                "birth" => match value.parse::<i32>() {
                    Ok(year) => {
                        if !self.birth_year_match(year) {
                            matched = false;
                        }
                    }
                    Err(_) => matched = false,
                },
                "birth_range" => match parse_year_range(value) {
                    Some((from_year, to_year)) => {
                        if !self.birth_range_match(from_year, to_year) {
                            matched = false;
                        }
                    }
                    None => matched = false,
                },
                "death" => match value.parse::<i32>() {
                    Ok(year) => {
                        if !self.death_year_match(year) {
                            matched = false;
                        }
                    }
                    Err(_) => matched = false,
                },
                "death_range" => match parse_year_range(value) {
                    Some((from_year, to_year)) => {
                        if !self.death_range_match(from_year, to_year) {
                            matched = false;
                        }
                    }
                    None => matched = false,
                },
                _ => {}
            }
        }

        matched
    }

    fn children(self) -> impl Iterator<Item = &'a Element> {
        self.element()
            .get_child_elements()
            .iter()
            .map(move |&child| self.tree.get(child))
    }

    fn child_ids(self) -> impl Iterator<Item = (ElementId, &'a Element)> {
        self.element()
            .get_child_elements()
            .iter()
            .map(move |&child| (child, self.tree.get(child)))
    }

    fn children_of(self, element: &'a Element) -> impl Iterator<Item = &'a Element> {
        element
            .get_child_elements()
            .iter()
            .map(move |&child| self.tree.get(child))
    }

    /// Overlays date, place and sources across every child with the given
    /// tag.
    fn facts_for_tag(self, tag: &str) -> EventFacts {
        let mut facts = EventFacts::default();
        for (child_id, child) in self.child_ids() {
            if child.get_tag() == tag {
                self.overlay_facts(child_id, &mut facts);
            }
        }
        facts
    }

    fn facts_of(self, id: ElementId) -> EventFacts {
        let mut facts = EventFacts::default();
        self.overlay_facts(id, &mut facts);
        facts
    }

    fn overlay_facts(self, id: ElementId, facts: &mut EventFacts) {
        for &grandchild in self.tree.get(id).get_child_elements() {
            let record = self.tree.get(grandchild);
            match record.get_tag() {
                tags::DATE => facts.date = record.get_value().to_string(),
                tags::PLACE => facts.place = record.get_value().to_string(),
                tags::SOURCE => facts.sources.push(record.get_value().to_string()),
                _ => {}
            }
        }
    }

    /// The year of the last event child of the given kind, -1 when none.
    fn year_for_event(self, kind: EventKind) -> i32 {
        let mut year = -1;
        for (child_id, child) in self.child_ids() {
            if child.kind() == ElementKind::Event(kind) {
                year = Event::of(self.tree, child_id).map_or(-1, Event::get_year_in_date);
            }
        }
        year
    }
}

fn search_ignoring_case(pattern: &str, text: &str) -> bool {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map(|matcher| matcher.is_match(text))
        .unwrap_or(false)
}

fn parse_year_range(value: &str) -> Option<(i32, i32)> {
    let (from_year, to_year) = value.split_once('-')?;
    Some((from_year.parse().ok()?, to_year.parse().ok()?))
}
