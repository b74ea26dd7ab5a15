//! Parses GEDCOM 5.5 transmissions into the element tree and answers
//! genealogical queries over it.
//!
//! The [`Parser`] owns the [`GedcomTree`] for a transmission. Elements may
//! be accessed hierarchically through [`Parser::get_root_child_elements`],
//! flat through [`Parser::get_element_list`], or by pointer through
//! [`Parser::get_element_dictionary`]; the flat views are cached and
//! rebuilt lazily after [`Parser::invalidate_cache`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::{
    element::{family::Family, individual::Individual, Element, ElementKind},
    error::GedcomError,
    scanner::{self, ScanOutcome, ScannedLine},
    tags,
    tree::{ElementId, GedcomTree},
};

/// Selects which family links of an individual to follow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FamilyLink {
    /// Families in which the individual is a spouse (`FAMS`).
    #[default]
    Spouse,
    /// Families in which the individual is a child (`FAMC`).
    Child,
}

impl FamilyLink {
    fn tag(self) -> &'static str {
        match self {
            FamilyLink::Spouse => tags::FAMILY_SPOUSE,
            FamilyLink::Child => tags::FAMILY_CHILD,
        }
    }
}

/// Restricts a parent, child or ancestor traversal to natural (biological)
/// relations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Relation {
    /// Every recorded relation.
    #[default]
    All,
    /// Only relations classified `Natural` by `_FREL`/`_MREL` sub-records.
    Natural,
}

/// Selects which members of a family to return.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FamilyMember {
    /// Husband, wife and children.
    #[default]
    All,
    /// Husband and wife.
    Parents,
    /// The husband only.
    Husband,
    /// The wife only.
    Wife,
    /// The children only.
    Children,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CacheState {
    Fresh,
    Stale,
}

#[derive(Debug)]
struct Cache {
    state: CacheState,
    list: Vec<ElementId>,
    dictionary: HashMap<String, ElementId>,
}

impl Cache {
    fn stale() -> Cache {
        Cache {
            state: CacheState::Stale,
            list: Vec::new(),
            dictionary: HashMap::new(),
        }
    }
}

/// Parses and manipulates GEDCOM 5.5 format data.
///
/// A parser exclusively owns the virtual root of its tree, and through it
/// every element of the last parsed transmission. Handles obtained before
/// a re-parse must not be used afterwards.
#[derive(Debug)]
pub struct Parser {
    tree: GedcomTree,
    cache: RefCell<Cache>,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new()
    }
}

impl Parser {
    /// Creates a parser holding an empty tree.
    #[must_use]
    pub fn new() -> Parser {
        Parser {
            tree: GedcomTree::new(),
            cache: RefCell::new(Cache::stale()),
        }
    }

    /// Borrows the element tree.
    #[must_use]
    pub fn tree(&self) -> &GedcomTree {
        &self.tree
    }

    /// Mutably borrows the element tree.
    ///
    /// Call [`Parser::invalidate_cache`] after adding, removing or
    /// renaming pointer-bearing elements this way.
    pub fn tree_mut(&mut self) -> &mut GedcomTree {
        &mut self.tree
    }

    /// Empties the element list and dictionary so the next access returns
    /// updated data. The rebuild is deferred until one of them is read.
    pub fn invalidate_cache(&self) {
        *self.cache.borrow_mut() = Cache::stale();
    }

    /// The handle of the virtual root element containing all logical
    /// records as children. When serialized, the root itself converts to
    /// an empty string.
    #[must_use]
    pub fn get_root_element(&self) -> ElementId {
        self.tree.root()
    }

    /// The logical records of the transmission, in file order.
    #[must_use]
    pub fn get_root_child_elements(&self) -> &[ElementId] {
        self.tree.get(self.tree.root()).get_child_elements()
    }

    /// Every element of the transmission in document order (a pre-order
    /// traversal of the root's subtree, excluding the root itself).
    ///
    /// The list is cached; call [`Parser::invalidate_cache`] after direct
    /// tree mutation to see updated data.
    #[must_use]
    pub fn get_element_list(&self) -> Vec<ElementId> {
        self.with_cache(|cache| cache.list.clone())
    }

    /// Every pointer-bearing element keyed by its pointer. On duplicate
    /// pointers the last element in document order wins.
    ///
    /// The dictionary is cached; call [`Parser::invalidate_cache`] after
    /// direct tree mutation to see updated data.
    #[must_use]
    pub fn get_element_dictionary(&self) -> HashMap<String, ElementId> {
        self.with_cache(|cache| cache.dictionary.clone())
    }

    /// Looks up the element that carries the provided pointer.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::PointerNotFound`] when no element carries
    /// the pointer.
    pub fn get_element_by_pointer(&self, pointer: &str) -> Result<ElementId, GedcomError> {
        self.lookup_pointer(pointer)
            .ok_or_else(|| GedcomError::PointerNotFound {
                pointer: pointer.to_string(),
            })
    }

    /// Wraps an element in the individual view.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::NotAnIndividual`] for any other record kind.
    pub fn individual(&self, id: ElementId) -> Result<Individual<'_>, GedcomError> {
        Individual::new(&self.tree, id)
    }

    /// Wraps an element in the family view.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::NotAFamily`] for any other record kind.
    pub fn family(&self, id: ElementId) -> Result<Family<'_>, GedcomError> {
        Family::new(&self.tree, id)
    }

    /// Opens and parses a file as GEDCOM 5.5 formatted data.
    ///
    /// The file's bytes are split inclusively on `\n`, so each element
    /// keeps the terminator it was written with.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFileError::Io`] when the file cannot be read and
    /// [`ParseFileError::Gedcom`] when its contents fail to parse.
    pub fn parse_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        strict: bool,
    ) -> Result<(), ParseFileError> {
        let contents = fs::read(path).map_err(ParseFileError::Io)?;
        self.parse(contents.split_inclusive(|&byte| byte == b'\n'), strict)
            .map_err(ParseFileError::Gedcom)
    }

    /// Parses an iterable of byte lines as GEDCOM 5.5 formatted data.
    ///
    /// Each item is one line including its terminator. In strict mode any
    /// malformed line aborts the parse; in lenient mode the recoveries of
    /// the line scanner apply. After a failed parse the tree is partial
    /// and should be discarded.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::FormatViolation`] for malformed input.
    pub fn parse<I>(&mut self, gedcom_stream: I, strict: bool) -> Result<(), GedcomError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        self.invalidate_cache();
        self.tree = GedcomTree::new();

        let mut last_element = self.tree.root();
        let mut line_number = 0;
        for line in gedcom_stream {
            line_number += 1;
            last_element = self.parse_line(line_number, line.as_ref(), last_element, strict)?;
        }
        debug!(lines = line_number, "parsed GEDCOM transmission");
        Ok(())
    }

    fn parse_line(
        &mut self,
        line_number: usize,
        raw: &[u8],
        last_element: ElementId,
        strict: bool,
    ) -> Result<ElementId, GedcomError> {
        let text = scanner::decode_line(raw, line_number, strict)?;
        let scanned = match scanner::scan_line(&text, line_number, strict)? {
            ScanOutcome::Record(line) => line,
            ScanOutcome::Continuation { value, terminator } => {
                debug!(line = line_number, "folded stray text into a continuation");
                self.continuation_of(last_element, value, terminator)
            }
        };

        // A line may be at most one level deeper than its predecessor.
        if scanned.level > self.tree.get(last_element).get_level() + 1 {
            return Err(GedcomError::FormatViolation {
                line: line_number,
                text,
            });
        }

        let element = Element::new(
            scanned.level,
            &scanned.pointer,
            &scanned.tag,
            &scanned.value,
            &scanned.terminator,
        );

        // Start with the last element as parent, back up as necessary.
        let mut parent_element = last_element;
        while self.tree.get(parent_element).get_level() > scanned.level - 1 {
            match self.tree.get(parent_element).get_parent_element() {
                Some(parent) => parent_element = parent,
                None => break,
            }
        }

        Ok(self.tree.add_child_element(parent_element, element))
    }

    /// Shapes recovered free text into an implicit continuation of the
    /// last element: a further CONT when that element already is a
    /// continuation, otherwise a CONC one level below it.
    fn continuation_of(
        &self,
        last_element: ElementId,
        value: String,
        terminator: String,
    ) -> ScannedLine {
        let last = self.tree.get(last_element);
        let is_continuation =
            last.get_tag() == tags::CONCATENATION || last.get_tag() == tags::CONTINUED;
        if is_continuation {
            ScannedLine {
                level: last.get_level(),
                pointer: String::new(),
                tag: tags::CONTINUED.to_string(),
                value,
                terminator,
            }
        } else {
            ScannedLine {
                level: last.get_level() + 1,
                pointer: String::new(),
                tag: tags::CONCATENATION.to_string(),
                value,
                terminator,
            }
        }
    }

    // Methods for analyzing individuals and relationships between them.

    /// Returns the family elements linked from an individual.
    ///
    /// A link is followed only when its pointer resolves to a family
    /// record; dangling links and links to other record kinds are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::NotAnIndividual`] when `individual` is not
    /// an `INDI` element.
    pub fn get_families(
        &self,
        individual: ElementId,
        family_link: FamilyLink,
    ) -> Result<Vec<ElementId>, GedcomError> {
        Individual::new(&self.tree, individual)?;

        let mut families = Vec::new();
        for &child in self.tree.get(individual).get_child_elements() {
            let element = self.tree.get(child);
            if element.get_tag() != family_link.tag() {
                continue;
            }
            let Some(family) = self.lookup_pointer(element.get_value()) else {
                continue;
            };
            if self.tree.get(family).kind() == ElementKind::Family {
                families.push(family);
            }
        }
        Ok(families)
    }

    /// Returns the marriages of an individual as `(date, place)` pairs,
    /// one per `MARR` record of the individual's spouse-families.
    ///
    /// Within one `MARR` record the last `DATE` and last `PLAC` seen win;
    /// a marriage without them reports empty strings.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::NotAnIndividual`] when `individual` is not
    /// an `INDI` element.
    pub fn get_marriages(
        &self,
        individual: ElementId,
    ) -> Result<Vec<(String, String)>, GedcomError> {
        let mut marriages = Vec::new();
        for family in self.get_families(individual, FamilyLink::Spouse)? {
            for &family_data in self.tree.get(family).get_child_elements() {
                if self.tree.get(family_data).get_tag() != tags::MARRIAGE {
                    continue;
                }
                let mut date = String::new();
                let mut place = String::new();
                for &marriage_data in self.tree.get(family_data).get_child_elements() {
                    let record = self.tree.get(marriage_data);
                    if record.get_tag() == tags::DATE {
                        date = record.get_value().to_string();
                    }
                    if record.get_tag() == tags::PLACE {
                        place = record.get_value().to_string();
                    }
                }
                marriages.push((date, place));
            }
        }
        Ok(marriages)
    }

    /// Returns the marriage years of an individual.
    ///
    /// The year is the final whitespace-separated token of each
    /// `MARR`/`DATE` value; tokens that fail to parse are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::NotAnIndividual`] when `individual` is not
    /// an `INDI` element.
    pub fn get_marriage_years(&self, individual: ElementId) -> Result<Vec<i32>, GedcomError> {
        let mut years = Vec::new();
        for family in self.get_families(individual, FamilyLink::Spouse)? {
            for &family_data in self.tree.get(family).get_child_elements() {
                if self.tree.get(family_data).get_tag() != tags::MARRIAGE {
                    continue;
                }
                for &marriage_data in self.tree.get(family_data).get_child_elements() {
                    let record = self.tree.get(marriage_data);
                    if record.get_tag() != tags::DATE {
                        continue;
                    }
                    let token = record.get_value().split_whitespace().last().unwrap_or("");
                    if let Ok(year) = token.parse::<i32>() {
                        years.push(year);
                    }
                }
            }
        }
        Ok(years)
    }

    /// Whether one of the marriage years of an individual matches the
    /// supplied year.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::NotAnIndividual`] when `individual` is not
    /// an `INDI` element.
    pub fn marriage_year_match(
        &self,
        individual: ElementId,
        year: i32,
    ) -> Result<bool, GedcomError> {
        Ok(self.get_marriage_years(individual)?.contains(&year))
    }

    /// Whether one of the marriage years of an individual lies in the
    /// given inclusive range.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::NotAnIndividual`] when `individual` is not
    /// an `INDI` element.
    pub fn marriage_range_match(
        &self,
        individual: ElementId,
        from_year: i32,
        to_year: i32,
    ) -> Result<bool, GedcomError> {
        Ok(self
            .get_marriage_years(individual)?
            .iter()
            .any(|&year| from_year <= year && year <= to_year))
    }

    /// Returns the parents of an individual.
    ///
    /// With [`Relation::Natural`], only the parents whose `_MREL`/`_FREL`
    /// sub-record under the matching `CHIL` line is exactly `Natural`
    /// qualify.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::NotAnIndividual`] when `individual` is not
    /// an `INDI` element.
    pub fn get_parents(
        &self,
        individual: ElementId,
        relation: Relation,
    ) -> Result<Vec<ElementId>, GedcomError> {
        let mut parents = Vec::new();
        for family in self.get_families(individual, FamilyLink::Child)? {
            match relation {
                Relation::All => {
                    parents.extend(self.get_family_members(family, FamilyMember::Parents)?);
                }
                Relation::Natural => {
                    let pointer = self.tree.get(individual).get_pointer();
                    for &family_member in self.tree.get(family).get_child_elements() {
                        let member = self.tree.get(family_member);
                        if member.get_tag() != tags::CHILD || member.get_value() != pointer {
                            continue;
                        }
                        for &relation_record in member.get_child_elements() {
                            let record = self.tree.get(relation_record);
                            if record.get_value() != tags::NATURAL {
                                continue;
                            }
                            if record.get_tag() == tags::MOTHER_RELATION {
                                parents
                                    .extend(self.get_family_members(family, FamilyMember::Wife)?);
                            } else if record.get_tag() == tags::FATHER_RELATION {
                                parents.extend(
                                    self.get_family_members(family, FamilyMember::Husband)?,
                                );
                            }
                        }
                    }
                }
            }
        }
        Ok(parents)
    }

    /// Returns the children of an individual.
    ///
    /// With [`Relation::Natural`], the individual's own role in the family
    /// decides the required sub-tag: the husband's children must carry
    /// `_FREL Natural`, the wife's `_MREL Natural`.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::NotAnIndividual`] when `individual` is not
    /// an `INDI` element, and [`GedcomError::PointerNotFound`] when a
    /// qualifying `CHIL` pointer resolves to nothing.
    pub fn get_children(
        &self,
        individual: ElementId,
        relation: Relation,
    ) -> Result<Vec<ElementId>, GedcomError> {
        let mut children = Vec::new();
        for family in self.get_families(individual, FamilyLink::Spouse)? {
            match relation {
                Relation::All => {
                    children.extend(self.get_family_members(family, FamilyMember::Children)?);
                }
                Relation::Natural => {
                    // Find our relationship to the children - is this
                    // parent the husband or the wife of the family?
                    let pointer = self.tree.get(individual).get_pointer();
                    let mut required_tag = None;
                    for &family_member in self.tree.get(family).get_child_elements() {
                        let member = self.tree.get(family_member);
                        if member.get_value() != pointer {
                            continue;
                        }
                        if member.get_tag() == tags::WIFE {
                            required_tag = Some(tags::MOTHER_RELATION);
                        } else if member.get_tag() == tags::HUSBAND {
                            required_tag = Some(tags::FATHER_RELATION);
                        }
                    }

                    for &family_member in self.tree.get(family).get_child_elements() {
                        let member = self.tree.get(family_member);
                        if member.get_tag() != tags::CHILD {
                            continue;
                        }
                        for &relation_record in member.get_child_elements() {
                            let record = self.tree.get(relation_record);
                            if record.get_value() == tags::NATURAL
                                && Some(record.get_tag()) == required_tag
                            {
                                children.push(self.get_element_by_pointer(member.get_value())?);
                            }
                        }
                    }
                }
            }
        }
        Ok(children)
    }

    /// Returns the ancestors of an individual, parents before
    /// grandparents.
    ///
    /// The traversal neither deduplicates shared ancestors nor detects
    /// cycles; the data model assumes acyclic ancestry, and cyclic input
    /// does not terminate.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::NotAnIndividual`] when `individual` is not
    /// an `INDI` element.
    pub fn get_ancestors(
        &self,
        individual: ElementId,
        relation: Relation,
    ) -> Result<Vec<ElementId>, GedcomError> {
        let parents = self.get_parents(individual, relation)?;
        let mut ancestors = parents.clone();
        for parent in parents {
            ancestors.extend(self.get_ancestors(parent, relation)?);
        }
        Ok(ancestors)
    }

    /// Returns the first path of natural-parent links from `descendant` to
    /// `ancestor`, both inclusive, or `None` when no such path exists.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::NotAnIndividual`] when either argument is
    /// not an `INDI` element.
    pub fn find_path_to_ancestor(
        &self,
        descendant: ElementId,
        ancestor: ElementId,
    ) -> Result<Option<Vec<ElementId>>, GedcomError> {
        Individual::new(&self.tree, descendant)?;
        Individual::new(&self.tree, ancestor)?;
        self.find_path_from(descendant, ancestor, vec![descendant])
    }

    fn find_path_from(
        &self,
        current: ElementId,
        ancestor: ElementId,
        path: Vec<ElementId>,
    ) -> Result<Option<Vec<ElementId>>, GedcomError> {
        if self.tree.get(current).get_pointer() == self.tree.get(ancestor).get_pointer() {
            return Ok(Some(path));
        }
        for parent in self.get_parents(current, Relation::Natural)? {
            let mut extended = path.clone();
            extended.push(parent);
            if let Some(found) = self.find_path_from(parent, ancestor, extended)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// Returns the referenced individuals for members of a family,
    /// filtered by role. Pointers that resolve to nothing are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::NotAFamily`] when `family` is not a `FAM`
    /// element.
    pub fn get_family_members(
        &self,
        family: ElementId,
        members_type: FamilyMember,
    ) -> Result<Vec<ElementId>, GedcomError> {
        Family::new(&self.tree, family)?;

        let mut family_members = Vec::new();
        for &child in self.tree.get(family).get_child_elements() {
            let tag = self.tree.get(child).get_tag();
            let selected = match members_type {
                FamilyMember::All => {
                    tag == tags::HUSBAND || tag == tags::WIFE || tag == tags::CHILD
                }
                FamilyMember::Parents => tag == tags::HUSBAND || tag == tags::WIFE,
                FamilyMember::Husband => tag == tags::HUSBAND,
                FamilyMember::Wife => tag == tags::WIFE,
                FamilyMember::Children => tag == tags::CHILD,
            };
            if !selected {
                continue;
            }
            if let Some(member) = self.lookup_pointer(self.tree.get(child).get_value()) {
                family_members.push(member);
            }
        }
        Ok(family_members)
    }

    // Serialization.

    /// Formats the whole transmission as a GEDCOM string.
    #[must_use]
    pub fn to_gedcom_string(&self) -> String {
        self.tree.to_gedcom_string(self.tree.root(), true)
    }

    /// Writes the whole transmission to `writer`.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures from the writer.
    pub fn save_gedcom<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.to_gedcom_string().as_bytes())
    }

    // Private methods.

    fn lookup_pointer(&self, pointer: &str) -> Option<ElementId> {
        self.with_cache(|cache| cache.dictionary.get(pointer).copied())
    }

    fn with_cache<T>(&self, read: impl FnOnce(&Cache) -> T) -> T {
        let mut cache = self.cache.borrow_mut();
        if cache.state == CacheState::Stale {
            let mut list = Vec::new();
            for &child in self.get_root_child_elements() {
                self.build_list(child, &mut list);
            }
            let mut dictionary = HashMap::new();
            for &id in &list {
                let pointer = self.tree.get(id).get_pointer();
                if !pointer.is_empty() {
                    dictionary.insert(pointer.to_string(), id);
                }
            }
            *cache = Cache {
                state: CacheState::Fresh,
                list,
                dictionary,
            };
        }
        read(&cache)
    }

    fn build_list(&self, element: ElementId, element_list: &mut Vec<ElementId>) {
        element_list.push(element);
        for &child in self.tree.get(element).get_child_elements() {
            self.build_list(child, element_list);
        }
    }
}

/// An error from [`Parser::parse_file`]: either the file could not be
/// read, or its contents violate the GEDCOM format.
#[derive(Debug)]
pub enum ParseFileError {
    /// Reading the file failed.
    Io(std::io::Error),
    /// The file's contents failed to parse.
    Gedcom(GedcomError),
}

impl std::fmt::Display for ParseFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ParseFileError::Io(err) => write!(f, "IO error: {err}"),
            ParseFileError::Gedcom(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ParseFileError {}
