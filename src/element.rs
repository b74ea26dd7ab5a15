//! The universal record node and its tag-keyed variant discriminators.
//!
//! Every line of a GEDCOM transmission becomes one [`Element`]. Rather than
//! one subclass per tag, the crate carries a single data block plus an
//! [`ElementKind`] discriminator assigned once, at construction, from a
//! static tag table. Queries that only make sense for a particular kind
//! live on the typed views in the submodules.

pub mod date;
pub mod event;
pub mod family;
pub mod individual;

use crate::{tags, tree::ElementId};

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// Discriminates the closed set of typed element variants.
///
/// Unknown tags fall back to [`ElementKind::Record`]. The discriminator is
/// what lets queries tell event kinds apart by type instead of comparing
/// tag strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum ElementKind {
    /// Any record without a dedicated variant.
    Record,
    /// An `INDI` record.
    Individual,
    /// A `FAM` record.
    Family,
    /// An `OBJE` multimedia record.
    Object,
    /// A `FILE` record.
    File,
    /// A `DATE` record.
    Date,
    /// A date-bearing event-detail record (birth, death, marriage, ...).
    Event(EventKind),
}

/// The event-detail tags, each typically carrying `DATE`, `PLAC` and `SOUR`
/// sub-records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum EventKind {
    Adoption,
    AdultChristening,
    Annulment,
    Baptism,
    BarMitzvah,
    BasMitzvah,
    Birth,
    Blessing,
    Burial,
    Caste,
    Census,
    ChildrenCount,
    Christening,
    Confirmation,
    Cremation,
    Death,
    Divorce,
    DivorceFiled,
    Education,
    Emigration,
    Engagement,
    FirstCommunion,
    /// The generic `EVEN` record.
    Generic,
    Graduation,
    IdentificationNumber,
    Immigration,
    Marriage,
    MarriageBann,
    MarriageContract,
    MarriageCount,
    MarriageLicense,
    MarriageSettlement,
    Nationality,
    Naturalization,
    Occupation,
    Ordination,
    PhysicalDescription,
    Probate,
    Property,
    Religion,
    Residence,
    Retirement,
    SocialSecurityNumber,
    Title,
    Will,
}

impl ElementKind {
    /// Chooses the variant for a tag token. Unknown tags map to
    /// [`ElementKind::Record`].
    #[must_use]
    pub fn from_tag(tag: &str) -> ElementKind {
        match tag {
            tags::INDIVIDUAL => ElementKind::Individual,
            tags::FAMILY => ElementKind::Family,
            tags::OBJECT => ElementKind::Object,
            tags::FILE => ElementKind::File,
            tags::DATE => ElementKind::Date,
            tags::ADOPTION => ElementKind::Event(EventKind::Adoption),
            tags::ADULT_CHRISTENING => ElementKind::Event(EventKind::AdultChristening),
            tags::ANNULMENT => ElementKind::Event(EventKind::Annulment),
            tags::BAPTISM => ElementKind::Event(EventKind::Baptism),
            tags::BAR_MITZVAH => ElementKind::Event(EventKind::BarMitzvah),
            tags::BAS_MITZVAH => ElementKind::Event(EventKind::BasMitzvah),
            tags::BIRTH => ElementKind::Event(EventKind::Birth),
            tags::BLESSING => ElementKind::Event(EventKind::Blessing),
            tags::BURIAL => ElementKind::Event(EventKind::Burial),
            tags::CASTE => ElementKind::Event(EventKind::Caste),
            tags::CENSUS => ElementKind::Event(EventKind::Census),
            tags::CHILDREN_COUNT => ElementKind::Event(EventKind::ChildrenCount),
            tags::CHRISTENING => ElementKind::Event(EventKind::Christening),
            tags::CONFIRMATION => ElementKind::Event(EventKind::Confirmation),
            tags::CREMATION => ElementKind::Event(EventKind::Cremation),
            tags::DEATH => ElementKind::Event(EventKind::Death),
            tags::DIVORCE => ElementKind::Event(EventKind::Divorce),
            tags::DIVORCE_FILED => ElementKind::Event(EventKind::DivorceFiled),
            tags::EDUCATION => ElementKind::Event(EventKind::Education),
            tags::EMIGRATION => ElementKind::Event(EventKind::Emigration),
            tags::ENGAGEMENT => ElementKind::Event(EventKind::Engagement),
            tags::EVENT => ElementKind::Event(EventKind::Generic),
            tags::FIRST_COMMUNION => ElementKind::Event(EventKind::FirstCommunion),
            tags::GRADUATION => ElementKind::Event(EventKind::Graduation),
            tags::IDENTIFICATION_NUMBER => ElementKind::Event(EventKind::IdentificationNumber),
            tags::IMMIGRATION => ElementKind::Event(EventKind::Immigration),
            tags::MARRIAGE => ElementKind::Event(EventKind::Marriage),
            tags::MARRIAGE_BANN => ElementKind::Event(EventKind::MarriageBann),
            tags::MARRIAGE_CONTRACT => ElementKind::Event(EventKind::MarriageContract),
            tags::MARRIAGE_COUNT => ElementKind::Event(EventKind::MarriageCount),
            tags::MARRIAGE_LICENSE => ElementKind::Event(EventKind::MarriageLicense),
            tags::MARRIAGE_SETTLEMENT => ElementKind::Event(EventKind::MarriageSettlement),
            tags::NATIONALITY => ElementKind::Event(EventKind::Nationality),
            tags::NATURALIZATION => ElementKind::Event(EventKind::Naturalization),
            tags::OCCUPATION => ElementKind::Event(EventKind::Occupation),
            tags::ORDINATION => ElementKind::Event(EventKind::Ordination),
            tags::PHYSICAL_DESCRIPTION => ElementKind::Event(EventKind::PhysicalDescription),
            tags::PROBATE => ElementKind::Event(EventKind::Probate),
            tags::PROPERTY => ElementKind::Event(EventKind::Property),
            tags::RELIGION => ElementKind::Event(EventKind::Religion),
            tags::RESIDENCE => ElementKind::Event(EventKind::Residence),
            tags::RETIREMENT => ElementKind::Event(EventKind::Retirement),
            tags::SOC_SEC_NUMBER => ElementKind::Event(EventKind::SocialSecurityNumber),
            tags::TITLE => ElementKind::Event(EventKind::Title),
            tags::WILL => ElementKind::Event(EventKind::Will),
            _ => ElementKind::Record,
        }
    }

    /// Whether this element is an event detail carrying a year-bearing
    /// `DATE` sub-record.
    #[must_use]
    pub fn is_event(self) -> bool {
        matches!(self, ElementKind::Event(_))
    }
}

/// One record of a GEDCOM transmission.
///
/// Each line has the format `level [pointer] tag [value]`, with elements
/// arranged hierarchically according to their level. A pointer has the
/// format `@pname@` and identifies the record so that other records may
/// refer to it by carrying the same token in their value field; a `FAMS`
/// line with value `@F1@`, for example, points to the family record in
/// which the associated person is a spouse.
///
/// Elements live in a [`GedcomTree`](crate::tree::GedcomTree) arena and
/// refer to their parent and children by [`ElementId`] handle. Structural
/// operations (attaching children, the CONC/CONT value-wrapping protocol,
/// serialization) therefore live on the tree.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Element {
    level: i32,
    pointer: String,
    tag: String,
    value: String,
    terminator: String,
    kind: ElementKind,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
}

impl Element {
    /// Creates a detached element, choosing its variant from the tag.
    #[must_use]
    pub fn new(level: i32, pointer: &str, tag: &str, value: &str, terminator: &str) -> Element {
        Element {
            level,
            pointer: pointer.to_string(),
            tag: tag.to_string(),
            value: value.to_string(),
            terminator: terminator.to_string(),
            kind: ElementKind::from_tag(tag),
            children: Vec::new(),
            parent: None,
        }
    }

    /// The level of this element within the GEDCOM file. The virtual root
    /// uses -1.
    #[must_use]
    pub fn get_level(&self) -> i32 {
        self.level
    }

    /// The pointer of this element, e.g. `@I1@`, or the empty string.
    #[must_use]
    pub fn get_pointer(&self) -> &str {
        &self.pointer
    }

    /// The tag of this element.
    #[must_use]
    pub fn get_tag(&self) -> &str {
        &self.tag
    }

    /// The value stored on this line. Continuation fragments held by CONC
    /// or CONT children are not included; see
    /// [`GedcomTree::get_multi_line_value`](crate::tree::GedcomTree::get_multi_line_value).
    #[must_use]
    pub fn get_value(&self) -> &str {
        &self.value
    }

    /// Replaces the value of this element without touching its children.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    /// The line-ending bytes observed on ingest (`\n`, `\r` or `\r\n`),
    /// preserved for faithful emission.
    #[must_use]
    pub fn get_terminator(&self) -> &str {
        &self.terminator
    }

    /// The variant discriminator chosen for this element's tag.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Handles of the direct children, in document order.
    #[must_use]
    pub fn get_child_elements(&self) -> &[ElementId] {
        &self.children
    }

    /// Handle of the parent element, absent only for the virtual root.
    #[must_use]
    pub fn get_parent_element(&self) -> Option<ElementId> {
        self.parent
    }

    pub(crate) fn push_child(&mut self, child: ElementId) {
        self.children.push(child);
    }

    pub(crate) fn retain_children<F: FnMut(ElementId) -> bool>(&mut self, mut keep: F) {
        self.children.retain(|&id| keep(id));
    }

    pub(crate) fn set_parent(&mut self, parent: ElementId) {
        self.parent = Some(parent);
    }
}
