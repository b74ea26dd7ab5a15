//! The fixed catalog of GEDCOM 5.5 tag tokens used throughout the crate.
//!
//! Tags are four-to-five-character identifiers distinguishing record kinds.
//! Program-defined tags begin with an underscore and only carry meaning for
//! the system that wrote them; the two recognized here (`_FREL`, `_MREL`)
//! classify a child's relationship to each parent of a family.

#![allow(missing_docs)]

/// Creation of a child-parent relationship that does not exist biologically.
pub const ADOPTION: &str = "ADOP";
/// The religious event of baptizing and/or naming an adult person.
pub const ADULT_CHRISTENING: &str = "CHRA";
/// Declaring a marriage void from the beginning.
pub const ANNULMENT: &str = "ANUL";
/// The event of baptism, performed in infancy or later.
pub const BAPTISM: &str = "BAPM";
pub const BAR_MITZVAH: &str = "BARM";
pub const BAS_MITZVAH: &str = "BASM";
/// The event of entering into life.
pub const BIRTH: &str = "BIRT";
pub const BLESSING: &str = "BLES";
/// The event of the proper disposing of the mortal remains of a deceased
/// person.
pub const BURIAL: &str = "BURI";
pub const CASTE: &str = "CAST";
/// The periodic count of the population for a designated locality.
pub const CENSUS: &str = "CENS";
/// Indicates a change, correction, or modification, typically paired with a
/// [`DATE`] sub-record stating when it occurred.
pub const CHANGE: &str = "CHAN";
/// The natural, adopted, or sealed child of a father and a mother.
pub const CHILD: &str = "CHIL";
pub const CHILDREN_COUNT: &str = "NCHI";
/// The religious event of baptizing and/or naming a child.
pub const CHRISTENING: &str = "CHR";
/// An indicator that additional data belongs to the superior value, joined
/// without a space and without a line break. Values must be split at a
/// non-space, since trailing spaces are lost to GEDCOM's delimiter handling.
pub const CONCATENATION: &str = "CONC";
pub const CONFIRMATION: &str = "CONF";
/// An indicator that additional data belongs to the superior value, joined
/// with a line break.
pub const CONTINUED: &str = "CONT";
/// Disposal of the remains of a person's body by fire.
pub const CREMATION: &str = "CREM";
/// The time of an event in a calendar format.
pub const DATE: &str = "DATE";
/// The event when mortal life terminates.
pub const DEATH: &str = "DEAT";
pub const DIVORCE: &str = "DIV";
pub const DIVORCE_FILED: &str = "DIVF";
pub const EDUCATION: &str = "EDUC";
/// Leaving one's homeland with the intent of residing elsewhere.
pub const EMIGRATION: &str = "EMIG";
pub const ENGAGEMENT: &str = "ENGA";
/// A noteworthy happening related to an individual or family.
pub const EVENT: &str = "EVEN";
/// Identifies a family record, or a pointer to one.
pub const FAMILY: &str = "FAM";
/// A pointer to the family in which this person appears as a child.
pub const FAMILY_CHILD: &str = "FAMC";
/// A pointer to the family in which this person appears as a spouse.
pub const FAMILY_SPOUSE: &str = "FAMS";
/// An information storage place ordered and arranged for preservation and
/// reference.
pub const FILE: &str = "FILE";
pub const FIRST_COMMUNION: &str = "FCOM";
/// A given or earned name used for official identification of a person.
pub const GIVEN_NAME: &str = "GIVN";
pub const GRADUATION: &str = "GRAD";
/// Identifies the header pseudo-record of a transmission.
pub const HEAD: &str = "HEAD";
/// An individual in the family role of a married man or father.
pub const HUSBAND: &str = "HUSB";
pub const IDENTIFICATION_NUMBER: &str = "IDNO";
/// Entering into a new locality with the intent of residing there.
pub const IMMIGRATION: &str = "IMMI";
/// Identifies an individual record, or a pointer to one.
pub const INDIVIDUAL: &str = "INDI";
/// A legal, common-law, or customary event of creating a family unit.
pub const MARRIAGE: &str = "MARR";
pub const MARRIAGE_BANN: &str = "MARB";
pub const MARRIAGE_CONTRACT: &str = "MARC";
pub const MARRIAGE_COUNT: &str = "NMR";
pub const MARRIAGE_LICENSE: &str = "MARL";
pub const MARRIAGE_SETTLEMENT: &str = "MARS";
/// A word or combination of words used to identify an individual. The
/// surname is delimited by slashes.
pub const NAME: &str = "NAME";
pub const NATIONALITY: &str = "NATI";
pub const NATURALIZATION: &str = "NATU";
/// Additional information provided by the submitter for understanding the
/// enclosing data.
pub const NOTE: &str = "NOTE";
/// Identifies a multimedia object record, or a pointer to one.
pub const OBJECT: &str = "OBJE";
/// The type of work or profession of an individual.
pub const OCCUPATION: &str = "OCCU";
pub const ORDINATION: &str = "ORDN";
pub const PHYSICAL_DESCRIPTION: &str = "DSCR";
/// The jurisdictional name of the place where an event took place.
pub const PLACE: &str = "PLAC";
/// A flag marking a record as not intended for general distribution.
pub const PRIVATE: &str = "PRIV";
/// Judicial determination of the validity of a will.
pub const PROBATE: &str = "PROB";
pub const PROPERTY: &str = "PROP";
pub const RELIGION: &str = "RELI";
/// The act of dwelling at an address for a period of time.
pub const RESIDENCE: &str = "RESI";
pub const RETIREMENT: &str = "RETI";
/// The sex of an individual, male or female.
pub const SEX: &str = "SEX";
pub const SOC_SEC_NUMBER: &str = "SSN";
/// The initial or original material from which information was obtained.
pub const SOURCE: &str = "SOUR";
/// A description of a specific writing or other work.
pub const TITLE: &str = "TITL";
/// Identifies the trailer pseudo-record closing a transmission.
pub const TRAILER: &str = "TRLR";
/// An individual in the family role of a married woman or mother.
pub const WIFE: &str = "WIFE";
/// A legal document regarding the disposition of a person's estate.
pub const WILL: &str = "WILL";
/// A family name passed on or used by members of a family.
pub const SURNAME: &str = "SURN";

/// Program-defined tag classifying the relationship of a child to the
/// father of a family.
pub const FATHER_RELATION: &str = "_FREL";
/// Program-defined tag classifying the relationship of a child to the
/// mother of a family.
pub const MOTHER_RELATION: &str = "_MREL";
/// The literal value carried by [`FATHER_RELATION`] / [`MOTHER_RELATION`]
/// sub-records for a biological relationship.
pub const NATURAL: &str = "Natural";

/// Tag of the virtual root element anchoring the forest of logical records.
pub const ROOT: &str = "ROOT";
