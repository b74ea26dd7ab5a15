use std::fmt;

/// Represents errors that can occur while parsing or querying GEDCOM data.
#[derive(Debug)]
pub enum GedcomError {
    /// A line (or a level jump) that violates the GEDCOM 5.5 format.
    ///
    /// Raised during strict-mode ingest for a malformed line, and in both
    /// modes for a level that is more than one greater than the previous
    /// line's level.
    FormatViolation {
        /// The one-based number of the offending line.
        line: usize,
        /// The raw text of the offending line.
        text: String,
    },
    /// A pointer lookup against the element dictionary found nothing.
    PointerNotFound {
        /// The pointer token that was requested, e.g. `@I1@`.
        pointer: String,
    },
    /// An operation that only accepts an individual record was handed
    /// something else.
    NotAnIndividual {
        /// The tag of the element that was actually provided.
        tag: String,
    },
    /// An operation that only accepts a family record was handed
    /// something else.
    NotAFamily {
        /// The tag of the element that was actually provided.
        tag: String,
    },
}

impl fmt::Display for GedcomError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GedcomError::FormatViolation { line, text } => {
                write!(f, "Line {line} violates GEDCOM format 5.5: {text:?}")
            }
            GedcomError::PointerNotFound { pointer } => {
                write!(f, "No element with the pointer {pointer} was found")
            }
            GedcomError::NotAnIndividual { tag } => {
                write!(
                    f,
                    "Operation only valid for elements with the INDI tag, got {tag}"
                )
            }
            GedcomError::NotAFamily { tag } => {
                write!(
                    f,
                    "Operation only valid for elements with the FAM tag, got {tag}"
                )
            }
        }
    }
}

impl std::error::Error for GedcomError {}
