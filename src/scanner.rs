//! Decodes raw byte lines and matches them against the GEDCOM line grammar.
//!
//! Each line should have the following form, bracketed items optional:
//!
//! ```text
//! level + ' ' + [pointer + ' '] + tag + [' ' + line_value] + terminator
//! ```
//!
//! In strict mode, anything else is a format violation. In lenient mode two
//! recoveries apply, in order: a line missing its terminator is accepted as
//! if it ended in `\n` (the last line of many real-world files), and a line
//! that matches nothing at all is folded into a continuation of the element
//! that preceded it (text fields written with embedded line breaks).

use crate::error::GedcomError;
use encoding_rs::UTF_8;
use once_cell::sync::Lazy;
use regex::Regex;

/// Level must be a non-negative integer with no leading zeros. The pointer
/// is optional and flanked by `@`. The tag is alphanumeric, the value runs
/// to the end of the line, and the terminator is `\n`, `\r` or `\r\n`.
/// Anchored at the start only: trailing bytes after a matched terminator
/// are discarded.
static FULL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0|[1-9][0-9]*) (@[^@]+@ |)([A-Za-z0-9_]+)( [^\n\r]*|)([\r\n]{1,2})")
        .expect("line grammar must compile")
});

/// The grammar minus the terminator rule, for last-line recovery.
static UNTERMINATED_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0|[1-9][0-9]*) (@[^@]+@ |)([A-Za-z0-9_]+)( [^\n\r]*|)")
        .expect("line grammar must compile")
});

/// Free text followed by a terminator, for continuation recovery.
static CONTINUATION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^\n\r]*)([\r\n]{1,2})").expect("line grammar must compile"));

/// The fields of one scanned GEDCOM line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannedLine {
    /// The level of the record; always zero or greater for scanned input.
    pub level: i32,
    /// The pointer token with its delimiting `@`s, or the empty string.
    pub pointer: String,
    /// The tag token.
    pub tag: String,
    /// The value, trimmed of surrounding whitespace.
    pub value: String,
    /// The observed line terminator (`\n` when recovered without one).
    pub terminator: String,
}

/// The result of scanning one line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The line matched the grammar (possibly via last-line recovery).
    Record(ScannedLine),
    /// Lenient-mode recovery: the text is the value of an implicit
    /// continuation of the previous element. The tree builder decides
    /// whether it becomes a CONC or CONT record.
    Continuation {
        /// The whitespace-trimmed text of the whole line.
        value: String,
        /// The line's own terminator, `\n` when it carried none.
        terminator: String,
    },
}

/// Decodes one raw line as UTF-8, stripping a leading byte-order mark.
///
/// # Errors
///
/// Returns [`GedcomError::FormatViolation`] for malformed UTF-8 in strict
/// mode. Lenient mode substitutes replacement characters instead.
pub fn decode_line(raw: &[u8], line_number: usize, strict: bool) -> Result<String, GedcomError> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(raw);
    if had_errors && strict {
        return Err(GedcomError::FormatViolation {
            line: line_number,
            text: text.into_owned(),
        });
    }
    Ok(text.into_owned())
}

/// Scans one decoded line.
///
/// # Errors
///
/// Returns [`GedcomError::FormatViolation`] in strict mode when the line
/// does not match the grammar.
pub fn scan_line(text: &str, line_number: usize, strict: bool) -> Result<ScanOutcome, GedcomError> {
    if let Some(caps) = FULL_LINE.captures(text) {
        return Ok(ScanOutcome::Record(scanned(&caps, &caps[5], line_number)?));
    }

    if strict {
        return Err(GedcomError::FormatViolation {
            line: line_number,
            text: text.to_string(),
        });
    }

    // Quirk check - a line without a terminator, which could be the last.
    if let Some(caps) = UNTERMINATED_LINE.captures(text) {
        return Ok(ScanOutcome::Record(scanned(&caps, "\n", line_number)?));
    }

    // Quirk check - a text field written with an embedded line break shows
    // up as a line without level and tag. Fold it into the previous
    // element as a continuation.
    let (value, terminator) = match CONTINUATION_LINE.captures(text) {
        Some(caps) => (caps[1].trim().to_string(), caps[2].to_string()),
        None => (text.trim().to_string(), "\n".to_string()),
    };
    Ok(ScanOutcome::Continuation { value, terminator })
}

fn scanned(
    caps: &regex::Captures,
    terminator: &str,
    line_number: usize,
) -> Result<ScannedLine, GedcomError> {
    let level = caps[1]
        .parse::<i32>()
        .map_err(|_| GedcomError::FormatViolation {
            line: line_number,
            text: caps[0].to_string(),
        })?;
    Ok(ScannedLine {
        level,
        pointer: caps[2].trim_end_matches(' ').to_string(),
        tag: caps[3].to_string(),
        value: caps[4].trim().to_string(),
        terminator: terminator.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_line, scan_line, ScanOutcome, ScannedLine};

    fn expect_record(outcome: ScanOutcome) -> ScannedLine {
        match outcome {
            ScanOutcome::Record(line) => line,
            ScanOutcome::Continuation { .. } => panic!("expected a scanned record"),
        }
    }

    #[test]
    fn test_scan_full_line_with_pointer() {
        let line = expect_record(scan_line("0 @I1@ INDI\n", 1, true).unwrap());
        assert_eq!(line.level, 0);
        assert_eq!(line.pointer, "@I1@");
        assert_eq!(line.tag, "INDI");
        assert_eq!(line.value, "");
        assert_eq!(line.terminator, "\n");
    }

    #[test]
    fn test_scan_trims_value_and_keeps_crlf_terminator() {
        let line = expect_record(scan_line("1 NAME First /Last/ \r\n", 2, true).unwrap());
        assert_eq!(line.level, 1);
        assert_eq!(line.pointer, "");
        assert_eq!(line.tag, "NAME");
        assert_eq!(line.value, "First /Last/");
        assert_eq!(line.terminator, "\r\n");
    }

    #[test]
    fn test_scan_rejects_leading_zero_levels() {
        assert!(scan_line("01 NAME First\n", 1, true).is_err());
    }

    #[test]
    fn test_strict_mode_rejects_lines_without_a_level() {
        let err = scan_line("@I5@ INDI\n", 4, true).unwrap_err();
        assert!(format!("{err}").contains("Line 4"));
    }

    #[test]
    fn test_lenient_mode_accepts_a_missing_terminator() {
        let line = expect_record(scan_line("0 @I5@ INDI", 9, false).unwrap());
        assert_eq!(line.pointer, "@I5@");
        assert_eq!(line.terminator, "\n");
    }

    #[test]
    fn test_lenient_mode_folds_free_text_into_a_continuation() {
        let outcome = scan_line("that is continued on the next line.\n", 3, false).unwrap();
        assert_eq!(
            outcome,
            ScanOutcome::Continuation {
                value: "that is continued on the next line.".to_string(),
                terminator: "\n".to_string(),
            }
        );
    }

    #[test]
    fn test_lenient_mode_folds_text_that_resembles_a_pointer() {
        let outcome = scan_line("@ stray text that is not a pointer\n", 3, false).unwrap();
        match outcome {
            ScanOutcome::Continuation { value, .. } => {
                assert_eq!(value, "@ stray text that is not a pointer");
            }
            ScanOutcome::Record(_) => panic!("expected a continuation"),
        }
    }

    #[test]
    fn test_decode_strips_byte_order_mark() {
        let raw = b"\xef\xbb\xbf0 HEAD\n";
        assert_eq!(decode_line(raw, 1, true).unwrap(), "0 HEAD\n");
    }

    #[test]
    fn test_decode_rejects_malformed_utf8_in_strict_mode() {
        let raw = b"0 NOTE \xff\xfe\n";
        assert!(decode_line(raw, 1, true).is_err());
        assert!(decode_line(raw, 1, false).unwrap().contains('\u{fffd}'));
    }
}
