//! The arena that owns every element of a parsed transmission.
//!
//! All nodes live in one [`GedcomTree`]; [`ElementId`] is a copyable handle
//! into it. Structural operations that touch more than one node (attaching
//! children, the CONC/CONT value-wrapping protocol, recursive serialization)
//! live here rather than on [`Element`], which keeps ownership acyclic even
//! though children hold parent back-references.

use crate::{element::Element, tags};

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// A handle to an element inside a [`GedcomTree`].
///
/// Handles are only meaningful for the tree that issued them. A handle kept
/// across a re-parse refers to a node of the discarded tree and must not be
/// used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct ElementId(usize);

/// The arena of elements, anchored by a virtual root.
///
/// The root is a synthetic element at level -1 with the sentinel tag
/// `ROOT`; it anchors the forest of level-0 logical records and serializes
/// as the concatenation of its children only.
#[derive(Debug)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct GedcomTree {
    nodes: Vec<Element>,
}

impl Default for GedcomTree {
    fn default() -> Self {
        GedcomTree::new()
    }
}

impl GedcomTree {
    /// Creates a tree holding only a fresh virtual root.
    #[must_use]
    pub fn new() -> GedcomTree {
        GedcomTree {
            nodes: vec![Element::new(-1, "", tags::ROOT, "", "\n")],
        }
    }

    /// The handle of the virtual root.
    #[must_use]
    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Borrows the element behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle was issued by another tree instance.
    #[must_use]
    pub fn get(&self, id: ElementId) -> &Element {
        &self.nodes[id.0]
    }

    /// Mutably borrows the element behind a handle.
    ///
    /// Callers mutating a tree owned by a [`Parser`](crate::Parser) must
    /// invalidate its caches afterwards.
    ///
    /// # Panics
    ///
    /// Panics if the handle was issued by another tree instance.
    pub fn get_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    /// Attaches a detached element as the last child of `parent` and
    /// returns its handle.
    pub fn add_child_element(&mut self, parent: ElementId, element: Element) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(element);
        self.nodes[id.0].set_parent(parent);
        self.nodes[parent.0].push_child(id);
        id
    }

    /// Creates and attaches a new child element, one level below its
    /// parent and sharing the parent's line terminator.
    ///
    /// The initial value runs through the value-wrapping protocol, so a
    /// long or multi-line `value` materializes as CONC/CONT children.
    pub fn new_child_element(
        &mut self,
        parent: ElementId,
        tag: &str,
        pointer: &str,
        value: &str,
    ) -> ElementId {
        let level = self.get(parent).get_level() + 1;
        let terminator = self.get(parent).get_terminator().to_string();
        let element = Element::new(level, pointer, tag, "", &terminator);
        let id = self.add_child_element(parent, element);
        self.set_multi_line_value(id, value);
        id
    }

    /// Returns the value of an element including the fragments held by its
    /// CONC and CONT children.
    ///
    /// CONC fragments append directly; a CONT fragment is joined with the
    /// terminator of the previous contributor.
    #[must_use]
    pub fn get_multi_line_value(&self, id: ElementId) -> String {
        let element = self.get(id);
        let mut result = element.get_value().to_string();
        let mut last_terminator = element.get_terminator();
        for &child in element.get_child_elements() {
            let fragment = self.get(child);
            match fragment.get_tag() {
                tags::CONCATENATION => {
                    result.push_str(fragment.get_value());
                    last_terminator = fragment.get_terminator();
                }
                tags::CONTINUED => {
                    result.push_str(last_terminator);
                    result.push_str(fragment.get_value());
                    last_terminator = fragment.get_terminator();
                }
                _ => {}
            }
        }
        result
    }

    /// Sets the value of an element, adding concatenation and continuation
    /// children when necessary.
    ///
    /// Existing CONC and CONT children are dropped first; all other
    /// children are preserved. Each produced line fits the 255-character
    /// limit, split at a non-space boundary.
    pub fn set_multi_line_value(&mut self, id: ElementId, value: &str) {
        self.get_mut(id).set_value("");
        let keep: Vec<bool> = self
            .get(id)
            .get_child_elements()
            .iter()
            .map(|&child| {
                let tag = self.get(child).get_tag();
                tag != tags::CONCATENATION && tag != tags::CONTINUED
            })
            .collect();
        let mut kept = keep.iter().copied();
        self.get_mut(id)
            .retain_children(|_| kept.next().unwrap_or(true));

        let lines = split_line_breaks(value);
        let Some((&first, rest)) = lines.split_first() else {
            return;
        };

        let taken = self.set_bounded_value(id, first);
        self.add_concatenation(id, char_suffix(first, taken));

        for &line in rest {
            let taken = self.add_bounded_child(id, tags::CONTINUED, line);
            self.add_concatenation(id, char_suffix(line, taken));
        }
    }

    /// Formats an element, and optionally its subtree, as a GEDCOM string.
    ///
    /// The virtual root contributes no header line of its own; a recursive
    /// call on it therefore reproduces the whole document.
    #[must_use]
    pub fn to_gedcom_string(&self, id: ElementId, recursive: bool) -> String {
        let element = self.get(id);
        let mut result = String::new();

        if element.get_level() >= 0 {
            result.push_str(&element.get_level().to_string());
            if !element.get_pointer().is_empty() {
                result.push(' ');
                result.push_str(element.get_pointer());
            }
            result.push(' ');
            result.push_str(element.get_tag());
            if !element.get_value().is_empty() {
                result.push(' ');
                result.push_str(element.get_value());
            }
            result.push_str(element.get_terminator());
        }

        if recursive {
            for &child in element.get_child_elements() {
                result.push_str(&self.to_gedcom_string(child, true));
            }
        }

        result
    }

    /// Whether any direct child of `id` carries the given tag.
    pub(crate) fn has_child_tag(&self, id: ElementId, tag: &str) -> bool {
        self.get(id)
            .get_child_elements()
            .iter()
            .any(|&child| self.get(child).get_tag() == tag)
    }

    /// Characters left for a value on this element's line, against the
    /// 255-character allowance.
    fn available_characters(&self, id: ElementId) -> usize {
        let used = self.to_gedcom_string(id, false).chars().count();
        if used > 255 {
            0
        } else {
            255 - used
        }
    }

    /// How many characters of `line` fit on this element's line, cutting
    /// before trailing spaces so a split never lands on one. An allowance
    /// consisting entirely of spaces is taken whole.
    fn bounded_length(&self, id: ElementId, line: &str) -> usize {
        let chars: Vec<char> = line.chars().collect();
        let available = self.available_characters(id);
        if chars.len() <= available {
            return chars.len();
        }
        let mut spaces = 0;
        while spaces < available && chars[available - spaces - 1] == ' ' {
            spaces += 1;
        }
        if spaces == available {
            available
        } else {
            available - spaces
        }
    }

    fn set_bounded_value(&mut self, id: ElementId, line: &str) -> usize {
        let taken = self.bounded_length(id, line);
        let head = char_prefix(line, taken);
        self.get_mut(id).set_value(head);
        taken
    }

    fn add_bounded_child(&mut self, parent: ElementId, tag: &str, line: &str) -> usize {
        let level = self.get(parent).get_level() + 1;
        let terminator = self.get(parent).get_terminator().to_string();
        let child = self.add_child_element(parent, Element::new(level, "", tag, "", &terminator));
        self.set_bounded_value(child, line)
    }

    fn add_concatenation(&mut self, parent: ElementId, mut rest: &str) {
        while !rest.is_empty() {
            let taken = self.add_bounded_child(parent, tags::CONCATENATION, rest);
            if taken == 0 {
                break;
            }
            rest = char_suffix(rest, taken);
        }
    }
}

/// Splits a value on `\n`, `\r` and `\r\n`, without keeping terminators and
/// without a trailing empty segment.
fn split_line_breaks(value: &str) -> Vec<&str> {
    let bytes = value.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&value[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&value[start..i]);
                i += 1;
                if i < bytes.len() && bytes[i] == b'\n' {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&value[start..]);
    }
    lines
}

/// The first `n` characters of `s`.
fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Everything after the first `n` characters of `s`.
fn char_suffix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}

#[cfg(all(test, feature = "json"))]
mod serde_tests {
    use super::ElementId;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_element_id_serializes_as_a_plain_index() {
        assert_tokens(
            &ElementId(3),
            &[Token::NewtypeStruct { name: "ElementId" }, Token::U64(3)],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{split_line_breaks, GedcomTree};
    use crate::tags;

    fn note_fixture() -> (GedcomTree, super::ElementId) {
        let mut tree = GedcomTree::new();
        let root = tree.root();
        let individual = tree.add_child_element(
            root,
            crate::element::Element::new(0, "@I1@", tags::INDIVIDUAL, "", "\n"),
        );
        let note = tree.new_child_element(individual, tags::NOTE, "", "");
        (tree, note)
    }

    #[test]
    fn test_short_value_round_trips_without_continuations() {
        let (mut tree, note) = note_fixture();
        tree.set_multi_line_value(note, "A short note");
        assert_eq!(tree.get(note).get_value(), "A short note");
        assert!(tree.get(note).get_child_elements().is_empty());
        assert_eq!(tree.get_multi_line_value(note), "A short note");
    }

    #[test]
    fn test_long_value_splits_into_conc_chain() {
        let (mut tree, note) = note_fixture();
        let value = "a".repeat(300);
        tree.set_multi_line_value(note, &value);

        // Header "1 NOTE\n" is 7 characters, leaving 248 for the value.
        assert_eq!(tree.get(note).get_value(), "a".repeat(248));
        let children = tree.get(note).get_child_elements().to_vec();
        assert_eq!(children.len(), 1);
        assert_eq!(tree.get(children[0]).get_tag(), tags::CONCATENATION);
        assert_eq!(tree.get(children[0]).get_value(), "a".repeat(52));
        assert_eq!(tree.get(children[0]).get_level(), 2);

        assert_eq!(tree.get_multi_line_value(note), value);
    }

    #[test]
    fn test_split_lands_before_trailing_spaces() {
        let (mut tree, note) = note_fixture();
        let value = format!("{}  {}", "a".repeat(246), "b".repeat(10));
        tree.set_multi_line_value(note, &value);

        assert_eq!(tree.get(note).get_value(), "a".repeat(246));
        let children = tree.get(note).get_child_elements().to_vec();
        assert_eq!(children.len(), 1);
        assert_eq!(
            tree.get(children[0]).get_value(),
            format!("  {}", "b".repeat(10))
        );
        assert_eq!(tree.get_multi_line_value(note), value);
    }

    #[test]
    fn test_multi_line_value_produces_cont_children() {
        let (mut tree, note) = note_fixture();
        tree.set_multi_line_value(note, "First line\nSecond line\nThird line");

        assert_eq!(tree.get(note).get_value(), "First line");
        let children = tree.get(note).get_child_elements().to_vec();
        assert_eq!(children.len(), 2);
        for &child in &children {
            assert_eq!(tree.get(child).get_tag(), tags::CONTINUED);
        }
        assert_eq!(tree.get(children[0]).get_value(), "Second line");
        assert_eq!(tree.get(children[1]).get_value(), "Third line");

        assert_eq!(
            tree.get_multi_line_value(note),
            "First line\nSecond line\nThird line"
        );
    }

    #[test]
    fn test_overwrite_drops_previous_continuations_but_keeps_other_children() {
        let (mut tree, note) = note_fixture();
        tree.new_child_element(note, tags::SOURCE, "", "@S1@");
        tree.set_multi_line_value(note, "One\nTwo");
        assert_eq!(tree.get(note).get_child_elements().len(), 2);

        tree.set_multi_line_value(note, "Replaced");
        let children = tree.get(note).get_child_elements().to_vec();
        assert_eq!(children.len(), 1);
        assert_eq!(tree.get(children[0]).get_tag(), tags::SOURCE);
        assert_eq!(tree.get_multi_line_value(note), "Replaced");
    }

    #[test]
    fn test_virtual_root_serializes_as_children_only() {
        let mut tree = GedcomTree::new();
        let root = tree.root();
        tree.add_child_element(
            root,
            crate::element::Element::new(0, "", tags::HEAD, "", "\r\n"),
        );
        tree.add_child_element(
            root,
            crate::element::Element::new(0, "", tags::TRAILER, "", "\r\n"),
        );

        assert_eq!(tree.to_gedcom_string(root, false), "");
        assert_eq!(tree.to_gedcom_string(root, true), "0 HEAD\r\n0 TRLR\r\n");
    }

    #[test]
    fn test_serialization_omits_empty_pointer_and_value() {
        let mut tree = GedcomTree::new();
        let root = tree.root();
        let individual = tree.add_child_element(
            root,
            crate::element::Element::new(0, "@I1@", tags::INDIVIDUAL, "", "\n"),
        );
        let name = tree.add_child_element(
            individual,
            crate::element::Element::new(1, "", tags::NAME, "First /Last/", "\n"),
        );

        assert_eq!(tree.to_gedcom_string(individual, false), "0 @I1@ INDI\n");
        assert_eq!(tree.to_gedcom_string(name, false), "1 NAME First /Last/\n");
        assert_eq!(
            tree.to_gedcom_string(individual, true),
            "0 @I1@ INDI\n1 NAME First /Last/\n"
        );
    }

    #[test]
    fn test_cont_join_uses_previous_contributor_terminator() {
        let mut tree = GedcomTree::new();
        let root = tree.root();
        let note = tree.add_child_element(
            root,
            crate::element::Element::new(0, "", tags::NOTE, "abc", "\r\n"),
        );
        tree.add_child_element(
            note,
            crate::element::Element::new(1, "", tags::CONTINUED, "def", "\n"),
        );
        tree.add_child_element(
            note,
            crate::element::Element::new(1, "", tags::CONTINUED, "ghi", "\n"),
        );

        // First join uses the note's own CRLF, the second the previous
        // CONT's LF.
        assert_eq!(tree.get_multi_line_value(note), "abc\r\ndef\nghi");
    }

    #[test]
    fn test_split_line_breaks_handles_all_terminators() {
        assert_eq!(split_line_breaks("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_line_breaks("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(split_line_breaks("trailing\n"), vec!["trailing"]);
        assert!(split_line_breaks("").is_empty());
    }
}
