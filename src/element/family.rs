//! The `FAM` record view.

use crate::{
    element::ElementKind,
    error::GedcomError,
    tags,
    tree::{ElementId, GedcomTree},
};

/// A typed view over a `FAM` element.
#[derive(Clone, Copy, Debug)]
pub struct Family<'a> {
    tree: &'a GedcomTree,
    id: ElementId,
}

impl<'a> Family<'a> {
    /// Wraps a family element.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::NotAFamily`] when the element is anything
    /// other than a `FAM` record.
    pub fn new(tree: &'a GedcomTree, id: ElementId) -> Result<Family<'a>, GedcomError> {
        if tree.get(id).kind() == ElementKind::Family {
            Ok(Family { tree, id })
        } else {
            Err(GedcomError::NotAFamily {
                tag: tree.get(id).get_tag().to_string(),
            })
        }
    }

    /// The handle of the wrapped element.
    #[must_use]
    pub fn id(self) -> ElementId {
        self.id
    }

    /// Whether at least one child is recorded in this family.
    #[must_use]
    pub fn has_children(self) -> bool {
        self.tree.has_child_tag(self.id, tags::CHILD)
    }
}

#[cfg(test)]
mod tests {
    use super::Family;
    use crate::{GedcomError, Parser};

    #[test]
    fn test_family_with_child_records_has_children() {
        let sample = "\
            0 @F1@ FAM\n\
            1 HUSB @I1@\n\
            1 CHIL @I2@\n";
        let mut parser = Parser::new();
        parser.parse(sample.split_inclusive('\n'), true).unwrap();

        let family = parser.get_element_by_pointer("@F1@").unwrap();
        assert!(Family::new(parser.tree(), family).unwrap().has_children());
    }

    #[test]
    fn test_childless_family_has_no_children() {
        let sample = "\
            0 @F1@ FAM\n\
            1 HUSB @I1@\n\
            1 WIFE @I2@\n";
        let mut parser = Parser::new();
        parser.parse(sample.split_inclusive('\n'), true).unwrap();

        let family = parser.get_element_by_pointer("@F1@").unwrap();
        assert!(!Family::new(parser.tree(), family).unwrap().has_children());
    }

    #[test]
    fn test_wrapping_a_non_family_fails_fast() {
        let sample = "0 @I1@ INDI\n";
        let mut parser = Parser::new();
        parser.parse(sample.split_inclusive('\n'), true).unwrap();

        let individual = parser.get_element_by_pointer("@I1@").unwrap();
        let err = Family::new(parser.tree(), individual).unwrap_err();
        assert!(matches!(err, GedcomError::NotAFamily { tag } if tag == "INDI"));
    }
}
