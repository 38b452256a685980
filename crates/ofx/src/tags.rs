//! Aggregate/element classification of OFX tag names.

use std::collections::HashSet;

/// Aggregate tags of the statement-response schema.
///
/// Everything outside this set is a data element: it holds only text and
/// never nests other tags.
pub const DEFAULT_AGGREGATES: &[&str] = &[
    "OFX",
    "SIGNONMSGSRSV1",
    "SONRS",
    "STATUS",
    "FI",
    "BANKMSGSRSV1",
    "STMTTRNRS",
    "STMTRS",
    "BANKACCTFROM",
    "BANKTRANLIST",
    "STMTTRN",
    "LEDGERBAL",
    "AVAILBAL",
];

/// Kind of an OFX tag name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagKind {
    /// Nests other tags; never holds text directly. Its end tag can be
    /// recovered by unwinding the open-tag stack.
    Aggregate,
    /// Holds only text. Its end tag may have to be inferred from the token
    /// that follows it.
    Element,
}

/// Membership set deciding which tag names are aggregates.
///
/// Ships with [`DEFAULT_AGGREGATES`]; extensible for servers that emit
/// containers outside the statement-response schema. Classification is by
/// exact name match.
#[derive(Clone, Debug)]
pub struct TagSet {
    aggregates: HashSet<String>,
}

impl Default for TagSet {
    fn default() -> Self {
        Self {
            aggregates: DEFAULT_AGGREGATES.iter().map(|t| (*t).to_owned()).collect(),
        }
    }
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an aggregate tag name on top of the defaults.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.aggregates.insert(name.into());
    }

    pub fn classify(&self, name: &str) -> TagKind {
        if self.aggregates.contains(name) {
            TagKind::Aggregate
        } else {
            TagKind::Element
        }
    }

    pub fn is_aggregate(&self, name: &str) -> bool {
        self.classify(name) == TagKind::Aggregate
    }
}

#[cfg(test)]
mod tests {
    use super::{TagKind, TagSet};

    #[test]
    fn default_set_covers_every_statement_aggregate() {
        let tags = TagSet::new();
        for name in [
            "OFX",
            "SIGNONMSGSRSV1",
            "SONRS",
            "STATUS",
            "FI",
            "BANKMSGSRSV1",
            "STMTTRNRS",
            "STMTRS",
            "BANKACCTFROM",
            "BANKTRANLIST",
            "STMTTRN",
            "LEDGERBAL",
            "AVAILBAL",
        ] {
            assert_eq!(tags.classify(name), TagKind::Aggregate, "{name}");
        }
    }

    #[test]
    fn unknown_names_are_elements() {
        let tags = TagSet::new();
        assert_eq!(tags.classify("CODE"), TagKind::Element);
        assert_eq!(tags.classify("SEVERITY"), TagKind::Element);
        assert_eq!(tags.classify("DEFAULT"), TagKind::Element);
        // Matching is case and spelling exact.
        assert_eq!(tags.classify("ofx"), TagKind::Element);
        assert_eq!(tags.classify(""), TagKind::Element);
    }

    #[test]
    fn inserted_names_become_aggregates() {
        let mut tags = TagSet::new();
        assert!(!tags.is_aggregate("CCACCTFROM"));
        tags.insert("CCACCTFROM");
        assert!(tags.is_aggregate("CCACCTFROM"));
        // Defaults are untouched.
        assert!(tags.is_aggregate("BANKACCTFROM"));
    }
}
