use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::IsaError;

/// Prefix shared by every ISA namespace
pub const NAMESPACE_PREFIX: &str = "ARC:ISA";

/// Namespace assigned to annotations that carry none
pub const NO_NAMESPACE: &str = "No Namespace";

/// Investigation sections, in output order
pub const INVESTIGATION_NAMESPACES: [&str; 11] = [
    "ARC:ISA:INVESTIGATION:ONTOLOGY SOURCE REFERENCE",
    "ARC:ISA:INVESTIGATION:INVESTIGATION",
    "ARC:ISA:INVESTIGATION:INVESTIGATION PUBLICATIONS",
    "ARC:ISA:INVESTIGATION:INVESTIGATION CONTACTS",
    "ARC:ISA:INVESTIGATION:STUDY",
    "ARC:ISA:INVESTIGATION:INVESTIGATION PUBLICATIONS: STUDY DESIGN DESCRIPTORS",
    "ARC:ISA:INVESTIGATION:STUDY PUBLICATIONS",
    "ARC:ISA:INVESTIGATION:STUDY FACTORS",
    "ARC:ISA:INVESTIGATION:STUDY ASSAYS",
    "ARC:ISA:INVESTIGATION:STUDY PROTOCOLS",
    "ARC:ISA:INVESTIGATION:STUDY CONTACTS",
];

/// Study sections, in output order
pub const STUDY_NAMESPACES: [&str; 7] = [
    "ARC:ISA:STUDY:STUDY",
    "ARC:ISA:STUDY:STUDY DESIGN DESCRIPTORS",
    "ARC:ISA:STUDY:STUDY PUBLICATIONS",
    "ARC:ISA:STUDY:STUDY FACTORS",
    "ARC:ISA:STUDY:STUDY ASSAYS",
    "ARC:ISA:STUDY:STUDY PROTOCOLS",
    "ARC:ISA:STUDY:STUDY CONTACTS",
];

/// Assay sections of the legacy layout, in output order
pub const ASSAY_NAMESPACES: [&str; 7] = [
    "ARC:ISA:ASSAY:ASSAY",
    "ARC:ISA:ASSAY:ASSAY DESIGN DESCRIPTORS",
    "ARC:ISA:ASSAY:ASSAY PUBLICATIONS",
    "ARC:ISA:ASSAY:ASSAY FACTORS",
    "ARC:ISA:ASSAY:ASSAY PROTOCOLS",
    "ARC:ISA:ASSAY:ASSAY DATA FILES",
    "ARC:ISA:ASSAY:ASSAY CONTACTS",
];

/// Assay sections of the ARC layout, which adds a performers section
pub const ASSAY_NAMESPACES_ARC: [&str; 8] = [
    "ARC:ISA:ASSAY:ASSAY",
    "ARC:ISA:ASSAY:ASSAY DESIGN DESCRIPTORS",
    "ARC:ISA:ASSAY:ASSAY PUBLICATIONS",
    "ARC:ISA:ASSAY:ASSAY FACTORS",
    "ARC:ISA:ASSAY:ASSAY PROTOCOLS",
    "ARC:ISA:ASSAY:ASSAY DATA FILES",
    "ARC:ISA:ASSAY:ASSAY CONTACTS",
    "ARC:ISA:ASSAY:ASSAY PERFORMERS",
];

/// One of the three ISA metadata scopes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Investigation-level metadata, attached to a Project
    Investigation,
    /// Study-level metadata, attached to a Project
    Study,
    /// Assay-level metadata, attached to a Dataset
    Assay,
}

impl Scope {
    /// All scopes in workbook order
    pub const ALL: [Scope; 3] = [Scope::Investigation, Scope::Study, Scope::Assay];

    /// Upper-case tag used inside namespaces
    pub fn tag(&self) -> &'static str {
        match self {
            Scope::Investigation => "INVESTIGATION",
            Scope::Study => "STUDY",
            Scope::Assay => "ASSAY",
        }
    }

    /// Build the full namespace for a section of this scope
    pub fn namespace(&self, section: &str) -> String {
        format!("{}:{}:{}", NAMESPACE_PREFIX, self.tag(), section)
    }

    /// Workbook file name for this scope
    pub fn file_name(&self) -> &'static str {
        match self {
            Scope::Investigation => "isa.investigation.xlsx",
            Scope::Study => "isa.study.xlsx",
            Scope::Assay => "isa.assay.xlsx",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Investigation => write!(f, "Investigation"),
            Scope::Study => write!(f, "Study"),
            Scope::Assay => write!(f, "Assay"),
        }
    }
}

impl FromStr for Scope {
    type Err = IsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "investigation" => Ok(Scope::Investigation),
            "study" => Ok(Scope::Study),
            "assay" => Ok(Scope::Assay),
            _ => Err(IsaError::UnknownScope(s.to_string())),
        }
    }
}

/// Top-level grouping a namespace is sorted into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Catalogued investigation section
    Investigation,
    /// Catalogued study section
    Study,
    /// Catalogued assay section
    Assay,
    /// Anything not found in a catalogue
    Other,
}

impl Bucket {
    /// All buckets in output order
    pub const ALL: [Bucket; 4] = [
        Bucket::Investigation,
        Bucket::Study,
        Bucket::Assay,
        Bucket::Other,
    ];

    /// Scope backing this bucket, `None` for [`Bucket::Other`]
    pub fn scope(&self) -> Option<Scope> {
        match self {
            Bucket::Investigation => Some(Scope::Investigation),
            Bucket::Study => Some(Scope::Study),
            Bucket::Assay => Some(Scope::Assay),
            Bucket::Other => None,
        }
    }

    /// Workbook file name the bucket is written to
    pub fn file_name(&self) -> &'static str {
        match self.scope() {
            Some(scope) => scope.file_name(),
            None => "ExtraMetadata.xlsx",
        }
    }
}

impl From<Scope> for Bucket {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Investigation => Bucket::Investigation,
            Scope::Study => Bucket::Study,
            Scope::Assay => Bucket::Assay,
        }
    }
}

/// Revision of the assay section catalogue
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssayRevision {
    /// Seven assay sections
    #[default]
    Legacy,
    /// ARC layout with the additional ASSAY PERFORMERS section
    Arc,
}

impl FromStr for AssayRevision {
    type Err = IsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Ok(AssayRevision::Legacy),
            "arc" => Ok(AssayRevision::Arc),
            _ => Err(IsaError::UnknownRevision(s.to_string())),
        }
    }
}

/// The three ordered section catalogues
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Catalogues {
    assay_revision: AssayRevision,
}

impl Catalogues {
    /// Catalogues using the given assay revision
    pub fn new(assay_revision: AssayRevision) -> Self {
        Self { assay_revision }
    }

    /// Assay revision in use
    pub fn assay_revision(&self) -> AssayRevision {
        self.assay_revision
    }

    /// Ordered namespaces recognized for a scope
    pub fn namespaces(&self, scope: Scope) -> &'static [&'static str] {
        match (scope, self.assay_revision) {
            (Scope::Investigation, _) => &INVESTIGATION_NAMESPACES,
            (Scope::Study, _) => &STUDY_NAMESPACES,
            (Scope::Assay, AssayRevision::Legacy) => &ASSAY_NAMESPACES,
            (Scope::Assay, AssayRevision::Arc) => &ASSAY_NAMESPACES_ARC,
        }
    }

    /// Sort a namespace into its bucket. First matching catalogue wins.
    pub fn classify(&self, namespace: &str) -> Bucket {
        Scope::ALL
            .into_iter()
            .find(|scope| self.namespaces(*scope).contains(&namespace))
            .map(Bucket::from)
            .unwrap_or(Bucket::Other)
    }
}

/// Header label of a namespace: the text after its last `:`
pub fn section_label(namespace: &str) -> &str {
    namespace
        .rsplit(':')
        .next()
        .unwrap_or(namespace)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_catalogued() {
        let catalogues = Catalogues::default();
        assert_eq!(
            catalogues.classify("ARC:ISA:INVESTIGATION:STUDY"),
            Bucket::Investigation
        );
        assert_eq!(catalogues.classify("ARC:ISA:STUDY:STUDY"), Bucket::Study);
        assert_eq!(
            catalogues.classify("ARC:ISA:ASSAY:ASSAY DATA FILES"),
            Bucket::Assay
        );
    }

    #[test]
    fn test_classify_unknown_is_other() {
        let catalogues = Catalogues::default();
        assert_eq!(catalogues.classify(NO_NAMESPACE), Bucket::Other);
        assert_eq!(catalogues.classify("ARC:ISA:STUDY:UNKNOWN"), Bucket::Other);
        assert_eq!(catalogues.classify("arc:isa:study:study"), Bucket::Other);
        assert_eq!(catalogues.classify(""), Bucket::Other);
    }

    #[test]
    fn test_assay_revision_changes_catalogue() {
        let performers = "ARC:ISA:ASSAY:ASSAY PERFORMERS";
        assert_eq!(Catalogues::default().classify(performers), Bucket::Other);
        assert_eq!(
            Catalogues::new(AssayRevision::Arc).classify(performers),
            Bucket::Assay
        );
        assert_eq!(Catalogues::default().namespaces(Scope::Assay).len(), 7);
        assert_eq!(
            Catalogues::new(AssayRevision::Arc)
                .namespaces(Scope::Assay)
                .len(),
            8
        );
    }

    #[test]
    fn test_catalogues_are_disjoint() {
        let catalogues = Catalogues::new(AssayRevision::Arc);
        for scope in Scope::ALL {
            for namespace in catalogues.namespaces(scope) {
                assert_eq!(catalogues.classify(namespace), Bucket::from(scope));
            }
        }
    }

    #[test]
    fn test_section_label() {
        assert_eq!(
            section_label("ARC:ISA:STUDY:STUDY DESIGN DESCRIPTORS"),
            "STUDY DESIGN DESCRIPTORS"
        );
        assert_eq!(
            section_label(
                "ARC:ISA:INVESTIGATION:INVESTIGATION PUBLICATIONS: STUDY DESIGN DESCRIPTORS"
            ),
            "STUDY DESIGN DESCRIPTORS"
        );
        assert_eq!(section_label(NO_NAMESPACE), NO_NAMESPACE);
    }

    #[test]
    fn test_scope_from_str() {
        assert_eq!(Scope::from_str("Investigation").unwrap(), Scope::Investigation);
        assert_eq!(Scope::from_str(" STUDY ").unwrap(), Scope::Study);
        assert_eq!(Scope::from_str("assay").unwrap(), Scope::Assay);
        assert!(Scope::from_str("sample").is_err());
        assert_eq!(Scope::Study.namespace("STUDY"), "ARC:ISA:STUDY:STUDY");
    }
}
