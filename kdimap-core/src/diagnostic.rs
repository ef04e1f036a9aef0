use std::fmt;

/// A record-level condition noticed during normalization.
///
/// None of these stop a run; they are reported so an operator can chase
/// upstream data-quality problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `connection_attributes` was not an object; the finding was skipped.
    MalformedFinding { finding: String },
    /// No identifying field resolved; the asset was emitted anyway.
    UnmappedAsset { finding: String },
    /// The issue type has no canonical entry.
    UnknownIssueType { issue_type: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedFinding { finding } => {
                write!(f, "unknown format for issue, skipping: {finding}")
            }
            Self::UnmappedAsset { finding } => write!(f, "unmapped asset for finding: {finding}"),
            Self::UnknownIssueType { issue_type } => {
                write!(f, "no canonical mapping for issue type '{issue_type}'")
            }
        }
    }
}
