pub mod finding;
pub mod kdi;

pub use finding::{DEBUG_ISSUE_TYPES, IssueTypeFilter, PortfolioId, RawFinding, is_present, value_text};
pub use kdi::{AssetIdentity, KdiAsset, KdiDocument, KdiVuln, KdiVulnDef, SCANNER_TYPE, VulnStatus};
