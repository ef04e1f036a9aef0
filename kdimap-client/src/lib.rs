mod error;
pub mod scorecard;
mod source;

pub use error::ClientError;
pub use scorecard::{DEFAULT_API_URL, ScorecardClient, ScorecardConfig};
pub use source::FindingSource;
