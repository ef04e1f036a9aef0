pub mod aggregate;
pub mod classify;
pub mod diagnostic;
pub mod identity;
pub mod normalize;

pub use aggregate::{AssetHandle, KdiAggregator};
pub use classify::{VulnClass, build_definition, build_vuln, classify};
pub use diagnostic::Diagnostic;
pub use identity::{ConnectionAttributes, Extraction, extract_identity};
pub use normalize::{NormalizeOutcome, NormalizeStats, Normalizer, normalize, normalize_with_diagnostics};
