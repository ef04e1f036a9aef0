pub mod bundled;
pub mod mapper;
pub mod types;

pub use bundled::bundled_entries;
pub use mapper::{CanonicalMapper, StaticMapper};
pub use types::CanonicalEntry;
