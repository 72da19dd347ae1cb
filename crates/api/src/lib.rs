pub mod access;
pub mod error;
pub mod lookup;
pub mod models;

// Re-export commonly used types
pub use access::AccessPolicy;
pub use error::{LookupError, LookupResult};
pub use lookup::ArtifactLookup;
pub use models::*;
