//! relcat core library
//!
//! Parses release artifact paths and answers faceted queries over them.
//!
//! ```
//! use relcat_core::artifact::{ArtifactFilter, Platform};
//! use relcat_core::catalog::CatalogLoader;
//!
//! let doc = r#"{"artifacts": [
//!     "releases/binaries/dcos/linux/x86-64/1.12.0/dcos",
//!     "releases/binaries/dcos/darwin/x86-64/1.12.0/dcos"
//! ]}"#;
//! let loaded = CatalogLoader::default().load_str(doc).unwrap();
//! let linux = loaded
//!     .collection
//!     .binaries()
//!     .filter(&ArtifactFilter::new().with_platform(Platform::Linux));
//! assert_eq!(linux.len(), 1);
//! ```

pub mod artifact;
pub mod catalog;
pub mod config;
pub mod error;

pub use artifact::{Artifact, ArtifactCollection, ArtifactFilter, ArtifactKind, Platform};
pub use catalog::{CatalogLoader, LoadPolicy, LoadedCatalog};
pub use config::RelcatConfig;
pub use error::{CatalogError, PathError};
