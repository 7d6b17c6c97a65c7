//! Unix-specific platform implementations

mod opener;
mod paths;

pub use opener::UnixOpener;
pub use paths::UnixPaths;
