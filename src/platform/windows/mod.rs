//! Windows-specific platform implementations

mod opener;
mod paths;

pub use opener::WindowsOpener;
pub use paths::WindowsPaths;
