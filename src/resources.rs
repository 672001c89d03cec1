//! Locating bundled assets independent of how the binary was installed

use crate::config::AssetOptions;
use crate::error::{Error, Result};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::env;
use std::path::{Path, PathBuf};

/// Ordered list of directories searched for bundled files.
///
/// Resolved once at startup: the configured asset directory first, then the
/// directory holding the executable, then the working directory. Each root
/// is also searched through its `assets/` subdirectory.
#[derive(Debug, Clone, Default)]
pub struct ResourceLocator {
    roots: Vec<PathBuf>,
}

impl ResourceLocator {
    /// Build the search path from config and the running process.
    pub fn resolve(options: &AssetOptions) -> Self {
        let mut roots = Vec::new();
        if let Some(dir) = &options.dir {
            roots.push(dir.clone());
        }
        if let Some(exe_dir) = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            roots.push(exe_dir);
        }
        if let Ok(cwd) = env::current_dir() {
            roots.push(cwd);
        }

        let locator = Self::with_roots(roots);
        tracing::debug!(roots = ?locator.roots, "Resolved asset search path");
        locator
    }

    /// Search exactly the given directories, in order.
    pub fn with_roots(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut unique = Vec::new();
        for root in roots {
            if !unique.contains(&root) {
                unique.push(root);
            }
        }
        Self { roots: unique }
    }

    /// First existing file called `name` under any root.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        self.roots
            .iter()
            .flat_map(|root| [root.join(name), root.join("assets").join(name)])
            .find(|candidate| candidate.is_file())
    }

    /// Load the window's branding banner scaled to a square of `branding_size`.
    pub fn branding(&self, options: &AssetOptions) -> Result<RgbaImage> {
        let path = self.locate(&options.branding_file).ok_or_else(|| {
            Error::Image(format!("Branding image '{}' not found", options.branding_file))
        })?;
        let img = image::open(&path)
            .map_err(|e| Error::Image(format!("{}: {e}", path.display())))?
            .to_rgba8();

        let size = options.branding_size.max(1);
        Ok(imageops::resize(&img, size, size, FilterType::Lanczos3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_prefers_earlier_roots() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(first.path().join("branding.png"), b"a").unwrap();
        std::fs::write(second.path().join("branding.png"), b"b").unwrap();

        let locator =
            ResourceLocator::with_roots([first.path().to_path_buf(), second.path().to_path_buf()]);
        assert_eq!(
            locator.locate("branding.png"),
            Some(first.path().join("branding.png"))
        );
    }

    #[test]
    fn test_locate_searches_assets_subdir() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("assets")).unwrap();
        std::fs::write(root.path().join("assets").join("banner.png"), b"x").unwrap();

        let locator = ResourceLocator::with_roots([root.path().to_path_buf()]);
        assert_eq!(
            locator.locate("banner.png"),
            Some(root.path().join("assets").join("banner.png"))
        );
    }

    #[test]
    fn test_branding_missing_is_error() {
        let root = tempfile::tempdir().unwrap();
        let locator = ResourceLocator::with_roots([root.path().to_path_buf()]);
        assert!(locator.branding(&AssetOptions::default()).is_err());
    }

    #[test]
    fn test_branding_scaled() {
        let root = tempfile::tempdir().unwrap();
        RgbaImage::new(300, 150)
            .save(root.path().join("branding.png"))
            .unwrap();

        let locator = ResourceLocator::with_roots([root.path().to_path_buf()]);
        let banner = locator.branding(&AssetOptions::default()).unwrap();
        assert_eq!(banner.dimensions(), (100, 100));
    }
}
