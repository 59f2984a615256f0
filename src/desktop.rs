//! Hand-off to the host's browser and image viewer.

use anyhow::{Context, Result};
use image::DynamicImage;
use std::io;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::fs::file_stem_for;
use crate::wiki::Endpoints;

/// Opens a URL or file with the host's default handler.
pub trait Launcher {
    fn launch(&self, target: &str) -> io::Result<()>;
}

/// Uses the platform opener (`xdg-open`, `open`, `start`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, target: &str) -> io::Result<()> {
        open::that_detached(target)
    }
}

/// Opens the article page for `topic` and returns its URL.
pub fn open_page(
    launcher: &impl Launcher,
    endpoints: &Endpoints,
    topic: &str,
    locale: &str,
) -> Result<String> {
    let url = endpoints.page_url(topic, locale);
    launcher
        .launch(&url)
        .with_context(|| format!("Failed to open {url}"))?;
    Ok(url)
}

/// Hands thumbnails to the default image viewer.
///
/// Each locale and topic gets one PNG inside a private temp directory, so
/// showing a cached image again reuses its file. The directory is removed
/// when the viewer is dropped at the end of the session.
#[derive(Debug, Default)]
pub struct ImageViewer {
    dir: Option<TempDir>,
}

impl ImageViewer {
    pub const fn new() -> Self {
        Self { dir: None }
    }

    /// Path the thumbnail for `topic` in `locale` is written to, once the
    /// directory exists.
    pub fn image_path(&self, topic: &str, locale: &str) -> Option<PathBuf> {
        let dir = self.dir.as_ref()?;
        Some(dir.path().join(format!("{locale}_{}.png", file_stem_for(topic))))
    }

    /// Writes `image` if it is not on disk yet, then opens it.
    pub fn show(
        &mut self,
        launcher: &impl Launcher,
        topic: &str,
        locale: &str,
        image: &DynamicImage,
    ) -> Result<PathBuf> {
        if self.dir.is_none() {
            let dir = tempfile::Builder::new()
                .prefix("wikifetch-")
                .tempdir()
                .context("Failed to create a temporary image directory")?;
            self.dir = Some(dir);
        }
        let path = self
            .image_path(topic, locale)
            .context("Temporary image directory is missing")?;

        if !path.exists() {
            image
                .save_with_format(&path, image::ImageFormat::Png)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }

        launcher
            .launch(&path.to_string_lossy())
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(path)
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::testing::RecordingLauncher;
    use super::*;

    #[test]
    fn test_open_page_launches_article_url() {
        let launcher = RecordingLauncher::default();

        let url = open_page(&launcher, &Endpoints::default(), "Great Wall", "zh").unwrap();

        assert_eq!(url, "https://zh.wikipedia.org/wiki/Great_Wall");
        assert_eq!(launcher.launched(), [url]);
    }

    #[test]
    fn test_open_page_reports_launch_failure() {
        let launcher = RecordingLauncher::failing();

        let err = open_page(&launcher, &Endpoints::default(), "Paris", "en").unwrap_err();

        assert!(err.to_string().contains("Failed to open"));
    }

    #[test]
    fn test_viewer_writes_png_and_launches_it() {
        let launcher = RecordingLauncher::default();
        let mut viewer = ImageViewer::new();
        let image = DynamicImage::new_rgb8(3, 3);

        let path = viewer.show(&launcher, "Paris", "en", &image).unwrap();

        assert!(path.exists());
        assert!(path.ends_with("en_Paris.png"));
        assert_eq!(launcher.launched(), [path.to_string_lossy().to_string()]);
    }

    #[test]
    fn test_viewer_reuses_file_per_topic_and_locale() {
        let launcher = RecordingLauncher::default();
        let mut viewer = ImageViewer::new();
        let image = DynamicImage::new_rgb8(3, 3);

        let first = viewer.show(&launcher, "Paris", "en", &image).unwrap();
        let again = viewer.show(&launcher, "Paris", "en", &image).unwrap();
        let french = viewer.show(&launcher, "Paris", "fr", &image).unwrap();

        assert_eq!(first, again);
        assert_ne!(first, french);
        let dir = first.parent().unwrap();
        assert_eq!(std::fs::read_dir(dir).unwrap().count(), 2);
    }

    #[test]
    fn test_viewer_removes_files_when_dropped() {
        let launcher = RecordingLauncher::default();
        let mut viewer = ImageViewer::new();
        let path = viewer
            .show(&launcher, "AC/DC", "en", &DynamicImage::new_rgb8(2, 2))
            .unwrap();
        let dir = path.parent().unwrap().to_path_buf();

        drop(viewer);

        assert!(!path.exists());
        assert!(!dir.exists());
    }

    #[test]
    fn test_viewer_reports_launch_failure() {
        let launcher = RecordingLauncher::failing();
        let mut viewer = ImageViewer::new();

        let err = viewer
            .show(&launcher, "Paris", "en", &DynamicImage::new_rgb8(2, 2))
            .unwrap_err();

        assert!(err.to_string().contains("Failed to open"));
    }
}
