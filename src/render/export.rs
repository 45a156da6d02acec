//! Writing the displayed artifact to disk.

use crate::render::dispatcher::{ImageArtifact, OutputPaneState};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Base name of exported files; the extension follows the artifact.
pub const EXPORT_FILE_STEM: &str = "gramviz";

/// Write the artifact shown in `pane` into `dir`.
///
/// Text goes to `gramviz.txt`, SVG markup to `gramviz.svg` and raster bytes
/// to `gramviz.png`. Returns `Ok(None)` when the pane is empty.
pub fn export_artifact(pane: &OutputPaneState, dir: &Path) -> io::Result<Option<PathBuf>> {
    let (extension, bytes): (&str, &[u8]) = match pane {
        OutputPaneState::Empty => return Ok(None),
        OutputPaneState::TextDisplayed(text) => ("txt", text.as_bytes()),
        OutputPaneState::ImageDisplayed(image) => match &image.artifact {
            ImageArtifact::Svg(fragment) => ("svg", fragment.markup().as_bytes()),
            ImageArtifact::Raster(raster) => ("png", raster.bytes()),
        },
    };

    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{EXPORT_FILE_STEM}.{extension}"));
    std::fs::write(&path, bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "Exported output");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OutputFormat;
    use crate::render::dispatcher::DisplayedImage;
    use crate::render::{RasterImage, SvgFragment};
    use crate::test_support::png_bytes;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gramviz_export_{name}"));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn empty_pane_writes_nothing() {
        let dir = temp_dir("empty");
        assert_eq!(export_artifact(&OutputPaneState::Empty, &dir).unwrap(), None);
        assert!(!dir.exists());
    }

    #[test]
    fn text_is_written_verbatim() {
        let dir = temp_dir("text");
        let pane = OutputPaneState::TextDisplayed("State 0:\n  S' -> .S\n".to_string());

        let path = export_artifact(&pane, &dir).unwrap().expect("written");

        assert!(path.ends_with("gramviz.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "State 0:\n  S' -> .S\n");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn svg_markup_is_written() {
        let dir = temp_dir("svg");
        let markup = r#"<svg width="1pt" height="1pt"></svg>"#;
        let pane = OutputPaneState::ImageDisplayed(DisplayedImage {
            format: OutputFormat::Svg,
            description: "digraph {}".to_string(),
            artifact: ImageArtifact::Svg(SvgFragment::parse(markup).unwrap()),
            viewport: None,
        });

        let path = export_artifact(&pane, &dir).unwrap().unwrap();

        assert!(path.ends_with("gramviz.svg"));
        assert_eq!(fs::read_to_string(&path).unwrap(), markup);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn raster_bytes_are_written() {
        let dir = temp_dir("png");
        let bytes = png_bytes(4, 4);
        let pane = OutputPaneState::ImageDisplayed(DisplayedImage {
            format: OutputFormat::Png,
            description: "digraph {}".to_string(),
            artifact: ImageArtifact::Raster(RasterImage::from_png(bytes.clone()).unwrap()),
            viewport: None,
        });

        let path = export_artifact(&pane, &dir).unwrap().unwrap();

        assert!(path.ends_with("gramviz.png"));
        assert_eq!(fs::read(&path).unwrap(), bytes);
        let _ = fs::remove_dir_all(&dir);
    }
}
