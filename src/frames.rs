use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::{ImageFormat, RgbImage};
use tracing::info;

/// Image files of a directory, replayed in lexical order.
#[derive(Debug)]
pub struct FrameSource {
    paths: std::vec::IntoIter<PathBuf>,
}

impl FrameSource {
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("failed to read frame directory {}", dir.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("failed to list frame directory {}", dir.display()))?
                .path();
            // Only extensions `image` knows how to decode.
            if path.is_file() && ImageFormat::from_path(&path).is_ok() {
                paths.push(path);
            }
        }
        paths.sort();

        info!(dir = %dir.display(), frames = paths.len(), "Scanned frame directory");
        Ok(FrameSource { paths: paths.into_iter() })
    }

    /// Frames not yet yielded.
    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

fn load_frame(path: &Path) -> anyhow::Result<RgbImage> {
    let image = image::open(path).with_context(|| format!("failed to decode frame {}", path.display()))?;
    Ok(image.to_rgb8())
}

impl Iterator for FrameSource {
    /// The frame path and its decoded pixels, or why decoding failed.
    type Item = (PathBuf, anyhow::Result<RgbImage>);

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.paths.next()?;
        let frame = load_frame(&path);
        Some((path, frame))
    }
}
