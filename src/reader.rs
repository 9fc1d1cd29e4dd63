//! Book readers (§6, out-of-scope collaborator, contract + real
//! implementations): a `PageSource` trait plus a sorted-directory and a
//! ZIP/CBZ implementation, grounded on `common::fs`'s directory-walking
//! style and `zip::ZipArchive` usage. I/O and decode failures surface as
//! `Error::Io`/`Error::Decode`/`Error::Archive`; callers add path context
//! with `anyhow::Context` at the CLI boundary.

use std::fs::File;
use std::io::{BufReader, Read as _};
use std::path::{Path, PathBuf};

use image::RgbImage;
use zip::ZipArchive;

use crate::error::Result;

/// A source of page images, yielding `(page_index, image)` pairs in page
/// order. A full PDF-backed implementation is named in the external
/// interface but out of scope for this crate — see §1.
pub trait PageSource {
    fn pages(&mut self) -> Result<Vec<(usize, RgbImage)>>;
}

/// Matches the codecs actually enabled on the `image` dependency (`png`, `jpeg`).
fn is_image_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref(),
        Some("png") | Some("jpg") | Some("jpeg")
    )
}

/// Reads a sorted directory of image files as pages.
pub struct DirPageSource {
    dir: PathBuf,
}

impl DirPageSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PageSource for DirPageSource {
    fn pages(&mut self) -> Result<Vec<(usize, RgbImage)>> {
        let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.into_path())
            .filter(|path| is_image_path(path))
            .collect();
        paths.sort();

        paths
            .into_iter()
            .enumerate()
            .map(|(index, path)| {
                let image = image::open(&path)?.to_rgb8();
                Ok((index, image))
            })
            .collect()
    }
}

/// Reads a `.cbz`/`.zip` archive of image files, sorted by entry name, as pages.
pub struct ZipPageSource {
    path: PathBuf,
}

impl ZipPageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for ZipPageSource {
    fn pages(&mut self) -> Result<Vec<(usize, RgbImage)>> {
        let file = File::open(&self.path)?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;

        let mut names: Vec<String> = (0..archive.len())
            .filter_map(|i| archive.by_index(i).ok().map(|f| f.name().to_string()))
            .filter(|name| is_image_path(Path::new(name)))
            .collect();
        names.sort();

        names
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                let mut entry = archive.by_name(&name)?;
                let mut buf = Vec::new();
                entry.read_to_end(&mut buf)?;
                let image = image::load_from_memory(&buf)?.to_rgb8();
                Ok((index, image))
            })
            .collect()
    }
}

