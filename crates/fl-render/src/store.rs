//! Indexed frame artifacts on disk.
//!
//! One file per frame, `{prefix}{index:0width$}.{extension}`, e.g.
//! `frame_000042.png`.  Zero padding keeps lexicographic order equal to
//! frame order for every index below `10^width`.
//!
//! Commits write to a hidden `.partial` file first and rename it into
//! place, so a frame either exists completely or not at all, and
//! re-committing an index overwrites it.

use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::{RenderConfig, RenderError, RenderResult};

#[derive(Clone, Debug)]
pub struct FrameStore {
    dir:       PathBuf,
    prefix:    String,
    width:     usize,
    extension: String,
}

impl FrameStore {
    /// Open (creating if needed) the output directory.
    pub fn new(dir: &Path, prefix: &str, width: usize, extension: &str) -> RenderResult<Self> {
        if width == 0 || width > 19 {
            return Err(RenderError::Config(format!("index width must be 1..=19, got {width}")));
        }
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir:       dir.to_path_buf(),
            prefix:    prefix.to_owned(),
            width,
            extension: extension.trim_start_matches('.').to_owned(),
        })
    }

    pub fn from_config(config: &RenderConfig) -> RenderResult<Self> {
        Self::new(&config.output_dir, &config.frame_prefix, config.index_width, &config.extension)
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// One past the largest index the fixed width can name.
    pub fn capacity(&self) -> u64 {
        10u64.pow(self.width as u32)
    }

    pub fn file_name(&self, index: u64) -> String {
        format!("{}{:0width$}.{}", self.prefix, index, self.extension, width = self.width)
    }

    pub fn path(&self, index: u64) -> PathBuf {
        self.dir.join(self.file_name(index))
    }

    #[inline]
    pub fn exists(&self, index: u64) -> bool {
        self.path(index).is_file()
    }

    /// Atomically write (or overwrite) the artifact for `index`.
    pub fn commit(&self, index: u64, bytes: &[u8]) -> RenderResult<PathBuf> {
        let path = self.path(index);
        let partial = self.dir.join(format!(".{}.partial", self.file_name(index)));
        std::fs::write(&partial, bytes)?;
        std::fs::rename(&partial, &path)?;
        Ok(path)
    }

    /// Indices in `range` with no artifact.  An encoder must not run over a
    /// range with gaps.
    pub fn missing(&self, range: Range<u64>) -> Vec<u64> {
        range.filter(|&i| !self.exists(i)).collect()
    }

    /// First index in `range` without an artifact, or `range.end` if the
    /// range is complete.
    pub fn resume_point(&self, range: Range<u64>) -> u64 {
        let end = range.end;
        range.into_iter().find(|&i| !self.exists(i)).unwrap_or(end)
    }
}
