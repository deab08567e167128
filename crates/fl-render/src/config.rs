//! Rendering pipeline configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::{RenderError, RenderResult, RetryPolicy};

/// Where frames go, how long a frame may take, and how frames look.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderConfig {
    pub output_dir:   PathBuf,
    pub frame_prefix: String,
    /// Zero-padded digits in frame file names.  Six covers a year of
    /// five-minute ticks.
    pub index_width:  usize,
    pub extension:    String,
    /// Wall-clock budget for one render attempt.
    pub timeout_ms:   u64,
    pub retry:        RetryPolicy,
    pub width:        u32,
    pub height:       u32,
    /// `#RRGGBB` colours, one per land category; naval categories reuse them.
    pub palette:      Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir:   PathBuf::from("png"),
            frame_prefix: "frame_".into(),
            index_width:  6,
            extension:    "png".into(),
            timeout_ms:   30_000,
            retry:        RetryPolicy::default(),
            width:        1280,
            height:       960,
            palette: [
                "#FF3FBD", "#FF4141", "#A550FF", "#40EEBB", "#3DFF40",
                "#FFED43", "#32E397", "#2978FF", "#FFAD32", "#C7AC85",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> RenderResult<()> {
        if self.timeout_ms == 0 {
            return Err(RenderError::Config("timeout_ms must be positive".into()));
        }
        if self.width < 16 || self.height < 16 {
            return Err(RenderError::Config(format!(
                "canvas {}x{} is too small",
                self.width, self.height
            )));
        }
        self.retry.validate()
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
