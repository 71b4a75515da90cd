//! Driver configuration and seed tables.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::matte::SeedPoint;

/// Default report file name, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "analysis_results.txt";

/// One row of a seed table: which frame to matte and where to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedEntry {
    /// Frame file name, relative to the frames directory.
    pub frame: String,
    /// Flood matte starting point.
    pub seed: SeedPoint,
}

impl FromStr for SeedEntry {
    type Err = Error;

    /// Parse `<frame>:<x>,<y>`, e.g. `frame12.png:540,380`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidSeed {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (frame, coords) = s
            .trim()
            .rsplit_once(':')
            .ok_or_else(|| invalid("expected `<frame>:<x>,<y>`"))?;
        let frame = frame.trim();
        if frame.is_empty() {
            return Err(invalid("missing frame name"));
        }

        let (x, y) = coords
            .split_once(',')
            .ok_or_else(|| invalid("expected `<x>,<y>` after `:`"))?;
        let x = x.trim().parse().map_err(|_| invalid("x is not an integer"))?;
        let y = y.trim().parse().map_err(|_| invalid("y is not an integer"))?;

        Ok(Self {
            frame: frame.to_string(),
            seed: SeedPoint::new(x, y),
        })
    }
}

/// Parse a seed table: one `<frame>:<x>,<y>` entry per line.
///
/// Blank lines and lines starting with `#` are ignored. Order is kept.
///
/// # Errors
///
/// Returns [`Error::InvalidSeed`] naming the first bad line.
pub fn parse_seed_table(text: &str) -> Result<Vec<SeedEntry>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(n, line)| {
            line.parse::<SeedEntry>().map_err(|e| match e {
                Error::InvalidSeed { input, reason } => Error::InvalidSeed {
                    input: format!("line {n}: {input}"),
                    reason,
                },
                other => other,
            })
        })
        .collect()
}

/// Read and parse a seed table file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or
/// [`Error::InvalidSeed`] for a malformed line.
pub fn load_seed_table(path: &Path) -> Result<Vec<SeedEntry>> {
    parse_seed_table(&std::fs::read_to_string(path)?)
}

/// Everything the frame driver needs; nothing is read from global state.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory holding the frame images.
    pub frames_dir: PathBuf,
    /// Where matted frames are written. `None` overwrites the source files.
    pub output_dir: Option<PathBuf>,
    /// Append-only geometry report. `None` disables the report.
    pub log_path: Option<PathBuf>,
    /// Ordered seed table for matting.
    pub seeds: Vec<SeedEntry>,
}

impl EngineConfig {
    /// Configuration for `frames_dir` with in-place output, the default log
    /// file and no seeds.
    #[must_use]
    pub fn new(frames_dir: impl Into<PathBuf>) -> Self {
        Self {
            frames_dir: frames_dir.into(),
            output_dir: None,
            log_path: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            seeds: Vec::new(),
        }
    }

    /// Where the matted copy of `frame` goes.
    #[must_use]
    pub fn output_path_for(&self, frame: &str) -> PathBuf {
        self.output_dir
            .as_deref()
            .unwrap_or(&self.frames_dir)
            .join(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seed_entry() {
        let entry: SeedEntry = "frame12.png:540,380".parse().unwrap();
        assert_eq!(entry.frame, "frame12.png");
        assert_eq!(entry.seed, SeedPoint::new(540, 380));

        let spaced: SeedEntry = "  my frame.png : 1 , 2 ".parse().unwrap();
        assert_eq!(spaced.frame, "my frame.png");
        assert_eq!(spaced.seed, SeedPoint::new(1, 2));
    }

    #[test]
    fn negative_coordinates_parse_and_fail_later() {
        let entry: SeedEntry = "frame.png:-1,0".parse().unwrap();
        assert_eq!(entry.seed, SeedPoint::new(-1, 0));
    }

    #[test]
    fn rejects_malformed_entries() {
        for bad in ["frame.png", ":1,2", "frame.png:1", "frame.png:a,2", "frame.png:1,2.5"] {
            let err = bad.parse::<SeedEntry>().unwrap_err();
            assert!(matches!(err, Error::InvalidSeed { .. }), "{bad}");
        }
    }

    #[test]
    fn seed_table_skips_comments_and_keeps_order() {
        let table = "\
# frame, seed
frame12.png:540,380

frame7.png:540,410
";
        let seeds = parse_seed_table(table).unwrap();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].frame, "frame12.png");
        assert_eq!(seeds[1].seed, SeedPoint::new(540, 410));
    }

    #[test]
    fn seed_table_error_names_line() {
        let err = parse_seed_table("a.png:1,2\nbroken\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn output_path_defaults_to_frames_dir() {
        let mut config = EngineConfig::new("/frames");
        assert_eq!(config.output_path_for("f.png"), PathBuf::from("/frames/f.png"));

        config.output_dir = Some(PathBuf::from("/out"));
        assert_eq!(config.output_path_for("f.png"), PathBuf::from("/out/f.png"));
        assert_eq!(config.log_path, Some(PathBuf::from(DEFAULT_LOG_FILE)));
    }
}
