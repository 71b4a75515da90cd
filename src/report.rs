//! Geometry report records and the append-only report log.
//!
//! Downstream tooling parses this format, so field order, labels and the
//! separator line must not change:
//!
//! ```text
//! FILE: frame3.png (Fake Trans)
//!   Bounds: 120,80 to 960,920
//!   Center: 540, 500
//!   Size: 840 x 840
//!   Radius: 420
//! --------------------
//! ```

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::scan::HoleDetection;

/// Tag appended to the file name when the axis-scan fallback was used.
const FALLBACK_TAG: &str = " (Fake Trans)";
/// Width of the dashed separator closing each record.
const SEPARATOR_WIDTH: usize = 20;

/// One analysed frame, ready to be written to the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoleReport {
    /// Frame file name (no directory).
    pub file_name: String,
    /// What was found and how.
    pub detection: HoleDetection,
}

impl fmt::Display for HoleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = &self.detection.geometry;
        let tag = if self.detection.is_fallback() {
            FALLBACK_TAG
        } else {
            ""
        };
        writeln!(f, "FILE: {}{tag}", self.file_name)?;
        writeln!(f, "  Bounds: {},{} to {},{}", g.min_x, g.min_y, g.max_x, g.max_y)?;
        writeln!(f, "  Center: {}, {}", g.center_x, g.center_y)?;
        writeln!(f, "  Size: {} x {}", g.width, g.height)?;
        writeln!(f, "  Radius: {}", g.radius)?;
        writeln!(f, "{}", "-".repeat(SEPARATOR_WIDTH))
    }
}

/// Append-only text sink for [`HoleReport`] records.
///
/// The file is opened per append, so records from earlier runs are kept.
/// Callers that analyse frames in parallel must funnel appends through one
/// thread.
#[derive(Debug, Clone)]
pub struct ReportLog {
    path: PathBuf,
}

impl ReportLog {
    /// Sink writing to `path`; the file is created on first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the report file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file cannot be opened or written.
    pub fn append(&self, report: &HoleReport) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(report.to_string().as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ClassificationPolicy;
    use crate::geometry::{BoundingBox, HoleGeometry};

    fn report(policy: ClassificationPolicy) -> HoleReport {
        HoleReport {
            file_name: "frame1.png".to_string(),
            detection: HoleDetection {
                policy,
                geometry: HoleGeometry::from(BoundingBox {
                    min_x: 3,
                    min_y: 3,
                    max_x: 6,
                    max_y: 6,
                }),
            },
        }
    }

    #[test]
    fn formats_true_alpha_record() {
        let text = report(ClassificationPolicy::TrueAlpha).to_string();
        assert_eq!(
            text,
            "FILE: frame1.png\n  Bounds: 3,3 to 6,6\n  Center: 4, 4\n  Size: 3 x 3\n  Radius: 1\n--------------------\n"
        );
    }

    #[test]
    fn tags_fallback_record() {
        let text = report(ClassificationPolicy::NeutralColorHeuristic).to_string();
        assert!(text.starts_with("FILE: frame1.png (Fake Trans)\n"));
    }

    #[test]
    fn append_keeps_existing_records() {
        let dir = tempfile::tempdir().unwrap();
        let log = ReportLog::new(dir.path().join("analysis.txt"));

        log.append(&report(ClassificationPolicy::TrueAlpha)).unwrap();
        log.append(&report(ClassificationPolicy::NeutralColorHeuristic))
            .unwrap();

        let text = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(text.matches("FILE: ").count(), 2);
        assert_eq!(text.lines().count(), 12);
        assert!(text.contains("(Fake Trans)"));
    }
}
