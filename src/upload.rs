//! Upload-summary line shared with the upload handler.
//!
//! The handler appends one line to the data scope before scoring, e.g.
//! `Supporting Files (2): churn_q3.csv, cohorts.xlsx`. The scorer only looks for the
//! marker substring and, when present, a file count next to it.

use regex::Regex;

pub const DEFAULT_UPLOAD_MARKER: &str = "Files";

/// What the data-scope analysis learned about attached files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadInfo {
    pub detected: bool,
    pub file_count: Option<usize>,
}

/// Marker matcher with a compiled count pattern.
#[derive(Debug, Clone)]
pub struct UploadDetector {
    marker: String,
    count_re: Option<Regex>,
}

impl UploadDetector {
    pub fn new(marker: &str) -> Self {
        let m = regex::escape(marker);
        // "Files (3)", "Files: 3", "3 files"
        let pattern = format!(r"(?i){m}\s*\(\s*(\d+)\s*\)|{m}\s*:\s*(\d+)\b|\b(\d+)\s+{m}\b");
        Self {
            marker: marker.to_string(),
            count_re: Regex::new(&pattern).ok(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Substring search for the marker; the count is parsed only when it is found.
    pub fn detect(&self, text: &str) -> UploadInfo {
        if self.marker.is_empty() || !text.contains(self.marker.as_str()) {
            return UploadInfo::default();
        }
        let file_count = self.count_re.as_ref().and_then(|re| {
            re.captures(text).and_then(|caps| {
                (1..=3)
                    .filter_map(|i| caps.get(i))
                    .find_map(|m| m.as_str().parse::<usize>().ok())
            })
        });
        UploadInfo {
            detected: true,
            file_count,
        }
    }
}

impl Default for UploadDetector {
    fn default() -> Self {
        Self::new(DEFAULT_UPLOAD_MARKER)
    }
}

/// Render the summary line for a list of attached file names.
/// Returns `None` when nothing usable was attached.
pub fn render_upload_summary<S: AsRef<str>>(file_names: &[S]) -> Option<String> {
    let names: Vec<&str> = file_names
        .iter()
        .map(|n| n.as_ref().trim())
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() {
        return None;
    }
    Some(format!(
        "Supporting {DEFAULT_UPLOAD_MARKER} ({}): {}",
        names.len(),
        names.join(", ")
    ))
}

/// Append the summary line to an existing data scope (on its own line).
pub fn append_upload_summary<S: AsRef<str>>(data_scope: &str, file_names: &[S]) -> String {
    match render_upload_summary(file_names) {
        None => data_scope.to_string(),
        Some(line) if data_scope.trim().is_empty() => line,
        Some(line) => format!("{}\n{}", data_scope.trim_end(), line),
    }
}

/// Detect with the default marker.
pub fn detect_upload(text: &str) -> UploadInfo {
    UploadDetector::default().detect(text)
}
