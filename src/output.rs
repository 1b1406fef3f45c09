//! CLI output formatting.
//!
//! Library code logs through `tracing`; what the user asked for (the crop
//! that was applied, the backends on offer) is printed from here. Formatting
//! functions return lines so they can be tested without capturing stdout.
//!
//! ```text
//! in.jpg (3000x1400)
//!     Focus: 1000,1100
//!     Crop: 3000x316+0+852
//!     Output: out.jpg (1900x200, quality 80, rust)
//! ```

use crate::crop::CropReport;
use crate::imaging::{BackendKind, rust_backend};

/// Human-readable summary of one crop.
pub fn format_crop_report(report: &CropReport) -> Vec<String> {
    vec![
        format!(
            "{} ({}x{})",
            report.input.display(),
            report.source_width,
            report.source_height
        ),
        format!("    Focus: {}", report.focus),
        format!("    Crop: {}", report.crop),
        format!(
            "    Output: {} ({}, quality {}, {})",
            report.output.display(),
            report.size,
            report.quality,
            report.backend
        ),
    ]
}

/// Machine-readable summary of one crop.
pub fn crop_report_json(report: &CropReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// One line per available backend, default marked.
pub fn format_backends() -> Vec<String> {
    BackendKind::available()
        .iter()
        .map(|kind| {
            let marker = if *kind == BackendKind::default() {
                " (default)"
            } else {
                ""
            };
            let inputs = match kind {
                BackendKind::Rust => rust_backend::supported_input_extensions().join(", "),
            };
            format!("{kind}{marker}\n    Reads: {inputs}")
        })
        .collect()
}
