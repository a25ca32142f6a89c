//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is information-centric, not string-centric: the primary display
//! for a decoded path or parsed locator is its semantic content — what was
//! requested, where the file lives — with the raw input shown as the header
//! line and components as indented context lines.
//!
//! ## Decode
//!
//! ```text
//! photos/2014/05/img_400x600_1.jpg
//!     Base: img.jpg
//!     Folder: photos/2014/05
//!     Resize: 400x600
//!     Variant: 1
//! ```
//!
//! ## Locator
//!
//! ```text
//! amazon-s3:2014/15/06:123-456-798
//!     Repository: amazon-s3
//!     Folder: 2014/15/06
//!     File: 123-456-798
//! ```
//!
//! # Architecture
//!
//! Each display has a `format_*` function (returns `Vec<String>` or
//! `String`) for testability and a `print_*` wrapper that writes to stdout.
//! Format functions are pure — no I/O, no side effects.

use crate::locator::RepositoryLocator;
use crate::variant::ImageReference;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// The filename a reference points at before any transformation.
fn base_file(reference: &ImageReference) -> String {
    if reference.extension.is_empty() {
        reference.base_name.clone()
    } else {
        format!("{}.{}", reference.base_name, reference.extension)
    }
}

/// The `{w}x{h}` / `{w}x` / `x{h}` label for a resize request, if any.
fn resize_label(reference: &ImageReference) -> Option<String> {
    match (reference.width, reference.height) {
        (Some(w), Some(h)) => Some(format!("{w}x{h}")),
        (Some(w), None) => Some(format!("{w}x")),
        (None, Some(h)) => Some(format!("x{h}")),
        (None, None) => None,
    }
}

/// Format a decoded reference: input path header plus component lines.
pub fn format_reference(path: &str, reference: &ImageReference) -> Vec<String> {
    let mut lines = vec![path.to_string()];
    lines.push(format!("{}Base: {}", indent(1), base_file(reference)));
    if !reference.base_path.is_empty() {
        lines.push(format!("{}Folder: {}", indent(1), reference.base_path));
    }
    if let Some(resize) = resize_label(reference) {
        lines.push(format!("{}Resize: {}", indent(1), resize));
    }
    if let Some(variant) = reference.variant {
        lines.push(format!("{}Variant: {}", indent(1), variant));
    }
    if !reference.is_modified() {
        lines.push(format!("{}Original: no transformation requested", indent(1)));
    }
    lines
}

/// One-line form used by batch decode: `path → summary`.
pub fn format_decode_line(path: &str, reference: &ImageReference) -> String {
    let mut parts = Vec::new();
    if let Some(resize) = resize_label(reference) {
        parts.push(resize);
    }
    if let Some(variant) = reference.variant {
        parts.push(format!("variant {variant}"));
    }
    if parts.is_empty() {
        format!("{} → {} (original)", path, base_file(reference))
    } else {
        format!("{} → {} {}", path, base_file(reference), parts.join(", "))
    }
}

/// Format a parsed locator: key header plus component lines.
pub fn format_locator(locator: &RepositoryLocator) -> Vec<String> {
    let mut lines = vec![locator.to_key()];
    lines.push(format!("{}Repository: {}", indent(1), locator.repository_id()));
    if let Some(folder_id) = locator.folder_id() {
        lines.push(format!("{}Folder: {}", indent(1), folder_id));
    }
    lines.push(format!("{}File: {}", indent(1), locator.file_id()));
    lines
}

/// Summary line for a batch decode run.
///
/// When the report buffer wrapped, says how many of the newest events were
/// retained for display.
pub fn format_list_summary(
    total: usize,
    modified: usize,
    retained: usize,
    capacity: usize,
) -> String {
    let mut line = format!(
        "Decoded {} paths: {} with transforms, {} originals",
        total,
        modified,
        total - modified
    );
    if retained < total {
        line.push_str(&format!(
            " (showing newest {retained}, report buffer capacity {capacity})"
        ));
    }
    line
}

pub fn print_reference(path: &str, reference: &ImageReference) {
    for line in format_reference(path, reference) {
        println!("{line}");
    }
}

pub fn print_locator(locator: &RepositoryLocator) {
    for line in format_locator(locator) {
        println!("{line}");
    }
}
