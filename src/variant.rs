//! Centralized parsing and building of the variant filename notation.
//!
//! An image server keeps every rendered variant of an image next to the
//! original, distinguished only by a suffix appended to the base name:
//!
//! ```text
//! img.jpg            original
//! img_400x.jpg       resized to width 400
//! img_x600.jpg       resized to height 600
//! img_400x600.jpg    resized to 400x600
//! img_400x600_1.jpg  crop variant 1 of the 400x600 rendition
//! img_1.jpg          crop variant 1, original dimensions
//! img_400x600_1.png  same, delivered as PNG
//! ```
//!
//! This module provides the single encode/decode pair for that notation so
//! request handling, storage and cleanup all agree on it.
//!
//! ## Grammar
//!
//! `<base>[_<dimtoken>][_<variant>].<extension>` where the dimension token is
//! `{w}x{h}`, `{w}x` or `x{h}` and the variant is a bare decimal counter. A
//! bare `x` is never emitted and never recognized.
//!
//! ## Ambiguity
//!
//! A base name that legitimately ends in `_123` is indistinguishable from an
//! encoded variant suffix. Decoding always prefers the encoded
//! interpretation, so round-trips are only guaranteed for names produced by
//! [`encode_path`]. Names that match neither suffix form decode to the
//! original, unmodified reference — an unparseable suffix is not an error.

use serde::Serialize;

/// Decoded form of an encoded image path.
///
/// `width`, `height` and `variant` are `None` when the path requests no such
/// modification; all three absent means "serve the original".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReference {
    /// Directory portion preceding the filename, unchanged by encoding.
    /// Empty for a bare filename.
    pub base_path: String,
    /// Filename stem without any variant suffix.
    pub base_name: String,
    /// Extension of the stored original, empty if it has none.
    pub extension: String,
    /// Requested width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Requested height in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Crop variant counter disambiguating renditions of equal dimensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<u32>,
    /// Delivery extension overriding [`extension`](Self::extension) on encode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_extension: Option<String>,
}

impl ImageReference {
    /// Reference to an unmodified image at `path`, requesting no resize,
    /// variant or format change.
    pub fn original(path: &str) -> Self {
        let (base_path, file_name) = split_directory(path);
        let (base_name, extension) = split_extension(file_name);
        Self {
            base_path: base_path.to_string(),
            base_name: base_name.to_string(),
            extension: extension.to_string(),
            width: None,
            height: None,
            variant: None,
            output_extension: None,
        }
    }

    /// Whether this reference requests any modification of the original.
    pub fn is_modified(&self) -> bool {
        self.width.is_some()
            || self.height.is_some()
            || self.variant.is_some()
            || self.output_extension.is_some()
    }
}

/// Build the encoded path for a reference.
///
/// A reference with no modifications encodes back to
/// `basePath/baseName.extension` unchanged. An empty final extension emits
/// no trailing dot.
pub fn encode_path(reference: &ImageReference) -> String {
    let mut name = reference.base_name.clone();

    if reference.width.is_some() || reference.height.is_some() {
        name.push('_');
        if let Some(width) = reference.width {
            name.push_str(&width.to_string());
        }
        name.push('x');
        if let Some(height) = reference.height {
            name.push_str(&height.to_string());
        }
    }

    if let Some(variant) = reference.variant {
        name.push('_');
        name.push_str(&variant.to_string());
    }

    let extension = reference
        .output_extension
        .as_deref()
        .unwrap_or(&reference.extension);
    if !extension.is_empty() {
        name.push('.');
        name.push_str(extension);
    }

    if reference.base_path.is_empty() {
        name
    } else {
        format!("{}/{}", reference.base_path, name)
    }
}

/// Parse an encoded path back into a reference.
///
/// Never fails: a trailing segment that matches neither suffix form is
/// returned as-is with no modifications requested. The decoded
/// `extension` is whatever the path carries — the grammar does not record
/// whether it was overridden, so `output_extension` is always `None` here.
pub fn decode_path(path: &str) -> ImageReference {
    let (base_path, file_name) = split_directory(path);
    let (name, extension) = split_extension(file_name);
    let (base_name, width, height, variant) = parse_variant_suffix(name);

    ImageReference {
        base_path: base_path.to_string(),
        base_name: base_name.to_string(),
        extension: extension.to_string(),
        width,
        height,
        variant,
        output_extension: None,
    }
}

/// Split a path into its directory prefix and trailing segment.
fn split_directory(path: &str) -> (&str, &str) {
    match path.rsplit_once('/') {
        Some((directory, file_name)) => (directory, file_name),
        None => ("", path),
    }
}

/// Split a filename into stem and extension on the last dot.
fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rsplit_once('.') {
        Some((stem, extension)) => (stem, extension),
        None => (file_name, ""),
    }
}

/// Match the `_<dimtoken>[_<variant>]` / `_<variant>` suffix forms against a
/// filename stem. Returns the stem untouched when neither matches.
fn parse_variant_suffix(name: &str) -> (&str, Option<u32>, Option<u32>, Option<u32>) {
    let Some((head, tail)) = name.rsplit_once('_') else {
        return (name, None, None, None);
    };

    if let Some(variant) = parse_counter(tail) {
        // A variant counter may be preceded by a dimension token.
        if let Some((base, token)) = head.rsplit_once('_')
            && let Some((width, height)) = parse_dimension_token(token)
        {
            return (base, width, height, Some(variant));
        }
        return (head, None, None, Some(variant));
    }

    if let Some((width, height)) = parse_dimension_token(tail) {
        return (head, width, height, None);
    }

    (name, None, None, None)
}

/// Parse a bare decimal counter. Empty or non-digit input is no match.
fn parse_counter(segment: &str) -> Option<u32> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Parse a `{w}x{h}` / `{w}x` / `x{h}` dimension token.
///
/// Exactly one `x`, at least one side present, both sides pure digits.
fn parse_dimension_token(token: &str) -> Option<(Option<u32>, Option<u32>)> {
    let (left, right) = token.split_once('x')?;
    if right.contains('x') || (left.is_empty() && right.is_empty()) {
        return None;
    }
    Some((parse_dimension_side(left)?, parse_dimension_side(right)?))
}

/// One side of a dimension token: empty means absent, digits mean a value,
/// anything else fails the whole token.
fn parse_dimension_side(side: &str) -> Option<Option<u32>> {
    if side.is_empty() {
        return Some(None);
    }
    if !side.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    side.parse().ok().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(
        path: &str,
        width: Option<u32>,
        height: Option<u32>,
        variant: Option<u32>,
        output_extension: Option<&str>,
    ) -> ImageReference {
        let mut r = ImageReference::original(path);
        r.width = width;
        r.height = height;
        r.variant = variant;
        r.output_extension = output_extension.map(str::to_string);
        r
    }

    // =========================================================================
    // Encoding
    // =========================================================================

    #[test]
    fn encode_unmodified_is_passthrough() {
        let r = ImageReference::original("2164/12/14/541.jpg");
        assert!(!r.is_modified());
        assert_eq!(encode_path(&r), "2164/12/14/541.jpg");
    }

    #[test]
    fn encode_width_only() {
        let r = reference("img.jpg", Some(400), None, None, None);
        assert_eq!(encode_path(&r), "img_400x.jpg");
    }

    #[test]
    fn encode_height_only() {
        let r = reference("img.jpg", None, Some(600), None, None);
        assert_eq!(encode_path(&r), "img_x600.jpg");
    }

    #[test]
    fn encode_both_dimensions() {
        let r = reference("img.jpg", Some(400), Some(600), None, None);
        assert_eq!(encode_path(&r), "img_400x600.jpg");
    }

    #[test]
    fn encode_dimensions_and_variant() {
        let r = reference("img.jpg", Some(400), Some(600), Some(1), None);
        assert_eq!(encode_path(&r), "img_400x600_1.jpg");
    }

    #[test]
    fn encode_output_extension_override() {
        let r = reference("img.jpg", Some(400), Some(600), Some(1), Some("png"));
        assert_eq!(encode_path(&r), "img_400x600_1.png");
    }

    #[test]
    fn encode_variant_without_dimensions_omits_token() {
        // No bare `x` when neither dimension is requested.
        let r = reference("img.jpg", None, None, Some(7), None);
        assert_eq!(encode_path(&r), "img_7.jpg");
    }

    #[test]
    fn encode_format_change_only() {
        let r = reference("img.jpg", None, None, None, Some("webp"));
        assert_eq!(encode_path(&r), "img.webp");
    }

    #[test]
    fn encode_preserves_base_path() {
        let r = reference("photos/2014/05/img.jpg", Some(400), None, None, None);
        assert_eq!(encode_path(&r), "photos/2014/05/img_400x.jpg");
    }

    #[test]
    fn encode_empty_extension_has_no_trailing_dot() {
        let r = reference("img", Some(400), None, None, None);
        assert_eq!(encode_path(&r), "img_400x");
    }

    // =========================================================================
    // Decoding
    // =========================================================================

    #[test]
    fn decode_plain_name_is_unmodified() {
        let r = decode_path("holiday-photo.jpg");
        assert_eq!(r.base_name, "holiday-photo");
        assert_eq!(r.extension, "jpg");
        assert_eq!((r.width, r.height, r.variant), (None, None, None));
    }

    #[test]
    fn decode_width_only() {
        let r = decode_path("img_400x.jpg");
        assert_eq!(r.base_name, "img");
        assert_eq!(r.width, Some(400));
        assert_eq!(r.height, None);
        assert_eq!(r.variant, None);
    }

    #[test]
    fn decode_height_only() {
        let r = decode_path("img_x600.jpg");
        assert_eq!(r.width, None);
        assert_eq!(r.height, Some(600));
    }

    #[test]
    fn decode_dimensions_and_variant() {
        let r = decode_path("img_400x600_1.png");
        assert_eq!(r.base_name, "img");
        assert_eq!(r.width, Some(400));
        assert_eq!(r.height, Some(600));
        assert_eq!(r.variant, Some(1));
        assert_eq!(r.extension, "png");
        assert_eq!(r.output_extension, None);
    }

    #[test]
    fn decode_variant_only() {
        let r = decode_path("img_7.jpg");
        assert_eq!(r.base_name, "img");
        assert_eq!((r.width, r.height), (None, None));
        assert_eq!(r.variant, Some(7));
    }

    #[test]
    fn decode_keeps_base_path() {
        let r = decode_path("photos/2014/05/img_400x600.jpg");
        assert_eq!(r.base_path, "photos/2014/05");
        assert_eq!(r.base_name, "img");
        assert_eq!(r.width, Some(400));
    }

    #[test]
    fn decode_digit_suffix_prefers_encoded_interpretation() {
        // `photo_123` could be a literal base name, but the encoded reading
        // always wins.
        let r = decode_path("photo_123.jpg");
        assert_eq!(r.base_name, "photo");
        assert_eq!(r.variant, Some(123));
    }

    #[test]
    fn decode_underscore_word_suffix_is_unmodified() {
        let r = decode_path("my_file.jpg");
        assert_eq!(r.base_name, "my_file");
        assert!(!r.is_modified());
    }

    #[test]
    fn decode_bare_x_is_not_a_dimension_token() {
        let r = decode_path("photo_x.jpg");
        assert_eq!(r.base_name, "photo_x");
        assert!(!r.is_modified());
    }

    #[test]
    fn decode_double_x_is_not_a_dimension_token() {
        let r = decode_path("img_400x600x700.jpg");
        assert_eq!(r.base_name, "img_400x600x700");
        assert!(!r.is_modified());
    }

    #[test]
    fn decode_no_extension() {
        let r = decode_path("photos/img_400x");
        assert_eq!(r.base_name, "img");
        assert_eq!(r.extension, "");
        assert_eq!(r.width, Some(400));
    }

    #[test]
    fn decode_variant_after_literal_underscore_base() {
        // The head keeps its own underscores when it holds no dimension token.
        let r = decode_path("my_file_2.jpg");
        assert_eq!(r.base_name, "my_file");
        assert_eq!(r.variant, Some(2));
        assert_eq!((r.width, r.height), (None, None));
    }

    #[test]
    fn decode_oversized_counter_degrades_to_unmodified() {
        // Counters beyond u32 are not plausible encoder output.
        let r = decode_path("img_99999999999999999999.jpg");
        assert_eq!(r.base_name, "img_99999999999999999999");
        assert!(!r.is_modified());
    }

    // =========================================================================
    // Round-trips
    // =========================================================================

    #[test]
    fn round_trip_dimensions_and_variant() {
        for (width, height, variant) in [
            (Some(400), Some(600), Some(1)),
            (Some(400), None, Some(2)),
            (None, Some(600), None),
            (None, None, Some(12)),
        ] {
            let encoded = encode_path(&reference("img.jpg", width, height, variant, None));
            let decoded = decode_path(&encoded);
            assert_eq!(
                (decoded.width, decoded.height, decoded.variant),
                (width, height, variant),
                "round-trip failed for {encoded}"
            );
            assert_eq!(decoded.base_name, "img");
        }
    }

    #[test]
    fn round_trip_output_extension_survives_as_effective_extension() {
        let encoded = encode_path(&reference("img.jpg", Some(400), None, None, Some("png")));
        let decoded = decode_path(&encoded);
        assert_eq!(decoded.extension, "png");
        assert_eq!(decoded.output_extension, None);
    }
}
