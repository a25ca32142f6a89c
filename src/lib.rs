//! # imagepath
//!
//! The framework-free core of an image server's path handling: a compact
//! textual grammar that folds an image's location, requested dimensions,
//! crop variant and output format into a single path segment (and back),
//! plus the report buffer used to batch events between producer threads and
//! a periodic drain.
//!
//! ```text
//! img.jpg → img_400x600_1.png        resize to 400x600, crop variant 1, as PNG
//! default:test-file.txt              locator: repository + file
//! amazon-s3:2014/15/06:123-456-798   locator: repository + folder + file
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`variant`] | Variant filename grammar — encode/decode resize, crop variant and format requests |
//! | [`locator`] | Colon-delimited repository locator keys, parsing and building |
//! | [`folders`] | Date-partitioned (`yyyy/MM/dd`) repository folder ids |
//! | [`report`] | Fixed-capacity, overwrite-on-full buffer between producers and a drain |
//! | [`config`] | `imagepath.toml` loading and validation |
//! | [`output`] | CLI output formatting — pure `format_*` functions, `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## Pure Functions Over Stateful Codecs
//!
//! [`variant::encode_path`] and [`variant::decode_path`] are free functions
//! over plain data. There is nothing to configure and nothing to share, so
//! parsing is trivially testable and thread-safe by construction. The
//! HTTP-facing layer that maps request parameters onto these calls lives
//! elsewhere; this crate only owns the grammar.
//!
//! ## Best-Effort Grammar, Not a Formal Parser
//!
//! A stored base name that legitimately ends in `_123` cannot be told apart
//! from an encoded variant suffix. Decoding always prefers the encoded
//! interpretation and degrades unparseable suffixes to "no transformation"
//! rather than erroring — serving the original beats refusing the request.
//! Round-trips are guaranteed only for encoder output.
//!
//! ## Coarse Lock Over Lock-Free
//!
//! [`report::RingBuffer`] guards its fixed slot array with a single mutex.
//! Both operations are bounded by capacity and the drain cadence is slow, so
//! contention is negligible — and a coarse lock makes the no-double-drain
//! guarantee easy to see. Overwriting undrained items on wrap is the
//! intended backpressure policy: newest data wins.

pub mod config;
pub mod folders;
pub mod locator;
pub mod output;
pub mod report;
pub mod variant;

pub use locator::{MalformedLocatorError, RepositoryLocator};
pub use report::{InvalidCapacityError, RingBuffer};
pub use variant::{ImageReference, decode_path, encode_path};
