//! Date-partitioned repository folders.
//!
//! Image repositories shard their contents by upload date: a file stored on
//! 2014-05-06 lives under the folder `2014/05/06`. Keeping the format in one
//! place means locator keys, disk layout and cleanup jobs can never drift
//! apart on zero-padding or separator choice.

use crate::locator::{MalformedLocatorError, RepositoryLocator};
use chrono::NaiveDate;

/// Folder id for a date partition: `yyyy/MM/dd`, zero-padded.
pub fn date_folder(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

/// Build a locator for a file stored in a repository's date partition.
pub fn dated_locator(
    repository_id: &str,
    date: NaiveDate,
    file_id: &str,
) -> Result<RepositoryLocator, MalformedLocatorError> {
    RepositoryLocator::new(repository_id, Some(&date_folder(date)), file_id)
}
