//! Filename derivation and unique path creation for streamed downloads.

use std::fs::File;
use std::path::{Component, Path, PathBuf};

use url::Url;

use super::constants::FALLBACK_DOWNLOAD_NAME;
use super::error::RequestError;

/// Sanitizes a filename for filesystem safety.
///
/// Replaces characters that are invalid on common filesystems
/// (`/ \ : * ? " < > |`) and control characters with `_`, and rewrites
/// dot segments so the result can never escape its directory.
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized
            .chars()
            .map(|c| if c == '.' { '_' } else { c })
            .collect()
    }
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

/// Filename derived from the last URL path segment, or [`FALLBACK_DOWNLOAD_NAME`].
pub(crate) fn filename_from_url(url: &Url) -> String {
    if let Some(mut segments) = url.path_segments()
        && let Some(last) = segments.next_back()
        && !last.is_empty()
    {
        let decoded = urlencoding::decode(last).map_or_else(|_| last.into(), |d| d.into_owned());
        return sanitize_filename(&decoded);
    }
    FALLBACK_DOWNLOAD_NAME.to_string()
}

/// Splits `name` into stem and extension (extension keeps its leading dot).
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) if pos > 0 => (&name[..pos], &name[pos..]),
        _ => (name, ""),
    }
}

/// Atomically creates a new, uniquely named file in `dir` for a download of `url`.
///
/// The name follows `<stem>-<random><ext>`, so concurrent downloads of the
/// same URL never share a file.
pub(crate) fn create_download_file(dir: &Path, url: &Url) -> Result<(File, PathBuf), RequestError> {
    let name = filename_from_url(url);
    let (stem, ext) = split_extension(&name);
    let prefix = format!("{stem}-");

    let temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(ext)
        .rand_bytes(8)
        .tempfile_in(dir)
        .map_err(|e| RequestError::io(dir.join(&name), e))?;
    temp.keep()
        .map_err(|e| RequestError::io(dir.join(&name), e.error))
}
