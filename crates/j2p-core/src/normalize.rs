//! Name normalization and tag splitting.

/// Normalize a display name into the key form used by reference caches.
///
/// Trims surrounding whitespace and lower-cases, so `"Bug"`, `"bug "` and
/// `"BUG"` all map to `"bug"`.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Split a delimited tag cell into trimmed, non-empty tags.
///
/// Commas always split in addition to `separator`. Order is preserved and
/// duplicates are kept. An empty or absent cell yields no tags.
#[must_use]
pub fn split_tags(raw: Option<&str>, separator: &str) -> Vec<String> {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return Vec::new();
    };

    let unified;
    let (text, sep) = if separator.is_empty() {
        (raw, ",")
    } else {
        unified = raw.replace(',', separator);
        (unified.as_str(), separator)
    };

    text.split(sep)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
