use crate::contract::{ObjectEntry, ALLOWED_EXTENSIONS};

pub fn is_top_level(key: &str) -> bool {
    !key.contains('/')
}

/// Case-sensitive suffix match against the allow-list.
pub fn has_allowed_extension(key: &str) -> bool {
    ALLOWED_EXTENSIONS
        .iter()
        .any(|extension| key.ends_with(extension))
}

pub fn is_convertible(key: &str) -> bool {
    is_top_level(key) && has_allowed_extension(key)
}

/// Picks the first convertible entry in listing order.
pub fn select_file(entries: &[ObjectEntry]) -> Option<&ObjectEntry> {
    entries.iter().find(|entry| is_convertible(&entry.key))
}
