//! Search and category filtering over decrypted entries.

use super::entry::CredentialEntry;

/// Bucket name for entries without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A search term plus an optional category.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    query: Option<String>,
    category: Option<String>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match on title, username, url and notes.
    /// Blank queries match everything.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        let query = query.into().trim().to_lowercase();
        self.query = (!query.is_empty()).then_some(query);
        self
    }

    /// Exact category match; `UNCATEGORIZED` selects entries without one.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = (!category.is_empty()).then_some(category);
        self
    }

    pub fn matches(&self, entry: &CredentialEntry) -> bool {
        self.matches_query(entry) && self.matches_category(entry)
    }

    /// Keep the matching entries, in their original order.
    pub fn apply<'a>(&self, entries: &'a [CredentialEntry]) -> Vec<&'a CredentialEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }

    fn matches_query(&self, entry: &CredentialEntry) -> bool {
        let Some(query) = &self.query else {
            return true;
        };
        let hit = |field: &str| field.to_lowercase().contains(query.as_str());

        hit(&entry.title)
            || hit(&entry.username)
            || entry.url.as_deref().is_some_and(hit)
            || entry.notes.as_deref().is_some_and(hit)
    }

    fn matches_category(&self, entry: &CredentialEntry) -> bool {
        match &self.category {
            None => true,
            Some(wanted) => category_of(entry) == wanted,
        }
    }
}

/// The category an entry is listed under.
pub fn category_of(entry: &CredentialEntry) -> &str {
    entry
        .category
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or(UNCATEGORIZED)
}

/// Distinct categories in first-seen order.
pub fn categories(entries: &[CredentialEntry]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for entry in entries {
        let category = category_of(entry);
        if !seen.iter().any(|c| c == category) {
            seen.push(category.to_string());
        }
    }
    seen
}
