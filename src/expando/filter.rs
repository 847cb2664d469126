//! Allow/deny filtering over the backing instance's visible members.

use std::collections::HashSet;

/// Whether a filter's name set is a whitelist or a blacklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum FilterMode {
    /// Only the named members are exposed.
    Allow,
    /// All members except the named ones are exposed.
    Disallow,
}

/// Restricts which backing-instance members a dynamic object exposes.
///
/// Set at construction and immutable thereafter; membership checks are
/// case-insensitive, matching property-lookup semantics. The filter governs
/// property visibility only - bag entries are always the facade's own.
#[derive(Debug, Clone)]
pub struct MemberFilter {
    names: HashSet<String>,
    mode: FilterMode,
}

impl MemberFilter {
    /// A whitelist filter exposing only the named members.
    #[must_use]
    pub fn allow<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        MemberFilter::new(names, FilterMode::Allow)
    }

    /// A blacklist filter exposing everything except the named members.
    #[must_use]
    pub fn disallow<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        MemberFilter::new(names, FilterMode::Disallow)
    }

    fn new<I>(names: I, mode: FilterMode) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        MemberFilter {
            names: names
                .into_iter()
                .map(|name| name.into().to_ascii_lowercase())
                .collect(),
            mode,
        }
    }

    /// The filter mode.
    #[must_use]
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Returns `true` if a member with the given name is exposed.
    #[must_use]
    pub fn permits(&self, name: &str) -> bool {
        let named = self.names.contains(&name.to_ascii_lowercase());
        match self.mode {
            FilterMode::Allow => named,
            FilterMode::Disallow => !named,
        }
    }
}
