//! Viewer identity.
//!
//! The portal has no real accounts. "The current user" is whoever the data
//! source lists under a [`PlaceholderIdentity`], and a viewer may pick their
//! own display name at signup, which replaces the placeholder everywhere it
//! shows up. See [`ViewerIdentity`].

use serde::{Deserialize, Serialize};

/// The identity of whoever is viewing the portal.
///
/// This is extracted once per request and passed explicitly to everything
/// that renders user-specific state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ViewerIdentity {
    display_name: Option<String>,
}

impl ViewerIdentity {
    /// A viewer that never signed up.
    pub const fn anonymous() -> ViewerIdentity {
        ViewerIdentity { display_name: None }
    }

    /// Creates a viewer identity from a raw display name.
    ///
    /// The name is trimmed. Blank names produce an anonymous viewer.
    pub fn new(display_name: impl AsRef<str>) -> ViewerIdentity {
        let display_name = display_name.as_ref().trim();

        if display_name.is_empty() {
            ViewerIdentity::anonymous()
        } else {
            ViewerIdentity {
                display_name: Some(display_name.to_owned()),
            }
        }
    }

    /// The display name override, if the viewer set one.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Whether the viewer has set a display name override.
    pub fn is_overridden(&self) -> bool {
        self.display_name.is_some()
    }

    /// Checks if a record with `name` belongs to this viewer.
    ///
    /// With an override, only the override matches. Without one, the
    /// placeholder identity stands in for the viewer.
    pub fn matches(&self, name: &str, placeholder: &PlaceholderIdentity) -> bool {
        match self.display_name.as_deref() {
            Some(display_name) => eq_ignore_case(name, display_name),
            None => placeholder.matches(name),
        }
    }

    /// Derives a referral code from the override.
    ///
    /// The name is lowercased with all whitespace stripped, then `suffix` is
    /// appended. Returns `None` for anonymous viewers.
    pub fn referral_code(&self, suffix: &str) -> Option<String> {
        self.display_name.as_deref().map(|name| {
            let mut code = name
                .chars()
                .filter(|ch| !ch.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect::<String>();
            code.push_str(suffix);
            code
        })
    }
}

/// The hardcoded names the data source uses for "the current user".
///
/// Every spelling names the same person. Matching is case-insensitive.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PlaceholderIdentity {
    spellings: Vec<String>,
}

impl PlaceholderIdentity {
    /// Creates a new placeholder identity from its accepted spellings.
    pub fn new<I, T>(spellings: I) -> PlaceholderIdentity
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        PlaceholderIdentity {
            spellings: spellings.into_iter().map(Into::into).collect(),
        }
    }

    /// The accepted spellings.
    pub fn spellings(&self) -> &[String] {
        &self.spellings
    }

    /// Checks if `name` is one of the placeholder spellings.
    pub fn matches(&self, name: &str) -> bool {
        self.spellings
            .iter()
            .any(|spelling| eq_ignore_case(name, spelling))
    }
}

impl Default for PlaceholderIdentity {
    fn default() -> Self {
        PlaceholderIdentity::new(["youssef", "youssef elkoumi"])
    }
}

/// Unicode-aware case-insensitive string equality.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
