//! Selector answers with a placeholder and a free-text escape.
//!
//! Every dropdown in the form (the four geography levels and the officer's
//! designation) offers the same two non-data entries around its options: a
//! "not yet chosen" placeholder and an "other" entry that reveals a text box.

use serde::{Deserialize, Serialize};

use crate::labels::{OTHER, PLACEHOLDER};

/// The user's answer to one selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Choice {
    /// The placeholder is still selected.
    #[default]
    Unset,
    /// One of the enumerated options.
    Listed(String),
    /// The "other" escape, carrying whatever the user typed.
    Other(String),
}

impl Choice {
    /// Parse a raw selector value plus the companion free-text box.
    ///
    /// The free text is only consulted when `choice` is the "other" sentinel.
    pub fn from_raw(choice: &str, free_text: &str) -> Self {
        match choice {
            PLACEHOLDER => Self::Unset,
            OTHER => Self::Other(free_text.to_string()),
            listed => Self::Listed(listed.to_string()),
        }
    }

    /// Final value: empty for the placeholder, the typed text for "other",
    /// the option itself otherwise.
    pub fn resolve(&self) -> String {
        match self {
            Self::Unset => String::new(),
            Self::Listed(value) | Self::Other(value) => value.clone(),
        }
    }

    /// The enumerated option, if one was picked from the list.
    pub fn listed(&self) -> Option<&str> {
        match self {
            Self::Listed(value) => Some(value),
            _ => None,
        }
    }
}

/// Resolve a raw selector value against its free-text box.
///
/// ```
/// use fiber_survey_core::choice::resolve;
/// use fiber_survey_core::labels::{OTHER, PLACEHOLDER};
///
/// assert_eq!(resolve(PLACEHOLDER, "ignored"), "");
/// assert_eq!(resolve(OTHER, "নতুন বাজার"), "নতুন বাজার");
/// assert_eq!(resolve("ঢাকা", "ignored"), "ঢাকা");
/// ```
pub fn resolve(choice: &str, free_text: &str) -> String {
    Choice::from_raw(choice, free_text).resolve()
}

/// Surround a list of options with the placeholder and "other" entries.
pub fn with_sentinels<I, S>(options: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut all = vec![PLACEHOLDER.to_string()];
    all.extend(options.into_iter().map(Into::into));
    all.push(OTHER.to_string());
    all
}
