//! Local session: the display name chosen at the gate.
//!
//! The name is kept in memory for the lifetime of the page only. It is not
//! checked for uniqueness and carries no authentication.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub display_name: Option<String>,
}

impl SessionState {
    /// Accept `raw` as the display name if it is non-empty after trimming.
    ///
    /// Returns whether the gate opened.
    pub fn join(&mut self, raw: &str) -> bool {
        match normalize_display_name(raw) {
            Some(name) => {
                self.display_name = Some(name);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn has_joined(&self) -> bool {
        self.display_name.is_some()
    }

    /// Display name, or empty before the gate opened.
    #[must_use]
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or_default()
    }
}

/// Trim a candidate display name; `None` if nothing is left.
#[must_use]
pub fn normalize_display_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
