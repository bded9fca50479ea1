//! Quick-pick seams.
//!
//! The picker UI is host-owned; this module only defines the exchange shape.
//! Entries carry the provider's position in the resolved list so a selection
//! can be mapped back without re-resolving.

use async_trait::async_trait;
use sqltools_types::UNKNOWN_EXTENSION;

/// One selectable formatter entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    /// Position of the provider within the resolved list for this
    /// invocation. [`PickOutcome::Picked`] carries this value back.
    pub index: usize,
    /// Provider display name; may be empty.
    pub label: String,
    /// Secondary text shown next to the label.
    pub detail: Option<String>,
    /// Contributing extension identifier, or [`UNKNOWN_EXTENSION`].
    pub extension_id: String,
}

impl PickItem {
    pub fn new(index: usize, label: impl Into<String>, extension_id: Option<&str>) -> Self {
        let extension_id = extension_id.unwrap_or(UNKNOWN_EXTENSION).to_string();
        Self {
            index,
            label: label.into(),
            detail: Some(extension_id.clone()),
            extension_id,
        }
    }
}

/// Result of presenting a quick-pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// The entry with this `index` was selected.
    Picked(usize),
    /// The picker was dismissed without a selection.
    Cancelled,
}

/// Modal list-selection seam.
///
/// Implementations wait indefinitely for a selection or dismissal. Reveal
/// requests triggered on an entry are forwarded to `reveal` without closing
/// the picker and without counting as a selection.
#[async_trait]
pub trait QuickPick: Send + Sync {
    async fn pick(&self, items: Vec<PickItem>, reveal: &dyn RevealExtension) -> PickOutcome;
}

/// Receives requests to show the extension that contributed a provider.
pub trait RevealExtension: Send + Sync {
    fn reveal(&self, extension_id: &str);
}

/// Reveal sink that ignores every request.
#[derive(Debug, Default)]
pub struct NullReveal;

impl RevealExtension for NullReveal {
    fn reveal(&self, _extension_id: &str) {}
}
