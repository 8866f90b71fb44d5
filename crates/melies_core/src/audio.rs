//! Project-wide audio selection.

use serde::{Deserialize, Serialize};

/// A playable track from the audio library.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudioTrack {
    /// Library identifier for the track
    pub id: String,
    /// Human-readable title
    pub title: String,
}

impl AudioTrack {
    /// Create a new track reference.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// The project's active audio selection.
///
/// Exactly one selection is active at a time; selecting a new one replaces
/// the old. A `Description` is advisory text from the music-idea capability,
/// not playable audio; only a `Track` satisfies the composition gate.
///
/// # Examples
///
/// ```
/// use melies_core::{AudioSelection, AudioTrack};
///
/// let idea = AudioSelection::Description("slow ambient piano".to_string());
/// assert!(idea.track().is_none());
///
/// let track = AudioSelection::Track(AudioTrack::new("lib-042", "Drift"));
/// assert!(track.track().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioSelection {
    /// A pre-existing library track
    Track(AudioTrack),
    /// Advisory music description produced by the music-idea capability
    Description(String),
}

impl AudioSelection {
    /// The playable track reference, if this selection is one.
    pub fn track(&self) -> Option<&AudioTrack> {
        match self {
            AudioSelection::Track(track) => Some(track),
            AudioSelection::Description(_) => None,
        }
    }
}
