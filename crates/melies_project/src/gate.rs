//! The composition gate.
//!
//! A single derived boolean authorizes downstream export: every scene is
//! approved, at least one scene exists, and a playable audio track is
//! selected. The value is computed fresh from a consistent read of current
//! state on every call, never cached across mutations, so a caller that
//! observes `true` is guaranteed all approvals held at read time.

use melies_core::AudioSelection;
use melies_scene::SceneState;

/// Whether composition may begin.
///
/// A music *description* does not satisfy the gate; only an explicit track
/// reference does.
///
/// # Examples
///
/// ```
/// use melies_core::{AudioSelection, AudioTrack};
/// use melies_project::gate::composition_ready;
/// use melies_scene::SceneState;
///
/// let track = AudioSelection::Track(AudioTrack::new("lib-1", "Tide"));
/// assert!(composition_ready(
///     &[SceneState::Approved, SceneState::Approved],
///     Some(&track),
/// ));
/// assert!(!composition_ready(&[], Some(&track)));
/// ```
pub fn composition_ready(scene_states: &[SceneState], audio: Option<&AudioSelection>) -> bool {
    !scene_states.is_empty()
        && scene_states.iter().all(|state| *state == SceneState::Approved)
        && audio.and_then(AudioSelection::track).is_some()
}
