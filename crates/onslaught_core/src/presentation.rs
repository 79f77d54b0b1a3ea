//! Presentation collaborator (animation, audio, HUD)
//!
//! Calls are fire-and-forget; the combat layer never reads anything back.

use crate::id::ObjectId;

/// Receiver for presentation notifications
///
/// Every method defaults to doing nothing so implementors only override
/// what they render.
pub trait Presentation {
    /// A hostile started or stopped attacking
    fn set_attacking(&self, _agent: ObjectId, _attacking: bool) {}

    /// A hostile died
    fn on_death(&self, _agent: ObjectId) {}

    /// A weapon fired
    fn on_fire(&self, _shooter: ObjectId) {}

    /// Player health changed, normalized to 0..=1
    fn on_health_changed(&self, _normalized: f32) {}

    /// Player ammo changed
    fn on_ammo_changed(&self, _count: u32) {}

    /// The player died
    fn on_player_death(&self) {}

    /// A new wave started
    fn on_wave_changed(&self, _wave: u32) {}

    /// Number of live hostiles changed
    fn on_enemy_count_changed(&self, _count: u32) {}
}

/// Presentation that ignores every call
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresentation;

impl Presentation for NullPresentation {}
