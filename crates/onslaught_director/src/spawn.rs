//! Spawn points and proximity selection

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A fixed location hostiles may appear at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: Vec3,
    #[serde(default = "identity")]
    pub rotation: Quat,
}

fn identity() -> Quat {
    Quat::IDENTITY
}

impl SpawnPoint {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }
}

/// The `k` points nearest `origin`, closest first
///
/// Returns every point when fewer than `k` exist.
pub fn select_nearest(points: &[SpawnPoint], origin: Vec3, k: usize) -> Vec<SpawnPoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| {
        a.position
            .distance_squared(origin)
            .total_cmp(&b.position.distance_squared(origin))
    });
    sorted.truncate(k);
    sorted
}
