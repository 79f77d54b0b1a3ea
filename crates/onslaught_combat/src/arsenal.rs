//! Player weapon loadouts

use crate::player::{AmmoSupply, PlayerConfig};
use crate::weapon::{FireIntent, HitMode, Weapon, WeaponConfig};
use glam::Vec3;
use onslaught_core::{ObjectId, Result, Role};
use serde::{Deserialize, Serialize};

/// Selectable player weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Loadout {
    /// Starting sidearm, slow projectile
    Pistol,
    /// Instant hit out to the interact range
    Plasma,
    /// Heavy projectile
    Rocket,
}

impl Loadout {
    /// Map a weapon-select id
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Self::Pistol),
            1 => Some(Self::Plasma),
            2 => Some(Self::Rocket),
            _ => None,
        }
    }

    /// Weapon stats for this loadout
    pub fn weapon_config(&self, player: &PlayerConfig) -> WeaponConfig {
        let fire_rate = if player.weapon_cooldown > 0.0 {
            1.0 / player.weapon_cooldown
        } else {
            f32::MAX
        };
        let base = match self {
            Self::Pistol => WeaponConfig::projectile(10.0, 20.0, 5.0).with_effect(Some("bullet".into())),
            Self::Plasma => WeaponConfig::hitscan(10.0, player.interact_range).with_effect(Some("plasma".into())),
            Self::Rocket => WeaponConfig::projectile(25.0, 15.0, 5.0).with_effect(Some("rocket".into())),
        };
        base.with_fire_rate(fire_rate).with_ammo_gated(player.ammo_gated)
    }
}

/// The player's weapon and the loadout it is set to
#[derive(Debug, Clone)]
pub struct PlayerArsenal {
    weapon: Weapon,
    loadout: Loadout,
    config: PlayerConfig,
}

impl PlayerArsenal {
    /// Start with the pistol
    pub fn new(player: ObjectId, config: PlayerConfig) -> Self {
        let loadout = Loadout::Pistol;
        Self {
            weapon: Weapon::new(player, Role::Player, loadout.weapon_config(&config)),
            loadout,
            config,
        }
    }

    /// Switch loadout by id. Unknown ids are logged and ignored.
    pub fn change_weapon(&mut self, id: u32) -> bool {
        let Some(loadout) = Loadout::from_id(id) else {
            log::warn!("Unknown weapon id {}", id);
            return false;
        };
        self.set_loadout(loadout);
        true
    }

    /// Switch loadout
    pub fn set_loadout(&mut self, loadout: Loadout) {
        if loadout != self.loadout {
            log::info!("Player switched to {:?}", loadout);
        }
        self.loadout = loadout;
        self.weapon.set_config(loadout.weapon_config(&self.config));
    }

    /// Fire the current weapon
    pub fn try_fire(
        &mut self,
        now: f64,
        origin: Vec3,
        direction: Vec3,
        ammo: &mut dyn AmmoSupply,
    ) -> Result<Option<FireIntent>> {
        self.weapon.try_fire(now, origin, direction, Some(ammo))
    }

    pub fn loadout(&self) -> Loadout {
        self.loadout
    }

    pub fn mode(&self) -> HitMode {
        self.weapon.config().mode
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Magazine(u32);

    impl AmmoSupply for Magazine {
        fn ammo(&self) -> u32 {
            self.0
        }

        fn consume(&mut self) -> bool {
            if self.0 == 0 {
                return false;
            }
            self.0 -= 1;
            true
        }
    }

    fn arsenal() -> PlayerArsenal {
        PlayerArsenal::new(ObjectId::from_raw(1), PlayerConfig::default())
    }

    #[test]
    fn test_change_weapon() {
        let mut arsenal = arsenal();
        assert_eq!(arsenal.loadout(), Loadout::Pistol);

        assert!(arsenal.change_weapon(1));
        assert_eq!(arsenal.loadout(), Loadout::Plasma);
        assert_eq!(arsenal.mode(), HitMode::Ray { range: 50.0 });

        assert!(arsenal.change_weapon(2));
        assert!(matches!(arsenal.mode(), HitMode::Projectile { .. }));
    }

    #[test]
    fn test_unknown_weapon_ignored() {
        let mut arsenal = arsenal();
        arsenal.change_weapon(1);
        assert!(!arsenal.change_weapon(7));
        assert_eq!(arsenal.loadout(), Loadout::Plasma);
    }

    #[test]
    fn test_player_cooldown() {
        let mut arsenal = arsenal();
        let mut magazine = Magazine(10);

        assert!(arsenal.try_fire(0.0, Vec3::ZERO, Vec3::NEG_Z, &mut magazine).unwrap().is_some());
        assert!(arsenal.try_fire(0.2, Vec3::ZERO, Vec3::NEG_Z, &mut magazine).unwrap().is_none());
        assert!(arsenal.try_fire(0.31, Vec3::ZERO, Vec3::NEG_Z, &mut magazine).unwrap().is_some());
        assert_eq!(magazine.ammo(), 8);
    }

    #[test]
    fn test_switch_keeps_cooldown() {
        let mut arsenal = arsenal();
        let mut magazine = Magazine(10);

        arsenal.try_fire(0.0, Vec3::ZERO, Vec3::NEG_Z, &mut magazine).unwrap();
        arsenal.change_weapon(2);
        assert!(arsenal.try_fire(0.1, Vec3::ZERO, Vec3::NEG_Z, &mut magazine).unwrap().is_none());
    }

    #[test]
    fn test_ungated_player_weapon() {
        let config = PlayerConfig {
            ammo_gated: false,
            ..Default::default()
        };
        let mut arsenal = PlayerArsenal::new(ObjectId::from_raw(1), config);
        let mut magazine = Magazine(0);
        assert!(arsenal.try_fire(0.0, Vec3::ZERO, Vec3::NEG_Z, &mut magazine).unwrap().is_some());
    }
}
