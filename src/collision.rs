//! Projectile collision passes.
//!
//! Both passes mark hits through `Entity::alive` and prune afterwards, so the
//! outcome depends only on collection order.

use crate::compute::apply_damage;
use crate::entities::{BoundingBox, EnemyUnit, Player, Projectile};

/// Strict AABB overlap: boxes that merely share an edge do not collide.
pub fn overlaps(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}

/// Player shots against enemy units.
///
/// Each shot destroys at most one unit: the first live unit in formation
/// order that it overlaps. Both are removed. Returns the number of kills.
pub fn resolve_player_hits(projectiles: &mut Vec<Projectile>, units: &mut Vec<EnemyUnit>) -> u32 {
    let mut kills = 0;
    for projectile in projectiles.iter_mut() {
        let bounds = projectile.entity.bounds();
        let target = units
            .iter_mut()
            .find(|u| u.entity.alive && overlaps(&bounds, &u.entity.bounds()));
        if let Some(unit) = target {
            unit.entity.alive = false;
            projectile.entity.alive = false;
            kills += 1;
            log::debug!(
                "enemy at ({}, {}) destroyed",
                unit.entity.position.x,
                unit.entity.position.y
            );
        }
    }
    projectiles.retain(|p| p.entity.alive);
    units.retain(|u| u.entity.alive);
    kills
}

/// Enemy shots against the player.
///
/// Every overlapping shot is removed and deals `damage` on its own, so
/// simultaneous hits stack. The player itself is never removed. Returns the
/// number of hits.
pub fn resolve_enemy_hits(projectiles: &mut Vec<Projectile>, player: &mut Player, damage: u32) -> u32 {
    let target = player.entity.bounds();
    let mut hits = 0;
    for projectile in projectiles.iter_mut() {
        if overlaps(&projectile.entity.bounds(), &target) {
            projectile.entity.alive = false;
            apply_damage(player, damage);
            hits += 1;
        }
    }
    projectiles.retain(|p| p.entity.alive);
    if hits > 0 {
        log::debug!("player hit {hits} time(s), health {}", player.health);
    }
    hits
}
