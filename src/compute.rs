//! Game-logic operations.
//!
//! Every function here works on the entities in place and takes time as an
//! explicit `now_ms` argument. The only other source of variation is an
//! injected RNG, used once per enemy at spawn.

use rand::Rng;

use crate::collision::{resolve_enemy_hits, resolve_player_hits};
use crate::config::GameConfig;
use crate::entities::{
    EnemyUnit, Entity, Faction, Formation, GameSession, Player, Projectile, Vector2,
};
use crate::input::InputSnapshot;

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Move one tick along the projectile's fixed velocity.
pub fn advance_projectile(projectile: &mut Projectile) {
    projectile.entity.position.x += projectile.velocity.x;
    projectile.entity.position.y += projectile.velocity.y;
}

/// True once the whole box has left the vertical extent of the playfield.
pub fn projectile_off_screen(projectile: &Projectile, screen_height: f32) -> bool {
    let bounds = projectile.entity.bounds();
    bounds.bottom() < 0.0 || bounds.top() > screen_height
}

/// Advance every projectile and drop the ones that left the playfield.
pub fn advance_projectiles(projectiles: &mut Vec<Projectile>, screen_height: f32) {
    for projectile in projectiles.iter_mut() {
        advance_projectile(projectile);
    }
    projectiles.retain(|p| !projectile_off_screen(p, screen_height));
}

// ── Player ────────────────────────────────────────────────────────────────────

/// A fresh ship at bottom-centre with full health.
pub fn new_player(config: &GameConfig) -> Player {
    let size = config.player_size();
    let x = (config.screen_width / 2.0).floor() - size.w / 2.0;
    let y = config.screen_height - config.player_bottom_margin - size.h;
    Player {
        entity: Entity::new(Vector2::new(x, y), size),
        health: config.max_health,
        max_health: config.max_health,
        speed: config.player_speed,
        fire_delay_ms: config.player_fire_delay_ms,
        last_shot_ms: None,
        projectiles: Vec::new(),
    }
}

fn clamp_player_x(player: &mut Player, screen_width: f32) {
    let max_x = (screen_width - player.entity.size.w).max(0.0);
    player.entity.position.x = player.entity.position.x.clamp(0.0, max_x);
}

pub fn move_player_left(player: &mut Player, screen_width: f32) {
    player.entity.position.x -= player.speed;
    clamp_player_x(player, screen_width);
}

pub fn move_player_right(player: &mut Player, screen_width: f32) {
    player.entity.position.x += player.speed;
    clamp_player_x(player, screen_width);
}

/// Spawn a shot from the ship's top-centre unless the last one was fired
/// within `fire_delay_ms`. Returns whether a shot was fired.
pub fn player_try_fire(player: &mut Player, now_ms: u64, config: &GameConfig) -> bool {
    if let Some(last) = player.last_shot_ms {
        if now_ms.saturating_sub(last) <= player.fire_delay_ms {
            return false;
        }
    }
    let bounds = player.entity.bounds();
    let muzzle = Vector2::new(bounds.center().x, bounds.top());
    player.projectiles.push(Projectile {
        entity: Entity::centered_at(muzzle, config.player_projectile_size()),
        velocity: Vector2::new(0.0, -config.player_projectile_speed),
        faction: Faction::Player,
    });
    player.last_shot_ms = Some(now_ms);
    log::trace!("player fired at {now_ms}ms");
    true
}

/// Health saturates at zero.
pub fn apply_damage(player: &mut Player, amount: u32) {
    player.health = player.health.saturating_sub(amount);
}

/// Per-tick housekeeping for the ship's own shots.
pub fn tick_player(player: &mut Player, screen_height: f32) {
    advance_projectiles(&mut player.projectiles, screen_height);
}

// ── Enemy units ───────────────────────────────────────────────────────────────

/// A unit at `(x, y)` whose shot timer starts at a random point inside one
/// cooldown window, so a fresh grid does not fire in lockstep.
pub fn new_enemy(
    x: f32,
    y: f32,
    config: &GameConfig,
    now_ms: u64,
    rng: &mut impl Rng,
) -> EnemyUnit {
    let offset = rng.gen_range(0..=config.enemy_shoot_delay_ms);
    EnemyUnit {
        entity: Entity::new(Vector2::new(x, y), config.enemy_size()),
        origin_x: x,
        direction: 1.0,
        speed: config.enemy_speed,
        move_range: config.enemy_move_range,
        shoot_delay_ms: config.enemy_shoot_delay_ms,
        last_shot_ms: now_ms as i64 - offset as i64,
    }
}

/// Step sideways; on reaching the range limit reverse and snap exactly onto
/// the limit so repeated reversals never drift.
pub fn advance_enemy(unit: &mut EnemyUnit) {
    unit.entity.position.x += unit.speed * unit.direction;
    if (unit.entity.position.x - unit.origin_x).abs() >= unit.move_range {
        unit.direction = -unit.direction;
        unit.entity.position.x = if unit.direction < 0.0 {
            unit.origin_x + unit.move_range
        } else {
            unit.origin_x - unit.move_range
        };
    }
}

/// Same contract as the player's trigger with the enemy cooldown.
pub fn enemy_try_fire(unit: &mut EnemyUnit, now_ms: u64) -> bool {
    let now = now_ms as i64;
    if now - unit.last_shot_ms > unit.shoot_delay_ms as i64 {
        unit.last_shot_ms = now;
        true
    } else {
        false
    }
}

/// A downward shot from the unit's bottom-centre.
pub fn enemy_projectile(unit: &EnemyUnit, config: &GameConfig) -> Projectile {
    let bounds = unit.entity.bounds();
    let muzzle = Vector2::new(bounds.center().x, bounds.bottom());
    Projectile {
        entity: Entity::centered_at(muzzle, config.enemy_projectile_size()),
        velocity: Vector2::new(0.0, config.enemy_projectile_speed),
        faction: Faction::Enemy,
    }
}

// ── Formation ─────────────────────────────────────────────────────────────────

/// Lay out the rows x cols grid, horizontally centred, top row at
/// `formation_top`. Units are stored row by row, left to right.
pub fn create_formation(config: &GameConfig, now_ms: u64, rng: &mut impl Rng) -> Formation {
    let start_x = ((config.screen_width - config.formation_width()) / 2.0).floor();
    let step_x = config.enemy_width + config.formation_spacing;
    let step_y = config.enemy_height + config.formation_spacing;

    let mut units = Vec::with_capacity(config.formation_rows * config.formation_cols);
    for row in 0..config.formation_rows {
        for col in 0..config.formation_cols {
            let x = start_x + col as f32 * step_x;
            let y = config.formation_top + row as f32 * step_y;
            units.push(new_enemy(x, y, config, now_ms, rng));
        }
    }
    Formation { units }
}

/// Move every unit, collect the shots of those whose timer expired, then move
/// all enemy shots and drop the ones below the playfield.
pub fn tick_formation(
    formation: &mut Formation,
    enemy_projectiles: &mut Vec<Projectile>,
    now_ms: u64,
    screen_height: f32,
    config: &GameConfig,
) {
    for unit in formation.units.iter_mut() {
        advance_enemy(unit);
    }
    for unit in formation.units.iter_mut() {
        if enemy_try_fire(unit, now_ms) {
            enemy_projectiles.push(enemy_projectile(unit, config));
            log::trace!("enemy fired at {now_ms}ms");
        }
    }
    advance_projectiles(enemy_projectiles, screen_height);
}

pub fn is_cleared(formation: &Formation) -> bool {
    formation.units.is_empty()
}

// ── Session ───────────────────────────────────────────────────────────────────

pub fn new_session(config: &GameConfig, now_ms: u64, rng: &mut impl Rng) -> GameSession {
    let session = GameSession {
        score: 0,
        player: new_player(config),
        formation: create_formation(config, now_ms, rng),
        enemy_projectiles: Vec::new(),
        screen_width: config.screen_width,
        screen_height: config.screen_height,
        tick: 0,
    };
    log::info!(
        "New session: {} enemies, player health {}",
        session.formation.units.len(),
        session.player.health
    );
    session
}

/// One Playing tick: input, player, formation, collisions.
///
/// Returns true when the session has ended (health depleted or formation
/// cleared). Health is checked first; which screen to show is decided later
/// from [`GameSession::outcome`].
pub fn tick_session(
    session: &mut GameSession,
    input: &InputSnapshot,
    now_ms: u64,
    config: &GameConfig,
) -> bool {
    session.tick += 1;

    if input.move_left {
        move_player_left(&mut session.player, session.screen_width);
    }
    if input.move_right {
        move_player_right(&mut session.player, session.screen_width);
    }
    if input.fire {
        player_try_fire(&mut session.player, now_ms, config);
    }

    tick_player(&mut session.player, session.screen_height);
    tick_formation(
        &mut session.formation,
        &mut session.enemy_projectiles,
        now_ms,
        session.screen_height,
        config,
    );

    let kills = resolve_player_hits(&mut session.player.projectiles, &mut session.formation.units);
    session.score += kills;
    let hits = resolve_enemy_hits(
        &mut session.enemy_projectiles,
        &mut session.player,
        config.hit_damage,
    );
    if kills > 0 || hits > 0 {
        log::debug!(
            "tick {}: {kills} kill(s), {hits} hit(s), score {}, health {}",
            session.tick,
            session.score,
            session.player.health
        );
    }

    if session.player.health == 0 {
        log::info!("Player destroyed on tick {}", session.tick);
        return true;
    }
    if is_cleared(&session.formation) {
        log::info!("Formation cleared on tick {}", session.tick);
        return true;
    }
    false
}
