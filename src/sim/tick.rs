//! Fixed timestep simulation tick
//!
//! Order within a tick is fixed: inputs, field recompute, friendly units,
//! enemy units, projectiles, pruning. The field is rebuilt before any unit
//! samples it, so "recompute grid, then read grid" is one atomic phase.

use glam::Vec2;
use log::{debug, warn};

use crate::config::UnitTuning;
use crate::sim::obstacle::{self, Obstacle};
use crate::sim::projectile::Projectile;
use crate::sim::state::{SkirmishEvent, SkirmishState};
use crate::sim::unit::{Behavior, Team, Unit, decide, lowest_influence_direction};
use crate::{wrap_position, wrapped_delta, wrapped_distance};

/// A player command directing a friendly unit
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOrder {
    pub unit_id: u32,
    pub target: Vec2,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Spawn a friendly unit at this position
    pub spawn_friendly: Option<Vec2>,
    /// Spawn an enemy unit at this position
    pub spawn_enemy: Option<Vec2>,
    /// Direct a friendly unit to a new target position
    pub move_order: Option<MoveOrder>,
    /// Skip simulation this tick
    pub paused: bool,
}

/// Advance the skirmish by one fixed timestep
pub fn tick(state: &mut SkirmishState, input: &TickInput, dt: f32) {
    if input.paused {
        return;
    }

    if let Some(pos) = input.spawn_friendly {
        state.spawn_unit(Team::Friendly, pos);
    }
    if let Some(pos) = input.spawn_enemy {
        state.spawn_unit(Team::Enemy, pos);
    }
    if let Some(order) = &input.move_order {
        apply_move_order(state, order);
    }

    let width = state.config.field.width;
    let height = state.config.field.height;
    let tuning = state.config.units.clone();

    // Phase 1: recompute the field from the live unit snapshot
    state.field.update(&state.units);

    // Phase 2: unit AI. Positions are snapshotted so nearest-target queries
    // see the start-of-phase world while each unit mutates itself.
    let snapshot: Vec<(u32, Team, Vec2, bool)> = state
        .units
        .iter()
        .map(|u| (u.id, u.team, u.pos, u.alive))
        .collect();

    let mut shots: Vec<(u32, Team, Vec2, Vec2)> = Vec::new();

    for i in 0..state.units.len() {
        if !state.units[i].alive {
            continue;
        }
        state.units[i].cooldown = (state.units[i].cooldown - dt).max(0.0);

        match state.units[i].team {
            Team::Friendly => {
                move_toward(&mut state.units[i], &tuning, &state.obstacles, width, height, dt);
                let unit = &state.units[i];
                if unit.cooldown == 0.0 {
                    if let Some((_, target_pos, dist)) =
                        nearest_opponent(&snapshot, unit.team, unit.pos, width, height)
                    {
                        if dist < tuning.attack_range {
                            shots.push((unit.id, unit.team, unit.pos, target_pos));
                            state.units[i].cooldown = tuning.cooldown(Team::Friendly);
                        }
                    }
                }
            }
            Team::Enemy => {
                let sample = state.field.sample(state.units[i].pos);
                let current = state.units[i].behavior;
                let next = decide(current, sample, state.units[i].health, &tuning);
                if next != current {
                    debug!(
                        "unit {} behavior {:?} -> {:?} (sample {:.2})",
                        state.units[i].id, current, next, sample
                    );
                }
                state.units[i].behavior = next;

                match next {
                    Behavior::Idle => {}
                    Behavior::Attack => {
                        match nearest_opponent(
                            &snapshot,
                            Team::Enemy,
                            state.units[i].pos,
                            width,
                            height,
                        ) {
                            Some((_, target_pos, dist)) => {
                                state.units[i].target = target_pos;
                                if dist < tuning.attack_range && state.units[i].cooldown == 0.0 {
                                    let unit = &state.units[i];
                                    shots.push((unit.id, unit.team, unit.pos, target_pos));
                                    state.units[i].cooldown = tuning.cooldown(Team::Enemy);
                                }
                                move_toward(
                                    &mut state.units[i],
                                    &tuning,
                                    &state.obstacles,
                                    width,
                                    height,
                                    dt,
                                );
                            }
                            None => state.units[i].behavior = Behavior::Idle,
                        }
                    }
                    Behavior::Evade => {
                        let pos = state.units[i].pos;
                        let dir = lowest_influence_direction(
                            &state.field,
                            pos,
                            tuning.evade_probe_distance,
                            width,
                            height,
                        );
                        state.units[i].target =
                            wrap_position(pos + dir * tuning.evade_step, width, height);
                        move_toward(&mut state.units[i], &tuning, &state.obstacles, width, height, dt);
                    }
                    Behavior::Retreat => {
                        retreat(&mut state.units[i], &tuning, &state.obstacles, width, height, dt);
                    }
                }
            }
        }
    }

    for (shooter, team, from, toward) in shots {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile::fire(
            id,
            team,
            from,
            toward,
            tuning.projectile_speed,
            tuning.damage(team),
            tuning.projectile_max_distance,
            width,
            height,
        ));
        state
            .events
            .push(SkirmishEvent::ProjectileFired { shooter, team });
    }

    // Phase 3: projectiles fly, then hit the first opposing unit they touch
    for projectile in state.projectiles.iter_mut() {
        if !projectile.alive {
            continue;
        }
        projectile.advance(dt, width, height);
        if !projectile.alive {
            continue;
        }
        for unit in state.units.iter_mut() {
            if unit.alive
                && unit.team.opposes(projectile.team)
                && unit.contains_point(projectile.pos, tuning.hit_radius, width, height)
            {
                unit.take_damage(projectile.damage);
                if !unit.alive {
                    debug!("unit {} killed", unit.id);
                    state.events.push(SkirmishEvent::UnitKilled {
                        id: unit.id,
                        team: unit.team,
                    });
                }
                projectile.alive = false;
                break;
            }
        }
    }

    // Phase 4: prune the dead
    state.units.retain(|u| u.alive);
    state.projectiles.retain(|p| p.alive);

    state.time_ticks += 1;
}

fn apply_move_order(state: &mut SkirmishState, order: &MoveOrder) {
    let width = state.config.field.width;
    let height = state.config.field.height;
    match state.unit_mut(order.unit_id) {
        Some(unit) if unit.alive && unit.team == Team::Friendly => {
            unit.target = wrap_position(order.target, width, height);
        }
        Some(_) => warn!("move order for non-friendly unit {}", order.unit_id),
        None => warn!("move order for unknown unit {}", order.unit_id),
    }
}

/// Nearest live opposing unit as `(id, position, wrapped distance)`
fn nearest_opponent(
    snapshot: &[(u32, Team, Vec2, bool)],
    team: Team,
    pos: Vec2,
    width: f32,
    height: f32,
) -> Option<(u32, Vec2, f32)> {
    let mut best: Option<(u32, Vec2, f32)> = None;
    for &(id, other_team, other_pos, alive) in snapshot {
        if !alive || !team.opposes(other_team) {
            continue;
        }
        let dist = wrapped_distance(pos, other_pos, width, height);
        if best.map(|(_, _, d)| dist < d).unwrap_or(true) {
            best = Some((id, other_pos, dist));
        }
    }
    best
}

/// Step toward the unit's target, wrapped, unless an obstacle blocks the way
fn move_toward(
    unit: &mut Unit,
    tuning: &UnitTuning,
    obstacles: &[Obstacle],
    width: f32,
    height: f32,
    dt: f32,
) {
    let delta = wrapped_delta(unit.pos, unit.target, width, height);
    let distance = delta.length();
    if distance <= 1.0 {
        return;
    }
    let speed = tuning.speed(unit.team);
    let candidate = wrap_position(unit.pos + delta / distance * speed * dt, width, height);
    if !obstacle::blocked(obstacles, candidate, tuning.hit_radius) {
        unit.pos = candidate;
    }
}

/// Step directly away from the current target
fn retreat(
    unit: &mut Unit,
    tuning: &UnitTuning,
    obstacles: &[Obstacle],
    width: f32,
    height: f32,
    dt: f32,
) {
    let away = -wrapped_delta(unit.pos, unit.target, width, height);
    let distance = away.length();
    if distance <= 1.0 {
        return;
    }
    let speed = tuning.speed(unit.team);
    let candidate = wrap_position(unit.pos + away / distance * speed * dt, width, height);
    if !obstacle::blocked(obstacles, candidate, tuning.hit_radius) {
        unit.pos = candidate;
    }
}
