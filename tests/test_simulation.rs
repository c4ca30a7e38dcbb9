mod common;

use common::Scripted;
use crossterm::style::Color;
use space_invaders::config::{SimConfig, TERMINAL_DELAY};
use space_invaders::entities::*;
use space_invaders::fleet::Fleet;
use space_invaders::rng::RngSource;
use space_invaders::surface::CellGrid;
use space_invaders::{Outcome, Simulation};
use test_log::test;

fn with_fleet(ships: Vec<Ship>) -> Simulation {
    let mut sim = Simulation::default();
    sim.fleet = Fleet::from_ships(ships, 64);
    sim
}

/// A lone boss about to be shot: after this tick's moves the boss sits at
/// x 32..40, y 20..24 and the bullet at x 33, y 21..23.
fn boss_under_fire() -> Simulation {
    let mut sim = with_fleet(vec![Ship::boss(30.0, 20.0)]);
    sim.player_bullets.push(Bullet::new(33.0, 22.0, Side::Player));
    sim
}

fn run_to_stop(sim: &mut Simulation, rng: &mut Scripted) -> Option<Outcome> {
    for _ in 0..100 {
        if let Some(outcome) = sim.tick(rng) {
            return Some(outcome);
        }
    }
    None
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn fresh_game() {
    let sim = Simulation::default();
    assert_eq!(sim.current_score(), 0);
    assert_eq!(sim.fleet.ships_count(), 31);
    assert!(sim.player.is_alive());
    assert!(sim.player_bullets.is_empty());
    assert!(sim.enemy_bullets.is_empty());
    assert!(!sim.is_stopped());
    assert_eq!(sim.outcome(), None);
    assert_eq!(sim.config(), &SimConfig::default());
}

// ── Player input ──────────────────────────────────────────────────────────────

#[test]
fn only_one_player_bullet_in_flight() {
    let mut sim = Simulation::default();
    for _ in 0..5 {
        sim.on_fire_requested();
    }
    assert_eq!(sim.player_bullets.len(), 1);

    let mut rng = Scripted::never_fires();
    for _ in 0..200 {
        sim.on_fire_requested();
        sim.on_fire_requested();
        sim.tick(&mut rng);
        assert!(sim.player_bullets.len() <= 1);
    }
}

#[test]
fn player_can_fire_again_once_bullet_is_gone() {
    let mut sim = with_fleet(vec![Ship::basic(0.0, 0.0)]);
    let mut rng = Scripted::never_fires();
    sim.on_fire_requested();
    // 2-row bullet from y 58 needs 61 ticks to clear the top edge
    for _ in 0..61 {
        sim.tick(&mut rng);
    }
    assert!(sim.player_bullets.is_empty());
    sim.on_fire_requested();
    assert_eq!(sim.player_bullets.len(), 1);
}

#[test]
fn steering_moves_the_player() {
    let mut sim = Simulation::default();
    let mut rng = Scripted::never_fires();
    sim.on_direction_change(Steering::Right);
    sim.tick(&mut rng);
    assert_eq!(sim.player.body.x, 33.0);

    sim.on_direction_change(Steering::Neutral);
    sim.tick(&mut rng);
    assert_eq!(sim.player.body.x, 33.0);

    sim.on_direction_change(Steering::Left);
    sim.tick(&mut rng);
    sim.tick(&mut rng);
    assert_eq!(sim.player.body.x, 31.0);
}

// ── Tick pipeline ─────────────────────────────────────────────────────────────

#[test]
fn enemy_fire_draw_uses_complexity() {
    let mut sim = Simulation::default();
    let mut rng = Scripted::never_fires();
    sim.tick(&mut rng);
    assert_eq!(rng.bounds, vec![20]);
    assert!(sim.enemy_bullets.is_empty());
}

#[test]
fn zero_draw_adds_an_enemy_bullet() {
    let mut sim = Simulation::default();
    let mut rng = Scripted::new(&[0, 0]);
    sim.tick(&mut rng);
    assert_eq!(rng.bounds, vec![20, 31]);
    assert_eq!(sim.enemy_bullets.len(), 1);
    assert_eq!(sim.enemy_bullets[0].side, Side::Enemy);
}

#[test]
fn bullets_leave_the_field() {
    let mut sim = Simulation::default();
    sim.enemy_bullets.push(Bullet::new(0.0, 62.0, Side::Enemy));
    sim.player_bullets.push(Bullet::new(63.0, -2.0, Side::Player));
    sim.tick(&mut Scripted::never_fires());
    assert!(sim.enemy_bullets.is_empty());
    assert!(sim.player_bullets.is_empty());
}

#[test]
fn shot_ship_lingers_until_its_explosion_ends() {
    let mut sim = with_fleet(vec![Ship::basic(0.0, 0.0), Ship::boss(30.0, 20.0)]);
    sim.player_bullets.push(Bullet::new(33.0, 22.0, Side::Player));
    let mut rng = Scripted::never_fires();

    sim.tick(&mut rng);
    assert_eq!(sim.current_score(), 100);
    assert_eq!(sim.fleet.ships().len(), 2);
    assert_eq!(sim.fleet.ships_count(), 1);

    for _ in 0..3 {
        sim.tick(&mut rng);
    }
    assert_eq!(sim.fleet.ships().len(), 1);
}

// ── Win / lose ────────────────────────────────────────────────────────────────

#[test]
fn destroying_the_last_ship_wins() {
    let mut sim = boss_under_fire();
    let mut rng = Scripted::never_fires();

    assert_eq!(sim.tick(&mut rng), None);
    assert_eq!(sim.current_score(), 100);
    assert_eq!(sim.fleet.ships_count(), 0);
    assert!(sim.player_bullets.is_empty());
    assert!(sim.player.has_won());
    assert_eq!(sim.animations_count(), 1);

    for _ in 1..TERMINAL_DELAY - 1 {
        assert_eq!(sim.tick(&mut rng), None);
        assert!(!sim.is_stopped());
    }
    assert_eq!(sim.tick(&mut rng), Some(Outcome::Win));
    assert!(sim.is_stopped());
    assert_eq!(sim.outcome(), Some(Outcome::Win));
    assert_eq!(sim.current_score(), 100);
}

#[test]
fn fleet_reaching_player_row_kills_player() {
    // bounces off the right wall and steps down so its bottom lands on row 60
    let mut sim = with_fleet(vec![Ship::basic(62.0, 55.0)]);
    assert!(sim.fleet.bottom_border() < sim.player.body.y);
    let mut rng = Scripted::never_fires();

    assert_eq!(sim.tick(&mut rng), None);
    assert_eq!(sim.fleet.bottom_border(), 60.0);
    assert!(sim.enemy_bullets.is_empty());
    assert!(!sim.player.is_alive());
    assert_eq!(sim.animations_count(), 1);

    assert_eq!(run_to_stop(&mut sim, &mut rng), Some(Outcome::Lose));
    assert_eq!(sim.animations_count(), TERMINAL_DELAY);
}

#[test]
fn enemy_bullet_kills_player() {
    let mut sim = Simulation::default();
    sim.enemy_bullets.push(Bullet::new(33.0, 58.0, Side::Enemy));
    let mut rng = Scripted::never_fires();

    sim.tick(&mut rng);
    assert!(!sim.player.is_alive());
    assert!(sim.enemy_bullets.is_empty());

    assert_eq!(run_to_stop(&mut sim, &mut rng), Some(Outcome::Lose));
}

#[test]
fn lose_countdown_is_not_reset_by_later_ticks() {
    let mut sim = Simulation::default();
    sim.player.kill();
    let mut rng = Scripted::never_fires();
    for expected in 1..TERMINAL_DELAY {
        sim.tick(&mut rng);
        assert_eq!(sim.animations_count(), expected);
    }
    assert_eq!(sim.tick(&mut rng), Some(Outcome::Lose));
}

#[test]
fn outcome_messages() {
    let win = Outcome::Win.message();
    assert_eq!(win.text, "YOU WIN");
    assert_eq!(win.background, Color::Black);
    assert_eq!(win.accent, Color::Green);
    assert_eq!(win.size, 70);

    let lose = Outcome::Lose.message();
    assert_eq!(lose.text, "YOU LOSE");
    assert_eq!(lose.accent, Color::Red);
}

// ── Stopped state & restart ───────────────────────────────────────────────────

#[test]
fn stopped_engine_ignores_ticks_and_play_input() {
    let mut sim = boss_under_fire();
    let mut rng = Scripted::never_fires();
    assert_eq!(run_to_stop(&mut sim, &mut rng), Some(Outcome::Win));

    let x = sim.player.body.x;
    sim.on_direction_change(Steering::Left);
    sim.on_fire_requested();
    assert_eq!(sim.tick(&mut rng), None);
    assert_eq!(sim.player.body.x, x);
    assert!(sim.player_bullets.is_empty());
    assert_eq!(sim.player.steering(), Steering::Neutral);
}

#[test]
fn restart_is_ignored_while_running() {
    let mut sim = Simulation::default();
    sim.on_fire_requested();
    sim.on_restart_requested();
    assert_eq!(sim.player_bullets.len(), 1);
}

#[test]
fn restart_rebuilds_everything() {
    let mut sim = boss_under_fire();
    sim.enemy_bullets.push(Bullet::new(0.0, 30.0, Side::Enemy));
    let mut rng = Scripted::never_fires();
    assert_eq!(run_to_stop(&mut sim, &mut rng), Some(Outcome::Win));

    sim.on_restart_requested();
    let fresh = Simulation::default();
    assert!(!sim.is_stopped());
    assert_eq!(sim.outcome(), None);
    assert_eq!(sim.current_score(), 0);
    assert_eq!(sim.animations_count(), 0);
    assert!(sim.player_bullets.is_empty());
    assert!(sim.enemy_bullets.is_empty());
    assert!(sim.player.is_alive());
    assert!(!sim.player.has_won());
    assert_eq!(sim.fleet.ships().len(), 31);
    for (ship, expected) in sim.fleet.ships().iter().zip(fresh.fleet.ships()) {
        assert_eq!(ship.body, expected.body);
        assert_eq!(ship.kind, expected.kind);
    }
    assert_eq!(sim.tick(&mut rng), None);
}

// ── Drawing ───────────────────────────────────────────────────────────────────

#[test]
fn draws_player_and_fleet() {
    let sim = Simulation::default();
    let mut grid = CellGrid::new(64, 64);
    sim.draw(&mut grid);
    // player nose at (x + 2, y)
    assert_eq!(grid.get(34, 60).unwrap().color, Color::Cyan);
    // top-left basic ship's center column
    assert_eq!(grid.get(1, 12).unwrap().color, Color::Green);
    // transparent sprite cells leave the background alone
    assert_eq!(grid.get(0, 12).unwrap().color, Color::Black);
}

#[test]
fn off_field_entities_are_clipped() {
    let mut sim = with_fleet(vec![Ship::boss(-5.0, -2.0), Ship::basic(62.0, 62.0)]);
    sim.enemy_bullets.push(Bullet::new(70.0, 70.0, Side::Enemy));
    let mut grid = CellGrid::new(64, 64);
    sim.draw(&mut grid);
    // boss row 2 is solid, so x 0..3 on row 0 are painted
    assert_eq!(grid.get(0, 0).unwrap().color, Color::Magenta);
}

// ── Seeded soak ───────────────────────────────────────────────────────────────

#[test]
fn seeded_game_keeps_invariants() {
    let mut sim = Simulation::default();
    let mut rng = RngSource::seeded(7);
    let mut last_score = 0;
    for tick in 0..3000 {
        if sim.is_stopped() {
            break;
        }
        sim.on_direction_change(if (tick / 40) % 2 == 0 {
            Steering::Left
        } else {
            Steering::Right
        });
        sim.on_fire_requested();
        sim.tick(&mut rng);

        assert!(sim.player_bullets.len() <= 1);
        assert!(sim.current_score() >= last_score);
        assert!((sim.current_score() - last_score) % 5 == 0);
        let speed = sim.fleet.speed();
        assert!(speed > 0.0 && speed <= 2.0);
        last_score = sim.current_score();
    }
}
