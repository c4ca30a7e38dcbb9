/// The per-tick orchestrator.
///
/// `Simulation` owns every piece of mutable game state.  The host calls
/// `tick` on a fixed period and forwards input through the `on_*` hooks
/// strictly between ticks.  All randomness comes through the injected
/// `RandomSource`, so a scripted source makes whole games reproducible.
use crossterm::style::Color;
use log::{debug, info};

use crate::config::{SimConfig, PLAYER_BULLETS_MAX, TERMINAL_DELAY};
use crate::entities::{Bullet, Player, Steering};
use crate::error::Result;
use crate::fleet::Fleet;
use crate::rng::RandomSource;
use crate::surface::{Message, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    pub fn message(self) -> Message {
        let (text, accent) = match self {
            Outcome::Win => ("YOU WIN", Color::Green),
            Outcome::Lose => ("YOU LOSE", Color::Red),
        };
        Message {
            background: Color::Black,
            text: text.to_string(),
            accent,
            size: 70,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimConfig,
    pub player: Player,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub fleet: Fleet,
    score: u32,
    stopped: bool,
    /// Ticks spent in the win/lose sequence so far.
    animations_count: u32,
    outcome: Option<Outcome>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::build(SimConfig::default())
    }
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimConfig) -> Self {
        info!(
            "new game on a {}x{} field, complexity {}",
            config.width, config.height, config.complexity
        );
        Self {
            config,
            player: Player::new(config.width, config.height),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            fleet: Fleet::new(config.width),
            score: 0,
            stopped: false,
            animations_count: 0,
            outcome: None,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn current_score(&self) -> u32 {
        self.score
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Set once the engine has stopped.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    // ── Input hooks ──────────────────────────────────────────────────────────

    pub fn on_direction_change(&mut self, steering: Steering) {
        if self.stopped {
            return;
        }
        self.player.set_steering(steering);
    }

    /// Fires if the player can and no player bullet is already in flight.
    /// Extra presses are dropped, never queued.
    pub fn on_fire_requested(&mut self) {
        if self.stopped {
            return;
        }
        if self.player_bullets.len() >= PLAYER_BULLETS_MAX {
            debug!("fire dropped, player bullet already in flight");
            return;
        }
        if let Some(bullet) = self.player.fire() {
            self.player_bullets.push(bullet);
        }
    }

    /// Starts a fresh game.  Only honored once the engine has stopped.
    pub fn on_restart_requested(&mut self) {
        if !self.stopped {
            return;
        }
        info!("restarting after {:?} with score {}", self.outcome, self.score);
        *self = Self::build(self.config);
    }

    // ── Tick ─────────────────────────────────────────────────────────────────

    /// Advances the game one tick.  Returns the outcome on the tick the
    /// engine stops; the host should present `outcome.message()` then.
    /// Inert while stopped.
    pub fn tick<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<Outcome> {
        if self.stopped {
            return None;
        }

        self.animate();
        self.move_space_objects();
        self.check();

        if let Some(bullet) = self.fleet.fire(rng, self.config.fire_bound()) {
            self.enemy_bullets.push(bullet);
        }

        self.evaluate_end()
    }

    /// One animation frame per tick for everything on screen.
    fn animate(&mut self) {
        self.fleet.animate();
        self.player.animate();
    }

    fn move_space_objects(&mut self) {
        self.fleet.step();
        for bullet in self.enemy_bullets.iter_mut().chain(self.player_bullets.iter_mut()) {
            bullet.step();
        }
        self.player.step(self.config.width);
    }

    /// Collision resolution and pruning.
    fn check(&mut self) {
        if self.player.verify_hit(&mut self.enemy_bullets) {
            debug!("player shot down");
        }
        let hit = self.fleet.verify_hit(&mut self.player_bullets);
        self.fleet.delete_hidden_ships();
        self.remove_dead_bullets();
        self.score += hit;
    }

    fn remove_dead_bullets(&mut self) {
        let height = self.config.height;
        self.enemy_bullets
            .retain(|bullet| bullet.is_alive() && !bullet.is_off_field(height));
        self.player_bullets
            .retain(|bullet| bullet.is_alive() && !bullet.is_off_field(height));
    }

    fn evaluate_end(&mut self) -> Option<Outcome> {
        if self.player.is_alive() && self.fleet.bottom_border() >= self.player.body.y {
            debug!("fleet reached the player row");
            self.player.kill();
        }

        let mut ending = !self.player.is_alive();
        if self.fleet.is_empty() {
            self.player.win();
            ending = true;
        }

        if ending {
            self.stop_game_with_delay()
        } else {
            None
        }
    }

    fn stop_game_with_delay(&mut self) -> Option<Outcome> {
        self.animations_count += 1;
        if self.animations_count < TERMINAL_DELAY {
            return None;
        }
        let outcome = if self.player.is_alive() {
            Outcome::Win
        } else {
            Outcome::Lose
        };
        info!("game over: {:?}, score {}", outcome, self.score);
        self.stopped = true;
        self.outcome = Some(outcome);
        Some(outcome)
    }

    /// Countdown progress of the win/lose sequence.
    pub fn animations_count(&self) -> u32 {
        self.animations_count
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    /// Draws the fleet, both bullet collections and the player.  The field
    /// background is the host's business.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.fleet.draw(surface);
        for bullet in self.enemy_bullets.iter().chain(self.player_bullets.iter()) {
            bullet.draw(surface);
        }
        self.player.draw(surface);
    }
}
