/// The enemy formation: lockstep movement, random fire and hit checks.
use log::{debug, trace};

use crate::entities::{Bullet, Direction, Ship};
use crate::rng::RandomSource;
use crate::shapes;
use crate::surface::Surface;

// ── Formation layout ─────────────────────────────────────────────────────────

const ROWS_COUNT: u32 = 3;
const COLUMNS_COUNT: u32 = 10;
const TOP_OFFSET: u32 = 12;
const BOSS_Y: f64 = 5.0;

fn grid_step() -> u32 {
    shapes::height_of(shapes::ENEMY) + 1
}

/// Speed cap and the numerator of the depletion speed-up.
const MAX_SPEED: f64 = 2.0;
const SPEED_FACTOR: f64 = 3.0;

#[derive(Clone, Debug)]
pub struct Fleet {
    ships: Vec<Ship>,
    direction: Direction,
    field_width: u32,
}

impl Fleet {
    /// The opening formation: three rows of ten basic ships with the boss
    /// centered above them.
    pub fn new(field_width: u32) -> Self {
        let step = grid_step();
        let mut ships = Vec::with_capacity((ROWS_COUNT * COLUMNS_COUNT + 1) as usize);
        for row in 0..ROWS_COUNT {
            for col in 0..COLUMNS_COUNT {
                ships.push(Ship::basic(
                    (col * step) as f64,
                    (row * step + TOP_OFFSET) as f64,
                ));
            }
        }
        let boss_height = shapes::height_of(shapes::BOSS[0]) as i64;
        let boss_x = (step * COLUMNS_COUNT / 2) as i64 - boss_height / 2 - 1;
        ships.push(Ship::boss(boss_x as f64, BOSS_Y));
        Self::from_ships(ships, field_width)
    }

    /// A fleet made of the given ships, heading right.
    pub fn from_ships(ships: Vec<Ship>, field_width: u32) -> Self {
        Self {
            ships,
            direction: Direction::Right,
            field_width,
        }
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ships_mut(&mut self) -> &mut [Ship] {
        &mut self.ships
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Ships still in play.  Dying ships that are only finishing their
    /// explosion do not count.
    pub fn ships_count(&self) -> usize {
        self.alive().count()
    }

    pub fn is_empty(&self) -> bool {
        self.ships_count() == 0
    }

    fn alive(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().filter(|ship| ship.is_alive())
    }

    pub fn speed(&self) -> f64 {
        MAX_SPEED.min(SPEED_FACTOR / self.ships_count() as f64)
    }

    pub fn left_border(&self) -> Option<f64> {
        self.alive().map(|ship| ship.body.x).reduce(f64::min)
    }

    pub fn right_border(&self) -> Option<f64> {
        self.alive().map(|ship| ship.body.right()).reduce(f64::max)
    }

    /// Lowest edge of the live formation, or `0.0` when nothing is left.
    pub fn bottom_border(&self) -> f64 {
        self.alive()
            .map(|ship| ship.body.bottom())
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    /// One formation step.  Returns `true` on a bounce tick, when the
    /// formation reversed at a wall and stepped down instead of sideways.
    pub fn step(&mut self) -> bool {
        let (Some(left), Some(right)) = (self.left_border(), self.right_border()) else {
            return false;
        };

        let mut bounce = false;
        if self.direction == Direction::Left && left < 0.0 {
            self.direction = Direction::Right;
            bounce = true;
        } else if self.direction == Direction::Right && right > self.field_width as f64 {
            self.direction = Direction::Left;
            bounce = true;
        }

        let speed = self.speed();
        let heading = if bounce { Direction::Down } else { self.direction };
        if bounce {
            debug!("fleet bounced, now heading {:?}", self.direction);
        }
        for ship in &mut self.ships {
            ship.step(heading, speed);
        }
        bounce
    }

    /// At most one enemy shot per tick.  A draw of `0` out of
    /// `[0, fire_bound)` triggers it, then a live ship is picked uniformly.
    pub fn fire<R: RandomSource + ?Sized>(&self, rng: &mut R, fire_bound: u32) -> Option<Bullet> {
        let count = self.ships_count();
        if count == 0 {
            return None;
        }
        if rng.random_int(fire_bound) > 0 {
            return None;
        }
        let pick = rng.random_int(count as u32) as usize;
        let shooter = self.alive().nth(pick)?;
        trace!("enemy {:?} fires from ({}, {})", shooter.kind, shooter.body.x, shooter.body.y);
        shooter.fire()
    }

    /// Resolves player bullets against the formation.  Each live bullet
    /// kills at most the first live ship it overlaps, in fleet order.
    /// Returns the score earned.
    pub fn verify_hit(&mut self, bullets: &mut [Bullet]) -> u32 {
        let mut sum = 0;
        for bullet in bullets.iter_mut() {
            for ship in &mut self.ships {
                if ship.is_alive() && bullet.is_alive() && ship.body.overlaps(&bullet.body) {
                    ship.kill();
                    bullet.kill();
                    sum += ship.score();
                    debug!("{:?} destroyed for {} points", ship.kind, ship.score());
                }
            }
        }
        sum
    }

    /// Drops ships whose death animation has finished.
    pub fn delete_hidden_ships(&mut self) {
        self.ships.retain(Ship::is_visible);
    }

    pub fn animate(&mut self) {
        for ship in &mut self.ships {
            ship.animate();
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for ship in &self.ships {
            ship.draw(surface);
        }
    }
}
