/// Game entities: bodies, animations, bullets and ships.
///
/// Entities only know how to move, fire, die and draw themselves.  Who
/// collides with whom and what happens afterwards is decided by `Fleet`
/// and `Simulation`.
use crate::shapes::{self, Shape};
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Player steering as requested by the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Steering {
    Left,
    Right,
    Neutral,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

// ── Body (position + AABB) ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    pub width: u32,
    pub height: u32,
}

impl Body {
    pub fn new(x: f64, y: f64, shape: Shape) -> Self {
        Self {
            x,
            y,
            width: shapes::width_of(shape),
            height: shapes::height_of(shape),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width as f64
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height as f64
    }

    /// Axis-aligned box overlap.  Touching edges do not count.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn step(&mut self, direction: Direction, speed: f64) {
        match direction {
            Direction::Left => self.x -= speed,
            Direction::Right => self.x += speed,
            Direction::Up => self.y -= speed,
            Direction::Down => self.y += speed,
        }
    }
}

fn draw_shape<S: Surface + ?Sized>(surface: &mut S, body: &Body, shape: Shape) {
    let (left, top) = (body.x as i32, body.y as i32);
    for (row, line) in shape.iter().enumerate() {
        for (col, &index) in line.iter().enumerate() {
            if let Some(color) = shapes::color_of(index) {
                surface.set_cell(left + col as i32, top + row as i32, color, ' ');
            }
        }
    }
}

// ── Animation ────────────────────────────────────────────────────────────────

/// A frame list played one frame per tick.
///
/// A non-looping animation runs its index one past the last frame and then
/// reports `finished`; the last frame stays on screen meanwhile.
#[derive(Clone, Debug)]
pub struct Animation {
    frames: Vec<Shape>,
    index: usize,
    looping: bool,
}

impl Animation {
    pub fn still(shape: Shape) -> Self {
        Self {
            frames: vec![shape],
            index: 0,
            looping: false,
        }
    }

    pub fn looping(frames: &[Shape]) -> Self {
        Self {
            frames: frames.to_vec(),
            index: 0,
            looping: true,
        }
    }

    pub fn once(frames: &[Shape]) -> Self {
        Self {
            frames: frames.to_vec(),
            index: 0,
            looping: false,
        }
    }

    pub fn shape(&self) -> Shape {
        self.frames[self.index.min(self.frames.len() - 1)]
    }

    pub fn frame_index(&self) -> usize {
        self.index
    }

    pub fn advance(&mut self) {
        if self.looping {
            self.index = (self.index + 1) % self.frames.len();
        } else if self.index < self.frames.len() {
            self.index += 1;
        }
    }

    pub fn finished(&self) -> bool {
        !self.looping && self.index >= self.frames.len()
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub body: Body,
    pub side: Side,
    alive: bool,
}

impl Bullet {
    pub fn new(x: f64, y: f64, side: Side) -> Self {
        Self {
            body: Body::new(x, y, Self::shape_for(side)),
            side,
            alive: true,
        }
    }

    fn shape_for(side: Side) -> Shape {
        match side {
            Side::Player => shapes::PLAYER_BULLET,
            Side::Enemy => shapes::ENEMY_BULLET,
        }
    }

    /// One unit per tick: player bullets climb, enemy bullets fall.
    pub fn step(&mut self) {
        let direction = match self.side {
            Side::Player => Direction::Up,
            Side::Enemy => Direction::Down,
        };
        self.body.step(direction, 1.0);
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// True once the bullet has left the field through the edge it travels
    /// towards.
    pub fn is_off_field(&self, field_height: u32) -> bool {
        match self.side {
            Side::Player => self.body.bottom() < 0.0,
            Side::Enemy => self.body.y >= field_height as f64 - 1.0,
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        draw_shape(surface, &self.body, Self::shape_for(self.side));
    }
}

// ── Enemy ships ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShipKind {
    Basic,
    Boss,
}

impl ShipKind {
    pub fn score(self) -> u32 {
        match self {
            ShipKind::Basic => 15,
            ShipKind::Boss => 100,
        }
    }

    fn idle(self) -> Animation {
        match self {
            ShipKind::Basic => Animation::still(shapes::ENEMY),
            ShipKind::Boss => Animation::looping(shapes::BOSS),
        }
    }

    fn death(self) -> Animation {
        match self {
            ShipKind::Basic => Animation::once(shapes::KILL_ENEMY),
            ShipKind::Boss => Animation::once(shapes::KILL_BOSS),
        }
    }
}

/// Boss idle frames change only every this many ticks.
const BOSS_IDLE_PERIOD: u64 = 10;

#[derive(Clone, Debug)]
pub struct Ship {
    pub body: Body,
    pub kind: ShipKind,
    alive: bool,
    animation: Animation,
    ticks: u64,
}

impl Ship {
    pub fn new(kind: ShipKind, x: f64, y: f64) -> Self {
        let animation = kind.idle();
        Self {
            body: Body::new(x, y, animation.shape()),
            kind,
            alive: true,
            animation,
            ticks: 0,
        }
    }

    pub fn basic(x: f64, y: f64) -> Self {
        Self::new(ShipKind::Basic, x, y)
    }

    pub fn boss(x: f64, y: f64) -> Self {
        Self::new(ShipKind::Boss, x, y)
    }

    pub fn score(&self) -> u32 {
        self.kind.score()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// A dead ship stays visible until its death animation has played out.
    pub fn is_visible(&self) -> bool {
        self.alive || !self.animation.finished()
    }

    pub fn shape(&self) -> Shape {
        self.animation.shape()
    }

    /// Returns `false` if the ship was already dead.
    pub fn kill(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        self.animation = self.kind.death();
        true
    }

    pub fn step(&mut self, direction: Direction, speed: f64) {
        self.body.step(direction, speed);
    }

    pub fn fire(&self) -> Option<Bullet> {
        if !self.alive {
            return None;
        }
        let muzzle = match self.kind {
            ShipKind::Basic => 1.0,
            ShipKind::Boss if self.animation.frame_index() == 0 => 6.0,
            ShipKind::Boss => 0.0,
        };
        Some(Bullet::new(
            self.body.x + muzzle,
            self.body.bottom(),
            Side::Enemy,
        ))
    }

    pub fn animate(&mut self) {
        self.ticks += 1;
        let idling_boss = self.kind == ShipKind::Boss && self.alive;
        if !idling_boss || self.ticks % BOSS_IDLE_PERIOD == 0 {
            self.animation.advance();
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        draw_shape(surface, &self.body, self.animation.shape());
    }
}

// ── Player ship ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
    steering: Steering,
    alive: bool,
    won: bool,
    animation: Animation,
}

impl Player {
    /// Centered on the bottom row of the field, one row above the edge.
    pub fn new(field_width: u32, field_height: u32) -> Self {
        let x = (field_width / 2) as f64;
        let y = (field_height - shapes::height_of(shapes::PLAYER) - 1) as f64;
        Self {
            body: Body::new(x, y, shapes::PLAYER),
            steering: Steering::Neutral,
            alive: true,
            won: false,
            animation: Animation::still(shapes::PLAYER),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn has_won(&self) -> bool {
        self.won
    }

    pub fn steering(&self) -> Steering {
        self.steering
    }

    pub fn set_steering(&mut self, steering: Steering) {
        self.steering = steering;
    }

    pub fn shape(&self) -> Shape {
        self.animation.shape()
    }

    /// Moves one unit towards the current steering, kept inside the field.
    pub fn step(&mut self, field_width: u32) {
        if !self.alive {
            return;
        }
        match self.steering {
            Steering::Left => self.body.step(Direction::Left, 1.0),
            Steering::Right => self.body.step(Direction::Right, 1.0),
            Steering::Neutral => {}
        }
        let max_x = field_width as f64 - self.body.width as f64;
        self.body.x = self.body.x.clamp(0.0, max_x);
    }

    pub fn fire(&self) -> Option<Bullet> {
        if !self.alive {
            return None;
        }
        let bullet_height = shapes::height_of(shapes::PLAYER_BULLET) as f64;
        Some(Bullet::new(
            self.body.x + 2.0,
            self.body.y - bullet_height,
            Side::Player,
        ))
    }

    /// Starts the sinking animation.  Returns `false` if already dead.
    pub fn kill(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        self.animation = Animation::once(shapes::DEAD_PLAYER);
        true
    }

    pub fn win(&mut self) {
        if self.alive && !self.won {
            self.won = true;
            self.animation = Animation::still(shapes::WIN_PLAYER);
        }
    }

    /// Lets the first live overlapping enemy bullet kill the player.
    /// Returns whether the player died.
    pub fn verify_hit(&mut self, bullets: &mut [Bullet]) -> bool {
        for bullet in bullets.iter_mut() {
            if self.alive && bullet.is_alive() && self.body.overlaps(&bullet.body) {
                self.kill();
                bullet.kill();
                return true;
            }
        }
        false
    }

    pub fn animate(&mut self) {
        self.animation.advance();
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        draw_shape(surface, &self.body, self.animation.shape());
    }
}
