/// Sprite matrices.
///
/// Every sprite is a grid of palette indices; `0` is transparent.  An
/// entity's width and height are taken straight from its matrix, so the
/// collision box always matches what is drawn.
use crossterm::style::Color;

pub type Shape = &'static [&'static [u8]];

// ── Palette ──────────────────────────────────────────────────────────────────

pub const fn color_of(index: u8) -> Option<Color> {
    match index {
        1 => Some(Color::White),
        2 => Some(Color::Red),
        3 => Some(Color::Green),
        4 => Some(Color::Cyan),
        5 => Some(Color::Yellow),
        6 => Some(Color::Magenta),
        7 => Some(Color::DarkYellow),
        8 => Some(Color::DarkGrey),
        _ => None,
    }
}

pub fn width_of(shape: Shape) -> u32 {
    shape.first().map_or(0, |row| row.len() as u32)
}

pub fn height_of(shape: Shape) -> u32 {
    shape.len() as u32
}

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER: Shape = &[
    &[0, 0, 4, 0, 0],
    &[0, 4, 4, 4, 0],
    &[4, 4, 1, 4, 4],
];

pub const WIN_PLAYER: Shape = &[
    &[5, 0, 5, 0, 5],
    &[0, 5, 5, 5, 0],
    &[5, 5, 1, 5, 5],
];

/// The player ship sinking: it tilts, breaks up, then leaves wreckage.
pub const DEAD_PLAYER: &[Shape] = &[
    &[
        &[0, 0, 7, 0, 0],
        &[0, 4, 2, 4, 0],
        &[4, 2, 7, 2, 4],
    ],
    &[
        &[0, 0, 0, 0, 0],
        &[2, 0, 7, 0, 2],
        &[0, 7, 2, 7, 0],
    ],
    &[
        &[0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0],
        &[8, 0, 8, 8, 0],
    ],
];

// ── Enemies ──────────────────────────────────────────────────────────────────

pub const ENEMY: Shape = &[
    &[0, 3, 0],
    &[3, 3, 3],
    &[3, 0, 3],
];

pub const KILL_ENEMY: &[Shape] = &[
    &[
        &[0, 7, 0],
        &[7, 2, 7],
        &[7, 0, 7],
    ],
    &[
        &[2, 0, 2],
        &[0, 7, 0],
        &[2, 0, 2],
    ],
    &[
        &[8, 0, 0],
        &[0, 0, 8],
        &[0, 8, 0],
    ],
];

/// Boss idle loop.  The first frame fires from its right gun, the second
/// from its left.
pub const BOSS: &[Shape] = &[
    &[
        &[0, 0, 6, 6, 6, 6, 0, 0],
        &[0, 6, 6, 1, 1, 6, 6, 0],
        &[6, 6, 6, 6, 6, 6, 6, 6],
        &[0, 0, 0, 0, 0, 0, 6, 0],
    ],
    &[
        &[0, 0, 6, 6, 6, 6, 0, 0],
        &[0, 6, 1, 6, 6, 1, 6, 0],
        &[6, 6, 6, 6, 6, 6, 6, 6],
        &[6, 0, 0, 0, 0, 0, 0, 0],
    ],
];

pub const KILL_BOSS: &[Shape] = &[
    &[
        &[0, 0, 7, 6, 6, 7, 0, 0],
        &[0, 6, 2, 7, 7, 2, 6, 0],
        &[7, 6, 6, 2, 2, 6, 6, 7],
        &[0, 0, 0, 0, 0, 0, 0, 0],
    ],
    &[
        &[0, 2, 0, 7, 7, 0, 2, 0],
        &[7, 0, 2, 0, 0, 2, 0, 7],
        &[0, 7, 0, 2, 2, 0, 7, 0],
        &[2, 0, 0, 0, 0, 0, 0, 2],
    ],
    &[
        &[8, 0, 0, 0, 0, 0, 0, 8],
        &[0, 0, 8, 0, 0, 8, 0, 0],
        &[0, 8, 0, 0, 0, 0, 8, 0],
        &[0, 0, 0, 8, 8, 0, 0, 0],
    ],
];

// ── Projectiles ──────────────────────────────────────────────────────────────

pub const PLAYER_BULLET: Shape = &[&[4], &[4]];
pub const ENEMY_BULLET: Shape = &[&[2], &[2]];
