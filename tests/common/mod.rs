#![allow(dead_code)]

use std::collections::VecDeque;

use space_invaders::rng::RandomSource;

/// Replays a fixed list of draws and records every bound it was asked for.
/// Once the script runs out it answers `bound - 1`, which never triggers an
/// enemy shot.
#[derive(Default)]
pub struct Scripted {
    draws: VecDeque<u32>,
    pub bounds: Vec<u32>,
}

impl Scripted {
    pub fn new(draws: &[u32]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
            bounds: Vec::new(),
        }
    }

    pub fn never_fires() -> Self {
        Self::default()
    }
}

impl RandomSource for Scripted {
    fn random_int(&mut self, bound: u32) -> u32 {
        self.bounds.push(bound);
        self.draws
            .pop_front()
            .map_or(bound - 1, |draw| draw.min(bound - 1))
    }
}
