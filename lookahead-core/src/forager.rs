//! Forager - a small Pac-Man-like world for exercising the planners
//!
//! The agent walks a maze eating food while ghosts wander at random.
//! Ghost moves are drawn from a random stream carried inside the state,
//! so `step` is a pure function of (state, action) even though the world is
//! stochastic across seeds.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::layout::{Direction, Layout, Pos, ALL_DIRECTIONS};
use crate::oracle::{Simulator, Successor};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Score for eating one pellet
pub const FOOD_REWARD: f64 = 10.0;

/// Score lost on every step
pub const STEP_COST: f64 = 1.0;

/// Bonus for clearing the maze
pub const WIN_BONUS: f64 = 500.0;

/// Penalty for meeting a ghost
pub const LOSE_PENALTY: f64 = 500.0;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Episode result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Won,
    Lost,
}

/// Ghost position and heading
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ghost {
    pub pos: Pos,
    pub heading: Direction,
}

/// Full dynamic state of a Forager episode
#[derive(Clone, Debug, PartialEq)]
pub struct ForagerState {
    pub agent: Pos,
    pub ghosts: Vec<Ghost>,
    /// Remaining food, indexed like `Layout::food`
    pub food: Vec<bool>,
    pub food_left: usize,
    pub score: f64,
    pub steps: u32,
    pub result: GameResult,
    /// Seed for the next ghost move
    seed: u64,
}

impl ForagerState {
    pub fn is_over(&self) -> bool {
        self.result != GameResult::Ongoing
    }

    fn ghost_at(&self, pos: Pos) -> bool {
        self.ghosts.iter().any(|g| g.pos == pos)
    }
}

// ============================================================================
// SIMULATOR
// ============================================================================

/// Forager rules bound to one layout
#[derive(Clone, Debug)]
pub struct Forager {
    layout: Arc<Layout>,
}

impl Forager {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout: Arc::new(layout),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Starting state; `seed` drives the ghosts
    pub fn initial_state(&self, seed: u64) -> ForagerState {
        let food = vec![true; self.layout.food.len()];
        let food_left = food.len();

        ForagerState {
            agent: self.layout.agent_start,
            ghosts: self
                .layout
                .ghost_starts
                .iter()
                .map(|&pos| Ghost {
                    pos,
                    heading: Direction::Stop,
                })
                .collect(),
            food,
            food_left,
            score: 0.0,
            steps: 0,
            result: if food_left == 0 { GameResult::Won } else { GameResult::Ongoing },
            seed,
        }
    }

    /// Apply an action. Illegal moves are executed as `Stop`.
    pub fn apply(&self, state: &ForagerState, action: Direction) -> ForagerState {
        let mut next = state.clone();
        if next.is_over() {
            return next;
        }

        let dir = if self.layout.is_wall(state.agent.offset(action)) {
            Direction::Stop
        } else {
            action
        };

        next.agent = state.agent.offset(dir);
        next.steps += 1;
        next.score -= STEP_COST;

        if next.ghost_at(next.agent) {
            lose(&mut next);
            return next;
        }

        self.eat_food(&mut next);
        if next.is_over() {
            return next;
        }

        self.move_ghosts(&mut next);
        if next.ghost_at(next.agent) {
            lose(&mut next);
        }

        next
    }

    fn eat_food(&self, state: &mut ForagerState) {
        if let Some(idx) = self.layout.food_index(state.agent) {
            if state.food[idx] {
                state.food[idx] = false;
                state.food_left -= 1;
                state.score += FOOD_REWARD;

                if state.food_left == 0 {
                    state.result = GameResult::Won;
                    state.score += WIN_BONUS;
                }
            }
        }
    }

    /// Each ghost picks a random open direction, avoiding reversal unless it
    /// is in a dead end.
    fn move_ghosts(&self, state: &mut ForagerState) {
        let mut rng = ChaCha8Rng::seed_from_u64(state.seed);

        for ghost in state.ghosts.iter_mut() {
            let open = self.layout.open_moves(ghost.pos);
            if open.is_empty() {
                continue;
            }

            let forward: Vec<Direction> = open
                .iter()
                .copied()
                .filter(|&d| d != ghost.heading.reverse())
                .collect();
            let choices = if forward.is_empty() { &open } else { &forward };

            let dir = choices[rng.gen_range(0..choices.len())];
            ghost.pos = ghost.pos.offset(dir);
            ghost.heading = dir;
        }

        state.seed = rng.gen();
    }
}

fn lose(state: &mut ForagerState) {
    state.result = GameResult::Lost;
    state.score -= LOSE_PENALTY;
}

impl Simulator for Forager {
    type State = ForagerState;
    type Action = Direction;

    fn legal_actions(&self, state: &ForagerState) -> Vec<Direction> {
        if state.is_over() {
            return Vec::new();
        }
        let mut actions = self.layout.open_moves(state.agent);
        actions.push(Direction::Stop);
        actions
    }

    fn action_catalog(&self) -> Vec<Direction> {
        ALL_DIRECTIONS.to_vec()
    }

    fn step(&self, state: &ForagerState, action: Direction) -> Successor<ForagerState> {
        Successor::Advanced(self.apply(state, action))
    }

    fn is_win(&self, state: &ForagerState) -> bool {
        state.result == GameResult::Won
    }

    fn is_lose(&self, state: &ForagerState) -> bool {
        state.result == GameResult::Lost
    }

    fn noop_action(&self) -> Direction {
        Direction::Stop
    }
}
