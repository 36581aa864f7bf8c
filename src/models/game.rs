use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    models::{Board, CellCosts},
    store::Entity,
};

/// Number of seats in a game
pub const SEATS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Waiting,
    InProgress,
    Finished,
}

/// Outcome of one swap: a snapshot per cascade iteration and the score earned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CascadeResult {
    pub states: Vec<Board>,
    pub score: u32,
}

impl CascadeResult {
    /// Result of a swap that matched nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Board after the last cascade iteration
    pub fn final_board(&self) -> Option<&Board> {
        self.states.last()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gamer {
    /// Holding this id is what authorizes a player, so it never leaves the server
    /// inside a game snapshot
    #[serde(skip_serializing)]
    pub id: String,
    pub name: String,
    pub score: u32,
    #[serde(skip_serializing)]
    pub game_id: String,
    pub joined_at: DateTime<Utc>,
}

impl Gamer {
    pub fn new(id: String, name: String, game_id: String) -> Self {
        Self {
            id,
            name,
            score: 0,
            game_id,
            joined_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Game {
    pub id: String,
    pub board: Board,
    pub costs: CellCosts,
    /// Seated gamers in join order
    pub gamers: Vec<Gamer>,
    pub status: GameStatus,
    pub current_gamer_name: Option<String>,
    pub winner_gamer_name: Option<String>,
    pub step_number: u64,
    pub last_step: CascadeResult,
    pub created_at: DateTime<Utc>,
}

impl Game {
    /// Create an empty game waiting for its first gamer
    pub fn new(id: String, board: Board, costs: CellCosts) -> Self {
        Self {
            id,
            board,
            costs,
            gamers: Vec::with_capacity(SEATS),
            status: GameStatus::Waiting,
            current_gamer_name: None,
            winner_gamer_name: None,
            step_number: 0,
            last_step: CascadeResult::empty(),
            created_at: Utc::now(),
        }
    }

    pub fn gamer(&self, gamer_id: &str) -> Option<&Gamer> {
        self.gamers.iter().find(|g| g.id == gamer_id)
    }

    pub fn contains_gamer(&self, gamer_id: &str) -> bool {
        self.gamer(gamer_id).is_some()
    }

    pub fn has_gamer_named(&self, name: &str) -> bool {
        self.gamers.iter().any(|g| g.name == name)
    }

    /// The other seated gamer, if there is one
    pub fn opponent(&self, gamer_id: &str) -> Option<&Gamer> {
        if !self.contains_gamer(gamer_id) {
            return None;
        }
        self.gamers.iter().find(|g| g.id != gamer_id)
    }

    pub fn is_full(&self) -> bool {
        self.gamers.len() >= SEATS
    }
}

impl Entity for Game {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Gamer {
    fn id(&self) -> &str {
        &self.id
    }
}
