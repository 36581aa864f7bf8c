use anyhow::{bail, Context, Result};
use std::{env, ops::RangeInclusive, str::FromStr};

use crate::{
    game::turn::DEFAULT_VICTORY_SCORE,
    utils::{
        cells::{DEFAULT_MAX_CELL_COST, DEFAULT_MIN_CELL_COST},
        ids::{DEFAULT_ID_LENGTH, DEFAULT_ID_MAX_ATTEMPTS},
    },
};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Cumulative score that ends the game
    pub victory_score: u32,
    pub min_cell_cost: u32,
    pub max_cell_cost: u32,
    pub id_length: usize,
    pub id_max_attempts: usize,
    /// Generate boards without filtering out ready-made runs
    pub allow_initial_runs: bool,
    /// Fixed seed for reproducible sessions
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            victory_score: DEFAULT_VICTORY_SCORE,
            min_cell_cost: DEFAULT_MIN_CELL_COST,
            max_cell_cost: DEFAULT_MAX_CELL_COST,
            id_length: DEFAULT_ID_LENGTH,
            id_max_attempts: DEFAULT_ID_MAX_ATTEMPTS,
            allow_initial_runs: false,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn cell_cost_range(&self) -> RangeInclusive<u32> {
        self.min_cell_cost..=self.max_cell_cost
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 3000)?,
        };

        let defaults = GameConfig::default();
        let game = GameConfig {
            victory_score: parse_var("VICTORY_SCORE", defaults.victory_score)?,
            min_cell_cost: parse_var("CELL_COST_MIN", defaults.min_cell_cost)?,
            max_cell_cost: parse_var("CELL_COST_MAX", defaults.max_cell_cost)?,
            id_length: parse_var("ID_LENGTH", defaults.id_length)?,
            id_max_attempts: parse_var("ID_MAX_ATTEMPTS", defaults.id_max_attempts)?,
            allow_initial_runs: parse_var("ALLOW_INITIAL_RUNS", defaults.allow_initial_runs)?,
            seed: match env::var("RNG_SEED") {
                Ok(raw) => Some(raw.parse().context("RNG_SEED must be a number")?),
                Err(_) => None,
            },
        };
        validate_game(&game)?;

        Ok(Config { server, game })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}

fn validate_game(game: &GameConfig) -> Result<()> {
    if game.min_cell_cost == 0 {
        bail!("CELL_COST_MIN must be positive");
    }
    if game.min_cell_cost > game.max_cell_cost {
        bail!(
            "CELL_COST_MIN ({}) must not exceed CELL_COST_MAX ({})",
            game.min_cell_cost,
            game.max_cell_cost
        );
    }
    if game.victory_score == 0 {
        bail!("VICTORY_SCORE must be positive");
    }
    if game.id_length == 0 || game.id_max_attempts == 0 {
        bail!("ID_LENGTH and ID_MAX_ATTEMPTS must be positive");
    }
    Ok(())
}
