use crate::{
    error::TrioError,
    models::{CascadeResult, Game, GameStatus, Gamer, SEATS},
};

/// Default cumulative score that wins a game
pub const DEFAULT_VICTORY_SCORE: u32 = 300;

/// Lifecycle and turn rules of a game: Waiting -> InProgress -> Finished
pub struct TurnMachine;

impl TurnMachine {
    /// Seat a new gamer. The second gamer starts the game and the first one
    /// to join gets the opening turn.
    pub fn seat(game: &mut Game, gamer: Gamer) -> Result<(), TrioError> {
        if game.status != GameStatus::Waiting {
            return Err(TrioError::Conflict(format!(
                "cannot join game {}, it is {:?}",
                game.id, game.status
            )));
        }
        if game.is_full() {
            return Err(TrioError::Conflict(format!("game {} is full", game.id)));
        }
        if game.has_gamer_named(&gamer.name) {
            return Err(TrioError::Conflict(format!(
                "name {} is already taken",
                gamer.name
            )));
        }

        game.gamers.push(gamer);

        if game.gamers.len() == SEATS {
            game.status = GameStatus::InProgress;
            game.current_gamer_name = Some(game.gamers[0].name.clone());
        }

        Ok(())
    }

    /// Whether the named gamer may move right now
    pub fn can_move(game: &Game, gamer_name: &str) -> bool {
        game.status == GameStatus::InProgress
            && game.current_gamer_name.as_deref() == Some(gamer_name)
    }

    /// Apply an accepted move for `gamer_id`.
    ///
    /// An empty result changes nothing. Otherwise the board becomes the last
    /// snapshot, the gamer is credited, and the game either ends with that
    /// gamer as winner or passes the turn to the opponent. Returns the updated
    /// gamer record.
    pub fn record_move(
        game: &mut Game,
        gamer_id: &str,
        result: &CascadeResult,
        victory_score: u32,
    ) -> Result<Gamer, TrioError> {
        let idx = game
            .gamers
            .iter()
            .position(|g| g.id == gamer_id)
            .ok_or(TrioError::Unauthorized)?;

        let Some(final_board) = result.final_board() else {
            return Ok(game.gamers[idx].clone());
        };

        let score = game.gamers[idx].score.saturating_add(result.score);
        let won = score >= victory_score;

        let next_turn = if won {
            None
        } else {
            let opponent = game.opponent(gamer_id).ok_or_else(|| {
                TrioError::Internal(format!("gamer {} has no opponent", game.gamers[idx].name))
            })?;
            Some(opponent.name.clone())
        };

        game.board = final_board.clone();
        game.last_step = result.clone();
        game.step_number += 1;
        game.gamers[idx].score = score;
        game.current_gamer_name = next_turn;

        if won {
            game.status = GameStatus::Finished;
            game.winner_gamer_name = Some(game.gamers[idx].name.clone());
        }

        Ok(game.gamers[idx].clone())
    }
}
