use std::sync::{Arc, Mutex, MutexGuard};

use dashmap::DashMap;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::GameConfig,
    error::TrioError,
    game::{BoardGenerator, CascadeEngine, TurnMachine, WeightedCellSource},
    models::{CascadeResult, Coordinates, Game, GameStatus, Gamer},
    store::{InMemoryRepository, Repository},
    utils::{cells::generate_costs, ids::generate_unique_id},
};

/// Game coordinator: the five operations exposed to clients.
///
/// Every operation on an existing game runs under that game's lock, from the
/// authorization check until the updated records are saved. The lock also
/// owns the game's random source.
pub struct TrioService {
    config: GameConfig,
    games: Arc<dyn Repository<Game>>,
    gamers: Arc<dyn Repository<Gamer>>,
    /// Lock and random source of every known game id
    locks: DashMap<String, Arc<Mutex<StdRng>>>,
    /// Seeds per-game sources and draws new boards; never held with a game lock
    seeds: Mutex<StdRng>,
}

impl TrioService {
    pub fn new(
        config: GameConfig,
        games: Arc<dyn Repository<Game>>,
        gamers: Arc<dyn Repository<Gamer>>,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            config,
            games,
            gamers,
            locks: DashMap::new(),
            seeds: Mutex::new(rng),
        }
    }

    /// Service backed by fresh in-memory repositories
    pub fn in_memory(config: GameConfig) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryRepository::<Game>::new()),
            Arc::new(InMemoryRepository::<Gamer>::new()),
        )
    }

    /// Create a game with a freshly generated board. Returns the game id.
    pub fn create_game(&self, width: i32, height: i32) -> Result<String, TrioError> {
        // Negative sizes become 0 and fail the generator's bounds check
        let width = usize::try_from(width).unwrap_or(0);
        let height = usize::try_from(height).unwrap_or(0);

        let (id, board, costs, game_rng) = {
            let mut rng = self.seeds()?;
            let costs = generate_costs(&mut *rng, self.config.cell_cost_range())?;
            let board = {
                let mut cells = WeightedCellSource::new(&costs, &mut *rng)?;
                if self.config.allow_initial_runs {
                    BoardGenerator::generate(width, height, &mut cells)?
                } else {
                    BoardGenerator::generate_stable(width, height, &mut cells)?
                }
            };
            let id = generate_unique_id(
                &mut *rng,
                self.config.id_length,
                self.config.id_max_attempts,
                |candidate| {
                    !self.locks.contains_key(candidate) && self.games.get_by_id(candidate).is_none()
                },
            )?;
            (id, board, costs, StdRng::from_rng(&mut *rng))
        };

        // Registered before the save so a lookup never creates a second lock
        self.locks
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(game_rng)));
        let game = self.games.save(Game::new(id, board, costs));

        tracing::info!(
            "Created game {} with a {}x{} board",
            game.id,
            width,
            height
        );
        Ok(game.id)
    }

    /// Seat a new gamer named `name`. Returns the gamer id, which the gamer
    /// uses for every later call.
    pub fn join_game(&self, game_id: &str, name: &str) -> Result<String, TrioError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrioError::Validation("gamer name must not be blank".to_string()));
        }

        let lock = self.lock_for(game_id)?;
        let mut rng = Self::acquire(&lock)?;
        let mut game = self.load_game(game_id)?;

        let id = generate_unique_id(
            &mut *rng,
            self.config.id_length,
            self.config.id_max_attempts,
            |candidate| self.gamers.get_by_id(candidate).is_none(),
        )?;
        let gamer = Gamer::new(id, name.to_string(), game.id.clone());

        TurnMachine::seat(&mut game, gamer.clone()).inspect_err(|e| {
            tracing::info!("Rejected join of {} to game {}: {}", name, game_id, e);
        })?;

        let gamer = self.gamers.save(gamer);
        let game = self.games.save(game);

        tracing::info!(
            "Gamer {} joined game {} ({} of 2 seats taken)",
            gamer.name,
            game.id,
            game.gamers.len()
        );
        if game.status == GameStatus::InProgress {
            tracing::info!(
                "Game {} started, {} moves first",
                game.id,
                game.current_gamer_name.as_deref().unwrap_or_default()
            );
        }

        Ok(gamer.id)
    }

    /// Whether it is currently this gamer's turn
    pub fn can_move(&self, game_id: &str, gamer_id: &str) -> Result<bool, TrioError> {
        let lock = self.lock_for(game_id)?;
        let _guard = Self::acquire(&lock)?;
        let game = self.load_game(game_id)?;
        let gamer = self.authorize(&game, gamer_id)?;

        Ok(TurnMachine::can_move(&game, &gamer.name))
    }

    /// Swap two cells on behalf of a gamer.
    ///
    /// Out of turn, or when the swap matches nothing, the result is empty and
    /// nothing changes. Otherwise board, score and turn are saved together.
    pub fn make_move(
        &self,
        game_id: &str,
        gamer_id: &str,
        source: Coordinates,
        dest: Coordinates,
    ) -> Result<CascadeResult, TrioError> {
        let lock = self.lock_for(game_id)?;
        let mut rng = Self::acquire(&lock)?;
        let game = self.load_game(game_id)?;
        let gamer = self.authorize(&game, gamer_id)?;

        if !TurnMachine::can_move(&game, &gamer.name) {
            tracing::debug!(
                "Gamer {} tried to move out of turn in game {}",
                gamer.name,
                game_id
            );
            return Ok(CascadeResult::empty());
        }

        let result = {
            let mut cells = WeightedCellSource::new(&game.costs, &mut *rng)?;
            CascadeEngine::apply_swap(&game.board, source, dest, &game.costs, &mut cells)?
        };

        if result.is_empty() {
            tracing::debug!(
                "Swap {} <-> {} by {} in game {} matched nothing",
                source,
                dest,
                gamer.name,
                game_id
            );
            return Ok(result);
        }

        let mut updated = game;
        let gamer = TurnMachine::record_move(
            &mut updated,
            gamer_id,
            &result,
            self.config.victory_score,
        )
        .inspect_err(|e| tracing::error!("Move in game {} failed: {}", game_id, e))?;

        self.gamers.save(gamer.clone());
        let updated = self.games.save(updated);

        tracing::info!(
            "Gamer {} scored {} in game {} over {} cascades (total {})",
            gamer.name,
            result.score,
            game_id,
            result.states.len(),
            gamer.score
        );
        if updated.status == GameStatus::Finished {
            tracing::info!("Game {} finished, {} wins", game_id, gamer.name);
        }

        Ok(result)
    }

    /// Full game snapshot for a seated gamer
    pub fn game_state(&self, game_id: &str, gamer_id: &str) -> Result<Game, TrioError> {
        let lock = self.lock_for(game_id)?;
        let _guard = Self::acquire(&lock)?;
        let game = self.load_game(game_id)?;
        self.authorize(&game, gamer_id)?;

        Ok(game)
    }

    fn load_game(&self, game_id: &str) -> Result<Game, TrioError> {
        self.games
            .get_by_id(game_id)
            .ok_or_else(|| TrioError::NotFound(format!("game {} does not exist", game_id)))
    }

    /// The gamer behind `gamer_id`, provided they are seated in `game`
    fn authorize(&self, game: &Game, gamer_id: &str) -> Result<Gamer, TrioError> {
        let seated = self
            .gamers
            .get_by_id(gamer_id)
            .filter(|gamer| game.contains_gamer(&gamer.id));

        seated.ok_or_else(|| {
            tracing::warn!("Unauthorized access to game {}", game.id);
            TrioError::Unauthorized
        })
    }

    /// Lock of an existing game. Unknown ids never get a lock.
    fn lock_for(&self, game_id: &str) -> Result<Arc<Mutex<StdRng>>, TrioError> {
        if let Some(lock) = self.locks.get(game_id) {
            return Ok(lock.value().clone());
        }

        // Games saved to an injected repository before this service existed
        self.load_game(game_id)?;
        let rng = StdRng::from_rng(&mut *self.seeds()?);
        Ok(self
            .locks
            .entry(game_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(rng)))
            .value()
            .clone())
    }

    fn acquire(lock: &Mutex<StdRng>) -> Result<MutexGuard<'_, StdRng>, TrioError> {
        lock.lock()
            .map_err(|_| TrioError::Internal("game lock poisoned".to_string()))
    }

    fn seeds(&self) -> Result<MutexGuard<'_, StdRng>, TrioError> {
        self.seeds
            .lock()
            .map_err(|_| TrioError::Internal("seed source lock poisoned".to_string()))
    }
}
