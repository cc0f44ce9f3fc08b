use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> Running
/// - Running -> Won
/// - Running -> Lost
///
/// Only a restart leaves `Won` or `Lost`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    NotStarted,
    Running,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// One playthrough from board generation until a win, a loss, or a restart.
///
/// The session owns its presenter and processes one action to completion before returning. Misuse such as an
/// out-of-range position or a move after the game ended is declined with a `NoChange` outcome.
#[derive(Clone, Debug)]
pub struct Session<P> {
    config: GameConfig,
    mine_count: CellCount,
    rng: SmallRng,
    store: TileStore,
    status: GameStatus,
    stopwatch: Stopwatch,
    presenter: P,
}

impl<P: Presenter> Session<P> {
    /// Starts a session on a freshly generated board.
    pub fn new(config: GameConfig, presenter: P) -> Result<Self> {
        let (grid, mine_count) = Self::check_config(&config)?;
        let mut rng = Self::board_rng(&config);
        let layout = RandomMinefieldGenerator::new(rng.random()).generate(grid, mine_count);
        Ok(Self::assemble(config, mine_count, rng, layout, presenter))
    }

    /// Starts a session on a fixed board, later restarts generate random boards from `config`.
    pub fn with_layout(config: GameConfig, layout: MineLayout, presenter: P) -> Result<Self> {
        let (grid, mine_count) = Self::check_config(&config)?;
        if layout.grid() != grid {
            return Err(GameError::InvalidDimensions);
        }
        if layout.safe_tile_count() == 0 {
            return Err(GameError::TooManyMines {
                requested: layout.mine_count().into(),
                total: layout.total_tiles(),
            });
        }
        let rng = Self::board_rng(&config);
        Ok(Self::assemble(config, mine_count, rng, layout, presenter))
    }

    /// Seeded from `config.seed` when present, from the OS otherwise.
    fn board_rng(config: &GameConfig) -> SmallRng {
        match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        }
    }

    fn check_config(config: &GameConfig) -> Result<(Grid, CellCount)> {
        let checked = config.grid().and_then(|grid| Ok((grid, config.mine_count()?)));
        if let Err(err) = checked {
            log::warn!("Rejected configuration {:?}: {}", config, err);
        }
        checked
    }

    fn assemble(
        config: GameConfig,
        mine_count: CellCount,
        rng: SmallRng,
        layout: MineLayout,
        presenter: P,
    ) -> Self {
        let mut session = Self {
            config,
            mine_count,
            rng,
            store: TileStore::new(&layout),
            status: Default::default(),
            stopwatch: Default::default(),
            presenter,
        };
        session.announce_board();
        session
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.store.grid()
    }

    pub fn total_mines(&self) -> CellCount {
        self.store.mine_count()
    }

    /// Starts at the mine count, may go negative when the player places more flags than there are mines.
    pub fn flags_remaining(&self) -> i32 {
        flags_remaining(&self.store)
    }

    pub fn safe_revealed_count(&self) -> CellCount {
        self.store.safe_revealed_count()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.stopwatch.elapsed_secs()
    }

    /// Token the host must pass to [`Session::tick`] while the clock runs.
    pub fn timer_token(&self) -> Option<TimerToken> {
        self.stopwatch.active_token()
    }

    pub fn tile(&self, position: Position) -> Result<Tile> {
        self.store.get(position)
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<Tile> {
        self.store.tile_at(coords)
    }

    pub fn store(&self) -> &TileStore {
        &self.store
    }

    pub fn mine_positions(&self) -> Vec<Position> {
        self.store.mine_positions()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(mut self) -> P {
        self.stop_clock();
        self.presenter
    }

    /// Primary action on a tile.
    pub fn reveal(&mut self, position: Position) -> RevealOutcome {
        self.grid()
            .to_coord(position)
            .and_then(|coords| self.try_reveal(coords))
            .unwrap_or_else(|err| {
                log::debug!("Reveal at {} declined: {}", position, err);
                RevealOutcome::NoChange
            })
    }

    pub fn reveal_at(&mut self, coords: Coord2) -> RevealOutcome {
        match self.grid().to_index(coords) {
            Ok(position) => self.reveal(position),
            Err(err) => {
                log::debug!("Reveal at {:?} declined: {}", coords, err);
                RevealOutcome::NoChange
            }
        }
    }

    /// Secondary action on a tile.
    pub fn toggle_flag(&mut self, position: Position) -> MarkOutcome {
        self.grid()
            .to_coord(position)
            .and_then(|coords| self.try_toggle_flag(coords))
            .unwrap_or_else(|err| {
                log::debug!("Flag at {} declined: {}", position, err);
                MarkOutcome::NoChange
            })
    }

    pub fn toggle_flag_at(&mut self, coords: Coord2) -> MarkOutcome {
        match self.grid().to_index(coords) {
            Ok(position) => self.toggle_flag(position),
            Err(err) => {
                log::debug!("Flag at {:?} declined: {}", coords, err);
                MarkOutcome::NoChange
            }
        }
    }

    /// Advances the clock by one second, ticks from a cancelled run return `None` and change nothing.
    pub fn tick(&mut self, token: TimerToken) -> Option<u32> {
        let elapsed = self.stopwatch.tick(token);
        match elapsed {
            Some(elapsed_secs) => self.presenter.on_timer_tick(elapsed_secs),
            None => log::trace!("Ignoring stale tick {:?}", token),
        }
        elapsed
    }

    /// Discards the current board and starts over with the same configuration.
    pub fn restart(&mut self) {
        if let Some(token) = self.stopwatch.reset() {
            self.presenter.cancel_ticks(token);
        }

        let layout = RandomMinefieldGenerator::new(self.rng.random())
            .generate(self.grid(), self.mine_count);
        self.store = TileStore::new(&layout);
        self.status = GameStatus::NotStarted;
        log::debug!("Session restarted");
        self.announce_board();
    }

    fn try_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.mark_started();
        self.check_not_finished()?;

        let disclosure = disclose(&mut self.store, coords)?;
        if disclosure.is_empty() {
            return Ok(RevealOutcome::NoChange);
        }

        if disclosure.hit_mine {
            log::debug!("Mine hit at {:?}", coords);
            self.end_game(false);
            return Ok(RevealOutcome::HitMine);
        }

        let grid = self.grid();
        for &revealed in &disclosure.revealed {
            let view = self.store.tile_at(revealed)?.view();
            self.presenter.on_tile_revealed(grid.to_index(revealed)?, view);
        }
        log::debug!(
            "Revealed {} tiles from {:?}, {} of {} safe tiles open",
            disclosure.revealed.len(),
            coords,
            self.store.safe_revealed_count(),
            self.store.total_tiles() - self.store.mine_count()
        );

        if self.store.is_cleared() {
            self.end_game(true);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    fn try_toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.mark_started();
        self.check_not_finished()?;

        let outcome = crate::flag::toggle_flag(&mut self.store, coords)?;
        if outcome.is_changed() {
            let flagged = self.store.tile_at(coords)?.is_flagged();
            self.presenter
                .on_tile_flagged(self.grid().to_index(coords)?, flagged);
            self.presenter.on_mine_count_changed(self.flags_remaining());
        }
        Ok(outcome)
    }

    fn announce_board(&mut self) {
        let grid = self.grid();
        log::debug!(
            "New {} board with {} mines",
            grid,
            self.store.mine_count()
        );
        self.presenter.on_board_reset(grid);
        self.presenter.on_mine_count_changed(self.flags_remaining());
    }

    /// Checks if the status is initial and changes to running, starting the clock
    fn mark_started(&mut self) {
        if self.status.is_initial() {
            log::debug!("Session started");
            self.status = GameStatus::Running;
            if let Some(token) = self.stopwatch.start() {
                self.presenter.schedule_ticks(token);
            }
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        self.status = if won {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
        self.stop_clock();
        log::debug!(
            "Session ended {:?} after {}s",
            self.status,
            self.stopwatch.elapsed_secs()
        );

        if won {
            self.presenter.on_win();
        } else {
            let mut mines = self.store.reveal_mines();
            mines.shuffle(&mut self.rng);
            for position in mines {
                self.presenter.on_tile_revealed(position, TileView::Mine);
            }
            self.presenter.on_loss();
        }
    }

    fn stop_clock(&mut self) {
        if let Some(token) = self.stopwatch.stop() {
            self.presenter.cancel_ticks(token);
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
