use serde::{Deserialize, Serialize};

use crate::*;

/// Outbound half of the contract with the presentation layer.
///
/// Every method defaults to doing nothing so a front end only implements what it renders. Hosts that drive the clock
/// call [`Session::tick`] once per second with the token received through `schedule_ticks` until `cancel_ticks`
/// retires it.
pub trait Presenter {
    fn on_board_reset(&mut self, _grid: Grid) {}

    fn on_mine_count_changed(&mut self, _remaining: i32) {}

    fn on_tile_revealed(&mut self, _position: Position, _view: TileView) {}

    fn on_tile_flagged(&mut self, _position: Position, _flagged: bool) {}

    fn on_timer_tick(&mut self, _elapsed_secs: u32) {}

    fn on_win(&mut self) {}

    fn on_loss(&mut self) {}

    fn schedule_ticks(&mut self, _token: TimerToken) {}

    fn cancel_ticks(&mut self, _token: TimerToken) {}
}

/// Discards every notification.
impl Presenter for () {}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn on_board_reset(&mut self, grid: Grid) {
        (**self).on_board_reset(grid)
    }

    fn on_mine_count_changed(&mut self, remaining: i32) {
        (**self).on_mine_count_changed(remaining)
    }

    fn on_tile_revealed(&mut self, position: Position, view: TileView) {
        (**self).on_tile_revealed(position, view)
    }

    fn on_tile_flagged(&mut self, position: Position, flagged: bool) {
        (**self).on_tile_flagged(position, flagged)
    }

    fn on_timer_tick(&mut self, elapsed_secs: u32) {
        (**self).on_timer_tick(elapsed_secs)
    }

    fn on_win(&mut self) {
        (**self).on_win()
    }

    fn on_loss(&mut self) {
        (**self).on_loss()
    }

    fn schedule_ticks(&mut self, token: TimerToken) {
        (**self).schedule_ticks(token)
    }

    fn cancel_ticks(&mut self, token: TimerToken) {
        (**self).cancel_ticks(token)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    BoardReset { grid: Grid },
    MineCountChanged { remaining: i32 },
    TileRevealed { position: Position, view: TileView },
    TileFlagged { position: Position, flagged: bool },
    TimerTick { elapsed_secs: u32 },
    Won,
    Lost,
    TicksScheduled { token: TimerToken },
    TicksCancelled { token: TimerToken },
}

/// Presenter that records notifications for hosts that poll instead of reacting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<Event> {
        core::mem::take(&mut self.events)
    }

    /// Positions reported through `on_tile_revealed`, in notification order.
    pub fn revealed(&self) -> impl Iterator<Item = (Position, TileView)> + '_ {
        self.events.iter().filter_map(|event| match *event {
            Event::TileRevealed { position, view } => Some((position, view)),
            _ => None,
        })
    }

    pub fn last_mine_count(&self) -> Option<i32> {
        self.events.iter().rev().find_map(|event| match *event {
            Event::MineCountChanged { remaining } => Some(remaining),
            _ => None,
        })
    }
}

impl Presenter for EventLog {
    fn on_board_reset(&mut self, grid: Grid) {
        self.events.push(Event::BoardReset { grid });
    }

    fn on_mine_count_changed(&mut self, remaining: i32) {
        self.events.push(Event::MineCountChanged { remaining });
    }

    fn on_tile_revealed(&mut self, position: Position, view: TileView) {
        self.events.push(Event::TileRevealed { position, view });
    }

    fn on_tile_flagged(&mut self, position: Position, flagged: bool) {
        self.events.push(Event::TileFlagged { position, flagged });
    }

    fn on_timer_tick(&mut self, elapsed_secs: u32) {
        self.events.push(Event::TimerTick { elapsed_secs });
    }

    fn on_win(&mut self) {
        self.events.push(Event::Won);
    }

    fn on_loss(&mut self) {
        self.events.push(Event::Lost);
    }

    fn schedule_ticks(&mut self, token: TimerToken) {
        self.events.push(Event::TicksScheduled { token });
    }

    fn cancel_ticks(&mut self, token: TimerToken) {
        self.events.push(Event::TicksCancelled { token });
    }
}
