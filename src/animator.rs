use crate::clock::Clock;
use crate::config::{Config, Rgb};
use crate::ring::Ring;
use crate::wheel::{step_back, Wheel};
use std::io;

/// where the cursor is and how fast it's going
#[derive(Clone, Debug, PartialEq)]
pub struct Cursor {
    pub index: usize,
    /// seconds between steps; bigger is slower
    pub speed: f64,
}

/// Moves and blinks the cursor. Both ticks are time-gated: calling them before
/// their interval is up only reads the clock, so they can sit in a tight
/// polling loop.
pub struct CursorAnimator {
    pub cursor: Cursor,
    last_tick: f64,
    win_color: Rgb,
    lose_color: Rgb,
    cursor_color: Rgb,
    cursor_win_color: Rgb,
    cursor_tick_speed: f64,
}

impl CursorAnimator {
    pub fn new(config: &Config, index: usize, now: f64) -> Self {
        CursorAnimator {
            cursor: Cursor {
                index,
                speed: config.max_speed,
            },
            last_tick: now,
            win_color: config.win_color,
            lose_color: config.lose_color,
            cursor_color: config.cursor_color,
            cursor_win_color: config.cursor_win_color,
            cursor_tick_speed: config.cursor_tick_speed,
        }
    }

    /// the colour a cell shows with no cursor on it
    fn resting(&self, wheel: &Wheel, index: usize) -> Rgb {
        if wheel.is_win(index) {
            self.win_color
        } else {
            self.lose_color
        }
    }

    /// the colour a cell shows with the cursor on it
    fn highlighted(&self, wheel: &Wheel, index: usize) -> Rgb {
        if wheel.is_win(index) {
            self.cursor_win_color
        } else {
            self.cursor_color
        }
    }

    /// Step the cursor one cell clockwise if it has sat still for longer than
    /// its speed. Never moves more than one cell however late it's called.
    /// Returns whether it moved.
    pub fn tick_wheel(
        &mut self,
        wheel: &Wheel,
        ring: &mut dyn Ring,
        clock: &mut dyn Clock,
    ) -> Result<bool, io::Error> {
        let now = clock.now();
        if now - self.last_tick <= self.cursor.speed {
            return Ok(false);
        }
        let index = self.cursor.index;
        ring.set_cell(index, self.resting(wheel, index));
        let index = step_back(index, wheel.len());
        ring.set_cell(index, self.highlighted(wheel, index));
        ring.flush()?;
        self.cursor.index = index;
        self.last_tick = now;
        Ok(true)
    }

    /// Blink the stationary cursor between the win highlight and the win
    /// colour, going by what the cell is showing now. Returns whether it
    /// blinked.
    pub fn tick_cursor(
        &mut self,
        ring: &mut dyn Ring,
        clock: &mut dyn Clock,
    ) -> Result<bool, io::Error> {
        let now = clock.now();
        if now - self.last_tick <= self.cursor_tick_speed {
            return Ok(false);
        }
        let index = self.cursor.index;
        let color = if ring.cell(index) == self.cursor_win_color {
            self.win_color
        } else {
            self.cursor_win_color
        };
        ring.set_cell(index, color);
        ring.flush()?;
        self.last_tick = now;
        Ok(true)
    }

    /// slow the cursor down by one step
    pub fn decelerate(&mut self, factor: f64) {
        self.cursor.speed *= factor;
    }
}
