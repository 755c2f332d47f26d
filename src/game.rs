use crate::animator::CursorAnimator;
use crate::clock::Clock;
use crate::config::{Config, ConfigError};
use crate::error::GameError;
use crate::presenter::Presenter;
use crate::ring::Ring;
use crate::sensor::VibrationSensor;
use crate::sound::Sound;
use crate::wheel::Wheel;

/// The game goes round these in order, one at a time, forever.
#[derive(Clone, Debug, PartialEq)]
pub enum GameState {
    /// waiting for the spring to be boinged
    ReadInput,
    /// spinning at full speed, listening to the spring since `start`
    WheelSpin { start: f64, read_time: f64 },
    /// slowing down; last slowed at `reference`
    WindDown { reference: f64 },
}

/// how many win spaces are on the ring; fewer is harder
#[derive(Clone, Debug, PartialEq)]
pub struct WinCounter {
    count: usize,
    start: usize,
    min: usize,
}

impl WinCounter {
    pub fn new(start: usize, min: usize) -> Self {
        WinCounter {
            count: start,
            start,
            min,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// a won round takes a win space away
    pub fn win(&mut self) {
        self.count -= 1;
    }

    /// a lost round starts the game over
    pub fn lose(&mut self) {
        self.count = self.start;
    }

    /// if the player is down to the minimum, they've won the game and it
    /// starts over
    pub fn take_game_won(&mut self) -> bool {
        if self.count == self.min {
            self.count = self.start;
            true
        } else {
            false
        }
    }
}

/// the hardware the game runs on
pub struct Peripherals<'a> {
    pub clock: &'a mut dyn Clock,
    pub sensor: &'a mut dyn VibrationSensor,
    pub ring: &'a mut dyn Ring,
    pub sound: &'a mut dyn Sound,
}

pub struct Game<'a> {
    config: Config,
    hw: Peripherals<'a>,
    wheel: Wheel,
    animator: CursorAnimator,
    presenter: Presenter,
    counter: WinCounter,
    state: GameState,
    vibration_strength: u16,
}

impl<'a> Game<'a> {
    /// Check the config fits the hardware, then light up the starting wheel
    /// with the cursor on the last cell.
    pub fn new(config: Config, mut hw: Peripherals<'a>) -> Result<Game<'a>, GameError> {
        config.validate()?;
        if hw.ring.len() != config.ring_len {
            return Err(ConfigError::RingMismatch(config.ring_len, hw.ring.len()).into());
        }
        let last = config.ring_len - 1;
        let mut wheel = Wheel::new(config.ring_len);
        wheel.place_win_cells(last, config.start_win_count);
        let mut g = Game {
            animator: CursorAnimator::new(&config, last, hw.clock.now()),
            presenter: Presenter::new(&config),
            counter: WinCounter::new(config.start_win_count, config.min_win_count),
            wheel,
            hw,
            state: GameState::ReadInput,
            vibration_strength: 0,
            config,
        };
        g.hw.ring.fill(g.config.blank_color);
        g.hw.ring.flush()?;
        g.presenter.show_wheel(&g.wheel, &mut *g.hw.ring)?;
        Ok(g)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn win_count(&self) -> usize {
        self.counter.count()
    }

    pub fn cursor_index(&self) -> usize {
        self.animator.cursor.index
    }

    /// Run forever. Only comes back if the hardware fails.
    pub fn run(&mut self) -> Result<(), GameError> {
        loop {
            self.step()?;
        }
    }

    /// one pass of the game loop
    pub fn step(&mut self) -> Result<(), GameError> {
        match self.state {
            GameState::ReadInput => self.read_input(),
            GameState::WheelSpin { start, read_time } => self.wheel_spin(start, read_time),
            GameState::WindDown { reference } => self.wind_down(reference),
        }
    }

    /// Wait for the spring to be hit hard enough, blinking the cursor. The
    /// harder the hit, the longer the spring gets listened to afterwards.
    fn read_input(&mut self) -> Result<(), GameError> {
        // a quit asked for during the last round's presentation
        self.hw.sensor.check_quit()?;
        self.presenter.play_sound(
            self.config.start_round_clip,
            &mut *self.hw.sound,
            &mut *self.hw.clock,
        )?;
        self.vibration_strength = 0;
        while self.vibration_strength < self.config.short_threshold {
            self.vibration_strength = self.hw.sensor.read_vibration()?;
            self.animator
                .tick_cursor(&mut *self.hw.ring, &mut *self.hw.clock)?;
        }
        let read_time = self.config.read_time_for(self.vibration_strength);
        log::debug!(
            "boing of {}: listening for {}s",
            self.vibration_strength,
            read_time
        );
        let start = self.hw.clock.now();
        self.state = GameState::WheelSpin { start, read_time };
        Ok(())
    }

    /// Spin at full speed until the read window closes. A spring still
    /// ringing hard keeps pushing the window out.
    fn wheel_spin(&mut self, start: f64, read_time: f64) -> Result<(), GameError> {
        let now = self.hw.clock.now();
        if now - start < read_time {
            self.vibration_strength = self.hw.sensor.read_vibration()?;
            if self.vibration_strength > self.config.still_vibrating_threshold {
                self.state = GameState::WheelSpin {
                    start,
                    read_time: read_time + self.config.read_time_increment,
                };
            }
            self.animator
                .tick_wheel(&self.wheel, &mut *self.hw.ring, &mut *self.hw.clock)?;
        } else {
            log::debug!("spun for {}s, winding down", read_time);
            self.state = GameState::WindDown { reference: now };
        }
        Ok(())
    }

    /// Slow the cursor down every so often until it's too slow to count as
    /// moving, then settle the round.
    fn wind_down(&mut self, reference: f64) -> Result<(), GameError> {
        self.hw.sensor.check_quit()?;
        let now = self.hw.clock.now();
        if now - reference > self.config.decelerate_time {
            self.state = GameState::WindDown { reference: now };
            self.animator.decelerate(self.config.decelerate_factor);
            if self.animator.cursor.speed > self.config.min_speed {
                return self.finish_round();
            }
        }
        self.animator
            .tick_wheel(&self.wheel, &mut *self.hw.ring, &mut *self.hw.clock)?;
        Ok(())
    }

    /// The cursor has stopped: show the result, then lay out the next wheel
    /// starting under the cursor.
    fn finish_round(&mut self) -> Result<(), GameError> {
        let index = self.animator.cursor.index;
        if self.wheel.is_win(index) {
            self.presenter
                .win_round(&mut *self.hw.ring, &mut *self.hw.sound, &mut *self.hw.clock)?;
            self.counter.win();
        } else {
            self.presenter
                .lose_round(&mut *self.hw.ring, &mut *self.hw.sound, &mut *self.hw.clock)?;
            self.counter.lose();
        }
        if self.counter.take_game_won() {
            log::info!("game won!");
            self.presenter.play_sound(
                self.config.win_game_clip,
                &mut *self.hw.sound,
                &mut *self.hw.clock,
            )?;
        }
        log::info!("{} win spaces next round", self.counter.count());

        self.animator.cursor.speed = self.config.max_speed;
        self.wheel.place_win_cells(index, self.counter.count());
        self.presenter.show_wheel(&self.wheel, &mut *self.hw.ring)?;
        self.state = GameState::ReadInput;
        Ok(())
    }
}
