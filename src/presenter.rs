use crate::clock::Clock;
use crate::config::{Config, Rgb};
use crate::error::GameError;
use crate::ring::Ring;
use crate::sound::{AudioStage, Sound};
use crate::wheel::Wheel;

/// Light and sound feedback between rounds. Everything here blocks until it
/// has finished; nothing else is worth doing while it plays.
pub struct Presenter {
    flash_count: usize,
    flash_delay: f64,
    audio_settle_delay: f64,
    win_round_clip: &'static str,
    lose_round_clip: &'static str,
    win_color: Rgb,
    lose_color: Rgb,
    cursor_color: Rgb,
    cursor_win_color: Rgb,
}

impl Presenter {
    pub fn new(config: &Config) -> Self {
        Presenter {
            flash_count: config.flash_count,
            flash_delay: config.flash_delay,
            audio_settle_delay: config.audio_settle_delay,
            win_round_clip: config.win_round_clip,
            lose_round_clip: config.lose_round_clip,
            win_color: config.win_color,
            lose_color: config.lose_color,
            cursor_color: config.cursor_color,
            cursor_win_color: config.cursor_win_color,
        }
    }

    /// Flash the whole ring between `on` and `off` while `clip` plays, then
    /// wait for the clip to end. Leaves every cell showing `off`.
    pub fn present_round(
        &self,
        on: Rgb,
        off: Rgb,
        clip: &'static str,
        ring: &mut dyn Ring,
        sound: &mut dyn Sound,
        clock: &mut dyn Clock,
    ) -> Result<(), GameError> {
        let mut stage = AudioStage::enable(sound).map_err(GameError::sound)?;
        stage.play(clip, clock).map_err(GameError::sound)?;
        for _ in 0..self.flash_count {
            for color in [on, off] {
                ring.fill(color);
                ring.flush()?;
                clock.delay(self.flash_delay);
                stage.poll(clock).map_err(GameError::sound)?;
            }
        }
        stage.wait(clock).map_err(GameError::sound)?;
        Ok(())
    }

    pub fn win_round(
        &self,
        ring: &mut dyn Ring,
        sound: &mut dyn Sound,
        clock: &mut dyn Clock,
    ) -> Result<(), GameError> {
        log::info!("round won");
        self.present_round(
            self.cursor_win_color,
            self.win_color,
            self.win_round_clip,
            ring,
            sound,
            clock,
        )
    }

    pub fn lose_round(
        &self,
        ring: &mut dyn Ring,
        sound: &mut dyn Sound,
        clock: &mut dyn Clock,
    ) -> Result<(), GameError> {
        log::info!("round lost");
        self.present_round(
            self.cursor_color,
            self.lose_color,
            self.lose_round_clip,
            ring,
            sound,
            clock,
        )
    }

    /// Play `clip` to the end with the lights left alone, then give the sensor
    /// time to settle: it reads high for a moment after the audio stage is
    /// switched off.
    pub fn play_sound(
        &self,
        clip: &'static str,
        sound: &mut dyn Sound,
        clock: &mut dyn Clock,
    ) -> Result<(), GameError> {
        {
            let mut stage = AudioStage::enable(sound).map_err(GameError::sound)?;
            stage.play(clip, clock).map_err(GameError::sound)?;
            stage.wait(clock).map_err(GameError::sound)?;
        }
        clock.delay(self.audio_settle_delay);
        Ok(())
    }

    /// paint every cell its win or lose colour
    pub fn show_wheel(&self, wheel: &Wheel, ring: &mut dyn Ring) -> Result<(), GameError> {
        for i in 0..wheel.len() {
            let color = if wheel.is_win(i) {
                self.win_color
            } else {
                self.lose_color
            };
            ring.set_cell(i, color);
        }
        ring.flush()?;
        Ok(())
    }
}
