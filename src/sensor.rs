use crossterm::event::{poll, read, Event, KeyCode};
use crossterm::terminal;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::time::{Duration, Instant};

/// map of keys to how hard they hit the spring, as a peak sensor magnitude
const SPRING_KEYMAP: [(char, u16); 4] = [
    ('1', 3_200), // tap: short read window
    ('2', 5_000), // pull: medium
    ('3', 6_500), // yank: long
    (' ', 9_000), // knock the board
];

/// how long the simulated ringing takes to fall to 1/e of its peak
const SPRING_DECAY_SECS: f64 = 0.12;

/// ringing frequency of the door stop spring
const SPRING_HZ: f64 = 18.0;

/// an ADC conversion isn't free; this paces the game loop like real hardware
const ADC_CONVERSION: Duration = Duration::from_millis(5);

/// reads how hard the sensor is vibrating right now
pub trait VibrationSensor {
    /// current magnitude; zero when still
    fn read_vibration(&mut self) -> Result<u16, io::Error>;

    /// An `Interrupted` error if whoever is playing has asked to stop. The
    /// game calls this at points where it isn't reading the sensor; a sensor
    /// with no way to ask never fails.
    fn check_quit(&mut self) -> Result<(), io::Error> {
        Ok(())
    }
}

/// A piezo on a spring door stop, simulated from the keyboard. Each mapped
/// key plucks the spring; the reported magnitude is a decaying ringing
/// envelope, so a hard pluck keeps reading high for longer.
pub struct SpringSensor {
    keymap: HashMap<char, u16>,
    pluck: Option<(Instant, u16)>,
}

impl SpringSensor {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(SpringSensor {
            keymap: HashMap::from(SPRING_KEYMAP),
            pluck: None,
        })
    }

    fn read_keys(&mut self) -> Result<(), io::Error> {
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => match evt.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        return Err(io::Error::new(
                            io::ErrorKind::Interrupted,
                            "player walked away",
                        ));
                    }
                    KeyCode::Char(key) => match self.keymap.get(&key) {
                        Some(peak) => self.pluck = Some((Instant::now(), *peak)),
                        None => log::debug!("key {:?} doesn't touch the spring", key),
                    },
                    _ => log::debug!("ignoring key event {:?}", evt),
                },
                _ => {}
            }
        }
        Ok(())
    }
}

impl Drop for SpringSensor {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("couldn't restore terminal mode: {}", e);
        }
    }
}

impl VibrationSensor for SpringSensor {
    fn read_vibration(&mut self) -> Result<u16, io::Error> {
        self.read_keys()?;
        spin_sleep::sleep(ADC_CONVERSION);
        Ok(match self.pluck {
            Some((at, peak)) => ringing(peak, at.elapsed().as_secs_f64()),
            None => 0,
        })
    }

    fn check_quit(&mut self) -> Result<(), io::Error> {
        self.read_keys()
    }
}

/// magnitude of a spring plucked to `peak`, `t` seconds later
fn ringing(peak: u16, t: f64) -> u16 {
    let envelope = peak as f64 * (-t / SPRING_DECAY_SECS).exp();
    // the piezo reads the swing both ways, but the first read is the pluck
    let swing = (std::f64::consts::FRAC_PI_2 + std::f64::consts::TAU * SPRING_HZ * t)
        .sin()
        .abs();
    (envelope * swing).round() as u16
}

/// dummy VibrationSensor implementation for testing; plays back a script of
/// readings, then reads still forever
pub struct DummySensor {
    readings: VecDeque<u16>,
    reads: usize,
    quit: bool,
}

impl DummySensor {
    pub fn new(readings: &[u16]) -> Self {
        DummySensor {
            readings: readings.iter().copied().collect(),
            reads: 0,
            quit: false,
        }
    }

    /// from now on, `check_quit` reports the player has asked to stop
    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// how many times the sensor has been read
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl VibrationSensor for DummySensor {
    fn read_vibration(&mut self) -> Result<u16, io::Error> {
        self.reads += 1;
        Ok(self.readings.pop_front().unwrap_or(0))
    }

    fn check_quit(&mut self) -> Result<(), io::Error> {
        if self.quit {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "quit"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ringing_starts_at_peak() {
        assert_eq!(ringing(6_500, 0.0), 6_500);
    }

    #[test]
    fn test_ringing_dies_away() {
        assert!(ringing(9_000, 2.0) < 10);
    }

    #[test]
    fn test_ringing_envelope_decays() {
        // compare crests of the swing, one period apart
        let period = 1.0 / SPRING_HZ;
        let mut last = ringing(9_000, 0.0);
        for n in 1..10 {
            let now = ringing(9_000, n as f64 * period);
            assert!(now < last);
            last = now;
        }
    }

    #[test]
    fn test_dummy_plays_script_then_still() -> Result<(), io::Error> {
        let mut s = DummySensor::new(&[10, 3000]);
        assert_eq!(s.read_vibration()?, 10);
        assert_eq!(s.read_vibration()?, 3000);
        assert_eq!(s.read_vibration()?, 0);
        assert_eq!(s.read_vibration()?, 0);
        assert_eq!(s.reads(), 4);
        Ok(())
    }

    #[test]
    fn test_dummy_quit_is_interrupted() -> Result<(), io::Error> {
        let mut s = DummySensor::new(&[]);
        s.check_quit()?;
        s.quit();
        let err = s.check_quit().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
        // asking to stop isn't a reading
        assert_eq!(s.reads(), 0);
        Ok(())
    }
}
