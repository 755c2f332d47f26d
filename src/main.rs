use std::error::Error;
use std::io;

use jumboinga::clock::MonotonicClock;
use jumboinga::config::Config;
use jumboinga::error::GameError;
use jumboinga::game::{Game, Peripherals};
use jumboinga::ring::TermRing;
use jumboinga::sensor::SpringSensor;
use jumboinga::sound::{Mute, SimpleBeep, Sound};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // initialise
    let config = Config::default();
    let mut clock = MonotonicClock::new();
    let mut sensor = SpringSensor::new()?;
    let mut ring = TermRing::new(config.ring_len)?;
    let mut sound: Box<dyn Sound> = if std::env::args().any(|a| a == "--mute") {
        Box::new(Mute::new())
    } else {
        match SimpleBeep::new() {
            Ok(speaker) => Box::new(speaker),
            Err(e) => {
                log::warn!("can't drive the PC speaker ({}); playing silently", e);
                Box::new(Mute::new())
            }
        }
    };

    let mut game = Game::new(
        config,
        Peripherals {
            clock: &mut clock,
            sensor: &mut sensor,
            ring: &mut ring,
            sound: sound.as_mut(),
        },
    )?;

    // the game only stops when the player quits or the hardware gives up
    match game.run() {
        Err(GameError::Io(e)) if e.kind() == io::ErrorKind::Interrupted => {}
        result => result?,
    }

    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..12 {
        println!();
    }
    Ok(())
}
