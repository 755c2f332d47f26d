///
/// ## Design
///
/// * jumping boinging game: a spring door stop is struck, the piezo under it
///   rings, and the ringing drives a cursor around a ring of lights until it
///   slows down and lands on a win or lose space
/// * one cooperative control loop; no threads, no timers. everything that
///   happens "every so often" is an elapsed-time comparison against a stored
///   timestamp, so ticks can be called as fast as the loop spins
/// * abstract the hardware so a variety of rings, sensors and speakers would
///   work; starting with a terminal ring, a keyboard-struck spring and the PC
///   speaker
/// * all tuning is a fixed set of constants in one `Config`
///
/// NB. "speed" is really an interval: seconds between cursor steps. bigger is
/// slower, so decelerating multiplies it by a factor > 1 and the cursor counts
/// as stopped once it grows past `min_speed`
///
/// Model
///
/// Game
///  |-- config, peripherals(clock, sensor, ring, sound)
///  |-- wheel           -- which ring cells are win cells
///  |-- animator        -- cursor index/speed, time-gated stepping & flashing
///  |-- win counter     -- win spaces left; reaching the minimum wins the game
///  `-- main loop
///       |-- ReadInput:  start sound; flash cursor until the sensor trips;
///       |               pick a read window from how hard it tripped
///       |-- WheelSpin:  spin at full speed for the window; strong readings
///       |               stretch the window
///       `-- WindDown:   slow the cursor down; once stopped, present the
///                       result, re-place the wheel at the cursor, go again
pub mod animator;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod presenter;
pub mod ring;
pub mod sensor;
pub mod sound;
pub mod wheel;
