use crate::clock::Clock;
use crate::config::{LOSE_ROUND_CLIP, START_ROUND_CLIP, WIN_GAME_CLIP, WIN_ROUND_CLIP};
use beep::beep;
use std::error::Error;

/// a clip that has been started on a Sound, and when (in game clock seconds)
#[derive(Debug)]
pub struct ClipHandle {
    name: &'static str,
    started: f64,
}

impl ClipHandle {
    pub fn new(name: &'static str, started: f64) -> Self {
        ClipHandle { name, started }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// seconds since the clip started, by the same clock
    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.started
    }
}

/// Plays named clips through an output stage (an amplifier, on the board)
/// that has to be switched on first. Nothing here blocks; callers poll
/// `is_playing`. Times come from the game's `Clock`.
pub trait Sound {
    fn enable_audio_stage(&mut self, on: bool) -> Result<(), Box<dyn Error>>;
    fn play_clip(&mut self, name: &'static str, now: f64) -> Result<ClipHandle, Box<dyn Error>>;
    fn is_playing(&mut self, clip: &ClipHandle, now: f64) -> Result<bool, Box<dyn Error>>;
    fn release_clip(&mut self, clip: ClipHandle) -> Result<(), Box<dyn Error>>;
}

/// The audio stage switched on for as long as this lives. Dropping it releases
/// whatever clip it started and switches the stage back off, however the
/// scope is left, so the amplifier can't be left on between presentations.
pub struct AudioStage<'a> {
    sound: &'a mut dyn Sound,
    clip: Option<ClipHandle>,
}

impl<'a> AudioStage<'a> {
    pub fn enable(sound: &'a mut dyn Sound) -> Result<Self, Box<dyn Error>> {
        sound.enable_audio_stage(true)?;
        Ok(AudioStage { sound, clip: None })
    }

    /// start a clip, stopping any clip this stage was already playing
    pub fn play(
        &mut self,
        name: &'static str,
        clock: &mut dyn Clock,
    ) -> Result<(), Box<dyn Error>> {
        if let Some(clip) = self.clip.take() {
            self.sound.release_clip(clip)?;
        }
        self.clip = Some(self.sound.play_clip(name, clock.now())?);
        Ok(())
    }

    /// Let the clip move on without waiting for it. Anything that blocks
    /// while a clip plays has to call this between waits, or a player that
    /// steps its clip when polled stalls on the note it was left on.
    pub fn poll(&mut self, clock: &mut dyn Clock) -> Result<bool, Box<dyn Error>> {
        match &self.clip {
            Some(clip) => self.sound.is_playing(clip, clock.now()),
            None => Ok(false),
        }
    }

    /// spin until the clip started by `play` has finished
    pub fn wait(&mut self, clock: &mut dyn Clock) -> Result<(), Box<dyn Error>> {
        while self.poll(clock)? {}
        Ok(())
    }
}

impl<'a> Drop for AudioStage<'a> {
    fn drop(&mut self) {
        if let Some(clip) = self.clip.take() {
            if let Err(e) = self.sound.release_clip(clip) {
                log::warn!("couldn't release clip: {}", e);
            }
        }
        if let Err(e) = self.sound.enable_audio_stage(false) {
            log::warn!("couldn't switch the audio stage off: {}", e);
        }
    }
}

/// a clip as played on the PC speaker: (pitch in Hz, seconds); pitch 0 rests
type Melody = &'static [(u16, f64)];

const START_ROUND_MELODY: Melody = &[(523, 0.15), (659, 0.15), (784, 0.3)];
const WIN_ROUND_MELODY: Melody = &[(784, 0.1), (0, 0.05), (1047, 0.35)];
const LOSE_ROUND_MELODY: Melody = &[(392, 0.4), (370, 0.4), (349, 0.4), (330, 0.9)];
const WIN_GAME_MELODY: Melody = &[
    (523, 0.15),
    (523, 0.15),
    (523, 0.15),
    (659, 0.45),
    (0, 0.1),
    (587, 0.15),
    (659, 0.15),
    (784, 0.9),
];

fn melody(name: &str) -> Option<Melody> {
    match name {
        START_ROUND_CLIP => Some(START_ROUND_MELODY),
        WIN_ROUND_CLIP => Some(WIN_ROUND_MELODY),
        LOSE_ROUND_CLIP => Some(LOSE_ROUND_MELODY),
        WIN_GAME_CLIP => Some(WIN_GAME_MELODY),
        _ => None,
    }
}

/// which note of `tune` is sounding `t` seconds in, if it hasn't finished
fn note_at(tune: Melody, t: f64) -> Option<u16> {
    let mut end = 0.0;
    for (pitch, secs) in tune {
        end += secs;
        if t < end {
            return Some(*pitch);
        }
    }
    None
}

/// sets the pitch a speaker holds, in Hz; 0 is silence
pub type Speaker = Box<dyn FnMut(u16) -> Result<(), Box<dyn Error>>>;

/// Clips rendered as tunes on the PC speaker. The speaker only holds one
/// pitch, so the tune is stepped along whenever it is polled.
pub struct SimpleBeep {
    speaker: Speaker,
    stage_on: bool,
    pitch: u16,
}

impl SimpleBeep {
    /// fails if the speaker can't be driven (it usually needs access to the
    /// console)
    pub fn new() -> Result<Self, Box<dyn Error>> {
        beep(0)?;
        Ok(SimpleBeep::with_speaker(Box::new(|pitch: u16| -> Result<(), Box<dyn Error>> {
            beep(pitch)?;
            Ok(())
        })))
    }

    /// play tunes on something other than the PC speaker
    pub fn with_speaker(speaker: Speaker) -> Self {
        SimpleBeep {
            speaker,
            stage_on: false,
            pitch: 0,
        }
    }

    fn set_pitch(&mut self, pitch: u16) -> Result<(), Box<dyn Error>> {
        let pitch = if self.stage_on { pitch } else { 0 };
        if pitch != self.pitch {
            (self.speaker)(pitch)?;
            self.pitch = pitch;
        }
        Ok(())
    }
}

impl Sound for SimpleBeep {
    fn enable_audio_stage(&mut self, on: bool) -> Result<(), Box<dyn Error>> {
        self.stage_on = on;
        if !on {
            self.set_pitch(0)?;
        }
        Ok(())
    }

    fn play_clip(&mut self, name: &'static str, now: f64) -> Result<ClipHandle, Box<dyn Error>> {
        let tune = melody(name).ok_or_else(|| format!("no such clip: {}", name))?;
        self.set_pitch(tune[0].0)?;
        Ok(ClipHandle::new(name, now))
    }

    fn is_playing(&mut self, clip: &ClipHandle, now: f64) -> Result<bool, Box<dyn Error>> {
        let tune = melody(clip.name).ok_or_else(|| format!("no such clip: {}", clip.name))?;
        match note_at(tune, clip.elapsed(now)) {
            Some(pitch) => {
                self.set_pitch(pitch)?;
                Ok(true)
            }
            None => {
                self.set_pitch(0)?;
                Ok(false)
            }
        }
    }

    fn release_clip(&mut self, _clip: ClipHandle) -> Result<(), Box<dyn Error>> {
        self.set_pitch(0)
    }
}

/// plays nothing; every clip has already finished
pub struct Mute {}

impl Mute {
    pub fn new() -> Self {
        Mute {}
    }
}

impl Default for Mute {
    fn default() -> Self {
        Self::new()
    }
}

impl Sound for Mute {
    fn enable_audio_stage(&mut self, _on: bool) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    fn play_clip(&mut self, name: &'static str, now: f64) -> Result<ClipHandle, Box<dyn Error>> {
        Ok(ClipHandle::new(name, now))
    }

    fn is_playing(&mut self, _clip: &ClipHandle, _now: f64) -> Result<bool, Box<dyn Error>> {
        Ok(false)
    }

    fn release_clip(&mut self, _clip: ClipHandle) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

/// dummy Sound implementation for testing; records every call, and each clip
/// reports playing for a set number of polls
pub struct DummySound {
    calls: Vec<String>,
    polls_per_clip: usize,
    polled: usize,
    polls: usize,
    fail_polls: bool,
}

impl DummySound {
    pub fn new(polls_per_clip: usize) -> Self {
        DummySound {
            calls: Vec::new(),
            polls_per_clip,
            polled: 0,
            polls: 0,
            fail_polls: false,
        }
    }

    /// a player whose playback polling always errors
    pub fn failing() -> Self {
        DummySound {
            fail_polls: true,
            ..DummySound::new(0)
        }
    }

    /// "stage true", "play <clip>", "release <clip>", "stage false", in order
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// how many times is_playing was asked, over all clips
    pub fn polls(&self) -> usize {
        self.polls
    }

    /// names of the clips played, in order
    pub fn played(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| c.strip_prefix("play "))
            .collect()
    }

    /// is the audio stage on right now
    pub fn stage_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| c.strip_prefix("stage "))
            .map_or(false, |on| on == "true")
    }
}

impl Sound for DummySound {
    fn enable_audio_stage(&mut self, on: bool) -> Result<(), Box<dyn Error>> {
        self.calls.push(format!("stage {}", on));
        Ok(())
    }

    fn play_clip(&mut self, name: &'static str, now: f64) -> Result<ClipHandle, Box<dyn Error>> {
        self.calls.push(format!("play {}", name));
        self.polled = 0;
        Ok(ClipHandle::new(name, now))
    }

    fn is_playing(&mut self, _clip: &ClipHandle, _now: f64) -> Result<bool, Box<dyn Error>> {
        if self.fail_polls {
            return Err("speaker fell off".into());
        }
        self.polls += 1;
        self.polled += 1;
        Ok(self.polled <= self.polls_per_clip)
    }

    fn release_clip(&mut self, clip: ClipHandle) -> Result<(), Box<dyn Error>> {
        self.calls.push(format!("release {}", clip.name()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::Config;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// a SimpleBeep whose speaker writes down every pitch it's given
    fn recorded_beep() -> (SimpleBeep, Rc<RefCell<Vec<u16>>>) {
        let pitches = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&pitches);
        let speaker: Speaker = Box::new(move |pitch: u16| -> Result<(), Box<dyn Error>> {
            log.borrow_mut().push(pitch);
            Ok(())
        });
        (SimpleBeep::with_speaker(speaker), pitches)
    }

    #[test]
    fn test_stage_brackets_playback() -> Result<(), Box<dyn Error>> {
        let mut rec = DummySound::new(3);
        let mut clock = ManualClock::new(0.0);
        {
            let mut stage = AudioStage::enable(&mut rec)?;
            stage.play("a", &mut clock)?;
            stage.wait(&mut clock)?;
        }
        assert_eq!(rec.polls(), 4);
        assert_eq!(rec.calls(), ["stage true", "play a", "release a", "stage false"]);
        Ok(())
    }

    #[test]
    fn test_stage_switched_off_when_polling_fails() {
        let mut rec = DummySound::failing();
        let mut clock = ManualClock::new(0.0);
        let result = (|| -> Result<(), Box<dyn Error>> {
            let mut stage = AudioStage::enable(&mut rec)?;
            stage.play("a", &mut clock)?;
            stage.wait(&mut clock)
        })();
        assert!(result.is_err());
        assert_eq!(rec.calls().last().map(String::as_str), Some("stage false"));
        assert!(rec.calls().iter().any(|c| c == "release a"));
    }

    #[test]
    fn test_replaying_releases_previous_clip() -> Result<(), Box<dyn Error>> {
        let mut rec = DummySound::new(0);
        let mut clock = ManualClock::new(0.0);
        {
            let mut stage = AudioStage::enable(&mut rec)?;
            stage.play("a", &mut clock)?;
            stage.play("b", &mut clock)?;
        }
        assert_eq!(
            rec.calls(),
            ["stage true", "play a", "release a", "play b", "release b", "stage false"]
        );
        Ok(())
    }

    #[test]
    fn test_every_configured_clip_has_a_melody() {
        let c = Config::default();
        for name in [
            c.start_round_clip,
            c.win_round_clip,
            c.lose_round_clip,
            c.win_game_clip,
        ] {
            assert!(melody(name).is_some(), "{} has no melody", name);
        }
        assert!(melody("nope.wav").is_none());
    }

    #[test]
    fn test_note_at_walks_the_melody() {
        let tune = melody(WIN_ROUND_CLIP).unwrap();
        assert_eq!(note_at(tune, 0.0), Some(784));
        assert_eq!(note_at(tune, 0.12), Some(0));
        assert_eq!(note_at(tune, 0.2), Some(1047));
        assert_eq!(note_at(tune, 0.6), None);
    }

    #[test]
    fn test_poll_without_a_clip() -> Result<(), Box<dyn Error>> {
        let mut rec = DummySound::new(3);
        let mut clock = ManualClock::new(0.0);
        let mut stage = AudioStage::enable(&mut rec)?;
        assert!(!stage.poll(&mut clock)?);
        drop(stage);
        assert_eq!(rec.polls(), 0);
        Ok(())
    }

    #[test]
    fn test_beep_follows_the_game_clock() -> Result<(), Box<dyn Error>> {
        let (mut speaker, pitches) = recorded_beep();
        let mut clock = ManualClock::new(0.0);
        clock.advance(100.0);
        {
            let mut stage = AudioStage::enable(&mut speaker)?;
            stage.play(WIN_ROUND_CLIP, &mut clock)?;
            assert!(stage.poll(&mut clock)?);
            clock.advance(0.12);
            assert!(stage.poll(&mut clock)?);
            clock.advance(0.08);
            assert!(stage.poll(&mut clock)?);
            clock.advance(0.4);
            assert!(!stage.poll(&mut clock)?);
        }
        // the rest is a pitch of 0, the same as silence
        assert_eq!(*pitches.borrow(), [784, 0, 1047, 0]);
        Ok(())
    }

    #[test]
    fn test_beep_silent_with_stage_off() -> Result<(), Box<dyn Error>> {
        let (mut speaker, pitches) = recorded_beep();
        let clip = speaker.play_clip(LOSE_ROUND_CLIP, 0.0)?;
        assert!(speaker.is_playing(&clip, 0.5)?);
        speaker.release_clip(clip)?;
        assert!(pitches.borrow().is_empty());
        Ok(())
    }

    #[test]
    fn test_beep_rejects_unknown_clip() {
        let (mut speaker, _) = recorded_beep();
        assert!(speaker.play_clip("nope.wav", 0.0).is_err());
    }

    #[test]
    fn test_mute_finishes_immediately() -> Result<(), Box<dyn Error>> {
        let mut m = Mute::new();
        let clip = m.play_clip(WIN_ROUND_CLIP, 0.0)?;
        assert!(!m.is_playing(&clip, 0.0)?);
        m.release_clip(clip)
    }
}
