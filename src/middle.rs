// The middle layer owns everything stateful about the plaid: the rng, the
// current pattern, the beat clock. The TUI only renders `display_state()` and
// the canvas; the audio side only ever sees the commands returned from here.
// Everything runs on the main loop, so regenerating can never race a tick.

use std::time::{Duration, Instant};

use crate::audio_api::AudioCommand;
use crate::pipeline::info;
use crate::pipeline::pattern::{self, Pattern};
use crate::pipeline::player::AudioPlayer;
use crate::pipeline::scheduler::BeatScheduler;
use crate::shared::{DisplayState, InputEvent, NUM_SAMPLES};

pub struct Middle {
    rng: fastrand::Rng,
    pattern: Pattern,
    scheduler: BeatScheduler,
    player: AudioPlayer,
    redraw_requested: bool,
    display: DisplayState,
}

impl Middle {
    // Builds the first pattern straight away, so there is always a current one.
    pub fn new(rng: fastrand::Rng, loaded_samples: [bool; NUM_SAMPLES], now: Instant) -> Self {
        let mut middle = Self {
            rng,
            pattern: Pattern {
                background: Default::default(),
                bpm: pattern::MIN_BPM,
                horizontal: Vec::new(),
                vertical: Vec::new(),
            },
            scheduler: BeatScheduler::default(),
            player: AudioPlayer::new(loaded_samples),
            redraw_requested: false,
            display: DisplayState {
                loaded_samples,
                ..Default::default()
            },
        };
        middle.generate(now);
        middle
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn current_beat(&self) -> u8 {
        self.scheduler.current_beat()
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &BeatScheduler {
        &self.scheduler
    }

    pub fn display_state(&self) -> &DisplayState {
        &self.display
    }

    // Returns true when the app should quit.
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> bool {
        match event {
            InputEvent::Generate => {
                self.generate(now);
                false
            }
            InputEvent::Quit => true,
        }
    }

    // Stop the clock, swap the pattern in, rewind, restart at the new tempo.
    pub fn generate(&mut self, now: Instant) {
        self.scheduler.stop();
        self.pattern = pattern::generate(&mut self.rng);
        self.scheduler.reset_beat();
        self.scheduler.configure(self.pattern.bpm, now);

        log::info!(
            "new plaid: {} bpm, {} horizontal / {} vertical line types",
            self.pattern.bpm,
            self.pattern.horizontal.len(),
            self.pattern.vertical.len()
        );
        self.display.info_text = info::describe(&self.pattern);
        self.display.bpm = self.pattern.bpm;
        self.sync_beat();
    }

    // Fires at most one beat per call.
    pub fn tick(&mut self, now: Instant) -> Vec<AudioCommand> {
        let Some(beat) = self.scheduler.poll(now) else {
            return Vec::new();
        };
        self.sync_beat();
        self.player.play_beat(&self.pattern, beat)
    }

    // Clears the pending flag; any number of requests since the last paint collapse into one.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    // Upper bound on how long the main loop may block waiting for input.
    pub fn next_deadline(&self, now: Instant, frame: Duration) -> Duration {
        self.scheduler
            .time_until_due(now)
            .map_or(frame, |due| due.min(frame))
    }

    fn sync_beat(&mut self) {
        self.display.current_beat = self.scheduler.current_beat();
        self.redraw_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::pattern::tempo_for;
    use crate::pipeline::scheduler::period_for;

    fn middle(seed: u64, t0: Instant) -> Middle {
        Middle::new(fastrand::Rng::with_seed(seed), [true; NUM_SAMPLES], t0)
    }

    #[test]
    fn starts_with_a_pattern_and_a_running_clock() {
        let t0 = Instant::now();
        let mut m = middle(1, t0);
        assert_eq!(m.pattern().bpm, tempo_for(m.pattern().background));
        assert_eq!(m.scheduler().period(), Some(period_for(m.pattern().bpm)));
        assert_eq!(m.current_beat(), 0);
        assert!(m.display_state().info_text.starts_with("bpm: "));
        assert!(m.take_redraw());
        assert!(!m.take_redraw());
    }

    #[test]
    fn tick_plays_the_lines_for_the_new_beat() {
        let t0 = Instant::now();
        let mut m = middle(5, t0);
        m.take_redraw();
        let period = m.scheduler().period().unwrap();

        assert!(m.tick(t0).is_empty());
        assert!(!m.take_redraw());

        let cmds = m.tick(t0 + period);
        assert_eq!(m.current_beat(), 1);
        assert_eq!(m.display_state().current_beat, 1);
        let expected = m.pattern().all_lines().filter(|l| l.triggers_on(1)).count();
        assert_eq!(cmds.len(), expected);
        assert!(m.take_redraw());
    }

    #[test]
    fn regenerating_rewinds_and_retempos() {
        let t0 = Instant::now();
        let mut m = middle(9, t0);
        let period = m.scheduler().period().unwrap();
        m.tick(t0 + period);
        m.tick(t0 + period * 2);
        assert_eq!(m.current_beat(), 2);

        let first = m.pattern().clone();
        let t1 = t0 + period * 2;
        assert!(!m.handle_input(InputEvent::Generate, t1));
        assert_ne!(m.pattern(), &first);
        assert_eq!(m.current_beat(), 0);
        assert_eq!(m.scheduler().period(), Some(period_for(m.pattern().bpm)));
        assert_eq!(m.display_state().info_text, info::describe(m.pattern()));

        // the new clock counts from the regeneration, not from the old deadline
        let new_period = m.scheduler().period().unwrap();
        assert!(m.tick(t1 + new_period - Duration::from_millis(1)).is_empty());
        m.tick(t1 + new_period);
        assert_eq!(m.current_beat(), 1);
    }

    #[test]
    fn quit_is_reported() {
        let mut m = middle(2, Instant::now());
        assert!(m.handle_input(InputEvent::Quit, Instant::now()));
    }

    #[test]
    fn deadline_never_exceeds_frame() {
        let t0 = Instant::now();
        let m = middle(3, t0);
        let frame = Duration::from_millis(16);
        assert_eq!(m.next_deadline(t0, frame), frame);
        let period = m.scheduler().period().unwrap();
        let almost = t0 + period - Duration::from_millis(4);
        assert_eq!(m.next_deadline(almost, frame), Duration::from_millis(4));
    }

    #[test]
    fn beat_cycles_every_eight_ticks() {
        let t0 = Instant::now();
        let mut m = middle(4, t0);
        let period = m.scheduler().period().unwrap();
        for i in 1..=8u32 {
            m.tick(t0 + period * i);
        }
        assert_eq!(m.current_beat(), 0);
    }

    #[test]
    fn unloaded_samples_never_reach_the_engine() {
        let t0 = Instant::now();
        let mut m = Middle::new(fastrand::Rng::with_seed(11), [false; NUM_SAMPLES], t0);
        let period = m.scheduler().period().unwrap();
        for i in 1..=8u32 {
            assert!(m.tick(t0 + period * i).is_empty());
        }
    }
}
