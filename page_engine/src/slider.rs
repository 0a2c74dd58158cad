// Carousel state machine: current slide, pause flag, progress toward auto-advance.
// Rule: at most one tick timer per slider. Manual navigation cancels and reschedules it;
// auto-advance keeps the running timer and only resets progress.

use tracing::debug;

use crate::error::EngineError;
use crate::host::SliderHost;
use crate::types::{Millis, SliderConfig};

/// Which path caused a slide change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Button, indicator, or API call. Restarts the timer.
    Manual,
    /// Progress reached the slide duration. Keeps the timer.
    Auto,
}

/// One carousel instance driving its host.
pub struct SliderEngine<H: SliderHost> {
    host: H,
    config: SliderConfig,
    slide_count: usize,
    current: usize,
    elapsed: Millis,
    paused: bool,
    timer: Option<H::Timer>,
}

impl<H: SliderHost> SliderEngine<H> {
    /// Build an engine over `slide_count` slides. Returns `Ok(None)` for an empty carousel,
    /// which leaves the container inert.
    pub fn new(
        host: H,
        config: SliderConfig,
        slide_count: usize,
    ) -> Result<Option<Self>, EngineError> {
        config.validate()?;
        if slide_count == 0 {
            debug!("slider has no slides; staying inert");
            return Ok(None);
        }

        let mut engine = SliderEngine {
            host,
            paused: !config.auto_play,
            config,
            slide_count,
            current: 0,
            elapsed: Millis::zero(),
            timer: None,
        };

        engine.render_slide();
        engine.host.set_paused_indicator(engine.paused);
        if engine.config.auto_play {
            engine.restart_timer();
        }
        Ok(Some(engine))
    }

    pub fn next(&mut self) {
        self.step_forward(Advance::Manual);
    }

    pub fn prev(&mut self) {
        self.current = (self.current + self.slide_count - 1) % self.slide_count;
        self.on_slide_changed(Advance::Manual);
    }

    /// Jump straight to `index`. Indices outside `0..slide_count` are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index >= self.slide_count {
            debug!(index, slide_count = self.slide_count, "go_to out of range; ignored");
            return;
        }
        self.current = index;
        self.on_slide_changed(Advance::Manual);
    }

    /// Flip the pause flag. Progress is kept and a running timer is left alone.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        self.host.set_paused_indicator(self.paused);
        debug!(paused = self.paused, "pause toggled");

        if !self.paused && self.timer.is_none() && self.config.start_on_resume {
            self.restart_timer();
        }
    }

    /// One timer firing.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }

        self.elapsed = self.elapsed.saturating_add(self.config.tick_interval());
        self.host.set_progress(self.progress_percent());

        if self.elapsed >= self.config.slide_duration() {
            self.step_forward(Advance::Auto);
        }
    }

    /// Cancel the active timer, if any, and schedule a fresh one.
    ///
    /// A paused slider without autoplay keeps whatever timer it has; it starts
    /// ticking once the user resumes it.
    pub fn restart_timer(&mut self) {
        if !self.config.auto_play && self.paused {
            return;
        }
        if let Some(timer) = self.timer.take() {
            self.host.cancel_ticks(timer);
        }
        self.timer = Some(self.host.start_ticks(self.config.tick_interval()));
        debug!(interval_ms = self.config.tick_interval_ms, "tick timer restarted");
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn elapsed(&self) -> Millis {
        self.elapsed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn has_active_timer(&self) -> bool {
        self.timer.is_some()
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// `elapsed / slide_duration * 100`.
    pub fn progress_percent(&self) -> f64 {
        self.elapsed.as_millis() as f64 / self.config.slide_duration_ms as f64 * 100.0
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn step_forward(&mut self, advance: Advance) {
        self.current = (self.current + 1) % self.slide_count;
        self.on_slide_changed(advance);
    }

    fn on_slide_changed(&mut self, advance: Advance) {
        debug!(index = self.current, ?advance, "slide changed");
        self.render_slide();
        if advance == Advance::Manual {
            self.restart_timer();
        }
    }

    fn render_slide(&mut self) {
        self.elapsed = Millis::zero();
        self.host.show_slide(self.current, self.slide_count);
        self.host.set_progress(0.0);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records everything the engine asks of its host.
    #[derive(Debug, Default)]
    pub struct RecordingSliderHost {
        pub next_timer_id: u32,
        pub active_timers: Vec<u32>,
        pub timers_started: usize,
        pub timers_cancelled: usize,
        pub shown: Vec<usize>,
        pub progress: Vec<f64>,
        pub paused_indicator: Option<bool>,
    }

    impl SliderHost for RecordingSliderHost {
        type Timer = u32;

        fn start_ticks(&mut self, _interval: Millis) -> u32 {
            self.next_timer_id += 1;
            self.timers_started += 1;
            self.active_timers.push(self.next_timer_id);
            self.next_timer_id
        }

        fn cancel_ticks(&mut self, timer: u32) {
            self.timers_cancelled += 1;
            self.active_timers.retain(|&id| id != timer);
        }

        fn show_slide(&mut self, index: usize, _slide_count: usize) {
            self.shown.push(index);
        }

        fn set_progress(&mut self, percent: f64) {
            self.progress.push(percent);
        }

        fn set_paused_indicator(&mut self, paused: bool) {
            self.paused_indicator = Some(paused);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingSliderHost;
    use super::*;
    use proptest::prelude::*;

    fn engine(slide_count: usize) -> SliderEngine<RecordingSliderHost> {
        SliderEngine::new(
            RecordingSliderHost::default(),
            SliderConfig::default(),
            slide_count,
        )
        .unwrap()
        .unwrap()
    }

    fn manual_engine(slide_count: usize) -> SliderEngine<RecordingSliderHost> {
        let config = SliderConfig {
            auto_play: false,
            ..SliderConfig::default()
        };
        SliderEngine::new(RecordingSliderHost::default(), config, slide_count)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn empty_slider_is_inert() {
        assert!(SliderEngine::new(RecordingSliderHost::default(), SliderConfig::default(), 0)
            .unwrap()
            .is_none());
    }

    #[test]
    fn zero_slide_duration_is_rejected() {
        let config = SliderConfig {
            slide_duration_ms: 0,
            ..SliderConfig::default()
        };
        let err = SliderEngine::new(RecordingSliderHost::default(), config, 3).err();
        assert!(matches!(err, Some(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let config = SliderConfig {
            tick_interval_ms: 0,
            ..SliderConfig::default()
        };
        let err = SliderEngine::new(RecordingSliderHost::default(), config, 3).err();
        assert!(matches!(err, Some(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn invalid_config_is_rejected_even_without_slides() {
        let config = SliderConfig {
            slide_duration_ms: 0,
            ..SliderConfig::default()
        };
        assert!(SliderEngine::new(RecordingSliderHost::default(), config, 0).is_err());
    }

    #[test]
    fn autoplay_starts_one_timer_at_mount() {
        let engine = engine(3);
        assert_eq!(engine.current_index(), 0);
        assert!(!engine.is_paused());
        assert_eq!(engine.host().active_timers.len(), 1);
        assert_eq!(engine.host().shown, vec![0]);
        assert_eq!(engine.host().paused_indicator, Some(false));
    }

    #[test]
    fn manual_navigation_restarts_the_timer() {
        let mut engine = engine(3);
        engine.next();
        engine.prev();
        engine.go_to(2);

        let host = engine.host();
        assert_eq!(host.timers_started, 4);
        assert_eq!(host.timers_cancelled, 3);
        assert_eq!(host.active_timers.len(), 1);
    }

    #[test]
    fn auto_advance_keeps_the_timer() {
        let mut engine = engine(3);
        for _ in 0..100 {
            engine.tick();
        }
        assert_eq!(engine.current_index(), 1);
        assert_eq!(engine.host().timers_started, 1);
        assert_eq!(engine.host().timers_cancelled, 0);
    }

    #[test]
    fn hundred_ticks_advance_exactly_once() {
        let mut engine = engine(3);
        for _ in 0..99 {
            engine.tick();
        }
        assert_eq!(engine.current_index(), 0);
        assert!((engine.progress_percent() - 99.0).abs() < 1e-9);
        assert!((engine.host().progress.last().unwrap() - 99.0).abs() < 1e-9);

        engine.tick();
        assert_eq!(engine.current_index(), 1);
        assert_eq!(engine.elapsed(), Millis::zero());
        assert_eq!(engine.host().progress.last(), Some(&0.0));
    }

    #[test]
    fn go_to_resets_progress() {
        let mut engine = engine(3);
        for _ in 0..10 {
            engine.tick();
        }
        engine.go_to(2);
        assert_eq!(engine.current_index(), 2);
        assert_eq!(engine.progress_percent(), 0.0);
    }

    #[test]
    fn go_to_out_of_range_is_ignored() {
        let mut engine = engine(3);
        engine.go_to(3);
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.host().timers_started, 1);
    }

    #[test]
    fn paused_slider_does_not_accumulate() {
        let mut engine = engine(3);
        engine.tick();
        engine.toggle_pause();
        for _ in 0..200 {
            engine.tick();
        }
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.elapsed(), Millis::from_millis(50));
    }

    #[test]
    fn navigation_while_paused_resets_progress_and_stays_paused() {
        let mut engine = engine(3);
        engine.tick();
        engine.toggle_pause();
        engine.next();
        assert!(engine.is_paused());
        assert_eq!(engine.elapsed(), Millis::zero());
        assert_eq!(engine.current_index(), 1);
    }

    #[test]
    fn without_autoplay_starts_paused_and_idle() {
        let engine = manual_engine(2);
        assert!(engine.is_paused());
        assert!(!engine.has_active_timer());
        assert_eq!(engine.host().paused_indicator, Some(true));
    }

    #[test]
    fn without_autoplay_navigation_does_not_start_ticking() {
        let mut engine = manual_engine(2);
        engine.next();
        assert_eq!(engine.current_index(), 1);
        assert!(!engine.has_active_timer());
    }

    #[test]
    fn resume_starts_ticking_when_enabled() {
        let mut engine = manual_engine(2);
        engine.toggle_pause();
        assert!(!engine.is_paused());
        assert!(engine.has_active_timer());
        assert_eq!(engine.host().timers_started, 1);

        // A second resume never stacks timers.
        engine.toggle_pause();
        engine.toggle_pause();
        assert_eq!(engine.host().active_timers.len(), 1);
    }

    #[test]
    fn resume_waits_for_navigation_when_disabled() {
        let config = SliderConfig {
            auto_play: false,
            start_on_resume: false,
            ..SliderConfig::default()
        };
        let mut engine = SliderEngine::new(RecordingSliderHost::default(), config, 2)
            .unwrap()
            .unwrap();
        engine.toggle_pause();
        assert!(!engine.has_active_timer());

        engine.next();
        assert!(engine.has_active_timer());
    }

    #[test]
    fn single_slide_wraps_to_itself() {
        let mut engine = engine(1);
        engine.next();
        assert_eq!(engine.current_index(), 0);
        engine.prev();
        assert_eq!(engine.current_index(), 0);
    }

    mod property_tests {
        use super::*;

        #[derive(Debug, Clone)]
        enum Op {
            Next,
            Prev,
            GoTo(usize),
            Toggle,
            Tick,
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                Just(Op::Next),
                Just(Op::Prev),
                (0usize..16).prop_map(Op::GoTo),
                Just(Op::Toggle),
                Just(Op::Tick),
            ]
        }

        fn apply(engine: &mut SliderEngine<RecordingSliderHost>, op: &Op) {
            match op {
                Op::Next => engine.next(),
                Op::Prev => engine.prev(),
                Op::GoTo(i) => engine.go_to(*i),
                Op::Toggle => engine.toggle_pause(),
                Op::Tick => engine.tick(),
            }
        }

        proptest! {
            #[test]
            fn index_stays_in_range(
                slide_count in 1usize..10,
                ops in prop::collection::vec(op_strategy(), 0..200),
            ) {
                let mut engine = engine(slide_count);
                for op in &ops {
                    apply(&mut engine, op);
                    prop_assert!(engine.current_index() < slide_count);
                    prop_assert!(engine.host().active_timers.len() <= 1);
                }
            }

            #[test]
            fn next_then_prev_is_identity(
                slide_count in 1usize..10,
                start in 0usize..10,
                forward_first in any::<bool>(),
            ) {
                let mut engine = engine(slide_count);
                engine.go_to(start % slide_count);
                let before = engine.current_index();
                if forward_first {
                    engine.next();
                    engine.prev();
                } else {
                    engine.prev();
                    engine.next();
                }
                prop_assert_eq!(engine.current_index(), before);
                prop_assert_eq!(engine.elapsed(), Millis::zero());
            }

            #[test]
            fn double_toggle_keeps_state_and_progress(ticks in 0usize..99) {
                let mut engine = engine(3);
                for _ in 0..ticks {
                    engine.tick();
                }
                let paused = engine.is_paused();
                let elapsed = engine.elapsed();
                engine.toggle_pause();
                engine.toggle_pause();
                prop_assert_eq!(engine.is_paused(), paused);
                prop_assert_eq!(engine.elapsed(), elapsed);
            }

            #[test]
            fn one_step_per_threshold_crossing(
                slide_count in 2usize..8,
                duration_ticks in 1u32..40,
                ticks in 0u32..400,
            ) {
                let config = SliderConfig {
                    slide_duration_ms: duration_ticks * 50,
                    ..SliderConfig::default()
                };
                let mut engine = SliderEngine::new(RecordingSliderHost::default(), config, slide_count)
                    .unwrap()
                    .unwrap();
                for _ in 0..ticks {
                    engine.tick();
                    prop_assert!(engine.elapsed() < engine.config().slide_duration());
                }
                let crossings = (ticks / duration_ticks) as usize;
                prop_assert_eq!(engine.current_index(), crossings % slide_count);
            }
        }
    }
}
