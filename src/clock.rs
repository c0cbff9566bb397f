//! Elapsed play time shown in the HUD and on the game-over card.

use crate::constants::CLOCK_TICK_SECS;
use crate::encounter::EncounterEvent;
use bevy::prelude::*;
use std::time::Duration;

/// Whole seconds played in the current session.
///
/// Only ticks while `Playing`, so the clock stops at game over.
#[derive(Resource, Debug, Clone)]
pub struct PlayClock {
    timer: Timer,
    elapsed_secs: u64,
}

impl Default for PlayClock {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(CLOCK_TICK_SECS, TimerMode::Repeating),
            elapsed_secs: 0,
        }
    }
}

impl PlayClock {
    /// Advance by `delta`. Returns `true` when at least one whole second passed.
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.timer.tick(delta);
        let ticks = self.timer.times_finished_this_tick();
        self.elapsed_secs += u64::from(ticks);
        ticks > 0
    }

    #[inline]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// `HH:MM:SS`. Hours keep counting past 99.
pub fn format_clock(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Tick the clock, flagging the resource as changed only when the displayed
/// second changes.
pub fn tick_play_clock(time: Res<Time>, mut clock: ResMut<PlayClock>) {
    if clock.bypass_change_detection().advance(time.delta()) {
        clock.set_changed();
    }
}

pub fn reset_clock_on_restart(
    mut events: MessageReader<EncounterEvent>,
    mut clock: ResMut<PlayClock>,
) {
    if events
        .read()
        .any(|event| matches!(event, EncounterEvent::Restarted { .. }))
    {
        clock.reset();
    }
}
