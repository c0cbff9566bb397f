//! Encounter core: the player / star / bomb / score state machine.
//!
//! ```text
//!            overlap(player, star)                   restart()
//!          ┌───────────────────────┐          ┌──────────────────────┐
//!          ▼                       │          ▼                      │
//!     ┌─────────┐ collision(player, bomb) ┌──────────┐               │
//!     │ Playing │ ──────────────────────▶ │ GameOver │ ──────────────┘
//!     └─────────┘                         └──────────┘
//! ```
//!
//! [`EncounterController`] owns the session's [`ScoreTracker`],
//! [`CollectibleField`] and [`HazardSet`]. The ECS glue in
//! [`crate::gameplay`] feeds it physics notifications and applies the returned
//! outcomes to entities; the controller never touches the world itself.
//!
//! State changes are queued as [`EncounterEvent`]s and forwarded to Bevy
//! messages once per frame, which is how the HUD and the game-over overlay
//! learn about them.
//!
//! Contract violations (unknown star slot, collecting an inactive star,
//! entering `GameOver` twice) panic.

use crate::collectible::CollectibleField;
use crate::config::GameConfig;
use crate::hazard::{HazardPlacement, HazardSet};
use crate::player::{Facing, PlayerIntent};
use crate::score::ScoreTracker;
use crate::spawn::SpawnPolicy;
use bevy::prelude::*;
use rand::Rng;

/// The two phases of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EncounterPhase {
    #[default]
    Playing,
    /// Terminal until [`EncounterController::restart`].
    GameOver,
}

/// Observable state changes, in the order they happened.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterEvent {
    ScoreChanged { score: u64 },
    /// Fired exactly once per session.
    GameOver { final_score: u64 },
    Restarted { session: u32 },
}

/// Everything the glue must apply after a star is collected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectOutcome {
    pub slot: usize,
    pub score: u64,
    /// The field ran dry and every star was reactivated.
    pub field_reset: bool,
    pub hazard: HazardPlacement,
}

/// Player motion for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerMotion {
    /// World-space horizontal velocity.
    pub velocity_x: f32,
    /// Upward launch speed when a jump starts this frame.
    pub jump_velocity: Option<f32>,
    pub facing: Facing,
}

/// Session defaults, captured once so a restart rebuilds the same session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub star_count: usize,
    pub star_spacing: f32,
    pub star_start: Vec2,
    pub star_bounce_min: f32,
    pub star_bounce_max: f32,
    pub points_per_star: u32,
    pub max_hazards: usize,
    pub player_speed: f32,
    pub player_jump_speed: f32,
    pub spawn: SpawnPolicy,
}

impl SessionSettings {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            star_count: config.star_count,
            star_spacing: config.star_spacing,
            star_start: Vec2::new(config.star_start_x, config.star_start_y),
            star_bounce_min: config.star_bounce_min,
            star_bounce_max: config.star_bounce_max,
            points_per_star: config.points_per_star,
            max_hazards: config.max_hazards,
            player_speed: config.player_speed,
            player_jump_speed: config.player_jump_speed,
            spawn: SpawnPolicy::from_config(config),
        }
    }

    fn new_field<R: Rng>(&self, rng: &mut R) -> CollectibleField {
        CollectibleField::initialize(
            self.star_count,
            self.star_spacing,
            self.star_start.x,
            self.star_start.y,
            self.star_bounce_min..=self.star_bounce_max,
            rng,
        )
    }
}

#[derive(Resource, Debug)]
pub struct EncounterController {
    phase: EncounterPhase,
    settings: SessionSettings,
    score: ScoreTracker,
    field: CollectibleField,
    hazards: HazardSet,
    session: u32,
    events: Vec<EncounterEvent>,
}

impl EncounterController {
    /// Start the first session.
    pub fn new<R: Rng>(settings: SessionSettings, rng: &mut R) -> Self {
        Self {
            phase: EncounterPhase::Playing,
            score: ScoreTracker::default(),
            field: settings.new_field(rng),
            hazards: HazardSet::new(settings.max_hazards),
            session: 1,
            events: Vec::new(),
            settings,
        }
    }

    pub fn from_config<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        Self::new(SessionSettings::from_config(config), rng)
    }

    // ── Hooks ─────────────────────────────────────────────────────────────────

    /// The player touched a bomb.
    ///
    /// Returns `true` when this call ended the session. Later calls in the
    /// same session are ignored.
    pub fn on_player_hazard_collision(&mut self) -> bool {
        if self.phase == EncounterPhase::GameOver {
            return false;
        }
        self.enter_game_over();
        true
    }

    /// The player overlapped the star in `slot` while standing at arena x
    /// `player_x`.
    ///
    /// Returns `None` once the session is over.
    ///
    /// # Panics
    /// If `slot` is not an active star of the field.
    pub fn on_player_collectible_overlap<R: Rng>(
        &mut self,
        slot: usize,
        player_x: f32,
        rng: &mut R,
    ) -> Option<CollectOutcome> {
        if self.phase == EncounterPhase::GameOver {
            return None;
        }

        self.field.deactivate(slot);
        self.score.add(self.settings.points_per_star);
        let score = self.score.current_score();
        self.events.push(EncounterEvent::ScoreChanged { score });

        let field_reset = self.field.is_exhausted();
        if field_reset {
            self.field.reset_all();
        }

        let hazard = self.settings.spawn.spawn_hazard(player_x, rng);
        let placement = self.hazards.insert(hazard);

        Some(CollectOutcome {
            slot,
            score,
            field_reset,
            hazard: placement,
        })
    }

    /// Per-frame movement for the player, or `None` once the session is over.
    pub fn on_frame_update(&self, intent: &PlayerIntent, grounded: bool) -> Option<PlayerMotion> {
        if self.phase == EncounterPhase::GameOver {
            return None;
        }

        let axis = intent.horizontal.clamp(-1.0, 1.0);
        let facing = if axis < 0.0 {
            Facing::Left
        } else if axis > 0.0 {
            Facing::Right
        } else {
            Facing::Front
        };
        let jump_velocity = (intent.jump && grounded).then_some(self.settings.player_jump_speed);

        Some(PlayerMotion {
            velocity_x: axis * self.settings.player_speed,
            jump_velocity,
            facing,
        })
    }

    /// Throw away the finished session and start a fresh one.
    ///
    /// Only acts in `GameOver`; returns `false` (and changes nothing) while a
    /// session is still being played, so repeated restart triggers restart
    /// exactly once.
    pub fn restart<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.phase != EncounterPhase::GameOver {
            return false;
        }

        self.phase = EncounterPhase::Playing;
        self.score = ScoreTracker::default();
        self.field = self.settings.new_field(rng);
        self.hazards = HazardSet::new(self.settings.max_hazards);
        self.session += 1;
        self.events.push(EncounterEvent::Restarted {
            session: self.session,
        });
        true
    }

    fn enter_game_over(&mut self) {
        assert_eq!(
            self.phase,
            EncounterPhase::Playing,
            "game over entered twice in session {}",
            self.session
        );
        self.phase = EncounterPhase::GameOver;
        self.events.push(EncounterEvent::GameOver {
            final_score: self.score.current_score(),
        });
    }

    // ── Events ────────────────────────────────────────────────────────────────

    #[inline]
    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<EncounterEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn phase(&self) -> EncounterPhase {
        self.phase
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == EncounterPhase::Playing
    }

    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    pub fn field(&self) -> &CollectibleField {
        &self.field
    }

    pub fn hazards(&self) -> &HazardSet {
        &self.hazards
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// 1 for the first session, incremented by every restart.
    #[inline]
    pub fn session(&self) -> u32 {
        self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn controller() -> (EncounterController, StdRng) {
        let mut rng = StdRng::seed_from_u64(21);
        let controller = EncounterController::from_config(&GameConfig::default(), &mut rng);
        (controller, rng)
    }

    #[test]
    fn collecting_a_star_scores_and_spawns_a_bomb() {
        let (mut controller, mut rng) = controller();
        let outcome = controller
            .on_player_collectible_overlap(4, 100.0, &mut rng)
            .unwrap();

        assert_eq!(outcome.score, 10);
        assert!(!outcome.field_reset);
        assert!(!outcome.hazard.recycled);
        assert!(outcome.hazard.hazard.position.x >= 400.0);
        assert_eq!(controller.field().count_active(), 11);
        assert!(!controller.field().is_active(4));
        assert_eq!(controller.hazards().len(), 1);
        assert_eq!(
            controller.drain_events(),
            vec![EncounterEvent::ScoreChanged { score: 10 }]
        );
    }

    #[test]
    fn game_over_is_entered_once() {
        let (mut controller, _) = controller();
        assert!(controller.on_player_hazard_collision());
        assert!(!controller.on_player_hazard_collision());
        assert_eq!(controller.phase(), EncounterPhase::GameOver);
        assert_eq!(
            controller.drain_events(),
            vec![EncounterEvent::GameOver { final_score: 0 }]
        );
    }

    #[test]
    fn frame_update_maps_intent_to_motion() {
        let (controller, _) = controller();
        let motion = controller
            .on_frame_update(
                &PlayerIntent {
                    horizontal: -1.0,
                    jump: true,
                },
                true,
            )
            .unwrap();
        assert_eq!(motion.velocity_x, -160.0);
        assert_eq!(motion.jump_velocity, Some(330.0));
        assert_eq!(motion.facing, Facing::Left);

        let idle = controller
            .on_frame_update(&PlayerIntent::default(), false)
            .unwrap();
        assert_eq!(idle.velocity_x, 0.0);
        assert_eq!(idle.jump_velocity, None);
        assert_eq!(idle.facing, Facing::Front);
    }

    #[test]
    fn frame_update_is_suppressed_after_game_over() {
        let (mut controller, _) = controller();
        controller.on_player_hazard_collision();
        assert!(controller
            .on_frame_update(&PlayerIntent::default(), true)
            .is_none());
    }

    #[test]
    fn restart_is_ignored_while_playing() {
        let (mut controller, mut rng) = controller();
        controller.on_player_collectible_overlap(0, 100.0, &mut rng);
        assert!(!controller.restart(&mut rng));
        assert_eq!(controller.session(), 1);
        assert_eq!(controller.score().current_score(), 10);
    }

    #[test]
    fn hazards_are_recycled_at_the_cap() {
        let config = GameConfig {
            max_hazards: 2,
            ..GameConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(2);
        let mut controller = EncounterController::from_config(&config, &mut rng);
        for slot in 0..3 {
            controller.on_player_collectible_overlap(slot, 700.0, &mut rng);
        }
        assert_eq!(controller.hazards().len(), 2);
        assert!(controller.hazards().iter().all(|h| h.position.x <= 400.0));
    }

    #[test]
    #[should_panic(expected = "deactivated twice")]
    fn collecting_the_same_star_twice_panics() {
        let (mut controller, mut rng) = controller();
        controller.on_player_collectible_overlap(1, 100.0, &mut rng);
        controller.on_player_collectible_overlap(1, 100.0, &mut rng);
    }
}
