//! Whole-session scenarios for [`EncounterController`], driven without Bevy.
//!
//! Covered scenarios:
//! 1. Collecting the full field refills it and launches one bomb per star.
//! 2. A bomb hit freezes the session: no scoring, no motion.
//! 3. Restart after game over rebuilds a clean session.
//! 4. Repeated bomb hits report game over exactly once.
//! 5. Bombs always launch on the half of the arena away from the player.

use rand::rngs::StdRng;
use rand::SeedableRng;
use star_catcher::config::GameConfig;
use star_catcher::encounter::{EncounterController, EncounterEvent, EncounterPhase};
use star_catcher::player::PlayerIntent;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn new_session(seed: u64) -> (EncounterController, StdRng) {
    let mut rng = StdRng::seed_from_u64(seed);
    let controller = EncounterController::from_config(&GameConfig::default(), &mut rng);
    (controller, rng)
}

/// Collect every star once, left to right, with the player at `player_x`.
fn collect_all(controller: &mut EncounterController, rng: &mut StdRng, player_x: f32) {
    let pool = controller.field().pool_size();
    for slot in 0..pool {
        controller
            .on_player_collectible_overlap(slot, player_x, rng)
            .expect("session is still playing");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn collecting_every_star_refills_the_field() {
    let (mut controller, mut rng) = new_session(1);
    let pool = controller.field().pool_size();
    assert_eq!(pool, 12);

    for slot in 0..pool - 1 {
        let outcome = controller
            .on_player_collectible_overlap(slot, 100.0, &mut rng)
            .unwrap();
        assert!(!outcome.field_reset);
    }
    let last = controller
        .on_player_collectible_overlap(pool - 1, 100.0, &mut rng)
        .unwrap();

    assert!(last.field_reset);
    assert_eq!(last.score, 120);
    assert_eq!(controller.score().current_score(), 120);
    assert_eq!(controller.score().label(), "Score: 120");
    assert_eq!(controller.field().count_active(), 12);
    assert!(controller.field().iter().all(|(_, star)| star.y == 0.0));
    assert_eq!(controller.hazards().len(), 12);
    assert!(controller
        .hazards()
        .iter()
        .all(|hazard| (400.0..=800.0).contains(&hazard.position.x)));
}

#[test]
fn score_events_track_each_collection() {
    let (mut controller, mut rng) = new_session(2);
    controller.on_player_collectible_overlap(0, 100.0, &mut rng);
    controller.on_player_collectible_overlap(5, 100.0, &mut rng);

    assert_eq!(
        controller.drain_events(),
        vec![
            EncounterEvent::ScoreChanged { score: 10 },
            EncounterEvent::ScoreChanged { score: 20 },
        ]
    );
    assert!(!controller.has_pending_events());
}

#[test]
fn bomb_hit_freezes_the_session() {
    let (mut controller, mut rng) = new_session(3);
    controller.on_player_collectible_overlap(0, 100.0, &mut rng);
    assert!(controller.on_player_hazard_collision());

    assert_eq!(controller.phase(), EncounterPhase::GameOver);
    assert!(controller
        .on_player_collectible_overlap(1, 100.0, &mut rng)
        .is_none());
    assert_eq!(controller.score().current_score(), 10);
    assert_eq!(controller.field().count_active(), 11);
    assert_eq!(controller.hazards().len(), 1);
    assert!(controller
        .on_frame_update(
            &PlayerIntent {
                horizontal: 1.0,
                jump: true
            },
            true
        )
        .is_none());
}

#[test]
fn restart_after_game_over_starts_clean() {
    let (mut controller, mut rng) = new_session(4);
    collect_all(&mut controller, &mut rng, 700.0);
    controller.on_player_collectible_overlap(3, 700.0, &mut rng);
    controller.on_player_hazard_collision();
    controller.drain_events();

    assert!(controller.restart(&mut rng));

    assert!(controller.is_playing());
    assert_eq!(controller.session(), 2);
    assert_eq!(controller.score().current_score(), 0);
    assert_eq!(controller.field().count_active(), controller.field().pool_size());
    assert!(controller.hazards().is_empty());
    assert_eq!(
        controller.drain_events(),
        vec![EncounterEvent::Restarted { session: 2 }]
    );

    // A second trigger for the same restart is a no-op.
    assert!(!controller.restart(&mut rng));
    assert_eq!(controller.session(), 2);
}

#[test]
fn repeated_bomb_hits_end_the_session_once() {
    let (mut controller, _) = new_session(5);
    let ended: Vec<bool> = (0..4).map(|_| controller.on_player_hazard_collision()).collect();
    assert_eq!(ended, vec![true, false, false, false]);

    let game_overs = controller
        .drain_events()
        .into_iter()
        .filter(|event| matches!(event, EncounterEvent::GameOver { .. }))
        .count();
    assert_eq!(game_overs, 1);
}

#[test]
fn bombs_launch_away_from_the_player() {
    let (mut controller, mut rng) = new_session(6);
    let left = controller
        .on_player_collectible_overlap(0, 120.0, &mut rng)
        .unwrap();
    assert!(left.hazard.hazard.position.x >= 400.0);

    // Standing exactly on the midline counts as the right half.
    let middle = controller
        .on_player_collectible_overlap(1, 400.0, &mut rng)
        .unwrap();
    assert!(middle.hazard.hazard.position.x <= 400.0);

    let right = controller
        .on_player_collectible_overlap(2, 650.0, &mut rng)
        .unwrap();
    assert!(right.hazard.hazard.position.x <= 400.0);
    assert_eq!(right.hazard.hazard.position.y, 16.0);
    assert!(right.hazard.hazard.velocity.x.abs() <= 200.0);
    assert_eq!(right.hazard.hazard.velocity.y, 20.0);
}
