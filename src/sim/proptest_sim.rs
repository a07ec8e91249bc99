//! Property-based tests for the simulation tick using proptest.
//!
//! These tests check the state invariants across random seeds, frame timings
//! and held-key sequences.

use proptest::prelude::*;

use super::autopilot;
use super::collision;
use super::state::GameState;
use super::tick::{TickInput, advance};
use crate::consts::TRAIL_LENGTH;
use crate::test_utils::fixtures;

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(up, down, left, right)| TickInput {
            up,
            down,
            left,
            right,
        },
    )
}

/// Tick once per frame gap, checking invariants after each tick
fn run(seed: u64, gaps: &[f64], inputs: &[TickInput]) -> Result<GameState, TestCaseError> {
    let mut state = GameState::new(fixtures::viewport(), seed).started();
    let mut now = 0.0;
    for (gap, input) in gaps.iter().zip(inputs.iter().cycle()) {
        now += gap;
        let prev = state.clone();
        state = advance(&prev, input, now);

        prop_assert!((0.0..=100.0).contains(&state.sun.health));
        prop_assert!((1.0..=10.0).contains(&state.difficulty));
        prop_assert!(state.difficulty >= prev.difficulty);
        prop_assert!(state.score >= prev.score);
        prop_assert!(state.explosions.iter().all(|e| (0.0..1.0).contains(&e.age)));
        prop_assert!(state.asteroids.iter().all(|a| a.trail.len() <= TRAIL_LENGTH));
        if prev.is_over() {
            prop_assert!(state.is_over());
        }

        let mut ids: Vec<u64> = state.planets.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), state.planets.len());
    }
    Ok(state)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Health, difficulty, explosion age and trail bounds hold on every tick
    #[test]
    fn prop_invariants_hold(
        seed in any::<u64>(),
        gaps in prop::collection::vec(0.0f64..120.0, 1..300),
        inputs in prop::collection::vec(input_strategy(), 1..20),
    ) {
        run(seed, &gaps, &inputs)?;
    }

    /// Score strictly grows with elapsed time while the game is active
    #[test]
    fn prop_score_strictly_increases(
        seed in any::<u64>(),
        gap in 1.0f64..100.0,
    ) {
        let state = fixtures::playing_at(seed, 1000.0);
        let next = advance(&state, &TickInput::default(), 1000.0 + gap);
        prop_assert!(next.score > state.score);
    }

    /// A finished game never changes
    #[test]
    fn prop_game_over_is_frozen(
        seed in any::<u64>(),
        now in 0.0f64..1.0e7,
        input in input_strategy(),
    ) {
        let mut state = fixtures::playing_at(seed, 0.0);
        state.sun.health = 0.0;
        state.phase = super::state::GamePhase::GameOver;
        prop_assert_eq!(advance(&state, &input, now), state);
    }

    /// Overlap depends only on distance versus half the summed sizes
    #[test]
    fn prop_overlap_symmetric(
        ax in -500.0f32..500.0, ay in -500.0f32..500.0,
        bx in -500.0f32..500.0, by in -500.0f32..500.0,
        a_size in 1.0f32..100.0, b_size in 1.0f32..100.0,
    ) {
        let a = glam::Vec2::new(ax, ay);
        let b = glam::Vec2::new(bx, by);
        prop_assert_eq!(
            collision::overlaps(a, a_size, b, b_size),
            collision::overlaps(b, b_size, a, a_size)
        );
    }
}

#[test]
fn trails_stay_bounded_after_many_ticks() {
    let mut state = fixtures::playing_at(2024, 0.0);
    for i in 1..=100 {
        let input = autopilot::steer(&state);
        state = advance(&state, &input, f64::from(i) * 100.0);
    }
    assert!(state.asteroids.iter().all(|a| a.trail.len() <= TRAIL_LENGTH));
}
