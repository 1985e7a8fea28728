//! Integration tests for the leaf animator driving a recording servo bus.

use crate::mock_hw::{Journal, MockHardware};

use std::f32::consts::TAU;

use sculpture::animation::{LeafAnimator, ServoCalibration};
use sculpture::config::{LeafConfig, SculptureConfig};
use sculpture::movement::{MovementState, parameters_for};

fn two_leaves() -> [LeafConfig; 2] {
    [
        LeafConfig {
            channel: 4,
            min_angle: 45.0,
            max_angle: 135.0,
            speed: 0.001,
            phase_offset: 0.0,
        },
        LeafConfig {
            channel: 5,
            min_angle: 60.0,
            max_angle: 120.0,
            speed: 0.0015,
            phase_offset: 0.3,
        },
    ]
}

fn calibration() -> ServoCalibration {
    ServoCalibration::from_config(&SculptureConfig::default())
}

#[test]
fn each_leaf_accumulates_its_own_phase() {
    let journal = Journal::default();
    let mut servos = MockHardware::new(journal.clone());
    let leaves = two_leaves();
    let mut animator = LeafAnimator::new(leaves, calibration());

    // Replayed accumulator: same f32 arithmetic, same single wrap.
    let mut replay = leaves.map(|l| l.phase_offset);

    for state in [MovementState::Idle, MovementState::ReactingNegative] {
        let params = parameters_for(state);
        for _ in 0..2000 {
            animator.step(&params, &mut servos);
            for (phase, leaf) in replay.iter_mut().zip(&leaves) {
                *phase += leaf.speed * params.speed_factor;
                if *phase >= TAU {
                    *phase -= TAU;
                }
            }
        }

        for i in 0..leaves.len() {
            let got = animator.phases()[i];
            assert!(
                (got - replay[i]).abs() < 1e-6,
                "{state:?} leaf {i}: phase {got}, replayed {}",
                replay[i]
            );
        }
    }
}

#[test]
fn speed_switch_keeps_phase_continuous() {
    let journal = Journal::default();
    let mut servos = MockHardware::new(journal.clone());
    let mut animator = LeafAnimator::new(two_leaves(), calibration());

    for _ in 0..100 {
        animator.step(&parameters_for(MovementState::Idle), &mut servos);
    }
    let before = animator.phases();
    animator.step(&parameters_for(MovementState::ReactingPositive), &mut servos);
    let after = animator.phases();

    // Only the increment changes; the phase itself never jumps.
    let leaves = two_leaves();
    for i in 0..2 {
        let step = after[i] - before[i];
        assert!((step - leaves[i].speed * 2.0).abs() < 1e-6);
    }
}
