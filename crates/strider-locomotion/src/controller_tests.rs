//! Whole-pipeline tests: a controller, an input frame, and a plain
//! [`Transform`] driven together tick by tick.

use glam::Vec3;
use strider_config::{ForwardUpdate, LocomotionConfig, Plane, TechniqueKind, TriggerConfig};
use strider_input::{
    Button, Control, Hand, InputFrame, RawButtonEvent, TrackedObject, TrackedPose,
};

use crate::{
    ActorTransform, DirectionStrategy, EulerAngles, LocomotionController, LocomotionError,
    OrientationMode, Technique, TickOutcome, Transform, TriggerStrategy, VelocityModel,
};

const DT: f32 = 0.1;
const PAD_UP: Control = Control::new(Hand::Right, Button::PadUp);
const PAD_DOWN: Control = Control::new(Hand::Right, Button::PadDown);

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

fn armed(kind: TechniqueKind, actor: &Transform, frame: &InputFrame) -> LocomotionController {
    LocomotionController::new(Technique::preset(kind).unwrap(), actor, frame)
}

fn hands(frame: &mut InputFrame, left: Vec3, right: Vec3) {
    frame.set_pose(TrackedObject::LeftHand, TrackedPose::at(left));
    frame.set_pose(TrackedObject::RightHand, TrackedPose::at(right));
}

/// Runs one tick and closes the frame the way a host would.
fn tick(
    controller: &mut LocomotionController,
    frame: &mut InputFrame,
    actor: &mut Transform,
) -> TickOutcome {
    let outcome = controller.on_tick(frame, actor, DT);
    frame.end_frame();
    outcome
}

#[test]
fn test_walk_moves_forward_while_trigger_held() {
    let mut frame = InputFrame::new();
    let mut actor = Transform::default();
    let mut controller = armed(TechniqueKind::Walk, &actor, &frame);

    assert!(!tick(&mut controller, &mut frame, &mut actor).moving);
    assert_eq!(actor.position, Vec3::ZERO);

    frame.push_button(RawButtonEvent::pressed(Control::RIGHT_TRIGGER));
    let outcome = tick(&mut controller, &mut frame, &mut actor);
    assert!(outcome.moving);
    let expected = Vec3::NEG_Z * (5.0 / 3.6) * DT;
    assert!(approx(outcome.displacement, expected));
    assert!(approx(actor.position, expected));

    tick(&mut controller, &mut frame, &mut actor);
    assert!(approx(actor.position, expected * 2.0));

    frame.push_button(RawButtonEvent::released(Control::RIGHT_TRIGGER));
    assert!(!tick(&mut controller, &mut frame, &mut actor).moving);
    assert!(approx(actor.position, expected * 2.0));
}

#[test]
fn test_walk_follows_actor_turning() {
    let mut frame = InputFrame::new();
    let mut actor = Transform::default();
    let mut controller = armed(TechniqueKind::Walk, &actor, &frame);
    frame.push_button(RawButtonEvent::pressed(Control::RIGHT_TRIGGER));

    actor.set_orientation(EulerAngles::from_yaw(90.0));
    let outcome = tick(&mut controller, &mut frame, &mut actor);
    assert!(approx(outcome.displacement.normalize(), Vec3::NEG_X));
    assert!(approx(controller.state().direction, Vec3::NEG_X));
}

#[test]
fn test_init_only_direction_ignores_later_turns() {
    let mut config = LocomotionConfig::preset(TechniqueKind::Walk);
    config.direction = strider_config::DirectionConfig::ForwardVector {
        update: ForwardUpdate::InitOnly,
    };
    let mut frame = InputFrame::new();
    let mut actor = Transform::default();
    let mut controller = LocomotionController::from_config(&config, &actor, &frame).unwrap();

    actor.set_orientation(EulerAngles::from_yaw(90.0));
    frame.push_button(RawButtonEvent::pressed(Control::RIGHT_TRIGGER));
    let outcome = tick(&mut controller, &mut frame, &mut actor);
    assert!(approx(outcome.displacement.normalize(), Vec3::NEG_Z));
}

#[test]
fn test_speed_ramp_controls_change_displacement() {
    let mut frame = InputFrame::new();
    let mut actor = Transform::default();
    let mut controller = armed(TechniqueKind::Walk, &actor, &frame);

    // Held for three ticks, but only the press edge counts.
    frame.push_button(RawButtonEvent::pressed(PAD_UP));
    for _ in 0..3 {
        tick(&mut controller, &mut frame, &mut actor);
    }
    frame.push_button(RawButtonEvent::released(PAD_UP));
    tick(&mut controller, &mut frame, &mut actor);
    assert!((controller.velocity().value() - 5.2).abs() < 1e-5);
    assert!((controller.state().speed - 5.2 / 3.6).abs() < 1e-5);

    frame.push_button(RawButtonEvent::pressed(PAD_DOWN));
    tick(&mut controller, &mut frame, &mut actor);
    assert!((controller.velocity().value() - 5.0).abs() < 1e-5);
}

#[test]
fn test_speed_change_applies_on_same_tick() {
    let mut frame = InputFrame::new();
    let mut actor = Transform::default();
    let mut controller = armed(TechniqueKind::Walk, &actor, &frame);

    frame.push_button(RawButtonEvent::pressed(Control::RIGHT_TRIGGER));
    frame.push_button(RawButtonEvent::pressed(PAD_UP));
    let outcome = tick(&mut controller, &mut frame, &mut actor);
    assert!((outcome.displacement.length() - 5.2 / 3.6 * DT).abs() < 1e-5);
}

#[test]
fn test_walk_steady_toggles_across_ticks() {
    let mut frame = InputFrame::new();
    let mut actor = Transform::default();
    let mut controller = armed(TechniqueKind::WalkSteady, &actor, &frame);

    let mut observed = Vec::new();
    for n in 1..=8 {
        match n {
            2 | 6 => frame.push_button(RawButtonEvent::pressed(Control::RIGHT_TRIGGER)),
            3 | 7 => frame.push_button(RawButtonEvent::released(Control::RIGHT_TRIGGER)),
            _ => {}
        }
        observed.push(tick(&mut controller, &mut frame, &mut actor).moving);
    }
    assert_eq!(observed, [false, false, true, true, true, true, false, false]);
    assert!(approx(actor.position, Vec3::NEG_Z * (5.0 / 3.6) * DT * 4.0));
}

#[test]
fn test_difference_fly_moves_along_hand_vector() {
    let mut frame = InputFrame::new();
    hands(&mut frame, Vec3::ZERO, Vec3::new(0.0, 0.9, -1.2));
    let mut actor = Transform::default();
    let mut controller = armed(TechniqueKind::DifferenceFly, &actor, &frame);

    let outcome = tick(&mut controller, &mut frame, &mut actor);
    assert!(outcome.moving);
    assert!(approx(outcome.displacement.normalize(), Vec3::new(0.0, 0.6, -0.8)));
}

#[test]
fn test_difference_walk_stays_on_ground() {
    let mut frame = InputFrame::new();
    hands(&mut frame, Vec3::ZERO, Vec3::new(0.0, 0.9, -1.2));
    let mut actor = Transform::default();
    let mut controller = armed(TechniqueKind::DifferenceWalk, &actor, &frame);

    let outcome = tick(&mut controller, &mut frame, &mut actor);
    assert!(outcome.moving);
    assert_eq!(outcome.displacement.y, 0.0);
    assert!(approx(outcome.displacement.normalize(), Vec3::NEG_Z));
}

#[test]
fn test_difference_below_threshold_is_still() {
    let mut frame = InputFrame::new();
    hands(&mut frame, Vec3::ZERO, Vec3::new(0.0, 0.0, 0.5));
    let mut actor = Transform::default();
    let mut controller = armed(TechniqueKind::DifferenceFly, &actor, &frame);

    assert!(!tick(&mut controller, &mut frame, &mut actor).moving);

    hands(&mut frame, Vec3::ZERO, Vec3::new(0.0, 0.0, 1.5));
    assert!(tick(&mut controller, &mut frame, &mut actor).moving);
}

#[test]
fn test_degenerate_direction_keeps_previous_and_skips_move() {
    let technique = Technique::new(
        DirectionStrategy::TwoPointDifference {
            start: TrackedObject::LeftHand,
            end: TrackedObject::RightHand,
            plane: Plane::Fly,
        },
        TriggerStrategy::button_held(Control::RIGHT_TRIGGER),
        VelocityModel::new(3.6, 0.1, 0.0, 10.0).unwrap(),
    );
    let mut frame = InputFrame::new();
    hands(&mut frame, Vec3::ZERO, Vec3::X);
    let mut actor = Transform::default();
    let mut controller = LocomotionController::new(technique, &actor, &frame);
    frame.push_button(RawButtonEvent::pressed(Control::RIGHT_TRIGGER));

    hands(&mut frame, Vec3::ONE, Vec3::ONE);
    let outcome = tick(&mut controller, &mut frame, &mut actor);
    assert!(outcome.degenerate_direction);
    assert!(!outcome.moving);
    assert_eq!(actor.position, Vec3::ZERO);
    assert_eq!(controller.state().direction, Vec3::X);

    hands(&mut frame, Vec3::ZERO, Vec3::Z);
    let outcome = tick(&mut controller, &mut frame, &mut actor);
    assert!(outcome.moving);
    assert!(approx(actor.position, Vec3::Z * DT));
}

#[test]
fn test_no_initial_direction_means_no_move() {
    let technique = Technique::new(
        DirectionStrategy::TwoPointDifference {
            start: TrackedObject::LeftHand,
            end: TrackedObject::RightHand,
            plane: Plane::Walk,
        },
        TriggerStrategy::button_held(Control::RIGHT_TRIGGER),
        VelocityModel::new(3.6, 0.1, 0.0, 10.0).unwrap(),
    );
    let mut frame = InputFrame::new();
    let mut actor = Transform::default();
    let mut controller = LocomotionController::new(technique, &actor, &frame);
    assert_eq!(controller.state().direction, Vec3::ZERO);

    frame.push_button(RawButtonEvent::pressed(Control::RIGHT_TRIGGER));
    assert!(!tick(&mut controller, &mut frame, &mut actor).moving);
    assert_eq!(actor.position, Vec3::ZERO);
}

#[test]
fn test_arm_swinging_walks_where_head_looks() {
    let mut frame = InputFrame::new();
    frame.set_pose(
        TrackedObject::Head,
        TrackedPose::new(Vec3::new(0.0, 1.7, 0.0), Vec3::new(1.0, -0.3, 0.0)),
    );
    frame.set_pose(TrackedObject::RightHand, TrackedPose::at(Vec3::new(0.25, 1.2, 1.6)));
    let mut actor = Transform::default();
    let mut controller = armed(TechniqueKind::ArmSwinging, &actor, &frame);

    // Hand still at the primed sample: no swing.
    assert!(!tick(&mut controller, &mut frame, &mut actor).moving);

    frame.set_pose(TrackedObject::RightHand, TrackedPose::at(Vec3::new(0.25, 1.2, 1.5)));
    let outcome = tick(&mut controller, &mut frame, &mut actor);
    assert!(outcome.moving);
    assert!(approx(outcome.displacement.normalize(), Vec3::X));
    assert!((outcome.displacement.length() - 1.0 / 3.6 * DT).abs() < 1e-6);
}

#[test]
fn test_constant_speed_wip_ignores_horizontal_swing() {
    let mut frame = InputFrame::new();
    frame.set_pose(TrackedObject::Head, TrackedPose::new(Vec3::Y, Vec3::NEG_Z));
    frame.set_pose(TrackedObject::RightHand, TrackedPose::at(Vec3::new(0.0, 1.6, 0.0)));
    let mut actor = Transform::default();
    let mut controller = armed(TechniqueKind::ConstantSpeedWalkingInPlace, &actor, &frame);

    frame.set_pose(TrackedObject::RightHand, TrackedPose::at(Vec3::new(0.3, 1.6, -0.3)));
    assert!(!tick(&mut controller, &mut frame, &mut actor).moving);

    frame.set_pose(TrackedObject::RightHand, TrackedPose::at(Vec3::new(0.3, 1.7, -0.3)));
    assert!(tick(&mut controller, &mut frame, &mut actor).moving);
}

#[test]
fn test_non_positive_dt_is_skipped_without_state_change() {
    let mut frame = InputFrame::new();
    let mut actor = Transform::default();
    let mut controller = armed(TechniqueKind::WalkSteady, &actor, &frame);
    let before = *controller.state();

    frame.push_button(RawButtonEvent::pressed(Control::RIGHT_TRIGGER));
    frame.push_button(RawButtonEvent::released(Control::RIGHT_TRIGGER));
    for dt in [0.0, -0.1, f32::NAN] {
        let outcome = controller.on_tick(&frame, &mut actor, dt);
        assert_eq!(outcome.displacement, Vec3::ZERO);
        assert!(!outcome.moving);
    }
    assert_eq!(*controller.state(), before);
    assert_eq!(
        controller.trigger_strategy(),
        &TriggerStrategy::toggle_on_release(Control::RIGHT_TRIGGER)
    );
}

#[test]
fn test_disabled_controller_ignores_ticks() {
    let mut frame = InputFrame::new();
    let mut actor = Transform::default();
    let mut controller = armed(TechniqueKind::Walk, &actor, &frame);
    frame.push_button(RawButtonEvent::pressed(Control::RIGHT_TRIGGER));

    controller.disable();
    assert!(!controller.is_enabled());
    assert!(!tick(&mut controller, &mut frame, &mut actor).moving);
    assert_eq!(actor.position, Vec3::ZERO);

    controller.enable();
    assert!(controller.is_enabled());
    assert!(tick(&mut controller, &mut frame, &mut actor).moving);
}

#[test]
fn test_disable_stops_steady_walk() {
    let mut frame = InputFrame::new();
    let mut actor = Transform::default();
    let mut controller = armed(TechniqueKind::WalkSteady, &actor, &frame);

    frame.push_button(RawButtonEvent::pressed(Control::RIGHT_TRIGGER));
    tick(&mut controller, &mut frame, &mut actor);
    frame.push_button(RawButtonEvent::released(Control::RIGHT_TRIGGER));
    assert!(tick(&mut controller, &mut frame, &mut actor).moving);

    controller.disable();
    controller.enable();
    assert!(!tick(&mut controller, &mut frame, &mut actor).moving);
}

#[test]
#[should_panic(expected = "orientation update is not implemented")]
fn test_update_orientation_panics_when_unsupported() {
    let frame = InputFrame::new();
    let actor = Transform::default();
    let mut controller = armed(TechniqueKind::Walk, &actor, &frame);
    controller.update_orientation(&frame);
}

#[test]
fn test_unsupported_orientation_never_touches_actor() {
    let mut frame = InputFrame::new();
    let mut actor = Transform::new(Vec3::ZERO, EulerAngles::from_yaw(30.0));
    let rotation = actor.rotation;
    let mut controller = armed(TechniqueKind::Walk, &actor, &frame);

    frame.push_button(RawButtonEvent::pressed(Control::RIGHT_TRIGGER));
    assert!(tick(&mut controller, &mut frame, &mut actor).moving);
    assert_eq!(actor.rotation, rotation);
}

#[test]
fn test_fixed_orientation_applied_only_when_moving() {
    let technique = Technique::preset(TechniqueKind::Walk)
        .unwrap()
        .with_orientation(OrientationMode::Fixed(EulerAngles::from_yaw(90.0)));
    let mut frame = InputFrame::new();
    let mut actor = Transform::default();
    let mut controller = LocomotionController::new(technique, &actor, &frame);

    tick(&mut controller, &mut frame, &mut actor);
    assert!(approx(actor.forward(), Vec3::NEG_Z));

    frame.push_button(RawButtonEvent::pressed(Control::RIGHT_TRIGGER));
    tick(&mut controller, &mut frame, &mut actor);
    assert!(approx(actor.forward(), Vec3::NEG_X));
    assert_eq!(controller.update_orientation(&frame), EulerAngles::from_yaw(90.0));
}

#[test]
fn test_follow_yaw_turns_actor_with_head() {
    let technique = Technique::preset(TechniqueKind::Walk)
        .unwrap()
        .with_orientation(OrientationMode::FollowYaw(TrackedObject::Head));
    let mut frame = InputFrame::new();
    frame.set_pose(TrackedObject::Head, TrackedPose::new(Vec3::Y, Vec3::X));
    let mut actor = Transform::default();
    let mut controller = LocomotionController::new(technique, &actor, &frame);
    assert!((controller.state().orientation.yaw() + 90.0).abs() < 1e-4);

    frame.push_button(RawButtonEvent::pressed(Control::RIGHT_TRIGGER));
    tick(&mut controller, &mut frame, &mut actor);
    assert!(approx(actor.forward(), Vec3::X));
}

#[test]
fn test_invalid_config_is_never_armed() {
    let mut config = LocomotionConfig::preset(TechniqueKind::Walk);
    config.trigger = TriggerConfig::ButtonHeld { control: None };
    let result =
        LocomotionController::from_config(&config, &Transform::default(), &InputFrame::new());
    assert!(matches!(result, Err(LocomotionError::MissingAnchor { .. })));

    let mut config = LocomotionConfig::preset(TechniqueKind::Walk);
    config.speed.step_kmh = 0.0;
    let result =
        LocomotionController::from_config(&config, &Transform::default(), &InputFrame::new());
    assert!(matches!(result, Err(LocomotionError::NonPositiveStep(_))));
}

#[test]
fn test_negative_speed_floor_is_never_armed() {
    let mut config = LocomotionConfig::preset(TechniqueKind::Walk);
    config.speed.min_kmh = -5.0;
    config.speed.initial_kmh = -3.6;
    let result =
        LocomotionController::from_config(&config, &Transform::default(), &InputFrame::new());
    assert!(matches!(
        result,
        Err(LocomotionError::NegativeSpeed { min }) if min == -5.0
    ));
}

#[test]
fn test_walk_never_moves_against_forward() {
    let mut frame = InputFrame::new();
    let mut actor = Transform::default();
    let mut controller = armed(TechniqueKind::Walk, &actor, &frame);
    frame.push_button(RawButtonEvent::pressed(Control::RIGHT_TRIGGER));
    // Tap the slow-down pad every tick, well past the floor.
    for _ in 0..60 {
        frame.push_button(RawButtonEvent::pressed(PAD_DOWN));
        tick(&mut controller, &mut frame, &mut actor);
        frame.push_button(RawButtonEvent::released(PAD_DOWN));
        assert!(controller.state().speed >= 0.0);
        assert!(actor.position.z <= 0.0);
    }
    assert_eq!(controller.velocity().value(), 0.0);
}

#[test]
fn test_accessors_reflect_technique() {
    let frame = InputFrame::new();
    let controller = armed(TechniqueKind::DifferenceWalk, &Transform::default(), &frame);
    assert_eq!(controller.label(), "difference-walk");
    assert!(!controller.orientation_mode().is_supported());
    assert_eq!(controller.speed_controls().increase, Some(PAD_UP));
    assert!(matches!(
        controller.direction_strategy(),
        DirectionStrategy::TwoPointDifference {
            plane: Plane::Walk,
            ..
        }
    ));
}
