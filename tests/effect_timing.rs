//! Integration tests for the visual effect engine: state machine
//! progression under the ECS driver, geometry, and color interpolation.

use bevy_ecs::prelude::*;

use spritestage::effects::stripesfadeout::{
    lerp_color, FadeoutType, Orientation, StripesFadeout,
};
use spritestage::effects::{ActiveEffect, EffectPhase, VisualEffect};
use spritestage::events::effect::EffectMessage;
use spritestage::resources::screensize::ScreenSize;
use spritestage::resources::worldtime::WorldTime;
use spritestage::systems::effects::drive_effects;
use spritestage::systems::time::update_world_time;

use raylib::prelude::Color;

const SCREEN: ScreenSize = ScreenSize { w: 800, h: 600 };

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.init_resource::<Messages<EffectMessage>>();
    world
}

fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
}

#[test]
fn driver_runs_the_effect_to_completion() {
    let mut world = make_world();
    let mut fadeout = StripesFadeout::new(FadeoutType::Contra, Orientation::Vertical, 1000.0, 60.0)
        .with_stripes(4);
    fadeout.start(SCREEN);
    world.insert_resource(ActiveEffect(Some(Box::new(fadeout))));

    let mut schedule = Schedule::default();
    schedule.add_systems(drive_effects);

    tick(&mut world, &mut schedule, 0.4);
    {
        let active = world.resource::<ActiveEffect>();
        let effect = active.0.as_ref().unwrap();
        assert!(effect.is_running());
        assert!((effect.progress() - 0.4).abs() < 1e-6);
    }

    tick(&mut world, &mut schedule, 0.4);
    tick(&mut world, &mut schedule, 0.4);

    let active = world.resource::<ActiveEffect>();
    let effect = active.0.as_ref().unwrap();
    assert_eq!(effect.phase(), EffectPhase::Idle);

    let finished: Vec<EffectMessage> = world
        .resource_mut::<Messages<EffectMessage>>()
        .drain()
        .collect();
    assert_eq!(finished, vec![EffectMessage::Finished]);
}

#[test]
fn driver_ignores_an_empty_slot() {
    let mut world = make_world();
    world.init_resource::<ActiveEffect>();

    let mut schedule = Schedule::default();
    schedule.add_systems(drive_effects);
    tick(&mut world, &mut schedule, 0.5);

    assert!(world.resource::<ActiveEffect>().0.is_none());
    assert_eq!(
        world
            .resource_mut::<Messages<EffectMessage>>()
            .drain()
            .count(),
        0
    );
}

#[test]
fn effect_can_be_restarted_after_the_driver_stops_it() {
    let mut world = make_world();
    let mut fadeout =
        StripesFadeout::new(FadeoutType::Random, Orientation::Vertical, 500.0, 60.0)
            .with_stripes(3)
            .with_seed(11);
    fadeout.start(SCREEN);
    world.insert_resource(ActiveEffect(Some(Box::new(fadeout))));

    let mut schedule = Schedule::default();
    schedule.add_systems(drive_effects);
    tick(&mut world, &mut schedule, 1.0);

    let mut active = world.resource_mut::<ActiveEffect>();
    let effect = active.0.as_mut().unwrap();
    assert_eq!(effect.phase(), EffectPhase::Idle);

    effect.start(SCREEN);
    assert!(effect.is_running());
    assert_eq!(effect.progress(), 0.0);
}

#[test]
fn evenly_spaced_split_points_over_the_oriented_measure() {
    // Vertical bands split the 800 px width.
    let mut fadeout =
        StripesFadeout::new(FadeoutType::Contra, Orientation::Vertical, 1000.0, 60.0)
            .with_stripes(4);
    fadeout.start(SCREEN);
    assert_eq!(fadeout.split_points(), &[200, 400, 600]);

    // Horizontal bands split the 600 px height.
    let mut fadeout =
        StripesFadeout::new(FadeoutType::CloseCenter, Orientation::Horizontal, 1000.0, 60.0)
            .with_stripes(4);
    fadeout.start(SCREEN);
    assert_eq!(fadeout.split_points(), &[150, 300, 450]);
}

#[test]
fn one_stripe_spans_the_whole_measure() {
    let mut fadeout =
        StripesFadeout::new(FadeoutType::Contra, Orientation::Vertical, 1000.0, 60.0);
    fadeout.start(SCREEN);
    assert!(fadeout.split_points().is_empty());
    assert_eq!(fadeout.current_rects().len(), 1);
}

#[test]
fn color_interpolation_hits_both_endpoints() {
    let initial = Color::new(0, 0, 0, 0);
    let terminal = Color::new(255, 128, 64, 255);
    let mut fadeout =
        StripesFadeout::new(FadeoutType::Contra, Orientation::Vertical, 1000.0, 60.0)
            .with_colors(initial, terminal);
    fadeout.start(SCREEN);

    let at_start = fadeout.current_color();
    assert_eq!((at_start.r, at_start.a), (0, 0));

    fadeout.advance(2.0);
    let at_end = fadeout.current_color();
    assert_eq!(
        (at_end.r, at_end.g, at_end.b, at_end.a),
        (terminal.r, terminal.g, terminal.b, terminal.a)
    );
}

#[test]
fn interpolation_is_monotonic_between_endpoints() {
    let initial = Color::new(20, 240, 60, 0);
    let terminal = Color::new(200, 10, 60, 255);
    let mut previous = lerp_color(initial, terminal, 0.0);
    for step in 1..=20 {
        let current = lerp_color(initial, terminal, step as f32 / 20.0);
        assert!(current.r >= previous.r);
        assert!(current.g <= previous.g);
        assert_eq!(current.b, 60);
        assert!(current.a >= previous.a);
        previous = current;
    }
}

#[test]
fn defaults_are_transparent_to_black_single_stripe() {
    let fadeout = StripesFadeout::new(FadeoutType::Contra, Orientation::Vertical, 1000.0, 60.0);
    assert_eq!(fadeout.stripe_count(), 1);
    let initial = fadeout.color_initial();
    let terminal = fadeout.color_final();
    assert_eq!((initial.r, initial.g, initial.b, initial.a), (0, 0, 0, 0));
    assert_eq!((terminal.r, terminal.g, terminal.b, terminal.a), (0, 0, 0, 255));
}
