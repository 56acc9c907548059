//! Effect driver systems.
//!
//! [`drive_effects`] is the external clock of the active visual effect: it
//! forwards the frame delta while the effect runs and requests the stop
//! transition once the configured duration has elapsed. The effect itself
//! never reads time and never stops itself.

use bevy_ecs::prelude::*;
use log::info;

use crate::effects::ActiveEffect;
use crate::events::effect::EffectMessage;
use crate::resources::worldtime::WorldTime;

/// Advance the active effect with the frame delta; stop it at full
/// progress and announce the transition.
pub fn drive_effects(
    mut active: ResMut<ActiveEffect>,
    time: Res<WorldTime>,
    mut writer: MessageWriter<EffectMessage>,
) {
    let Some(effect) = active.0.as_mut() else {
        return;
    };
    if !effect.is_running() {
        return;
    }
    effect.advance(time.delta);
    if effect.progress() >= 1.0 {
        effect.stop();
        writer.write(EffectMessage::Finished);
    }
}

/// Advance the ECS message queue for [`EffectMessage`].
///
/// `Messages` requires an `update()` once per frame so newly written
/// messages become readable. Run this after [`drive_effects`].
pub fn update_effect_messages(mut messages: ResMut<Messages<EffectMessage>>) {
    messages.update();
}

/// Log effect lifecycle transitions.
pub fn log_effect_messages(mut reader: MessageReader<EffectMessage>) {
    for message in reader.read() {
        match message {
            EffectMessage::Started => info!("effect started"),
            EffectMessage::Finished => info!("effect finished"),
        }
    }
}
