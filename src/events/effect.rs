//! Effect lifecycle messages.
//!
//! Written by the effect driver (and by whoever starts an effect) so other
//! systems can react to overlay transitions without polling the effect.

use bevy_ecs::message::Message;

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectMessage {
    Started,
    Finished,
}
