//! Messages exchanged between systems.
//!
//! - [`effect`] – visual effect lifecycle notifications
pub mod effect;
