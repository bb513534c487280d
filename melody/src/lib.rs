//! Note model for the shadowsong toy.
//!
//! A melody is an ordered, bounded sequence of notes; each note is a scale
//! degree (Do through Ti) resolved to a fixed frequency, plus a duration in
//! seconds. The model is deliberately small: everything a provider hands us
//! is funneled through [`ScaleDegree::from_label`] and [`Note::new`], so a
//! note's frequency is always a table value and never free-form.

pub mod note;
pub mod scale;

pub use note::{
    default_melody, Melody, Note, DEFAULT_MELODY_DEGREES, DEFAULT_NOTE_DURATION, MAX_NOTES,
};
pub use scale::ScaleDegree;
