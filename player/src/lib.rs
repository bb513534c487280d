//! Tone playback for shadowsong melodies.
//!
//! [`TonePlayer`] renders notes on the host's default output device through
//! cpal. Each note is a pure sine voice shaped by a short attack/hold/release
//! envelope so playback starts and ends without clicks; voices mix, so notes
//! fired without awaiting overlap. `play_note` resolves on a wall-clock
//! timer — never on a device callback — and `stop` hard-aborts everything
//! in flight.
//!
//! Hosts without a usable output device get a silent player with the same
//! timing behavior.

pub mod envelope;
pub mod mixer;
pub mod output;
pub mod player;

pub use envelope::{Envelope, ATTACK_SECS, PEAK_LEVEL, RELEASE_SECS};
pub use mixer::Mixer;
pub use output::{DeviceOutput, OutputError, OutputHandle};
pub use player::TonePlayer;
