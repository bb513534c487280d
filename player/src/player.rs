//! The tone player.

use std::sync::Mutex;
use std::time::Duration;

use tracing::warn;

use shadowsong_melody::{Melody, Note};

use crate::output::{DeviceOutput, OutputHandle};

enum Output {
    Device(DeviceOutput),
    /// No usable device; notes keep their timing but render nothing.
    Silent,
}

/// Plays notes on the host output device.
///
/// The output handle is created lazily on the first [`play_note`] and torn
/// down by [`stop`]; a stopped player reopens the device on the next note.
/// When no device can be opened the player degrades to a silent output and
/// keeps the wall-clock timing contract.
///
/// The player does no queuing of its own. Awaiting each `play_note` gives
/// sequential playback; firing several without awaiting overlays them.
///
/// [`play_note`]: TonePlayer::play_note
/// [`stop`]: TonePlayer::stop
pub struct TonePlayer {
    output: Mutex<Option<Output>>,
    force_silent: bool,
}

impl TonePlayer {
    /// Creates a player with no output handle; the device opens on the
    /// first note.
    pub fn new() -> Self {
        Self {
            output: Mutex::new(None),
            force_silent: false,
        }
    }

    /// Creates a player that never opens a device. Notes take their usual
    /// wall-clock time but render nothing.
    pub fn silent() -> Self {
        Self {
            output: Mutex::new(None),
            force_silent: true,
        }
    }

    /// Plays one note and returns after its duration has elapsed.
    ///
    /// Completion is time-based: the future resolves `note.duration()`
    /// seconds after the voice is scheduled, whether or not the device has
    /// finished rendering it.
    pub async fn play_note(&self, note: &Note) {
        if let Some(handle) = self.ensure_output() {
            if let Err(err) = handle.resume().await {
                warn!(error = %err, "could not resume output stream");
            }
            handle.spawn_voice(note.frequency(), note.duration());
        }
        tokio::time::sleep(Duration::from_secs_f64(note.duration())).await;
    }

    /// Plays a melody one note at a time, awaiting each note.
    pub async fn play_melody(&self, melody: &Melody) {
        for note in melody {
            self.play_note(note).await;
        }
    }

    /// Stops all playback immediately and releases the output handle.
    ///
    /// Idempotent; calling it with no handle is a no-op. The next
    /// `play_note` reopens the device.
    pub fn stop(&self) {
        // Dropping a device output joins its thread and kills the stream.
        *self.lock_output() = None;
    }

    /// Returns true while an output handle exists.
    pub fn is_active(&self) -> bool {
        self.lock_output().is_some()
    }

    fn ensure_output(&self) -> Option<OutputHandle> {
        let mut output = self.lock_output();
        if output.is_none() {
            *output = Some(self.open_output());
        }
        match output.as_ref() {
            Some(Output::Device(device)) => Some(device.handle()),
            _ => None,
        }
    }

    fn open_output(&self) -> Output {
        if self.force_silent {
            return Output::Silent;
        }
        match DeviceOutput::open() {
            Ok(device) => Output::Device(device),
            Err(err) => {
                warn!(error = %err, "no audio output, playing silently");
                Output::Silent
            }
        }
    }

    fn lock_output(&self) -> std::sync::MutexGuard<'_, Option<Output>> {
        self.output
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for TonePlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadowsong_melody::ScaleDegree;
    use tokio::time::Instant;

    #[test]
    fn test_stop_is_idempotent_without_handle() {
        let player = TonePlayer::new();
        assert!(!player.is_active());
        player.stop();
        player.stop();
        assert!(!player.is_active());
    }

    #[tokio::test]
    async fn test_lifecycle_lazy_open_stop_reopen() {
        let player = TonePlayer::silent();
        assert!(!player.is_active());

        player.play_note(&Note::new(ScaleDegree::Do, 0.01)).await;
        assert!(player.is_active());

        player.stop();
        assert!(!player.is_active());
        player.stop();
        assert!(!player.is_active());

        player.play_note(&Note::new(ScaleDegree::Re, 0.01)).await;
        assert!(player.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_note_takes_at_least_duration() {
        let player = TonePlayer::silent();
        let note = Note::new(ScaleDegree::Sol, 0.5);

        let started = Instant::now();
        player.play_note(&note).await;
        assert!(started.elapsed() >= Duration::from_secs_f64(0.5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_melody_is_sequential() {
        let player = TonePlayer::silent();
        let melody = Melody::new(vec![
            Note::new(ScaleDegree::Do, 0.3),
            Note::new(ScaleDegree::Mi, 0.2),
            Note::new(ScaleDegree::Sol, 0.1),
        ]);

        let started = Instant::now();
        player.play_melody(&melody).await;
        assert!(started.elapsed() >= Duration::from_secs_f64(0.6));
    }
}
