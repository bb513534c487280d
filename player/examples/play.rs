//! Plays the fallback melody on the default output device.
//!
//! Run with:
//! ```bash
//! cargo run --example play
//! ```

use shadowsong_melody::default_melody;
use shadowsong_player::TonePlayer;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let melody = default_melody();
    println!(
        "Playing {} notes ({:.1}s)...",
        melody.len(),
        melody.total_duration()
    );

    let player = TonePlayer::new();
    for note in &melody {
        println!(
            "  {} ({} Hz, {:.2}s)",
            note.degree().name(),
            note.frequency(),
            note.duration()
        );
        player.play_note(note).await;
    }
    player.stop();
}
