//! The whole toy: silhouette plus melody from one prompt, played aloud.
//!
//! Run with:
//! ```bash
//! export GEMINI_API_KEY="your-api-key"
//! cargo run --example shadowsong -- "a soaring eagle"
//! ```
//!
//! Without a key the provider calls fail and the toy falls back to the
//! default melody and no image — it still plays.

use shadowsong_genai::{generate_melody, generate_silhouette, Config};
use shadowsong_player::TonePlayer;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "a soaring eagle".to_string());

    let generator = Config::from_env().generator();

    match generate_silhouette(generator.as_ref(), &prompt).await {
        Some(reference) if reference.starts_with("data:") => {
            println!("Silhouette: inline image ({} chars)", reference.len())
        }
        Some(reference) => println!("Silhouette: {reference}"),
        None => println!("Silhouette: none"),
    }

    let melody = generate_melody(generator.as_ref(), &prompt).await;
    println!("Playing {} notes...", melody.len());

    let player = TonePlayer::new();
    player.play_melody(&melody).await;
    player.stop();
}
