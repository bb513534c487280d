//! Melody generation example.
//!
//! Run with:
//! ```bash
//! export GEMINI_API_KEY="your-api-key"
//! cargo run --example melody -- "a rainy afternoon"
//! ```

use shadowsong_genai::{generate_melody, Config};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "the ocean".to_string());

    let generator = Config::from_env().generator();
    let melody = generate_melody(generator.as_ref(), &prompt).await;

    println!("Melody for {prompt:?} ({} notes):", melody.len());
    for note in &melody {
        println!(
            "  {} ({} Hz, {:.2}s)",
            note.degree().name(),
            note.frequency(),
            note.duration()
        );
    }
}
