//! Silhouette generation example.
//!
//! Run with:
//! ```bash
//! export GEMINI_API_KEY="your-api-key"
//! cargo run --example silhouette -- "a sleeping cat"
//! ```

use shadowsong_genai::{decode_data_uri, generate_silhouette, Config};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "a sleeping cat".to_string());

    let generator = Config::from_env().generator();
    match generate_silhouette(generator.as_ref(), &prompt).await {
        Some(reference) => match decode_data_uri(&reference) {
            Some((mime, bytes)) => {
                let path = "silhouette.png";
                std::fs::write(path, &bytes).expect("write silhouette");
                println!("Saved {} bytes of {mime} to {path}", bytes.len());
            }
            None => println!("Silhouette URL: {reference}"),
        },
        None => println!("No silhouette for {prompt:?}"),
    }
}
