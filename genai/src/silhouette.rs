//! Silhouette image generation.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::warn;

use crate::Generator;

fn silhouette_prompt(prompt: &str) -> String {
    format!(
        "Generate a simple, elegant silhouette image of a {prompt}.\n\
         The silhouette should be:\n\
         - Pure black shape on pure white background\n\
         - Clean, smooth edges\n\
         - Artistic and recognizable\n\
         - Centered in the image\n\
         - No gradients, just solid black and white"
    )
}

/// Requests a silhouette image for `prompt`.
///
/// Returns the provider's image reference (URL or data URI), or `None` on
/// any failure. No error propagates; callers must handle the missing image.
pub async fn generate_silhouette(generator: &dyn Generator, prompt: &str) -> Option<String> {
    match generator.generate_image(&silhouette_prompt(prompt)).await {
        Ok(reference) if !reference.is_empty() => Some(reference),
        Ok(_) => {
            warn!("silhouette generation returned an empty reference");
            None
        }
        Err(err) => {
            warn!(error = %err, "silhouette generation failed");
            None
        }
    }
}

/// Splits a `data:<mime>;base64,<payload>` reference into mime type and bytes.
///
/// Returns `None` for plain URLs or undecodable payloads.
pub fn decode_data_uri(reference: &str) -> Option<(String, Vec<u8>)> {
    let rest = reference.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    let bytes = STANDARD.decode(payload).ok()?;
    Some((mime.to_string(), bytes))
}
