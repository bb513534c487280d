//! Melody generation with a fixed fallback.
//!
//! The provider is asked for a bare JSON array of `{"value","duration"}`
//! objects, but its output is never trusted: the first balanced array is cut
//! out of the raw text, parsed leniently, and every field is coerced through
//! the note model's fallbacks. Any failure at all yields the default melody.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use shadowsong_melody::{default_melody, Melody, Note, DEFAULT_NOTE_DURATION, MAX_NOTES};

use crate::error::{Error, Result};
use crate::json::{extract_json_array, unmarshal_json};
use crate::Generator;

/// Minimum number of notes requested from the provider.
pub const MIN_NOTES: usize = 12;

fn melody_prompt(prompt: &str) -> String {
    format!(
        "Create a simple melody inspired by \"{prompt}\".\n\
         Return ONLY a JSON array of notes, no explanation.\n\
         Each note should have:\n\
         - \"value\": a number from \"1\" to \"7\" (representing Do Re Mi Fa Sol La Ti)\n\
         - \"duration\": duration in seconds (0.2 to 0.8)\n\n\
         Generate {MIN_NOTES}-{MAX_NOTES} notes that form a pleasant melody.\n\
         Example format: [{{\"value\":\"1\",\"duration\":0.4}},{{\"value\":\"3\",\"duration\":0.3}}]\n\n\
         Return ONLY the JSON array, nothing else."
    )
}

/// One provider note, before resolution against the degree table.
#[derive(Debug, Deserialize)]
struct RawNote {
    #[serde(default)]
    value: Value,
    #[serde(default)]
    duration: Value,
}

impl RawNote {
    fn into_note(self) -> Note {
        let label = match &self.value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        };
        let duration = self.duration.as_f64().unwrap_or(DEFAULT_NOTE_DURATION);
        Note::from_label(&label, duration)
    }
}

/// Requests a melody for `prompt`.
///
/// Never fails: transport errors, API errors and malformed responses all
/// yield the default melody.
pub async fn generate_melody(generator: &dyn Generator, prompt: &str) -> Melody {
    match request_melody(generator, prompt).await {
        Ok(melody) => melody,
        Err(err) => {
            warn!(error = %err, "melody generation failed, using default melody");
            default_melody()
        }
    }
}

async fn request_melody(generator: &dyn Generator, prompt: &str) -> Result<Melody> {
    let text = generator.generate_text(&melody_prompt(prompt)).await?;
    parse_melody(&text)
}

/// Parses the first JSON note array found in a raw provider response.
fn parse_melody(text: &str) -> Result<Melody> {
    let array = extract_json_array(text).ok_or(Error::MissingData("JSON note array"))?;
    let raw: Vec<RawNote> = unmarshal_json(array.as_bytes())?;
    Ok(raw.into_iter().map(RawNote::into_note).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shadowsong_melody::{ScaleDegree, DEFAULT_MELODY_DEGREES};

    /// Generator returning a canned text response, or failing when `None`.
    struct CannedGenerator {
        text: Option<String>,
    }

    impl CannedGenerator {
        fn ok(text: &str) -> Self {
            Self {
                text: Some(text.to_string()),
            }
        }

        fn failing() -> Self {
            Self { text: None }
        }
    }

    #[async_trait]
    impl Generator for CannedGenerator {
        async fn generate_text(&self, _prompt: &str) -> Result<String> {
            self.text
                .clone()
                .ok_or_else(|| Error::api(503, "mock outage"))
        }

        async fn generate_image(&self, _prompt: &str) -> Result<String> {
            Err(Error::MissingData("not a text mock"))
        }
    }

    fn assert_default_melody(melody: &Melody) {
        assert_eq!(melody.len(), DEFAULT_MELODY_DEGREES.len());
        for (note, &degree) in melody.iter().zip(DEFAULT_MELODY_DEGREES.iter()) {
            assert_eq!(note.degree(), ScaleDegree::from_number(degree));
            assert!(note.duration() >= 0.3 && note.duration() < 0.6);
        }
    }

    #[test]
    fn test_prompt_carries_subject_and_bounds() {
        let prompt = melody_prompt("the ocean");
        assert!(prompt.contains("\"the ocean\""));
        assert!(prompt.contains("12-24 notes"));
    }

    #[tokio::test]
    async fn test_two_note_scenario() {
        let generator =
            CannedGenerator::ok(r#"[{"value":"2","duration":0.5},{"value":"7","duration":0.3}]"#);
        let melody = generate_melody(&generator, "the ocean").await;

        assert_eq!(melody.len(), 2);
        assert_eq!(melody.notes()[0].degree(), ScaleDegree::Re);
        assert_eq!(melody.notes()[0].frequency(), 294.0);
        assert_eq!(melody.notes()[0].duration(), 0.5);
        assert_eq!(melody.notes()[1].degree(), ScaleDegree::Ti);
        assert_eq!(melody.notes()[1].frequency(), 494.0);
        assert_eq!(melody.notes()[1].duration(), 0.3);
    }

    #[tokio::test]
    async fn test_well_formed_count_is_preserved() {
        let items: Vec<String> = (0..14)
            .map(|i| format!(r#"{{"value":"{}","duration":0.4}}"#, (i % 7) + 1))
            .collect();
        let generator = CannedGenerator::ok(&format!("[{}]", items.join(",")));

        let melody = generate_melody(&generator, "anything").await;
        assert_eq!(melody.len(), 14);
        for (i, note) in melody.iter().enumerate() {
            let expected = ScaleDegree::from_number(((i % 7) + 1) as u8);
            assert_eq!(note.frequency(), expected.frequency());
        }
    }

    #[tokio::test]
    async fn test_oversized_response_is_capped() {
        let items: Vec<String> = (0..MAX_NOTES + 6)
            .map(|_| r#"{"value":"1","duration":0.4}"#.to_string())
            .collect();
        let generator = CannedGenerator::ok(&format!("[{}]", items.join(",")));

        let melody = generate_melody(&generator, "anything").await;
        assert_eq!(melody.len(), MAX_NOTES);
    }

    #[tokio::test]
    async fn test_array_wrapped_in_prose() {
        let generator = CannedGenerator::ok(
            "Sure! Here is your melody:\n```json\n[{\"value\":\"5\",\"duration\":0.2}]\n```",
        );
        let melody = generate_melody(&generator, "anything").await;
        assert_eq!(melody.len(), 1);
        assert_eq!(melody.notes()[0].degree(), ScaleDegree::Sol);
    }

    #[tokio::test]
    async fn test_numeric_values_are_coerced() {
        let generator = CannedGenerator::ok(r#"[{"value":3,"duration":0.2}]"#);
        let melody = generate_melody(&generator, "anything").await;
        assert_eq!(melody.notes()[0].degree(), ScaleDegree::Mi);
    }

    #[tokio::test]
    async fn test_unknown_value_falls_back_to_do() {
        let generator = CannedGenerator::ok(r#"[{"value":"9","duration":0.4}]"#);
        let melody = generate_melody(&generator, "anything").await;
        assert_eq!(melody.notes()[0].frequency(), ScaleDegree::Do.frequency());
    }

    #[tokio::test]
    async fn test_missing_duration_defaults() {
        let generator = CannedGenerator::ok(r#"[{"value":"4"}]"#);
        let melody = generate_melody(&generator, "anything").await;
        assert_eq!(melody.notes()[0].duration(), DEFAULT_NOTE_DURATION);
    }

    #[tokio::test]
    async fn test_zero_duration_defaults() {
        let generator = CannedGenerator::ok(r#"[{"value":"4","duration":0}]"#);
        let melody = generate_melody(&generator, "anything").await;
        assert_eq!(melody.notes()[0].duration(), DEFAULT_NOTE_DURATION);
    }

    #[tokio::test]
    async fn test_provider_failure_yields_default() {
        let generator = CannedGenerator::failing();
        let melody = generate_melody(&generator, "anything").await;
        assert_default_melody(&melody);
    }

    #[tokio::test]
    async fn test_no_array_yields_default() {
        let generator = CannedGenerator::ok("I'm sorry, I can't write melodies.");
        let melody = generate_melody(&generator, "anything").await;
        assert_default_melody(&melody);
    }

    #[tokio::test]
    async fn test_unparseable_array_yields_default() {
        let generator = CannedGenerator::ok("[{broken");
        let melody = generate_melody(&generator, "anything").await;
        assert_default_melody(&melody);
    }

    #[tokio::test]
    async fn test_empty_array_yields_empty_melody() {
        let generator = CannedGenerator::ok("[]");
        let melody = generate_melody(&generator, "anything").await;
        assert!(melody.is_empty());
    }
}
