/// Generation request parameters
use serde::{Deserialize, Serialize};

/// Parameters of one generation request, as sent to `POST /api/generate`.
///
/// Field names follow the backend's camelCase JSON. Everything beyond the
/// core text fields is optional and omitted from the body when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationParams {
    /// Custom mode (explicit lyrics/style) vs simple mode (free-text description)
    pub custom_mode: bool,

    /// Free-text description used in simple mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song_description: Option<String>,

    pub lyrics: String,
    pub style: String,
    pub title: String,
    pub instrumental: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocal_language: Option<String>,

    /// Target duration in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bpm: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_scale: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_signature: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference_steps: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance_scale: Option<f64>,

    /// Variations produced by a single job
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,

    /// Let the backend pick the seed
    pub random_seed: bool,

    /// Seed used when `random_seed` is false (`-1` means unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dit_model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lm_model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_audio_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_audio_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            custom_mode: false,
            song_description: None,
            lyrics: String::new(),
            style: String::new(),
            title: String::new(),
            instrumental: false,
            vocal_language: None,
            duration: None,
            bpm: None,
            key_scale: None,
            time_signature: None,
            inference_steps: None,
            guidance_scale: None,
            batch_size: None,
            random_seed: true,
            seed: None,
            thinking: None,
            audio_format: None,
            dit_model: None,
            lm_model: None,
            reference_audio_url: None,
            source_audio_url: None,
            task_type: None,
        }
    }
}

impl GenerationParams {
    /// Parse parameters stored alongside a job record.
    ///
    /// The history endpoint returns them either as a JSON object or as a
    /// JSON-encoded string. Anything unreadable yields the defaults.
    pub fn from_stored(raw: Option<&serde_json::Value>) -> Self {
        let parsed = match raw {
            Some(serde_json::Value::String(text)) => serde_json::from_str(text).ok(),
            Some(value @ serde_json::Value::Object(_)) => {
                serde_json::from_value(value.clone()).ok()
            }
            _ => None,
        };
        parsed.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_camel_case_and_skips_unset() {
        let params = GenerationParams {
            title: "A".into(),
            song_description: Some("lofi beat".into()),
            random_seed: false,
            seed: Some(42),
            ..GenerationParams::default()
        };
        let value = serde_json::to_value(&params).unwrap();

        assert_eq!(value["songDescription"], "lofi beat");
        assert_eq!(value["randomSeed"], false);
        assert_eq!(value["seed"], 42);
        assert!(value.get("bpm").is_none());
    }

    #[test]
    fn stored_params_accept_object_or_string() {
        let object = json!({ "title": "From object", "customMode": true });
        let parsed = GenerationParams::from_stored(Some(&object));
        assert_eq!(parsed.title, "From object");
        assert!(parsed.custom_mode);

        let string = json!("{\"title\":\"From string\"}");
        assert_eq!(GenerationParams::from_stored(Some(&string)).title, "From string");
    }

    #[test]
    fn unreadable_stored_params_fall_back_to_defaults() {
        let garbage = json!("{not json");
        assert_eq!(GenerationParams::from_stored(Some(&garbage)), GenerationParams::default());
        assert_eq!(GenerationParams::from_stored(None), GenerationParams::default());
        assert_eq!(
            GenerationParams::from_stored(Some(&json!(17))),
            GenerationParams::default()
        );
    }
}
