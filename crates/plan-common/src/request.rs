use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::PlanError;

/// Raw plan request as received from a client. Every field is optional here;
/// [`PlanInput::validate`] decides whether the request may proceed.
///
/// Fields accept any JSON scalar. `null`, `false`, `0` and `""` read as absent;
/// other numbers and `true` are kept as their JSON text ("2", "1.5", "true").
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanInput {
    #[serde(default, deserialize_with = "lenient_text")]
    #[schemars(with = "Option<String>")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    #[schemars(with = "Option<String>")]
    pub duration: Option<String>,
    /// Daily time in hours; a JSON string or number ("2", 2, 1.5).
    #[serde(default, deserialize_with = "lenient_text")]
    #[schemars(with = "Option<String>")]
    pub hours_per_day: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    #[schemars(with = "Option<String>")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    #[schemars(with = "Option<String>")]
    pub reference_video_url: Option<String>,
    /// Older name for `referenceVideoUrl`, used only when that one is absent.
    #[serde(default, deserialize_with = "lenient_text")]
    #[schemars(with = "Option<String>")]
    pub youtube_url: Option<String>,
}

/// A request that passed validation. Required fields are non-empty and empty
/// optional fields have been dropped. Values are otherwise kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningRequest {
    pub subject: String,
    pub duration: String,
    pub hours_per_day: String,
    pub notes: Option<String>,
    pub reference_video_url: Option<String>,
}

/// Which required fields were absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MissingFields {
    pub subject: bool,
    pub duration: bool,
    pub hours_per_day: bool,
}

impl MissingFields {
    pub fn any(&self) -> bool {
        self.subject || self.duration || self.hours_per_day
    }

    pub fn names(&self) -> Vec<&'static str> {
        [
            (self.subject, "subject"),
            (self.duration, "duration"),
            (self.hours_per_day, "hoursPerDay"),
        ]
        .into_iter()
        .filter_map(|(missing, name)| missing.then_some(name))
        .collect()
    }
}

impl PlanInput {
    pub fn validate(self) -> Result<LearningRequest, PlanError> {
        let subject = present(self.subject);
        let duration = present(self.duration);
        let hours_per_day = present(self.hours_per_day);

        match (subject, duration, hours_per_day) {
            (Some(subject), Some(duration), Some(hours_per_day)) => Ok(LearningRequest {
                subject,
                duration,
                hours_per_day,
                notes: present(self.notes),
                reference_video_url: present(self.reference_video_url)
                    .or_else(|| present(self.youtube_url)),
            }),
            (subject, duration, hours_per_day) => Err(PlanError::MissingFields(MissingFields {
                subject: subject.is_none(),
                duration: duration.is_none(),
                hours_per_day: hours_per_day.is_none(),
            })),
        }
    }
}

/// Empty strings count as absent. Anything else, whitespace included, is kept.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s),
        other @ (Value::Array(_) | Value::Object(_)) => Some(other.to_string()),
    };
    Ok(text)
}
