use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::{info, warn};

use crate::backend::CompletionBackend;
use crate::category::{classify, Category};
use crate::error::PlanError;
use crate::prompt::assemble;
use crate::request::{LearningRequest, PlanInput};

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    pub subject: String,
    pub duration: String,
    pub hours_per_day: String,
    pub category: Category,
    pub has_notes: bool,
    pub has_video: bool,
    /// RFC 3339, UTC, millisecond precision.
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct GeneratedPlan {
    /// Model output, unmodified.
    pub plan: String,
    pub metadata: PlanMetadata,
}

/// Validate, classify, assemble, call the model. Holds no per-request state.
#[derive(Clone)]
pub struct Planner {
    backend: Arc<dyn CompletionBackend>,
}

impl Planner {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    pub async fn generate(&self, input: PlanInput) -> Result<GeneratedPlan, PlanError> {
        let request = input.validate().inspect_err(|e| {
            warn!(error = %e, "rejecting plan request");
        })?;
        self.generate_validated(request).await
    }

    pub async fn generate_validated(
        &self,
        request: LearningRequest,
    ) -> Result<GeneratedPlan, PlanError> {
        let category = classify(&request.subject);
        info!(
            subject = %request.subject,
            category = %category,
            has_notes = request.notes.is_some(),
            has_video = request.reference_video_url.is_some(),
            "generating learning plan"
        );

        let prompt = assemble(&request, category);
        let plan = self.backend.complete(prompt).await?;

        let LearningRequest {
            subject,
            duration,
            hours_per_day,
            notes,
            reference_video_url,
        } = request;

        Ok(GeneratedPlan {
            plan,
            metadata: PlanMetadata {
                subject,
                duration,
                hours_per_day,
                category,
                has_notes: notes.is_some(),
                has_video: reference_video_url.is_some(),
                generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::prompt::RenderedPrompt;

    /// Records every prompt and answers with a fixed outcome.
    struct FakeBackend {
        prompts: Mutex<Vec<String>>,
        reply: fn() -> Result<String, PlanError>,
    }

    impl FakeBackend {
        fn new(reply: fn() -> Result<String, PlanError>) -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
                reply,
            })
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionBackend for FakeBackend {
        async fn complete(&self, prompt: RenderedPrompt) -> Result<String, PlanError> {
            self.prompts.lock().unwrap().push(prompt.into_string());
            (self.reply)()
        }
    }

    fn input(subject: &str, duration: &str, hours: &str) -> PlanInput {
        PlanInput {
            subject: Some(subject.to_string()),
            duration: Some(duration.to_string()),
            hours_per_day: Some(hours.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn returns_model_text_unmodified_with_metadata() {
        let backend = FakeBackend::new(|| Ok("  **Day 1**: drills\n".to_string()));
        let planner = Planner::new(backend.clone());

        let plan = planner
            .generate(input("basketball dribbling", "2 weeks", "1"))
            .await
            .unwrap();

        assert_eq!(plan.plan, "  **Day 1**: drills\n");
        assert_eq!(plan.metadata.subject, "basketball dribbling");
        assert_eq!(plan.metadata.duration, "2 weeks");
        assert_eq!(plan.metadata.hours_per_day, "1");
        assert_eq!(plan.metadata.category, Category::PhysicalSports);
        assert!(!plan.metadata.has_notes);
        assert!(!plan.metadata.has_video);
        assert!(chrono::DateTime::parse_from_rfc3339(&plan.metadata.generated_at).is_ok());

        let prompts = backend.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("conditioning"));
        assert!(!prompts[0].contains("VIDEO INTEGRATION"));
    }

    #[tokio::test]
    async fn missing_subject_never_reaches_backend() {
        let backend = FakeBackend::new(|| Ok("unreachable".to_string()));
        let planner = Planner::new(backend.clone());

        let err = planner.generate(input("", "1 week", "2")).await.unwrap_err();
        assert!(matches!(err, PlanError::MissingFields(m) if m.subject));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn video_flags_and_block_follow_url() {
        let backend = FakeBackend::new(|| Ok("plan".to_string()));
        let planner = Planner::new(backend.clone());

        let mut raw = input("piano", "1 month", "2");
        raw.notes = Some("left hand is weak".to_string());
        raw.reference_video_url = Some("https://youtu.be/abc".to_string());
        let plan = planner.generate(raw).await.unwrap();

        assert!(plan.metadata.has_notes);
        assert!(plan.metadata.has_video);
        assert!(backend.prompts.lock().unwrap()[0].contains("VIDEO INTEGRATION:"));
    }

    #[tokio::test]
    async fn backend_errors_pass_through() {
        let planner = Planner::new(FakeBackend::new(|| Err(PlanError::EmptyResult)));
        let err = planner.generate(input("chess", "1 week", "1")).await.unwrap_err();
        assert!(matches!(err, PlanError::EmptyResult));

        let planner = Planner::new(FakeBackend::new(|| {
            Err(PlanError::Upstream("rate limited".to_string()))
        }));
        let err = planner.generate(input("chess", "1 week", "1")).await.unwrap_err();
        assert!(matches!(err, PlanError::Upstream(m) if m == "rate limited"));
    }

    #[test]
    fn metadata_serializes_camel_case() {
        let meta = PlanMetadata {
            subject: "yoga".to_string(),
            duration: "1 week".to_string(),
            hours_per_day: "1".to_string(),
            category: Category::PhysicalSports,
            has_notes: false,
            has_video: true,
            generated_at: "2026-01-01T00:00:00.000Z".to_string(),
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["hoursPerDay"], "1");
        assert_eq!(json["hasVideo"], true);
        assert_eq!(json["category"], "physical_sports");
        assert_eq!(json["generatedAt"], "2026-01-01T00:00:00.000Z");
    }
}
