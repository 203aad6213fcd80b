use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::error;

use plan_common::category::{Category, classify};
use plan_common::error::PlanError;
use plan_common::export::extract_plain_text;
use plan_common::planner::{GeneratedPlan, Planner};
use plan_common::request::PlanInput;

#[derive(Clone)]
pub struct PlannerServer {
    planner: Planner,
    tool_router: ToolRouter<PlannerServer>,
}

impl PlannerServer {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner,
            tool_router: Self::tool_router(),
        }
    }
}

/// Tool-facing error text. Internal causes are logged, not returned.
fn tool_error(err: PlanError) -> String {
    match err {
        PlanError::Internal(cause) => {
            error!(error = %cause, "error generating learning plan");
            "internal error: failed to process learning plan generation request".to_string()
        }
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ClassifySubjectParams {
    /// Free-text learning subject, e.g. "basketball dribbling".
    subject: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ExportPlainTextParams {
    /// Plan text as returned by generate_plan.
    plan: String,
}

#[derive(Debug, Serialize, JsonSchema)]
struct ClassificationResponse {
    category: Category,
    plan_designation: String,
    learning_approach: String,
}

#[derive(Debug, Serialize, JsonSchema)]
struct TextResponse {
    text: String,
}

#[tool_router]
impl PlannerServer {
    #[tool(description = "Generate a personalized learning plan. Requires subject, duration and hoursPerDay; notes and referenceVideoUrl are optional. Returns the model's plan text and request metadata.")]
    async fn generate_plan(
        &self,
        Parameters(params): Parameters<PlanInput>,
    ) -> Result<Json<GeneratedPlan>, String> {
        let plan = self.planner.generate(params).await.map_err(tool_error)?;
        Ok(Json(plan))
    }

    #[tool(description = "Classify a learning subject into its pedagogical category without calling the model.")]
    async fn classify_subject(
        &self,
        Parameters(params): Parameters<ClassifySubjectParams>,
    ) -> Result<Json<ClassificationResponse>, String> {
        let category = classify(&params.subject);
        let profile = category.profile();
        Ok(Json(ClassificationResponse {
            category,
            plan_designation: profile.plan_designation.to_string(),
            learning_approach: profile.learning_approach.to_string(),
        }))
    }

    #[tool(description = "Extract the downloadable plain-text version of a generated plan, falling back to stripped markdown.")]
    async fn export_plain_text(
        &self,
        Parameters(params): Parameters<ExportPlainTextParams>,
    ) -> Result<Json<TextResponse>, String> {
        if params.plan.trim().is_empty() {
            return Err("plan must not be empty".to_string());
        }
        Ok(Json(TextResponse {
            text: extract_plain_text(&params.plan),
        }))
    }
}

#[tool_handler]
impl ServerHandler for PlannerServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "study-planner".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Learning plan generator. Call generate_plan with subject, duration and \
hoursPerDay (plus optional notes / referenceVideoUrl). Use classify_subject to preview the \
category a subject maps to, and export_plain_text to get a download-ready text version."
                    .to_string(),
            ),
        }
    }
}
