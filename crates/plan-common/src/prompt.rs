//! Plan prompt assembly.
//!
//! Renders a [`LearningRequest`] into the instruction text sent to the model.
//! User-supplied fields are interpolated verbatim.

use std::fmt;

use crate::category::Category;
use crate::request::LearningRequest;

/// Heading the model is asked to put above its plain-text summary.
pub const DOWNLOADABLE_MARKER: &str = "DOWNLOADABLE VERSION";

/// Prompt text ready to send. Consumed by a single completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt(String);

impl RenderedPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn assemble(request: &LearningRequest, category: Category) -> RenderedPrompt {
    let profile = category.profile();
    let subject = &request.subject;

    let mut requirements = vec![
        format!("- Duration: {}", request.duration),
        format!("- Daily time: {} hours", request.hours_per_day),
        format!("- Subject category: {}", category.key()),
        format!("- Learning approach: {}", profile.learning_approach),
    ];
    if let Some(notes) = &request.notes {
        requirements.push(format!("- Special notes: {notes}"));
    }
    if let Some(url) = &request.reference_video_url {
        requirements.push(format!("- Reference video: {url}"));
    }

    let mut sections = vec![
        format!(
            "Create a comprehensive {} for learning {subject}.",
            profile.plan_designation
        ),
        format!("REQUIREMENTS:\n{}", requirements.join("\n")),
        "STRUCTURE YOUR RESPONSE WITH:".to_string(),
        "1. PROGRAM OVERVIEW\n\
         - Brief introduction and learning objectives\n\
         - Expected outcomes after completion"
            .to_string(),
        format!(
            "2. DETAILED DAILY SCHEDULE\n\
             Create a day-by-day breakdown in table format with:\n\
             - Day number and topic\n\
             - Specific learning objectives\n\
             - Activities: {}\n\
             - Time allocation for {}\n\
             - Resources with clickable links",
            profile.core_activities, profile.session_terminology
        ),
        format!(
            "3. RESOURCE LIBRARY\n\
             Provide specific, working links to:\n\
             - {}\n\
             - Free online materials\n\
             - Practice exercises\n\
             - Community forums",
            profile.resource_types
        ),
        format!(
            "4. PROGRESS TRACKING\n\
             Include:\n\
             - {}\n\
             - Weekly milestones\n\
             - Success metrics",
            profile.assessment_methods
        ),
        "5. PRACTICAL TIPS\n\
         - Study/practice strategies\n\
         - Common challenges and solutions\n\
         - Motivation techniques"
            .to_string(),
        format!(
            "6. DOWNLOADABLE TEXT VERSION\n\
             Provide a clean, plain text summary at the end marked clearly as \"{DOWNLOADABLE_MARKER}\""
        ),
    ];

    if request.reference_video_url.is_some() {
        sections.push(
            "VIDEO INTEGRATION:\n\
             - Break down the video content into daily segments\n\
             - Create exercises based on video demonstrations\n\
             - Suggest pause points for practice"
                .to_string(),
        );
    }

    sections.push(format!(
        "Focus on {} {subject} using {}. Make it practical, actionable, and professionally formatted.",
        profile.primary_action, profile.learning_approach
    ));

    RenderedPrompt(sections.join("\n\n"))
}
