use crate::category::Category;

/// Category-specific vocabulary substituted into the plan prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryProfile {
    /// Verb phrase for the closing focus line, e.g. "master".
    pub primary_action: &'static str,
    pub plan_designation: &'static str,
    pub session_terminology: &'static str,
    pub core_activities: &'static str,
    pub resource_types: &'static str,
    pub assessment_methods: &'static str,
    pub learning_approach: &'static str,
}

const ACADEMIC: CategoryProfile = CategoryProfile {
    primary_action: "master",
    plan_designation: "comprehensive study plan",
    session_terminology: "study sessions",
    core_activities: "theoretical analysis, problem-solving exercises, critical thinking applications, and systematic review",
    resource_types: "peer-reviewed materials, academic databases, educational platforms, practice repositories, and scholarly resources",
    assessment_methods: "formative assessments, summative evaluations, peer reviews, and comprehensive examinations",
    learning_approach: "structured academic methodology with progressive complexity",
};

const PHYSICAL_SPORTS: CategoryProfile = CategoryProfile {
    primary_action: "develop proficiency in",
    plan_designation: "systematic training regimen",
    session_terminology: "training sessions",
    core_activities: "skill-specific drills, technique refinement, physical conditioning, and performance analysis",
    resource_types: "professional coaching videos, technique demonstrations, training protocols, and performance analytics tools",
    assessment_methods: "skill assessments, performance metrics, progress tracking, and competitive evaluations",
    learning_approach: "progressive physical development with emphasis on muscle memory and technique mastery",
};

const CREATIVE_SKILLS: CategoryProfile = CategoryProfile {
    primary_action: "cultivate expertise in",
    plan_designation: "creative development program",
    session_terminology: "practice sessions",
    core_activities: "hands-on creation, technique exploration, artistic experimentation, and portfolio development",
    resource_types: "masterclass tutorials, technique libraries, creative community platforms, and inspiration galleries",
    assessment_methods: "portfolio reviews, peer critiques, project completions, and artistic growth evaluations",
    learning_approach: "balanced integration of technical proficiency and creative expression",
};

const PRACTICAL_CRAFTS: CategoryProfile = CategoryProfile {
    primary_action: "achieve competency in",
    plan_designation: "hands-on learning program",
    session_terminology: "workshop sessions",
    core_activities: "project-based construction, technique application, tool mastery, and quality craftsmanship",
    resource_types: "instructional guides, technique demonstrations, project templates, and crafting communities",
    assessment_methods: "project evaluations, technique assessments, quality reviews, and skill progressions",
    learning_approach: "project-driven learning with emphasis on practical application and safety protocols",
};

const PROFESSIONAL_SKILLS: CategoryProfile = CategoryProfile {
    primary_action: "develop professional competence in",
    plan_designation: "professional development program",
    session_terminology: "development sessions",
    core_activities: "case study analysis, practical applications, role-playing exercises, and strategic planning",
    resource_types: "industry publications, professional courses, case study databases, and networking platforms",
    assessment_methods: "competency evaluations, peer feedback, practical demonstrations, and professional assessments",
    learning_approach: "competency-based development with real-world application focus",
};

const GENERAL: CategoryProfile = CategoryProfile {
    primary_action: "develop proficiency in",
    plan_designation: "personalized learning program",
    session_terminology: "learning sessions",
    core_activities: "structured practice, knowledge application, skill development, and reflective learning",
    resource_types: "curated educational content, interactive tutorials, community resources, and reference materials",
    assessment_methods: "progress evaluations, practical applications, self-assessments, and milestone reviews",
    learning_approach: "adaptive learning methodology tailored to individual learning preferences",
};

impl Category {
    pub fn profile(self) -> &'static CategoryProfile {
        match self {
            Category::Academic => &ACADEMIC,
            Category::CreativeSkills => &CREATIVE_SKILLS,
            Category::PhysicalSports => &PHYSICAL_SPORTS,
            Category::PracticalCrafts => &PRACTICAL_CRAFTS,
            Category::ProfessionalSkills => &PROFESSIONAL_SKILLS,
            Category::General => &GENERAL,
        }
    }
}
