//! Subject classification.
//!
//! Maps a free-text subject onto one of a small closed set of pedagogical
//! categories. Matching is plain substring containment on the lower-cased
//! subject, so a keyword also hits inside longer words ("art" matches
//! "martial arts"). Overlaps are settled only by table order.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Academic,
    CreativeSkills,
    PhysicalSports,
    PracticalCrafts,
    ProfessionalSkills,
    General,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Academic,
        Category::CreativeSkills,
        Category::PhysicalSports,
        Category::PracticalCrafts,
        Category::ProfessionalSkills,
        Category::General,
    ];

    /// Stable key used in prompts and API payloads.
    pub fn key(self) -> &'static str {
        match self {
            Category::Academic => "academic",
            Category::CreativeSkills => "creative_skills",
            Category::PhysicalSports => "physical_sports",
            Category::PracticalCrafts => "practical_crafts",
            Category::ProfessionalSkills => "professional_skills",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Keyword table in priority order. `General` has no keywords and is the
/// terminal fallback.
const KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Academic,
        &[
            "mathematics",
            "math",
            "science",
            "history",
            "literature",
            "physics",
            "chemistry",
            "biology",
            "programming",
            "computer science",
            "economics",
            "psychology",
            "philosophy",
            "linguistics",
            "english",
            "spanish",
            "french",
            "calculus",
            "algebra",
            "geometry",
            "statistics",
            "research",
            "academic",
        ],
    ),
    (
        Category::CreativeSkills,
        &[
            "guitar",
            "piano",
            "drawing",
            "painting",
            "photography",
            "writing",
            "creative writing",
            "singing",
            "dancing",
            "music composition",
            "art",
            "graphic design",
            "web design",
            "animation",
            "filmmaking",
            "acting",
        ],
    ),
    (
        Category::PhysicalSports,
        &[
            "football",
            "basketball",
            "tennis",
            "swimming",
            "running",
            "soccer",
            "dribbling",
            "shooting",
            "fitness",
            "workout",
            "martial arts",
            "boxing",
            "yoga",
            "cricket",
            "baseball",
            "volleyball",
            "athletics",
            "training",
        ],
    ),
    (
        Category::PracticalCrafts,
        &[
            "knitting",
            "woodworking",
            "pottery",
            "gardening",
            "crafting",
            "sewing",
            "jewelry making",
            "carpentry",
            "sculpting",
            "cooking",
            "baking",
            "home improvement",
            "diy",
            "mechanical",
            "electrical",
        ],
    ),
    (
        Category::ProfessionalSkills,
        &[
            "leadership",
            "management",
            "communication",
            "presentation",
            "negotiation",
            "sales",
            "marketing",
            "project management",
            "data analysis",
            "consulting",
            "public speaking",
            "networking",
            "entrepreneurship",
        ],
    ),
];

/// Secondary cues, consulted only when no keyword matched.
const HEURISTICS: &[(&[&str], Category)] = &[
    (&["learn", "study"], Category::Academic),
    (&["train", "practice"], Category::PhysicalSports),
    (&["business", "career"], Category::ProfessionalSkills),
];

/// Classify a subject. Total: every input maps to exactly one category.
pub fn classify(subject: &str) -> Category {
    let subject = subject.to_lowercase();
    let hit = |needles: &[&str]| needles.iter().any(|k| subject.contains(k));

    KEYWORDS
        .iter()
        .find(|(_, keywords)| hit(keywords))
        .map(|(category, _)| *category)
        .or_else(|| {
            HEURISTICS
                .iter()
                .find(|(cues, _)| hit(cues))
                .map(|(_, category)| *category)
        })
        .unwrap_or(Category::General)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_keyword_ignores_case() {
        assert_eq!(classify("Guitar Lessons"), Category::CreativeSkills);
        assert_eq!(classify("GUITAR LESSONS"), Category::CreativeSkills);
        assert_eq!(classify("guitar lessons"), Category::CreativeSkills);
        assert_eq!(classify("Organic Chemistry"), Category::Academic);
        assert_eq!(classify("Sourdough BAKING"), Category::PracticalCrafts);
        assert_eq!(classify("Public Speaking"), Category::ProfessionalSkills);
    }

    #[test]
    fn earlier_category_wins_on_overlap() {
        // "painting" is creative, "history" is academic.
        assert_eq!(classify("history of painting"), Category::Academic);
        // "martial arts" contains "art", which sits in an earlier table.
        assert_eq!(classify("martial arts"), Category::CreativeSkills);
        // "writing" (creative) beats "training" (physical).
        assert_eq!(classify("training my writing"), Category::CreativeSkills);
    }

    #[test]
    fn keyword_matches_inside_longer_words() {
        assert_eq!(classify("mathematical logic"), Category::Academic);
        assert_eq!(classify("smartphone repair"), Category::CreativeSkills);
    }

    #[test]
    fn heuristics_apply_only_without_keyword_hit() {
        assert_eq!(classify("I want to learn Rust"), Category::Academic);
        assert_eq!(classify("deliberate practice of juggling"), Category::PhysicalSports);
        assert_eq!(classify("career change to UX"), Category::ProfessionalSkills);
        assert_eq!(classify("small business bookkeeping"), Category::ProfessionalSkills);
        // learn/study is checked before train/practice.
        assert_eq!(classify("study and practice chess"), Category::Academic);
    }

    #[test]
    fn blank_subject_is_general() {
        assert_eq!(classify(""), Category::General);
        assert_eq!(classify("   "), Category::General);
        assert_eq!(classify("juggling"), Category::General);
    }

    #[test]
    fn basketball_dribbling_is_physical() {
        assert_eq!(classify("basketball dribbling"), Category::PhysicalSports);
    }

    #[test]
    fn keys_round_trip_through_serde() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.key()));
        }
    }
}
