//! Mapping from the study configuration a student picks (grade band and
//! difficulty) to the persona the question-asker prompt is built from.

use serde::{Deserialize, Serialize};

/// School grade 1-12, or university. Level 13 on the grade slider means
/// university.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeBand {
    Grade(u8),
    University,
}

impl GradeBand {
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1..=12 => Some(GradeBand::Grade(level)),
            13 => Some(GradeBand::University),
            _ => None,
        }
    }

    /// How the persona addresses the audience, e.g. "grade 7" or
    /// "university".
    pub fn audience(&self) -> String {
        match self {
            GradeBand::Grade(level) => format!("grade {}", level),
            GradeBand::University => "university".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Difficult,
}

impl Difficulty {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "difficult" => Some(Difficulty::Difficult),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Difficult => "difficult",
        }
    }
}

/// The structured record the teach-back prompts are assembled from. The
/// narrative text is data here, not control flow.
#[derive(Debug, Clone, Serialize)]
pub struct PersonaSpec {
    pub audience: String,
    pub difficulty: &'static str,
    pub difficulty_guidance: &'static str,
}

/// Pure and total over every grade band and difficulty.
pub fn persona(grade: GradeBand, difficulty: Difficulty) -> PersonaSpec {
    let difficulty_guidance = match difficulty {
        Difficulty::Easy => {
            "Favour foundational recall questions and keep the phrasing simple."
        }
        Difficulty::Normal => {
            "Mix recall questions with ones that ask for short explanations."
        }
        Difficulty::Difficult => {
            "Prefer questions that require reasoning, comparisons, and applying the topic to new situations."
        }
    };

    PersonaSpec {
        audience: grade.audience(),
        difficulty: difficulty.as_str(),
        difficulty_guidance,
    }
}
