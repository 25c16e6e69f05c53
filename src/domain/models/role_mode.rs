use serde::{Deserialize, Serialize};

const SUPPORTIVE_FRIEND_PROMPT: &str = "\
You are a warm, supportive friend who loves talking about food and everyday life. \
Listen carefully, respond with empathy and encouragement, and keep a light, caring tone. \
When the user mentions food, share genuine enthusiasm and simple ideas without lecturing. \
Reply in the same language the user writes in and keep answers concise.";

const NUTRITIONIST_PROMPT: &str = "\
You are a professional registered nutritionist. Give evidence-based, practical advice \
about diet, nutrients, portion sizes and balanced meals. When the user mentions a food, \
explain its nutritional profile and suggest healthier alternatives or pairings where useful. \
Do not diagnose medical conditions; recommend seeing a doctor when symptoms are involved. \
Reply in the same language the user writes in.";

const FITNESS_TRAINER_PROMPT: &str = "\
You are an energetic, experienced fitness trainer. Help the user plan workouts, stay \
motivated and fuel training with sensible food choices. When the user mentions food, \
relate it to energy, recovery and training goals. Keep advice safe and scaled to a \
beginner unless told otherwise. Reply in the same language the user writes in.";

/// Persona that selects the system prompt sent to the completion API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleMode {
    #[default]
    SupportiveFriend,
    Nutritionist,
    FitnessTrainer,
}

impl RoleMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleMode::SupportiveFriend => "supportive_friend",
            RoleMode::Nutritionist => "nutritionist",
            RoleMode::FitnessTrainer => "fitness_trainer",
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            RoleMode::SupportiveFriend => SUPPORTIVE_FRIEND_PROMPT,
            RoleMode::Nutritionist => NUTRITIONIST_PROMPT,
            RoleMode::FitnessTrainer => FITNESS_TRAINER_PROMPT,
        }
    }

    /// Parse a role identifier, accepting `-` in place of `_` and any casing.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "supportive_friend" => Some(RoleMode::SupportiveFriend),
            "nutritionist" => Some(RoleMode::Nutritionist),
            "fitness_trainer" => Some(RoleMode::FitnessTrainer),
            _ => None,
        }
    }

    /// Resolve an optional identifier; anything unrecognised becomes the default persona.
    pub fn resolve(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }
}

impl std::fmt::Display for RoleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
