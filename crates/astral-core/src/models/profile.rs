use serde::{Deserialize, Serialize};

/// How far along a student is; drives which courses are recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "Beginner",
            ExperienceLevel::Intermediate => "Intermediate",
            ExperienceLevel::Advanced => "Advanced",
        }
    }
}

/// Application-specific user metadata, kept alongside (but independent of)
/// the authenticated identity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
}

impl Profile {
    pub fn display_name(&self) -> Option<&str> {
        self.full_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.username.as_deref().filter(|s| !s.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_display_name() {
        let mut profile = Profile {
            id: "p1".to_string(),
            username: Some("pipmaster".to_string()),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), Some("pipmaster"));

        profile.full_name = Some("Ada Pips".to_string());
        assert_eq!(profile.display_name(), Some("Ada Pips"));

        profile.full_name = Some("  ".to_string());
        profile.username = None;
        assert_eq!(profile.display_name(), None);
    }

    #[test]
    fn test_profile_deserialize_defaults() {
        let profile: Profile = serde_json::from_str(r#"{"id":"p1","experience_level":"advanced"}"#)
            .expect("parse profile");
        assert_eq!(profile.experience_level, ExperienceLevel::Advanced);
        assert!(profile.username.is_none());

        let profile: Profile = serde_json::from_str(r#"{"id":"p2"}"#).expect("parse profile");
        assert_eq!(profile.experience_level, ExperienceLevel::Beginner);
    }
}
