use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseStatus {
    Locked,
    InProgress,
    Completed,
}

impl CourseStatus {
    pub fn from_progress(progress_percent: u8) -> Self {
        match progress_percent {
            0 => CourseStatus::Locked,
            p if p >= 100 => CourseStatus::Completed,
            _ => CourseStatus::InProgress,
        }
    }
}

/// A card on the learning path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub summary: String,
    /// Completion, clamped to 0..=100
    pub progress_percent: u8,
    pub action_label: String,
}

impl Course {
    pub fn new(title: &str, summary: &str, progress_percent: u8, action_label: &str) -> Self {
        Self {
            title: title.to_string(),
            summary: summary.to_string(),
            progress_percent: progress_percent.min(100),
            action_label: action_label.to_string(),
        }
    }

    pub fn status(&self) -> CourseStatus {
        CourseStatus::from_progress(self.progress_percent)
    }

    /// Progress as a ratio in 0.0..=1.0 (for gauges)
    pub fn progress_ratio(&self) -> f64 {
        f64::from(self.progress_percent) / 100.0
    }
}

pub fn course_catalog() -> Vec<Course> {
    vec![
        Course::new(
            "Forex Fundamentals",
            "Master the basics of currency trading.",
            30,
            "Continue Learning",
        ),
        Course::new(
            "Crypto Trading",
            "Understand blockchain and crypto markets.",
            15,
            "Start Module",
        ),
        Course::new(
            "Advanced Derivatives",
            "Learn options and futures trading.",
            0,
            "Unlock Course",
        ),
    ]
}

/// Community destinations shown below the learning path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityLink {
    pub title: String,
    pub summary: String,
    pub action_label: String,
    pub path: String,
}

pub fn community_links() -> Vec<CommunityLink> {
    vec![
        CommunityLink {
            title: "Learning Forum".to_string(),
            summary: "Ask questions, share knowledge, and help others learn.".to_string(),
            action_label: "Visit Forum".to_string(),
            path: "/forum".to_string(),
        },
        CommunityLink {
            title: "Trading Discussion".to_string(),
            summary: "Discuss market analysis, strategies, and trade ideas.".to_string(),
            action_label: "Join Discussion".to_string(),
            path: "/discussion".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_status_from_progress() {
        assert_eq!(CourseStatus::from_progress(0), CourseStatus::Locked);
        assert_eq!(CourseStatus::from_progress(1), CourseStatus::InProgress);
        assert_eq!(CourseStatus::from_progress(99), CourseStatus::InProgress);
        assert_eq!(CourseStatus::from_progress(100), CourseStatus::Completed);
    }

    #[test]
    fn test_course_catalog() {
        let catalog = course_catalog();
        let progress: Vec<u8> = catalog.iter().map(|c| c.progress_percent).collect();
        assert_eq!(progress, vec![30, 15, 0]);
        assert_eq!(catalog[2].status(), CourseStatus::Locked);
        assert_eq!(catalog[0].progress_ratio(), 0.3);
    }

    #[test]
    fn test_course_progress_clamped() {
        let course = Course::new("X", "Y", 250, "Go");
        assert_eq!(course.progress_percent, 100);
        assert_eq!(course.status(), CourseStatus::Completed);
    }
}
