//! Workout video recommendations and the daily workout streak.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::lenient;

pub const MIN_DURATION_MINUTES: u32 = 5;
pub const MAX_DURATION_MINUTES: u32 = 90;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum WorkoutType {
    #[default]
    #[serde(rename = "Full Body")]
    FullBody,
    Cardio,
    Yoga,
    Strength,
}

impl WorkoutType {
    pub fn label(self) -> &'static str {
        match self {
            WorkoutType::FullBody => "Full Body",
            WorkoutType::Cardio => "Cardio",
            WorkoutType::Yoga => "Yoga",
            WorkoutType::Strength => "Strength",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutVideo {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

impl WorkoutVideo {
    pub fn new(title: String, url: String) -> Self {
        let video_id = youtube_id(&url);
        Self { title, url, video_id }
    }

    /// Read the model's `[{title, video_id}]` list. Entries with neither id nor url are dropped.
    pub fn list_from_reply(value: &JsonValue) -> Option<Vec<Self>> {
        let videos: Vec<Self> = value
            .as_array()?
            .iter()
            .filter_map(|item| {
                let title = lenient::text(item, "title");
                let url = match item.get("video_id").and_then(|v| v.as_str()) {
                    Some(id) => format!("https://www.youtube.com/watch?v={id}"),
                    None => item.get("url")?.as_str()?.to_string(),
                };
                Some(Self::new(title, url))
            })
            .collect();
        (!videos.is_empty()).then_some(videos)
    }
}

static YOUTUBE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|be/|embed/)([\w-]{11})").expect("valid video id pattern"));

/// The 11-character id from watch, short or embed YouTube URLs.
pub fn youtube_id(url: &str) -> Option<String> {
    YOUTUBE_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Dates on which a user completed a workout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ExerciseStreak {
    pub username: String,
    pub dates: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayMark {
    pub date: String,
    pub completed: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreakSummary {
    pub days: usize,
    pub weekly_progress: f64,
    pub dates: Vec<String>,
    pub completed_today: bool,
    pub last_seven_days: Vec<DayMark>,
}

impl StreakSummary {
    pub fn new(streak: ExerciseStreak, today: NaiveDate) -> Self {
        let days = streak.dates.len();
        let last_seven_days = (0..7u64)
            .rev()
            .filter_map(|back| today.checked_sub_days(Days::new(back)))
            .map(|day| {
                let date = day.format("%Y-%m-%d").to_string();
                let completed = u8::from(streak.dates.contains(&date));
                DayMark { date, completed }
            })
            .collect();
        let today = today.format("%Y-%m-%d").to_string();
        Self {
            days,
            weekly_progress: (days % 7) as f64 / 7.0,
            completed_today: streak.dates.contains(&today),
            dates: streak.dates,
            last_seven_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn youtube_ids_from_url_shapes() {
        assert_eq!(youtube_id("https://www.youtube.com/watch?v=ml6cTmdAZ2Y").as_deref(), Some("ml6cTmdAZ2Y"));
        assert_eq!(youtube_id("https://youtu.be/4iy4yEKa7W8?si=x").as_deref(), Some("4iy4yEKa7W8"));
        assert_eq!(youtube_id("https://www.youtube.com/embed/CM43AZaRXNw").as_deref(), Some("CM43AZaRXNw"));
        assert_eq!(youtube_id("#"), None);
    }

    #[test]
    fn reply_video_ids_become_urls() {
        let videos = WorkoutVideo::list_from_reply(&json!([
            {"title": "HIIT", "video_id": "ml6cTmdAZ2Y"},
            {"title": "No link"}
        ]))
        .unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].url, "https://www.youtube.com/watch?v=ml6cTmdAZ2Y");
        assert_eq!(videos[0].video_id.as_deref(), Some("ml6cTmdAZ2Y"));
    }

    #[test]
    fn streak_summary_marks_last_week() {
        let streak = ExerciseStreak {
            username: "alice".to_string(),
            dates: vec!["2026-10-12".to_string(), "2026-10-18".to_string(), "2026-09-01".to_string()],
        };
        let summary = StreakSummary::new(streak, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        assert_eq!(summary.days, 3);
        assert!(summary.completed_today);
        assert!((summary.weekly_progress - 3.0 / 7.0).abs() < 1e-9);
        let marks: Vec<u8> = summary.last_seven_days.iter().map(|d| d.completed).collect();
        assert_eq!(marks, vec![1, 0, 0, 0, 0, 0, 1]);
        assert_eq!(summary.last_seven_days[0].date, "2026-10-12");
    }

    #[test]
    fn workout_type_uses_form_labels() {
        let t: WorkoutType = serde_json::from_str("\"Full Body\"").unwrap();
        assert_eq!(t, WorkoutType::FullBody);
        assert_eq!(t.label(), "Full Body");
    }
}
