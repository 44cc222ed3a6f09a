//! Hydration goal, advice, and daily/weekly aggregation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_AMOUNT_ML: i32 = 50;
pub const MAX_AMOUNT_ML: i32 = 2000;

/// One logged drink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaterLog {
    pub id: i32,
    pub username: String,
    pub date: String,
    pub amount: i32,
    pub timestamp: DateTime<Utc>,
}

/// Sum of a user's intake for one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: String,
    pub total: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ActivityLevel {
    #[default]
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FitnessGoal {
    #[default]
    Maintenance,
    #[serde(rename = "Weight Loss")]
    WeightLoss,
    #[serde(rename = "Muscle Gain")]
    MuscleGain,
}

impl FitnessGoal {
    pub fn label(self) -> &'static str {
        match self {
            FitnessGoal::Maintenance => "Maintenance",
            FitnessGoal::WeightLoss => "Weight Loss",
            FitnessGoal::MuscleGain => "Muscle Gain",
        }
    }
}

/// Daily water goal in ml: 35 ml/kg scaled by activity and goal, nudged by height.
pub fn recommend_goal(
    weight_kg: f64,
    height_cm: f64,
    activity: ActivityLevel,
    goal: FitnessGoal,
) -> i32 {
    let mut base = weight_kg * 35.0;
    base *= match activity {
        ActivityLevel::Low => 1.0,
        ActivityLevel::Moderate => 1.15,
        ActivityLevel::High => 1.3,
    };
    base *= match goal {
        FitnessGoal::WeightLoss => 1.1,
        FitnessGoal::Maintenance => 1.0,
        FitnessGoal::MuscleGain => 1.05,
    };
    if height_cm > 180.0 {
        base += 200.0;
    } else if height_cm < 160.0 {
        base -= 100.0;
    }
    base as i32
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HydrationAdvice {
    pub message: String,
    pub color: String,
}

pub fn hydration_advice(total_ml: i64, goal_ml: i32) -> HydrationAdvice {
    let percent = fraction(total_ml, goal_ml) * 100.0;
    let (message, color) = if percent < 50.0 {
        (
            "You need to drink more water! Aim for at least half your goal by now.",
            "#ff4b4b",
        )
    } else if percent < 100.0 {
        ("Good progress! Keep sipping to reach your goal.", "#ffa500")
    } else {
        ("Great job! You've met your hydration goal.", "#4bb543")
    };
    HydrationAdvice {
        message: message.to_string(),
        color: color.to_string(),
    }
}

fn fraction(total_ml: i64, goal_ml: i32) -> f64 {
    if goal_ml <= 0 {
        return if total_ml > 0 { 1.0 } else { 0.0 };
    }
    total_ml as f64 / goal_ml as f64
}

/// Drank/remaining donut chart data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Donut {
    pub consumed: i64,
    pub remaining: i64,
    pub fraction: f64,
}

impl Donut {
    pub fn new(total_ml: i64, goal_ml: i32) -> Self {
        Self {
            consumed: total_ml,
            remaining: (goal_ml as i64 - total_ml).max(0),
            fraction: fraction(total_ml, goal_ml),
        }
    }
}

/// Everything the tracker shows for today.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterToday {
    pub date: String,
    pub goal: i32,
    pub total: i64,
    pub donut: Donut,
    pub advice: HydrationAdvice,
    pub logs: Vec<WaterLog>,
}

impl WaterToday {
    pub fn summarize(date: String, logs: Vec<WaterLog>, goal: i32) -> Self {
        let total: i64 = logs.iter().map(|log| log.amount as i64).sum();
        Self {
            date,
            goal,
            total,
            donut: Donut::new(total, goal),
            advice: hydration_advice(total, goal),
            logs,
        }
    }
}

/// One bar of the weekly chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyBar {
    pub date: String,
    pub day: String,
    pub total: i64,
}

pub fn weekly_bars(totals: Vec<DailyTotal>) -> Vec<WeeklyBar> {
    totals
        .into_iter()
        .map(|t| {
            let day = NaiveDate::parse_from_str(&t.date, "%Y-%m-%d")
                .map(|d| d.format("%a").to_string())
                .unwrap_or_else(|_| t.date.clone());
            WeeklyBar {
                date: t.date,
                day,
                total: t.total,
            }
        })
        .collect()
}
