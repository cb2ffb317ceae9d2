//! Ticket model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

use crate::{
    constants::{difficulties, xp_rewards},
    error::{AppError, AppResult},
    judge::{JudgeCase, Language},
};

use super::TestCase;

/// Ticket database model
#[derive(Debug, Clone, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub language: String,
    pub test_cases: Json<Vec<TestCase>>,
    pub reference_code: Option<String>,
    pub validation_code: Option<String>,
    pub entry_point: Option<String>,
    pub tags: Vec<String>,
    pub points: i32,
    pub time_limit_ms: i32,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Parsed difficulty
    pub fn difficulty(&self) -> AppResult<Difficulty> {
        Difficulty::parse(&self.difficulty)
    }

    /// Parsed target language
    pub fn language(&self) -> AppResult<Language> {
        Language::parse(&self.language)
    }

    /// All cases, hidden included, in ticket order
    pub fn judge_cases(&self) -> Vec<JudgeCase> {
        self.test_cases.iter().map(JudgeCase::from).collect()
    }

    /// Cases a client may see
    pub fn visible_test_cases(&self) -> Vec<TestCase> {
        self.test_cases
            .iter()
            .filter(|c| !c.is_hidden)
            .cloned()
            .collect()
    }

    pub fn hidden_test_count(&self) -> usize {
        self.test_cases.iter().filter(|c| c.is_hidden).count()
    }
}

/// Ticket difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(difficulty: &str) -> AppResult<Self> {
        match difficulty.trim().to_ascii_lowercase().as_str() {
            difficulties::EASY => Ok(Self::Easy),
            difficulties::MEDIUM => Ok(Self::Medium),
            difficulties::HARD => Ok(Self::Hard),
            other => Err(AppError::Validation(format!(
                "Invalid difficulty: {}. Must be one of: {:?}",
                other,
                difficulties::ALL
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => difficulties::EASY,
            Self::Medium => difficulties::MEDIUM,
            Self::Hard => difficulties::HARD,
        }
    }

    /// XP granted for the first completion of a ticket
    pub fn xp_reward(&self) -> i64 {
        match self {
            Self::Easy => xp_rewards::EASY,
            Self::Medium => xp_rewards::MEDIUM,
            Self::Hard => xp_rewards::HARD,
        }
    }
}
