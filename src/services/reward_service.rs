//! Reward propagation
//!
//! An attempt and everything it earns are written in one transaction. The
//! user row is locked first, so concurrent submissions of one user apply
//! their rewards one after another.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    db::repositories::{AttemptRepository, ProgressionRepository, UserRepository},
    error::AppResult,
    judge::{GradeReport, Language},
    middleware::AuthenticatedUser,
    models::{Attempt, NewAttempt, RewardSummary, Ticket},
    utils::{hash_string, today_utc},
};

/// Reward service for business logic
pub struct RewardService;

impl RewardService {
    /// Persist an attempt and apply its rewards for today
    pub async fn record_attempt(
        pool: &PgPool,
        user: &AuthenticatedUser,
        ticket: &Ticket,
        language: Language,
        code: &str,
        report: &GradeReport,
    ) -> AppResult<(Attempt, RewardSummary)> {
        Self::record_attempt_on(pool, user, ticket, language, code, report, today_utc()).await
    }

    /// Persist an attempt, counting activity on `today`
    pub async fn record_attempt_on(
        pool: &PgPool,
        user: &AuthenticatedUser,
        ticket: &Ticket,
        language: Language,
        code: &str,
        report: &GradeReport,
        today: NaiveDate,
    ) -> AppResult<(Attempt, RewardSummary)> {
        let mut tx = pool.begin().await?;

        UserRepository::upsert(&mut *tx, &user.id, &user.username).await?;
        let locked = UserRepository::lock_for_update(&mut *tx, &user.id).await?;

        let code_sha256 = hash_string(code);
        let attempt = AttemptRepository::create(
            &mut *tx,
            &NewAttempt {
                ticket_id: ticket.id,
                user_id: user.id,
                language: language.as_str(),
                code,
                code_sha256: &code_sha256,
                results: &report.results,
                summary: report.summary,
                badge_earned: report.badge_earned,
            },
        )
        .await?;

        let streak = locked.streak_state();
        let mut rewards = RewardSummary {
            current_streak: streak.effective_current(today),
            longest_streak: streak.longest,
            ..Default::default()
        };

        if report.badge_earned {
            let first_completion =
                ProgressionRepository::record_completion(&mut *tx, &user.id, &ticket.id, &attempt.id)
                    .await?;
            let first_today = ProgressionRepository::record_activity(&mut *tx, &user.id, today).await?;

            let (xp, points, completed) = if first_completion {
                (ticket.difficulty()?.xp_reward(), ticket.points as i64, 1)
            } else {
                (0, 0, 0)
            };

            let advanced = if first_today {
                streak.record_activity(today)
            } else {
                None
            };

            if first_completion || advanced.is_some() {
                let next = advanced.unwrap_or(streak);
                let updated =
                    UserRepository::apply_progression(&mut *tx, &user.id, xp, points, completed, &next)
                        .await?;

                rewards = RewardSummary {
                    xp_awarded: xp,
                    points_awarded: points,
                    first_completion,
                    streak_extended: advanced.is_some(),
                    current_streak: updated.streak_state().effective_current(today),
                    longest_streak: updated.longest_streak,
                };
            }
        }

        tx.commit().await?;

        tracing::info!(
            attempt_id = %attempt.id,
            user_id = %user.id,
            ticket_id = %ticket.id,
            passed = report.summary.passed,
            total = report.summary.total,
            badge = report.badge_earned,
            xp = rewards.xp_awarded,
            streak = rewards.current_streak,
            "Attempt recorded"
        );

        Ok((attempt, rewards))
    }
}
