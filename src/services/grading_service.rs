//! Grading service
//!
//! Resolves what to grade (a stored ticket or client-supplied cases), runs
//! the grader, and for ticket submissions stores the attempt and rewards.

use sqlx::PgPool;

use crate::{
    config::Config,
    constants::MAX_SOURCE_CODE_SIZE,
    error::{AppError, AppResult},
    handlers::grading::{request::RunTestsRequest, response::RunTestsResponse},
    judge::{Grader, GradingJob, JudgeCase, Language},
    middleware::AuthenticatedUser,
    services::{RewardService, TicketService},
};

/// Grading service for business logic
pub struct GradingService;

impl GradingService {
    /// Grade a submission
    pub async fn run_tests(
        pool: &PgPool,
        grader: &Grader,
        config: &Config,
        user: Option<AuthenticatedUser>,
        payload: RunTestsRequest,
    ) -> AppResult<RunTestsResponse> {
        let code = payload
            .code
            .clone()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AppError::Validation("code is required".to_string()))?;

        if code.len() as u64 > MAX_SOURCE_CODE_SIZE {
            return Err(AppError::Validation(format!(
                "Code exceeds {} bytes",
                MAX_SOURCE_CODE_SIZE
            )));
        }

        match payload.ticket_id {
            Some(_) => Self::grade_ticket(pool, grader, user, code, payload).await,
            None => Self::grade_adhoc(grader, config, code, payload).await,
        }
    }

    /// Grade against a stored ticket and record the attempt
    async fn grade_ticket(
        pool: &PgPool,
        grader: &Grader,
        user: Option<AuthenticatedUser>,
        code: String,
        payload: RunTestsRequest,
    ) -> AppResult<RunTestsResponse> {
        let user = user.ok_or(AppError::Unauthorized)?;
        let ticket_id = payload
            .ticket_id
            .ok_or_else(|| AppError::Validation("ticketId is required".to_string()))?;
        let ticket = TicketService::find_ticket(pool, &ticket_id).await?;
        let language = ticket.language()?;

        if let Some(requested) = payload.language.as_deref() {
            if Language::parse(requested)? != language {
                return Err(AppError::Validation(format!(
                    "Ticket must be solved in {}",
                    language
                )));
            }
        }

        if payload.test_cases.is_some()
            || payload.reference_code.is_some()
            || payload.validation_code.is_some()
        {
            tracing::debug!(ticket_id = %ticket.id, "Ignoring client-supplied judge material for ticket submission");
        }

        let report = grader
            .grade(GradingJob {
                language,
                code: code.clone(),
                entry_point: ticket.entry_point.clone(),
                cases: ticket.judge_cases(),
                reference_code: ticket.reference_code.clone(),
                validation_code: ticket.validation_code.clone(),
                time_limit_ms: ticket.time_limit_ms.max(0) as u64,
            })
            .await?;

        let (attempt, rewards) =
            RewardService::record_attempt(pool, &user, &ticket, language, &code, &report).await?;

        let mut response = RunTestsResponse::from_report(&report);
        response.attempt_id = Some(attempt.id);
        response.rewards = Some(rewards);

        Ok(response)
    }

    /// Grade against client-supplied cases; nothing is stored
    async fn grade_adhoc(
        grader: &Grader,
        config: &Config,
        code: String,
        payload: RunTestsRequest,
    ) -> AppResult<RunTestsResponse> {
        let cases = payload
            .test_cases
            .filter(|cases| !cases.is_empty())
            .ok_or_else(|| {
                AppError::Validation("testCases are required when no ticketId is given".to_string())
            })?;

        let wants_judge_code = payload.reference_code.is_some() || payload.validation_code.is_some();
        if wants_judge_code && !config.grading.allow_client_judge_code {
            return Err(AppError::Validation(
                "referenceCode and validationCode are only accepted through tickets".to_string(),
            ));
        }

        let language = match payload.language.as_deref() {
            Some(language) => Language::parse(language)?,
            None => Language::JavaScript,
        };

        // Client cases are all visible to the client that sent them
        let cases = cases
            .iter()
            .map(|case| JudgeCase {
                hidden: false,
                ..JudgeCase::from(case)
            })
            .collect();

        let report = grader
            .grade(GradingJob {
                language,
                code,
                entry_point: payload.entry_point,
                cases,
                reference_code: payload.reference_code,
                validation_code: payload.validation_code,
                time_limit_ms: config.sandbox.default_time_limit_ms,
            })
            .await?;

        Ok(RunTestsResponse::from_report(&report))
    }
}
