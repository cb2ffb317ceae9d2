//! Ticket service
//!
//! Tickets are written by admins (and the generation collaborator acting as
//! one) and read publicly through a redacted view.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{DEFAULT_TIME_LIMIT_MS, MAX_SOURCE_CODE_SIZE},
    db::repositories::TicketRepository,
    error::{AppError, AppResult},
    handlers::tickets::{
        request::{CreateTicketRequest, ListTicketsQuery, UpdateTicketRequest},
        response::{TicketResponse, TicketSummary},
    },
    judge::Language,
    models::{Difficulty, TestCase, Ticket},
    utils::page_window,
};

/// Ticket service for business logic
pub struct TicketService;

impl TicketService {
    /// Create a new ticket
    pub async fn create_ticket(
        pool: &PgPool,
        creator_id: &Uuid,
        payload: CreateTicketRequest,
    ) -> AppResult<TicketResponse> {
        let language = Language::parse(&payload.language)?;
        let difficulty = Difficulty::parse(&payload.difficulty)?;
        let reference_code = non_blank(payload.reference_code.as_deref());
        let validation_code = non_blank(payload.validation_code.as_deref());

        check_judge_material(&payload.test_cases, reference_code, validation_code)?;

        let ticket = TicketRepository::create(
            pool,
            payload.title.trim(),
            &payload.description,
            difficulty.as_str(),
            language.as_str(),
            &payload.test_cases,
            reference_code,
            validation_code,
            non_blank(payload.entry_point.as_deref()),
            &payload.tags,
            payload.points,
            payload
                .time_limit_ms
                .unwrap_or(DEFAULT_TIME_LIMIT_MS as i32),
            creator_id,
        )
        .await?;

        tracing::info!(
            ticket_id = %ticket.id,
            creator_id = %creator_id,
            cases = ticket.test_cases.len(),
            "Ticket created"
        );

        Ok(TicketResponse::from(ticket))
    }

    /// Get the public view of a ticket
    pub async fn get_ticket(pool: &PgPool, id: &Uuid) -> AppResult<TicketResponse> {
        Self::find_ticket(pool, id).await.map(TicketResponse::from)
    }

    /// Load the full ticket, judge material included
    pub async fn find_ticket(pool: &PgPool, id: &Uuid) -> AppResult<Ticket> {
        TicketRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))
    }

    /// Administrative edit
    pub async fn update_ticket(
        pool: &PgPool,
        id: &Uuid,
        payload: UpdateTicketRequest,
    ) -> AppResult<TicketResponse> {
        let existing = Self::find_ticket(pool, id).await?;

        let difficulty = payload
            .difficulty
            .as_deref()
            .map(Difficulty::parse)
            .transpose()?;
        let reference_code = non_blank(payload.reference_code.as_deref());
        let validation_code = non_blank(payload.validation_code.as_deref());

        // The edited ticket must still be gradable
        check_judge_material(
            payload
                .test_cases
                .as_deref()
                .unwrap_or(existing.test_cases.0.as_slice()),
            reference_code.or(existing.reference_code.as_deref()),
            validation_code.or(existing.validation_code.as_deref()),
        )?;

        let ticket = TicketRepository::update(
            pool,
            id,
            payload.title.as_deref().map(str::trim),
            payload.description.as_deref(),
            difficulty.map(|d| d.as_str()),
            payload.test_cases.as_deref(),
            reference_code,
            validation_code,
            non_blank(payload.entry_point.as_deref()),
            payload.tags.as_deref(),
            payload.points,
            payload.time_limit_ms,
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))?;

        tracing::info!(ticket_id = %ticket.id, "Ticket updated");

        Ok(TicketResponse::from(ticket))
    }

    /// List tickets
    pub async fn list_tickets(
        pool: &PgPool,
        query: &ListTicketsQuery,
    ) -> AppResult<(Vec<TicketSummary>, i64, u32, u32)> {
        let (page, per_page, offset) = page_window(query.page, query.per_page);

        let difficulty = query
            .difficulty
            .as_deref()
            .map(Difficulty::parse)
            .transpose()?;
        let language = query.language.as_deref().map(Language::parse).transpose()?;

        let (tickets, total) = TicketRepository::list(
            pool,
            offset,
            per_page as i64,
            difficulty.map(|d| d.as_str()),
            language.map(|l| l.as_str()),
            query.tag.as_deref(),
        )
        .await?;

        Ok((
            tickets.into_iter().map(TicketSummary::from).collect(),
            total,
            page,
            per_page,
        ))
    }
}

fn non_blank(code: Option<&str>) -> Option<&str> {
    code.filter(|c| !c.trim().is_empty())
}

/// Every case needs an expected output unless a reference solution or a
/// validation routine can judge it
fn check_judge_material(
    cases: &[TestCase],
    reference_code: Option<&str>,
    validation_code: Option<&str>,
) -> AppResult<()> {
    for code in [reference_code, validation_code].into_iter().flatten() {
        if code.len() as u64 > MAX_SOURCE_CODE_SIZE {
            return Err(AppError::Validation(format!(
                "Judge code exceeds {} bytes",
                MAX_SOURCE_CODE_SIZE
            )));
        }
    }

    let missing = cases.iter().position(|c| c.expected_output.is_none());
    if let Some(index) = missing {
        if reference_code.is_none() && validation_code.is_none() {
            return Err(AppError::Validation(format!(
                "Test case {} has no expected output and the ticket has no reference solution",
                index + 1
            )));
        }
    }

    Ok(())
}
