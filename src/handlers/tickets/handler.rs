//! Ticket handler implementations

use axum::{Json, extract::State, http::StatusCode};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::extract::{ApiJson, ApiPath, ApiQuery},
    middleware::AuthenticatedUser,
    services::TicketService,
    state::AppState,
};

use super::{
    request::{CreateTicketRequest, ListTicketsQuery, UpdateTicketRequest},
    response::{TicketResponse, TicketsListResponse},
};

/// List tickets (paginated, public view)
pub async fn list_tickets(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListTicketsQuery>,
) -> AppResult<Json<TicketsListResponse>> {
    let (tickets, total, page, per_page) = TicketService::list_tickets(state.db(), &query).await?;

    Ok(Json(TicketsListResponse {
        tickets,
        total,
        page,
        per_page,
    }))
}

/// Get a ticket without hidden cases or judge code
pub async fn get_ticket(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<TicketResponse>> {
    let ticket = TicketService::get_ticket(state.db(), &id).await?;
    Ok(Json(ticket))
}

/// Create a ticket (admin only)
pub async fn create_ticket(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ApiJson(payload): ApiJson<CreateTicketRequest>,
) -> AppResult<(StatusCode, Json<TicketResponse>)> {
    auth_user.require_admin()?;
    payload.validate()?;

    let ticket = TicketService::create_ticket(state.db(), &auth_user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Edit a ticket (admin only)
pub async fn update_ticket(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateTicketRequest>,
) -> AppResult<Json<TicketResponse>> {
    auth_user.require_admin()?;
    payload.validate()?;

    let ticket = TicketService::update_ticket(state.db(), &id, payload).await?;

    Ok(Json(ticket))
}
