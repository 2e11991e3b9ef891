use axum::extract::State;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hrdesk_auth_types::bearer::AuthUser;
use hrdesk_core::envelope::Success;
use hrdesk_domain::leave::{LeaveDecision, LeaveStatus};

use crate::domain::types::LeaveRequest;
use crate::error::ApiError;
use crate::extract::{Json, Path, Query, resource_id};
use crate::state::AppState;
use crate::usecase::leave::{
    CreateLeaveInput, CreateLeaveUseCase, DecideLeaveUseCase, ListEmployeeLeavesUseCase,
    ListPendingLeavesUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestResponse {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    #[serde(serialize_with = "hrdesk_core::serde::to_rfc3339_ms")]
    pub requested_at: DateTime<Utc>,
    pub approved_by_id: Option<Uuid>,
    #[serde(serialize_with = "hrdesk_core::serde::to_rfc3339_ms_opt")]
    pub approved_at: Option<DateTime<Utc>>,
}

impl From<LeaveRequest> for LeaveRequestResponse {
    fn from(r: LeaveRequest) -> Self {
        Self {
            id: r.id,
            employee_id: r.employee_id,
            start_date: r.start_date,
            end_date: r.end_date,
            reason: r.reason,
            status: r.status,
            requested_at: r.requested_at,
            approved_by_id: r.approved_by_id,
            approved_at: r.approved_at,
        }
    }
}

fn to_responses(requests: Vec<LeaveRequest>) -> Vec<LeaveRequestResponse> {
    requests.into_iter().map(Into::into).collect()
}

// ── POST /requestLeaveApi ─────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequest {
    pub employee_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reason: Option<String>,
}

pub async fn create_leave(
    _caller: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateLeaveRequest>,
) -> Result<Success<LeaveRequestResponse>, ApiError> {
    let usecase = CreateLeaveUseCase {
        users: state.user_repo(),
        leaves: state.leave_repo(),
    };
    let request = usecase
        .execute(CreateLeaveInput {
            employee_id: body.employee_id,
            start_date: body.start_date,
            end_date: body.end_date,
            reason: body.reason,
        })
        .await?;
    Ok(Success::ok("leave request submitted", request.into()))
}

// ── POST /approve-leave-admin/{id}, POST /rejectleave/{id} ────────────────────

async fn decide(
    caller: AuthUser,
    state: AppState,
    id: Uuid,
    decision: LeaveDecision,
) -> Result<LeaveRequestResponse, ApiError> {
    tracing::debug!(leave_id = %id, actor = %caller.user_id, ?decision, "deciding leave request");
    let usecase = DecideLeaveUseCase {
        leaves: state.leave_repo(),
    };
    Ok(usecase.execute(id, decision).await?.into())
}

pub async fn approve_leave(
    caller: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Success<LeaveRequestResponse>, ApiError> {
    let id = resource_id(&id, ApiError::PendingLeaveNotFound)?;
    let request = decide(caller, state, id, LeaveDecision::Approve).await?;
    Ok(Success::ok("leave request approved", request))
}

pub async fn reject_leave(
    caller: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Success<LeaveRequestResponse>, ApiError> {
    let id = resource_id(&id, ApiError::PendingLeaveNotFound)?;
    let request = decide(caller, state, id, LeaveDecision::Reject).await?;
    Ok(Success::ok("leave request rejected", request))
}

// ── GET /my-leaves-user?employeeId= ───────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeQuery {
    pub employee_id: Option<String>,
}

pub async fn list_my_leaves(
    _caller: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<EmployeeQuery>,
) -> Result<Success<Vec<LeaveRequestResponse>>, ApiError> {
    let usecase = ListEmployeeLeavesUseCase {
        leaves: state.leave_repo(),
    };
    let employee_id = query
        .employee_id
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingField("employeeId"))?
        .parse::<Uuid>()
        .map_err(|_| ApiError::InvalidField("employeeId"))?;
    let requests = usecase.execute(employee_id).await?;
    Ok(Success::ok("leave requests fetched", to_responses(requests)))
}

// ── GET /allLeavesforadmin ────────────────────────────────────────────────────

pub async fn list_pending_leaves(
    _caller: AuthUser,
    State(state): State<AppState>,
) -> Result<Success<Vec<LeaveRequestResponse>>, ApiError> {
    let usecase = ListPendingLeavesUseCase {
        leaves: state.leave_repo(),
    };
    let requests = usecase.execute().await?;
    Ok(Success::ok("pending leave requests fetched", to_responses(requests)))
}
