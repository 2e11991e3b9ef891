use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use hrdesk_domain::leave::{LeaveDecision, LeaveStatus, validate_range};

use crate::domain::repository::{LeaveRepository, UserRepository};
use crate::domain::types::{LeaveRequest, REASON_MAX_LEN};
use crate::error::ApiError;
use crate::usecase::check_len;

// ── Create ────────────────────────────────────────────────────────────────────

pub struct CreateLeaveInput {
    pub employee_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reason: Option<String>,
}

pub struct CreateLeaveUseCase<U: UserRepository, L: LeaveRepository> {
    pub users: U,
    pub leaves: L,
}

impl<U: UserRepository, L: LeaveRepository> CreateLeaveUseCase<U, L> {
    pub async fn execute(&self, input: CreateLeaveInput) -> Result<LeaveRequest, ApiError> {
        let employee_id = input
            .employee_id
            .ok_or(ApiError::MissingField("employeeId"))?;
        let start_date = input.start_date.ok_or(ApiError::MissingField("startDate"))?;
        let end_date = input.end_date.ok_or(ApiError::MissingField("endDate"))?;
        validate_range(start_date, end_date)?;
        let reason = input
            .reason
            .map(|r| r.trim().to_owned())
            .filter(|r| !r.is_empty());
        if let Some(reason) = reason.as_deref() {
            check_len("reason", reason, REASON_MAX_LEN)?;
        }

        self.users
            .find_by_id(employee_id)
            .await?
            .ok_or(ApiError::UnknownEmployee)?;

        let request = LeaveRequest {
            id: Uuid::now_v7(),
            employee_id,
            start_date,
            end_date,
            reason,
            status: LeaveStatus::Pending,
            requested_at: Utc::now(),
            approved_by_id: None,
            approved_at: None,
        };
        self.leaves.create(&request).await?;

        tracing::info!(leave_id = %request.id, employee_id = %employee_id, "leave requested");
        Ok(request)
    }
}

// ── Decide ────────────────────────────────────────────────────────────────────

pub struct DecideLeaveUseCase<L: LeaveRepository> {
    pub leaves: L,
}

impl<L: LeaveRepository> DecideLeaveUseCase<L> {
    /// Approve or reject a `Pending` request.
    ///
    /// Decided and unknown ids both yield `PendingLeaveNotFound`.
    pub async fn execute(
        &self,
        id: Uuid,
        decision: LeaveDecision,
    ) -> Result<LeaveRequest, ApiError> {
        let request = self
            .leaves
            .decide(id, decision, Utc::now())
            .await?
            .ok_or(ApiError::PendingLeaveNotFound)?;

        tracing::info!(leave_id = %id, status = %request.status, "leave decided");
        Ok(request)
    }
}

// ── Queries ───────────────────────────────────────────────────────────────────

pub struct ListEmployeeLeavesUseCase<L: LeaveRepository> {
    pub leaves: L,
}

impl<L: LeaveRepository> ListEmployeeLeavesUseCase<L> {
    pub async fn execute(&self, employee_id: Uuid) -> Result<Vec<LeaveRequest>, ApiError> {
        self.leaves.list_by_employee(employee_id).await
    }
}

pub struct ListPendingLeavesUseCase<L: LeaveRepository> {
    pub leaves: L,
}

impl<L: LeaveRepository> ListPendingLeavesUseCase<L> {
    pub async fn execute(&self) -> Result<Vec<LeaveRequest>, ApiError> {
        self.leaves.list_by_status(LeaveStatus::Pending).await
    }
}
