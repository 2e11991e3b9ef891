use uuid::Uuid;

use hrdesk_api::error::ApiError;
use hrdesk_api::usecase::leave::{
    CreateLeaveInput, CreateLeaveUseCase, DecideLeaveUseCase, ListEmployeeLeavesUseCase,
    ListPendingLeavesUseCase,
};
use hrdesk_domain::leave::{LeaveDecision, LeaveStatus};

use crate::helpers::{MockLeaveRepo, MockUserRepo, date, leave_request, test_user};

fn create_input(employee_id: Uuid) -> CreateLeaveInput {
    CreateLeaveInput {
        employee_id: Some(employee_id),
        start_date: Some(date(2024, 5, 6)),
        end_date: Some(date(2024, 5, 10)),
        reason: Some("family trip".to_owned()),
    }
}

#[tokio::test]
async fn should_create_pending_request() {
    let user = test_user();
    let leaves = MockLeaveRepo::empty();
    let uc = CreateLeaveUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        leaves: leaves.clone(),
    };

    let request = uc.execute(create_input(user.id)).await.unwrap();
    assert_eq!(request.status, LeaveStatus::Pending);
    assert_eq!(request.employee_id, user.id);
    assert_eq!(request.reason.as_deref(), Some("family trip"));
    assert!(request.approved_at.is_none());
    assert!(request.approved_by_id.is_none());
    assert_eq!(leaves.requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_accept_single_day_leave() {
    let user = test_user();
    let uc = CreateLeaveUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        leaves: MockLeaveRepo::empty(),
    };
    let mut input = create_input(user.id);
    input.end_date = input.start_date;
    assert!(uc.execute(input).await.is_ok());
}

#[tokio::test]
async fn should_reject_end_before_start_without_persisting() {
    let user = test_user();
    let leaves = MockLeaveRepo::empty();
    let uc = CreateLeaveUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        leaves: leaves.clone(),
    };

    let mut input = create_input(user.id);
    input.end_date = Some(date(2024, 5, 1));
    let result = uc.execute(input).await;
    assert!(
        matches!(result, Err(ApiError::InvalidDateRange)),
        "expected InvalidDateRange, got {result:?}"
    );
    assert!(leaves.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_missing_fields_and_unknown_employee() {
    let uc = CreateLeaveUseCase {
        users: MockUserRepo::empty(),
        leaves: MockLeaveRepo::empty(),
    };

    let mut input = create_input(Uuid::now_v7());
    input.start_date = None;
    let result = uc.execute(input).await;
    assert!(matches!(result, Err(ApiError::MissingField("startDate"))));

    let result = uc.execute(create_input(Uuid::now_v7())).await;
    assert!(matches!(result, Err(ApiError::UnknownEmployee)));
}

#[tokio::test]
async fn should_approve_pending_request_once() {
    let pending = leave_request(Uuid::now_v7(), LeaveStatus::Pending, 60);
    let leaves = MockLeaveRepo::new(vec![pending.clone()]);
    let uc = DecideLeaveUseCase {
        leaves: leaves.clone(),
    };

    let approved = uc.execute(pending.id, LeaveDecision::Approve).await.unwrap();
    assert_eq!(approved.status, LeaveStatus::Approved);
    assert!(approved.approved_at.is_some());

    for decision in [LeaveDecision::Approve, LeaveDecision::Reject] {
        let again = uc.execute(pending.id, decision).await;
        assert!(
            matches!(again, Err(ApiError::PendingLeaveNotFound)),
            "expected PendingLeaveNotFound, got {again:?}"
        );
    }
    assert_eq!(
        leaves.requests.lock().unwrap()[0].status,
        LeaveStatus::Approved
    );
}

#[tokio::test]
async fn should_reject_pending_request() {
    let pending = leave_request(Uuid::now_v7(), LeaveStatus::Pending, 60);
    let uc = DecideLeaveUseCase {
        leaves: MockLeaveRepo::new(vec![pending.clone()]),
    };
    let rejected = uc.execute(pending.id, LeaveDecision::Reject).await.unwrap();
    assert_eq!(rejected.status, LeaveStatus::Rejected);
}

#[tokio::test]
async fn should_report_unknown_leave_as_not_found() {
    let uc = DecideLeaveUseCase {
        leaves: MockLeaveRepo::empty(),
    };
    let result = uc.execute(Uuid::now_v7(), LeaveDecision::Approve).await;
    assert!(matches!(result, Err(ApiError::PendingLeaveNotFound)));
}

#[tokio::test]
async fn should_list_employee_requests_newest_first() {
    let employee = Uuid::now_v7();
    let old = leave_request(employee, LeaveStatus::Approved, 3600);
    let new = leave_request(employee, LeaveStatus::Pending, 10);
    let other = leave_request(Uuid::now_v7(), LeaveStatus::Pending, 5);
    let uc = ListEmployeeLeavesUseCase {
        leaves: MockLeaveRepo::new(vec![old.clone(), other, new.clone()]),
    };

    let listed = uc.execute(employee).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![new.id, old.id]);
}

#[tokio::test]
async fn should_list_only_pending_requests() {
    let a = leave_request(Uuid::now_v7(), LeaveStatus::Pending, 100);
    let b = leave_request(Uuid::now_v7(), LeaveStatus::Rejected, 50);
    let c = leave_request(Uuid::now_v7(), LeaveStatus::Pending, 10);
    let uc = ListPendingLeavesUseCase {
        leaves: MockLeaveRepo::new(vec![a.clone(), b, c.clone()]),
    };

    let listed = uc.execute().await.unwrap();
    let ids: Vec<_> = listed.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![c.id, a.id]);
}

#[tokio::test]
async fn should_return_empty_pending_list() {
    let uc = ListPendingLeavesUseCase {
        leaves: MockLeaveRepo::empty(),
    };
    assert!(uc.execute().await.unwrap().is_empty());
}
