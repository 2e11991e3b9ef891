use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LeaveRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LeaveRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LeaveRequests::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(LeaveRequests::StartDate).date().not_null())
                    .col(ColumnDef::new(LeaveRequests::EndDate).date().not_null())
                    .col(ColumnDef::new(LeaveRequests::Reason).string_len(500))
                    .col(
                        ColumnDef::new(LeaveRequests::Status)
                            .string_len(20)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(LeaveRequests::RequestedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LeaveRequests::ApprovedById).uuid())
                    .col(ColumnDef::new(LeaveRequests::ApprovedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_requests_employee")
                            .from(LeaveRequests::Table, LeaveRequests::EmployeeId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_requests_approver")
                            .from(LeaveRequests::Table, LeaveRequests::ApprovedById)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(LeaveRequests::Table)
                    .col(LeaveRequests::EmployeeId)
                    .name("idx_leave_requests_employee_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(LeaveRequests::Table)
                    .col(LeaveRequests::Status)
                    .col(LeaveRequests::RequestedAt)
                    .name("idx_leave_requests_status_requested_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LeaveRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum LeaveRequests {
    Table,
    Id,
    EmployeeId,
    StartDate,
    EndDate,
    Reason,
    Status,
    RequestedAt,
    ApprovedById,
    ApprovedAt,
}
