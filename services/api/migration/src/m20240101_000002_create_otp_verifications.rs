use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OtpVerifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OtpVerifications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OtpVerifications::Phone)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OtpVerifications::Code)
                            .string_len(6)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OtpVerifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OtpVerifications::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OtpVerifications::IsUsed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(OtpVerifications::Table)
                    .col(OtpVerifications::Code)
                    .col(OtpVerifications::CreatedAt)
                    .name("idx_otp_verifications_code_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OtpVerifications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum OtpVerifications {
    Table,
    Id,
    Phone,
    Code,
    CreatedAt,
    ExpiresAt,
    IsUsed,
}
