use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PhoneGrants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PhoneGrants::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PhoneGrants::Phone).string_len(20).not_null())
                    .col(
                        ColumnDef::new(PhoneGrants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PhoneGrants::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PhoneGrants::ConsumedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PhoneGrants::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PhoneGrants {
    Table,
    Id,
    Phone,
    CreatedAt,
    ExpiresAt,
    ConsumedAt,
}
