use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InfoItems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(InfoItems::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(InfoItems::Name).string_len(100).not_null())
                    .col(ColumnDef::new(InfoItems::Detail).text().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InfoItems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum InfoItems {
    Table,
    Id,
    Name,
    Detail,
}
