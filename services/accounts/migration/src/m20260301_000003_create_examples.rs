use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Examples::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Examples::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Examples::Name).string().not_null())
                    .col(ColumnDef::new(Examples::Active).boolean().not_null())
                    .col(ColumnDef::new(Examples::CreatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Examples::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Examples::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Examples {
    Table,
    Id,
    Name,
    Active,
    CreatedAt,
    UpdatedAt,
}
