//! Create faculty roster table
//!
//! Registration is only open to emails present here.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Faculty::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Faculty::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Faculty::FacultyId).string_len(64).not_null())
                    .col(ColumnDef::new(Faculty::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Faculty::Branch).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Faculty::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Faculty::Phone).string_len(32).null())
                    .col(
                        ColumnDef::new(Faculty::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Faculty::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Faculty {
    Table,
    Id,
    FacultyId,
    Name,
    Branch,
    Email,
    Phone,
    CreatedAt,
}
