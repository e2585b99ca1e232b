//! Create classrooms table
//!
//! Smartboards are stored as a JSON array in `smartboards`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Classrooms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Classrooms::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Classrooms::Branch).string_len(64).not_null())
                    .col(ColumnDef::new(Classrooms::Name).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Classrooms::Smartboards)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Classrooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_classrooms_branch_name")
                    .table(Classrooms::Table)
                    .col(Classrooms::Branch)
                    .col(Classrooms::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Classrooms::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Classrooms {
    Table,
    Id,
    Branch,
    Name,
    Smartboards,
    CreatedAt,
}
