//! Create bookings table
//!
//! `ux_bookings_slot` is what keeps a classroom from being double-booked:
//! concurrent inserts for the same (classroom, date, time_slot) are
//! rejected by the database, not by application code.
//!
//! `owner_user_id` holds either a user id or an admin id, so it carries no
//! foreign key.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bookings::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Bookings::Date).date().not_null())
                    .col(ColumnDef::new(Bookings::Classroom).string_len(128).not_null())
                    .col(ColumnDef::new(Bookings::TimeSlot).string_len(16).not_null())
                    .col(ColumnDef::new(Bookings::OwnerUserId).string().not_null())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_bookings_slot")
                    .table(Bookings::Table)
                    .col(Bookings::Classroom)
                    .col(Bookings::Date)
                    .col(Bookings::TimeSlot)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_owner")
                    .table(Bookings::Table)
                    .col(Bookings::OwnerUserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    Date,
    Classroom,
    TimeSlot,
    OwnerUserId,
    CreatedAt,
}
