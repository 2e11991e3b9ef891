pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_otp_verifications;
mod m20240101_000003_create_phone_grants;
mod m20240101_000004_create_leave_requests;
mod m20240101_000005_create_images;
mod m20240101_000006_create_info_items;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_otp_verifications::Migration),
            Box::new(m20240101_000003_create_phone_grants::Migration),
            Box::new(m20240101_000004_create_leave_requests::Migration),
            Box::new(m20240101_000005_create_images::Migration),
            Box::new(m20240101_000006_create_info_items::Migration),
        ]
    }
}
