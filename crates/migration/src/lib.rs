pub use sea_orm_migration::prelude::*;

mod m20251104_090000_init;
mod m20251118_120000_invoice_recurrence;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251104_090000_init::Migration),
            Box::new(m20251118_120000_invoice_recurrence::Migration),
        ]
    }
}
