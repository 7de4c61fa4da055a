pub use sea_orm_migration::prelude::*;

mod m20250801_000001_create_contacts_table;
mod m20250801_000002_create_messages_table;
mod m20250801_000003_create_message_notify_trigger;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_contacts_table::Migration),
            Box::new(m20250801_000002_create_messages_table::Migration),
            Box::new(m20250801_000003_create_message_notify_trigger::Migration),
        ]
    }
}
