use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Install the store-side change notification: every message insert
/// publishes its row (plus the owning contact's `wa_id`) on the
/// `new_message` channel, which the in-process relay listens on.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE OR REPLACE FUNCTION notify_new_message() RETURNS trigger AS $$
                DECLARE
                    payload json;
                BEGIN
                    SELECT json_build_object(
                        'message_wamid', NEW.message_wamid,
                        'display_phone', c.wa_id,
                        'text_body', NEW.text_body,
                        'timestamp_unix', NEW.timestamp_unix,
                        'direction', NEW.direction
                    )
                    INTO payload
                    FROM contacts c
                    WHERE c.id = NEW.contact_id;

                    PERFORM pg_notify('new_message', payload::text);
                    RETURN NEW;
                END;
                $$ LANGUAGE plpgsql;

                CREATE TRIGGER messages_notify_new_message
                    AFTER INSERT ON messages
                    FOR EACH ROW
                    EXECUTE FUNCTION notify_new_message();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TRIGGER IF EXISTS messages_notify_new_message ON messages;
                DROP FUNCTION IF EXISTS notify_new_message();
                "#,
            )
            .await?;

        Ok(())
    }
}
