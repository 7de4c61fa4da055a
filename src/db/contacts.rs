use sea_orm::*;
use uuid::Uuid;

use crate::models::contacts;

/// Fetch a contact by its provider-side identifier.
pub async fn get_contact_by_wa_id(
    db: &DatabaseConnection,
    wa_id: &str,
) -> Result<Option<contacts::Model>, DbErr> {
    contacts::Entity::find()
        .filter(contacts::Column::WaId.eq(wa_id))
        .one(db)
        .await
}

/// Find the contact for a `wa_id`, creating it on first sight.
///
/// Contacts are keyed solely by `wa_id`, so repeated sends to the same
/// number resolve to the same row. A profile name arriving for a contact
/// that has none is filled in; an existing name is never overwritten.
pub async fn find_or_create_contact(
    db: &DatabaseConnection,
    wa_id: &str,
    profile_name: Option<&str>,
) -> Result<contacts::Model, DbErr> {
    if let Some(existing) = get_contact_by_wa_id(db, wa_id).await? {
        if existing.profile_name.is_none() {
            if let Some(name) = profile_name {
                let mut active: contacts::ActiveModel = existing.into();
                active.profile_name = Set(Some(name.to_string()));
                return active.update(db).await;
            }
        }
        return Ok(existing);
    }

    let new_contact = contacts::ActiveModel {
        id: Set(Uuid::new_v4()),
        wa_id: Set(wa_id.to_string()),
        profile_name: Set(profile_name.map(|n| n.to_string())),
        created_at: Set(chrono::Utc::now()),
    };

    new_contact.insert(db).await
}
