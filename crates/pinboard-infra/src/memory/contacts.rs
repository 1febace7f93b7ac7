use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use pinboard_core::domain::{Contact, ContactFields};
use pinboard_core::error::RepoError;
use pinboard_core::ports::{BaseRepository, ContactRepository};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Contact>,
    last_id: i64,
}

/// In-memory contact table.
#[derive(Default)]
pub struct InMemoryContactRepository {
    table: RwLock<Table>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Contact, i64> for InMemoryContactRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Contact>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn list(&self) -> Result<Vec<Contact>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.values().rev().cloned().collect())
    }

    async fn create(&self, fields: ContactFields) -> Result<Contact, RepoError> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let contact = Contact {
            id: table.last_id,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            created_at: Utc::now(),
        };
        table.rows.insert(contact.id, contact.clone());

        tracing::debug!(contact_id = contact.id, "Contact inserted (memory)");
        Ok(contact)
    }

    async fn update(&self, id: i64, fields: ContactFields) -> Result<Contact, RepoError> {
        let mut table = self.table.write().await;
        let contact = table.rows.get_mut(&id).ok_or(RepoError::NotFound)?;

        contact.name = fields.name;
        contact.email = fields.email;
        contact.phone = fields.phone;

        Ok(contact.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str) -> ContactFields {
        ContactFields {
            name: name.to_string(),
            email: None,
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_id_descending() {
        let repo = InMemoryContactRepository::new();
        for name in ["a", "b", "c"] {
            repo.create(fields(name)).await.unwrap();
        }

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_only() {
        let repo = InMemoryContactRepository::new();
        let created = repo.create(fields("old")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                ContactFields {
                    name: "new".to_string(),
                    email: Some("new@example.com".to_string()),
                    phone: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.email.as_deref(), Some("new@example.com"));
    }
}
