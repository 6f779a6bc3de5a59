//! In-memory stores for tests.
//!
//! Mirrors the `PostgreSQL` constraints: unique usernames and emails are
//! reported as `RepositoryError::Conflict`, and favorite pairs are unique.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use favorites_core::{CustomerId, CustomerName, Email, ProductId, Username};

use super::{
    CustomerStore, FavoriteStore, HealthCheck, NewCustomer, NewUser, RepositoryError, UserStore,
};
use crate::models::{Customer, User};

#[derive(Default)]
struct Tables {
    users: Vec<(User, String)>,
    customers: Vec<Customer>,
    favorites: Vec<(CustomerId, ProductId)>,
}

/// All three tables behind one lock.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored favorite rows, across all customers.
    pub async fn favorite_count(&self) -> usize {
        self.tables.read().await.favorites.len()
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|(u, _)| u.username == user.username) {
            return Err(RepositoryError::Conflict("username already exists".to_owned()));
        }

        let created = User {
            id: user.id,
            username: user.username.clone(),
            created_at: Utc::now(),
        };
        tables
            .users
            .push((created.clone(), user.password_hash.clone()));
        Ok(created)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|(u, _)| &u.username == username)
            .cloned())
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn create(&self, customer: &NewCustomer) -> Result<Customer, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.customers.iter().any(|c| c.email == customer.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let created = Customer {
            id: customer.id,
            name: customer.name.clone(),
            email: customer.email.clone(),
            created_at: Utc::now(),
        };
        tables.customers.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Customer>, RepositoryError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.customers.iter().find(|c| &c.email == email).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        self.check_available()?;
        Ok(self.tables.read().await.customers.clone())
    }

    async fn update(
        &self,
        id: CustomerId,
        name: &CustomerName,
        email: &Email,
    ) -> Result<bool, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables
            .customers
            .iter()
            .any(|c| c.id != id && &c.email == email)
        {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let Some(customer) = tables.customers.iter_mut().find(|c| c.id == id) else {
            return Ok(false);
        };
        customer.name = name.clone();
        customer.email = email.clone();
        Ok(true)
    }

    async fn delete(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let before = tables.customers.len();
        tables.customers.retain(|c| c.id != id);
        Ok(tables.customers.len() < before)
    }
}

#[async_trait]
impl FavoriteStore for MemoryStore {
    async fn add(
        &self,
        customer_id: CustomerId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let pair = (customer_id, product_id);
        if !tables.favorites.contains(&pair) {
            tables.favorites.push(pair);
        }
        Ok(())
    }

    async fn remove_by_product(&self, product_id: ProductId) -> Result<u64, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let before = tables.favorites.len();
        tables.favorites.retain(|(_, p)| *p != product_id);
        Ok((before - tables.favorites.len()) as u64)
    }

    async fn product_ids(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<ProductId>, RepositoryError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .favorites
            .iter()
            .filter(|(c, _)| *c == customer_id)
            .map(|(_, p)| *p)
            .collect())
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_available()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_customer(email: &str) -> NewCustomer {
        NewCustomer {
            id: CustomerId::generate(),
            name: CustomerName::parse("John Doe").unwrap(),
            email: Email::parse(email).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_customer_email_is_unique() {
        let store = MemoryStore::new();
        CustomerStore::create(&store, &new_customer("a@x.com"))
            .await
            .unwrap();

        let err = CustomerStore::create(&store, &new_customer("a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_to_own_email_is_allowed() {
        let store = MemoryStore::new();
        let customer = CustomerStore::create(&store, &new_customer("a@x.com"))
            .await
            .unwrap();
        let name = CustomerName::parse("Jane Doe").unwrap();

        assert!(store.update(customer.id, &name, &customer.email).await.unwrap());

        let updated = store.find_by_id(customer.id).await.unwrap().unwrap();
        assert_eq!(updated.name, name);
        assert_eq!(updated.created_at, customer.created_at);
    }

    #[tokio::test]
    async fn test_favorites_are_idempotent_and_removed_globally() {
        let store = MemoryStore::new();
        let first = CustomerId::generate();
        let second = CustomerId::generate();
        let product = ProductId::new(1);

        store.add(first, product).await.unwrap();
        store.add(first, product).await.unwrap();
        store.add(second, product).await.unwrap();
        store.add(second, ProductId::new(2)).await.unwrap();
        assert_eq!(store.favorite_count().await, 3);

        assert_eq!(store.remove_by_product(product).await.unwrap(), 2);
        assert!(store.product_ids(first).await.unwrap().is_empty());
        assert_eq!(
            store.product_ids(second).await.unwrap(),
            vec![ProductId::new(2)]
        );
    }

    #[tokio::test]
    async fn test_unavailable_store_fails() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(store.ping().await.is_err());
        assert!(store.find_all().await.is_err());

        store.set_unavailable(false);
        assert!(store.ping().await.is_ok());
    }
}
