//! Customer service.

use thiserror::Error;

use favorites_core::{CustomerId, CustomerName, Email};

use crate::db::{CustomerStore, NewCustomer, RepositoryError};
use crate::models::Customer;

/// Errors from customer operations.
#[derive(Debug, Error)]
pub enum CustomerError {
    /// Another customer already uses this email.
    #[error("email already exists")]
    EmailExists,

    #[error("customer not found")]
    NotFound,

    #[error("database error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for CustomerError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Conflict(_) => Self::EmailExists,
            other => Self::Repository(other),
        }
    }
}

/// Customer CRUD.
pub struct CustomerService<'a> {
    customers: &'a dyn CustomerStore,
}

impl<'a> CustomerService<'a> {
    #[must_use]
    pub const fn new(customers: &'a dyn CustomerStore) -> Self {
        Self { customers }
    }

    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::EmailExists` if any customer has this email.
    pub async fn create(
        &self,
        name: CustomerName,
        email: Email,
    ) -> Result<Customer, CustomerError> {
        if self.customers.find_by_email(&email).await?.is_some() {
            return Err(CustomerError::EmailExists);
        }

        let customer = self
            .customers
            .create(&NewCustomer {
                id: CustomerId::generate(),
                name,
                email,
            })
            .await?;

        tracing::info!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// Get a customer by ID. Absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::Repository` if the lookup fails.
    pub async fn get(&self, id: CustomerId) -> Result<Option<Customer>, CustomerError> {
        Ok(self.customers.find_by_id(id).await?)
    }

    /// List every customer.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::Repository` if the query fails.
    pub async fn list(&self) -> Result<Vec<Customer>, CustomerError> {
        Ok(self.customers.find_all().await?)
    }

    /// Overwrite a customer's name and email.
    ///
    /// The email check runs before the existence check, so an unknown ID with
    /// a taken email reports `EmailExists`.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::EmailExists` if a different customer has the
    /// email.
    /// Returns `CustomerError::NotFound` if the customer does not exist.
    pub async fn update(
        &self,
        id: CustomerId,
        name: CustomerName,
        email: Email,
    ) -> Result<(), CustomerError> {
        if let Some(owner) = self.customers.find_by_email(&email).await?
            && owner.id != id
        {
            return Err(CustomerError::EmailExists);
        }

        if self.customers.find_by_id(id).await?.is_none() {
            return Err(CustomerError::NotFound);
        }

        if !self.customers.update(id, &name, &email).await? {
            // Deleted between the lookup and the write.
            return Err(CustomerError::NotFound);
        }

        tracing::info!(customer_id = %id, "Customer updated");
        Ok(())
    }

    /// Delete a customer. Their favorites are left in place.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if the customer does not exist.
    pub async fn delete(&self, id: CustomerId) -> Result<(), CustomerError> {
        if !self.customers.delete(id).await? {
            return Err(CustomerError::NotFound);
        }

        tracing::info!(customer_id = %id, "Customer deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::db::memory::MemoryStore;

    fn name(s: &str) -> CustomerName {
        CustomerName::parse(s).unwrap()
    }

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemoryStore::new();
        let service = CustomerService::new(&store);

        let created = service
            .create(name("John Doe"), email("john@example.com"))
            .await
            .unwrap();

        let fetched = service.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(service.get(CustomerId::generate()).await.unwrap().is_none());
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_email_conflicts() {
        let store = MemoryStore::new();
        let service = CustomerService::new(&store);

        let original = service
            .create(name("First"), email("a@x.com"))
            .await
            .unwrap();
        assert!(matches!(
            service.create(name("Second"), email("a@x.com")).await,
            Err(CustomerError::EmailExists)
        ));

        let third = service
            .create(name("Third"), email("c@x.com"))
            .await
            .unwrap();
        assert!(matches!(
            service.update(third.id, name("Third"), email("a@x.com")).await,
            Err(CustomerError::EmailExists)
        ));

        service
            .update(original.id, name("First Renamed"), email("a@x.com"))
            .await
            .unwrap();
        let renamed = service.get(original.id).await.unwrap().unwrap();
        assert_eq!(renamed.name.as_str(), "First Renamed");
        assert_eq!(renamed.created_at, original.created_at);
    }

    #[tokio::test]
    async fn test_update_checks_email_before_existence() {
        let store = MemoryStore::new();
        let service = CustomerService::new(&store);
        service
            .create(name("First"), email("a@x.com"))
            .await
            .unwrap();

        assert!(matches!(
            service
                .update(CustomerId::generate(), name("Ghost"), email("a@x.com"))
                .await,
            Err(CustomerError::EmailExists)
        ));
        assert!(matches!(
            service
                .update(CustomerId::generate(), name("Ghost"), email("ghost@x.com"))
                .await,
            Err(CustomerError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();
        let service = CustomerService::new(&store);
        let customer = service
            .create(name("John Doe"), email("john@example.com"))
            .await
            .unwrap();

        service.delete(customer.id).await.unwrap();
        assert!(matches!(
            service.delete(customer.id).await,
            Err(CustomerError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_store_failure_is_repository_error() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let service = CustomerService::new(&store);

        assert!(matches!(
            service.list().await,
            Err(CustomerError::Repository(_))
        ));
    }

    /// A store whose email lookups miss but whose writes hit the unique
    /// index, as when a concurrent request claims the email first.
    struct RacingCustomers;

    #[async_trait]
    impl CustomerStore for RacingCustomers {
        async fn create(&self, _customer: &NewCustomer) -> Result<Customer, RepositoryError> {
            Err(RepositoryError::Conflict("email already exists".to_owned()))
        }

        async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
            Ok(Some(Customer {
                id,
                name: name("John Doe"),
                email: email("john@example.com"),
                created_at: Utc::now(),
            }))
        }

        async fn find_by_email(&self, _email: &Email) -> Result<Option<Customer>, RepositoryError> {
            Ok(None)
        }

        async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn update(
            &self,
            _id: CustomerId,
            _name: &CustomerName,
            _email: &Email,
        ) -> Result<bool, RepositoryError> {
            Err(RepositoryError::Conflict("email already exists".to_owned()))
        }

        async fn delete(&self, _id: CustomerId) -> Result<bool, RepositoryError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_write_conflicts_are_email_exists() {
        let service = CustomerService::new(&RacingCustomers);

        assert!(matches!(
            service.create(name("John Doe"), email("a@x.com")).await,
            Err(CustomerError::EmailExists)
        ));
        assert!(matches!(
            service
                .update(CustomerId::generate(), name("John Doe"), email("a@x.com"))
                .await,
            Err(CustomerError::EmailExists)
        ));
    }
}
