//! SeaORM implementation of CustomerRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{CustomerCredentials, CustomerRepository, DomainError, NewCustomer};
use crate::models::Customer;
use crate::models::customer::{ActiveModel, Column, Entity as CustomerEntity};

pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, DomainError> {
        let customers = CustomerEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(customers.into_iter().map(Customer::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        let customer = CustomerEntity::find_by_id(id).one(&self.db).await?;
        Ok(customer.map(Customer::from))
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<CustomerCredentials>, DomainError> {
        let customer = CustomerEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(customer.map(|model| CustomerCredentials {
            password_hash: model.password_hash.clone(),
            customer: Customer::from(model),
        }))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let count = CustomerEntity::find()
            .filter(Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn create(&self, customer: NewCustomer) -> Result<Customer, DomainError> {
        if self.exists_by_email(&customer.email).await? {
            return Err(DomainError::Conflict(
                "Email is already registered".to_string(),
            ));
        }

        let now = chrono::Utc::now().to_rfc3339();
        let new_customer = ActiveModel {
            name: Set(customer.name),
            email: Set(customer.email),
            password_hash: Set(customer.password_hash),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        // The UNIQUE index still catches a concurrent registration
        let result = new_customer.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                DomainError::Conflict("Email is already registered".to_string())
            } else {
                DomainError::from(e)
            }
        })?;

        Ok(Customer::from(result))
    }
}
