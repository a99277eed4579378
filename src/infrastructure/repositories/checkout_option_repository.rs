//! SeaORM implementation of CheckoutOptionRepository (shipping and payment methods)

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{CheckoutOptionRepository, DomainError, PaymentMethod, ShippingMethod};
use crate::models::payment::{self, Entity as PaymentEntity};
use crate::models::shipping::{self, Entity as ShippingEntity};

pub struct SeaOrmCheckoutOptionRepository {
    db: DatabaseConnection,
}

impl SeaOrmCheckoutOptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<shipping::Model> for ShippingMethod {
    fn from(model: shipping::Model) -> Self {
        Self {
            id: model.id,
            method_name: model.method_name,
            fee: model.fee,
        }
    }
}

impl From<payment::Model> for PaymentMethod {
    fn from(model: payment::Model) -> Self {
        Self {
            id: model.id,
            method_name: model.method_name,
            status: model.status,
        }
    }
}

#[async_trait]
impl CheckoutOptionRepository for SeaOrmCheckoutOptionRepository {
    async fn list_shipping(&self) -> Result<Vec<ShippingMethod>, DomainError> {
        let methods = ShippingEntity::find()
            .order_by_asc(shipping::Column::Id)
            .all(&self.db)
            .await?;
        Ok(methods.into_iter().map(ShippingMethod::from).collect())
    }

    async fn list_payments(&self, active_only: bool) -> Result<Vec<PaymentMethod>, DomainError> {
        let mut query = PaymentEntity::find().order_by_asc(payment::Column::Id);
        if active_only {
            query = query.filter(payment::Column::Status.eq(payment::STATUS_ACTIVE));
        }
        let methods = query.all(&self.db).await?;
        Ok(methods.into_iter().map(PaymentMethod::from).collect())
    }

    async fn create_shipping(
        &self,
        method_name: &str,
        fee: f64,
    ) -> Result<ShippingMethod, DomainError> {
        if fee < 0.0 {
            return Err(DomainError::validation("Shipping fee cannot be negative"));
        }
        let model = shipping::ActiveModel {
            method_name: Set(method_name.to_string()),
            fee: Set(fee),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(ShippingMethod::from(model))
    }

    async fn create_payment(
        &self,
        method_name: &str,
        status: &str,
    ) -> Result<PaymentMethod, DomainError> {
        let model = payment::ActiveModel {
            method_name: Set(method_name.to_string()),
            status: Set(status.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(PaymentMethod::from(model))
    }
}
