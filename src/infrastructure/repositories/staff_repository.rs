//! SeaORM implementation of StaffRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{DomainError, NewStaff, StaffCredentials, StaffRepository};
use crate::models::StaffMember;
use crate::models::staff::{ActiveModel, Column, Entity as StaffEntity};

pub struct SeaOrmStaffRepository {
    db: DatabaseConnection,
}

impl SeaOrmStaffRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StaffRepository for SeaOrmStaffRepository {
    async fn find_all(&self) -> Result<Vec<StaffMember>, DomainError> {
        let staff = StaffEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(staff.into_iter().map(StaffMember::from).collect())
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<StaffCredentials>, DomainError> {
        let staff = StaffEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(staff.map(|model| StaffCredentials {
            password_hash: model.password_hash.clone(),
            staff: StaffMember::from(model),
        }))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let count = StaffEntity::find()
            .filter(Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn create(&self, staff: NewStaff) -> Result<StaffMember, DomainError> {
        if self.exists_by_email(&staff.email).await? {
            return Err(DomainError::Conflict(format!(
                "Staff account {} already exists",
                staff.email
            )));
        }

        let model = ActiveModel {
            name: Set(staff.name),
            role: Set(staff.role),
            email: Set(staff.email),
            password_hash: Set(staff.password_hash),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(StaffMember::from(model))
    }
}
