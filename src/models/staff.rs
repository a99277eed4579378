use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub role: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaffMember {
    pub id: i32,
    pub name: String,
    pub role: String,
    pub email: String,
}

impl From<Model> for StaffMember {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            role: model.role,
            email: model.email,
        }
    }
}
