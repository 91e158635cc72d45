use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub internal_id: Uuid,

    #[sea_orm(unique)]
    pub service_id: i32,

    pub name: String,

    pub note: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reservation_services::Entity")]
    ReservationServices,
}

impl Related<super::reservation_services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReservationServices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
