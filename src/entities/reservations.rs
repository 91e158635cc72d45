use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub internal_id: Uuid,

    #[sea_orm(unique)]
    pub reservation_id: i32,

    pub start_date: Date,

    pub end_date: Date,

    /// Internal id of the owning customer.
    pub customer_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::InternalId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Customer,

    #[sea_orm(has_many = "super::reservation_services::Entity")]
    ReservationServices,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::reservation_services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReservationServices.def()
    }
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        super::reservation_services::Relation::Service.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::reservation_services::Relation::Reservation.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
