use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub internal_id: Uuid,

    #[sea_orm(unique)]
    pub username: String,

    /// Argon2id password hash
    pub password: String,

    pub email: String,

    /// Free-form role name, `user` unless set otherwise.
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
