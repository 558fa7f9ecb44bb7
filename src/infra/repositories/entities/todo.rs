//! Todo database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Todo;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_name = "iscompleted")]
    pub is_completed: bool,
    #[sea_orm(column_name = "userid")]
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Todo {
    fn from(model: Model) -> Self {
        Todo {
            id: model.id,
            name: model.name,
            description: model.description,
            is_completed: model.is_completed,
            user_id: model.user_id,
        }
    }
}
