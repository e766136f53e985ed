//! 方向实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "directions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::direction_managers::Entity")]
    DirectionManagers,
    #[sea_orm(has_many = "super::problems::Entity")]
    Problems,
}

impl Related<super::direction_managers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DirectionManagers.def()
    }
}

impl Related<super::problems::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Problems.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        super::direction_managers::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::direction_managers::Relation::Direction.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型，负责人与题目由调用方填充
    pub fn into_direction(self) -> crate::models::directions::entities::Direction {
        use crate::models::directions::entities::Direction;

        Direction {
            id: self.id,
            name: self.name,
            description: self.description,
            managers: Vec::new(),
            problems: None,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
