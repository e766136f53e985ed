//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub nickname: String,
    pub real_name: String,
    pub college: String,
    pub student_id: String,
    pub qq: Option<String>,
    pub email: Option<String>,
    pub is_admin: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::direction_managers::Entity")]
    DirectionManagers,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::direction_managers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DirectionManagers.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl Related<super::directions::Entity> for Entity {
    fn to() -> RelationDef {
        super::direction_managers::Relation::Direction.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::direction_managers::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::User;

        User {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
            nickname: self.nickname,
            real_name: self.real_name,
            college: self.college,
            student_id: self.student_id,
            qq: self.qq,
            email: self.email,
            is_admin: self.is_admin,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
