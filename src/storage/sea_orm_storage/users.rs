use super::{SeaOrmStorage, non_blank, now_ts};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, StudioError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
        responses::UserListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = now_ts();

        let model = ActiveModel {
            username: Set(req.username.clone()),
            password_hash: Set(req.password),
            nickname: Set(req.nickname),
            real_name: Set(req.real_name),
            college: Set(req.college),
            student_id: Set(req.student_id),
            qq: Set(non_blank(req.qq)),
            email: Set(non_blank(req.email)),
            is_admin: Set(req.is_admin),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
                StudioError::user_already_exists(format!("Username {} already exists", req.username))
            } else {
                StudioError::database_operation(format!("创建用户失败: {e}"))
            }
        })?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: PaginationQuery,
    ) -> Result<UserListResponse> {
        let (page, size) = query.normalized();

        let select = Users::find()
            .filter(Column::DeletedAt.is_null())
            .order_by_asc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| StudioError::database_operation(format!("查询用户总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| StudioError::database_operation(format!("查询用户页数失败: {e}")))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // 先检查用户是否存在
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };

        if let Some(nickname) = non_blank(update.nickname) {
            model.nickname = Set(nickname);
        }
        if let Some(real_name) = non_blank(update.real_name) {
            model.real_name = Set(real_name);
        }
        if let Some(college) = non_blank(update.college) {
            model.college = Set(college);
        }
        if let Some(student_id) = non_blank(update.student_id) {
            model.student_id = Set(student_id);
        }
        if let Some(qq) = non_blank(update.qq) {
            model.qq = Set(Some(qq));
        }
        if let Some(email) = non_blank(update.email) {
            model.email = Set(Some(email));
        }
        if let Some(is_admin) = update.is_admin {
            model.is_admin = Set(is_admin);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("更新用户失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// 软删除用户
    ///
    /// 用户名改写为墓碑名以释放唯一索引，墓碑名含空格，不会与合法用户名冲突。
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(
                Column::DeletedAt,
                sea_orm::sea_query::Expr::value(now_ts()),
            )
            .col_expr(
                Column::Username,
                sea_orm::sea_query::Expr::value(deleted_username(id)),
            )
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("删除用户失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计管理员数量
    pub async fn count_admins_impl(&self) -> Result<u64> {
        Users::find()
            .filter(Column::IsAdmin.eq(true))
            .filter(Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("统计管理员失败: {e}")))
    }
}

// 软删除后占位的用户名
fn deleted_username(id: i64) -> String {
    format!("~deleted {id}")
}
