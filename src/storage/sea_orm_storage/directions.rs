use std::collections::HashMap;

use super::{SeaOrmStorage, non_blank, now_ts};
use crate::entity::direction_managers::{
    ActiveModel as ManagerActiveModel, Column as ManagerColumn, Entity as DirectionManagers,
    Relation as ManagerRelation,
};
use crate::entity::directions::{ActiveModel, Column, Entity as Directions};
use crate::entity::problems::{Column as ProblemColumn, Entity as Problems};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{Result, StudioError};
use crate::models::{
    directions::{
        entities::Direction,
        requests::{CreateDirectionRequest, UpdateDirectionRequest},
    },
    users::responses::UserBrief,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建方向并写入负责人
    pub async fn create_direction_impl(&self, req: CreateDirectionRequest) -> Result<Direction> {
        let now = now_ts();

        let txn = self.db.begin().await?;

        let model = ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| StudioError::database_operation(format!("创建方向失败: {e}")))?;

        replace_managers(&txn, model.id, &req.manager_ids).await?;

        txn.commit().await?;

        self.get_direction_by_id_impl(model.id)
            .await?
            .ok_or_else(|| StudioError::direction_not_found("Direction vanished after create"))
    }

    /// 通过 ID 获取方向（含负责人）
    pub async fn get_direction_by_id_impl(&self, id: i64) -> Result<Option<Direction>> {
        let Some(model) = Directions::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询方向失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut managers = self.load_managers(&[id]).await?;
        let mut direction = model.into_direction();
        direction.managers = managers.remove(&id).unwrap_or_default();

        Ok(Some(direction))
    }

    /// 列出所有方向（含负责人）
    pub async fn list_directions_impl(&self) -> Result<Vec<Direction>> {
        let models = Directions::find()
            .filter(Column::DeletedAt.is_null())
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询方向列表失败: {e}")))?;

        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut managers = self.load_managers(&ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let id = m.id;
                let mut direction = m.into_direction();
                direction.managers = managers.remove(&id).unwrap_or_default();
                direction
            })
            .collect())
    }

    /// 更新方向
    pub async fn update_direction_impl(
        &self,
        id: i64,
        update: UpdateDirectionRequest,
    ) -> Result<Option<Direction>> {
        let exists = Directions::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .count(&self.db)
            .await?
            > 0;
        if !exists {
            return Ok(None);
        }

        let txn = self.db.begin().await?;

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(name) = non_blank(update.name) {
            model.name = Set(name);
        }
        if let Some(description) = non_blank(update.description) {
            model.description = Set(description);
        }
        model
            .update(&txn)
            .await
            .map_err(|e| StudioError::database_operation(format!("更新方向失败: {e}")))?;

        if let Some(manager_ids) = update.manager_ids {
            replace_managers(&txn, id, &manager_ids).await?;
        }

        txn.commit().await?;

        self.get_direction_by_id_impl(id).await
    }

    /// 清空负责人并软删除方向
    ///
    /// 先标记方向再统计题目，同一事务内完成；仍有有效题目时回滚并返回 Conflict。
    pub async fn delete_direction_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        let result = Directions::update_many()
            .col_expr(
                Column::DeletedAt,
                sea_orm::sea_query::Expr::value(now_ts()),
            )
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&txn)
            .await
            .map_err(|e| StudioError::database_operation(format!("删除方向失败: {e}")))?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        let problems = count_live_problems(&txn, id).await?;
        if problems > 0 {
            txn.rollback().await?;
            return Err(StudioError::conflict(format!(
                "Direction still has {problems} problem(s)"
            )));
        }

        DirectionManagers::delete_many()
            .filter(ManagerColumn::DirectionId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| StudioError::database_operation(format!("清空方向负责人失败: {e}")))?;

        txn.commit().await?;
        Ok(true)
    }

    /// 检查用户是否为方向负责人
    pub async fn is_direction_manager_impl(&self, direction_id: i64, user_id: i64) -> Result<bool> {
        let count = DirectionManagers::find()
            .filter(ManagerColumn::DirectionId.eq(direction_id))
            .filter(ManagerColumn::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询方向负责人失败: {e}")))?;

        Ok(count > 0)
    }

    /// 列出用户负责的方向 ID
    pub async fn list_managed_direction_ids_impl(&self, user_id: i64) -> Result<Vec<i64>> {
        DirectionManagers::find()
            .select_only()
            .column(ManagerColumn::DirectionId)
            .join(JoinType::InnerJoin, ManagerRelation::Direction.def())
            .filter(ManagerColumn::UserId.eq(user_id))
            .filter(Column::DeletedAt.is_null())
            .order_by_asc(ManagerColumn::DirectionId)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询负责方向失败: {e}")))
    }

    /// 批量加载方向负责人
    async fn load_managers(&self, direction_ids: &[i64]) -> Result<HashMap<i64, Vec<UserBrief>>> {
        let mut managers: HashMap<i64, Vec<UserBrief>> = HashMap::new();
        if direction_ids.is_empty() {
            return Ok(managers);
        }

        let rows = DirectionManagers::find()
            .filter(ManagerColumn::DirectionId.is_in(direction_ids.to_vec()))
            .order_by_asc(ManagerColumn::UserId)
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询方向负责人失败: {e}")))?;

        for (link, user) in rows {
            if let Some(user) = user.filter(|u| u.deleted_at.is_none()) {
                managers.entry(link.direction_id).or_default().push(UserBrief {
                    id: user.id,
                    username: user.username,
                    nickname: user.nickname,
                });
            }
        }

        Ok(managers)
    }
}

// 方向下的有效题目数量
async fn count_live_problems<C: ConnectionTrait>(conn: &C, direction_id: i64) -> Result<u64> {
    Problems::find()
        .filter(ProblemColumn::DirectionId.eq(direction_id))
        .filter(ProblemColumn::DeletedAt.is_null())
        .count(conn)
        .await
        .map_err(|e| StudioError::database_operation(format!("统计题目数量失败: {e}")))
}

/// 整体替换方向负责人，忽略不存在的用户
async fn replace_managers<C: ConnectionTrait>(
    conn: &C,
    direction_id: i64,
    manager_ids: &[i64],
) -> Result<()> {
    DirectionManagers::delete_many()
        .filter(ManagerColumn::DirectionId.eq(direction_id))
        .exec(conn)
        .await
        .map_err(|e| StudioError::database_operation(format!("清空方向负责人失败: {e}")))?;

    let mut wanted = manager_ids.to_vec();
    wanted.sort_unstable();
    wanted.dedup();
    if wanted.is_empty() {
        return Ok(());
    }

    let existing: Vec<i64> = Users::find()
        .select_only()
        .column(UserColumn::Id)
        .filter(UserColumn::Id.is_in(wanted))
        .filter(UserColumn::DeletedAt.is_null())
        .into_tuple::<i64>()
        .all(conn)
        .await
        .map_err(|e| StudioError::database_operation(format!("查询负责人失败: {e}")))?;

    if existing.is_empty() {
        return Ok(());
    }

    let rows = existing.into_iter().map(|user_id| ManagerActiveModel {
        direction_id: Set(direction_id),
        user_id: Set(user_id),
    });

    DirectionManagers::insert_many(rows)
        .exec_without_returning(conn)
        .await
        .map_err(|e| StudioError::database_operation(format!("写入方向负责人失败: {e}")))?;

    Ok(())
}
