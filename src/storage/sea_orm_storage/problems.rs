use std::collections::HashMap;

use super::{SeaOrmStorage, non_blank, now_ts};
use crate::entity::directions::{Column as DirectionColumn, Entity as Directions};
use crate::entity::problems::{ActiveModel, Column, Entity as Problems};
use crate::entity::submission_points::{Column as PointColumn, Entity as SubmissionPoints};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{Result, StudioError};
use crate::models::problems::{
    entities::{Problem, SubmissionPoint},
    requests::{CreateProblemRequest, UpdateProblemRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建题目
    ///
    /// 在事务中对所属方向加共享锁，与删除方向互斥。
    pub async fn create_problem_impl(&self, req: CreateProblemRequest) -> Result<Problem> {
        let now = now_ts();
        let txn = self.db.begin().await?;

        let direction = Directions::find_by_id(req.direction_id)
            .filter(DirectionColumn::DeletedAt.is_null())
            .lock_shared()
            .one(&txn)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询方向失败: {e}")))?;
        if direction.is_none() {
            txn.rollback().await?;
            return Err(StudioError::direction_not_found("Direction not found"));
        }

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            direction_id: Set(req.direction_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| StudioError::database_operation(format!("创建题目失败: {e}")))?;
        txn.commit().await?;

        let mut problem = result.into_problem();
        problem.submission_points = Some(Vec::new());
        Ok(problem)
    }

    /// 通过 ID 获取题目（含提交点）
    pub async fn get_problem_by_id_impl(&self, id: i64) -> Result<Option<Problem>> {
        let Some(model) = Problems::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询题目失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut points = self.load_submission_points(&[id]).await?;
        let mut problem = model.into_problem();
        problem.submission_points = Some(points.remove(&id).unwrap_or_default());

        Ok(Some(problem))
    }

    /// 列出题目（含提交点）
    pub async fn list_problems_impl(&self, direction_id: Option<i64>) -> Result<Vec<Problem>> {
        let mut select = Problems::find().filter(Column::DeletedAt.is_null());
        if let Some(direction_id) = direction_id {
            select = select.filter(Column::DirectionId.eq(direction_id));
        }

        let models = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询题目列表失败: {e}")))?;

        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut points = self.load_submission_points(&ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let id = m.id;
                let mut problem = m.into_problem();
                problem.submission_points = Some(points.remove(&id).unwrap_or_default());
                problem
            })
            .collect())
    }

    /// 更新题目
    pub async fn update_problem_impl(
        &self,
        id: i64,
        update: UpdateProblemRequest,
    ) -> Result<Option<Problem>> {
        let exists = Problems::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .count(&self.db)
            .await?
            > 0;
        if !exists {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(title) = non_blank(update.title) {
            model.title = Set(title);
        }
        if let Some(description) = non_blank(update.description) {
            model.description = Set(description);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("更新题目失败: {e}")))?;

        self.get_problem_by_id_impl(id).await
    }

    /// 软删除题目及其提交点
    ///
    /// 先标记题目再统计提交；仍有有效提交时回滚并返回 Conflict。
    pub async fn delete_problem_impl(&self, id: i64) -> Result<bool> {
        let now = now_ts();
        let txn = self.db.begin().await?;

        let result = Problems::update_many()
            .col_expr(Column::DeletedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&txn)
            .await
            .map_err(|e| StudioError::database_operation(format!("删除题目失败: {e}")))?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        let submissions = count_live_submissions(&txn, SubmissionColumn::ProblemId, id).await?;
        if submissions > 0 {
            txn.rollback().await?;
            return Err(StudioError::conflict(format!(
                "Problem still has {submissions} submission(s)"
            )));
        }

        SubmissionPoints::update_many()
            .col_expr(PointColumn::DeletedAt, sea_orm::sea_query::Expr::value(now))
            .filter(PointColumn::ProblemId.eq(id))
            .filter(PointColumn::DeletedAt.is_null())
            .exec(&txn)
            .await
            .map_err(|e| StudioError::database_operation(format!("删除提交点失败: {e}")))?;

        txn.commit().await?;
        Ok(true)
    }

    /// 批量加载提交点
    pub(super) async fn load_submission_points(
        &self,
        problem_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<SubmissionPoint>>> {
        let mut points: HashMap<i64, Vec<SubmissionPoint>> = HashMap::new();
        if problem_ids.is_empty() {
            return Ok(points);
        }

        let models = SubmissionPoints::find()
            .filter(PointColumn::ProblemId.is_in(problem_ids.to_vec()))
            .filter(PointColumn::DeletedAt.is_null())
            .order_by_asc(PointColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询提交点失败: {e}")))?;

        for model in models {
            points
                .entry(model.problem_id)
                .or_default()
                .push(model.into_submission_point());
        }

        Ok(points)
    }
}

/// 按题目或提交点统计有效提交
pub(super) async fn count_live_submissions<C: ConnectionTrait>(
    conn: &C,
    column: SubmissionColumn,
    id: i64,
) -> Result<u64> {
    Submissions::find()
        .filter(column.eq(id))
        .filter(SubmissionColumn::DeletedAt.is_null())
        .count(conn)
        .await
        .map_err(|e| StudioError::database_operation(format!("统计提交数量失败: {e}")))
}
