use super::problems::count_live_submissions;
use super::{SeaOrmStorage, non_blank, now_ts};
use crate::entity::submission_points::{ActiveModel, Column, Entity as SubmissionPoints};
use crate::entity::submissions::Column as SubmissionColumn;
use crate::errors::{Result, StudioError};
use crate::models::problems::{
    entities::SubmissionPoint,
    requests::{CreateSubmissionPointRequest, UpdateSubmissionPointRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建提交点
    pub async fn create_submission_point_impl(
        &self,
        problem_id: i64,
        req: CreateSubmissionPointRequest,
    ) -> Result<SubmissionPoint> {
        let now = now_ts();

        let model = ActiveModel {
            name: Set(req.name),
            max_score: Set(req.max_score),
            problem_id: Set(problem_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("创建提交点失败: {e}")))?;

        Ok(result.into_submission_point())
    }

    /// 通过 ID 获取提交点
    pub async fn get_submission_point_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<SubmissionPoint>> {
        let result = SubmissionPoints::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询提交点失败: {e}")))?;

        Ok(result.map(|m| m.into_submission_point()))
    }

    /// 列出题目下的提交点
    pub async fn list_submission_points_impl(
        &self,
        problem_id: i64,
    ) -> Result<Vec<SubmissionPoint>> {
        let models = SubmissionPoints::find()
            .filter(Column::ProblemId.eq(problem_id))
            .filter(Column::DeletedAt.is_null())
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询提交点列表失败: {e}")))?;

        Ok(models
            .into_iter()
            .map(|m| m.into_submission_point())
            .collect())
    }

    /// 更新提交点
    pub async fn update_submission_point_impl(
        &self,
        id: i64,
        update: UpdateSubmissionPointRequest,
    ) -> Result<Option<SubmissionPoint>> {
        if self.get_submission_point_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(name) = non_blank(update.name) {
            model.name = Set(name);
        }
        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("更新提交点失败: {e}")))?;

        self.get_submission_point_by_id_impl(id).await
    }

    /// 软删除提交点，仍有有效提交时返回 Conflict
    pub async fn delete_submission_point_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        let result = SubmissionPoints::update_many()
            .col_expr(
                Column::DeletedAt,
                sea_orm::sea_query::Expr::value(now_ts()),
            )
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&txn)
            .await
            .map_err(|e| StudioError::database_operation(format!("删除提交点失败: {e}")))?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        let submissions =
            count_live_submissions(&txn, SubmissionColumn::SubmissionPointId, id).await?;
        if submissions > 0 {
            txn.rollback().await?;
            return Err(StudioError::conflict(format!(
                "Submission point still has {submissions} submission(s)"
            )));
        }

        txn.commit().await?;
        Ok(true)
    }
}
