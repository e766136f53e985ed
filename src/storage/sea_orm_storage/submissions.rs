use std::collections::HashMap;

use super::{SeaOrmStorage, now_ts};
use crate::entity::problems::{Column as ProblemColumn, Entity as Problems};
use crate::entity::submission_points::{Column as PointColumn, Entity as SubmissionPoints};
use crate::entity::scores::{Column as ScoreColumn, Entity as Scores};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions, Model, Relation};
use crate::errors::{Result, StudioError};
use crate::models::submissions::{entities::Submission, requests::CreateSubmissionRequest};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 按 (用户, 题目, 提交点) upsert 提交
    ///
    /// 命中已软删除的记录时会将其恢复并覆盖内容。题目与提交点在事务中加共享锁，
    /// 与删除题目、删除提交点互斥。
    pub async fn upsert_submission_impl(
        &self,
        user_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        let now = now_ts();
        let txn = self.db.begin().await?;

        let problem = Problems::find_by_id(req.problem_id)
            .filter(ProblemColumn::DeletedAt.is_null())
            .lock_shared()
            .one(&txn)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询题目失败: {e}")))?;
        if problem.is_none() {
            txn.rollback().await?;
            return Err(StudioError::problem_not_found("Problem not found"));
        }

        let point = SubmissionPoints::find_by_id(req.submission_point_id)
            .filter(PointColumn::ProblemId.eq(req.problem_id))
            .filter(PointColumn::DeletedAt.is_null())
            .lock_shared()
            .one(&txn)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询提交点失败: {e}")))?;
        if point.is_none() {
            txn.rollback().await?;
            return Err(StudioError::submission_point_not_found(
                "Submission point not found",
            ));
        }

        let model = ActiveModel {
            content: Set(req.content),
            user_id: Set(user_id),
            problem_id: Set(req.problem_id),
            submission_point_id: Set(req.submission_point_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        Submissions::insert(model)
            .on_conflict(
                OnConflict::columns([
                    Column::UserId,
                    Column::ProblemId,
                    Column::SubmissionPointId,
                ])
                .update_columns([Column::Content, Column::UpdatedAt, Column::DeletedAt])
                .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .map_err(|e| StudioError::database_operation(format!("保存提交失败: {e}")))?;
        txn.commit().await?;

        let saved = Submissions::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::ProblemId.eq(req.problem_id))
            .filter(Column::SubmissionPointId.eq(req.submission_point_id))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| StudioError::submission_not_found("Submission vanished after save"))?;

        let mut submissions = self.attach_totals(vec![saved]).await?;
        submissions
            .pop()
            .ok_or_else(|| StudioError::submission_not_found("Submission vanished after save"))
    }

    /// 通过 ID 获取提交（含总分）
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let Some(model) = Submissions::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询提交失败: {e}")))?
        else {
            return Ok(None);
        };

        Ok(self.attach_totals(vec![model]).await?.pop())
    }

    /// 列出用户的提交
    pub async fn list_submissions_by_user_impl(
        &self,
        user_id: i64,
        problem_id: Option<i64>,
    ) -> Result<Vec<Submission>> {
        let mut select = Submissions::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::DeletedAt.is_null());
        if let Some(problem_id) = problem_id {
            select = select.filter(Column::ProblemId.eq(problem_id));
        }

        let models = select
            .order_by_desc(Column::UpdatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询提交列表失败: {e}")))?;

        self.attach_totals(models).await
    }

    /// 列出若干方向下（有效题目）的提交
    pub async fn list_submissions_in_directions_impl(
        &self,
        direction_ids: &[i64],
        problem_id: Option<i64>,
    ) -> Result<Vec<Submission>> {
        if direction_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut select = Submissions::find()
            .join(JoinType::InnerJoin, Relation::Problem.def())
            .filter(ProblemColumn::DirectionId.is_in(direction_ids.to_vec()))
            .filter(ProblemColumn::DeletedAt.is_null())
            .filter(Column::DeletedAt.is_null());
        if let Some(problem_id) = problem_id {
            select = select.filter(Column::ProblemId.eq(problem_id));
        }

        let models = select
            .order_by_desc(Column::UpdatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询待评提交失败: {e}")))?;

        self.attach_totals(models).await
    }

    /// 删除用户自己的提交，同时软删除其评分
    pub async fn delete_submission_impl(&self, id: i64, user_id: i64) -> Result<bool> {
        let now = now_ts();
        let txn = self.db.begin().await?;

        let owned = Submissions::find_by_id(id)
            .filter(Column::UserId.eq(user_id))
            .filter(Column::DeletedAt.is_null())
            .one(&txn)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询提交失败: {e}")))?;

        if owned.is_none() {
            txn.rollback().await?;
            return Ok(false);
        }

        Scores::update_many()
            .col_expr(ScoreColumn::DeletedAt, Expr::value(now))
            .filter(ScoreColumn::SubmissionId.eq(id))
            .filter(ScoreColumn::DeletedAt.is_null())
            .exec(&txn)
            .await
            .map_err(|e| StudioError::database_operation(format!("删除评分失败: {e}")))?;

        Submissions::update_many()
            .col_expr(Column::DeletedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| StudioError::database_operation(format!("删除提交失败: {e}")))?;

        txn.commit().await?;
        Ok(true)
    }

    /// 汇总有效评分并转换为业务模型
    async fn attach_totals(&self, models: Vec<Model>) -> Result<Vec<Submission>> {
        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let totals = self.sum_scores(&ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let total = totals.get(&m.id).copied().unwrap_or(0);
                m.into_submission(total)
            })
            .collect())
    }

    async fn sum_scores(&self, submission_ids: &[i64]) -> Result<HashMap<i64, i64>> {
        let mut totals = HashMap::new();
        if submission_ids.is_empty() {
            return Ok(totals);
        }

        let rows: Vec<(i64, i32)> = Scores::find()
            .select_only()
            .column(ScoreColumn::SubmissionId)
            .column(ScoreColumn::Score)
            .filter(ScoreColumn::SubmissionId.is_in(submission_ids.to_vec()))
            .filter(ScoreColumn::DeletedAt.is_null())
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("汇总评分失败: {e}")))?;

        for (submission_id, score) in rows {
            *totals.entry(submission_id).or_insert(0) += i64::from(score);
        }

        Ok(totals)
    }
}
