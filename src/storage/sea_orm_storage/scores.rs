//! 评分存储操作

use super::{SeaOrmStorage, now_ts};
use crate::entity::scores::{ActiveModel, Column, Entity as Scores, Relation};
use crate::entity::submissions::Column as SubmissionColumn;
use crate::errors::{Result, StudioError};
use crate::models::scores::{
    entities::Score,
    requests::{CreateScoreRequest, UpdateScoreRequest},
};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select, Set,
};

impl SeaOrmStorage {
    /// 按 (提交, 评分者) upsert 评分
    pub async fn upsert_score_impl(
        &self,
        reviewer_id: i64,
        user_id: i64,
        req: CreateScoreRequest,
    ) -> Result<Score> {
        let now = now_ts();

        let model = ActiveModel {
            score: Set(req.score),
            comment: Set(req.comment),
            user_id: Set(user_id),
            submission_id: Set(req.submission_id),
            reviewer_id: Set(reviewer_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        Scores::insert(model)
            .on_conflict(
                OnConflict::columns([Column::SubmissionId, Column::ReviewerId])
                    .update_columns([
                        Column::Score,
                        Column::Comment,
                        Column::UpdatedAt,
                        Column::DeletedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("保存评分失败: {e}")))?;

        let saved = Scores::find()
            .filter(Column::SubmissionId.eq(req.submission_id))
            .filter(Column::ReviewerId.eq(reviewer_id))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询评分失败: {e}")))?
            .ok_or_else(|| StudioError::score_not_found("Score vanished after save"))?;

        Ok(saved.into_score())
    }

    /// 获取指定评分者的评分
    pub async fn get_score_by_reviewer_impl(
        &self,
        id: i64,
        reviewer_id: i64,
    ) -> Result<Option<Score>> {
        let result = Scores::find_by_id(id)
            .filter(Column::ReviewerId.eq(reviewer_id))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询评分失败: {e}")))?;

        Ok(result.map(|m| m.into_score()))
    }

    /// 列出提交的评分
    pub async fn list_scores_by_submission_impl(&self, submission_id: i64) -> Result<Vec<Score>> {
        let select = Scores::find().filter(Column::SubmissionId.eq(submission_id));
        self.fetch_scores(select, None).await
    }

    /// 列出用户收到的评分
    pub async fn list_scores_by_user_impl(
        &self,
        user_id: i64,
        problem_id: Option<i64>,
    ) -> Result<Vec<Score>> {
        let select = Scores::find().filter(Column::UserId.eq(user_id));
        self.fetch_scores(select, problem_id).await
    }

    /// 列出评分者给出的评分
    pub async fn list_scores_by_reviewer_impl(
        &self,
        reviewer_id: i64,
        problem_id: Option<i64>,
    ) -> Result<Vec<Score>> {
        let select = Scores::find().filter(Column::ReviewerId.eq(reviewer_id));
        self.fetch_scores(select, problem_id).await
    }

    /// 更新评分者自己的评分
    pub async fn update_score_impl(
        &self,
        id: i64,
        reviewer_id: i64,
        update: UpdateScoreRequest,
    ) -> Result<Option<Score>> {
        if self
            .get_score_by_reviewer_impl(id, reviewer_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            score: Set(update.score),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if !update.comment.trim().is_empty() {
            model.comment = Set(update.comment);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("更新评分失败: {e}")))?;

        self.get_score_by_reviewer_impl(id, reviewer_id).await
    }

    /// 软删除评分者自己的评分
    pub async fn delete_score_impl(&self, id: i64, reviewer_id: i64) -> Result<bool> {
        let result = Scores::update_many()
            .col_expr(Column::DeletedAt, Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .filter(Column::ReviewerId.eq(reviewer_id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("删除评分失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 按题目筛选时通过提交表关联
    async fn fetch_scores(
        &self,
        mut select: Select<Scores>,
        problem_id: Option<i64>,
    ) -> Result<Vec<Score>> {
        if let Some(problem_id) = problem_id {
            select = select
                .join(JoinType::InnerJoin, Relation::Submission.def())
                .filter(SubmissionColumn::ProblemId.eq(problem_id))
                .filter(SubmissionColumn::DeletedAt.is_null());
        }

        let models = select
            .filter(Column::DeletedAt.is_null())
            .order_by_desc(Column::UpdatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询评分列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_score()).collect())
    }
}
