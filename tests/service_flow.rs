mod common;

use common::{TestContext, register_request, setup};
use studio_recruit::errors::StudioError;
use studio_recruit::models::auth::LoginRequest;
use studio_recruit::models::directions::requests::UpdateDirectionRequest;
use studio_recruit::models::problems::requests::{
    CreateProblemRequest, UpdateProblemRequest, UpdateSubmissionPointRequest,
};
use studio_recruit::models::scores::requests::{CreateScoreRequest, UpdateScoreRequest};
use studio_recruit::models::submissions::{
    entities::Submission, requests::CreateSubmissionRequest,
};
use studio_recruit::models::users::requests::UpdateUserRequest;
use studio_recruit::services::Actor;

async fn submit(ctx: &TestContext, user_id: i64, problem_id: i64, point_id: i64, content: &str) -> Submission {
    ctx.services
        .submissions
        .create_submission(
            user_id,
            CreateSubmissionRequest {
                problem_id,
                submission_point_id: point_id,
                content: content.to_string(),
            },
        )
        .await
        .expect("submit")
}

fn score_request(submission_id: i64, score: i32) -> CreateScoreRequest {
    CreateScoreRequest {
        submission_id,
        score,
        comment: format!("scored {score}"),
    }
}

#[tokio::test]
async fn duplicate_username_is_rejected_and_original_kept() {
    let ctx = setup().await;
    let alice = ctx.register("alice").await;

    let mut again = register_request("alice", "another1");
    again.nickname = "Impostor".to_string();
    let err = ctx.services.auth.register(again).await.unwrap_err();
    assert!(matches!(err, StudioError::UserAlreadyExists(_)));

    let stored = ctx.services.users.get_user(alice.id).await.unwrap();
    assert_eq!(stored.nickname, "alice-nick");

    // 原密码仍然有效
    let login = ctx
        .services
        .auth
        .login(LoginRequest {
            username: "alice".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(login.user.id, alice.id);
}

#[tokio::test]
async fn login_failures() {
    let ctx = setup().await;
    ctx.register("alice").await;

    let err = ctx
        .services
        .auth
        .login(LoginRequest {
            username: "alice".to_string(),
            password: "wrong-pass".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::InvalidCredential(_)));

    let err = ctx
        .services
        .auth
        .login(LoginRequest {
            username: "nobody".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::UserNotFound(_)));
}

#[tokio::test]
async fn register_validates_input() {
    let ctx = setup().await;
    let err = ctx
        .services
        .auth
        .register(register_request("ab", "secret1"))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::InvalidParams(_)));

    let err = ctx
        .services
        .auth
        .register(register_request("carol", "123"))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::InvalidParams(_)));
}

#[tokio::test]
async fn resubmission_replaces_content() {
    let ctx = setup().await;
    let admin = ctx.admin_actor().await;
    let alice = ctx.register("alice").await;

    let direction = ctx.direction("Backend", vec![]).await;
    let problem = ctx.problem(admin, direction.id, "Build an API").await;
    let point = ctx.point(admin, problem.id, "Code", 100).await;

    let first = submit(&ctx, alice.id, problem.id, point.id, "http://first").await;
    let second = submit(&ctx, alice.id, problem.id, point.id, "http://second").await;
    assert_eq!(first.id, second.id);

    let mine = ctx
        .services
        .submissions
        .list_my_submissions(alice.id, None)
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].content, "http://second");
    assert_eq!(mine[0].total_score, 0);
}

#[tokio::test]
async fn submission_point_must_belong_to_problem() {
    let ctx = setup().await;
    let admin = ctx.admin_actor().await;
    let alice = ctx.register("alice").await;

    let direction = ctx.direction("Backend", vec![]).await;
    let p1 = ctx.problem(admin, direction.id, "First").await;
    let p2 = ctx.problem(admin, direction.id, "Second").await;
    let point_of_p2 = ctx.point(admin, p2.id, "Code", 10).await;

    let err = ctx
        .services
        .submissions
        .create_submission(
            alice.id,
            CreateSubmissionRequest {
                problem_id: p1.id,
                submission_point_id: point_of_p2.id,
                content: "http://repo".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::InvalidReference(_)));

    let err = ctx
        .services
        .submissions
        .create_submission(
            alice.id,
            CreateSubmissionRequest {
                problem_id: 9999,
                submission_point_id: point_of_p2.id,
                content: "http://repo".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::ProblemNotFound(_)));
}

#[tokio::test]
async fn rescoring_updates_in_place() {
    let ctx = setup().await;
    let admin = ctx.admin_actor().await;
    let alice = ctx.register("alice").await;
    let bob = ctx.register("bob").await;

    let direction = ctx.direction("Backend", vec![bob.id]).await;
    let problem = ctx.problem(admin, direction.id, "Build an API").await;
    let point = ctx.point(admin, problem.id, "Code", 100).await;
    let submission = submit(&ctx, alice.id, problem.id, point.id, "http://repo").await;

    let reviewer = Actor::from(&bob);
    let first = ctx
        .services
        .scores
        .create_score(reviewer, score_request(submission.id, 60))
        .await
        .unwrap();
    let second = ctx
        .services
        .scores
        .create_score(reviewer, score_request(submission.id, 75))
        .await
        .unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.user_id, alice.id);

    let scores = ctx
        .services
        .scores
        .list_by_submission(reviewer, submission.id)
        .await
        .unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].score, 75);
    assert_eq!(scores[0].comment, "scored 75");
}

#[tokio::test]
async fn score_above_max_is_rejected() {
    let ctx = setup().await;
    let admin = ctx.admin_actor().await;
    let alice = ctx.register("alice").await;
    let bob = ctx.register("bob").await;

    let direction = ctx.direction("Backend", vec![bob.id]).await;
    let problem = ctx.problem(admin, direction.id, "Build an API").await;
    let point = ctx.point(admin, problem.id, "Code", 50).await;
    let submission = submit(&ctx, alice.id, problem.id, point.id, "http://repo").await;
    let reviewer = Actor::from(&bob);

    let err = ctx
        .services
        .scores
        .create_score(reviewer, score_request(submission.id, 51))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::InvalidParams(_)));

    let err = ctx
        .services
        .scores
        .create_score(reviewer, score_request(submission.id, -1))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::InvalidParams(_)));

    let scores = ctx
        .services
        .scores
        .list_by_reviewer(bob.id, None)
        .await
        .unwrap();
    assert!(scores.is_empty());

    // 修改评分同样校验上限
    let score = ctx
        .services
        .scores
        .create_score(reviewer, score_request(submission.id, 50))
        .await
        .unwrap();
    let err = ctx
        .services
        .scores
        .update_score(
            bob.id,
            score.id,
            UpdateScoreRequest {
                score: 80,
                comment: String::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::InvalidParams(_)));
    let stored = ctx
        .services
        .scores
        .list_by_reviewer(bob.id, None)
        .await
        .unwrap();
    assert_eq!(stored[0].score, 50);
}

#[tokio::test]
async fn reviewing_requires_direction_membership() {
    let ctx = setup().await;
    let admin = ctx.admin_actor().await;
    let alice = ctx.register("alice").await;
    let mallory = ctx.register("mallory").await;

    let direction = ctx.direction("Backend", vec![]).await;
    let problem = ctx.problem(admin, direction.id, "Build an API").await;
    let point = ctx.point(admin, problem.id, "Code", 100).await;
    let submission = submit(&ctx, alice.id, problem.id, point.id, "http://repo").await;

    // 管理员不是负责人也不能评分
    let err = ctx
        .services
        .scores
        .create_score(admin, score_request(submission.id, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::Forbidden(_)));

    let err = ctx
        .services
        .scores
        .create_score(Actor::from(&mallory), score_request(submission.id, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::Forbidden(_)));

    let err = ctx
        .services
        .scores
        .create_score(Actor::from(&mallory), score_request(424242, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::SubmissionNotFound(_)));
}

#[tokio::test]
async fn problem_management_is_guarded() {
    let ctx = setup().await;
    let admin = ctx.admin_actor().await;
    let bob = ctx.register("bob").await;
    let mallory = ctx.register("mallory").await;

    let backend = ctx.direction("Backend", vec![bob.id]).await;
    let manager = Actor::from(&bob);
    let outsider = Actor::from(&mallory);

    // 负责人可以在自己的方向下出题
    let problem = ctx.problem(manager, backend.id, "Build an API").await;

    let err = ctx
        .services
        .problems
        .create_problem(
            outsider,
            CreateProblemRequest {
                title: "Sneaky".to_string(),
                description: "nope".to_string(),
                direction_id: backend.id,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::Forbidden(_)));

    let err = ctx
        .services
        .problems
        .create_problem(
            admin,
            CreateProblemRequest {
                title: "Orphan".to_string(),
                description: "nope".to_string(),
                direction_id: 777,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::DirectionNotFound(_)));

    let point = ctx.point(manager, problem.id, "Code", 100).await;
    let err = ctx
        .services
        .problems
        .update_submission_point(
            outsider,
            point.id,
            UpdateSubmissionPointRequest {
                name: None,
                max_score: Some(10),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::Forbidden(_)));

    let err = ctx
        .services
        .problems
        .update_submission_point(
            manager,
            point.id,
            UpdateSubmissionPointRequest {
                name: None,
                max_score: Some(0),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::InvalidParams(_)));

    let updated = ctx
        .services
        .problems
        .update_submission_point(
            admin,
            point.id,
            UpdateSubmissionPointRequest {
                name: Some(String::new()),
                max_score: Some(80),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Code");
    assert_eq!(updated.max_score, 80);

    let err = ctx
        .services
        .problems
        .delete_problem(outsider, problem.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::Forbidden(_)));
}

#[tokio::test]
async fn problems_and_points_with_submissions_cannot_be_deleted() {
    let ctx = setup().await;
    let admin = ctx.admin_actor().await;
    let alice = ctx.register("alice").await;

    let direction = ctx.direction("Backend", vec![]).await;
    let problem = ctx.problem(admin, direction.id, "Build an API").await;
    let point = ctx.point(admin, problem.id, "Code", 100).await;
    let spare = ctx.point(admin, problem.id, "Docs", 20).await;
    let submission = submit(&ctx, alice.id, problem.id, point.id, "http://repo").await;

    let err = ctx
        .services
        .problems
        .delete_problem(admin, problem.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::Conflict(_)));

    let err = ctx
        .services
        .problems
        .delete_submission_point(admin, point.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::Conflict(_)));

    ctx.services
        .problems
        .delete_submission_point(admin, spare.id)
        .await
        .unwrap();
    let points = ctx
        .services
        .problems
        .list_submission_points(problem.id)
        .await
        .unwrap();
    assert_eq!(points.len(), 1);

    ctx.services
        .submissions
        .delete_submission(alice.id, submission.id)
        .await
        .unwrap();
    ctx.services
        .problems
        .delete_problem(admin, problem.id)
        .await
        .unwrap();

    let err = ctx
        .services
        .problems
        .get_problem(problem.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::ProblemNotFound(_)));
    assert!(
        ctx.storage
            .get_submission_point_by_id(point.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn direction_with_problems_cannot_be_deleted() {
    let ctx = setup().await;
    let admin = ctx.admin_actor().await;
    let bob = ctx.register("bob").await;

    let direction = ctx.direction("Backend", vec![bob.id]).await;
    let problem = ctx.problem(admin, direction.id, "Build an API").await;

    let err = ctx
        .services
        .directions
        .delete_direction(direction.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::Conflict(_)));

    ctx.services
        .problems
        .delete_problem(admin, problem.id)
        .await
        .unwrap();
    ctx.services
        .directions
        .delete_direction(direction.id)
        .await
        .unwrap();

    assert!(
        !ctx.services
            .directions
            .is_manager(direction.id, bob.id)
            .await
            .unwrap()
    );
    assert!(
        ctx.storage
            .list_managed_direction_ids(bob.id)
            .await
            .unwrap()
            .is_empty()
    );
    let err = ctx
        .services
        .directions
        .get_direction(direction.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::DirectionNotFound(_)));
}

#[tokio::test]
async fn direction_manager_replacement() {
    let ctx = setup().await;
    let bob = ctx.register("bob").await;
    let carol = ctx.register("carol").await;

    // 不存在的用户被忽略，重复ID去重
    let direction = ctx
        .direction("Frontend", vec![bob.id, bob.id, 98765])
        .await;
    assert_eq!(direction.managers.len(), 1);
    assert_eq!(direction.managers[0].id, bob.id);

    // 未提供 manager_ids 时保持不变
    let renamed = ctx
        .services
        .directions
        .update_direction(
            direction.id,
            UpdateDirectionRequest {
                name: Some("Web".to_string()),
                description: None,
                manager_ids: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Web");
    assert_eq!(renamed.description, "Frontend direction");
    assert_eq!(renamed.managers.len(), 1);

    let replaced = ctx
        .services
        .directions
        .update_direction(
            direction.id,
            UpdateDirectionRequest {
                manager_ids: Some(vec![carol.id]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(replaced.managers.len(), 1);
    assert_eq!(replaced.managers[0].id, carol.id);
    assert!(
        !ctx.services
            .directions
            .is_manager(direction.id, bob.id)
            .await
            .unwrap()
    );

    // 空列表清空负责人
    let cleared = ctx
        .services
        .directions
        .update_direction(
            direction.id,
            UpdateDirectionRequest {
                manager_ids: Some(vec![]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(cleared.managers.is_empty());
}

#[tokio::test]
async fn ranking_orders_by_total_and_includes_zero_score_users() {
    let ctx = setup().await;
    let admin = ctx.admin_actor().await;
    let alice = ctx.register("alice").await;
    let bob = ctx.register("bob").await;
    let carol = ctx.register("carol").await;
    let reviewer = ctx.register("reviewer").await;

    let direction = ctx.direction("Backend", vec![reviewer.id]).await;
    let problem = ctx.problem(admin, direction.id, "Build an API").await;
    let code = ctx.point(admin, problem.id, "Code", 100).await;
    let docs = ctx.point(admin, problem.id, "Docs", 100).await;

    let a1 = submit(&ctx, alice.id, problem.id, code.id, "a-code").await;
    let a2 = submit(&ctx, alice.id, problem.id, docs.id, "a-docs").await;
    let b1 = submit(&ctx, bob.id, problem.id, code.id, "b-code").await;

    let actor = Actor::from(&reviewer);
    for (submission, score) in [(a1.id, 30), (a2.id, 40), (b1.id, 90)] {
        ctx.services
            .scores
            .create_score(actor, score_request(submission, score))
            .await
            .unwrap();
    }

    let ranking = ctx.services.scores.ranking(None, 100).await.unwrap();
    assert!(ranking.windows(2).all(|w| w[0].score >= w[1].score));
    assert_eq!(ranking[0].user_id, bob.id);
    assert_eq!(ranking[0].score, 90);
    assert_eq!(ranking[1].user_id, alice.id);
    assert_eq!(ranking[1].score, 70);

    let carol_row = ranking
        .iter()
        .find(|r| r.user_id == carol.id)
        .expect("zero-score user listed");
    assert_eq!(carol_row.score, 0);
    assert_eq!(carol_row.nickname, "carol-nick");

    // 同分按用户ID升序
    let zeros: Vec<i64> = ranking
        .iter()
        .filter(|r| r.score == 0)
        .map(|r| r.user_id)
        .collect();
    assert!(zeros.windows(2).all(|w| w[0] < w[1]));

    let top = ctx.services.scores.ranking(None, 1).await.unwrap();
    assert_eq!(top.len(), 1);

    // 按方向筛选时其他方向的分数不计入
    let other = ctx.direction("Design", vec![]).await;
    let filtered = ctx
        .services
        .scores
        .ranking(Some(other.id), 100)
        .await
        .unwrap();
    assert!(filtered.iter().all(|r| r.score == 0));
    assert!(filtered.iter().any(|r| r.user_id == alice.id));

    let err = ctx
        .services
        .scores
        .ranking(Some(5555), 10)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::DirectionNotFound(_)));
}

#[tokio::test]
async fn deleting_submission_removes_its_scores() {
    let ctx = setup().await;
    let admin = ctx.admin_actor().await;
    let alice = ctx.register("alice").await;
    let bob = ctx.register("bob").await;
    let mallory = ctx.register("mallory").await;

    let direction = ctx.direction("Backend", vec![bob.id]).await;
    let problem = ctx.problem(admin, direction.id, "Build an API").await;
    let point = ctx.point(admin, problem.id, "Code", 100).await;
    let submission = submit(&ctx, alice.id, problem.id, point.id, "http://repo").await;
    ctx.services
        .scores
        .create_score(Actor::from(&bob), score_request(submission.id, 88))
        .await
        .unwrap();

    let err = ctx
        .services
        .submissions
        .delete_submission(mallory.id, submission.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::Forbidden(_)));

    ctx.services
        .submissions
        .delete_submission(alice.id, submission.id)
        .await
        .unwrap();

    assert!(
        ctx.storage
            .list_scores_by_submission(submission.id)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        ctx.services
            .scores
            .list_by_user(alice.id, None)
            .await
            .unwrap()
            .is_empty()
    );

    // 再次提交会恢复记录，但旧评分不会回来
    let revived = submit(&ctx, alice.id, problem.id, point.id, "http://repo-v2").await;
    assert_eq!(revived.id, submission.id);
    assert_eq!(revived.total_score, 0);
}

#[tokio::test]
async fn submission_visibility_and_review_queue() {
    let ctx = setup().await;
    let admin = ctx.admin_actor().await;
    let alice = ctx.register("alice").await;
    let bob = ctx.register("bob").await;
    let mallory = ctx.register("mallory").await;

    let backend = ctx.direction("Backend", vec![bob.id]).await;
    let design = ctx.direction("Design", vec![]).await;
    let api = ctx.problem(admin, backend.id, "Build an API").await;
    let logo = ctx.problem(admin, design.id, "Draw a logo").await;
    let api_point = ctx.point(admin, api.id, "Code", 100).await;
    let logo_point = ctx.point(admin, logo.id, "Image", 100).await;

    let s_api = submit(&ctx, alice.id, api.id, api_point.id, "http://api").await;
    submit(&ctx, alice.id, logo.id, logo_point.id, "http://logo").await;

    // 本人、负责人、管理员可见
    for actor in [Actor::from(&alice), Actor::from(&bob), admin] {
        let detail = ctx
            .services
            .submissions
            .get_submission(actor, s_api.id)
            .await
            .unwrap();
        assert_eq!(detail.scores.as_deref().map(<[_]>::len), Some(0));
    }
    let err = ctx
        .services
        .submissions
        .get_submission(Actor::from(&mallory), s_api.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::Forbidden(_)));

    let queue = ctx
        .services
        .submissions
        .list_for_review(bob.id, None)
        .await
        .unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].id, s_api.id);

    // 不在负责范围内的题目返回空列表
    let out_of_scope = ctx
        .services
        .submissions
        .list_for_review(bob.id, Some(logo.id))
        .await
        .unwrap();
    assert!(out_of_scope.is_empty());

    assert!(
        ctx.services
            .submissions
            .list_for_review(mallory.id, None)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn scores_can_only_be_changed_by_their_reviewer() {
    let ctx = setup().await;
    let admin = ctx.admin_actor().await;
    let alice = ctx.register("alice").await;
    let bob = ctx.register("bob").await;
    let carol = ctx.register("carol").await;

    let direction = ctx.direction("Backend", vec![bob.id, carol.id]).await;
    let problem = ctx.problem(admin, direction.id, "Build an API").await;
    let point = ctx.point(admin, problem.id, "Code", 100).await;
    let submission = submit(&ctx, alice.id, problem.id, point.id, "http://repo").await;

    let score = ctx
        .services
        .scores
        .create_score(Actor::from(&bob), score_request(submission.id, 70))
        .await
        .unwrap();

    let err = ctx
        .services
        .scores
        .update_score(
            carol.id,
            score.id,
            UpdateScoreRequest {
                score: 10,
                comment: "mine now".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::Forbidden(_)));

    let err = ctx
        .services
        .scores
        .delete_score(carol.id, score.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::Forbidden(_)));

    // 空评语保留原评语
    let updated = ctx
        .services
        .scores
        .update_score(
            bob.id,
            score.id,
            UpdateScoreRequest {
                score: 72,
                comment: String::new(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.score, 72);
    assert_eq!(updated.comment, "scored 70");

    ctx.services
        .scores
        .delete_score(bob.id, score.id)
        .await
        .unwrap();
    let err = ctx
        .services
        .scores
        .delete_score(bob.id, score.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::Forbidden(_)));
}

#[tokio::test]
async fn user_management() {
    let ctx = setup().await;
    let admin = ctx.admin().await;
    let alice = ctx.register("alice").await;

    let page = ctx
        .services
        .users
        .list_users(Default::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);

    let promoted = ctx
        .services
        .users
        .update_user(
            alice.id,
            UpdateUserRequest {
                nickname: Some("Al".to_string()),
                college: Some("   ".to_string()),
                is_admin: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(promoted.is_admin);
    assert_eq!(promoted.nickname, "Al");
    assert_eq!(promoted.college, "Computer Science");

    let err = ctx
        .services
        .users
        .delete_user(admin.id, admin.id)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::InvalidParams(_)));

    ctx.services
        .users
        .delete_user(alice.id, admin.id)
        .await
        .unwrap();
    let err = ctx.services.users.get_user(alice.id).await.unwrap_err();
    assert!(matches!(err, StudioError::UserNotFound(_)));
}

#[tokio::test]
async fn end_to_end_scoring_flow() {
    let ctx = setup().await;
    let admin = ctx.admin_actor().await;

    let alice = ctx.register("alice").await;
    let login = ctx
        .services
        .auth
        .login(LoginRequest {
            username: "alice".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();
    assert!(!login.token.is_empty());
    assert_eq!(login.expires_in, 24 * 3600);

    let manager = ctx.register("manager").await;
    let direction = ctx.direction("Backend", vec![manager.id]).await;
    let problem = ctx.problem(admin, direction.id, "Build an API").await;
    let point = ctx.point(admin, problem.id, "Code", 100).await;

    let submission = submit(&ctx, alice.id, problem.id, point.id, "http://repo").await;

    let reviewer = Actor::from(&manager);
    ctx.services
        .scores
        .create_score(reviewer, score_request(submission.id, 85))
        .await
        .unwrap();

    let ranking = ctx
        .services
        .scores
        .ranking(Some(direction.id), 10)
        .await
        .unwrap();
    assert_eq!(ranking[0].user_id, alice.id);
    assert_eq!(ranking[0].score, 85);

    ctx.services
        .scores
        .create_score(reviewer, score_request(submission.id, 90))
        .await
        .unwrap();

    let ranking = ctx
        .services
        .scores
        .ranking(Some(direction.id), 10)
        .await
        .unwrap();
    assert_eq!(ranking[0].user_id, alice.id);
    assert_eq!(ranking[0].score, 90);

    let scores = ctx
        .services
        .scores
        .list_by_submission(reviewer, submission.id)
        .await
        .unwrap();
    assert_eq!(scores.len(), 1);

    let detail = ctx
        .services
        .submissions
        .get_submission(Actor::from(&alice), submission.id)
        .await
        .unwrap();
    assert_eq!(detail.total_score, 90);

    let received = ctx
        .services
        .scores
        .list_by_user(alice.id, Some(problem.id))
        .await
        .unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].score, 90);
}

#[tokio::test]
async fn problem_filters_and_partial_problem_update() {
    let ctx = setup().await;
    let admin = ctx.admin_actor().await;
    let alice = ctx.register("alice").await;
    let r1 = ctx.register("reviewer1").await;
    let r2 = ctx.register("reviewer2").await;

    let d1 = ctx.direction("Backend", vec![r1.id]).await;
    let d2 = ctx.direction("Design", vec![r1.id, r2.id]).await;
    let p1 = ctx.problem(admin, d1.id, "P1").await;
    let p2 = ctx.problem(admin, d2.id, "P2").await;
    let pt1 = ctx.point(admin, p1.id, "Code", 100).await;
    let pt2 = ctx.point(admin, p2.id, "Image", 100).await;

    let s1 = submit(&ctx, alice.id, p1.id, pt1.id, "http://p1").await;
    let s2 = submit(&ctx, alice.id, p2.id, pt2.id, "http://p2").await;

    let reviewer1 = Actor::from(&r1);
    let reviewer2 = Actor::from(&r2);
    for (actor, submission, score) in [
        (reviewer1, s1.id, 10),
        (reviewer1, s2.id, 20),
        (reviewer2, s2.id, 5),
    ] {
        ctx.services
            .scores
            .create_score(actor, score_request(submission, score))
            .await
            .unwrap();
    }

    let received = ctx
        .services
        .scores
        .list_by_user(alice.id, Some(p2.id))
        .await
        .unwrap();
    let mut values: Vec<i32> = received.iter().map(|s| s.score).collect();
    values.sort_unstable();
    assert_eq!(values, vec![5, 20]);
    assert!(received.iter().all(|s| s.submission_id == s2.id));

    let given = ctx
        .services
        .scores
        .list_by_reviewer(r1.id, Some(p1.id))
        .await
        .unwrap();
    assert_eq!(given.len(), 1);
    assert_eq!(given[0].score, 10);
    assert_eq!(given[0].submission_id, s1.id);

    let all_given = ctx
        .services
        .scores
        .list_by_reviewer(r1.id, None)
        .await
        .unwrap();
    assert_eq!(all_given.len(), 2);

    let in_d2 = ctx
        .services
        .problems
        .list_problems(Some(d2.id))
        .await
        .unwrap();
    assert_eq!(in_d2.len(), 1);
    assert_eq!(in_d2[0].id, p2.id);
    let all = ctx.services.problems.list_problems(None).await.unwrap();
    assert_eq!(all.len(), 2);

    // 空标题保持不变，描述被覆盖
    let updated = ctx
        .services
        .problems
        .update_problem(
            admin,
            p1.id,
            UpdateProblemRequest {
                title: Some(String::new()),
                description: Some("new".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "P1");
    assert_eq!(updated.description, "new");

    let err = ctx
        .services
        .problems
        .update_problem(
            Actor::from(&r2),
            p1.id,
            UpdateProblemRequest {
                title: Some("Hijacked".to_string()),
                description: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::Forbidden(_)));
    assert_eq!(ctx.services.problems.get_problem(p1.id).await.unwrap().title, "P1");
}

#[tokio::test]
async fn storage_deletes_check_dependents_inside_transaction() {
    let ctx = setup().await;
    let admin = ctx.admin_actor().await;
    let alice = ctx.register("alice").await;

    let direction = ctx.direction("Backend", vec![]).await;
    let problem = ctx.problem(admin, direction.id, "Build an API").await;
    let point = ctx.point(admin, problem.id, "Code", 100).await;
    submit(&ctx, alice.id, problem.id, point.id, "http://repo").await;

    // 直接调用存储层也会拒绝，且不留下部分删除
    let err = ctx.storage.delete_direction(direction.id).await.unwrap_err();
    assert!(matches!(err, StudioError::Conflict(_)));
    assert!(ctx.storage.get_direction_by_id(direction.id).await.unwrap().is_some());

    let err = ctx.storage.delete_problem(problem.id).await.unwrap_err();
    assert!(matches!(err, StudioError::Conflict(_)));
    let kept = ctx.storage.get_problem_by_id(problem.id).await.unwrap().unwrap();
    assert_eq!(kept.submission_points.map(|p| p.len()), Some(1));

    let err = ctx.storage.delete_submission_point(point.id).await.unwrap_err();
    assert!(matches!(err, StudioError::Conflict(_)));
    assert!(ctx.storage.get_submission_point_by_id(point.id).await.unwrap().is_some());

    // 已删除的父记录不能再挂新数据
    let empty = ctx.direction("Empty", vec![]).await;
    assert!(ctx.storage.delete_direction(empty.id).await.unwrap());
    let err = ctx
        .storage
        .create_problem(CreateProblemRequest {
            title: "Late".to_string(),
            description: "late".to_string(),
            direction_id: empty.id,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::DirectionNotFound(_)));

    let spare = ctx.point(admin, problem.id, "Docs", 10).await;
    assert!(ctx.storage.delete_submission_point(spare.id).await.unwrap());
    let err = ctx
        .storage
        .upsert_submission(
            alice.id,
            CreateSubmissionRequest {
                problem_id: problem.id,
                submission_point_id: spare.id,
                content: "http://late".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::SubmissionPointNotFound(_)));
}

#[tokio::test]
async fn deleted_username_can_be_registered_again() {
    let ctx = setup().await;
    let admin = ctx.admin().await;
    let alice = ctx.register("alice").await;

    ctx.services
        .users
        .delete_user(alice.id, admin.id)
        .await
        .unwrap();

    let again = ctx.register("alice").await;
    assert_ne!(again.id, alice.id);
    assert_eq!(again.username, "alice");

    let login = ctx
        .services
        .auth
        .login(LoginRequest {
            username: "alice".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(login.user.id, again.id);

    let err = ctx.services.users.get_user(alice.id).await.unwrap_err();
    assert!(matches!(err, StudioError::UserNotFound(_)));

    // 仍在使用的用户名依旧唯一
    let err = ctx
        .services
        .auth
        .register(register_request("alice", "secret1"))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::UserAlreadyExists(_)));
}

#[tokio::test]
async fn non_ascii_username_is_accepted() {
    let ctx = setup().await;
    let user = ctx
        .services
        .auth
        .register(register_request("张三丰", "secret1"))
        .await
        .unwrap();
    assert_eq!(user.username, "张三丰");

    let err = ctx
        .services
        .auth
        .register(register_request("has space", "secret1"))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::InvalidParams(_)));
}
