//! Attempt persistence and reward propagation against PostgreSQL.
//!
//! Skipped unless `TEST_DATABASE_URL` points at a disposable database.

use chrono::NaiveDate;
use serde_json::json;
use sqlx::{PgPool, postgres::PgPoolOptions};
use uuid::Uuid;

use codequest::{
    db::{
        self,
        repositories::{AttemptRepository, TicketRepository, UserRepository},
    },
    judge::{CaseResult, GradeReport, Language},
    middleware::AuthenticatedUser,
    models::{TestCase, Ticket},
    services::RewardService,
};

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(&url)
        .await
        .unwrap();
    db::run_migrations(&pool).await.unwrap();
    Some(pool)
}

fn player() -> AuthenticatedUser {
    let id = Uuid::new_v4();
    AuthenticatedUser {
        id,
        username: format!("player-{}", id.simple()),
        role: "player".to_string(),
    }
}

async fn easy_ticket(pool: &PgPool) -> Ticket {
    let cases = vec![TestCase {
        input: json!([1, 2]),
        expected_output: Some(json!(3)),
        is_hidden: false,
    }];

    TicketRepository::create(
        pool,
        "Add two numbers",
        "Return a + b",
        "easy",
        "javascript",
        &cases,
        None,
        None,
        Some("add"),
        &["math".to_string()],
        5,
        2_000,
        &Uuid::new_v4(),
    )
    .await
    .unwrap()
}

fn report(passed: bool) -> GradeReport {
    GradeReport::from_cases(vec![CaseResult {
        passed,
        input: json!([1, 2]),
        expected_output: Some(json!(3)),
        actual_output: Some(json!(if passed { 3 } else { -1 })),
        error: None,
        is_hidden: false,
        duration_ms: 12,
    }])
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

const CODE: &str = "function add(a, b) { return a + b; }";

#[tokio::test]
async fn resubmission_creates_a_second_attempt() {
    let Some(pool) = test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let user = player();
    let ticket = easy_ticket(&pool).await;

    let (first, first_rewards) = RewardService::record_attempt_on(
        &pool, &user, &ticket, Language::JavaScript, CODE, &report(true), day(1),
    )
    .await
    .unwrap();
    let (second, second_rewards) = RewardService::record_attempt_on(
        &pool, &user, &ticket, Language::JavaScript, CODE, &report(true), day(1),
    )
    .await
    .unwrap();

    assert_ne!(first.id, second.id);
    assert!(first_rewards.first_completion);
    assert_eq!(first_rewards.xp_awarded, 10);
    assert_eq!(first_rewards.points_awarded, 5);
    assert!(!second_rewards.first_completion);
    assert_eq!(second_rewards.xp_awarded, 0);

    let (attempts, total) = AttemptRepository::list_by_user(&pool, &user.id, Some(&ticket.id), 0, 10)
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(attempts.len(), 2);

    let stored = UserRepository::find_by_id(&pool, &user.id).await.unwrap().unwrap();
    assert_eq!(stored.xp, 10);
    assert_eq!(stored.total_points, 5);
    assert_eq!(stored.tickets_completed, 1);
}

#[tokio::test]
async fn concurrent_same_day_submissions_count_once() {
    let Some(pool) = test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let user = player();
    let ticket = easy_ticket(&pool).await;

    let submissions = (0..4).map(|_| {
        let pool = pool.clone();
        let user = user.clone();
        let ticket = ticket.clone();
        tokio::spawn(async move {
            RewardService::record_attempt_on(
                &pool, &user, &ticket, Language::JavaScript, CODE, &report(true), day(5),
            )
            .await
            .unwrap()
        })
    });

    for handle in futures::future::join_all(submissions).await {
        handle.unwrap();
    }

    let stored = UserRepository::find_by_id(&pool, &user.id).await.unwrap().unwrap();
    assert_eq!(stored.current_streak, 1);
    assert_eq!(stored.total_active_days, 1);
    assert_eq!(stored.xp, 10);
    assert_eq!(stored.tickets_completed, 1);
}

#[tokio::test]
async fn streak_follows_consecutive_days() {
    let Some(pool) = test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let user = player();
    let ticket = easy_ticket(&pool).await;

    for d in [1, 2, 3] {
        RewardService::record_attempt_on(
            &pool, &user, &ticket, Language::JavaScript, CODE, &report(true), day(d),
        )
        .await
        .unwrap();
    }

    let stored = UserRepository::find_by_id(&pool, &user.id).await.unwrap().unwrap();
    assert_eq!(stored.current_streak, 3);
    assert_eq!(stored.longest_streak, 3);

    // A gap resets the streak but keeps the record
    let (_, rewards) = RewardService::record_attempt_on(
        &pool, &user, &ticket, Language::JavaScript, CODE, &report(true), day(10),
    )
    .await
    .unwrap();
    assert!(rewards.streak_extended);
    assert_eq!(rewards.current_streak, 1);
    assert_eq!(rewards.longest_streak, 3);
}

#[tokio::test]
async fn failed_attempt_is_stored_without_rewards() {
    let Some(pool) = test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let user = player();
    let ticket = easy_ticket(&pool).await;

    let (attempt, rewards) = RewardService::record_attempt_on(
        &pool, &user, &ticket, Language::JavaScript, CODE, &report(false), day(1),
    )
    .await
    .unwrap();

    assert!(!attempt.badge_earned);
    assert_eq!(attempt.passed_count, 0);
    assert_eq!(rewards.xp_awarded, 0);
    assert!(!rewards.streak_extended);

    let stored = UserRepository::find_by_id(&pool, &user.id).await.unwrap().unwrap();
    assert_eq!(stored.current_streak, 0);
    assert_eq!(stored.xp, 0);
}
