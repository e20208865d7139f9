mod common;

use std::collections::HashSet;

use anyhow::Result;
use api_service::repository::AchievementRepository;
use api_service::service::UnlockOutcome;
use common::{build_services, player};
use sqlx::PgPool;

#[sqlx::test(migrations = "../migrations")]
async fn test_evaluator_idempotence(pool: PgPool) -> Result<()> {
    let services = build_services(pool);
    let ana = player("Ana");

    let first = services
        .score_service
        .save_score(&ana, 60, false, None)
        .await?;
    let ids: HashSet<_> = first.new_achievements.iter().map(|d| d.id).collect();
    assert_eq!(ids, HashSet::from(["first_steps", "getting_high"]));

    // identical inputs again: everything already unlocked
    let again = services
        .achievement_service
        .evaluate(&ana, 60, false, None)
        .await?;
    assert!(again.is_empty());

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn test_completed_run_grants(pool: PgPool) -> Result<()> {
    let services = build_services(pool);
    let ana = player("Ana");

    let saved = services
        .score_service
        .save_score(&ana, 300, true, Some(200))
        .await?;

    let ids: HashSet<_> = saved.new_achievements.iter().map(|d| d.id).collect();
    assert_eq!(
        ids,
        HashSet::from([
            "first_steps",
            "getting_high",
            "sky_walker",
            "stratosphere",
            "redemption",
            "speed_runner",
        ])
    );

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn test_slow_completion_skips_speed_runner(pool: PgPool) -> Result<()> {
    let services = build_services(pool);
    let ana = player("Ana");

    let saved = services
        .score_service
        .save_score(&ana, 5, true, Some(400))
        .await?;

    let ids: HashSet<_> = saved.new_achievements.iter().map(|d| d.id).collect();
    assert!(ids.contains("redemption"));
    assert!(!ids.contains("speed_runner"));

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn test_third_completion_unlocks_master_jumper(pool: PgPool) -> Result<()> {
    let services = build_services(pool);
    let ana = player("Ana");

    let first = services
        .score_service
        .save_score(&ana, 5, true, Some(400))
        .await?;
    assert!(first.new_achievements.iter().any(|d| d.id == "redemption"));

    let second = services
        .score_service
        .save_score(&ana, 5, true, Some(400))
        .await?;
    assert!(second.new_achievements.is_empty());

    let third = services
        .score_service
        .save_score(&ana, 5, true, Some(400))
        .await?;
    let ids: Vec<_> = third.new_achievements.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec!["master_jumper"]);

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn test_tenth_game_unlocks_persistent(pool: PgPool) -> Result<()> {
    let services = build_services(pool);
    let ana = player("Ana");

    for _ in 0..9 {
        let saved = services
            .score_service
            .save_score(&ana, 0, false, None)
            .await?;
        assert!(saved.new_achievements.is_empty());
    }

    let tenth = services
        .score_service
        .save_score(&ana, 0, false, None)
        .await?;
    let ids: Vec<_> = tenth.new_achievements.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec!["persistent"]);

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn test_manual_unlock_then_duplicate(pool: PgPool) -> Result<()> {
    let achievement_repo = AchievementRepository::new(pool.clone());
    let services = build_services(pool);
    let ana = player("Ana");

    let outcome = services
        .achievement_service
        .unlock(&ana, "redemption")
        .await?;
    match outcome {
        UnlockOutcome::Unlocked(Some(def)) => assert_eq!(def.id, "redemption"),
        other => panic!("expected Unlocked with definition, got {:?}", other),
    }

    let duplicate = services
        .achievement_service
        .unlock(&ana, "redemption")
        .await?;
    assert!(matches!(duplicate, UnlockOutcome::AlreadyUnlocked));

    let unlocks = achievement_repo.unlocks_for_player(&ana).await?;
    assert_eq!(unlocks.len(), 1);

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn test_manual_unlock_unknown_id(pool: PgPool) -> Result<()> {
    let services = build_services(pool);
    let ana = player("Ana");

    let outcome = services
        .achievement_service
        .unlock(&ana, "not_in_catalog")
        .await?;
    assert!(matches!(outcome, UnlockOutcome::Unlocked(None)));

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn test_evaluation_respects_manual_unlocks(pool: PgPool) -> Result<()> {
    let services = build_services(pool);
    let ana = player("Ana");

    services
        .achievement_service
        .unlock(&ana, "first_steps")
        .await?;

    let newly = services
        .achievement_service
        .evaluate(&ana, 10, false, None)
        .await?;
    assert!(newly.is_empty());

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn test_concurrent_evaluations_grant_once(pool: PgPool) -> Result<()> {
    let achievement_repo = AchievementRepository::new(pool.clone());
    let services = build_services(pool);
    let ana = player("Ana");

    let (first, second) = tokio::join!(
        services.achievement_service.evaluate(&ana, 10, false, None),
        services.achievement_service.evaluate(&ana, 10, false, None),
    );
    let first = first?;
    let second = second?;

    let grants = first
        .iter()
        .chain(second.iter())
        .filter(|d| d.id == "first_steps")
        .count();
    assert_eq!(grants, 1, "exactly one evaluation reports the unlock");

    let unlocks = achievement_repo.unlocks_for_player(&ana).await?;
    assert_eq!(unlocks.len(), 1, "exactly one row survives the race");

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn test_achievements_with_status(pool: PgPool) -> Result<()> {
    let services = build_services(pool);
    let ana = player("Ana");

    services
        .achievement_service
        .unlock(&ana, "redemption")
        .await?;

    let statuses = services
        .achievement_service
        .achievements_with_status(&ana)
        .await?;

    let ids: Vec<_> = statuses.iter().map(|s| s.id).collect();
    assert_eq!(
        ids,
        vec![
            "first_steps",
            "getting_high",
            "sky_walker",
            "stratosphere",
            "redemption",
            "speed_runner",
            "persistent",
            "master_jumper",
        ],
        "catalog declaration order"
    );

    for status in &statuses {
        if status.id == "redemption" {
            assert!(status.unlocked);
            assert!(status.unlocked_at.is_some());
        } else {
            assert!(!status.unlocked);
            assert!(status.unlocked_at.is_none());
        }
    }

    Ok(())
}
