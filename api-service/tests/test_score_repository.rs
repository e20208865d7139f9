mod common;

use anyhow::Result;
use api_service::repository::ScoreRepository;
use common::player;
use sqlx::PgPool;

#[sqlx::test(migrations = "../migrations")]
async fn test_insert_and_best_height(pool: PgPool) -> Result<()> {
    let repo = ScoreRepository::new(pool);
    let ana = player("Ana");

    assert_eq!(repo.best_height(&ana).await?, None);

    let score = repo.insert(&ana, 42, false, None).await?;
    assert_eq!(score.player_name.as_str(), "Ana");
    assert_eq!(score.height, 42);
    assert!(!score.completed);
    assert!(score.completion_time.is_none());

    repo.insert(&ana, 17, false, None).await?;
    assert_eq!(repo.best_height(&ana).await?, Some(42));

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn test_counts_per_player(pool: PgPool) -> Result<()> {
    let repo = ScoreRepository::new(pool);
    let ana = player("Ana");
    let rui = player("Rui");

    repo.insert(&ana, 10, false, None).await?;
    repo.insert(&ana, 20, true, Some(200)).await?;
    repo.insert(&rui, 30, true, Some(100)).await?;

    assert_eq!(repo.count_by_player(&ana).await?, 2);
    assert_eq!(repo.count_completed_by_player(&ana).await?, 1);
    assert_eq!(repo.count_by_player(&rui).await?, 1);
    assert_eq!(repo.count_completed_by_player(&rui).await?, 1);

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn test_leaderboard_ordering(pool: PgPool) -> Result<()> {
    let repo = ScoreRepository::new(pool);

    repo.insert(&player("P1"), 100, false, None).await?;
    repo.insert(&player("P2"), 250, false, None).await?;
    repo.insert(&player("P2"), 50, false, None).await?;
    repo.insert(&player("P3"), 250, true, Some(280)).await?;

    let entries = repo.leaderboard(10).await?;

    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["P3", "P2", "P1"]);

    assert_eq!(entries[0].height, 250);
    assert_eq!(entries[0].completions, 1);
    assert_eq!(entries[0].best_time, Some(280));

    assert_eq!(entries[1].height, 250);
    assert_eq!(entries[1].completions, 0);
    assert_eq!(entries[1].best_time, None);

    assert_eq!(entries[2].height, 100);

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn test_leaderboard_one_entry_per_player(pool: PgPool) -> Result<()> {
    let repo = ScoreRepository::new(pool);
    let ana = player("Ana");

    repo.insert(&ana, 10, false, None).await?;
    repo.insert(&ana, 90, true, Some(250)).await?;
    repo.insert(&ana, 40, true, Some(150)).await?;

    let entries = repo.leaderboard(10).await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].height, 90);
    assert_eq!(entries[0].completions, 2);
    assert_eq!(entries[0].best_time, Some(150));

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn test_leaderboard_limit(pool: PgPool) -> Result<()> {
    let repo = ScoreRepository::new(pool);

    for i in 0..5 {
        repo.insert(&player(&format!("Player{}", i)), i * 10, false, None)
            .await?;
    }

    assert_eq!(repo.leaderboard(3).await?.len(), 3);
    assert_eq!(repo.leaderboard(10).await?.len(), 5);

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn test_totals(pool: PgPool) -> Result<()> {
    let repo = ScoreRepository::new(pool);
    let ana = player("Ana");

    repo.insert(&ana, 10, false, None).await?;
    repo.insert(&ana, 20, false, None).await?;
    repo.insert(&ana, 30, false, None).await?;
    repo.insert(&ana, 40, true, Some(250)).await?;

    let totals = repo.totals().await?;
    assert_eq!(totals.total_plays, 4);
    assert_eq!(totals.completions, 1);
    assert_eq!(totals.average_height, Some(25.0));

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn test_totals_empty(pool: PgPool) -> Result<()> {
    let totals = ScoreRepository::new(pool).totals().await?;

    assert_eq!(totals.total_plays, 0);
    assert_eq!(totals.completions, 0);
    assert!(totals.average_height.is_none());

    Ok(())
}
