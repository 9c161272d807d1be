//! In-memory repository feeding the dashboard pipeline

mod common;

use common::{legacy_record, BatchBuilder};
use uniform_production::dashboard::{DashboardPipeline, DashboardQuery};
use uniform_production::database::{BatchRepository, InMemoryBatchRepository};
use uniform_production::{BatchStatus, PaceLabel, StatusFilter};

#[tokio::test]
async fn test_legacy_records_render() {
    let repository = InMemoryBatchRepository::from_raw_records(vec![
        legacy_record(1, "Class 4 Skirts"),
        legacy_record(2, "Class 6 Skirts"),
    ]);

    let batches = repository.fetch_active().await.unwrap();
    assert_eq!(batches.len(), 2);

    let view = DashboardPipeline::default().build(&batches, &DashboardQuery::default());
    for card in &view.batches {
        assert_eq!(card.progress.volume, 50);
        assert_eq!(card.progress.completed_items, 30);
        assert_eq!(card.progress.percentage, 60);
        assert_eq!(card.pace, PaceLabel::OnFire);
        assert!(!card.batch.is_delayed());
        assert!(!card.is_gold_performer);
    }
    assert_eq!(view.summary.total_volume, 100);
    assert_eq!(view.ranking.bottleneck.unwrap().stage_label, "Stage 2");
}

#[tokio::test]
async fn test_only_active_batches_reach_the_dashboard() {
    let repository = InMemoryBatchRepository::new(vec![
        BatchBuilder::new(1).percent_complete(50).created_on(1).build(),
        BatchBuilder::new(2)
            .percent_complete(100)
            .created_on(2)
            .build()
            .with_status(BatchStatus::Completed),
        BatchBuilder::new(3).percent_complete(10).created_on(3).build(),
    ]);

    let batches = repository.fetch_active().await.unwrap();
    let ids: Vec<i64> = batches.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![3, 1]);

    let archived = repository
        .fetch_by_status(&BatchStatus::Completed)
        .await
        .unwrap();
    assert_eq!(archived.len(), 1);
}

#[tokio::test]
async fn test_repository_as_trait_object() {
    let repository: Box<dyn BatchRepository> = Box::new(InMemoryBatchRepository::default());
    assert!(repository.fetch_active().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_inserted_batches_are_visible_to_the_next_pass() {
    let repository = InMemoryBatchRepository::default();
    let pipeline = DashboardPipeline::default();
    let query = DashboardQuery::new("", StatusFilter::NotStarted);

    repository
        .insert(BatchBuilder::new(1).percent_complete(0).build())
        .await;
    let first = pipeline.build(&repository.fetch_active().await.unwrap(), &query);
    assert_eq!(first.batches.len(), 1);

    repository
        .insert(BatchBuilder::new(2).percent_complete(30).build())
        .await;
    let second = pipeline.build(&repository.fetch_active().await.unwrap(), &query);
    assert_eq!(second.batches.len(), 1);
    assert_eq!(second.summary.active_batches, 2);
}

#[test]
fn test_fetch_from_blocking_context() {
    let repository = InMemoryBatchRepository::from_raw_records(vec![legacy_record(7, "Class 9 Ties")]);
    let batches = tokio_test::block_on(repository.fetch_active()).unwrap();
    assert_eq!(batches[0].id, 7);
    assert_eq!(batches[0].daily_target, 15);
}
