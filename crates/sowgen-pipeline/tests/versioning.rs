//! Version assignment under concurrency

mod common;

use common::{fenced, loft_request, orchestrator, repository, CannedClient, THOROUGH_PAYLOAD};
use pretty_assertions::assert_eq;
use sowgen_domain::ProjectId;
use sowgen_pipeline::SowRepository;
use std::collections::BTreeSet;
use std::sync::Arc;

#[tokio::test]
async fn concurrent_generations_get_consecutive_versions() {
    let repo = repository();
    let client = Arc::new(CannedClient::new(fenced(THOROUGH_PAYLOAD)));
    let pipeline = Arc::new(orchestrator(client, repo.clone()));
    let project = ProjectId::new();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pipeline = Arc::clone(&pipeline);
        handles.push(tokio::spawn(async move {
            pipeline.generate_scope_of_work(loft_request(project)).await
        }));
    }

    let mut versions = BTreeSet::new();
    for handle in handles {
        let result = handle.await.unwrap();
        assert!(result.success);
        versions.insert(result.sow.unwrap().version);
    }

    // Exactly {1..=8}: no duplicates, no gaps
    assert_eq!(versions, (1..=8).collect::<BTreeSet<u32>>());
}

#[tokio::test]
async fn versions_are_returned_oldest_first() {
    let repo = repository();
    let client = Arc::new(CannedClient::new(fenced(THOROUGH_PAYLOAD)));
    let pipeline = orchestrator(client, repo.clone());
    let project = ProjectId::new();

    for _ in 0..3 {
        let result = pipeline.generate_scope_of_work(loft_request(project)).await;
        assert!(result.success);
    }

    let versions = repo.get_versions_by_project(project).await;
    let numbers: Vec<u32> = versions.iter().map(|s| s.version).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[tokio::test]
async fn projects_version_independently() {
    let repo = repository();
    let client = Arc::new(CannedClient::new(fenced(THOROUGH_PAYLOAD)));
    let pipeline = orchestrator(client, repo.clone());

    let first = ProjectId::new();
    let second = ProjectId::new();
    pipeline.generate_scope_of_work(loft_request(first)).await;
    pipeline.generate_scope_of_work(loft_request(first)).await;
    let result = pipeline.generate_scope_of_work(loft_request(second)).await;

    assert_eq!(result.sow.unwrap().version, 1);
    assert_eq!(repo.get_versions_by_project(first).await.len(), 2);
    assert_eq!(repo.get_versions_by_project(second).await.len(), 1);
}
