//! Async pipeline entry points (feature `async`).

use aprender_rec::pipeline::compute_all_async;
use aprender_rec::prelude::*;

fn triangle() -> Dataset {
    Dataset::from_json_str(
        r#"{
            "users": ["u1", "u2", "u3"],
            "items": ["a", "b", "c"],
            "purchases": [[1, 1, 0], [1, 0, 1], [0, 1, 1]],
            "relevant_items": {"u1": ["c"]}
        }"#,
    )
    .expect("fixture parses")
}

#[tokio::test]
async fn test_compute_all_async_matches_sync() {
    let data = triangle();
    let matrix = data.interaction_matrix().unwrap();
    let config = PipelineConfig::default();

    let sync = compute_all(&matrix, &data.relevant(), &config).unwrap();
    let result = compute_all_async(matrix, data.relevant(), config).await.unwrap();

    assert_eq!(result, sync);
}

#[tokio::test]
async fn test_compute_all_async_propagates_config_error() {
    let data = triangle();
    let config = PipelineConfig::default().with_candidate_depth(0);

    let err = compute_all_async(data.interaction_matrix().unwrap(), data.relevant(), config)
        .await
        .unwrap_err();
    assert!(matches!(err, RecError::InvalidParameter { .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_run_async_persists_results() {
    let mut pipeline = Pipeline::new(MemoryRepository::new(), PipelineConfig::default());
    pipeline.store_dataset(&triangle()).unwrap();

    let output = pipeline.run_async().await.unwrap();

    assert!(pipeline.is_calculated().unwrap());
    assert_eq!(pipeline.restore_metrics().unwrap(), Some(output.metrics));
}
