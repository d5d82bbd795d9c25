use super::*;
use crate::data::Dataset;

fn triangle() -> Dataset {
    Dataset::from_json_str(
        r#"{
            "users": ["u1", "u2", "u3"],
            "items": ["a", "b", "c"],
            "purchases": [[1, 1, 0], [1, 0, 1], [0, 1, 1]],
            "relevant_items": {"u1": ["c"]}
        }"#,
    )
    .unwrap()
}

fn wide() -> Dataset {
    Dataset::from_json_str(
        r#"{
            "users": ["u1", "u2", "u3", "u4"],
            "items": ["a", "b", "c", "d", "e", "f"],
            "purchases": [
                [1, 0, 0, 0, 0, 0],
                [1, 1, 1, 1, 1, 0],
                [0, 1, 1, 0, 0, 1],
                [0, 0, 0, 1, 1, 1]
            ],
            "relevant_items": {"u1": ["d", "f"], "u3": ["a"], "ghost": ["a"]}
        }"#,
    )
    .unwrap()
}

fn pipeline_with(dataset: &Dataset, config: PipelineConfig) -> Pipeline<MemoryRepository> {
    let mut pipeline = Pipeline::new(MemoryRepository::new(), config);
    pipeline.store_dataset(dataset).unwrap();
    pipeline
}

// ========================================================================
// compute_all
// ========================================================================

#[test]
fn test_compute_all_triangle_scenario() {
    let output = compute_dataset(&triangle(), &PipelineConfig::default()).unwrap();

    assert_eq!(output.full.collaborative["u1"], vec!["c".to_string()]);
    assert_eq!(output.full.collaborative["u2"], vec!["b".to_string()]);
    assert_eq!(output.full.collaborative["u3"], vec!["a".to_string()]);

    // One candidate per user, so every strategy agrees.
    for (_, mapping) in output.truncated.iter() {
        assert_eq!(mapping, &output.full.collaborative);
    }

    for row in &output.metrics.rows {
        let m = row.metrics.unwrap();
        assert_eq!(m.as_tuple(), (1.0, 1.0, 1.0, 1.0));
        assert_eq!(m.n_users, 1);
        assert_eq!(m.k, 5);
    }
}

#[test]
fn test_compute_all_truncates_to_top_n() {
    let config = PipelineConfig::default().with_top_n(2);
    let output = compute_dataset(&wide(), &config).unwrap();

    // u1's nearest neighbor is u2, which holds b..e.
    assert_eq!(output.full.collaborative["u1"].len(), 4);
    for (strategy, mapping) in output.truncated.iter() {
        for (user, list) in mapping {
            assert!(list.len() <= 2, "{strategy} {user} has {}", list.len());
            assert_eq!(list.as_slice(), &output.full.get(strategy)[user][..list.len()]);
        }
    }
    assert_eq!(output.metrics.k, 2);
}

#[test]
fn test_compute_all_hybrids_use_candidate_depth() {
    let config = PipelineConfig::default().with_candidate_depth(1).with_top_n(5);
    let output = compute_dataset(&wide(), &config).unwrap();

    for (user, list) in &output.full.hybrid_cascade {
        assert!(list.len() <= 2, "{user}: {list:?}");
        assert_eq!(
            list.first(),
            output.full.collaborative[user]
                .first()
                .or_else(|| output.full.matrix_factorization[user].first())
        );
    }
}

#[test]
fn test_compute_all_never_recommends_owned_items() {
    let dataset = wide();
    let matrix = dataset.interaction_matrix().unwrap();
    let output = compute_all(&matrix, &dataset.relevant(), &PipelineConfig::default()).unwrap();

    for (_, mapping) in output.full.iter() {
        for (u, user) in matrix.users().iter().enumerate() {
            for item in &mapping[user] {
                let i = matrix.items().iter().position(|x| x == item).unwrap();
                assert!(!matrix.has_interacted(u, i), "{user} already owns {item}");
            }
        }
    }
}

#[test]
fn test_compute_all_rejects_invalid_config() {
    let dataset = triangle();
    let matrix = dataset.interaction_matrix().unwrap();
    let config = PipelineConfig::default().with_top_n(0);

    let err = compute_all(&matrix, &dataset.relevant(), &config).unwrap_err();
    assert!(matches!(err, RecError::InvalidParameter { .. }));
}

#[test]
fn test_compute_dataset_rejects_malformed_matrix() {
    let mut dataset = triangle();
    dataset.purchases[1].pop();

    let err = compute_dataset(&dataset, &PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, RecError::MalformedMatrix { .. }));
}

#[test]
fn test_compute_all_empty_universe() {
    let output = compute_dataset(&Dataset::default(), &PipelineConfig::default()).unwrap();

    for (_, mapping) in output.full.iter() {
        assert!(mapping.is_empty());
    }
    assert!(output.metrics.rows.iter().all(|row| row.metrics.is_none()));
}

#[test]
fn test_compute_all_is_deterministic() {
    let a = compute_dataset(&wide(), &PipelineConfig::default()).unwrap();
    let b = compute_dataset(&wide(), &PipelineConfig::default()).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

// ========================================================================
// MetricsReport
// ========================================================================

#[test]
fn test_metrics_report_empty_mapping_has_no_metrics() {
    let mut sets = RecommendationSets::default();
    sets.collaborative
        .insert("u1".to_string(), vec!["c".to_string()]);

    let report = MetricsReport::evaluate(&sets, &triangle().relevant(), 1);

    assert_eq!(report.rows.len(), 4);
    assert!(report.get(Strategy::Collaborative).is_some());
    assert!(report.get(Strategy::HybridCascade).is_none());
}

#[test]
fn test_metrics_report_render() {
    let mut sets = RecommendationSets::default();
    sets.collaborative
        .insert("u1".to_string(), vec!["b".to_string(), "c".to_string()]);

    let text = MetricsReport::evaluate(&sets, &triangle().relevant(), 1).render();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].contains("HitRate"));
    assert!(lines[1].starts_with("Collaborative (cosine)"));
    assert!(lines[1].contains("1.00"));
    assert!(lines[1].contains("0.50"));
    assert!(lines[2].contains('-'));
    assert!(!lines[2].contains("0.00"));
}

// ========================================================================
// Pipeline
// ========================================================================

#[test]
fn test_pipeline_run_persists_all_mappings() {
    let mut pipeline = pipeline_with(&triangle(), PipelineConfig::default());
    let output = pipeline.run().unwrap();

    // data + 8 mappings + isCalculated
    assert_eq!(pipeline.repository().len(), 10);
    assert!(pipeline.is_calculated().unwrap());

    for strategy in Strategy::ALL {
        let full = pipeline.load_mapping(strategy, false).unwrap().unwrap();
        let top = pipeline.load_mapping(strategy, true).unwrap().unwrap();
        assert_eq!(&full, output.full.get(strategy));
        assert_eq!(&top, output.truncated.get(strategy));
    }
}

#[test]
fn test_pipeline_load_dataset_missing() {
    let pipeline = Pipeline::new(MemoryRepository::new(), PipelineConfig::default());
    let err = pipeline.load_dataset().unwrap_err();
    assert!(matches!(err, RecError::MissingKey(ref key) if key == DATA_KEY));
}

#[test]
fn test_pipeline_dataset_roundtrip() {
    let pipeline = pipeline_with(&wide(), PipelineConfig::default());
    assert_eq!(pipeline.load_dataset().unwrap(), wide());
}

#[test]
fn test_pipeline_failed_run_persists_nothing() {
    let mut dataset = triangle();
    dataset.purchases[0][0] = 3;
    let mut pipeline = pipeline_with(&dataset, PipelineConfig::default());

    assert!(matches!(pipeline.run(), Err(RecError::InvalidFlag { .. })));
    // data + isCalculated=false
    assert_eq!(pipeline.repository().len(), 2);
    assert!(!pipeline.is_calculated().unwrap());
}

#[test]
fn test_storing_new_dataset_invalidates_previous_run() {
    let mut pipeline = pipeline_with(&triangle(), PipelineConfig::default());
    pipeline.run().unwrap();
    assert!(pipeline.is_calculated().unwrap());

    let mut malformed = triangle();
    malformed.purchases.pop();
    pipeline.store_dataset(&malformed).unwrap();
    assert!(!pipeline.is_calculated().unwrap());

    let err = pipeline.run().unwrap_err();
    assert!(matches!(err, RecError::MalformedMatrix { .. }));
    assert!(!pipeline.is_calculated().unwrap());
    assert!(pipeline.restore_metrics().unwrap().is_none());
}

#[test]
fn test_rerun_after_new_dataset_marks_calculated() {
    let mut pipeline = pipeline_with(&triangle(), PipelineConfig::default());
    pipeline.run().unwrap();
    pipeline.store_dataset(&wide()).unwrap();
    let output = pipeline.run().unwrap();

    assert!(pipeline.is_calculated().unwrap());
    assert_eq!(pipeline.restore_metrics().unwrap(), Some(output.metrics));
}

#[test]
fn test_pipeline_is_calculated_accepts_string_flag() {
    let mut pipeline = Pipeline::new(MemoryRepository::new(), PipelineConfig::default());
    assert!(!pipeline.is_calculated().unwrap());

    pipeline
        .repository_mut()
        .set(IS_CALCULATED_KEY, Value::String("true".to_string()))
        .unwrap();
    assert!(pipeline.is_calculated().unwrap());

    pipeline
        .repository_mut()
        .set(IS_CALCULATED_KEY, Value::Bool(false))
        .unwrap();
    assert!(!pipeline.is_calculated().unwrap());
}

#[test]
fn test_restore_metrics_before_run() {
    let pipeline = pipeline_with(&triangle(), PipelineConfig::default());
    assert!(pipeline.restore_metrics().unwrap().is_none());
}

#[test]
fn test_restore_metrics_matches_run() {
    let config = PipelineConfig::default().with_top_n(3);
    let mut pipeline = pipeline_with(&wide(), config);
    let output = pipeline.run().unwrap();

    let restored = pipeline.restore_metrics().unwrap().unwrap();
    assert_eq!(restored, output.metrics);
}

#[test]
fn test_restore_metrics_missing_mapping_is_empty() {
    let mut pipeline = pipeline_with(&triangle(), PipelineConfig::default());
    pipeline
        .repository_mut()
        .set(IS_CALCULATED_KEY, Value::Bool(true))
        .unwrap();

    let restored = pipeline.restore_metrics().unwrap().unwrap();
    assert!(restored.rows.iter().all(|row| row.metrics.is_none()));
}

#[test]
fn test_pipeline_rerun_overwrites() {
    let mut pipeline = pipeline_with(&triangle(), PipelineConfig::default());
    let first = pipeline.run().unwrap();
    let snapshot = pipeline.repository().clone();
    let second = pipeline.run().unwrap();

    assert_eq!(first, second);
    assert_eq!(pipeline.into_repository(), snapshot);
}
