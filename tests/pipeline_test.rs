//! End-to-end tests for the taxonomy pipeline
//!
//! Exercises the folder index, filter pipeline, aggregator and chart
//! layout together on realistic snapshots.

use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

use taxonomy_resolver::chart::{PieChartLayout, SegmentKey};
use taxonomy_resolver::filter::{
    CategoryChoice, Choice, FilterCriteria, FilterPipeline, SortDirection, SortKey, SortSpec,
};
use taxonomy_resolver::stats::{AggregationResult, StatusAggregator};
use taxonomy_resolver::taxonomy::{FolderNode, FolderScope, FolderTreeIndex, FolderType, TestAsset};

/// Project(1) → Environment(10) → {Date(100) → {Feature(1000), Feature(1001)}, Date(101)}
///            → Environment(11) → Date(110) → Feature(1100)
fn sample_tree() -> Vec<FolderNode> {
    vec![FolderNode::new(1, "Payments", FolderType::Project)
        .with_child(
            FolderNode::new(10, "Staging", FolderType::Environment)
                .with_child(
                    FolderNode::new(100, "2024-04-01", FolderType::DeploymentDate)
                        .with_child(FolderNode::new(1000, "Login", FolderType::Feature))
                        .with_child(FolderNode::new(1001, "Refunds", FolderType::Feature)),
                )
                .with_child(FolderNode::new(101, "2024-04-15", FolderType::DeploymentDate)),
        )
        .with_child(
            FolderNode::new(11, "Production", FolderType::Environment).with_child(
                FolderNode::new(110, "2024-05-01", FolderType::DeploymentDate)
                    .with_child(FolderNode::new(1100, "Login", FolderType::Feature)),
            ),
        )]
}

fn sample_assets() -> Vec<TestAsset> {
    vec![
        TestAsset::new(5)
            .with_folder(1000)
            .with_status("Pass")
            .with_environment("staging")
            .with_categories("Login", "OAuth", "Google")
            .with_creator("Kim")
            .with_assignee("Lee")
            .with_timestamps("2024-04-02T09:00:00Z", "2024-04-03T09:00:00Z"),
        TestAsset::new(3)
            .with_folder(1000)
            .with_status("Fail")
            .with_environment("staging")
            .with_categories("Login", "OAuth", "Apple")
            .with_creator("park")
            .with_timestamps("2024-04-01T09:00:00Z", "2024-04-05T09:00:00Z"),
        TestAsset::new(8)
            .with_folder(1001)
            .with_status("Block")
            .with_environment("staging")
            .with_categories("Refunds", "", "")
            .with_creator("Kim"),
        TestAsset::new(1)
            .with_folder(101)
            .with_environment("staging")
            .with_categories("Login", "Password", ""),
        TestAsset::new(12)
            .with_folder(1100)
            .with_status("N/A")
            .with_environment("production")
            .with_categories("Login", "OAuth", "")
            .with_assignee("Lee"),
        TestAsset::new(7)
            .with_folder(1)
            .with_status("pass")
            .with_environment("production"),
    ]
}

fn ids(assets: &[&TestAsset]) -> Vec<i64> {
    assets.iter().map(|a| a.id).collect()
}

#[cfg(test)]
mod folder_index_tests {
    use super::*;
    #[allow(unused_imports)]
    use pretty_assertions::assert_eq;

    #[test]
    fn test_feature_scope_is_singleton() {
        let index = FolderTreeIndex::build(&sample_tree());
        for feature in [1000, 1001, 1100] {
            assert_eq!(
                index.collect_descendant_leaf_ids(feature),
                FolderScope::Only(BTreeSet::from([feature]))
            );
        }
    }

    #[test]
    fn test_environment_scope_is_union_of_dates_and_features() {
        let index = FolderTreeIndex::build(&sample_tree());
        for env in [10, 11] {
            let mut expected = BTreeSet::new();
            for date in index.children(env) {
                if date.folder_type == FolderType::DeploymentDate {
                    expected.insert(date.id);
                    for feature in index.children(date.id) {
                        if feature.folder_type == FolderType::Feature {
                            expected.insert(feature.id);
                        }
                    }
                }
            }
            assert_eq!(index.collect_descendant_leaf_ids(env), FolderScope::Only(expected));
        }
    }

    #[test]
    fn test_environment_with_childless_date() {
        let tree = vec![FolderNode::new(1, "E", FolderType::Environment)
            .with_child(
                FolderNode::new(2, "D1", FolderType::DeploymentDate)
                    .with_child(FolderNode::new(3, "F1", FolderType::Feature)),
            )
            .with_child(FolderNode::new(4, "D2", FolderType::DeploymentDate))];
        let index = FolderTreeIndex::build(&tree);
        assert_eq!(
            index.collect_descendant_leaf_ids(1),
            FolderScope::Only(BTreeSet::from([2, 3, 4]))
        );
    }
}

#[cfg(test)]
mod filter_pipeline_tests {
    use super::*;
    #[allow(unused_imports)]
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identity_without_filters() {
        let index = FolderTreeIndex::build(&sample_tree());
        let assets = sample_assets();
        let result = FilterPipeline::new(&index).apply(
            &assets,
            None,
            &FilterCriteria::default(),
            &SortSpec::default(),
        );
        let expected: Vec<&TestAsset> = assets.iter().collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_empty_search_over_hundred_assets() {
        let index = FolderTreeIndex::build(&sample_tree());
        let assets: Vec<TestAsset> = (0..100)
            .map(|i| TestAsset::new(100 - i).with_folder(1000))
            .collect();
        let criteria = FilterCriteria {
            search_term: String::new(),
            ..Default::default()
        };
        let result = FilterPipeline::new(&index).apply(&assets, None, &criteria, &SortSpec::default());
        assert_eq!(result.len(), 100);
        assert_eq!(result[0].id, 100);
        assert_eq!(result[99].id, 1);
    }

    #[test]
    fn test_dangling_folder_returns_empty() {
        let index = FolderTreeIndex::build(&sample_tree());
        let assets = sample_assets();
        let result = FilterPipeline::new(&index).apply(
            &assets,
            Some(987_654),
            &FilterCriteria::default(),
            &SortSpec::default(),
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_folder_scopes() {
        let index = FolderTreeIndex::build(&sample_tree());
        let assets = sample_assets();
        let pipeline = FilterPipeline::new(&index);
        let run = |folder| {
            ids(&pipeline.apply(&assets, Some(folder), &FilterCriteria::default(), &SortSpec::default()))
        };

        assert_eq!(run(1000), vec![5, 3]);
        assert_eq!(run(100), vec![5, 3, 8]);
        assert_eq!(run(10), vec![5, 3, 8, 1]);
        assert_eq!(run(11), vec![12]);
        assert_eq!(run(1), vec![5, 3, 8, 1, 12, 7]);
    }

    #[test]
    fn test_category_prefix_matches_any_detail() {
        let index = FolderTreeIndex::build(&sample_tree());
        let assets = sample_assets();
        let criteria = FilterCriteria {
            category: CategoryChoice::parse("Login > OAuth"),
            ..Default::default()
        };
        let result = FilterPipeline::new(&index).apply(&assets, None, &criteria, &SortSpec::default());
        assert_eq!(ids(&result), vec![5, 3, 12]);
    }

    #[test]
    fn test_search_then_dropdowns_then_sort() {
        let index = FolderTreeIndex::build(&sample_tree());
        let assets = sample_assets();
        let criteria = FilterCriteria {
            search_term: "kim".to_string(),
            environment: Choice::parse("staging"),
            ..Default::default()
        };
        let sort = SortSpec::by(SortKey::Id, SortDirection::Desc);
        let result = FilterPipeline::new(&index).apply(&assets, Some(10), &criteria, &sort);
        assert_eq!(ids(&result), vec![8, 5]);
    }

    #[test]
    fn test_sort_is_idempotent_and_stable() {
        let index = FolderTreeIndex::build(&sample_tree());
        let assets = sample_assets();
        let pipeline = FilterPipeline::new(&index);
        let criteria = FilterCriteria::default();

        let asc = SortSpec::by(SortKey::Environment, SortDirection::Asc);
        let first = pipeline.apply(&assets, None, &criteria, &asc);
        let second = pipeline.apply(&assets, None, &criteria, &asc);
        assert_eq!(first, second);
        assert_eq!(ids(&first), vec![12, 7, 5, 3, 8, 1]);

        let desc = SortSpec::by(SortKey::Environment, SortDirection::Desc);
        let reversed = pipeline.apply(&assets, None, &criteria, &desc);
        // groups swap, members keep their input order
        assert_eq!(ids(&reversed), vec![5, 3, 8, 1, 12, 7]);
    }

    #[test]
    fn test_date_sort() {
        let index = FolderTreeIndex::build(&sample_tree());
        let assets = sample_assets();
        let sort = SortSpec::parse("updated_at", SortDirection::Desc);
        let result =
            FilterPipeline::new(&index).apply(&assets, Some(100), &FilterCriteria::default(), &sort);
        assert_eq!(ids(&result), vec![3, 5, 8]);
    }

    #[test]
    fn test_unknown_sort_key_preserves_order() {
        let index = FolderTreeIndex::build(&sample_tree());
        let assets = sample_assets();
        let sort = SortSpec::parse("priority", SortDirection::Desc);
        let result = FilterPipeline::new(&index).apply(&assets, None, &FilterCriteria::default(), &sort);
        assert_eq!(ids(&result), vec![5, 3, 8, 1, 12, 7]);
    }
}

#[cfg(test)]
mod aggregation_tests {
    use super::*;
    #[allow(unused_imports)]
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pass_fail_null_scenario() {
        let assets = vec![
            TestAsset::new(1).with_status("Pass"),
            TestAsset::new(2).with_status("Fail"),
            TestAsset::new(3).with_status("Pass"),
            TestAsset::new(4),
        ];
        let result = StatusAggregator::compute(&assets);
        assert_eq!(
            (result.pass, result.fail, result.block, result.nt, result.na),
            (2, 1, 0, 1, 0)
        );
        assert_eq!(result.total, 4);
        assert_eq!(result.tested, 3);
        assert_eq!(result.pass_rate, 67);
    }

    #[test]
    fn test_buckets_always_sum_to_total() {
        let statuses = ["Pass", "FAIL", "block", "N/A", "na", "N/T", "", "skipped", "Pass"];
        for len in 0..=statuses.len() {
            let assets: Vec<TestAsset> = statuses[..len]
                .iter()
                .enumerate()
                .map(|(i, s)| TestAsset::new(i as i64).with_status(*s))
                .collect();
            let r = StatusAggregator::compute(&assets);
            assert_eq!(r.pass + r.fail + r.block + r.nt + r.na, r.total);
            assert_eq!(r.total, len);
            assert_eq!(r.percent_pass + r.percent_fail + r.percent_block + r.percent_nt, 100);
        }
    }

    #[test]
    fn test_aggregate_filtered_view() {
        let index = FolderTreeIndex::build(&sample_tree());
        let assets = sample_assets();
        let filtered = FilterPipeline::new(&index).apply(
            &assets,
            Some(10),
            &FilterCriteria::default(),
            &SortSpec::default(),
        );
        let result = StatusAggregator::compute(filtered.iter().copied());
        assert_eq!(result.total, 4);
        assert_eq!(result.nt, 1);
        assert_eq!(result.tested, 3);
        assert_eq!(result.pass_rate, 33);
    }
}

#[cfg(test)]
mod chart_tests {
    use super::*;
    #[allow(unused_imports)]
    use pretty_assertions::assert_eq;

    fn aggregate(statuses: &[&str]) -> AggregationResult {
        let assets: Vec<TestAsset> = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| TestAsset::new(i as i64).with_status(*s))
            .collect();
        StatusAggregator::compute(&assets)
    }

    #[test]
    fn test_no_data_sentinel() {
        let segments = PieChartLayout::default().build(&aggregate(&[]));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].key, SegmentKey::Empty);
        assert_eq!((segments[0].start_angle, segments[0].end_angle), (0.0, 360.0));
    }

    #[test]
    fn test_single_bucket_full_circle() {
        let segments = PieChartLayout::default().build(&aggregate(&["N/A", "", "N/T"]));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].key, SegmentKey::NotTested);
        assert_eq!(segments[0].value, 3);
        assert!(segments[0].is_full_circle());
    }

    #[test]
    fn test_segments_tile_the_circle() {
        let cases: [&[&str]; 4] = [
            &["Pass", "Fail"],
            &["Pass", "Pass", "Block", "Fail", "N/A", "x", "Fail"],
            &["Block", "N/T", "N/T"],
            &["Pass", "Fail", "Block", "na", "Pass", "Pass", "Pass"],
        ];
        for statuses in cases {
            let segments = PieChartLayout::default().build(&aggregate(statuses));
            assert!(segments.len() >= 2);
            assert_eq!(segments[0].start_angle, 0.0);
            for pair in segments.windows(2) {
                assert_eq!(pair[0].end_angle, pair[1].start_angle);
                assert!(pair[0].end_angle > pair[0].start_angle);
            }
            let last = segments.last().map(|s| s.end_angle).unwrap_or_default();
            assert!((last - 360.0).abs() < 1e-9, "ended at {}", last);
        }
    }
}
