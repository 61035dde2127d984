#[cfg(test)]
mod tests {
    use crate::fixtures::{grid_points, result_with, round_robin_labels};
    use crate::state::{
        AppState, IterationCursor, Operation, RequestSequence, SpaceDims, ViewState,
        cluster_counts,
    };

    // ========================================================================
    // Iteration cursor
    // ========================================================================

    #[test]
    fn test_cursor_starts_at_last_snapshot() {
        let cursor = IterationCursor::at_end(4);
        assert_eq!(cursor.index(), 3);
        assert_eq!(cursor.len(), 4);
    }

    #[test]
    fn test_cursor_next_at_end_is_noop() {
        let mut cursor = IterationCursor::at_end(4);
        assert!(!cursor.next());
        assert_eq!(cursor.index(), 3);
    }

    #[test]
    fn test_cursor_previous_at_start_is_noop() {
        let mut cursor = IterationCursor::at_end(3);
        assert!(cursor.previous());
        assert!(cursor.previous());
        assert_eq!(cursor.index(), 0);
        assert!(!cursor.previous());
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_cursor_steps_by_one() {
        let mut cursor = IterationCursor::at_end(5);
        assert!(cursor.previous());
        assert_eq!(cursor.index(), 3);
        assert!(cursor.previous());
        assert_eq!(cursor.index(), 2);
        assert!(cursor.next());
        assert_eq!(cursor.index(), 3);
    }

    #[test]
    fn test_empty_cursor_never_moves() {
        let mut cursor = IterationCursor::default();
        assert!(cursor.is_empty());
        assert!(!cursor.next());
        assert!(!cursor.previous());
        assert_eq!(cursor.index(), 0);
    }

    // ========================================================================
    // Application state lifecycle
    // ========================================================================

    #[test]
    fn test_install_result_moves_to_last_iteration() {
        let mut state = AppState::new();
        state.replace_points(grid_points(20), SpaceDims::new(100, 100));
        state.install_result(result_with(6, 4, round_robin_labels(20, 4)));

        assert_eq!(state.cursor().index(), 5);
        assert_eq!(state.current_centroids().unwrap().len(), 4);
    }

    #[test]
    fn test_replace_points_clears_result() {
        let mut state = AppState::new();
        state.replace_points(grid_points(20), SpaceDims::new(100, 100));
        state.install_result(result_with(3, 2, round_robin_labels(20, 2)));
        let epoch = state.epoch();

        state.replace_points(grid_points(30), SpaceDims::new(200, 80));

        assert!(state.result().is_none());
        assert!(state.current_centroids().is_none());
        assert_eq!(state.cursor().index(), 0);
        assert_eq!(state.points().len(), 30);
        assert_eq!(state.dims(), SpaceDims::new(200, 80));
        assert_eq!(state.epoch(), epoch + 1);
    }

    #[test]
    fn test_navigation_does_not_drop_result() {
        let mut state = AppState::new();
        state.replace_points(grid_points(10), SpaceDims::default());
        state.install_result(result_with(3, 2, round_robin_labels(10, 2)));

        state.cursor_mut().previous();
        assert!(state.result().is_some());
        // Centroids drift one unit per iteration in the fixture
        assert_eq!(state.current_centroids().unwrap()[0].x, 1.0);
    }

    #[test]
    fn test_space_size_is_larger_side() {
        assert_eq!(SpaceDims::new(60, 140).space_size(), 140);
        assert_eq!(SpaceDims::default().space_size(), 100);
    }

    // ========================================================================
    // Cluster counts
    // ========================================================================

    #[test]
    fn test_cluster_counts_sum_to_point_count() {
        for (n, k) in [(10, 1), (20, 5), (37, 6), (100, 30)] {
            let counts = cluster_counts(&round_robin_labels(n, k), k);
            assert_eq!(counts.len(), k);
            assert_eq!(counts.iter().sum::<usize>(), n);
        }
    }

    #[test]
    fn test_cluster_counts_ignore_out_of_range_labels() {
        let counts = cluster_counts(&[0, 1, 1, 7], 2);
        assert_eq!(counts, vec![1, 2]);
    }

    #[test]
    fn test_cluster_counts_include_empty_clusters() {
        let counts = cluster_counts(&[0, 0, 2], 4);
        assert_eq!(counts, vec![2, 0, 1, 0]);
    }

    // ========================================================================
    // Request sequencing
    // ========================================================================

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let mut seq = RequestSequence::default();
        let first = seq.issue(Operation::Generate, 0);
        let second = seq.issue(Operation::Generate, 0);

        assert!(!seq.is_current(&first, 0));
        assert!(seq.is_current(&second, 0));
    }

    #[test]
    fn test_operations_are_sequenced_independently() {
        let mut seq = RequestSequence::default();
        let compute = seq.issue(Operation::Compute, 1);
        seq.issue(Operation::Analyze, 1);
        seq.issue(Operation::Generate, 1);

        assert!(seq.is_current(&compute, 1));
    }

    #[test]
    fn test_compute_ticket_stale_after_new_point_set() {
        let mut seq = RequestSequence::default();
        let compute = seq.issue(Operation::Compute, 1);
        assert!(!seq.is_current(&compute, 2));

        let generate = seq.issue(Operation::Generate, 1);
        assert!(seq.is_current(&generate, 2));
    }

    // ========================================================================
    // View state
    // ========================================================================

    #[test]
    fn test_view_state_defaults() {
        let view = ViewState::default();
        assert_eq!(view.house_radius, 5);
        assert_eq!(view.cluster_radius, 5);
        assert_eq!(view.centroid_radius, 12);
        assert_eq!(view.house_hover_radius(), 7);
        assert_eq!(view.centroid_hover_radius(), 15);
    }

    #[test]
    fn test_radius_clamped_to_slider_range() {
        assert_eq!(ViewState::clamp_radius(0), 1);
        assert_eq!(ViewState::clamp_radius(12), 12);
        assert_eq!(ViewState::clamp_radius(99), 30);
    }
}
