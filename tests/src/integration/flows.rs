//! # Integration Test Flows
//!
//! Exercises the full scheduling pipeline the way a host would: batches from
//! an operation collection stage go through `FlushOrderingService` and the
//! ordered result is handed to a `FlushExecutor`.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use flush_ordering::domain::invariants::{order_is_complete, order_respects_references};
    use flush_ordering::{
        flush_batch, BatchScheduler, EntityId, ExecutionError, FailurePolicy, FlushConfig,
        FlushExecutor, FlushOrderingService, PendingOperation,
    };

    use crate::generators::{cascade_delete_batch, insert_forest, shuffled, Payload};

    fn init_tracing() {
        use tracing_subscriber::EnvFilter;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init()
            .ok();
    }

    /// Executor that tracks backend state: an insert may only arrive after
    /// everything it references exists, a delete must arrive before the
    /// entities it references are gone.
    #[derive(Default)]
    struct StateCheckingExecutor {
        present: HashMap<EntityId, Payload>,
        executed: Vec<EntityId>,
    }

    impl FlushExecutor<Payload> for StateCheckingExecutor {
        fn execute(
            &mut self,
            operation: &PendingOperation<Payload>,
        ) -> Result<(), ExecutionError> {
            use flush_ordering::OperationKind;
            match operation.kind() {
                OperationKind::Insert => {
                    for reference in operation.references() {
                        if reference != operation.id() && !self.present.contains_key(reference) {
                            return Err(ExecutionError::Rejected(format!(
                                "{} references missing {}",
                                operation.id(),
                                reference
                            )));
                        }
                    }
                    self.present
                        .insert(operation.id().clone(), *operation.payload());
                }
                OperationKind::Update => {}
                OperationKind::Delete => {
                    self.present.remove(operation.id());
                }
            }
            self.executed.push(operation.id().clone());
            Ok(())
        }
    }

    #[test]
    fn forest_insert_flush_satisfies_the_backend() {
        init_tracing();

        // 100 roots with 3 children each, children ahead of their roots:
        // well above the threshold, so the graph path runs.
        let service = FlushOrderingService::new();
        let batch = shuffled(insert_forest(100, 3), 7);
        assert!(batch.len() >= service.config().size_threshold);

        let mut executor = StateCheckingExecutor::default();
        let executed = flush_batch(&service, &mut executor, batch.clone()).unwrap();

        assert_eq!(executed, batch.len());
        assert_eq!(executor.present.len(), batch.len());
    }

    #[test]
    fn cascade_delete_flush_removes_children_first() {
        init_tracing();

        let service = FlushOrderingService::new();
        let batch = cascade_delete_batch(64, 2);

        let ordered = service.schedule_batch(batch.clone()).unwrap();

        assert!(order_is_complete(&batch, &ordered));
        assert!(order_respects_references(&ordered));

        // Spot-check one tree: both children precede their root.
        let position: HashMap<&str, usize> = ordered
            .iter()
            .enumerate()
            .map(|(index, op)| (op.id().as_str(), index))
            .collect();
        assert!(position["instance-0-var-0"] < position["instance-0"]);
        assert!(position["instance-0-var-1"] < position["instance-0"]);
    }

    #[test]
    fn fast_and_baseline_paths_are_equivalent_at_scale() {
        let batch = shuffled(cascade_delete_batch(80, 2), 21);

        let fast = FlushOrderingService::with_config(FlushConfig {
            size_threshold: 1,
            ..Default::default()
        });
        let baseline = FlushOrderingService::with_config(FlushConfig {
            use_fast_path: false,
            ..Default::default()
        });

        let fast_order = fast.schedule_batch(batch.clone()).unwrap();
        let baseline_order = baseline.schedule_batch(batch.clone()).unwrap();

        for ordered in [&fast_order, &baseline_order] {
            assert!(order_is_complete(&batch, ordered));
            assert!(order_respects_references(ordered));
        }
    }

    #[test]
    fn fallback_policy_recovers_from_a_duplicate_operation() {
        let mut batch = insert_forest(40, 1);
        // The collection stage misbehaves and emits one entity twice.
        batch.push(PendingOperation::update("instance-3", 0));

        let strict = FlushOrderingService::with_config(FlushConfig {
            size_threshold: 1,
            ..Default::default()
        });
        let lenient = FlushOrderingService::with_config(FlushConfig {
            size_threshold: 1,
            on_fast_path_failure: FailurePolicy::FallbackToBaseline,
            ..Default::default()
        });

        assert!(strict.schedule_batch(batch.clone()).is_err());

        let ordered = lenient.schedule_batch(batch.clone()).unwrap();
        assert_eq!(ordered.len(), batch.len());
        assert!(order_respects_references(&ordered));
    }

    #[test]
    fn scheduling_is_reproducible_across_threads() {
        let service = std::sync::Arc::new(FlushOrderingService::new());
        let batch = shuffled(insert_forest(50, 2), 3);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = std::sync::Arc::clone(&service);
                let batch = batch.clone();
                std::thread::spawn(move || {
                    let ordered = service.schedule_batch(batch).unwrap();
                    ordered
                        .iter()
                        .map(|op| op.id().clone())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut outcomes: Vec<Vec<EntityId>> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();
        let first = outcomes.pop().unwrap();
        for outcome in outcomes {
            assert_eq!(outcome, first);
        }
    }
}
