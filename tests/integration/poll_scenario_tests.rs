//! Poll cycle integration tests
//!
//! Drive the poller, dispatcher and cache together against a scripted
//! transport on a paused clock.

#[cfg(test)]
mod tests {
    use crate::common::assertions::{assert_summary_consistent, assert_unique_components};
    use crate::common::{Behavior, ComponentFactory, RegistryFactory, ScriptedTransport};
    use crate::assert_ok;
    use landscape_health::core::projection::{materialize_rows, project};
    use landscape_health::{
        CacheConfig, CacheSignature, HealthPoller, HealthStatus, HealthSummary, PollDispatcher,
        PollOptions, ResultCache, SortColumn, SortDirection, SortState, ViewOptions,
    };
    use std::sync::Arc;
    use std::time::Duration;

    fn build_poller(transport: &Arc<ScriptedTransport>) -> HealthPoller {
        let cache = Arc::new(ResultCache::new(CacheConfig::default()).unwrap());
        HealthPoller::new(PollDispatcher::new(transport.clone()), cache)
    }

    fn sorted(mut ids: Vec<String>) -> Vec<String> {
        ids.sort();
        ids
    }

    // ==================== Settle-all ====================

    /// One hanging endpoint delays the batch but never drops the others
    #[tokio::test(start_paused = true)]
    async fn test_timeout_settles_with_the_rest() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .with("c1", Behavior::Up(100))
                .with("c2", Behavior::Up(150))
                .with("c3", Behavior::Up(200))
                .with("c4", Behavior::Up(50))
                .with("c5", Behavior::Timeout),
        );
        let poller = build_poller(&transport);
        let components = ComponentFactory::services(5);
        let landscape = RegistryFactory::eu10();

        let start = tokio::time::Instant::now();
        let snapshot = assert_ok!(
            poller
                .poll(&components, &landscape, &PollOptions::default())
                .await
        );
        assert!(start.elapsed() >= Duration::from_secs(10));

        assert!(!snapshot.is_loading);
        assert!(!snapshot.is_fetching);
        assert_eq!(snapshot.results.len(), 5);

        let timed_out = &snapshot.results[4];
        assert_eq!(timed_out.component_id, "c5");
        assert_eq!(timed_out.status, HealthStatus::Error);
        assert_eq!(
            timed_out.error.as_deref(),
            Some("Health check timed out after 10s")
        );
        assert_eq!(timed_out.response_time, None);

        assert_eq!(
            snapshot.summary(),
            HealthSummary {
                total: 5,
                up: 4,
                down: 0,
                unknown: 0,
                error: 1,
                avg_response_time: 125,
            }
        );
    }

    /// DOWN results name their unhealthy sub-components; transport errors keep their message
    #[tokio::test(start_paused = true)]
    async fn test_mixed_outcomes_are_classified() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .with("c2", Behavior::Down(20))
                .with("c3", Behavior::Unreachable),
        );
        let poller = build_poller(&transport);
        let components = ComponentFactory::services(3);
        let landscape = RegistryFactory::eu10();

        let snapshot = assert_ok!(
            poller
                .poll(&components, &landscape, &PollOptions::default())
                .await
        );

        let statuses: Vec<_> = snapshot.results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![HealthStatus::Up, HealthStatus::Down, HealthStatus::Error]
        );
        assert_eq!(
            snapshot.results[1].error.as_deref(),
            Some("Unhealthy components: db")
        );
        assert_eq!(
            snapshot.results[2].error.as_deref(),
            Some("Health endpoint unreachable: cfapps.eu10.example.com")
        );

        assert_unique_components(&snapshot.results);
        assert_summary_consistent(&snapshot.results, &snapshot.summary());
        assert_eq!(snapshot.summary().avg_response_time, 15);
    }

    // ==================== Eligibility ====================

    /// Disabled and central-only components are skipped outside the central landscape
    #[tokio::test(start_paused = true)]
    async fn test_eligibility_per_landscape() {
        let registry = RegistryFactory::standard();
        let options = PollOptions::for_registry(&registry);

        let transport = Arc::new(ScriptedTransport::new());
        let poller = build_poller(&transport);
        let eu10 = registry.landscape("eu10").unwrap().clone();
        let snapshot = assert_ok!(poller.poll(&registry.components, &eu10, &options).await);
        assert_eq!(snapshot.results.len(), 5);
        assert_eq!(
            sorted(transport.probed_components()),
            vec!["c1", "c2", "c3", "c4", "c7"]
        );

        let transport = Arc::new(ScriptedTransport::new());
        let poller = build_poller(&transport);
        let central = registry.landscape("central").unwrap().clone();
        assert_ok!(poller.poll(&registry.components, &central, &options).await);
        assert_eq!(
            sorted(transport.probed_components()),
            vec!["c1", "c2", "c3", "c4", "c5", "c7"]
        );
    }

    /// Without any central landscape, central services are probed everywhere
    #[tokio::test(start_paused = true)]
    async fn test_central_services_without_central_landscape() {
        let mut registry = RegistryFactory::standard();
        registry.landscapes.retain(|l| !l.is_central);
        let options = PollOptions::for_registry(&registry);
        assert!(!options.central_landscape_exists);

        let transport = Arc::new(ScriptedTransport::new());
        let poller = build_poller(&transport);
        let eu10 = registry.landscape("eu10").unwrap().clone();
        let snapshot = assert_ok!(poller.poll(&registry.components, &eu10, &options).await);

        assert_eq!(snapshot.results.len(), 6);
        assert!(transport.probed_components().contains(&"c5".to_string()));
    }

    // ==================== Caching ====================

    /// A fresh repeat poll is served from the cache with the same result set
    #[tokio::test(start_paused = true)]
    async fn test_repeat_poll_is_reference_stable() {
        let transport = Arc::new(ScriptedTransport::new());
        let poller = build_poller(&transport);
        let components = ComponentFactory::services(4);
        let landscape = RegistryFactory::eu10();
        let options = PollOptions::default();

        let first = assert_ok!(poller.poll(&components, &landscape, &options).await);
        tokio::time::sleep(Duration::from_secs(30)).await;
        let second = assert_ok!(poller.poll(&components, &landscape, &options).await);

        assert!(Arc::ptr_eq(&first.results, &second.results));
        assert_eq!(first.poll_id, second.poll_id);
        assert_eq!(transport.call_count(), 4);
        assert_eq!(poller.cache().stats().hits, 1);
    }

    /// Past the stale time the same request polls again
    #[tokio::test(start_paused = true)]
    async fn test_stale_results_are_repolled() {
        let transport = Arc::new(ScriptedTransport::new());
        let poller = build_poller(&transport);
        let components = ComponentFactory::services(4);
        let landscape = RegistryFactory::eu10();
        let options = PollOptions::default();

        let first = assert_ok!(poller.poll(&components, &landscape, &options).await);
        tokio::time::sleep(Duration::from_secs(61)).await;
        let second = assert_ok!(poller.poll(&components, &landscape, &options).await);

        assert!(!Arc::ptr_eq(&first.results, &second.results));
        assert_eq!(transport.call_count(), 8);
        assert_eq!(poller.cache().stats().stale, 1);
    }

    /// Landscapes never share a cache entry
    #[tokio::test(start_paused = true)]
    async fn test_landscapes_are_cached_separately() {
        let transport = Arc::new(ScriptedTransport::new());
        let poller = build_poller(&transport);
        let components = ComponentFactory::services(3);
        let options = PollOptions::default();

        assert_ok!(poller.poll(&components, &RegistryFactory::eu10(), &options).await);
        let us20 = assert_ok!(poller.poll(&components, &RegistryFactory::us20(), &options).await);

        assert_eq!(transport.calls_for("eu10"), 3);
        assert_eq!(transport.calls_for("us20"), 3);
        assert!(us20.results.iter().all(|r| r.landscape == "US20"));
        poller.cache().sweep().await;
        assert_eq!(poller.cache().entry_count(), 2);
    }

    // ==================== Cancellation ====================

    /// A poll superseded by another landscape leaves no trace
    #[tokio::test(start_paused = true)]
    async fn test_superseded_poll_is_discarded() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .with("c1", Behavior::Up(5_000))
                .with("c2", Behavior::Up(5_000))
                .with("c3", Behavior::Up(5_000)),
        );
        let poller = Arc::new(build_poller(&transport));
        let eu10 = RegistryFactory::eu10();

        let slow = {
            let poller = Arc::clone(&poller);
            let components = ComponentFactory::services(3);
            let landscape = eu10.clone();
            tokio::spawn(async move {
                poller
                    .poll(&components, &landscape, &PollOptions::default())
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(poller.snapshot().is_loading);

        let fast_components = vec![ComponentFactory::service(10), ComponentFactory::service(11)];
        let us20 = assert_ok!(
            poller
                .poll(&fast_components, &RegistryFactory::us20(), &PollOptions::default())
                .await
        );
        assert_eq!(us20.landscape_id(), Some("us20"));

        let superseded = assert_ok!(slow.await.unwrap());
        assert!(
            superseded
                .results
                .iter()
                .all(|r| r.landscape == "US20" || r.status == HealthStatus::Loading)
        );

        tokio::time::sleep(Duration::from_secs(10)).await;
        let current = poller.snapshot();
        assert_eq!(current.landscape_id(), Some("us20"));
        assert_eq!(current.results.len(), 2);

        let eu10_signature = CacheSignature::for_set(&eu10, 3);
        assert!(poller.cache().peek(&eu10_signature).await.is_none());
        assert_eq!(poller.cache().stats().cancellations, 1);
    }

    // ==================== Projection ====================

    /// Results flow into grouped, status-sorted rows with unsupported placeholders
    #[tokio::test(start_paused = true)]
    async fn test_poll_then_project() {
        let registry = RegistryFactory::standard();
        let options = PollOptions::for_registry(&registry);
        let transport = Arc::new(
            ScriptedTransport::new()
                .with("c2", Behavior::Down(20))
                .with("c3", Behavior::Unreachable),
        );
        let poller = build_poller(&transport);
        let eu10 = registry.landscape("eu10").unwrap().clone();

        let snapshot = assert_ok!(poller.poll(&registry.components, &eu10, &options).await);
        let rows = materialize_rows(
            &registry.components,
            &snapshot.results,
            &eu10,
            options.central_landscape_exists,
            &registry.team_names(),
            true,
        );
        assert_eq!(rows.len(), 6);

        let view = ViewOptions {
            sort: SortState::by_column(SortColumn::Status, SortDirection::Asc),
            hide_central_non_up: false,
        };
        let grouped = project(rows.clone(), eu10.is_central, &view);
        let order: Vec<_> = grouped
            .services
            .iter()
            .map(|row| row.result.component_name.as_str())
            .collect();
        assert_eq!(
            order,
            vec!["accounts", "dispatch", "registry", "billing", "catalog"]
        );
        assert_eq!(grouped.libraries.len(), 1);
        assert_eq!(grouped.libraries[0].result.component_name, "client-sdk");
        assert!(grouped.services[2].result.is_unsupported());
        assert_eq!(grouped.services[0].team.as_deref(), Some("Identity"));
        assert_eq!(grouped.services[1].team, None);

        let hidden = project(
            rows,
            eu10.is_central,
            &ViewOptions {
                hide_central_non_up: true,
                ..view
            },
        );
        assert!(hidden.services.iter().all(|row| !row.central_service));
    }
}
