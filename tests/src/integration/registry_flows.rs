//! # Registry Flows
//!
//! Contract-keyed registration and lookup, as modules use it:
//!
//! 1. Identity of the registered instance is preserved
//! 2. Missing contracts fail with `NotRegistered`
//! 3. Absent instances are refused and leave the prior entry untouched
//! 4. A later registration replaces an earlier one

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shared_registry::TypedRegistry;
    use shared_types::{CompositionError, RegistryKind};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    trait Clock: Send + Sync {
        fn now(&self) -> u64;
    }

    struct Fixed(u64);

    impl Clock for Fixed {
        fn now(&self) -> u64 {
            self.0
        }
    }

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    // =============================================================================
    // TESTS
    // =============================================================================

    #[test]
    fn test_lookup_returns_registered_instance() {
        let registry = TypedRegistry::new(RegistryKind::Service);
        let clock: Arc<dyn Clock> = Arc::new(Fixed(7));

        registry.register::<dyn Clock>(Arc::clone(&clock)).unwrap();
        let found = registry.lookup::<dyn Clock>().unwrap();

        assert!(Arc::ptr_eq(&clock, &found));
        assert_eq!(found.now(), 7);
    }

    #[test]
    fn test_lookup_before_registration_fails() {
        let registry = TypedRegistry::new(RegistryKind::Service);

        let err = registry.lookup::<dyn Clock>().err().unwrap();
        assert!(matches!(
            err,
            CompositionError::NotRegistered {
                registry: RegistryKind::Service,
                ..
            }
        ));
        assert!(err.to_string().contains("Clock"));
    }

    #[test]
    fn test_absent_instance_keeps_prior_entry() {
        let registry = TypedRegistry::new(RegistryKind::Service);
        registry.register::<dyn Clock>(Arc::new(Fixed(1)) as Arc<dyn Clock>).unwrap();

        let err = registry.register::<dyn Clock>(None).err().unwrap();
        assert!(matches!(err, CompositionError::NullInstance { .. }));
        assert_eq!(registry.lookup::<dyn Clock>().unwrap().now(), 1);
    }

    #[test]
    fn test_second_registration_replaces_first() {
        let registry = TypedRegistry::new(RegistryKind::Service);
        registry.register::<dyn Clock>(Arc::new(Fixed(1)) as Arc<dyn Clock>).unwrap();
        registry.register::<dyn Clock>(Arc::new(Fixed(2)) as Arc<dyn Clock>).unwrap();

        assert_eq!(registry.lookup::<dyn Clock>().unwrap().now(), 2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_contracts_are_independent() {
        let registry = TypedRegistry::new(RegistryKind::EntityService);
        registry.register::<dyn Clock>(Arc::new(Fixed(3)) as Arc<dyn Clock>).unwrap();
        registry.register::<dyn Greeter>(Arc::new(English) as Arc<dyn Greeter>).unwrap();

        assert_eq!(registry.lookup::<dyn Greeter>().unwrap().greet(), "hello");
        assert_eq!(registry.lookup::<dyn Clock>().unwrap().now(), 3);
        assert_eq!(registry.contracts().len(), 2);
    }

    #[test]
    fn test_shared_registry_across_threads() {
        let registry = Arc::new(TypedRegistry::new(RegistryKind::Service));
        registry.register::<dyn Clock>(Arc::new(Fixed(11)) as Arc<dyn Clock>).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.lookup::<dyn Clock>().unwrap().now())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 11);
        }
    }
}
