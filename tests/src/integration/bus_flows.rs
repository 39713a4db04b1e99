//! # Bus Flows
//!
//! Delivery guarantees of the message bus:
//!
//! 1. Publishing to an empty topic is a no-op
//! 2. Listeners run most-recently-subscribed first, once each
//! 3. A failing listener is isolated from the others and the publisher
//! 4. Listeners may mutate subscriptions and publish while being delivered

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use shared_bus::{Listener, MessageBus};
    use shared_types::Message;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    #[derive(Debug)]
    struct Ping(u32);
    impl Message for Ping {}

    #[derive(Debug)]
    struct Pong(u32);
    impl Message for Pong {}

    type Journal = Arc<Mutex<Vec<String>>>;

    fn recorder(journal: &Journal, tag: &'static str) -> Listener<Ping> {
        let journal = Arc::clone(journal);
        Listener::from_fn(move |ping: &Ping| journal.lock().push(format!("{tag}:{}", ping.0)))
    }

    // =============================================================================
    // TESTS
    // =============================================================================

    #[test]
    fn test_publish_without_subscribers() {
        let bus = MessageBus::new();
        let report = bus.publish(Ping(1));

        assert_eq!(report.invoked(), 0);
        assert!(report.is_clean());
        assert_eq!(bus.topic_count(), 0);
    }

    #[test]
    fn test_last_subscribed_runs_first() {
        let bus = MessageBus::new();
        let journal: Journal = Arc::default();
        bus.subscribe(&recorder(&journal, "L1"));
        bus.subscribe(&recorder(&journal, "L2"));

        let report = bus.publish(Ping(5));

        assert_eq!(report.delivered, 2);
        assert_eq!(*journal.lock(), vec!["L2:5", "L1:5"]);
    }

    #[test]
    fn test_topics_do_not_cross() {
        let bus = MessageBus::new();
        let journal: Journal = Arc::default();
        bus.subscribe(&recorder(&journal, "ping"));

        let sink = Arc::clone(&journal);
        bus.subscribe(&Listener::from_fn(move |pong: &Pong| {
            sink.lock().push(format!("pong:{}", pong.0));
        }));

        bus.publish(Pong(9));
        assert_eq!(*journal.lock(), vec!["pong:9"]);
        assert_eq!(bus.topic_count(), 2);
    }

    #[test]
    fn test_failing_listener_is_isolated() {
        let bus = MessageBus::new();
        let journal: Journal = Arc::default();
        bus.subscribe(&recorder(&journal, "first"));
        bus.subscribe(&Listener::new(|_: &Ping| Err(anyhow::anyhow!("rejected"))));
        bus.subscribe(&Listener::from_fn(|_: &Ping| panic!("listener exploded")));
        bus.subscribe(&recorder(&journal, "last"));

        let report = bus.publish(Ping(3));

        assert_eq!(report.delivered, 2);
        assert_eq!(report.faults.len(), 2);
        assert!(report.faults.iter().any(|fault| fault.reason.contains("rejected")));
        assert!(report.faults.iter().any(|fault| fault.reason.contains("exploded")));
        assert_eq!(*journal.lock(), vec!["last:3", "first:3"]);
        assert_eq!(bus.faults_reported(), 2);
    }

    #[test]
    fn test_listener_unsubscribes_itself() {
        let bus = Arc::new(MessageBus::new());
        let journal: Journal = Arc::default();
        bus.subscribe(&recorder(&journal, "stay"));

        let handle: Arc<Mutex<Option<Listener<Ping>>>> = Arc::default();
        let once = {
            let bus = Arc::clone(&bus);
            let handle = Arc::clone(&handle);
            let journal = Arc::clone(&journal);
            Listener::from_fn(move |ping: &Ping| {
                journal.lock().push(format!("once:{}", ping.0));
                if let Some(me) = handle.lock().take() {
                    bus.unsubscribe(&me);
                }
            })
        };
        *handle.lock() = Some(once.clone());
        bus.subscribe(&once);

        bus.publish(Ping(1));
        bus.publish(Ping(2));

        assert_eq!(*journal.lock(), vec!["once:1", "stay:1", "stay:2"]);
    }

    #[test]
    fn test_listener_removes_pending_listener() {
        let bus = Arc::new(MessageBus::new());
        let journal: Journal = Arc::default();
        let victim = recorder(&journal, "victim");
        bus.subscribe(&victim);

        let remover = {
            let bus = Arc::clone(&bus);
            let victim = victim.clone();
            Listener::from_fn(move |_: &Ping| {
                bus.unsubscribe(&victim);
            })
        };
        bus.subscribe(&remover);

        let report = bus.publish(Ping(1));

        assert_eq!(report.delivered, 1);
        assert!(journal.lock().is_empty());
    }

    #[test]
    fn test_listener_added_during_delivery_waits() {
        let bus = Arc::new(MessageBus::new());
        let journal: Journal = Arc::default();
        let late = recorder(&journal, "late");

        let adder = {
            let bus = Arc::clone(&bus);
            let late = late.clone();
            let added: Arc<Mutex<bool>> = Arc::default();
            Listener::from_fn(move |_: &Ping| {
                let mut added = added.lock();
                if !*added {
                    bus.subscribe(&late);
                    *added = true;
                }
            })
        };
        bus.subscribe(&adder);

        bus.publish(Ping(1));
        assert!(journal.lock().is_empty());

        bus.publish(Ping(2));
        assert_eq!(*journal.lock(), vec!["late:2"]);
    }

    #[test]
    fn test_nested_publish_completes_inside_listener() {
        let bus = Arc::new(MessageBus::new());
        let journal: Journal = Arc::default();

        let sink = Arc::clone(&journal);
        bus.subscribe(&Listener::from_fn(move |pong: &Pong| {
            sink.lock().push(format!("pong:{}", pong.0));
        }));

        let relay = {
            let bus = Arc::clone(&bus);
            let journal = Arc::clone(&journal);
            Listener::from_fn(move |ping: &Ping| {
                journal.lock().push(format!("ping:{}", ping.0));
                bus.publish(Pong(ping.0 + 1));
                journal.lock().push("relayed".to_string());
            })
        };
        bus.subscribe(&relay);

        bus.publish(Ping(1));
        assert_eq!(*journal.lock(), vec!["ping:1", "pong:2", "relayed"]);
        assert_eq!(bus.messages_published(), 2);
    }

    #[test]
    fn test_double_subscribe_delivers_twice() {
        let bus = MessageBus::new();
        let journal: Journal = Arc::default();
        let listener = recorder(&journal, "dup");
        bus.subscribe(&listener);
        bus.subscribe(&listener);

        assert_eq!(bus.publish(Ping(4)).delivered, 2);

        assert!(bus.unsubscribe(&listener));
        assert_eq!(bus.subscriber_count::<Ping>(), 1);
        assert_eq!(bus.publish(Ping(5)).delivered, 1);
    }
}
