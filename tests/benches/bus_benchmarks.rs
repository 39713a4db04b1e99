//! # Composition Runtime Benchmarks
//!
//! Hot paths of the composition:
//!
//! | Component | Operation | Expectation |
//! |-----------|-----------|-------------|
//! | Message bus | publish to N listeners | linear in N |
//! | Typed registry | lookup by contract | O(1) |
//! | State machine | committed transition | one publish |

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_bus::{Listener, MessageBus};
use shared_registry::TypedRegistry;
use shared_types::{Message, RegistryKind};
use state_machine::{Category, FiniteState, FiniteStateMachine};

#[derive(Debug)]
struct Tick(u64);
impl Message for Tick {}

// ============================================================================
// Message Bus
// ============================================================================

fn bench_publish_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("message-bus");
    group.measurement_time(Duration::from_secs(5));

    for listeners in [1, 10, 100] {
        let bus = MessageBus::new();
        let total = Arc::new(AtomicU64::new(0));
        for _ in 0..listeners {
            let total = Arc::clone(&total);
            bus.subscribe(&Listener::from_fn(move |tick: &Tick| {
                total.fetch_add(tick.0, Ordering::Relaxed);
            }));
        }

        group.throughput(Throughput::Elements(listeners as u64));
        group.bench_with_input(
            BenchmarkId::new("publish", listeners),
            &listeners,
            |b, _| b.iter(|| black_box(bus.publish(Tick(1)))),
        );
    }

    let empty = MessageBus::new();
    group.bench_function("publish_no_subscribers", |b| {
        b.iter(|| black_box(empty.publish(Tick(1))))
    });

    group.finish();
}

// ============================================================================
// Typed Registry
// ============================================================================

trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

struct Fixed;

impl Clock for Fixed {
    fn now(&self) -> u64 {
        42
    }
}

fn bench_registry_lookup(c: &mut Criterion) {
    let registry = TypedRegistry::new(RegistryKind::Service);
    let clock: Arc<dyn Clock> = Arc::new(Fixed);
    registry
        .register::<dyn Clock>(clock)
        .expect("registration succeeds");

    c.bench_function("registry/lookup", |b| {
        b.iter(|| {
            let clock = registry.lookup::<dyn Clock>().expect("registered");
            black_box(clock.now())
        })
    });
}

// ============================================================================
// State Machine
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Light {
    Red,
    Green,
}

impl FiniteState for Light {
    fn category(&self) -> Category {
        Category::new("Light")
    }
}

fn bench_transition(c: &mut Criterion) {
    let bus = Arc::new(MessageBus::new());
    bus.subscribe(&Listener::from_fn(|changed: &state_machine::StateChanged<Light>| {
        black_box(changed.next);
    }));
    let machine = FiniteStateMachine::new("light", bus);
    machine.set_initial_state(Light::Red).expect("fresh machine");

    let mut next = Light::Green;
    c.bench_function("state-machine/transition", |b| {
        b.iter(|| {
            let outcome = machine.transition_to(next).expect("same category");
            next = if next == Light::Green { Light::Red } else { Light::Green };
            black_box(outcome)
        })
    });
}

criterion_group!(
    benches,
    bench_publish_fan_out,
    bench_registry_lookup,
    bench_transition
);
criterion_main!(benches);
