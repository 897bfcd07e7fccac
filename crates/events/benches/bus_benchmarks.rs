use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use vowplan_events::{EventBus, Message};

#[derive(Debug, Clone)]
struct Tick(u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct TickTopic;

impl Message for Tick {
    type Topic = TickTopic;

    fn topic(&self) -> TickTopic {
        TickTopic
    }
}

fn bench_publish_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish_fanout");

    for subscribers in [1usize, 8, 64] {
        group.throughput(Throughput::Elements(subscribers as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(subscribers),
            &subscribers,
            |b, &subscribers| {
                let bus = EventBus::new();
                let counter = Arc::new(AtomicU64::new(0));
                for _ in 0..subscribers {
                    let counter = Arc::clone(&counter);
                    bus.subscribe(TickTopic, move |tick: &Tick| {
                        counter.fetch_add(tick.0, Ordering::Relaxed);
                        Ok(())
                    });
                }

                b.iter(|| bus.publish(black_box(&Tick(1))));
            },
        );
    }

    group.finish();
}

fn bench_subscribe_unsubscribe(c: &mut Criterion) {
    c.bench_function("subscribe_then_cancel", |b| {
        let bus: EventBus<Tick> = EventBus::new();
        b.iter(|| {
            let sub = bus.subscribe(TickTopic, |_| Ok(()));
            sub.cancel();
        });
    });
}

criterion_group!(benches, bench_publish_fanout, bench_subscribe_unsubscribe);
criterion_main!(benches);
