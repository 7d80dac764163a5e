use criterion::{Criterion, black_box, criterion_group, criterion_main};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use courtslot_core::calendar::SlotCalendar;
use courtslot_core::store::HoldStore;
use courtslot_core::store_in_memory::InMemoryHoldStore;
use courtslot_core::types::{Court, SlotDate};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
}

/// Populates `count` holds spread across dates, courts, and the slot grid.
fn fill(store: &mut InMemoryHoldStore, count: usize) {
    let grid = SlotCalendar::all_slots();
    for i in 0..count {
        let date = SlotDate(
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap() + Duration::days((i / 52) as i64),
        );
        let court = Court::ALL[i % 2];
        store.put(date, court, grid[(i / 2) % grid.len()], t0());
    }
}

fn bench_sweep_all_expired(c: &mut Criterion) {
    c.bench_function("sweep_1000_expired", |b| {
        b.iter(|| {
            let mut store = InMemoryHoldStore::new();
            fill(&mut store, 1000);
            black_box(store.sweep(t0() + Duration::minutes(10), Duration::minutes(10)))
        })
    });
}

fn bench_sweep_none_expired(c: &mut Criterion) {
    // The lazy-before-every-operation sweep runs far more often against a
    // fully live store than an expired one; this is the hot path.
    let mut store = InMemoryHoldStore::new();
    fill(&mut store, 1000);

    c.bench_function("sweep_1000_live", |b| {
        b.iter(|| black_box(store.sweep(t0() + Duration::minutes(5), Duration::minutes(10))))
    });
}

criterion_group!(benches, bench_sweep_all_expired, bench_sweep_none_expired);
criterion_main!(benches);
