use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Days, NaiveDate};
use stockcast_ai::{
    AiScheduler, DemandForecastJob, DemandForecaster, ForecastRequest, HistoricalDataPoint,
    LocalAiScheduler, ReorderOptimizer, ReorderRequest,
};
use stockcast_core::ProductId;

/// Weekly-seasonal demand with a mild upward trend.
fn synthetic_history(days: u64) -> Vec<HistoricalDataPoint> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    (0..days)
        .map(|i| {
            let weekly = [0.8, 1.0, 1.1, 1.0, 1.2, 1.5, 0.6][(i % 7) as usize];
            HistoricalDataPoint {
                date: start + Days::new(i),
                quantity: (50.0 + 0.1 * i as f64) * weekly,
            }
        })
        .collect()
}

fn bench_fit_and_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("forecaster_fit_predict");

    for days in [30u64, 180, 730] {
        let history = synthetic_history(days);
        let last = history[history.len() - 1].date;
        group.throughput(Throughput::Elements(days));
        group.bench_with_input(BenchmarkId::from_parameter(days), &history, |b, history| {
            b.iter(|| {
                let mut f = DemandForecaster::new();
                let accuracy = f.fit(black_box(history)).unwrap();
                let predictions = f.predict(30, last).unwrap();
                black_box((accuracy, predictions));
            });
        });
    }

    group.finish();
}

fn bench_batch_forecasts(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler_batch_forecasts");
    let history = synthetic_history(365);
    let scheduler = LocalAiScheduler::with_available_parallelism().unwrap();

    for products in [8usize, 64] {
        group.throughput(Throughput::Elements(products as u64));
        group.bench_function(BenchmarkId::from_parameter(products), |b| {
            b.iter(|| {
                let jobs: Vec<_> = (0..products)
                    .map(|p| {
                        DemandForecastJob::new(ForecastRequest {
                            product_id: ProductId::new(p as i64),
                            historical_data: history.clone(),
                            periods_ahead: 30,
                        })
                    })
                    .collect();
                black_box(scheduler.run_batch(jobs));
            });
        });
    }

    group.finish();
}

fn bench_optimize(c: &mut Criterion) {
    let optimizer = ReorderOptimizer::new();
    let request = ReorderRequest {
        product_id: ProductId::new(1),
        average_daily_demand: 42.0,
        demand_std_dev: 7.5,
        lead_time_days: 12,
        ordering_cost: 80.0,
        holding_cost_per_unit: 1.25,
        unit_price: 9.99,
        service_level: 0.925,
    };

    c.bench_function("reorder_optimize", |b| {
        b.iter(|| black_box(optimizer.optimize(black_box(&request))));
    });
}

criterion_group!(benches, bench_fit_and_predict, bench_batch_forecasts, bench_optimize);
criterion_main!(benches);
