use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use syllex::acoustics::intensity::intensity_track;
use syllex::defaults;

/// Synthetic speech-like signal: a 220 Hz carrier with a slow amplitude
/// envelope, long enough to exercise the frame loop.
fn synthetic_signal(secs: f64, rate: u32) -> Vec<f64> {
    (0..(secs * rate as f64) as usize)
        .map(|n| {
            let t = n as f64 / rate as f64;
            let envelope = 0.5 + 0.4 * (2.0 * std::f64::consts::PI * 2.0 * t).sin();
            envelope * (2.0 * std::f64::consts::PI * 220.0 * t).sin()
        })
        .collect()
}

fn bench_intensity_track(c: &mut Criterion) {
    let mut group = c.benchmark_group("intensity_track");

    for secs in [1.0, 10.0, 60.0] {
        let samples = synthetic_signal(secs, 16000);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{secs}s")),
            &samples,
            |b, samples| {
                b.iter(|| {
                    intensity_track(
                        black_box(samples),
                        16000,
                        defaults::INTENSITY_WINDOW_MS,
                        defaults::INTENSITY_STEP_MS,
                    )
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_intensity_track);
criterion_main!(benches);
