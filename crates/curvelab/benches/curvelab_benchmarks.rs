#![forbid(unsafe_code)]

//! Benchmarks for curve sampling, rasterization and full frames.

use conics::{CurveKind, CurveParams, MotionParams, PATH_SAMPLES, PathKind, SampleRange};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use curvelab::app::App;
use curvelab::config::Config;
use curvelab::key::Key;
use curvelab::pages::motion::motion_figure;
use curvelab::pages::transform::transform_figure;
use curvelab::plot::render_figure;
use curvelab::program::{Model, Msg, Simulator};
use curvelab::theme::Theme;

fn view() -> SampleRange {
    SampleRange::new(-6.0, 6.0).unwrap()
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("conics/sample");
    for kind in [CurveKind::Parabola, CurveKind::Ellipse, CurveKind::Hyperbola] {
        let params = CurveParams::new(kind).with_axes(3.0, 2.0).with_center(1.0, -1.0);
        group.bench_with_input(BenchmarkId::from_parameter(kind.name()), &params, |b, params| {
            b.iter(|| black_box(params.sample(view())));
        });
    }
    for kind in [PathKind::Ellipse, PathKind::Parabola] {
        let params = MotionParams::new(kind);
        group.bench_with_input(BenchmarkId::new("path", kind.name()), &params, |b, params| {
            b.iter(|| black_box(params.path(PATH_SAMPLES)));
        });
    }
    group.finish();
}

fn bench_plot(c: &mut Criterion) {
    let mut group = c.benchmark_group("curvelab/plot");
    let params = CurveParams::new(CurveKind::Ellipse).with_axes(3.0, 2.0);
    let figure = transform_figure(&params, view());

    for (cols, rows) in [(40_usize, 20_usize), (120, 60)] {
        group.bench_with_input(
            BenchmarkId::new("rasterize", format!("{cols}x{rows}")),
            &(cols, rows),
            |b, &(cols, rows)| b.iter(|| black_box(figure.rasterize(cols, rows))),
        );
    }

    let theme = Theme::colored();
    group.bench_function("render_figure", |b| {
        b.iter(|| black_box(render_figure(&figure, 80, 30, &theme)));
    });

    let motion = MotionParams::new(PathKind::Ellipse);
    group.bench_function("motion_figure", |b| {
        b.iter(|| black_box(motion_figure(&motion, 1.25, 1.0, 0.3)));
    });
    group.finish();
}

fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("curvelab/frame");

    let mut sim = Simulator::new(App::new(&Config::default(), Theme::colored()));
    sim.send(Msg::Resize {
        width: 120,
        height: 40,
    });
    group.bench_function("transform_view", |b| b.iter(|| black_box(sim.view())));

    sim.press(Key::Tab);
    sim.press(Key::Char('s'));
    group.bench_function("motion_tick", |b| {
        b.iter(|| {
            let cmd = sim.model_mut().update(Msg::Tick);
            black_box((cmd, sim.view()))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_sampling, bench_plot, bench_frames);
criterion_main!(benches);
