// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use iced::widget::scrollable::AbsoluteOffset;
use iced::{Point, Size};
use std::hint::black_box;
use zoom_view::config::ZoomSettings;
use zoom_view::ui::state::compute_bounds;
use zoom_view::ui::state::viewport::{center_origin, offset_for_anchor};

fn zoom_layout_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoom_layout");
    let settings = ZoomSettings::default();
    let viewport = Size::new(1280.0, 720.0);
    let image = Size::new(6000.0, 4000.0);

    group.bench_function("compute_bounds", |b| {
        b.iter(|| black_box(compute_bounds(black_box(viewport), black_box(image), &settings)));
    });

    group.bench_function("center_origin", |b| {
        b.iter(|| black_box(center_origin(black_box(Size::new(640.0, 427.0)), viewport)));
    });

    group.bench_function("offset_for_anchor", |b| {
        b.iter(|| {
            black_box(offset_for_anchor(
                black_box(Point::new(300.0, 200.0)),
                AbsoluteOffset { x: 120.0, y: 80.0 },
                0.5,
                0.75,
                image,
                viewport,
            ))
        });
    });

    group.finish();
}

criterion_group!(benches, zoom_layout_benchmark);
criterion_main!(benches);
