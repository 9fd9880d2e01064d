#[macro_use]
extern crate criterion;
extern crate mandelpar;
extern crate num;
extern crate num_cpus;

use criterion::Criterion;
use mandelpar::{escape_time, Renderer, Schedule};
use num::Complex;

fn kernel(c: &mut Criterion) {
    c.bench_function("escape_time inside the set", |b| {
        b.iter(|| escape_time(Complex::new(-0.1, 0.1), 255))
    });
    c.bench_function("escape_time near the boundary", |b| {
        b.iter(|| escape_time(Complex::new(-0.75, 0.1), 255))
    });
}

fn schedules(c: &mut Criterion) {
    let renderer = Renderer::new(320, 240, 255).unwrap();
    let threads = num_cpus::get();
    c.bench_function("320x240 single", move |b| {
        let mut grid = renderer.grid().unwrap();
        b.iter(|| renderer.render_single(&mut grid).unwrap())
    });
    c.bench_function("320x240 dynamic", move |b| {
        let mut grid = renderer.grid().unwrap();
        b.iter(|| renderer.render(&mut grid, threads, Schedule::Dynamic).unwrap())
    });
    c.bench_function("320x240 static", move |b| {
        let mut grid = renderer.grid().unwrap();
        b.iter(|| renderer.render(&mut grid, threads, Schedule::Static).unwrap())
    });
}

criterion_group!(benches, kernel, schedules);
criterion_main!(benches);
