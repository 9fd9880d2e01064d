extern crate image;
extern crate mandelpar;
extern crate tempfile;

use image::GenericImageView;
use mandelpar::pgm;
use mandelpar::{Config, Encoding, Renderer, Schedule};
use std::fs;

// A 4x4 viewport samples the integer lattice from -2-2i to 1+1i.
const FOUR_BY_FOUR: [u32; 16] = [
    2, 2, 2, 2, //
    2, 4, 10, 3, //
    2, 10, 10, 3, //
    2, 4, 10, 3, //
];

const FOUR_BY_FOUR_PGM: &str = "P2\n4 4\n10\n2 2 2 2\n2 4 10 3\n2 10 10 3\n2 4 10 3\n";

#[test]
fn four_by_four_is_fixed_for_any_worker_count() {
    let renderer = Renderer::new(4, 4, 10).unwrap();
    for &schedule in &[Schedule::Dynamic, Schedule::Static] {
        for &threads in &[1, 2, 8] {
            for _ in 0..3 {
                let mut grid = renderer.grid().unwrap();
                renderer.render(&mut grid, threads, schedule).unwrap();
                assert_eq!(grid.cells(), &FOUR_BY_FOUR[..]);

                let mut out = Vec::new();
                pgm::write_plain(&mut out, &grid, renderer.limit()).unwrap();
                assert_eq!(String::from_utf8(out).unwrap(), FOUR_BY_FOUR_PGM);
            }
        }
    }
}

#[test]
fn full_size_render_is_deterministic_and_complete() {
    let renderer = Renderer::new(640, 480, 255).unwrap();
    let mut first = renderer.grid().unwrap();
    let mut second = renderer.grid().unwrap();
    renderer.render(&mut first, 8, Schedule::Dynamic).unwrap();
    renderer.render(&mut second, 3, Schedule::Dynamic).unwrap();
    assert_eq!(first, second);
    assert!(first.cells().iter().all(|&c| c >= 1 && c <= 255));
    assert_eq!(first.get(240, 320), Some(255));
}

#[test]
fn serialized_raster_has_one_line_per_row_and_reparses() {
    let renderer = Renderer::new(30, 20, 50).unwrap();
    let mut grid = renderer.grid().unwrap();
    renderer.render(&mut grid, 4, Schedule::Dynamic).unwrap();

    let mut out = Vec::new();
    pgm::write_plain(&mut out, &grid, 50).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3 + 20);
    assert_eq!(lines[0], "P2");
    assert_eq!(lines[1], "30 20");
    assert_eq!(lines[2], "50");
    assert!(lines[3..].iter().all(|l| l.split(' ').count() == 30));

    let (parsed, maxval) = pgm::parse_plain(&text).unwrap();
    assert_eq!(parsed, grid);
    assert_eq!(maxval, 50);
}

#[test]
fn run_writes_a_decodable_plain_graymap() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("mandelbrot.pgm");
    let config = Config {
        width: 64,
        height: 48,
        trials: 2,
        threads: 2,
        output: output.clone(),
        ..Config::default()
    };
    let report = mandelpar::run(&config).unwrap();
    assert_eq!(report.len(), 2);

    let text = fs::read_to_string(&output).unwrap();
    let (grid, maxval) = pgm::parse_plain(&text).unwrap();
    assert_eq!(maxval, 255);

    let decoded = image::open(&output).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 48));
    let samples: Vec<u32> = decoded.to_luma().into_raw().into_iter().map(u32::from).collect();
    assert_eq!(samples, grid.into_cells());
}

#[test]
fn run_writes_a_decodable_raw_graymap() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("mandelbrot.pgm");
    let config = Config {
        width: 32,
        height: 24,
        trials: 1,
        threads: 2,
        output: output.clone(),
        encoding: Encoding::Raw,
        ..Config::default()
    };
    mandelpar::run(&config).unwrap();

    let renderer = Renderer::new(32, 24, 255).unwrap();
    let mut expected = renderer.grid().unwrap();
    renderer.render_single(&mut expected).unwrap();

    let decoded = image::open(&output).unwrap();
    let samples: Vec<u32> = decoded.to_luma().into_raw().into_iter().map(u32::from).collect();
    assert_eq!(samples, expected.into_cells());
}

#[test]
fn unwritable_destinations_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        width: 8,
        height: 8,
        trials: 1,
        threads: 1,
        output: dir.path().join("missing").join("mandelbrot.pgm"),
        ..Config::default()
    };
    match mandelpar::run(&config) {
        Err(mandelpar::Error::Io { .. }) => (),
        other => panic!("expected an I/O error, got {:?}", other),
    }
}
