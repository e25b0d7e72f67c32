use circlehough::kernel::vote;
use circlehough::peaks::{extract, PeakParams};
use circlehough::{detect, Accumulator, DetectConfig, DistStrategy, EdgeImage, ExecMode};

fn draw_circle(edges: &mut EdgeImage, cx: f64, cy: f64, radius: f64) {
    for t in 0..=360 {
        let angle = (t as f64 * std::f64::consts::PI) / 180.0;
        let x = (cx + radius * angle.cos()) as i64;
        let y = (cy + radius * angle.sin()) as i64;
        if x >= 0 && y >= 0 && (x as usize) < edges.width() && (y as usize) < edges.height() {
            edges.set_edge(x as usize, y as usize);
        }
    }
}

fn argmax(acc: &Accumulator) -> (usize, usize, usize, u32) {
    let mut best = (0, 0, 0, 0);
    for r in 0..acc.depth() {
        for y in 0..acc.height() {
            for x in 0..acc.width() {
                let votes = acc.get(x, y, r);
                if votes > best.3 {
                    best = (x, y, r, votes);
                }
            }
        }
    }
    best
}

#[test]
fn single_circle_peaks_on_its_radius_layer() {
    let mut edges = EdgeImage::new(100, 100).unwrap();
    draw_circle(&mut edges, 50.0, 50.0, 20.0);

    let acc = vote(&edges, 15, 25).unwrap();
    let (x, y, r_offset, votes) = argmax(&acc);

    // Truncation toward zero can shift the peak one cell toward the origin,
    // but never off the radius-20 layer.
    assert_eq!(r_offset + 15, 20);
    assert!(x.abs_diff(50) <= 1, "peak x {x}");
    assert!(y.abs_diff(50) <= 1, "peak y {y}");
    assert!(votes > 50, "peak votes {votes}");
}

#[test]
fn single_circle_yields_exactly_one_detection_with_binning() {
    let mut edges = EdgeImage::new(100, 100).unwrap();
    draw_circle(&mut edges, 50.0, 50.0, 20.0);

    let acc = vote(&edges, 15, 25).unwrap();
    let (_, _, _, peak) = argmax(&acc);

    let detection = detect(
        &edges,
        &DetectConfig {
            min_radius: 15,
            max_radius: 25,
            peak_threshold: peak,
            use_binning: true,
            bin_size: 100,
            use_spacing: true,
            spacing_size: 40,
            mode: ExecMode::Sequential,
            ..DetectConfig::default()
        },
    )
    .unwrap();

    assert_eq!(detection.count(), 1);
    let circle = detection.circles[0];
    assert_eq!(circle.radius, 20);
    assert!(circle.x.abs_diff(50) <= 1);
    assert!(circle.y.abs_diff(50) <= 1);
}

#[test]
fn two_distant_circles_are_both_found() {
    let mut edges = EdgeImage::new(200, 80).unwrap();
    draw_circle(&mut edges, 30.0, 30.0, 12.0);
    draw_circle(&mut edges, 160.0, 40.0, 12.0);

    let acc = vote(&edges, 8, 16).unwrap();

    // Per-half maxima give a threshold both peaks reach.
    let mut left_max = 0;
    let mut right_max = 0;
    for r in 0..acc.depth() {
        for y in 0..acc.height() {
            for x in 0..acc.width() {
                let votes = acc.get(x, y, r);
                if x < 100 {
                    left_max = left_max.max(votes);
                } else {
                    right_max = right_max.max(votes);
                }
            }
        }
    }
    let threshold = left_max.min(right_max);
    assert!(threshold > 0);

    let candidates = extract(
        &acc,
        &PeakParams {
            threshold,
            min_radius: 8,
            axis_shift: 0,
            keep_default: true,
        },
    );
    assert!(candidates
        .iter()
        .any(|c| c.x.abs_diff(30) <= 2 && c.y.abs_diff(30) <= 2 && c.radius.abs_diff(12) <= 1));
    assert!(candidates
        .iter()
        .any(|c| c.x.abs_diff(160) <= 2 && c.y.abs_diff(40) <= 2 && c.radius.abs_diff(12) <= 1));
}

#[test]
fn empty_edge_image_detects_nothing_in_every_mode() {
    let edges = EdgeImage::new(64, 48).unwrap();

    for use_binning in [false, true] {
        let detection = detect(
            &edges,
            &DetectConfig {
                min_radius: 5,
                max_radius: 10,
                peak_threshold: 1,
                use_binning,
                bin_size: 16,
                ..DetectConfig::default()
            },
        )
        .unwrap();
        assert_eq!(detection.count(), 0);
    }
}

#[test]
fn config_normalization_repairs_invalid_ranges() {
    let cfg = DetectConfig {
        min_radius: 0,
        max_radius: 0,
        bin_size: 0,
        thread_count: 0,
        worker_count: 0,
        strategy: DistStrategy::CropWithHalo,
        ..DetectConfig::default()
    }
    .normalized();

    assert_eq!(cfg.min_radius, 1);
    assert_eq!(cfg.max_radius, 1);
    assert_eq!(cfg.bin_size, 1);
    assert_eq!(cfg.thread_count, 1);
    assert_eq!(cfg.worker_count, 1);

    let inverted = DetectConfig {
        min_radius: 30,
        max_radius: 10,
        ..DetectConfig::default()
    }
    .normalized();
    assert_eq!(inverted.max_radius, 30);
}
