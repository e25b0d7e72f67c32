use circlehough::kernel::vote;
use circlehough::EdgeImage;

#[test]
fn interior_pixels_keep_every_vote() {
    // All projected centers stay at most max_radius from an edge pixel, so
    // pixels deep inside the image never lose votes to clipping.
    let mut edges = EdgeImage::new(60, 60).unwrap();
    edges.set_edge(20, 20);
    edges.set_edge(25, 18);
    edges.set_edge(30, 22);

    let acc = vote(&edges, 3, 7).unwrap();
    let radii = 7 - 3 + 1;
    assert_eq!(acc.total_votes(), 3 * radii * 361);
}

#[test]
fn clipped_votes_match_the_in_bounds_triple_count() {
    let mut edges = EdgeImage::new(12, 9).unwrap();
    edges.set_edge(0, 0);
    edges.set_edge(11, 8);
    edges.set_edge(6, 4);

    let (min_radius, max_radius) = (2usize, 5usize);
    let acc = vote(&edges, min_radius, max_radius).unwrap();

    let mut expected = 0u64;
    for y in 0..edges.height() {
        for x in 0..edges.width() {
            if !edges.is_edge(x, y) {
                continue;
            }
            for radius in min_radius..=max_radius {
                for t in 0..=360 {
                    let angle = (t as f64 * std::f64::consts::PI) / 180.0;
                    let hx = (x as f64 - radius as f64 * angle.cos()) as i32;
                    let hy = (y as f64 - radius as f64 * angle.sin()) as i32;
                    if hx >= 0 && hx < 12 && hy >= 0 && hy < 9 {
                        expected += 1;
                    }
                }
            }
        }
    }

    assert_eq!(acc.total_votes(), expected);
    assert!(acc.total_votes() < 3 * 4 * 361);
}

#[test]
fn no_edges_means_no_votes() {
    let edges = EdgeImage::new(32, 24).unwrap();
    let acc = vote(&edges, 5, 10).unwrap();
    assert_eq!(acc.total_votes(), 0);
}
