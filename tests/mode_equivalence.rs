use circlehough::kernel::{scalar::vote_columns, vote, VoteParams};
use circlehough::partition::{self, DistStrategy};
use circlehough::{Accumulator, EdgeImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_edges(width: usize, height: usize, seed: u64) -> EdgeImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = EdgeImage::new(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            if rng.random_bool(0.05) {
                edges.set_edge(x, y);
            }
        }
    }
    edges
}

#[test]
fn replicate_full_workers_reproduce_the_sequential_accumulator() {
    let edges = random_edges(60, 45, 11);
    let (min_radius, max_radius) = (4, 9);
    let depth = max_radius - min_radius + 1;

    let sequential = vote(&edges, min_radius, max_radius).unwrap();

    let parts = partition::split(DistStrategy::ReplicateFull, edges.width(), max_radius, 3);
    let mut global = Accumulator::new(edges.width(), edges.height(), depth).unwrap();
    for part in &parts {
        let params = VoteParams {
            min_radius,
            max_radius,
            axis_shift: part.axis_shift,
        };
        let mut local = Accumulator::new(part.acc_width, edges.height(), depth).unwrap();
        let (x0, x1) = part.vote_columns();
        vote_columns(&edges, x0, x1, &params, &mut local);
        global.merge_from(&local, part.shift_x).unwrap();
    }

    assert_eq!(global, sequential);
}

#[test]
fn crop_with_halo_workers_reproduce_the_sequential_interior() {
    let edges = random_edges(60, 45, 7);
    let (min_radius, max_radius) = (4, 9);
    let depth = max_radius - min_radius + 1;

    let sequential = vote(&edges, min_radius, max_radius).unwrap();

    let parts = partition::split(DistStrategy::CropWithHalo, edges.width(), max_radius, 4);
    let global_width =
        partition::global_acc_width(DistStrategy::CropWithHalo, edges.width(), max_radius);
    let mut global = Accumulator::new(global_width, edges.height(), depth).unwrap();
    for part in &parts {
        let stripe = edges.crop_columns(part.image_x0, part.image_width).unwrap();
        let params = VoteParams {
            min_radius,
            max_radius,
            axis_shift: part.axis_shift,
        };
        let mut local = Accumulator::new(part.acc_width, edges.height(), depth).unwrap();
        let (x0, x1) = part.vote_columns();
        vote_columns(&stripe, x0, x1, &params, &mut local);
        global.merge_from(&local, part.shift_x).unwrap();
    }

    // Halo columns collect votes the image-sized accumulator clips, so only
    // the interior is compared.
    let shift = partition::axis_shift(DistStrategy::CropWithHalo, max_radius);
    for r in 0..depth {
        for y in 0..edges.height() {
            for x in 0..edges.width() {
                assert_eq!(
                    global.get(x + shift, y, r),
                    sequential.get(x, y, r),
                    "mismatch at ({x}, {y}, {r})"
                );
            }
        }
    }
}

#[test]
fn single_worker_crop_equals_sequential_interior() {
    let edges = random_edges(30, 20, 3);
    let sequential = vote(&edges, 2, 6).unwrap();

    let parts = partition::split(DistStrategy::CropWithHalo, edges.width(), 6, 1);
    assert_eq!(parts.len(), 1);
    let part = parts[0];
    let params = VoteParams {
        min_radius: 2,
        max_radius: 6,
        axis_shift: part.axis_shift,
    };
    let mut local = Accumulator::new(part.acc_width, edges.height(), 5).unwrap();
    vote_columns(&edges, 0, edges.width(), &params, &mut local);

    for r in 0..5 {
        for y in 0..edges.height() {
            for x in 0..edges.width() {
                assert_eq!(local.get(x + 6, y, r), sequential.get(x, y, r));
            }
        }
    }
}
