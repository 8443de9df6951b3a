// Randomised checks of the displacement field over seeded inputs
use egui::Pos2;
use meshwarp::models::Grid;
use meshwarp::warp::{par_warp, warp, MeshWarper, WarpConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_point(rng: &mut ChaCha8Rng, range: f32) -> Pos2 {
    Pos2::new(
        rng.random_range(-range..range),
        rng.random_range(-range..range),
    )
}

#[test]
fn test_length_and_purity_over_random_focus() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let grid = Grid::new(320.0, 240.0, 20, 20);
    let before = grid.points().to_vec();
    let config = WarpConfig::default();

    for _ in 0..200 {
        let focus = random_point(&mut rng, 1000.0);
        let out = warp(grid.points(), focus, &config);

        assert_eq!(out.len(), grid.len());
        assert!(out.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert_eq!(out, warp(grid.points(), focus, &config));
        assert_eq!(out, par_warp(grid.points(), focus, &config));
    }

    assert_eq!(grid.points(), before.as_slice());
}

#[test]
fn test_points_never_move_away_from_focus() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let config = WarpConfig::new(2500.0);
    let grid = Grid::new(400.0, 400.0, 25, 25);

    for _ in 0..100 {
        let focus = random_point(&mut rng, 600.0);
        let out = warp(grid.points(), focus, &config);
        for (p, q) in grid.points().iter().zip(&out) {
            // 允许浮点误差
            assert!(
                q.distance(focus) <= p.distance(focus) + 1e-3,
                "{p:?} moved away from {focus:?} to {q:?}"
            );
        }
    }
}

#[test]
fn test_closer_points_move_at_least_as_far_outside_snap_radius() {
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    let config = WarpConfig::default();
    let snap = config.snap_radius();
    let focus = Pos2::new(100.0, 100.0);

    let mut samples: Vec<(f32, f32)> = (0..500)
        .map(|_| {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let dist = rng.random_range(snap * 1.05..snap * 40.0);
            let p = focus + egui::Vec2::angled(angle) * dist;
            let moved = p.distance(config.warp_point(p, focus));
            (p.distance(focus), moved)
        })
        .collect();
    samples.sort_by(|a, b| a.0.total_cmp(&b.0));

    for pair in samples.windows(2) {
        let (near, far) = (pair[0], pair[1]);
        if far.0 - near.0 > 1.0 {
            assert!(
                far.1 <= near.1 + 1e-3,
                "point at {} moved {} but closer point at {} moved {}",
                far.0,
                far.1,
                near.0,
                near.1
            );
        }
    }
}

#[test]
fn test_warper_follows_a_drag() {
    let grid = Grid::new(320.0, 240.0, 20, 20);
    let config = WarpConfig::default();
    let mut warper = MeshWarper::new(grid.clone(), config);

    let path = [
        Pos2::new(10.0, 10.0),
        Pos2::new(10.4, 10.4),
        Pos2::new(50.0, 60.0),
        Pos2::new(160.0, 120.0),
    ];
    let recomputed: Vec<bool> = path.iter().map(|&p| warper.set_focus(p)).collect();
    assert_eq!(recomputed, vec![true, false, true, true]);

    let expected = warp(grid.points(), Pos2::new(160.0, 120.0), &config);
    assert_eq!(warper.warped(), expected.as_slice());
}
