use tetra_xpbd::collision::sat_tet_tet;
use tetra_xpbd::constraints::SpringConstraint;
use tetra_xpbd::{create_box, PhysicsConfig, Real3, Scene, XpbdIntegrator};

fn box_center(scene: &Scene, object: usize) -> Real3 {
    let obj = scene.get_object(object).unwrap();
    let mut sum = Real3::ZERO;
    for &p in &obj.positions {
        sum += p;
    }
    sum / obj.positions.len() as f64
}

#[test]
fn free_falling_box_drops_under_gravity() {
    let mut scene = Scene::new();
    scene.add_object(create_box(Real3::new(0.0, 10.0, 0.0), 1.0, 1.0, 1.0, 0.0));

    let integrator = XpbdIntegrator::new(PhysicsConfig::default());
    let start = box_center(&scene, 0);

    for _ in 0..30 {
        integrator.step(&mut scene);
    }

    let end = box_center(&scene, 0);
    assert!(end.y < start.y, "box should have fallen: start={start:?} end={end:?}");
}

#[test]
fn pinned_vertex_never_moves() {
    let mut scene = Scene::new();
    scene.add_object(create_box(Real3::new(0.0, 10.0, 0.0), 1.0, 1.0, 1.0, 0.0));
    scene.objects[0].pin(8); // center vertex

    let pinned_before = scene.objects[0].positions[8];
    let integrator = XpbdIntegrator::new(PhysicsConfig::default());
    for _ in 0..60 {
        integrator.step(&mut scene);
    }
    let pinned_after = scene.objects[0].positions[8];

    assert_eq!(pinned_before, pinned_after);
}

#[test]
fn pinned_box_keeps_structural_edges_near_rest_length() {
    let mut scene = Scene::new();
    scene.add_object(create_box(Real3::new(0.0, 10.0, 0.0), 1.0, 1.0, 1.0, 0.0));
    scene.objects[0].pin_all(&[0, 1, 2, 3, 4, 5, 6, 7]);

    let integrator = XpbdIntegrator::new(PhysicsConfig::default());
    for _ in 0..30 {
        integrator.step(&mut scene);
    }

    let obj = &scene.objects[0];
    for edge in &obj.edges {
        let len = obj.positions[edge.v1 as usize].distance(obj.positions[edge.v2 as usize]);
        assert!(
            (len - edge.rest_length).abs() < 1e-6,
            "edge {:?} drifted: {} vs rest {}",
            (edge.v1, edge.v2),
            len,
            edge.rest_length
        );
    }
}

#[test]
fn stacked_boxes_settle_without_interpenetrating_past_threshold() {
    let mut scene = Scene::new();
    // Bottom box is fully pinned so it acts as a static floor.
    scene.add_object(create_box(Real3::new(0.0, 0.0, 0.0), 2.0, 2.0, 2.0, 0.0));
    scene.objects[0].pin_all(&(0u32..9).collect::<Vec<_>>());

    // Top box starts just above, overlapping slightly, and should be
    // pushed back out by collision resolution rather than sinking in.
    scene.add_object(create_box(Real3::new(0.0, 1.9, 0.0), 2.0, 2.0, 2.0, 0.0));

    let integrator = XpbdIntegrator::new(PhysicsConfig::default());
    for _ in 0..120 {
        integrator.step(&mut scene);
    }

    let top_center = box_center(&scene, 1);
    assert!(
        top_center.y > 0.5,
        "top box sank through the static bottom box: center={top_center:?}"
    );
}

#[test]
fn cross_object_spring_pulls_objects_together() {
    let mut scene = Scene::new();
    let a = scene.add_object(create_box(Real3::new(-5.0, 0.0, 0.0), 1.0, 1.0, 1.0, 0.0));
    let b = scene.add_object(create_box(Real3::new(5.0, 0.0, 0.0), 1.0, 1.0, 1.0, 0.0));
    scene.objects[a].pin_all(&(0u32..9).collect::<Vec<_>>());
    scene.objects[b].pin_all(&(0u32..9).collect::<Vec<_>>());
    scene.objects[a].set_velocity(Real3::ZERO);
    scene.objects[b].set_velocity(Real3::ZERO);
    // unpin just the center vertex of each so the spring can act on them
    scene.objects[a].inv_masses[8] = 1.0;
    scene.objects[b].inv_masses[8] = 1.0;

    scene.add_spring(SpringConstraint::new(a, 8, b, 8, 1.0, 0.0));

    let config = PhysicsConfig {
        gravity: Real3::ZERO,
        ..PhysicsConfig::default()
    };
    let integrator = XpbdIntegrator::new(config);

    let before = scene.objects[a].positions[8].distance(scene.objects[b].positions[8]);
    for _ in 0..60 {
        integrator.step(&mut scene);
    }
    let after = scene.objects[a].positions[8].distance(scene.objects[b].positions[8]);

    assert!(after < before, "spring should shorten the distance: before={before} after={after}");
}

#[test]
fn scene_center_tracks_mean_of_all_vertices() {
    let mut scene = Scene::new();
    scene.add_object(create_box(Real3::new(0.0, 0.0, 0.0), 2.0, 2.0, 2.0, 0.0));
    let center = scene.center();
    assert!((center - Real3::new(1.0, 1.0, 1.0)).length() < 1e-9);
}

#[test]
fn free_fall_one_step_matches_closed_form_displacement() {
    let mut scene = Scene::new();
    scene.add_object(create_box(Real3::new(0.0, 0.0, 0.0), 1.0, 1.0, 1.0, 0.0));

    let config = PhysicsConfig::default();
    let dt = config.dt;
    assert!((dt - 1.0 / 240.0).abs() < 1e-12, "default dt should be 1/240, got {dt}");

    let before: Vec<Real3> = scene.objects[0].positions.clone();
    let integrator = XpbdIntegrator::new(config.clone());
    integrator.step(&mut scene);
    let after = &scene.objects[0].positions;

    let expected_dy = config.gravity.y * dt * dt;
    for (v, (p0, p1)) in before.iter().zip(after.iter()).enumerate() {
        assert!(
            (p1.x - p0.x).abs() < 1e-12 && (p1.z - p0.z).abs() < 1e-12,
            "vertex {v} should only move along y in unconstrained free fall"
        );
        assert!(
            ((p1.y - p0.y) - expected_dy).abs() < 1e-9,
            "vertex {v}: dy={} expected={}",
            p1.y - p0.y,
            expected_dy
        );
    }
}

#[test]
fn sat_reports_no_collision_for_disjoint_tetrahedra() {
    let t1 = [
        Real3::new(0.0, 0.0, 0.0),
        Real3::new(1.0, 0.0, 0.0),
        Real3::new(0.0, 1.0, 0.0),
        Real3::new(0.0, 0.0, 1.0),
    ];
    let offset = Real3::new(5.0, 0.0, 0.0);
    let t2 = [t1[0] + offset, t1[1] + offset, t1[2] + offset, t1[3] + offset];

    let info = sat_tet_tet(t1, t2, 1e-3);
    assert!(!info.intersecting);
}

#[test]
fn sat_reports_overlap_and_penetration_for_partially_overlapping_tetrahedra() {
    let t1 = [
        Real3::new(0.0, 0.0, 0.0),
        Real3::new(1.0, 0.0, 0.0),
        Real3::new(0.0, 1.0, 0.0),
        Real3::new(0.0, 0.0, 1.0),
    ];
    let offset = Real3::new(0.5, 0.0, 0.0);
    let t2 = [t1[0] + offset, t1[1] + offset, t1[2] + offset, t1[3] + offset];

    let info = sat_tet_tet(t1, t2, 1e-3);
    assert!(info.intersecting);
    assert!(info.axis.y.abs() < 1e-6 && info.axis.z.abs() < 1e-6, "axis should be parallel to x: {:?}", info.axis);
    assert!(info.axis.x.abs() > 1.0 - 1e-6, "axis should be parallel to x: {:?}", info.axis);
    assert!(
        (info.penetration - 0.5).abs() < 1e-6,
        "penetration should be ~0.5, got {}",
        info.penetration
    );
}

#[test]
fn no_vertex_ever_sinks_below_the_ground_plane() {
    let mut scene = Scene::new();
    scene.add_object(create_box(Real3::new(0.0, -1.9, 0.0), 1.0, 1.0, 1.0, 0.0));

    let config = PhysicsConfig::default();
    let ground_y = config.ground_y;
    let integrator = XpbdIntegrator::new(config);

    for _ in 0..120 {
        integrator.step(&mut scene);
        for &p in &scene.objects[0].positions {
            assert!(p.y >= ground_y - 1e-9, "vertex fell through floor: y={} ground_y={}", p.y, ground_y);
        }
    }
}
