use float_eq::assert_float_eq;
use meshdiff::{
    chamfer, chamfer_with_config, hausdorff, hausdorff_with_config, rms_vertex_distance,
    rms_vertex_distance_with_config, MetricError, MetricsConfig,
};
use meshdiff_mesh::{DefaultMesh, Triangle, TriangleMesh, Vector3, VertexIndex};
use meshdiff_test_data::{cube, empty, tetrahedron, unit_cube, TestModel};

type Distances = (f64, f64, f64);

fn mesh(model: &TestModel) -> DefaultMesh {
    DefaultMesh::from_triangles(model.triangles.iter().copied().map(Triangle::from).collect())
        .process()
}

fn config() -> MetricsConfig {
    MetricsConfig::new()
        .with_samples(3_000)
        .with_poisson_samples(2_000)
        .with_seed(17)
}

#[test]
fn identical_meshes_measure_zero() {
    let a = mesh(&unit_cube());
    let b = mesh(&unit_cube());
    let config = config();

    let c = chamfer_with_config(&a, &b, &config).unwrap();
    assert!(c.a_to_b < 1e-9 && c.b_to_a < 1e-9 && c.symmetric < 1e-9);

    let h = hausdorff_with_config(&a, &b, &config).unwrap();
    assert!(h.a_to_b < 1e-9 && h.b_to_a < 1e-9 && h.symmetric < 1e-9);

    let rms = rms_vertex_distance_with_config(&a, &b, &config).unwrap();
    assert!(rms < 1e-9);
}

#[test]
fn swapping_meshes_swaps_directions() {
    let a = mesh(&unit_cube());
    let b = mesh(&tetrahedron().translated([0.25, 0.1, 0.0]));
    let config = config();

    let (x, y, z): Distances = chamfer_with_config(&a, &b, &config).unwrap().into();
    let swapped: Distances = chamfer_with_config(&b, &a, &config).unwrap().into();
    assert_eq!((y, x, z), swapped);

    let (x, y, z): Distances = hausdorff_with_config(&a, &b, &config).unwrap().into();
    let swapped: Distances = hausdorff_with_config(&b, &a, &config).unwrap().into();
    assert_eq!((y, x, z), swapped);
}

#[test]
fn unseeded_swap_agrees_within_sampling_noise() {
    let a = mesh(&unit_cube());
    let b = mesh(&unit_cube().translated([0.2, 0.0, 0.0]));
    let forward = chamfer(&a, &b, 5_000).unwrap();
    let backward = chamfer(&b, &a, 5_000).unwrap();
    assert_float_eq!(forward.a_to_b, backward.b_to_a, abs <= 0.02);
    assert_float_eq!(forward.b_to_a, backward.a_to_b, abs <= 0.02);
    assert_float_eq!(forward.symmetric, backward.symmetric, abs <= 0.02);
}

#[test]
fn symmetric_values_follow_their_aggregation() {
    let a = mesh(&unit_cube());
    let b = mesh(&tetrahedron().scaled(1.5));
    let config = config();

    let c = chamfer_with_config(&a, &b, &config).unwrap();
    assert_eq!((c.a_to_b + c.b_to_a) / 2.0, c.symmetric);

    let h = hausdorff_with_config(&a, &b, &config).unwrap();
    assert_eq!(h.a_to_b.max(h.b_to_a), h.symmetric);
    assert!(h.symmetric >= c.symmetric);
}

#[test]
fn distances_are_non_negative() {
    let a = mesh(&tetrahedron());
    let b = mesh(&cube(0.5).translated([0.1, 0.1, 0.1]));

    let c = chamfer(&a, &b, 1_000).unwrap();
    assert!(c.a_to_b >= 0.0 && c.b_to_a >= 0.0 && c.symmetric >= 0.0);

    let h = hausdorff(&a, &b, 1_000).unwrap();
    assert!(h.a_to_b >= 0.0 && h.b_to_a >= 0.0 && h.symmetric >= 0.0);

    let rms = rms_vertex_distance_with_config(&a, &b, &config()).unwrap();
    assert!(rms >= 0.0);
}

#[test]
fn metrics_scale_with_the_meshes() {
    let a = unit_cube();
    let b = tetrahedron().translated([0.3, 0.2, 0.1]);
    let k = 3.0;
    let config = config();

    let c1 = chamfer_with_config(&mesh(&a), &mesh(&b), &config).unwrap();
    let ck = chamfer_with_config(&mesh(&a.scaled(k)), &mesh(&b.scaled(k)), &config).unwrap();
    assert_float_eq!(ck.symmetric, k * c1.symmetric, rmax <= 1e-6);
    assert_float_eq!(ck.a_to_b, k * c1.a_to_b, rmax <= 1e-6);

    let h1 = hausdorff_with_config(&mesh(&a), &mesh(&b), &config).unwrap();
    let hk = hausdorff_with_config(&mesh(&a.scaled(k)), &mesh(&b.scaled(k)), &config).unwrap();
    assert_float_eq!(hk.symmetric, k * h1.symmetric, rmax <= 1e-6);

    let r1 = rms_vertex_distance_with_config(&mesh(&a), &mesh(&b), &config).unwrap();
    let rk = rms_vertex_distance_with_config(&mesh(&a.scaled(k)), &mesh(&b.scaled(k)), &config)
        .unwrap();
    assert_float_eq!(rk, k * r1, rmax <= 0.05);
}

#[test]
fn translated_unit_cube() {
    let a = mesh(&unit_cube());
    let b = mesh(&unit_cube().translated([1.0, 0.0, 0.0]));
    let config = config();

    let c = chamfer_with_config(&a, &b, &config).unwrap();
    assert!(c.symmetric > 0.0);
    assert!(c.symmetric <= 1.0);
    // Four of the six faces sweep from 0 to 1 away, one sits 1 away and one
    // touches the other cube, so every direction averages close to one half.
    assert_float_eq!(c.symmetric, 0.5, abs <= 0.1);

    let h = hausdorff_with_config(&a, &b, &config).unwrap();
    assert_float_eq!(h.symmetric, 1.0, abs <= 0.1);
    assert!(h.symmetric >= c.symmetric);
}

#[test]
fn perturbed_vertex_bounds_rms() {
    let model = unit_cube();
    let a = mesh(&model);
    let config = config();

    let offset = [0.05, 0.05, 0.05];
    let magnitude = (3.0f64 * 0.05 * 0.05).sqrt();
    let b = mesh(&model.with_vertex_moved([1.0, 1.0, 1.0], offset));
    let rms = rms_vertex_distance_with_config(&a, &b, &config).unwrap();
    assert!(rms > 0.0);
    assert!(rms <= magnitude);

    let small = [0.005, 0.005, 0.005];
    let small_magnitude = (3.0f64 * 0.005 * 0.005).sqrt();
    let b = mesh(&model.with_vertex_moved([1.0, 1.0, 1.0], small));
    let small_rms = rms_vertex_distance_with_config(&a, &b, &config).unwrap();
    assert!(small_rms <= small_magnitude);
    assert!(small_rms < rms);
}

#[test]
fn rms_measures_vertices_not_samples() {
    // A small cube standing on a unit square: its bottom four vertices lie on
    // the square and the top four sit half a unit above it.
    let a = mesh(&cube(0.5).translated([0.25, 0.25, 0.0]));
    let b = mesh(&TestModel {
        triangles: vec![
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]],
            [[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        ],
    });
    assert_eq!(8, a.vertices().len());
    let rms = rms_vertex_distance_with_config(&a, &b, &config()).unwrap();
    // Four vertices on the plane, four at height 0.5: sqrt(4 * 0.25 / 8).
    assert_float_eq!(rms, (0.125f64).sqrt(), abs <= 0.01);
}

#[test]
fn empty_mesh_is_rejected_by_every_metric() {
    let empty = mesh(&empty());
    let cube = mesh(&unit_cube());
    let invalid = |err: MetricError| matches!(err, MetricError::InvalidMesh(_));

    assert!(invalid(chamfer(&empty, &cube, 100).unwrap_err()));
    assert!(invalid(chamfer(&cube, &empty, 100).unwrap_err()));
    assert!(invalid(hausdorff(&empty, &cube, 100).unwrap_err()));
    assert!(invalid(hausdorff(&cube, &empty, 100).unwrap_err()));
    assert!(invalid(
        rms_vertex_distance_with_config(&empty, &cube, &config()).unwrap_err()
    ));
    assert!(invalid(rms_vertex_distance(&cube, &empty).unwrap_err()));
}

#[test]
fn rms_rejects_vertices_without_faces() {
    let loose = VertexIndex::from_parts(vec![Vector3::new(0.3, 0.3, 0.3)], vec![]).unwrap();
    let cube = mesh(&unit_cube());
    let err = rms_vertex_distance_with_config(&loose, &cube, &config()).unwrap_err();
    assert!(matches!(err, MetricError::InvalidMesh(_)));
}
