//! End-to-end scene pipeline: build, rotate, export and plot

use approx::assert_relative_eq;
use pandisk::spectral::SpectralType;
use pandisk::{
    add_ring, create_star, plot_disk_scene, rotate_scene, to_pandeia_sources, ExportConfig,
    MockBackend, PlottersBackend, RenderArtifact, Scene, SceneError, SceneObject,
};
use tempfile::TempDir;

fn readme_scene() -> Scene {
    let targ = create_star("a5v", 5.0).unwrap();
    let targ = add_ring(targ, 5.0, 20.0, 10.0, 0.0, 30.0, 0.0, 0.0).unwrap();
    rotate_scene(&targ, -30.0).unwrap()
}

#[test]
fn test_readme_flow() {
    let targ = readme_scene();
    assert_eq!(targ.len(), 2);

    let ring = targ.rings().next().unwrap();
    assert_relative_eq!(ring.geometry.position_angle, 330.0, epsilon = 1e-9);

    let backend = MockBackend::new();
    let handle = plot_disk_scene(&targ, &backend).unwrap();
    assert_eq!(handle.backend, "mock");
    assert!(handle.components > 1);
    assert_eq!(backend.renders()[0].len(), handle.components);
}

#[test]
fn test_every_spectral_type_round_trips() {
    for sptype in SpectralType::vocabulary() {
        for mag in [-1.5, 0.0, 5.0, 12.25] {
            let scene = create_star(&sptype.key(), mag).unwrap();
            assert_eq!(scene.len(), 1);
            let SceneObject::Star(star) = scene.get(0).unwrap() else {
                panic!("expected a star");
            };
            assert_eq!(star.spectral_type, sptype);
            assert_eq!(star.magnitude, mag);
        }
    }
}

#[test]
fn test_ring_radii_ordering() {
    let star = create_star("a5v", 5.0).unwrap();
    assert!(matches!(
        add_ring(star.clone(), 20.0, 5.0, 10.0, 0.0, 30.0, 0.0, 0.0),
        Err(SceneError::InvalidGeometry(_))
    ));
    let scene = add_ring(star, 5.0, 20.0, 10.0, 0.0, 30.0, 0.0, 0.0).unwrap();
    assert_eq!(scene.len(), 2);
}

#[test]
fn test_ring_needs_a_star() {
    assert!(matches!(
        add_ring(Scene::new(), 5.0, 20.0, 10.0, 0.0, 30.0, 0.0, 0.0),
        Err(SceneError::EmptyScene)
    ));
}

#[test]
fn test_rotation_laws_over_angle_grid() {
    let scene = create_star("g2v", 6.0).unwrap();
    let scene = add_ring(scene, 5.0, 20.0, 10.0, 12.5, 45.0, 0.0, 0.0).unwrap();
    let pa = |s: &Scene| s.rings().next().unwrap().geometry.position_angle;
    let same_angle = |a: f64, b: f64| {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d) < 1e-9
    };

    let angles = [-720.0, -181.0, -30.0, 0.0, 0.5, 30.0, 90.0, 359.9, 1000.0];
    for &a in &angles {
        let back = rotate_scene(&rotate_scene(&scene, -a).unwrap(), a).unwrap();
        assert!(same_angle(pa(&back), pa(&scene)));

        for &b in &angles {
            let twice = rotate_scene(&rotate_scene(&scene, a).unwrap(), b).unwrap();
            let once = rotate_scene(&scene, (a + b).rem_euclid(360.0)).unwrap();
            assert!(same_angle(pa(&twice), pa(&once)), "{a} then {b}");
        }
    }
}

#[test]
fn test_rotation_turns_exported_chunks() {
    let scene = readme_scene();
    let config = ExportConfig::default();
    let before = to_pandeia_sources(&scene, &config).unwrap();
    let after = to_pandeia_sources(&rotate_scene(&scene, 90.0).unwrap(), &config).unwrap();

    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after).skip(1) {
        // Rotation about the star keeps every chunk at the same distance
        let rb = b.position.x_offset.hypot(b.position.y_offset);
        let ra = a.position.x_offset.hypot(a.position.y_offset);
        assert_relative_eq!(rb, ra, epsilon = 1e-9);
        assert_eq!(b.spectrum.normalization, a.spectrum.normalization);
    }
}

#[test]
fn test_plot_empty_scene_fails() {
    let backend = MockBackend::new();
    assert!(matches!(
        plot_disk_scene(&Scene::new(), &backend),
        Err(SceneError::EmptyScene)
    ));
}

#[test]
fn test_plot_rejects_unsupported_output() {
    let dir = TempDir::new().unwrap();
    let backend = PlottersBackend::new(dir.path().join("disk.pdf"));
    assert!(matches!(
        plot_disk_scene(&readme_scene(), &backend),
        Err(SceneError::BackendUnavailable(_))
    ));
}

#[test]
#[ignore = "axis labels need a system font"]
fn test_plot_to_svg() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("plots").join("disk.svg");
    let backend = PlottersBackend::new(&output);

    let handle = plot_disk_scene(&readme_scene(), &backend).unwrap();
    assert_eq!(handle.artifact, RenderArtifact::File(output.clone()));
    assert!(handle.components > 1);
    let svg = std::fs::read_to_string(&output).unwrap();
    assert!(svg.contains("<polygon"));
}

#[test]
fn test_scene_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scene.json");
    let scene = readme_scene();

    scene.save_to_file(&path).unwrap();
    assert_eq!(Scene::load_from_file(&path).unwrap(), scene);
}
