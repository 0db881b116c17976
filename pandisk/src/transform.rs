//! Rigid geometric transforms over whole scenes.

use nalgebra::{Point2, Rotation2};

use crate::error::{SceneError, SceneResult};
use crate::objects::SceneObject;
use crate::scene::Scene;
use crate::units::{wrap_degrees, Angle, AngleExt};

/// Rotation that turns on-sky offsets by `angle_degrees` east of north, the
/// sense position angles are measured in.
///
/// Offsets have y to the north and east towards -x, as on a sky image, so
/// increasing position angle turns counter-clockwise.
pub(crate) fn sky_rotation(angle_degrees: f64) -> Rotation2<f64> {
    Rotation2::new(Angle::from_degrees(angle_degrees).as_radians())
}

/// Rotate every object of a scene about the origin.
///
/// Ring position angles gain `angle_degrees` and wrap into [0, 360); dot
/// offsets turn about the star by the same angle. Stars have no orientation
/// and are returned unchanged. The input scene is not modified.
///
/// # Errors
/// `EmptyScene` if the scene has no objects
pub fn rotate_scene(scene: &Scene, angle_degrees: f64) -> SceneResult<Scene> {
    if scene.is_empty() {
        return Err(SceneError::EmptyScene);
    }
    if !angle_degrees.is_finite() {
        return Err(SceneError::InvalidGeometry(format!(
            "rotation angle must be finite, got {angle_degrees}"
        )));
    }

    let rotation = sky_rotation(angle_degrees);
    let mut rotated = scene.clone();
    for obj in rotated.objects_mut() {
        match obj {
            SceneObject::Star(_) => {}
            SceneObject::Ring(ring) => {
                ring.geometry.position_angle =
                    wrap_degrees(ring.geometry.position_angle + angle_degrees);
            }
            SceneObject::Dot(dot) => {
                let p = rotation * Point2::new(dot.x, dot.y);
                dot.x = p.x;
                dot.y = p.y;
            }
        }
    }
    Ok(rotated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{BlackbodySed, Dot};
    use crate::scene::{add_dot, add_ring, create_star};
    use approx::assert_relative_eq;

    fn ringed_scene() -> Scene {
        let scene = create_star("a5v", 5.0).unwrap();
        let scene = add_ring(scene, 5.0, 20.0, 10.0, 10.0, 30.0, 0.0, 0.0).unwrap();
        add_ring(scene, 25.0, 30.0, 1.0, 350.0, 30.0, 0.0, 0.0).unwrap()
    }

    fn position_angles(scene: &Scene) -> Vec<f64> {
        scene.rings().map(|r| r.geometry.position_angle).collect()
    }

    /// Difference of two angles folded into [0, 180]
    fn angular_distance(a: f64, b: f64) -> f64 {
        let d = wrap_degrees(a - b);
        d.min(360.0 - d)
    }

    #[test]
    fn test_rotation_wraps_position_angles() {
        let rotated = rotate_scene(&ringed_scene(), -30.0).unwrap();
        let pas = position_angles(&rotated);
        assert_relative_eq!(pas[0], 340.0, epsilon = 1e-9);
        assert_relative_eq!(pas[1], 320.0, epsilon = 1e-9);
        assert!(pas.iter().all(|pa| (0.0..360.0).contains(pa)));
    }

    #[test]
    fn test_rotation_does_not_mutate_input() {
        let scene = ringed_scene();
        let before = scene.clone();
        let _ = rotate_scene(&scene, 77.0).unwrap();
        assert_eq!(scene, before);
    }

    #[test]
    fn test_stars_are_unchanged() {
        let scene = ringed_scene();
        let rotated = rotate_scene(&scene, 123.0).unwrap();
        assert_eq!(rotated.get(0), scene.get(0));
    }

    #[test]
    fn test_inverse_rotation_restores_angles() {
        let scene = ringed_scene();
        for angle in [-30.0, 30.0, 181.5, -725.0] {
            let back = rotate_scene(&rotate_scene(&scene, angle).unwrap(), -angle).unwrap();
            for (a, b) in position_angles(&back).iter().zip(position_angles(&scene)) {
                assert!(angular_distance(*a, b) < 1e-9, "{a} vs {b} after {angle}");
            }
        }
    }

    #[test]
    fn test_rotations_compose() {
        let scene = ringed_scene();
        for (a, b) in [(10.0, 20.0), (-30.0, 30.0), (200.0, 300.0), (-400.0, 15.5)] {
            let twice = rotate_scene(&rotate_scene(&scene, a).unwrap(), b).unwrap();
            let once = rotate_scene(&scene, wrap_degrees(a + b)).unwrap();
            for (x, y) in position_angles(&twice).iter().zip(position_angles(&once)) {
                assert!(angular_distance(*x, y) < 1e-9, "{x} vs {y} for {a}+{b}");
            }
        }
    }

    #[test]
    fn test_dots_turn_east_of_north() {
        let dot = Dot::new(0.0, 1.0, 0.1, 1.0, BlackbodySed::default()).unwrap();
        let scene = add_dot(create_star("a5v", 5.0).unwrap(), dot);

        // A source due north moves due east (-x) after a 90 degree turn
        let rotated = rotate_scene(&scene, 90.0).unwrap();
        let SceneObject::Dot(dot) = rotated.get(1).unwrap() else {
            panic!("expected a dot");
        };
        assert_relative_eq!(dot.x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(dot.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_scene_fails() {
        assert!(matches!(
            rotate_scene(&Scene::new(), 10.0),
            Err(SceneError::EmptyScene)
        ));
    }

    #[test]
    fn test_non_finite_angle_fails() {
        assert!(matches!(
            rotate_scene(&ringed_scene(), f64::NAN),
            Err(SceneError::InvalidGeometry(_))
        ));
    }
}
