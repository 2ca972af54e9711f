use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn basis_is_orthonormal_for_many_angles() {
    for yi in 0..12 {
        for pi in -5..=5 {
            let yaw = yi as f64 * 0.55;
            let pitch = pi as f64 * 0.3;
            let c = create_camera(Vec3::new(1.0, -2.0, 0.5), 7.0, yaw, pitch, 45.0);
            assert!(approx(c.right.length(), 1.0));
            assert!(approx(c.up.length(), 1.0));
            assert!(approx(c.forward.length(), 1.0));
            assert!(approx(c.right.dot(c.up), 0.0));
            assert!(approx(c.right.dot(c.forward), 0.0));
            assert!(approx(c.up.dot(c.forward), 0.0));
        }
    }
}

#[test]
fn vertical_view_uses_world_x_for_right() {
    let c = create_camera(Vec3::ZERO, 5.0, 0.3, std::f64::consts::FRAC_PI_2, 45.0);
    assert_eq!(c.right, Vec3::X);
    assert!(approx(c.up.length(), 1.0));
    assert!(approx(c.up.dot(c.forward), 0.0));
}

#[test]
fn origin_projects_to_center_and_positive_y_goes_left() {
    let c = create_camera(Vec3::ZERO, 10.0, 0.0, 0.0, 45.0);
    let p = project_perspective(Vec3::ZERO, &c);
    assert_eq!(p, Point::new(0.0, 0.0));

    let q = project_perspective(Vec3::new(0.0, 1.0, 0.0), &c);
    assert!(q.x < 0.0);
    assert!(approx(q.y, 0.0));

    // Points above the target land above the screen center.
    let up = project_perspective(Vec3::new(0.0, 0.0, 1.0), &c);
    assert!(up.y < 0.0);
}

#[test]
fn projection_is_deterministic() {
    let c = create_camera(Vec3::new(0.2, 0.1, 0.3), 4.5, 1.1, 0.4, 50.0);
    let p = Vec3::new(0.7, -1.3, 0.25);
    let a = project_perspective(p, &c);
    let b = project_perspective(p, &c);
    assert_eq!(a.x.to_bits(), b.x.to_bits());
    assert_eq!(a.y.to_bits(), b.y.to_bits());
}

#[test]
fn points_behind_camera_stay_finite() {
    let c = create_camera(Vec3::ZERO, 10.0, 0.0, 0.0, 45.0);
    let behind = project_perspective(Vec3::new(20.0, 1.0, 1.0), &c);
    assert!(behind.x.is_finite() && behind.y.is_finite());
    let at_eye = project_perspective(c.pos, &c);
    assert!(at_eye.x.is_finite() && at_eye.y.is_finite());
}

#[test]
fn top_visible_from_above_bottom_from_below() {
    let top = [
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
    ];
    let up_normal = face_normal(top[0], top[1], top[2]);
    assert!(approx(up_normal.z, 1.0));
    let bottom_normal = -up_normal;
    let top_center = Vec3::new(0.0, 0.0, 1.0);
    let bottom_center = Vec3::ZERO;

    let above = create_camera(Vec3::ZERO, 10.0, 0.4, 0.6, 45.0);
    assert!(is_face_visible(up_normal, top_center, &above));
    assert!(!is_face_visible(bottom_normal, bottom_center, &above));

    let below = create_camera(Vec3::ZERO, 10.0, 0.4, -0.6, 45.0);
    assert!(!is_face_visible(up_normal, top_center, &below));
    assert!(is_face_visible(bottom_normal, bottom_center, &below));
}

#[test]
fn depth_grows_away_from_camera() {
    let c = create_camera(Vec3::ZERO, 10.0, 0.0, 0.0, 45.0);
    assert!(approx(depth_for_point(Vec3::ZERO, &c), 10.0));
    assert!(depth_for_point(Vec3::new(-3.0, 0.0, 0.0), &c) > 10.0);
    assert_eq!(
        face_center(&[Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0)]),
        Vec3::new(1.0, 2.0, 3.0)
    );
    assert_eq!(face_center(&[]), Vec3::ZERO);
}
