use super::*;

#[test]
fn cross_follows_right_hand_rule() {
    assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    assert_eq!(Vec3::Y.cross(Vec3::Z), Vec3::X);
    assert_eq!(Vec3::Z.cross(Vec3::X), Vec3::Y);
}

#[test]
fn normalize_handles_zero_length() {
    assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    assert_eq!(Vec3::ZERO.normalize_or(Vec3::X), Vec3::X);
    let n = Vec3::new(3.0, 0.0, 4.0).normalize();
    assert!((n.length() - 1.0).abs() < 1e-12);
    assert!((n.x - 0.6).abs() < 1e-12);
}

#[test]
fn lerp_endpoints() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-1.0, 0.0, 5.0);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Vec3::new(0.0, 1.0, 4.0));
}
