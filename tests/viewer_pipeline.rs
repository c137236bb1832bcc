//! End-to-end checks of the viewer transform chain

use r2::config::AppConfig;
use r2::viewer::{cube_corners, view_projection, Viewer, CUBE_EDGES};
use r2_math::{Mat4, Quat, Vec3};

#[test]
fn mvp_matches_manual_composition() {
    let config = AppConfig::default();
    let viewer = Viewer::new(&config);

    let model = config.model.tilt().to_mat4() * config.model.spin_at(7).to_mat4();
    let view = Mat4::look_at(config.camera.eye(), config.camera.target(), config.camera.up());
    let proj = Mat4::perspective(
        config.camera.fov_radians(),
        config.viewer.aspect(),
        config.camera.near,
        config.camera.far,
    );

    let expected = proj * view * model;
    let actual = viewer.mvp(7);
    for (a, b) in actual.as_array().iter().zip(expected.as_array()) {
        assert!((a - b).abs() < 1e-5);
    }
}

#[test]
fn cube_stays_inside_the_frustum() {
    let config = AppConfig::default();
    let vp = view_projection(&config.camera, config.viewer.aspect());

    for frame in [0, 13, 60, 179] {
        let model = config.model.tilt().to_mat4() * config.model.spin_at(frame).to_mat4();
        for corner in cube_corners(config.model.size) {
            let clip = (vp * model) * corner.extend(1.0);
            assert!(clip.w > 0.0);
            let ndc = clip.xyz() / clip.w;
            assert!(ndc.x.abs() < 1.0 && ndc.y.abs() < 1.0 && ndc.z.abs() < 1.0);
        }
    }
}

#[test]
fn spin_keeps_edge_lengths() {
    let config = AppConfig::default();
    let corners = cube_corners(1.0);
    let spin = Quat::from_euler_degrees(30.0, 45.0, 60.0);

    for &(a, b) in CUBE_EDGES.iter() {
        let pa = spin.rotate_vector(corners[a]);
        let pb = spin.rotate_vector(corners[b]);
        assert!((pa.distance(pb) - config.model.size).abs() < 1e-5);
    }
}

#[test]
fn every_frame_renders_something() {
    let mut config = AppConfig::default();
    config.viewer.frames = 24;
    let mut viewer = Viewer::new(&config);

    for frame in 0..viewer.frame_count() {
        let grid = viewer.render_frame(frame);
        assert!(grid.count(config.viewer.corner_glyph) > 0, "frame {}", frame);
    }
    assert!(viewer.compose().contains(&config.viewer.title));
}

#[test]
fn looking_straight_down_the_axis() {
    let mut config = AppConfig::default();
    config.camera.eye = [0.0, 0.0, 5.0];
    config.model.tilt_angle = 0.0;
    config.model.spin = [0.0, 0.0, 0.0];
    let mut viewer = Viewer::new(&config);
    let grid = viewer.render_frame(0).clone();

    // Head-on, the front face is a rectangle symmetric about the centre column
    let mvp = viewer.mvp(0);
    let left = viewer.project(&mvp, Vec3::new(-0.5, 0.5, 0.5)).unwrap();
    let right = viewer.project(&mvp, Vec3::new(0.5, 0.5, 0.5)).unwrap();
    assert_eq!(left.1, right.1);
    let centre = (grid.columns() as i32 - 1) / 2;
    assert!(((centre - left.0) - (right.0 - centre)).abs() <= 1);
}
