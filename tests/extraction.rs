//! End-to-end extraction scenarios: build a tiny mesh/camera/image fixture
//! on disk, run the full pipeline through [`Extractor`], and inspect the
//! resulting atlas.

use std::path::Path;

use image::{Rgb, RgbImage};
use texture_extract::config::Config;
use texture_extract::extractor::Extractor;

fn write_text(path: &Path, contents: &str) {
    std::fs::write(path, contents).unwrap();
}

fn write_solid_image(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    let image = RgbImage::from_pixel(width, height, Rgb(color));
    image.save(path).unwrap();
}

const CAMERA_JSON: &str = r#"{
    "position": [0, 0, 0],
    "look_direction": [0, 0, -1],
    "up_direction": [0, 1, 0],
    "fov_horizontal": 90
}"#;

#[test]
fn front_facing_triangle_paints_its_uv_region_red() {
    let dir = tempfile::tempdir().unwrap();
    let obj_path = dir.path().join("mesh.obj");
    let camera_path = dir.path().join("camera.json");
    let image_path = dir.path().join("photo.png");

    write_text(
        &obj_path,
        "v -1 0 -5\nv 1 0 -5\nv 0 1 -5\n\
         vt 0 0\nvt 1 0\nvt 0.5 1\n\
         vn 0 0 1\n\
         f 1/1/1 2/2/1 3/3/1\n",
    );
    write_text(&camera_path, CAMERA_JSON);
    write_solid_image(&image_path, 100, 100, [255, 0, 0]);

    let extractor =
        Extractor::load(&obj_path, &camera_path, &image_path, None, Config::default()).unwrap();
    let atlas = extractor.extract().unwrap();

    // Centroid of the UV triangle's atlas-space corners (0, h-1), (w-1, h-1),
    // (w/2, 0): solidly inside the triangle regardless of the exact source
    // sample position, since the source photograph is a single flat color.
    let centroid = atlas.get_pixel(512, 682);
    assert_eq!(centroid, [255, 0, 0, 255]);

    // Outside the UV triangle entirely.
    assert_eq!(atlas.get_pixel(0, 0), [0, 0, 0, 255]);
}

#[test]
fn back_facing_triangle_is_culled_and_leaves_atlas_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let obj_path = dir.path().join("mesh.obj");
    let camera_path = dir.path().join("camera.json");
    let image_path = dir.path().join("photo.png");

    write_text(
        &obj_path,
        "v -1 0 -5\nv 1 0 -5\nv 0 1 -5\n\
         vt 0 0\nvt 1 0\nvt 0.5 1\n\
         vn 0 0 -1\n\
         f 1/1/1 2/2/1 3/3/1\n",
    );
    write_text(&camera_path, CAMERA_JSON);
    write_solid_image(&image_path, 100, 100, [255, 0, 0]);

    let extractor =
        Extractor::load(&obj_path, &camera_path, &image_path, None, Config::default()).unwrap();
    let atlas = extractor.extract().unwrap();

    assert_eq!(atlas.get_pixel(512, 682), [0, 0, 0, 255]);
}

#[test]
fn vertex_outside_the_frustum_discards_the_whole_face() {
    let dir = tempfile::tempdir().unwrap();
    let obj_path = dir.path().join("mesh.obj");
    let camera_path = dir.path().join("camera.json");
    let image_path = dir.path().join("photo.png");

    // With fov_h = 90deg at z = -5, x = +-5 maps to screen-x = +-1 (the
    // frustum boundary); x = 20 maps well outside it.
    write_text(
        &obj_path,
        "v -5 0 -5\nv 20 0 -5\nv 0 1 -5\n\
         vt 0 0\nvt 1 0\nvt 0.5 1\n\
         vn 0 0 1\n\
         f 1/1/1 2/2/1 3/3/1\n",
    );
    write_text(&camera_path, CAMERA_JSON);
    write_solid_image(&image_path, 100, 100, [255, 0, 0]);

    let extractor =
        Extractor::load(&obj_path, &camera_path, &image_path, None, Config::default()).unwrap();
    let atlas = extractor.extract().unwrap();

    assert_eq!(atlas.get_pixel(512, 682), [0, 0, 0, 255]);
}

#[test]
fn uv_coordinates_past_one_wrap_around_the_atlas_like_a_torus() {
    let dir = tempfile::tempdir().unwrap();
    let obj_path = dir.path().join("mesh.obj");
    let camera_path = dir.path().join("camera.json");
    let image_path = dir.path().join("photo.png");

    write_text(
        &obj_path,
        "v -1 0 -5\nv 1 0 -5\nv 0 1 -5\n\
         vt 0.9 0.5\nvt 1.1 0.5\nvt 1.0 0.7\n\
         vn 0 0 1\n\
         f 1/1/1 2/2/1 3/3/1\n",
    );
    write_text(&camera_path, CAMERA_JSON);
    write_solid_image(&image_path, 100, 100, [0, 255, 0]);

    let mut config = Config::default();
    config.texture_width = 100;
    config.texture_height = 100;

    let extractor =
        Extractor::load(&obj_path, &camera_path, &image_path, None, config).unwrap();
    let atlas = extractor.extract().unwrap();

    // The UV triangle's atlas-space corners are (90, 50), (110, 50), and
    // (100, 30); at row y = 40 it spans unwrapped columns 95..104. Column
    // 102 (unwrapped) wraps to 2; column 98 needs no wrapping.
    assert_eq!(atlas.get_pixel(98, 40), [0, 255, 0, 255]);
    assert_eq!(atlas.get_pixel(2, 40), [0, 255, 0, 255]);
}

#[test]
fn base_atlas_is_refined_in_place_outside_the_new_triangle() {
    let dir = tempfile::tempdir().unwrap();
    let obj_path = dir.path().join("mesh.obj");
    let camera_path = dir.path().join("camera.json");
    let image_path = dir.path().join("photo.png");
    let base_path = dir.path().join("base.png");

    write_text(
        &obj_path,
        "v -1 0 -5\nv 1 0 -5\nv 0 1 -5\n\
         vt 0 0\nvt 1 0\nvt 0.5 1\n\
         vn 0 0 1\n\
         f 1/1/1 2/2/1 3/3/1\n",
    );
    write_text(&camera_path, CAMERA_JSON);
    write_solid_image(&image_path, 100, 100, [0, 0, 255]);

    let mut config = Config::default();
    config.texture_width = 100;
    config.texture_height = 100;
    write_solid_image(&base_path, 100, 100, [0, 255, 0]);

    let extractor = Extractor::load(
        &obj_path,
        &camera_path,
        &image_path,
        Some(&base_path),
        config,
    )
    .unwrap();
    let atlas = extractor.extract().unwrap();

    // Inside the UV triangle: overwritten blue.
    assert_eq!(atlas.get_pixel(50, 67), [0, 0, 255, 255]);
    // Outside it: still the pre-filled green base.
    assert_eq!(atlas.get_pixel(0, 0), [0, 255, 0, 255]);
}
