//! Orchestration: wires the loaders, pipeline, cullers and rasterizer
//! together into the extraction run described in the module overview.

use std::path::Path;

use log::debug;

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{culler, rasterizer, Pipeline};
use crate::resources::{image_io::AtlasImage, obj};
use crate::scene::{Camera, Scene};

/// Everything a single extraction run needs: the mesh, the camera, the
/// source photograph, and the atlas being filled in.
pub struct Extractor {
    scene: Scene,
    camera: Camera,
    image: AtlasImage,
    atlas: AtlasImage,
    config: Config,
}

impl Extractor {
    /// Loads the mesh, camera, source image, and (optional) base atlas,
    /// deriving the camera's vertical field of view from the source
    /// image's aspect ratio.
    pub fn load(
        obj_path: &Path,
        camera_path: &Path,
        image_path: &Path,
        base_atlas_path: Option<&Path>,
        config: Config,
    ) -> Result<Extractor> {
        let scene = obj::parse(obj_path)?;
        debug!(
            "loaded {} vertices, {} faces from {}",
            scene.vertices.len(),
            scene.faces.len(),
            obj_path.display()
        );

        let mut camera = Camera::load(camera_path)?;
        let image = AtlasImage::load_source(image_path, &config)?;
        camera.attach_image_dimensions(image.width(), image.height());

        let atlas = match base_atlas_path {
            Some(path) => AtlasImage::load(path, &config)?,
            None => AtlasImage::blank(config.texture_width, config.texture_height, &config),
        };

        Ok(Extractor {
            scene,
            camera,
            image,
            atlas,
            config,
        })
    }

    /// Runs the full extraction pipeline:
    ///
    /// 1. cull backfaces
    /// 2. view transform
    /// 3. perspective transform
    /// 4. cull frustum
    /// 5. cull occluded
    /// 6. screen transform
    /// 7. copy pixels
    ///
    /// Returns the filled-in atlas; the caller is responsible for saving it.
    pub fn extract(mut self) -> Result<AtlasImage> {
        culler::cull_backfaces(&mut self.scene, self.camera.position);
        debug!("after backface culling: {} faces", self.scene.faces.len());

        let mut pipeline = Pipeline::new(&self.camera, &self.scene).expect(
            "camera look/up directions were already validated at load time",
        );

        pipeline.apply_view_transformation();
        pipeline.apply_perspective_transformation();
        pipeline.apply_to_scene(&mut self.scene);

        culler::cull_frustum(&mut self.scene);
        debug!("after frustum culling: {} faces", self.scene.faces.len());

        culler::cull_occluded(&mut self.scene, &self.config);
        debug!("after occlusion culling: {} faces", self.scene.faces.len());

        pipeline.reseed_vertices(&self.scene);
        pipeline.apply_screen_transformation(self.image.width(), self.image.height());
        pipeline.apply_to_scene(&mut self.scene);

        rasterizer::copy_pixels(&self.scene, &self.image, &mut self.atlas, &self.config);

        Ok(self.atlas)
    }
}
