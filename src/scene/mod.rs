//! Scene composer: owns the control signal and every animated part of the
//! tree, and advances them all in one explicit tick.
//!
//! Frames nest as world → tree (position + uniform scale) → body (offset +
//! slow spin about Y). Burst groups, photo cards and the ground live in the
//! tree frame; canopy groups and most ornaments live in the body frame and
//! vanish with it once the collapse target passes the hide threshold.

pub mod atmosphere;
pub mod ornaments;
pub mod populate;

use std::f32::consts::TAU;

use glam::{Mat4, Quat, Vec3};

use self::atmosphere::StarField;
use self::ornaments::{OrnamentState, Ornaments};
use crate::camera::CameraProbe;
use crate::error::EvergreenError;
use crate::group::{Appearance, GroupKind, ParentFrame, ParticleField, ParticleGroup};
use crate::options::Options;
use crate::photo::{CardTransform, FrameSpec, PhotoAsset, PhotoCard, PhotoFocus};
use crate::placement::{seeded_rng, PlacementRng};
use crate::signal::ControlSignal;
pub use crate::util::frame_timing::FrameInput;

// ---------------------------------------------------------------------------
// Frame output
// ---------------------------------------------------------------------------

/// One group's output for the current tick.
#[derive(Debug, Clone, Copy)]
pub struct GroupView<'a> {
    /// Group identity.
    pub kind: GroupKind,
    /// Frame the transforms are expressed in.
    pub parent: ParentFrame,
    /// Mesh and material binding.
    pub appearance: Appearance,
    /// Instance transforms.
    pub instances: &'a [Mat4],
    /// Whether the batch should be drawn.
    pub visible: bool,
}

/// Everything a renderer needs for one tick, borrowed from the scene.
#[derive(Debug)]
pub struct SceneFrame<'a, H> {
    /// Signal after this tick's update.
    pub signal: &'a ControlSignal,
    /// Tree frame in world space.
    pub tree_transform: Mat4,
    /// Body frame relative to the tree frame.
    pub body_transform: Mat4,
    /// Whether the body and everything parented to it is drawn.
    pub body_visible: bool,
    /// Photo cards.
    pub photos: &'a [PhotoCard<H>],
    /// Photo card poses in the tree frame, index-aligned with `photos`.
    pub photo_transforms: &'a [CardTransform],
    /// Non-instanced decorations.
    pub ornaments: &'a Ornaments,
    /// Background stars in world space.
    pub star_field: &'a StarField,
    field: &'a ParticleField,
}

impl<'a, H> SceneFrame<'a, H> {
    fn view(&self, group: &'a ParticleGroup) -> GroupView<'a> {
        let parent_visible = match group.parent() {
            ParentFrame::Tree => true,
            ParentFrame::Body => self.body_visible,
        };
        GroupView {
            kind: group.kind(),
            parent: group.parent(),
            appearance: group.appearance(),
            instances: group.batch().transforms(),
            visible: parent_visible && group.batch().is_visible(),
        }
    }

    /// Every group in draw order.
    pub fn groups(&self) -> impl Iterator<Item = GroupView<'a>> + '_ {
        self.field.iter().map(|group| self.view(group))
    }

    /// The group of the given kind.
    #[must_use]
    pub fn group(&self, kind: GroupKind) -> Option<GroupView<'a>> {
        self.field.get(kind).map(|group| self.view(group))
    }

    /// Ornament opacities and visibility.
    #[must_use]
    pub fn ornament_state(&self) -> &'a OrnamentState {
        self.ornaments.state()
    }

    /// Body frame in world space.
    #[must_use]
    pub fn body_world_transform(&self) -> Mat4 {
        self.tree_transform * self.body_transform
    }

    /// Drawn instance count across visible groups.
    #[must_use]
    pub fn visible_instances(&self) -> usize {
        self.groups()
            .filter(|g| g.visible)
            .map(|g| g.instances.len())
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// The tree scene. `H` is the texture handle type of the photo cards.
#[derive(Debug)]
pub struct TreeScene<H> {
    signal: ControlSignal,
    field: ParticleField,
    photos: PhotoFocus<H>,
    ornaments: Ornaments,
    star_field: StarField,

    tree_transform: Mat4,
    focus_center: Vec3,
    body_offset: Vec3,
    body_spin: f32,
    body_rotation: f32,
    body_hide_threshold: f32,
    body_visible: bool,

    rng: PlacementRng,
    /// Last finite elapsed time seen by `tick`.
    elapsed: f32,
    /// Ticks since construction.
    frame: u64,
}

impl<H> TreeScene<H> {
    /// Validate `options` and generate every population from `seed`.
    pub fn new(options: &Options, seed: u64) -> Result<Self, EvergreenError> {
        options.validate()?;
        let mut rng = seeded_rng(seed);

        let field = populate::build_field(&options.groups, &mut rng);
        let star_field = StarField::generate(
            options.groups.star_field,
            StarField::INNER_RADIUS,
            StarField::OUTER_RADIUS,
            &mut rng,
        );

        let tree = &options.tree;
        let tree_transform = Mat4::from_scale_rotation_translation(
            Vec3::splat(tree.scale),
            Quat::IDENTITY,
            Vec3::from_array(tree.position),
        );

        log::debug!(
            "tree scene seeded with {seed}: {} groups, {} instances, {} stars",
            field.len(),
            field.total_instances(),
            star_field.len()
        );

        Ok(Self {
            signal: options.signal.build(),
            field,
            photos: PhotoFocus::new(
                options.photos.tuning(),
                FrameSpec::default(),
                options.photos.ring_size,
            ),
            ornaments: Ornaments::new(tree.star_spin_x, tree.star_spin_y),
            star_field,
            tree_transform,
            focus_center: Vec3::from_array(tree.focus_center),
            body_offset: Vec3::from_array(tree.body_offset),
            body_spin: tree.body_spin,
            body_rotation: 0.0,
            body_hide_threshold: tree.body_hide_threshold,
            body_visible: true,
            rng,
            elapsed: 0.0,
            frame: 0,
        })
    }

    /// Hand the loaded photos to the focus subsystem. Allowed once.
    pub fn attach_photos(&mut self, photos: Vec<PhotoAsset<H>>) -> Result<(), EvergreenError> {
        self.photos.attach(photos, self.focus_center, &mut self.rng)
    }

    /// Advance the whole scene by one frame.
    ///
    /// The camera distance is sampled once and written into the signal;
    /// every group, the photo cards and the ornaments then read that same
    /// signal.
    pub fn tick(&mut self, input: FrameInput, camera: &impl CameraProbe) -> SceneFrame<'_, H> {
        let delta = if input.delta.is_finite() {
            input.delta.max(0.0)
        } else {
            0.0
        };
        // A non-finite clock holds the last good time.
        if input.elapsed.is_finite() {
            self.elapsed = input.elapsed;
        }

        self.signal.update(camera.distance());

        self.body_rotation = (self.body_rotation + delta * self.body_spin).rem_euclid(TAU);
        self.ornaments.advance(delta);
        self.body_visible = self.signal.collapse_target() < self.body_hide_threshold;

        self.field.update_all(&self.signal);
        let viewer = self.tree_transform.inverse().transform_point3(camera.eye());
        self.photos.update(&self.signal, self.elapsed, viewer);
        self.ornaments.update(&self.signal);

        self.frame += 1;
        self.frame_view()
    }

    /// Current outputs without advancing.
    #[must_use]
    pub fn frame_view(&self) -> SceneFrame<'_, H> {
        SceneFrame {
            signal: &self.signal,
            tree_transform: self.tree_transform,
            body_transform: self.body_transform(),
            body_visible: self.body_visible,
            photos: self.photos.cards(),
            photo_transforms: self.photos.transforms(),
            ornaments: &self.ornaments,
            star_field: &self.star_field,
            field: &self.field,
        }
    }

    fn body_transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(Quat::from_rotation_y(self.body_rotation), self.body_offset)
    }

    /// Control signal.
    #[must_use]
    pub fn signal(&self) -> &ControlSignal {
        &self.signal
    }

    /// Particle groups.
    #[must_use]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Photo focus subsystem.
    #[must_use]
    pub fn photos(&self) -> &PhotoFocus<H> {
        &self.photos
    }

    /// Tree frame in world space.
    #[must_use]
    pub fn tree_transform(&self) -> Mat4 {
        self.tree_transform
    }

    /// Ticks since construction.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::options::GroupOptions;

    fn small_options() -> Options {
        let mut options = Options::default();
        options.groups = GroupOptions {
            foliage: 60,
            light_specks: 30,
            ornaments: 20,
            gift_boxes: 6,
            voxels: 30,
            gold_spheres: 8,
            red_spheres: 8,
            white_spheres: 8,
            gold_boxes: 5,
            red_boxes: 5,
            snow: 20,
            gold_cards: 4,
            star_field: 50,
        };
        options
    }

    fn camera_at(distance: f32) -> Camera {
        let target = Vec3::new(-0.1, 0.8, 0.0);
        Camera {
            eye: target + Vec3::new(0.0, 0.0, distance),
            target,
            up: Vec3::Y,
            aspect: 1.6,
            fovy: 45.0,
            znear: 0.1,
            zfar: 50.0,
        }
    }

    fn photos(n: usize) -> Vec<PhotoAsset<u8>> {
        (0..n)
            .map(|i| PhotoAsset {
                texture: i as u8,
                dimensions: None,
            })
            .collect()
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mut options = small_options();
        options.signal.band_end = 9.0;
        assert!(matches!(
            TreeScene::<u8>::new(&options, 1),
            Err(EvergreenError::InvalidOptions(_))
        ));
    }

    #[test]
    fn far_camera_keeps_tree_assembled() {
        let mut scene: TreeScene<u8> = TreeScene::new(&small_options(), 7).unwrap();
        let camera = camera_at(8.5);
        let frame = scene.tick(FrameInput::fixed(0, 1.0 / 60.0), &camera);
        assert_eq!(frame.signal.explosion_factor(), 0.0);
        assert!(frame.body_visible);
        for view in frame.groups() {
            assert!(view.visible, "{}", view.kind.label());
        }
        let foliage = scene.field().get(GroupKind::Foliage).unwrap();
        for (m, p) in foliage.batch().transforms().iter().zip(foliage.placements().iter()) {
            assert_eq!(m.w_axis.truncate(), p.position);
        }
    }

    #[test]
    fn close_camera_bursts_and_hides_body() {
        let mut scene: TreeScene<u8> = TreeScene::new(&small_options(), 7).unwrap();
        let camera = camera_at(4.0);
        for i in 0..120 {
            let _ = scene.tick(FrameInput::fixed(i, 1.0 / 60.0), &camera);
        }
        let frame = scene.frame_view();
        assert!(frame.signal.explosion_factor() > 0.99);
        assert!(!frame.body_visible);
        assert!(!frame.group(GroupKind::Foliage).unwrap().visible);
        assert!(!frame.group(GroupKind::OrnamentsGold).unwrap().visible);
        assert!(frame.group(GroupKind::Snow).unwrap().visible);
        assert!(!frame.ornament_state().star_visible);
        assert_eq!(scene.frame(), 120);
    }

    #[test]
    fn signal_is_written_once_per_tick() {
        let mut scene: TreeScene<u8> = TreeScene::new(&small_options(), 3).unwrap();
        let frame = scene.tick(FrameInput::fixed(0, 1.0 / 60.0), &camera_at(4.0));
        assert_eq!(frame.signal.collapse_target(), 1.0);
        assert!((frame.signal.explosion_factor() - 0.08).abs() < 1e-6);
    }

    #[test]
    fn body_spins_with_delta() {
        let mut scene: TreeScene<u8> = TreeScene::new(&small_options(), 3).unwrap();
        let camera = camera_at(8.5);
        let frame = scene.tick(FrameInput { elapsed: 1.0, delta: 1.0 }, &camera);
        let (_, rotation, translation) = frame.body_transform.to_scale_rotation_translation();
        assert!((translation - Vec3::new(0.0, 0.3, 0.0)).length() < 1e-6);
        assert!(rotation.angle_between(Quat::from_rotation_y(0.12)) < 1e-3);

        // Non-finite or negative deltas do not move the body
        let before = scene.frame_view().body_transform;
        let frame = scene.tick(FrameInput { elapsed: 1.0, delta: f32::NAN }, &camera);
        assert_eq!(frame.body_transform, before);
        let frame = scene.tick(FrameInput { elapsed: 1.0, delta: -3.0 }, &camera);
        assert_eq!(frame.body_transform, before);
    }

    #[test]
    fn photos_attach_once_and_follow_focus() {
        let mut scene: TreeScene<u8> = TreeScene::new(&small_options(), 11).unwrap();
        scene.attach_photos(photos(3)).unwrap();
        assert!(matches!(
            scene.attach_photos(photos(1)),
            Err(EvergreenError::PhotosAlreadyAttached)
        ));

        let camera = camera_at(3.8);
        for i in 0..200 {
            let _ = scene.tick(FrameInput::fixed(i, 1.0 / 60.0), &camera);
        }
        let frame = scene.frame_view();
        assert_eq!(frame.photos.len(), 3);
        assert_eq!(frame.photo_transforms.len(), 3);
        let ring = scene.photos().ring().unwrap();
        for (card, pose) in frame.photos.iter().zip(frame.photo_transforms) {
            assert!(pose.billboarded);
            let slot = ring.slot(card.slot).unwrap();
            assert!((pose.position - slot.position).length() < 0.05);
        }
    }

    #[test]
    fn non_finite_clock_holds_card_poses() {
        let camera = camera_at(5.0);
        let run = |second: f32| {
            let mut scene: TreeScene<u8> = TreeScene::new(&small_options(), 5).unwrap();
            scene.attach_photos(photos(1)).unwrap();
            let _ = scene.tick(FrameInput { elapsed: 2.0, delta: 0.016 }, &camera);
            scene
                .tick(FrameInput { elapsed: second, delta: 0.016 }, &camera)
                .photo_transforms[0]
        };

        let held = run(2.0);
        assert!(held.position.is_finite());
        for elapsed in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert_eq!(run(elapsed), held);
        }
    }

    #[test]
    fn no_photos_renders_no_cards() {
        let mut scene: TreeScene<u8> = TreeScene::new(&small_options(), 11).unwrap();
        let frame = scene.tick(FrameInput::fixed(0, 1.0 / 60.0), &camera_at(5.0));
        assert!(frame.photos.is_empty());
        assert!(frame.photo_transforms.is_empty());
    }

    #[test]
    fn default_scene_has_every_group() {
        let mut scene: TreeScene<u8> = TreeScene::new(&Options::default(), 1).unwrap();
        let total = scene.field().total_instances();
        let frame = scene.tick(FrameInput::fixed(0, 1.0 / 60.0), &camera_at(8.5));
        assert_eq!(frame.groups().count(), 18);
        assert_eq!(frame.star_field.len(), 1800);
        assert_eq!(frame.visible_instances(), total);
        let tree = frame.tree_transform.w_axis.truncate();
        assert!((tree - Vec3::new(-0.1, 0.3, 0.0)).length() < 1e-6);
    }
}
