//! GPU upload of scene frames.
//!
//! [`SceneBuffers`] keeps one growable vertex buffer of [`InstanceRaw`]
//! per particle group plus one for the photo cards, and rewrites them from
//! a [`SceneFrame`] each tick. Instances are uploaded in world space, so the
//! render collaborator draws every buffer with the same view-projection.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;

use glam::Mat4;
use rustc_hash::FxHashMap;

use self::dynamic_buffer::TypedBuffer;
use crate::group::{GroupKind, ParentFrame};
use crate::instancing::InstanceRaw;
use crate::scene::SceneFrame;

const INSTANCE_USAGE: wgpu::BufferUsages = wgpu::BufferUsages::VERTEX;

/// Per-group instance buffers mirroring the scene.
#[derive(Debug, Default)]
pub struct SceneBuffers {
    groups: FxHashMap<GroupKind, TypedBuffer<InstanceRaw>>,
    photos: Option<TypedBuffer<InstanceRaw>>,
    scratch: Vec<InstanceRaw>,
}

impl SceneBuffers {
    /// Empty set; buffers are created on the first sync.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload every group and photo card of `frame`. Hidden groups upload
    /// zero instances.
    ///
    /// Returns `true` if any buffer was created or reallocated, meaning
    /// vertex buffer bindings must be refreshed.
    pub fn sync<H>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        frame: &SceneFrame<'_, H>,
    ) -> bool {
        let tree = frame.tree_transform;
        let body = frame.body_world_transform();
        let mut changed = false;

        for view in frame.groups() {
            let parent = match view.parent {
                ParentFrame::Tree => tree,
                ParentFrame::Body => body,
            };
            fill_world(&mut self.scratch, parent, view.visible.then_some(view.instances));

            let buffer = self.groups.entry(view.kind).or_insert_with(|| {
                changed = true;
                TypedBuffer::with_capacity(
                    device,
                    view.kind.label(),
                    view.instances.len(),
                    INSTANCE_USAGE,
                )
            });
            changed |= buffer.write(device, queue, &self.scratch);
        }

        self.scratch.clear();
        self.scratch.extend(
            frame
                .photo_transforms
                .iter()
                .map(|card| InstanceRaw::from(&(tree * card.matrix()))),
        );
        let photos = self.photos.get_or_insert_with(|| {
            changed = true;
            TypedBuffer::with_capacity(device, "photo-cards", self.scratch.len(), INSTANCE_USAGE)
        });
        changed |= photos.write(device, queue, &self.scratch);

        changed
    }

    /// Instance buffer of a group, once synced.
    #[must_use]
    pub fn group(&self, kind: GroupKind) -> Option<&TypedBuffer<InstanceRaw>> {
        self.groups.get(&kind)
    }

    /// Photo card buffer, once synced.
    #[must_use]
    pub fn photos(&self) -> Option<&TypedBuffer<InstanceRaw>> {
        self.photos.as_ref()
    }
}

fn fill_world(out: &mut Vec<InstanceRaw>, parent: Mat4, instances: Option<&[Mat4]>) {
    out.clear();
    if let Some(instances) = instances {
        out.extend(instances.iter().map(|m| InstanceRaw::from(&(parent * *m))));
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn hidden_batches_upload_nothing() {
        let mut out = vec![InstanceRaw::from(&Mat4::IDENTITY)];
        fill_world(&mut out, Mat4::IDENTITY, None);
        assert!(out.is_empty());
    }

    #[test]
    fn instances_are_lifted_into_parent_frame() {
        let parent = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let local = [Mat4::from_translation(Vec3::X)];
        let mut out = Vec::new();
        fill_world(&mut out, parent, Some(&local));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].model[3][0], 2.0);
        assert_eq!(out[0].model[3][1], 2.0);
        assert_eq!(out[0].model[3][2], 3.0);
    }
}
