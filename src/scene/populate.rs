//! Builds every particle group of the tree from the group options.

use std::sync::Arc;

use rand::Rng;

use crate::group::{Appearance, Geometry, GroupKind, ParentFrame, ParticleField, ParticleGroup};
use crate::instancing::{InstanceStyle, Orientation, RibbonAxis};
use crate::options::GroupOptions;
use crate::placement::{generate, partition_weighted, ConeDistribution, Placement, Span};

/// Share of ornaments drawn gold, red and green.
const ORNAMENT_WEIGHTS: [f32; 3] = [0.7, 0.195, 0.105];

/// Body particles hide once the burst is nearly complete.
const BODY_GATE: Option<f32> = Some(0.98);

const fn sphere(segments: u32, material: &'static str) -> Appearance {
    Appearance {
        geometry: Geometry::Sphere { segments },
        material,
    }
}

const fn cube(material: &'static str) -> Appearance {
    Appearance {
        geometry: Geometry::Cube,
        material,
    }
}

fn group(
    kind: GroupKind,
    parent: ParentFrame,
    appearance: Appearance,
    placements: impl Into<Arc<[Placement]>>,
    style: InstanceStyle,
) -> ParticleGroup {
    ParticleGroup::new(kind, parent, appearance, placements.into(), style)
}

/// Generate every population and wrap it in its group, in draw order.
pub fn build_field<R: Rng + ?Sized>(counts: &GroupOptions, rng: &mut R) -> ParticleField {
    let mut field = ParticleField::new();

    // -- Tree body --

    field.insert(group(
        GroupKind::Foliage,
        ParentFrame::Body,
        sphere(6, "foliage"),
        generate(counts.foliage, &ConeDistribution::foliage(), rng),
        InstanceStyle::shrink(0.85, BODY_GATE),
    ));
    field.insert(group(
        GroupKind::LightSpecks,
        ParentFrame::Body,
        sphere(8, "light-speck"),
        generate(counts.light_specks, &ConeDistribution::light_specks(), rng),
        InstanceStyle::shrink(0.9, BODY_GATE),
    ));
    field.insert(group(
        GroupKind::GiftBoxes,
        ParentFrame::Body,
        cube("gift-box"),
        generate(counts.gift_boxes, &ConeDistribution::gift_boxes(), rng),
        InstanceStyle::shrink(1.0, BODY_GATE).with_orientation(Orientation::Euler),
    ));

    let ornaments = generate(counts.ornaments, &ConeDistribution::ornaments(), rng);
    let kinds = [
        (GroupKind::OrnamentsGold, "ornament-gold"),
        (GroupKind::OrnamentsRed, "ornament-red"),
        (GroupKind::OrnamentsGreen, "ornament-green"),
    ];
    for ((kind, material), bucket) in kinds
        .into_iter()
        .zip(partition_weighted(ornaments, &ORNAMENT_WEIGHTS, rng))
    {
        field.insert(group(
            kind,
            ParentFrame::Body,
            sphere(24, material),
            bucket,
            InstanceStyle::shrink(0.8, None),
        ));
    }

    // -- Burst --

    let burst = InstanceStyle::burst();
    field.insert(group(
        GroupKind::Voxels,
        ParentFrame::Tree,
        cube("voxel"),
        generate(counts.voxels, &ConeDistribution::voxels(), rng),
        burst,
    ));

    let spheres = [
        (GroupKind::GoldSpheres, counts.gold_spheres, Span::new(0.04, 0.08), "gold-sphere"),
        (GroupKind::RedSpheres, counts.red_spheres, Span::new(0.045, 0.085), "red-sphere"),
        (GroupKind::WhiteSpheres, counts.white_spheres, Span::new(0.035, 0.07), "white-sphere"),
    ];
    for (kind, count, scale, material) in spheres {
        field.insert(group(
            kind,
            ParentFrame::Tree,
            sphere(12, material),
            generate(count, &ConeDistribution::burst(3.8, scale), rng),
            burst,
        ));
    }

    let boxes = [
        (
            GroupKind::GoldBoxes,
            [GroupKind::GoldRibbonX, GroupKind::GoldRibbonY],
            counts.gold_boxes,
            Span::new(0.05, 0.1),
            ("gold-box", "gold-ribbon"),
        ),
        (
            GroupKind::RedBoxes,
            [GroupKind::RedRibbonX, GroupKind::RedRibbonY],
            counts.red_boxes,
            Span::new(0.05, 0.09),
            ("red-box", "red-ribbon"),
        ),
    ];
    for (kind, ribbons, count, scale, (box_material, ribbon_material)) in boxes {
        let population: Arc<[Placement]> =
            generate(count, &ConeDistribution::burst_boxes(scale), rng).into();
        field.insert(group(
            kind,
            ParentFrame::Tree,
            cube(box_material),
            Arc::clone(&population),
            burst,
        ));
        for (ribbon, axis) in ribbons.into_iter().zip([RibbonAxis::X, RibbonAxis::Y]) {
            field.insert(group(
                ribbon,
                ParentFrame::Tree,
                cube(ribbon_material),
                Arc::clone(&population),
                InstanceStyle::ribbon(axis),
            ));
        }
    }

    field.insert(group(
        GroupKind::Snow,
        ParentFrame::Tree,
        sphere(6, "snow"),
        generate(counts.snow, &ConeDistribution::burst(4.2, Span::new(0.01, 0.02)), rng),
        burst,
    ));
    field.insert(group(
        GroupKind::GoldCards,
        ParentFrame::Tree,
        Appearance {
            geometry: Geometry::Plane {
                width: 1.0,
                height: 1.4,
            },
            material: "gold-card",
        },
        generate(counts.gold_cards, &ConeDistribution::burst_cards(), rng),
        burst,
    ));

    log::debug!(
        "built {} particle groups with {} instances",
        field.len(),
        field.total_instances()
    );
    field
}
