//! Минимальный collision collaborator для headless симуляции
//!
//! В игре ground probe и blocking коллайдеры даёт физический движок.
//! Здесь: axis-aligned прямоугольники (центр = Transform, half_extents),
//! этого хватает для платформ, дверей и trigger-зон.

use bevy::prelude::*;

/// Axis-aligned прямоугольник в world координатах (XY плоскость)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Aabb2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb2 {
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Circle vs AABB overlap (ближайшая точка прямоугольника к центру круга)
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        closest.distance_squared(center) <= radius * radius
    }

    pub fn overlaps(&self, other: &Aabb2) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn top(&self) -> f32 {
        self.max.y
    }
}

/// Поверхность классифицированная как "ground" (пол, платформа)
///
/// Цель ground probe и опора при приземлении.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct GroundSurface {
    pub half_extents: Vec2,
}

impl GroundSurface {
    pub fn new(half_extents: Vec2) -> Self {
        Self { half_extents }
    }

    pub fn bounds(&self, transform: &Transform) -> Aabb2 {
        Aabb2::from_center(transform.translation.truncate(), self.half_extents)
    }
}

/// Физический blocking коллайдер (закрытая дверь, стена)
///
/// Пока `enabled`: горизонтальное движение в него запрещено.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct BlockingCollider {
    pub half_extents: Vec2,
    pub enabled: bool,
}

impl BlockingCollider {
    pub fn new(half_extents: Vec2) -> Self {
        Self {
            half_extents,
            enabled: true,
        }
    }

    pub fn bounds(&self, transform: &Transform) -> Aabb2 {
        Aabb2::from_center(transform.translation.truncate(), self.half_extents)
    }
}

/// Ground probe: круг `radius` в точке `point` против всех ground поверхностей
pub fn probe_ground<'a>(
    point: Vec2,
    radius: f32,
    surfaces: impl IntoIterator<Item = (&'a Transform, &'a GroundSurface)>,
) -> bool {
    surfaces
        .into_iter()
        .any(|(transform, surface)| surface.bounds(transform).overlaps_circle(point, radius))
}
