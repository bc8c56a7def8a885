// src/engine_lib/portal.rs
use glam::Vec3;

use crate::engine_lib::scene_types::{PortalId, SceneError, SceneObject};
use crate::engine_lib::transform::Transform;

/// Half-thickness of the slab around the aperture plane that counts as touching it.
pub const PORTAL_THICKNESS: f32 = 0.1;

/// Rectangular aperture in the portal's local XZ-plane, `scale.x` wide and
/// `scale.z` deep. Local +Y is the "through" axis.
#[derive(Clone, Debug)]
pub struct Portal {
    name: String,
    transform: Transform,
    target: Option<PortalId>,
}

impl Portal {
    pub fn new(name: impl Into<String>, transform: Transform) -> Result<Self, SceneError> {
        let name = name.into();
        let (width, depth) = (transform.scale.x, transform.scale.z);
        if !(width > 0.0 && depth > 0.0 && width.is_finite() && depth.is_finite()) {
            return Err(SceneError::DegeneratePortal { name, scale: transform.scale });
        }
        Ok(Self { name, transform, target: None })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> Option<PortalId> {
        self.target
    }

    /// Full width and depth of the aperture; `y` is always zero.
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.transform.scale.x, 0.0, self.transform.scale.z)
    }

    /// `point` is in portal-local coordinates with the aperture spanning
    /// `[0, size]` on X and Z. Edges are inclusive, the slab is not.
    pub fn is_point_in_bounds(&self, point: Vec3) -> bool {
        point.x >= 0.0
            && point.z >= 0.0
            && point.x <= self.transform.scale.x
            && point.z <= self.transform.scale.z
            && point.y.abs() < PORTAL_THICKNESS
    }
}

impl SceneObject for Portal {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

/// Owns every portal in a scene. Targets are stored as ids into this arena.
#[derive(Clone, Debug, Default)]
pub struct PortalRegistry {
    portals: Vec<Portal>,
}

impl PortalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, portal: Portal) -> PortalId {
        let id = PortalId(self.portals.len());
        self.portals.push(portal);
        id
    }

    pub fn get(&self, id: PortalId) -> Option<&Portal> {
        self.portals.get(id.0)
    }

    pub fn get_mut(&mut self, id: PortalId) -> Option<&mut Portal> {
        self.portals.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.portals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portals.is_empty()
    }

    /// Portals in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (PortalId, &Portal)> {
        self.portals.iter().enumerate().map(|(i, p)| (PortalId(i), p))
    }

    pub fn find_by_name(&self, name: &str) -> Option<PortalId> {
        self.portals.iter().position(|p| p.name == name).map(PortalId)
    }

    pub fn target_of(&self, id: PortalId) -> Option<PortalId> {
        self.get(id).and_then(Portal::target)
    }

    /// Links `a` and `b` to each other. Linking the same pair twice is a no-op;
    /// re-pairing either portal with a third one is an error.
    pub fn connect(&mut self, a: PortalId, b: PortalId) -> Result<(), SceneError> {
        if a == b {
            return Err(SceneError::SelfConnection { portal: a });
        }
        let a_target = self.get(a).ok_or(SceneError::UnknownPortal(a))?.target;
        let b_target = self.get(b).ok_or(SceneError::UnknownPortal(b))?.target;

        match (a_target, b_target) {
            (Some(t), Some(s)) if t == b && s == a => return Ok(()),
            (Some(t), _) => return Err(SceneError::AlreadyConnected { portal: a, target: t }),
            (_, Some(s)) => return Err(SceneError::AlreadyConnected { portal: b, target: s }),
            (None, None) => {}
        }

        self.portals[a.0].target = Some(b);
        self.portals[b.0].target = Some(a);
        log::debug!("Connected portal '{}' <-> '{}'", self.portals[a.0].name, self.portals[b.0].name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portal(name: &str, width: f32, depth: f32) -> Portal {
        Portal::new(name, Transform::new(Vec3::ZERO, Vec3::ZERO, Vec3::new(width, 1.0, depth))).unwrap()
    }

    #[test]
    fn size_uses_x_and_z_scale() {
        let p = Portal::new("p", Transform::new(Vec3::ZERO, Vec3::ZERO, Vec3::new(2.0, 7.0, 3.0))).unwrap();
        assert_eq!(p.size(), Vec3::new(2.0, 0.0, 3.0));
    }

    #[test]
    fn bounds_are_inclusive_on_the_aperture() {
        let p = portal("p", 2.0, 3.0);
        assert!(p.is_point_in_bounds(Vec3::new(0.0, 0.0, 0.0)));
        assert!(p.is_point_in_bounds(Vec3::new(2.0, 0.0, 3.0)));
        assert!(p.is_point_in_bounds(Vec3::new(1.0, -0.05, 1.5)));
        assert!(!p.is_point_in_bounds(Vec3::new(-0.001, 0.0, 1.0)));
        assert!(!p.is_point_in_bounds(Vec3::new(1.0, 0.0, 3.001)));
    }

    #[test]
    fn slab_edge_is_outside() {
        let p = portal("p", 2.0, 2.0);
        assert!(!p.is_point_in_bounds(Vec3::new(1.0, PORTAL_THICKNESS, 1.0)));
        assert!(!p.is_point_in_bounds(Vec3::new(1.0, -PORTAL_THICKNESS, 1.0)));
        assert!(p.is_point_in_bounds(Vec3::new(1.0, 0.099, 1.0)));
    }

    #[test]
    fn registry_finds_portals_by_name() {
        let mut registry = PortalRegistry::new();
        registry.insert(portal("a", 1.0, 1.0));
        let b = registry.insert(portal("b", 1.0, 1.0));

        assert_eq!(registry.find_by_name("b"), Some(b));
        assert_eq!(registry.get(b).map(Portal::name), Some("b"));
        assert_eq!(registry.find_by_name("missing"), None);
    }

    #[test]
    fn zero_area_portal_is_rejected() {
        let err = Portal::new("flat", Transform::new(Vec3::ZERO, Vec3::ZERO, Vec3::new(2.0, 1.0, 0.0))).unwrap_err();
        assert!(matches!(err, SceneError::DegeneratePortal { .. }));
    }

    #[test]
    fn connect_is_mutual_and_idempotent() {
        let mut registry = PortalRegistry::new();
        let a = registry.insert(portal("a", 1.0, 1.0));
        let b = registry.insert(portal("b", 1.0, 1.0));

        registry.connect(a, b).unwrap();
        registry.connect(b, a).unwrap();

        assert_eq!(registry.target_of(a), Some(b));
        assert_eq!(registry.target_of(b), Some(a));
    }

    #[test]
    fn connect_rejects_self_and_repairing() {
        let mut registry = PortalRegistry::new();
        let a = registry.insert(portal("a", 1.0, 1.0));
        let b = registry.insert(portal("b", 1.0, 1.0));
        let c = registry.insert(portal("c", 1.0, 1.0));

        assert_eq!(registry.connect(a, a), Err(SceneError::SelfConnection { portal: a }));

        registry.connect(a, b).unwrap();
        assert_eq!(registry.connect(c, b), Err(SceneError::AlreadyConnected { portal: b, target: a }));
        assert_eq!(registry.target_of(c), None);
        assert_eq!(registry.connect(a, PortalId(9)), Err(SceneError::UnknownPortal(PortalId(9))));
    }
}
