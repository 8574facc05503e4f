//! Materials and contact rules
//!
//! A material is just a tag. What happens when two tagged shapes touch is
//! decided by a `ContactMaterial` keyed on the unordered pair of tags; pairs
//! without a rule never collide.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Opaque collision-response class attached to a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(pub u32);

/// Response rule for one pair of materials
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactMaterial {
    pub a: MaterialId,
    pub b: MaterialId,
    /// Normal velocity retained after a bounce (1.0 = perfectly elastic)
    pub restitution: f32,
    /// Contact rigidity; `f32::MAX` models a hard, non-penetrating contact
    pub stiffness: f32,
}

impl ContactMaterial {
    pub fn new(a: MaterialId, b: MaterialId, restitution: f32, stiffness: f32) -> Self {
        Self {
            a,
            b,
            restitution,
            stiffness,
        }
    }

    /// Lossless rigid contact
    pub fn elastic(a: MaterialId, b: MaterialId) -> Self {
        Self::new(a, b, 1.0, f32::MAX)
    }

    /// Fraction of the penetration depth removed in one sub-step of length `h`.
    ///
    /// Treats the contact as an implicitly integrated spring of stiffness `k`
    /// per unit mass: `k·h² / (1 + k·h²)`. Saturates to 1.0 for huge `k`.
    pub fn correction_fraction(&self, h: f32) -> f32 {
        let kh2 = self.stiffness * h * h;
        if !kh2.is_finite() {
            return 1.0;
        }
        (kh2 / (1.0 + kh2)).clamp(0.0, 1.0)
    }
}

/// Order-independent key for a material pair
#[inline]
fn pair_key(a: MaterialId, b: MaterialId) -> (MaterialId, MaterialId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// All contact rules registered with a world
#[derive(Debug, Clone, Default)]
pub struct ContactMaterialTable {
    rules: HashMap<(MaterialId, MaterialId), ContactMaterial>,
}

impl ContactMaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule, replacing any previous rule for the same pair
    pub fn insert(&mut self, rule: ContactMaterial) -> Option<ContactMaterial> {
        self.rules.insert(pair_key(rule.a, rule.b), rule)
    }

    /// Look up the rule for a pair in either order
    pub fn get(&self, a: MaterialId, b: MaterialId) -> Option<&ContactMaterial> {
        self.rules.get(&pair_key(a, b))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_unordered() {
        let mut table = ContactMaterialTable::new();
        table.insert(ContactMaterial::elastic(MaterialId(3), MaterialId(1)));

        assert!(table.get(MaterialId(1), MaterialId(3)).is_some());
        assert!(table.get(MaterialId(3), MaterialId(1)).is_some());
        assert!(table.get(MaterialId(1), MaterialId(2)).is_none());
    }

    #[test]
    fn test_insert_replaces_pair() {
        let mut table = ContactMaterialTable::new();
        table.insert(ContactMaterial::new(MaterialId(1), MaterialId(2), 0.5, 100.0));
        let old = table.insert(ContactMaterial::elastic(MaterialId(2), MaterialId(1)));

        assert_eq!(old.map(|r| r.restitution), Some(0.5));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(MaterialId(1), MaterialId(2)).map(|r| r.restitution), Some(1.0));
    }

    #[test]
    fn test_correction_fraction() {
        let h = 1.0 / 60.0;
        let rigid = ContactMaterial::elastic(MaterialId(0), MaterialId(1));
        assert!((rigid.correction_fraction(h) - 1.0).abs() < 1e-6);

        let soft = ContactMaterial::new(MaterialId(0), MaterialId(1), 1.0, 3600.0);
        // k·h² = 1 -> half the penetration per step
        assert!((soft.correction_fraction(h) - 0.5).abs() < 1e-4);
    }
}
