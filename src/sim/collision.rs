//! Contact detection and resolution
//!
//! Detection is axis-aligned box overlap filtered by category/contact masks.
//! Resolution is a pure table from the pair of categories to the effects the
//! contact has, so it can be checked without any entities around.

use std::ops::BitOr;

use glam::Vec2;

/// Collision category bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Category(u32);

impl Category {
    pub const NONE: Category = Category(0);
    pub const PLAYER: Category = Category(1 << 0);
    pub const ALIEN: Category = Category(1 << 1);
    pub const ASTEROID: Category = Category(1 << 2);
    pub const BANANA: Category = Category(1 << 3);

    pub const fn intersects(self, other: Category) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn union(self, other: Category) -> Category {
        Category(self.0 | other.0)
    }
}

impl BitOr for Category {
    type Output = Category;

    fn bitor(self, rhs: Category) -> Category {
        self.union(rhs)
    }
}

/// Physics body filter: what a body is, and what it reports contacts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Body {
    pub category: Category,
    pub contact_mask: Category,
}

impl Body {
    /// Either side asking for contacts with the other is enough
    pub fn reports_contact_with(&self, other: &Body) -> bool {
        self.contact_mask.intersects(other.category) || other.contact_mask.intersects(self.category)
    }
}

/// Axis-aligned rectangle given by center and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        d.x <= self.half.x && d.y <= self.half.y
    }
}

/// Effects produced by a single contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EffectSet {
    /// Player loses one life
    pub lose_life: bool,
    /// Pickup leaves the world; score, life and collection effects follow
    pub collect_pickup: bool,
}

impl EffectSet {
    pub const NONE: EffectSet = EffectSet {
        lose_life: false,
        collect_pickup: false,
    };
    pub const LOSE_LIFE: EffectSet = EffectSet {
        lose_life: true,
        collect_pickup: false,
    };
    pub const COLLECT: EffectSet = EffectSet {
        lose_life: false,
        collect_pickup: true,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// Map a contact between two categories to its effects (order-independent)
pub fn resolve(a: Category, b: Category) -> EffectSet {
    let pair = a | b;
    if pair == Category::PLAYER | Category::ALIEN || pair == Category::PLAYER | Category::ASTEROID
    {
        EffectSet::LOSE_LIFE
    } else if pair == Category::PLAYER | Category::BANANA {
        EffectSet::COLLECT
    } else {
        EffectSet::NONE
    }
}
