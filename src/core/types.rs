// rotation geometry, lookup keys and stance enums shared by builder and resolver
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::CatalogError;

/// Board spin, board flip and body spin in signed degrees, as read from a
/// row or a query.
///
/// Sign encodes direction. Spin and body are multiples of 180 and flip a
/// multiple of 360 by convention, but nothing here enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub spin: i32,
    pub flip: i32,
    pub body: i32,
}

impl Rotation {
    pub const fn new(spin: i32, flip: i32, body: i32) -> Self {
        Self { spin, flip, body }
    }

    pub fn key(&self) -> TrickKey {
        self.widen().key()
    }

    pub fn widen(self) -> CatalogRotation {
        CatalogRotation {
            spin: i64::from(self.spin),
            flip: i64::from(self.flip),
            body: i64::from(self.body),
        }
    }

    //spin/body in half turns, flip in full turns
    pub fn convention_violations(&self) -> Vec<ConventionViolation> {
        let mut out = Vec::new();
        if self.spin % 180 != 0 {
            out.push(ConventionViolation { axis: Axis::Spin, value: self.spin, multiple_of: 180 });
        }
        if self.flip % 360 != 0 {
            out.push(ConventionViolation { axis: Axis::Flip, value: self.flip, multiple_of: 360 });
        }
        if self.body % 180 != 0 {
            out.push(ConventionViolation { axis: Axis::Body, value: self.body, multiple_of: 180 });
        }
        out
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spin {}°, flip {}°, body {}°", self.spin, self.flip, self.body)
    }
}

// catalog-space geometry; i64 so mirroring any i32 input stays in range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CatalogRotation {
    pub spin: i64,
    pub flip: i64,
    pub body: i64,
}

impl CatalogRotation {
    pub const fn new(spin: i64, flip: i64, body: i64) -> Self {
        Self { spin, flip, body }
    }

    pub fn key(&self) -> TrickKey {
        TrickKey(format!("S{},F{},B{}", self.spin, self.flip, self.body))
    }

    //factor is always +1 or -1
    pub fn scaled(self, factor: i64) -> Self {
        Self {
            spin: factor * self.spin,
            flip: factor * self.flip,
            body: factor * self.body,
        }
    }
}

impl From<Rotation> for CatalogRotation {
    fn from(r: Rotation) -> Self {
        r.widen()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Spin,
    Flip,
    Body,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Axis::Spin => "board spin",
            Axis::Flip => "board flip",
            Axis::Body => "body spin",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConventionViolation {
    pub axis: Axis,
    pub value: i32,
    pub multiple_of: i32,
}

impl fmt::Display for ConventionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}° is not a multiple of {}°", self.axis, self.value, self.multiple_of)
    }
}

/// Catalog primary index: `S{spin},F{flip},B{body}`.
///
/// Only rotation geometry goes into the key. The stance a trick was
/// catalogued from is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrickKey(String);

impl TrickKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    //reverses CatalogRotation::key, None for anything it did not produce
    pub fn parse(raw: &str) -> Option<CatalogRotation> {
        let mut parts = raw.split(',');
        let spin = parts.next()?.strip_prefix('S')?.parse().ok()?;
        let flip = parts.next()?.strip_prefix('F')?.parse().ok()?;
        let body = parts.next()?.strip_prefix('B')?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(CatalogRotation { spin, flip, body })
    }

    pub fn rotation(&self) -> Option<CatalogRotation> {
        Self::parse(&self.0)
    }
}

impl From<Rotation> for TrickKey {
    fn from(r: Rotation) -> Self {
        r.key()
    }
}

impl From<CatalogRotation> for TrickKey {
    fn from(r: CatalogRotation) -> Self {
        r.key()
    }
}

impl fmt::Display for TrickKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NaturalStance {
    Regular,
    #[default]
    Goofy,
}

impl NaturalStance {
    pub fn label(&self) -> &'static str {
        match self {
            NaturalStance::Regular => "Regular",
            NaturalStance::Goofy => "Goofy",
        }
    }
}

impl fmt::Display for NaturalStance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NaturalStance {
    type Err = CatalogError;

    //empty input means goofy, same as the console prompt "(G/r)"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" | "r" => Ok(NaturalStance::Regular),
            "goofy" | "g" | "" => Ok(NaturalStance::Goofy),
            _ => Err(CatalogError::InvalidStance(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActiveStance {
    #[default]
    Normal,
    Fakie,
    Nollie,
    Switch,
}

impl ActiveStance {
    pub fn label(&self) -> &'static str {
        match self {
            ActiveStance::Normal => "Normal",
            ActiveStance::Fakie => "Fakie",
            ActiveStance::Nollie => "Nollie",
            ActiveStance::Switch => "Switch",
        }
    }

    //display-name prefix, none for normal
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            ActiveStance::Normal => None,
            other => Some(other.label()),
        }
    }
}

impl fmt::Display for ActiveStance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActiveStance {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "" => Ok(ActiveStance::Normal),
            "fakie" | "f" => Ok(ActiveStance::Fakie),
            "nollie" | "n" => Ok(ActiveStance::Nollie),
            "switch" | "s" => Ok(ActiveStance::Switch),
            _ => Err(CatalogError::InvalidStance(s.to_string())),
        }
    }
}
