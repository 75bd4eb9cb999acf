//! Display-space placement of dataset records.
//!
//! The random part (angles, shade) is drawn once per entity by a [`SeedSource`]
//! and stored on the [`PlacedEntity`]. Everything downstream of the seed is a pure
//! function, so a fixed seed source gives a fully reproducible layout.

use crate::bounds::{Bounds, Range};
use crate::model::EntityRecord;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

/// Linear map of `value` from `[min, max]` onto `[new_min, new_max]`.
/// A degenerate source range maps everything to `new_min`.
pub fn normalize(value: f64, min: f64, max: f64, new_min: f64, new_max: f64) -> f64 {
    if max == min {
        return new_min;
    }
    ((value - min) / (max - min)) * (new_max - new_min) + new_min
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn len(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Random draw owned by one entity for its lifetime.
/// `theta` in [0, 2π), `phi` in [0, π), `shade` is a grey level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Seed {
    pub theta: f64,
    pub phi: f64,
    pub shade: u8,
}

pub trait SeedSource {
    fn next_seed(&mut self) -> Seed;
}

pub struct RandomSeeds {
    rng: StdRng,
}

impl RandomSeeds {
    /// `0` seeds from entropy; anything else is reproducible.
    pub fn new(seed: u64) -> Self {
        let rng = if seed == 0 {
            StdRng::from_entropy()
        } else {
            StdRng::seed_from_u64(seed)
        };
        Self { rng }
    }
}

impl SeedSource for RandomSeeds {
    fn next_seed(&mut self) -> Seed {
        Seed {
            theta: self.rng.gen_range(0.0..TAU),
            phi: self.rng.gen_range(0.0..PI),
            shade: self.rng.gen_range(100..=254),
        }
    }
}

/// Hands out a fixed list of seeds in order, cycling when exhausted.
pub struct FixedSeeds {
    seeds: Vec<Seed>,
    next: usize,
}

impl FixedSeeds {
    pub fn new(seeds: Vec<Seed>) -> Self {
        Self { seeds, next: 0 }
    }
}

impl SeedSource for FixedSeeds {
    fn next_seed(&mut self) -> Seed {
        if self.seeds.is_empty() {
            return Seed {
                theta: 0.0,
                phi: 0.0,
                shade: 200,
            };
        }
        let s = self.seeds[self.next % self.seeds.len()];
        self.next += 1;
        s
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Points on spheres around the origin (two angles).
    Spherical,
    /// Points on circles in the z=0 plane around `flat_center` (one angle).
    Flat,
}

impl FromStr for LayoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spherical" | "3d" => Ok(LayoutMode::Spherical),
            "flat" | "2d" => Ok(LayoutMode::Flat),
            other => Err(format!("unknown layout '{}' (expected spherical or flat)", other)),
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMode::Spherical => write!(f, "spherical"),
            LayoutMode::Flat => write!(f, "flat"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub mode: LayoutMode,
    pub size_range: Range,
    pub distance_range: Range,
    pub flat_center: [f64; 2],
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Spherical,
            size_range: Range { min: 0.2, max: 2.0 },
            distance_range: Range {
                min: 50.0,
                max: 200.0,
            },
            flat_center: [0.0, 0.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlacedEntity {
    #[serde(flatten)]
    pub record: EntityRecord,
    pub size: f64,
    pub distance: f64,
    pub seed: Seed,
    pub position: Vec3,
}

pub fn spherical_position(d: f64, theta: f64, phi: f64) -> Vec3 {
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    Vec3::new(d * sin_p * cos_t, d * sin_p * sin_t, d * cos_p)
}

pub fn flat_position(center: [f64; 2], d: f64, theta: f64) -> Vec3 {
    let (sin_t, cos_t) = theta.sin_cos();
    Vec3::new(center[0] + d * cos_t, center[1] + d * sin_t, 0.0)
}

fn scaled(v: Option<f64>, src: Range, dst: Range) -> f64 {
    match v.filter(|v| v.is_finite()) {
        Some(v) => normalize(v, src.min, src.max, dst.min, dst.max),
        None => dst.min,
    }
}

/// Pure placement of one record given an already drawn seed.
/// Missing radius or distance lands at the low end of its target range.
pub fn place_with_seed(
    record: &EntityRecord,
    bounds: &Bounds,
    seed: Seed,
    cfg: &LayoutConfig,
) -> PlacedEntity {
    let size = scaled(record.radius_earths, bounds.radius, cfg.size_range);
    let distance = scaled(record.distance_ly, bounds.distance, cfg.distance_range);
    let position = match cfg.mode {
        LayoutMode::Spherical => spherical_position(distance, seed.theta, seed.phi),
        LayoutMode::Flat => flat_position(cfg.flat_center, distance, seed.theta),
    };
    PlacedEntity {
        record: record.clone(),
        size,
        distance,
        seed,
        position,
    }
}

pub struct LayoutEngine<S: SeedSource> {
    cfg: LayoutConfig,
    seeds: S,
}

impl<S: SeedSource> LayoutEngine<S> {
    pub fn new(cfg: LayoutConfig, seeds: S) -> Self {
        Self { cfg, seeds }
    }

    pub fn place(&mut self, record: &EntityRecord, bounds: &Bounds) -> PlacedEntity {
        let seed = self.seeds.next_seed();
        place_with_seed(record, bounds, seed, &self.cfg)
    }

    pub fn place_all(&mut self, records: &[EntityRecord], bounds: &Bounds) -> Vec<PlacedEntity> {
        records.iter().map(|r| self.place(r, bounds)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn normalize_endpoints() {
        assert!(approx(normalize(1.0, 1.0, 5.0, 0.2, 2.0), 0.2));
        assert!(approx(normalize(5.0, 1.0, 5.0, 0.2, 2.0), 2.0));
        assert!(approx(normalize(3.0, 1.0, 5.0, 50.0, 200.0), 125.0));
    }

    #[test]
    fn normalize_degenerate_range_is_new_min() {
        for v in [-10.0, 0.0, 3.0, 1e9] {
            let r = normalize(v, 3.0, 3.0, 0.2, 2.0);
            assert_eq!(r, 0.2);
            assert!(r.is_finite());
        }
    }

    #[test]
    fn spherical_mapping() {
        let p = spherical_position(10.0, 0.0, PI / 2.0);
        assert!(approx(p.x, 10.0) && approx(p.y, 0.0) && approx(p.z, 0.0));

        let p = spherical_position(10.0, PI / 2.0, PI / 2.0);
        assert!(approx(p.x, 0.0) && approx(p.y, 10.0));

        let p = spherical_position(10.0, 1.3, 0.0);
        assert!(approx(p.z, 10.0));

        let p = spherical_position(7.0, 2.1, 0.9);
        assert!(approx(p.len(), 7.0));
    }

    #[test]
    fn flat_mapping_uses_center() {
        let p = flat_position([5.0, -2.0], 3.0, PI);
        assert!(approx(p.x, 2.0) && approx(p.y, -2.0) && p.z == 0.0);
    }

    #[test]
    fn place_normalizes_size_and_distance() {
        let bounds = Bounds {
            radius: Range { min: 1.0, max: 5.0 },
            distance: Range { min: 10.0, max: 20.0 },
            ..Bounds::default()
        };
        let rec = EntityRecord {
            radius_earths: Some(5.0),
            distance_ly: Some(10.0),
            ..Default::default()
        };
        let seed = Seed {
            theta: 0.0,
            phi: PI / 2.0,
            shade: 150,
        };
        let placed = place_with_seed(&rec, &bounds, seed, &LayoutConfig::default());
        assert!(approx(placed.size, 2.0));
        assert!(approx(placed.distance, 50.0));
        assert!(approx(placed.position.x, 50.0));
        assert_eq!(placed.seed, seed);
    }

    #[test]
    fn missing_attributes_use_target_minimum() {
        let placed = place_with_seed(
            &EntityRecord::default(),
            &Bounds::default(),
            Seed {
                theta: 1.0,
                phi: 1.0,
                shade: 100,
            },
            &LayoutConfig::default(),
        );
        assert_eq!(placed.size, 0.2);
        assert_eq!(placed.distance, 50.0);
        assert!(placed.position.x.is_finite());
    }

    #[test]
    fn random_seeds_stay_in_range_and_repeat_for_same_seed() {
        let mut a = RandomSeeds::new(42);
        let mut b = RandomSeeds::new(42);
        for _ in 0..200 {
            let s = a.next_seed();
            assert!((0.0..TAU).contains(&s.theta));
            assert!((0.0..PI).contains(&s.phi));
            assert!((100..=254).contains(&s.shade));
            assert_eq!(s, b.next_seed());
        }
    }

    #[test]
    fn engine_draws_one_seed_per_entity() {
        let seeds = vec![
            Seed {
                theta: 0.5,
                phi: 1.0,
                shade: 120,
            },
            Seed {
                theta: 2.5,
                phi: 2.0,
                shade: 220,
            },
        ];
        let mut engine = LayoutEngine::new(LayoutConfig::default(), FixedSeeds::new(seeds.clone()));
        let recs = vec![EntityRecord::default(), EntityRecord::default()];
        let placed = engine.place_all(&recs, &Bounds::default());
        assert_eq!(placed[0].seed, seeds[0]);
        assert_eq!(placed[1].seed, seeds[1]);
    }

    #[test]
    fn layout_mode_parses() {
        assert_eq!("flat".parse::<LayoutMode>(), Ok(LayoutMode::Flat));
        assert_eq!("Spherical".parse::<LayoutMode>(), Ok(LayoutMode::Spherical));
        assert!("cube".parse::<LayoutMode>().is_err());
    }
}
