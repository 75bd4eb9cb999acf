use crate::model::EntityRecord;
use serde::Serialize;

pub const DEFAULT_RADIUS_RANGE: Range = Range { min: 1.0, max: 10.0 };
pub const DEFAULT_DISTANCE_RANGE: Range = Range { min: 1.0, max: 100.0 };
pub const DEFAULT_TEMPERATURE_RANGE: Range = Range {
    min: 2500.0,
    max: 10000.0,
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }
}

/// Per-attribute extrema of one dataset load.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bounds {
    pub radius: Range,
    pub distance: Range,
    pub temperature: Range,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS_RANGE,
            distance: DEFAULT_DISTANCE_RANGE,
            temperature: DEFAULT_TEMPERATURE_RANGE,
        }
    }
}

impl Bounds {
    /// One pass over the records. Absent and non-finite values are ignored,
    /// as are temperatures that are not positive. An attribute with no usable
    /// value keeps its default range.
    pub fn compute(records: &[EntityRecord]) -> Self {
        let mut radius = Extrema::default();
        let mut distance = Extrema::default();
        let mut temperature = Extrema::default();

        for r in records {
            radius.push(r.radius_earths);
            distance.push(r.distance_ly);
            temperature.push(r.star_temp_k.filter(|t| *t > 0.0));
        }

        Self {
            radius: radius.finish(DEFAULT_RADIUS_RANGE),
            distance: distance.finish(DEFAULT_DISTANCE_RANGE),
            temperature: temperature.finish(DEFAULT_TEMPERATURE_RANGE),
        }
    }
}

#[derive(Default)]
struct Extrema(Option<Range>);

impl Extrema {
    fn push(&mut self, v: Option<f64>) {
        let Some(v) = v.filter(|v| v.is_finite()) else {
            return;
        };
        self.0 = Some(match self.0 {
            Some(r) => Range {
                min: r.min.min(v),
                max: r.max.max(v),
            },
            None => Range { min: v, max: v },
        });
    }

    fn finish(self, fallback: Range) -> Range {
        self.0.unwrap_or(fallback)
    }
}
