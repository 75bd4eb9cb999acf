//! Inputs for the two comparison charts shown next to the detail panel.

use crate::layout::normalize;
use crate::model::{EntityId, EntityRecord, EARTH_RADIUS, SUN_RADIUS_EARTHS, SUN_TEMPERATURE_K};
use crate::scene::StarMap;
use serde::Serialize;

/// Size-chart circles map radius [0, 110] Earth radii onto [5, 60] display units.
pub const SIZE_SCALE_DOMAIN: (f64, f64) = (0.0, 110.0);
pub const SIZE_SCALE_RANGE: (f64, f64) = (5.0, 60.0);

pub const EARTH_COLOR: u32 = 0x1a75ff;
pub const PLANET_COLOR: u32 = 0xcccccc;
pub const SUN_COLOR: u32 = 0xff8c42;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TempBar {
    pub name: String,
    pub value: f64,
    pub label: String,
}

impl TempBar {
    fn new(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
            label: format!("{} ({}K)", name, value.round()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemperatureComparison {
    pub reference: TempBar,
    pub selected: TempBar,
    pub coldest: TempBar,
    pub hottest: TempBar,
    /// Top of the value axis.
    pub ceiling: f64,
    /// Cold/hot ends of the bar color gradient.
    pub color_domain: (f64, f64),
}

impl TemperatureComparison {
    pub fn bars(&self) -> [&TempBar; 4] {
        [&self.reference, &self.selected, &self.coldest, &self.hottest]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SizeEntry {
    pub name: String,
    pub value: f64,
    pub color: u32,
}

impl SizeEntry {
    /// Circle radius in chart units.
    pub fn display_radius(&self) -> f64 {
        normalize(
            self.value,
            SIZE_SCALE_DOMAIN.0,
            SIZE_SCALE_DOMAIN.1,
            SIZE_SCALE_RANGE.0,
            SIZE_SCALE_RANGE.1,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SizeComparison {
    pub earth: SizeEntry,
    pub selected: SizeEntry,
    pub sun: SizeEntry,
}

impl SizeComparison {
    pub fn entries(&self) -> [&SizeEntry; 3] {
        [&self.earth, &self.selected, &self.sun]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Comparison {
    pub temperature: Option<TemperatureComparison>,
    pub size: SizeComparison,
}

fn usable(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite() && *v > 0.0)
}

/// Both chart inputs for the current selection. `None` on an empty dataset,
/// which has no extrema to compare against.
pub fn derive(map: &StarMap, selected: Option<EntityId>) -> Option<Comparison> {
    if map.is_empty() {
        return None;
    }
    let record = selected.and_then(|id| map.record(id));
    Some(Comparison {
        temperature: temperature_comparison(map.records(), record),
        size: size_comparison(record),
    })
}

/// Reference star, selection, and the coldest/hottest host stars of the dataset.
///
/// Selection without a usable temperature falls back to 80% of the reference.
/// On ties the earlier record wins. Records without a finite positive temperature
/// are skipped; `None` when none is left.
pub fn temperature_comparison<'a, I>(records: I, selected: Option<&EntityRecord>) -> Option<TemperatureComparison>
where
    I: IntoIterator<Item = &'a EntityRecord>,
{
    let mut coldest: Option<(&EntityRecord, f64)> = None;
    let mut hottest: Option<(&EntityRecord, f64)> = None;

    for rec in records {
        let Some(t) = usable(rec.star_temp_k) else {
            continue;
        };
        if coldest.map_or(true, |(_, c)| t < c) {
            coldest = Some((rec, t));
        }
        if hottest.map_or(true, |(_, h)| t > h) {
            hottest = Some((rec, t));
        }
    }

    let (cold_rec, cold_t) = coldest?;
    let (hot_rec, hot_t) = hottest?;

    let reference = TempBar::new("Sun", SUN_TEMPERATURE_K);
    let selected = TempBar::new(
        selected.map_or("No selection", |r| r.display_name()),
        usable(selected.and_then(|r| r.star_temp_k)).unwrap_or(SUN_TEMPERATURE_K * 0.8),
    );
    let coldest = TempBar::new(cold_rec.host_name(), cold_t);
    let hottest = TempBar::new(hot_rec.host_name(), hot_t);

    let top = [reference.value, selected.value, coldest.value, hottest.value]
        .into_iter()
        .fold(f64::MIN, f64::max);

    Some(TemperatureComparison {
        ceiling: top * 1.1,
        color_domain: (cold_t * 0.9, hot_t * 1.1),
        reference,
        selected,
        coldest,
        hottest,
    })
}

/// Earth, the selection (2 Earth radii when unknown), and the Sun.
pub fn size_comparison(selected: Option<&EntityRecord>) -> SizeComparison {
    SizeComparison {
        earth: SizeEntry {
            name: "Earth".to_string(),
            value: EARTH_RADIUS,
            color: EARTH_COLOR,
        },
        selected: SizeEntry {
            name: selected.map_or("Planet", |r| r.display_name()).to_string(),
            value: usable(selected.and_then(|r| r.radius_earths)).unwrap_or(EARTH_RADIUS * 2.0),
            color: PLANET_COLOR,
        },
        sun: SizeEntry {
            name: "Sun".to_string(),
            value: SUN_RADIUS_EARTHS,
            color: SUN_COLOR,
        },
    }
}
