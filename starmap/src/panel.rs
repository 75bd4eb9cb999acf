use crate::model::EntityRecord;

/// Text for the detail panel: a title and `(label, value)` rows.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelText {
    pub title: String,
    pub rows: Vec<(&'static str, String)>,
}

fn num(v: Option<f64>, unit: &str) -> String {
    match v.filter(|v| v.is_finite()) {
        Some(v) => format!("{} {}", v, unit),
        None => "N/A".to_string(),
    }
}

/// Same mapping for the central body and dataset entries.
pub fn details(rec: &EntityRecord) -> PanelText {
    PanelText {
        title: rec.display_name().to_string(),
        rows: vec![
            ("Host Star", rec.host_star.clone().unwrap_or_else(|| "N/A".to_string())),
            (
                "Star Spectral Type",
                rec.spectral_type.clone().unwrap_or_else(|| "N/A".to_string()),
            ),
            ("Orbital Period", num(rec.orbital_period_days, "days")),
            ("Planet Radius", num(rec.radius_earths, "Earth radii")),
            ("Planet Mass", num(rec.mass_earths, "Earth masses")),
            ("Distance to Star", num(rec.distance_ly, "light-years")),
            ("Equilibrium Temperature", num(rec.equilibrium_temp_k, "K")),
            ("Star Effective Temperature", num(rec.star_temp_k, "K")),
            ("Star Mass", num(rec.star_mass_suns, "Solar masses")),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row<'a>(p: &'a PanelText, label: &str) -> &'a str {
        p.rows
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn central_body_panel() {
        let p = details(&EntityRecord::central_body());
        assert_eq!(p.title, "Solar System");
        assert_eq!(row(&p, "Host Star"), "Sun");
        assert_eq!(row(&p, "Star Spectral Type"), "G2 V");
        assert_eq!(row(&p, "Orbital Period"), "365.25 days");
        assert_eq!(row(&p, "Planet Radius"), "109 Earth radii");
        assert_eq!(row(&p, "Star Mass"), "1 Solar masses");
        assert_eq!(p.rows.len(), 9);
    }

    #[test]
    fn absent_values_show_na() {
        let rec = EntityRecord {
            name: Some("TOI-700 d".to_string()),
            radius_earths: Some(1.19),
            ..Default::default()
        };
        let p = details(&rec);
        assert_eq!(p.title, "TOI-700 d");
        assert_eq!(row(&p, "Star Spectral Type"), "N/A");
        assert_eq!(row(&p, "Planet Mass"), "N/A");
        assert_eq!(row(&p, "Planet Radius"), "1.19 Earth radii");
    }
}
