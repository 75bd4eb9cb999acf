use starmap::compare;
use starmap::layout::{FixedSeeds, LayoutConfig, LayoutEngine, LayoutMode, RandomSeeds, Seed};
use starmap::loader::{self, Source};
use starmap::model::EntityId;
use starmap::panel;
use starmap::scene::StarMap;
use starmap::view::{Interaction, ViewParams, Viewer};
use std::path::PathBuf;

const DATA: &str = r#"{"pl_name":"Cold b","host_star":"Cold","pl_radius":1,"to_star_distance":10,"star_effective_temperature":3000}

{"pl_name":"Hot b","host_star":"Hot","pl_radius":5,"to_star_distance":30,"star_effective_temperature":8000}
not json at all
{"pl_name":"Odd b","host_star":"Odd","pl_radius":"NaN","to_star_distance":20}
"#;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join("info.json")
}

#[test]
fn text_to_comparison() {
    let report = loader::parse_ndjson(DATA);
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, 4);

    let seeds = FixedSeeds::new(vec![Seed {
        theta: 0.0,
        phi: std::f64::consts::FRAC_PI_2,
        shade: 180,
    }]);
    let mut engine = LayoutEngine::new(LayoutConfig::default(), seeds);
    let map = StarMap::build(&report.records, &mut engine, 5.0);

    assert_eq!(map.bounds().radius.min, 1.0);
    assert_eq!(map.bounds().radius.max, 5.0);
    assert_eq!(map.bounds().distance.max, 30.0);

    let cold = &map.entities()[0];
    let hot = &map.entities()[1];
    assert!((cold.size - 0.2).abs() < 1e-9);
    assert!((hot.size - 2.0).abs() < 1e-9);
    assert!((cold.distance - 50.0).abs() < 1e-9);
    assert!((hot.position.x - 200.0).abs() < 1e-9);

    let mut viewer = Viewer::new(ViewParams::default(), 120, 40);
    assert!(compare::derive(&map, viewer.selection().current())
        .unwrap()
        .temperature
        .unwrap()
        .selected
        .label
        .starts_with("No selection"));

    viewer.handle(&map, Interaction::SelectNext);
    viewer.handle(&map, Interaction::SelectNext);
    assert_eq!(viewer.selection().current(), Some(EntityId::Placed(0)));

    let cmp = compare::derive(&map, viewer.selection().current()).unwrap();
    let temp = cmp.temperature.unwrap();
    assert_eq!(temp.coldest.name, "Cold");
    assert_eq!(temp.hottest.name, "Hot");
    assert_eq!(temp.selected.value, 3000.0);
    assert_eq!(cmp.size.selected.value, 1.0);

    let text = panel::details(map.record(EntityId::Placed(2)).unwrap());
    assert_eq!(text.title, "Odd b");

    viewer.handle(&map, Interaction::Dismiss);
    assert_eq!(viewer.selection().current(), None);
}

#[test]
fn sample_dataset_loads_and_places() {
    let report = loader::load(&Source::Path(sample_path()));
    assert_eq!(report.records.len(), 10);
    assert!(report.skipped.is_empty());

    let cfg = LayoutConfig {
        mode: LayoutMode::Flat,
        ..LayoutConfig::default()
    };
    let mut engine = LayoutEngine::new(cfg, RandomSeeds::new(7));
    let map = StarMap::build(&report.records, &mut engine, 5.0);
    for e in map.entities() {
        assert_eq!(e.position.z, 0.0);
        assert!(e.distance >= 50.0 - 1e-9 && e.distance <= 200.0 + 1e-9);
        assert!(e.size >= 0.2 - 1e-9 && e.size <= 2.0 + 1e-9);
    }

    let temp = compare::derive(&map, None).unwrap().temperature.unwrap();
    assert_eq!(temp.coldest.name, "TRAPPIST-1");
    assert_eq!(temp.hottest.name, "KELT-9");
}

#[test]
fn empty_dataset_still_usable() {
    let report = loader::load(&Source::Path(PathBuf::from("/missing/info.json")));
    let mut engine = LayoutEngine::new(LayoutConfig::default(), RandomSeeds::new(1));
    let map = StarMap::build(&report.records, &mut engine, 5.0);
    assert!(map.is_empty());
    assert!(compare::derive(&map, Some(EntityId::Central)).is_none());

    let mut viewer = Viewer::new(ViewParams::default(), 80, 24);
    viewer.handle(&map, Interaction::Pick { col: 0, row: 0 });
    assert_eq!(viewer.selection().current(), None);
    viewer.handle(&map, Interaction::SelectCentral);
    assert_eq!(viewer.selection().current(), Some(EntityId::Central));
}

#[test]
fn same_seed_same_layout() {
    let report = loader::load(&Source::Path(sample_path()));
    let build = || {
        let mut engine = LayoutEngine::new(LayoutConfig::default(), RandomSeeds::new(99));
        StarMap::build(&report.records, &mut engine, 5.0)
    };
    let a = build();
    let b = build();
    assert_eq!(a.entities(), b.entities());
}
