use pretty_assertions::assert_eq;
use quake_explorer::models::{EdgeMode, Range, Selection};
use quake_explorer::processors::{aggregate_by_year, compute_bins_with_mode, FilterChain};
use quake_explorer::readers::RecordStore;
use quake_explorer::writers::{ChartBundle, ChartWriter};
use quake_explorer::ExplorerError;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

const QUAKES: &str = "\
Date,Time,Latitude,Longitude,Type,Depth,Magnitude,Magnitude Type
01/02/1965,13:44:18,19.246,145.616,Earthquake,131.6,6,MW
01/04/1965,11:29:49,1.863,127.352,Earthquake,80,5.8,MW
09/14/1970,04:12:00,37.1,-116.0,Nuclear Explosion,0,5.6,MB
12/26/2004,00:58:53,3.295,95.982,Earthquake,30,9.1,MW
1975-02-23T02:58:41.000Z,02:58:41,-24.5,-70.1,Earthquake,33,6.0,MW
03/11/2011,05:46:24,38.297,142.373,Earthquake,29,9.1,MWW
02/27/2010,06:34:11,-36.122,-72.898,Earthquake,22.9,8.8,MWW
";

const CITIES: &str = "\
city,city_ascii,lat,lng,country,iso2,iso3,admin_name,capital,population,id
Tokyo,Tokyo,35.6897,139.6922,Japan,JP,JPN,Tokyo,primary,37732000,1392685764
Sendai,Sendai,38.2682,140.8694,Japan,JP,JPN,Miyagi,admin,1058070,1392457903
Banda Aceh,Banda Aceh,5.55,95.3175,Indonesia,ID,IDN,Aceh,admin,223446,1360443138
Concepción,Concepcion,-36.8333,-73.05,Chile,CL,CHL,Biobío,admin,223574,1152510548
";

fn write_fixture(dir: &TempDir) -> std::io::Result<(std::path::PathBuf, std::path::PathBuf)> {
    let quakes = dir.path().join("earthquakes.csv");
    let cities = dir.path().join("worldcities.csv");
    fs::File::create(&quakes)?.write_all(QUAKES.as_bytes())?;
    fs::File::create(&cities)?.write_all(CITIES.as_bytes())?;
    Ok((quakes, cities))
}

#[test]
fn test_filter_bin_and_write_pipeline() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (quakes, cities) = write_fixture(&temp_dir).unwrap();

    let store = RecordStore::load(&quakes, &cities).unwrap();
    assert_eq!(store.quakes.len(), 7);
    assert_eq!(store.usable_cities().len(), 4);

    let chain = FilterChain::new()
        .with_latitude(Range::new(-40.0, 40.0))
        .with_magnitude(Range::new(5.5, 9.1));
    let selection = chain.apply(&store.selection()).unwrap();
    assert_eq!(selection.len(), 7);

    let bins = compute_bins_with_mode(&selection, 6, EdgeMode::Inclusive).unwrap();
    assert_eq!(bins.len(), 6);
    assert_eq!(bins.iter().map(|b| b.count()).sum::<usize>(), 7);

    let yearly = aggregate_by_year(&selection);
    let dated = selection.iter().filter(|r| r.date().is_some()).count();
    assert_eq!(yearly.values().map(|s| s.count).sum::<usize>(), dated);
    assert_eq!(dated, 6);

    let bundle = ChartBundle::build(&selection, &bins, &yearly);
    let output = temp_dir.path().join("charts.json");
    let info = ChartWriter::new().write_bundle(&bundle, &output).unwrap();
    assert!(output.exists());
    assert!(info.total_bytes > 0);
}

#[test]
fn test_strict_ranges_and_empty_stage() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (quakes, cities) = write_fixture(&temp_dir).unwrap();
    let store = RecordStore::load(&quakes, &cities).unwrap();

    let too_strong = FilterChain::new().with_magnitude(Range::new(9.5, 5.0));
    assert!(matches!(
        too_strong.apply(&store.selection()),
        Err(ExplorerError::RangeOutOfDomain { .. })
    ));

    let date_range = Range::parse("01/01/2012,12/30/2016").unwrap();
    let nothing = FilterChain::new().with_date(date_range);
    assert!(matches!(
        nothing.apply(&store.selection()),
        Err(ExplorerError::EmptySelection { .. })
    ));

    assert!(matches!(
        compute_bins_with_mode(&Selection::default(), 6, EdgeMode::Legacy),
        Err(ExplorerError::EmptySelection { .. })
    ));
}

#[test]
fn test_malformed_file_aborts_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (_, cities) = write_fixture(&temp_dir).unwrap();

    let broken = temp_dir.path().join("broken.csv");
    fs::write(&broken, "Date,Latitude,Longitude,Magnitude\n01/02/1965,19.2,145.6\n").unwrap();

    match RecordStore::load(&broken, &cities) {
        Err(ExplorerError::MalformedRow { row, .. }) => assert_eq!(row, 1),
        other => panic!("expected malformed row, got {other:?}"),
    }
}
