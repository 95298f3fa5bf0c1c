use std::fs;
use std::path::PathBuf;
use thirteenth_data::{
    export_config_text, load_config_patch, load_config_text, load_game_config, save_game_config,
    GenrePointBehavior, Preset, RunMode, TrophyPileInitial,
};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("thirteenth-data-{}", std::process::id()))
        .join(name)
}

#[test]
fn saved_config_loads_back() {
    let path = temp_path("saved.json");
    let config = Preset::Recommended.config();
    save_game_config(&path, &config).expect("save");
    let loaded = load_game_config(&path).expect("load");
    assert_eq!(loaded, config);
    let raw = fs::read_to_string(&path).expect("read");
    assert!(raw.contains("\"genrePointBehavior\": \"rerollPlusOne\""));
    assert!(raw.contains("\"trophyPileInitial\": \"bottom\""));
    assert!(raw.contains("\"lowFalloutFaceCard\": \"J\""));
}

#[test]
fn invalid_config_is_rejected_with_path() {
    let path = temp_path("invalid.json");
    let mut config = Preset::Fallback.config();
    config.max_rounds = 0;
    save_game_config(&path, &config).expect("save");
    let err = load_game_config(&path).expect_err("zero rounds");
    let message = format!("{err:#}");
    assert!(message.contains("invalid.json"));
    assert!(message.contains("maxRounds"));
}

#[test]
fn missing_field_is_a_parse_error() {
    let path = temp_path("partial.json");
    fs::create_dir_all(path.parent().expect("parent")).expect("dir");
    fs::write(&path, r#"{"maxRounds": 10}"#).expect("write");
    assert!(load_game_config(&path).is_err());

    let merged = load_config_patch(&path, &Preset::Fallback.config()).expect("patch");
    assert_eq!(merged.max_rounds, 10);
    assert_eq!(merged.num_players, 4);
}

#[test]
fn missing_file_mentions_read() {
    let err = load_game_config(&temp_path("nope.json")).expect_err("missing");
    assert!(format!("{err:#}").starts_with("read "));
}

#[test]
fn exported_text_file_imports_over_other_base() {
    let path = temp_path("exported.txt");
    let mut config = Preset::Fallback.config();
    config.genre_points = 7;
    config.genre_point_behavior = GenrePointBehavior::PlusOne;
    config.trophy_pile_initial = TrophyPileInitial::None;
    config.num_players = 2;
    fs::create_dir_all(path.parent().expect("parent")).expect("dir");
    fs::write(&path, export_config_text(&config, RunMode::Single)).expect("write");

    let imported = load_config_text(&path, &Preset::Recommended.config()).expect("import");
    assert_eq!(imported, config);
}
