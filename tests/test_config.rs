use std::time::Duration;

use arcade_shooter::config::Tuning;
use arcade_shooter::Error;

#[test]
fn defaults_match_classic_values() {
    let t = Tuning::default();
    assert_eq!((t.arena.width, t.arena.height), (1024.0, 768.0));
    assert_eq!(t.player.max_bullets, 40);
    assert_eq!(t.player.lives, 3);
    assert_eq!(t.fire_cooldown(), Duration::from_millis(250));
    assert_eq!(t.enemies.max_enemies, 6);
    assert_eq!(t.enemies.spawn_chance, 150);
    assert_eq!(t.life_drop.spawn_chance, 600);
    assert_eq!(t.weapon_drop.spawn_chance, 700);
    assert_eq!(t.weapon_drop.speed, 2.2);
    assert!(t.validate().is_ok());
}

#[test]
fn empty_file_gives_defaults() {
    assert_eq!(Tuning::from_toml_str("").unwrap(), Tuning::default());
}

#[test]
fn partial_tables_keep_other_defaults() {
    let t = Tuning::from_toml_str(
        r#"
        [player]
        lives = 5
        fire_cooldown_ms = 100

        [weapon_drop]
        spawn_chance = 50
        "#,
    )
    .unwrap();
    assert_eq!(t.player.lives, 5);
    assert_eq!(t.fire_cooldown(), Duration::from_millis(100));
    assert_eq!(t.player.width, 60.0);
    assert_eq!(t.weapon_drop.spawn_chance, 50);
    assert_eq!(t.weapon_drop.speed, 2.2);
    assert_eq!(t.enemies, Tuning::default().enemies);
}

#[test]
fn unknown_field_is_rejected() {
    let err = Tuning::from_toml_str("[player]\nshield = 3\n").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn malformed_toml_is_rejected() {
    let err = Tuning::from_toml_str("[arena\nwidth = 10").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn inverted_enemy_speed_range_is_invalid() {
    let err = Tuning::from_toml_str("[enemies]\nspeed_min = 4.0\nspeed_max = 1.0\n").unwrap_err();
    assert!(matches!(err, Error::InvalidTuning(_)));
}

#[test]
fn ship_wider_than_arena_is_invalid() {
    let mut t = Tuning::default();
    t.player.width = 2000.0;
    assert!(matches!(t.validate(), Err(Error::InvalidTuning(_))));
}

#[test]
fn empty_bullet_pool_is_invalid() {
    let mut t = Tuning::default();
    t.player.max_bullets = 0;
    assert!(matches!(t.validate(), Err(Error::InvalidTuning(_))));
}

#[test]
fn zero_lives_is_invalid() {
    let mut t = Tuning::default();
    t.player.lives = 0;
    assert!(matches!(t.validate(), Err(Error::InvalidTuning(_))));
}

#[test]
fn negative_drop_speed_is_invalid() {
    let mut t = Tuning::default();
    t.life_drop.speed = -1.0;
    let err = t.validate().unwrap_err();
    assert!(err.to_string().contains("life drop speed"));
}

#[test]
fn infinite_arena_is_invalid() {
    let err = Tuning::from_toml_str("[arena]\nwidth = inf\n").unwrap_err();
    assert!(err.to_string().contains("arena width"));
}

#[test]
fn infinite_player_speed_is_invalid() {
    let err = Tuning::from_toml_str("[player]\nspeed = inf\n").unwrap_err();
    assert!(err.to_string().contains("player speed"));
}

#[test]
fn infinite_enemy_speed_max_is_invalid() {
    let err =
        Tuning::from_toml_str("[enemies]\nspeed_max = inf\nspawn_chance = 1\n").unwrap_err();
    assert!(err.to_string().contains("enemy speed_max"));
}

#[test]
fn nan_enemy_size_is_invalid() {
    let err = Tuning::from_toml_str("[enemies]\nwidth = nan\n").unwrap_err();
    assert!(matches!(err, Error::InvalidTuning(_)));
}

#[test]
fn infinite_drop_speed_is_invalid() {
    let err = Tuning::from_toml_str("[weapon_drop]\nspeed = inf\n").unwrap_err();
    assert!(err.to_string().contains("weapon drop speed"));
}

#[test]
fn zero_spawn_chance_is_allowed() {
    let t = Tuning::from_toml_str("[enemies]\nspawn_chance = 0\n").unwrap();
    assert_eq!(t.enemies.spawn_chance, 0);
}

#[test]
fn missing_file_reports_path() {
    let err = Tuning::load("/definitely/not/here/tuning.toml").unwrap_err();
    match err {
        Error::Io { path, .. } => assert!(path.ends_with("tuning.toml")),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn load_reads_file_from_disk() {
    let path = std::env::temp_dir().join(format!("arcade_tuning_{}.toml", std::process::id()));
    std::fs::write(&path, "[arena]\nwidth = 800.0\nheight = 600.0\n").unwrap();
    let t = Tuning::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!((t.arena.width, t.arena.height), (800.0, 600.0));
}
