use crate::commands::PlayerCommand;
use crate::config::{ConfigError, GameConfig};
use crate::enums::*;
use crate::state::GameStateSnapshot;
use crate::types::{SimTime, TargetId, Vec3};

#[test]
fn test_kind_roll_boundaries() {
    assert_eq!(TargetKind::from_roll(0.0), TargetKind::Bonus);
    assert_eq!(TargetKind::from_roll(0.099), TargetKind::Bonus);
    assert_eq!(TargetKind::from_roll(0.10), TargetKind::Fast);
    assert_eq!(TargetKind::from_roll(0.299), TargetKind::Fast);
    assert_eq!(
        TargetKind::from_roll(0.30),
        TargetKind::Standard,
        "the fast band is half-open at 0.30"
    );
    assert_eq!(TargetKind::from_roll(0.999), TargetKind::Standard);
}

#[test]
fn test_easing_endpoints() {
    for easing in [Easing::EaseOutCubic, Easing::EaseInCubic] {
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(1.0), 1.0);
        // Clamped outside the unit interval.
        assert_eq!(easing.apply(2.0), 1.0);
        assert_eq!(easing.apply(-1.0), 0.0);
    }
    // Ease-out front-loads motion, ease-in back-loads it.
    assert!(Easing::EaseOutCubic.apply(0.5) > 0.5);
    assert!(Easing::EaseInCubic.apply(0.5) < 0.5);
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    time.advance(10);
    time.advance(15);
    assert_eq!(time.frame, 2);
    assert_eq!(time.elapsed_ms, 25);
    assert!((time.elapsed_secs() - 0.025).abs() < 1e-12);
}

#[test]
fn test_target_ids_order_by_spawn_sequence() {
    let mut ids = vec![TargetId(7), TargetId(2), TargetId(5)];
    ids.sort();
    assert_eq!(ids, vec![TargetId(2), TargetId(5), TargetId(7)]);
    assert_eq!(TargetId(3).to_string(), "target-3");
}

#[test]
fn test_config_defaults() {
    let config = GameConfig::default();
    assert_eq!(config.game_length_secs, 60);
    assert_eq!(config.spawn_interval_ms(), 2000);
    assert_eq!(config.max_targets, 5);
    assert!((config.spawn_radius - 1.2).abs() < f32::EPSILON);
    assert_eq!(config.projectile.speed, 8.0);
    assert_eq!(config.projectile.max_distance, 10.0);
    assert_eq!(config.projectile.lifespan_ms, 2000);
    assert!((config.audio.sfx_volume - 0.7).abs() < f32::EPSILON);
    assert!((config.audio.music_volume - 0.3).abs() < f32::EPSILON);
    assert!(!config.audio.muted);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_partial_json_keeps_defaults() {
    let config =
        GameConfig::from_json_str(r#"{ "game_length_secs": 30, "projectile": { "speed": 12.0 } }"#)
            .unwrap();
    assert_eq!(config.game_length_secs, 30);
    assert_eq!(config.projectile.speed, 12.0);
    assert_eq!(config.projectile.max_distance, 10.0);
    assert_eq!(config.max_targets, 5);
}

#[test]
fn test_config_rejects_bad_values() {
    let err = GameConfig::from_json_str(r#"{ "max_targets": 0 }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NotPositive {
            field: "max_targets"
        }
    ));

    let err = GameConfig::from_json_str(r#"{ "audio": { "sfx_volume": 1.5 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { .. }));
    assert!(err.to_string().contains("audio.sfx_volume"));

    let err = GameConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_player_command_tagged_json() {
    let cmd = PlayerCommand::PullTrigger {
        grip: Vec3::new(0.0, 1.0, 0.0),
        aim: Vec3::NEG_Z,
    };
    let json = serde_json::to_string(&cmd).unwrap();
    assert!(json.contains(r#""type":"PullTrigger""#), "got {json}");

    let back: PlayerCommand = serde_json::from_str(r#"{"type":"StartGame"}"#).unwrap();
    assert!(matches!(back, PlayerCommand::StartGame));
}

#[test]
fn test_default_snapshot_is_idle_and_empty() {
    let snapshot = GameStateSnapshot::default();
    assert_eq!(snapshot.session.phase, SessionPhase::Idle);
    assert_eq!(snapshot.session.score, 0);
    assert!(snapshot.targets.is_empty());
    assert!(snapshot.projectiles.is_empty());

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.session.phase, SessionPhase::Idle);
}
