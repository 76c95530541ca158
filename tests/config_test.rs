// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证设置文件加载、缺省值与校验
// ==========================================

use fee_dues_engine::config::{config_keys, ConfigManager, FeeSettings};
use fee_dues_engine::domain::types::{CollectionTiming, StartRule};
use fee_dues_engine::engine::DuesEngine;
use fee_dues_engine::error::DuesError;
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_load_settings_from_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{
            "session_start_month": "June",
            "due_day_of_month": 10,
            "collection_timing": "arrears",
            "start_rule": "ALWAYS_FROM_APRIL",
            "admission_cutoff_day": 15,
            "payments_from_session_start": true,
            "monthly_fee_keyword": null
        }"#,
    )
    .unwrap();

    let manager = ConfigManager::from_json_file(&path).await.unwrap();
    let settings = manager.load_settings().unwrap();

    assert_eq!(settings.session_start_month, 6);
    assert_eq!(settings.due_day_of_month, 10);
    assert_eq!(settings.collection_timing, CollectionTiming::Arrears);
    assert_eq!(settings.start_rule, StartRule::AlwaysFromSessionStart);
    assert_eq!(settings.admission_cutoff_day, Some(15));
    assert!(settings.payments_from_session_start);
    assert_eq!(settings.monthly_fee_keyword, "monthly");
}

#[tokio::test]
async fn test_missing_settings_file_is_error() {
    let dir = TempDir::new().unwrap();
    let result = ConfigManager::from_json_file(dir.path().join("absent.json")).await;
    assert!(result.is_err());
}

#[test]
fn test_out_of_range_values_rejected() {
    let manager = ConfigManager::from_pairs([(config_keys::DUE_DAY_OF_MONTH, "32")]);
    assert!(matches!(
        manager.load_settings(),
        Err(DuesError::InvalidConfig { .. })
    ));

    let manager = ConfigManager::from_pairs([(config_keys::SESSION_START_MONTH, "Smarch")]);
    assert!(matches!(
        manager.load_settings(),
        Err(DuesError::InvalidConfig { .. })
    ));
}

#[test]
fn test_nested_json_rejected() {
    let result = ConfigManager::from_json_str(r#"{"start_rule": {"value": "x"}}"#);
    assert!(matches!(result, Err(DuesError::InvalidConfig { .. })));
}

#[test]
fn test_overrides_feed_engine() {
    let mut manager = ConfigManager::new();
    manager.set(config_keys::DEFAULT_STUDENT_CATEGORY, "RTE");
    manager.set(config_keys::SESSION_START_MONTH, "1");

    let settings = manager.load_settings().unwrap();
    let engine = DuesEngine::new(settings.clone()).unwrap();

    assert_eq!(engine.settings(), &settings);
    assert_eq!(engine.settings().default_student_category, "RTE");
    assert_ne!(settings, FeeSettings::default());
}

#[test]
fn test_config_snapshot_round_trip() {
    let manager = ConfigManager::from_pairs([(config_keys::DUE_DAY_OF_MONTH, "7")]);
    let snapshot = manager.get_config_snapshot().unwrap();

    let restored = ConfigManager::from_json_str(&snapshot).unwrap();
    assert_eq!(restored.load_settings().unwrap().due_day_of_month, 7);
}
