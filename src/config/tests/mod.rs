//! Unit tests for config module
//!
//! Tests configuration defaults, deserialization and validation into the
//! lifecycle snapshot. File loading is covered by the integration tests.

use std::time::Duration;

use crate::{
    config::{Config, ConfigError, LogLevel},
    services::{gpio::Level, power::LineRole},
};

const FULL_CONFIG: &str = r#"
    [general]
    log_level = "debug"

    [board]
    name = "nucleo_l496zg"

    [modem]
    apn = "iot.example"
    uart = "ttyUSB2"
    autostart = false
    settle_delay_ms = 2500

    [modem.ppp]
    peer = "quectel"
    interface = "ppp1"

    [gpio.sim_select]
    controller = "gpiochip1"
    pin = 12
    active_level = "low"

    [gpio.modem_enable]
    controller = "gpiochip1"
    pin = 13
"#;

#[test]
fn config_default_has_no_pins() {
    let config = Config::default();

    assert!(config.gpio.sim_select.is_none());
    assert!(config.gpio.modem_enable.is_none());
    assert!(config.modem.autostart);
    assert_eq!(config.modem.settle_delay_ms, 5000);
    assert_eq!(config.general.log_level, LogLevel::Info);
}

#[test]
fn config_empty_toml_uses_defaults() {
    let config: Config = toml::from_str("").unwrap();

    assert_eq!(config.board.name, "generic");
    assert_eq!(config.modem.ppp.interface, "ppp0");
}

#[test]
fn validate_full_config() {
    let config: Config = toml::from_str(FULL_CONFIG).unwrap();

    let lifecycle = config.validate().unwrap();

    assert_eq!(lifecycle.board, "nucleo_l496zg");
    assert_eq!(lifecycle.apn, "iot.example");
    assert_eq!(lifecycle.uart, "ttyUSB2");
    assert!(!lifecycle.autostart);
    assert_eq!(lifecycle.settle_delay, Duration::from_millis(2500));
    assert_eq!(lifecycle.sim_select.controller, "gpiochip1");
    assert_eq!(lifecycle.sim_select.pin, 12);
    assert_eq!(lifecycle.sim_select.active_level, Level::Low);
    assert_eq!(lifecycle.modem_enable.pin, 13);
    assert_eq!(lifecycle.modem_enable.active_level, Level::High);
    assert_eq!(lifecycle.ppp.peer, "quectel");
    assert_eq!(lifecycle.log_level, LogLevel::Debug);
}

#[test]
fn validate_rejects_missing_sim_select() {
    let config: Config = toml::from_str(
        r#"
        [gpio.modem_enable]
        controller = "gpiochip0"
        pin = 3
        "#,
    )
    .unwrap();

    let err = config.validate().unwrap_err();

    assert!(matches!(
        err,
        ConfigError::MissingPinAssignment {
            role: LineRole::SimSelect,
            ..
        }
    ));
}

#[test]
fn validate_rejects_missing_modem_enable() {
    let config: Config = toml::from_str(
        r#"
        [gpio.sim_select]
        controller = "gpiochip0"
        pin = 2
        "#,
    )
    .unwrap();

    let err = config.validate().unwrap_err();

    assert!(matches!(
        err,
        ConfigError::MissingPinAssignment {
            role: LineRole::ModemEnable,
            key: "modem_enable",
        }
    ));
    assert!(err.to_string().contains("[gpio.modem_enable]"));
}

#[test]
fn validate_rejects_zero_settle_delay() {
    let mut config: Config = toml::from_str(FULL_CONFIG).unwrap();
    config.modem.settle_delay_ms = 0;

    let err = config.validate().unwrap_err();

    assert!(matches!(
        err,
        ConfigError::InvalidConfigField { ref field, .. } if field == "settle_delay_ms"
    ));
}

#[test]
fn validate_rejects_blank_controller() {
    let mut config: Config = toml::from_str(FULL_CONFIG).unwrap();
    if let Some(pin) = config.gpio.modem_enable.as_mut() {
        pin.controller = "  ".to_string();
    }

    let err = config.validate().unwrap_err();

    assert!(matches!(
        err,
        ConfigError::InvalidConfigField { ref component, .. } if component == "gpio.modem_enable"
    ));
}

#[test]
fn config_invalid_level_is_rejected() {
    let result: Result<Config, toml::de::Error> = toml::from_str(
        r#"
        [gpio.sim_select]
        controller = "gpiochip0"
        pin = 2
        active_level = "floating"
        "#,
    );

    assert!(result.is_err());
}

#[test]
fn config_serialize_roundtrip() {
    let original: Config = toml::from_str(FULL_CONFIG).unwrap();

    let toml_str = toml::to_string(&original).unwrap();
    let deserialized: Config = toml::from_str(&toml_str).unwrap();

    assert_eq!(
        original.validate().unwrap(),
        deserialized.validate().unwrap()
    );
}

#[test]
fn schema_describes_gpio_section() {
    let schema = Config::schema();

    let rendered = schema.to_string();
    assert!(rendered.contains("sim_select"));
    assert!(rendered.contains("settle_delay_ms"));
}
