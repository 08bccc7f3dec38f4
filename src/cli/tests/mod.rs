//! Unit tests for the CLI module
//!
//! Formatting helpers, registry lookups and full command lines dispatched
//! against simulated GPIO and network backends.

use std::{sync::Arc, time::Duration};

use tokio::sync::oneshot;
use toml::Value;

use crate::{
    cli::{
        CliError, CliService, CommandRegistry, formatting::format_toml_value, run_shell,
        serve_console,
    },
    config::{Config, PinConfig},
    services::{
        LifecycleController, SessionState,
        gpio::{Level, SimulatedGpioBus},
        network::{ConnectivityStatus, NetEventKind, SimulatedStack, StackCall},
    },
};

#[test]
fn format_toml_value_renders_scalars_and_sizes() {
    let mut table = toml::map::Map::new();
    table.insert("pin".to_string(), Value::Integer(9));
    table.insert("controller".to_string(), Value::String("gpiochip2".to_string()));

    let cases = [
        (Value::String("internet".to_string()), "\"internet\""),
        (Value::Integer(5000), "5000"),
        (Value::Float(2.5), "2.5"),
        (Value::Boolean(true), "true"),
        (Value::Array(vec![Value::Integer(1), Value::Integer(2)]), "[2]"),
        (Value::Table(table), "{2}"),
        (Value::Table(toml::map::Map::new()), "{0}"),
    ];

    for (value, expected) in cases {
        assert_eq!(format_toml_value(&value), expected, "{value:?}");
    }
}

fn config(autostart: bool) -> Config {
    let mut config = Config::default();
    config.board.name = "bench".to_string();
    config.modem.autostart = autostart;
    config.gpio.sim_select = Some(PinConfig {
        controller: "gpiochip0".to_string(),
        pin: 1,
        active_level: Level::Low,
    });
    config.gpio.modem_enable = Some(PinConfig {
        controller: "gpiochip0".to_string(),
        pin: 2,
        active_level: Level::High,
    });
    config
}

async fn service(autostart: bool) -> (CliService, Arc<LifecycleController>, SimulatedStack) {
    let config = config(autostart);
    let stack = SimulatedStack::default();
    let controller = Arc::new(
        LifecycleController::boot(
            config.validate().unwrap(),
            Arc::new(SimulatedGpioBus::new()),
            Arc::new(stack.clone()),
        )
        .await
        .unwrap(),
    );

    (
        CliService::new(controller.clone(), Arc::new(config)),
        controller,
        stack,
    )
}

#[tokio::test(start_paused = true)]
async fn registry_lists_categories_sorted() {
    let (service, _, _) = service(false).await;

    assert_eq!(
        service.list_all(),
        vec![
            (
                "config".to_string(),
                vec!["get".to_string(), "schema".to_string(), "show".to_string()]
            ),
            (
                "modem".to_string(),
                vec![
                    "resume".to_string(),
                    "status".to_string(),
                    "suspend".to_string()
                ]
            ),
        ]
    );
}

#[test]
fn empty_registry_finds_nothing() {
    let registry = CommandRegistry::new();

    assert!(registry.list_commands().is_empty());
    assert!(matches!(
        registry.find("modem", "resume"),
        Err(CliError::CommandNotFound(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn suspend_then_resume_succeeds_silently() {
    let (service, controller, stack) = service(true).await;

    assert_eq!(service.execute_line("modem suspend").await.unwrap(), "");
    assert_eq!(controller.session_state(), SessionState::Stopped);

    assert_eq!(service.execute_line("modem resume").await.unwrap(), "");
    assert_eq!(controller.session_state(), SessionState::Running);

    assert_eq!(
        stack.calls(),
        vec![StackCall::Start, StackCall::Stop, StackCall::Start]
    );
}

#[tokio::test(start_paused = true)]
async fn second_suspend_is_rejected_with_enoexec() {
    let (service, _, stack) = service(true).await;

    service.execute_line("modem suspend").await.unwrap();
    let err = service.execute_line("modem suspend").await.unwrap_err();

    assert_eq!(err.to_string(), "Modem is already stopped.");
    assert_eq!(err.code(), -libc::ENOEXEC);
    assert_eq!(stack.stop_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn resume_while_running_is_rejected_with_enoexec() {
    let (service, _, stack) = service(true).await;

    let err = service.execute_line("modem resume").await.unwrap_err();

    assert_eq!(err.to_string(), "Modem is already started.");
    assert_eq!(err.code(), -libc::ENOEXEC);
    assert_eq!(stack.start_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn refused_stack_call_reports_service_error() {
    let (service, controller, stack) = service(true).await;
    stack.set_fail_stop(true);

    let err = service.execute_line("modem suspend").await.unwrap_err();

    assert!(matches!(err, CliError::ServiceError { .. }));
    assert_eq!(err.code(), -libc::ENOEXEC);
    assert_eq!(controller.session_state(), SessionState::Running);
}

#[tokio::test(start_paused = true)]
async fn unknown_and_malformed_lines_report_einval() {
    let (service, _, _) = service(false).await;

    let err = service.execute_line("modem reboot").await.unwrap_err();
    assert!(matches!(err, CliError::CommandNotFound(_)));
    assert_eq!(err.code(), -libc::EINVAL);

    let err = service.execute_line("modem").await.unwrap_err();
    assert!(matches!(err, CliError::InvalidArguments(_)));

    let err = service.execute_line("modem suspend now").await.unwrap_err();
    assert!(matches!(err, CliError::InvalidArguments(_)));
    assert_eq!(err.code(), -libc::EINVAL);

    assert_eq!(service.execute_line("   ").await.unwrap(), "");
}

#[tokio::test(start_paused = true)]
async fn status_reports_session_and_connectivity() {
    let (service, _, _) = service(false).await;

    let status = service.execute_line("modem status").await.unwrap();

    assert!(status.contains("board:        bench"));
    assert!(status.contains("power:        on"));
    assert!(status.contains("session:      stopped"));
    assert!(status.contains("connectivity: unknown"));
}

#[tokio::test(start_paused = true)]
async fn config_get_reads_dotted_paths() {
    let (service, _, _) = service(false).await;

    assert_eq!(
        service.execute_line("config get modem.apn").await.unwrap(),
        "modem.apn: \"internet\""
    );
    assert_eq!(
        service
            .execute_line("config get gpio.modem_enable.pin")
            .await
            .unwrap(),
        "gpio.modem_enable.pin: 2"
    );
    assert_eq!(
        service.execute_line("config get gpio").await.unwrap(),
        "gpio: {2}"
    );

    let err = service
        .execute_line("config get modem.nonexistent")
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::InvalidArguments(_)));

    let err = service.execute_line("config get").await.unwrap_err();
    assert!(matches!(err, CliError::InvalidArguments(_)));
}

#[tokio::test(start_paused = true)]
async fn config_show_and_schema_render() {
    let (service, _, _) = service(false).await;

    let shown = service.execute_line("config show").await.unwrap();
    let reparsed: Config = toml::from_str(&shown).unwrap();
    assert_eq!(reparsed.board.name, "bench");
    assert_eq!(reparsed.gpio.sim_select.unwrap().active_level, Level::Low);

    let schema = service.execute_line("config schema").await.unwrap();
    let schema: serde_json::Value = serde_json::from_str(&schema).unwrap();
    assert!(schema["properties"]["modem"].is_object());
}

#[tokio::test(start_paused = true)]
async fn help_lists_commands_per_category() {
    let (service, _, _) = service(false).await;

    let all = service.execute_line("help").await.unwrap();
    assert!(all.contains("resume"));
    assert!(all.contains("schema"));

    let modem = service.execute_line("help modem").await.unwrap();
    assert!(modem.contains("suspend"));
    assert!(!modem.contains("schema"));
}

#[tokio::test(start_paused = true)]
async fn shell_answers_each_line_and_stops_at_exit() {
    let (service, _, stack) = service(true).await;
    let input: &[u8] = b"modem suspend\nmodem suspend\n\nexit\nmodem resume\n";
    let mut output = Vec::new();

    run_shell(&service, input, &mut output).await.unwrap();

    let output = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Modem is already stopped."));
    assert!(lines[0].contains(&format!("({})", -libc::ENOEXEC)));
    assert_eq!(stack.calls(), vec![StackCall::Start, StackCall::Stop]);
}

#[tokio::test(start_paused = true)]
async fn daemon_outlives_closed_console_until_shutdown() {
    let (service, controller, stack) = service(true).await;
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let mut output = Vec::new();

    let console = serve_console(&service, &b""[..], &mut output, async {
        let _ = shutdown_rx.await;
    });
    tokio::pin!(console);

    stack.inject(NetEventKind::L4Disconnected);
    let waited = tokio::time::timeout(Duration::from_secs(3600), &mut console).await;

    assert!(waited.is_err());
    assert_eq!(controller.session_state(), SessionState::Running);
    assert_eq!(
        controller.connectivity_status(),
        ConnectivityStatus::Disconnected
    );

    shutdown_tx.send(()).unwrap();
    console.await;
    assert_eq!(stack.calls(), vec![StackCall::Start]);
}

#[tokio::test(start_paused = true)]
async fn shutdown_ends_console_while_it_is_open() {
    let (service, _, _) = service(false).await;
    let (_input_writer, input) = tokio::io::duplex(64);
    let mut output = Vec::new();

    serve_console(
        &service,
        tokio::io::BufReader::new(input),
        &mut output,
        async {},
    )
    .await;

    assert!(output.is_empty());
}
