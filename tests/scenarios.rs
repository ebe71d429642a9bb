//! End-to-end keypad scenarios, from keystrokes to persisted history.

use reckon::core::UNDEFINED;
use reckon::store::HISTORY_KEY;
use reckon::{
    Calculator, CalculatorApp, CalculatorConfig, FileStore, HistoryStore, Key, KeyValueStore,
    MemoryStore, Operation, Phase, Step, Theme,
};
use std::time::Duration;
use tokio::time::sleep;

fn press(calc: &mut Calculator, input: &str) -> Vec<Step> {
    calc.press_all(Key::sequence(input).unwrap())
}

#[test]
fn chained_addition() {
    let mut calc = Calculator::new();
    press(&mut calc, "2 + 3 +");
    assert_eq!(calc.display().current_value, "5");
    assert_eq!(calc.display().expression_text, "5 +");

    press(&mut calc, "4 =");
    let display = calc.display();
    assert_eq!(display.current_value, "9");
    assert_eq!(display.expression_text, "5 + 4 =");
    assert_eq!(display.pending_operation, None);
    assert_eq!(calc.phase(), Phase::Idle);
}

#[test]
fn operator_replacement() {
    let mut calc = Calculator::new();
    press(&mut calc, "5 + ×");

    let display = calc.display();
    assert_eq!(display.pending_operation, Some(Operation::Multiply));
    assert_eq!(display.pending_symbol(), Some("×"));
    assert_eq!(display.expression_text, "5 ×");

    press(&mut calc, "3 =");
    assert_eq!(calc.display().current_value, "15");
}

#[test]
fn evaluation_records_history() {
    let mut calc = Calculator::new();
    let steps = press(&mut calc, "7 2 + 1 8 =");

    let entry = steps.last().and_then(Step::entry).unwrap();
    assert_eq!(entry.expression, "72 + 18 =");
    assert_eq!(entry.result, "90");
    assert_eq!(calc.history().latest(), Some(entry));
    assert_eq!(calc.display().current_value, "90");
}

#[test]
fn division_by_zero() {
    let mut calc = Calculator::new();
    press(&mut calc, "5 ÷ 0 =");

    let display = calc.display();
    assert_eq!(display.current_value, UNDEFINED);
    assert_eq!(display.expression_text, "5 ÷ 0 =");
    assert_eq!(calc.history().latest().unwrap().result, UNDEFINED);

    // Typing after an undefined result starts over.
    press(&mut calc, "8");
    assert_eq!(calc.display().current_value, "8");
}

#[test]
fn large_results_get_separators() {
    let mut calc = Calculator::new();
    press(&mut calc, "1 2 3 4 5 6 × 1 0 =");

    assert_eq!(calc.session().buffer(), "1234560");
    assert_eq!(calc.display().current_value, "1,234,560");
    assert_eq!(calc.display().expression_text, "123,456 × 10 =");
    assert_eq!(calc.history().latest().unwrap().result, "1,234,560");
}

#[test]
fn decimal_entry_and_percent() {
    let mut calc = Calculator::new();
    press(&mut calc, "5 0 pct");
    assert_eq!(calc.display().current_value, "0.5");

    press(&mut calc, "AC . 2 5 + . 7 5 =");
    assert_eq!(calc.display().current_value, "1");
}

#[test]
fn delete_and_sign_toggle() {
    let mut calc = Calculator::new();
    press(&mut calc, "1 2 3 DEL +/-");
    assert_eq!(calc.display().current_value, "-12");

    press(&mut calc, "DEL DEL");
    assert_eq!(calc.display().current_value, "0");
}

#[test]
fn modulo_operation() {
    let mut calc = Calculator::new();
    press(&mut calc, "1 7 mod 5 =");
    assert_eq!(calc.display().current_value, "2");
    assert_eq!(calc.display().expression_text, "17 % 5 =");
}

#[tokio::test(start_paused = true)]
async fn history_write_waits_for_quiet_period() {
    let backend = MemoryStore::new();
    let mut app = CalculatorApp::start(&CalculatorConfig::default(), backend.clone()).await;

    app.press_all(Key::sequence("1 + 1 =").unwrap());
    sleep(Duration::from_millis(250)).await;
    app.press_all(Key::sequence("+ 1 =").unwrap());

    // 500ms after the first evaluation, but only 250ms after the second.
    sleep(Duration::from_millis(300)).await;
    assert_eq!(backend.get(HISTORY_KEY).unwrap(), None);

    sleep(Duration::from_millis(300)).await;
    let stored = HistoryStore::new(backend).try_load_all().await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored.latest().unwrap().expression, "2 + 1 =");
}

#[tokio::test]
async fn file_store_session_round_trip() {
    let dir = std::env::temp_dir().join(format!("reckon-scenario-{}", uuid::Uuid::new_v4()));
    let mut config = CalculatorConfig::default();
    config.storage.data_dir = Some(dir.clone());

    let store = FileStore::open(config.data_dir()).unwrap();
    let mut app = CalculatorApp::start(&config, store).await;
    app.press_all(Key::sequence("9 × 9 =").unwrap());
    app.toggle_theme();
    app.shutdown().await;

    let raw = std::fs::read_to_string(dir.join("calculator_history.json")).unwrap();
    assert!(raw.trim_start().starts_with('['));
    assert_eq!(
        std::fs::read_to_string(dir.join("calculator_theme.json")).unwrap(),
        "dark"
    );

    let store = FileStore::open(config.data_dir()).unwrap();
    let mut app = CalculatorApp::start(&config, store).await;
    assert_eq!(app.theme(), Theme::Dark);
    assert_eq!(app.history().latest().unwrap().result, "81");

    app.recall(0);
    app.press_all(Key::sequence("+ 1 9 =").unwrap());
    assert_eq!(app.display().current_value, "100");
    app.shutdown().await;

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn corrupt_history_starts_empty() {
    let backend = MemoryStore::new();
    backend.set(HISTORY_KEY, "{not an array").unwrap();

    let mut app = CalculatorApp::start(&CalculatorConfig::default(), backend).await;
    assert!(app.history().is_empty());

    app.press_all(Key::sequence("3 - 5 =").unwrap());
    assert_eq!(app.display().current_value, "-2");
    app.shutdown().await;
}
