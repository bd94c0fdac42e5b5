use hwb_scenario_harness::{ScenarioHarness, WalletRecord};
use hwb_ui::nv_storage::EEPROM_SIZE;
use hwb_ui::storage_layout::{record_address, wallet_capacity};
use hwb_ui::{Command, Decision, NvError, ScriptedButtons};
use Decision::{Accept, Deny};

fn record(fill: u8) -> WalletRecord {
    [fill; 160]
}

#[test]
fn accepted_replacement_writes_the_slot() {
    let mut harness = ScenarioHarness::new();
    let decision = harness
        .replace_wallet(1, &record(0x5A), ScriptedButtons::new().accept())
        .unwrap();
    assert_eq!(decision, Accept);
    assert_eq!(harness.wallet(1).unwrap(), record(0x5A));
    assert_eq!(harness.wallet(0).unwrap(), record(0xFF));
    assert_eq!(
        harness.page_texts(),
        ["Delete current\nwallet and\ncreate new one?"]
    );
}

#[test]
fn denied_replacement_leaves_storage_alone() {
    let mut harness = ScenarioHarness::new();
    let decision = harness
        .replace_wallet(0, &record(0x11), ScriptedButtons::new().cancel())
        .unwrap();
    assert_eq!(decision, Deny);
    assert!(harness.storage().as_bytes().iter().all(|b| *b == 0xFF));
}

#[test]
fn slot_past_the_device_is_rejected_after_accept() {
    let mut harness = ScenarioHarness::new();
    let index = wallet_capacity(EEPROM_SIZE);
    assert_eq!(
        harness.replace_wallet(index, &record(0x22), ScriptedButtons::new().accept()),
        Err(NvError::InvalidAddress {
            address: record_address(index),
            length: 160,
        })
    );
    assert!(harness.storage().as_bytes().iter().all(|b| *b == 0xFF));
}

#[test]
fn absurd_slot_index_is_rejected_not_wrapped() {
    let mut harness = ScenarioHarness::new();
    assert_eq!(
        harness.replace_wallet(u32::MAX, &record(0x33), ScriptedButtons::new().accept()),
        Err(NvError::InvalidAddress {
            address: u32::MAX,
            length: 160,
        })
    );
    assert!(harness.storage().as_bytes().iter().all(|b| *b == 0xFF));
}

#[test]
fn format_needs_all_three_accepts() {
    let mut harness = ScenarioHarness::new();
    for index in 0..wallet_capacity(EEPROM_SIZE) {
        harness
            .replace_wallet(index, &record(index as u8), ScriptedButtons::new().accept())
            .unwrap();
    }
    harness.forget_pages();

    let decision = harness.format_storage(ScriptedButtons::new().answers(&[Accept, Accept, Deny]));
    assert_eq!(decision, Deny);
    assert_eq!(harness.pages().len(), 3);
    assert_eq!(harness.wallet(2).unwrap(), record(2));
    harness.forget_pages();

    let decision = harness.format_storage(ScriptedButtons::new().answers(&[Accept; 3]));
    assert_eq!(decision, Accept);
    assert!(harness.storage().as_bytes().iter().all(|b| *b == 0xFF));

    let texts = harness.page_texts();
    assert_eq!(texts.len(), 3);
    assert!(texts[0].starts_with("Format storage?"));
    assert!(texts[2].starts_with("Are you really"));
}

#[test]
fn first_format_denial_stops_the_cascade() {
    let mut harness = ScenarioHarness::new();
    let decision = harness.format_storage(ScriptedButtons::new().answers(&[Deny, Accept, Accept]));
    assert_eq!(decision, Deny);
    assert_eq!(harness.pages().len(), 1);
    assert_eq!(harness.unused_samples(), 200);
}

#[test]
fn single_prompt_commands_share_one_page() {
    let mut harness = ScenarioHarness::new();
    for command in [
        Command::NewAddress,
        Command::ChangeName,
        Command::BackupWallet,
        Command::RestoreWallet,
    ] {
        harness.forget_pages();
        assert_eq!(harness.confirm(command, ScriptedButtons::new().accept()), Accept);
        assert_eq!(harness.pages().len(), 1, "{command:?}");
        assert_eq!(harness.confirm(command, ScriptedButtons::new().cancel()), Deny);
    }
}

#[test]
fn stream_error_leaves_the_notice_up() {
    let mut harness = ScenarioHarness::new();
    let lines = harness.stream_error();
    assert_eq!(lines, ["Unexpected", "communications", "error! Halting.", ""]);
    assert!(harness.display().is_on());
    assert_eq!(harness.elapsed_ms(), 0);
}
