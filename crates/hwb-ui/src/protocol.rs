//! Confirmation prompts.
//!
//! Every prompt follows the same steps: clear the page, wait until no button
//! is held, show the question, wait for a debounced press. Multi-prompt
//! flows stop at the first denial; nothing after it is shown.

use embedded_hal::delay::DelayNs;

use crate::command::{Command, Decision};
use crate::debounce::Debouncer;
use crate::display::PromptDisplay;
use crate::input::ButtonSampler;
use crate::staging::{OutputEntry, OutputStagingBuffer};

const NUKE_WALLET_PROMPT: &str = "Delete current wallet and create new one?";
const NEW_ADDRESS_PROMPT: &str = "Create new address?";
const FORMAT_PROMPTS: [&str; 3] = [
    "Format storage? This will delete everything!",
    "Are you sure you want to nuke all wallets?",
    "Are you really really sure?",
];
const CHANGE_NAME_PROMPT: &str = "Change the name of the current wallet?";
const BACKUP_WALLET_PROMPT: &str = "Do you want to backup the current wallet?";
const RESTORE_WALLET_PROMPT: &str = "Delete current wallet and restore from a backup?";
const UNKNOWN_COMMAND_PROMPT: &str = "Unknown command. Press any button to continue...";
const STREAM_ERROR_NOTICE: &str = "Unexpected communications error! Halting.";

/// Display plus debounced buttons: everything needed to ask the operator.
pub struct UserInterface<P, S, D> {
    pub(crate) display: P,
    pub(crate) buttons: Debouncer<S, D>,
}

/// A front end that has shown the stream-error notice.
///
/// Holds only the display; no further prompts can be issued. The caller is
/// expected to stop the device.
pub struct Halted<P> {
    display: P,
}

impl<P> Halted<P> {
    pub fn display(&self) -> &P {
        &self.display
    }

    pub fn into_display(self) -> P {
        self.display
    }
}

impl<P, S, D> UserInterface<P, S, D>
where
    P: PromptDisplay,
    S: ButtonSampler,
    D: DelayNs,
{
    pub fn new(display: P, buttons: Debouncer<S, D>) -> Self {
        Self { display, buttons }
    }

    pub fn display(&self) -> &P {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut P {
        &mut self.display
    }

    pub fn buttons(&self) -> &Debouncer<S, D> {
        &self.buttons
    }

    /// Give the display and the debouncer back
    pub fn release(self) -> (P, Debouncer<S, D>) {
        (self.display, self.buttons)
    }

    /// Ask the operator to allow `command`.
    ///
    /// For [`Command::SignTransaction`] every output in `outputs` is shown on
    /// its own page in staging order, then the fee if one was set. Any other
    /// command ignores `outputs`.
    pub fn confirm(&mut self, command: Command, outputs: &OutputStagingBuffer) -> Decision {
        self.display.clear();
        self.display.display_on();

        let decision = match command {
            Command::NukeWallet => self.ask(NUKE_WALLET_PROMPT),
            Command::NewAddress => self.ask(NEW_ADDRESS_PROMPT),
            Command::SignTransaction => self.confirm_transaction(outputs),
            Command::Format => self.confirm_format(),
            Command::ChangeName => self.ask(CHANGE_NAME_PROMPT),
            Command::BackupWallet => self.ask(BACKUP_WALLET_PROMPT),
            Command::RestoreWallet => self.ask(RESTORE_WALLET_PROMPT),
            Command::Unknown(code) => self.acknowledge_unknown(code),
        };

        self.display.clear();
        self.display.display_off();
        log::info!("{:?}: {}", command, decision);
        decision
    }

    /// Show the halting notice after a communication failure.
    ///
    /// Consumes the front end: after this no protocol step is valid.
    pub fn notify_stream_error(mut self) -> Halted<P> {
        log::error!("stream error, halting");
        self.display.clear();
        self.display.display_on();
        self.display.write_str_word_wrap(STREAM_ERROR_NOTICE);
        Halted {
            display: self.display,
        }
    }

    /// One word-wrapped yes/no prompt
    fn ask(&mut self, question: &str) -> Decision {
        self.display.clear();
        self.buttons.wait_for_release();
        self.display.write_str_word_wrap(question);
        self.buttons.wait_for_press()
    }

    /// All three format prompts must be accepted.
    fn confirm_format(&mut self) -> Decision {
        for question in FORMAT_PROMPTS {
            if self.ask(question) == Decision::Deny {
                return Decision::Deny;
            }
        }
        Decision::Accept
    }

    /// Every output, then the fee, each on its own page.
    fn confirm_transaction(&mut self, outputs: &OutputStagingBuffer) -> Decision {
        for (index, output) in outputs.outputs().iter().enumerate() {
            if self.ask_output(output) == Decision::Deny {
                log::info!("output {} of {} denied", index + 1, outputs.len());
                return Decision::Deny;
            }
        }

        match outputs.fee() {
            Some(fee) => self.ask_fee(fee.as_str()),
            None => Decision::Accept,
        }
    }

    // Word wrap wastes too much of the page for addresses.
    fn ask_output(&mut self, output: &OutputEntry) -> Decision {
        self.display.clear();
        self.buttons.wait_for_release();
        self.display.write_str("Send ");
        self.display.write_str(output.amount.as_str());
        self.display.write_str(" BTC to ");
        self.display.write_str(output.address.as_str());
        self.display.write_str("?");
        self.buttons.wait_for_press()
    }

    fn ask_fee(&mut self, fee: &str) -> Decision {
        self.display.clear();
        self.buttons.wait_for_release();
        self.display.write_str("Transaction fee:");
        self.display.next_line();
        self.display.write_str(fee);
        self.display.write_str(" BTC.");
        self.display.next_line();
        self.display.write_str("Is this okay?");
        self.buttons.wait_for_press()
    }

    /// Any button dismisses the notice; the answer is always Deny.
    fn acknowledge_unknown(&mut self, code: u8) -> Decision {
        log::warn!("unknown command code {}", code);
        self.display.clear();
        self.buttons.wait_for_release();
        self.display.write_str_word_wrap(UNKNOWN_COMMAND_PROMPT);
        let _ = self.buttons.wait_for_press();
        Decision::Deny
    }

    /// Wait for release, then a press: one page-turn gate.
    pub(crate) fn gate(&mut self) -> Decision {
        self.buttons.wait_for_release();
        self.buttons.wait_for_press()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_io::{RecordingDisplay, ScriptedButtons, SimulatedClock};
    use crate::DEBOUNCE_COUNT;
    use Decision::{Accept, Deny};

    type TestUi = UserInterface<RecordingDisplay, ScriptedButtons, SimulatedClock>;

    fn ui(script: ScriptedButtons) -> TestUi {
        UserInterface::new(
            RecordingDisplay::new(),
            Debouncer::new(script, SimulatedClock::new()),
        )
    }

    fn three_outputs() -> OutputStagingBuffer {
        let mut outputs = OutputStagingBuffer::new();
        outputs.stage("0.01", "1AAAA").unwrap();
        outputs.stage("0.02", "1BBBB").unwrap();
        outputs.stage("0.03", "1CCCC").unwrap();
        outputs
    }

    /// Number of prompts answered, judged by presses consumed from the script.
    fn prompts_answered(ui: &TestUi) -> u32 {
        ui.buttons().sampler().consumed() / (2 * DEBOUNCE_COUNT)
    }

    #[test]
    fn test_single_prompt_commands_follow_the_press() {
        let empty = OutputStagingBuffer::new();
        for command in [
            Command::NukeWallet,
            Command::NewAddress,
            Command::ChangeName,
            Command::BackupWallet,
            Command::RestoreWallet,
        ] {
            let mut accept = ui(ScriptedButtons::new().accept());
            assert_eq!(accept.confirm(command, &empty), Accept, "{command:?}");
            assert_eq!(accept.display().screens().len(), 1);

            let mut deny = ui(ScriptedButtons::new().cancel());
            assert_eq!(deny.confirm(command, &empty), Deny, "{command:?}");
        }
    }

    #[test]
    fn test_prompt_brackets_display_power() {
        let mut ui = ui(ScriptedButtons::new().accept());
        ui.confirm(Command::NewAddress, &OutputStagingBuffer::new());

        let events = ui.display().events();
        assert_eq!(events.first(), Some(&crate::DisplayEvent::Clear));
        assert_eq!(events.get(1), Some(&crate::DisplayEvent::On));
        assert_eq!(events.last(), Some(&crate::DisplayEvent::Off));
        assert!(!ui.display().is_on());
        // Before the prompt, at the prompt, after the verdict.
        assert_eq!(ui.display().clear_count(), 3);
        assert_eq!(ui.display().screens(), ["Create new address?"]);
    }

    #[test]
    fn test_sign_stops_at_first_denied_output() {
        let mut ui = ui(ScriptedButtons::new().answers(&[Accept, Deny]));
        let mut outputs = three_outputs();
        outputs.set_fee("0.0001");

        assert_eq!(ui.confirm(Command::SignTransaction, &outputs), Deny);
        assert_eq!(prompts_answered(&ui), 2);
        assert_eq!(ui.buttons().sampler().remaining(), 0);

        let screens = ui.display().screens();
        assert_eq!(
            screens,
            ["Send 0.01 BTC to 1AAAA?", "Send 0.02 BTC to 1BBBB?"]
        );
        assert!(!ui.display().text().contains("1CCCC"));
        assert!(!ui.display().text().contains("fee"));
    }

    #[test]
    fn test_sign_with_fee_needs_every_accept() {
        let mut outputs = OutputStagingBuffer::new();
        outputs.stage("1.5", "1First").unwrap();
        outputs.stage("2.5", "1Second").unwrap();
        outputs.set_fee("0.0005");

        let mut accepted = ui(ScriptedButtons::new().answers(&[Accept, Accept, Accept]));
        assert_eq!(accepted.confirm(Command::SignTransaction, &outputs), Accept);
        assert_eq!(prompts_answered(&accepted), 3);
        assert_eq!(
            accepted.display().screens().last().map(String::as_str),
            Some("Transaction fee:\n0.0005 BTC.\nIs this okay?")
        );

        let mut fee_denied = ui(ScriptedButtons::new().answers(&[Accept, Accept, Deny]));
        assert_eq!(fee_denied.confirm(Command::SignTransaction, &outputs), Deny);
    }

    #[test]
    fn test_sign_without_fee_skips_fee_prompt() {
        let mut ui = ui(ScriptedButtons::new().answers(&[Accept, Accept, Accept]));
        assert_eq!(ui.confirm(Command::SignTransaction, &three_outputs()), Accept);
        assert_eq!(ui.display().screens().len(), 3);
    }

    #[test]
    fn test_sign_empty_buffer_goes_straight_to_fee() {
        let mut outputs = OutputStagingBuffer::new();
        let mut no_prompts = ui(ScriptedButtons::new());
        assert_eq!(no_prompts.confirm(Command::SignTransaction, &outputs), Accept);
        assert!(no_prompts.display().screens().is_empty());

        outputs.set_fee("0.1");
        let mut fee_only = ui(ScriptedButtons::new().cancel());
        assert_eq!(fee_only.confirm(Command::SignTransaction, &outputs), Deny);
        assert_eq!(fee_only.display().screens().len(), 1);
    }

    #[test]
    fn test_format_cascade() {
        let empty = OutputStagingBuffer::new();

        let mut all = ui(ScriptedButtons::new().answers(&[Accept, Accept, Accept]));
        assert_eq!(all.confirm(Command::Format, &empty), Accept);
        assert_eq!(all.display().screens(), FORMAT_PROMPTS);

        let mut second_denied = ui(ScriptedButtons::new().answers(&[Accept, Deny]));
        assert_eq!(second_denied.confirm(Command::Format, &empty), Deny);
        assert_eq!(second_denied.display().screens(), &FORMAT_PROMPTS[..2]);

        let mut first_denied = ui(ScriptedButtons::new().cancel());
        assert_eq!(first_denied.confirm(Command::Format, &empty), Deny);
        assert_eq!(first_denied.display().screens().len(), 1);
    }

    #[test]
    fn test_unknown_is_denied_even_on_accept() {
        let mut ui = ui(ScriptedButtons::new().accept());
        let decision = ui.confirm(Command::from(0x42), &OutputStagingBuffer::new());
        assert_eq!(decision, Deny);
        assert_eq!(ui.display().screens(), [UNKNOWN_COMMAND_PROMPT]);
    }

    #[test]
    fn test_held_button_from_previous_prompt_is_ignored() {
        // Accept is still held when the second prompt appears; it only
        // counts once released and pressed again.
        let script = ScriptedButtons::new()
            .idle(DEBOUNCE_COUNT)
            .hold(crate::ButtonSample::ACCEPT, 500)
            .cancel();
        let mut ui = ui(script);
        let outputs = three_outputs();
        assert_eq!(ui.confirm(Command::SignTransaction, &outputs), Deny);
        assert_eq!(ui.display().screens().len(), 2);
    }

    #[test]
    fn test_shortest_window_cannot_sign_without_reading_buttons() {
        let config = crate::DebounceConfig::builder().samples(1).build().unwrap();
        let script = ScriptedButtons::new()
            .hold(crate::ButtonSample::IDLE, 1)
            .hold(crate::ButtonSample::CANCEL, 1);
        let mut ui = UserInterface::new(
            RecordingDisplay::new(),
            Debouncer::with_config(script, SimulatedClock::new(), config),
        );
        let mut outputs = OutputStagingBuffer::new();
        outputs.stage("5", "1Thief").unwrap();

        assert_eq!(ui.confirm(Command::SignTransaction, &outputs), Deny);
        assert_eq!(ui.buttons().sampler().consumed(), 2);
    }

    #[test]
    fn test_stream_error_renders_notice_and_halts() {
        let ui = ui(ScriptedButtons::new());
        let halted = ui.notify_stream_error();
        assert!(halted.display().is_on());
        assert_eq!(halted.display().screens(), [STREAM_ERROR_NOTICE]);
    }
}
