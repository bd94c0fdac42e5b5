//! Host-side scenario test harness for scripted confirmation flows.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use embedded_graphics::pixelcolor::BinaryColor;
use hwb_ui::storage_layout::{record_address, WALLET_RECORD_LENGTH};
use hwb_ui::test_display::TestDisplay;
use hwb_ui::{
    BackupError, Command, Debouncer, Decision, DeviceId, EepromImage, NonVolatileStorage,
    NvError, OutputStagingBuffer, PromptDisplay, ScriptedButtons, SimulatedClock, TextDisplay,
    UserInterface, SEED_LENGTH,
};
use png::{BitDepth, ColorType, Encoder};

/// A full wallet record as the storage engine writes it
pub type WalletRecord = [u8; WALLET_RECORD_LENGTH as usize];

/// One page as it looked right before the display cleared it.
#[derive(Debug, Clone)]
pub struct CapturedPage {
    pub lines: Vec<String>,
    frame: Vec<BinaryColor>,
}

impl CapturedPage {
    /// Page text with lines joined by `'\n'` and blank lines dropped
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .filter(|l| !l.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn black_pixel_count(&self) -> usize {
        self.frame.iter().filter(|p| **p == BinaryColor::On).count()
    }
}

/// Text display on a test framebuffer that keeps every finished page.
pub struct CapturingDisplay {
    inner: TextDisplay<TestDisplay>,
    pages: Vec<CapturedPage>,
}

impl CapturingDisplay {
    pub fn new() -> Self {
        Self {
            inner: TextDisplay::new(TestDisplay::default_size()),
            pages: Vec::new(),
        }
    }

    /// Lines currently on the page
    pub fn current_lines(&self) -> Vec<String> {
        self.inner.lines()
    }

    pub fn is_on(&self) -> bool {
        self.inner.is_on()
    }

    fn capture(&mut self) {
        let lines = self.inner.lines();
        if lines.iter().all(|l| l.is_empty()) {
            return;
        }
        self.pages.push(CapturedPage {
            lines,
            frame: self.inner.target().pixels().to_vec(),
        });
    }
}

impl Default for CapturingDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptDisplay for CapturingDisplay {
    fn clear(&mut self) {
        self.capture();
        self.inner.clear();
    }

    fn display_on(&mut self) {
        self.inner.display_on();
    }

    fn display_off(&mut self) {
        self.inner.display_off();
    }

    fn write_str(&mut self, text: &str) {
        self.inner.write_str(text);
    }

    fn write_str_word_wrap(&mut self, text: &str) {
        self.inner.write_str_word_wrap(text);
    }

    fn next_line(&mut self) {
        self.inner.next_line();
    }

    fn cursor_at_end(&self) -> bool {
        self.inner.cursor_at_end()
    }
}

type HarnessUi<'a> = UserInterface<&'a mut CapturingDisplay, ScriptedButtons, SimulatedClock>;

/// Couples the prompt display, the staging buffer and an EEPROM image.
///
/// Every flow takes the button script that answers it. Answers left unused
/// by a flow are counted rather than carried over to the next one.
pub struct ScenarioHarness {
    display: CapturingDisplay,
    outputs: OutputStagingBuffer,
    storage: EepromImage,
    unused_samples: u32,
    elapsed_ms: u64,
}

impl ScenarioHarness {
    pub fn new() -> Self {
        Self {
            display: CapturingDisplay::new(),
            outputs: OutputStagingBuffer::new(),
            storage: EepromImage::new(),
            unused_samples: 0,
            elapsed_ms: 0,
        }
    }

    /// Staging buffer, as the transaction parser sees it
    pub fn outputs_mut(&mut self) -> &mut OutputStagingBuffer {
        &mut self.outputs
    }

    pub fn storage(&self) -> &EepromImage {
        &self.storage
    }

    fn run<R>(&mut self, script: ScriptedButtons, flow: impl FnOnce(&mut HarnessUi<'_>) -> R) -> R {
        let mut ui = UserInterface::new(
            &mut self.display,
            Debouncer::new(script, SimulatedClock::new()),
        );
        let result = flow(&mut ui);
        let (_, buttons) = ui.release();
        let (script, clock) = buttons.release();
        self.unused_samples = script.remaining();
        self.elapsed_ms += clock.elapsed_ms();
        result
    }

    /// Run `confirm(command)` against the staged outputs.
    pub fn confirm(&mut self, command: Command, script: ScriptedButtons) -> Decision {
        let outputs = self.outputs.clone();
        self.run(script, |ui| ui.confirm(command, &outputs))
    }

    pub fn present_backup(
        &mut self,
        seed: &[u8; SEED_LENGTH],
        is_encrypted: bool,
        destination: DeviceId,
        script: ScriptedButtons,
    ) -> Result<(), BackupError> {
        self.run(script, |ui| {
            ui.present_backup_seed(seed, is_encrypted, destination)
        })
    }

    /// Confirm [`Command::Format`] and erase storage if accepted.
    pub fn format_storage(&mut self, script: ScriptedButtons) -> Decision {
        let decision = self.confirm(Command::Format, script);
        if decision.is_accepted() {
            self.storage.erase();
        }
        decision
    }

    /// Confirm [`Command::NukeWallet`] and write `record` into slot `index`
    /// if accepted.
    pub fn replace_wallet(
        &mut self,
        index: u32,
        record: &WalletRecord,
        script: ScriptedButtons,
    ) -> Result<Decision, NvError> {
        let decision = self.confirm(Command::NukeWallet, script);
        if decision.is_accepted() {
            self.storage.write(record_address(index), record)?;
            self.storage.flush()?;
        }
        Ok(decision)
    }

    /// Read wallet slot `index` back from storage.
    pub fn wallet(&mut self, index: u32) -> Result<WalletRecord, NvError> {
        let mut record = [0u8; WALLET_RECORD_LENGTH as usize];
        self.storage.read(record_address(index), &mut record)?;
        Ok(record)
    }

    /// Show the halting notice and return what stays on the panel.
    pub fn stream_error(&mut self) -> Vec<String> {
        let ui = UserInterface::new(
            &mut self.display,
            Debouncer::new(ScriptedButtons::new(), SimulatedClock::new()),
        );
        ui.notify_stream_error().display().current_lines()
    }

    /// Every page shown so far, oldest first
    pub fn pages(&self) -> &[CapturedPage] {
        &self.display.pages
    }

    pub fn page_texts(&self) -> Vec<String> {
        self.display.pages.iter().map(CapturedPage::text).collect()
    }

    /// Forget captured pages before the next flow.
    pub fn forget_pages(&mut self) {
        self.display.pages.clear();
    }

    pub fn display(&self) -> &CapturingDisplay {
        &self.display
    }

    /// Samples the last flow left unread
    pub fn unused_samples(&self) -> u32 {
        self.unused_samples
    }

    /// Simulated time spent waiting on buttons across all flows
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Save captured page `index` to a PNG (white = Off, black = On).
    pub fn save_screenshot_png(&self, index: usize, path: impl AsRef<Path>) -> Result<(), String> {
        let page = self
            .display
            .pages
            .get(index)
            .ok_or_else(|| format!("no captured page {index}"))?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let (width, height) = self.display.inner.target().dimensions();
        let data: Vec<u8> = page
            .frame
            .iter()
            .map(|pixel| match pixel {
                BinaryColor::On => 0u8,
                BinaryColor::Off => 255u8,
            })
            .collect();

        let file = File::create(path).map_err(|e| e.to_string())?;
        let writer = BufWriter::new(file);
        let mut encoder = Encoder::new(writer, width, height);
        encoder.set_color(ColorType::Grayscale);
        encoder.set_depth(BitDepth::Eight);
        let mut png_writer = encoder.write_header().map_err(|e| e.to_string())?;
        png_writer
            .write_image_data(&data)
            .map_err(|e| e.to_string())
    }
}

impl Default for ScenarioHarness {
    fn default() -> Self {
        Self::new()
    }
}
