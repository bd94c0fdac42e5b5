//! Desktop SDL simulator for the confirmation prompts.
//!
//! Runs one scenario against a simulated 128x64 panel with the keyboard
//! standing in for the two buttons.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    sdl2::Keycode, BinaryColorTheme, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent,
    Window,
};
use embedded_hal::delay::DelayNs;
use hwb_ui::{
    ButtonSample, ButtonSampler, Command, Debouncer, DeviceId, OutputStagingBuffer,
    TextDisplay, UserInterface, DISPLAY_HEIGHT, DISPLAY_WIDTH, SEED_LENGTH,
};

/// Samples between window refreshes (about 60 Hz at the 1 ms tick)
const FRAME_SAMPLES: u32 = 16;

#[derive(Parser)]
#[command(name = "hwb-sim")]
#[command(about = "Hardware wallet confirmation prompt simulator")]
struct Cli {
    /// Flow to run
    #[arg(long, value_enum, default_value_t = Scenario::Sign)]
    scenario: Scenario,

    /// Pixel scale of the simulated panel
    #[arg(long, default_value_t = 4)]
    scale: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scenario {
    /// Two outputs and a fee
    Sign,
    /// Three-step storage format
    Format,
    /// Page through a backup seed
    Backup,
    /// Command code the device does not know
    Unknown,
}

struct SimPanel {
    window: Window,
    display: SimulatorDisplay<BinaryColor>,
    accept: bool,
    cancel: bool,
}

impl SimPanel {
    /// Push the framebuffer to the window and apply pending key events.
    fn refresh(&mut self) {
        self.window.update(&self.display);
        let events = self.window.events().collect::<Vec<_>>();
        for event in events {
            match event {
                SimulatorEvent::Quit => {
                    log::info!("window closed");
                    std::process::exit(0);
                }
                SimulatorEvent::KeyDown { keycode, .. } => self.set_key(keycode, true),
                SimulatorEvent::KeyUp { keycode, .. } => self.set_key(keycode, false),
                _ => {}
            }
        }
    }

    fn set_key(&mut self, keycode: Keycode, down: bool) {
        match keycode {
            Keycode::Return | Keycode::A => self.accept = down,
            Keycode::Backspace | Keycode::C => self.cancel = down,
            _ => {}
        }
    }
}

/// Draw target handle shared with the button poller
struct SharedTarget(Rc<RefCell<SimPanel>>);

impl DrawTarget for SharedTarget {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.0.borrow_mut().display.draw_iter(pixels)
    }
}

impl OriginDimensions for SharedTarget {
    fn size(&self) -> Size {
        self.0.borrow().display.size()
    }
}

/// Keyboard as the two buttons
struct WindowButtons {
    panel: Rc<RefCell<SimPanel>>,
    samples: u32,
}

impl ButtonSampler for WindowButtons {
    fn sample(&mut self) -> ButtonSample {
        let mut panel = self.panel.borrow_mut();
        if self.samples % FRAME_SAMPLES == 0 {
            panel.refresh();
        }
        self.samples = self.samples.wrapping_add(1);
        ButtonSample {
            accept: panel.accept,
            cancel: panel.cancel,
        }
    }
}

struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

fn demo_outputs() -> OutputStagingBuffer {
    let mut outputs = OutputStagingBuffer::new();
    for (amount, address) in [
        ("0.25", "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2"),
        ("1.1", "3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy"),
    ] {
        if outputs.stage(amount, address).is_err() {
            log::warn!("demo output {} dropped", address);
        }
    }
    outputs.set_fee("0.0001");
    outputs
}

fn demo_seed() -> [u8; SEED_LENGTH] {
    core::array::from_fn(|i| (i as u8).wrapping_mul(37).wrapping_add(11))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let output_settings = OutputSettingsBuilder::new()
        .scale(cli.scale)
        .theme(BinaryColorTheme::OledBlue)
        .build();
    let panel = Rc::new(RefCell::new(SimPanel {
        window: Window::new("Hardware wallet", &output_settings),
        display: SimulatorDisplay::new(Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)),
        accept: false,
        cancel: false,
    }));

    println!("Hardware wallet simulator ({:?})", cli.scenario);
    println!("Controls:");
    println!("  Return / A     - Accept");
    println!("  Backspace / C  - Cancel");
    println!("  Close window   - Quit");

    let buttons = WindowButtons {
        panel: Rc::clone(&panel),
        samples: 0,
    };
    let mut ui = UserInterface::new(
        TextDisplay::new(SharedTarget(Rc::clone(&panel))),
        Debouncer::new(buttons, StdDelay),
    );

    match cli.scenario {
        Scenario::Sign => {
            let decision = ui.confirm(Command::SignTransaction, &demo_outputs());
            println!("sign transaction: {decision}");
        }
        Scenario::Format => {
            let decision = ui.confirm(Command::Format, &OutputStagingBuffer::new());
            println!("format: {decision}");
        }
        Scenario::Backup => match ui.present_backup_seed(&demo_seed(), false, DeviceId::DISPLAY) {
            Ok(()) => println!("backup: shown"),
            Err(e) => println!("backup: {e}"),
        },
        Scenario::Unknown => {
            let decision = ui.confirm(Command::from(0x42), &OutputStagingBuffer::new());
            println!("unknown command: {decision}");
        }
    }

    // Keep the window up until it is closed.
    loop {
        panel.borrow_mut().refresh();
        thread::sleep(Duration::from_millis(16));
    }
}
