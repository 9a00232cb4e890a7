//! Application supervisor and monitoring
//!
//! Prints the startup banner and, while the main loop runs, a status line
//! once every [`STATUS_INTERVAL_SECS`].

use embassy_time::{Duration, Instant};

use crate::config::{self, STATUS_INTERVAL_SECS};
use crate::types::APP_VERSION;

/// Loop health at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    pub active_layer: usize,
    pub brightness: f32,
    pub dropped_reports: u32,
}

pub struct AppSupervisor {
    started_at: Instant,
    last_heartbeat: Instant,
    interval: Duration,
    ticks: u32,
}

impl AppSupervisor {
    pub fn new(now: Instant) -> Self {
        Self::with_interval(now, Duration::from_secs(STATUS_INTERVAL_SECS))
    }

    pub fn with_interval(now: Instant, interval: Duration) -> Self {
        Self {
            started_at: now,
            last_heartbeat: now,
            interval,
            ticks: 0,
        }
    }

    /// Print application startup banner with keypad information
    pub fn print_startup_banner(&self, layers: usize, brightness: f32) {
        info!("========================================");
        info!("MacroDeck v{}", APP_VERSION.as_string());
        info!("Layered macro keypad firmware");
        info!("========================================");
        info!("Hardware: Adafruit MacroPad RP2040");
        info!("USB: VID=0x{:04X} PID=0x{:04X}", config::USB_VID, config::USB_PID);
        info!(
            "Keys: {} ({}x{} layout), {} layer(s)",
            config::KEY_COUNT,
            config::KEY_COLS,
            config::KEY_ROWS,
            layers
        );
        info!("Display: {}x{} OLED", config::DISPLAY_WIDTH, config::DISPLAY_HEIGHT);
        info!("Brightness: {}", brightness);
        info!("========================================");
    }

    /// Count one loop pass. Returns true when a status line was printed.
    pub fn tick(&mut self, now: Instant, status: Status) -> bool {
        self.ticks = self.ticks.wrapping_add(1);

        if now.saturating_duration_since(self.last_heartbeat) < self.interval {
            return false;
        }
        self.last_heartbeat = now;
        self.print_status(now, status);
        true
    }

    /// Loop passes since start.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Get current uptime in seconds
    pub fn uptime(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.started_at).as_secs()
    }

    fn print_status(&self, now: Instant, status: Status) {
        let minutes = self.uptime(now) / 60;
        let hours = minutes / 60;

        if hours > 0 {
            info!("Status: Uptime {}h{}m", hours, minutes % 60);
        } else {
            info!("Status: Uptime {}m", minutes);
        }
        info!(
            "Status: layer {}, brightness {}, {} loop passes, {} HID reports dropped",
            status.active_layer, status.brightness, self.ticks, status.dropped_reports
        );
    }
}
