//! Inter-task communication channels
//!
//! The main loop and the USB task only share HID reports.

use embassy_sync::blocking_mutex::raw::{RawMutex, ThreadModeRawMutex};
use embassy_sync::channel::{Channel, Sender};

use crate::config::HID_REPORT_QUEUE_SIZE;
use crate::hid::{HidReport, ReportQueue};

/// Reports from the main loop to the USB task.
pub static HID_REPORT_CHANNEL: Channel<ThreadModeRawMutex, HidReport, HID_REPORT_QUEUE_SIZE> = Channel::new();

/// Never waits: a full channel drops the report.
impl<M: RawMutex, const N: usize> ReportQueue for Sender<'_, M, HidReport, N> {
    fn push_report(&mut self, report: HidReport) -> bool {
        self.try_send(report).is_ok()
    }
}
