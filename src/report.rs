//! # Report Task (Task 3)
//!
//! Closes the reporting window: snapshots the counters, resets them and
//! writes a fixed-format summary to the console.
//!
//! ```text
//! ===== [10s Report] =====
//! Total presses    : 4
//! Short presses    : 3  (< 500 ms)
//! Long presses     : 1  (>= 500 ms)
//! Average duration : 412 ms
//! ========================
//! ```
//!
//! Lines end in `\r\n` for serial terminals, and each report is preceded
//! by a blank line.

use core::fmt::Write;

use crate::config::{
    BUTTON_TASK_PERIOD_MS, REPORT_TASK_PERIOD_MS, SHORT_PRESS_THRESHOLD_MS, TASK_COUNT,
};
use crate::error::Error;
use crate::kernel::Shared;
use crate::stats::Counters;
use crate::task::Task;
use crate::time::Millis;

/// Write one report for `counters`.
pub fn write_report<W: Write + ?Sized>(
    sink: &mut W,
    counters: &Counters,
    window_ms: Millis,
    threshold_ms: Millis,
) -> core::fmt::Result {
    write!(sink, "\r\n===== [{}s Report] =====\r\n", window_ms / 1000)?;
    write!(sink, "Total presses    : {}\r\n", counters.total_presses)?;
    write!(
        sink,
        "Short presses    : {}  (< {} ms)\r\n",
        counters.short_presses, threshold_ms
    )?;
    write!(
        sink,
        "Long presses     : {}  (>= {} ms)\r\n",
        counters.long_presses, threshold_ms
    )?;
    write!(sink, "Average duration : {} ms\r\n", counters.average_ms())?;
    sink.write_str("========================\r\n")
}

/// Write the startup banner describing the LED legend and cadence.
pub fn write_banner<W: Write + ?Sized>(sink: &mut W) -> core::fmt::Result {
    const RULE: &str = "========================================\r\n";

    sink.write_str("\r\n")?;
    sink.write_str(RULE)?;
    sink.write_str("  Button Press Monitor\r\n")?;
    sink.write_str("  Non-Preemptive Task Scheduler\r\n")?;
    write!(
        sink,
        "  Tasks: {} | Tick base: {} ms\r\n",
        TASK_COUNT, BUTTON_TASK_PERIOD_MS
    )?;
    sink.write_str(RULE)?;
    write!(sink, "GREEN  LED  = short press (< {} ms)\r\n", SHORT_PRESS_THRESHOLD_MS)?;
    write!(sink, "RED    LED  = long press  (>= {} ms)\r\n", SHORT_PRESS_THRESHOLD_MS)?;
    sink.write_str("YELLOW LED  = activity blink\r\n")?;
    write!(sink, "Report interval: {} seconds\r\n", REPORT_TASK_PERIOD_MS / 1000)?;
    sink.write_str(RULE)?;
    sink.write_str("\r\n")
}

/// Task 3: periodic report and window reset.
pub struct ReportTask<W> {
    sink: W,
    window_ms: Millis,
    threshold_ms: Millis,
}

impl<W: Write> ReportTask<W> {
    pub fn new(sink: W, window_ms: Millis, threshold_ms: Millis) -> Self {
        Self {
            sink,
            window_ms,
            threshold_ms,
        }
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn into_sink(self) -> W {
        self.sink
    }
}

impl<W: Write> Task<Shared> for ReportTask<W> {
    fn run(&mut self, _now: Millis, shared: &mut Shared) -> Result<(), Error> {
        // The window closes here even if the console rejects the report.
        let snapshot = shared.counters.take();
        info!(
            "report: {} presses, avg {} ms",
            snapshot.total_presses,
            snapshot.average_ms()
        );
        write_report(&mut self.sink, &snapshot, self.window_ms, self.threshold_ms)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::PressEvent;
    use core::fmt;

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_report_format() {
        let counters = Counters {
            total_presses: 4,
            short_presses: 3,
            long_presses: 1,
            total_duration_ms: 1_650,
        };
        let mut out = String::new();
        write_report(&mut out, &counters, 10_000, 500).unwrap();

        assert_eq!(
            out,
            "\r\n===== [10s Report] =====\r\n\
             Total presses    : 4\r\n\
             Short presses    : 3  (< 500 ms)\r\n\
             Long presses     : 1  (>= 500 ms)\r\n\
             Average duration : 412 ms\r\n\
             ========================\r\n"
        );
    }

    #[test]
    fn test_empty_window_reports_zero_average() {
        let mut out = String::new();
        write_report(&mut out, &Counters::new(), 10_000, 500).unwrap();
        assert!(out.contains("Total presses    : 0\r\n"));
        assert!(out.contains("Average duration : 0 ms\r\n"));
    }

    #[test]
    fn test_run_reports_and_resets() {
        let mut task = ReportTask::new(String::new(), 10_000, 500);
        let mut shared = Shared::new();
        for ms in [200, 300, 400] {
            shared.counters.record(&PressEvent::new(ms, 500));
        }

        task.run(12_000, &mut shared).unwrap();

        assert_eq!(shared.counters, Counters::new());
        assert!(task.sink().contains("Total presses    : 3\r\n"));
        assert!(task.sink().contains("Average duration : 300 ms\r\n"));
    }

    #[test]
    fn test_consecutive_windows_are_independent() {
        let mut task = ReportTask::new(String::new(), 10_000, 500);
        let mut shared = Shared::new();
        shared.counters.record(&PressEvent::new(900, 500));
        task.run(0, &mut shared).unwrap();
        task.sink_mut().clear();

        task.run(10_000, &mut shared).unwrap();
        assert!(task.sink().contains("Total presses    : 0\r\n"));
        assert!(task.sink().contains("Long presses     : 0  (>= 500 ms)\r\n"));
    }

    #[test]
    fn test_sink_failure_still_closes_window() {
        let mut task = ReportTask::new(BrokenSink, 10_000, 500);
        let mut shared = Shared::new();
        shared.counters.record(&PressEvent::new(100, 500));

        assert_eq!(task.run(0, &mut shared), Err(Error::Sink));
        assert!(shared.counters.is_empty());
    }

    #[test]
    fn test_banner_mentions_legend_and_interval() {
        let mut out = String::new();
        write_banner(&mut out).unwrap();
        assert!(out.contains("Tasks: 3 | Tick base: 10 ms\r\n"));
        assert!(out.contains("GREEN  LED  = short press (< 500 ms)\r\n"));
        assert!(out.contains("RED    LED  = long press  (>= 500 ms)\r\n"));
        assert!(out.contains("Report interval: 10 seconds\r\n"));
    }
}
