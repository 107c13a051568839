use core::fmt::Write;

use log::{info, warn};

use crate::cadence::Cadence;
use crate::config::{MAX_ACCESS_POINTS, WIFI_SCAN_CADENCE};
use crate::driver::{DriverError, PeriodicDriver, Step};
use crate::peripherals::{AccessPoint, ScanResults, WifiScanner};

/// Scans for access points and prints a ranked list on the console.
pub struct WifiScan<W, C> {
    radio: W,
    console: C,
    results: ScanResults,
    dropped: usize,
}

impl<W: WifiScanner, C: Write> WifiScan<W, C> {
    pub fn new(radio: W, console: C) -> Self {
        Self {
            radio,
            console,
            results: ScanResults::new(),
            dropped: 0,
        }
    }

    pub fn radio(&self) -> &W {
        &self.radio
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Results of the most recent scan, strongest first.
    pub fn last_results(&self) -> &[AccessPoint] {
        &self.results
    }

    /// Access points the most recent scan saw but could not report.
    pub fn dropped_last_scan(&self) -> usize {
        self.dropped
    }
}

impl<W: WifiScanner, C: Write> PeriodicDriver for WifiScan<W, C> {
    fn name(&self) -> &'static str {
        "wifi-scan"
    }

    fn cadence(&self) -> Cadence {
        WIFI_SCAN_CADENCE
    }

    async fn init(&mut self) -> Result<(), DriverError> {
        self.radio.start_station().await?;
        self.radio.disconnect().await?;
        writeln!(self.console, "Setup done")?;
        Ok(())
    }

    async fn step(&mut self) -> Result<Step, DriverError> {
        writeln!(self.console, "scan start")?;

        self.results.clear();
        self.dropped = self.radio.scan(&mut self.results).await?;
        if self.dropped > 0 {
            warn!(
                "scan saw {} access points, reporting the strongest {}",
                self.results.len() + self.dropped,
                MAX_ACCESS_POINTS
            );
        }
        self.results.sort_unstable_by(|a, b| b.rssi.cmp(&a.rssi));
        info!("scan found {} access points", self.results.len());

        write_scan_report(&mut self.console, &self.results)?;
        Ok(Step::Continue)
    }
}

/// Print the result block that follows `scan start`.
///
/// ```text
/// scan done
/// 2 networks found
/// 1: office (-41)*
/// 2: guest (-67)
///
/// ```
pub fn write_scan_report<C: Write>(
    console: &mut C,
    results: &[AccessPoint],
) -> Result<(), DriverError> {
    writeln!(console, "scan done")?;
    if results.is_empty() {
        writeln!(console, "no networks found")?;
    } else {
        writeln!(console, "{} networks found", results.len())?;
        for (rank, ap) in results.iter().enumerate() {
            let marker = if ap.auth.is_open() { ' ' } else { '*' };
            writeln!(console, "{}: {} ({}){}", rank + 1, ap.ssid, ap.rssi, marker)?;
        }
    }
    writeln!(console)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peripherals::AuthMode;
    use crate::runner::Runner;
    use crate::testing::{MockDelay, MockSystem, MockWifi, VirtualClock};
    use embassy_futures::block_on;
    use std::format;
    use std::string::String;
    use std::vec;
    use std::vec::Vec;

    fn weak_networks(count: usize) -> Vec<AccessPoint> {
        (0..count)
            .map(|i| AccessPoint::new(&format!("weak-{i}"), -90, 1, AuthMode::Wpa2))
            .collect()
    }

    #[test]
    fn test_setup_puts_radio_in_station_mode() {
        let mut scan = WifiScan::new(MockWifi::default(), String::new());

        block_on(scan.init()).unwrap();

        assert!(scan.radio().station_started);
        assert_eq!(scan.radio().disconnects, 1);
        assert_eq!(scan.console(), "Setup done\n");
    }

    #[test]
    fn test_no_networks() {
        let mut scan = WifiScan::new(MockWifi::default(), String::new());
        block_on(scan.init()).unwrap();

        block_on(scan.step()).unwrap();

        assert_eq!(
            scan.console(),
            "Setup done\nscan start\nscan done\nno networks found\n\n"
        );
    }

    #[test]
    fn test_networks_are_ranked_by_signal_with_secured_marker() {
        let mut radio = MockWifi::default();
        radio.batches.push_back(vec![
            AccessPoint::new("guest", -67, 6, AuthMode::Open),
            AccessPoint::new("office", -41, 1, AuthMode::Wpa2),
            AccessPoint::new("lab", -80, 11, AuthMode::Wpa2Wpa3),
        ]);
        let mut scan = WifiScan::new(radio, String::new());
        block_on(scan.init()).unwrap();

        block_on(scan.step()).unwrap();

        let expected = "Setup done\n\
                        scan start\n\
                        scan done\n\
                        3 networks found\n\
                        1: office (-41)*\n\
                        2: guest (-67) \n\
                        3: lab (-80)*\n\
                        \n";
        assert_eq!(scan.console(), expected);
        assert_eq!(scan.last_results()[0].ssid.as_str(), "office");
    }

    #[test]
    fn test_each_scan_replaces_previous_results() {
        let mut radio = MockWifi::default();
        radio
            .batches
            .push_back(vec![AccessPoint::new("first", -50, 1, AuthMode::Open)]);
        let scan = WifiScan::new(radio, String::new());
        let clock = VirtualClock::new();
        let mut runner = Runner::new(scan, MockDelay::new(&clock), MockSystem);

        block_on(runner.run_for(2)).unwrap();

        assert!(runner.driver().last_results().is_empty());
        assert_eq!(runner.driver().radio().scans, 2);
        assert_eq!(clock.now_micros(), 2 * 5_000_000);
        assert!(runner.driver().console().ends_with("no networks found\n\n"));
    }

    #[test]
    fn test_scan_failure_propagates() {
        let mut radio = MockWifi::default();
        radio.fail_scan = true;
        let mut scan = WifiScan::new(radio, String::new());

        let err = block_on(scan.step()).unwrap_err();

        assert_eq!(err, DriverError::peripheral("mock wifi", "scan"));
    }

    #[test]
    fn test_long_ssid_is_truncated() {
        let ap = AccessPoint::new(
            "this-network-name-is-longer-than-thirty-two-bytes",
            -30,
            3,
            AuthMode::Wpa3,
        );
        assert_eq!(ap.ssid.len(), 32);
    }

    #[test]
    fn test_overflow_keeps_strongest_networks() {
        let mut batch = weak_networks(MAX_ACCESS_POINTS);
        batch.push(AccessPoint::new("strongest", -20, 6, AuthMode::Open));
        let mut radio = MockWifi::default();
        radio.batches.push_back(batch);
        let mut scan = WifiScan::new(radio, String::new());

        block_on(scan.step()).unwrap();

        let results = scan.last_results();
        assert_eq!(results.len(), MAX_ACCESS_POINTS);
        assert_eq!(results[0].ssid.as_str(), "strongest");
        assert_eq!(scan.dropped_last_scan(), 1);
        assert!(scan.console().contains("\n32 networks found\n"));
        assert!(scan.console().contains("\n1: strongest (-20) \n"));
        assert!(!scan.console().contains("33:"));
    }

    #[test]
    fn test_exactly_full_scan_drops_nothing() {
        let mut radio = MockWifi::default();
        radio.batches.push_back(weak_networks(MAX_ACCESS_POINTS));
        let mut scan = WifiScan::new(radio, String::new());

        block_on(scan.step()).unwrap();

        assert_eq!(scan.last_results().len(), MAX_ACCESS_POINTS);
        assert_eq!(scan.dropped_last_scan(), 0);
    }
}
