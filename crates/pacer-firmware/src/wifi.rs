//! Station-mode scanning on the `esp-radio` Wi-Fi controller

use esp_radio::wifi::{AuthMethod, ClientConfig, ModeConfig, ScanConfig, WifiController};
use log::{debug, error, info};
use pacer_core::DriverError;
use pacer_core::peripherals::{
    AccessPoint, AuthMode, ScanResults, WifiScanner, push_strongest,
};

pub struct RadioScanner<'d> {
    controller: WifiController<'d>,
}

impl<'d> RadioScanner<'d> {
    pub fn new(controller: WifiController<'d>) -> Self {
        Self { controller }
    }
}

fn auth_mode(method: Option<AuthMethod>) -> AuthMode {
    match method {
        None | Some(AuthMethod::None) => AuthMode::Open,
        Some(AuthMethod::Wep) => AuthMode::Wep,
        Some(AuthMethod::Wpa) => AuthMode::Wpa,
        Some(AuthMethod::Wpa2Personal) => AuthMode::Wpa2,
        Some(AuthMethod::WpaWpa2Personal) => AuthMode::WpaWpa2,
        Some(AuthMethod::Wpa2Enterprise) => AuthMode::Wpa2Enterprise,
        Some(AuthMethod::Wpa3Personal) => AuthMode::Wpa3,
        Some(AuthMethod::Wpa2Wpa3Personal) => AuthMode::Wpa2Wpa3,
        Some(AuthMethod::WapiPersonal) => AuthMode::Wapi,
        #[allow(unreachable_patterns)]
        Some(_) => AuthMode::Unknown,
    }
}

impl WifiScanner for RadioScanner<'_> {
    async fn start_station(&mut self) -> Result<(), DriverError> {
        self.controller
            .set_config(&ModeConfig::Client(ClientConfig::default()))
            .map_err(|e| {
                error!("Wi-Fi station config failed: {:?}", e);
                DriverError::peripheral("Wi-Fi", "enter station mode")
            })?;
        self.controller.start_async().await.map_err(|e| {
            error!("Wi-Fi start failed: {:?}", e);
            DriverError::peripheral("Wi-Fi", "start radio")
        })?;
        info!("Wi-Fi started in station mode");
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), DriverError> {
        // A fresh boot has no association to drop and the controller reports
        // that as an error; there is nothing to recover from here.
        if let Err(e) = self.controller.disconnect_async().await {
            debug!("Wi-Fi disconnect: {:?}", e);
        }
        Ok(())
    }

    async fn scan(&mut self, into: &mut ScanResults) -> Result<usize, DriverError> {
        let found = self
            .controller
            .scan_with_config_async(ScanConfig::default())
            .await
            .map_err(|e| {
                error!("Wi-Fi scan failed: {:?}", e);
                DriverError::peripheral("Wi-Fi", "scan")
            })?;

        // The radio reports in channel order, not by signal.
        let mut dropped = 0;
        for info in found.iter() {
            let ap = AccessPoint::new(
                info.ssid.as_str(),
                info.signal_strength,
                info.channel,
                auth_mode(info.auth_method),
            );
            if !push_strongest(into, ap) {
                dropped += 1;
            }
        }
        Ok(dropped)
    }
}
