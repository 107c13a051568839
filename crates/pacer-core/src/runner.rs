//! Drives a [`PeriodicDriver`]: one setup, then step and sleep forever
//!
//! The runner owns the driver, the delay source and the system handle. It is
//! the only place that sleeps, and the only place that decides what happens
//! when a driver fails: errors are logged and the device is restarted (or
//! halted), never retried in-program.

use embedded_hal_async::delay::DelayNs;
use log::{error, info, warn};
use thiserror_no_std::Error;

use crate::cadence::Cadence;
use crate::driver::{DriverError, PeriodicDriver, Step};

/// Reboot/halt hooks provided by the platform.
pub trait SystemControl {
    /// Reset the chip. Never returns.
    fn restart(&mut self) -> !;

    /// Stop doing anything useful. Never returns.
    fn halt(&mut self) -> ! {
        loop {
            core::hint::spin_loop();
        }
    }
}

/// What to do when `init` or `step` fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FatalAction {
    #[default]
    Restart,
    Halt,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunError {
    #[error("{driver} setup failed: {error}")]
    Init {
        driver: &'static str,
        error: DriverError,
    },
    #[error("{driver} step {index} failed: {error}")]
    Step {
        driver: &'static str,
        index: u32,
        error: DriverError,
    },
}

/// Summary of a bounded [`Runner::run_for`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Steps completed during this call.
    pub steps: u32,
    /// The last step asked for a reboot.
    pub restart_requested: bool,
}

pub struct Runner<D, T, S> {
    driver: D,
    delay: T,
    system: S,
    on_fatal: FatalAction,
    initialized: bool,
    steps: u32,
}

impl<D, T, S> Runner<D, T, S>
where
    D: PeriodicDriver,
    T: DelayNs,
    S: SystemControl,
{
    pub fn new(driver: D, delay: T, system: S) -> Self {
        Self {
            driver,
            delay,
            system,
            on_fatal: FatalAction::default(),
            initialized: false,
            steps: 0,
        }
    }

    pub fn with_fatal_action(mut self, on_fatal: FatalAction) -> Self {
        self.on_fatal = on_fatal;
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    /// Total steps completed since the runner was created.
    pub fn steps_taken(&self) -> u32 {
        self.steps
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    async fn ensure_init(&mut self) -> Result<(), RunError> {
        if self.initialized {
            return Ok(());
        }

        let name = self.driver.name();
        info!("{}: setup", name);
        self.driver.init().await.map_err(|error| RunError::Init {
            driver: name,
            error,
        })?;
        self.initialized = true;
        info!("{}: ready, stepping every {}", name, self.driver.cadence());
        Ok(())
    }

    /// Run setup if it has not run yet, then at most `max_steps` steps.
    ///
    /// Every step that returns [`Step::Continue`] is followed by one cadence
    /// of delay. Returns early when a step requests a restart.
    pub async fn run_for(&mut self, max_steps: u32) -> Result<RunReport, RunError> {
        self.ensure_init().await?;

        let name = self.driver.name();
        let mut taken = 0;
        while taken < max_steps {
            let index = self.steps;
            let outcome = self.driver.step().await.map_err(|error| RunError::Step {
                driver: name,
                index,
                error,
            })?;
            self.steps = self.steps.wrapping_add(1);
            taken += 1;

            match outcome {
                Step::Restart => {
                    return Ok(RunReport {
                        steps: taken,
                        restart_requested: true,
                    });
                }
                Step::Continue => pace(&mut self.delay, self.driver.cadence()).await,
            }
        }

        Ok(RunReport {
            steps: taken,
            restart_requested: false,
        })
    }

    /// Run the driver forever. Only leaves through a restart or a halt.
    pub async fn run(mut self) -> ! {
        loop {
            match self.run_for(u32::MAX).await {
                Ok(report) if report.restart_requested => {
                    info!("{}: restart requested", self.driver.name());
                    self.system.restart();
                }
                Ok(_) => continue,
                Err(e) => {
                    error!("{}", e);
                    self.fatal();
                }
            }
        }
    }

    fn fatal(&mut self) -> ! {
        match self.on_fatal {
            FatalAction::Restart => {
                warn!("{}: unrecoverable error, restarting", self.driver.name());
                self.system.restart()
            }
            FatalAction::Halt => {
                warn!("{}: unrecoverable error, halting", self.driver.name());
                self.system.halt()
            }
        }
    }
}

/// Sleep for exactly one cadence, splitting it when it does not fit the
/// `u32` arguments of [`DelayNs`].
async fn pace<T: DelayNs>(delay: &mut T, cadence: Cadence) {
    let micros = cadence.as_micros();
    if let Ok(us) = u32::try_from(micros) {
        delay.delay_us(us).await;
        return;
    }

    let mut millis = micros / 1000;
    while millis > 0 {
        let chunk = millis.min(u64::from(u32::MAX)) as u32;
        delay.delay_ms(chunk).await;
        millis -= u64::from(chunk);
    }
    let rest = (micros % 1000) as u32;
    if rest > 0 {
        delay.delay_us(rest).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockDelay, MockSystem, VirtualClock};
    use embassy_futures::block_on;

    /// Counts calls and fails on demand.
    struct CountingDriver {
        cadence: Cadence,
        inits: u32,
        steps: u32,
        fail_init: bool,
        fail_at_step: Option<u32>,
        restart_at_step: Option<u32>,
    }

    impl CountingDriver {
        fn new(cadence: Cadence) -> Self {
            Self {
                cadence,
                inits: 0,
                steps: 0,
                fail_init: false,
                fail_at_step: None,
                restart_at_step: None,
            }
        }
    }

    impl PeriodicDriver for CountingDriver {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn cadence(&self) -> Cadence {
            self.cadence
        }

        async fn init(&mut self) -> Result<(), DriverError> {
            self.inits += 1;
            if self.fail_init {
                return Err(DriverError::peripheral("mock", "init"));
            }
            Ok(())
        }

        async fn step(&mut self) -> Result<Step, DriverError> {
            assert!(self.inits > 0, "step called before init");
            let index = self.steps;
            self.steps += 1;
            if self.fail_at_step == Some(index) {
                return Err(DriverError::peripheral("mock", "step"));
            }
            if self.restart_at_step == Some(index) {
                return Ok(Step::Restart);
            }
            Ok(Step::Continue)
        }
    }

    #[test]
    fn test_init_runs_once_across_calls() {
        let clock = VirtualClock::new();
        let driver = CountingDriver::new(Cadence::from_millis(10));
        let mut runner = Runner::new(driver, MockDelay::new(&clock), MockSystem::default());

        let first = block_on(runner.run_for(3)).unwrap();
        let second = block_on(runner.run_for(2)).unwrap();

        assert_eq!(first.steps, 3);
        assert_eq!(second.steps, 2);
        assert_eq!(runner.driver().inits, 1);
        assert_eq!(runner.steps_taken(), 5);
    }

    #[test]
    fn test_delay_follows_every_continuing_step() {
        let clock = VirtualClock::new();
        let driver = CountingDriver::new(Cadence::from_millis(250));
        let mut runner = Runner::new(driver, MockDelay::new(&clock), MockSystem::default());

        block_on(runner.run_for(4)).unwrap();

        assert_eq!(clock.now_micros(), 4 * 250_000);
        assert_eq!(clock.sleeps(), 4);
    }

    #[test]
    fn test_init_failure_stops_before_any_step() {
        let clock = VirtualClock::new();
        let mut driver = CountingDriver::new(Cadence::from_millis(10));
        driver.fail_init = true;
        let mut runner = Runner::new(driver, MockDelay::new(&clock), MockSystem::default());

        let err = block_on(runner.run_for(5)).unwrap_err();

        assert!(matches!(err, RunError::Init { driver: "counting", .. }));
        assert_eq!(runner.driver().steps, 0);
        assert!(!runner.is_initialized());
    }

    #[test]
    fn test_step_failure_reports_index() {
        let clock = VirtualClock::new();
        let mut driver = CountingDriver::new(Cadence::from_millis(10));
        driver.fail_at_step = Some(2);
        let mut runner = Runner::new(driver, MockDelay::new(&clock), MockSystem::default());

        let err = block_on(runner.run_for(10)).unwrap_err();

        assert_eq!(
            err,
            RunError::Step {
                driver: "counting",
                index: 2,
                error: DriverError::peripheral("mock", "step"),
            }
        );
        // Two successful steps slept, the failing one did not.
        assert_eq!(clock.sleeps(), 2);
    }

    #[test]
    fn test_restart_request_ends_run_without_sleeping() {
        let clock = VirtualClock::new();
        let mut driver = CountingDriver::new(Cadence::from_millis(10));
        driver.restart_at_step = Some(1);
        let mut runner = Runner::new(driver, MockDelay::new(&clock), MockSystem::default());

        let report = block_on(runner.run_for(10)).unwrap();

        assert_eq!(
            report,
            RunReport {
                steps: 2,
                restart_requested: true
            }
        );
        assert_eq!(clock.sleeps(), 1);
    }

    #[test]
    #[should_panic(expected = "restart")]
    fn test_run_restarts_on_step_failure() {
        let clock = VirtualClock::new();
        let mut driver = CountingDriver::new(Cadence::from_millis(10));
        driver.fail_at_step = Some(0);
        let runner = Runner::new(driver, MockDelay::new(&clock), MockSystem::default());

        block_on(runner.run());
    }

    #[test]
    #[should_panic(expected = "halt")]
    fn test_run_halts_when_configured() {
        let clock = VirtualClock::new();
        let mut driver = CountingDriver::new(Cadence::from_millis(10));
        driver.fail_init = true;
        let runner = Runner::new(driver, MockDelay::new(&clock), MockSystem::default())
            .with_fatal_action(FatalAction::Halt);

        block_on(runner.run());
    }

    #[test]
    fn test_long_cadence_is_split_into_millisecond_delays() {
        let clock = VirtualClock::new();
        // Longer than u32::MAX microseconds (~71.6 minutes).
        let cadence = Cadence::from_micros(5_000_000_123);
        let mut delay = MockDelay::new(&clock);

        block_on(pace(&mut delay, cadence));

        assert_eq!(clock.now_micros(), 5_000_000_123);
    }
}
