//! Console bar state: clock, weather and the module / API selectors.

use crate::api_provider::ApiProvider;
use crate::consts::cli_consts::{WEATHER_SAMPLES, timing};
use crate::events::AppEvent;
use crate::registry::ModuleType;
use crate::scheduler::spawn_clock;
use chrono::{DateTime, Local};
use rand::seq::SliceRandom;
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, DropGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weather {
    pub temperature: &'static str,
    pub condition: &'static str,
}

impl Weather {
    /// Pick one of the canned samples.
    pub fn sample() -> Self {
        let (temperature, condition) = WEATHER_SAMPLES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(WEATHER_SAMPLES[0]);
        Self {
            temperature,
            condition,
        }
    }
}

#[derive(Debug)]
pub struct ConsoleState {
    now: DateTime<Local>,
    weather: Weather,
    selected_module: ModuleType,
    api: ApiProvider,
    /// Stops the clock task when the console goes away.
    _clock: DropGuard,
}

impl ConsoleState {
    /// Creates the console and starts its clock. Must run inside a tokio runtime.
    pub fn new(
        api: ApiProvider,
        events: mpsc::Sender<AppEvent>,
        shutdown: &CancellationToken,
    ) -> Self {
        let token = shutdown.child_token();
        spawn_clock(timing::clock_tick(), events, token.clone());
        Self {
            now: Local::now(),
            weather: Weather::sample(),
            selected_module: ModuleType::default(),
            api,
            _clock: token.drop_guard(),
        }
    }

    pub fn now(&self) -> DateTime<Local> {
        self.now
    }

    pub fn set_time(&mut self, now: DateTime<Local>) {
        self.now = now;
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    pub fn selected_module(&self) -> ModuleType {
        self.selected_module
    }

    pub fn select_next_module(&mut self) {
        self.selected_module = self.selected_module.next();
    }

    pub fn select_previous_module(&mut self) {
        self.selected_module = self.selected_module.previous();
    }

    pub fn api(&self) -> ApiProvider {
        self.api
    }

    pub fn cycle_api(&mut self) {
        self.api = self.api.next();
    }
}
