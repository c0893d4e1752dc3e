pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains the configuration constants for the dashboard,
    //! organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Capacity of the application event channel shared by background tasks.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Capacity of the chat publish/subscribe bus.
    pub const CHAT_BUS_CAPACITY: usize = 64;

    // =============================================================================
    // TIMING CONFIGURATION
    // =============================================================================

    /// Timer configuration for scheduled tasks
    pub mod timing {
        use std::time::Duration;

        /// Interval of the console clock tick (milliseconds)
        pub const CLOCK_TICK_MS: u64 = 1_000;

        /// Delay before the simulated assistant reply (milliseconds)
        pub const ASSISTANT_REPLY_DELAY_MS: u64 = 1_000;

        /// How long the splash screen stays up (milliseconds)
        pub const SPLASH_DURATION_MS: u64 = 2_000;

        /// How long the UI loop waits for terminal input before redrawing (milliseconds)
        pub const INPUT_POLL_MS: u64 = 100;

        pub const fn clock_tick() -> Duration {
            Duration::from_millis(CLOCK_TICK_MS)
        }

        pub const fn assistant_reply_delay() -> Duration {
            Duration::from_millis(ASSISTANT_REPLY_DELAY_MS)
        }

        pub const fn splash_duration() -> Duration {
            Duration::from_millis(SPLASH_DURATION_MS)
        }

        pub const fn input_poll() -> Duration {
            Duration::from_millis(INPUT_POLL_MS)
        }
    }

    // =============================================================================
    // STORAGE CONFIGURATION
    // =============================================================================

    /// Directory (relative to the home directory) holding ART's files.
    pub const APP_DIR: &str = ".art";

    /// File name of the application configuration.
    pub const CONFIG_FILE: &str = "config.json";

    /// File name of the chat mirror slot.
    pub const CHAT_MIRROR_FILE: &str = "chat_messages.json";

    // =============================================================================
    // CONSOLE CONFIGURATION
    // =============================================================================

    /// Weather samples the console picks from at startup: (temperature, condition).
    pub const WEATHER_SAMPLES: [(&str, &str); 3] =
        [("21°C", "Sunny"), ("18°C", "Cloudy"), ("15°C", "Rainy")];

    /// Greeting the chat module opens with when there is no earlier conversation.
    pub const CHAT_GREETING: &str =
        "Hello! I am ART, your personal assistant. How can I help you today?";
}
