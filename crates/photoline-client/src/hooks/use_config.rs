//! Hooks for persisted client settings.

use photoline_core::ClampConfig;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::hooks::use_localstorage;

const CONFIG_CLAMP_KEY: &str = "$photoline$/config/clamp";
const CONFIG_LAST_DAY_KEY: &str = "$photoline$/config/last-day";
const CONFIG_VIEW_MODE_KEY: &str = "$photoline$/config/view-mode";

/// Clamp tuning from storage. Out-of-range values are replaced by the
/// default, in storage too.
#[hook]
pub fn use_clamp_config() -> ClampConfig {
    let stored = use_localstorage(CONFIG_CLAMP_KEY, ClampConfig::default);
    let config = stored.validated();
    {
        let stored = stored.clone();
        use_effect_with(config, move |config| {
            if *stored != *config {
                stored.set(*config);
            }
            || ()
        });
    }
    config
}

/// Last day opened, as `YYYY-MM-DD`.
#[hook]
pub fn use_last_day() -> UseStateHandle<Option<String>> {
    use_localstorage(CONFIG_LAST_DAY_KEY, || None::<String>)
}

/// How a day is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Hour sections with draggable photos and notes.
    #[default]
    Full,
    /// One summary row per hour.
    Compact,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Full => ViewMode::Compact,
            ViewMode::Compact => ViewMode::Full,
        }
    }
}

#[hook]
pub fn use_view_mode() -> UseStateHandle<ViewMode> {
    use_localstorage(CONFIG_VIEW_MODE_KEY, ViewMode::default)
}
