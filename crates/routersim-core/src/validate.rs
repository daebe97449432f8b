// ── Input validation ──
//
// Pure checks shared by engine construction and the operations. They
// run before any mutation, so a failure never leaves partial state.

use std::str::FromStr;

use crate::error::CoreError;
use crate::model::{
    FrequencyBand, MAX_SSID_LEN, MIN_PASSWORD_LEN, SIGNAL_CEILING_DBM, SIGNAL_FLOOR_DBM,
};

pub(crate) fn ssid(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(field, "SSID cannot be empty"));
    }
    let len = value.chars().count();
    if len > MAX_SSID_LEN {
        return Err(CoreError::validation(
            field,
            format!("SSID must be at most {MAX_SSID_LEN} characters (got {len})"),
        ));
    }
    Ok(())
}

pub(crate) fn password(field: &str, value: &str) -> Result<(), CoreError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::validation(
            field,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters long"),
        ));
    }
    Ok(())
}

pub(crate) fn channel(band: FrequencyBand, channel: u16) -> Result<(), CoreError> {
    if band.supports_channel(channel) {
        Ok(())
    } else {
        Err(CoreError::validation(
            "channel",
            format!(
                "channel {channel} is not valid for the {band} band (allowed: {})",
                band.channel_summary()
            ),
        ))
    }
}

pub(crate) fn band(value: &str) -> Result<FrequencyBand, CoreError> {
    FrequencyBand::from_str(value.trim()).map_err(|_| {
        CoreError::validation(
            "band",
            format!("invalid band '{value}'. Must be '2.4GHz', '5GHz', or 'dual'"),
        )
    })
}

pub(crate) fn signal(value: i32) -> Result<(), CoreError> {
    if (SIGNAL_FLOOR_DBM..=SIGNAL_CEILING_DBM).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::validation(
            "signal_dbm",
            format!("{value} dBm is outside {SIGNAL_FLOOR_DBM}..{SIGNAL_CEILING_DBM}"),
        ))
    }
}

pub(crate) fn probability(field: &str, value: f64) -> Result<(), CoreError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::validation(
            field,
            format!("{value} is not a probability between 0 and 1"),
        ))
    }
}
