use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const TEMPERATURE_MIN: f32 = 0.0;
pub const TEMPERATURE_MAX: f32 = 1.5;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub const TOP_P_MIN: f32 = 0.1;
pub const TOP_P_MAX: f32 = 1.0;
pub const DEFAULT_TOP_P: f32 = 0.95;

pub const MAX_TOKENS_MIN: u32 = 64;
pub const MAX_TOKENS_MAX: u32 = 1024;
pub const DEFAULT_MAX_TOKENS: u32 = 512;

/// Name of a tunable generation parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamName {
    Temperature,
    TopP,
    MaxTokens,
}

impl ParamName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamName::Temperature => "temperature",
            ParamName::TopP => "top_p",
            ParamName::MaxTokens => "max_tokens",
        }
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamName {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "temperature" | "temp" => Ok(ParamName::Temperature),
            "top_p" | "topp" => Ok(ParamName::TopP),
            "max_tokens" | "max_new_tokens" => Ok(ParamName::MaxTokens),
            _ => Err(ParamError::UnknownParameter(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("{name} must be between {min} and {max}, got {value}")]
    InvalidParameter {
        name: ParamName,
        value: String,
        min: String,
        max: String,
    },

    #[error("{name} expects a number, got '{value}'")]
    NotANumber { name: ParamName, value: String },

    #[error("unknown parameter '{0}' (expected temperature, top_p or max_tokens)")]
    UnknownParameter(String),
}

/// Sampling parameters sent with every turn.
///
/// Values are validated on construction and on every setter, so a
/// `GenerationParams` that exists is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParams {
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl GenerationParams {
    pub fn new(temperature: f32, top_p: f32, max_tokens: u32) -> Result<Self, ParamError> {
        Ok(Self {
            temperature: check_temperature(temperature)?,
            top_p: check_top_p(top_p)?,
            max_tokens: check_max_tokens(max_tokens)?,
        })
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn top_p(&self) -> f32 {
        self.top_p
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn set_temperature(&mut self, value: f32) -> Result<(), ParamError> {
        self.temperature = check_temperature(value)?;
        Ok(())
    }

    pub fn set_top_p(&mut self, value: f32) -> Result<(), ParamError> {
        self.top_p = check_top_p(value)?;
        Ok(())
    }

    pub fn set_max_tokens(&mut self, value: u32) -> Result<(), ParamError> {
        self.max_tokens = check_max_tokens(value)?;
        Ok(())
    }

    /// Parse `raw` and assign it to the named parameter
    pub fn set(&mut self, name: ParamName, raw: &str) -> Result<(), ParamError> {
        let raw = raw.trim();
        let not_a_number = || ParamError::NotANumber {
            name,
            value: raw.to_string(),
        };

        match name {
            ParamName::Temperature => {
                let value = raw.parse::<f32>().map_err(|_| not_a_number())?;
                self.set_temperature(value)
            }
            ParamName::TopP => {
                let value = raw.parse::<f32>().map_err(|_| not_a_number())?;
                self.set_top_p(value)
            }
            ParamName::MaxTokens => {
                let value = raw.parse::<u32>().map_err(|_| not_a_number())?;
                self.set_max_tokens(value)
            }
        }
    }
}

pub fn check_temperature(value: f32) -> Result<f32, ParamError> {
    check_float(ParamName::Temperature, value, TEMPERATURE_MIN, TEMPERATURE_MAX)
}

pub fn check_top_p(value: f32) -> Result<f32, ParamError> {
    check_float(ParamName::TopP, value, TOP_P_MIN, TOP_P_MAX)
}

pub fn check_max_tokens(value: u32) -> Result<u32, ParamError> {
    if (MAX_TOKENS_MIN..=MAX_TOKENS_MAX).contains(&value) {
        Ok(value)
    } else {
        Err(ParamError::InvalidParameter {
            name: ParamName::MaxTokens,
            value: value.to_string(),
            min: MAX_TOKENS_MIN.to_string(),
            max: MAX_TOKENS_MAX.to_string(),
        })
    }
}

fn check_float(name: ParamName, value: f32, min: f32, max: f32) -> Result<f32, ParamError> {
    // NaN fails the range check as well
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ParamError::InvalidParameter {
            name,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        })
    }
}
