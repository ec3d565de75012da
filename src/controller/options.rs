//! Preset countdown options

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::TimerError;

/// The three preset countdowns offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerOption {
    Option1,
    Option2,
    Option3,
}

impl TimerOption {
    pub const ALL: [TimerOption; 3] = [TimerOption::Option1, TimerOption::Option2, TimerOption::Option3];

    /// Countdown length for this option
    pub fn duration(self) -> Duration {
        match self {
            TimerOption::Option1 => Duration::from_millis(60_000),
            TimerOption::Option2 => Duration::from_millis(120_000),
            TimerOption::Option3 => Duration::from_millis(180_000),
        }
    }
}

impl FromStr for TimerOption {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "option1" => Ok(TimerOption::Option1),
            "2" | "option2" => Ok(TimerOption::Option2),
            "3" | "option3" => Ok(TimerOption::Option3),
            _ => Err(TimerError::UnknownOption(s.to_string())),
        }
    }
}

impl fmt::Display for TimerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerOption::Option1 => "option1",
            TimerOption::Option2 => "option2",
            TimerOption::Option3 => "option3",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_map_to_preset_durations() {
        let millis: Vec<u128> = TimerOption::ALL.iter().map(|o| o.duration().as_millis()).collect();
        assert_eq!(millis, vec![60_000, 120_000, 180_000]);
    }

    #[test]
    fn parses_numbers_and_names() {
        assert_eq!("1".parse::<TimerOption>(), Ok(TimerOption::Option1));
        assert_eq!("Option2".parse::<TimerOption>(), Ok(TimerOption::Option2));
        assert_eq!(" option3 ".parse::<TimerOption>(), Ok(TimerOption::Option3));
    }

    #[test]
    fn rejects_unknown_options() {
        assert_eq!(
            "4".parse::<TimerOption>(),
            Err(TimerError::UnknownOption("4".to_string()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for option in TimerOption::ALL {
            assert_eq!(option.to_string().parse::<TimerOption>(), Ok(option));
        }
    }
}
