use std::fmt;
use std::str::FromStr;

/// Unit suffix accepted by the load tool's `duration=` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
}

impl DurationUnit {
    fn suffix(self) -> &'static str {
        match self {
            DurationUnit::Seconds => "s",
            DurationUnit::Minutes => "m",
            DurationUnit::Hours => "h",
        }
    }
}

/// How long one stress run should last, e.g. `"30s"`, `"5m"`, `"1h"`.
///
/// Rendered back with [`fmt::Display`] in the same compact form, which is
/// what gets passed to the load tool as `duration=<spec>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DurationSpec {
    value: u64,
    unit: DurationUnit,
}

impl DurationSpec {
    pub const fn seconds(value: u64) -> Self {
        Self {
            value,
            unit: DurationUnit::Seconds,
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn unit(&self) -> DurationUnit {
        self.unit
    }
}

impl Default for DurationSpec {
    fn default() -> Self {
        DurationSpec::seconds(10)
    }
}

impl fmt::Display for DurationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl FromStr for DurationSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty duration string".to_string());
        }

        let idx = s
            .chars()
            .position(|c| !c.is_ascii_digit())
            .ok_or_else(|| format!("duration '{s}' is missing a unit suffix (s, m or h)"))?;

        let (num_part, unit_part) = s.split_at(idx);
        let value: u64 = num_part
            .parse()
            .map_err(|e| format!("invalid duration number '{num_part}': {e}"))?;
        if value == 0 {
            return Err(format!("duration '{s}' must be greater than zero"));
        }

        let unit = match unit_part.trim().to_lowercase().as_str() {
            "s" => DurationUnit::Seconds,
            "m" => DurationUnit::Minutes,
            "h" => DurationUnit::Hours,
            other => {
                return Err(format!(
                    "unsupported duration unit '{other}'; expected s, m or h"
                ));
            }
        };

        Ok(Self { value, unit })
    }
}
