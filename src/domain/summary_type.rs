use std::fmt;
use std::str::FromStr;

/// Named length policy for a generated summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SummaryType {
    Short,
    Medium,
    #[default]
    Detailed,
    Academic,
}

impl SummaryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryType::Short => "short",
            SummaryType::Medium => "medium",
            SummaryType::Detailed => "detailed",
            SummaryType::Academic => "academic",
        }
    }

    /// Lenient parse used at the HTTP boundary: unknown names become `Detailed`.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::warn!(summary_type = %value, "Unknown summary type, using detailed");
            SummaryType::default()
        })
    }
}

impl FromStr for SummaryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(SummaryType::Short),
            "medium" => Ok(SummaryType::Medium),
            "detailed" => Ok(SummaryType::Detailed),
            "academic" => Ok(SummaryType::Academic),
            other => Err(format!("Invalid summary type: {}", other)),
        }
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
