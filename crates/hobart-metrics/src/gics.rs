//! GICS (Global Industry Classification Standard) sector definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A sector name that matches no GICS sector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown GICS sector: {0}")]
pub struct ParseSectorError(pub String);

/// GICS Level 1 sectors (11 sectors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GicsSector {
    /// Energy
    Energy,

    /// Materials
    Materials,

    /// Industrials
    Industrials,

    /// Consumer Discretionary
    ConsumerDiscretionary,

    /// Consumer Staples
    ConsumerStaples,

    /// Health Care
    HealthCare,

    /// Financials
    Financials,

    /// Information Technology
    InformationTechnology,

    /// Communication Services
    CommunicationServices,

    /// Utilities
    Utilities,

    /// Real Estate
    RealEstate,
}

impl GicsSector {
    /// All sectors in code order.
    pub const ALL: [Self; 11] = [
        Self::Energy,
        Self::Materials,
        Self::Industrials,
        Self::ConsumerDiscretionary,
        Self::ConsumerStaples,
        Self::HealthCare,
        Self::Financials,
        Self::InformationTechnology,
        Self::CommunicationServices,
        Self::Utilities,
        Self::RealEstate,
    ];

    /// Returns the sector code (2-digit).
    pub const fn code(&self) -> u8 {
        match self {
            Self::Energy => 10,
            Self::Materials => 15,
            Self::Industrials => 20,
            Self::ConsumerDiscretionary => 25,
            Self::ConsumerStaples => 30,
            Self::HealthCare => 35,
            Self::Financials => 40,
            Self::InformationTechnology => 45,
            Self::CommunicationServices => 50,
            Self::Utilities => 55,
            Self::RealEstate => 60,
        }
    }

    /// Returns the published sector name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Energy => "Energy",
            Self::Materials => "Materials",
            Self::Industrials => "Industrials",
            Self::ConsumerDiscretionary => "Consumer Discretionary",
            Self::ConsumerStaples => "Consumer Staples",
            Self::HealthCare => "Health Care",
            Self::Financials => "Financials",
            Self::InformationTechnology => "Information Technology",
            Self::CommunicationServices => "Communication Services",
            Self::Utilities => "Utilities",
            Self::RealEstate => "Real Estate",
        }
    }

    /// Parse a sector from its code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            10 => Some(Self::Energy),
            15 => Some(Self::Materials),
            20 => Some(Self::Industrials),
            25 => Some(Self::ConsumerDiscretionary),
            30 => Some(Self::ConsumerStaples),
            35 => Some(Self::HealthCare),
            40 => Some(Self::Financials),
            45 => Some(Self::InformationTechnology),
            50 => Some(Self::CommunicationServices),
            55 => Some(Self::Utilities),
            60 => Some(Self::RealEstate),
            _ => None,
        }
    }
}

impl FromStr for GicsSector {
    type Err = ParseSectorError;

    /// Accepts published names in any case and spacing, plus short aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        let sector = match normalized.as_str() {
            "energy" => Self::Energy,
            "materials" => Self::Materials,
            "industrials" | "industrial" => Self::Industrials,
            "consumerdiscretionary" | "discretionary" => Self::ConsumerDiscretionary,
            "consumerstaples" | "staples" => Self::ConsumerStaples,
            "healthcare" | "health" => Self::HealthCare,
            "financials" | "finance" => Self::Financials,
            "informationtechnology" | "it" | "tech" => Self::InformationTechnology,
            "communicationservices" | "communication" | "comms" => Self::CommunicationServices,
            "utilities" | "utility" => Self::Utilities,
            "realestate" | "estate" => Self::RealEstate,
            _ => return Err(ParseSectorError(s.to_string())),
        };

        Ok(sector)
    }
}

impl fmt::Display for GicsSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_codes_round_trip() {
        for sector in GicsSector::ALL {
            assert_eq!(GicsSector::from_code(sector.code()), Some(sector));
        }
        assert_eq!(GicsSector::from_code(99), None);
    }

    #[rstest]
    #[case("Information Technology", GicsSector::InformationTechnology)]
    #[case("tech", GicsSector::InformationTechnology)]
    #[case("HEALTH CARE", GicsSector::HealthCare)]
    #[case("consumer-staples", GicsSector::ConsumerStaples)]
    #[case("Real Estate", GicsSector::RealEstate)]
    fn test_parse(#[case] input: &str, #[case] expected: GicsSector) {
        assert_eq!(input.parse::<GicsSector>(), Ok(expected));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "Crypto".parse::<GicsSector>(),
            Err(ParseSectorError("Crypto".to_string()))
        );
    }

    #[test]
    fn test_display_matches_published_name() {
        for sector in GicsSector::ALL {
            assert_eq!(sector.to_string().parse::<GicsSector>(), Ok(sector));
        }
    }
}
