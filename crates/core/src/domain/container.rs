// Container Domain Model

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Storage container name (e.g. `oft-setup-<hex>`)
pub type ContainerName = String;

/// Role a storage container plays for the tasks that reference it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerType {
    Analysis,
    Coverage,
    Crashes,
    Crashdumps,
    ExtraSetup,
    ExtraOutput,
    Inputs,
    Logs,
    NoRepro,
    ReadonlyInputs,
    RegressionReports,
    Reports,
    Setup,
    Tools,
    UniqueInputs,
    UniqueReports,
}

impl ContainerType {
    pub const ALL: [ContainerType; 16] = [
        ContainerType::Analysis,
        ContainerType::Coverage,
        ContainerType::Crashes,
        ContainerType::Crashdumps,
        ContainerType::ExtraSetup,
        ContainerType::ExtraOutput,
        ContainerType::Inputs,
        ContainerType::Logs,
        ContainerType::NoRepro,
        ContainerType::ReadonlyInputs,
        ContainerType::RegressionReports,
        ContainerType::Reports,
        ContainerType::Setup,
        ContainerType::Tools,
        ContainerType::UniqueInputs,
        ContainerType::UniqueReports,
    ];

    /// Wire name, identical to the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerType::Analysis => "analysis",
            ContainerType::Coverage => "coverage",
            ContainerType::Crashes => "crashes",
            ContainerType::Crashdumps => "crashdumps",
            ContainerType::ExtraSetup => "extra_setup",
            ContainerType::ExtraOutput => "extra_output",
            ContainerType::Inputs => "inputs",
            ContainerType::Logs => "logs",
            ContainerType::NoRepro => "no_repro",
            ContainerType::ReadonlyInputs => "readonly_inputs",
            ContainerType::RegressionReports => "regression_reports",
            ContainerType::Reports => "reports",
            ContainerType::Setup => "setup",
            ContainerType::Tools => "tools",
            ContainerType::UniqueInputs => "unique_inputs",
            ContainerType::UniqueReports => "unique_reports",
        }
    }

    /// Slug used inside container names (underscores become hyphens)
    pub fn slug(&self) -> String {
        self.as_str().replace('_', "-")
    }
}

impl std::fmt::Display for ContainerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContainerType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::UnknownContainerType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_replaces_underscores() {
        assert_eq!(ContainerType::RegressionReports.slug(), "regression-reports");
        assert_eq!(ContainerType::Setup.slug(), "setup");
    }

    #[test]
    fn test_as_str_matches_serde() {
        for t in ContainerType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
            assert_eq!(t.as_str().parse::<ContainerType>().unwrap(), t);
        }
    }

    #[test]
    fn test_unknown_container_type() {
        let err = "scratch".parse::<ContainerType>().unwrap_err();
        assert_eq!(err, DomainError::UnknownContainerType("scratch".to_string()));
    }
}
