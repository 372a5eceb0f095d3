//! API / client version compatibility

use fuzzctl_core::AppError;
use semver::Version;
use tracing::warn;

use crate::client::FuzzClient;
use crate::error::{Result, SdkError};

/// Version of this client
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Component whose version the service reports in `info().versions`
const SERVICE_COMPONENT: &str = "onefuzz";

/// Version a client built from an untagged checkout reports
const UNRELEASED: &str = "0.0.0";

/// Compare the service version with this client
pub struct Versions<'a> {
    client: &'a FuzzClient,
}

impl<'a> Versions<'a> {
    pub(crate) fn new(client: &'a FuzzClient) -> Self {
        Self { client }
    }

    /// Fails with `Validation` when the service and client are incompatible
    pub async fn check(&self, exact: bool) -> Result<()> {
        let info = self.client.info().await?;
        let api = info
            .versions
            .get(SERVICE_COMPONENT)
            .map(|v| v.version.clone())
            .ok_or_else(|| {
                SdkError::MissingConfiguration(format!(
                    "no {} version in service info",
                    SERVICE_COMPONENT
                ))
            })?;

        check_compatible(&api, CLIENT_VERSION, exact)
    }
}

/// Compatibility rule between an API version and a client version.
///
/// Exact mode requires equal precedence. Otherwise, for 1.x and later the
/// major versions must match and the API minor must be at least the client
/// minor; for 0.x the minors must match and the API patch must be at least
/// the client patch. An unreleased client (`0.0.0`) is always accepted.
pub fn check_compatible(api: &str, cli: &str, exact: bool) -> Result<()> {
    let api_version = parse(api)?;
    let cli_version = parse(cli)?;

    let compatible = if exact {
        api_version.major == cli_version.major
            && api_version.minor == cli_version.minor
            && api_version.patch == cli_version.patch
            && api_version.pre == cli_version.pre
    } else {
        let same_major = api_version.major == cli_version.major;
        let stable = api_version.major > 0 && same_major && api_version.minor >= cli_version.minor;
        let zero = api_version.major == 0
            && same_major
            && api_version.minor == cli_version.minor
            && api_version.patch >= cli_version.patch;

        if !(stable || zero) && cli == UNRELEASED {
            warn!(
                api,
                cli,
                "ignoring compatibility check as the client was built from an untagged checkout"
            );
            return Ok(());
        }
        stable || zero
    };

    if !compatible {
        return Err(AppError::Validation(format!(
            "incompatible versions.  api: {} cli: {}",
            api, cli
        ))
        .into());
    }
    Ok(())
}

fn parse(version: &str) -> Result<Version> {
    Version::parse(version).map_err(|e| {
        SdkError::Core(AppError::Validation(format!(
            "invalid version {}: {}",
            version, e
        )))
    })
}
