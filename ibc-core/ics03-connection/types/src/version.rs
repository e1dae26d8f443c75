//! Defines connection versioning type and functions

use core::fmt::Display;

use ibc_primitives::prelude::*;
use ibc_primitives::utils::PrettySlice;
use ibc_proto::ibc::core::connection::v1::Version as RawVersion;
use ibc_proto::Protobuf;

use crate::error::ConnectionError;

/// Channel ordering feature names a version may advertise.
pub const ORDER_ORDERED: &str = "ORDER_ORDERED";
pub const ORDER_UNORDERED: &str = "ORDER_UNORDERED";

/// Stores the identifier and the features supported by a version
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Version {
    identifier: String,
    features: Vec<String>,
}

impl Version {
    pub fn new(identifier: String, features: Vec<String>) -> Result<Self, ConnectionError> {
        RawVersion {
            identifier,
            features,
        }
        .try_into()
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Checks that the version's identifier is known locally and that every
    /// feature it lists is supported by the matching local version.
    pub fn verify_is_supported(
        &self,
        supported_versions: &[Version],
    ) -> Result<(), ConnectionError> {
        let supported_version = find_supported_version(self, supported_versions)?;

        if self.features.is_empty() {
            return Err(ConnectionError::EmptyFeatures);
        }

        for feature in self.features.iter() {
            supported_version.verify_feature_supported(feature)?;
        }
        Ok(())
    }

    pub fn verify_feature_supported(&self, feature: &str) -> Result<(), ConnectionError> {
        if !self.features.iter().any(|f| f == feature) {
            return Err(ConnectionError::FeatureNotSupported {
                feature: feature.to_string(),
            });
        }
        Ok(())
    }

    /// The versions supported by default: identifier `1` with both channel
    /// orderings.
    pub fn compatibles() -> Vec<Self> {
        vec![Self {
            identifier: "1".to_string(),
            features: vec![ORDER_ORDERED.to_string(), ORDER_UNORDERED.to_string()],
        }]
    }
}

impl Protobuf<RawVersion> for Version {}

impl TryFrom<RawVersion> for Version {
    type Error = ConnectionError;

    fn try_from(value: RawVersion) -> Result<Self, Self::Error> {
        if value.identifier.trim().is_empty() {
            return Err(ConnectionError::EmptyVersions);
        }
        if value.features.iter().any(|f| f.trim().is_empty()) {
            return Err(ConnectionError::EmptyFeatures);
        }
        Ok(Version {
            identifier: value.identifier,
            features: value.features,
        })
    }
}

impl From<Version> for RawVersion {
    fn from(value: Version) -> Self {
        Self {
            identifier: value.identifier,
            features: value.features,
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Version {{ identifier: {}, features: {} }}",
            self.identifier,
            PrettySlice(&self.features)
        )
    }
}

/// Selects the version a `ConnOpenTry` settles on.
///
/// Walks the counterparty's proposals in order and returns the first one whose
/// identifier is supported locally and whose features intersect the local
/// ones; the result carries that intersection.
pub fn pick_version(
    supported_versions: &[Version],
    counterparty_versions: &[Version],
) -> Result<Version, ConnectionError> {
    counterparty_versions
        .iter()
        .find_map(|cv| {
            let sv = find_supported_version(cv, supported_versions).ok()?;
            let features = feature_set_intersection(&sv.features, &cv.features)?;
            Some(Version {
                identifier: cv.identifier.clone(),
                features,
            })
        })
        .ok_or(ConnectionError::NoCommonVersion)
}

fn find_supported_version<'a>(
    version: &Version,
    supported_versions: &'a [Version],
) -> Result<&'a Version, ConnectionError> {
    supported_versions
        .iter()
        .find(|sv| sv.identifier == version.identifier)
        .ok_or_else(|| ConnectionError::VersionNotSupported {
            version: version.clone(),
        })
}

fn feature_set_intersection(
    supported_features: &[String],
    counterparty_features: &[String],
) -> Option<Vec<String>> {
    let intersection: Vec<String> = counterparty_features
        .iter()
        .filter(|f| supported_features.contains(f))
        .cloned()
        .collect();

    (!intersection.is_empty()).then_some(intersection)
}
