//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/storage types here — adapters map into these.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Input kind of a credential field. Only the form layer cares about the difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Password,
    Email,
}

/// One credential field a provider needs (e.g. `username`, `password`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// A deadline source: credential schema plus endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDescriptor {
    /// Unique key; also the prefix of the provider's credential keys.
    pub name: &'static str,
    pub description: &'static str,
    /// Opaque request target, joined to the configured base URL by the transport.
    pub endpoint: &'static str,
    pub fields: &'static [FieldSpec],
}

/// A single normalized deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineItem {
    pub title: String,
    pub course: String,
    /// Epoch seconds.
    #[serde(deserialize_with = "epoch_seconds")]
    pub due: i64,
    pub status: String,
    pub url: String,
    pub submitted: bool,
    /// Late-submission deadline, epoch seconds. Only some providers report it.
    #[serde(
        default,
        deserialize_with = "opt_epoch_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub latedue: Option<i64>,
}

/// Epoch seconds as any JSON number. Backends built on float timestamps send
/// `1700000000.0`; fractions are truncated. Strings and out-of-range values are rejected.
struct EpochSeconds(i64);

impl<'de> Deserialize<'de> for EpochSeconds {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct EpochVisitor;

        impl Visitor<'_> for EpochVisitor {
            type Value = EpochSeconds;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("epoch seconds as a number")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(EpochSeconds(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(EpochSeconds)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
                if v.is_finite() && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                    Ok(EpochSeconds(v.trunc() as i64))
                } else {
                    Err(E::invalid_value(de::Unexpected::Float(v), &self))
                }
            }
        }

        d.deserialize_any(EpochVisitor)
    }
}

fn epoch_seconds<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    EpochSeconds::deserialize(d).map(|s| s.0)
}

fn opt_epoch_seconds<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Option::<EpochSeconds>::deserialize(d).map(|s| s.map(|s| s.0))
}

impl DeadlineItem {
    /// True once `due` is not in the future relative to `now` (epoch seconds).
    pub fn is_past(&self, now: i64) -> bool {
        self.due <= now
    }
}

/// The `{status, data}` body every provider endpoint answers with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEnvelope {
    pub status: String,
    /// Error responses usually omit `data`.
    #[serde(default)]
    pub data: Vec<DeadlineItem>,
    /// Human-readable reason, sent alongside non-success statuses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProviderEnvelope {
    pub const SUCCESS: &'static str = "success";

    pub fn is_success(&self) -> bool {
        self.status == Self::SUCCESS
    }
}

/// Loading flag of one provider inside a [`FetchState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderLoad {
    pub name: &'static str,
    pub loading: bool,
}

/// Per-provider loading flags, in registry order. Observers only ever see snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchState {
    pub providers: Vec<ProviderLoad>,
}

impl FetchState {
    pub fn idle(registry: &[ProviderDescriptor]) -> Self {
        Self {
            providers: registry
                .iter()
                .map(|d| ProviderLoad {
                    name: d.name,
                    loading: false,
                })
                .collect(),
        }
    }

    pub fn is_loading(&self, name: &str) -> bool {
        self.providers
            .iter()
            .any(|p| p.name == name && p.loading)
    }

    pub fn any_loading(&self) -> bool {
        self.providers.iter().any(|p| p.loading)
    }

    pub(crate) fn set_loading(&mut self, name: &str, loading: bool) {
        if let Some(p) = self.providers.iter_mut().find(|p| p.name == name) {
            p.loading = loading;
        }
    }

    pub(crate) fn clear(&mut self) {
        for p in &mut self.providers {
            p.loading = false;
        }
    }
}
