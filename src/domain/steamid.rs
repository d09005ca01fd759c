use crate::utils::error::{Result, SteamWebApiError};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Offset between an individual account id and its SteamID64.
pub const STEAMID64_OFFSET: u64 = 76_561_197_960_265_728;

static STEAMID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^STEAM_[0-5]:[0-1]:\d+").expect("valid STEAM_X:Y:Z pattern"));
static STEAMID3_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\[U:1:(\d+)\]").expect("valid [U:1:N] pattern"));

/// A Steam account identifier, stored as its SteamID64.
///
/// Accepts SteamID64, `STEAM_X:Y:Z`, `[U:1:N]` and bare account ids, and
/// converts between all of them. `Display` prints the SteamID64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SteamId(u64);

impl SteamId {
    /// Values wider than 32 bits are taken as a SteamID64; anything narrower is an account id.
    pub fn from_u64(value: u64) -> Result<Self> {
        let bits = u64::BITS - value.leading_zeros();
        if bits > 32 {
            return Self::from_steamid64(value, &value.to_string());
        }
        Ok(Self(STEAMID64_OFFSET + value))
    }

    fn from_steamid64(value: u64, raw: &str) -> Result<Self> {
        if value < STEAMID64_OFFSET {
            return Err(invalid(raw, "SteamID64 below the individual account range"));
        }
        Ok(Self(value))
    }

    pub fn parse(value: &str) -> Result<Self> {
        if STEAMID_PATTERN.is_match(value) {
            return Self::from_steamid(value);
        }
        if let Some(caps) = STEAMID3_PATTERN.captures(value) {
            let account_id: u64 = caps[1]
                .parse()
                .map_err(|_| invalid(value, "account id out of range"))?;
            return STEAMID64_OFFSET
                .checked_add(account_id)
                .map(Self)
                .ok_or_else(|| invalid(value, "account id out of range"));
        }
        if value.len() == 17 && value.bytes().all(|b| b.is_ascii_digit()) {
            let id = value
                .parse()
                .map_err(|_| invalid(value, "not a SteamID64"))?;
            return Self::from_steamid64(id, value);
        }
        Err(invalid(value, "unrecognised Steam ID format"))
    }

    fn from_steamid(value: &str) -> Result<Self> {
        let parts: Vec<&str> = value.split(':').collect();
        if parts.len() != 3 || parts[2].is_empty() || !parts[2].bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(value, "expected STEAM_X:Y:Z"));
        }

        let y: u64 = parts[1]
            .parse()
            .map_err(|_| invalid(value, "expected STEAM_X:Y:Z"))?;
        let z: u64 = parts[2]
            .parse()
            .map_err(|_| invalid(value, "account number out of range"))?;

        z.checked_mul(2)
            .and_then(|v| v.checked_add(y))
            .and_then(|v| v.checked_add(STEAMID64_OFFSET))
            .map(Self)
            .ok_or_else(|| invalid(value, "account number out of range"))
    }

    pub fn as_account_id(&self) -> u64 {
        self.0 - STEAMID64_OFFSET
    }

    /// `STEAM_1:Y:Z` form.
    pub fn as_steamid(&self) -> String {
        let account_id = self.as_account_id();
        format!("STEAM_1:{}:{}", account_id % 2, account_id / 2)
    }

    /// `[U:1:N]` form.
    pub fn as_steamid3(&self) -> String {
        format!("[U:1:{}]", self.as_account_id())
    }

    pub fn as_steamid64(&self) -> u64 {
        self.0
    }
}

fn invalid(value: &str, reason: &str) -> SteamWebApiError {
    SteamWebApiError::InvalidSteamId {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SteamId {
    type Err = SteamWebApiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<u64> for SteamId {
    type Error = SteamWebApiError;

    fn try_from(value: u64) -> Result<Self> {
        Self::from_u64(value)
    }
}

impl TryFrom<&str> for SteamId {
    type Error = SteamWebApiError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<SteamId> for u64 {
    fn from(id: SteamId) -> Self {
        id.0
    }
}

impl Serialize for SteamId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SteamId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => SteamId::from_u64(n),
            Raw::Text(s) => SteamId::parse(&s),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}
