use crate::domain::steamid::SteamId;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Steam community profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "steamid")]
    pub steam_id: String,
    #[serde(rename = "personaname")]
    pub persona_name: String,
    #[serde(rename = "accountname")]
    pub account_name: String,
    #[serde(rename = "profileurl")]
    pub profile_url: Option<String>,
    #[serde(rename = "profilesteamurl")]
    pub profile_steam_url: String,
    #[serde(rename = "avatarhash")]
    pub avatar_hash: String,
    pub avatar: String,
    #[serde(rename = "avatarmedium")]
    pub avatar_medium: String,
    #[serde(rename = "avatarfull")]
    pub avatar_full: String,
    #[serde(rename = "realname")]
    pub real_name: Option<String>,
    #[serde(rename = "communityvisibilitymessage")]
    pub community_visibility_message: String,
    #[serde(rename = "communityvisibilitystate")]
    pub community_visibility_state: i64,
    #[serde(rename = "profilestate")]
    pub profile_state: i64,
    #[serde(rename = "onlinestate")]
    pub online_state: String,
    #[serde(rename = "ingameinfo")]
    pub ingame_info: Vec<serde_json::Value>,
    /// Unix seconds.
    #[serde(rename = "timecreated")]
    pub time_created: i64,
    /// ISO-8601 text as sent by the API.
    #[serde(rename = "timecreatedat")]
    pub time_created_at: String,
    pub location: Option<String>,
    #[serde(rename = "loccountrycode")]
    pub location_country_code: Option<String>,
    pub summary: String,
    pub vac: i64,
    #[serde(rename = "islimited")]
    pub is_limited: i64,
    #[serde(rename = "mostplayedgamestotalplaytime")]
    pub most_played_games_total_playtime: Option<serde_json::Value>,
    #[serde(rename = "mostplayedgames2weeksplaytime")]
    pub most_played_games_2_weeks_playtime: Option<serde_json::Value>,
    #[serde(rename = "mostplayedgamesappids")]
    pub most_played_games_app_ids: Vec<serde_json::Value>,
    #[serde(rename = "mostplayedgames")]
    pub most_played_games: Vec<serde_json::Value>,
    #[serde(rename = "mostplayedgamestimes")]
    pub most_played_games_times: Vec<serde_json::Value>,
    #[serde(rename = "friendsstate")]
    pub friends_state: i64,
    #[serde(rename = "friendscount")]
    pub friends_count: i64,
    #[serde(rename = "gamescount")]
    pub games_count: i64,
    #[serde(rename = "groupscount")]
    pub groups_count: Option<i64>,
    #[serde(rename = "badgescount")]
    pub badges_count: Option<i64>,
    #[serde(rename = "tradeban")]
    pub trade_ban: i64,
    #[serde(rename = "gameban")]
    pub game_ban: i64,
    #[serde(rename = "lastbandays")]
    pub last_ban_days: Option<i64>,
    pub level: i64,
}

impl Profile {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time_created, 0)
    }

    pub fn parsed_steam_id(&self) -> Result<SteamId> {
        SteamId::parse(&self.steam_id)
    }

    pub fn is_vac_banned(&self) -> bool {
        self.vac > 0
    }
}

/// The three textual forms of one account's Steam ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SteamIdEnvelope", into = "SteamIdEnvelope")]
pub struct SteamIdResponse {
    pub steamid2: String,
    pub steamid3: String,
    pub steamid64: String,
}

#[derive(Serialize, Deserialize)]
struct SteamIdEnvelope {
    steamids: SteamIdForms,
}

#[derive(Serialize, Deserialize)]
struct SteamIdForms {
    steamid2: String,
    steamid3: String,
    steamid64: String,
}

impl From<SteamIdEnvelope> for SteamIdResponse {
    fn from(envelope: SteamIdEnvelope) -> Self {
        let SteamIdForms {
            steamid2,
            steamid3,
            steamid64,
        } = envelope.steamids;
        Self {
            steamid2,
            steamid3,
            steamid64,
        }
    }
}

impl From<SteamIdResponse> for SteamIdEnvelope {
    fn from(response: SteamIdResponse) -> Self {
        Self {
            steamids: SteamIdForms {
                steamid2: response.steamid2,
                steamid3: response.steamid3,
                steamid64: response.steamid64,
            },
        }
    }
}

impl SteamIdResponse {
    pub fn to_steam_id(&self) -> Result<SteamId> {
        SteamId::parse(&self.steamid64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_steamid_response_reads_nested_object() {
        let response: SteamIdResponse = serde_json::from_value(json!({
            "steamids": {
                "steamid2": "STEAM_1:0:11101",
                "steamid3": "[U:1:22202]",
                "steamid64": "76561197960287930"
            }
        }))
        .unwrap();

        assert_eq!(response.steamid3, "[U:1:22202]");
        let id = response.to_steam_id().unwrap();
        assert_eq!(id.as_steamid(), response.steamid2);

        let back = serde_json::to_value(&response).unwrap();
        assert_eq!(back["steamids"]["steamid64"], "76561197960287930");
    }
}
