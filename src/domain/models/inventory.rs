use super::market::{MarketPrice, SteamSale};
use crate::utils::time::steam_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An item in a user's inventory, with the market data the API attaches to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    #[serde(rename = "markethashname")]
    pub market_hash_name: String,
    #[serde(rename = "normalizedname", default)]
    pub normalized_name: Option<String>,
    #[serde(rename = "marketname")]
    pub market_name: String,
    pub slug: String,
    pub count: i64,
    #[serde(rename = "assetid")]
    pub asset_id: String,
    #[serde(rename = "classid")]
    pub class_id: String,
    #[serde(rename = "instanceid")]
    pub instance_id: String,
    #[serde(rename = "groupid")]
    pub group_id: String,
    #[serde(rename = "infoprice")]
    pub info_price: String,

    #[serde(rename = "pricelatest")]
    pub price_latest: f64,
    #[serde(rename = "pricelatestsell")]
    pub price_latest_sell: f64,
    #[serde(rename = "pricelatestsell24h")]
    pub price_latest_sell_24h: f64,
    #[serde(rename = "pricelatestsell7d")]
    pub price_latest_sell_7d: f64,
    #[serde(rename = "pricelatestsell30d")]
    pub price_latest_sell_30d: f64,
    #[serde(rename = "pricelatestsell90d")]
    pub price_latest_sell_90d: f64,
    #[serde(rename = "lateststeamsellat", default, with = "steam_timestamp::option")]
    pub latest_steam_sell_at: Option<DateTime<Utc>>,
    #[serde(rename = "latest10steamsales", default)]
    pub latest_10_steam_sales: Option<Vec<SteamSale>>,

    #[serde(rename = "pricemedian")]
    pub price_median: f64,
    #[serde(rename = "pricemedian24h")]
    pub price_median_24h: f64,
    #[serde(rename = "pricemedian7d")]
    pub price_median_7d: f64,
    #[serde(rename = "pricemedian30d")]
    pub price_median_30d: f64,
    #[serde(rename = "pricemedian90d")]
    pub price_median_90d: f64,
    #[serde(rename = "priceavg")]
    pub price_avg: f64,
    #[serde(rename = "priceavg24h")]
    pub price_avg_24h: f64,
    #[serde(rename = "priceavg7d")]
    pub price_avg_7d: f64,
    #[serde(rename = "priceavg30d")]
    pub price_avg_30d: f64,
    #[serde(rename = "priceavg90d")]
    pub price_avg_90d: f64,
    #[serde(rename = "pricesafe")]
    pub price_safe: f64,
    #[serde(rename = "pricemin")]
    pub price_min: f64,
    #[serde(rename = "pricemax")]
    pub price_max: f64,
    #[serde(rename = "pricemix")]
    pub price_mix: f64,

    #[serde(rename = "buyorderprice")]
    pub buy_order_price: f64,
    #[serde(rename = "buyordermedian")]
    pub buy_order_median: f64,
    #[serde(rename = "buyorderavg")]
    pub buy_order_avg: f64,
    #[serde(rename = "buyordervolume")]
    pub buy_order_volume: f64,
    #[serde(rename = "offervolume")]
    pub offer_volume: f64,

    #[serde(rename = "soldtoday")]
    pub sold_today: i64,
    #[serde(rename = "sold24h")]
    pub sold_24h: i64,
    #[serde(rename = "sold7d")]
    pub sold_7d: i64,
    #[serde(rename = "sold30d")]
    pub sold_30d: i64,
    #[serde(rename = "sold90d")]
    pub sold_90d: i64,
    #[serde(rename = "soldtotal")]
    pub sold_total: i64,
    #[serde(rename = "hourstosold")]
    pub hours_to_sold: f64,
    pub points: f64,
    #[serde(rename = "priceupdatedat", with = "steam_timestamp")]
    pub price_updated_at: DateTime<Utc>,

    #[serde(default)]
    pub nametag: Option<String>,
    #[serde(rename = "bordercolor")]
    pub border_color: String,
    pub color: String,
    pub quality: String,
    #[serde(default)]
    pub rarity: Option<String>,
    pub image: String,
    #[serde(rename = "itemimage", default)]
    pub item_image: Option<String>,
    pub marketable: bool,
    pub tradable: bool,
    #[serde(default)]
    pub unstable: Option<bool>,
    #[serde(rename = "unstablereason", default)]
    pub unstable_reason: Option<String>,

    #[serde(default)]
    pub tags: Option<Vec<ItemTag>>,
    #[serde(default)]
    pub descriptions: Option<Vec<ItemDescription>>,
    #[serde(default)]
    pub actions: Option<Vec<ItemAction>>,
    #[serde(rename = "createdat", default, with = "steam_timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "firstseentime", default)]
    pub first_seen_time: Option<f64>,
    #[serde(rename = "firstseenat", default, with = "steam_timestamp::option")]
    pub first_seen_at: Option<DateTime<Utc>>,
    #[serde(rename = "steamurl")]
    pub steam_url: String,
    #[serde(rename = "inspectlink", default)]
    pub inspect_link: Option<String>,
    #[serde(rename = "inspectlinkparsed", default)]
    pub inspect_link_parsed: Option<ParsedInspectLink>,
    #[serde(rename = "markettradablerestriction", default)]
    pub market_tradable_restriction: Option<String>,

    #[serde(default)]
    pub tag1: Option<String>,
    #[serde(default)]
    pub tag2: Option<String>,
    #[serde(default)]
    pub tag3: Option<String>,
    #[serde(default)]
    pub tag4: Option<String>,
    #[serde(default)]
    pub tag5: Option<String>,
    #[serde(default)]
    pub tag6: Option<String>,
    #[serde(default)]
    pub tag7: Option<String>,

    #[serde(rename = "infopricereal", default)]
    pub info_price_real: Option<String>,
    #[serde(rename = "pricereal", default)]
    pub price_real: Option<f64>,
    #[serde(rename = "pricereal24h", default)]
    pub price_real_24h: Option<f64>,
    #[serde(rename = "pricereal7d", default)]
    pub price_real_7d: Option<f64>,
    #[serde(rename = "pricereal30d", default)]
    pub price_real_30d: Option<f64>,
    #[serde(rename = "pricereal90d", default)]
    pub price_real_90d: Option<f64>,
    #[serde(rename = "pricerealmedian", default)]
    pub price_real_median: Option<f64>,
    #[serde(rename = "winloss", default)]
    pub win_loss: Option<f64>,

    #[serde(default)]
    pub prices: Option<Vec<MarketPrice>>,
    #[serde(rename = "float", default)]
    pub float_data: Option<FloatData>,
    #[serde(rename = "ownerdescription", default)]
    pub owner_description: Option<Vec<OwnerDescription>>,
    #[serde(rename = "tradeblockuntil", default)]
    pub trade_block_until: Option<String>,
}

impl InventoryItem {
    pub fn tradeable(&self) -> bool {
        self.tradable
    }

    pub fn market_tradeable_restriction(&self) -> Option<&str> {
        self.market_tradable_restriction.as_deref()
    }

    /// Cheapest listing across the markets the API tracks, if any were returned.
    pub fn cheapest_market_price(&self) -> Option<&MarketPrice> {
        self.prices
            .as_ref()?
            .iter()
            .min_by(|a, b| a.price.total_cmp(&b.price))
    }
}

/// A record of an item entering or leaving an inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryHistoryEntry {
    pub item_name: String,
    #[serde(with = "steam_timestamp")]
    pub transaction_date: DateTime<Utc>,
    pub action: String,
    pub game: String,
}

/// Inspect data for a skin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatData {
    #[serde(rename = "float")]
    pub float_value: f64,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub origin: f64,
    #[serde(rename = "paintseed")]
    pub paint_seed: i64,
    #[serde(rename = "paintindex")]
    pub paint_index: i64,
    #[serde(default)]
    pub rank: Option<i64>,
    #[serde(rename = "defindex")]
    pub def_index: i64,
    pub rarity: i64,
    pub quality: i64,
    #[serde(rename = "totalcount", default)]
    pub total_count: Option<i64>,
    pub wear: String,
    pub min: f64,
    pub max: f64,
    #[serde(rename = "hassticker")]
    pub has_sticker: bool,
    #[serde(rename = "haskeychain")]
    pub has_keychain: bool,
    #[serde(rename = "stickeramount")]
    pub sticker_amount: u32,
    #[serde(rename = "keychainamount")]
    pub keychain_amount: u32,
    pub stickers: Vec<StickerData>,
    pub keychains: Vec<KeychainData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickerData {
    pub slot: u32,
    #[serde(rename = "stickerid")]
    pub sticker_id: i64,
    #[serde(default)]
    pub wear: Option<f64>,
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default)]
    pub rotation: Option<f64>,
    #[serde(rename = "tintid", default)]
    pub tint_id: Option<f64>,
    #[serde(rename = "offsetx", default)]
    pub offset_x: Option<f64>,
    #[serde(rename = "offsety", default)]
    pub offset_y: Option<f64>,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeychainData {
    pub slot: u32,
    pub keychain_id: i64,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAction {
    pub link: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDescription {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTag {
    pub category: String,
    pub internal_name: String,
    pub localized_category_name: String,
    pub localized_tag_name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerDescription {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// The `S`, `A`, `D` and `M` components of a CS2 inspect link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInspectLink {
    pub s: String,
    pub a: String,
    pub d: String,
    pub m: String,
}
