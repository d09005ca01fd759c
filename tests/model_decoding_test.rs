#![recursion_limit = "256"]
use chrono::{Datelike, TimeZone, Utc};
use serde_json::{json, Value};
use steamwebapi::models::{
    AccountInformation, InventoryHistoryEntry, InventoryItem, ItemHistoryEntry, Profile,
};
use steamwebapi::SteamId;

fn inventory_item_payload() -> Value {
    json!({
        "id": "a1b2c3",
        "markethashname": "AK-47 | Redline (Field-Tested)",
        "normalizedname": "ak-47 redline field-tested",
        "marketname": "AK-47 | Redline (Field-Tested)",
        "slug": "ak-47-redline-field-tested",
        "count": 1,
        "assetid": "31415926535",
        "classid": "310776767",
        "instanceid": "302028390",
        "groupid": "g-1",
        "infoprice": "Latest sell price",
        "pricelatest": 12.5,
        "pricelatestsell": 12.4,
        "pricelatestsell24h": 12.3,
        "pricelatestsell7d": 12.1,
        "pricelatestsell30d": 11.9,
        "pricelatestsell90d": 11.2,
        "lateststeamsellat": "2024-05-01 12:30:45.123456",
        "latest10steamsales": [
            {"price": 12.4, "timestamp": 1714566645.0, "date": "2024-05-01 12:30:45"}
        ],
        "pricemedian": 12.2,
        "pricemedian24h": 12.2,
        "pricemedian7d": 12.0,
        "pricemedian30d": 11.8,
        "pricemedian90d": 11.5,
        "priceavg": 12.1,
        "priceavg24h": 12.1,
        "priceavg7d": 12.0,
        "priceavg30d": 11.7,
        "priceavg90d": 11.4,
        "pricesafe": 11.9,
        "pricemin": 10.0,
        "pricemax": 14.0,
        "pricemix": 12.0,
        "buyorderprice": 11.0,
        "buyordermedian": 10.8,
        "buyorderavg": 10.7,
        "buyordervolume": 320.0,
        "offervolume": 1500.0,
        "soldtoday": 40,
        "sold24h": 55,
        "sold7d": 400,
        "sold30d": 1700,
        "sold90d": 5200,
        "soldtotal": 900000,
        "hourstosold": 0.4,
        "points": 87.0,
        "priceupdatedat": "2024-05-01 13:00:00",
        "bordercolor": "D2D2D2",
        "color": "D2D2D2",
        "quality": "Normal",
        "rarity": "Classified",
        "image": "https://example.invalid/ak.png",
        "marketable": true,
        "tradable": false,
        "tags": [{
            "category": "Weapon",
            "internal_name": "weapon_ak47",
            "localized_category_name": "Weapon",
            "localized_tag_name": "AK-47"
        }],
        "descriptions": [{"type": "html", "value": "Exterior: Field-Tested"}],
        "actions": [{"link": "steam://rungame/730/...", "name": "Inspect in Game..."}],
        "steamurl": "https://steamcommunity.com/market/listings/730/AK-47",
        "markettradablerestriction": "7",
        "prices": [
            {"market": "skinport", "price": 11.8, "url": "https://example.invalid/sp", "currency": "USD", "updated_at": "2024-05-01 10:00:00"},
            {"market": "buff", "price": 10.9, "url": "https://example.invalid/buff", "currency": "USD", "updated_at": "2024-05-01 11:00:00"}
        ],
        "float": {
            "float": 0.2314,
            "type": "skin",
            "origin": 8.0,
            "paintseed": 661,
            "paintindex": 282,
            "defindex": 7,
            "rarity": 5,
            "quality": 4,
            "wear": "Field-Tested",
            "min": 0.1,
            "max": 0.7,
            "hassticker": true,
            "haskeychain": false,
            "stickeramount": 1,
            "keychainamount": 0,
            "stickers": [{"slot": 0, "stickerid": 4567, "wear": 0.1, "name": "Sticker | Crown (Foil)", "image": "https://example.invalid/crown.png"}],
            "keychains": []
        }
    })
}

#[test]
fn test_inventory_item_decodes_renamed_fields() {
    let item: InventoryItem = serde_json::from_value(inventory_item_payload()).unwrap();

    assert_eq!(item.market_hash_name, "AK-47 | Redline (Field-Tested)");
    assert_eq!(item.sold_90d, 5200);
    assert_eq!(item.price_updated_at, Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap());
    assert_eq!(
        item.latest_steam_sell_at.map(|dt| dt.timestamp_subsec_micros()),
        Some(123456)
    );
    assert_eq!(item.latest_10_steam_sales.as_ref().map(Vec::len), Some(1));
    assert!(item.created_at.is_none());
    assert!(item.nametag.is_none());
    assert!(!item.tradeable());
    assert_eq!(item.market_tradeable_restriction(), Some("7"));
    assert_eq!(item.descriptions.as_ref().unwrap()[0].kind, "html");

    let float = item.float_data.as_ref().unwrap();
    assert_eq!(float.kind, "skin");
    assert!((float.float_value - 0.2314).abs() < f64::EPSILON);
    assert_eq!(float.stickers[0].sticker_id, 4567);
    assert!(float.keychains.is_empty());
}

#[test]
fn test_inventory_item_cheapest_market_price() {
    let item: InventoryItem = serde_json::from_value(inventory_item_payload()).unwrap();
    let cheapest = item.cheapest_market_price().unwrap();
    assert_eq!(cheapest.market, "buff");

    let mut payload = inventory_item_payload();
    payload.as_object_mut().unwrap().remove("prices");
    let item: InventoryItem = serde_json::from_value(payload).unwrap();
    assert!(item.cheapest_market_price().is_none());
}

#[test]
fn test_inventory_item_rejects_bad_timestamp() {
    let mut payload = inventory_item_payload();
    payload["priceupdatedat"] = json!("01/05/2024");
    let err = serde_json::from_value::<InventoryItem>(payload).unwrap_err();
    assert!(err.to_string().contains("01/05/2024"));
}

#[test]
fn test_inventory_item_reserializes_with_wire_names() {
    let item: InventoryItem = serde_json::from_value(inventory_item_payload()).unwrap();
    let value = serde_json::to_value(&item).unwrap();
    assert_eq!(value["markethashname"], "AK-47 | Redline (Field-Tested)");
    assert_eq!(value["float"]["paintseed"], 661);
    assert_eq!(value["priceupdatedat"], "2024-05-01 13:00:00.000000");
}

#[test]
fn test_history_entries_decode() {
    let entries: Vec<InventoryHistoryEntry> = serde_json::from_value(json!([
        {"item_name": "Operation Breakout Weapon Case", "transaction_date": "2024-02-10 08:15:00", "action": "received", "game": "cs2"}
    ]))
    .unwrap();
    assert_eq!(entries[0].transaction_date.day(), 10);

    let points: Vec<ItemHistoryEntry> = serde_json::from_value(json!([
        {"id": 1, "createdat": "2024-02-10 08:15:00.5", "price": 0.42},
        {"id": 2, "createdat": "2024-02-11 08:15:00", "price": 0.44, "sold": true}
    ]))
    .unwrap();
    assert_eq!(points[0].sold, None);
    assert_eq!(points[1].sold, Some(true));
}

#[test]
fn test_profile_decodes_and_parses_steam_id() {
    let profile: Profile = serde_json::from_value(json!({
        "steamid": "76561197960287930",
        "personaname": "Rabscuttle",
        "accountname": "gabelogannewell",
        "profileurl": "gaben",
        "profilesteamurl": "https://steamcommunity.com/id/gaben/",
        "avatarhash": "c5d56249ee5d28a07db4ac9f7f60af961fab5426",
        "avatar": "https://example.invalid/a.jpg",
        "avatarmedium": "https://example.invalid/a_medium.jpg",
        "avatarfull": "https://example.invalid/a_full.jpg",
        "realname": null,
        "communityvisibilitymessage": "public",
        "communityvisibilitystate": 3,
        "profilestate": 1,
        "onlinestate": "offline",
        "ingameinfo": [],
        "timecreated": 1063407589,
        "timecreatedat": "2003-09-12T22:59:49+00:00",
        "summary": "",
        "vac": 0,
        "islimited": 0,
        "mostplayedgamesappids": [],
        "mostplayedgames": [],
        "mostplayedgamestimes": [],
        "friendsstate": 1,
        "friendscount": 3,
        "gamescount": 100,
        "tradeban": 0,
        "gameban": 0,
        "level": 50
    }))
    .unwrap();

    assert_eq!(profile.parsed_steam_id().unwrap(), SteamId::from_u64(76561197960287930).unwrap());
    assert_eq!(profile.created_at().unwrap().year(), 2003);
    assert!(!profile.is_vac_banned());
    assert!(profile.real_name.is_none());
    assert!(profile.groups_count.is_none());
}

#[test]
fn test_account_information_decodes() {
    let account: AccountInformation = serde_json::from_value(json!({
        "info": {"email": "user@example.invalid"},
        "minute": 1,
        "hour": 12,
        "today": 30,
        "yesterday": 200,
        "week": 800,
        "month": 3000,
        "package": "Basic",
        "subscriptionstart": "2024-01-01",
        "subscriptionuntil": "2025-01-01",
        "steamwebapistatus": {"ok": true},
        "last100": []
    }))
    .unwrap();

    assert_eq!(account.package, "Basic");
    assert_eq!(account.subscription_end, "2025-01-01");
    assert!(account.last_100.is_empty());
}
