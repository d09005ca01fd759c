//! Response payloads, deserialised from the API's lower-case key names.

pub mod account;
pub mod inventory;
pub mod market;
pub mod profile;

pub use account::AccountInformation;
pub use inventory::{
    FloatData, InventoryHistoryEntry, InventoryItem, ItemAction, ItemDescription, ItemTag,
    KeychainData, OwnerDescription, ParsedInspectLink, StickerData,
};
pub use market::{
    Currency, ExchangeRates, ItemAutocompleteResult, ItemHistoryEntry, MarketPrice, SteamSale,
};
pub use profile::{Profile, SteamIdResponse};
