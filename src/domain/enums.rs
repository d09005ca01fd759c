//! String-valued parameters accepted and returned by the API.

use crate::utils::error::SteamWebApiError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// The value sent on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = SteamWebApiError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    other => Err(SteamWebApiError::InvalidEnumValue {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// Games supported by the API.
    Game {
        Cs2 => "cs2",
        Rust => "rust",
        Dota => "dota",
    }
}

wire_enum! {
    /// Languages supported by the API.
    Language {
        Danish => "danish",
        English => "english",
        French => "french",
        German => "german",
        Polish => "polish",
        Portuguese => "portuguese",
        Russian => "russian",
        Swedish => "swedish",
        Turkish => "turkish",
    }
}

wire_enum! {
    /// Item wear tiers.
    Wear {
        FactoryNew => "fn",
        MinimalWear => "mw",
        FieldTested => "ft",
        WellWorn => "ww",
        BattleScarred => "bs",
    }
}

wire_enum! {
    /// Sort order for item listings.
    SortOrder {
        PriceAsc => "priceAz",
        PriceDesc => "priceZa",
        PriceRealAsc => "priceRealAz",
        PriceRealDesc => "priceRealZa",
        WinLossAsc => "winLossAz",
        WinLossDesc => "winLossZa",
        SoldAsc => "soldAz",
        SoldDesc => "soldZa",
        ItemName => "name",
        PointsAsc => "pointsAz",
        PointsDesc => "pointsZa",
        Winner => "winner",
        Loser => "loser",
    }
}

wire_enum! {
    /// Background colors for item screenshots.
    ScreenshotColorScheme {
        Black => "black",
        Blue => "blue",
        Green => "green",
        Orange => "orange",
        Purple => "purple",
        Red => "red",
        White => "white",
        Yellow => "yellow",
        Gray => "gray",
    }
}

wire_enum! {
    /// Corner the logo is anchored to on item screenshots.
    ScreenshotLogoOffset {
        TopLeft => "top left",
        TopRight => "top right",
        BottomLeft => "bottom left",
        BottomRight => "bottom right",
    }
}

wire_enum! {
    /// How a generated screenshot is delivered.
    ScreenshotFormat {
        /// Rendered inline.
        Screen => "screen",
        /// Sent as a file download.
        Download => "download",
        /// Returned as a base64 string.
        Base64 => "base64",
    }
}

wire_enum! {
    /// Which inventory snapshot the API should serve.
    InventoryState {
        Active => "active",
        Fallback => "fallback",
        TakeDb => "takedb",
    }
}

wire_enum! {
    ItemHistoryOrigin {
        SteamWebApi => "steamwebapi",
        Markets => "markets",
    }
}

wire_enum! {
    ItemHistoryType {
        Sell => "sell",
        Offer => "offer",
        Median => "median",
    }
}

wire_enum! {
    ItemHistorySource {
        Steam => "steam",
        Skinport => "skinport",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values_parse_back() {
        for order in SortOrder::ALL {
            assert_eq!(order.as_str().parse::<SortOrder>().unwrap(), *order);
        }
        assert_eq!("top right".parse::<ScreenshotLogoOffset>().unwrap(), ScreenshotLogoOffset::TopRight);
    }

    #[test]
    fn test_unknown_value_is_rejected() {
        let err = "csgo".parse::<Game>().unwrap_err();
        assert!(matches!(
            err,
            SteamWebApiError::InvalidEnumValue { kind: "Game", ref value } if value == "csgo"
        ));
    }

    #[test]
    fn test_serde_uses_wire_value() {
        assert_eq!(serde_json::to_string(&Wear::FieldTested).unwrap(), "\"ft\"");
        let lang: Language = serde_json::from_str("\"swedish\"").unwrap();
        assert_eq!(lang, Language::Swedish);
        assert!(serde_json::from_str::<Wear>("\"xx\"").is_err());
    }

    #[test]
    fn test_display_matches_wire_value() {
        assert_eq!(Game::Cs2.to_string(), "cs2");
        assert_eq!(ItemHistorySource::Skinport.to_string(), "skinport");
    }
}
