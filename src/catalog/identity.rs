use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Versioned key for a protocol catalog document (e.g., `osi_protocols_v1`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

/// Category that groups protocol entries.
///
/// The set is closed: seven OSI layers plus a catch-all. Declaration order is
/// the display order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Layer {
    Physical,
    DataLink,
    Network,
    Transport,
    Session,
    Presentation,
    Application,
    Other,
}

impl Layer {
    /// Every layer in display order.
    pub const ALL: [Layer; 8] = [
        Layer::Physical,
        Layer::DataLink,
        Layer::Network,
        Layer::Transport,
        Layer::Session,
        Layer::Presentation,
        Layer::Application,
        Layer::Other,
    ];

    /// Display name, which doubles as the canonical selection identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Layer::Physical => "Physical Layer Protocols",
            Layer::DataLink => "Data Link Layer Protocols",
            Layer::Network => "Network Layer Protocols",
            Layer::Transport => "Transport Layer Protocols",
            Layer::Session => "Session Layer Protocols",
            Layer::Presentation => "Presentation Layer Protocols",
            Layer::Application => "Application Layer Protocols",
            Layer::Other => "Other Protocols",
        }
    }

    /// Short identifier used in catalog documents and on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Layer::Physical => "physical",
            Layer::DataLink => "data_link",
            Layer::Network => "network",
            Layer::Transport => "transport",
            Layer::Session => "session",
            Layer::Presentation => "presentation",
            Layer::Application => "application",
            Layer::Other => "other",
        }
    }

    /// Zero-based position in the display order.
    pub fn position(&self) -> usize {
        *self as usize
    }

    /// Resolve a selection to a layer.
    ///
    /// Display names must match exactly; slugs are compared ignoring ASCII
    /// case. No whitespace is stripped.
    pub fn from_selection(selection: &str) -> Option<Self> {
        Layer::ALL
            .iter()
            .find(|layer| {
                layer.name() == selection || layer.slug().eq_ignore_ascii_case(selection)
            })
            .copied()
    }

    fn from_slug(slug: &str) -> Option<Self> {
        Layer::ALL.iter().find(|layer| layer.slug() == slug).copied()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Layer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.slug())
    }
}

impl<'de> Deserialize<'de> for Layer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::from_slug(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown layer id '{value}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_order_is_fixed() {
        let names: Vec<&str> = Layer::ALL.iter().map(Layer::name).collect();
        assert_eq!(
            names,
            vec![
                "Physical Layer Protocols",
                "Data Link Layer Protocols",
                "Network Layer Protocols",
                "Transport Layer Protocols",
                "Session Layer Protocols",
                "Presentation Layer Protocols",
                "Application Layer Protocols",
                "Other Protocols",
            ]
        );
        for (idx, layer) in Layer::ALL.iter().enumerate() {
            assert_eq!(layer.position(), idx);
        }
    }

    #[test]
    fn selection_accepts_names_and_slugs() {
        assert_eq!(
            Layer::from_selection("Transport Layer Protocols"),
            Some(Layer::Transport)
        );
        assert_eq!(Layer::from_selection("data_link"), Some(Layer::DataLink));
        assert_eq!(Layer::from_selection("DATA_LINK"), Some(Layer::DataLink));
        assert_eq!(Layer::from_selection("NotALayer"), None);
        assert_eq!(Layer::from_selection("transport layer protocols"), None);
        assert_eq!(Layer::from_selection(""), None);
    }

    #[test]
    fn selection_is_not_normalized() {
        assert_eq!(Layer::from_selection("Data-Link"), None);
        assert_eq!(Layer::from_selection("DATA-LINK"), None);
        assert_eq!(Layer::from_selection("  other "), None);
        assert_eq!(
            Layer::from_selection("  Transport Layer Protocols  "),
            None
        );
    }

    #[test]
    fn document_ids_are_exact_slugs() {
        assert_eq!(Layer::from_slug("data_link"), Some(Layer::DataLink));
        assert_eq!(Layer::from_slug("Data_Link"), None);
    }

    #[test]
    fn layer_serializes_as_slug() {
        let json = serde_json::to_string(&Layer::Application).unwrap();
        assert_eq!(json, "\"application\"");
        let back: Layer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Layer::Application);

        let err = serde_json::from_str::<Layer>("\"Application Layer Protocols\"").unwrap_err();
        assert!(err.to_string().contains("unknown layer id"));
    }

    #[test]
    fn catalog_key_is_transparent() {
        let key = CatalogKey("osi_protocols_v1".to_string());
        let serialized = serde_json::to_string(&key).unwrap();
        assert_eq!(serialized, "\"osi_protocols_v1\"");
        let parsed: CatalogKey = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, key);
    }
}
