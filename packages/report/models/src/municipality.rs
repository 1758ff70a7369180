//! Municipalities of Noord-Brabant.
//!
//! Reports are scoped to the municipality a user picked in their settings.
//! The list reflects municipal mergers up to and including 2025.

/// A municipality a report can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Municipality {
    /// URL-safe slug stored on reports (e.g. `"tilburg"`).
    pub id: &'static str,
    /// Display name (e.g. `"Tilburg"`).
    pub name: &'static str,
}

const fn m(id: &'static str, name: &'static str) -> Municipality {
    Municipality { id, name }
}

/// All municipalities of Noord-Brabant, sorted alphabetically by ID.
pub const NOORD_BRABANT: &[Municipality] = &[
    m("alphen-chaam", "Alphen-Chaam"),
    m("altena", "Altena"),
    m("asten", "Asten"),
    m("baarle-nassau", "Baarle-Nassau"),
    m("bergeijk", "Bergeijk"),
    m("bergen-op-zoom", "Bergen op Zoom"),
    m("bernheze", "Bernheze"),
    m("best", "Best"),
    m("bladel", "Bladel"),
    m("boekel", "Boekel"),
    m("boxtel", "Boxtel"),
    m("breda", "Breda"),
    m("cranendonck", "Cranendonck"),
    m("deurne", "Deurne"),
    m("dongen", "Dongen"),
    m("drimmelen", "Drimmelen"),
    m("eersel", "Eersel"),
    m("eindhoven", "Eindhoven"),
    m("etten-leur", "Etten-Leur"),
    m("geertruidenberg", "Geertruidenberg"),
    m("geldrop-mierlo", "Geldrop-Mierlo"),
    m("gemert-bakel", "Gemert-Bakel"),
    m("gilze-en-rijen", "Gilze en Rijen"),
    m("goirle", "Goirle"),
    m("halderberge", "Halderberge"),
    m("heeze-leende", "Heeze-Leende"),
    m("helmond", "Helmond"),
    m("heusden", "Heusden"),
    m("hilvarenbeek", "Hilvarenbeek"),
    m("laarbeek", "Laarbeek"),
    m("land-van-cuijk", "Land van Cuijk"),
    m("maashorst", "Maashorst"),
    m("meierijstad", "Meierijstad"),
    m("moerdijk", "Moerdijk"),
    m("nuenen-gerwen-nederwetten", "Nuenen, Gerwen en Nederwetten"),
    m("oirschot", "Oirschot"),
    m("oisterwijk", "Oisterwijk"),
    m("oosterhout", "Oosterhout"),
    m("oss", "Oss"),
    m("reusel-de-mierden", "Reusel-De Mierden"),
    m("roosendaal", "Roosendaal"),
    m("rucphen", "Rucphen"),
    m("s-hertogenbosch", "'s-Hertogenbosch"),
    m("someren", "Someren"),
    m("son-en-breugel", "Son en Breugel"),
    m("steenbergen", "Steenbergen"),
    m("tilburg", "Tilburg"),
    m("valkenswaard", "Valkenswaard"),
    m("veldhoven", "Veldhoven"),
    m("vught", "Vught"),
    m("waalre", "Waalre"),
    m("waalwijk", "Waalwijk"),
    m("woensdrecht", "Woensdrecht"),
    m("zundert", "Zundert"),
];

/// Looks up the display name for a municipality slug.
#[must_use]
pub fn label(id: &str) -> Option<&'static str> {
    NOORD_BRABANT.iter().find(|m| m.id == id).map(|m| m.name)
}

/// Returns `true` if `id` is a known municipality slug.
#[must_use]
pub fn is_valid(id: &str) -> bool {
    label(id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn municipality_count() {
        assert_eq!(NOORD_BRABANT.len(), 54);
    }

    #[test]
    fn ids_are_unique_and_sorted() {
        let mut seen = BTreeSet::new();
        for window in NOORD_BRABANT.windows(2) {
            assert!(
                window[0].id < window[1].id,
                "not sorted: {} >= {}",
                window[0].id,
                window[1].id
            );
        }
        for m in NOORD_BRABANT {
            assert!(seen.insert(m.id), "duplicate municipality: {}", m.id);
        }
    }

    #[test]
    fn lookups() {
        assert_eq!(label("s-hertogenbosch"), Some("'s-Hertogenbosch"));
        assert!(is_valid("tilburg"));
        assert!(!is_valid("amsterdam"));
        assert_eq!(label(""), None);
    }
}
