use serde::de::{value::StringDeserializer, DeserializeOwned, Deserializer};
use serde::Deserialize;

/// Query string of `GET /products`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    /// Category slug.
    pub category: Option<String>,
    pub featured: Option<bool>,
    /// Case-insensitive match on name or description.
    pub search: Option<String>,
    /// Unrecognized values fall back to `all`.
    #[serde(default, deserialize_with = "or_default")]
    pub price: PriceRange,
    /// Unrecognized values fall back to `name`.
    #[serde(default, deserialize_with = "or_default")]
    pub sort: SortBy,
}

/// Price buckets offered by the product listing. Bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum PriceRange {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "under-10000")]
    Under10k,
    #[serde(rename = "10000-25000")]
    From10kTo25k,
    #[serde(rename = "25000-50000")]
    From25kTo50k,
    #[serde(rename = "over-50000")]
    Over50k,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    #[default]
    Name,
    PriceLow,
    PriceHigh,
    Rating,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServiceQuery {
    pub category: Option<String>,
}

/// Reads a unit-variant enum from a query value, using its default when the
/// value is not one of the known names.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|v| {
            T::deserialize(StringDeserializer::<serde::de::value::Error>::new(v)).ok()
        })
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(qs: &str) -> ProductQuery {
        let uri: axum::http::Uri = format!("/products?{qs}").parse().unwrap();
        axum::extract::Query::<ProductQuery>::try_from_uri(&uri)
            .unwrap()
            .0
    }

    #[test]
    fn known_values_parse() {
        let q = query("price=10000-25000&sort=price-high&featured=true");
        assert_eq!(q.price, PriceRange::From10kTo25k);
        assert_eq!(q.sort, SortBy::PriceHigh);
        assert_eq!(q.featured, Some(true));
    }

    #[test]
    fn unknown_values_fall_back_to_defaults() {
        let q = query("price=cheap&sort=cheapest");
        assert_eq!(q.price, PriceRange::All);
        assert_eq!(q.sort, SortBy::Name);

        let q = query("sort=");
        assert_eq!(q.sort, SortBy::Name);
    }
}
