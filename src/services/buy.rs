//! DID store browsing: coverage geography and available numbers.

use crate::error::Result;
use crate::services::cart::CartDid;
use crate::transport::query::path_with_query;
use crate::transport::{Pagination, Transport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub has_provinces_or_states: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub area_code: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryList {
    pub countries: Vec<Country>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionList {
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityList {
    pub cities: Vec<City>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AvailableDidsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_enabled_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_filter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableDidsPage {
    pub dids: Vec<CartDid>,
    pub pagination: Pagination,
}

/// Store catalogue endpoints.
#[derive(Debug, Clone)]
pub struct Buy {
    transport: Transport,
}

impl Buy {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// `GET /v1/buy/countries`: countries with numbers on offer.
    pub async fn countries(&self) -> Result<CountryList> {
        self.transport.get("/v1/buy/countries").await
    }

    /// `GET /v1/buy/countries/{id}/regions`: regions of a country.
    pub async fn regions(&self, country_id: i64) -> Result<RegionList> {
        self.transport
            .get(&format!("/v1/buy/countries/{country_id}/regions"))
            .await
    }

    /// `GET /v1/buy/countries/{id}/cities`: cities of a country.
    pub async fn country_cities(&self, country_id: i64) -> Result<CityList> {
        self.transport
            .get(&format!("/v1/buy/countries/{country_id}/cities"))
            .await
    }

    /// `GET /v1/buy/countries/{id}/regions/{id}/cities`: cities of one region.
    pub async fn region_cities(&self, country_id: i64, region_id: i64) -> Result<CityList> {
        self.transport
            .get(&format!(
                "/v1/buy/countries/{country_id}/regions/{region_id}/cities"
            ))
            .await
    }

    /// `GET /v1/buy/countries/{id}/cities/{id}/dids`: numbers available for
    /// purchase in one city.
    pub async fn available_dids(
        &self,
        country_id: i64,
        city_id: i64,
        query: &AvailableDidsQuery,
    ) -> Result<AvailableDidsPage> {
        let path = path_with_query(
            &format!("/v1/buy/countries/{country_id}/cities/{city_id}/dids"),
            query,
        )?;
        self.transport.get(&path).await
    }
}
