use std::sync::Arc;

use uuid::Uuid;

use crate::{
    errors::{MarketError, MarketResult},
    models::{
        location::{City, CityRequest, Country, CountryRequest},
        pagination::{ListResponse, Page, PageRequest},
    },
    repositories::{CityRepository, CountryRepository},
};

pub struct CountryUsecase {
    countries: Arc<dyn CountryRepository>,
}

fn validate_country(request: &CountryRequest) -> MarketResult<()> {
    if request.name.trim().is_empty() {
        return Err(MarketError::validation("name is required"));
    }
    if request.code.trim().is_empty() {
        return Err(MarketError::validation("code is required"));
    }
    Ok(())
}

impl CountryUsecase {
    pub fn new(countries: Arc<dyn CountryRepository>) -> Self {
        Self { countries }
    }

    pub async fn get_country(&self, id: Uuid) -> MarketResult<Country> {
        self.countries
            .get_by_id(id)
            .await?
            .ok_or_else(|| MarketError::not_found("country not found"))
    }

    pub async fn create_country(&self, request: CountryRequest) -> MarketResult<Country> {
        validate_country(&request)?;

        let country = Country {
            id: Uuid::new_v4(),
            name: request.name,
            code: request.code.to_uppercase(),
        };
        self.countries.create(&country).await?;
        Ok(country)
    }

    pub async fn update_country(&self, id: Uuid, request: CountryRequest) -> MarketResult<Country> {
        validate_country(&request)?;
        self.get_country(id).await?;

        let country = Country {
            id,
            name: request.name,
            code: request.code.to_uppercase(),
        };
        self.countries.update(&country).await?;
        Ok(country)
    }

    /// Fails with a conflict while cities still reference the country.
    pub async fn delete_country(&self, id: Uuid) -> MarketResult<()> {
        if !self.countries.delete(id).await? {
            return Err(MarketError::not_found("country not found"));
        }
        Ok(())
    }
}

pub struct CityUsecase {
    cities: Arc<dyn CityRepository>,
    countries: Arc<dyn CountryRepository>,
}

impl CityUsecase {
    pub fn new(cities: Arc<dyn CityRepository>, countries: Arc<dyn CountryRepository>) -> Self {
        Self { cities, countries }
    }

    pub async fn get_city(&self, id: Uuid) -> MarketResult<City> {
        self.cities
            .get_by_id(id)
            .await?
            .ok_or_else(|| MarketError::not_found("city not found"))
    }

    async fn validate(&self, request: &CityRequest) -> MarketResult<()> {
        if request.name.trim().is_empty() {
            return Err(MarketError::validation("name is required"));
        }
        if request.country_id.is_nil() {
            return Err(MarketError::validation("country_id is required"));
        }
        if self.countries.get_by_id(request.country_id).await?.is_none() {
            return Err(MarketError::validation("invalid country_id"));
        }
        Ok(())
    }

    pub async fn create_city(&self, request: CityRequest) -> MarketResult<City> {
        self.validate(&request).await?;

        let city = City {
            id: Uuid::new_v4(),
            name: request.name,
            country_id: request.country_id,
            timezone: request.timezone,
        };
        self.cities.create(&city).await?;
        Ok(city)
    }

    pub async fn update_city(&self, id: Uuid, request: CityRequest) -> MarketResult<City> {
        self.validate(&request).await?;
        self.get_city(id).await?;

        let city = City {
            id,
            name: request.name,
            country_id: request.country_id,
            timezone: request.timezone,
        };
        self.cities.update(&city).await?;
        Ok(city)
    }

    pub async fn delete_city(&self, id: Uuid) -> MarketResult<()> {
        if !self.cities.delete(id).await? {
            return Err(MarketError::not_found("city not found"));
        }
        Ok(())
    }

    pub async fn list_cities(
        &self,
        name: Option<String>,
        page: PageRequest,
    ) -> MarketResult<ListResponse<City>> {
        let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let (results, total) = self.cities.list(name, Page::from(page)).await?;
        Ok(ListResponse { results, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockCityRepository, MockCountryRepository};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn country_code_is_required_and_uppercased() {
        let mut countries = MockCountryRepository::new();
        countries
            .expect_create()
            .withf(|c| c.code == "KZ")
            .times(1)
            .returning(|_| Ok(()));
        let uc = CountryUsecase::new(Arc::new(countries));

        let err = uc
            .create_country(CountryRequest {
                name: "Kazakhstan".to_string(),
                code: String::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: code is required");

        uc.create_country(CountryRequest {
            name: "Kazakhstan".to_string(),
            code: "kz".to_string(),
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn city_requires_existing_country() {
        let mut countries = MockCountryRepository::new();
        countries.expect_get_by_id().returning(|_| Ok(None));
        let uc = CityUsecase::new(Arc::new(MockCityRepository::new()), Arc::new(countries));

        let err = uc
            .create_city(CityRequest {
                name: "Almaty".to_string(),
                country_id: Uuid::new_v4(),
                timezone: "Asia/Almaty".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: invalid country_id");
    }

    #[tokio::test]
    async fn blank_name_filter_is_dropped() {
        let mut cities = MockCityRepository::new();
        cities
            .expect_list()
            .with(
                eq(None::<String>),
                eq(Page {
                    page: 2,
                    page_size: 10,
                }),
            )
            .returning(|_, _| Ok((vec![], 0)));
        let uc = CityUsecase::new(Arc::new(cities), Arc::new(MockCountryRepository::new()));

        let listed = uc
            .list_cities(
                Some("   ".to_string()),
                PageRequest {
                    page: Some(2),
                    page_size: None,
                },
            )
            .await
            .unwrap();
        assert!(listed.results.is_empty());
    }
}
