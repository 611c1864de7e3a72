//! City lookups used by the person form's city picker.

use models::{City, RecordId, Resource};

use crate::errors::ServiceError;
use crate::gateway::RecordGateway;
use crate::pagination::filter_by;
use crate::resource_service::ResourceService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityOption {
    pub id: RecordId,
    pub label: String,
}

/// Every city, fetched once and searched locally afterwards.
#[derive(Debug, Clone, Default)]
pub struct CityOptions {
    options: Vec<CityOption>,
}

impl CityOptions {
    pub async fn load<G: RecordGateway>(cities: &ResourceService<City, G>) -> Result<Self, ServiceError> {
        let all = cities.list(1, "", true).await?;
        Ok(Self::from_cities(all.items))
    }

    pub fn from_cities(cities: Vec<City>) -> Self {
        let options = cities
            .into_iter()
            .map(|c| CityOption { label: c.display_field().to_string(), id: c.id })
            .collect();
        Self { options }
    }

    pub fn all(&self) -> &[CityOption] { &self.options }

    pub fn len(&self) -> usize { self.options.len() }

    pub fn is_empty(&self) -> bool { self.options.is_empty() }

    /// Blank search text returns every option.
    pub fn search(&self, text: &str) -> Vec<CityOption> {
        let text = text.trim();
        filter_by(self.options.clone(), text, |o| o.label.as_str())
    }

    /// Option whose id matches `id` by textual form.
    pub fn selected(&self, id: &RecordId) -> Option<&CityOption> {
        self.options.iter().find(|o| o.id.matches(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryGateway;
    use models::IdentifierPolicy;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn loads_every_city_ignoring_page_length() {
        let gw = MemoryGateway::seeded("cidades", (1..=12).map(|i| json!({"id": i, "nome": format!("C{i}")})));
        let svc: ResourceService<City, MemoryGateway> = ResourceService::new(Arc::clone(&gw), IdentifierPolicy::Preserving, 7);
        let options = CityOptions::load(&svc).await.unwrap();
        assert_eq!(options.len(), 12);
    }

    #[test]
    fn search_and_select() {
        let options = CityOptions::from_cities(vec![
            City { id: RecordId::from("f8e6"), nome: "Recife".into() },
            City { id: RecordId::Number(2), nome: "Natal".into() },
        ]);
        assert_eq!(options.search("  ").len(), 2);
        let hits = options.search("NAT");
        assert_eq!(hits, vec![CityOption { id: RecordId::Number(2), label: "Natal".into() }]);
        assert_eq!(options.selected(&RecordId::from("2")).map(|o| o.label.as_str()), Some("Natal"));
        assert!(options.selected(&RecordId::New).is_none());
    }
}
