use std::collections::HashMap;

/// Display labels for unit and category ids.
#[derive(Debug, Default, Clone)]
pub struct Labels {
    units: HashMap<String, String>,
    categories: HashMap<String, String>,
}

impl Labels {
    pub fn unit(&self, id: &str) -> String {
        self.units
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_owned())
    }

    pub fn category(&self, id: &str) -> String {
        self.categories
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_owned())
    }

    pub fn with_unit(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.units.insert(id.into(), label.into());
        self
    }

    pub fn with_category(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.categories.insert(id.into(), label.into());
        self
    }
}

impl super::Query {
    pub async fn labels(&self) -> larder_shared::Result<Labels> {
        let units = self.list_units().await?;
        let categories = self.list_categories().await?;

        Ok(Labels {
            units: units.into_iter().map(|u| (u.id.to_owned(), u.label())).collect(),
            categories: categories.into_iter().map(|c| (c.id, c.name)).collect(),
        })
    }

    pub async fn unit_exists(&self, id: &str) -> larder_shared::Result<bool> {
        Ok(self.find_unit(id).await?.is_some())
    }

    pub async fn category_exists(&self, id: &str) -> larder_shared::Result<bool> {
        Ok(self.find_category(id).await?.is_some())
    }
}
