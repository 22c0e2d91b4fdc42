use anyhow::{Context, Result};
use base::entities::{Item, MoneyValue};
use base::requests::api::SyncHttpRequest;
use base::requests::entities::{HttpRequestData, HttpRequestMethod};
use base::requests::http_request;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};

pub type ProductId = String;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: MoneyValue,
}

/// Entry of the product dropdown.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProductOption {
    pub value: ProductId,
    pub label: String,
    pub description: Option<String>,
}

/// Products keyed by the id the catalog service reported them under, in response order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Item<ProductId, Product>>,
}

impl Catalog {
    pub fn new(products: Vec<Item<ProductId, Product>>) -> Self {
        Self { products }
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self::new(
            products
                .into_iter()
                .map(|product| Item {
                    id: product.id.clone(),
                    props: product,
                })
                .collect(),
        )
    }

    /// Builds a catalog from the `{id: product}` JSON object returned by the service.
    pub fn from_json_map(map: Map<String, Value>) -> Result<Self> {
        let products = map
            .into_iter()
            .map(|(id, value)| {
                let product: Product = serde_json::from_value(value)
                    .context(format!("an error on deserializing a product {}", id))?;

                Ok(Item { id, props: product })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(products))
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .map(|product| &product.props)
    }

    pub fn options(&self) -> Vec<ProductOption> {
        self.products
            .iter()
            .map(|product| ProductOption {
                value: product.props.id.clone(),
                label: product.props.name.clone(),
                description: product.props.description.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

pub trait CatalogApi {
    fn search_products(&self) -> Result<Catalog>;
}

pub const AUTH_TOKEN_HEADER: &str = "auth-token";

pub struct HttpCatalogApi<R: SyncHttpRequest> {
    url: String,
    auth_token: Option<String>,
    request_api: R,
}

impl<R: SyncHttpRequest> HttpCatalogApi<R> {
    pub fn new(url: String, auth_token: Option<String>, request_api: R) -> Self {
        Self {
            url,
            auth_token,
            request_api,
        }
    }
}

impl<R: SyncHttpRequest> CatalogApi for HttpCatalogApi<R> {
    fn search_products(&self) -> Result<Catalog> {
        let mut req_data = HttpRequestData::new(HttpRequestMethod::Get, &self.url);
        if let Some(token) = &self.auth_token {
            req_data = req_data.with_header(AUTH_TOKEN_HEADER, token);
        }

        let products: Map<String, Value> =
            http_request(req_data, "the product catalog", &self.request_api)?;

        Catalog::from_json_map(products)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CatalogState {
    #[default]
    Pending,
    Ready(Catalog),
    Unavailable,
}

/// Tracks the one catalog load a calculator is allowed to perform.
#[derive(Debug, Default)]
pub struct CatalogLoader {
    state: CatalogState,
    requested: bool,
}

impl CatalogLoader {
    pub fn new() -> Self {
        Default::default()
    }

    /// Marks the load as issued. Returns `false` if it was issued before.
    pub fn request(&mut self) -> bool {
        if self.requested {
            log::debug!("the product catalog has already been requested");
            return false;
        }

        self.requested = true;
        true
    }

    pub fn load<A: CatalogApi + ?Sized>(&mut self, api: &A) {
        if !self.request() {
            return;
        }

        let response = api.search_products();
        self.complete(response);
    }

    pub fn complete(&mut self, response: Result<Catalog>) {
        self.requested = true;

        if self.state != CatalogState::Pending {
            log::debug!("ignoring a repeated product catalog response");
            return;
        }

        self.state = match response {
            Ok(catalog) => {
                log::info!("loaded {} products into the catalog", catalog.len());
                CatalogState::Ready(catalog)
            }
            Err(e) => {
                log::error!("an error occurred on loading the product catalog: {:?}", e);
                CatalogState::Unavailable
            }
        };
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.state {
            CatalogState::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    /// Empty until the catalog is ready.
    pub fn options(&self) -> Vec<ProductOption> {
        self.catalog()
            .map(|catalog| catalog.options())
            .unwrap_or_default()
    }

    pub fn price_of(&self, id: &str) -> Option<Decimal> {
        self.catalog()
            .and_then(|catalog| catalog.find(id))
            .map(|product| product.unit_price)
    }
}
