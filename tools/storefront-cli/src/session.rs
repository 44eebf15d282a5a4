//! Interactive shop session.
//!
//! A [`Session`] owns the cart and the screen currently shown. Every
//! navigation goes through the route table, so a location typed by the user
//! and a link produced by the product list take the same path.

use storefront_commerce::cart::{CartProduct, CartStore};
use storefront_commerce::catalog::{Pagination, Product};
use storefront_commerce::{CommerceError, Currency, Money, ProductId};
use storefront_data::{CatalogApi, FetchError, InventoryApi};
use storefront_router::{product_detail_href, ProductDetailProps, RouteName, RouteTable, RouterError};
use thiserror::Error;
use tracing::{debug, info};

/// Errors surfaced by session actions. None of them ends the session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Router(#[from] RouterError),

    /// The action does not apply to the current screen or state.
    #[error("{0}")]
    Unavailable(String),
}

impl SessionError {
    /// Notice level the error is shown with.
    pub fn level(&self) -> NoticeLevel {
        match self {
            SessionError::Fetch(_) => NoticeLevel::Error,
            _ => NoticeLevel::Warning,
        }
    }

    /// The error as a notice.
    pub fn to_notice(&self) -> Notice {
        Notice::new(self.level(), self.to_string())
    }
}

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// What a completed checkout bought.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseSummary {
    /// Distinct products.
    pub lines: usize,
    /// Units across all lines.
    pub items: i64,
    pub total: Money,
}

/// The view being shown.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    ProductList {
        products: Vec<Product>,
        pagination: Pagination,
    },
    ProductDetail {
        props: ProductDetailProps,
        /// `None` when the inventory service could not be reached.
        stock: Option<i64>,
    },
    Cart,
    Success {
        /// Set when the screen was reached through checkout.
        summary: Option<PurchaseSummary>,
    },
}

/// One shopper's session against the two services.
pub struct Session<C, I> {
    catalog: C,
    inventory: I,
    routes: RouteTable,
    cart: CartStore,
    screen: Screen,
    location: String,
    page_size: i64,
    currency: Currency,
    notices: Vec<Notice>,
}

impl<C: CatalogApi, I: InventoryApi> Session<C, I> {
    /// Create a session showing an empty product list; call
    /// [`navigate`](Self::navigate) to load the first page.
    pub fn new(
        catalog: C,
        inventory: I,
        routes: RouteTable,
        page_size: i64,
        currency: Currency,
    ) -> Self {
        let page_size = page_size.max(1);
        Self {
            catalog,
            inventory,
            routes,
            cart: CartStore::new(currency),
            screen: Screen::ProductList {
                products: Vec::new(),
                pagination: Pagination::open_ended(1, page_size, 0),
            },
            location: "/".to_string(),
            page_size,
            currency,
            notices: Vec::new(),
        }
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Location of the current screen.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice::new(level, message));
    }

    /// Go to `location`. On failure the current screen stays.
    pub async fn navigate(&mut self, location: &str) -> Result<(), SessionError> {
        let matched = self.routes.resolve(location)?;
        debug!(route = %matched.name, path = %matched.path, "navigating");

        match matched.name {
            RouteName::ProductList => {
                let page = matched
                    .query_param("page")
                    .and_then(|p| p.trim().parse::<i64>().ok())
                    .filter(|p| *p >= 1)
                    .unwrap_or(1);
                return self.load_page(page).await;
            }
            RouteName::ProductDetail => {
                let props = ProductDetailProps::from_match(&matched)?;
                self.open_detail(props).await;
            }
            RouteName::Cart => self.screen = Screen::Cart,
            RouteName::PurchaseSuccess => self.screen = Screen::Success { summary: None },
        }

        self.location = location.trim().to_string();
        Ok(())
    }

    async fn load_page(&mut self, page: i64) -> Result<(), SessionError> {
        let listing = self.catalog.list_products(page, self.page_size).await?;
        let pagination = listing.pagination(page, self.page_size);

        self.location = self.routes.href(
            RouteName::ProductList,
            &[],
            &[("page", (page > 1).then(|| page.to_string()))],
        )?;
        self.screen = Screen::ProductList {
            products: listing.items,
            pagination,
        };
        Ok(())
    }

    /// Show a product. Fields the link did not carry are fetched from the
    /// catalog; the stock always comes from the inventory service. Fetch
    /// failures become notices and leave the field empty.
    async fn open_detail(&mut self, mut props: ProductDetailProps) {
        if props.name.is_none() || props.price.is_none() {
            match self.catalog.get_product(&props.id).await {
                Ok(product) => {
                    props.name.get_or_insert(product.name);
                    props.description.get_or_insert(product.description);
                    props.price.get_or_insert(product.price);
                }
                Err(e) => self.notify(NoticeLevel::Error, e.to_string()),
            }
        }

        let stock = match self.inventory.get_inventory(&props.id).await {
            Ok(record) => Some(record.stock),
            Err(e) => {
                self.notify(NoticeLevel::Error, format!("Could not load stock: {e}"));
                None
            }
        };

        self.screen = Screen::ProductDetail { props, stock };
    }

    /// Reload the current list page.
    pub async fn list(&mut self) -> Result<(), SessionError> {
        let page = match &self.screen {
            Screen::ProductList { pagination, .. } => pagination.page,
            _ => 1,
        };
        self.load_page(page).await
    }

    pub async fn next_page(&mut self) -> Result<(), SessionError> {
        let page = self
            .pagination()?
            .next_page()
            .ok_or_else(|| SessionError::Unavailable("Already on the last page".to_string()))?;
        self.load_page(page).await
    }

    pub async fn prev_page(&mut self) -> Result<(), SessionError> {
        let page = self
            .pagination()?
            .prev_page()
            .ok_or_else(|| SessionError::Unavailable("Already on the first page".to_string()))?;
        self.load_page(page).await
    }

    fn pagination(&self) -> Result<Pagination, SessionError> {
        match &self.screen {
            Screen::ProductList { pagination, .. } => Ok(*pagination),
            _ => Err(not_on_list()),
        }
    }

    /// Open the `n`-th product (1-based) of the current list page.
    pub async fn view(&mut self, n: usize) -> Result<(), SessionError> {
        let Screen::ProductList { products, .. } = &self.screen else {
            return Err(not_on_list());
        };
        let product = n
            .checked_sub(1)
            .and_then(|i| products.get(i))
            .ok_or_else(|| SessionError::Unavailable(format!("No product #{n} on this page")))?;

        let href = product_detail_href(
            &product.id,
            &product.name,
            &product.description,
            product.price,
        )?;
        self.navigate(&href).await
    }

    /// Add one unit of the product on the detail screen, priced as the link
    /// listed it.
    pub fn add_current(&mut self) -> Result<(), SessionError> {
        let Screen::ProductDetail { props, stock } = &self.screen else {
            return Err(SessionError::Unavailable(
                "Open a product to add it to the cart".to_string(),
            ));
        };
        let stock = stock.ok_or_else(|| {
            SessionError::Unavailable("Stock for this product is unknown".to_string())
        })?;
        let price = props
            .price
            .ok_or_else(|| SessionError::Unavailable("This product has no price".to_string()))?;

        let product = CartProduct {
            id: props.id.clone(),
            name: props.name.clone().unwrap_or_else(|| props.id.to_string()),
            price: Money::try_from_decimal(price, self.currency)?,
            stock,
        };

        let line = self.cart.add_to_cart(product)?;
        info!(product_id = %line.id, quantity = line.quantity, "added to cart");
        let message = format!("Added {} to the cart ({} in cart)", line.name, line.quantity);
        self.notify(NoticeLevel::Success, message);
        Ok(())
    }

    /// Remove a product from the cart.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let removed = self.cart.remove_from_cart(id);
        if removed {
            info!(product_id = %id, "removed from cart");
            self.notify(NoticeLevel::Info, format!("Removed {id} from the cart"));
        } else {
            self.notify(NoticeLevel::Warning, format!("{id} is not in the cart"));
        }
        removed
    }

    pub fn clear(&mut self) {
        self.cart.clear_cart();
        info!("cart cleared");
        self.notify(NoticeLevel::Info, "Cart cleared");
    }

    /// Confirm the purchase of everything in the cart.
    ///
    /// For each line the live stock is read and `max(stock - quantity, 0)`
    /// written back. The cart is cleared only once every line is written; the
    /// first failure stops the checkout with the cart as it was. Lines written
    /// before the failure stay written.
    pub async fn checkout(&mut self) -> Result<PurchaseSummary, SessionError> {
        if self.cart.is_empty() {
            return Err(SessionError::Unavailable("Your cart is empty".to_string()));
        }

        for line in self.cart.items() {
            let record = self.inventory.get_inventory(&line.id).await?;
            let remaining = record.remaining_after(line.quantity);
            self.inventory.update_stock(&line.id, remaining).await?;
            debug!(
                product_id = %line.id,
                quantity = line.quantity,
                stock = record.stock,
                remaining,
                "stock updated"
            );
        }

        let summary = PurchaseSummary {
            lines: self.cart.len(),
            items: self.cart.item_count(),
            total: self.cart.total_price(),
        };
        info!(lines = summary.lines, items = summary.items, total = %summary.total, "purchase confirmed");

        self.cart.clear_cart();
        self.location = self.routes.href(RouteName::PurchaseSuccess, &[], &[])?;
        self.screen = Screen::Success {
            summary: Some(summary.clone()),
        };
        self.notify(NoticeLevel::Success, "Purchase confirmed");
        Ok(summary)
    }
}

fn not_on_list() -> SessionError {
    SessionError::Unavailable("Go to the product list first".to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use storefront_commerce::catalog::{InventoryRecord, ProductDraft, ProductPage};

    pub(crate) fn product(id: &str, name: &str, price: f64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: format!("{name} description"),
            price,
        }
    }

    pub(crate) struct FakeCatalog {
        pub products: Vec<Product>,
    }

    #[async_trait]
    impl CatalogApi for FakeCatalog {
        async fn list_products(&self, page: i64, page_size: i64) -> Result<ProductPage, FetchError> {
            let start = ((page - 1) * page_size) as usize;
            Ok(ProductPage {
                items: self
                    .products
                    .iter()
                    .skip(start)
                    .take(page_size as usize)
                    .cloned()
                    .collect(),
                page: Some(page),
                page_size: Some(page_size),
                total_count: Some(self.products.len() as i64),
            })
        }

        async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError> {
            self.products
                .iter()
                .find(|p| &p.id == id)
                .cloned()
                .ok_or(FetchError::HttpError {
                    status: 404,
                    message: "Product not found".to_string(),
                })
        }

        async fn create_product(&self, _draft: &ProductDraft) -> Result<Product, FetchError> {
            Err(FetchError::RequestError("read-only catalog".to_string()))
        }

        async fn update_product(
            &self,
            _id: &ProductId,
            _draft: &ProductDraft,
        ) -> Result<Option<Product>, FetchError> {
            Err(FetchError::RequestError("read-only catalog".to_string()))
        }

        async fn delete_product(&self, _id: &ProductId) -> Result<(), FetchError> {
            Err(FetchError::RequestError("read-only catalog".to_string()))
        }
    }

    #[derive(Default)]
    pub(crate) struct FakeInventory {
        pub stock: Mutex<BTreeMap<String, i64>>,
        pub updates: Mutex<Vec<(String, i64)>>,
        /// Product whose inventory lookups fail.
        pub unreachable: Option<String>,
    }

    impl FakeInventory {
        pub fn with_stock(entries: &[(&str, i64)]) -> Self {
            Self {
                stock: Mutex::new(entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl InventoryApi for FakeInventory {
        async fn get_inventory(&self, product_id: &ProductId) -> Result<InventoryRecord, FetchError> {
            if self.unreachable.as_deref() == Some(product_id.as_str()) {
                return Err(FetchError::RequestError("connection refused".to_string()));
            }
            let stock = self.stock.lock().unwrap().get(product_id.as_str()).copied();
            stock
                .map(|stock| InventoryRecord::new(product_id.clone(), stock))
                .ok_or(FetchError::HttpError {
                    status: 404,
                    message: "Inventory not found".to_string(),
                })
        }

        async fn update_stock(&self, product_id: &ProductId, new_stock: i64) -> Result<(), FetchError> {
            self.stock
                .lock()
                .unwrap()
                .insert(product_id.to_string(), new_stock);
            self.updates
                .lock()
                .unwrap()
                .push((product_id.to_string(), new_stock));
            Ok(())
        }

        async fn create_inventory(
            &self,
            record: &InventoryRecord,
        ) -> Result<InventoryRecord, FetchError> {
            Ok(record.clone())
        }

        async fn delete_inventory(&self, _product_id: &ProductId) -> Result<(), FetchError> {
            Ok(())
        }
    }

    fn catalog() -> FakeCatalog {
        FakeCatalog {
            products: (1..=8)
                .map(|i| product(&format!("p-{i}"), &format!("Product {i}"), i as f64 * 1.5))
                .collect(),
        }
    }

    fn session(inventory: FakeInventory) -> Session<FakeCatalog, FakeInventory> {
        Session::new(
            catalog(),
            inventory,
            RouteTable::storefront().unwrap(),
            6,
            Currency::USD,
        )
    }

    #[tokio::test]
    async fn test_list_and_paging() {
        let mut session = session(FakeInventory::default());
        session.navigate("/").await.unwrap();

        match session.screen() {
            Screen::ProductList {
                products,
                pagination,
            } => {
                assert_eq!(products.len(), 6);
                assert!(pagination.has_next);
                assert!(!pagination.has_prev);
            }
            other => panic!("unexpected screen {other:?}"),
        }

        session.next_page().await.unwrap();
        assert_eq!(session.location(), "/?page=2");
        match session.screen() {
            Screen::ProductList { products, .. } => assert_eq!(products.len(), 2),
            other => panic!("unexpected screen {other:?}"),
        }
        assert!(matches!(
            session.next_page().await,
            Err(SessionError::Unavailable(_))
        ));

        session.prev_page().await.unwrap();
        assert_eq!(session.location(), "/");
    }

    #[tokio::test]
    async fn test_view_opens_detail_with_stock() {
        let mut session = session(FakeInventory::with_stock(&[("p-2", 4)]));
        session.navigate("/").await.unwrap();
        session.view(2).await.unwrap();

        assert!(session.location().starts_with("/products/p-2?"));
        match session.screen() {
            Screen::ProductDetail { props, stock } => {
                assert_eq!(props.id, ProductId::new("p-2"));
                assert_eq!(props.name.as_deref(), Some("Product 2"));
                assert_eq!(props.price, Some(3.0));
                assert_eq!(*stock, Some(4));
            }
            other => panic!("unexpected screen {other:?}"),
        }

        assert!(session.view(1).await.is_err());
    }

    #[tokio::test]
    async fn test_add_from_detail_and_stock_exceeded() {
        let mut session = session(FakeInventory::with_stock(&[("p-1", 1)]));
        session
            .navigate("/products/p-1?name=Widget&price=10")
            .await
            .unwrap();

        session.add_current().unwrap();
        let err = session.add_current().unwrap_err();

        assert!(matches!(err, SessionError::Commerce(ref e) if e.is_insufficient_stock()));
        assert_eq!(err.level(), NoticeLevel::Warning);
        assert_eq!(session.cart().len(), 1);
        assert_eq!(session.cart().items()[0].quantity, 1);
        assert_eq!(session.cart().total_price(), Money::new(1000, Currency::USD));

        let notices = session.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Success);
        assert!(session.take_notices().is_empty());
    }

    #[tokio::test]
    async fn test_detail_price_comes_from_link() {
        let mut session = session(FakeInventory::with_stock(&[("p-3", 5)]));
        session
            .navigate("/products/p-3?name=Cheap&price=0.25")
            .await
            .unwrap();
        session.add_current().unwrap();

        assert_eq!(session.cart().items()[0].name, "Cheap");
        assert_eq!(session.cart().total_price(), Money::new(25, Currency::USD));
    }

    #[tokio::test]
    async fn test_detail_without_query_fetches_product() {
        let mut session = session(FakeInventory::with_stock(&[("p-3", 5)]));
        session.navigate("/products/p-3").await.unwrap();

        match session.screen() {
            Screen::ProductDetail { props, stock } => {
                assert_eq!(props.name.as_deref(), Some("Product 3"));
                assert_eq!(props.price, Some(4.5));
                assert_eq!(*stock, Some(5));
            }
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_detail_with_unreachable_inventory() {
        let inventory = FakeInventory {
            unreachable: Some("p-1".to_string()),
            ..Default::default()
        };
        let mut session = session(inventory);
        session
            .navigate("/products/p-1?name=Widget&price=10")
            .await
            .unwrap();

        let notices = session.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(matches!(
            session.add_current(),
            Err(SessionError::Unavailable(_))
        ));
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_updates_stock_and_clears_cart() {
        let mut session = session(FakeInventory::with_stock(&[("a", 10), ("b", 3)]));
        session.navigate("/products/a?name=A&price=10").await.unwrap();
        session.add_current().unwrap();
        session.add_current().unwrap();
        session.navigate("/products/b?name=B&price=5").await.unwrap();
        session.add_current().unwrap();

        let summary = session.checkout().await.unwrap();

        assert_eq!(summary.lines, 2);
        assert_eq!(summary.items, 3);
        assert_eq!(summary.total, Money::new(2500, Currency::USD));
        assert!(session.cart().is_empty());
        assert_eq!(session.location(), "/success");
        assert!(matches!(
            session.screen(),
            Screen::Success { summary: Some(_) }
        ));
        assert_eq!(
            *session.inventory.updates.lock().unwrap(),
            vec![("a".to_string(), 8), ("b".to_string(), 2)]
        );
    }

    #[tokio::test]
    async fn test_checkout_never_writes_negative_stock() {
        let mut session = session(FakeInventory::with_stock(&[("a", 2)]));
        session.navigate("/products/a?name=A&price=1").await.unwrap();
        session.add_current().unwrap();
        session.add_current().unwrap();
        session.inventory.stock.lock().unwrap().insert("a".to_string(), 1);

        session.checkout().await.unwrap();

        assert_eq!(
            *session.inventory.updates.lock().unwrap(),
            vec![("a".to_string(), 0)]
        );
    }

    #[tokio::test]
    async fn test_failed_checkout_keeps_cart() {
        let mut session = session(FakeInventory::with_stock(&[("a", 10), ("b", 3)]));
        session.navigate("/products/a?name=A&price=10").await.unwrap();
        session.add_current().unwrap();
        session.navigate("/products/b?name=B&price=5").await.unwrap();
        session.add_current().unwrap();
        session.navigate("/cart").await.unwrap();

        session.inventory.stock.lock().unwrap().remove("b");
        let err = session.checkout().await.unwrap_err();

        assert!(matches!(err, SessionError::Fetch(ref e) if e.is_not_found()));
        assert_eq!(err.level(), NoticeLevel::Error);
        assert_eq!(session.cart().len(), 2);
        assert_eq!(session.screen(), &Screen::Cart);
        assert_eq!(session.location(), "/cart");
    }

    #[tokio::test]
    async fn test_empty_checkout_is_a_warning() {
        let mut session = session(FakeInventory::default());
        let err = session.checkout().await.unwrap_err();
        assert_eq!(err.level(), NoticeLevel::Warning);
    }

    #[tokio::test]
    async fn test_unknown_location_keeps_screen() {
        let mut session = session(FakeInventory::default());
        session.navigate("/cart").await.unwrap();

        let err = session.navigate("/nope").await.unwrap_err();

        assert!(matches!(err, SessionError::Router(RouterError::NotFound(_))));
        assert_eq!(session.screen(), &Screen::Cart);
        assert_eq!(session.location(), "/cart");
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let mut session = session(FakeInventory::with_stock(&[("a", 10), ("b", 3)]));
        session.navigate("/products/a?name=A&price=10").await.unwrap();
        session.add_current().unwrap();
        session.navigate("/products/b?name=B&price=5").await.unwrap();
        session.add_current().unwrap();

        assert!(session.remove(&ProductId::new("a")));
        assert!(!session.remove(&ProductId::new("missing")));
        assert_eq!(session.cart().len(), 1);

        session.clear();
        assert!(session.cart().is_empty());
        assert!(session.cart().total_price().is_zero());
    }
}
