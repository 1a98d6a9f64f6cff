//! # Menu Client
//!
//! Menu lookups for carts and checkout, and menu editing for the vendor that owns the dish.
use crate::clients::VendorClient;
use crate::identity::Caller;
use crate::menu_actor::MenuError;
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate, VendorId};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
    vendors: VendorClient,
}

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>, vendors: VendorClient) -> Self {
        Self { inner, vendors }
    }

    /// Adds a dish to a vendor's menu. Only that vendor's owner (or an admin) may.
    #[instrument(skip(self, params), fields(vendor_id = %params.vendor_id))]
    pub async fn create_item(
        &self,
        caller: &Caller,
        params: MenuItemCreate,
    ) -> Result<MenuItemId, MenuError> {
        self.authorize(caller, params.vendor_id).await?;
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        caller: &Caller,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, MenuError> {
        let item = self.find_menu_item(id).await?;
        self.authorize(caller, item.vendor_id).await?;
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_menu_item(&self, id: MenuItemId) -> Result<MenuItem, MenuError> {
        debug!("Sending request");
        self.inner
            .get(id)
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| MenuError::NotFound(id.to_string()))
    }

    /// A vendor's menu in creation order.
    #[instrument(skip(self))]
    pub async fn list_for_vendor(&self, vendor_id: VendorId) -> Result<Vec<MenuItem>, MenuError> {
        let mut items = self
            .find(move |item: &MenuItem| item.vendor_id == vendor_id)
            .await?;
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn authorize(&self, caller: &Caller, vendor_id: VendorId) -> Result<(), MenuError> {
        let principal = caller.require()?;
        let vendor = self.vendors.find_vendor(vendor_id).await?;
        if vendor.owner_id != principal.user_id && !principal.is_admin() {
            return Err(MenuError::Forbidden(format!(
                "{} does not own {vendor_id}",
                principal.user_id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ActorClient<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast::<MenuError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => MenuError::NotFound(id),
            Err(other) => MenuError::ActorCommunicationError(other.to_string()),
        }
    }
}
