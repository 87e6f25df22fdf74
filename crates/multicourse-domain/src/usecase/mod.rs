//! Single-purpose operations invoked by view-models.
//!
//! Each use case is a small struct over `Arc<dyn …Repository>` handles with
//! one `execute` method. Observable queries also offer `subscribe`.

pub mod cart;
pub mod delivery;
pub mod favourite;
pub mod menu;
pub mod order;
pub mod restaurant;

pub use cart::{
    AddToCartUseCase, GetOrderItemsUseCase, PickOrderUseCase, RemoveFromCartUseCase,
    UpdateCartItemUseCase,
};
pub use delivery::{
    CanDeliverUseCase, CheckDeliveryAvailableUseCase, CheckIsOrderAvailableUseCase,
    GetDeliveryCostUseCase, GetProposedAddressUseCase,
};
pub use favourite::{
    AddToFavouriteUseCase, CheckIsFavouriteUseCase, GetFavouriteMenuItemsUseCase,
    RemoveFromFavouriteUseCase,
};
pub use menu::{
    GetAboutInfoUseCase, GetMenuByCategoryIdUseCase, GetMenuCategoriesUseCase,
    GetMenuItemByIdUseCase, GetMenuItemsByNameUseCase, GetMenuListUseCase,
    GetPriceCurrencyUseCase,
};
pub use order::{
    CreateOrderUseCase, GetCustomerCommentUseCase, GetDontCallMeStatusUseCase,
    SaveCustomerCommentUseCase, SetDontCallMeStatusUseCase,
};
pub use restaurant::SyncDataUseCase;
