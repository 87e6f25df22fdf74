//! Every use case the screens call, built once from the repositories.

use multicourse_domain::usecase::*;
use multicourse_domain::Repositories;

/// Shared by all view-models behind an `Arc`.
pub struct UseCases {
    // Catalog
    pub sync_data: SyncDataUseCase,
    pub get_menu_categories: GetMenuCategoriesUseCase,
    pub get_menu_by_category_id: GetMenuByCategoryIdUseCase,
    pub get_menu_list: GetMenuListUseCase,
    pub get_menu_items_by_name: GetMenuItemsByNameUseCase,
    pub get_menu_item_by_id: GetMenuItemByIdUseCase,
    pub get_price_currency: GetPriceCurrencyUseCase,
    pub get_about_info: GetAboutInfoUseCase,

    // Favourites
    pub add_to_favourite: AddToFavouriteUseCase,
    pub remove_from_favourite: RemoveFromFavouriteUseCase,
    pub check_is_favourite: CheckIsFavouriteUseCase,
    pub get_favourite_menu_items: GetFavouriteMenuItemsUseCase,

    // Cart
    pub add_to_cart: AddToCartUseCase,
    pub update_cart_item: UpdateCartItemUseCase,
    pub remove_from_cart: RemoveFromCartUseCase,
    pub get_order_items: GetOrderItemsUseCase,
    pub pick_order: PickOrderUseCase,

    // Order preferences
    pub get_customer_comment: GetCustomerCommentUseCase,
    pub save_customer_comment: SaveCustomerCommentUseCase,
    pub get_dont_call_me_status: GetDontCallMeStatusUseCase,
    pub set_dont_call_me_status: SetDontCallMeStatusUseCase,

    // Delivery and checkout
    pub check_delivery_available: CheckDeliveryAvailableUseCase,
    pub check_is_order_available: CheckIsOrderAvailableUseCase,
    pub get_proposed_address: GetProposedAddressUseCase,
    pub can_deliver: CanDeliverUseCase,
    pub get_delivery_cost: GetDeliveryCostUseCase,
    pub create_order: CreateOrderUseCase,
}

impl UseCases {
    pub fn new(repos: &Repositories) -> Self {
        UseCases {
            sync_data: SyncDataUseCase::new(repos.restaurant.clone()),
            get_menu_categories: GetMenuCategoriesUseCase::new(repos.menu.clone()),
            get_menu_by_category_id: GetMenuByCategoryIdUseCase::new(repos.menu.clone()),
            get_menu_list: GetMenuListUseCase::new(repos.menu.clone()),
            get_menu_items_by_name: GetMenuItemsByNameUseCase::new(repos.menu.clone()),
            get_menu_item_by_id: GetMenuItemByIdUseCase::new(repos.menu.clone()),
            get_price_currency: GetPriceCurrencyUseCase::new(repos.menu.clone()),
            get_about_info: GetAboutInfoUseCase::new(repos.restaurant.clone()),

            add_to_favourite: AddToFavouriteUseCase::new(repos.favourites.clone()),
            remove_from_favourite: RemoveFromFavouriteUseCase::new(repos.favourites.clone()),
            check_is_favourite: CheckIsFavouriteUseCase::new(repos.favourites.clone()),
            get_favourite_menu_items: GetFavouriteMenuItemsUseCase::new(repos.favourites.clone()),

            add_to_cart: AddToCartUseCase::new(repos.cart.clone()),
            update_cart_item: UpdateCartItemUseCase::new(repos.cart.clone()),
            remove_from_cart: RemoveFromCartUseCase::new(repos.cart.clone()),
            get_order_items: GetOrderItemsUseCase::new(repos.cart.clone()),
            pick_order: PickOrderUseCase::new(repos.cart.clone(), repos.restaurant.clone()),

            get_customer_comment: GetCustomerCommentUseCase::new(repos.order.clone()),
            save_customer_comment: SaveCustomerCommentUseCase::new(repos.order.clone()),
            get_dont_call_me_status: GetDontCallMeStatusUseCase::new(repos.order.clone()),
            set_dont_call_me_status: SetDontCallMeStatusUseCase::new(repos.order.clone()),

            check_delivery_available: CheckDeliveryAvailableUseCase::new(repos.delivery.clone()),
            check_is_order_available: CheckIsOrderAvailableUseCase::new(repos.restaurant.clone()),
            get_proposed_address: GetProposedAddressUseCase::new(repos.delivery.clone()),
            can_deliver: CanDeliverUseCase::new(repos.delivery.clone()),
            get_delivery_cost: GetDeliveryCostUseCase::new(repos.delivery.clone()),
            create_order: CreateOrderUseCase::new(
                repos.restaurant.clone(),
                repos.delivery.clone(),
                repos.order.clone(),
                repos.cart.clone(),
            ),
        }
    }
}
