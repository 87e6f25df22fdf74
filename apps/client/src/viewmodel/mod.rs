//! Screen view-models.
//!
//! Each view-model owns a [`StateHolder`](crate::state::StateHolder) the UI
//! renders from and a [`ViewModelScope`](crate::scope::ViewModelScope) its
//! work runs in. Dropping the view-model cancels that work.

pub mod about;
pub mod bottom_bar;
pub mod cart;
pub mod contact_info;
pub mod details;
pub mod favourites;
pub mod home;
pub mod search;

pub use about::{AboutState, AboutViewModel};
pub use bottom_bar::{BottomBarState, BottomBarTab, BottomBarViewModel};
pub use cart::{CartState, CartViewModel};
pub use contact_info::{ContactInfoState, ContactInfoViewModel};
pub use details::{DetailsState, DetailsViewModel};
pub use favourites::{FavouritesState, FavouritesViewModel};
pub use home::{CategoryUi, HomeState, HomeViewModel};
pub use search::{SearchState, SearchViewModel};
