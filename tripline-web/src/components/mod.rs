pub mod chat_panel;
pub mod itinerary_view;
pub mod map_panel;
pub mod wishlist_panel;
pub mod wizard_panel;
