pub mod cart_items;
pub mod customers;
pub mod order_items;
pub mod orders;
pub mod products;
pub mod saved_products;
pub mod vendors;

pub use cart_items::Entity as CartItems;
pub use customers::Entity as Customers;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
pub use saved_products::Entity as SavedProducts;
pub use vendors::Entity as Vendors;
