pub mod accounts;
pub mod addresses;
pub mod buyers;
pub mod categories;
pub mod products;
pub mod users;
