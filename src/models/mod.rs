pub mod account;
pub mod address;
pub mod buyer;
pub mod category;
pub mod product;
pub mod user;

pub use account::Account;
pub use address::{Address, NewAddress};
pub use buyer::Buyer;
pub use category::Category;
pub use product::Product;
pub use user::{NewUser, User, UserSummary};
