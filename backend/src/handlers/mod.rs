pub mod health;
pub mod page;

pub use health::health;
pub use page::page;
