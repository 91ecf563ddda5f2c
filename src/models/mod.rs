pub mod bulk;
pub mod card;
pub mod collection;
pub mod price;
pub mod printing;

pub use bulk::*;
pub use card::*;
pub use collection::*;
pub use price::*;
pub use printing::*;
