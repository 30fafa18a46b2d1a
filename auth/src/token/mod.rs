pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use claims::Header;
pub use errors::TokenError;
pub use handler::decode;
pub use handler::issue;
pub use handler::sign;
