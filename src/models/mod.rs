pub mod file;
pub mod request;
pub mod response;
pub mod state;

pub use file::*;
pub use request::*;
pub use response::*;
pub use state::*;
