pub mod health;
pub mod ready;
pub mod diagnostics;
pub mod error;
pub mod lenient;
pub mod messages;
pub mod presence;
pub mod shared_workspace;

pub use health::*;
pub use ready::*;
pub use diagnostics::*;
pub use error::*;
pub use messages::*;
pub use presence::*;
pub use shared_workspace::*;
