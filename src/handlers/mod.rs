pub mod health;
pub mod diagnostics;
pub mod shared_workspaces;

pub use health::*;
pub use diagnostics::*;
pub use shared_workspaces::*;
