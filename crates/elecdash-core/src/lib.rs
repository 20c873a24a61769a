pub mod actions;
pub mod bus;
pub mod config;
pub mod dialogs;
pub mod error;
pub mod hierarchy;
pub mod loader;
pub mod location;
pub mod navigation;
pub mod reducer;
pub mod state;
pub mod views;
pub mod vocabulary;

pub use actions::*;
pub use bus::*;
pub use config::*;
pub use dialogs::*;
pub use error::*;
pub use hierarchy::*;
pub use loader::*;
pub use location::*;
pub use navigation::*;
pub use reducer::*;
pub use state::*;
pub use views::*;
pub use vocabulary::*;
