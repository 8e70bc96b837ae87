//! State Module - user-controlled view parameters
//!
//! - **ViewState** - sort key, filter mode, column visibility
//! - **Menu** - the same state as checkbox menus, plus toggle handling

mod menu;
mod view_state;

pub use menu::*;
pub use view_state::*;
