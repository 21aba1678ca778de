//! Animated navigation drawer
//!
//! - [`machine`]: the Closed/Opening/Open/Closing state machine and its
//!   animation channels
//! - [`view`]: the controlled component hosts mount, feed input to and
//!   render from

pub mod machine;
pub mod view;

pub use machine::{DrawerChannel, DrawerConfig, DrawerIntent, DrawerMachine, DrawerPhase, Transition};
pub use view::{Drawer, DrawerCallback, DrawerFrame, DrawerMenuItem, DrawerProps};
