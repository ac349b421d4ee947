//! 写命令能力：值转换、写命令分发、命令总线抽象。

mod bus;
mod convert;
mod dispatch;

pub use bus::{BusError, CommandBus, InMemoryCommandBus};
pub use convert::{ConvertError, convert};
pub use dispatch::{WriteDispatcher, WriteError};
