// Domain models

mod interface;

pub use interface::{InterfaceRecord, NetworkSnapshot};
