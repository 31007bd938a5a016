//! Process lifecycle: startup sequencing lives in `main`, shutdown here.

pub mod shutdown;

pub use shutdown::Shutdown;
