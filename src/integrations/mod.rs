//! External service integrations.

pub mod sir_client {
    pub use crate::sir_client::*;
}
