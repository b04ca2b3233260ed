//! Share register (aktiebok).
//!
//! A limited company must keep a register of its shares and owners
//! (aktiebolagslagen 5 kap.). Shares are numbered from 1 and each owner holds
//! one contiguous range.

pub mod error;
pub mod register;

pub use error::ShareRegisterError;
pub use register::{ShareRange, ShareRegister, Shareholder};
