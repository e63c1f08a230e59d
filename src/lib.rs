#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

mod constants;
mod context;
mod decimal;
mod error;
mod ops;
mod str;

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde;

pub use crate::context::{
    default_context, set_default_approximation, set_default_context, set_default_div_precision,
    set_default_format, Approximation, Context, Format,
};
pub use crate::decimal::BigDecimal;
pub use crate::error::Error;
