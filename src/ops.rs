mod add;
mod approx;
mod cmp;
pub(crate) mod common;
mod div;
mod mul;
mod round;

pub(crate) use add::{add_impl, sub_impl};
pub(crate) use approx::approx_impl;
pub(crate) use cmp::cmp_impl;
pub(crate) use div::{div_impl, rem_impl};
pub(crate) use mul::mul_impl;
pub(crate) use round::{ceil_impl, floor_impl, round_impl, trunc_impl};
