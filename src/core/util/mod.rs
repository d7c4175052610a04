pub mod blocking;
pub mod money_util;
