pub mod new;
pub mod pack;
