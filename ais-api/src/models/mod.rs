mod indication;
mod limitation;
mod sensor;
mod user;

pub use indication::*;
pub use limitation::*;
pub use sensor::*;
pub use user::*;

pub type Id = i32;
