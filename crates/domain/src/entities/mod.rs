pub mod department;
pub mod employee;
pub mod views;

pub use department::*;
pub use employee::*;
pub use views::*;
