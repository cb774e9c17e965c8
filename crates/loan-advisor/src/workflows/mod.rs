pub mod intake;
pub mod offers;
