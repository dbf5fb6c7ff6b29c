pub mod success;

pub use success::SuccessPopup;
